//! Cohort ages and inclusive age ranges

use std::fmt;

use crate::domain::error::DomainError;

/// Age of a cohort, in years.
pub type Age = u16;

/// An inclusive interval of cohort ages.
///
/// Immutable once built; `start <= end` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AgeRange {
    start: Age,
    end: Age,
}

impl AgeRange {
    pub fn new(start: Age, end: Age) -> Result<Self, DomainError> {
        if start > end {
            return Err(DomainError::InvalidRange { start, end });
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> Age {
        self.start
    }

    pub fn end(&self) -> Age {
        self.end
    }

    /// Is `age` within the closed interval?
    pub fn contains(&self, age: Age) -> bool {
        self.start <= age && age <= self.end
    }

    /// Do the two closed intervals share at least one age?
    pub fn overlaps(&self, other: &AgeRange) -> bool {
        self.start <= other.end && other.start <= self.end
    }
}

impl fmt::Display for AgeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

/// A single age token or a range token, as read from a species line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgeOrRange {
    Age(Age),
    Range(AgeRange),
}

impl fmt::Display for AgeOrRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AgeOrRange::Age(age) => write!(f, "{}", age),
            AgeOrRange::Range(range) => write!(f, "{}", range),
        }
    }
}

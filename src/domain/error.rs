//! Domain-level errors (no external dependencies)

use thiserror::Error;

use crate::domain::age_range::Age;

/// Domain errors represent value-level and set-consistency violations.
/// They carry the literal token text but no source position; the readers
/// attach line numbers when wrapping them.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("invalid age range {start}-{end}: start is greater than end")]
    InvalidRange { start: Age, end: Age },

    #[error("\"{text}\" is not a valid age or age range")]
    InvalidAge { text: String },

    #[error("the age {text} appears more than once")]
    DuplicateAge { text: String },

    #[error("the age {text} lies within a previous age range: {range_start}-{range_end}")]
    AgeInRange {
        text: String,
        range_start: Age,
        range_end: Age,
    },

    #[error("the age range {text} contains the age {age}, which appeared earlier")]
    RangeContainsAge { text: String, age: Age },

    #[error("the age range {text} overlaps with the previous age range {range_start}-{range_end}")]
    OverlappingRange {
        text: String,
        range_start: Age,
        range_end: Age,
    },

    #[error("\"{text}\" is not valid: the denominator of 1/N must be a positive integer")]
    InvalidDivisor { text: String },

    #[error("species name listed more than once: {name}")]
    DuplicateSpeciesName { name: String },
}

impl DomainError {
    /// True for the set-consistency violations raised while accumulating ages
    /// and ranges for one species.
    pub fn is_overlap(&self) -> bool {
        matches!(
            self,
            DomainError::AgeInRange { .. }
                | DomainError::RangeContainsAge { .. }
                | DomainError::OverlappingRange { .. }
        )
    }
}

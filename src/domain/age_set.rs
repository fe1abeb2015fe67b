//! Accumulation and validation of the ages and age ranges given for one species.

use std::collections::BTreeSet;

use tracing::trace;

use crate::domain::age_range::{Age, AgeOrRange, AgeRange};
use crate::domain::error::DomainError;
use crate::domain::selector::{CohortSelector, SpecificAges};

/// Collects ages and ranges for a single species line, rejecting any entry
/// that repeats or overlaps something already collected.
///
/// Lives for the duration of one species line and is consumed by
/// [`AgeSet::into_selector`].
#[derive(Debug, Default)]
pub struct AgeSet {
    ages: BTreeSet<Age>,
    ranges: Vec<AgeRange>,
}

impl AgeSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an age or range read from the literal token `text`.
    ///
    /// `text` is echoed in the error so diagnostics quote the input exactly.
    pub fn add(&mut self, item: AgeOrRange, text: &str) -> Result<(), DomainError> {
        trace!("add: {} ({:?})", text, item);
        match item {
            AgeOrRange::Age(age) => self.add_age(age, text),
            AgeOrRange::Range(range) => self.add_range(range, text),
        }
    }

    fn add_age(&mut self, age: Age, text: &str) -> Result<(), DomainError> {
        if self.ages.contains(&age) {
            return Err(DomainError::DuplicateAge {
                text: text.to_string(),
            });
        }
        if let Some(range) = self.ranges.iter().find(|r| r.contains(age)) {
            return Err(DomainError::AgeInRange {
                text: text.to_string(),
                range_start: range.start(),
                range_end: range.end(),
            });
        }
        self.ages.insert(age);
        Ok(())
    }

    fn add_range(&mut self, range: AgeRange, text: &str) -> Result<(), DomainError> {
        if let Some(&age) = self.ages.iter().find(|&&a| range.contains(a)) {
            return Err(DomainError::RangeContainsAge {
                text: text.to_string(),
                age,
            });
        }
        if let Some(previous) = self.ranges.iter().find(|r| r.overlaps(&range)) {
            return Err(DomainError::OverlappingRange {
                text: text.to_string(),
                range_start: previous.start(),
                range_end: previous.end(),
            });
        }
        self.ranges.push(range);
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.ages.is_empty() && self.ranges.is_empty()
    }

    pub fn ages(&self) -> &BTreeSet<Age> {
        &self.ages
    }

    pub fn ranges(&self) -> &[AgeRange] {
        &self.ranges
    }

    /// Freeze the collected entries into a selector.
    pub fn into_selector(self) -> CohortSelector {
        CohortSelector::SpecificAges(self.into_specific_ages())
    }

    pub(crate) fn into_specific_ages(mut self) -> SpecificAges {
        self.ranges.sort();
        SpecificAges::from_validated(self.ages, self.ranges)
    }
}

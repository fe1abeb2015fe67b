//! Cohort selection rules and their evaluation against a cohort collection.

use std::collections::BTreeSet;
use std::fmt;
use std::num::NonZeroU16;

use itertools::Itertools;

use crate::domain::age_range::{Age, AgeOrRange, AgeRange};
use crate::domain::age_set::AgeSet;
use crate::domain::error::DomainError;

/// Keywords that name a selection rule on their own.
pub const KEYWORDS: [&str; 5] = [
    "All",
    "Youngest",
    "AllExceptYoungest",
    "Oldest",
    "AllExceptOldest",
];

/// Prefix of the every-Nth-cohort token, `1/<N>`.
pub const EVERY_NTH_PREFIX: &str = "1/";

/// Anything with a cohort age. Implemented by the host's cohort type.
pub trait HasAge {
    fn age(&self) -> Age;
}

impl HasAge for Age {
    fn age(&self) -> Age {
        *self
    }
}

/// Which cohorts of one species a harvest removes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CohortSelector {
    All,
    Youngest,
    Oldest,
    AllExceptYoungest,
    AllExceptOldest,
    /// Every N-th cohort, counted by increasing age.
    EveryNth(NonZeroU16),
    SpecificAges(SpecificAges),
}

impl CohortSelector {
    /// Map a keyword token to its rule.
    ///
    /// Returns `Ok(None)` when `word` is neither a keyword nor a `1/N` token,
    /// so the caller can treat it as an age.
    pub fn from_keyword(word: &str) -> Result<Option<Self>, DomainError> {
        let selector = match word {
            "All" => CohortSelector::All,
            "Youngest" => CohortSelector::Youngest,
            "AllExceptYoungest" => CohortSelector::AllExceptYoungest,
            "Oldest" => CohortSelector::Oldest,
            "AllExceptOldest" => CohortSelector::AllExceptOldest,
            _ => match word.strip_prefix(EVERY_NTH_PREFIX) {
                Some(divisor) => CohortSelector::EveryNth(parse_divisor(word, divisor)?),
                None => return Ok(None),
            },
        };
        Ok(Some(selector))
    }

    /// Select cohorts from `cohorts`.
    ///
    /// The result is ordered by increasing age; cohorts of equal age keep
    /// their input order.
    pub fn select<'a, C: HasAge>(&self, cohorts: &'a [C]) -> Vec<&'a C> {
        let mut sorted: Vec<&C> = cohorts.iter().collect();
        sorted.sort_by_key(|c| c.age());

        let (youngest, oldest) = match (sorted.first(), sorted.last()) {
            (Some(first), Some(last)) => (first.age(), last.age()),
            _ => return Vec::new(),
        };

        match self {
            CohortSelector::All => sorted,
            CohortSelector::Youngest => keep(sorted, |age| age == youngest),
            CohortSelector::Oldest => keep(sorted, |age| age == oldest),
            CohortSelector::AllExceptYoungest => keep(sorted, |age| age != youngest),
            CohortSelector::AllExceptOldest => keep(sorted, |age| age != oldest),
            CohortSelector::EveryNth(n) => {
                let n = usize::from(n.get());
                sorted
                    .into_iter()
                    .enumerate()
                    .filter(|(i, _)| (i + 1) % n == 0)
                    .map(|(_, c)| c)
                    .collect()
            }
            CohortSelector::SpecificAges(specific) => keep(sorted, |age| specific.covers(age)),
        }
    }
}

fn keep<'a, C: HasAge>(cohorts: Vec<&'a C>, predicate: impl Fn(Age) -> bool) -> Vec<&'a C> {
    cohorts.into_iter().filter(|c| predicate(c.age())).collect()
}

fn parse_divisor(word: &str, divisor: &str) -> Result<NonZeroU16, DomainError> {
    divisor
        .parse::<u16>()
        .ok()
        .and_then(NonZeroU16::new)
        .ok_or_else(|| DomainError::InvalidDivisor {
            text: word.to_string(),
        })
}

impl fmt::Display for CohortSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CohortSelector::All => write!(f, "All"),
            CohortSelector::Youngest => write!(f, "Youngest"),
            CohortSelector::Oldest => write!(f, "Oldest"),
            CohortSelector::AllExceptYoungest => write!(f, "AllExceptYoungest"),
            CohortSelector::AllExceptOldest => write!(f, "AllExceptOldest"),
            CohortSelector::EveryNth(n) => write!(f, "{}{}", EVERY_NTH_PREFIX, n),
            CohortSelector::SpecificAges(specific) => write!(f, "{}", specific),
        }
    }
}

/// Explicit ages and age ranges for one species.
///
/// No age lies inside a range, no two ranges overlap and no age repeats.
/// Only built through [`AgeSet`], so the invariant holds from construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecificAges {
    ages: BTreeSet<Age>,
    ranges: Vec<AgeRange>,
}

impl SpecificAges {
    /// Validate and build from loose entries, in the given order.
    pub fn new(entries: impl IntoIterator<Item = AgeOrRange>) -> Result<Self, DomainError> {
        let mut set = AgeSet::new();
        for entry in entries {
            set.add(entry, &entry.to_string())?;
        }
        Ok(set.into_specific_ages())
    }

    pub(crate) fn from_validated(ages: BTreeSet<Age>, ranges: Vec<AgeRange>) -> Self {
        Self { ages, ranges }
    }

    pub fn ages(&self) -> &BTreeSet<Age> {
        &self.ages
    }

    /// Ranges, ordered by start age.
    pub fn ranges(&self) -> &[AgeRange] {
        &self.ranges
    }

    /// Is `age` listed or inside a listed range?
    pub fn covers(&self, age: Age) -> bool {
        self.ages.contains(&age) || self.ranges.iter().any(|r| r.contains(age))
    }
}

impl fmt::Display for SpecificAges {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let entries = self
            .ages
            .iter()
            .map(|&a| (a, AgeOrRange::Age(a)))
            .chain(self.ranges.iter().map(|&r| (r.start(), AgeOrRange::Range(r))))
            .sorted_by_key(|(start, _)| *start)
            .map(|(_, entry)| entry);
        write!(f, "{}", entries.format(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_keywords_when_parsing_then_each_maps_to_its_rule() {
        for keyword in KEYWORDS {
            let selector = CohortSelector::from_keyword(keyword).unwrap().unwrap();
            assert_eq!(selector.to_string(), keyword);
        }
    }

    #[test]
    fn given_lowercase_keyword_when_parsing_then_not_recognized() {
        assert_eq!(CohortSelector::from_keyword("all"), Ok(None));
        assert_eq!(CohortSelector::from_keyword("youngest"), Ok(None));
    }

    #[test]
    fn given_age_token_when_parsing_keyword_then_returns_none() {
        assert_eq!(CohortSelector::from_keyword("10"), Ok(None));
        assert_eq!(CohortSelector::from_keyword("10-20"), Ok(None));
    }

    #[test]
    fn given_every_nth_token_when_parsing_then_keeps_divisor() {
        let selector = CohortSelector::from_keyword("1/3").unwrap().unwrap();
        assert_eq!(selector, CohortSelector::EveryNth(NonZeroU16::new(3).unwrap()));
        assert_eq!(selector.to_string(), "1/3");
    }

    #[test]
    fn given_mixed_entries_when_displaying_then_sorted_by_start() {
        let specific = SpecificAges::new([
            AgeOrRange::Range(AgeRange::new(40, 50).unwrap()),
            AgeOrRange::Age(5),
            AgeOrRange::Age(60),
            AgeOrRange::Range(AgeRange::new(10, 20).unwrap()),
        ])
        .unwrap();

        assert_eq!(specific.to_string(), "5 10-20 40-50 60");
    }

    #[test]
    fn given_no_cohorts_when_selecting_then_selects_nothing() {
        let cohorts: Vec<Age> = Vec::new();
        assert!(CohortSelector::All.select(&cohorts).is_empty());
        assert!(CohortSelector::Youngest.select(&cohorts).is_empty());
    }
}

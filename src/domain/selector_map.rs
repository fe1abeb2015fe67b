//! Species to cohort-selector mapping produced by one specification block.

use std::collections::BTreeMap;

use crate::domain::selector::{CohortSelector, HasAge};
use crate::domain::species::Species;

/// One selector per species. Built by the readers, read-only for callers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpeciesCohortSelectors {
    selectors: BTreeMap<Species, CohortSelector>,
}

impl SpeciesCohortSelectors {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn insert(&mut self, species: Species, selector: CohortSelector) {
        self.selectors.insert(species, selector);
    }

    pub fn get(&self, species: &Species) -> Option<&CohortSelector> {
        self.selectors.get(species)
    }

    pub fn contains(&self, species: &Species) -> bool {
        self.selectors.contains_key(species)
    }

    pub fn len(&self) -> usize {
        self.selectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selectors.is_empty()
    }

    /// Entries ordered by species index.
    pub fn iter(&self) -> impl Iterator<Item = (&Species, &CohortSelector)> {
        self.selectors.iter()
    }

    /// Apply the species' selector to its cohorts; species without a
    /// selector lose no cohorts.
    pub fn select<'a, C: HasAge>(&self, species: &Species, cohorts: &'a [C]) -> Vec<&'a C> {
        self.get(species)
            .map(|selector| selector.select(cohorts))
            .unwrap_or_default()
    }
}

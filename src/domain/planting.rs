//! Species planted after a harvest.

use std::fmt;

use crate::domain::species::Species;

/// One species to plant, with an optional planting density.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlantingEntry {
    pub species: Species,
    /// `None` when no density was given (distinct from zero).
    pub density: Option<u32>,
}

impl fmt::Display for PlantingEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.density {
            Some(density) => write!(f, "{} ({})", self.species, density),
            None => write!(f, "{}", self.species),
        }
    }
}

/// Species to plant, in input order; each species appears once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlantingList {
    entries: Vec<PlantingEntry>,
}

impl PlantingList {
    pub(crate) fn from_entries(entries: Vec<PlantingEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[PlantingEntry] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = &PlantingEntry> {
        self.entries.iter()
    }

    pub fn species(&self) -> impl Iterator<Item = &Species> {
        self.entries.iter().map(|e| &e.species)
    }

    pub fn contains(&self, species: &Species) -> bool {
        self.entries.iter().any(|e| &e.species == species)
    }

    /// Density given for `species`, if it is listed and has one.
    pub fn density(&self, species: &Species) -> Option<u32> {
        self.entries
            .iter()
            .find(|e| &e.species == species)
            .and_then(|e| e.density)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

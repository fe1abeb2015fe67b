//! Species identities and name resolution.

use std::collections::HashMap;
use std::fmt;

use crate::domain::error::DomainError;

/// A tree species known to the host's species dataset.
///
/// Two values are the same species when the dataset gave them the same index.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Species {
    index: usize,
    name: String,
}

impl Species {
    pub fn new(index: usize, name: impl Into<String>) -> Self {
        Self {
            index,
            name: name.into(),
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for Species {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Name to species resolution, provided by the host.
pub trait SpeciesDataset: Send + Sync {
    /// Look up a species by its exact (case-sensitive) name.
    fn get(&self, name: &str) -> Option<Species>;

    /// Number of species in the dataset.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// In-memory species dataset; indices follow the order names were given.
#[derive(Debug, Clone, Default)]
pub struct SpeciesList {
    species: Vec<Species>,
    by_name: HashMap<String, usize>,
}

impl SpeciesList {
    pub fn new<I, S>(names: I) -> Result<Self, DomainError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut list = Self::default();
        for name in names {
            let name = name.into();
            if list.by_name.contains_key(&name) {
                return Err(DomainError::DuplicateSpeciesName { name });
            }
            let index = list.species.len();
            list.by_name.insert(name.clone(), index);
            list.species.push(Species::new(index, name));
        }
        Ok(list)
    }

    /// Parse a species file: names separated by whitespace.
    ///
    /// Everything after `>>` on a line is a comment.
    pub fn parse(content: &str) -> Result<Self, DomainError> {
        let names = content
            .lines()
            .map(|line| line.split(">>").next().unwrap_or_default())
            .flat_map(str::split_whitespace);
        Self::new(names)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Species> {
        self.species.iter()
    }
}

impl SpeciesDataset for SpeciesList {
    fn get(&self, name: &str) -> Option<Species> {
        self.by_name
            .get(name)
            .map(|&index| self.species[index].clone())
    }

    fn len(&self) -> usize {
        self.species.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_species_file_with_comments_when_parsing_then_skips_comments() {
        let content = r#">> species used in the thinning scenarios
PinuSyl  PinuBan   >> pines
AbieBals
"#;

        let list = SpeciesList::parse(content).unwrap();

        assert_eq!(list.len(), 3);
        assert_eq!(list.get("AbieBals").map(|s| s.index()), Some(2));
    }

    #[test]
    fn given_duplicate_name_when_building_then_fails() {
        let result = SpeciesList::new(["PinuSyl", "PinuSyl"]);
        assert_eq!(
            result.unwrap_err(),
            DomainError::DuplicateSpeciesName {
                name: "PinuSyl".to_string()
            }
        );
    }

    #[test]
    fn given_different_case_when_looking_up_then_not_found() {
        let list = SpeciesList::new(["PinuSyl"]).unwrap();
        assert!(list.get("pinusyl").is_none());
        assert!(list.get("PinuSyl").is_some());
    }
}

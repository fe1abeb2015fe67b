//! Domain layer: ages, selection rules, species and planting entities
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod age_range;
pub mod age_set;
pub mod error;
pub mod planting;
pub mod selector;
pub mod selector_map;
pub mod species;

pub use age_range::{Age, AgeOrRange, AgeRange};
pub use age_set::AgeSet;
pub use error::DomainError;
pub use planting::{PlantingEntry, PlantingList};
pub use selector::{CohortSelector, HasAge, SpecificAges, EVERY_NTH_PREFIX, KEYWORDS};
pub use selector_map::SpeciesCohortSelectors;
pub use species::{Species, SpeciesDataset, SpeciesList};

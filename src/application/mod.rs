//! Application layer: readers and services
//!
//! This layer turns specification text into domain values and depends on
//! the line-source and filesystem boundary traits.

pub mod cohort_reader;
pub mod error;
pub mod error_ext;
pub mod planting_reader;
pub mod prescription;
pub mod services;
pub mod tokens;

pub use cohort_reader::CohortSpecificationReader;
pub use error::{
    ApplicationError, ApplicationResult, AtLine, ParseError, ParseErrorKind, ParseResult,
};
pub use error_ext::IoResultExt;
pub use planting_reader::{PlantingListReader, MAX_DENSITY, PLANT_KEYWORD};
pub use prescription::{
    CohortRemoval, HarvestSpec, Prescription, PrescriptionReader, RepeatHarvest, RepeatKind,
};
pub use tokens::{parse_age, parse_age_or_range, LineCursor};

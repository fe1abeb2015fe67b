//! Application services

pub mod harvest;

pub use harvest::{FileReport, HarvestService};

//! Parsing of forest harvest specifications.
//!
//! Species cohort selectors (`All`, `1/3`, `10 20-40`, ...), planting lists
//! (`Plant PinuSyl (500) PinuBan`) and harvest prescriptions built from them.

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;

//! CLI layer: argument parsing and command dispatch

pub mod args;
pub mod commands;
pub mod error;
pub mod output;
pub mod tree;

pub use args::{Cli, Commands, ConfigCommands};
pub use commands::execute;
pub use error::{CliError, CliResult};

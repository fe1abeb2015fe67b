//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueHint};

/// Parse and check forest harvest prescriptions: cohort selectors, planting lists and repeats
#[derive(Parser, Debug)]
#[command(name = "harvest-spec")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Debug output, repeat for more (-d, -dd, -ddd)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub debug: u8,

    /// Config file layered over the global config
    #[arg(short, long, global = true, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// Species dataset file (overrides `species_file` from config)
    #[arg(short, long, global = true, env = "HARVEST_SPEC_SPECIES", value_hint = ValueHint::FilePath)]
    pub species: Option<PathBuf>,

    /// Reject selector keywords; only ages and ranges are accepted
    #[arg(long, global = true)]
    pub no_keywords: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Parse prescription files and report errors
    Check {
        /// Prescription files
        #[arg(required = true, value_hint = ValueHint::FilePath)]
        files: Vec<PathBuf>,
    },

    /// Print the parsed prescriptions of a file as a tree
    Show {
        /// Prescription file
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
    },

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show merged config
    Show,

    /// Print config template
    Template,

    /// Show config paths
    Path,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    // https://docs.rs/clap/latest/clap/_derive/_tutorial/index.html#testing
    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn given_repeated_debug_flag_when_parsing_then_counts_occurrences() {
        let cli = Cli::try_parse_from(["harvest-spec", "-dd", "check", "a.txt"]).unwrap();
        assert_eq!(cli.debug, 2);
        assert!(matches!(cli.command, Some(Commands::Check { ref files }) if files.len() == 1));
    }

    #[test]
    fn given_check_without_files_when_parsing_then_fails() {
        assert!(Cli::try_parse_from(["harvest-spec", "check"]).is_err());
    }
}

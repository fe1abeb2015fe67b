//! Command implementations

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use clap::CommandFactory;
use clap_complete::generate;
use tracing::{debug, instrument};

use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::error::{CliError, CliResult};
use crate::cli::output;
use crate::cli::tree::ToTree;
use crate::config::{global_config_path, Settings};
use crate::domain::SpeciesList;
use crate::infrastructure::di::ServiceContainer;
use crate::infrastructure::InfraError;

/// Execute the CLI command.
pub fn execute(cli: &Cli) -> CliResult<()> {
    match &cli.command {
        Some(Commands::Completion { shell }) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(*shell, &mut cmd, name, &mut io::stdout());
            Ok(())
        }
        Some(Commands::Config { command }) => execute_config(cli, command),
        Some(Commands::Check { files }) => execute_check(&container(cli)?, files),
        Some(Commands::Show { file }) => execute_show(&container(cli)?, file),
        None => Err(CliError::Usage("no command given, see --help".to_string())),
    }
}

/// Load settings and apply command-line overrides.
fn load_settings(cli: &Cli) -> CliResult<Settings> {
    let mut settings = Settings::load(cli.config.as_deref())?;
    if let Some(species) = &cli.species {
        settings.species_file = Some(species.clone());
    }
    if cli.no_keywords {
        settings.parser.keywords = false;
    }
    debug!("settings: {:?}", settings);
    Ok(settings)
}

fn container(cli: &Cli) -> CliResult<ServiceContainer> {
    Ok(ServiceContainer::new(load_settings(cli)?))
}

fn load_species(container: &ServiceContainer) -> CliResult<SpeciesList> {
    let path = container.settings.species_file.as_deref().ok_or_else(|| {
        CliError::InvalidArgs(
            "no species dataset: pass --species or set species_file in config".to_string(),
        )
    })?;
    Ok(container.harvest_service().load_species(path)?)
}

#[instrument(level = "debug", skip(container))]
fn execute_check(container: &ServiceContainer, files: &[PathBuf]) -> CliResult<()> {
    let species = load_species(container)?;
    let service = container.harvest_service();

    let reports = service.check_files(files, &species);
    let mut failed = 0;
    for report in &reports {
        match &report.result {
            Ok(prescriptions) => output::success(&format!(
                "{} ({} prescriptions)",
                report.path.display(),
                prescriptions.len()
            )),
            Err(e) => {
                failed += 1;
                output::failure(e);
            }
        }
    }

    if failed > 0 {
        return Err(CliError::Failed {
            failed,
            total: reports.len(),
        });
    }
    Ok(())
}

#[instrument(level = "debug", skip(container))]
fn execute_show(container: &ServiceContainer, file: &Path) -> CliResult<()> {
    let species = load_species(container)?;
    let prescriptions = container.harvest_service().parse_file(file, &species)?;

    output::header(&file.display());
    let mut out = io::stdout().lock();
    for prescription in &prescriptions {
        writeln!(out, "{}", prescription.to_tree())
            .map_err(|e| InfraError::io("write prescription tree", e))?;
    }
    Ok(())
}

fn execute_config(cli: &Cli, command: &ConfigCommands) -> CliResult<()> {
    match command {
        ConfigCommands::Show => {
            let settings = load_settings(cli)?;
            output::info(&settings.to_toml()?);
        }
        ConfigCommands::Template => output::info(&Settings::template()),
        ConfigCommands::Path => {
            match global_config_path() {
                Some(path) if path.exists() => {
                    output::detail(&format!("global: {}", path.display()))
                }
                Some(path) => {
                    output::detail(&format!("global: {} (not found)", path.display()))
                }
                None => output::warning("cannot determine config directory"),
            }
            if let Some(local) = &cli.config {
                output::detail(&format!("local:  {}", local.display()));
            }
        }
    }
    Ok(())
}

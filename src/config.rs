//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/harvest-spec/harvest-spec.toml`
//! 3. Local config: file given with `--config`
//! 4. Environment variables: `HARVEST_SPEC__*` prefix

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::application::planting_reader::MAX_DENSITY;
use crate::application::ApplicationError;

/// Parser policy settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ParserSettings {
    /// Accept selector keywords (`All`, `Youngest`, `1/N`, ...)
    pub keywords: bool,
    /// Largest accepted planting density
    pub max_density: u32,
}

impl Default for ParserSettings {
    fn default() -> Self {
        Self {
            keywords: true,
            max_density: MAX_DENSITY,
        }
    }
}

/// Raw parser settings for intermediate parsing (`None` → not specified).
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawParserSettings {
    pub keywords: Option<bool>,
    pub max_density: Option<u32>,
}

impl ParserSettings {
    /// Overlay wins where it specifies a value.
    pub fn merge(&self, overlay: &RawParserSettings) -> Self {
        Self {
            keywords: overlay.keywords.unwrap_or(self.keywords),
            max_density: overlay.max_density.unwrap_or(self.max_density),
        }
    }
}

/// Raw settings for intermediate parsing.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub species_file: Option<PathBuf>,
    #[serde(default)]
    pub parser: RawParserSettings,
}

/// Unified configuration for harvest-spec.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
pub struct Settings {
    /// Species dataset used to resolve names (one name per word)
    pub species_file: Option<PathBuf>,
    /// Parser policy
    pub parser: ParserSettings,
}

/// Get the XDG config directory for harvest-spec.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "harvest-spec").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("harvest-spec.toml"))
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

impl Settings {
    /// Expand shell variables and tilde in path-like fields.
    fn expand_paths(&mut self) {
        if let Some(path) = &self.species_file {
            let expanded = shellexpand::full(path.to_string_lossy().as_ref())
                .map(|s| s.into_owned())
                .unwrap_or_else(|_| path.to_string_lossy().into_owned());
            self.species_file = Some(PathBuf::from(expanded));
        }
    }

    /// Merge overlay config onto self (base).
    ///
    /// Relative `species_file` paths in the overlay are resolved against
    /// `base_dir`, the directory of the file the overlay came from.
    fn merge_with(&self, overlay: &RawSettings, base_dir: Option<&Path>) -> Self {
        let species_file = overlay
            .species_file
            .as_ref()
            .map(|path| match base_dir {
                Some(dir) if path.is_relative() && !path.starts_with("~") => dir.join(path),
                _ => path.clone(),
            })
            .or_else(|| self.species_file.clone());
        Self {
            species_file,
            parser: self.parser.merge(&overlay.parser),
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `local_config` - Optional config file; it must exist when given
    ///
    /// # Precedence (lowest to highest)
    /// 1. Compiled defaults
    /// 2. Global config: `$XDG_CONFIG_HOME/harvest-spec/harvest-spec.toml`
    /// 3. Local config file
    /// 4. Environment variables: `HARVEST_SPEC__*` prefix
    pub fn load(local_config: Option<&Path>) -> Result<Self, ApplicationError> {
        // 1. Start with defaults
        let mut current = Self::default();

        // 2. Global config
        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                let raw = load_raw_settings(&global_path)?;
                current = current.merge_with(&raw, global_path.parent());
            }
        }

        // 3. Local config
        if let Some(local_path) = local_config {
            if !local_path.exists() {
                return Err(ApplicationError::Config {
                    message: format!("config file not found: {}", local_path.display()),
                });
            }
            let raw = load_raw_settings(local_path)?;
            current = current.merge_with(&raw, local_path.parent());
        }

        // 4. Environment variables (explicit override)
        current = Self::apply_env_overrides(current)?;

        current.expand_paths();

        Ok(current)
    }

    /// Apply HARVEST_SPEC__* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, ApplicationError> {
        let config = Config::builder()
            .add_source(Environment::with_prefix("HARVEST_SPEC").separator("__"))
            .build()
            .map_err(config_err)?;

        if let Some(val) = optional(config.get_string("species_file"))? {
            settings.species_file = Some(PathBuf::from(val));
        }
        if let Some(val) = optional(config.get_bool("parser.keywords"))? {
            settings.parser.keywords = val;
        }
        if let Some(val) = optional(config.get_int("parser.max_density"))? {
            settings.parser.max_density =
                u32::try_from(val).map_err(|_| ApplicationError::Config {
                    message: format!("parser.max_density out of range: {}", val),
                })?;
        }

        Ok(settings)
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        format!(
            r#"# harvest-spec configuration
#
# Locations (by precedence, lowest to highest):
#   Global: ~/.config/harvest-spec/harvest-spec.toml
#   Local:  file passed with --config
#   Env:    HARVEST_SPEC__* environment variables
#           (e.g. HARVEST_SPEC__PARSER__MAX_DENSITY=5000)

# Species dataset: species names separated by whitespace, ">>" starts a comment.
# Relative paths are resolved against the directory of this file.
# species_file = "species.txt"

[parser]
# Accept All, Youngest, AllExceptYoungest, Oldest, AllExceptOldest and 1/N
# keywords = true

# Largest accepted planting density
# max_density = {MAX_DENSITY}
"#
        )
    }
}

/// Treat a missing key as "not set"; anything else is an error.
fn optional<T>(result: Result<T, ConfigError>) -> Result<Option<T>, ApplicationError> {
    match result {
        Ok(val) => Ok(Some(val)),
        Err(ConfigError::NotFound(_)) => Ok(None),
        Err(e) => Err(config_err(e)),
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_default_settings_when_created_then_keywords_on_and_density_bound_set() {
        let settings = Settings::default();
        assert!(settings.parser.keywords);
        assert_eq!(settings.parser.max_density, 100_000);
        assert!(settings.species_file.is_none());
    }

    #[test]
    fn given_partial_overlay_when_merging_parser_then_unspecified_values_kept() {
        let base = ParserSettings::default();
        let overlay = RawParserSettings {
            keywords: Some(false),
            max_density: None,
        };

        let result = base.merge(&overlay);

        assert!(!result.keywords);
        assert_eq!(result.max_density, MAX_DENSITY);
    }

    #[test]
    fn given_relative_species_file_when_merging_then_resolved_against_config_dir() {
        let overlay = RawSettings {
            species_file: Some(PathBuf::from("species.txt")),
            parser: RawParserSettings::default(),
        };

        let result = Settings::default().merge_with(&overlay, Some(Path::new("/etc/harvest")));

        assert_eq!(
            result.species_file,
            Some(PathBuf::from("/etc/harvest/species.txt"))
        );
    }

    #[test]
    fn given_tilde_in_species_file_when_expand_paths_then_expands_to_home() {
        let mut settings = Settings {
            species_file: Some(PathBuf::from("~/species.txt")),
            parser: ParserSettings::default(),
        };

        settings.expand_paths();

        let home = std::env::var("HOME").expect("HOME should be set");
        let path = settings.species_file.unwrap();
        assert!(
            path.to_string_lossy().starts_with(&home),
            "species_file should start with home dir: {}",
            path.display()
        );
    }

    #[test]
    fn given_template_when_parsed_then_is_valid_toml() {
        let raw: RawSettings = toml::from_str(&Settings::template()).expect("template parses");
        assert!(raw.species_file.is_none());
        assert!(raw.parser.max_density.is_none());
    }
}

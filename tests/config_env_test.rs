//! Environment variable overrides for Settings.
//!
//! Kept in a separate test binary so setting process environment variables
//! cannot race with the file-based config tests.

use std::fs;

use tempfile::TempDir;

use harvest_spec::config::Settings;

#[test]
fn given_env_overrides_when_load_then_env_wins_over_local_config() {
    // Arrange
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("harvest.toml");
    fs::write(
        &path,
        r#"
species_file = "/srv/species.txt"

[parser]
keywords = true
max_density = 5000
"#,
    )
    .unwrap();
    std::env::set_var("HARVEST_SPEC__PARSER__MAX_DENSITY", "250");
    std::env::set_var("HARVEST_SPEC__PARSER__KEYWORDS", "false");
    std::env::set_var("HARVEST_SPEC__SPECIES_FILE", "/opt/species.txt");

    // Act
    let settings = Settings::load(Some(&path));

    std::env::remove_var("HARVEST_SPEC__PARSER__MAX_DENSITY");
    std::env::remove_var("HARVEST_SPEC__PARSER__KEYWORDS");
    std::env::remove_var("HARVEST_SPEC__SPECIES_FILE");

    // Assert
    let settings = settings.expect("load settings");
    assert_eq!(settings.parser.max_density, 250);
    assert!(!settings.parser.keywords);
    assert_eq!(
        settings.species_file.as_deref(),
        Some(std::path::Path::new("/opt/species.txt"))
    );
}

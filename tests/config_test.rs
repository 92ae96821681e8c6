//! Integration tests for Settings config loading with layered precedence.
//!
//! Note: These tests assume no global config is present, so an explicit file
//! layers directly over the compiled defaults.

use std::fs;

use tempfile::TempDir;

use arbor::application::ApplicationError;
use arbor::config::Settings;

#[test]
fn given_explicit_config_when_load_then_overrides_defaults() {
    // Arrange
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("arbor.toml");
    fs::write(&path, "[codec]\nmax_nodes = 64\n").unwrap();

    // Act
    let settings = Settings::load(Some(&path)).expect("load settings");

    // Assert
    assert_eq!(settings.codec.max_nodes, Some(64));
    assert!(settings.output.color, "unspecified keys keep defaults");
}

#[test]
fn given_invalid_toml_when_load_then_config_error_names_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.toml");
    fs::write(&path, "[codec\nmax_nodes = ").unwrap();

    let err = Settings::load(Some(&path)).unwrap_err();

    match err {
        ApplicationError::Config { message } => assert!(message.contains("broken.toml")),
        other => panic!("expected config error, got {other:?}"),
    }
}

#[test]
fn given_wrong_value_type_when_load_then_config_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("typed.toml");
    fs::write(&path, "[output]\ncolor = \"sometimes\"\n").unwrap();

    assert!(matches!(
        Settings::load(Some(&path)),
        Err(ApplicationError::Config { .. })
    ));
}

//! Environment variable overrides for Settings.
//!
//! Kept in its own test binary: it mutates process-wide environment variables.

use std::fs;
use std::sync::Mutex;

use tempfile::TempDir;

use arbor::application::ApplicationError;
use arbor::config::Settings;

// tests in this binary run in parallel threads sharing one environment
static ENV_LOCK: Mutex<()> = Mutex::new(());

#[test]
fn given_env_vars_when_load_then_env_wins_over_file() {
    let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("arbor.toml");
    fs::write(&path, "[codec]\nmax_nodes = 64\n[output]\ncolor = true\n").unwrap();

    std::env::set_var("ARBOR_CODEC__MAX_NODES", "8");
    std::env::set_var("ARBOR_OUTPUT__COLOR", "false");
    let settings = Settings::load(Some(&path));
    std::env::remove_var("ARBOR_CODEC__MAX_NODES");
    std::env::remove_var("ARBOR_OUTPUT__COLOR");

    let settings = settings.expect("load settings");
    assert_eq!(settings.codec.max_nodes, Some(8));
    assert!(!settings.output.color);
}

#[test]
fn given_unparsable_env_var_when_load_then_config_error() {
    let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());

    std::env::set_var("ARBOR_CODEC__MAX_NODES", "abc");
    let result = Settings::load(None);
    std::env::remove_var("ARBOR_CODEC__MAX_NODES");

    match result {
        Err(ApplicationError::Config { message }) => {
            assert!(message.contains("codec.max_nodes"), "got: {message}")
        }
        other => panic!("expected config error, got {other:?}"),
    }
}

#[test]
fn given_render_depth_env_var_when_load_then_applied() {
    let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());

    std::env::set_var("ARBOR_OUTPUT__MAX_RENDER_DEPTH", "16");
    let settings = Settings::load(None);
    std::env::remove_var("ARBOR_OUTPUT__MAX_RENDER_DEPTH");

    assert_eq!(settings.expect("load settings").output.max_render_depth, 16);
}

//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/arbor/arbor.toml`
//! 3. Explicit config file (`--config`)
//! 4. Environment variables: `ARBOR_*` prefix

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::application::ApplicationError;
use crate::domain::render::DEFAULT_RENDER_DEPTH;

/// Decoding limits.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct CodecConfig {
    /// Reject inputs describing more nodes than this (unlimited if unset)
    pub max_nodes: Option<usize>,
}

/// Terminal output settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct OutputConfig {
    /// Colored status and error output
    pub color: bool,
    /// `show` refuses trees deeper than this
    pub max_render_depth: usize,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            color: true,
            max_render_depth: DEFAULT_RENDER_DEPTH,
        }
    }
}

/// Effective settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    pub codec: CodecConfig,
    pub output: OutputConfig,
}

/// Raw settings for intermediate parsing (`None` means "not specified").
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct RawSettings {
    codec: RawCodecConfig,
    output: RawOutputConfig,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct RawCodecConfig {
    max_nodes: Option<usize>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct RawOutputConfig {
    color: Option<bool>,
    max_render_depth: Option<usize>,
}

/// Get the XDG config directory for arbor.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "arbor").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("arbor.toml"))
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
    /// Overlay wins where it specifies a value.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            codec: CodecConfig {
                max_nodes: overlay.codec.max_nodes.or(self.codec.max_nodes),
            },
            output: OutputConfig {
                color: overlay.output.color.unwrap_or(self.output.color),
                max_render_depth: overlay
                    .output
                    .max_render_depth
                    .unwrap_or(self.output.max_render_depth),
            },
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `explicit` - Optional config file given on the command line; it must exist
    ///
    /// # Precedence (lowest to highest)
    /// 1. Compiled defaults
    /// 2. Global config: `$XDG_CONFIG_HOME/arbor/arbor.toml`
    /// 3. Explicit config file
    /// 4. Environment variables: `ARBOR_*` prefix, `__` between section and key
    #[instrument(level = "debug")]
    pub fn load(explicit: Option<&Path>) -> Result<Self, ApplicationError> {
        let mut current = Self::default();

        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                debug!(path = %global_path.display(), "loading global config");
                current = current.merge_with(&load_raw_settings(&global_path)?);
            }
        }

        if let Some(path) = explicit {
            debug!(path = %path.display(), "loading explicit config");
            current = current.merge_with(&load_raw_settings(path)?);
        }

        Self::apply_env_overrides(current)
    }

    /// Apply ARBOR_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, ApplicationError> {
        let config = Config::builder()
            .add_source(
                Environment::with_prefix("ARBOR")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()
            .map_err(config_err)?;

        if let Some(val) = env_value::<usize>(&config, "codec.max_nodes")? {
            settings.codec.max_nodes = Some(val);
        }
        if let Some(val) = env_value::<bool>(&config, "output.color")? {
            settings.output.color = val;
        }
        if let Some(val) = env_value::<usize>(&config, "output.max_render_depth")? {
            settings.output.max_render_depth = val;
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
        r#"# arbor configuration
#
# Locations (by precedence, lowest to highest):
#   Global:   ~/.config/arbor/arbor.toml
#   Explicit: arbor --config <FILE>
#   Env:      ARBOR_* environment variables, e.g. ARBOR_CODEC__MAX_NODES=1000

[codec]
# Reject encoded trees with more nodes than this (unset: no limit)
# max_nodes = 100000

[output]
# Colored status and error output
# color = true
# Deepest tree `show` renders
# max_render_depth = 256
"#
        .to_string()
    }
}

/// An unset variable is `None`; one that does not parse is an error.
fn env_value<'de, T: Deserialize<'de>>(
    config: &Config,
    key: &str,
) -> Result<Option<T>, ApplicationError> {
    match config.get::<T>(key) {
        Ok(val) => Ok(Some(val)),
        Err(ConfigError::NotFound(_)) => Ok(None),
        Err(e) => {
            debug!(key, error = %e, "invalid environment override");
            Err(ApplicationError::Config {
                message: format!("environment override {key}: {e}"),
            })
        }
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
    fn given_defaults_when_created_then_unlimited_and_colored() {
        let settings = Settings::default();
        assert_eq!(settings.codec.max_nodes, None);
        assert!(settings.output.color);
    }

    #[test]
    fn given_partial_overlay_when_merging_then_keeps_unspecified_values() {
        let base = Settings {
            codec: CodecConfig {
                max_nodes: Some(10),
            },
            output: OutputConfig {
                color: true,
                max_render_depth: 8,
            },
        };
        let overlay: RawSettings = toml::from_str("[output]\ncolor = false\n").unwrap();

        let merged = base.merge_with(&overlay);

        assert_eq!(merged.codec.max_nodes, Some(10));
        assert!(!merged.output.color);
        assert_eq!(merged.output.max_render_depth, 8);
    }

    #[test]
    fn given_settings_when_rendered_as_toml_then_parses_back() {
        let settings = Settings {
            codec: CodecConfig {
                max_nodes: Some(42),
            },
            output: OutputConfig {
                color: false,
                max_render_depth: 12,
            },
        };
        let rendered = settings.to_toml().unwrap();
        let parsed: Settings = toml::from_str(&rendered).unwrap();
        assert_eq!(parsed, settings);
    }

    #[test]
    fn given_template_when_parsed_then_yields_defaults() {
        let parsed: Settings = toml::from_str(&Settings::template()).unwrap();
        assert_eq!(parsed, Settings::default());
    }
}

//! Layered runtime configuration.
//!
//! Precedence (lowest to highest): defaults, global file under the XDG
//! config directory, workspace `fieldsync.toml`, `FIELDSYNC_*` environment
//! variables.

use std::path::{Path, PathBuf};

use config::{Config, Environment, File};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::logging::LoggingConfig;

/// Workspace configuration file name.
pub const WORKSPACE_FILE: &str = "fieldsync.toml";

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FieldsyncConfig {
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Template file watch settings
    #[serde(default)]
    pub watch: WatchSettings,
}

/// Template file watch settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WatchSettings {
    /// Debounce window for file change events, in milliseconds
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
}

fn default_debounce_ms() -> u64 {
    250
}

impl Default for WatchSettings {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
        }
    }
}

/// Configuration loader
pub struct ConfigLoader;

impl ConfigLoader {
    /// Global config file under the XDG config directory, if resolvable.
    pub fn global_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "fieldsync").map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Load with full layering rooted at `workspace`.
    pub fn load(workspace: &Path) -> Result<FieldsyncConfig, ConfigError> {
        let mut builder = Config::builder();
        if let Some(global) = Self::global_path() {
            builder = builder.add_source(File::from(global).required(false));
        }
        let config = builder
            .add_source(File::from(workspace.join(WORKSPACE_FILE)).required(false))
            .add_source(Environment::with_prefix("FIELDSYNC").separator("__"))
            .build()?;
        Ok(config.try_deserialize()?)
    }

    /// Load a single explicit file, skipping the layered sources.
    pub fn load_from_file(path: &Path) -> Result<FieldsyncConfig, ConfigError> {
        let config = Config::builder()
            .add_source(File::from(path.to_path_buf()).required(true))
            .build()?;
        Ok(config.try_deserialize()?)
    }
}

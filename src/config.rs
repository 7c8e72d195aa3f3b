//! Configuration module for cloudplan.
//!
//! Handles loading global configuration from `cloudplan.toml` (or a path
//! given with `--config`), falling back to defaults when no file exists.
//! Per-stack configuration lives in YAML files under the stacks directory
//! and is handled by [`crate::stack`].

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Default settings.
    pub defaults: Defaults,

    /// Colors and output settings.
    pub colors: ColorsConfig,

    /// Logging settings.
    pub logging: LoggingConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            defaults: Defaults::default(),
            colors: ColorsConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

/// Default configuration values.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Defaults {
    /// Project name recorded in manifests.
    pub project: String,

    /// Stack used when no `--stack` is given.
    pub stack: String,

    /// Directory holding per-stack YAML configuration files.
    pub stacks_dir: PathBuf,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            project: "cloudplan".to_string(),
            stack: "dev".to_string(),
            stacks_dir: PathBuf::from("stacks"),
        }
    }
}

/// Color output settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorsConfig {
    /// Whether colored output is enabled.
    pub enabled: bool,
}

impl Default for ColorsConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default log level when no verbosity flag is given.
    pub log_level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            log_level: "warn".to_string(),
        }
    }
}

impl Config {
    /// The default configuration file name, looked up in the working
    /// directory.
    pub const DEFAULT_FILE: &'static str = "cloudplan.toml";

    /// Loads configuration from an explicit path, or from
    /// `./cloudplan.toml` when present, or returns defaults.
    pub fn load(path: Option<&PathBuf>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => {
                let default = Path::new(Self::DEFAULT_FILE);
                if default.exists() {
                    Self::from_file(default)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    /// Loads configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }
}

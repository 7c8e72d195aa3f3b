//! Stack context and per-stack configuration.
//!
//! A stack is a named, isolated instance of a declared graph ("dev",
//! "prod"). The [`StackContext`] carries the project name, the stack name,
//! and the stack's configuration: plain key/value settings plus declared
//! secret slots. Secrets never surface as literals: [`StackContext::secret`]
//! yields an [`AttrValue::Secret`] reference that the reconciliation engine
//! resolves on its side.

use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};
use crate::resource::AttrValue;

/// Per-stack configuration loaded from `stacks/<stack>.yaml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StackConfig {
    /// Plain configuration values.
    pub config: IndexMap<String, String>,
    /// Declared secret slots. The value tells the engine where to find the
    /// material, e.g. `env:ADMIN_PASSWORD`; cloudplan never reads it.
    pub secrets: IndexMap<String, String>,
}

impl StackConfig {
    /// Loads a stack configuration file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::StackConfigLoad {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        serde_yaml::from_str(&content).map_err(|e| Error::StackConfigLoad {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Sets a configuration value. Used by tests and programmatic callers.
    pub fn set(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.config.insert(key.into(), value.into());
        self
    }

    /// Declares a secret slot.
    pub fn declare_secret(mut self, name: impl Into<String>, source: impl Into<String>) -> Self {
        self.secrets.insert(name.into(), source.into());
        self
    }
}

/// The environment a blueprint builds against: project, stack, and stack
/// configuration.
#[derive(Debug, Clone)]
pub struct StackContext {
    project: String,
    stack: String,
    config: StackConfig,
}

impl StackContext {
    /// Creates a context with an empty configuration.
    pub fn new(project: impl Into<String>, stack: impl Into<String>) -> Self {
        Self {
            project: project.into(),
            stack: stack.into(),
            config: StackConfig::default(),
        }
    }

    /// Attaches a stack configuration.
    pub fn with_config(mut self, config: StackConfig) -> Self {
        self.config = config;
        self
    }

    /// Loads the context for a stack from `<stacks_dir>/<stack>.yaml`.
    ///
    /// A missing file yields an empty configuration; blueprints that require
    /// keys will report them individually.
    pub fn load(project: &str, stacks_dir: &Path, stack: &str) -> Result<Self> {
        let path: PathBuf = stacks_dir.join(format!("{stack}.yaml"));
        let config = if path.exists() {
            StackConfig::load(&path)?
        } else {
            debug!(path = %path.display(), "no stack config file, using empty config");
            StackConfig::default()
        };
        Ok(Self::new(project, stack).with_config(config))
    }

    /// Project name.
    pub fn project(&self) -> &str {
        &self.project
    }

    /// Stack name.
    pub fn stack(&self) -> &str {
        &self.stack
    }

    /// Looks up an optional configuration value.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.config.config.get(key).map(String::as_str)
    }

    /// Looks up a configuration value with a fallback.
    pub fn get_or(&self, key: &str, default: &str) -> String {
        self.get(key).unwrap_or(default).to_string()
    }

    /// Looks up a required configuration value.
    pub fn require(&self, key: &str) -> Result<String> {
        self.get(key)
            .map(str::to_string)
            .ok_or_else(|| Error::MissingConfig {
                stack: self.stack.clone(),
                key: key.to_string(),
            })
    }

    /// Builds a secret reference for a declared slot.
    pub fn secret(&self, name: &str) -> Result<AttrValue> {
        if self.config.secrets.contains_key(name) {
            Ok(AttrValue::Secret(name.to_string()))
        } else {
            Err(Error::MissingSecret {
                stack: self.stack.clone(),
                name: name.to_string(),
            })
        }
    }

    /// Declared secret slots for the manifest.
    pub fn secrets(&self) -> &IndexMap<String, String> {
        &self.config.secrets
    }
}

//! Configuration System
//!
//! Layered configuration for the fixture builder: where data files live, which
//! document bare keys resolve against, how overrides merge, and the random seed.

use crate::error::BuildError;
use crate::generation::CallerId;
use crate::logging::LoggingConfig;
use crate::value::MergeStrategy;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

mod facade;
mod merge;
mod sources;

pub use facade::ConfigLoader;
pub use sources::environment::PREFIX as ENV_PREFIX;
pub use sources::workspace_file::{BASE_FILE as WORKSPACE_CONFIG_FILE, ENV_NAME_VAR};

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuilderConfig {
    /// Directory holding the YAML data files
    #[serde(default = "default_data_path")]
    pub data_path: PathBuf,

    /// Document used for bare record keys
    #[serde(default = "default_source")]
    pub source: String,

    /// Fixed seed for repeatable generation; OS entropy when absent
    #[serde(default)]
    pub seed: Option<u64>,

    /// Caller identity scoping `sequential` cursors
    #[serde(default = "default_caller")]
    pub caller: String,

    #[serde(default)]
    pub merge: MergeStrategy,

    #[serde(default)]
    pub logging: LoggingConfig,
}

fn default_data_path() -> PathBuf {
    PathBuf::from("data")
}

fn default_source() -> String {
    "default.yml".to_string()
}

fn default_caller() -> String {
    CallerId::default().as_str().to_string()
}

impl Default for BuilderConfig {
    fn default() -> Self {
        Self {
            data_path: default_data_path(),
            source: default_source(),
            seed: None,
            caller: default_caller(),
            merge: MergeStrategy::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl BuilderConfig {
    /// Configuration reading data files from `data_path`, everything else default.
    pub fn with_data_path(data_path: impl Into<PathBuf>) -> Self {
        Self {
            data_path: data_path.into(),
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), BuildError> {
        if self.data_path.as_os_str().is_empty() {
            return Err(BuildError::ConfigError(
                "data_path cannot be empty".to_string(),
            ));
        }
        if self.source.trim().is_empty() {
            return Err(BuildError::ConfigError("source cannot be empty".to_string()));
        }
        if self.caller.is_empty() {
            return Err(BuildError::ConfigError("caller cannot be empty".to_string()));
        }
        Ok(())
    }

    pub fn caller_id(&self) -> CallerId {
        CallerId::new(self.caller.as_str())
    }

    /// Resolve a relative `data_path` against `base`.
    pub fn anchored_at(mut self, base: &Path) -> Self {
        if self.data_path.is_relative() {
            self.data_path = base.join(&self.data_path);
        }
        self
    }
}

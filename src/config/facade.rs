//! Loader facade: assembles the layered sources into a [`BuilderConfig`].

use super::merge::merge_policy;
use super::sources::{environment, global_file, workspace_file};
use super::BuilderConfig;
use config::{ConfigError, File};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Configuration loader
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration for a workspace.
    ///
    /// Layers, lowest to highest: defaults, user config file, workspace
    /// `fixture-builder.toml`, `fixture-builder.{FIXTURE_BUILDER_ENV}.toml`,
    /// `FIXTURE_BUILDER_*` environment variables. A relative `data_path` is
    /// resolved against `workspace_root`.
    pub fn load(workspace_root: &Path) -> Result<BuilderConfig, ConfigError> {
        let builder = merge_policy::builder_with_defaults()?;
        let builder = global_file::add_to_builder(builder)?;
        let builder = workspace_file::add_to_builder(builder, workspace_root)?;
        let builder = environment::add_to_builder(builder);

        let config: BuilderConfig = builder.build()?.try_deserialize()?;
        let config = config.anchored_at(workspace_root);
        debug!(
            data_path = %config.data_path.display(),
            source = %config.source,
            "Loaded configuration"
        );
        Ok(config)
    }

    /// Load from one explicit file (plus defaults and environment overrides).
    /// A relative `data_path` is resolved against the file's directory.
    pub fn load_from_file(path: &Path) -> Result<BuilderConfig, ConfigError> {
        if !path.is_file() {
            return Err(ConfigError::NotFound(path.display().to_string()));
        }
        let builder = merge_policy::builder_with_defaults()?
            .add_source(File::from(path).required(true));
        let builder = environment::add_to_builder(builder);

        let config: BuilderConfig = builder.build()?.try_deserialize()?;
        let base = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));
        Ok(config.anchored_at(&base))
    }

    /// Path of the user-level config file, if a home directory is known.
    pub fn user_config_path() -> Option<PathBuf> {
        global_file::global_config_path()
    }
}

//! Workspace config file source: fixture-builder.toml and fixture-builder.{env}.toml

use config::builder::DefaultState;
use config::ConfigBuilder;
use config::ConfigError;
use config::File;
use std::path::Path;

/// Selects the environment-specific workspace file.
pub const ENV_NAME_VAR: &str = "FIXTURE_BUILDER_ENV";

pub const BASE_FILE: &str = "fixture-builder.toml";

/// Add workspace config files to builder.
/// Precedence: fixture-builder.toml (base) then fixture-builder.{FIXTURE_BUILDER_ENV}.toml.
pub fn add_to_builder(
    builder: ConfigBuilder<DefaultState>,
    workspace_root: &Path,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    let mut builder = builder;

    let base_config_path = workspace_root.join(BASE_FILE);
    if base_config_path.is_file() {
        builder = builder.add_source(File::from(base_config_path).required(false));
    }

    if let Ok(env_name) = std::env::var(ENV_NAME_VAR) {
        let env_config_path = workspace_root.join(format!("fixture-builder.{}.toml", env_name));
        if env_config_path.is_file() {
            builder = builder.add_source(File::from(env_config_path).required(false));
        }
    }

    Ok(builder)
}

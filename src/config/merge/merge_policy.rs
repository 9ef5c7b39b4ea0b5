//! Merge rules: defaults, override order, conflict handling.

use config::Config;
use config::ConfigBuilder;
use config::ConfigError;

/// Create a Config builder with the built-in defaults as its lowest layer.
pub fn builder_with_defaults() -> Result<ConfigBuilder<config::builder::DefaultState>, ConfigError>
{
    Config::builder()
        .set_default("data_path", "data")?
        .set_default("source", "default.yml")?
        .set_default("merge", "shallow")?
        .set_default("caller", "default")
}

//! Environment variable source: FIXTURE_BUILDER_<KEY>, nested keys joined by `__`
//! (e.g. FIXTURE_BUILDER_LOGGING__LEVEL).

use config::builder::DefaultState;
use config::ConfigBuilder;
use config::Environment;

pub const PREFIX: &str = "FIXTURE_BUILDER";

pub fn add_to_builder(builder: ConfigBuilder<DefaultState>) -> ConfigBuilder<DefaultState> {
    builder.add_source(
        Environment::with_prefix(PREFIX)
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true),
    )
}

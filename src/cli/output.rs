//! CLI output: value rendering, vocabulary table and error mapping.

use crate::error::BuildError;
use crate::generation::CapabilitySpec;
use crate::value::Value;
use clap::ValueEnum;
use comfy_table::presets::UTF8_BORDERS_ONLY;
use comfy_table::Table;

/// Rendering for resolved records
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Yaml,
    Toml,
}

/// Map domain errors to a string for CLI output.
pub fn map_error(e: &BuildError) -> String {
    match e {
        BuildError::SourceUnavailable(source) => format!("Data source unavailable: {}", source),
        other => other.to_string(),
    }
}

pub fn render_value(value: &Value, format: OutputFormat) -> Result<String, BuildError> {
    match format {
        OutputFormat::Json => {
            serde_json::to_string_pretty(value).map_err(|e| BuildError::Output(e.to_string()))
        }
        OutputFormat::Yaml => serde_yaml::to_string(value)
            .map(|text| text.trim_end().to_string())
            .map_err(|e| BuildError::Output(e.to_string())),
        OutputFormat::Toml => {
            if value.as_mapping().is_none() {
                return Err(BuildError::Output(format!(
                    "toml output needs a mapping, got {}",
                    value.kind()
                )));
            }
            toml::to_string_pretty(value)
                .map(|text| text.trim_end().to_string())
                .map_err(|e| BuildError::Output(e.to_string()))
        }
    }
}

/// Vocabulary as a table: name, arguments, description.
pub fn format_capabilities_table(specs: &[CapabilitySpec]) -> String {
    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(vec!["Generator", "Arguments", "Description"]);
    for spec in specs {
        let name = if spec.takes_receiver {
            format!("N.{}", spec.name)
        } else {
            spec.name.to_string()
        };
        table.add_row(vec![name, spec.params.to_string(), spec.summary.to_string()]);
    }
    table.to_string()
}

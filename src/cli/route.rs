//! CLI route: single route table and run context.

use crate::builder::DataBuilder;
use crate::cli::output::{format_capabilities_table, render_value};
use crate::cli::parse::Commands;
use crate::config::{BuilderConfig, ConfigLoader};
use crate::error::BuildError;
use crate::generation::{CallerId, VOCABULARY};
use crate::value::{Mapping, Value};
use std::path::PathBuf;
use tracing::debug;

/// Runtime context for CLI execution: loaded configuration and the data builder.
pub struct RunContext {
    builder: DataBuilder,
    workspace_root: PathBuf,
}

impl RunContext {
    /// Load configuration (explicit file or workspace layers), apply CLI overrides and
    /// open the data builder.
    pub fn new(
        workspace_root: PathBuf,
        config_path: Option<PathBuf>,
        seed: Option<u64>,
        caller: Option<String>,
    ) -> Result<Self, BuildError> {
        let mut config = match config_path {
            Some(ref cfg_path) => ConfigLoader::load_from_file(cfg_path)?,
            None => ConfigLoader::load(&workspace_root)?,
        };
        if seed.is_some() {
            config.seed = seed;
        }
        if let Some(caller) = caller {
            config.caller = caller;
        }
        Self::from_config(workspace_root, config)
    }

    pub fn from_config(workspace_root: PathBuf, config: BuilderConfig) -> Result<Self, BuildError> {
        let builder = DataBuilder::new(config)?;
        Ok(Self {
            builder,
            workspace_root,
        })
    }

    pub fn workspace_root(&self) -> &PathBuf {
        &self.workspace_root
    }

    pub fn caller(&self) -> &CallerId {
        self.builder.caller()
    }

    /// Execute a CLI command via the single route table.
    pub fn execute(&mut self, command: &Commands) -> Result<String, BuildError> {
        match command {
            Commands::Resolve {
                key,
                overrides,
                format,
            } => {
                let overrides = parse_overrides(overrides)?;
                debug!(key = %key, "Resolving from CLI");
                let value = self.builder.data_for(key, &overrides)?;
                render_value(&value, *format)
            }
            Commands::Eval { expression } => {
                let value = self.builder.evaluate(expression)?;
                Ok(value.to_string())
            }
            Commands::Capabilities => Ok(format_capabilities_table(VOCABULARY)),
        }
    }
}

/// Split `field=value`; the value is read as a YAML scalar so `3` and `true` keep
/// their types and `~city` stays a directive.
pub fn parse_assignment(assignment: &str) -> Result<(String, Value), BuildError> {
    let (field, raw) = assignment.split_once('=').ok_or_else(|| {
        BuildError::ConfigError(format!("Expected FIELD=VALUE, got '{}'", assignment))
    })?;
    let field = field.trim();
    if field.is_empty() || field.split('.').any(str::is_empty) {
        return Err(BuildError::ConfigError(format!(
            "Invalid override field in '{}'",
            assignment
        )));
    }
    let value = if raw.trim().is_empty() {
        Value::from(raw)
    } else {
        serde_yaml::from_str(raw).unwrap_or_else(|_| Value::from(raw))
    };
    Ok((field.to_string(), value))
}

/// Build the override mapping from `--set` assignments; dotted fields nest.
fn parse_overrides(assignments: &[String]) -> Result<Value, BuildError> {
    if assignments.is_empty() {
        return Ok(Value::Null);
    }
    let mut root = Mapping::new();
    for assignment in assignments {
        let (field, value) = parse_assignment(assignment)?;
        insert_path(&mut root, &field, value);
    }
    Ok(Value::Mapping(root))
}

fn insert_path(map: &mut Mapping, path: &str, value: Value) {
    match path.split_once('.') {
        None => {
            map.insert(path.to_string(), value);
        }
        Some((head, rest)) => {
            let entry = map
                .entry(head.to_string())
                .or_insert_with(|| Value::Mapping(Mapping::new()));
            if !matches!(entry, Value::Mapping(_)) {
                *entry = Value::Mapping(Mapping::new());
            }
            if let Value::Mapping(child) = entry {
                insert_path(child, rest, value);
            }
        }
    }
}

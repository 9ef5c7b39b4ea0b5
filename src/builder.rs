//! Data Builder
//!
//! The lookup surface used by test code: `data_for("account/test", overrides)`
//! returns the named record with overrides merged and every directive generated.
//! One builder is one explicit context (data source, evaluator, caller identity);
//! nothing is held in globals except the default cursor store.

use crate::config::BuilderConfig;
use crate::error::BuildError;
use crate::generation::{CallerId, CursorStore, DirectiveEvaluator};
use crate::resolver::StructuralResolver;
use crate::source::{DataSource, YamlDataSource};
use crate::value::{Document, Value, DIRECTIVE_MARKER};
use std::sync::Arc;
use tracing::debug;

/// Separates the data file from the record name in `file/record` keys.
pub const FILE_SEPARATOR: char = '/';

/// Extension appended to the file part of `file/record` keys.
pub const DATA_FILE_EXTENSION: &str = "yml";

/// Record lookup façade
pub struct DataBuilder {
    config: BuilderConfig,
    source: Box<dyn DataSource>,
    evaluator: DirectiveEvaluator,
    caller: CallerId,
}

impl DataBuilder {
    /// Builder reading YAML files from `config.data_path`.
    pub fn new(config: BuilderConfig) -> Result<Self, BuildError> {
        config.validate()?;
        let source = Box::new(YamlDataSource::new(config.data_path.clone()));
        let evaluator = DirectiveEvaluator::new(config.seed);
        Ok(Self::from_parts(config, source, evaluator))
    }

    /// Builder over explicit collaborators.
    pub fn from_parts(
        config: BuilderConfig,
        source: Box<dyn DataSource>,
        evaluator: DirectiveEvaluator,
    ) -> Self {
        let caller = config.caller_id();
        Self {
            config,
            source,
            evaluator,
            caller,
        }
    }

    pub fn with_caller(mut self, caller: impl Into<CallerId>) -> Self {
        self.caller = caller.into();
        self
    }

    /// Use a private cursor store instead of the process-wide one.
    pub fn with_cursor_store(mut self, cursors: Arc<CursorStore>) -> Self {
        self.evaluator = self.evaluator.with_cursor_store(cursors);
        self
    }

    pub fn caller(&self) -> &CallerId {
        &self.caller
    }

    pub fn config(&self) -> &BuilderConfig {
        &self.config
    }

    pub fn evaluator(&self) -> &DirectiveEvaluator {
        &self.evaluator
    }

    /// Name of the document bare keys currently resolve against.
    pub fn current_source(&self) -> Option<&str> {
        self.source.current_name()
    }

    /// Make `file_name` the current document.
    pub fn load(&mut self, file_name: &str) -> Result<Arc<Document>, BuildError> {
        Ok(self.source.load(file_name)?)
    }

    /// The record named by `key`, with `overrides` merged and directives resolved.
    ///
    /// `key` is either a record name in the current document (the configured default
    /// document is loaded when none is current) or `file/record`, which loads
    /// `file.yml` first. `overrides` may target the record by name
    /// (`{"test": {...}}`) or apply as a whole; pass `Value::Null` for none.
    pub fn data_for(&mut self, key: &str, overrides: &Value) -> Result<Value, BuildError> {
        let (document, record) = match key.split_once(FILE_SEPARATOR) {
            Some((file, record)) => {
                if file.is_empty() || record.is_empty() || record.contains(FILE_SEPARATOR) {
                    return Err(BuildError::UndefinedKey(key.to_string()));
                }
                let document = self
                    .source
                    .load(&format!("{}.{}", file, DATA_FILE_EXTENSION))?;
                (document, record)
            }
            None => (self.current_or_default()?, key),
        };

        let resolver = StructuralResolver::new(&self.evaluator, &self.caller)
            .with_merge_strategy(self.config.merge);
        let directives = document
            .get(record)
            .map(Value::directive_count)
            .unwrap_or(0)
            + crate::resolver::override_payload(overrides, record).directive_count();

        let value = resolver
            .resolve(&document, overrides, record)
            .map_err(|err| match err {
                BuildError::UndefinedKey(_) => BuildError::UndefinedKey(key.to_string()),
                other => other,
            })?;

        debug!(
            key,
            caller = %self.caller,
            source = self.source.current_name().unwrap_or_default(),
            directives,
            "Resolved fixture data"
        );
        Ok(value)
    }

    /// Evaluate a single directive, with or without its leading `~`.
    pub fn evaluate(&self, expression: &str) -> Result<Value, BuildError> {
        let body = expression
            .strip_prefix(DIRECTIVE_MARKER)
            .unwrap_or(expression);
        self.evaluator
            .evaluate(body, &self.caller)
            .map_err(|err| BuildError::from_eval(expression, err))
    }

    fn current_or_default(&mut self) -> Result<Arc<Document>, BuildError> {
        match self.source.current_document() {
            Some(document) => Ok(document),
            None => {
                let name = self.config.source.clone();
                Ok(self.source.load(&name)?)
            }
        }
    }
}

//! Structural Resolver
//!
//! Turns a stored record into fixture data: picks the override payload, merges it
//! onto a copy of the record, then walks the copy replacing every directive string
//! with its generated value. The stored record is never modified.

use crate::error::BuildError;
use crate::generation::{CallerId, DirectiveEvaluator};
use crate::value::{Document, MergeStrategy, Value};
use tracing::{debug, trace};

/// Resolves records for one caller against one evaluator
pub struct StructuralResolver<'a> {
    evaluator: &'a DirectiveEvaluator,
    caller: &'a CallerId,
    strategy: MergeStrategy,
}

/// The part of `overrides` that applies to record `key`.
///
/// Overrides keyed by the record's own name (`{"test": {...}}`) target that record;
/// anything else is applied as a whole.
pub fn override_payload<'v>(overrides: &'v Value, key: &str) -> &'v Value {
    overrides.get(key).unwrap_or(overrides)
}

impl<'a> StructuralResolver<'a> {
    pub fn new(evaluator: &'a DirectiveEvaluator, caller: &'a CallerId) -> Self {
        Self {
            evaluator,
            caller,
            strategy: MergeStrategy::default(),
        }
    }

    pub fn with_merge_strategy(mut self, strategy: MergeStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Resolve record `key` of `document` with `overrides` applied.
    pub fn resolve(
        &self,
        document: &Document,
        overrides: &Value,
        key: &str,
    ) -> Result<Value, BuildError> {
        let record = document
            .get(key)
            .ok_or_else(|| BuildError::UndefinedKey(key.to_string()))?;

        let merged = record.merged_with(override_payload(overrides, key), self.strategy);
        debug!(
            key,
            caller = %self.caller,
            directives = merged.directive_count(),
            "Resolving record"
        );
        self.resolve_value(merged)
    }

    /// Replace every directive inside `value`. Consumes the (already copied) value.
    pub fn resolve_value(&self, value: Value) -> Result<Value, BuildError> {
        match value {
            Value::Mapping(map) => map
                .into_iter()
                .map(|(field, item)| Ok((field, self.resolve_value(item)?)))
                .collect::<Result<_, BuildError>>()
                .map(Value::Mapping),
            Value::Sequence(items) => items
                .into_iter()
                .map(|item| self.resolve_value(item))
                .collect::<Result<Vec<_>, _>>()
                .map(Value::Sequence),
            Value::String(text) => match text.strip_prefix(crate::value::DIRECTIVE_MARKER) {
                Some(expression) => {
                    trace!(directive = %text, "Generating value");
                    self.evaluator
                        .evaluate(expression, self.caller)
                        .map_err(|err| BuildError::from_eval(&text, err))
                }
                None => Ok(Value::String(text)),
            },
            scalar => Ok(scalar),
        }
    }
}

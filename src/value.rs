//! Fixture Values
//!
//! The recursive value model shared by data files, overrides and generated output,
//! together with the merge rules applied before directive resolution.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::ops::Index;

/// Marker that turns a string scalar into a generation directive.
pub const DIRECTIVE_MARKER: char = '~';

/// Field name -> value
pub type Mapping = BTreeMap<String, Value>;

/// One parsed data file: record name -> record
pub type Document = BTreeMap<String, Value>;

static NULL: Value = Value::Null;

/// A fixture value: scalar, mapping or ordered sequence.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Integer(i64),
    Float(f64),
    String(String),
    Sequence(Vec<Value>),
    Mapping(Mapping),
}

/// How an override payload is laid onto a record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MergeStrategy {
    /// Top-level override keys replace record keys outright
    #[default]
    Shallow,
    /// Nested mappings are merged key by key
    Deep,
}

impl Value {
    /// Build a mapping value from key/value pairs.
    pub fn mapping<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        Value::Mapping(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// The expression of a directive-marked string, without the marker.
    ///
    /// Only string scalars can be directives.
    pub fn directive(&self) -> Option<&str> {
        match self {
            Value::String(s) => s.strip_prefix(DIRECTIVE_MARKER),
            _ => None,
        }
    }

    /// Number of directive strings anywhere inside this value.
    pub fn directive_count(&self) -> usize {
        match self {
            Value::Mapping(map) => map.values().map(Value::directive_count).sum(),
            Value::Sequence(items) => items.iter().map(Value::directive_count).sum(),
            other => usize::from(other.directive().is_some()),
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        match self {
            Value::Mapping(map) => map.get(key),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Integer(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&[Value]> {
        match self {
            Value::Sequence(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_mapping(&self) -> Option<&Mapping> {
        match self {
            Value::Mapping(map) => Some(map),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Short type name used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Null => "nil",
            Value::Bool(_) => "boolean",
            Value::Integer(_) => "integer",
            Value::Float(_) => "float",
            Value::String(_) => "string",
            Value::Sequence(_) => "sequence",
            Value::Mapping(_) => "mapping",
        }
    }

    /// Lay `payload` over this value, producing an independent copy.
    ///
    /// A null payload leaves the value as is; a non-mapping payload, or any payload
    /// over a non-mapping value, replaces it outright.
    pub fn merged_with(&self, payload: &Value, strategy: MergeStrategy) -> Value {
        match (self, payload) {
            (_, Value::Null) => self.clone(),
            (Value::Mapping(base), Value::Mapping(overrides)) => {
                let mut merged = base.clone();
                for (key, value) in overrides {
                    let next = match (strategy, merged.get(key), value) {
                        (MergeStrategy::Deep, Some(existing @ Value::Mapping(_)), Value::Mapping(_)) => {
                            existing.merged_with(value, strategy)
                        }
                        _ => value.clone(),
                    };
                    merged.insert(key.clone(), next);
                }
                Value::Mapping(merged)
            }
            _ => payload.clone(),
        }
    }
}

impl Index<&str> for Value {
    type Output = Value;

    /// Missing keys and non-mapping values index to `Null`.
    fn index(&self, key: &str) -> &Value {
        self.get(key).unwrap_or(&NULL)
    }
}

impl Index<usize> for Value {
    type Output = Value;

    fn index(&self, index: usize) -> &Value {
        match self {
            Value::Sequence(items) => items.get(index).unwrap_or(&NULL),
            _ => &NULL,
        }
    }
}

/// Renders scalars as plain text (the form used by `+` concatenation);
/// compound values render as JSON.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => Ok(()),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Integer(n) => write!(f, "{}", n),
            Value::Float(x) => write!(f, "{}", x),
            Value::String(s) => f.write_str(s),
            compound => {
                let json = serde_json::to_string(compound).map_err(|_| fmt::Error)?;
                f.write_str(&json)
            }
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Integer(n)
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Float(x)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Sequence(items)
    }
}

impl From<Mapping> for Value {
    fn from(map: Mapping) -> Self {
        Value::Mapping(map)
    }
}

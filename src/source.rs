//! Data Sources
//!
//! Loads named YAML documents of records. The source remembers which document is
//! current so bare record keys can be resolved against it.

use crate::error::SourceError;
use crate::value::{Document, Mapping, Value};
use serde_yaml::Value as Yaml;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

/// Provider of record documents
pub trait DataSource: Send {
    /// Load `name` (e.g. `account.yml`) and make it the current document.
    fn load(&mut self, name: &str) -> Result<Arc<Document>, SourceError>;

    fn current_document(&self) -> Option<Arc<Document>>;

    fn current_name(&self) -> Option<&str>;
}

/// YAML files under a data directory, parsed once per file.
pub struct YamlDataSource {
    data_path: PathBuf,
    cache: HashMap<String, Arc<Document>>,
    current: Option<(String, Arc<Document>)>,
}

impl YamlDataSource {
    pub fn new(data_path: impl Into<PathBuf>) -> Self {
        Self {
            data_path: data_path.into(),
            cache: HashMap::new(),
            current: None,
        }
    }

    pub fn data_path(&self) -> &Path {
        &self.data_path
    }

    /// Forget every parsed document, including the current one.
    pub fn clear(&mut self) {
        self.cache.clear();
        self.current = None;
    }

    fn read(&self, name: &str) -> Result<Document, SourceError> {
        let path = self.data_path.join(name);
        if !path.is_file() {
            return Err(SourceError::NotFound(path));
        }
        let text = std::fs::read_to_string(&path).map_err(|source| SourceError::Io {
            path: path.clone(),
            source,
        })?;
        parse_document(&path, &text)
    }
}

/// Parse YAML text whose top level must be a mapping of records.
///
/// An empty file is an empty document. Merge keys (`<<`) are applied, and scalar
/// mapping keys such as `200` or `true` are read as their text.
pub fn parse_document(path: &Path, text: &str) -> Result<Document, SourceError> {
    if text.trim().is_empty() {
        return Ok(Document::new());
    }
    let parse_error = |source: serde_yaml::Error| SourceError::Parse {
        path: path.to_path_buf(),
        source,
    };
    let mut yaml: Yaml = serde_yaml::from_str(text).map_err(parse_error)?;
    yaml.apply_merge().map_err(parse_error)?;

    match convert(yaml, path, "")? {
        Value::Mapping(records) => Ok(records),
        Value::Null => Ok(Document::new()),
        _ => Err(SourceError::NotAMapping(path.to_path_buf())),
    }
}

fn convert(yaml: Yaml, path: &Path, location: &str) -> Result<Value, SourceError> {
    let value = match yaml {
        Yaml::Null => Value::Null,
        Yaml::Bool(b) => Value::Bool(b),
        Yaml::Number(n) => number(&n),
        Yaml::String(s) => Value::String(s),
        Yaml::Sequence(items) => Value::Sequence(
            items
                .into_iter()
                .enumerate()
                .map(|(index, item)| convert(item, path, &format!("{}[{}]", location, index)))
                .collect::<Result<_, _>>()?,
        ),
        Yaml::Mapping(entries) => {
            let mut mapping = Mapping::new();
            for (key, item) in entries {
                let key = mapping_key(&key).ok_or_else(|| SourceError::InvalidKey {
                    path: path.to_path_buf(),
                    location: if location.is_empty() {
                        "top level".to_string()
                    } else {
                        location.to_string()
                    },
                    kind: compound_kind(&key),
                })?;
                let child = if location.is_empty() {
                    key.clone()
                } else {
                    format!("{}.{}", location, key)
                };
                let item = convert(item, path, &child)?;
                mapping.insert(key, item);
            }
            Value::Mapping(mapping)
        }
        Yaml::Tagged(tagged) => convert(tagged.value, path, location)?,
    };
    Ok(value)
}

/// Integers beyond `i64` keep their digits as a string.
fn number(n: &serde_yaml::Number) -> Value {
    if let Some(i) = n.as_i64() {
        return Value::Integer(i);
    }
    match n.as_f64() {
        Some(x) if n.is_f64() => Value::Float(x),
        _ => Value::String(n.to_string()),
    }
}

fn mapping_key(key: &Yaml) -> Option<String> {
    match key {
        Yaml::String(s) => Some(s.clone()),
        Yaml::Bool(b) => Some(b.to_string()),
        Yaml::Number(n) => Some(n.to_string()),
        Yaml::Null => Some("null".to_string()),
        Yaml::Tagged(tagged) => mapping_key(&tagged.value),
        Yaml::Sequence(_) | Yaml::Mapping(_) => None,
    }
}

fn compound_kind(key: &Yaml) -> &'static str {
    match key {
        Yaml::Mapping(_) => "mapping",
        Yaml::Tagged(tagged) => compound_kind(&tagged.value),
        _ => "sequence",
    }
}

impl DataSource for YamlDataSource {
    fn load(&mut self, name: &str) -> Result<Arc<Document>, SourceError> {
        let document = match self.cache.get(name) {
            Some(document) => {
                debug!(file = name, "Using cached data file");
                Arc::clone(document)
            }
            None => {
                let document = Arc::new(self.read(name)?);
                info!(
                    file = name,
                    records = document.len(),
                    path = %self.data_path.display(),
                    "Loaded data file"
                );
                self.cache.insert(name.to_string(), Arc::clone(&document));
                document
            }
        };
        self.current = Some((name.to_string(), Arc::clone(&document)));
        Ok(document)
    }

    fn current_document(&self) -> Option<Arc<Document>> {
        self.current.as_ref().map(|(_, document)| Arc::clone(document))
    }

    fn current_name(&self) -> Option<&str> {
        self.current.as_ref().map(|(name, _)| name.as_str())
    }
}

/// Documents registered in memory; for harnesses that build records in code.
#[derive(Default)]
pub struct MemorySource {
    documents: HashMap<String, Arc<Document>>,
    current: Option<String>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_document(mut self, name: impl Into<String>, document: Document) -> Self {
        self.insert(name, document);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, document: Document) {
        self.documents.insert(name.into(), Arc::new(document));
    }
}

impl DataSource for MemorySource {
    fn load(&mut self, name: &str) -> Result<Arc<Document>, SourceError> {
        let document = self
            .documents
            .get(name)
            .cloned()
            .ok_or_else(|| SourceError::UnknownDocument(name.to_string()))?;
        self.current = Some(name.to_string());
        Ok(document)
    }

    fn current_document(&self) -> Option<Arc<Document>> {
        self.current
            .as_ref()
            .and_then(|name| self.documents.get(name))
            .cloned()
    }

    fn current_name(&self) -> Option<&str> {
        self.current.as_deref()
    }
}

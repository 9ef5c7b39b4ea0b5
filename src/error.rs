//! Error types for fixture lookup and directive generation.

use std::path::PathBuf;
use thiserror::Error;

/// Data source errors
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("Data file not found: {0}")]
    NotFound(PathBuf),

    #[error("Failed to read data file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse data file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Data file {0} does not contain a mapping of records")]
    NotAMapping(PathBuf),

    #[error("Data file {path} uses a {kind} as a key at {location}")]
    InvalidKey {
        path: PathBuf,
        location: String,
        kind: &'static str,
    },

    #[error("No document named {0} is registered")]
    UnknownDocument(String),
}

/// Directive expression syntax error, positioned by byte offset into the expression.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message} at offset {offset}")]
pub struct ParseError {
    pub offset: usize,
    pub message: String,
}

impl ParseError {
    pub fn new(offset: usize, message: impl Into<String>) -> Self {
        Self {
            offset,
            message: message.into(),
        }
    }
}

/// Errors raised while evaluating a single directive expression
#[derive(Debug, Error)]
pub enum EvalError {
    #[error("Invalid directive expression: {0}")]
    Parse(#[from] ParseError),

    #[error("Unknown generator: {0}")]
    UnknownCapability(String),

    #[error("Invalid arguments for {capability}: {message}")]
    InvalidArguments { capability: String, message: String },

    #[error("Invalid date format '{0}'")]
    Format(String),

    #[error("Cannot apply '+' to {left} and {right}")]
    Concatenation {
        left: &'static str,
        right: &'static str,
    },
}

impl EvalError {
    pub fn invalid_arguments(capability: &str, message: impl Into<String>) -> Self {
        EvalError::InvalidArguments {
            capability: capability.to_string(),
            message: message.into(),
        }
    }
}

/// Errors surfaced by record lookup and resolution
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("Undefined key for data: {0}")]
    UndefinedKey(String),

    #[error("Failed to generate: {directive}\n Reason: unknown generator '{name}'")]
    UnknownGenerator { directive: String, name: String },

    #[error("Failed to generate: {directive}\n Reason: {source}")]
    Generation {
        directive: String,
        #[source]
        source: EvalError,
    },

    #[error("Data source unavailable: {0}")]
    SourceUnavailable(#[from] SourceError),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Output error: {0}")]
    Output(String),
}

impl BuildError {
    /// Attach the directive text to an evaluation failure.
    pub fn from_eval(directive: &str, err: EvalError) -> Self {
        match err {
            EvalError::UnknownCapability(name) => BuildError::UnknownGenerator {
                directive: directive.to_string(),
                name,
            },
            source => BuildError::Generation {
                directive: directive.to_string(),
                source,
            },
        }
    }
}

impl From<config::ConfigError> for BuildError {
    fn from(err: config::ConfigError) -> Self {
        BuildError::ConfigError(err.to_string())
    }
}

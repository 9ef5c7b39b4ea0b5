//! Fixture Builder: Structured Test Fixture Data
//!
//! Looks up named records in YAML data files, merges caller overrides onto them,
//! and replaces every generation directive (a string starting with `~`) with a
//! freshly generated value such as a name, a date or a masked pattern.

pub mod builder;
pub mod cli;
pub mod config;
pub mod error;
pub mod generation;
pub mod logging;
pub mod resolver;
pub mod source;
pub mod value;

pub use builder::DataBuilder;
pub use error::{BuildError, EvalError, ParseError, SourceError};
pub use generation::{CallerId, CursorStore, DirectiveEvaluator};
pub use resolver::StructuralResolver;
pub use value::{Document, MergeStrategy, Value};

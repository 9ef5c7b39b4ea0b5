//! Directive generation: expression parsing, the capability vocabulary and the
//! state behind stateful capabilities.

pub mod cursors;
pub mod dates;
pub mod evaluator;
pub mod expression;
pub mod fixtures;
pub mod random;
pub mod standard;
pub mod vocabulary;

pub use cursors::{CallerId, CollectionKey, CursorStore};
pub use evaluator::{DirectiveEvaluator, GenerationContext};
pub use expression::{parse, Expr};
pub use fixtures::{FakeFixtures, Fixture, FixtureSource};
pub use vocabulary::{lookup, Capability, CapabilitySpec, VOCABULARY};

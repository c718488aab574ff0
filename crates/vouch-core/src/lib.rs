//! Structural query and comparison engine for API contract tests.
//!
//! `vouch-core` addresses values inside parsed documents with a small path
//! language, checks expectations either by exact resolution or by recursive
//! existential search, and explains mismatches with deterministic,
//! size-capped diff reports.
//!
//! ```
//! use vouch_core::{query::Expected, CompareOptions, Engine, Node};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let engine = Engine::new();
//!     let body = Node::from_json_str(r#"{"items":[{"id":"a"},{"id":"b"}]}"#)?;
//!
//!     let exact = engine.check(&body, "items.size()", &Expected::from(Node::from_json_str("2")?));
//!     assert!(exact.found);
//!
//!     let expected = Expected::from_json_value(serde_json::json!(["a", "b"]))?;
//!     assert!(engine.check(&body, "~items.id", &expected).found);
//!
//!     let wanted = Node::from_json_str(r#"{"items":[{"id":"a"},{"id":"c"}]}"#)?;
//!     let report = wanted.diff(&body, &CompareOptions::default());
//!     assert_eq!(report.render(), "@ [\"items\",1,\"id\"]\n- \"c\"\n+ \"b\"\n");
//!     Ok(())
//! }
//! ```
#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod compare;
mod error;
pub mod format;
mod hash;
mod node;
mod number;
mod options;
pub mod query;

pub use compare::{DiffRecord, DiffReport};
pub use error::{CanonicalizeError, FunctionError, OptionsError, QueryError, UncomparableKind};
pub use format::{FormatConfig, Value};
pub use node::Node;
pub use number::Number;
pub use options::{CompareMode, CompareOptions, DEFAULT_MAX_BYTES, DEFAULT_MAX_LINES};
pub use query::{Engine, Expected, MatchResult, Path};

/// Returns the semantic version of the `vouch-core` crate.
///
/// ```
/// assert!(!vouch_core::version().is_empty());
/// ```
#[must_use]
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

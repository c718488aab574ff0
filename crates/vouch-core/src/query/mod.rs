//! Path queries over documents.
//!
//! A path string such as `items.1.id` is parsed into a [`Path`] against a
//! [`Registry`] of path functions and then either resolved exactly or, when
//! it carries the `~` prefix, searched recursively. [`Engine`] bundles the
//! registry with both strategies and holds no mutable state, so one engine can
//! be shared by reference across threads.

mod functions;
mod path;
mod resolve;
mod search;

pub use functions::{PathFunction, Registry, SIZE, SIZE_AS_STRING, STRING};
pub use path::{Mode, Path, Segment, SEARCH_MARKER};

use std::borrow::Cow;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use tracing::debug;

use crate::{CanonicalizeError, Node, QueryError};

/// The value an expectation check looks for.
///
/// Under [`Mode::Recursive`] a list means every element must be found on its
/// own; under [`Mode::Exact`] it is compared as a literal array.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Expected {
    /// All of these values.
    All(Vec<Node>),
    /// A single value.
    One(Node),
}

impl Expected {
    /// Converts parsed expectation data: arrays become [`Expected::All`].
    ///
    /// ```
    /// # use vouch_core::query::Expected;
    /// let expected = Expected::from_json_value(serde_json::json!(["a", "b"]))?;
    /// assert!(matches!(expected, Expected::All(ref values) if values.len() == 2));
    /// # Ok::<(), vouch_core::CanonicalizeError>(())
    /// ```
    pub fn from_json_value(value: JsonValue) -> Result<Self, CanonicalizeError> {
        match value {
            JsonValue::Array(values) => {
                let nodes =
                    values.into_iter().map(Node::from_json_value).collect::<Result<_, _>>()?;
                Ok(Self::All(nodes))
            }
            other => Ok(Self::One(Node::from_json_value(other)?)),
        }
    }

    /// Returns the expectation as one node, wrapping lists in an array.
    #[must_use]
    pub fn as_node(&self) -> Cow<'_, Node> {
        match self {
            Self::One(node) => Cow::Borrowed(node),
            Self::All(nodes) => Cow::Owned(Node::Array(nodes.clone())),
        }
    }
}

impl From<Node> for Expected {
    fn from(node: Node) -> Self {
        Self::One(node)
    }
}

impl fmt::Display for Expected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_node())
    }
}

/// Outcome of a single expectation check.
#[derive(Clone, Debug, PartialEq)]
pub struct MatchResult {
    /// Whether the expectation holds.
    pub found: bool,
    /// The resolved node, for exact checks that reached a value.
    pub value: Option<Node>,
    /// Why the path could not be resolved or the value not found.
    pub error: Option<QueryError>,
}

impl MatchResult {
    fn resolved(value: Node, found: bool) -> Self {
        Self { found, value: Some(value), error: None }
    }

    fn failed(error: QueryError) -> Self {
        Self { found: false, value: None, error: Some(error) }
    }
}

/// Resolves and searches paths using a fixed function registry.
///
/// ```
/// # use vouch_core::{query::{Engine, Expected}, Node};
/// let engine = Engine::new();
/// let doc = Node::from_json_str(r#"{"items":[{"id":"417857"},{"id":"417858"}]}"#)?;
///
/// let path = engine.parse_path("items.1.id");
/// assert_eq!(*engine.resolve(&doc, &path)?, Node::from("417858"));
///
/// let path = engine.parse_path("~items.id");
/// let expected = Expected::from_json_value(serde_json::json!(["417857", "417858"]))?;
/// assert!(engine.search(&doc, &expected, &path).is_ok());
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Clone, Debug, Default)]
pub struct Engine {
    registry: Registry,
}

impl Engine {
    /// Creates an engine with the built-in functions.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an engine around an existing registry.
    #[must_use]
    pub fn with_registry(registry: Registry) -> Self {
        Self { registry }
    }

    /// Returns the function registry.
    #[must_use]
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Parses a path string against this engine's registry.
    #[must_use]
    pub fn parse_path(&self, raw: &str) -> Path {
        Path::parse(raw, &self.registry)
    }

    /// Resolves `path` exactly, returning the node it reaches.
    ///
    /// The path's mode is ignored; see [`Engine::check`] for mode dispatch.
    pub fn resolve<'a>(&self, doc: &'a Node, path: &Path) -> Result<Cow<'a, Node>, QueryError> {
        resolve::resolve(&self.registry, doc, path).inspect_err(|err| {
            debug!(path = %path, error = %err, "exact resolution failed");
        })
    }

    /// Searches for `expected` anywhere reachable along `path`.
    ///
    /// The path's mode is ignored; see [`Engine::check`] for mode dispatch.
    pub fn search(&self, doc: &Node, expected: &Expected, path: &Path) -> Result<(), QueryError> {
        search::search(&self.registry, doc, expected, path).inspect_err(|err| {
            debug!(path = %path, error = %err, "recursive search failed");
        })
    }

    /// Parses `raw` and checks `expected` with the strategy its marker selects.
    ///
    /// ```
    /// # use vouch_core::{query::{Engine, Expected}, Node};
    /// let engine = Engine::new();
    /// let doc = Node::from_json_str(r#"{"items":[1,2]}"#)?;
    /// let two = Expected::from(Node::from_json_str("2")?);
    /// assert!(engine.check(&doc, "items.size()", &two).found);
    /// assert!(engine.check(&doc, "~items", &two).found);
    /// assert!(engine.check(&doc, "items.2", &two).error.is_some());
    /// # Ok::<(), vouch_core::CanonicalizeError>(())
    /// ```
    #[must_use]
    pub fn check(&self, doc: &Node, raw: &str, expected: &Expected) -> MatchResult {
        let path = self.parse_path(raw);
        match path.mode() {
            Mode::Exact => match self.resolve(doc, &path) {
                Ok(value) => {
                    let found = *value == *expected.as_node();
                    MatchResult::resolved(value.into_owned(), found)
                }
                Err(err) => MatchResult::failed(err),
            },
            Mode::Recursive => match self.search(doc, expected, &path) {
                Ok(()) => MatchResult { found: true, value: None, error: None },
                Err(err) => MatchResult::failed(err),
            },
        }
    }
}

use std::borrow::Cow;
use std::fmt;

use serde::{Serialize, Serializer};
use serde_json::Value as JsonValue;

use super::functions::Registry;

/// Prefix that switches a path into recursive search mode.
pub const SEARCH_MARKER: char = '~';

const SEPARATOR: char = '.';

/// Represents a single step of a [`Path`].
///
/// ```
/// # use vouch_core::query::Segment;
/// let key = Segment::key("name");
/// let index = Segment::index(2);
/// assert_eq!(key.text(), "name");
/// assert_eq!(index.text(), "2");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Segment {
    /// Object key lookup.
    Key(String),
    /// Array index lookup.
    Index(usize),
    /// Computed value; only ever the last segment of a parsed path.
    Function(String),
}

impl Segment {
    /// Creates a key segment.
    #[must_use]
    pub fn key<S>(value: S) -> Self
    where
        S: Into<String>,
    {
        Self::Key(value.into())
    }

    /// Creates an index segment.
    #[must_use]
    pub fn index(value: usize) -> Self {
        Self::Index(value)
    }

    /// Returns the segment as it appears in a path string.
    #[must_use]
    pub fn text(&self) -> Cow<'_, str> {
        match self {
            Self::Key(key) => Cow::Borrowed(key),
            Self::Index(index) => Cow::Owned(index.to_string()),
            Self::Function(name) => Cow::Borrowed(name),
        }
    }

    fn classify(token: &str) -> Self {
        match parse_index(token) {
            Some(index) => Self::Index(index),
            None => Self::Key(token.to_string()),
        }
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text())
    }
}

/// How a path is matched against a document.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Resolve the path step by step; fail on the first unresolvable segment.
    #[default]
    Exact,
    /// Search existentially, fanning out over arrays met along the way.
    Recursive,
}

/// A parsed path: a [`Mode`] and an ordered list of [`Segment`]s.
///
/// ```
/// # use vouch_core::query::{Mode, Path, Registry, Segment};
/// let registry = Registry::builtin();
/// let path = Path::parse("~items.0.size()", &registry);
/// assert_eq!(path.mode(), Mode::Recursive);
/// assert_eq!(
///     path.segments(),
///     [Segment::key("items"), Segment::index(0), Segment::Function("size()".into())]
/// );
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Path {
    mode: Mode,
    segments: Vec<Segment>,
}

impl Path {
    /// Creates an empty exact path addressing the document root.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a dotted path string. Parsing never fails.
    ///
    /// A single leading [`SEARCH_MARKER`] selects [`Mode::Recursive`]. Segments
    /// that are canonical base-10 non-negative integers become indices, and a
    /// final segment naming a registered function becomes a function call.
    /// Anything else is a literal key, including `01`, `-1` and a function
    /// name that is not in last position.
    ///
    /// ```
    /// # use vouch_core::query::{Path, Registry, Segment};
    /// let registry = Registry::builtin();
    /// let path = Path::parse("a.size().b", &registry);
    /// assert!(path.segments().iter().all(|s| !matches!(s, Segment::Function(_))));
    /// assert!(Path::parse("", &registry).is_empty());
    /// ```
    #[must_use]
    pub fn parse(raw: &str, registry: &Registry) -> Self {
        let (mode, body) = match raw.strip_prefix(SEARCH_MARKER) {
            Some(rest) => (Mode::Recursive, rest),
            None => (Mode::Exact, raw),
        };
        if body.is_empty() {
            return Self { mode, segments: Vec::new() };
        }

        let mut segments: Vec<Segment> = body.split(SEPARATOR).map(Segment::classify).collect();
        let function = match segments.last() {
            Some(Segment::Key(token)) if registry.contains(token) => Some(token.clone()),
            _ => None,
        };
        if let Some(name) = function {
            segments.pop();
            segments.push(Segment::Function(name));
        }
        tracing::trace!(raw, %mode, segments = segments.len(), "parsed path");
        Self { mode, segments }
    }

    /// Returns the path with the given mode.
    #[must_use]
    pub fn with_mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }

    /// Appends a new segment, returning the extended path.
    #[must_use]
    pub fn with_segment(mut self, segment: Segment) -> Self {
        self.segments.push(segment);
        self
    }

    /// Returns the matching mode.
    #[must_use]
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Indicates whether the path requests a recursive search.
    #[must_use]
    pub fn is_recursive(&self) -> bool {
        self.mode == Mode::Recursive
    }

    /// Returns the underlying segments.
    #[must_use]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Returns the number of segments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Indicates whether the path addresses the root.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Pushes a new segment in-place.
    pub fn push(&mut self, segment: Segment) {
        self.segments.push(segment);
    }

    /// Pops the last segment off the path.
    pub fn pop(&mut self) -> Option<Segment> {
        self.segments.pop()
    }

    /// Renders the segments as a JSON array, e.g. `["items",1,"id"]`.
    ///
    /// ```
    /// # use vouch_core::query::{Path, Segment};
    /// let path = Path::new().with_segment(Segment::key("items")).with_segment(Segment::index(1));
    /// assert_eq!(path.to_json_string(), "[\"items\",1]");
    /// ```
    #[must_use]
    pub fn to_json_string(&self) -> String {
        let values: Vec<JsonValue> = self
            .segments
            .iter()
            .map(|segment| match segment {
                Segment::Index(index) => JsonValue::from(*index),
                other => JsonValue::String(other.text().into_owned()),
            })
            .collect();
        JsonValue::Array(values).to_string()
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Exact => f.write_str("exact"),
            Mode::Recursive => f.write_str("recursive"),
        }
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_recursive() {
            write!(f, "{SEARCH_MARKER}")?;
        }
        f.write_str(&join_segments(&self.segments))
    }
}

impl Serialize for Path {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl From<Vec<Segment>> for Path {
    fn from(segments: Vec<Segment>) -> Self {
        Self { mode: Mode::Exact, segments }
    }
}

impl<'a> IntoIterator for &'a Path {
    type Item = &'a Segment;
    type IntoIter = std::slice::Iter<'a, Segment>;

    fn into_iter(self) -> Self::IntoIter {
        self.segments.iter()
    }
}

/// Describes a consumed prefix for error messages.
pub(crate) fn describe_prefix(segments: &[Segment]) -> String {
    if segments.is_empty() {
        "<root>".to_string()
    } else {
        join_segments(segments)
    }
}

fn join_segments(segments: &[Segment]) -> String {
    let parts: Vec<Cow<'_, str>> = segments.iter().map(Segment::text).collect();
    parts.join(".")
}

fn parse_index(token: &str) -> Option<usize> {
    let canonical = !token.is_empty()
        && token.bytes().all(|b| b.is_ascii_digit())
        && (token == "0" || !token.starts_with('0'));
    if canonical {
        token.parse().ok()
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn parse(raw: &str) -> Path {
        Path::parse(raw, &Registry::builtin())
    }

    #[test]
    fn plain_path_is_exact() {
        let path = parse("items.1.id");
        assert_eq!(path.mode(), Mode::Exact);
        assert_eq!(
            path.segments(),
            [Segment::key("items"), Segment::index(1), Segment::key("id")]
        );
    }

    #[test]
    fn marker_is_stripped_once() {
        let path = parse("~~a");
        assert_eq!(path.mode(), Mode::Recursive);
        assert_eq!(path.segments(), [Segment::key("~a")]);
        assert!(parse("~").is_empty());
        assert!(parse("~").is_recursive());
    }

    #[test]
    fn marker_is_only_recognised_as_prefix() {
        let path = parse("a.~b");
        assert_eq!(path.mode(), Mode::Exact);
        assert_eq!(path.segments(), [Segment::key("a"), Segment::key("~b")]);
    }

    #[test]
    fn non_canonical_numbers_are_keys() {
        let path = parse("01.-1.+2.1a.0");
        assert_eq!(
            path.segments(),
            [
                Segment::key("01"),
                Segment::key("-1"),
                Segment::key("+2"),
                Segment::key("1a"),
                Segment::index(0),
            ]
        );
    }

    #[test]
    fn overflowing_index_is_a_key() {
        let path = parse("99999999999999999999999");
        assert_eq!(path.segments(), [Segment::key("99999999999999999999999")]);
    }

    #[test]
    fn only_trailing_function_is_recognised() {
        let path = parse("a.size().b");
        assert_eq!(
            path.segments(),
            [Segment::key("a"), Segment::key("size()"), Segment::key("b")]
        );

        let path = parse("a.sizeAsString()");
        assert_eq!(
            path.segments(),
            [Segment::key("a"), Segment::Function("sizeAsString()".to_string())]
        );
    }

    #[test]
    fn unregistered_names_stay_keys() {
        let path = Path::parse("a.size()", &Registry::empty());
        assert_eq!(path.segments(), [Segment::key("a"), Segment::key("size()")]);
    }

    #[test]
    fn empty_tokens_are_empty_keys() {
        let path = parse("a..b");
        assert_eq!(path.segments(), [Segment::key("a"), Segment::key(""), Segment::key("b")]);
    }

    #[test]
    fn display_round_trips() {
        for raw in ["items.1.id", "~items.id", "a.size()", "~", ""] {
            assert_eq!(parse(raw).to_string(), raw);
        }
    }

    #[test]
    fn serializes_as_dotted_string() {
        let json = serde_json::to_string(&parse("~a.0")).unwrap();
        assert_eq!(json, "\"~a.0\"");
    }

    #[test]
    fn prefix_description_names_root() {
        assert_eq!(describe_prefix(&[]), "<root>");
        assert_eq!(describe_prefix(&[Segment::key("a"), Segment::index(3)]), "a.3");
    }

    proptest! {
        #[test]
        fn parsing_is_deterministic(raw in "~?[a-z0-9.()]{0,24}") {
            prop_assert_eq!(parse(&raw), parse(&raw));
        }
    }
}

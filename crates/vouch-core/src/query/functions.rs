use std::collections::BTreeMap;

use crate::{FunctionError, Node, Number};

/// Name of the element-count function.
pub const SIZE: &str = "size()";
/// Name of the stringification function.
pub const STRING: &str = "string()";
/// Name of the composed count-then-stringify function.
pub const SIZE_AS_STRING: &str = "sizeAsString()";

/// A pure computation applied to the node a path has reached.
pub type PathFunction = fn(&Node) -> Result<Node, FunctionError>;

/// Table of path functions, keyed by the exact segment text that invokes them.
///
/// The table is built once and handed to the resolver and matcher by
/// reference. Its public contents are the closed built-in set.
///
/// ```
/// # use vouch_core::{query::Registry, Node};
/// let registry = Registry::builtin();
/// let items = Node::from_json_str("[1,2,3]")?;
/// assert_eq!(registry.call("size()", &items)?, Node::from_json_str("3")?);
/// assert_eq!(registry.call("sizeAsString()", &items)?, Node::from("3"));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Clone, Debug)]
pub struct Registry {
    functions: BTreeMap<&'static str, PathFunction>,
}

impl Registry {
    /// Builds the registry holding `size()`, `string()` and `sizeAsString()`.
    #[must_use]
    pub fn builtin() -> Self {
        Self::empty()
            .with_function(SIZE, size)
            .with_function(STRING, string)
            .with_function(SIZE_AS_STRING, size_as_string)
    }

    /// Builds a registry without any functions; every segment parses as a key or index.
    #[must_use]
    pub fn empty() -> Self {
        Self { functions: BTreeMap::new() }
    }

    pub(crate) fn with_function(mut self, name: &'static str, function: PathFunction) -> Self {
        self.functions.insert(name, function);
        self
    }

    /// Indicates whether `name` is registered.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.functions.contains_key(name)
    }

    /// Iterates over registered names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.functions.keys().copied()
    }

    /// Applies the function registered as `name` to `node`.
    pub fn call(&self, name: &str, node: &Node) -> Result<Node, FunctionError> {
        let function = self
            .functions
            .get(name)
            .ok_or_else(|| FunctionError::Unknown { name: name.to_string() })?;
        function(node)
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::builtin()
    }
}

fn size(node: &Node) -> Result<Node, FunctionError> {
    match node {
        Node::Array(items) => Ok(Node::Number(Number::from_count(items.len()))),
        other => Err(FunctionError::Inapplicable { function: SIZE, found: other.kind() }),
    }
}

fn string(node: &Node) -> Result<Node, FunctionError> {
    Ok(Node::String(node.plain_string()))
}

fn size_as_string(node: &Node) -> Result<Node, FunctionError> {
    let count = size(node).map_err(|err| match err {
        FunctionError::Inapplicable { found, .. } => {
            FunctionError::Inapplicable { function: SIZE_AS_STRING, found }
        }
        other => other,
    })?;
    string(&count)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn json(input: &str) -> Node {
        Node::from_json_str(input).unwrap()
    }

    #[test]
    fn size_counts_array_elements() {
        assert_eq!(size(&json("[]")).unwrap(), json("0"));
        assert_eq!(size(&json("[{},{}]")).unwrap(), json("2"));
    }

    #[test]
    fn size_rejects_non_arrays() {
        for input in ["{}", "\"abc\"", "1", "null", "true"] {
            let err = size(&json(input)).unwrap_err();
            assert!(matches!(err, FunctionError::Inapplicable { function: SIZE, .. }), "{input}");
        }
    }

    #[test]
    fn string_applies_to_everything() {
        assert_eq!(string(&json("12")).unwrap(), Node::from("12"));
        assert_eq!(string(&json("\"x\"")).unwrap(), Node::from("x"));
        assert_eq!(string(&json("[1,\"a\"]")).unwrap(), Node::from("[1 a]"));
    }

    #[test]
    fn size_as_string_composes() {
        assert_eq!(size_as_string(&json("[1,2]")).unwrap(), Node::from("2"));
        let err = size_as_string(&json("{}")).unwrap_err();
        assert_eq!(
            err,
            FunctionError::Inapplicable { function: SIZE_AS_STRING, found: "object" }
        );
    }

    #[test]
    fn unknown_names_are_reported() {
        let err = Registry::empty().call(SIZE, &json("[]")).unwrap_err();
        assert_eq!(err, FunctionError::Unknown { name: "size()".to_string() });
    }

    #[test]
    fn builtin_set_is_closed() {
        let names: Vec<_> = Registry::builtin().names().collect();
        assert_eq!(names, ["size()", "sizeAsString()", "string()"]);
    }
}

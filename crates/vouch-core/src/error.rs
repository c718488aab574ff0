use thiserror::Error;

/// Errors that can occur while converting parsed data into a [`Node`](crate::Node).
#[derive(Debug, Error)]
pub enum CanonicalizeError {
    /// The provided JSON input was invalid.
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    /// The provided YAML input was invalid.
    #[error("invalid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
    /// The input contained nothing but whitespace.
    #[error("empty document")]
    Empty,
    /// Encountered a number that cannot be represented as an IEEE-754 f64.
    #[error("number {value} cannot be represented as f64")]
    NumberOutOfRange {
        /// The textual representation of the offending number.
        value: String,
    },
    /// YAML maps may only contain string keys.
    #[error("unsupported YAML key type: {found}")]
    NonStringYamlKey {
        /// A description of the key that triggered the error.
        found: String,
    },
    /// YAML tags have no document representation.
    #[error("unsupported YAML tag: {tag}")]
    UnsupportedYamlTag {
        /// The tag identifier encountered in the document.
        tag: String,
    },
    /// Attempted to construct a [`Number`](crate::Number) that is not finite.
    #[error("non-finite number encountered: {value}")]
    NotFinite {
        /// The offending numeric value.
        value: f64,
    },
}

/// Errors emitted when building [`CompareOptions`](crate::CompareOptions).
#[derive(Debug, Error, PartialEq, Eq)]
pub enum OptionsError {
    /// The byte cap must allow at least one byte of report.
    #[error("max_bytes must be greater than zero")]
    ZeroMaxBytes,
    /// The line cap must allow at least one line of report.
    #[error("max_lines must be greater than zero")]
    ZeroMaxLines,
}

/// Failure of a single path function applied to a node.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FunctionError {
    /// The function does not accept nodes of this kind.
    #[error("function {function} is not applicable to {found}")]
    Inapplicable {
        /// Registered function name, e.g. `size()`.
        function: &'static str,
        /// Kind of the node the function was applied to.
        found: &'static str,
    },
    /// No function is registered under this name.
    #[error("unknown function {name}")]
    Unknown {
        /// The requested function name.
        name: String,
    },
}

/// Errors produced by exact resolution and recursive search.
///
/// Every variant names the segment that failed and `at`, the dotted path that
/// was consumed before the failure (`<root>` when nothing was consumed).
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum QueryError {
    /// The object at `at` has no entry named `key`.
    #[error("key {key:?} not found at {at}")]
    KeyNotFound {
        /// Missing key.
        key: String,
        /// Path consumed before the failing segment.
        at: String,
    },
    /// The array at `at` is shorter than `index + 1`.
    #[error("index {index} out of bounds for array of length {len} at {at}")]
    IndexOutOfBounds {
        /// Requested index.
        index: usize,
        /// Actual array length.
        len: usize,
        /// Path consumed before the failing segment.
        at: String,
    },
    /// A key segment was applied to something other than an object.
    #[error("cannot look up key {key:?} in {found} at {at}")]
    NotAnObject {
        /// Key that was requested.
        key: String,
        /// Kind of the node found instead.
        found: &'static str,
        /// Path consumed before the failing segment.
        at: String,
    },
    /// An index segment was applied to something other than an array.
    #[error("cannot take index {index} of {found} at {at}")]
    NotAnArray {
        /// Index that was requested.
        index: usize,
        /// Kind of the node found instead.
        found: &'static str,
        /// Path consumed before the failing segment.
        at: String,
    },
    /// A path function rejected the node it was applied to.
    #[error("function {function} is not applicable to {found} at {at}")]
    FunctionInapplicable {
        /// Function name.
        function: String,
        /// Kind of the node the function was applied to.
        found: &'static str,
        /// Path consumed before the function segment.
        at: String,
    },
    /// A function segment named a function missing from the registry.
    #[error("unknown function {name} at {at}")]
    UnknownFunction {
        /// Function name.
        name: String,
        /// Path consumed before the function segment.
        at: String,
    },
    /// Recursive search exhausted every branch without finding the value.
    #[error("value {expected} not found by path {path}")]
    PathNotFound {
        /// Compact JSON rendering of the value that was searched for.
        expected: String,
        /// The searched path.
        path: String,
    },
}

impl QueryError {
    pub(crate) fn from_function(err: FunctionError, at: String) -> Self {
        match err {
            FunctionError::Inapplicable { function, found } => {
                Self::FunctionInapplicable { function: function.to_string(), found, at }
            }
            FunctionError::Unknown { name } => Self::UnknownFunction { name, at },
        }
    }
}

/// Raised when values of a kind that has no ordering are used as sort keys.
///
/// This signals a programming error rather than bad input: sorting code
/// panics with this error instead of returning it.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{kind} values of type {type_name} are not comparable")]
pub struct UncomparableKind {
    /// Kind of the offending value (`sequence`, `map`, `function`).
    pub kind: &'static str,
    /// Type name carried by the offending value.
    pub type_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn function_errors_gain_location() {
        let err = QueryError::from_function(
            FunctionError::Inapplicable { function: "size()", found: "object" },
            "items".to_string(),
        );
        assert_eq!(err.to_string(), "function size() is not applicable to object at items");
    }
}

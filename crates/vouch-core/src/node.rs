use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use serde_yaml::Value as YamlValue;

use crate::{
    hash::{hash_bytes, HashCode},
    CanonicalizeError, CompareOptions, DiffReport, Number,
};

const NULL_HASH: HashCode = [0xFE, 0x73, 0xAB, 0xCC, 0xE6, 0x32, 0xE0, 0x88];
const BOOL_TRUE_HASH: HashCode = [0x24, 0x6B, 0xE3, 0xE4, 0xAF, 0x59, 0xDC, 0x1C];
const BOOL_FALSE_HASH: HashCode = [0xC6, 0x38, 0x77, 0xD1, 0x0A, 0x7E, 0x1F, 0xBF];
const LIST_SEED: [u8; 8] = [0xF5, 0x18, 0x0A, 0x71, 0xA4, 0xC4, 0x03, 0xF3];
const OBJECT_SEED: [u8; 8] = [0x00, 0x5D, 0x39, 0xA4, 0x18, 0x10, 0xEA, 0xD5];

/// A parsed document: the untyped tree that paths address and comparisons walk.
///
/// Objects keep their keys in a `BTreeMap`, so insertion order never affects
/// equality, hashing or rendering.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Node {
    /// JSON `null`.
    Null,
    /// JSON boolean.
    Bool(bool),
    /// JSON number represented as IEEE-754 double precision.
    Number(Number),
    /// JSON string.
    String(String),
    /// Ordered sequence of nodes.
    Array(Vec<Node>),
    /// Mapping of string keys to nodes.
    Object(BTreeMap<String, Node>),
}

impl Node {
    /// Parses a JSON string into a document.
    ///
    /// ```
    /// # use vouch_core::Node;
    /// let node = Node::from_json_str("{\"hello\":\"world\"}")?;
    /// assert!(matches!(node, Node::Object(_)));
    /// # Ok::<(), vouch_core::CanonicalizeError>(())
    /// ```
    pub fn from_json_str(input: &str) -> Result<Self, CanonicalizeError> {
        if input.trim().is_empty() {
            return Err(CanonicalizeError::Empty);
        }
        let value: JsonValue = serde_json::from_str(input)?;
        Self::from_json_value(value)
    }

    /// Parses a YAML string into a document.
    ///
    /// ```
    /// # use vouch_core::Node;
    /// let node = Node::from_yaml_str("---\nanswer: 42\n")?;
    /// assert!(matches!(node, Node::Object(_)));
    /// # Ok::<(), vouch_core::CanonicalizeError>(())
    /// ```
    pub fn from_yaml_str(input: &str) -> Result<Self, CanonicalizeError> {
        if input.trim().is_empty() {
            return Err(CanonicalizeError::Empty);
        }
        let value: YamlValue = serde_yaml::from_str(input)?;
        Self::from_yaml_value(value)
    }

    /// Converts an already-parsed serde JSON value into a [`Node`].
    pub fn from_json_value(value: JsonValue) -> Result<Self, CanonicalizeError> {
        match value {
            JsonValue::Null => Ok(Self::Null),
            JsonValue::Bool(v) => Ok(Self::Bool(v)),
            JsonValue::Number(num) => {
                let Some(as_f64) = num.as_f64() else {
                    return Err(CanonicalizeError::NumberOutOfRange { value: num.to_string() });
                };
                Ok(Self::Number(Number::new(as_f64)?))
            }
            JsonValue::String(s) => Ok(Self::String(s)),
            JsonValue::Array(values) => {
                let mut items = Vec::with_capacity(values.len());
                for value in values {
                    items.push(Self::from_json_value(value)?);
                }
                Ok(Self::Array(items))
            }
            JsonValue::Object(map) => {
                let mut object = BTreeMap::new();
                for (key, value) in map {
                    object.insert(key, Self::from_json_value(value)?);
                }
                Ok(Self::Object(object))
            }
        }
    }

    /// Converts an already-parsed serde YAML value into a [`Node`].
    pub fn from_yaml_value(value: YamlValue) -> Result<Self, CanonicalizeError> {
        match value {
            YamlValue::Null => Ok(Self::Null),
            YamlValue::Bool(v) => Ok(Self::Bool(v)),
            YamlValue::Number(num) => {
                if let Some(f) = num.as_f64() {
                    return Ok(Self::Number(Number::new(f)?));
                }
                if let Some(i) = num.as_i64() {
                    return Ok(Self::Number(Number::new(i as f64)?));
                }
                if let Some(u) = num.as_u64() {
                    return Ok(Self::Number(Number::new(u as f64)?));
                }
                Err(CanonicalizeError::NumberOutOfRange { value: num.to_string() })
            }
            YamlValue::String(s) => Ok(Self::String(s)),
            YamlValue::Sequence(seq) => {
                let mut items = Vec::with_capacity(seq.len());
                for value in seq {
                    items.push(Self::from_yaml_value(value)?);
                }
                Ok(Self::Array(items))
            }
            YamlValue::Mapping(map) => {
                let mut object = BTreeMap::new();
                for (key, value) in map {
                    let key = match key {
                        YamlValue::String(s) => s,
                        other => {
                            return Err(CanonicalizeError::NonStringYamlKey {
                                found: format!("{other:?}"),
                            });
                        }
                    };
                    object.insert(key, Self::from_yaml_value(value)?);
                }
                Ok(Self::Object(object))
            }
            YamlValue::Tagged(tagged) => {
                Err(CanonicalizeError::UnsupportedYamlTag { tag: tagged.tag.to_string() })
            }
        }
    }

    /// Converts the node back into a serde JSON value.
    #[must_use]
    pub fn to_json_value(&self) -> JsonValue {
        match self {
            Self::Null => JsonValue::Null,
            Self::Bool(v) => JsonValue::Bool(*v),
            Self::Number(n) => JsonValue::Number(n.to_json_number()),
            Self::String(s) => JsonValue::String(s.clone()),
            Self::Array(values) => JsonValue::Array(values.iter().map(Self::to_json_value).collect()),
            Self::Object(map) => {
                let mut object = serde_json::Map::new();
                for (key, value) in map {
                    object.insert(key.clone(), value.to_json_value());
                }
                JsonValue::Object(object)
            }
        }
    }

    /// Names the kind of this node, as used in error messages.
    ///
    /// ```
    /// # use vouch_core::Node;
    /// assert_eq!(Node::from_json_str("[1]")?.kind(), "array");
    /// assert_eq!(Node::Null.kind(), "null");
    /// # Ok::<(), vouch_core::CanonicalizeError>(())
    /// ```
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Number(_) => "number",
            Self::String(_) => "string",
            Self::Array(_) => "array",
            Self::Object(_) => "object",
        }
    }

    /// Indicates whether the node is neither an array nor an object.
    #[must_use]
    pub fn is_scalar(&self) -> bool {
        !matches!(self, Self::Array(_) | Self::Object(_))
    }

    /// Renders the node without any type information.
    ///
    /// Strings are emitted verbatim, arrays as `[a b]` and objects as
    /// `map[k:v]`. This is the stringification behind the `string()` path
    /// function; diff reports use the canonical formatter instead.
    ///
    /// ```
    /// # use vouch_core::Node;
    /// let node = Node::from_json_str("{\"b\":[1,\"x\"],\"a\":null}")?;
    /// assert_eq!(node.plain_string(), "map[a:<nil> b:[1 x]]");
    /// # Ok::<(), vouch_core::CanonicalizeError>(())
    /// ```
    #[must_use]
    pub fn plain_string(&self) -> String {
        match self {
            Self::Null => "<nil>".to_string(),
            Self::Bool(v) => v.to_string(),
            Self::Number(n) => n.to_string(),
            Self::String(s) => s.clone(),
            Self::Array(items) => {
                let parts: Vec<String> = items.iter().map(Self::plain_string).collect();
                format!("[{}]", parts.join(" "))
            }
            Self::Object(map) => {
                let parts: Vec<String> =
                    map.iter().map(|(key, value)| format!("{key}:{}", value.plain_string())).collect();
                format!("map[{}]", parts.join(" "))
            }
        }
    }

    /// Compares this node, taken as the expectation, against `actual`.
    ///
    /// ```
    /// # use vouch_core::{CompareOptions, Node};
    /// let expected = Node::from_json_str("{\"id\":1}")?;
    /// let actual = Node::from_json_str("{\"id\":1,\"extra\":true}")?;
    /// assert!(expected.diff(&actual, &CompareOptions::default()).is_empty());
    /// # Ok::<(), vouch_core::CanonicalizeError>(())
    /// ```
    #[must_use]
    pub fn diff(&self, actual: &Self, options: &CompareOptions) -> DiffReport {
        crate::compare::compare(self, actual, options)
    }

    pub(crate) fn hash_code(&self) -> HashCode {
        match self {
            Self::Null => NULL_HASH,
            Self::Bool(true) => BOOL_TRUE_HASH,
            Self::Bool(false) => BOOL_FALSE_HASH,
            Self::Number(n) => n.hash_code(),
            Self::String(s) => hash_bytes(s.as_bytes()),
            Self::Array(values) => hash_list(values),
            Self::Object(map) => hash_object(map),
        }
    }
}

impl TryFrom<JsonValue> for Node {
    type Error = CanonicalizeError;

    fn try_from(value: JsonValue) -> Result<Self, Self::Error> {
        Self::from_json_value(value)
    }
}

impl From<&str> for Node {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<bool> for Node {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = serde_json::to_string(&self.to_json_value()).map_err(|_| fmt::Error)?;
        f.write_str(&text)
    }
}

fn hash_list(values: &[Node]) -> HashCode {
    let mut bytes = Vec::with_capacity(8 + values.len() * 8);
    bytes.extend_from_slice(&LIST_SEED);
    for value in values {
        bytes.extend_from_slice(&value.hash_code());
    }
    hash_bytes(&bytes)
}

fn hash_object(map: &BTreeMap<String, Node>) -> HashCode {
    let mut bytes = Vec::with_capacity(OBJECT_SEED.len() + map.len() * 16);
    bytes.extend_from_slice(&OBJECT_SEED);
    for (key, value) in map {
        bytes.extend_from_slice(&hash_bytes(key.as_bytes()));
        bytes.extend_from_slice(&value.hash_code());
    }
    hash_bytes(&bytes)
}

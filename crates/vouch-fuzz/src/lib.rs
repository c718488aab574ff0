//! Fuzzing harnesses for `vouch-core`.
//!
//! Each public function accepts raw bytes, builds inputs from them and drives
//! one part of the engine, asserting the properties that must hold for every
//! input. They back the `cargo fuzz` targets and run as smoke tests.
//!
//! ```
//! vouch_fuzz::fuzz_parse_path(b"~items.0.size()");
//! vouch_fuzz::fuzz_query(b"query seed");
//! vouch_fuzz::fuzz_compare(&[1, 2, 3, 4]);
//! ```
#![forbid(unsafe_code)]
#![warn(missing_docs)]

use arbitrary::Unstructured;
use serde_json::{Map as JsonMap, Number as JsonNumber, Value as JsonValue};
use vouch_core::format::{format, FormatConfig, Value};
use vouch_core::query::{Engine, Expected, Mode, SEARCH_MARKER};
use vouch_core::{CompareOptions, Node};

const MAX_DEPTH: usize = 4;
const MAX_ARRAY_LEN: u8 = 6;
const MAX_OBJECT_LEN: u8 = 6;
const MAX_STRING_LEN: u8 = 12;
const MAX_PATH_SEGMENTS: u8 = 5;
const PATH_TOKENS: [&str; 8] = ["a", "b", "items", "0", "1", "size()", "string()", "sizeAsString()"];

/// Parses arbitrary text as a path and checks that parsing is total and stable.
///
/// ```
/// vouch_fuzz::fuzz_parse_path(b"a..b.007");
/// ```
///
/// # Panics
///
/// Panics when two parses of the same text disagree or the mode does not
/// reflect the leading marker.
pub fn fuzz_parse_path(data: &[u8]) {
    let Ok(raw) = std::str::from_utf8(data) else {
        return;
    };
    let engine = Engine::new();
    let first = engine.parse_path(raw);
    let second = engine.parse_path(raw);
    assert_eq!(first, second, "path parsing is not deterministic");
    let recursive = raw.starts_with(SEARCH_MARKER);
    assert_eq!(first.mode() == Mode::Recursive, recursive);
    assert_eq!(engine.parse_path(&first.to_string()), first, "display does not round trip");
}

/// Resolves and searches a generated path inside a generated document.
///
/// ```
/// vouch_fuzz::fuzz_query(b"\x05\x01\x02\x03\x04");
/// ```
///
/// # Panics
///
/// Panics when resolution is not deterministic, or when a value that exact
/// resolution reached is not found by a recursive search for it.
pub fn fuzz_query(data: &[u8]) {
    let mut unstructured = Unstructured::new(data);
    let Some(doc) = random_node(&mut unstructured) else {
        return;
    };
    let Ok(raw) = random_path(&mut unstructured) else {
        return;
    };
    let engine = Engine::new();
    let path = engine.parse_path(&raw);
    let first = engine.resolve(&doc, &path);
    let second = engine.resolve(&doc, &path);
    assert_eq!(first, second, "resolution is not deterministic");

    if let Ok(value) = first {
        if is_plain_key_path(&raw) {
            let recursive = engine.parse_path(&format!("{SEARCH_MARKER}{raw}"));
            let expected = Expected::One(value.into_owned());
            assert!(
                engine.search(&doc, &expected, &recursive).is_ok(),
                "search missed a value that exact resolution reached via {raw}"
            );
        }
    }
}

/// Compares two generated documents in both modes and renders them.
///
/// ```
/// vouch_fuzz::fuzz_compare(b"compare seed");
/// ```
///
/// # Panics
///
/// Panics when a document differs from itself, when a report exceeds its
/// caps, or when strict mode reports less than partial mode.
pub fn fuzz_compare(data: &[u8]) {
    let mut unstructured = Unstructured::new(data);
    let (Some(expected), Some(actual)) =
        (random_node(&mut unstructured), random_node(&mut unstructured))
    else {
        return;
    };

    assert!(expected.diff(&expected, &CompareOptions::strict()).is_empty());

    let partial_options = CompareOptions::default();
    let partial = expected.diff(&actual, &partial_options);
    let strict = expected.diff(&actual, &CompareOptions::strict());
    let rendered = strict.render();
    assert!(rendered.len() <= partial_options.max_bytes());
    assert!(rendered.lines().count() <= partial_options.max_lines());
    if !partial.is_empty() {
        assert!(!strict.is_empty(), "strict mode hid a partial-mode difference");
    }

    for config in [FormatConfig::default(), FormatConfig::json(), FormatConfig::verbose()] {
        let value = Value::from(&actual);
        assert_eq!(format(&value, &config), format(&value, &config));
    }
}

/// Only keys and in-range indices; functions and recursion change the meaning.
fn is_plain_key_path(raw: &str) -> bool {
    !raw.is_empty() && raw.split('.').all(|token| token.parse::<usize>().is_err() && !token.ends_with("()"))
}

fn random_path(unstructured: &mut Unstructured<'_>) -> Result<String, arbitrary::Error> {
    let len = usize::from(unstructured.int_in_range::<u8>(0..=MAX_PATH_SEGMENTS)?);
    let mut tokens = Vec::with_capacity(len);
    for _ in 0..len {
        tokens.push(*unstructured.choose(&PATH_TOKENS)?);
    }
    Ok(tokens.join("."))
}

fn random_node(unstructured: &mut Unstructured<'_>) -> Option<Node> {
    let value = json_value_from_unstructured(unstructured, 0).ok()?;
    Node::from_json_value(value).ok()
}

fn json_value_from_unstructured(
    unstructured: &mut Unstructured<'_>,
    depth: usize,
) -> Result<JsonValue, arbitrary::Error> {
    if depth >= MAX_DEPTH {
        return json_leaf(unstructured);
    }

    match unstructured.int_in_range::<u8>(0..=5)? {
        0..=3 => json_leaf(unstructured),
        4 => {
            let len = usize::from(unstructured.int_in_range::<u8>(0..=MAX_ARRAY_LEN)?);
            let mut items = Vec::with_capacity(len);
            for _ in 0..len {
                items.push(json_value_from_unstructured(unstructured, depth + 1)?);
            }
            Ok(JsonValue::Array(items))
        }
        _ => {
            let len = usize::from(unstructured.int_in_range::<u8>(0..=MAX_OBJECT_LEN)?);
            let mut map = JsonMap::new();
            for _ in 0..len {
                let key = random_key(unstructured)?;
                let value = json_value_from_unstructured(unstructured, depth + 1)?;
                map.insert(key, value);
            }
            Ok(JsonValue::Object(map))
        }
    }
}

fn json_leaf(unstructured: &mut Unstructured<'_>) -> Result<JsonValue, arbitrary::Error> {
    match unstructured.int_in_range::<u8>(0..=3)? {
        0 => Ok(JsonValue::Null),
        1 => Ok(JsonValue::Bool(unstructured.arbitrary()?)),
        2 => Ok(JsonValue::Number(random_number(unstructured)?)),
        _ => Ok(JsonValue::String(random_string(unstructured)?)),
    }
}

/// Keys are mostly drawn from the path vocabulary so generated paths hit.
fn random_key(unstructured: &mut Unstructured<'_>) -> Result<String, arbitrary::Error> {
    if unstructured.ratio(3, 4)? {
        Ok((*unstructured.choose(&PATH_TOKENS[..3])?).to_string())
    } else {
        random_string(unstructured)
    }
}

fn random_number(unstructured: &mut Unstructured<'_>) -> Result<JsonNumber, arbitrary::Error> {
    if unstructured.arbitrary()? {
        Ok(JsonNumber::from(unstructured.int_in_range::<i32>(-1000..=1000)?))
    } else {
        let numerator = f64::from(unstructured.arbitrary::<i32>()?);
        let denominator = f64::from(unstructured.int_in_range::<u16>(1..=1024)?);
        JsonNumber::from_f64(numerator / denominator).ok_or(arbitrary::Error::IncorrectFormat)
    }
}

fn random_string(unstructured: &mut Unstructured<'_>) -> Result<String, arbitrary::Error> {
    let len = usize::from(unstructured.int_in_range::<u8>(0..=MAX_STRING_LEN)?);
    let mut string = String::with_capacity(len);
    for _ in 0..len {
        let byte = unstructured.int_in_range::<u8>(0x20..=0x7e)?;
        string.push(char::from(byte));
    }
    Ok(string)
}

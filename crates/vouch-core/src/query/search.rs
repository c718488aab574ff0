use tracing::trace;

use super::path::{Path, Segment};
use super::{Expected, Registry};
use crate::{Node, QueryError};

/// Searches `doc` for the expected value(s) reachable along `path`.
///
/// Every element of a list expectation is searched on its own, starting again
/// from the root; the first element that cannot be found fails the search.
pub(crate) fn search(
    registry: &Registry,
    doc: &Node,
    expected: &Expected,
    path: &Path,
) -> Result<(), QueryError> {
    match expected {
        Expected::One(value) => search_value(registry, doc, value, path),
        Expected::All(values) => {
            for value in values {
                search_value(registry, doc, value, path)?;
            }
            Ok(())
        }
    }
}

fn search_value(
    registry: &Registry,
    doc: &Node,
    expected: &Node,
    path: &Path,
) -> Result<(), QueryError> {
    if reaches(registry, doc, expected, path.segments()) {
        Ok(())
    } else {
        Err(QueryError::PathNotFound { expected: expected.to_string(), path: path.to_string() })
    }
}

fn reaches(registry: &Registry, node: &Node, expected: &Node, segments: &[Segment]) -> bool {
    if segments.is_empty() {
        return holds(node, expected);
    }

    let mut current = node;
    for (position, segment) in segments.iter().enumerate() {
        let remaining = &segments[position..];
        if let [Segment::Function(name)] = remaining {
            if let Ok(value) = registry.call(name, current) {
                if value == *expected {
                    return true;
                }
            }
        }

        match current {
            Node::Object(map) => {
                let Some(child) = map.get(segment.text().as_ref()) else {
                    return false;
                };
                if holds(child, expected) {
                    return true;
                }
                current = child;
            }
            Node::Array(items) => {
                trace!(elements = items.len(), remaining = remaining.len(), "fanning out");
                return items.iter().any(|item| reaches(registry, item, expected, remaining));
            }
            _ => return false,
        }
    }
    false
}

/// The node equals the expectation, or is an array with an equal element.
fn holds(node: &Node, expected: &Node) -> bool {
    node == expected
        || matches!(node, Node::Array(items) if items.iter().any(|item| item == expected))
}

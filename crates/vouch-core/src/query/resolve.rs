use std::borrow::Cow;

use super::path::{describe_prefix, Path, Segment};
use super::Registry;
use crate::{Node, QueryError};

/// Walks `path` through `doc`, failing on the first segment that cannot be resolved.
pub(crate) fn resolve<'a>(
    registry: &Registry,
    doc: &'a Node,
    path: &Path,
) -> Result<Cow<'a, Node>, QueryError> {
    let segments = path.segments();
    let mut current = doc;
    for (position, segment) in segments.iter().enumerate() {
        let at = || describe_prefix(&segments[..position]);
        match segment {
            Segment::Function(name) => {
                let value = registry
                    .call(name, current)
                    .map_err(|err| QueryError::from_function(err, at()))?;
                return Ok(Cow::Owned(value));
            }
            Segment::Key(key) => {
                let Node::Object(map) = current else {
                    return Err(QueryError::NotAnObject {
                        key: key.clone(),
                        found: current.kind(),
                        at: at(),
                    });
                };
                current = map
                    .get(key)
                    .ok_or_else(|| QueryError::KeyNotFound { key: key.clone(), at: at() })?;
            }
            Segment::Index(index) => {
                let Node::Array(items) = current else {
                    return Err(QueryError::NotAnArray {
                        index: *index,
                        found: current.kind(),
                        at: at(),
                    });
                };
                current = items.get(*index).ok_or_else(|| QueryError::IndexOutOfBounds {
                    index: *index,
                    len: items.len(),
                    at: at(),
                })?;
            }
        }
    }
    Ok(Cow::Borrowed(current))
}

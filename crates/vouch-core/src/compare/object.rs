use std::collections::BTreeMap;

use super::{walk_at, Difference, DifferenceKind, Reporter};
use crate::query::{Path, Segment};
use crate::Node;

pub(super) fn walk_objects<R: Reporter + ?Sized>(
    expected: &BTreeMap<String, Node>,
    actual: &BTreeMap<String, Node>,
    path: &mut Path,
    reporter: &mut R,
) {
    for (key, value) in expected {
        path.push(Segment::key(key.as_str()));
        match actual.get(key) {
            Some(other) => walk_at(value, other, path, reporter),
            None => reporter.report(Difference {
                kind: DifferenceKind::Missing,
                path,
                expected: Some(value),
                actual: None,
            }),
        }
        path.pop();
    }

    for (key, value) in actual {
        if expected.contains_key(key) {
            continue;
        }
        path.push(Segment::key(key.as_str()));
        reporter.report(Difference {
            kind: DifferenceKind::Unexpected,
            path,
            expected: None,
            actual: Some(value),
        });
        path.pop();
    }
}

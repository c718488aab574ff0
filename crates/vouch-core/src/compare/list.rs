use std::ops::Range;

use tracing::trace;

use super::{walk_at, Difference, DifferenceKind, Reporter};
use crate::hash::HashCode;
use crate::query::{Path, Segment};
use crate::Node;

pub(super) fn walk_lists<R: Reporter + ?Sized>(
    expected: &[Node],
    actual: &[Node],
    path: &mut Path,
    reporter: &mut R,
) {
    let expected_hashes: Vec<HashCode> = expected.iter().map(Node::hash_code).collect();
    let actual_hashes: Vec<HashCode> = actual.iter().map(Node::hash_code).collect();
    let anchors = common_pairs(expected, actual, &expected_hashes, &actual_hashes);
    trace!(
        expected = expected.len(),
        actual = actual.len(),
        anchors = anchors.len(),
        "aligned arrays"
    );

    let mut next = (0, 0);
    for (i, j) in anchors.into_iter().chain(std::iter::once((expected.len(), actual.len()))) {
        walk_gap(expected, actual, next.0..i, next.1..j, path, reporter);
        next = (i + 1, j + 1);
    }
}

/// Pairs an unaligned run by position, then reports the leftovers.
fn walk_gap<R: Reporter + ?Sized>(
    expected: &[Node],
    actual: &[Node],
    left: Range<usize>,
    right: Range<usize>,
    path: &mut Path,
    reporter: &mut R,
) {
    let paired = left.len().min(right.len());
    for offset in 0..paired {
        let index = left.start + offset;
        path.push(Segment::index(index));
        walk_at(&expected[index], &actual[right.start + offset], path, reporter);
        path.pop();
    }
    for index in left.start + paired..left.end {
        path.push(Segment::index(index));
        reporter.report(Difference {
            kind: DifferenceKind::Removed,
            path,
            expected: Some(&expected[index]),
            actual: None,
        });
        path.pop();
    }
    for index in right.start + paired..right.end {
        path.push(Segment::index(index));
        reporter.report(Difference {
            kind: DifferenceKind::Inserted,
            path,
            expected: None,
            actual: Some(&actual[index]),
        });
        path.pop();
    }
}

/// Index pairs of a longest common subsequence, in ascending order.
///
/// Elements match when their hashes agree and they are structurally equal.
fn common_pairs(
    expected: &[Node],
    actual: &[Node],
    expected_hashes: &[HashCode],
    actual_hashes: &[HashCode],
) -> Vec<(usize, usize)> {
    let same = |i: usize, j: usize| expected_hashes[i] == actual_hashes[j] && expected[i] == actual[j];
    let n = expected.len();
    let m = actual.len();
    let mut table = vec![vec![0usize; m + 1]; n + 1];
    for i in 0..n {
        for j in 0..m {
            table[i + 1][j + 1] = if same(i, j) {
                table[i][j] + 1
            } else {
                table[i][j + 1].max(table[i + 1][j])
            };
        }
    }

    let mut pairs = Vec::with_capacity(table[n][m]);
    let mut i = n;
    let mut j = m;
    while i > 0 && j > 0 {
        if same(i - 1, j - 1) {
            pairs.push((i - 1, j - 1));
            i -= 1;
            j -= 1;
        } else if table[i - 1][j] >= table[i][j - 1] {
            i -= 1;
        } else {
            j -= 1;
        }
    }
    pairs.reverse();
    pairs
}

#[cfg(test)]
mod tests {
    use super::*;

    fn json(input: &str) -> Vec<Node> {
        match Node::from_json_str(input).unwrap() {
            Node::Array(items) => items,
            other => panic!("expected array, got {other}"),
        }
    }

    fn collect(expected: &str, actual: &str) -> Vec<(DifferenceKind, String)> {
        let mut out = Vec::new();
        let mut path = Path::new();
        walk_lists(&json(expected), &json(actual), &mut path, &mut |d: Difference<'_>| {
            out.push((d.kind, d.path.to_string()));
        });
        assert!(path.is_empty());
        out
    }

    #[test]
    fn lcs_pairs_follow_both_orders() {
        let a = json("[1,2,3,4]");
        let b = json("[2,4,5]");
        let ah: Vec<_> = a.iter().map(Node::hash_code).collect();
        let bh: Vec<_> = b.iter().map(Node::hash_code).collect();
        assert_eq!(common_pairs(&a, &b, &ah, &bh), [(1, 0), (3, 1)]);
    }

    #[test]
    fn substitution_is_a_change() {
        assert_eq!(collect("[1,2,3]", "[1,5,3]"), [(DifferenceKind::Changed, "1".into())]);
    }

    #[test]
    fn appended_element_is_inserted() {
        assert_eq!(collect("[1,2]", "[1,2,3]"), [(DifferenceKind::Inserted, "2".into())]);
    }

    #[test]
    fn dropped_element_is_removed() {
        assert_eq!(collect("[1,2,3]", "[1,3]"), [(DifferenceKind::Removed, "1".into())]);
    }

    #[test]
    fn unaligned_objects_are_compared_field_wise() {
        assert_eq!(
            collect(r#"[{"id":1,"v":"a"},7]"#, r#"[{"id":1,"v":"b"},7,8]"#),
            [(DifferenceKind::Changed, "0.v".into()), (DifferenceKind::Inserted, "2".into())]
        );
    }

    #[test]
    fn leftovers_after_pairing() {
        assert_eq!(
            collect("[1,2,3]", "[4]"),
            [(DifferenceKind::Changed, "0".into()), (DifferenceKind::Removed, "1".into()), (DifferenceKind::Removed, "2".into())]
        );
    }
}

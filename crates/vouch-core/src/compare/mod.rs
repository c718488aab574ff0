//! Structural comparison of an expected document against an actual one.
//!
//! [`walk`] is the generic traversal: it visits matching substructure
//! pairwise and hands every discrepancy to a [`Reporter`]. [`DiffRecorder`]
//! is the reporter behind [`compare`]; it applies the partial or strict
//! policy, renders both sides and caps the size of the report.

mod list;
mod object;
mod recorder;

pub use recorder::{render_pair, DiffRecord, DiffRecorder, DiffReport};

use serde::{Deserialize, Serialize};

use crate::query::Path;
use crate::{CompareOptions, Node};

/// How the two sides disagree at a path.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DifferenceKind {
    /// Both sides exist but differ.
    Changed,
    /// An object key exists only in the expected document.
    Missing,
    /// An object key exists only in the actual document.
    Unexpected,
    /// An expected array element has no counterpart in the actual array.
    Removed,
    /// An actual array element has no counterpart in the expected array.
    Inserted,
}

/// One discrepancy found by [`walk`].
///
/// `path` addresses the expected side for [`DifferenceKind::Removed`] and the
/// actual side for [`DifferenceKind::Inserted`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Difference<'a> {
    /// Classification.
    pub kind: DifferenceKind,
    /// Location of the discrepancy.
    pub path: &'a Path,
    /// Expected side, absent for unexpected and inserted content.
    pub expected: Option<&'a Node>,
    /// Actual side, absent for missing and removed content.
    pub actual: Option<&'a Node>,
}

/// Receives the discrepancies found during a [`walk`].
pub trait Reporter {
    /// Handles one discrepancy.
    fn report(&mut self, difference: Difference<'_>);
}

impl<F> Reporter for F
where
    F: FnMut(Difference<'_>),
{
    fn report(&mut self, difference: Difference<'_>) {
        self(difference);
    }
}

/// Walks both documents in lockstep, reporting every discrepancy.
///
/// Objects are compared key by key in sorted order, then the keys only the
/// actual side has. Arrays are aligned on their longest common subsequence;
/// unaligned runs are paired by position and whatever is left over is
/// reported as removed or inserted.
///
/// ```
/// # use vouch_core::{compare::{walk, Difference, DifferenceKind}, Node};
/// let expected = Node::from_json_str(r#"{"a":1,"b":[1,2]}"#)?;
/// let actual = Node::from_json_str(r#"{"a":2,"b":[1,2,3],"c":true}"#)?;
/// let mut kinds = Vec::new();
/// walk(&expected, &actual, &mut |d: Difference<'_>| kinds.push((d.kind, d.path.to_string())));
/// assert_eq!(
///     kinds,
///     [
///         (DifferenceKind::Changed, "a".to_string()),
///         (DifferenceKind::Inserted, "b.2".to_string()),
///         (DifferenceKind::Unexpected, "c".to_string()),
///     ]
/// );
/// # Ok::<(), vouch_core::CanonicalizeError>(())
/// ```
pub fn walk<R: Reporter + ?Sized>(expected: &Node, actual: &Node, reporter: &mut R) {
    let mut path = Path::new();
    walk_at(expected, actual, &mut path, reporter);
}

/// Compares two documents and collects a size-capped report.
///
/// ```
/// # use vouch_core::{compare::compare, CompareOptions, Node};
/// let expected = Node::from_json_str(r#"{"id":1}"#)?;
/// let actual = Node::from_json_str(r#"{"id":2,"extra":true}"#)?;
/// let report = compare(&expected, &actual, &CompareOptions::default());
/// assert_eq!(report.render(), "@ [\"id\"]\n- 1\n+ 2\n");
/// assert_eq!(compare(&expected, &actual, &CompareOptions::strict()).len(), 2);
/// # Ok::<(), vouch_core::CanonicalizeError>(())
/// ```
#[must_use]
pub fn compare(expected: &Node, actual: &Node, options: &CompareOptions) -> DiffReport {
    let mut recorder = DiffRecorder::new(options);
    walk(expected, actual, &mut recorder);
    recorder.finish()
}

pub(crate) fn walk_at<R: Reporter + ?Sized>(
    expected: &Node,
    actual: &Node,
    path: &mut Path,
    reporter: &mut R,
) {
    if expected == actual {
        return;
    }
    match (expected, actual) {
        (Node::Object(left), Node::Object(right)) => {
            object::walk_objects(left, right, path, reporter);
        }
        (Node::Array(left), Node::Array(right)) => list::walk_lists(left, right, path, reporter),
        _ => reporter.report(Difference {
            kind: DifferenceKind::Changed,
            path,
            expected: Some(expected),
            actual: Some(actual),
        }),
    }
}

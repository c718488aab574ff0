use std::fmt;

use serde::Serialize;
use tracing::debug;

use super::{Difference, DifferenceKind, Reporter};
use crate::format::{format, FormatConfig, Value};
use crate::query::Path;
use crate::{CompareMode, CompareOptions, Node};

/// One reported discrepancy with both sides already rendered.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DiffRecord {
    /// Classification.
    pub kind: DifferenceKind,
    /// Location.
    pub path: Path,
    /// Rendering of the expected side, `<non-existent>` when absent.
    pub expected: String,
    /// Rendering of the actual side, `<non-existent>` when absent.
    pub actual: String,
}

impl fmt::Display for DiffRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "@ {}", self.path.to_json_string())?;
        writeln!(f, "- {}", self.expected)?;
        writeln!(f, "+ {}", self.actual)
    }
}

/// The records collected by one comparison.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct DiffReport {
    records: Vec<DiffRecord>,
    truncated: bool,
}

impl DiffReport {
    /// Indicates that no reportable difference was found.
    ///
    /// A report whose records were all dropped by the size caps is not empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty() && !self.truncated
    }

    /// Number of kept records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// The kept records in traversal order.
    #[must_use]
    pub fn records(&self) -> &[DiffRecord] {
        &self.records
    }

    /// Indicates that later records were dropped to respect the size caps.
    #[must_use]
    pub fn is_truncated(&self) -> bool {
        self.truncated
    }

    /// Renders every kept record as `@ path`, `- expected`, `+ actual` lines.
    #[must_use]
    pub fn render(&self) -> String {
        self.records.iter().map(ToString::to_string).collect()
    }
}

impl<'a> IntoIterator for &'a DiffReport {
    type Item = &'a DiffRecord;
    type IntoIter = std::slice::Iter<'a, DiffRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

/// A [`Reporter`] applying the partial or strict policy and the size caps.
///
/// A recorder accumulates for a single comparison; create a new one per call.
#[derive(Debug)]
pub struct DiffRecorder {
    options: CompareOptions,
    report: DiffReport,
    bytes: usize,
    lines: usize,
}

impl DiffRecorder {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new(options: &CompareOptions) -> Self {
        Self { options: options.clone(), report: DiffReport::default(), bytes: 0, lines: 0 }
    }

    /// Hands over the collected report.
    #[must_use]
    pub fn finish(self) -> DiffReport {
        self.report
    }

    fn is_reportable(&self, kind: DifferenceKind) -> bool {
        match kind {
            DifferenceKind::Changed | DifferenceKind::Missing | DifferenceKind::Removed => true,
            DifferenceKind::Unexpected | DifferenceKind::Inserted => {
                self.options.mode() == CompareMode::Strict
            }
        }
    }
}

impl Reporter for DiffRecorder {
    fn report(&mut self, difference: Difference<'_>) {
        if self.report.truncated || !self.is_reportable(difference.kind) {
            return;
        }
        let (expected, actual) = render_pair(&side(difference.expected), &side(difference.actual));
        let record =
            DiffRecord { kind: difference.kind, path: difference.path.clone(), expected, actual };
        let text = record.to_string();
        let lines = text.lines().count();
        if self.bytes + text.len() > self.options.max_bytes()
            || self.lines + lines > self.options.max_lines()
        {
            debug!(
                kept = self.report.records.len(),
                bytes = self.bytes,
                lines = self.lines,
                path = %difference.path,
                "diff report truncated"
            );
            self.report.truncated = true;
            return;
        }
        self.bytes += text.len();
        self.lines += lines;
        self.report.records.push(record);
    }
}

/// Renders both sides of a difference.
///
/// The JSON-oriented form is used unless both sides look identical in it, in
/// which case both are rendered again with every type annotated.
///
/// ```
/// # use vouch_core::{compare::render_pair, format::{IntKind, Value}};
/// let (left, right) = render_pair(&Value::int(IntKind::I32, 5), &Value::int(IntKind::I64, 5));
/// assert_eq!((left.as_str(), right.as_str()), ("i32(5)", "i64(5)"));
/// let (left, right) = render_pair(&Value::int(IntKind::I32, 5), &Value::int(IntKind::I32, 6));
/// assert_eq!((left.as_str(), right.as_str()), ("5", "6"));
/// ```
#[must_use]
pub fn render_pair(expected: &Value, actual: &Value) -> (String, String) {
    let config = FormatConfig::json();
    let left = format(expected, &config);
    let right = format(actual, &config);
    if left != right {
        return (left, right);
    }
    let config = FormatConfig::verbose();
    (format(expected, &config), format(actual, &config))
}

fn side(node: Option<&Node>) -> Value {
    node.map_or(Value::Invalid, Value::from)
}

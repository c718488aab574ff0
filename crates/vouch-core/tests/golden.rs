use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde_json::Value as JsonValue;
use vouch_core::query::{Engine, Expected};
use vouch_core::{CompareMode, CompareOptions, Node};

#[derive(Debug, Deserialize)]
struct QueryFixture {
    doc: JsonValue,
    path: String,
    expected: JsonValue,
    found: bool,
}

#[derive(Debug, Deserialize)]
struct CompareFixture {
    expected: JsonValue,
    actual: JsonValue,
    mode: CompareMode,
    report: String,
}

fn fixture_paths(kind: &str) -> Vec<PathBuf> {
    let root = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures").join(kind);
    let mut entries: Vec<_> = fs::read_dir(&root)
        .expect("fixtures directory must exist")
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.extension().is_some_and(|ext| ext == "json"))
        .collect();
    entries.sort();
    assert!(!entries.is_empty(), "expected at least one fixture under tests/fixtures/{kind}");
    entries
}

fn load<T: for<'de> Deserialize<'de>>(path: &Path) -> T {
    let data = fs::read_to_string(path).expect("fixture should be readable");
    serde_json::from_str(&data).expect("fixture should deserialize")
}

#[test]
fn query_fixtures() {
    let engine = Engine::new();
    for path in fixture_paths("query") {
        let fixture: QueryFixture = load(&path);
        let doc = Node::from_json_value(fixture.doc).expect("doc converts");
        let expected = Expected::from_json_value(fixture.expected).expect("expected converts");
        let result = engine.check(&doc, &fixture.path, &expected);
        assert_eq!(result.found, fixture.found, "fixture {path:?}: {result:?}");
    }
}

#[test]
fn compare_fixtures() {
    for path in fixture_paths("compare") {
        let fixture: CompareFixture = load(&path);
        let expected = Node::from_json_value(fixture.expected).expect("expected converts");
        let actual = Node::from_json_value(fixture.actual).expect("actual converts");
        let options = CompareOptions::default().with_mode(fixture.mode);
        let report = expected.diff(&actual, &options);
        assert_eq!(report.render(), fixture.report, "fixture {path:?}");
        assert_eq!(report.is_empty(), fixture.report.is_empty(), "fixture {path:?}");
    }
}

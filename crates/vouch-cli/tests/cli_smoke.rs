use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;
use tempfile::NamedTempFile;

const ORDERS: &str = r#"{"items":[{"id":"417857","qty":2},{"id":"417858","qty":1}],"total":3}"#;

fn write_tempfile(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("create tempfile");
    write!(file, "{contents}").expect("write tempfile");
    file
}

fn vouch() -> Command {
    let mut cmd = Command::cargo_bin("vouch").expect("binary vouch should be built");
    cmd.env_remove("RUST_LOG");
    cmd
}

#[test]
fn help_lists_subcommands() {
    vouch()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("query"))
        .stdout(predicate::str::contains("compare"));
}

#[test]
fn query_prints_resolved_value() {
    let doc = write_tempfile(ORDERS);
    vouch()
        .args(["query", "items.1.id"])
        .arg(doc.path())
        .assert()
        .success()
        .stdout("\"417858\"\n")
        .stderr(predicate::str::is_empty());
}

#[test]
fn query_reads_stdin_and_applies_functions() {
    vouch().args(["query", "items.size()"]).write_stdin(ORDERS).assert().success().stdout("2\n");
}

#[test]
fn query_failure_exits_one() {
    vouch()
        .args(["query", "items.5"])
        .write_stdin(ORDERS)
        .assert()
        .code(1)
        .stdout(predicate::str::contains("index 5 out of bounds"));
}

#[test]
fn recursive_check_finds_every_element() {
    vouch()
        .args(["check", "~items.id", r#"["417857","417858"]"#])
        .write_stdin(ORDERS)
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
    vouch()
        .args(["check", "~items.id", r#"["417857","1"]"#])
        .write_stdin(ORDERS)
        .assert()
        .code(1)
        .stdout(predicate::str::contains("not found by path ~items.id"));
}

#[test]
fn exact_check_reports_actual_value() {
    vouch()
        .args(["check", "total", "4"])
        .write_stdin(ORDERS)
        .assert()
        .code(1)
        .stdout("expected 4, got 3\n");
}

#[test]
fn compare_partial_and_strict() {
    let expected = write_tempfile(r#"{"total":3}"#);
    let actual = write_tempfile(ORDERS);
    vouch().arg("compare").arg(expected.path()).arg(actual.path()).assert().success().stdout("");
    vouch()
        .args(["compare", "--strict"])
        .arg(expected.path())
        .arg(actual.path())
        .assert()
        .code(1)
        .stdout(predicate::str::starts_with("@ [\"items\"]\n- <non-existent>\n"));
}

#[test]
fn compare_rejects_zero_caps() {
    let expected = write_tempfile("{}");
    vouch()
        .args(["compare", "--max-lines", "0"])
        .arg(expected.path())
        .write_stdin("{}")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("max_lines must be greater than zero"));
}

#[test]
fn render_sorts_keys() {
    vouch()
        .args(["render", "--json"])
        .write_stdin(r#"{"b":null,"a":[1,"x"]}"#)
        .assert()
        .success()
        .stdout("{\"a\": [1, \"x\"], \"b\": null}\n");
}

#[test]
fn yaml_input_is_supported() {
    vouch()
        .args(["--yaml", "query", "service.port"])
        .write_stdin("service:\n  port: 8080\n")
        .assert()
        .success()
        .stdout("8080\n");
}

#[test]
fn missing_file_is_an_io_error() {
    vouch()
        .args(["query", "a", "/definitely/not/here.json"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("failed to read"));
}

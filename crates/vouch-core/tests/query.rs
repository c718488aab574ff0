use vouch_core::query::{Engine, Expected, Mode, Registry, Segment};
use vouch_core::{Node, QueryError};

fn json(input: &str) -> Node {
    Node::from_json_str(input).expect("valid JSON")
}

fn expect(input: &str) -> Expected {
    Expected::from_json_value(serde_json::from_str(input).expect("valid JSON"))
        .expect("finite numbers")
}

#[test]
fn order_document_queries() {
    let engine = Engine::new();
    let doc = json(r#"{"items":[{"id":"417857"},{"id":"417858"}]}"#);

    let resolved = engine.resolve(&doc, &engine.parse_path("items.1.id")).unwrap();
    assert_eq!(*resolved, Node::from("417858"));

    let resolved = engine.resolve(&doc, &engine.parse_path("items.size()")).unwrap();
    assert_eq!(*resolved, json("2"));

    let path = engine.parse_path("~items.id");
    assert!(engine.search(&doc, &expect(r#"["417857","417858"]"#), &path).is_ok());
    let err = engine.search(&doc, &expect(r#"["417857","1"]"#), &path).unwrap_err();
    assert_eq!(err.to_string(), "value \"1\" not found by path ~items.id");
}

#[test]
fn functions_only_apply_in_last_position() {
    let engine = Engine::new();
    let path = engine.parse_path("a.size().b");
    assert_eq!(
        path.segments(),
        &[Segment::key("a"), Segment::key("size()"), Segment::key("b")]
    );

    let doc = json(r#"{"a":{"size()":{"b":true}}}"#);
    assert_eq!(*engine.resolve(&doc, &path).unwrap(), Node::from(true));
}

#[test]
fn unregistered_function_names_are_keys() {
    let engine = Engine::with_registry(Registry::empty());
    let doc = json(r#"{"items":{"size()":9}}"#);
    let path = engine.parse_path("items.size()");
    assert_eq!(path.segments()[1], Segment::key("size()"));
    assert_eq!(*engine.resolve(&doc, &path).unwrap(), json("9"));
}

#[test]
fn only_canonical_integers_are_indices() {
    let engine = Engine::new();
    let path = engine.parse_path("a.0.01.-1.10");
    assert_eq!(
        path.segments(),
        &[
            Segment::key("a"),
            Segment::index(0),
            Segment::key("01"),
            Segment::key("-1"),
            Segment::index(10),
        ]
    );
}

#[test]
fn marker_selects_mode() {
    let engine = Engine::new();
    assert_eq!(engine.parse_path("a.b").mode(), Mode::Exact);
    let recursive = engine.parse_path("~a.b");
    assert_eq!(recursive.mode(), Mode::Recursive);
    assert_eq!(recursive.to_string(), "~a.b");
    assert_eq!(engine.parse_path("a.~b").segments()[1], Segment::key("~b"));
}

#[test]
fn empty_paths_address_the_root() {
    let engine = Engine::new();
    let doc = json(r#"[1,2]"#);
    assert_eq!(*engine.resolve(&doc, &engine.parse_path("")).unwrap(), doc);
    assert!(engine.check(&doc, "~", &expect("2")).found);
    assert!(!engine.check(&doc, "~", &expect("3")).found);
}

#[test]
fn resolution_errors_name_the_failing_step() {
    let engine = Engine::new();
    let doc = json(r#"{"items":[{"id":"a"}],"name":"x"}"#);

    let err = engine.resolve(&doc, &engine.parse_path("items.3.id")).unwrap_err();
    assert_eq!(
        err,
        QueryError::IndexOutOfBounds { index: 3, len: 1, at: "items".into() }
    );
    let err = engine.resolve(&doc, &engine.parse_path("name.size()")).unwrap_err();
    assert_eq!(err.to_string(), "function size() is not applicable to string at name");
    let err = engine.resolve(&doc, &engine.parse_path("items.id")).unwrap_err();
    assert_eq!(
        err,
        QueryError::NotAnObject { key: "id".into(), found: "array", at: "items".into() }
    );
    let err = engine.resolve(&doc, &engine.parse_path("missing")).unwrap_err();
    assert_eq!(err.to_string(), "key \"missing\" not found at <root>");
}

#[test]
fn string_functions_stringify_without_quotes() {
    let engine = Engine::new();
    let doc = json(r#"{"n":1.5,"flag":false,"list":[1,"a",null],"s":"text"}"#);
    let run = |raw: &str| engine.resolve(&doc, &engine.parse_path(raw)).unwrap().into_owned();
    assert_eq!(run("n.string()"), Node::from("1.5"));
    assert_eq!(run("flag.string()"), Node::from("false"));
    assert_eq!(run("list.string()"), Node::from("[1 a <nil>]"));
    assert_eq!(run("s.string()"), Node::from("text"));
    assert_eq!(run("list.sizeAsString()"), Node::from("3"));
}

#[test]
fn recursive_search_tolerates_heterogeneous_branches() {
    let engine = Engine::new();
    let doc = json(
        r#"{"events":[
            {"kind":"a","payload":{"ids":[1,2]}},
            "noise",
            {"kind":"b"},
            {"kind":"c","payload":{"ids":[3]}}
        ]}"#,
    );
    assert!(engine.check(&doc, "~events.payload.ids", &expect("[1,3]")).found);
    assert!(engine.check(&doc, "~events.payload.ids.size()", &expect("1")).found);
    assert!(!engine.check(&doc, "~events.payload.ids", &expect("4")).found);
}

#[test]
fn exact_check_exposes_actual_value() {
    let engine = Engine::new();
    let doc = json(r#"{"total":3}"#);
    let result = engine.check(&doc, "total", &expect("4"));
    assert!(!result.found);
    assert_eq!(result.value, Some(json("3")));
    assert!(result.error.is_none());
}

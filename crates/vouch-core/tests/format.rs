use vouch_core::format::{format, FloatKind, FormatConfig, Formatter, IntKind, Shared, UintKind, Value};
use vouch_core::Node;

fn doc(input: &str) -> Value {
    Value::from(&Node::from_json_str(input).expect("valid JSON"))
}

#[test]
fn document_renderings_per_preset() {
    let value = doc(r#"{"s":"x","a":1,"n":null}"#);
    assert_eq!(format(&value, &FormatConfig::json()), r#"{"a": 1, "n": null, "s": "x"}"#);
    assert_eq!(
        format(&value, &FormatConfig::default()),
        r#"object{"a": 1, "n": node(nil), "s": "x"}"#
    );
    assert_eq!(
        format(&value, &FormatConfig::verbose()),
        r#"object{"a": f64(1), "n": node(nil), "s": String("x")}"#
    );
}

#[test]
fn formatter_is_reusable() {
    let formatter = Formatter::new(FormatConfig::json());
    assert!(formatter.config().json_enabled());
    assert_eq!(formatter.format(&doc("[1,[2]]")), "[1, [2]]");
    assert_eq!(formatter.format(&doc("[1,[2]]")), "[1, [2]]");
    assert_eq!(formatter.format(&doc("\"line\\nbreak\"")), r#""line\nbreak""#);
}

#[test]
fn nested_records_annotate_their_fields() {
    let address = Value::record("Address", [("city", Value::string("Oslo"))]);
    let user = Value::record(
        "User",
        [
            ("id", Value::uint(UintKind::U32, 258)),
            ("level", Value::uint(UintKind::U8, 3).named("Level")),
            ("home", address),
            ("score", Value::float(FloatKind::F32, 0.0)),
        ],
    );
    assert_eq!(
        format(&user, &FormatConfig::default()),
        r#"User{id: 0x0102, level: Level(3), home: Address{city: "Oslo"}}"#
    );
    let untyped = FormatConfig::default().with_show_type(false).with_zero_fields(true);
    assert_eq!(
        format(&user, &untyped),
        r#"{id: 0x0102, level: 3, home: {city: "Oslo"}, score: 0}"#
    );
}

#[test]
fn stringer_output_replaces_fields() {
    let stamp = Value::record("Timestamp", [("secs", Value::int(IntKind::I64, 60))])
        .with_display("1970-01-01T00:01:00Z");
    assert_eq!(format(&stamp, &FormatConfig::default()), "Timestamp{secs: 60}");
    assert_eq!(
        format(&stamp, &FormatConfig::default().with_stringer(true)),
        r#"s"1970-01-01T00:01:00Z""#
    );
}

#[test]
fn shared_targets_render_once() {
    let target = Shared::new(Value::string("shared"));
    let pair = Value::array(
        "[&String; 2]",
        vec![Value::pointer("&String", &target), Value::pointer("&String", &target)],
    );
    let untyped = FormatConfig::default().with_show_type(false);
    assert_eq!(format(&pair, &untyped), r#"{&"shared", 0x00}"#);
    let unfollowed = untyped.with_follow_pointers(false);
    assert_eq!(format(&pair, &unfollowed), "{0x00, 0x00}");
}

#[test]
fn config_round_trips_through_serde() {
    let config = FormatConfig::verbose().with_real_addresses(true);
    let text = serde_json::to_string(&config).unwrap();
    let back: FormatConfig = serde_json::from_str(&text).unwrap();
    assert_eq!(back, config);
    assert!(back.show_primitive_types());
    assert!(back.real_addresses());
}

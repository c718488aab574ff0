//! Deterministic, cycle-safe rendering of values for failure reports.
//!
//! [`Value`] models what the formatter can see: typed primitives, named
//! types, nil versus empty containers, records, dynamically typed holders and
//! pointers with stable identity. Documents convert into it through
//! `From<&Node>`. Rendering sorts map keys with [`is_less`], elides zero-valued
//! record fields and renders a pointer it has already entered as an address
//! token, so cyclic structures terminate.

mod order;
mod value;

pub use order::{compare, is_less, sort_keys};
pub use value::{
    FloatKind, IntKind, Kind, Shared, UintKind, Value, ARRAY_TYPE, NODE_TYPE, OBJECT_TYPE,
};

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

const NON_EXISTENT: &str = "<non-existent>";
const NIL: &str = "<nil>";
const ADDRESS_PLACEHOLDER: &str = "0x00";

/// Independently toggleable rendering flags.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[allow(clippy::struct_excessive_bools)]
pub struct FormatConfig {
    use_stringer: bool,
    json: bool,
    show_type: bool,
    show_primitive_types: bool,
    follow_pointers: bool,
    real_addresses: bool,
    show_zero_fields: bool,
}

impl Default for FormatConfig {
    /// Type annotations where they disambiguate, pointers followed.
    fn default() -> Self {
        Self {
            use_stringer: false,
            json: false,
            show_type: true,
            show_primitive_types: false,
            follow_pointers: true,
            real_addresses: false,
            show_zero_fields: false,
        }
    }
}

impl FormatConfig {
    /// JSON-oriented rendering: no type prefixes, JSON-quoted strings, `null`
    /// for nil holders, bracketed sequences and display output for records.
    #[must_use]
    pub fn json() -> Self {
        Self { json: true, show_type: false, use_stringer: true, ..Self::default() }
    }

    /// Every type annotation, including built-in primitive kinds.
    #[must_use]
    pub fn verbose() -> Self {
        Self { show_primitive_types: true, ..Self::default() }
    }

    /// Renders records through their display output when they have one.
    #[must_use]
    pub fn with_stringer(mut self, enabled: bool) -> Self {
        self.use_stringer = enabled;
        self
    }

    /// Switches to JSON-oriented rendering of strings, nil holders and sequences.
    #[must_use]
    pub fn with_json(mut self, enabled: bool) -> Self {
        self.json = enabled;
        self
    }

    /// Enables type annotations on containers, named types and nil values.
    #[must_use]
    pub fn with_show_type(mut self, enabled: bool) -> Self {
        self.show_type = enabled;
        self
    }

    /// Annotates built-in primitive kinds too, e.g. `i32(5)`.
    #[must_use]
    pub fn with_primitive_types(mut self, enabled: bool) -> Self {
        self.show_primitive_types = enabled;
        self
    }

    /// Dereferences pointers instead of printing their address token.
    #[must_use]
    pub fn with_follow_pointers(mut self, enabled: bool) -> Self {
        self.follow_pointers = enabled;
        self
    }

    /// Prints real addresses instead of a fixed placeholder.
    #[must_use]
    pub fn with_real_addresses(mut self, enabled: bool) -> Self {
        self.real_addresses = enabled;
        self
    }

    /// Keeps zero-valued record fields in the output.
    #[must_use]
    pub fn with_zero_fields(mut self, enabled: bool) -> Self {
        self.show_zero_fields = enabled;
        self
    }

    /// Indicates whether record display output is used.
    #[must_use]
    pub fn use_stringer(self) -> bool {
        self.use_stringer
    }

    /// Indicates whether JSON-oriented rendering is on.
    #[must_use]
    pub fn json_enabled(self) -> bool {
        self.json
    }

    /// Indicates whether type annotations are emitted.
    #[must_use]
    pub fn show_type(self) -> bool {
        self.show_type
    }

    /// Indicates whether built-in primitive kinds are annotated.
    #[must_use]
    pub fn show_primitive_types(self) -> bool {
        self.show_primitive_types
    }

    /// Indicates whether pointers are followed.
    #[must_use]
    pub fn follow_pointers(self) -> bool {
        self.follow_pointers
    }

    /// Indicates whether real addresses are printed.
    #[must_use]
    pub fn real_addresses(self) -> bool {
        self.real_addresses
    }

    /// Indicates whether zero-valued record fields are kept.
    #[must_use]
    pub fn show_zero_fields(self) -> bool {
        self.show_zero_fields
    }
}

/// Renders values with a fixed configuration.
///
/// The formatter itself holds no per-render state: every call to
/// [`Formatter::format`] starts with an empty visited set.
#[derive(Clone, Copy, Debug, Default)]
pub struct Formatter {
    config: FormatConfig,
}

impl Formatter {
    /// Creates a formatter for `config`.
    #[must_use]
    pub fn new(config: FormatConfig) -> Self {
        Self { config }
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> FormatConfig {
        self.config
    }

    /// Renders `value`.
    ///
    /// # Panics
    ///
    /// Panics when a map has keys of a kind that cannot be ordered.
    #[must_use]
    pub fn format(&self, value: &Value) -> String {
        let mut renderer = Renderer {
            config: self.config,
            following: self.config.follow_pointers,
            visited: HashSet::new(),
            out: String::new(),
        };
        renderer.value(value, self.config.show_type);
        renderer.out
    }
}

/// Renders `value` with `config`.
///
/// ```
/// # use vouch_core::{format::{format, FormatConfig, Value}, Node};
/// let doc = Node::from_json_str(r#"{"b":[1,null],"a":"x"}"#)?;
/// let value = Value::from(&doc);
/// assert_eq!(format(&value, &FormatConfig::json()), r#"{"a": "x", "b": [1, null]}"#);
/// # Ok::<(), vouch_core::CanonicalizeError>(())
/// ```
///
/// # Panics
///
/// Panics when a map has keys of a kind that cannot be ordered.
#[must_use]
pub fn format(value: &Value, config: &FormatConfig) -> String {
    Formatter::new(*config).format(value)
}

struct Renderer {
    config: FormatConfig,
    following: bool,
    visited: HashSet<usize>,
    out: String,
}

impl Renderer {
    fn value(&mut self, value: &Value, print_type: bool) {
        let annotate = print_type && self.config.show_type;
        match value {
            Value::Invalid => self.out.push_str(NON_EXISTENT),
            Value::Bool { value: b, .. } => self.primitive(value, &b.to_string(), annotate),
            Value::Int { value: n, .. } => self.primitive(value, &n.to_string(), annotate),
            Value::Uint { value: n, name, .. } => {
                let text = if name.is_some() { n.to_string() } else { hex(*n) };
                self.primitive(value, &text, annotate);
            }
            Value::Float { value: n, kind, .. } => {
                let text = match kind {
                    FloatKind::F32 => (*n as f32).to_string(),
                    FloatKind::F64 => n.to_string(),
                };
                self.primitive(value, &text, annotate);
            }
            Value::Str { value: s, .. } => {
                let text = if self.config.json { json_quote(s) } else { quote(s) };
                self.primitive(value, &text, annotate);
            }
            Value::Array { ty, items } | Value::Seq { ty, items: Some(items) } => {
                self.prefix(ty, annotate);
                self.items(items);
            }
            Value::Map { ty, entries: Some(entries) } => {
                self.prefix(ty, annotate);
                self.entries(entries);
            }
            Value::Record { ty, fields, display } => match display {
                Some(text) if self.config.use_stringer => {
                    self.out.push('s');
                    self.out.push_str(&quote_always(text));
                }
                _ => {
                    self.prefix(ty, annotate);
                    self.fields(fields);
                }
            },
            Value::Dynamic { inner: Some(inner), .. } => self.value(inner, true),
            Value::Dynamic { ty, inner: None } => {
                if self.config.json {
                    self.out.push_str("null");
                } else {
                    self.nil(ty, false, annotate);
                }
            }
            Value::Seq { ty, items: None } | Value::Map { ty, entries: None } => {
                self.nil(ty, false, annotate);
            }
            Value::Pointer { ty, target: None } => self.nil(ty, true, annotate),
            Value::Pointer { ty, target: Some(target) } => {
                let address = target.address();
                if self.following && self.visited.insert(address) {
                    self.out.push('&');
                    let inner = target.borrow();
                    self.value(&inner, print_type);
                } else {
                    self.address(ty, address, true, annotate);
                }
            }
            Value::Func { ty, address: 0 } => self.nil(ty, false, annotate),
            Value::Func { ty, address } => self.address(ty, *address, false, annotate),
        }
    }

    fn primitive(&mut self, value: &Value, text: &str, annotate: bool) {
        if annotate && (self.config.show_primitive_types || value.is_named()) {
            self.out.push_str(value.type_name());
            self.out.push('(');
            self.out.push_str(text);
            self.out.push(')');
        } else {
            self.out.push_str(text);
        }
    }

    fn prefix(&mut self, ty: &str, annotate: bool) {
        if annotate {
            self.out.push_str(ty);
        }
    }

    fn nil(&mut self, ty: &str, parenthesize: bool, annotate: bool) {
        if !annotate {
            self.out.push_str(NIL);
        } else if parenthesize {
            self.out.push_str(&format!("({ty})(nil)"));
        } else {
            self.out.push_str(&format!("{ty}(nil)"));
        }
    }

    fn address(&mut self, ty: &str, address: usize, parenthesize: bool, annotate: bool) {
        let token = if self.config.real_addresses {
            format!("{address:#x}")
        } else {
            ADDRESS_PLACEHOLDER.to_string()
        };
        match (annotate, parenthesize) {
            (false, _) => self.out.push_str(&token),
            (true, true) => self.out.push_str(&format!("({ty})({token})")),
            (true, false) => self.out.push_str(&format!("{ty}({token})")),
        }
    }

    fn items(&mut self, items: &[Value]) {
        let (open, close) = if self.config.json { ('[', ']') } else { ('{', '}') };
        self.out.push(open);
        for (position, item) in items.iter().enumerate() {
            if position > 0 {
                self.out.push_str(", ");
            }
            self.value(item, matches!(item, Value::Dynamic { .. }));
        }
        self.out.push(close);
    }

    fn entries(&mut self, entries: &[(Value, Value)]) {
        let mut sorted = entries.to_vec();
        sort_keys(&mut sorted);
        self.out.push('{');
        for (position, (key, value)) in sorted.iter().enumerate() {
            if position > 0 {
                self.out.push_str(", ");
            }
            let following = std::mem::replace(&mut self.following, false);
            self.value(key, matches!(key, Value::Dynamic { .. }));
            self.following = following;
            self.out.push_str(": ");
            self.value(value, matches!(value, Value::Dynamic { .. }));
        }
        self.out.push('}');
    }

    fn fields(&mut self, fields: &[(String, Value)]) {
        self.out.push('{');
        let show_zero = self.config.show_zero_fields;
        let shown = fields.iter().filter(move |(_, value)| show_zero || !value.is_zero());
        for (position, (name, value)) in shown.enumerate() {
            if position > 0 {
                self.out.push_str(", ");
            }
            self.out.push_str(name);
            self.out.push_str(": ");
            self.value(value, true);
        }
        self.out.push('}');
    }
}

/// Quoted form when nothing needs escaping, else a back-quoted raw form when
/// that is safe, else the escaped quoted form.
fn quote(s: &str) -> String {
    let quoted = quote_always(s);
    if quoted.len() == s.len() + 2 {
        return quoted;
    }
    if s.chars().all(is_raw_printable) {
        format!("`{s}`")
    } else {
        quoted
    }
}

/// Characters `Debug` leaves untouched, plus the quotes and backslash the raw
/// form exists to keep unescaped.
fn is_raw_printable(c: char) -> bool {
    match c {
        '`' => false,
        '"' | '\'' | '\\' => true,
        _ => {
            let mut escaped = c.escape_debug();
            escaped.next() == Some(c) && escaped.next().is_none()
        }
    }
}

fn quote_always(s: &str) -> String {
    format!("{s:?}")
}

fn json_quote(s: &str) -> String {
    JsonValue::String(s.to_string()).to_string()
}

/// Hexadecimal padded to the smallest whole number of bytes.
fn hex(n: u64) -> String {
    let bits = u64::BITS - n.leading_zeros();
    let width = (bits.div_ceil(8).max(1) * 2) as usize;
    format!("0x{n:0width$x}")
}

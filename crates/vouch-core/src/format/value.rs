use std::cell::{Ref, RefCell};
use std::fmt;
use std::rc::Rc;

use crate::Node;

/// Type name given to containers converted from documents.
pub const ARRAY_TYPE: &str = "array";
/// Type name given to objects converted from documents.
pub const OBJECT_TYPE: &str = "object";
/// Type name of the dynamic holder wrapping every converted document value.
pub const NODE_TYPE: &str = "node";

/// Width of a signed integer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IntKind {
    /// `i8`
    I8,
    /// `i16`
    I16,
    /// `i32`
    I32,
    /// `i64`
    I64,
    /// `isize`
    Isize,
}

/// Width of an unsigned integer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UintKind {
    /// `u8`
    U8,
    /// `u16`
    U16,
    /// `u32`
    U32,
    /// `u64`
    U64,
    /// `usize`
    Usize,
}

/// Width of a float.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FloatKind {
    /// `f32`
    F32,
    /// `f64`
    F64,
}

impl IntKind {
    fn name(self) -> &'static str {
        match self {
            Self::I8 => "i8",
            Self::I16 => "i16",
            Self::I32 => "i32",
            Self::I64 => "i64",
            Self::Isize => "isize",
        }
    }
}

impl UintKind {
    fn name(self) -> &'static str {
        match self {
            Self::U8 => "u8",
            Self::U16 => "u16",
            Self::U32 => "u32",
            Self::U64 => "u64",
            Self::Usize => "usize",
        }
    }
}

impl FloatKind {
    fn name(self) -> &'static str {
        match self {
            Self::F32 => "f32",
            Self::F64 => "f64",
        }
    }
}

/// Coarse classification of a [`Value`], also the first sort criterion for
/// dynamically typed keys.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Kind {
    /// [`Value::Invalid`]
    Invalid,
    /// [`Value::Bool`]
    Bool,
    /// [`Value::Int`]
    Int,
    /// [`Value::Uint`]
    Uint,
    /// [`Value::Float`]
    Float,
    /// [`Value::Str`]
    Str,
    /// [`Value::Array`]
    Array,
    /// [`Value::Seq`]
    Seq,
    /// [`Value::Map`]
    Map,
    /// [`Value::Record`]
    Record,
    /// [`Value::Dynamic`]
    Dynamic,
    /// [`Value::Pointer`]
    Pointer,
    /// [`Value::Func`]
    Func,
}

impl Kind {
    /// Lower-case name used in diagnostics.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Invalid => "invalid",
            Self::Bool => "bool",
            Self::Int => "int",
            Self::Uint => "uint",
            Self::Float => "float",
            Self::Str => "string",
            Self::Array => "array",
            Self::Seq => "sequence",
            Self::Map => "map",
            Self::Record => "record",
            Self::Dynamic => "dynamic",
            Self::Pointer => "pointer",
            Self::Func => "function",
        }
    }
}

/// A shared, mutable slot with a stable address, the target of [`Value::Pointer`].
///
/// Two pointers to the same slot are the same pointer, which is what lets the
/// formatter detect cycles.
#[derive(Clone)]
pub struct Shared(Rc<RefCell<Value>>);

impl Shared {
    /// Allocates a new slot holding `value`.
    #[must_use]
    pub fn new(value: Value) -> Self {
        Self(Rc::new(RefCell::new(value)))
    }

    /// Replaces the slot's content, returning the previous value.
    ///
    /// # Panics
    ///
    /// Panics if the slot is currently being read.
    pub fn replace(&self, value: Value) -> Value {
        self.0.replace(value)
    }

    /// Borrows the slot's content.
    #[must_use]
    pub fn borrow(&self) -> Ref<'_, Value> {
        self.0.borrow()
    }

    /// Identity of the slot.
    #[must_use]
    pub fn address(&self) -> usize {
        Rc::as_ptr(&self.0) as *const () as usize
    }
}

impl fmt::Debug for Shared {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Shared({:#x})", self.address())
    }
}

impl PartialEq for Shared {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

/// A typed, possibly nil, possibly cyclic value as seen by the formatter.
///
/// Primitives carry an optional `name`: named types are always annotated when
/// types are shown, while built-in kinds are only annotated on request.
/// Containers carry the full type name used as their prefix.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    /// No value at all; renders as `<non-existent>`.
    Invalid,
    /// Boolean.
    Bool {
        /// Content.
        value: bool,
        /// Name of a named boolean type.
        name: Option<String>,
    },
    /// Signed integer.
    Int {
        /// Content.
        value: i64,
        /// Width.
        kind: IntKind,
        /// Name of a named integer type.
        name: Option<String>,
    },
    /// Unsigned integer.
    Uint {
        /// Content.
        value: u64,
        /// Width.
        kind: UintKind,
        /// Name of a named integer type; unnamed values render in hexadecimal.
        name: Option<String>,
    },
    /// Floating point number.
    Float {
        /// Content.
        value: f64,
        /// Width.
        kind: FloatKind,
        /// Name of a named float type.
        name: Option<String>,
    },
    /// String.
    Str {
        /// Content.
        value: String,
        /// Name of a named string type.
        name: Option<String>,
    },
    /// Fixed-size array; comparable element-wise.
    Array {
        /// Type name.
        ty: String,
        /// Elements.
        items: Vec<Value>,
    },
    /// Growable sequence; `None` is nil, distinct from empty.
    Seq {
        /// Type name.
        ty: String,
        /// Elements, or `None` for nil.
        items: Option<Vec<Value>>,
    },
    /// Map; `None` is nil. Entries are sorted when rendered.
    Map {
        /// Type name.
        ty: String,
        /// Entries, or `None` for nil.
        entries: Option<Vec<(Value, Value)>>,
    },
    /// Record with named fields in declaration order.
    Record {
        /// Type name.
        ty: String,
        /// Fields.
        fields: Vec<(String, Value)>,
        /// Output of the type's `Display`, when it has one.
        display: Option<String>,
    },
    /// Dynamically typed holder; `None` is nil.
    Dynamic {
        /// Static type name of the holder.
        ty: String,
        /// Held value.
        inner: Option<Box<Value>>,
    },
    /// Reference to a shared slot; `None` is nil.
    Pointer {
        /// Pointer type name, e.g. `&Node`.
        ty: String,
        /// Target slot.
        target: Option<Shared>,
    },
    /// Function value; only its address is shown.
    Func {
        /// Type name.
        ty: String,
        /// Address, zero for nil.
        address: usize,
    },
}

impl Value {
    /// Unnamed boolean.
    #[must_use]
    pub fn bool(value: bool) -> Self {
        Self::Bool { value, name: None }
    }

    /// Unnamed signed integer of the given width.
    #[must_use]
    pub fn int(kind: IntKind, value: i64) -> Self {
        Self::Int { value, kind, name: None }
    }

    /// Unnamed unsigned integer of the given width.
    #[must_use]
    pub fn uint(kind: UintKind, value: u64) -> Self {
        Self::Uint { value, kind, name: None }
    }

    /// Unnamed float of the given width.
    #[must_use]
    pub fn float(kind: FloatKind, value: f64) -> Self {
        Self::Float { value, kind, name: None }
    }

    /// Unnamed string.
    #[must_use]
    pub fn string(value: impl Into<String>) -> Self {
        Self::Str { value: value.into(), name: None }
    }

    /// Gives a primitive a named type. Non-primitives are returned unchanged.
    ///
    /// ```
    /// # use vouch_core::format::{format, FormatConfig, UintKind, Value};
    /// let port = Value::uint(UintKind::U16, 8080).named("Port");
    /// assert_eq!(format(&port, &FormatConfig::default()), "Port(8080)");
    /// ```
    #[must_use]
    pub fn named(mut self, type_name: impl Into<String>) -> Self {
        match &mut self {
            Self::Bool { name, .. }
            | Self::Int { name, .. }
            | Self::Uint { name, .. }
            | Self::Float { name, .. }
            | Self::Str { name, .. } => *name = Some(type_name.into()),
            _ => {}
        }
        self
    }

    /// Fixed-size array.
    #[must_use]
    pub fn array(ty: impl Into<String>, items: Vec<Value>) -> Self {
        Self::Array { ty: ty.into(), items }
    }

    /// Non-nil sequence.
    #[must_use]
    pub fn seq(ty: impl Into<String>, items: Vec<Value>) -> Self {
        Self::Seq { ty: ty.into(), items: Some(items) }
    }

    /// Nil sequence.
    #[must_use]
    pub fn nil_seq(ty: impl Into<String>) -> Self {
        Self::Seq { ty: ty.into(), items: None }
    }

    /// Non-nil map.
    #[must_use]
    pub fn map(ty: impl Into<String>, entries: Vec<(Value, Value)>) -> Self {
        Self::Map { ty: ty.into(), entries: Some(entries) }
    }

    /// Nil map.
    #[must_use]
    pub fn nil_map(ty: impl Into<String>) -> Self {
        Self::Map { ty: ty.into(), entries: None }
    }

    /// Record without display output.
    #[must_use]
    pub fn record<I, S>(ty: impl Into<String>, fields: I) -> Self
    where
        I: IntoIterator<Item = (S, Value)>,
        S: Into<String>,
    {
        let fields = fields.into_iter().map(|(name, value)| (name.into(), value)).collect();
        Self::Record { ty: ty.into(), fields, display: None }
    }

    /// Attaches display output to a record. Non-records are returned unchanged.
    #[must_use]
    pub fn with_display(mut self, text: impl Into<String>) -> Self {
        if let Self::Record { display, .. } = &mut self {
            *display = Some(text.into());
        }
        self
    }

    /// Dynamic holder around `inner`.
    #[must_use]
    pub fn dynamic(ty: impl Into<String>, inner: Value) -> Self {
        Self::Dynamic { ty: ty.into(), inner: Some(Box::new(inner)) }
    }

    /// Nil dynamic holder.
    #[must_use]
    pub fn nil_dynamic(ty: impl Into<String>) -> Self {
        Self::Dynamic { ty: ty.into(), inner: None }
    }

    /// Pointer to `target`.
    #[must_use]
    pub fn pointer(ty: impl Into<String>, target: &Shared) -> Self {
        Self::Pointer { ty: ty.into(), target: Some(target.clone()) }
    }

    /// Nil pointer.
    #[must_use]
    pub fn nil_pointer(ty: impl Into<String>) -> Self {
        Self::Pointer { ty: ty.into(), target: None }
    }

    /// Function value at `address`.
    #[must_use]
    pub fn func(ty: impl Into<String>, address: usize) -> Self {
        Self::Func { ty: ty.into(), address }
    }

    /// Classifies the value.
    #[must_use]
    pub fn kind(&self) -> Kind {
        match self {
            Self::Invalid => Kind::Invalid,
            Self::Bool { .. } => Kind::Bool,
            Self::Int { .. } => Kind::Int,
            Self::Uint { .. } => Kind::Uint,
            Self::Float { .. } => Kind::Float,
            Self::Str { .. } => Kind::Str,
            Self::Array { .. } => Kind::Array,
            Self::Seq { .. } => Kind::Seq,
            Self::Map { .. } => Kind::Map,
            Self::Record { .. } => Kind::Record,
            Self::Dynamic { .. } => Kind::Dynamic,
            Self::Pointer { .. } => Kind::Pointer,
            Self::Func { .. } => Kind::Func,
        }
    }

    /// Full type name, as used in annotations.
    #[must_use]
    pub fn type_name(&self) -> &str {
        match self {
            Self::Invalid => "<invalid>",
            Self::Bool { name, .. } => name.as_deref().unwrap_or("bool"),
            Self::Int { name, kind, .. } => name.as_deref().unwrap_or(kind.name()),
            Self::Uint { name, kind, .. } => name.as_deref().unwrap_or(kind.name()),
            Self::Float { name, kind, .. } => name.as_deref().unwrap_or(kind.name()),
            Self::Str { name, .. } => name.as_deref().unwrap_or("String"),
            Self::Array { ty, .. }
            | Self::Seq { ty, .. }
            | Self::Map { ty, .. }
            | Self::Record { ty, .. }
            | Self::Dynamic { ty, .. }
            | Self::Pointer { ty, .. }
            | Self::Func { ty, .. } => ty,
        }
    }

    /// Indicates whether the value's type is a named one rather than a built-in kind.
    #[must_use]
    pub fn is_named(&self) -> bool {
        match self {
            Self::Bool { name, .. }
            | Self::Int { name, .. }
            | Self::Uint { name, .. }
            | Self::Float { name, .. }
            | Self::Str { name, .. } => name.is_some(),
            Self::Record { .. } => true,
            _ => false,
        }
    }

    /// Reports whether the value is its type's zero value.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        match self {
            Self::Invalid => false,
            Self::Bool { value, .. } => !value,
            Self::Int { value, .. } => *value == 0,
            Self::Uint { value, .. } => *value == 0,
            Self::Float { value, .. } => *value == 0.0,
            Self::Str { value, .. } => value.is_empty(),
            Self::Array { items, .. } => items.iter().all(Value::is_zero),
            Self::Seq { items, .. } => items.is_none(),
            Self::Map { entries, .. } => entries.is_none(),
            Self::Record { fields, .. } => fields.iter().all(|(_, value)| value.is_zero()),
            Self::Dynamic { inner, .. } => inner.is_none(),
            Self::Pointer { target, .. } => target.is_none(),
            Self::Func { address, .. } => *address == 0,
        }
    }
}

impl From<&Node> for Value {
    /// Wraps the document in a dynamic holder: objects become string-keyed
    /// maps, arrays sequences, numbers `f64` and `null` a nil holder.
    fn from(node: &Node) -> Self {
        match node {
            Node::Null => Self::nil_dynamic(NODE_TYPE),
            other => Self::dynamic(NODE_TYPE, concrete(other)),
        }
    }
}

fn concrete(node: &Node) -> Value {
    match node {
        Node::Null => Value::nil_dynamic(NODE_TYPE),
        Node::Bool(value) => Value::bool(*value),
        Node::Number(number) => Value::float(FloatKind::F64, number.get()),
        Node::String(value) => Value::string(value.clone()),
        Node::Array(items) => Value::seq(ARRAY_TYPE, items.iter().map(Value::from).collect()),
        Node::Object(map) => Value::map(
            OBJECT_TYPE,
            map.iter().map(|(key, value)| (Value::string(key.clone()), Value::from(value))).collect(),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn documents_convert_into_dynamic_holders() {
        let node = Node::from_json_str("{\"a\":[1,null]}").unwrap();
        let value = Value::from(&node);
        let Value::Dynamic { inner: Some(inner), .. } = value else {
            panic!("expected dynamic holder");
        };
        let Value::Map { entries: Some(entries), .. } = *inner else {
            panic!("expected map");
        };
        assert_eq!(entries[0].0, Value::string("a"));
        assert_eq!(
            entries[0].1,
            Value::dynamic(
                NODE_TYPE,
                Value::seq(
                    ARRAY_TYPE,
                    vec![
                        Value::dynamic(NODE_TYPE, Value::float(FloatKind::F64, 1.0)),
                        Value::nil_dynamic(NODE_TYPE),
                    ]
                )
            )
        );
    }

    #[test]
    fn zero_values() {
        assert!(Value::int(IntKind::I32, 0).is_zero());
        assert!(Value::string("").is_zero());
        assert!(Value::nil_seq("Vec<u8>").is_zero());
        assert!(!Value::seq("Vec<u8>", vec![]).is_zero());
        assert!(Value::record("Empty", [("a", Value::bool(false))]).is_zero());
        assert!(!Value::Invalid.is_zero());
    }

    #[test]
    fn naming_only_applies_to_primitives() {
        assert!(Value::bool(true).named("Flag").is_named());
        assert!(!Value::seq("Vec<u8>", vec![]).named("Ignored").is_named());
        assert_eq!(Value::int(IntKind::I32, 1).type_name(), "i32");
    }

    #[test]
    fn shared_slots_compare_by_identity() {
        let a = Shared::new(Value::bool(true));
        let b = Shared::new(Value::bool(true));
        assert_eq!(a, a.clone());
        assert_ne!(a, b);
        assert_ne!(a.address(), b.address());
    }
}

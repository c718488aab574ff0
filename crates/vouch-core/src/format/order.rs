//! Total ordering of formatter values, used to sort map keys.

use std::cmp::Ordering;

use super::value::{Shared, Value};
use crate::UncomparableKind;

/// Orders two values.
///
/// Values of different kinds are ordered by [`Kind`](super::Kind). Floats order NaN after
/// every other number and treat two NaNs as equal, which makes the order a
/// total preorder. Sequences, maps and functions have no order.
///
/// ```
/// # use std::cmp::Ordering;
/// # use vouch_core::format::{compare, FloatKind, Value};
/// let nan = Value::float(FloatKind::F64, f64::NAN);
/// let one = Value::float(FloatKind::F64, 1.0);
/// assert_eq!(compare(&one, &nan), Ok(Ordering::Less));
/// assert_eq!(compare(&nan, &nan), Ok(Ordering::Equal));
/// ```
pub fn compare(x: &Value, y: &Value) -> Result<Ordering, UncomparableKind> {
    check_comparable(x)?;
    check_comparable(y)?;
    Ok(compare_unchecked(x, y))
}

/// Reports whether `x` sorts strictly before `y`.
///
/// # Panics
///
/// Panics with [`UncomparableKind`] when either side has no order.
#[must_use]
pub fn is_less(x: &Value, y: &Value) -> bool {
    match compare(x, y) {
        Ok(ordering) => ordering == Ordering::Less,
        Err(err) => panic!("{err}"),
    }
}

/// Sorts map entries by key and collapses keys that compare equal.
///
/// # Panics
///
/// Panics with [`UncomparableKind`] when any key has no order.
pub fn sort_keys(entries: &mut Vec<(Value, Value)>) {
    for (key, _) in entries.iter() {
        if let Err(err) = check_comparable(key) {
            panic!("{err}");
        }
    }
    entries.sort_by(|(a, _), (b, _)| compare_unchecked(a, b));
    // NaN keys compare equal to each other, so all but one of them are dropped.
    entries.dedup_by(|(next, _), (prev, _)| !is_less(prev, next));
}

fn check_comparable(value: &Value) -> Result<(), UncomparableKind> {
    match value {
        Value::Seq { .. } | Value::Map { .. } | Value::Func { .. } => Err(UncomparableKind {
            kind: value.kind().name(),
            type_name: value.type_name().to_string(),
        }),
        Value::Array { items, .. } => items.iter().try_for_each(check_comparable),
        Value::Record { fields, .. } => fields.iter().try_for_each(|(_, v)| check_comparable(v)),
        Value::Dynamic { inner: Some(inner), .. } => check_comparable(inner),
        _ => Ok(()),
    }
}

/// Orders two values already known to be comparable.
fn compare_unchecked(x: &Value, y: &Value) -> Ordering {
    match (x, y) {
        (Value::Invalid, Value::Invalid) => Ordering::Equal,
        (Value::Bool { value: a, .. }, Value::Bool { value: b, .. }) => a.cmp(b),
        (Value::Int { value: a, .. }, Value::Int { value: b, .. }) => a.cmp(b),
        (Value::Uint { value: a, .. }, Value::Uint { value: b, .. }) => a.cmp(b),
        (Value::Float { value: a, .. }, Value::Float { value: b, .. }) => compare_floats(*a, *b),
        (Value::Str { value: a, .. }, Value::Str { value: b, .. }) => a.cmp(b),
        (Value::Array { items: a, .. }, Value::Array { items: b, .. }) => {
            compare_all(a.iter().zip(b)).then(a.len().cmp(&b.len()))
        }
        (Value::Record { fields: a, .. }, Value::Record { fields: b, .. }) => {
            compare_all(a.iter().map(|(_, v)| v).zip(b.iter().map(|(_, v)| v)))
                .then(a.len().cmp(&b.len()))
        }
        (Value::Dynamic { inner: a, .. }, Value::Dynamic { inner: b, .. }) => {
            match (a, b) {
                (None, None) => Ordering::Equal,
                (None, Some(_)) => Ordering::Less,
                (Some(_), None) => Ordering::Greater,
                (Some(a), Some(b)) => a
                    .kind()
                    .cmp(&b.kind())
                    .then_with(|| a.type_name().cmp(b.type_name()))
                    .then(a.is_named().cmp(&b.is_named()))
                    .then_with(|| compare_unchecked(a, b)),
            }
        }
        (Value::Pointer { target: a, .. }, Value::Pointer { target: b, .. }) => {
            let address = |target: &Option<Shared>| target.as_ref().map_or(0, Shared::address);
            address(a).cmp(&address(b))
        }
        _ => x.kind().cmp(&y.kind()),
    }
}

fn compare_all<'a>(pairs: impl Iterator<Item = (&'a Value, &'a Value)>) -> Ordering {
    pairs
        .map(|(a, b)| compare_unchecked(a, b))
        .find(|ordering| *ordering != Ordering::Equal)
        .unwrap_or(Ordering::Equal)
}

fn compare_floats(a: f64, b: f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
    }
}

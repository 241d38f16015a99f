//! Best-effort coercion of default literals.
//!
//! Defaults are developer-written constants, so a malformed literal falls
//! back to the kind's zero value with a warning rather than failing the
//! build.

use std::str::FromStr;

use crate::literal::{parse_bool, parse_duration};
use crate::record::FieldKind;
use crate::value::Value;

/// Coerces `literal` into a default of `kind`.
///
/// Scalars always produce a value. Lists produce `None` for an empty
/// literal; otherwise the literal is split on commas not preceded by a
/// backslash and each element is coerced on its own.
pub(crate) fn coerce_default(kind: FieldKind, literal: &str) -> Option<Value> {
    let value = match kind {
        FieldKind::I32 => Value::I32(number(literal)),
        FieldKind::I64 => Value::I64(number(literal)),
        FieldKind::U32 => Value::U32(number(literal)),
        FieldKind::U64 => Value::U64(number(literal)),
        FieldKind::F32 => Value::F32(number(literal)),
        FieldKind::F64 => Value::F64(number(literal)),
        FieldKind::Bool => Value::Bool(boolean(literal)),
        FieldKind::String => Value::String(literal.to_owned()),
        FieldKind::Duration => Value::Duration(duration(literal)),
        FieldKind::I32List | FieldKind::I64List | FieldKind::StringList if literal.is_empty() => {
            return None;
        }
        FieldKind::I32List => Value::I32List(split_list(literal).iter().map(|e| number(e)).collect()),
        FieldKind::I64List => Value::I64List(split_list(literal).iter().map(|e| number(e)).collect()),
        FieldKind::StringList => Value::StringList(split_list(literal)),
    };
    Some(value)
}

fn number<T: FromStr + Default>(literal: &str) -> T {
    let trimmed = literal.trim();
    if trimmed.is_empty() {
        return T::default();
    }
    trimmed.parse().unwrap_or_else(|_| {
        tracing::warn!(literal, "default literal is not a valid number; using zero");
        T::default()
    })
}

fn boolean(literal: &str) -> bool {
    if literal.is_empty() {
        return false;
    }
    parse_bool(literal).unwrap_or_else(|| {
        tracing::warn!(literal, "default literal is not a valid boolean; using false");
        false
    })
}

fn duration(literal: &str) -> std::time::Duration {
    if literal.is_empty() {
        return std::time::Duration::ZERO;
    }
    parse_duration(literal).unwrap_or_else(|reason| {
        tracing::warn!(literal, %reason, "default literal is not a valid duration; using zero");
        std::time::Duration::ZERO
    })
}

/// Splits a list literal on commas, honouring `\,` as a literal comma.
pub(crate) fn split_list(literal: &str) -> Vec<String> {
    let mut items = Vec::new();
    let mut current = String::new();
    let mut chars = literal.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\\' if chars.peek() == Some(&',') => {
                current.push(',');
                chars.next();
            }
            ',' => items.push(std::mem::take(&mut current)),
            other => current.push(other),
        }
    }
    items.push(current);
    items
}

/// Joins list elements into one literal that [`split_list`] reads back.
pub(crate) fn join_list<T: ToString>(items: &[T]) -> String {
    items
        .iter()
        .map(|item| item.to_string().replace(',', "\\,"))
        .collect::<Vec<_>>()
        .join(",")
}

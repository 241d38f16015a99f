//! Typed flag values.
//!
//! [`Value`] carries coerced defaults on the way out to the parser and
//! extracted values on the way back into a record. [`FlagValues`] holds the
//! extracted values for one record, keyed by field name, until the generated
//! [`crate::FromFlags::assemble`] moves them into a fresh instance.

use std::collections::BTreeMap;
use std::time::Duration;

use crate::error::{CliveError, CliveResult};
use crate::record::FieldKind;

/// A value of one of the supported field kinds.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// `i32`
    I32(i32),
    /// `i64`
    I64(i64),
    /// `u32`
    U32(u32),
    /// `u64`
    U64(u64),
    /// `f32`
    F32(f32),
    /// `f64`
    F64(f64),
    /// `bool`
    Bool(bool),
    /// `String`
    String(String),
    /// `Duration`
    Duration(Duration),
    /// `Vec<i32>`
    I32List(Vec<i32>),
    /// `Vec<i64>`
    I64List(Vec<i64>),
    /// `Vec<String>`
    StringList(Vec<String>),
}

impl Value {
    /// The field kind this value belongs to.
    #[must_use]
    pub const fn kind(&self) -> FieldKind {
        match self {
            Self::I32(_) => FieldKind::I32,
            Self::I64(_) => FieldKind::I64,
            Self::U32(_) => FieldKind::U32,
            Self::U64(_) => FieldKind::U64,
            Self::F32(_) => FieldKind::F32,
            Self::F64(_) => FieldKind::F64,
            Self::Bool(_) => FieldKind::Bool,
            Self::String(_) => FieldKind::String,
            Self::Duration(_) => FieldKind::Duration,
            Self::I32List(_) => FieldKind::I32List,
            Self::I64List(_) => FieldKind::I64List,
            Self::StringList(_) => FieldKind::StringList,
        }
    }

    /// The zero value of `kind`.
    #[must_use]
    pub const fn zero(kind: FieldKind) -> Self {
        match kind {
            FieldKind::I32 => Self::I32(0),
            FieldKind::I64 => Self::I64(0),
            FieldKind::U32 => Self::U32(0),
            FieldKind::U64 => Self::U64(0),
            FieldKind::F32 => Self::F32(0.0),
            FieldKind::F64 => Self::F64(0.0),
            FieldKind::Bool => Self::Bool(false),
            FieldKind::String => Self::String(String::new()),
            FieldKind::Duration => Self::Duration(Duration::ZERO),
            FieldKind::I32List => Self::I32List(Vec::new()),
            FieldKind::I64List => Self::I64List(Vec::new()),
            FieldKind::StringList => Self::StringList(Vec::new()),
        }
    }
}

/// Conversion from an extracted [`Value`] into a concrete field type.
///
/// Implemented for every type in the supported set; generated
/// [`crate::FromFlags`] impls rely on it.
pub trait FromValue: Sized {
    /// Kind this type corresponds to.
    const KIND: FieldKind;

    /// Unwraps `value` when it holds this type.
    fn from_value(value: Value) -> Option<Self>;
}

macro_rules! impl_from_value {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl FromValue for $ty {
                const KIND: FieldKind = FieldKind::$variant;

                fn from_value(value: Value) -> Option<Self> {
                    match value {
                        Value::$variant(inner) => Some(inner),
                        _ => None,
                    }
                }
            }
        )*
    };
}

impl_from_value! {
    i32 => I32,
    i64 => I64,
    u32 => U32,
    u64 => U64,
    f32 => F32,
    f64 => F64,
    bool => Bool,
    String => String,
    Duration => Duration,
    Vec<i32> => I32List,
    Vec<i64> => I64List,
    Vec<String> => StringList,
}

/// Values extracted for one record, keyed by field name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FlagValues {
    values: BTreeMap<&'static str, Value>,
}

impl FlagValues {
    /// An empty set of values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores the value for `field`, replacing any earlier one.
    pub fn insert(&mut self, field: &'static str, value: Value) {
        self.values.insert(field, value);
    }

    /// Borrows the value stored for `field`.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.values.get(field)
    }

    /// Number of stored values.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether no values are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Removes the value for `field` and converts it to `T`.
    ///
    /// # Errors
    ///
    /// Returns [`CliveError::ValueMismatch`] when no value is stored for
    /// `field` or when it is of a different kind than `T`.
    pub fn take<T: FromValue>(&mut self, field: &str) -> CliveResult<T> {
        self.values
            .remove(field)
            .and_then(T::from_value)
            .ok_or_else(|| CliveError::ValueMismatch {
                field: field.to_owned(),
                expected: T::KIND.type_name(),
            })
    }

    /// Fails for a flag field whose type is outside the supported set.
    ///
    /// Generated constructors call this for such fields so that records with
    /// unsupported flag types still compile and fail when used.
    ///
    /// # Errors
    ///
    /// Always returns [`CliveError::UnsupportedType`] wrapped with `field`.
    pub fn unsupported<T>(&self, field: &str, type_name: &str) -> CliveResult<T> {
        Err(CliveError::unsupported_type(type_name).in_field(field))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::{Result, anyhow, ensure};

    #[test]
    fn take_moves_matching_values() -> Result<()> {
        let mut values = FlagValues::new();
        values.insert("flag_port", Value::U32(8080));
        values.insert("flag_tags", Value::StringList(vec!["a".into()]));
        let port: u32 = values.take("flag_port")?;
        let tags: Vec<String> = values.take("flag_tags")?;
        ensure!(port == 8080 && tags == ["a"]);
        ensure!(values.is_empty(), "take should remove entries");
        Ok(())
    }

    #[test]
    fn take_rejects_kind_mismatch() -> Result<()> {
        let mut values = FlagValues::new();
        values.insert("flag_port", Value::I64(1));
        match values.take::<u32>("flag_port") {
            Err(CliveError::ValueMismatch { field, expected }) => {
                ensure!(field == "flag_port" && expected == "u32");
                Ok(())
            }
            other => Err(anyhow!("expected ValueMismatch, got {other:?}")),
        }
    }

    #[test]
    fn take_reports_missing_values() {
        let mut values = FlagValues::new();
        assert!(values.take::<bool>("flag_verbose").is_err());
    }

    #[test]
    fn zero_values_match_their_kind() {
        for kind in FieldKind::ALL {
            assert_eq!(Value::zero(kind).kind(), kind);
        }
    }
}

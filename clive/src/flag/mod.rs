//! Flag synthesis.
//!
//! A [`FlagSpec`] is produced for every eligible record field and rendered
//! into a [`clap::Arg`] when the application is assembled.

mod arg;
mod coerce;

use crate::error::{CliveError, CliveResult};
use crate::meta::Metadata;
use crate::naming::{env_name, flag_name};
use crate::record::{FieldDescriptor, FieldKind, FieldType};
use crate::value::Value;

pub(crate) use coerce::coerce_default;

/// Kind of flag registered with the parser.
///
/// Booleans split in two: [`FlagKind::Bool`] is off unless given, while
/// [`FlagKind::BoolTrue`] is on unless explicitly turned off.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FlagKind {
    /// Signed 32-bit integer.
    Int,
    /// Signed 64-bit integer.
    Int64,
    /// Unsigned 32-bit integer.
    Uint,
    /// Unsigned 64-bit integer.
    Uint64,
    /// 32-bit float.
    Float32,
    /// 64-bit float.
    Float64,
    /// Boolean that defaults to `false`.
    Bool,
    /// Boolean that defaults to `true`.
    BoolTrue,
    /// Free text.
    String,
    /// Duration expression such as `5s`.
    Duration,
    /// Repeatable signed 32-bit integers.
    IntList,
    /// Repeatable signed 64-bit integers.
    Int64List,
    /// Repeatable strings.
    StringList,
}

impl FlagKind {
    /// The field kind whose values this flag produces.
    #[must_use]
    pub const fn field_kind(self) -> FieldKind {
        match self {
            Self::Int => FieldKind::I32,
            Self::Int64 => FieldKind::I64,
            Self::Uint => FieldKind::U32,
            Self::Uint64 => FieldKind::U64,
            Self::Float32 => FieldKind::F32,
            Self::Float64 => FieldKind::F64,
            Self::Bool | Self::BoolTrue => FieldKind::Bool,
            Self::String => FieldKind::String,
            Self::Duration => FieldKind::Duration,
            Self::IntList => FieldKind::I32List,
            Self::Int64List => FieldKind::I64List,
            Self::StringList => FieldKind::StringList,
        }
    }

    fn for_default(kind: FieldKind, default: Option<&Value>) -> Self {
        match kind {
            FieldKind::I32 => Self::Int,
            FieldKind::I64 => Self::Int64,
            FieldKind::U32 => Self::Uint,
            FieldKind::U64 => Self::Uint64,
            FieldKind::F32 => Self::Float32,
            FieldKind::F64 => Self::Float64,
            FieldKind::Bool if default == Some(&Value::Bool(true)) => Self::BoolTrue,
            FieldKind::Bool => Self::Bool,
            FieldKind::String => Self::String,
            FieldKind::Duration => Self::Duration,
            FieldKind::I32List => Self::IntList,
            FieldKind::I64List => Self::Int64List,
            FieldKind::StringList => Self::StringList,
        }
    }
}

/// A synthesized flag definition.
#[derive(Debug, Clone, PartialEq)]
pub struct FlagSpec {
    /// Record field the flag was synthesized from.
    pub field: &'static str,
    /// Long flag name, without leading dashes.
    pub name: String,
    /// Environment variable the flag reads when not given on the command line.
    pub env: String,
    /// Flag kind.
    pub kind: FlagKind,
    /// Coerced default. `None` for lists without a default literal, so that
    /// "unset" stays distinct from "set to an empty list".
    pub default: Option<Value>,
    /// Whether the flag is left out of help output.
    pub hidden: bool,
    /// Help text.
    pub usage: String,
}

impl FlagSpec {
    /// Synthesizes the flag for `field` from its parsed annotation.
    ///
    /// The default literal is coerced best-effort: a malformed literal yields
    /// the kind's zero value instead of an error.
    ///
    /// # Errors
    ///
    /// Returns [`CliveError::UnsupportedType`] when the field's type is
    /// outside the supported set. A command marker is not a flag type either.
    /// Returns [`CliveError::EmptyFlagName`] when the derived name is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use clive::{FieldDescriptor, FieldKind, FlagKind, FlagSpec, Metadata, Value};
    /// let field = FieldDescriptor::new("flag_retries", FieldKind::U32.into(), "");
    /// let meta = Metadata::parse("usage:retry budget,default:3")?;
    /// let flag = FlagSpec::synthesize(&field, &meta)?;
    /// assert_eq!(flag.name, "retries");
    /// assert_eq!(flag.env, "RETRIES");
    /// assert_eq!(flag.kind, FlagKind::Uint);
    /// assert_eq!(flag.default, Some(Value::U32(3)));
    /// # Ok::<(), clive::CliveError>(())
    /// ```
    pub fn synthesize(field: &FieldDescriptor, meta: &Metadata) -> CliveResult<Self> {
        let kind = field_kind(field)?;
        let name = flag_name(field.name, meta.name_override());
        if name.is_empty() {
            return Err(CliveError::EmptyFlagName {
                origin: meta.name_override().unwrap_or(field.name).to_owned(),
            });
        }
        let env = env_name(&name);
        let default = coerce_default(kind, meta.default_literal());
        let flag = Self {
            field: field.name,
            kind: FlagKind::for_default(kind, default.as_ref()),
            name,
            env,
            default,
            hidden: meta.hidden,
            usage: meta.usage.clone(),
        };
        tracing::trace!(field = field.name, flag = %flag.name, kind = ?flag.kind, "synthesized flag");
        Ok(flag)
    }

    /// Replaces the environment binding with `prefix` followed by the
    /// derived name.
    #[must_use]
    pub fn with_env_prefix(mut self, prefix: &str) -> Self {
        if !prefix.is_empty() {
            self.env = format!("{prefix}{}", self.env);
        }
        self
    }

    /// Whether the flag reads as `true` when it is absent.
    #[must_use]
    pub fn is_inverted(&self) -> bool {
        self.kind == FlagKind::BoolTrue
    }
}

/// Resolves the supported kind of `field`.
pub(crate) fn field_kind(field: &FieldDescriptor) -> CliveResult<FieldKind> {
    match field.ty {
        FieldType::Flag(kind) => Ok(kind),
        FieldType::Other(type_name) => Err(CliveError::unsupported_type(type_name)),
        FieldType::Command => Err(CliveError::unsupported_type("CommandMarker")),
    }
}

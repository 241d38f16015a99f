//! Static descriptions of annotated records.
//!
//! `#[derive(Record)]` emits a `'static` table of [`FieldDescriptor`]s for
//! each struct. Synthesis and extraction walk that table instead of
//! inspecting values at runtime.

use clap::ArgMatches;

use crate::error::CliveResult;
use crate::marker::CommandMarker;
use crate::value::FlagValues;

/// The closed set of field types that can become flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    /// `i32`
    I32,
    /// `i64`
    I64,
    /// `u32`
    U32,
    /// `u64`
    U64,
    /// `f32`
    F32,
    /// `f64`
    F64,
    /// `bool`
    Bool,
    /// `String`
    String,
    /// `std::time::Duration`
    Duration,
    /// `Vec<i32>`
    I32List,
    /// `Vec<i64>`
    I64List,
    /// `Vec<String>`
    StringList,
}

impl FieldKind {
    /// Every supported kind, in declaration order.
    pub const ALL: [Self; 12] = [
        Self::I32,
        Self::I64,
        Self::U32,
        Self::U64,
        Self::F32,
        Self::F64,
        Self::Bool,
        Self::String,
        Self::Duration,
        Self::I32List,
        Self::I64List,
        Self::StringList,
    ];

    /// Rust spelling of the field type this kind stands for.
    #[must_use]
    pub const fn type_name(self) -> &'static str {
        match self {
            Self::I32 => "i32",
            Self::I64 => "i64",
            Self::U32 => "u32",
            Self::U64 => "u64",
            Self::F32 => "f32",
            Self::F64 => "f64",
            Self::Bool => "bool",
            Self::String => "String",
            Self::Duration => "Duration",
            Self::I32List => "Vec<i32>",
            Self::I64List => "Vec<i64>",
            Self::StringList => "Vec<String>",
        }
    }
}

/// Declared type of a record field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    /// The [`CommandMarker`] field that identifies a command record.
    Command,
    /// A type from the supported set.
    Flag(FieldKind),
    /// Any other type, carrying its declared spelling for diagnostics.
    Other(&'static str),
}

impl From<FieldKind> for FieldType {
    fn from(kind: FieldKind) -> Self {
        Self::Flag(kind)
    }
}

/// One field of a record: its name, declared type and raw annotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDescriptor {
    /// Field identifier as declared.
    pub name: &'static str,
    /// Declared type.
    pub ty: FieldType,
    /// Raw annotation string; empty when the field has none.
    pub tag: &'static str,
}

impl FieldDescriptor {
    /// Describes a field.
    #[must_use]
    pub const fn new(name: &'static str, ty: FieldType, tag: &'static str) -> Self {
        Self { name, ty, tag }
    }
}

/// A struct that describes one command.
///
/// Usually derived. The trait is object safe so that records of different
/// types can be handed to [`crate::AppBuilder`] together.
pub trait Record {
    /// Declared name of the record type. An empty name marks an anonymous
    /// shape, which cannot name a command.
    fn type_name(&self) -> &'static str;

    /// Fields in declaration order.
    fn fields(&self) -> &'static [FieldDescriptor];

    /// The command marker, when the first field is one.
    fn marker(&self) -> Option<&CommandMarker>;
}

/// Records that can be rebuilt from values read out of a parse context.
pub trait FromFlags: Record + Sized {
    /// Builds a fresh instance. Flag fields take their value from `values`;
    /// every other field takes its [`Default`].
    ///
    /// # Errors
    ///
    /// Returns an error when a value is missing or of the wrong kind.
    fn assemble(values: FlagValues) -> CliveResult<Self>;

    /// Reads a fresh instance out of `matches`, using `self` only as a type
    /// template. See [`crate::extract`].
    ///
    /// # Errors
    ///
    /// Propagates any error from [`crate::extract`].
    fn from_matches(&self, matches: &ArgMatches) -> CliveResult<Self> {
        crate::extract(Some(self), matches)
    }
}

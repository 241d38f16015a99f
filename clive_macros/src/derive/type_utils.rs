//! Type classification helpers.
//!
//! These utilities perform shallow inspection of `syn::Type` values and map
//! them onto the runtime's closed set of field kinds. Matching looks only at
//! the final path segment, so `std::time::Duration` and `Duration` are the
//! same kind and type aliases are not seen through.

use quote::ToTokens;
use syn::{GenericArgument, PathArguments, PathSegment, Type};

/// How the runtime sees a field's declared type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TypeClass {
    /// The command marker.
    Command,
    /// A supported kind, named by its `FieldKind` variant.
    Kind(&'static str),
    /// Anything else.
    Other,
}

/// Returns the last path segment if `ty` is a plain path type.
fn last_segment(ty: &Type) -> Option<&PathSegment> {
    let Type::Path(p) = ty else {
        return None;
    };
    if p.qself.is_some() {
        return None;
    }
    p.path.segments.last()
}

/// Extract the only type argument from a `PathArguments` container.
fn single_type_argument(args: &PathArguments) -> Option<&Type> {
    let PathArguments::AngleBracketed(angle_args) = args else {
        return None;
    };
    let mut iter = angle_args.args.iter();
    let (Some(GenericArgument::Type(inner)), None) = (iter.next(), iter.next()) else {
        return None;
    };
    Some(inner)
}

/// Classifies a scalar (non-generic) type by its final segment.
fn scalar_kind(ty: &Type) -> Option<&'static str> {
    let seg = last_segment(ty)?;
    if !seg.arguments.is_none() {
        return None;
    }
    let kind = match seg.ident.to_string().as_str() {
        "i32" => "I32",
        "i64" => "I64",
        "u32" => "U32",
        "u64" => "U64",
        "f32" => "F32",
        "f64" => "F64",
        "bool" => "Bool",
        "String" => "String",
        "Duration" => "Duration",
        _ => return None,
    };
    Some(kind)
}

/// Classifies `ty` against the supported field kinds.
pub(crate) fn classify(ty: &Type) -> TypeClass {
    let Some(seg) = last_segment(ty) else {
        return TypeClass::Other;
    };
    if seg.ident == "CommandMarker" && seg.arguments.is_none() {
        return TypeClass::Command;
    }
    if seg.ident == "Vec" {
        let list = single_type_argument(&seg.arguments)
            .and_then(scalar_kind)
            .and_then(|inner| match inner {
                "I32" => Some("I32List"),
                "I64" => Some("I64List"),
                "String" => Some("StringList"),
                _ => None,
            });
        return list.map_or(TypeClass::Other, TypeClass::Kind);
    }
    scalar_kind(ty).map_or(TypeClass::Other, TypeClass::Kind)
}

/// Renders `ty` the way it would be written in source, for diagnostics.
pub(crate) fn type_text(ty: &Type) -> String {
    ty.to_token_stream()
        .to_string()
        .replace(" :: ", "::")
        .replace(":: ", "::")
        .replace(" <", "<")
        .replace("< ", "<")
        .replace(" >", ">")
        .replace(" ,", ",")
        .replace("& ", "&")
}

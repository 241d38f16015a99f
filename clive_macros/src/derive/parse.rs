//! Input parsing for the `Record` derive macro.
//!
//! Gathers the struct identifier, its named fields and the raw annotation of
//! each field in one pass so expansion can fail fast with spanned errors.

use syn::{Attribute, Data, DeriveInput, Expr, ExprLit, Fields, Lit, LitStr, Meta};

/// A named field with its raw annotation.
pub(crate) struct ParsedField {
    pub ident: syn::Ident,
    pub ty: syn::Type,
    pub tag: String,
}

/// Everything the generator needs from the derive input.
pub(crate) struct ParsedInput {
    pub ident: syn::Ident,
    pub generics: syn::Generics,
    pub fields: Vec<ParsedField>,
    /// Overrides the `::clive` path used in generated code.
    pub crate_path: Option<syn::Path>,
}

/// Parses the derive input.
///
/// Rejects enums, unions, and structs without named fields.
pub(crate) fn parse_input(input: &DeriveInput) -> syn::Result<ParsedInput> {
    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(named) => named.named.iter().collect::<Vec<_>>(),
            _ => {
                return Err(syn::Error::new_spanned(
                    data.struct_token,
                    "Record requires named fields",
                ));
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                &input.ident,
                "Record can only be derived for structs",
            ));
        }
    };

    let mut parsed = Vec::with_capacity(fields.len());
    for field in fields {
        let Some(ident) = field.ident.clone() else {
            return Err(syn::Error::new_spanned(field, "Record requires named fields"));
        };
        parsed.push(ParsedField {
            ident,
            ty: field.ty.clone(),
            tag: parse_tag(&field.attrs)?.unwrap_or_default(),
        });
    }

    Ok(ParsedInput {
        ident: input.ident.clone(),
        generics: input.generics.clone(),
        fields: parsed,
        crate_path: parse_crate_path(&input.attrs)?,
    })
}

/// Reads the annotation from `#[cli("...")]` or `#[cli = "..."]`.
fn parse_tag(attrs: &[Attribute]) -> syn::Result<Option<String>> {
    let mut tag: Option<String> = None;
    for attr in attrs.iter().filter(|a| a.path().is_ident("cli")) {
        if tag.is_some() {
            return Err(syn::Error::new_spanned(attr, "duplicate `cli` attribute"));
        }
        let lit = match &attr.meta {
            Meta::List(_) => attr.parse_args::<LitStr>()?,
            Meta::NameValue(nv) => match &nv.value {
                Expr::Lit(ExprLit {
                    lit: Lit::Str(s), ..
                }) => s.clone(),
                other => {
                    return Err(syn::Error::new_spanned(
                        other,
                        "`cli` annotation must be a string literal",
                    ));
                }
            },
            Meta::Path(_) => {
                return Err(syn::Error::new_spanned(
                    attr,
                    "expected `#[cli(\"key:value,...\")]`",
                ));
            }
        };
        tag = Some(lit.value());
    }
    Ok(tag)
}

/// Reads `#[clive(crate = "...")]`.
fn parse_crate_path(attrs: &[Attribute]) -> syn::Result<Option<syn::Path>> {
    let mut out = None;
    for attr in attrs.iter().filter(|a| a.path().is_ident("clive")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("crate") {
                let s: LitStr = meta.value()?.parse()?;
                let path: syn::Path =
                    syn::parse_str(&s.value()).map_err(|e| syn::Error::new(s.span(), e))?;
                out = Some(path);
                Ok(())
            } else {
                Err(meta.error("unknown `clive` attribute; expected `crate`"))
            }
        })?;
    }
    Ok(out)
}

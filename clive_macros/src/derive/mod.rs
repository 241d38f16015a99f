//! Expansion of `#[derive(Record)]`.

mod crate_path;
mod generate;
mod parse;
mod type_utils;

use proc_macro2::TokenStream;
use syn::DeriveInput;

pub(crate) use generate::plan_fields;
pub(crate) use parse::parse_input;
pub(crate) use type_utils::{TypeClass, classify, type_text};

/// Field-name prefix marking flag fields. Must match
/// `clive::naming::FLAG_PREFIX`.
pub(crate) const FLAG_PREFIX: &str = "flag_";

/// Expands the derive for `input`.
pub(crate) fn expand(input: &DeriveInput) -> syn::Result<TokenStream> {
    let parsed = parse_input(input)?;
    let krate = crate_path::resolve(parsed.crate_path.as_ref());
    let plans = plan_fields(&parsed.fields);
    Ok(generate::emit(&parsed, &plans, &krate))
}

//! Procedural macros for `clive`.
//!
//! `#[derive(Record)]` registers a struct's fields with the runtime: it emits
//! a static table naming each field, its declared type and its `#[cli("...")]`
//! annotation, plus the constructor that rebuilds the struct from values read
//! after parsing. Annotations are kept as raw strings and parsed at runtime.

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

mod derive;

/// Derive macro for `clive::Record` and `clive::FromFlags`.
///
/// Field attribute: `#[cli("key:value,...")]` (or `#[cli = "..."]`).
/// Struct attribute: `#[clive(crate = "path")]` when `clive` is renamed.
#[proc_macro_derive(Record, attributes(cli, clive))]
pub fn derive_record(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    derive::expand(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

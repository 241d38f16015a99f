//! Crate path resolution for renamed dependencies.
//!
//! Generated code names `clive` types through `::clive` unless the struct
//! carries `#[clive(crate = "...")]`.

use proc_macro2::TokenStream;
use quote::quote;

/// Resolve the crate path from the parsed struct attribute.
pub(crate) fn resolve(crate_path: Option<&syn::Path>) -> TokenStream {
    crate_path.map_or_else(|| quote! { ::clive }, |path| quote! { #path })
}

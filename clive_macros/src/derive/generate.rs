//! Code generation for `#[derive(Record)]`.

use proc_macro2::TokenStream;
use quote::{format_ident, quote};

use super::parse::{ParsedField, ParsedInput};
use super::{FLAG_PREFIX, TypeClass, classify, type_text};

/// What the generated code does with one field.
pub(crate) struct FieldPlan<'a> {
    pub field: &'a ParsedField,
    pub class: TypeClass,
    pub is_flag: bool,
}

/// Classifies every field of the input.
pub(crate) fn plan_fields(fields: &[ParsedField]) -> Vec<FieldPlan<'_>> {
    fields
        .iter()
        .map(|field| FieldPlan {
            field,
            class: classify(&field.ty),
            is_flag: field.ident.to_string().starts_with(FLAG_PREFIX),
        })
        .collect()
}

/// Tokens for the `FieldType` of a planned field.
fn field_type_tokens(plan: &FieldPlan<'_>, krate: &TokenStream) -> TokenStream {
    match plan.class {
        TypeClass::Command => quote! { #krate::FieldType::Command },
        TypeClass::Kind(kind) => {
            let variant = format_ident!("{}", kind);
            quote! { #krate::FieldType::Flag(#krate::FieldKind::#variant) }
        }
        TypeClass::Other => {
            let text = type_text(&plan.field.ty);
            quote! { #krate::FieldType::Other(#text) }
        }
    }
}

/// Tokens initialising one field inside `assemble`.
fn assemble_field(plan: &FieldPlan<'_>) -> TokenStream {
    let ident = &plan.field.ident;
    let name = ident.to_string();
    if !plan.is_flag {
        return quote! { #ident: ::core::default::Default::default() };
    }
    match plan.class {
        TypeClass::Kind(_) => quote! { #ident: values.take(#name)? },
        TypeClass::Command | TypeClass::Other => {
            let text = type_text(&plan.field.ty);
            quote! { #ident: values.unsupported(#name, #text)? }
        }
    }
}

/// Emits the `Record` and `FromFlags` implementations.
pub(crate) fn emit(
    input: &ParsedInput,
    plans: &[FieldPlan<'_>],
    krate: &TokenStream,
) -> TokenStream {
    let ident = &input.ident;
    let type_name = ident.to_string();
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let descriptors = plans.iter().map(|plan| {
        let name = plan.field.ident.to_string();
        let tag = &plan.field.tag;
        let ty = field_type_tokens(plan, krate);
        quote! { #krate::FieldDescriptor::new(#name, #ty, #tag) }
    });

    let marker = match plans.first() {
        Some(first) if first.class == TypeClass::Command => {
            let field = &first.field.ident;
            quote! { ::core::option::Option::Some(&self.#field) }
        }
        _ => quote! { ::core::option::Option::None },
    };

    let inits = plans.iter().map(assemble_field);
    let takes = plans
        .iter()
        .any(|plan| plan.is_flag && matches!(plan.class, TypeClass::Kind(_)));
    let values = if takes {
        quote! { mut values }
    } else if plans.iter().any(|plan| plan.is_flag) {
        quote! { values }
    } else {
        quote! { _values }
    };

    quote! {
        impl #impl_generics #krate::Record for #ident #ty_generics #where_clause {
            fn type_name(&self) -> &'static str {
                #type_name
            }

            fn fields(&self) -> &'static [#krate::FieldDescriptor] {
                const FIELDS: &[#krate::FieldDescriptor] = &[#(#descriptors),*];
                FIELDS
            }

            fn marker(&self) -> ::core::option::Option<&#krate::CommandMarker> {
                #marker
            }
        }

        impl #impl_generics #krate::FromFlags for #ident #ty_generics #where_clause {
            fn assemble(#values: #krate::FlagValues) -> #krate::CliveResult<Self> {
                ::core::result::Result::Ok(Self {
                    #(#inits),*
                })
            }
        }
    }
}

use std::collections::HashSet;

use proc_macro::TokenStream;
use quote::quote;
use syn::{Data, DeriveInput, Fields, LitStr, Variant, parse_macro_input};

/// Derives the `SenderKind` trait for enums.
///
/// Each unit variant becomes one capability tag. Its name, used when access
/// rules are displayed, defaults to the lowercased variant name and can be
/// overridden with `#[sender_kind(name = "...")]`.
///
/// # Example
///
/// ```ignore
/// use nut_dispatch::SenderKind;
///
/// #[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, SenderKind)]
/// pub enum Kind {
///     Console,
///     #[sender_kind(name = "command-block")]
///     CommandBlock,
/// }
/// ```
///
/// This generates:
///
/// ```ignore
/// impl SenderKind for Kind {
///     fn name(&self) -> &'static str {
///         match self {
///             Self::Console => "console",
///             Self::CommandBlock => "command-block",
///         }
///     }
/// }
/// ```
///
/// # Requirements
///
/// - The type must be an enum with at least one variant
/// - All variants must be unit variants (no fields)
/// - Names must be unique
#[proc_macro_derive(SenderKind, attributes(sender_kind))]
pub fn derive_sender_kind(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    expand(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

fn expand(input: &DeriveInput) -> syn::Result<proc_macro2::TokenStream> {
    let Data::Enum(data) = &input.data else {
        return Err(syn::Error::new_spanned(
            input,
            "SenderKind can only be derived for enums",
        ));
    };

    if data.variants.is_empty() {
        return Err(syn::Error::new_spanned(
            input,
            "SenderKind needs at least one variant",
        ));
    }

    let mut seen = HashSet::new();
    let mut arms = Vec::with_capacity(data.variants.len());
    for variant in &data.variants {
        if !matches!(variant.fields, Fields::Unit) {
            return Err(syn::Error::new_spanned(
                variant,
                "SenderKind variants cannot have fields",
            ));
        }

        let kind = kind_name(variant)?;
        if !seen.insert(kind.clone()) {
            return Err(syn::Error::new_spanned(
                variant,
                format!("duplicate sender kind name '{kind}'"),
            ));
        }

        let ident = &variant.ident;
        arms.push(quote! { Self::#ident => #kind });
    }

    let ty = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    Ok(quote! {
        impl #impl_generics ::nut_dispatch::access::SenderKind for #ty #ty_generics #where_clause {
            fn name(&self) -> &'static str {
                match self {
                    #(#arms,)*
                }
            }
        }
    })
}

/// `#[sender_kind(name = "...")]` or the lowercased variant name.
fn kind_name(variant: &Variant) -> syn::Result<String> {
    let mut kind = variant.ident.to_string().to_lowercase();

    for attr in &variant.attrs {
        if !attr.path().is_ident("sender_kind") {
            continue;
        }
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("name") {
                let value: LitStr = meta.value()?.parse()?;
                kind = value.value();
                Ok(())
            } else {
                Err(meta.error("expected `name = \"...\"`"))
            }
        })?;
    }

    if kind.is_empty() {
        return Err(syn::Error::new_spanned(variant, "sender kind name is empty"));
    }
    Ok(kind)
}

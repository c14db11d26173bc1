//! Paths of items referenced by generated code.
//!
//! Keeping them in one place limits the changes needed when the layout of
//! `mapx_reflect` moves.

use proc_macro2::TokenStream;
use quote::quote;

// -----------------------------------------------------------------------------
// Crate Path

/// Get the correct access path to the `mapx_reflect` crate.
///
/// 1. For crates that depend on `mapx_reflect`, `::mapx_reflect` is returned.
/// 2. For crates that depend on `mapx`, `::mapx::reflect` is returned.
/// 3. For other situations, `::mapx_reflect` is returned, but this may be incorrect.
///
/// Reading the manifest is relatively expensive, so the path is obtained once
/// per macro invocation and passed around.
pub(crate) fn mapx_reflect() -> syn::Path {
    mapx_macro_utils::Manifest::shared(|manifest| manifest.get_crate_path("mapx_reflect"))
}

// -----------------------------------------------------------------------------
// Items

#[inline(always)]
pub(crate) fn macro_exports_(krate: &syn::Path) -> TokenStream {
    quote!(#krate::__macro_exports)
}

#[inline(always)]
pub(crate) fn reflect_(krate: &syn::Path) -> TokenStream {
    quote!(#krate::Reflect)
}

#[inline(always)]
pub(crate) fn concat_(krate: &syn::Path) -> TokenStream {
    quote!(#krate::impls::concat)
}

#[inline(always)]
pub(crate) fn type_path_(krate: &syn::Path) -> TokenStream {
    quote!(#krate::info::TypePath)
}

#[inline(always)]
pub(crate) fn typed_(krate: &syn::Path) -> TokenStream {
    quote!(#krate::info::Typed)
}

#[inline(always)]
pub(crate) fn info_(krate: &syn::Path) -> TokenStream {
    quote!(#krate::info)
}

#[inline(always)]
pub(crate) fn ops_(krate: &syn::Path) -> TokenStream {
    quote!(#krate::ops)
}

#[inline(always)]
pub(crate) fn registry_(krate: &syn::Path) -> TokenStream {
    quote!(#krate::registry)
}

#[inline(always)]
pub(crate) fn impls_(krate: &syn::Path) -> TokenStream {
    quote!(#krate::impls)
}

// -----------------------------------------------------------------------------
// Prelude

/// Fully qualified `Option`, `Result`, `Clone` and friends, so that
/// generated code is immune to shadowing at the call site.
pub(crate) mod fp {
    use proc_macro2::TokenStream;
    use quote::{ToTokens, quote};

    macro_rules! define_fp {
        ($($name:ident => $(::$seg:ident)+;)*) => {$(
            pub(crate) struct $name;

            impl ToTokens for $name {
                #[inline]
                fn to_tokens(&self, tokens: &mut TokenStream) {
                    tokens.extend(quote!($(::$seg)+));
                }
            }
        )*};
    }

    define_fp! {
        OptionFP => ::core::option::Option;
        ResultFP => ::core::result::Result;
        CloneFP => ::core::clone::Clone;
        PartialEqFP => ::core::cmp::PartialEq;
        DebugFP => ::core::fmt::Debug;
        FmtResultFP => ::core::fmt::Result;
        FormatterFP => ::core::fmt::Formatter;
        SendFP => ::core::marker::Send;
        SyncFP => ::core::marker::Sync;
    }
}

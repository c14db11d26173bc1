use proc_macro2::TokenStream;
use quote::quote;

use crate::derive_data::{GenericBounds, ReflectMeta};

/// Generate implementation code for `Typed`
///
/// `type_info_tokens` is an expression of type `TypeInfo`, evaluated once
/// per concrete type.
pub(crate) fn impl_trait_typed(meta: &ReflectMeta, type_info_tokens: TokenStream) -> TokenStream {
    if !meta.attrs().impl_typed() {
        return crate::utils::empty();
    }

    let krate = meta.krate();
    let typed_ = crate::path::typed_(krate);
    let info_ = crate::path::info_(krate);
    let impls_ = crate::path::impls_(krate);

    let inner_cell_tokens = if meta.is_generic() {
        quote! {
            static CELL: #impls_::GenericTypeInfoCell = #impls_::GenericTypeInfoCell::new();
            CELL.get_or_insert::<Self>(|| {
                #type_info_tokens
            })
        }
    } else {
        quote! {
            static CELL: #impls_::NonGenericTypeInfoCell = #impls_::NonGenericTypeInfoCell::new();
            CELL.get_or_init(|| {
                #type_info_tokens
            })
        }
    };

    let ident = meta.ident();
    let (impl_generics, ty_generics, where_clause) = meta.split_generics(GenericBounds::Reflect);

    quote! {
        impl #impl_generics #typed_ for #ident #ty_generics #where_clause {
            fn type_info() -> &'static #info_::TypeInfo {
                #inner_cell_tokens
            }
        }
    }
}

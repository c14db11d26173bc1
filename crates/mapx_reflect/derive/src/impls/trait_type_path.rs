use proc_macro2::TokenStream;
use quote::quote;

use crate::derive_data::{GenericBounds, ReflectMeta};

fn static_path_cell(krate: &syn::Path, generator: TokenStream) -> TokenStream {
    let impls_ = crate::path::impls_(krate);

    quote! {
        static CELL: #impls_::GenericTypePathCell = #impls_::GenericTypePathCell::new();
        CELL.get_or_insert::<Self>(|| {
            #generator
        })
    }
}

/// Generate implementation codes for `TypePath`
pub(crate) fn impl_trait_type_path(meta: &ReflectMeta) -> TokenStream {
    let krate = meta.krate();
    let type_path_ = crate::path::type_path_(krate);
    let ident = meta.ident();

    let (type_path, type_name, inline_flag) = if meta.is_generic() {
        (
            static_path_cell(krate, meta.type_path().into_owned(krate)),
            static_path_cell(krate, meta.type_name().into_owned(krate)),
            crate::utils::empty(),
        )
    } else {
        (
            meta.type_path().into_borrowed(),
            meta.type_name().into_borrowed(),
            quote! { #[inline] },
        )
    };

    let (impl_generics, ty_generics, where_clause) = meta.split_generics(GenericBounds::TypePath);

    quote! {
        impl #impl_generics #type_path_ for #ident #ty_generics #where_clause {
            #inline_flag
            fn type_path() -> &'static str {
                #type_path
            }

            #inline_flag
            fn type_name() -> &'static str {
                #type_name
            }
        }
    }
}

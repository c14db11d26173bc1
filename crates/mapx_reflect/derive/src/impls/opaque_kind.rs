use proc_macro2::TokenStream;
use quote::quote;

use super::{impl_trait_reflect, impl_trait_typed, impl_trait_type_path};

use crate::derive_data::ReflectMeta;

/// Implement full reflect for opaque type.
///
/// Unit structs and `#[reflect(opaque)]` types land here.
pub(crate) fn impl_opaque(meta: &ReflectMeta) -> TokenStream {
    let info_ = crate::path::info_(meta.krate());

    let type_path_trait_tokens = impl_trait_type_path(meta);

    let builders = meta.info_builders();
    let typed_trait_tokens = impl_trait_typed(
        meta,
        quote! {
            #info_::TypeInfo::Opaque(
                #info_::OpaqueInfo::new::<Self>()
                    #builders
            )
        },
    );

    let reflect_trait_tokens = impl_trait_reflect(meta, quote!(Opaque));

    quote! {
        #type_path_trait_tokens

        #typed_trait_tokens

        #reflect_trait_tokens
    }
}

use proc_macro2::TokenStream;
use quote::{ToTokens, quote};

use super::{impl_trait_reflect, impl_trait_typed, impl_trait_type_path};

use crate::derive_data::{GenericBounds, ReflectStruct};
use crate::path::fp::OptionFP;

/// Implement full reflect for tuple struct type.
pub(crate) fn impl_tuple_struct(info: &ReflectStruct) -> TokenStream {
    let meta = info.meta();
    let krate = meta.krate();
    let info_ = crate::path::info_(krate);

    // trait: TypePath
    let type_path_trait_tokens = impl_trait_type_path(meta);

    // trait: Typed
    let fields = info.unnamed_field_infos();
    let builders = meta.info_builders();
    let typed_trait_tokens = impl_trait_typed(
        meta,
        quote! {
            #info_::TypeInfo::TupleStruct(
                #info_::TupleStructInfo::new::<Self>(&[ #(#fields),* ])
                    #builders
            )
        },
    );

    // trait: TupleStruct
    let tuple_struct_trait_tokens = impl_trait_tuple_struct(info);

    // trait: Reflect
    let reflect_trait_tokens = impl_trait_reflect(meta, quote!(TupleStruct));

    quote! {
        #type_path_trait_tokens

        #typed_trait_tokens

        #tuple_struct_trait_tokens

        #reflect_trait_tokens
    }
}

/// Generate `TupleStruct` trait implementation tokens.
fn impl_trait_tuple_struct(info: &ReflectStruct) -> TokenStream {
    let meta = info.meta();
    let krate = meta.krate();
    let reflect_ = crate::path::reflect_(krate);
    let ops_ = crate::path::ops_(krate);

    let members = info.members();
    let field_count = info.fields().len();
    let option_ = OptionFP.to_token_stream();
    let indices_ref = 0..field_count;
    let indices_mut = 0..field_count;
    let members_ref = members.iter();
    let members_mut = members.iter();

    let ident = meta.ident();
    let (impl_generics, ty_generics, where_clause) = meta.split_generics(GenericBounds::Reflect);

    quote! {
        impl #impl_generics #ops_::TupleStruct for #ident #ty_generics #where_clause {
            fn field_at(&self, index: usize) -> #option_<&dyn #reflect_> {
                match index {
                    #(#indices_ref => #option_::Some(&self.#members_ref),)*
                    _ => #option_::None,
                }
            }

            fn field_at_mut(&mut self, index: usize) -> #option_<&mut dyn #reflect_> {
                match index {
                    #(#indices_mut => #option_::Some(&mut self.#members_mut),)*
                    _ => #option_::None,
                }
            }

            #[inline]
            fn field_len(&self) -> usize {
                #field_count
            }
        }
    }
}

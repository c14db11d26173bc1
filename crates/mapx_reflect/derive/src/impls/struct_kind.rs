use proc_macro2::TokenStream;
use quote::{ToTokens, quote};

use super::{impl_trait_reflect, impl_trait_typed, impl_trait_type_path};

use crate::derive_data::{GenericBounds, ReflectStruct};
use crate::path::fp::OptionFP;

/// Implement full reflect for struct type.
pub(crate) fn impl_struct(info: &ReflectStruct) -> TokenStream {
    let meta = info.meta();
    let krate = meta.krate();
    let info_ = crate::path::info_(krate);

    // trait: TypePath
    let type_path_trait_tokens = impl_trait_type_path(meta);

    // trait: Typed
    let fields = info.named_field_infos();
    let builders = meta.info_builders();
    let typed_trait_tokens = impl_trait_typed(
        meta,
        quote! {
            #info_::TypeInfo::Struct(
                #info_::StructInfo::new::<Self>(&[ #(#fields),* ])
                    #builders
            )
        },
    );

    // trait: Struct
    let struct_trait_tokens = impl_trait_struct(info);

    // trait: Reflect
    let reflect_trait_tokens = impl_trait_reflect(meta, quote!(Struct));

    quote! {
        #type_path_trait_tokens

        #typed_trait_tokens

        #struct_trait_tokens

        #reflect_trait_tokens
    }
}

/// Generate `Struct` trait implementation tokens.
fn impl_trait_struct(info: &ReflectStruct) -> TokenStream {
    let meta = info.meta();
    let krate = meta.krate();
    let reflect_ = crate::path::reflect_(krate);
    let ops_ = crate::path::ops_(krate);

    let field_names = info.field_names();
    let members = info.members();
    let indices = 0..info.fields().len();
    let field_count = info.fields().len();
    let option_ = OptionFP.to_token_stream();

    let ident = meta.ident();
    let (impl_generics, ty_generics, where_clause) = meta.split_generics(GenericBounds::Reflect);

    let names_ref = field_names.iter();
    let names_mut = field_names.iter();
    let names_at = field_names.iter();
    let members_ref = members.iter();
    let members_mut = members.iter();
    let members_at_ref = members.iter();
    let members_at_mut = members.iter();
    let indices_ref = indices.clone();
    let indices_mut = indices.clone();
    let indices_name = indices;

    quote! {
        impl #impl_generics #ops_::Struct for #ident #ty_generics #where_clause {
            fn field(&self, name: &str) -> #option_<&dyn #reflect_> {
                match name {
                    #(#names_ref => #option_::Some(&self.#members_ref),)*
                    _ => #option_::None,
                }
            }

            fn field_mut(&mut self, name: &str) -> #option_<&mut dyn #reflect_> {
                match name {
                    #(#names_mut => #option_::Some(&mut self.#members_mut),)*
                    _ => #option_::None,
                }
            }

            fn field_at(&self, index: usize) -> #option_<&dyn #reflect_> {
                match index {
                    #(#indices_ref => #option_::Some(&self.#members_at_ref),)*
                    _ => #option_::None,
                }
            }

            fn field_at_mut(&mut self, index: usize) -> #option_<&mut dyn #reflect_> {
                match index {
                    #(#indices_mut => #option_::Some(&mut self.#members_at_mut),)*
                    _ => #option_::None,
                }
            }

            fn name_at(&self, index: usize) -> #option_<&str> {
                match index {
                    #(#indices_name => #option_::Some(#names_at),)*
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

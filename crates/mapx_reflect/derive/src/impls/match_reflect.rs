use proc_macro::TokenStream;
use quote::quote;
use syn::{Data, DeriveInput, Fields};

use crate::derive_data::{ReflectMeta, ReflectStruct, TypeAttributes};

/// Provided for `#[derive(Reflect)]`.
pub(crate) fn match_reflect_impls(ast: DeriveInput) -> TokenStream {
    match try_reflect_impls(&ast) {
        Ok(reflect_impls) => TokenStream::from(quote! {
            const _: () = {
                #reflect_impls
            };
        }),
        Err(err) => err.into_compile_error().into(),
    }
}

fn try_reflect_impls(ast: &DeriveInput) -> syn::Result<proc_macro2::TokenStream> {
    let attrs = TypeAttributes::parse_attrs(&ast.attrs)?;
    let opaque = attrs.opaque.is_some();
    let meta = ReflectMeta::new(&ast.ident, &ast.generics, attrs)?;

    let fields = match &ast.data {
        Data::Struct(data) => &data.fields,
        Data::Enum(data) => {
            return Err(syn::Error::new(
                data.enum_token.span,
                "`Reflect` cannot be derived for enums",
            ));
        }
        Data::Union(data) => {
            return Err(syn::Error::new(
                data.union_token.span,
                "`Reflect` cannot be derived for unions",
            ));
        }
    };

    if opaque {
        return Ok(super::impl_opaque(&meta));
    }

    Ok(match fields {
        Fields::Named(_) => super::impl_struct(&ReflectStruct::new(meta, fields)?),
        Fields::Unnamed(_) => super::impl_tuple_struct(&ReflectStruct::new(meta, fields)?),
        Fields::Unit => super::impl_opaque(&meta),
    })
}

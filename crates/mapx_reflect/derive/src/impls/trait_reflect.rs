use proc_macro2::TokenStream;
use quote::quote;

use crate::derive_data::{GenericBounds, ReflectMeta};
use crate::path::fp::{
    CloneFP, DebugFP, FmtResultFP, FormatterFP, OptionFP, PartialEqFP, ResultFP,
};

/// Generate implementation code for `Reflect` trait.
///
/// `reflect_kind_token` names the variant shared by `ReflectKind`,
/// `ReflectRef` and `ReflectMut`.
pub(crate) fn impl_trait_reflect(meta: &ReflectMeta, reflect_kind_token: TokenStream) -> TokenStream {
    let krate = meta.krate();

    let reflect_ = crate::path::reflect_(krate);
    let exports_ = crate::path::macro_exports_(krate);
    let info_ = crate::path::info_(krate);
    let ops_ = crate::path::ops_(krate);

    let reflect_partial_eq_tokens = if meta.attrs().partial_eq.is_some() {
        quote! {
            fn reflect_partial_eq(&self, other: &dyn #reflect_) -> #OptionFP<bool> {
                match <dyn #reflect_>::downcast_ref::<Self>(other) {
                    #OptionFP::Some(other) => #OptionFP::Some(#PartialEqFP::eq(self, other)),
                    #OptionFP::None => #OptionFP::Some(false),
                }
            }
        }
    } else {
        crate::utils::empty()
    };

    let reflect_debug_tokens = if meta.attrs().debug.is_some() {
        quote! {
            #[inline]
            fn reflect_debug(&self, f: &mut #FormatterFP<'_>) -> #FmtResultFP {
                #DebugFP::fmt(self, f)
            }
        }
    } else {
        crate::utils::empty()
    };

    let ident = meta.ident();
    let (impl_generics, ty_generics, where_clause) = meta.split_generics(GenericBounds::Reflect);

    quote! {
        impl #impl_generics #reflect_ for #ident #ty_generics #where_clause {
            fn set(
                &mut self,
                value: #exports_::Box<dyn #reflect_>,
            ) -> #ResultFP<(), #exports_::Box<dyn #reflect_>> {
                *self = <dyn #reflect_>::take::<Self>(value)?;
                #ResultFP::Ok(())
            }

            #[inline]
            fn reflect_kind(&self) -> #info_::ReflectKind {
                #info_::ReflectKind::#reflect_kind_token
            }

            #[inline]
            fn reflect_ref(&self) -> #ops_::ReflectRef<'_> {
                #ops_::ReflectRef::#reflect_kind_token(self)
            }

            #[inline]
            fn reflect_mut(&mut self) -> #ops_::ReflectMut<'_> {
                #ops_::ReflectMut::#reflect_kind_token(self)
            }

            #[inline]
            fn reflect_clone(&self) -> #exports_::Box<dyn #reflect_> {
                #exports_::Box::new(#CloneFP::clone(self))
            }

            #reflect_partial_eq_tokens

            #reflect_debug_tokens
        }
    }
}

use proc_macro::TokenStream;
use quote::{format_ident, quote};
use syn::{ItemTrait, TraitItem, parse_macro_input};

use crate::path::fp::{DebugFP, FmtResultFP, FormatterFP, OptionFP, SendFP, SyncFP};

/// Generate `Reflect{Trait}` for a trait, see [`reflect_trait`](crate::reflect_trait).
pub(crate) fn impl_reflect_trait(input: TokenStream) -> TokenStream {
    let item_trait = parse_macro_input!(input as ItemTrait);

    if !item_trait.generics.params.is_empty() {
        return syn::Error::new_spanned(
            &item_trait.generics,
            "`reflect_trait` does not support generic traits",
        )
        .into_compile_error()
        .into();
    }

    let krate = crate::path::mapx_reflect();
    let reflect_ = crate::path::reflect_(&krate);
    let typed_ = crate::path::typed_(&krate);
    let registry_ = crate::path::registry_(&krate);

    let vis = &item_trait.vis;
    let trait_ident = &item_trait.ident;
    let struct_ident = format_ident!("Reflect{}", trait_ident);
    let struct_name = struct_ident.to_string();

    let methods = item_trait
        .items
        .iter()
        .filter(|item| matches!(item, TraitItem::Fn(_)))
        .count();

    let struct_doc = format!(
        " A capability that casts reflected values to `dyn {trait_ident}`.\n\n Generated by `reflect_trait`."
    );

    let object = quote!(dyn #trait_ident + #SendFP + #SyncFP + 'static);

    TokenStream::from(quote! {
        #item_trait

        #[doc = #struct_doc]
        #[derive(Clone, Copy)]
        #vis struct #struct_ident {
            get: fn(&dyn #reflect_) -> #OptionFP<&(#object)>,
            get_mut: fn(&mut dyn #reflect_) -> #OptionFP<&mut (#object)>,
        }

        impl #struct_ident {
            /// Casts `value` to the trait object.
            #[inline]
            #[allow(dead_code, reason = "generated")]
            #vis fn get<'a>(&self, value: &'a dyn #reflect_) -> #OptionFP<&'a (#object)> {
                (self.get)(value)
            }

            /// Casts `value` to the mutable trait object.
            #[inline]
            #[allow(dead_code, reason = "generated")]
            #vis fn get_mut<'a>(&self, value: &'a mut dyn #reflect_) -> #OptionFP<&'a mut (#object)> {
                (self.get_mut)(value)
            }
        }

        impl #registry_::TypeTrait for #struct_ident {}

        impl<T: #trait_ident + #reflect_ + #typed_> #registry_::FromType<T> for #struct_ident {
            fn from_type() -> Self {
                fn get<T: #trait_ident + #reflect_>(value: &dyn #reflect_) -> #OptionFP<&(#object)> {
                    <dyn #reflect_>::downcast_ref::<T>(value).map(|v| v as &(#object))
                }
                fn get_mut<T: #trait_ident + #reflect_>(
                    value: &mut dyn #reflect_,
                ) -> #OptionFP<&mut (#object)> {
                    <dyn #reflect_>::downcast_mut::<T>(value).map(|v| v as &mut (#object))
                }

                Self {
                    get: get::<T>,
                    get_mut: get_mut::<T>,
                }
            }
        }

        impl #registry_::Capability for #struct_ident {
            type Object = #object;

            const METHODS: usize = #methods;

            #[inline]
            fn get<'a>(&self, value: &'a dyn #reflect_) -> #OptionFP<&'a (#object)> {
                (self.get)(value)
            }

            #[inline]
            fn get_mut<'a>(&self, value: &'a mut dyn #reflect_) -> #OptionFP<&'a mut (#object)> {
                (self.get_mut)(value)
            }
        }

        impl #DebugFP for #struct_ident {
            fn fmt(&self, f: &mut #FormatterFP<'_>) -> #FmtResultFP {
                f.pad(#struct_name)
            }
        }
    })
}

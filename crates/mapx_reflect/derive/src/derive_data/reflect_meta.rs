use proc_macro2::TokenStream;
use quote::quote;
use syn::{GenericParam, Generics, Ident, LitStr, Path, WherePredicate, parse_quote};

use super::TypeAttributes;
use crate::utils::StringExpr;

/// Bounds added to the type parameters of generated impls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum GenericBounds {
    /// `T: TypePath`
    TypePath,
    /// `T: Reflect + Typed + Clone`
    Reflect,
}

/// Information shared by every kind of type: its name, generics, attributes
/// and the path to `mapx_reflect`.
pub(crate) struct ReflectMeta<'a> {
    krate: Path,
    ident: &'a Ident,
    generics: &'a Generics,
    attrs: TypeAttributes,
}

impl<'a> ReflectMeta<'a> {
    /// Lifetime and const parameters are rejected: reflected types are
    /// `'static`, and type paths only spell out type parameters.
    pub fn new(ident: &'a Ident, generics: &'a Generics, attrs: TypeAttributes) -> syn::Result<Self> {
        for param in &generics.params {
            match param {
                GenericParam::Type(_) => {}
                GenericParam::Lifetime(lt) => {
                    return Err(syn::Error::new_spanned(
                        lt,
                        "reflected types cannot have lifetime parameters",
                    ));
                }
                GenericParam::Const(c) => {
                    return Err(syn::Error::new_spanned(
                        c,
                        "reflected types cannot have const parameters",
                    ));
                }
            }
        }

        Ok(Self {
            krate: crate::path::mapx_reflect(),
            ident,
            generics,
            attrs,
        })
    }

    #[inline]
    pub fn krate(&self) -> &Path {
        &self.krate
    }

    #[inline]
    pub fn ident(&self) -> &Ident {
        self.ident
    }

    #[inline]
    pub fn attrs(&self) -> &TypeAttributes {
        &self.attrs
    }

    #[inline]
    pub fn is_generic(&self) -> bool {
        !self.generics.params.is_empty()
    }

    fn type_params(&self) -> impl Iterator<Item = &Ident> {
        self.generics.params.iter().filter_map(|param| match param {
            GenericParam::Type(ty) => Some(&ty.ident),
            _ => None,
        })
    }

    fn module_path(&self) -> StringExpr {
        match &self.attrs.type_path {
            Some(path) => {
                let module = path
                    .segments
                    .iter()
                    .take(path.segments.len() - 1)
                    .map(|segment| segment.ident.to_string())
                    .collect::<Vec<_>>()
                    .join("::");
                StringExpr::from_lit(&LitStr::new(&module, self.ident.span()))
            }
            None => StringExpr::Const(quote!(::core::module_path!())),
        }
    }

    fn short_ident(&self) -> StringExpr {
        match self.attrs.type_path.as_ref().and_then(|path| path.segments.last()) {
            Some(segment) => StringExpr::from(&segment.ident),
            None => StringExpr::from(self.ident),
        }
    }

    /// `<A, B>` of a generic type, with each parameter rendered by `f`.
    fn generic_suffix(&self, f: impl Fn(&Ident) -> StringExpr) -> Vec<StringExpr> {
        let mut out = vec![StringExpr::from_str("<")];
        for (i, ident) in self.type_params().enumerate() {
            if i > 0 {
                out.push(StringExpr::from_str(", "));
            }
            out.push(f(ident));
        }
        out.push(StringExpr::from_str(">"));
        out
    }

    /// `module::Ident<A, B>`
    pub fn type_path(&self) -> StringExpr {
        let mut parts = vec![self.module_path(), StringExpr::from_str("::"), self.short_ident()];
        if self.is_generic() {
            let type_path_ = crate::path::type_path_(&self.krate);
            parts.extend(self.generic_suffix(|ident| {
                StringExpr::Borrowed(quote!(<#ident as #type_path_>::type_path()))
            }));
        }
        StringExpr::from_iter(parts, &self.krate)
    }

    /// `Ident<A, B>`
    pub fn type_name(&self) -> StringExpr {
        let mut parts = vec![self.short_ident()];
        if self.is_generic() {
            let type_path_ = crate::path::type_path_(&self.krate);
            parts.extend(self.generic_suffix(|ident| {
                StringExpr::Borrowed(quote!(<#ident as #type_path_>::type_name()))
            }));
        }
        StringExpr::from_iter(parts, &self.krate)
    }

    /// Return `impl_generics`, `ty_generics` and `where_clause` tokens, with
    /// `bounds` added to every type parameter.
    ///
    /// ```ignore
    /// let (impl_generics, ty_generics, where_clause) = meta.split_generics(GenericBounds::Reflect);
    ///
    /// quote! {
    ///     impl #impl_generics TraitName for #ident #ty_generics #where_clause { /* ... */ }
    /// }
    /// ```
    pub fn split_generics(&self, bounds: GenericBounds) -> (TokenStream, TokenStream, TokenStream) {
        let krate = &self.krate;
        let mut generics = self.generics.clone();

        let extra: Vec<WherePredicate> = self
            .type_params()
            .map(|ident| match bounds {
                GenericBounds::TypePath => {
                    let type_path_ = crate::path::type_path_(krate);
                    parse_quote!(#ident: #type_path_)
                }
                GenericBounds::Reflect => {
                    let reflect_ = crate::path::reflect_(krate);
                    let typed_ = crate::path::typed_(krate);
                    parse_quote!(#ident: #reflect_ + #typed_ + ::core::clone::Clone)
                }
            })
            .collect();

        if !extra.is_empty() {
            generics.make_where_clause().predicates.extend(extra);
        }

        let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();
        (
            quote!(#impl_generics),
            quote!(#ty_generics),
            quote!(#where_clause),
        )
    }

    /// Builder calls appended to a `StructInfo`, `TupleStructInfo` or
    /// `OpaqueInfo` constructor: the zero value and the capabilities.
    pub fn info_builders(&self) -> TokenStream {
        let krate = &self.krate;

        let with_zero = if self.attrs.default.is_some() {
            let exports_ = crate::path::macro_exports_(krate);
            quote!(.with_zero(#exports_::zero_of::<Self>))
        } else {
            crate::utils::empty()
        };

        let with_type_traits = if self.attrs.type_traits.is_empty() {
            crate::utils::empty()
        } else {
            let registry_ = crate::path::registry_(krate);
            let traits = self.attrs.type_traits.iter();
            quote! {
                .with_type_traits(
                    #registry_::TypeTraits::new()
                        #( .with(<#traits as #registry_::FromType<Self>>::from_type()) )*
                )
            }
        };

        quote!(#with_zero #with_type_traits)
    }
}

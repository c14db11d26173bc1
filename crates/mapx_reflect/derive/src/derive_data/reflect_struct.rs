use proc_macro2::TokenStream;
use quote::{ToTokens, quote};
use syn::{Field, Fields, Index, LitStr, Member, Type, Visibility};

use super::{FieldAttributes, ReflectMeta};

/// A field of a struct or tuple struct.
pub(crate) struct StructField<'a> {
    pub data: &'a Field,
    pub attrs: FieldAttributes,
    /// Declaration index.
    pub index: usize,
}

impl StructField<'_> {
    /// `self.name` or `self.0`.
    pub fn member(&self) -> Member {
        match &self.data.ident {
            Some(ident) => Member::Named(ident.clone()),
            None => Member::Unnamed(Index::from(self.index)),
        }
    }

    #[inline]
    pub fn ty(&self) -> &Type {
        &self.data.ty
    }

    #[inline]
    pub fn is_exported(&self) -> bool {
        matches!(self.data.vis, Visibility::Public(_))
    }
}

/// A struct or tuple struct ready for code generation.
pub(crate) struct ReflectStruct<'a> {
    meta: ReflectMeta<'a>,
    fields: Vec<StructField<'a>>,
}

impl<'a> ReflectStruct<'a> {
    pub fn new(meta: ReflectMeta<'a>, fields: &'a Fields) -> syn::Result<Self> {
        let fields = fields
            .iter()
            .enumerate()
            .map(|(index, data)| {
                let attrs = FieldAttributes::parse_attrs(&data.attrs)?;
                if data.ident.is_none() && (!attrs.tags.is_empty() || attrs.embed.is_some()) {
                    return Err(syn::Error::new_spanned(
                        data,
                        "`tag` and `embed` are only supported on named fields",
                    ));
                }
                Ok(StructField { data, attrs, index })
            })
            .collect::<syn::Result<Vec<_>>>()?;

        Ok(Self { meta, fields })
    }

    #[inline]
    pub fn meta(&self) -> &ReflectMeta<'a> {
        &self.meta
    }

    #[inline]
    pub fn fields(&self) -> &[StructField<'a>] {
        &self.fields
    }

    /// Field names as string literals, in declaration order.
    pub fn field_names(&self) -> Vec<LitStr> {
        self.fields
            .iter()
            .filter_map(|field| field.data.ident.as_ref())
            .map(|ident| LitStr::new(&ident.to_string(), ident.span()))
            .collect()
    }

    /// `NamedField` constructors, in declaration order.
    pub fn named_field_infos(&self) -> Vec<TokenStream> {
        let info_ = crate::path::info_(self.meta.krate());

        self.fields
            .iter()
            .filter_map(|field| {
                let ident = field.data.ident.as_ref()?;
                let name = LitStr::new(&ident.to_string(), ident.span());
                let ty = field.ty();
                let exported = field.is_exported();
                let embedded = field.attrs.embed.is_some();

                let with_tags = if field.attrs.tags.is_empty() {
                    crate::utils::empty()
                } else {
                    let tags = field.attrs.tags.iter().map(|(ns, value)| {
                        let ns = LitStr::new(ns, value.span());
                        quote!((#ns, #value))
                    });
                    quote!(.with_tags(&[ #(#tags),* ]))
                };

                Some(quote! {
                    #info_::NamedField::new::<#ty>(#name)
                        .with_exported(#exported)
                        .with_embedded(#embedded)
                        #with_tags
                })
            })
            .collect()
    }

    /// `UnnamedField` constructors, in declaration order.
    pub fn unnamed_field_infos(&self) -> Vec<TokenStream> {
        let info_ = crate::path::info_(self.meta.krate());

        self.fields
            .iter()
            .map(|field| {
                let ty = field.ty();
                let index = field.index;
                quote!(#info_::UnnamedField::new::<#ty>(#index))
            })
            .collect()
    }

    /// `&self.x` style accessors for each field.
    pub fn members(&self) -> Vec<TokenStream> {
        self.fields
            .iter()
            .map(|field| field.member().into_token_stream())
            .collect()
    }
}

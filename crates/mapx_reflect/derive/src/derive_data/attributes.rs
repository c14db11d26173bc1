//! Parsing of `#[reflect(...)]` attributes.

use proc_macro2::Span;
use syn::meta::ParseNestedMeta;
use syn::punctuated::Punctuated;
use syn::{Attribute, LitBool, LitStr, Path, Token, parenthesized};

use crate::REFLECT_ATTRIBUTE_NAME;

// -----------------------------------------------------------------------------
// TypeAttributes

/// Type level attributes.
#[derive(Default)]
pub(crate) struct TypeAttributes {
    /// `type_path = "..."`, without generics.
    pub type_path: Option<Path>,
    /// `typed = false` disables the `Typed` implementation.
    pub impl_typed: Option<bool>,
    /// `opaque` hides the fields.
    pub opaque: Option<Span>,
    /// `default`, the type implements `Default`.
    pub default: Option<Span>,
    /// `partial_eq`, the type implements `PartialEq`.
    pub partial_eq: Option<Span>,
    /// `debug`, the type implements `Debug`.
    pub debug: Option<Span>,
    /// `type_trait = (...)`.
    pub type_traits: Vec<Path>,
}

impl TypeAttributes {
    pub fn parse_attrs(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut this = Self::default();

        for attr in attrs {
            if !attr.path().is_ident(REFLECT_ATTRIBUTE_NAME) {
                continue;
            }
            attr.parse_nested_meta(|meta| this.parse_meta(meta))?;
        }

        Ok(this)
    }

    fn parse_meta(&mut self, meta: ParseNestedMeta) -> syn::Result<()> {
        let span = meta.path.require_ident()?.span();

        if meta.path.is_ident("type_path") {
            let lit: LitStr = meta.value()?.parse()?;
            let path: Path = lit.parse()?;
            if path.leading_colon.is_some() {
                return Err(syn::Error::new(lit.span(), "type path must not start with `::`"));
            }
            if path.segments.len() < 2 {
                return Err(syn::Error::new(lit.span(), "type path must contain a module"));
            }
            Self::set_once(&mut self.type_path, path, span)
        } else if meta.path.is_ident("typed") {
            let lit: LitBool = meta.value()?.parse()?;
            Self::set_once(&mut self.impl_typed, lit.value, span)
        } else if meta.path.is_ident("opaque") {
            Self::set_once(&mut self.opaque, span, span)
        } else if meta.path.is_ident("default") {
            Self::set_once(&mut self.default, span, span)
        } else if meta.path.is_ident("partial_eq") {
            Self::set_once(&mut self.partial_eq, span, span)
        } else if meta.path.is_ident("debug") {
            Self::set_once(&mut self.debug, span, span)
        } else if meta.path.is_ident("type_trait") {
            let input = meta.value()?;
            if input.peek(syn::token::Paren) {
                let content;
                parenthesized!(content in input);
                let list = Punctuated::<Path, Token![,]>::parse_terminated(&content)?;
                self.type_traits.extend(list);
            } else {
                self.type_traits.push(input.parse()?);
            }
            Ok(())
        } else {
            Err(meta.error("unsupported reflect attribute"))
        }
    }

    fn set_once<T>(slot: &mut Option<T>, value: T, span: Span) -> syn::Result<()> {
        if slot.is_some() {
            return Err(syn::Error::new(span, "duplicate reflect attribute"));
        }
        *slot = Some(value);
        Ok(())
    }

    #[inline]
    pub fn impl_typed(&self) -> bool {
        self.impl_typed.unwrap_or(true)
    }
}

// -----------------------------------------------------------------------------
// FieldAttributes

/// Field level attributes.
#[derive(Default)]
pub(crate) struct FieldAttributes {
    /// `tag(ns = "...", ...)`, in declaration order.
    pub tags: Vec<(String, LitStr)>,
    /// `embed`
    pub embed: Option<Span>,
}

impl FieldAttributes {
    pub fn parse_attrs(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut this = Self::default();

        for attr in attrs {
            if !attr.path().is_ident(REFLECT_ATTRIBUTE_NAME) {
                continue;
            }
            attr.parse_nested_meta(|meta| this.parse_meta(meta))?;
        }

        Ok(this)
    }

    fn parse_meta(&mut self, meta: ParseNestedMeta) -> syn::Result<()> {
        if meta.path.is_ident("tag") {
            meta.parse_nested_meta(|inner| {
                let namespace = inner.path.require_ident()?.to_string();
                let value: LitStr = inner.value()?.parse()?;
                if self.tags.iter().any(|(ns, _)| *ns == namespace) {
                    return Err(inner.error("duplicate tag namespace"));
                }
                self.tags.push((namespace, value));
                Ok(())
            })
        } else if meta.path.is_ident("embed") {
            if self.embed.is_some() {
                return Err(meta.error("duplicate reflect attribute"));
            }
            self.embed = Some(meta.path.require_ident()?.span());
            Ok(())
        } else {
            Err(meta.error("unsupported reflect attribute"))
        }
    }
}

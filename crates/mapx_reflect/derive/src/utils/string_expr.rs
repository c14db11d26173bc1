use proc_macro2::TokenStream;
use quote::{ToTokens, quote};
use syn::{LitStr, spanned::Spanned};

/// A string in generated code, as a literal or as an expression.
#[derive(Clone)]
pub(crate) enum StringExpr {
    /// A string known at compile time: a literal, or a macro such as
    /// `module_path!()`.
    Const(TokenStream),
    /// A `&'static str` expression.
    Borrowed(TokenStream),
    /// A `String` expression.
    Owned(TokenStream),
}

impl Default for StringExpr {
    fn default() -> Self {
        Self::Const("".to_token_stream())
    }
}

impl<T: ToString + Spanned> From<T> for StringExpr {
    fn from(value: T) -> Self {
        Self::Const(LitStr::new(&value.to_string(), value.span()).to_token_stream())
    }
}

impl StringExpr {
    /// Creates a constant expression from a literal.
    pub fn from_lit(lit: &LitStr) -> Self {
        Self::Const(lit.to_token_stream())
    }

    /// Creates a constant expression from a string slice.
    pub fn from_str(string: &str) -> Self {
        Self::Const(string.to_token_stream())
    }

    /// Returns tokens of a `&'static str`, or of a `&str` borrowed from an
    /// owned string.
    pub fn into_borrowed(self) -> TokenStream {
        match self {
            Self::Const(tokens) | Self::Borrowed(tokens) => tokens,
            Self::Owned(owned) => quote! {
                &#owned as &str
            },
        }
    }

    /// Returns tokens of a `String`.
    pub fn into_owned(self, krate: &syn::Path) -> TokenStream {
        match self {
            Self::Const(tokens) | Self::Borrowed(tokens) => {
                let exports_ = crate::path::macro_exports_(krate);
                quote! {
                    #exports_::String::from(#tokens)
                }
            }
            Self::Owned(owned) => owned,
        }
    }

    fn is_const(&self) -> bool {
        matches!(self, StringExpr::Const(_))
    }

    /// Concatenates the expressions.
    ///
    /// If all of them are constant, this uses [`concat!`] and stays constant.
    pub fn from_iter<T: IntoIterator<Item = StringExpr>>(iter: T, krate: &syn::Path) -> Self {
        let exprs: Vec<StringExpr> = iter.into_iter().collect();

        if exprs.is_empty() {
            return Self::default();
        }

        if exprs.iter().all(StringExpr::is_const) {
            let inner = exprs.into_iter().map(StringExpr::into_borrowed);

            Self::Const(quote! {
                ::core::concat!( #(#inner),* )
            })
        } else {
            let concat_ = crate::path::concat_(krate);
            let inner = exprs.into_iter().map(StringExpr::into_borrowed);

            Self::Owned(quote! {
                #concat_(&[ #(#inner),* ])
            })
        }
    }
}

mod string_expr;

pub(crate) use string_expr::StringExpr;

use proc_macro2::TokenStream;

#[inline(always)]
pub(crate) fn empty() -> TokenStream {
    TokenStream::new()
}

use proc_macro2::{Literal, TokenStream};
use quote::ToTokens;

/// An unsuffixed integer literal, usable as a pattern for any integer type.
pub(super) fn int(v: usize) -> TokenStream {
    Literal::usize_unsuffixed(v).into_token_stream()
}

mod enumeration;
mod model;
mod object;
mod util;
mod view;

pub(crate) use enumeration::enumeration;
pub(crate) use model::model;
pub(crate) use object::object;
pub(crate) use view::view;

use proc_macro2::TokenStream;
use quote::quote;

/// Path prefix for the items generated code refers to.
fn morph() -> TokenStream {
    quote!(_morph::codegen_support)
}

fn wrap_in_const(code: TokenStream) -> TokenStream {
    quote! {
        const _: () = {
            use morph as _morph;
            #code
        };
    }
}

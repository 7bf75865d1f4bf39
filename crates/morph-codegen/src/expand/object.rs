use super::{morph, wrap_in_const};
use crate::schema::Object;

use proc_macro2::TokenStream;
use quote::quote;

pub(crate) fn object(object: &Object) -> TokenStream {
    let morph = morph();
    let ident = &object.ident;
    let name = &object.name;

    wrap_in_const(quote! {
        impl #morph::Object for #ident {
            fn descriptor() -> &'static #morph::ObjectDescriptor {
                static DESCRIPTOR: #morph::OnceLock<#morph::ObjectDescriptor> = #morph::OnceLock::new();
                DESCRIPTOR.get_or_init(|| #morph::ObjectDescriptor::opaque::<#ident>(#name))
            }
        }
    })
}

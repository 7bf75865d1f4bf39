use super::{morph, util, wrap_in_const};
use crate::schema::{ReturnTy, View};

use proc_macro2::TokenStream;
use quote::quote;

pub(crate) fn view(item: &syn::ItemTrait, view: &View) -> TokenStream {
    let morph = morph();
    let ident = &view.ident;
    let name = &view.name;
    let own = util::int(view.methods.len());

    let extends = view.extends.iter().map(|path| {
        quote!(<dyn #path as #morph::View>::schema())
    });

    let members = view.methods.iter().map(|method| {
        let name = &method.name;
        let ty = match &method.ret {
            ReturnTy::Plain(ty) | ReturnTy::Result(ty) => ty,
        };

        quote! {
            #morph::MemberDescriptor::new(#name, <#ty as #morph::Member>::ty()).getter_only()
        }
    });

    let methods = view.methods.iter().enumerate().map(|(index, method)| {
        let method_ident = &method.ident;
        let index = util::int(index);

        // Inherited members come first in the flattened schema
        let read = |read: TokenStream, ty: &syn::Type| {
            quote! {
                let schema = <dyn #ident as #morph::View>::schema();
                self.#read::<#ty>(schema, schema.members.len() - #own + #index)
            }
        };

        match &method.ret {
            ReturnTy::Plain(ty) => {
                let body = read(quote!(read_or_panic), ty);
                quote! {
                    #[track_caller]
                    fn #method_ident(&self) -> #ty {
                        #body
                    }
                }
            }
            ReturnTy::Result(ty) => {
                let body = read(quote!(try_read), ty);
                quote! {
                    fn #method_ident(&self) -> #morph::Result<#ty> {
                        #body
                    }
                }
            }
        }
    });

    let impls = wrap_in_const(quote! {
        impl #morph::View for dyn #ident {
            fn schema() -> &'static #morph::Schema {
                static SCHEMA: #morph::OnceLock<#morph::Schema> = #morph::OnceLock::new();
                SCHEMA.get_or_init(|| {
                    #morph::Schema::view(
                        #name,
                        &[#( #extends ),*],
                        #morph::Vec::from([#( #members ),*]),
                    )
                })
            }

            fn wrap<S: ?Sized + #morph::Model>(adapted: #morph::Adapted<S>) -> #morph::Arc<Self> {
                #morph::Arc::new(adapted)
            }
        }

        impl #morph::Object for dyn #ident {
            fn descriptor() -> &'static #morph::ObjectDescriptor {
                static DESCRIPTOR: #morph::OnceLock<#morph::ObjectDescriptor> = #morph::OnceLock::new();
                DESCRIPTOR.get_or_init(#morph::ObjectDescriptor::view::<dyn #ident>)
            }
        }

        impl<S: ?Sized + #morph::Model> #ident for #morph::Adapted<S> {
            #( #methods )*
        }
    });

    quote! {
        #item
        #impls
    }
}

use super::{morph, util, wrap_in_const};
use crate::schema::Model;

use proc_macro2::TokenStream;
use quote::quote;

pub(crate) fn model(model: &Model) -> TokenStream {
    let morph = morph();
    let ident = &model.ident;
    let name = &model.name;

    let members = model.fields.iter().map(|field| {
        let name = &field.name;
        let ty = &field.ty;
        let readonly = field.readonly.then(|| quote!(.getter_only()));

        quote! {
            #morph::MemberDescriptor::new(#name, <#ty as #morph::Member>::ty())#readonly
        }
    });

    let get_arms = model.fields.iter().enumerate().map(|(index, field)| {
        let index = util::int(index);
        let field_ident = &field.ident;

        quote! {
            #index => ::core::result::Result::Ok(#morph::Member::into_value(
                #morph::Clone::clone(&self.#field_ident),
            )),
        }
    });

    let set_arms = model.fields.iter().enumerate().map(|(index, field)| {
        let index = util::int(index);
        let field_ident = &field.ident;
        let field_name = &field.name;

        if field.readonly {
            quote! {
                #index => ::core::result::Result::Err(#morph::Error::read_only_member(#name, #field_name)),
            }
        } else {
            quote! {
                #index => {
                    self.#field_ident = #morph::Member::from_value(value)?;
                    ::core::result::Result::Ok(())
                }
            }
        }
    });

    wrap_in_const(quote! {
        impl #morph::Model for #ident {
            fn schema() -> &'static #morph::Schema {
                static SCHEMA: #morph::OnceLock<#morph::Schema> = #morph::OnceLock::new();
                SCHEMA.get_or_init(|| #morph::Schema::model(#name, #morph::Vec::from([#( #members ),*])))
            }

            fn model_schema(&self) -> &'static #morph::Schema {
                <Self as #morph::Model>::schema()
            }

            fn get(&self, member: usize) -> #morph::Result<#morph::Value> {
                match member {
                    #( #get_arms )*
                    _ => ::core::result::Result::Err(#morph::Error::unknown_member(#name, member)),
                }
            }

            #[allow(unused_variables)]
            fn set(&mut self, member: usize, value: #morph::Value) -> #morph::Result<()> {
                match member {
                    #( #set_arms )*
                    _ => ::core::result::Result::Err(#morph::Error::unknown_member(#name, member)),
                }
            }
        }

        impl #morph::Object for #ident {
            fn descriptor() -> &'static #morph::ObjectDescriptor {
                static DESCRIPTOR: #morph::OnceLock<#morph::ObjectDescriptor> = #morph::OnceLock::new();
                DESCRIPTOR.get_or_init(#morph::ObjectDescriptor::model::<#ident>)
            }
        }
    })
}

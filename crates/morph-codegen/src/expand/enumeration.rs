use super::{morph, util, wrap_in_const};
use crate::schema::Enum;

use proc_macro2::TokenStream;
use quote::quote;

pub(crate) fn enumeration(enumeration: &Enum) -> TokenStream {
    let morph = morph();
    let ident = &enumeration.ident;
    let name = &enumeration.name;
    let names = enumeration.variants.iter().map(|variant| &variant.name);

    let variant_arms = enumeration.variants.iter().enumerate().map(|(index, variant)| {
        let index = util::int(index);
        let variant = &variant.ident;
        quote!(#ident::#variant => #index,)
    });

    let from_variant_arms = enumeration.variants.iter().enumerate().map(|(index, variant)| {
        let index = util::int(index);
        let variant = &variant.ident;
        quote!(#index => #morph::Option::Some(#ident::#variant),)
    });

    wrap_in_const(quote! {
        static SCHEMA: #morph::EnumSchema = #morph::EnumSchema::new(#name, &[#( #names ),*]);

        impl #morph::Enumeration for #ident {
            fn schema() -> &'static #morph::EnumSchema {
                &SCHEMA
            }

            fn variant(&self) -> usize {
                match self {
                    #( #variant_arms )*
                }
            }

            fn from_variant(variant: usize) -> #morph::Option<Self> {
                match variant {
                    #( #from_variant_arms )*
                    _ => #morph::Option::None,
                }
            }
        }

        impl #morph::Member for #ident {
            fn ty() -> #morph::Type {
                #morph::Type::Enum(&SCHEMA)
            }

            fn into_value(self) -> #morph::Value {
                #morph::Value::Enum(#morph::ValueEnum::new(
                    &SCHEMA,
                    #morph::Enumeration::variant(&self),
                ))
            }

            fn from_value(value: #morph::Value) -> #morph::Result<Self> {
                let variant = match &value {
                    #morph::Value::Enum(variant) if variant.schema() == &SCHEMA => {
                        <Self as #morph::Enumeration>::from_variant(variant.variant())
                    }
                    _ => #morph::Option::None,
                };

                match variant {
                    #morph::Option::Some(variant) => ::core::result::Result::Ok(variant),
                    #morph::Option::None => ::core::result::Result::Err(
                        #morph::Error::type_conversion(value, #name),
                    ),
                }
            }
        }
    })
}

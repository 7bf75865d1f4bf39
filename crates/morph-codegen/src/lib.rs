mod expand;
mod schema;

use proc_macro2::TokenStream;

pub fn generate_model(input: TokenStream) -> syn::Result<TokenStream> {
    let item: syn::ItemStruct = syn::parse2(input)?;
    let model = schema::Model::from_ast(&item)?;

    Ok(expand::model(&model))
}

pub fn generate_enum(input: TokenStream) -> syn::Result<TokenStream> {
    let item: syn::ItemEnum = syn::parse2(input)?;
    let enumeration = schema::Enum::from_ast(&item)?;

    Ok(expand::enumeration(&enumeration))
}

pub fn generate_object(input: TokenStream) -> syn::Result<TokenStream> {
    let item: syn::DeriveInput = syn::parse2(input)?;
    let object = schema::Object::from_ast(&item)?;

    Ok(expand::object(&object))
}

pub fn generate_view(attr: TokenStream, input: TokenStream) -> syn::Result<TokenStream> {
    if !attr.is_empty() {
        return Err(syn::Error::new_spanned(
            attr,
            "#[view] does not take arguments; use #[morph(..)] on the trait",
        ));
    }

    let mut item: syn::ItemTrait = syn::parse2(input)?;
    let view = schema::View::from_ast(&mut item)?;

    Ok(expand::view(&item, &view))
}

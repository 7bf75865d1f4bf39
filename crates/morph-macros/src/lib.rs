extern crate proc_macro;

use proc_macro::TokenStream;

/// Reflects a struct with named fields as a mapping model.
///
/// Field attributes: `#[morph(readonly)]`, `#[morph(skip)]`,
/// `#[morph(rename = "Name")]`. On the struct: `#[morph(rename = "..")]`
/// and `#[morph(rename_all = "..")]`.
#[proc_macro_derive(Model, attributes(morph))]
pub fn derive_model(input: TokenStream) -> TokenStream {
    match morph_codegen::generate_model(input.into()) {
        Ok(output) => output.into(),
        Err(e) => e.to_compile_error().into(),
    }
}

/// Reflects a field-less enum. The enum must also be `Copy`.
#[proc_macro_derive(Enum, attributes(morph))]
pub fn derive_enum(input: TokenStream) -> TokenStream {
    match morph_codegen::generate_enum(input.into()) {
        Ok(output) => output.into(),
        Err(e) => e.to_compile_error().into(),
    }
}

/// Lets a type be referenced from model members as `Arc<T>` without being
/// reflected.
#[proc_macro_derive(Object, attributes(morph))]
pub fn derive_object(input: TokenStream) -> TokenStream {
    match morph_codegen::generate_object(input.into()) {
        Ok(output) => output.into(),
        Err(e) => e.to_compile_error().into(),
    }
}

/// Turns a trait into a view that adapters can implement.
#[proc_macro_attribute]
pub fn view(attr: TokenStream, input: TokenStream) -> TokenStream {
    match morph_codegen::generate_view(attr.into(), input.into()) {
        Ok(output) => output.into(),
        Err(e) => e.to_compile_error().into(),
    }
}

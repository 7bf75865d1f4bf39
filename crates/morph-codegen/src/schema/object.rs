use super::ContainerAttr;

/// A type referenced as-is by model members.
#[derive(Debug)]
pub(crate) struct Object {
    pub(crate) ident: syn::Ident,

    pub(crate) name: String,
}

impl Object {
    pub(crate) fn from_ast(ast: &syn::DeriveInput) -> syn::Result<Object> {
        if !ast.generics.params.is_empty() {
            return Err(syn::Error::new_spanned(
                &ast.generics,
                "object generics are not supported",
            ));
        }

        let container = ContainerAttr::from_ast(&ast.attrs)?;

        Ok(Object {
            ident: ast.ident.clone(),
            name: container.name(&ast.ident),
        })
    }
}

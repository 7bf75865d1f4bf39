use super::{ContainerAttr, ErrorSet, MemberAttr, MemberKind};

#[derive(Debug)]
pub(crate) struct Enum {
    pub(crate) ident: syn::Ident,

    pub(crate) name: String,

    pub(crate) variants: Vec<Variant>,
}

#[derive(Debug)]
pub(crate) struct Variant {
    pub(crate) ident: syn::Ident,

    /// Variant name used to match variants of other enums
    pub(crate) name: String,
}

impl Enum {
    pub(crate) fn from_ast(ast: &syn::ItemEnum) -> syn::Result<Enum> {
        if !ast.generics.params.is_empty() {
            return Err(syn::Error::new_spanned(
                &ast.generics,
                "enum generics are not supported",
            ));
        }

        if ast.variants.is_empty() {
            return Err(syn::Error::new_spanned(
                ast,
                "enums must have at least one variant",
            ));
        }

        let mut errs = ErrorSet::new();
        let container = errs.ok(ContainerAttr::from_ast(&ast.attrs)).unwrap_or_default();
        let mut variants = vec![];

        for variant in &ast.variants {
            if !matches!(variant.fields, syn::Fields::Unit) {
                errs.push(syn::Error::new_spanned(
                    &variant.fields,
                    "enum variants cannot have fields",
                ));
                continue;
            }

            let Some(attr) = errs.ok(MemberAttr::from_ast(&variant.attrs, MemberKind::Variant))
            else {
                continue;
            };

            let name = attr.name(&variant.ident, container.rename_all);

            if variants.iter().any(|variant: &Variant| variant.name == name) {
                errs.push(syn::Error::new_spanned(
                    &variant.ident,
                    format!("duplicate variant name `{name}`"),
                ));
                continue;
            }

            variants.push(Variant {
                ident: variant.ident.clone(),
                name,
            });
        }

        errs.finish()?;

        Ok(Enum {
            ident: ast.ident.clone(),
            name: container.name(&ast.ident),
            variants,
        })
    }
}

use super::{check_member_type, ContainerAttr, ErrorSet, MemberAttr, MemberKind};

#[derive(Debug)]
pub(crate) struct Model {
    /// Type identifier
    pub(crate) ident: syn::Ident,

    /// Name in the schema
    pub(crate) name: String,

    /// Member fields, in declaration order. Skipped fields are left out.
    pub(crate) fields: Vec<Field>,
}

#[derive(Debug)]
pub(crate) struct Field {
    pub(crate) ident: syn::Ident,

    /// Member name in the schema
    pub(crate) name: String,

    pub(crate) ty: syn::Type,

    pub(crate) readonly: bool,
}

impl Model {
    pub(crate) fn from_ast(ast: &syn::ItemStruct) -> syn::Result<Model> {
        let syn::Fields::Named(node) = &ast.fields else {
            return Err(syn::Error::new_spanned(
                &ast.fields,
                "model fields must be named",
            ));
        };

        if !ast.generics.params.is_empty() {
            return Err(syn::Error::new_spanned(
                &ast.generics,
                "model generics are not supported",
            ));
        }

        let mut errs = ErrorSet::new();
        let container = errs.ok(ContainerAttr::from_ast(&ast.attrs)).unwrap_or_default();
        let mut fields = vec![];

        for field in &node.named {
            let Some(attr) = errs.ok(MemberAttr::from_ast(&field.attrs, MemberKind::Field)) else {
                continue;
            };

            let Some(ident) = &field.ident else {
                errs.push(syn::Error::new_spanned(field, "model fields must be named"));
                continue;
            };

            if attr.skip {
                continue;
            }

            if errs.ok(check_member_type(&field.ty)).is_none() {
                continue;
            }

            let name = attr.name(ident, container.rename_all);

            if fields.iter().any(|field: &Field| field.name == name) {
                errs.push(syn::Error::new_spanned(
                    ident,
                    format!("duplicate member name `{name}`"),
                ));
                continue;
            }

            fields.push(Field {
                ident: ident.clone(),
                name,
                ty: field.ty.clone(),
                readonly: attr.readonly,
            });
        }

        errs.finish()?;

        Ok(Model {
            ident: ast.ident.clone(),
            name: container.name(&ast.ident),
            fields,
        })
    }
}

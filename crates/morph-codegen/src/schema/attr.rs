use super::{ErrorSet, RenameRule};

/// `#[morph(..)]` on a struct, enum or view trait.
#[derive(Debug, Default)]
pub(crate) struct ContainerAttr {
    /// Name used in schemas and diagnostics instead of the type name
    pub(crate) rename: Option<syn::LitStr>,

    pub(crate) rename_all: Option<RenameRule>,
}

/// `#[morph(..)]` on a field, variant or view method.
#[derive(Debug, Default)]
pub(crate) struct MemberAttr {
    pub(crate) rename: Option<syn::LitStr>,

    /// The member can be read but not assigned
    pub(crate) readonly: bool,

    /// The field is not a member at all
    pub(crate) skip: bool,
}

/// Where a [`MemberAttr`] was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum MemberKind {
    Field,
    Variant,
    Method,
}

pub(crate) fn is_morph(attr: &syn::Attribute) -> bool {
    attr.path().is_ident("morph")
}

impl ContainerAttr {
    pub(crate) fn from_ast(attrs: &[syn::Attribute]) -> syn::Result<ContainerAttr> {
        let mut container = ContainerAttr::default();
        let mut errs = ErrorSet::new();

        for attr in attrs.iter().filter(|attr| is_morph(attr)) {
            errs.ok(attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("rename") {
                    let lit: syn::LitStr = meta.value()?.parse()?;

                    if container.rename.replace(lit).is_some() {
                        return Err(meta.error("duplicate `rename` attribute"));
                    }
                } else if meta.path.is_ident("rename_all") {
                    let lit: syn::LitStr = meta.value()?.parse()?;
                    let rule = RenameRule::from_lit(&lit)?;

                    if container.rename_all.replace(rule).is_some() {
                        return Err(meta.error("duplicate `rename_all` attribute"));
                    }
                } else {
                    return Err(meta.error("unsupported morph attribute"));
                }

                Ok(())
            }));
        }

        errs.finish()?;
        Ok(container)
    }

    /// Name of the type in its schema.
    pub(crate) fn name(&self, ident: &syn::Ident) -> String {
        match &self.rename {
            Some(lit) => lit.value(),
            None => ident.to_string(),
        }
    }
}

impl MemberAttr {
    pub(crate) fn from_ast(attrs: &[syn::Attribute], kind: MemberKind) -> syn::Result<MemberAttr> {
        let mut member = MemberAttr::default();
        let mut errs = ErrorSet::new();

        for attr in attrs.iter().filter(|attr| is_morph(attr)) {
            errs.ok(attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("rename") {
                    let lit: syn::LitStr = meta.value()?.parse()?;

                    if member.rename.replace(lit).is_some() {
                        return Err(meta.error("duplicate `rename` attribute"));
                    }
                } else if meta.path.is_ident("readonly") && kind == MemberKind::Field {
                    if std::mem::replace(&mut member.readonly, true) {
                        return Err(meta.error("duplicate `readonly` attribute"));
                    }
                } else if meta.path.is_ident("skip") && kind == MemberKind::Field {
                    if std::mem::replace(&mut member.skip, true) {
                        return Err(meta.error("duplicate `skip` attribute"));
                    }
                } else if meta.path.is_ident("readonly") || meta.path.is_ident("skip") {
                    return Err(meta.error("only model fields support this attribute"));
                } else {
                    return Err(meta.error("unsupported morph attribute"));
                }

                Ok(())
            }));
        }

        errs.finish()?;
        Ok(member)
    }

    /// Name of the member in its schema: the explicit rename, else the
    /// container rule applied to `ident`.
    pub(crate) fn name(&self, ident: &syn::Ident, rule: Option<RenameRule>) -> String {
        if let Some(lit) = &self.rename {
            return lit.value();
        }

        let ident = ident.to_string();
        let ident = ident.strip_prefix("r#").unwrap_or(&ident);

        match rule {
            Some(rule) => rule.apply(ident),
            None => ident.to_string(),
        }
    }
}

use super::{check_member_type, is_morph, ContainerAttr, ErrorSet, MemberAttr, MemberKind};

use syn::parse_quote;

#[derive(Debug)]
pub(crate) struct View {
    pub(crate) ident: syn::Ident,

    pub(crate) name: String,

    /// Supertraits that are views themselves
    pub(crate) extends: Vec<syn::Path>,

    /// Methods without a default body, in declaration order
    pub(crate) methods: Vec<Method>,
}

#[derive(Debug)]
pub(crate) struct Method {
    pub(crate) ident: syn::Ident,

    /// Member name in the schema
    pub(crate) name: String,

    pub(crate) ret: ReturnTy,
}

#[derive(Debug)]
pub(crate) enum ReturnTy {
    /// `-> T`; a failed read panics
    Plain(syn::Type),

    /// `-> Result<T>`; a failed read is returned
    Result(syn::Type),
}

impl View {
    /// Parses the view and strips `#[morph]` attributes from the trait, so
    /// it can be emitted again. Adds the `Send + Sync + 'static` bounds
    /// every view needs.
    pub(crate) fn from_ast(ast: &mut syn::ItemTrait) -> syn::Result<View> {
        if !ast.generics.params.is_empty() || ast.generics.where_clause.is_some() {
            return Err(syn::Error::new_spanned(
                &ast.generics,
                "view generics are not supported",
            ));
        }

        let mut errs = ErrorSet::new();
        let container = errs.ok(ContainerAttr::from_ast(&ast.attrs)).unwrap_or_default();
        ast.attrs.retain(|attr| !is_morph(attr));

        let mut extends = vec![];
        let (mut send, mut sync, mut is_static) = (false, false, false);

        for bound in &ast.supertraits {
            match bound {
                syn::TypeParamBound::Trait(bound) => {
                    if !matches!(bound.modifier, syn::TraitBoundModifier::None) {
                        errs.push(syn::Error::new_spanned(bound, "unsupported bound"));
                    } else if bound.path.is_ident("Send") || is_marker(&bound.path, "Send") {
                        send = true;
                    } else if bound.path.is_ident("Sync") || is_marker(&bound.path, "Sync") {
                        sync = true;
                    } else {
                        extends.push(bound.path.clone());
                    }
                }
                syn::TypeParamBound::Lifetime(lifetime) if lifetime.ident == "static" => {
                    is_static = true;
                }
                bound => errs.push(syn::Error::new_spanned(bound, "unsupported bound")),
            }
        }

        if !send {
            ast.supertraits.push(parse_quote!(::core::marker::Send));
        }

        if !sync {
            ast.supertraits.push(parse_quote!(::core::marker::Sync));
        }

        if !is_static {
            ast.supertraits.push(parse_quote!('static));
        }

        let mut methods: Vec<Method> = vec![];

        for item in &mut ast.items {
            let syn::TraitItem::Fn(item) = item else {
                errs.push(syn::Error::new_spanned(
                    item,
                    "view traits may only contain methods",
                ));
                continue;
            };

            let attr = errs.ok(MemberAttr::from_ast(&item.attrs, MemberKind::Method));
            item.attrs.retain(|attr| !is_morph(attr));

            // Provided methods are ordinary trait methods, not members
            if item.default.is_some() {
                continue;
            }

            let Some(attr) = attr else {
                continue;
            };

            let Some(ret) = errs.ok(Method::check_signature(&item.sig)) else {
                continue;
            };

            let name = attr.name(&item.sig.ident, container.rename_all);

            if methods.iter().any(|method| method.name == name) {
                errs.push(syn::Error::new_spanned(
                    &item.sig.ident,
                    format!("duplicate member name `{name}`"),
                ));
                continue;
            }

            methods.push(Method {
                ident: item.sig.ident.clone(),
                name,
                ret,
            });
        }

        errs.finish()?;

        Ok(View {
            ident: ast.ident.clone(),
            name: container.name(&ast.ident),
            extends,
            methods,
        })
    }
}

impl Method {
    fn check_signature(sig: &syn::Signature) -> syn::Result<ReturnTy> {
        if !sig.generics.params.is_empty() || sig.generics.where_clause.is_some() {
            return Err(syn::Error::new_spanned(
                &sig.generics,
                "view methods cannot be generic",
            ));
        }

        if sig.asyncness.is_some() || sig.unsafety.is_some() || sig.constness.is_some() {
            return Err(syn::Error::new_spanned(
                sig,
                "view methods must be plain `fn`s",
            ));
        }

        let mut inputs = sig.inputs.iter();

        match (inputs.next(), inputs.next()) {
            (Some(syn::FnArg::Receiver(receiver)), None)
                if receiver.reference.is_some()
                    && receiver.mutability.is_none()
                    && receiver.colon_token.is_none() => {}
            (Some(syn::FnArg::Receiver(_)), Some(arg)) => {
                return Err(syn::Error::new_spanned(
                    arg,
                    "view methods cannot take arguments",
                ))
            }
            _ => {
                return Err(syn::Error::new_spanned(
                    &sig.inputs,
                    "view methods must take `&self` only",
                ))
            }
        }

        let syn::ReturnType::Type(_, ty) = &sig.output else {
            return Err(syn::Error::new_spanned(
                sig,
                "view methods must return a value",
            ));
        };

        let ret = match result_inner(ty)? {
            Some(inner) => ReturnTy::Result(inner),
            None => ReturnTy::Plain((**ty).clone()),
        };

        let (ReturnTy::Plain(member) | ReturnTy::Result(member)) = &ret;
        check_member_type(member)?;

        Ok(ret)
    }
}

/// Returns `T` if `ty` is `Result<T>` or `morph::Result<T>`.
fn result_inner(ty: &syn::Type) -> syn::Result<Option<syn::Type>> {
    let syn::Type::Path(path) = ty else {
        return Ok(None);
    };

    let Some(segment) = path.path.segments.last() else {
        return Ok(None);
    };

    if segment.ident != "Result" {
        return Ok(None);
    }

    if path.qself.is_some() || !is_morph_result(&path.path) {
        return Err(syn::Error::new_spanned(
            ty,
            "view methods return `T` or `morph::Result<T>`",
        ));
    }

    let syn::PathArguments::AngleBracketed(args) = &segment.arguments else {
        return Ok(None);
    };

    let mut args = args.args.iter();

    match (args.next(), args.next()) {
        (Some(syn::GenericArgument::Type(inner)), None) => Ok(Some(inner.clone())),
        _ => Err(syn::Error::new_spanned(
            ty,
            "view methods return `T` or `morph::Result<T>`",
        )),
    }
}

/// `Result` as imported from morph, or spelled `morph::Result`.
fn is_morph_result(path: &syn::Path) -> bool {
    let idents: Vec<_> = path.segments.iter().map(|segment| &segment.ident).collect();

    match idents[..] {
        [result] => path.leading_colon.is_none() && result == "Result",
        [morph, result] => morph == "morph" && result == "Result",
        _ => false,
    }
}

/// Matches `core::marker::Send` and similar spellings.
fn is_marker(path: &syn::Path, name: &str) -> bool {
    path.segments.last().is_some_and(|segment| segment.ident == name)
        && path
            .segments
            .iter()
            .any(|segment| segment.ident == "marker")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ret(ty: syn::Type) -> syn::Result<Option<syn::Type>> {
        result_inner(&ty)
    }

    #[test]
    fn accepts_morph_results() {
        let expected: syn::Type = parse_quote!(u32);

        assert_eq!(ret(parse_quote!(Result<u32>)).unwrap(), Some(expected.clone()));
        assert_eq!(ret(parse_quote!(morph::Result<u32>)).unwrap(), Some(expected.clone()));
        assert_eq!(ret(parse_quote!(::morph::Result<u32>)).unwrap(), Some(expected));
        assert_eq!(ret(parse_quote!(String)).unwrap(), None);
    }

    #[test]
    fn rejects_other_results() {
        let types: [syn::Type; 4] = [
            parse_quote!(std::io::Result<u32>),
            parse_quote!(anyhow::Result<u32>),
            parse_quote!(::Result<u32>),
            parse_quote!(Result<u32, String>),
        ];

        for ty in types {
            let err = ret(ty).unwrap_err();
            assert_eq!(err.to_string(), "view methods return `T` or `morph::Result<T>`");
        }
    }
}

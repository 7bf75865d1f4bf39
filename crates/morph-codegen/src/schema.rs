mod attr;
pub(crate) use attr::{is_morph, ContainerAttr, MemberAttr, MemberKind};

mod enumeration;
pub(crate) use enumeration::{Enum, Variant};

mod error;
pub(crate) use error::ErrorSet;

mod model;
pub(crate) use model::{Field, Model};

mod object;
pub(crate) use object::Object;

mod rename;
pub(crate) use rename::RenameRule;

mod view;
pub(crate) use view::{Method, ReturnTy, View};

/// Rejects `Option<Option<T>>`: both `None` and `Some(None)` read as null,
/// so the member could not be read back as written.
pub(crate) fn check_member_type(ty: &syn::Type) -> syn::Result<()> {
    match option_inner(ty).and_then(option_inner) {
        Some(_) => Err(syn::Error::new_spanned(
            ty,
            "nested `Option` members are not supported",
        )),
        None => Ok(()),
    }
}

fn option_inner(ty: &syn::Type) -> Option<&syn::Type> {
    let syn::Type::Path(path) = ty else {
        return None;
    };

    let segment = path.path.segments.last()?;

    if segment.ident != "Option" {
        return None;
    }

    let syn::PathArguments::AngleBracketed(args) = &segment.arguments else {
        return None;
    };

    match args.args.first()? {
        syn::GenericArgument::Type(inner) => Some(inner),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use syn::parse_quote;

    #[test]
    fn nested_options_are_rejected() {
        let nested: syn::Type = parse_quote!(Option<Option<u32>>);
        let err = check_member_type(&nested).unwrap_err();
        assert_eq!(err.to_string(), "nested `Option` members are not supported");

        let nested: syn::Type = parse_quote!(core::option::Option<Option<String>>);
        assert!(check_member_type(&nested).is_err());

        let single: syn::Type = parse_quote!(Option<u32>);
        assert!(check_member_type(&single).is_ok());

        let listed: syn::Type = parse_quote!(Option<Vec<Option<u32>>>);
        assert!(check_member_type(&listed).is_ok());
    }
}

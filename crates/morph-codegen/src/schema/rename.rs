use heck::{
    ToKebabCase, ToLowerCamelCase, ToPascalCase, ToShoutySnakeCase, ToSnakeCase,
};

/// Case convention applied to member names by `#[morph(rename_all = "..")]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RenameRule {
    Lower,
    Upper,
    Pascal,
    Camel,
    Snake,
    ScreamingSnake,
    Kebab,
}

impl RenameRule {
    pub(crate) fn from_lit(lit: &syn::LitStr) -> syn::Result<RenameRule> {
        Ok(match &lit.value()[..] {
            "lowercase" => RenameRule::Lower,
            "UPPERCASE" => RenameRule::Upper,
            "PascalCase" => RenameRule::Pascal,
            "camelCase" => RenameRule::Camel,
            "snake_case" => RenameRule::Snake,
            "SCREAMING_SNAKE_CASE" => RenameRule::ScreamingSnake,
            "kebab-case" => RenameRule::Kebab,
            _ => {
                return Err(syn::Error::new_spanned(
                    lit,
                    "unknown rename rule; expected one of \"lowercase\", \"UPPERCASE\", \
                     \"PascalCase\", \"camelCase\", \"snake_case\", \"SCREAMING_SNAKE_CASE\", \
                     \"kebab-case\"",
                ))
            }
        })
    }

    pub(crate) fn apply(self, name: &str) -> String {
        match self {
            RenameRule::Lower => name.to_lowercase(),
            RenameRule::Upper => name.to_uppercase(),
            RenameRule::Pascal => name.to_pascal_case(),
            RenameRule::Camel => name.to_lower_camel_case(),
            RenameRule::Snake => name.to_snake_case(),
            RenameRule::ScreamingSnake => name.to_shouty_snake_case(),
            RenameRule::Kebab => name.to_kebab_case(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn applies_case_conventions() {
        assert_eq!(RenameRule::Pascal.apply("first_name"), "FirstName");
        assert_eq!(RenameRule::Camel.apply("first_name"), "firstName");
        assert_eq!(RenameRule::ScreamingSnake.apply("first_name"), "FIRST_NAME");
        assert_eq!(RenameRule::Kebab.apply("first_name"), "first-name");
        assert_eq!(RenameRule::Snake.apply("FirstName"), "first_name");
    }
}

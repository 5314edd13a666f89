//! `rename_all` rules for deriving column names from field names.

use heck::{ToLowerCamelCase, ToShoutySnakeCase, ToSnakeCase, ToUpperCamelCase};
use syn::{Error, LitStr, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RenameRule {
    SnakeCase,
    PascalCase,
    CamelCase,
    ScreamingSnakeCase,
    LowerCase,
    UpperCase,
}

impl RenameRule {
    pub(crate) fn parse(lit: &LitStr) -> Result<Self> {
        match lit.value().as_str() {
            "snake_case" => Ok(Self::SnakeCase),
            "PascalCase" => Ok(Self::PascalCase),
            "camelCase" => Ok(Self::CamelCase),
            "SCREAMING_SNAKE_CASE" => Ok(Self::ScreamingSnakeCase),
            "lowercase" => Ok(Self::LowerCase),
            "UPPERCASE" => Ok(Self::UpperCase),
            other => Err(Error::new(
                lit.span(),
                format!(
                    "unknown rename_all rule '{other}' (expected snake_case, PascalCase, \
                     camelCase, SCREAMING_SNAKE_CASE, lowercase or UPPERCASE)"
                ),
            )),
        }
    }

    pub(crate) fn apply(self, field: &str) -> String {
        match self {
            Self::SnakeCase => field.to_snake_case(),
            Self::PascalCase => field.to_upper_camel_case(),
            Self::CamelCase => field.to_lower_camel_case(),
            Self::ScreamingSnakeCase => field.to_shouty_snake_case(),
            Self::LowerCase => field.to_lowercase(),
            Self::UpperCase => field.to_uppercase(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply() {
        assert_eq!(RenameRule::PascalCase.apply("name_two"), "NameTwo");
        assert_eq!(RenameRule::CamelCase.apply("name_two"), "nameTwo");
        assert_eq!(RenameRule::SnakeCase.apply("name_two"), "name_two");
        assert_eq!(RenameRule::ScreamingSnakeCase.apply("name_two"), "NAME_TWO");
        assert_eq!(RenameRule::UpperCase.apply("name_two"), "NAME_TWO");
    }

    #[test]
    fn test_parse_rejects_unknown() {
        let lit: LitStr = syn::parse_quote!("kebab-case");
        assert!(RenameRule::parse(&lit).is_err());
        let lit: LitStr = syn::parse_quote!("PascalCase");
        assert_eq!(RenameRule::parse(&lit).unwrap(), RenameRule::PascalCase);
    }
}

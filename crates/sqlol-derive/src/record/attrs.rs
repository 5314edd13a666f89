//! Attribute parsing for the Record derive macro.
//!
//! Handles struct-level and field-level `#[sql(...)]` attributes.

use proc_macro2::Span;
use syn::{DeriveInput, Error, Result};

use crate::common::rename::RenameRule;
use crate::common::sql_ident::parse_sql_ident;

/// Struct-level options.
#[derive(Default)]
pub(super) struct StructAttrs {
    pub rename_all: Option<RenameRule>,
}

impl syn::parse::Parse for StructAttrs {
    fn parse(input: syn::parse::ParseStream) -> Result<Self> {
        let mut attrs = StructAttrs::default();

        loop {
            if input.is_empty() {
                break;
            }

            let ident: syn::Ident = input.parse()?;
            if ident == "rename_all" {
                let _: syn::Token![=] = input.parse()?;
                let value: syn::LitStr = input.parse()?;
                attrs.rename_all = Some(RenameRule::parse(&value)?);
            } else {
                return Err(Error::new(
                    ident.span(),
                    format!("unknown struct attribute '{ident}' (expected rename_all)"),
                ));
            }

            if input.peek(syn::Token![,]) {
                let _: syn::Token![,] = input.parse()?;
            } else {
                break;
            }
        }

        Ok(attrs)
    }
}

/// Field-level options.
#[derive(Default)]
pub(super) struct FieldAttrs {
    /// Explicit column name and the span it was declared at
    pub column: Option<(String, Span)>,
    pub flatten: bool,
    pub nested: bool,
    pub json: bool,
    pub skip: bool,
}

impl syn::parse::Parse for FieldAttrs {
    fn parse(input: syn::parse::ParseStream) -> Result<Self> {
        let mut attrs = FieldAttrs::default();

        loop {
            if input.is_empty() {
                break;
            }

            let ident: syn::Ident = input.parse()?;
            match ident.to_string().as_str() {
                "column" => {
                    let _: syn::Token![=] = input.parse()?;
                    let value: syn::LitStr = input.parse()?;
                    let name = parse_sql_ident(&value, "column")?;
                    attrs.column = Some((name, value.span()));
                }
                "flatten" => attrs.flatten = true,
                "nested" => attrs.nested = true,
                "json" => attrs.json = true,
                "skip" => attrs.skip = true,
                other => {
                    return Err(Error::new(
                        ident.span(),
                        format!(
                            "unknown field attribute '{other}' \
                             (expected column, flatten, nested, json or skip)"
                        ),
                    ));
                }
            }

            if input.peek(syn::Token![,]) {
                let _: syn::Token![,] = input.parse()?;
            } else {
                break;
            }
        }

        Ok(attrs)
    }
}

impl FieldAttrs {
    fn merge(&mut self, other: FieldAttrs) {
        if other.column.is_some() {
            self.column = other.column;
        }
        self.flatten |= other.flatten;
        self.nested |= other.nested;
        self.json |= other.json;
        self.skip |= other.skip;
    }

    fn validate(&self, field: &syn::Field) -> Result<()> {
        if self.flatten && (self.column.is_some() || self.json || self.nested) {
            return Err(Error::new_spanned(
                field,
                "#[sql(flatten)] cannot be combined with column, json or nested",
            ));
        }
        if self.nested && self.json {
            return Err(Error::new_spanned(
                field,
                "#[sql(nested)] already encodes as JSON; drop #[sql(json)]",
            ));
        }
        Ok(())
    }
}

pub(super) fn get_struct_attrs(input: &DeriveInput) -> Result<StructAttrs> {
    let mut attrs = StructAttrs::default();
    for attr in &input.attrs {
        if attr.path().is_ident("sql") {
            let parsed: StructAttrs = attr.parse_args()?;
            if parsed.rename_all.is_some() {
                attrs.rename_all = parsed.rename_all;
            }
        }
    }
    Ok(attrs)
}

pub(super) fn get_field_attrs(field: &syn::Field) -> Result<FieldAttrs> {
    let mut attrs = FieldAttrs::default();
    for attr in &field.attrs {
        if attr.path().is_ident("sql") {
            attrs.merge(attr.parse_args()?);
        }
    }
    attrs.validate(field)?;
    Ok(attrs)
}

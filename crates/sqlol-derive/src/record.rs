//! Record derive macro implementation.

mod attrs;

use std::collections::HashMap;

use proc_macro2::{Span, TokenStream};
use quote::quote;
use syn::{Data, DeriveInput, Error, Fields, Result};

use self::attrs::{get_field_attrs, get_struct_attrs};

pub fn expand(input: DeriveInput) -> Result<TokenStream> {
    let name = &input.ident;
    let struct_attrs = get_struct_attrs(&input)?;
    let mut generics = input.generics.clone();
    let generic = generics.type_params().next().is_some();

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            _ => {
                return Err(Error::new_spanned(
                    &input,
                    "Record can only be derived for structs with named fields",
                ));
            }
        },
        _ => {
            return Err(Error::new_spanned(
                &input,
                "Record can only be derived for structs",
            ));
        }
    };

    let mut spec_pushes = Vec::new();
    let mut lookups = Vec::new();
    let mut ident_lookups = Vec::new();
    // Field type bounds, only needed when the struct has type parameters.
    let mut bounds: Vec<TokenStream> = Vec::new();
    // Direct column names declared on this struct; flattened names are
    // resolved at runtime with first-wins.
    let mut seen: HashMap<String, Span> = HashMap::new();

    for field in fields {
        let Some(ident) = &field.ident else {
            continue;
        };
        let attrs = get_field_attrs(field)?;
        if attrs.skip {
            continue;
        }

        let ty = &field.ty;
        if attrs.flatten {
            bounds.push(quote! { #ty: sqlol::Record });
            spec_pushes.push(quote! {
                spec.extend(<#ty as sqlol::Record>::column_spec());
            });
            lookups.push(quote! {
                if let ::std::option::Option::Some(found) = sqlol::Record::field(&self.#ident, name) {
                    return ::std::option::Option::Some(found);
                }
            });
            ident_lookups.push(quote! {
                if let ::std::option::Option::Some(found) = sqlol::Record::field_by_ident(&self.#ident, name) {
                    return ::std::option::Option::Some(found);
                }
            });
            continue;
        }

        if !matches!(field.vis, syn::Visibility::Public(_)) {
            if let Some((_, span)) = &attrs.column {
                return Err(Error::new(
                    *span,
                    "column mapping on a non-pub field has no effect; make the field pub or drop the attribute",
                ));
            }
            continue;
        }

        let ident_str = ident.to_string();
        let ident_str = ident_str.trim_start_matches("r#").to_string();
        let (column, span) = match attrs.column {
            Some((column, span)) => (column, span),
            None => {
                let column = match struct_attrs.rename_all {
                    Some(rule) => rule.apply(&ident_str),
                    None => ident_str.clone(),
                };
                (column, ident.span())
            }
        };

        if let Some(first) = seen.get(&column) {
            let mut err = Error::new(span, format!("duplicate column name '{column}'"));
            err.combine(Error::new(*first, "first declared here"));
            return Err(err);
        }
        seen.insert(column.clone(), span);

        let field_ref = if attrs.nested {
            bounds.push(quote! { #ty: sqlol::Record + sqlol::ToJson });
            quote! { sqlol::FieldRef::Nested { record: &self.#ident, json: &self.#ident } }
        } else if attrs.json {
            bounds.push(quote! { #ty: sqlol::ToJson });
            quote! { sqlol::FieldRef::Json(&self.#ident) }
        } else {
            bounds.push(quote! { #ty: sqlol::Encode });
            quote! { sqlol::FieldRef::Value(&self.#ident) }
        };

        if column != ident_str {
            ident_lookups.push(quote! {
                if name == #ident_str {
                    return ::std::option::Option::Some(#field_ref);
                }
            });
        }

        spec_pushes.push(quote! { spec.push(#column); });
        lookups.push(quote! {
            if name == #column {
                return ::std::option::Option::Some(#field_ref);
            }
        });
    }

    if generic {
        let where_clause = generics.make_where_clause();
        for bound in bounds {
            where_clause.predicates.push(syn::parse2(bound)?);
        }
    }
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();
    let record_name = name.to_string();

    Ok(quote! {
        impl #impl_generics sqlol::Record for #name #ty_generics #where_clause {
            #[allow(unused_mut)]
            fn column_spec() -> sqlol::ColumnSpec {
                let mut spec = sqlol::ColumnSpec::new();
                #(#spec_pushes)*
                spec
            }

            fn field(&self, name: &str) -> ::std::option::Option<sqlol::FieldRef<'_>> {
                let _ = name;
                #(#lookups)*
                ::std::option::Option::None
            }

            fn field_by_ident(&self, name: &str) -> ::std::option::Option<sqlol::FieldRef<'_>> {
                let _ = name;
                #(#ident_lookups)*
                ::std::option::Option::None
            }

            fn record_name(&self) -> &'static str {
                #record_name
            }
        }
    })
}

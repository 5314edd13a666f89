//! Derive macros for sqlol
//!
//! Provides `#[derive(Record)]`.

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

mod common;
mod record;

/// Derive `Record` (column list + field lookup) for a struct.
///
/// # Example
///
/// ```ignore
/// use sqlol::Record;
///
/// #[derive(Record)]
/// struct Audit {
///     pub created_at: chrono::DateTime<chrono::Utc>,
/// }
///
/// #[derive(Record)]
/// #[sql(rename_all = "PascalCase")]
/// struct User {
///     pub id: i64,
///     #[sql(column = "email_address")]
///     pub email: Option<String>,
///     #[sql(flatten)]
///     audit: Audit,
///     #[sql(json)]
///     pub tags: Vec<String>,
///     secret: String, // not pub: not a column
/// }
/// ```
///
/// # Attributes
///
/// - `#[sql(rename_all = "...")]` - Derive column names from field names
///   (`snake_case`, `PascalCase`, `camelCase`, `SCREAMING_SNAKE_CASE`,
///   `lowercase`, `UPPERCASE`)
/// - `#[sql(column = "name")]` - Map field to a different column name
/// - `#[sql(flatten)]` - Expand an embedded record's columns in place
/// - `#[sql(nested)]` - A record-typed column (JSON) reachable by dotted paths
/// - `#[sql(json)]` - Encode the field as a JSON literal
/// - `#[sql(skip)]` - Never a column
///
/// Only `pub` fields become columns; flattened fields are always expanded.
#[proc_macro_derive(Record, attributes(sql))]
pub fn derive_record(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    record::expand(input)
        .unwrap_or_else(|e| e.to_compile_error())
        .into()
}

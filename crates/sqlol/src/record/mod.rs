//! Struct reflection: column lists and value tuples for record types.
//!
//! A [`Record`] knows its ordered [`ColumnSpec`] and can hand out its fields
//! by column name. `#[derive(Record)]` generates both; embedded records
//! (`#[sql(flatten)]`) are expanded in place.
//!
//! ```ignore
//! use sqlol::{Record, columns_of, encode_tuples};
//!
//! #[derive(Record)]
//! struct User {
//!     pub id: i64,
//!     #[sql(column = "user_name")]
//!     pub name: String,
//! }
//!
//! let cols = columns_of::<User>();
//! assert_eq!(cols.names(), ["id", "user_name"]);
//! let tuples = encode_tuples(&users, cols.names())?;
//! ```

use std::any::TypeId;
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, OnceLock, PoisonError, RwLock};

use crate::error::{SqlError, SqlResult};
use crate::literal::{Encode, ToJson, Value};

/// Ordered column names of a record type.
///
/// Names are unique: pushing a name that is already present is a no-op, so
/// the first declaration of an ambiguous name wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnSpec {
    names: Vec<String>,
}

impl ColumnSpec {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a column name unless it is already present.
    pub fn push(&mut self, name: impl Into<String>) -> &mut Self {
        let name = name.into();
        if self.contains(&name) {
            crate::sql_warn!(column = %name, "duplicate column name dropped");
        } else {
            self.names.push(name);
        }
        self
    }

    /// Splice another spec in place (embedded records).
    pub fn extend(&mut self, other: ColumnSpec) -> &mut Self {
        for name in other.names {
            self.push(name);
        }
        self
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.names.iter()
    }

    /// A copy without the excluded names.
    pub fn without<S: AsRef<str>>(&self, exclude: &[S]) -> ColumnSpec {
        ColumnSpec {
            names: self
                .names
                .iter()
                .filter(|n| !exclude.iter().any(|e| e.as_ref() == n.as_str()))
                .cloned()
                .collect(),
        }
    }

    pub fn into_vec(self) -> Vec<String> {
        self.names
    }
}

impl<S: Into<String>> FromIterator<S> for ColumnSpec {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut spec = ColumnSpec::new();
        for name in iter {
            spec.push(name);
        }
        spec
    }
}

impl<'a> IntoIterator for &'a ColumnSpec {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.names.iter()
    }
}

impl AsRef<[String]> for ColumnSpec {
    fn as_ref(&self) -> &[String] {
        &self.names
    }
}

impl fmt::Display for ColumnSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.names.join(","))
    }
}

/// A field handed out by [`Record::field`].
#[derive(Clone, Copy)]
pub enum FieldRef<'a> {
    /// A plain column value
    Value(&'a dyn Encode),
    /// A column encoded through JSON
    Json(&'a dyn ToJson),
    /// A nested record: one JSON column, and a target for dotted paths
    Nested {
        record: &'a dyn Record,
        json: &'a dyn ToJson,
    },
}

impl<'a> FieldRef<'a> {
    /// Classify the field for literal rendering.
    pub fn to_value(&self) -> SqlResult<Value> {
        match self {
            FieldRef::Value(v) => v.to_value(),
            FieldRef::Json(j) | FieldRef::Nested { json: j, .. } => Ok(Value::Json(j.to_json()?)),
        }
    }

    pub fn as_record(&self) -> Option<&'a dyn Record> {
        match self {
            FieldRef::Nested { record, .. } => Some(*record),
            _ => None,
        }
    }
}

impl fmt::Debug for FieldRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldRef::Value(_) => f.write_str("FieldRef::Value"),
            FieldRef::Json(_) => f.write_str("FieldRef::Json"),
            FieldRef::Nested { record, .. } => {
                write!(f, "FieldRef::Nested({})", record.record_name())
            }
        }
    }
}

/// A structured record type mapped to database columns.
///
/// Usually derived with `#[derive(Record)]`.
pub trait Record {
    /// Column names in declaration order, embedded records flattened.
    fn column_spec() -> ColumnSpec
    where
        Self: Sized;

    /// Look up a field by column name.
    fn field(&self, name: &str) -> Option<FieldRef<'_>>;

    /// Look up a field by Rust field name.
    ///
    /// Consulted only after [`field`](Self::field) misses, so a column name
    /// always wins over an identifier.
    fn field_by_ident(&self, name: &str) -> Option<FieldRef<'_>> {
        let _ = name;
        None
    }

    /// Type name used in error messages.
    fn record_name(&self) -> &'static str;
}

impl<T: Record> Record for &T {
    fn column_spec() -> ColumnSpec {
        T::column_spec()
    }

    fn field(&self, name: &str) -> Option<FieldRef<'_>> {
        (**self).field(name)
    }

    fn field_by_ident(&self, name: &str) -> Option<FieldRef<'_>> {
        (**self).field_by_ident(name)
    }

    fn record_name(&self) -> &'static str {
        (**self).record_name()
    }
}

impl<T: Record> Record for Box<T> {
    fn column_spec() -> ColumnSpec {
        T::column_spec()
    }

    fn field(&self, name: &str) -> Option<FieldRef<'_>> {
        (**self).field(name)
    }

    fn field_by_ident(&self, name: &str) -> Option<FieldRef<'_>> {
        (**self).field_by_ident(name)
    }

    fn record_name(&self) -> &'static str {
        (**self).record_name()
    }
}

impl<T: Record> Record for Arc<T> {
    fn column_spec() -> ColumnSpec {
        T::column_spec()
    }

    fn field(&self, name: &str) -> Option<FieldRef<'_>> {
        (**self).field(name)
    }

    fn field_by_ident(&self, name: &str) -> Option<FieldRef<'_>> {
        (**self).field_by_ident(name)
    }

    fn record_name(&self) -> &'static str {
        (**self).record_name()
    }
}

type SpecCache = RwLock<HashMap<TypeId, Arc<ColumnSpec>>>;

fn spec_cache() -> &'static SpecCache {
    static CACHE: OnceLock<SpecCache> = OnceLock::new();
    CACHE.get_or_init(|| RwLock::new(HashMap::new()))
}

/// Column spec of a record type, computed once per type.
pub fn columns_of<R: Record + 'static>() -> Arc<ColumnSpec> {
    let key = TypeId::of::<R>();
    if let Some(spec) = spec_cache()
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .get(&key)
    {
        return spec.clone();
    }

    let spec = Arc::new(R::column_spec());
    spec_cache()
        .write()
        .unwrap_or_else(PoisonError::into_inner)
        .entry(key)
        .or_insert(spec)
        .clone()
}

/// A dotted field path such as `address.city`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldPath {
    parts: Vec<String>,
}

impl FieldPath {
    /// Split a column name on `.`.
    ///
    /// A name without a dot, or one that starts with a dot, is a single
    /// component.
    pub fn parse(name: &str) -> Self {
        let parts = match name.find('.') {
            Some(i) if i > 0 => name.split('.').map(str::to_string).collect(),
            _ => vec![name.to_string()],
        };
        Self { parts }
    }

    pub fn parts(&self) -> &[String] {
        &self.parts
    }

    /// Resolve against a record by successive field lookups.
    ///
    /// Every component but the last must name a nested record; any miss
    /// yields `None`.
    pub fn resolve<'a>(&self, record: &'a dyn Record) -> Option<FieldRef<'a>> {
        let (last, init) = self.parts.split_last()?;
        let mut current = record;
        for part in init {
            current = lookup(current, part)?.as_record()?;
        }
        lookup(current, last)
    }
}

fn lookup<'a>(record: &'a dyn Record, name: &str) -> Option<FieldRef<'a>> {
    record.field(name).or_else(|| record.field_by_ident(name))
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.parts.join("."))
    }
}

/// Resolve a column on a record, treating a miss as an error.
pub fn field_value(record: &dyn Record, column: &str) -> SqlResult<Value> {
    match FieldPath::parse(column).resolve(record) {
        Some(field) => field.to_value(),
        None => Err(SqlError::unknown_field(column, record.record_name())),
    }
}

/// Encode one record as `(v1,v2,...)` in column order.
pub fn encode_tuple<S: AsRef<str>>(record: &dyn Record, columns: &[S]) -> SqlResult<String> {
    let mut values = Vec::with_capacity(columns.len());
    for column in columns {
        values.push(field_value(record, column.as_ref())?.to_literal());
    }
    Ok(format!("({})", values.join(",")))
}

/// Encode a sequence of records as comma-joined tuples.
pub fn encode_tuples<'a, R, I, S>(records: I, columns: &[S]) -> SqlResult<String>
where
    R: Record + 'a,
    I: IntoIterator<Item = &'a R>,
    S: AsRef<str>,
{
    let mut tuples = Vec::new();
    for record in records {
        tuples.push(encode_tuple(record, columns)?);
    }
    Ok(tuples.join(","))
}

#[cfg(all(test, feature = "derive"))]
mod tests;

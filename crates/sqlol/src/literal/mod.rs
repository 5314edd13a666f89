//! Literal encoding: native values to escaped SQL literal text.
//!
//! Encoding happens in two steps. A type's [`Encode`] impl classifies the
//! value into the closed [`Value`] sum; [`Value::to_literal`] renders it.
//! The classification order mirrors how special types are recognised before
//! generic ones:
//!
//! 1. byte sequences -> raw text, no quoting ([`Value::Raw`])
//! 2. timestamps -> quoted RFC 3339 with microseconds ([`Value::Timestamp`])
//! 3. valuers -> their native value, numeric text kept bare ([`Value::from_valuer`])
//! 4. absent values -> `NULL`
//! 5. text / integers / booleans / floats
//! 6. anything else through JSON ([`Json`])
//!
//! All string escaping goes through [`quote`].
//!
//! ```ignore
//! use sqlol::literal::encode;
//!
//! assert_eq!(encode(&42)?, "42");
//! assert_eq!(encode("a'b")?, "'a''b'");
//! assert_eq!(encode(&None::<i32>)?, "NULL");
//! # Ok::<(), sqlol::SqlError>(())
//! ```

mod float;

use std::borrow::Cow;
use std::sync::Arc;

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, TimeZone, Timelike};
use serde::Serialize;
use thiserror::Error;

use crate::error::{SqlError, SqlResult};

/// The shapes the literal encoder dispatches on.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// SQL `NULL`
    Null,
    /// Emitted verbatim; the caller is responsible for its safety
    Raw(String),
    /// A point in time with its offset
    Timestamp(DateTime<FixedOffset>),
    /// Text, quoted and escaped
    Text(String),
    /// Any signed integer
    Int(i64),
    /// Any unsigned integer
    UInt(u64),
    /// Single precision float
    Float32(f32),
    /// Double precision float
    Float64(f64),
    Bool(bool),
    /// Serialized JSON text, quoted and escaped like [`Value::Text`]
    Json(String),
}

impl Value {
    /// Render the value as SQL literal text.
    pub fn to_literal(&self) -> String {
        match self {
            Value::Null => "NULL".to_string(),
            Value::Raw(s) => s.clone(),
            Value::Timestamp(t) => format!("'{}'", format_timestamp(t)),
            Value::Text(s) | Value::Json(s) => quote(s),
            Value::Int(i) => i.to_string(),
            Value::UInt(u) => u.to_string(),
            Value::Float32(f) => float::format_f32(*f),
            Value::Float64(f) => float::format_f64(*f),
            Value::Bool(true) => "true".to_string(),
            Value::Bool(false) => "false".to_string(),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Classify a valuer's native value.
    ///
    /// Text that parses as a float is kept bare (numeric types that travel as
    /// text, such as decimals); other text is quoted as usual.
    pub fn from_valuer<V: Valuer + ?Sized>(valuer: &V) -> SqlResult<Value> {
        match valuer.value()? {
            Value::Text(s) if s.parse::<f64>().is_ok() => Ok(Value::Raw(s)),
            other => Ok(other),
        }
    }
}

/// Quote text as a SQL string constant.
///
/// Single quotes are doubled and NUL characters removed. See "String
/// Constants" in the PostgreSQL lexical structure docs.
pub fn quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('\'');
    for ch in s.chars() {
        match ch {
            '\'' => out.push_str("''"),
            '\0' => {}
            c => out.push(c),
        }
    }
    out.push('\'');
    out
}

/// Serialize to JSON and quote the result.
pub fn json_literal<T: Serialize + ?Sized>(value: &T) -> SqlResult<String> {
    Ok(quote(&value.to_json()?))
}

/// Encode any supported value as a SQL literal.
pub fn encode<T: Encode + ?Sized>(value: &T) -> SqlResult<String> {
    Ok(value.to_value()?.to_literal())
}

/// Encode a sequence as comma-joined literals; `None` when it is empty.
pub fn encode_list<I>(values: I) -> SqlResult<Option<String>>
where
    I: IntoIterator,
    I::Item: Encode,
{
    let mut parts = Vec::new();
    for v in values {
        parts.push(encode(&v)?);
    }
    if parts.is_empty() {
        return Ok(None);
    }
    Ok(Some(parts.join(",")))
}

fn format_timestamp(t: &DateTime<FixedOffset>) -> String {
    let mut out = t.format("%Y-%m-%dT%H:%M:%S").to_string();
    // Postgres timestamps carry microsecond resolution.
    let micros = (t.nanosecond() % 1_000_000_000) / 1_000;
    if micros > 0 {
        let frac = format!("{micros:06}");
        out.push('.');
        out.push_str(frac.trim_end_matches('0'));
    }
    if t.offset().local_minus_utc() == 0 {
        out.push('Z');
    } else {
        out.push_str(&t.format("%:z").to_string());
    }
    out
}

/// Types that can be turned into a SQL literal.
pub trait Encode {
    /// Classify the value for literal rendering.
    fn to_value(&self) -> SqlResult<Value>;
}

/// Error returned by a [`Valuer`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("valuer error: {0}")]
pub struct ValuerError(pub String);

impl From<ValuerError> for SqlError {
    fn from(err: ValuerError) -> Self {
        SqlError::Valuer(err.0)
    }
}

/// A type that produces its own native storage value.
///
/// Implement this for domain types (money, identifiers, enums stored as
/// text) and register it with [`encode_via_valuer!`](crate::encode_via_valuer).
pub trait Valuer {
    fn value(&self) -> Result<Value, ValuerError>;
}

/// Implement [`Encode`] for types that implement [`Valuer`].
///
/// ```ignore
/// struct Cents(i64);
///
/// impl sqlol::Valuer for Cents {
///     fn value(&self) -> Result<sqlol::Value, sqlol::ValuerError> {
///         Ok(sqlol::Value::Text(format!("{}.{:02}", self.0 / 100, self.0 % 100)))
///     }
/// }
///
/// sqlol::encode_via_valuer!(Cents);
/// ```
#[macro_export]
macro_rules! encode_via_valuer {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl $crate::Encode for $ty {
                fn to_value(&self) -> $crate::SqlResult<$crate::Value> {
                    $crate::Value::from_valuer(self)
                }
            }
        )+
    };
}

/// Values serialized through JSON before quoting.
pub trait ToJson {
    fn to_json(&self) -> SqlResult<String>;
}

impl<T: Serialize + ?Sized> ToJson for T {
    fn to_json(&self) -> SqlResult<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Wrapper that encodes its content as a quoted JSON literal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Json<T>(pub T);

impl<T: Serialize> Encode for Json<T> {
    fn to_value(&self) -> SqlResult<Value> {
        Ok(Value::Json(self.0.to_json()?))
    }
}

impl Encode for serde_json::Value {
    fn to_value(&self) -> SqlResult<Value> {
        Ok(Value::Json(self.to_json()?))
    }
}

impl Encode for Value {
    fn to_value(&self) -> SqlResult<Value> {
        Ok(self.clone())
    }
}

// ==================== Byte sequences ====================

impl Encode for [u8] {
    fn to_value(&self) -> SqlResult<Value> {
        Ok(Value::Raw(String::from_utf8_lossy(self).into_owned()))
    }
}

impl Encode for Vec<u8> {
    fn to_value(&self) -> SqlResult<Value> {
        self.as_slice().to_value()
    }
}

impl Encode for bytes::Bytes {
    fn to_value(&self) -> SqlResult<Value> {
        self.as_ref().to_value()
    }
}

// ==================== Time ====================

impl<Tz: TimeZone> Encode for DateTime<Tz> {
    fn to_value(&self) -> SqlResult<Value> {
        Ok(Value::Timestamp(self.fixed_offset()))
    }
}

impl Encode for NaiveDateTime {
    fn to_value(&self) -> SqlResult<Value> {
        Ok(Value::Timestamp(self.and_utc().fixed_offset()))
    }
}

impl Encode for NaiveDate {
    fn to_value(&self) -> SqlResult<Value> {
        Ok(Value::Text(self.format("%Y-%m-%d").to_string()))
    }
}

// ==================== Valuers ====================

impl Valuer for uuid::Uuid {
    fn value(&self) -> Result<Value, ValuerError> {
        Ok(Value::Text(self.hyphenated().to_string()))
    }
}

#[cfg(feature = "rust_decimal")]
impl Valuer for rust_decimal::Decimal {
    fn value(&self) -> Result<Value, ValuerError> {
        Ok(Value::Text(self.to_string()))
    }
}

crate::encode_via_valuer!(uuid::Uuid);

#[cfg(feature = "rust_decimal")]
crate::encode_via_valuer!(rust_decimal::Decimal);

// ==================== Null / indirection ====================

impl<T: Encode> Encode for Option<T> {
    fn to_value(&self) -> SqlResult<Value> {
        match self {
            Some(v) => v.to_value(),
            None => Ok(Value::Null),
        }
    }
}

impl<T: Encode + ?Sized> Encode for &T {
    fn to_value(&self) -> SqlResult<Value> {
        (**self).to_value()
    }
}

impl<T: Encode + ?Sized> Encode for Box<T> {
    fn to_value(&self) -> SqlResult<Value> {
        (**self).to_value()
    }
}

impl<T: Encode + ?Sized> Encode for Arc<T> {
    fn to_value(&self) -> SqlResult<Value> {
        (**self).to_value()
    }
}

// ==================== Basic kinds ====================

impl Encode for str {
    fn to_value(&self) -> SqlResult<Value> {
        Ok(Value::Text(self.to_string()))
    }
}

impl Encode for String {
    fn to_value(&self) -> SqlResult<Value> {
        Ok(Value::Text(self.clone()))
    }
}

impl Encode for Cow<'_, str> {
    fn to_value(&self) -> SqlResult<Value> {
        Ok(Value::Text(self.to_string()))
    }
}

impl Encode for bool {
    fn to_value(&self) -> SqlResult<Value> {
        Ok(Value::Bool(*self))
    }
}

macro_rules! impl_encode_int {
    ($variant:ident => $wide:ty: $($t:ty),*) => {
        $(
            impl Encode for $t {
                fn to_value(&self) -> SqlResult<Value> {
                    Ok(Value::$variant(*self as $wide))
                }
            }
        )*
    };
}

impl_encode_int!(Int => i64: i8, i16, i32, i64, isize);
impl_encode_int!(UInt => u64: u8, u16, u32, u64, usize);

impl Encode for f32 {
    fn to_value(&self) -> SqlResult<Value> {
        Ok(Value::Float32(*self))
    }
}

impl Encode for f64 {
    fn to_value(&self) -> SqlResult<Value> {
        Ok(Value::Float64(*self))
    }
}

#[cfg(test)]
mod tests;

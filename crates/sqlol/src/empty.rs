//! Zero-value detection for "try" conditions.
//!
//! A value is *empty* when a `try_*` operation should silently skip it:
//! zero-length text and collections, `false`, numeric zero, `None`, and the
//! default instant for timestamps. Anything else compares against its
//! type's zero value.

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};
use std::sync::Arc;

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone};

use crate::literal::Json;

/// Classifies a value as empty for the purpose of `try_*` operations.
pub trait IsEmpty {
    /// `true` when the value is its type's zero value.
    fn is_empty_value(&self) -> bool;
}

/// Free-function form of [`IsEmpty::is_empty_value`].
pub fn is_empty<T: IsEmpty + ?Sized>(value: &T) -> bool {
    value.is_empty_value()
}

impl IsEmpty for str {
    fn is_empty_value(&self) -> bool {
        self.is_empty()
    }
}

impl IsEmpty for String {
    fn is_empty_value(&self) -> bool {
        self.is_empty()
    }
}

impl IsEmpty for std::borrow::Cow<'_, str> {
    fn is_empty_value(&self) -> bool {
        self.is_empty()
    }
}

impl<T> IsEmpty for [T] {
    fn is_empty_value(&self) -> bool {
        self.is_empty()
    }
}

impl<T, const N: usize> IsEmpty for [T; N] {
    fn is_empty_value(&self) -> bool {
        N == 0
    }
}

impl<T> IsEmpty for Vec<T> {
    fn is_empty_value(&self) -> bool {
        self.is_empty()
    }
}

impl<K, V, S> IsEmpty for HashMap<K, V, S> {
    fn is_empty_value(&self) -> bool {
        self.is_empty()
    }
}

impl<K, V> IsEmpty for BTreeMap<K, V> {
    fn is_empty_value(&self) -> bool {
        self.is_empty()
    }
}

impl<T, S> IsEmpty for HashSet<T, S> {
    fn is_empty_value(&self) -> bool {
        self.is_empty()
    }
}

impl<T> IsEmpty for BTreeSet<T> {
    fn is_empty_value(&self) -> bool {
        self.is_empty()
    }
}

impl IsEmpty for bytes::Bytes {
    fn is_empty_value(&self) -> bool {
        self.is_empty()
    }
}

impl IsEmpty for bool {
    fn is_empty_value(&self) -> bool {
        !*self
    }
}

macro_rules! impl_is_empty_int {
    ($($t:ty),*) => {
        $(
            impl IsEmpty for $t {
                fn is_empty_value(&self) -> bool {
                    *self == 0
                }
            }
        )*
    };
}

impl_is_empty_int!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

impl IsEmpty for f32 {
    fn is_empty_value(&self) -> bool {
        *self == 0.0
    }
}

impl IsEmpty for f64 {
    fn is_empty_value(&self) -> bool {
        *self == 0.0
    }
}

impl<T> IsEmpty for Option<T> {
    fn is_empty_value(&self) -> bool {
        self.is_none()
    }
}

// Borrows are transparent; owning pointers are always present.
impl<T: IsEmpty + ?Sized> IsEmpty for &T {
    fn is_empty_value(&self) -> bool {
        (**self).is_empty_value()
    }
}

impl<T: ?Sized> IsEmpty for Box<T> {
    fn is_empty_value(&self) -> bool {
        false
    }
}

impl<T: ?Sized> IsEmpty for Arc<T> {
    fn is_empty_value(&self) -> bool {
        false
    }
}

impl<Tz: TimeZone> IsEmpty for DateTime<Tz> {
    fn is_empty_value(&self) -> bool {
        self.timestamp() == 0 && self.timestamp_subsec_nanos() == 0
    }
}

impl IsEmpty for NaiveDateTime {
    fn is_empty_value(&self) -> bool {
        *self == NaiveDateTime::default()
    }
}

impl IsEmpty for NaiveDate {
    fn is_empty_value(&self) -> bool {
        *self == NaiveDate::default()
    }
}

impl IsEmpty for uuid::Uuid {
    fn is_empty_value(&self) -> bool {
        self.is_nil()
    }
}

#[cfg(feature = "rust_decimal")]
impl IsEmpty for rust_decimal::Decimal {
    fn is_empty_value(&self) -> bool {
        self.is_zero()
    }
}

impl IsEmpty for serde_json::Value {
    fn is_empty_value(&self) -> bool {
        match self {
            serde_json::Value::Null => true,
            serde_json::Value::Bool(b) => !*b,
            serde_json::Value::Number(n) => n.as_f64() == Some(0.0),
            serde_json::Value::String(s) => s.is_empty(),
            serde_json::Value::Array(a) => a.is_empty(),
            serde_json::Value::Object(o) => o.is_empty(),
        }
    }
}

impl<T: Default + PartialEq> IsEmpty for Json<T> {
    fn is_empty_value(&self) -> bool {
        self.0 == T::default()
    }
}

//! Reusable search filters.
//!
//! A [`Strategy`] is a stored `try_*` call: build a list of them from
//! request parameters and apply it to any condition set or statement
//! builder.

use chrono::Datelike;

use super::ConditionSet;
use crate::empty::IsEmpty;
use crate::literal::Encode;

/// A deferred condition.
pub trait Strategy {
    fn apply(&self, conditions: &mut ConditionSet);
}

impl<F: Fn(&mut ConditionSet)> Strategy for F {
    fn apply(&self, conditions: &mut ConditionSet) {
        self(conditions)
    }
}

/// `try_equal(field, value)`
#[derive(Debug, Clone)]
pub struct TryEqual<T> {
    pub field: String,
    pub value: T,
}

impl<T> TryEqual<T> {
    pub fn new(field: impl Into<String>, value: T) -> Self {
        Self {
            field: field.into(),
            value,
        }
    }
}

impl<T: Encode + IsEmpty> Strategy for TryEqual<T> {
    fn apply(&self, conditions: &mut ConditionSet) {
        conditions.try_equal(&self.field, &self.value);
    }
}

/// `try_like(field, value)`
#[derive(Debug, Clone)]
pub struct TryLike {
    pub field: String,
    pub value: String,
}

impl TryLike {
    pub fn new(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            value: value.into(),
        }
    }
}

impl Strategy for TryLike {
    fn apply(&self, conditions: &mut ConditionSet) {
        conditions.try_like(&self.field, &self.value);
    }
}

/// `try_multi_like(fields, value)`
#[derive(Debug, Clone)]
pub struct TryMultiLike {
    pub fields: Vec<String>,
    pub value: String,
}

impl TryMultiLike {
    pub fn new<I, S>(fields: I, value: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            fields: fields.into_iter().map(Into::into).collect(),
            value: value.into(),
        }
    }
}

impl Strategy for TryMultiLike {
    fn apply(&self, conditions: &mut ConditionSet) {
        conditions.try_multi_like(&self.fields, &self.value);
    }
}

/// `try_in_list(field, values)`
#[derive(Debug, Clone)]
pub struct TryIn<T> {
    pub field: String,
    pub values: Vec<T>,
}

impl<T> TryIn<T> {
    pub fn new(field: impl Into<String>, values: impl IntoIterator<Item = T>) -> Self {
        Self {
            field: field.into(),
            values: values.into_iter().collect(),
        }
    }
}

impl<T: Encode> Strategy for TryIn<T> {
    fn apply(&self, conditions: &mut ConditionSet) {
        conditions.try_in_list(&self.field, &self.values);
    }
}

/// `try_time_range(field, start, end)`
#[derive(Debug, Clone)]
pub struct TryTimeRange<T> {
    pub field: String,
    pub start: Option<T>,
    pub end: Option<T>,
}

impl<T> TryTimeRange<T> {
    pub fn new(field: impl Into<String>, start: Option<T>, end: Option<T>) -> Self {
        Self {
            field: field.into(),
            start,
            end,
        }
    }
}

impl<T: Encode + IsEmpty> Strategy for TryTimeRange<T> {
    fn apply(&self, conditions: &mut ConditionSet) {
        conditions.try_time_range(&self.field, self.start.as_ref(), self.end.as_ref());
    }
}

/// `try_date_range(field, start, end)`
#[derive(Debug, Clone)]
pub struct TryDateRange<D> {
    pub field: String,
    pub start: Option<D>,
    pub end: Option<D>,
}

impl<D> TryDateRange<D> {
    pub fn new(field: impl Into<String>, start: Option<D>, end: Option<D>) -> Self {
        Self {
            field: field.into(),
            start,
            end,
        }
    }
}

impl<D: Datelike + Clone> Strategy for TryDateRange<D> {
    fn apply(&self, conditions: &mut ConditionSet) {
        conditions.try_date_range(&self.field, self.start.clone(), self.end.clone());
    }
}

use chrono::Datelike;

use crate::condition::strategy::Strategy;
use crate::condition::{AnyOperand, ConditionSet};
use crate::empty::IsEmpty;
use crate::error::SqlResult;
use crate::literal::Encode;

/// Base trait for SQL statement builders.
pub trait SqlBuilder {
    /// Statement keyword, used in log events.
    const KIND: &'static str;

    /// Assemble the statement text.
    fn build(&self) -> SqlResult<String>;

    /// Debug helper: the statement text, or empty text if it cannot be built.
    fn to_sql(&self) -> String {
        self.build().unwrap_or_default()
    }

    /// Validate builder state.
    fn validate(&self) -> SqlResult<()> {
        self.build().map(|_| ())
    }
}

/// Builders that carry a WHERE clause.
///
/// Every [`ConditionSet`] operation is forwarded so conditions chain
/// directly on the statement builder.
pub trait Filter {
    fn conditions(&self) -> &ConditionSet;

    fn conditions_mut(&mut self) -> &mut ConditionSet;

    fn and_where<I, S>(&mut self, fragments: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.conditions_mut().and_where(fragments);
        self
    }

    fn or<I, S>(&mut self, fragments: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.conditions_mut().or(fragments);
        self
    }

    fn equal<T: Encode>(&mut self, field: &str, value: T) -> &mut Self {
        self.conditions_mut().equal(field, value);
        self
    }

    fn try_equal<T: Encode + IsEmpty>(&mut self, field: &str, value: T) -> &mut Self {
        self.conditions_mut().try_equal(field, value);
        self
    }

    fn where_map<I, K, V>(&mut self, pairs: I) -> &mut Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Encode,
    {
        self.conditions_mut().where_map(pairs);
        self
    }

    fn try_map<I, K, V>(&mut self, pairs: I) -> &mut Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Encode + IsEmpty,
    {
        self.conditions_mut().try_map(pairs);
        self
    }

    fn like(&mut self, field: &str, value: &str) -> &mut Self {
        self.conditions_mut().like(field, value);
        self
    }

    fn try_like(&mut self, field: &str, value: &str) -> &mut Self {
        self.conditions_mut().try_like(field, value);
        self
    }

    fn multi_like<I, S>(&mut self, fields: I, value: &str) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.conditions_mut().multi_like(fields, value);
        self
    }

    fn try_multi_like<I, S>(&mut self, fields: I, value: &str) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.conditions_mut().try_multi_like(fields, value);
        self
    }

    fn between<A: Encode, B: Encode>(&mut self, field: &str, start: A, end: B) -> &mut Self {
        self.conditions_mut().between(field, start, end);
        self
    }

    fn in_list<I>(&mut self, field: &str, values: I) -> &mut Self
    where
        I: IntoIterator,
        I::Item: Encode,
    {
        self.conditions_mut().in_list(field, values);
        self
    }

    fn try_in_list<I>(&mut self, field: &str, values: I) -> &mut Self
    where
        I: IntoIterator,
        I::Item: Encode,
    {
        self.conditions_mut().try_in_list(field, values);
        self
    }

    fn not_in<I>(&mut self, field: &str, values: I) -> &mut Self
    where
        I: IntoIterator,
        I::Item: Encode,
    {
        self.conditions_mut().not_in(field, values);
        self
    }

    fn any<A: AnyOperand + ?Sized>(&mut self, field: &str, operand: &A) -> &mut Self {
        self.conditions_mut().any(field, operand);
        self
    }

    fn try_any<A: AnyOperand + ?Sized>(&mut self, field: &str, operand: &A) -> &mut Self {
        self.conditions_mut().try_any(field, operand);
        self
    }

    fn try_time_range<T: Encode + IsEmpty>(
        &mut self,
        field: &str,
        start: Option<T>,
        end: Option<T>,
    ) -> &mut Self {
        self.conditions_mut().try_time_range(field, start, end);
        self
    }

    fn try_date_range<D: Datelike>(
        &mut self,
        field: &str,
        start: Option<D>,
        end: Option<D>,
    ) -> &mut Self {
        self.conditions_mut().try_date_range(field, start, end);
        self
    }

    fn strategies(&mut self, strategies: &[&dyn Strategy]) -> &mut Self {
        self.conditions_mut().strategies(strategies);
        self
    }

    fn strategy_fns<I, F>(&mut self, funcs: I) -> &mut Self
    where
        I: IntoIterator<Item = F>,
        F: FnOnce(&mut ConditionSet),
    {
        self.conditions_mut().strategy_fns(funcs);
        self
    }
}

//! WHERE-clause composition.
//!
//! A [`ConditionSet`] accumulates self-parenthesized predicates that are
//! joined with `AND` on [`build`](ConditionSet::build). Operands are rendered
//! inline through the literal encoder; the `try_*` variants silently skip
//! empty operands so optional search filters can be chained without
//! branching.
//!
//! ```ignore
//! use sqlol::ConditionSet;
//!
//! let mut c = ConditionSet::new();
//! c.try_equal("status", 0)          // skipped: zero
//!     .equal("deleted_at", None::<i64>)
//!     .or(["a = 1", "b = 2"])
//!     .in_list("id", Vec::<i64>::new());
//!
//! assert_eq!(
//!     c.build()?,
//!     "(deleted_at IS NULL) AND ((a = 1) OR (b = 2)) AND (1=0)"
//! );
//! ```

pub mod strategy;

use chrono::{DateTime, Datelike, NaiveDate, NaiveTime, Utc};

use crate::empty::IsEmpty;
use crate::error::{SqlError, SqlResult};
use crate::literal::{Encode, Value, encode_list, quote};

use self::strategy::Strategy;

/// The unsatisfiable predicate used when an allow-list is empty.
const MATCH_NOTHING: &str = "1=0";

/// An accumulated list of AND-combined predicates.
///
/// Two states only: empty (initially and after [`clear`](Self::clear)) and
/// populated. Cloning deep-copies the accumulated fragments.
#[derive(Debug, Clone, Default)]
pub struct ConditionSet {
    wheres: Vec<String>,
    /// First encoding failure; reported by `build`
    build_error: Option<SqlError>,
}

impl ConditionSet {
    pub fn new() -> Self {
        Self::default()
    }

    // ==================== Raw fragments ====================

    /// Append each non-empty fragment, parenthesized.
    pub fn and_where<I, S>(&mut self, fragments: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for fragment in fragments {
            let fragment = fragment.as_ref();
            if !fragment.is_empty() {
                self.wheres.push(format!("({fragment})"));
            }
        }
        self
    }

    /// Parenthesize each non-empty fragment, join them with `OR` and append
    /// the group as a single AND-term.
    pub fn or<I, S>(&mut self, fragments: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let parts: Vec<String> = fragments
            .into_iter()
            .filter(|f| !f.as_ref().is_empty())
            .map(|f| format!("({})", f.as_ref()))
            .collect();
        if !parts.is_empty() {
            self.push(parts.join(" OR "));
        }
        self
    }

    // ==================== Equality ====================

    /// `field = <literal>`, or `field IS NULL` when the value is absent.
    pub fn equal<T: Encode>(&mut self, field: &str, value: T) -> &mut Self {
        if let Some(value) = self.encode_value(&value) {
            if value.is_null() {
                self.push(format!("{field} IS NULL"));
            } else {
                self.push(format!("{field} = {}", value.to_literal()));
            }
        }
        self
    }

    /// [`equal`](Self::equal) unless the value is empty.
    pub fn try_equal<T: Encode + IsEmpty>(&mut self, field: &str, value: T) -> &mut Self {
        if value.is_empty_value() {
            return self;
        }
        self.equal(field, value)
    }

    /// One [`equal`](Self::equal) per `(column, value)` pair.
    pub fn where_map<I, K, V>(&mut self, pairs: I) -> &mut Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Encode,
    {
        for (field, value) in pairs {
            self.equal(field.as_ref(), value);
        }
        self
    }

    /// One [`try_equal`](Self::try_equal) per `(column, value)` pair.
    pub fn try_map<I, K, V>(&mut self, pairs: I) -> &mut Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Encode + IsEmpty,
    {
        for (field, value) in pairs {
            self.try_equal(field.as_ref(), value);
        }
        self
    }

    // ==================== Pattern matching ====================

    /// `field LIKE '%value%'`.
    ///
    /// For a one-sided pattern write the fragment with
    /// [`and_where`](Self::and_where).
    pub fn like(&mut self, field: &str, value: &str) -> &mut Self {
        self.push(format!("{field} LIKE {}", contains_pattern(value)));
        self
    }

    /// [`like`](Self::like) on the trimmed value, skipped when blank.
    pub fn try_like(&mut self, field: &str, value: &str) -> &mut Self {
        let value = value.trim();
        if value.is_empty() {
            return self;
        }
        self.like(field, value)
    }

    /// `LIKE '%value%'` on every field, OR-combined.
    pub fn multi_like<I, S>(&mut self, fields: I, value: &str) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let pattern = contains_pattern(value);
        let parts: Vec<String> = fields
            .into_iter()
            .map(|field| format!("{} LIKE {pattern}", field.as_ref()))
            .collect();
        self.or(parts)
    }

    /// [`multi_like`](Self::multi_like) on the trimmed value, skipped when blank.
    pub fn try_multi_like<I, S>(&mut self, fields: I, value: &str) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let value = value.trim();
        if value.is_empty() {
            return self;
        }
        self.multi_like(fields, value)
    }

    // ==================== Ranges ====================

    /// `field BETWEEN <start> AND <end>`.
    pub fn between<A: Encode, B: Encode>(&mut self, field: &str, start: A, end: B) -> &mut Self {
        let (Some(start), Some(end)) = (self.encode_value(&start), self.encode_value(&end)) else {
            return self;
        };
        self.push(format!(
            "{field} BETWEEN {} AND {}",
            start.to_literal(),
            end.to_literal()
        ));
        self
    }

    /// Bounded, half-open or no condition depending on which bounds are
    /// present. A bound is present when it is `Some` and not the zero
    /// instant.
    pub fn try_time_range<T: Encode + IsEmpty>(
        &mut self,
        field: &str,
        start: Option<T>,
        end: Option<T>,
    ) -> &mut Self {
        let start = start.filter(|t| !t.is_empty_value());
        let end = end.filter(|t| !t.is_empty_value());
        match (start, end) {
            (Some(start), Some(end)) => self.between(field, start, end),
            (Some(start), None) => self.compare(field, ">=", &start),
            (None, Some(end)) => self.compare(field, "<=", &end),
            (None, None) => self,
        }
    }

    /// [`try_time_range`](Self::try_time_range) over whole days: the start
    /// date from `00:00:00`, the end date through `23:59:59` (UTC).
    pub fn try_date_range<D: Datelike>(
        &mut self,
        field: &str,
        start: Option<D>,
        end: Option<D>,
    ) -> &mut Self {
        let start = start.and_then(|d| day_at(&d, NaiveTime::MIN));
        let end = end.and_then(|d| day_at(&d, end_of_day()));
        self.try_time_range(field, start, end)
    }

    // ==================== Membership ====================

    /// `field IN (<list>)`; an empty list matches nothing (`1=0`).
    pub fn in_list<I>(&mut self, field: &str, values: I) -> &mut Self
    where
        I: IntoIterator,
        I::Item: Encode,
    {
        match self.encode_list(values) {
            Some(Some(list)) => self.push(format!("{field} IN ({list})")),
            Some(None) => self.push(MATCH_NOTHING.to_string()),
            None => {}
        }
        self
    }

    /// [`in_list`](Self::in_list), skipped when the list is empty.
    pub fn try_in_list<I>(&mut self, field: &str, values: I) -> &mut Self
    where
        I: IntoIterator,
        I::Item: Encode,
    {
        if let Some(Some(list)) = self.encode_list(values) {
            self.push(format!("{field} IN ({list})"));
        }
        self
    }

    /// `field NOT IN (<list>)`, skipped when the list is empty.
    pub fn not_in<I>(&mut self, field: &str, values: I) -> &mut Self
    where
        I: IntoIterator,
        I::Item: Encode,
    {
        if let Some(Some(list)) = self.encode_list(values) {
            self.push(format!("{field} NOT IN ({list})"));
        }
        self
    }

    /// `field = ANY(<operand>)`; an empty operand matches nothing (`1=0`).
    ///
    /// Text is emitted verbatim (a sub-query or array expression); a list
    /// becomes `ARRAY[...]`.
    pub fn any<A: AnyOperand + ?Sized>(&mut self, field: &str, operand: &A) -> &mut Self {
        match self.record(operand.any_operand()) {
            Some(Some(expr)) => self.push(format!("{field} = ANY({expr})")),
            Some(None) => self.push(MATCH_NOTHING.to_string()),
            None => {}
        }
        self
    }

    /// [`any`](Self::any), skipped when the operand is empty.
    pub fn try_any<A: AnyOperand + ?Sized>(&mut self, field: &str, operand: &A) -> &mut Self {
        if let Some(Some(expr)) = self.record(operand.any_operand()) {
            self.push(format!("{field} = ANY({expr})"));
        }
        self
    }

    // ==================== Strategies ====================

    /// Apply each strategy in order.
    pub fn strategies(&mut self, strategies: &[&dyn Strategy]) -> &mut Self {
        for strategy in strategies {
            strategy.apply(self);
        }
        self
    }

    /// Apply each closure in order.
    pub fn strategy_fns<I, F>(&mut self, funcs: I) -> &mut Self
    where
        I: IntoIterator<Item = F>,
        F: FnOnce(&mut ConditionSet),
    {
        for f in funcs {
            f(self);
        }
        self
    }

    // ==================== Output ====================

    /// Join the fragments with `AND`; empty text means "no filter".
    pub fn build(&self) -> SqlResult<String> {
        if let Some(err) = &self.build_error {
            return Err(err.clone());
        }
        Ok(self.wheres.join(" AND ").trim().to_string())
    }

    /// The joined fragments, ignoring any recorded error (debugging aid).
    pub fn to_sql(&self) -> String {
        self.wheres.join(" AND ").trim().to_string()
    }

    /// Back to the initial empty state.
    pub fn clear(&mut self) -> &mut Self {
        self.wheres.clear();
        self.build_error = None;
        self
    }

    pub fn is_empty(&self) -> bool {
        self.wheres.is_empty()
    }

    pub fn len(&self) -> usize {
        self.wheres.len()
    }

    pub fn fragments(&self) -> &[String] {
        &self.wheres
    }

    /// The first encoding failure, if any.
    pub fn build_error(&self) -> Option<&SqlError> {
        self.build_error.as_ref()
    }

    // ==================== Internals ====================

    fn push(&mut self, fragment: String) {
        self.and_where([fragment]);
    }

    fn compare<T: Encode>(&mut self, field: &str, op: &str, value: &T) -> &mut Self {
        if let Some(value) = self.encode_value(value) {
            self.push(format!("{field} {op} {}", value.to_literal()));
        }
        self
    }

    fn encode_value<T: Encode + ?Sized>(&mut self, value: &T) -> Option<Value> {
        self.record(value.to_value())
    }

    fn encode_list<I>(&mut self, values: I) -> Option<Option<String>>
    where
        I: IntoIterator,
        I::Item: Encode,
    {
        self.record(encode_list(values))
    }

    /// Keep the first failure; `None` means the condition is dropped.
    fn record<T>(&mut self, result: SqlResult<T>) -> Option<T> {
        match result {
            Ok(v) => Some(v),
            Err(err) => {
                crate::sql_warn!(error = %err, "condition dropped: operand failed to encode");
                if self.build_error.is_none() {
                    self.build_error = Some(err);
                }
                None
            }
        }
    }
}

fn contains_pattern(value: &str) -> String {
    quote(&format!("%{value}%"))
}

fn end_of_day() -> NaiveTime {
    NaiveTime::from_hms_opt(23, 59, 59).unwrap_or(NaiveTime::MIN)
}

fn day_at<D: Datelike>(date: &D, time: NaiveTime) -> Option<DateTime<Utc>> {
    NaiveDate::from_ymd_opt(date.year(), date.month(), date.day()).map(|d| d.and_time(time).and_utc())
}

/// Right-hand operands accepted by [`ConditionSet::any`].
pub trait AnyOperand {
    /// The expression inside `ANY(...)`; `None` when the operand is empty.
    fn any_operand(&self) -> SqlResult<Option<String>>;
}

impl AnyOperand for str {
    fn any_operand(&self) -> SqlResult<Option<String>> {
        if self.is_empty() {
            return Ok(None);
        }
        Ok(Some(self.to_string()))
    }
}

impl AnyOperand for String {
    fn any_operand(&self) -> SqlResult<Option<String>> {
        self.as_str().any_operand()
    }
}

impl<T: Encode> AnyOperand for [T] {
    fn any_operand(&self) -> SqlResult<Option<String>> {
        Ok(encode_list(self)?.map(|list| format!("ARRAY[{list}]")))
    }
}

impl<T: Encode> AnyOperand for Vec<T> {
    fn any_operand(&self) -> SqlResult<Option<String>> {
        self.as_slice().any_operand()
    }
}

impl<T: Encode, const N: usize> AnyOperand for [T; N] {
    fn any_operand(&self) -> SqlResult<Option<String>> {
        self.as_slice().any_operand()
    }
}

impl<A: AnyOperand + ?Sized> AnyOperand for &A {
    fn any_operand(&self) -> SqlResult<Option<String>> {
        (**self).any_operand()
    }
}

/// An operand usable by both equality and its `try_` form.
///
/// Object safe, so maps of mixed value types can be passed to
/// [`ConditionSet::try_map`] as `&dyn Operand`.
pub trait Operand: Encode + IsEmpty {}

impl<T: Encode + IsEmpty + ?Sized> Operand for T {}

use std::fmt;
use std::sync::Arc;

use super::config::BuilderConfig;
use super::traits::{Filter, SqlBuilder};
use super::{
    join_clauses, limit_clause, list_clause, log_statement, push_all, require_table, table_name,
    where_clause,
};
use crate::condition::ConditionSet;
use crate::empty::IsEmpty;
use crate::error::{SqlError, SqlResult};
use crate::literal::Encode;
use crate::record::{ColumnSpec, Record, columns_of, encode_tuple};

/// UPDATE statement builder.
///
/// Assignments come from raw fragments, per-column values and/or one
/// record written as `(cols) = (values)`. At least one is required.
#[derive(Clone)]
pub struct UpdateBuilder<'a> {
    table: String,
    alias: Option<String>,
    updates: Vec<String>,
    record: Option<(&'a dyn Record, Arc<ColumnSpec>)>,
    cols: Vec<String>,
    conditions: ConditionSet,
    order_by: Vec<String>,
    limit: Option<u64>,
    returning: Vec<String>,
    config: BuilderConfig,
    /// First encoding failure of a `set*` call
    build_error: Option<SqlError>,
}

impl<'a> UpdateBuilder<'a> {
    /// Create a new builder for a table.
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            alias: None,
            updates: Vec::new(),
            record: None,
            cols: Vec::new(),
            conditions: ConditionSet::new(),
            order_by: Vec::new(),
            limit: None,
            returning: Vec::new(),
            config: BuilderConfig::default(),
            build_error: None,
        }
    }

    /// Replace the builder configuration.
    pub fn config(&mut self, config: BuilderConfig) -> &mut Self {
        self.config = config;
        self
    }

    /// `UPDATE table AS alias`.
    pub fn alias(&mut self, alias: impl Into<String>) -> &mut Self {
        self.alias = Some(alias.into());
        self
    }

    /// Append raw assignment fragments (`"count = count + 1"`).
    pub fn set_raw<I, S>(&mut self, fragments: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        push_all(&mut self.updates, fragments);
        self
    }

    /// `col = <literal>`.
    pub fn set<T: Encode>(&mut self, col: &str, value: T) -> &mut Self {
        match value.to_value() {
            Ok(value) => self.updates.push(format!("{col} = {}", value.to_literal())),
            Err(err) => {
                if self.build_error.is_none() {
                    self.build_error = Some(err);
                }
            }
        }
        self
    }

    /// [`set`](Self::set) unless the value is empty.
    pub fn try_set<T: Encode + IsEmpty>(&mut self, col: &str, value: T) -> &mut Self {
        if value.is_empty_value() {
            return self;
        }
        self.set(col, value)
    }

    /// One [`set`](Self::set) per `(column, value)` pair.
    pub fn set_map<I, K, V>(&mut self, pairs: I) -> &mut Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Encode,
    {
        for (col, value) in pairs {
            self.set(col.as_ref(), value);
        }
        self
    }

    /// Assign a whole record as `(cols) = (values)`.
    ///
    /// Columns come from [`cols`](Self::cols) when given, otherwise from the
    /// record's column spec minus [`BuilderConfig::update_exclude`].
    pub fn set_record<R: Record + 'static>(&mut self, record: &'a R) -> &mut Self {
        self.record = Some((record as &dyn Record, columns_of::<R>()));
        self
    }

    /// Restrict the record assignment to these record columns.
    pub fn cols<I, S>(&mut self, cols: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        push_all(&mut self.cols, cols);
        self
    }

    /// Append ORDER BY expressions.
    pub fn order_by<I, S>(&mut self, exprs: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        push_all(&mut self.order_by, exprs);
        self
    }

    /// Set LIMIT; zero means no limit.
    pub fn limit(&mut self, limit: u64) -> &mut Self {
        self.limit = Some(limit);
        self
    }

    /// Append RETURNING columns.
    pub fn returning<I, S>(&mut self, cols: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        push_all(&mut self.returning, cols);
        self
    }

    fn record_assignment(&self) -> SqlResult<Option<String>> {
        let Some((record, spec)) = &self.record else {
            return Ok(None);
        };
        let pairs = if self.cols.is_empty() {
            self.config
                .column_pairs(spec.names(), &self.config.update_exclude)
        } else {
            self.config.column_pairs(&self.cols, &[])
        };
        if pairs.is_empty() {
            return Err(SqlError::validation("UPDATE record has no columns to set"));
        }
        let (record_cols, sql_cols): (Vec<String>, Vec<String>) = pairs.into_iter().unzip();
        Ok(Some(format!(
            "({}) = {}",
            sql_cols.join(","),
            encode_tuple(*record, &record_cols)?
        )))
    }
}

impl fmt::Debug for UpdateBuilder<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UpdateBuilder")
            .field("table", &self.table)
            .field("alias", &self.alias)
            .field("updates", &self.updates)
            .field("record", &self.record.as_ref().map(|(r, _)| r.record_name()))
            .field("conditions", &self.conditions)
            .field("returning", &self.returning)
            .finish()
    }
}

impl Filter for UpdateBuilder<'_> {
    fn conditions(&self) -> &ConditionSet {
        &self.conditions
    }

    fn conditions_mut(&mut self) -> &mut ConditionSet {
        &mut self.conditions
    }
}

impl SqlBuilder for UpdateBuilder<'_> {
    const KIND: &'static str = "UPDATE";

    fn build(&self) -> SqlResult<String> {
        require_table(&self.table)?;
        if let Some(err) = &self.build_error {
            return Err(err.clone());
        }

        let mut assignments = Vec::new();
        if let Some(record) = self.record_assignment()? {
            assignments.push(record);
        }
        assignments.extend(self.updates.iter().cloned());
        if assignments.is_empty() {
            return Err(SqlError::validation("UPDATE requires at least one SET"));
        }

        let sql = join_clauses([
            "UPDATE".to_string(),
            table_name(&self.table, self.alias.as_deref()),
            "SET".to_string(),
            assignments.join(","),
            where_clause(&self.conditions)?,
            list_clause("ORDER BY", &self.order_by),
            limit_clause(self.limit, None),
            list_clause("RETURNING", &self.returning),
        ]);
        log_statement(Self::KIND, &sql);
        Ok(sql)
    }
}

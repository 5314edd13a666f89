use std::fmt;
use std::sync::Arc;

use super::config::BuilderConfig;
use super::traits::SqlBuilder;
use super::{join_clauses, list_clause, log_statement, push_all, require_table, table_name};
use crate::error::{SqlError, SqlResult};
use crate::record::{ColumnSpec, Record, columns_of, encode_tuple};

/// INSERT statement builder over a slice of records.
///
/// The column list comes from [`cols`](Self::cols) when given, otherwise
/// from the record type's column spec minus
/// [`BuilderConfig::insert_exclude`].
#[derive(Clone)]
pub struct InsertBuilder<'a> {
    table: String,
    alias: Option<String>,
    cols: Vec<String>,
    spec: Option<Arc<ColumnSpec>>,
    rows: Vec<&'a dyn Record>,
    on_conflict: Option<String>,
    returning: Vec<String>,
    config: BuilderConfig,
}

impl<'a> InsertBuilder<'a> {
    /// Create a new builder for a table.
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            alias: None,
            cols: Vec::new(),
            spec: None,
            rows: Vec::new(),
            on_conflict: None,
            returning: Vec::new(),
            config: BuilderConfig::default(),
        }
    }

    /// Replace the builder configuration.
    pub fn config(&mut self, config: BuilderConfig) -> &mut Self {
        self.config = config;
        self
    }

    /// `INSERT INTO table AS alias`.
    pub fn alias(&mut self, alias: impl Into<String>) -> &mut Self {
        self.alias = Some(alias.into());
        self
    }

    /// Rows to insert; replaces any previous rows.
    pub fn values<R: Record + 'static>(&mut self, rows: &'a [R]) -> &mut Self {
        self.spec = Some(columns_of::<R>());
        self.rows = rows.iter().map(|r| r as &dyn Record).collect();
        self
    }

    /// Explicit record columns to insert (no exclusion applied).
    pub fn cols<I, S>(&mut self, cols: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        push_all(&mut self.cols, cols);
        self
    }

    /// `ON CONFLICT [(target)] DO action`.
    pub fn on_conflict(&mut self, target: &str, action: &str) -> &mut Self {
        self.on_conflict = Some(if target.is_empty() {
            format!("ON CONFLICT DO {action}")
        } else {
            format!("ON CONFLICT ({target}) DO {action}")
        });
        self
    }

    /// `ON CONFLICT DO NOTHING`.
    pub fn on_conflict_do_nothing(&mut self) -> &mut Self {
        self.on_conflict("", "NOTHING")
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

    /// `(record column, sql column)` pairs for this statement.
    fn column_pairs(&self) -> Vec<(String, String)> {
        if !self.cols.is_empty() {
            return self.config.column_pairs(&self.cols, &[]);
        }
        match &self.spec {
            Some(spec) => self
                .config
                .column_pairs(spec.names(), &self.config.insert_exclude),
            None => Vec::new(),
        }
    }
}

impl fmt::Debug for InsertBuilder<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InsertBuilder")
            .field("table", &self.table)
            .field("alias", &self.alias)
            .field("cols", &self.cols)
            .field("rows", &self.rows.len())
            .field("on_conflict", &self.on_conflict)
            .field("returning", &self.returning)
            .finish()
    }
}

impl SqlBuilder for InsertBuilder<'_> {
    const KIND: &'static str = "INSERT";

    fn build(&self) -> SqlResult<String> {
        require_table(&self.table)?;
        if self.rows.is_empty() {
            return Err(SqlError::validation("INSERT requires at least one row"));
        }
        let pairs = self.column_pairs();
        if pairs.is_empty() {
            return Err(SqlError::validation("INSERT requires at least one column"));
        }

        let (record_cols, sql_cols): (Vec<String>, Vec<String>) = pairs.into_iter().unzip();
        let mut tuples = Vec::with_capacity(self.rows.len());
        for row in &self.rows {
            tuples.push(encode_tuple(*row, &record_cols)?);
        }

        let sql = join_clauses([
            format!(
                "INSERT INTO {}({})",
                table_name(&self.table, self.alias.as_deref()),
                sql_cols.join(",")
            ),
            "VALUES".to_string(),
            tuples.join(","),
            self.on_conflict.clone().unwrap_or_default(),
            list_clause("RETURNING", &self.returning),
        ]);
        log_statement(Self::KIND, &sql);
        Ok(sql)
    }
}

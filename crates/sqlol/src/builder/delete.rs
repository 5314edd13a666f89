use super::traits::{Filter, SqlBuilder};
use super::{
    join_clauses, limit_clause, list_clause, log_statement, push_all, require_table, table_name,
    where_clause,
};
use crate::condition::ConditionSet;
use crate::error::{SqlError, SqlResult};

/// DELETE statement builder.
///
/// Refuses to build without a WHERE condition; use an explicit
/// `and_where(["true"])` to delete every row.
#[derive(Debug, Clone, Default)]
pub struct DeleteBuilder {
    table: String,
    alias: Option<String>,
    conditions: ConditionSet,
    order_by: Vec<String>,
    limit: Option<u64>,
    returning: Vec<String>,
}

impl DeleteBuilder {
    /// Create a new builder for a table.
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            ..Self::default()
        }
    }

    /// `DELETE FROM table AS alias`.
    pub fn alias(&mut self, alias: impl Into<String>) -> &mut Self {
        self.alias = Some(alias.into());
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
}

impl Filter for DeleteBuilder {
    fn conditions(&self) -> &ConditionSet {
        &self.conditions
    }

    fn conditions_mut(&mut self) -> &mut ConditionSet {
        &mut self.conditions
    }
}

impl SqlBuilder for DeleteBuilder {
    const KIND: &'static str = "DELETE";

    fn build(&self) -> SqlResult<String> {
        require_table(&self.table)?;
        let where_sql = where_clause(&self.conditions)?;
        if where_sql.is_empty() {
            return Err(SqlError::validation(
                "DELETE requires a WHERE condition",
            ));
        }

        let sql = join_clauses([
            "DELETE FROM".to_string(),
            table_name(&self.table, self.alias.as_deref()),
            where_sql,
            list_clause("ORDER BY", &self.order_by),
            limit_clause(self.limit, None),
            list_clause("RETURNING", &self.returning),
        ]);
        log_statement(Self::KIND, &sql);
        Ok(sql)
    }
}

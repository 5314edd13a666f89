use super::traits::{Filter, SqlBuilder};
use super::{
    join_clauses, limit_clause, list_clause, log_statement, push_all, require_table, table_name,
    where_clause,
};
use crate::condition::ConditionSet;
use crate::error::SqlResult;

/// SELECT statement builder.
#[derive(Debug, Clone, Default)]
pub struct SelectBuilder {
    /// Table name, or a parenthesized sub-query
    table: String,
    alias: Option<String>,
    /// Select list (default `*`)
    fields: Vec<String>,
    joins: Vec<String>,
    conditions: ConditionSet,
    group_by: Vec<String>,
    having: Option<String>,
    order_by: Vec<String>,
    limit: Option<u64>,
    offset: Option<u64>,
    for_update: bool,
}

impl SelectBuilder {
    /// Create a new builder for a table.
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            ..Self::default()
        }
    }

    /// Select from a sub-query: `SELECT ... FROM (<sql>)`.
    ///
    /// Postgres requires an alias for the sub-query; see [`alias`](Self::alias).
    pub fn from_subquery(sql: &str) -> Self {
        Self::new(format!("({sql})"))
    }

    /// `FROM table AS alias`.
    pub fn alias(&mut self, alias: impl Into<String>) -> &mut Self {
        self.alias = Some(alias.into());
        self
    }

    /// Append select-list expressions.
    pub fn fields<I, S>(&mut self, fields: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        push_all(&mut self.fields, fields);
        self
    }

    /// `<kind> JOIN table AS alias ON on`.
    pub fn join(&mut self, kind: &str, table: &str, alias: &str, on: &str) -> &mut Self {
        self.joins
            .push(format!("{kind} JOIN {table} AS {alias} ON {on}"));
        self
    }

    /// Add INNER JOIN.
    pub fn inner_join(&mut self, table: &str, alias: &str, on: &str) -> &mut Self {
        self.join("INNER", table, alias, on)
    }

    /// Add LEFT JOIN.
    pub fn left_join(&mut self, table: &str, alias: &str, on: &str) -> &mut Self {
        self.join("LEFT", table, alias, on)
    }

    /// Add RIGHT JOIN.
    pub fn right_join(&mut self, table: &str, alias: &str, on: &str) -> &mut Self {
        self.join("RIGHT", table, alias, on)
    }

    /// Append GROUP BY expressions.
    pub fn group_by<I, S>(&mut self, exprs: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        push_all(&mut self.group_by, exprs);
        self
    }

    /// Set the HAVING condition.
    pub fn having(&mut self, condition: impl Into<String>) -> &mut Self {
        self.having = Some(condition.into());
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

    /// Set OFFSET (only emitted together with a limit).
    pub fn offset(&mut self, offset: u64) -> &mut Self {
        self.offset = Some(offset);
        self
    }

    /// Append `FOR UPDATE`.
    pub fn for_update(&mut self) -> &mut Self {
        self.for_update = true;
        self
    }

    /// Count the rows the query would return.
    ///
    /// Without GROUP BY this is `COUNT(1)`; a single plain grouping column
    /// without HAVING becomes `COUNT(DISTINCT col)`; anything else counts
    /// the grouped query as a sub-query.
    pub fn build_count(&self) -> SqlResult<String> {
        require_table(&self.table)?;
        let table = self.table_name();
        let joins = self.joins.join(" ");
        let where_sql = where_clause(&self.conditions)?;

        let sql = match self.group_by.as_slice() {
            [] => join_clauses([
                "SELECT COUNT(1) FROM",
                table.as_str(),
                joins.as_str(),
                where_sql.as_str(),
            ]),
            [group] if self.having.is_none() && !group.contains(',') => {
                let count = format!("SELECT COUNT(DISTINCT {group}) FROM");
                join_clauses([
                    count.as_str(),
                    table.as_str(),
                    joins.as_str(),
                    where_sql.as_str(),
                ])
            }
            _ => {
                let sub = join_clauses([
                    self.select_list(),
                    "FROM".to_string(),
                    table,
                    joins,
                    where_sql,
                    list_clause("GROUP BY", &self.group_by),
                    self.having_clause(),
                ]);
                format!("SELECT count(1) FROM ({sub}) AS T")
            }
        };
        log_statement("SELECT", &sql);
        Ok(sql)
    }

    fn table_name(&self) -> String {
        table_name(&self.table, self.alias.as_deref())
    }

    fn select_list(&self) -> String {
        if self.fields.is_empty() {
            return "SELECT *".to_string();
        }
        format!("SELECT {}", self.fields.join(","))
    }

    fn having_clause(&self) -> String {
        match &self.having {
            Some(having) if !having.is_empty() => format!("HAVING {having}"),
            _ => String::new(),
        }
    }
}

impl Filter for SelectBuilder {
    fn conditions(&self) -> &ConditionSet {
        &self.conditions
    }

    fn conditions_mut(&mut self) -> &mut ConditionSet {
        &mut self.conditions
    }
}

impl SqlBuilder for SelectBuilder {
    const KIND: &'static str = "SELECT";

    fn build(&self) -> SqlResult<String> {
        require_table(&self.table)?;
        let sql = join_clauses([
            self.select_list(),
            "FROM".to_string(),
            self.table_name(),
            self.joins.join(" "),
            where_clause(&self.conditions)?,
            list_clause("GROUP BY", &self.group_by),
            self.having_clause(),
            list_clause("ORDER BY", &self.order_by),
            limit_clause(self.limit, self.offset),
            if self.for_update { "FOR UPDATE".to_string() } else { String::new() },
        ]);
        log_statement(Self::KIND, &sql);
        Ok(sql)
    }
}

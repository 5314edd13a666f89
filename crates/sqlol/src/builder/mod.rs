//! Statement builders.
//!
//! Thin assemblers that place literal-encoded values, record tuples and a
//! [`ConditionSet`](crate::ConditionSet) into SELECT / INSERT / UPDATE /
//! DELETE text. Each builder is `Clone` with deep-copied state, and each
//! `build()` returns the statement or the first misuse it found.
//!
//! ```ignore
//! use sqlol::prelude::*;
//!
//! let mut q = DeleteBuilder::new("sessions");
//! q.try_equal("user_id", 7).returning(["id"]);
//! assert_eq!(q.build()?, "DELETE FROM sessions WHERE (user_id = 7) RETURNING id");
//! ```

mod config;
mod delete;
mod insert;
mod select;
mod traits;
mod update;

pub use config::{BuilderConfig, Naming};
pub use delete::DeleteBuilder;
pub use insert::InsertBuilder;
pub use select::SelectBuilder;
pub use traits::{Filter, SqlBuilder};
pub use update::UpdateBuilder;

use crate::condition::ConditionSet;
use crate::error::{SqlError, SqlResult};

/// Join the non-empty clauses with single spaces.
fn join_clauses<I, S>(clauses: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out = String::new();
    for clause in clauses {
        let clause = clause.as_ref();
        if clause.is_empty() {
            continue;
        }
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(clause);
    }
    out
}

fn require_table(table: &str) -> SqlResult<()> {
    if table.trim().is_empty() {
        return Err(SqlError::validation("table is required"));
    }
    Ok(())
}

fn table_name(table: &str, alias: Option<&str>) -> String {
    match alias {
        Some(alias) => format!("{table} AS {alias}"),
        None => table.to_string(),
    }
}

fn where_clause(conditions: &ConditionSet) -> SqlResult<String> {
    let condition = conditions.build()?;
    if condition.is_empty() {
        return Ok(String::new());
    }
    Ok(format!("WHERE {condition}"))
}

fn list_clause(keyword: &str, items: &[String]) -> String {
    if items.is_empty() {
        return String::new();
    }
    format!("{keyword} {}", items.join(","))
}

/// `LIMIT n [OFFSET m]`; an offset is only emitted together with a limit.
fn limit_clause(limit: Option<u64>, offset: Option<u64>) -> String {
    match (limit, offset) {
        (Some(limit), Some(offset)) if limit > 0 && offset > 0 => {
            format!("LIMIT {limit} OFFSET {offset}")
        }
        (Some(limit), _) if limit > 0 => format!("LIMIT {limit}"),
        _ => String::new(),
    }
}

fn push_all<I, S>(target: &mut Vec<String>, items: I)
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    target.extend(items.into_iter().map(Into::into));
}

#[cfg_attr(not(feature = "tracing"), allow(unused_variables))]
fn log_statement(kind: &'static str, sql: &str) {
    crate::sql_debug!(kind, sql, "statement built");
}

#[cfg(test)]
mod tests;

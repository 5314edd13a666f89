use super::*;
use crate::condition::strategy::{TryEqual, TryLike};
use crate::literal::Json;
use crate::record::{ColumnSpec, FieldRef, Record};
use chrono::{DateTime, TimeZone, Utc};

struct User {
    id: i64,
    user_name: String,
    email: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: Option<DateTime<Utc>>,
}

impl Record for User {
    fn column_spec() -> ColumnSpec {
        ["id", "user_name", "email", "created_at", "updated_at"]
            .into_iter()
            .collect()
    }

    fn field(&self, name: &str) -> Option<FieldRef<'_>> {
        match name {
            "id" => Some(FieldRef::Value(&self.id)),
            "user_name" => Some(FieldRef::Value(&self.user_name)),
            "email" => Some(FieldRef::Value(&self.email)),
            "created_at" => Some(FieldRef::Value(&self.created_at)),
            "updated_at" => Some(FieldRef::Value(&self.updated_at)),
            _ => None,
        }
    }

    fn record_name(&self) -> &'static str {
        "User"
    }
}

fn users() -> Vec<User> {
    let created = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    vec![
        User {
            id: 1,
            user_name: "amy".to_string(),
            email: Some("a@x.io".to_string()),
            created_at: created,
            updated_at: None,
        },
        User {
            id: 2,
            user_name: "bob".to_string(),
            email: None,
            created_at: created,
            updated_at: None,
        },
    ]
}

// ==================== SELECT ====================

#[test]
fn test_select_defaults_to_star() {
    let q = SelectBuilder::new("users");
    assert_eq!(q.build().unwrap(), "SELECT * FROM users");
}

#[test]
fn test_select_all_clauses() {
    let mut q = SelectBuilder::new("users");
    q.alias("u")
        .fields(["u.id", "count(*)"])
        .left_join("orders", "o", "o.user_id = u.id")
        .equal("u.status", 1)
        .group_by(["u.id"])
        .having("count(*) > 1")
        .order_by(["u.id DESC"])
        .limit(10)
        .offset(20)
        .for_update();
    assert_eq!(
        q.build().unwrap(),
        "SELECT u.id,count(*) FROM users AS u LEFT JOIN orders AS o ON o.user_id = u.id \
         WHERE (u.status = 1) GROUP BY u.id HAVING count(*) > 1 ORDER BY u.id DESC \
         LIMIT 10 OFFSET 20 FOR UPDATE"
    );
}

#[test]
fn test_offset_needs_limit() {
    let mut q = SelectBuilder::new("users");
    q.offset(5);
    assert_eq!(q.build().unwrap(), "SELECT * FROM users");
    q.limit(0);
    assert_eq!(q.build().unwrap(), "SELECT * FROM users");
}

#[test]
fn test_select_from_subquery() {
    let mut q = SelectBuilder::from_subquery("SELECT id FROM users");
    q.alias("t").try_equal("id", 3);
    assert_eq!(
        q.build().unwrap(),
        "SELECT * FROM (SELECT id FROM users) AS t WHERE (id = 3)"
    );
}

#[test]
fn test_build_count_forms() {
    let mut q = SelectBuilder::new("users");
    q.equal("status", 1).order_by(["id"]).limit(10);
    assert_eq!(
        q.build_count().unwrap(),
        "SELECT COUNT(1) FROM users WHERE (status = 1)"
    );

    q.group_by(["dept"]);
    assert_eq!(
        q.build_count().unwrap(),
        "SELECT COUNT(DISTINCT dept) FROM users WHERE (status = 1)"
    );

    q.having("count(*) > 1");
    assert_eq!(
        q.build_count().unwrap(),
        "SELECT count(1) FROM (SELECT * FROM users WHERE (status = 1) GROUP BY dept \
         HAVING count(*) > 1) AS T"
    );
}

#[test]
fn test_build_count_with_compound_group() {
    let mut q = SelectBuilder::new("users");
    q.fields(["dept", "role"]).group_by(["dept, role"]);
    assert_eq!(
        q.build_count().unwrap(),
        "SELECT count(1) FROM (SELECT dept,role FROM users GROUP BY dept, role) AS T"
    );
}

#[test]
fn test_missing_table_is_rejected() {
    let q = SelectBuilder::new("");
    assert!(matches!(q.build(), Err(SqlError::Validation(_))));
    assert!(q.build_count().is_err());
    assert_eq!(q.to_sql(), "");
}

#[test]
fn test_condition_errors_surface_on_build() {
    use std::collections::BTreeMap;

    let mut bad = BTreeMap::new();
    bad.insert(vec![1_u8], 1);
    let mut q = SelectBuilder::new("users");
    q.equal("meta", Json(bad));
    assert!(matches!(q.build(), Err(SqlError::Serialization(_))));
    assert!(q.validate().is_err());
}

#[test]
fn test_builder_clone_is_independent() {
    let mut base = SelectBuilder::new("users");
    base.equal("tenant", 7);
    let mut page = base.clone();
    page.try_like("name", "al").limit(5);
    assert_eq!(base.build().unwrap(), "SELECT * FROM users WHERE (tenant = 7)");
    assert_eq!(
        page.build().unwrap(),
        "SELECT * FROM users WHERE (tenant = 7) AND (name LIKE '%al%') LIMIT 5"
    );
}

#[test]
fn test_strategies_on_builder() {
    let mut q = SelectBuilder::new("users");
    q.strategies(&[&TryEqual::new("status", 0), &TryLike::new("name", "bo")]);
    assert_eq!(
        q.build().unwrap(),
        "SELECT * FROM users WHERE (name LIKE '%bo%')"
    );
    assert_eq!(q.conditions().len(), 1);
}

// ==================== INSERT ====================

#[test]
fn test_insert_records_with_default_exclusions() {
    let rows = users();
    let mut q = InsertBuilder::new("users");
    q.values(&rows)
        .on_conflict("user_name", "NOTHING")
        .returning(["id"]);
    assert_eq!(
        q.build().unwrap(),
        "INSERT INTO users(user_name,email,created_at) VALUES \
         ('amy','a@x.io','2024-01-01T00:00:00Z'),('bob',NULL,'2024-01-01T00:00:00Z') \
         ON CONFLICT (user_name) DO NOTHING RETURNING id"
    );
}

#[test]
fn test_insert_explicit_cols() {
    let rows = users();
    let mut q = InsertBuilder::new("users");
    q.values(&rows[..1]).cols(["id", "user_name"]).on_conflict_do_nothing();
    assert_eq!(
        q.build().unwrap(),
        "INSERT INTO users(id,user_name) VALUES (1,'amy') ON CONFLICT DO NOTHING"
    );
}

#[test]
fn test_insert_custom_exclusions() {
    let rows = users();
    let mut q = InsertBuilder::new("users");
    q.config(BuilderConfig::new().with_insert_exclude(["email", "created_at", "updated_at"]))
        .values(&rows[1..]);
    assert_eq!(
        q.build().unwrap(),
        "INSERT INTO users(id,user_name) VALUES (2,'bob')"
    );
}

#[test]
fn test_insert_requires_rows_and_columns() {
    let q = InsertBuilder::new("users");
    assert!(matches!(q.build(), Err(SqlError::Validation(_))));

    let rows = users();
    let mut q = InsertBuilder::new("users");
    q.values(&rows).config(
        BuilderConfig::new()
            .with_insert_exclude(["id", "user_name", "email", "created_at", "updated_at"]),
    );
    assert!(matches!(q.build(), Err(SqlError::Validation(_))));
}

#[test]
fn test_insert_unknown_column() {
    let rows = users();
    let mut q = InsertBuilder::new("users");
    q.values(&rows).cols(["nickname"]);
    let err = q.build().unwrap_err();
    assert_eq!(err, SqlError::unknown_field("nickname", "User"));
}

// ==================== UPDATE ====================

#[test]
fn test_update_set_values() {
    let mut q = UpdateBuilder::new("users");
    q.set("user_name", "o'neil")
        .try_set("email", "")
        .set_raw(["login_count = login_count + 1"])
        .equal("id", 1)
        .returning(["id", "user_name"]);
    assert_eq!(
        q.build().unwrap(),
        "UPDATE users SET user_name = 'o''neil',login_count = login_count + 1 \
         WHERE (id = 1) RETURNING id,user_name"
    );
}

#[test]
fn test_update_set_map_and_limit() {
    let mut q = UpdateBuilder::new("jobs");
    q.set_map([("state", "done")])
        .equal("state", "running")
        .order_by(["id"])
        .limit(100);
    assert_eq!(
        q.build().unwrap(),
        "UPDATE jobs SET state = 'done' WHERE (state = 'running') ORDER BY id LIMIT 100"
    );
}

#[test]
fn test_update_record_assignment() {
    let rows = users();
    let mut q = UpdateBuilder::new("users");
    q.set_record(&rows[0]).equal("id", 1);
    assert_eq!(
        q.build().unwrap(),
        "UPDATE users SET (id,user_name,email,updated_at) = (1,'amy','a@x.io',NULL) \
         WHERE (id = 1)"
    );

    let mut q = UpdateBuilder::new("users");
    q.set_record(&rows[1]).cols(["email"]).equal("id", 2);
    assert_eq!(
        q.build().unwrap(),
        "UPDATE users SET (email) = (NULL) WHERE (id = 2)"
    );
}

#[test]
fn test_update_requires_set() {
    let mut q = UpdateBuilder::new("users");
    q.equal("id", 1).try_set("email", None::<String>);
    assert!(matches!(q.build(), Err(SqlError::Validation(_))));
}

// ==================== DELETE ====================

#[test]
fn test_delete_requires_where() {
    let mut q = DeleteBuilder::new("sessions");
    assert!(matches!(q.build(), Err(SqlError::Validation(_))));
    q.try_equal("user_id", 0);
    assert!(q.build().is_err());
}

#[test]
fn test_delete_with_where() {
    let mut q = DeleteBuilder::new("sessions");
    q.in_list("id", [1, 2])
        .order_by(["id"])
        .limit(10)
        .returning(["id"]);
    assert_eq!(
        q.build().unwrap(),
        "DELETE FROM sessions WHERE (id IN (1,2)) ORDER BY id LIMIT 10 RETURNING id"
    );
}

// ==================== Helpers ====================

#[test]
fn test_join_clauses_skips_empty() {
    assert_eq!(join_clauses(["a", "", "b", ""]), "a b");
    assert_eq!(join_clauses(Vec::<String>::new()), "");
}

#[test]
fn test_limit_clause() {
    assert_eq!(limit_clause(Some(5), Some(10)), "LIMIT 5 OFFSET 10");
    assert_eq!(limit_clause(Some(5), Some(0)), "LIMIT 5");
    assert_eq!(limit_clause(None, Some(10)), "");
}

use super::*;
use chrono::{FixedOffset, TimeZone, Utc};
use serde::Serialize;
use std::collections::BTreeMap;

#[test]
fn test_primitives() {
    assert_eq!(encode(&42).unwrap(), "42");
    assert_eq!(encode(&-7i8).unwrap(), "-7");
    assert_eq!(encode(&u64::MAX).unwrap(), "18446744073709551615");
    assert_eq!(encode(&true).unwrap(), "true");
    assert_eq!(encode(&false).unwrap(), "false");
    assert_eq!(encode(&1.5f64).unwrap(), "1.5");
    assert_eq!(encode(&0.1f32).unwrap(), "0.1");
}

#[test]
fn test_text_escaping() {
    assert_eq!(encode("a'b").unwrap(), "'a''b'");
    assert_eq!(encode(&"it's".to_string()).unwrap(), "'it''s'");
    assert_eq!(encode("nul\0byte").unwrap(), "'nulbyte'");
    assert_eq!(encode("").unwrap(), "''");
    assert_eq!(quote("''"), "''''''");
}

#[test]
fn test_null_and_options() {
    assert_eq!(encode(&None::<i32>).unwrap(), "NULL");
    assert_eq!(encode(&Some(3)).unwrap(), "3");
    assert_eq!(encode(&Some(Some("x"))).unwrap(), "'x'");
    assert_eq!(encode(&Value::Null).unwrap(), "NULL");
    assert_eq!(encode(&Box::new("boxed")).unwrap(), "'boxed'");
}

#[test]
fn test_bytes_are_raw() {
    assert_eq!(encode(b"now()".as_slice()).unwrap(), "now()");
    assert_eq!(encode(&b"1 + 1".to_vec()).unwrap(), "1 + 1");
    assert_eq!(
        encode(&bytes::Bytes::from_static(b"DEFAULT")).unwrap(),
        "DEFAULT"
    );
}

#[test]
fn test_timestamp_utc() {
    let t = Utc.with_ymd_and_hms(2024, 3, 5, 8, 9, 10).unwrap();
    assert_eq!(encode(&t).unwrap(), "'2024-03-05T08:09:10Z'");
}

#[test]
fn test_timestamp_fraction_and_offset() {
    let tz = FixedOffset::east_opt(8 * 3600).unwrap();
    let t = tz.with_ymd_and_hms(2024, 3, 5, 8, 9, 10).unwrap()
        + chrono::Duration::microseconds(123_400);
    assert_eq!(encode(&t).unwrap(), "'2024-03-05T08:09:10.1234+08:00'");

    // sub-microsecond precision is dropped
    let t = Utc.with_ymd_and_hms(2024, 3, 5, 8, 9, 10).unwrap()
        + chrono::Duration::nanoseconds(999);
    assert_eq!(encode(&t).unwrap(), "'2024-03-05T08:09:10Z'");
}

#[test]
fn test_naive_datetime_and_date() {
    let d = chrono::NaiveDate::from_ymd_opt(2024, 1, 31).unwrap();
    assert_eq!(encode(&d).unwrap(), "'2024-01-31'");
    let dt = d.and_hms_opt(23, 59, 59).unwrap();
    assert_eq!(encode(&dt).unwrap(), "'2024-01-31T23:59:59Z'");
}

#[derive(Debug)]
struct Price(&'static str);

impl Valuer for Price {
    fn value(&self) -> Result<Value, ValuerError> {
        Ok(Value::Text(self.0.to_string()))
    }
}

crate::encode_via_valuer!(Price);

#[derive(Debug)]
struct Broken;

impl Valuer for Broken {
    fn value(&self) -> Result<Value, ValuerError> {
        Err(ValuerError("no value".to_string()))
    }
}

crate::encode_via_valuer!(Broken);

#[test]
fn test_valuer_numeric_text_is_bare() {
    assert_eq!(encode(&Price("12.50")).unwrap(), "12.50");
    assert_eq!(encode(&Price("1e3")).unwrap(), "1e3");
}

#[test]
fn test_valuer_plain_text_is_quoted() {
    assert_eq!(encode(&Price("N/A")).unwrap(), "'N/A'");
    assert_eq!(encode(&Price("o'clock")).unwrap(), "'o''clock'");
}

#[test]
fn test_valuer_absent_is_null() {
    assert_eq!(encode(&None::<Price>).unwrap(), "NULL");
}

#[test]
fn test_valuer_error_propagates() {
    let err = encode(&Broken).unwrap_err();
    assert_eq!(err, SqlError::Valuer("no value".to_string()));
    assert!(err.is_encoding());
}

#[test]
fn test_uuid_is_quoted_text() {
    let id = uuid::Uuid::nil();
    assert_eq!(
        encode(&id).unwrap(),
        "'00000000-0000-0000-0000-000000000000'"
    );
}

#[derive(Serialize)]
struct Tag {
    name: String,
    weight: u8,
}

#[test]
fn test_json_fallback() {
    let tag = Tag {
        name: "o'neil".to_string(),
        weight: 3,
    };
    assert_eq!(
        encode(&Json(&tag)).unwrap(),
        r#"'{"name":"o''neil","weight":3}'"#
    );
    assert_eq!(encode(&Json(vec![1, 2, 3])).unwrap(), "'[1,2,3]'");
    assert_eq!(
        encode(&serde_json::json!({"a": null})).unwrap(),
        r#"'{"a":null}'"#
    );
}

#[test]
fn test_json_serialization_failure() {
    let mut bad = BTreeMap::new();
    bad.insert(vec![1u8], 1);
    let err = encode(&Json(bad)).unwrap_err();
    assert!(matches!(err, SqlError::Serialization(_)));
}

#[test]
fn test_encode_list() {
    assert_eq!(encode_list([1, 2, 3]).unwrap().as_deref(), Some("1,2,3"));
    assert_eq!(
        encode_list(&["a", "b'"]).unwrap().as_deref(),
        Some("'a','b'''")
    );
    assert_eq!(encode_list(Vec::<i32>::new()).unwrap(), None);
}

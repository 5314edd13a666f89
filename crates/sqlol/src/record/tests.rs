use super::*;
use crate::Record;
use serde::Serialize;

#[derive(Record)]
#[sql(rename_all = "PascalCase")]
struct Base {
    pub name: String,
}

#[derive(Record)]
#[sql(rename_all = "PascalCase")]
struct Item {
    #[sql(flatten)]
    base: Base,
    pub name_two: String,
    #[sql(column = "Tagname")]
    pub tag: String,
}

#[derive(Record, Serialize)]
struct Address {
    pub city: String,
    pub zip: String,
}

#[allow(dead_code)]
#[derive(Record)]
struct Customer {
    pub id: i64,
    #[sql(nested)]
    pub address: Address,
    #[sql(json)]
    pub tags: Vec<String>,
    #[sql(skip)]
    pub cache: String,
    secret: String,
}

#[derive(Record)]
struct Stamp {
    pub name: String,
    pub at: i64,
}

#[derive(Record)]
struct Shadowed {
    pub name: String,
    #[sql(flatten)]
    stamp: Stamp,
}

#[derive(Record)]
struct Person {
    #[sql(column = "display_name")]
    pub name: String,
    #[sql(column = "name")]
    pub title: String,
}

#[derive(Record)]
struct Label {
    #[sql(column = "label_name")]
    pub name: String,
}

#[derive(Record)]
struct Badge {
    #[sql(flatten)]
    label: Label,
    #[sql(column = "name")]
    pub caption: String,
}

fn item(name: &str, two: &str) -> Item {
    Item {
        base: Base {
            name: name.to_string(),
        },
        name_two: two.to_string(),
        tag: "t".to_string(),
    }
}

fn customer() -> Customer {
    Customer {
        id: 1,
        address: Address {
            city: "Paris".to_string(),
            zip: "75001".to_string(),
        },
        tags: vec!["a".to_string(), "b".to_string()],
        cache: String::new(),
        secret: "x".to_string(),
    }
}

// ==================== Column specs ====================

#[test]
fn test_embedded_columns_come_first_in_declaration_order() {
    let cols = columns_of::<Item>();
    assert_eq!(cols.names(), ["Name", "NameTwo", "Tagname"]);
}

#[test]
fn test_only_pub_fields_are_columns() {
    assert_eq!(
        columns_of::<Customer>().names(),
        ["id", "address", "tags"]
    );
}

#[test]
fn test_columns_of_is_cached_per_type() {
    let a = columns_of::<Item>();
    let b = columns_of::<Item>();
    assert!(Arc::ptr_eq(&a, &b));
    assert!(!Arc::ptr_eq(&a, &columns_of::<Base>()));
}

#[test]
fn test_duplicate_column_first_wins() {
    assert_eq!(Shadowed::column_spec().names(), ["name", "at"]);

    let row = Shadowed {
        name: "outer".to_string(),
        stamp: Stamp {
            name: "inner".to_string(),
            at: 3,
        },
    };
    assert_eq!(encode_tuple(&row, &["name", "at"]).unwrap(), "('outer',3)");
}

#[test]
fn test_column_spec_helpers() {
    let spec: ColumnSpec = ["id", "name", "id", "created_at"].into_iter().collect();
    assert_eq!(spec.len(), 3);
    assert_eq!(spec.to_string(), "id,name,created_at");
    assert_eq!(spec.without(&["created_at"]).names(), ["id", "name"]);
    assert!(spec.contains("name"));
}

// ==================== Field lookup ====================

#[test]
fn test_lookup_by_column_or_ident() {
    let i = item("a", "b");
    assert!(i.field("Tagname").is_some());
    assert!(i.field("Name").is_some());
    assert!(i.field("tag").is_none());
    assert!(i.field_by_ident("tag").is_some());
    assert!(i.field("missing").is_none());
    assert_eq!(field_value(&i, "tag").unwrap(), Value::Text("t".to_string()));
}

#[test]
fn test_column_name_wins_over_earlier_ident() {
    assert_eq!(Person::column_spec().names(), ["display_name", "name"]);

    let p = Person {
        name: "Alice".to_string(),
        title: "Dr".to_string(),
    };
    let cols = columns_of::<Person>();
    assert_eq!(encode_tuple(&p, cols.names()).unwrap(), "('Alice','Dr')");
    assert_eq!(field_value(&p, "title").unwrap(), Value::Text("Dr".to_string()));
}

#[test]
fn test_column_name_wins_over_embedded_ident() {
    let row = Badge {
        label: Label {
            name: "inner".to_string(),
        },
        caption: "outer".to_string(),
    };
    assert_eq!(Badge::column_spec().names(), ["label_name", "name"]);
    assert_eq!(
        encode_tuple(&row, Badge::column_spec().names()).unwrap(),
        "('inner','outer')"
    );
}

#[test]
fn test_field_path_parse() {
    assert_eq!(FieldPath::parse("a.b").parts(), ["a", "b"]);
    assert_eq!(FieldPath::parse("plain").parts(), ["plain"]);
    assert_eq!(FieldPath::parse(".x").parts(), [".x"]);
    assert_eq!(FieldPath::parse("a.b").to_string(), "a.b");
}

#[test]
fn test_dotted_path_resolves_nested_record() {
    let c = customer();
    assert_eq!(
        field_value(&c, "address.city").unwrap(),
        Value::Text("Paris".to_string())
    );
    assert!(FieldPath::parse("id.city").resolve(&c).is_none());
    assert!(FieldPath::parse("address.nope").resolve(&c).is_none());
}

#[test]
fn test_unknown_field_is_an_error() {
    let c = customer();
    let err = field_value(&c, "secret").unwrap_err();
    assert!(err.is_unknown_field());
    assert_eq!(
        err,
        SqlError::unknown_field("secret", "Customer")
    );
    assert!(field_value(&c, "cache").is_err());
    assert!(field_value(&c, "address.nope").is_err());
}

// ==================== Tuples ====================

#[test]
fn test_encode_tuple_nested_and_json() {
    let c = customer();
    assert_eq!(
        encode_tuple(&c, &["id", "address.city", "tags"]).unwrap(),
        r#"(1,'Paris','["a","b"]')"#
    );
    assert_eq!(
        encode_tuple(&c, &["address"]).unwrap(),
        r#"('{"city":"Paris","zip":"75001"}')"#
    );
}

#[test]
fn test_encode_tuples_sequence() {
    let items = vec![item("x", "o'k"), item("y", "z")];
    let cols = columns_of::<Item>();
    assert_eq!(
        encode_tuples(&items, cols.names()).unwrap(),
        "('x','o''k','t'),('y','z','t')"
    );
    assert_eq!(encode_tuples(&Vec::<Item>::new(), cols.names()).unwrap(), "");
}

#[test]
fn test_encode_tuples_unknown_column_fails() {
    let items = vec![item("x", "y")];
    let err = encode_tuples(&items, &["Name", "Nope"]).unwrap_err();
    assert!(err.is_unknown_field());
}

//! Tests for #[derive(Record)].

use datagrid::{ColumnDef, DataTable, DataTableOptions, Record, Value};

#[derive(Clone, Record)]
struct Person {
    name: String,
    age: u32,
    #[record(rename = "e-mail")]
    email: Option<String>,
    #[record(skip)]
    #[allow(dead_code)]
    notes: Vec<String>,
}

fn person(name: &str, age: u32, email: Option<&str>) -> Person {
    Person {
        name: name.to_string(),
        age,
        email: email.map(str::to_string),
        notes: Vec::new(),
    }
}

#[test]
fn test_fields_by_name() {
    let bob = person("Bob", 30, None);
    assert_eq!(bob.field("name"), Some(Value::from("Bob")));
    assert_eq!(bob.field("age"), Some(Value::Int(30)));
}

#[test]
fn test_rename_and_skip() {
    let amy = person("Amy", 25, Some("amy@example.com"));
    assert_eq!(amy.field("e-mail"), Some(Value::from("amy@example.com")));
    assert_eq!(amy.field("email"), None);
    assert_eq!(amy.field("notes"), None);
}

#[test]
fn test_option_none_is_null() {
    let cid = person("Cid", 35, None);
    assert_eq!(cid.field("e-mail"), Some(Value::Null));
}

#[derive(Record)]
struct Wrapper<T> {
    inner: T,
}

#[test]
fn test_generic_struct() {
    let w = Wrapper { inner: 1.5f64 };
    assert_eq!(w.field("inner"), Some(Value::Float(1.5)));
}

#[test]
fn test_derived_rows_in_table() {
    let rows = vec![
        person("Bob", 30, None),
        person("Amy", 25, Some("amy@example.com")),
        person("Cid", 35, None),
    ];
    let table = DataTable::new(DataTableOptions::new(
        rows,
        vec![ColumnDef::accessor("name"), ColumnDef::accessor("age")],
    ))
    .unwrap();

    table.column("age").unwrap().toggle_sorting();
    let names: Vec<Value> = table
        .row_model()
        .iter()
        .map(|row| row.value("name").unwrap())
        .collect();
    assert_eq!(names, vec![Value::from("Amy"), Value::from("Bob"), Value::from("Cid")]);
}

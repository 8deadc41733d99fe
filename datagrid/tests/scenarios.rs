//! End to end behaviour over a three row table.

use std::collections::BTreeMap;

use datagrid::{ColumnDef, DataTable, DataTableOptions, SortDirection, Value};
use serde_json::json;

type Json = serde_json::Value;

fn people() -> Vec<Json> {
    vec![
        json!({"id": 1, "name": "Bob"}),
        json!({"id": 2, "name": "Amy"}),
        json!({"id": 3, "name": "Cid"}),
    ]
}

fn table_with(options: impl FnOnce(DataTableOptions<Json>) -> DataTableOptions<Json>) -> DataTable<Json> {
    let columns = vec![ColumnDef::accessor("id"), ColumnDef::accessor("name")];
    DataTable::new(options(DataTableOptions::new(people(), columns))).unwrap()
}

fn table() -> DataTable<Json> {
    table_with(|o| o)
}

fn names(table: &DataTable<Json>) -> Vec<String> {
    table
        .row_model()
        .iter()
        .map(|row| row.value("name").unwrap().to_string())
        .collect()
}

#[test]
fn test_default_order_is_input_order() {
    let table = table();
    assert_eq!(names(&table), ["Bob", "Amy", "Cid"]);
    assert_eq!(table.state().pagination.page_size, 10);
}

#[test]
fn test_toggle_sorting_cycle() {
    let table = table();
    let name = table.column("name").unwrap();
    let toggle = name.toggle_sorting_handler();

    toggle();
    assert_eq!(name.is_sorted(), Some(SortDirection::Asc));
    assert_eq!(names(&table), ["Amy", "Bob", "Cid"]);

    toggle();
    assert_eq!(name.is_sorted(), Some(SortDirection::Desc));
    assert_eq!(names(&table), ["Cid", "Bob", "Amy"]);

    toggle();
    assert_eq!(name.is_sorted(), None);
    assert_eq!(names(&table), ["Bob", "Amy", "Cid"]);
}

#[test]
fn test_toggle_sorting_replaces_other_sort() {
    let table = table();
    table.column("id").unwrap().toggle_sorting();
    table.column("name").unwrap().toggle_sorting();
    let sorting = table.state().sorting;
    assert_eq!(sorting.len(), 1);
    assert_eq!(sorting[0].id, "name");
}

#[test]
fn test_global_filter() {
    let table = table();
    table.set_global_filter("a");
    assert_eq!(names(&table), ["Amy"]);

    table.set_global_filter("");
    assert_eq!(names(&table), ["Bob", "Amy", "Cid"]);
}

#[test]
fn test_pagination() {
    let table = table_with(|o| o.page_size(2));
    assert_eq!(names(&table), ["Bob", "Amy"]);
    assert!(table.can_next_page());
    assert!(!table.can_previous_page());

    table.set_page_index(1);
    assert_eq!(names(&table), ["Cid"]);
    assert!(!table.can_next_page());
    assert!(table.can_previous_page());
    assert_eq!(table.page_count(), 2);
}

#[test]
fn test_toggle_selected() {
    let table = table();
    let before = table.filtered_row_model().ids().join(",");

    let model = table.row_model();
    let row = model.row_by_id("1").unwrap();
    row.toggle_selected(None);

    let expected: BTreeMap<String, bool> = [("1".to_string(), true)].into();
    assert_eq!(table.state().row_selection, expected);
    assert!(row.is_selected());
    assert_eq!(table.filtered_row_model().ids().join(","), before);
    assert_eq!(row.value("name"), Some(Value::from("Amy")));
}

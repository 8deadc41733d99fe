//! Controlled and table-owned state slices.

use std::sync::{Arc, Mutex, OnceLock, Weak};

use datagrid::{
    ColumnDef, ColumnFilter, ColumnSort, Controlled, DataTable, DataTableOptions,
    PaginationState, RowSelectionState, SortingState, State,
};
use serde_json::json;

type Json = serde_json::Value;

fn people() -> Vec<Json> {
    vec![
        json!({"name": "Bob", "age": 30}),
        json!({"name": "Amy", "age": 25}),
        json!({"name": "Cid", "age": 35}),
    ]
}

fn columns() -> Vec<ColumnDef<Json>> {
    vec![ColumnDef::accessor("name"), ColumnDef::accessor("age")]
}

fn ids(table: &DataTable<Json>) -> Vec<String> {
    table
        .row_model()
        .ids()
        .into_iter()
        .map(str::to_string)
        .collect()
}

#[test]
fn test_uncontrolled_observer_sees_new_value() {
    let seen: Arc<Mutex<Vec<SortingState>>> = Arc::default();
    let sink = Arc::clone(&seen);
    let table = DataTable::new(
        DataTableOptions::new(people(), columns())
            .on_sorting_change(move |sorting| sink.lock().unwrap().push(sorting)),
    )
    .unwrap();

    table.column("age").unwrap().toggle_sorting();
    assert_eq!(*seen.lock().unwrap(), vec![vec![ColumnSort::asc("age")]]);
    assert_eq!(table.state().sorting, vec![ColumnSort::asc("age")]);
}

#[test]
fn test_initial_values() {
    let table = DataTable::new(
        DataTableOptions::new(people(), columns())
            .initial_sorting(vec![ColumnSort::desc("age")])
            .initial_global_filter("b".to_string())
            .initial_pagination(PaginationState::new(1)),
    )
    .unwrap();
    assert_eq!(ids(&table), ["0"]);
    assert_eq!(table.state().pagination.page_size, 1);
}

#[test]
fn test_controlled_slice_reads_caller_state() {
    let sorting = State::new(SortingState::new());
    let table = DataTable::new(
        DataTableOptions::new(people(), columns())
            .controlled_sorting(Controlled::from_state(sorting.clone())),
    )
    .unwrap();

    assert_eq!(ids(&table), ["0", "1", "2"]);

    // Changed behind the table's back; the next read must notice.
    sorting.set(vec![ColumnSort::asc("name")]);
    assert_eq!(ids(&table), ["1", "0", "2"]);

    table.column("name").unwrap().toggle_sorting();
    assert_eq!(sorting.get(), vec![ColumnSort::desc("name")]);
    assert_eq!(ids(&table), ["2", "0", "1"]);
}

#[test]
fn test_controlled_change_can_be_rejected() {
    let requests: Arc<Mutex<Vec<Vec<ColumnFilter>>>> = Arc::default();
    let sink = Arc::clone(&requests);
    let table = DataTable::new(
        DataTableOptions::new(people(), columns()).controlled_column_filters(Controlled::new(
            Vec::new,
            move |filters: Vec<ColumnFilter>| sink.lock().unwrap().push(filters),
        )),
    )
    .unwrap();

    table.column("name").unwrap().set_filter_value(Some("amy".into()));
    assert_eq!(
        *requests.lock().unwrap(),
        vec![vec![ColumnFilter::new("name", "amy")]]
    );
    assert!(table.state().column_filters.is_empty());
    assert_eq!(ids(&table), ["0", "1", "2"]);
}

#[test]
fn test_controlled_pagination_with_page_size() {
    let pagination = State::new(PaginationState::new(2));
    let table = DataTable::new(
        DataTableOptions::new(people(), columns())
            .page_size(50)
            .controlled_pagination(Controlled::from_state(pagination.clone())),
    )
    .unwrap();
    assert_eq!(table.row_model().len(), 2);

    table.next_page();
    assert_eq!(pagination.get().page_index, 1);
    assert_eq!(ids(&table), ["2"]);
}

#[test]
fn test_observer_may_reenter_table() {
    let handle: Arc<OnceLock<Weak<DataTable<Json>>>> = Arc::default();
    let rows_seen: Arc<Mutex<Vec<usize>>> = Arc::default();

    let table_handle = Arc::clone(&handle);
    let sink = Arc::clone(&rows_seen);
    let table = Arc::new(
        DataTable::new(DataTableOptions::new(people(), columns()).on_global_filter_change(
            move |_| {
                if let Some(table) = table_handle.get().and_then(Weak::upgrade) {
                    sink.lock().unwrap().push(table.row_model().len());
                    table.set_page_index(0);
                }
            },
        ))
        .unwrap(),
    );
    handle.set(Arc::downgrade(&table)).unwrap();

    table.set_global_filter("a");
    assert_eq!(*rows_seen.lock().unwrap(), vec![1]);
}

#[test]
fn test_controlled_callback_may_reenter_table() {
    let handle: Arc<OnceLock<Weak<DataTable<Json>>>> = Arc::default();
    let selection = State::new(RowSelectionState::new());

    let table_handle = Arc::clone(&handle);
    let store = selection.clone();
    let controlled = Controlled::new(
        {
            let store = selection.clone();
            move || store.get()
        },
        move |next| {
            store.set(next);
            if let Some(table) = table_handle.get().and_then(Weak::upgrade) {
                assert!(table.is_some_rows_selected());
            }
        },
    );
    let table = Arc::new(
        DataTable::new(
            DataTableOptions::new(people(), columns()).controlled_row_selection(controlled),
        )
        .unwrap(),
    );
    handle.set(Arc::downgrade(&table)).unwrap();

    table.row_model().rows()[0].toggle_selected(Some(true));
    assert_eq!(selection.get().get("0"), Some(&true));
}

#[test]
fn test_table_is_send_and_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<DataTable<Json>>();
}

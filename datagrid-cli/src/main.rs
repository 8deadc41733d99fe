mod args;
mod error;
mod input;
mod render;

use std::fs::File;
use std::process::ExitCode;

use clap::Parser;
use datagrid::{DataTable, DataTableOptions, TableState};
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode, WriteLogger};

use args::Args;
use error::CliError;

fn main() -> ExitCode {
    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging(args: &Args) -> Result<(), CliError> {
    let level = args.log_level();
    match &args.log_file {
        Some(path) => {
            let file = File::create(path).map_err(CliError::LogFile)?;
            WriteLogger::init(level, Config::default(), file)?;
        }
        None => TermLogger::init(level, Config::default(), TerminalMode::Stderr, ColorChoice::Auto)?,
    }
    Ok(())
}

fn run(args: &Args) -> Result<(), CliError> {
    init_logging(args)?;

    let rows = input::load_rows(&args.file)?;
    let columns = input::derive_columns(&rows);
    let saved = match &args.state {
        Some(path) => Some(input::load_state(path)?),
        None => None,
    };

    let mut options = DataTableOptions::new(rows, columns);
    if let Some(state) = saved {
        options = with_state(options, state);
    }
    let table = DataTable::new(options)?;
    apply_flags(&table, args)?;

    print!("{}", render::render(&table));

    if let Some(path) = &args.save_state {
        input::save_state(path, &table.state())?;
    }
    Ok(())
}

fn with_state<T>(options: DataTableOptions<T>, state: TableState) -> DataTableOptions<T> {
    options
        .initial_sorting(state.sorting)
        .initial_column_filters(state.column_filters)
        .initial_global_filter(state.global_filter)
        .initial_column_visibility(state.column_visibility)
        .initial_row_selection(state.row_selection)
        .initial_pagination(state.pagination)
}

/// Layer command line flags over the (possibly restored) table state.
fn apply_flags(table: &DataTable<serde_json::Value>, args: &Args) -> Result<(), CliError> {
    let known = |id: &str| -> Result<(), CliError> {
        match table.column(id) {
            Some(_) => Ok(()),
            None => Err(CliError::UnknownColumn(id.to_string())),
        }
    };

    if !args.sort.is_empty() {
        for sort in &args.sort {
            known(&sort.id)?;
        }
        table.set_sorting(args.sort.clone());
    }

    if !args.filter.is_empty() {
        let mut filters = table.state().column_filters;
        for filter in &args.filter {
            known(&filter.id)?;
            filters.retain(|f| f.id != filter.id);
            filters.push(filter.clone());
        }
        table.set_column_filters(filters);
    }

    if let Some(global) = &args.global {
        table.set_global_filter(global.clone());
    }

    for id in &args.hide {
        known(id)?;
        if let Some(column) = table.column(id) {
            column.toggle_visibility(Some(false));
        }
    }

    if let Some(page_size) = args.page_size {
        table.set_page_size(page_size);
    }
    if let Some(page_index) = args.page_index() {
        table.set_page_index(page_index);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use datagrid::{ColumnFilter, ColumnSort, PaginationState};
    use tempfile::NamedTempFile;

    use super::*;

    const PEOPLE: &str = r#"[
        {"name": "Bob", "age": 30},
        {"name": "Amy", "age": 25},
        {"name": "Cid", "age": 35}
    ]"#;

    fn table() -> DataTable<serde_json::Value> {
        let rows: Vec<serde_json::Value> = serde_json::from_str(PEOPLE).unwrap();
        let columns = input::derive_columns(&rows);
        DataTable::new(DataTableOptions::new(rows, columns)).unwrap()
    }

    #[test]
    fn test_apply_flags() {
        let table = table();
        let args = Args::try_parse_from([
            "datagrid",
            "people.json",
            "--sort",
            "age:desc",
            "--filter",
            "name=i",
            "--hide",
            "age",
        ])
        .unwrap();
        apply_flags(&table, &args).unwrap();

        let state = table.state();
        assert_eq!(state.sorting, vec![ColumnSort::desc("age")]);
        assert_eq!(state.column_filters, vec![ColumnFilter::new("name", "i")]);
        assert_eq!(state.column_visibility.get("age"), Some(&false));
        assert_eq!(table.row_model().ids(), ["2"]);
    }

    #[test]
    fn test_unknown_column_flag() {
        let table = table();
        let args = Args::try_parse_from(["datagrid", "people.json", "--sort", "height"]).unwrap();
        assert!(matches!(
            apply_flags(&table, &args),
            Err(CliError::UnknownColumn(id)) if id == "height"
        ));
    }

    #[test]
    fn test_page_flags_after_page_size() {
        let table = table();
        let args = Args::try_parse_from([
            "datagrid",
            "people.json",
            "--page-size",
            "2",
            "--page",
            "2",
        ])
        .unwrap();
        apply_flags(&table, &args).unwrap();
        assert_eq!(
            table.state().pagination,
            PaginationState {
                page_index: 1,
                page_size: 2
            }
        );
        assert_eq!(table.row_model().len(), 1);
    }

    #[test]
    fn test_restored_state() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(PEOPLE.as_bytes()).unwrap();
        let rows = input::load_rows(file.path()).unwrap();
        let columns = input::derive_columns(&rows);
        let state = TableState {
            sorting: vec![ColumnSort::asc("name")],
            ..TableState::default()
        };
        let table = DataTable::new(with_state(DataTableOptions::new(rows, columns), state)).unwrap();
        assert_eq!(table.row_model().ids(), ["1", "0", "2"]);
    }
}

//! Reading rows and table state from disk.

use std::fs;
use std::path::Path;

use datagrid::{ColumnDef, TableState};
use serde_json::Value as Json;

use crate::error::CliError;

fn read(path: &Path) -> Result<String, CliError> {
    fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })
}

/// Load a JSON array of objects.
pub fn load_rows(path: &Path) -> Result<Vec<Json>, CliError> {
    let text = read(path)?;
    let json: Json = serde_json::from_str(&text).map_err(|source| CliError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    let Json::Array(rows) = json else {
        return Err(CliError::NotArray {
            path: path.to_path_buf(),
        });
    };
    if !rows.iter().all(Json::is_object) {
        return Err(CliError::NotArray {
            path: path.to_path_buf(),
        });
    }
    log::info!("Loaded {} rows from {}", rows.len(), path.display());
    Ok(rows)
}

/// One column per key of the first row, in the order the keys appear.
pub fn derive_columns(rows: &[Json]) -> Vec<ColumnDef<Json>> {
    let Some(Json::Object(first)) = rows.first() else {
        return Vec::new();
    };
    first.keys().map(ColumnDef::accessor).collect()
}

/// Load a state snapshot written by `--save-state`.
pub fn load_state(path: &Path) -> Result<TableState, CliError> {
    let text = read(path)?;
    serde_json::from_str(&text).map_err(|source| CliError::Json {
        path: path.to_path_buf(),
        source,
    })
}

/// Write a state snapshot as pretty JSON.
pub fn save_state(path: &Path, state: &TableState) -> Result<(), CliError> {
    let text = serde_json::to_string_pretty(state).map_err(|source| CliError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    fs::write(path, text).map_err(|source| CliError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    log::info!("Saved table state to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use datagrid::ColumnSort;
    use tempfile::NamedTempFile;

    use super::*;

    fn write_temp(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_rows_keeps_key_order() {
        let file = write_temp(r#"[{"name": "Bob", "age": 30}, {"name": "Amy", "age": 25}]"#);
        let rows = load_rows(file.path()).unwrap();
        assert_eq!(rows.len(), 2);

        let ids: Vec<String> = derive_columns(&rows)
            .iter()
            .enumerate()
            .map(|(i, c)| c.resolve_id(i))
            .collect();
        assert_eq!(ids, ["name", "age"]);
    }

    #[test]
    fn test_load_rows_rejects_non_array() {
        let file = write_temp(r#"{"name": "Bob"}"#);
        assert!(matches!(
            load_rows(file.path()),
            Err(CliError::NotArray { .. })
        ));

        let file = write_temp("[1, 2]");
        assert!(matches!(
            load_rows(file.path()),
            Err(CliError::NotArray { .. })
        ));
    }

    #[test]
    fn test_load_rows_invalid_json() {
        let file = write_temp("[{");
        assert!(matches!(load_rows(file.path()), Err(CliError::Json { .. })));
    }

    #[test]
    fn test_state_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        let state = TableState {
            sorting: vec![ColumnSort::desc("age")],
            global_filter: "a".to_string(),
            ..TableState::default()
        };
        save_state(&path, &state).unwrap();
        assert_eq!(load_state(&path).unwrap(), state);
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            load_rows(Path::new("/nonexistent/rows.json")),
            Err(CliError::Read { .. })
        ));
    }
}

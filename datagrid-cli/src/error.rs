//! CLI error types

use std::io;
use std::path::PathBuf;

use datagrid::TableError;

/// Errors that end a `datagrid` run.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Reading an input file failed.
    #[error("Failed to read {}: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },

    /// Writing an output file failed.
    #[error("Failed to write {}: {source}", path.display())]
    Write { path: PathBuf, source: io::Error },

    /// An input file is not valid JSON, or not the expected shape.
    #[error("Invalid JSON in {}: {source}", path.display())]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// The data file is not an array of objects.
    #[error("{} must contain a JSON array of objects", path.display())]
    NotArray { path: PathBuf },

    /// A flag names a column the data does not have.
    #[error("Unknown column '{0}'")]
    UnknownColumn(String),

    /// The table rejected its configuration.
    #[error(transparent)]
    Table(#[from] TableError),

    /// The log file could not be created.
    #[error("Failed to create log file: {0}")]
    LogFile(io::Error),

    /// A logger was already installed.
    #[error("Failed to initialize logger: {0}")]
    Logger(#[from] log::SetLoggerError),
}

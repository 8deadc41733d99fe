//! Command line arguments.

use std::path::PathBuf;

use clap::{ArgAction, Parser};
use datagrid::{ColumnFilter, ColumnSort};

/// Sort, filter and page a JSON array of objects.
#[derive(Debug, Parser)]
#[command(name = "datagrid", version)]
pub struct Args {
    /// JSON file holding an array of objects.
    pub file: PathBuf,

    /// Sort by a column; repeat for secondary sorts.
    #[arg(long, value_name = "COLUMN[:asc|:desc]", value_parser = parse_sort)]
    pub sort: Vec<ColumnSort>,

    /// Keep rows whose column contains the value (case-insensitive).
    #[arg(long, value_name = "COLUMN=VALUE", value_parser = parse_filter)]
    pub filter: Vec<ColumnFilter>,

    /// Keep rows where any column contains the text.
    #[arg(long, value_name = "TEXT")]
    pub global: Option<String>,

    /// Hide a column.
    #[arg(long, value_name = "COLUMN")]
    pub hide: Vec<String>,

    /// Page to show, starting at 1.
    #[arg(long, value_name = "N", value_parser = parse_positive)]
    pub page: Option<usize>,

    /// Rows per page.
    #[arg(long, value_name = "N", value_parser = parse_positive)]
    pub page_size: Option<usize>,

    /// Load table state from a file before applying the other flags.
    #[arg(long, value_name = "FILE")]
    pub state: Option<PathBuf>,

    /// Write the final table state to a file.
    #[arg(long, value_name = "FILE")]
    pub save_state: Option<PathBuf>,

    /// Write logs to a file instead of stderr.
    #[arg(long, value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    /// Zero-based page index requested with `--page`.
    pub fn page_index(&self) -> Option<usize> {
        self.page.map(|page| page - 1)
    }

    pub fn log_level(&self) -> log::LevelFilter {
        match self.verbose {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            2 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        }
    }
}

/// Parse `column`, `column:asc` or `column:desc`.
pub fn parse_sort(s: &str) -> Result<ColumnSort, String> {
    let (id, direction) = match s.rsplit_once(':') {
        Some((id, direction)) => (id, Some(direction)),
        None => (s, None),
    };
    if id.is_empty() {
        return Err("column name is empty".to_string());
    }
    match direction.map(str::to_ascii_lowercase).as_deref() {
        None | Some("asc") => Ok(ColumnSort::asc(id)),
        Some("desc") => Ok(ColumnSort::desc(id)),
        Some(other) => Err(format!("unknown sort direction '{other}', expected asc or desc")),
    }
}

/// Parse `column=value`. The value may contain `=`.
pub fn parse_filter(s: &str) -> Result<ColumnFilter, String> {
    let Some((id, value)) = s.split_once('=') else {
        return Err(format!("expected COLUMN=VALUE, got '{s}'"));
    };
    if id.is_empty() {
        return Err("column name is empty".to_string());
    }
    Ok(ColumnFilter::new(id, value))
}

fn parse_positive(s: &str) -> Result<usize, String> {
    match s.parse::<usize>() {
        Ok(0) => Err("must be at least 1".to_string()),
        Ok(n) => Ok(n),
        Err(e) => Err(e.to_string()),
    }
}

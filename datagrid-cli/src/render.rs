//! Plain text rendering of a table page.

use std::fmt::Write;

use datagrid::{DataTable, Record, SortDirection};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Cells wider than this are cut and end in an ellipsis.
const MAX_CELL_WIDTH: usize = 40;

const COLUMN_GAP: &str = "  ";

/// Render the header, the current page and a "Showing a to b of n" footer.
pub fn render<T: Record>(table: &DataTable<T>) -> String {
    let headers: Vec<String> = table.header_groups()[0]
        .headers()
        .iter()
        .map(|header| {
            let marker = match header.column().is_sorted() {
                Some(SortDirection::Asc) => " ^",
                Some(SortDirection::Desc) => " v",
                None => "",
            };
            truncate(&format!("{}{marker}", header.label()))
        })
        .collect();

    let rows: Vec<Vec<String>> = table
        .row_model()
        .iter()
        .map(|row| {
            row.visible_cells()
                .iter()
                .map(|cell| truncate(&sanitize(&cell.value().to_string())))
                .collect()
        })
        .collect();

    let mut widths: Vec<usize> = headers.iter().map(|h| h.width()).collect();
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.width());
        }
    }

    let mut out = String::new();
    if !headers.is_empty() {
        push_line(&mut out, &headers, &widths);
        let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
        push_line(&mut out, &rule, &widths);
    }
    if rows.is_empty() {
        out.push_str("(no rows)\n");
    }
    for row in &rows {
        push_line(&mut out, row, &widths);
    }

    let info = table.page_info();
    let _ = write!(out, "{info}");
    let page_count = table.page_count();
    if page_count > 1 {
        let _ = write!(
            out,
            " (page {} of {page_count})",
            table.state().pagination.page_index + 1
        );
    }
    out.push('\n');
    out
}

fn push_line(out: &mut String, cells: &[String], widths: &[usize]) {
    let line: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| pad(cell, *width))
        .collect();
    out.push_str(line.join(COLUMN_GAP).trim_end());
    out.push('\n');
}

fn pad(s: &str, width: usize) -> String {
    let fill = width.saturating_sub(s.width());
    format!("{s}{}", " ".repeat(fill))
}

/// Keep each cell on one line.
fn sanitize(s: &str) -> String {
    s.replace(['\n', '\r', '\t'], " ")
}

fn truncate(s: &str) -> String {
    if s.width() <= MAX_CELL_WIDTH {
        return s.to_string();
    }
    let mut out = String::new();
    let mut width = 0;
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if width + w > MAX_CELL_WIDTH - 1 {
            break;
        }
        out.push(c);
        width += w;
    }
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use datagrid::{ColumnDef, DataTableOptions};
    use serde_json::json;

    use super::*;

    fn people() -> Vec<serde_json::Value> {
        vec![
            json!({"name": "Bob", "age": 30}),
            json!({"name": "Amy", "age": 25}),
            json!({"name": "Cid", "age": 35}),
        ]
    }

    fn table(page_size: usize) -> DataTable<serde_json::Value> {
        DataTable::new(
            DataTableOptions::new(
                people(),
                vec![ColumnDef::accessor("name"), ColumnDef::accessor("age")],
            )
            .page_size(page_size),
        )
        .unwrap()
    }

    #[test]
    fn test_render_page() {
        let table = table(2);
        table.column("age").unwrap().toggle_sorting();
        let out = render(&table);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "name  age ^");
        assert_eq!(lines[1], "----  -----");
        assert_eq!(lines[2], "Amy   25");
        assert_eq!(lines[3], "Bob   30");
        assert_eq!(lines[4], "Showing 1 to 2 of 3 (page 1 of 2)");
    }

    #[test]
    fn test_render_empty() {
        let table = table(10);
        table.set_global_filter("zzz");
        let out = render(&table);
        assert!(out.contains("(no rows)"));
        assert!(out.ends_with("Showing 0 to 0 of 0\n"));
    }

    #[test]
    fn test_truncate_wide_text() {
        let long = "x".repeat(60);
        let cut = truncate(&long);
        assert_eq!(cut.width(), MAX_CELL_WIDTH);
        assert!(cut.ends_with('…'));
        assert_eq!(truncate("short"), "short");
    }
}

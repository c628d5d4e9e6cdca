//! Fixed-width grid rendering for SELECT results. Presentation only; the
//! engine hands over an already materialized [QueryResult].

use std::fmt::Write;

use crate::database::QueryResult;

const CELL_WIDTH: usize = 15;

/// Renders a result set as a bordered grid, one separator line between the
/// header and every row.
pub fn render(result: &QueryResult) -> String {
    let mut out = String::new();

    push_separator(&mut out, result.columns.len());
    push_cells(&mut out, &result.columns);

    for row in &result.rows {
        push_separator(&mut out, result.columns.len());
        push_cells(&mut out, row);
    }

    push_separator(&mut out, result.columns.len());
    out
}

fn push_separator(out: &mut String, columns: usize) {
    for _ in 0..columns {
        out.push('+');
        for _ in 0..CELL_WIDTH {
            out.push('-');
        }
    }
    out.push_str("+\n");
}

fn push_cells(out: &mut String, cells: &[String]) {
    for cell in cells {
        let _ = write!(out, "|{cell:<CELL_WIDTH$}");
    }
    out.push_str("|\n");
}

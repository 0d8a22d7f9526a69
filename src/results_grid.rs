/// Results Grid Module for sqlshell
///
/// Lays out a rowset as aligned plain text. Column widths come from the
/// table's own header and cells only; every cell is left-justified and
/// padded to its column width, and cells are joined by a single space.
/// No borders, no numeric alignment.

use crate::session::Rowset;

/// Delimiter placed between two cells of the same line.
pub const COLUMN_DELIMITER: &str = " ";

/// Text the session places between two consecutive rendered tables.
///
/// A line of twelve spaces, matching the output of the reference shell
/// when one input yields several rowsets.
pub const TABLE_SEPARATOR: &str = "\n            \n";

/// Holds the header and rows of one result for rendering.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultsGrid {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl ResultsGrid {
    /// Creates a new, empty ResultsGrid.
    pub fn new() -> Self {
        ResultsGrid::default()
    }

    /// Sets the headers for the grid.
    pub fn set_headers(&mut self, headers: Vec<String>) {
        self.headers = headers;
    }

    /// Adds a row to the grid.
    pub fn add_row(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    /// Computes the width of every column: the longest of the header and
    /// all cells in that column, measured in characters.
    pub fn column_widths(&self) -> Vec<usize> {
        column_widths(&self.headers, &self.rows)
    }

    /// Renders the header line followed by one line per row.
    ///
    /// Lines are joined by `\n` with no trailing newline. A grid without
    /// rows renders the header line alone.
    pub fn render(&self) -> String {
        render_table(&self.headers, &self.rows)
    }
}

impl From<Rowset> for ResultsGrid {
    fn from(rowset: Rowset) -> Self {
        ResultsGrid {
            headers: rowset.columns,
            rows: rowset.rows,
        }
    }
}

fn column_widths<S: AsRef<str>>(headers: &[S], rows: &[Vec<S>]) -> Vec<usize> {
    headers
        .iter()
        .enumerate()
        .map(|(i, header)| {
            rows.iter()
                .filter_map(|row| row.get(i))
                .map(|cell| cell.as_ref().chars().count())
                .fold(header.as_ref().chars().count(), usize::max)
        })
        .collect()
}

/// Renders columns and rows as an aligned text table.
///
/// Rows are expected to have one cell per column; a missing cell renders
/// as empty and surplus cells are ignored. Cells must be single-line: the
/// SQLite adapter escapes line breaks before they reach the grid.
pub fn render_table<S: AsRef<str>>(headers: &[S], rows: &[Vec<S>]) -> String {
    let widths = column_widths(headers, rows);

    let mut lines = Vec::with_capacity(rows.len() + 1);
    lines.push(render_line(headers.iter().map(|h| h.as_ref()), &widths));
    for row in rows {
        lines.push(render_line(
            (0..widths.len()).map(|i| row.get(i).map_or("", |cell| cell.as_ref())),
            &widths,
        ));
    }
    lines.join("\n")
}

fn render_line<'a>(cells: impl Iterator<Item = &'a str>, widths: &[usize]) -> String {
    cells
        .zip(widths)
        .map(|(cell, &width)| format!("{:<width$}", cell, width = width))
        .collect::<Vec<_>>()
        .join(COLUMN_DELIMITER)
}

//! Terminal rendering of the first rows of a table.

use std::fmt;

use super::Table;

/// Wide tables show this many leading and trailing columns around `...`.
const EDGE_COLUMNS: usize = 4;

/// Borrowed view of a table's first rows, formatted like a dataframe head.
///
/// ```text
///    a  b  target
/// 0  1  2       0
///
/// [1 rows x 3 columns]
/// ```
#[derive(Clone, Debug)]
pub struct TablePreview<'a> {
    table: &'a Table,
    rows: usize,
}

impl<'a> TablePreview<'a> {
    pub(crate) fn new(table: &'a Table, rows: usize) -> Self {
        Self { table, rows }
    }

    /// Indices of the columns that are rendered; `None` marks the elision gap.
    fn visible_columns(&self) -> Vec<Option<usize>> {
        let count = self.table.column_count();
        if count <= EDGE_COLUMNS * 2 {
            return (0..count).map(Some).collect();
        }
        (0..EDGE_COLUMNS)
            .map(Some)
            .chain(std::iter::once(None))
            .chain((count - EDGE_COLUMNS..count).map(Some))
            .collect()
    }
}

impl fmt::Display for TablePreview<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let head = self.table.head(self.rows);
        let columns = self.visible_columns();

        let widths: Vec<usize> = columns
            .iter()
            .map(|column| {
                let header = cell(self.table.columns(), *column).chars().count();
                head.iter()
                    .map(|row| cell(row, *column).chars().count())
                    .fold(header, usize::max)
            })
            .collect();
        let index_width = head.len().saturating_sub(1).to_string().len();

        write!(f, "{:index_width$}", "")?;
        for (column, width) in columns.iter().zip(widths.iter().copied()) {
            write!(f, "  {:>width$}", cell(self.table.columns(), *column))?;
        }
        writeln!(f)?;

        for (idx, row) in head.iter().enumerate() {
            write!(f, "{:<index_width$}", idx)?;
            for (column, width) in columns.iter().zip(widths.iter().copied()) {
                write!(f, "  {:>width$}", cell(row, *column))?;
            }
            writeln!(f)?;
        }

        writeln!(f)?;
        writeln!(
            f,
            "[{} rows x {} columns]",
            head.len(),
            self.table.column_count()
        )
    }
}

/// The cell under `column`, or the elision marker for the gap.
fn cell(row: &[String], column: Option<usize>) -> String {
    column
        .and_then(|idx| row.get(idx).cloned())
        .unwrap_or_else(|| "...".to_string())
}

//! In-memory tabular data loaded from dataset files.
//!
//! A [`Table`] is deliberately untyped: cells stay as strings because the
//! table only exists to prove a file is structurally readable. The first CSV
//! record names the columns and every following record must have the same
//! width.

mod preview;

pub use preview::TablePreview;

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use crate::error::EcgstageError;

/// Rows of string cells under a set of named columns.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Table {
    source: PathBuf,
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    /// Builds a table from already parsed parts.
    pub fn new(source: impl Into<PathBuf>, columns: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self {
            source: source.into(),
            columns,
            rows,
        }
    }

    /// Where the table was read from (`<bytes>` for in-memory input).
    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty() || self.rows.is_empty()
    }

    /// The first `n` rows (fewer if the table is shorter).
    pub fn head(&self, n: usize) -> &[Vec<String>] {
        &self.rows[..n.min(self.rows.len())]
    }

    /// A displayable preview of the first `n` rows.
    pub fn preview(&self, n: usize) -> TablePreview<'_> {
        TablePreview::new(self, n)
    }
}

/// Reads a CSV file into a [`Table`].
///
/// # Errors
/// Returns [`EcgstageError::TableParse`] when the file cannot be opened or
/// holds malformed CSV, ragged rows or invalid UTF-8.
pub fn read_csv_table(path: &Path) -> Result<Table, EcgstageError> {
    let file = File::open(path).map_err(|source| EcgstageError::TableParse {
        path: path.to_path_buf(),
        source: source.into(),
    })?;
    read_csv_from_reader(BufReader::new(file), path)
}

/// Reads a table from CSV text.
///
/// Useful for testing without file I/O.
pub fn from_csv_str(csv_str: &str) -> Result<Table, EcgstageError> {
    from_csv_slice(csv_str.as_bytes())
}

/// Reads a table from CSV bytes.
///
/// Useful for fuzzing and processing raw bytes without requiring UTF-8 upfront.
pub fn from_csv_slice(bytes: &[u8]) -> Result<Table, EcgstageError> {
    read_csv_from_reader(bytes, Path::new("<bytes>"))
}

fn read_csv_from_reader<R: Read>(reader: R, path: &Path) -> Result<Table, EcgstageError> {
    let parse_error = |source| EcgstageError::TableParse {
        path: path.to_path_buf(),
        source,
    };

    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(false)
        .from_reader(reader);

    let columns: Vec<String> = csv_reader
        .headers()
        .map_err(parse_error)?
        .iter()
        .map(str::to_string)
        .collect();

    let mut rows = Vec::new();
    for result in csv_reader.records() {
        let record = result.map_err(parse_error)?;
        rows.push(record.iter().map(str::to_string).collect());
    }

    Ok(Table::new(path, columns, rows))
}

//! Dataset validation for ecgstage.
//!
//! Validation loads one named file of the dataset through the provider's
//! table adapter and checks that it is structurally usable:
//! - at least one named column and one data row (errors)
//! - unique, non-blank column names (warnings)
//! - no blank cells in the sampled rows (warnings)

mod report;

pub use report::{IssueCode, IssueContext, Severity, ValidationIssue, ValidationReport};

use std::collections::HashMap;

use crate::error::EcgstageError;
use crate::kaggle::DatasetRef;
use crate::provider::{DatasetProvider, TableAdapter};
use crate::table::Table;

/// Number of rows inspected and shown by default.
pub const DEFAULT_PREVIEW_ROWS: usize = 5;

/// Options for validation behavior.
#[derive(Clone, Debug)]
pub struct ValidateOptions {
    /// How many leading rows to sample.
    pub preview_rows: usize,
    /// Adapter used to parse the file.
    pub adapter: TableAdapter,
}

impl Default for ValidateOptions {
    fn default() -> Self {
        Self {
            preview_rows: DEFAULT_PREVIEW_ROWS,
            adapter: TableAdapter::Csv,
        }
    }
}

/// Loads `file_name` from the dataset through `provider` and validates it.
///
/// # Errors
/// Propagates provider and parse failures unchanged, and returns
/// [`EcgstageError::TableInvalid`] when the table has error-level issues.
pub fn validate_dataset<P: DatasetProvider + ?Sized>(
    provider: &P,
    reference: &DatasetRef,
    file_name: &str,
    opts: &ValidateOptions,
) -> Result<ValidationReport, EcgstageError> {
    let table = provider.load_table(reference, file_name, opts.adapter)?;
    tracing::debug!(
        "loaded {} with {} rows x {} columns",
        file_name,
        table.row_count(),
        table.column_count()
    );

    let report = validate_table(&table, file_name, opts);
    if report.is_ok() {
        Ok(report)
    } else {
        Err(EcgstageError::TableInvalid {
            path: table.source().to_path_buf(),
            message: report.error_summary(),
        })
    }
}

/// Inspects an already loaded table and returns the report.
///
/// The full table is not retained; the report only keeps the sampled rows.
pub fn validate_table(table: &Table, file_name: &str, opts: &ValidateOptions) -> ValidationReport {
    let sample = Table::new(
        table.source(),
        table.columns().to_vec(),
        table.head(opts.preview_rows).to_vec(),
    );
    let mut report = ValidationReport::new(file_name, table.row_count(), sample);

    if table.column_count() == 0 {
        report.add(ValidationIssue::error(
            IssueCode::NoColumns,
            "File has no header record",
            IssueContext::Table,
        ));
        return report;
    }

    if table.row_count() == 0 {
        report.add(ValidationIssue::error(
            IssueCode::NoRows,
            "File has a header but no data rows",
            IssueContext::Table,
        ));
    }

    validate_columns(table, &mut report);
    validate_sample_cells(table, opts.preview_rows, &mut report);

    report
}

fn validate_columns(table: &Table, report: &mut ValidationReport) {
    let mut seen: HashMap<&str, usize> = HashMap::new();

    for (index, name) in table.columns().iter().enumerate() {
        let context = IssueContext::Column {
            index,
            name: name.clone(),
        };

        if name.trim().is_empty() {
            report.add(ValidationIssue::warning(
                IssueCode::EmptyColumnName,
                "Empty column name",
                context,
            ));
            continue;
        }

        if let Some(first) = seen.get(name.as_str()) {
            report.add(ValidationIssue::warning(
                IssueCode::DuplicateColumnName,
                format!("Duplicate column name (first seen at column {})", first),
                context,
            ));
        } else {
            seen.insert(name, index);
        }
    }
}

fn validate_sample_cells(table: &Table, preview_rows: usize, report: &mut ValidationReport) {
    for (row_idx, row) in table.head(preview_rows).iter().enumerate() {
        for (cell, column) in row.iter().zip(table.columns()) {
            if cell.trim().is_empty() {
                report.add(ValidationIssue::warning(
                    IssueCode::EmptyCell,
                    "Blank value in sampled row",
                    IssueContext::Cell {
                        row: row_idx,
                        column: column.clone(),
                    },
                ));
            }
        }
    }
}

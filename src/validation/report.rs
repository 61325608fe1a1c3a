//! Validation report types for structured error reporting.
//!
//! A report keeps the sampled rows alongside any issues so the caller can
//! print the sanity-check preview and the verdict together.

use std::fmt;

use crate::table::Table;

/// The result of validating one dataset table.
#[derive(Clone, Debug)]
pub struct ValidationReport {
    /// Name of the validated file inside the dataset.
    pub file_name: String,
    /// Total data rows in the file (the sample holds at most `preview_rows`).
    pub row_count: usize,
    /// First rows of the table, kept for display.
    pub sample: Table,
    /// All issues found during validation.
    pub issues: Vec<ValidationIssue>,
}

impl ValidationReport {
    /// Creates a new report with no issues.
    pub fn new(file_name: impl Into<String>, row_count: usize, sample: Table) -> Self {
        Self {
            file_name: file_name.into(),
            row_count,
            sample,
            issues: Vec::new(),
        }
    }

    /// Adds an issue to the report.
    pub fn add(&mut self, issue: ValidationIssue) {
        self.issues.push(issue);
    }

    pub fn column_count(&self) -> usize {
        self.sample.column_count()
    }

    /// Returns the number of errors in the report.
    pub fn error_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|i| i.severity == Severity::Error)
            .count()
    }

    /// Returns the number of warnings in the report.
    pub fn warning_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|i| i.severity == Severity::Warning)
            .count()
    }

    /// Returns true if there are no errors.
    pub fn is_ok(&self) -> bool {
        self.error_count() == 0
    }

    /// Error messages joined into one line, for error values.
    pub fn error_summary(&self) -> String {
        self.issues
            .iter()
            .filter(|i| i.severity == Severity::Error)
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; ")
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "First {} records of {}:",
            self.sample.row_count(),
            self.file_name
        )?;
        write!(f, "{}", self.sample.preview(self.sample.row_count()))?;

        if self.issues.is_empty() {
            return writeln!(
                f,
                "Validation passed: {} rows x {} columns",
                self.row_count,
                self.column_count()
            );
        }

        writeln!(
            f,
            "Validation completed with {} error(s) and {} warning(s):",
            self.error_count(),
            self.warning_count()
        )?;
        for issue in &self.issues {
            writeln!(f, "  {}", issue)?;
        }

        Ok(())
    }
}

/// A single validation issue (error or warning).
#[derive(Clone, Debug)]
pub struct ValidationIssue {
    pub severity: Severity,
    pub code: IssueCode,
    pub message: String,
    pub context: IssueContext,
}

impl ValidationIssue {
    pub fn new(
        severity: Severity,
        code: IssueCode,
        message: impl Into<String>,
        context: IssueContext,
    ) -> Self {
        Self {
            severity,
            code,
            message: message.into(),
            context,
        }
    }

    pub fn error(code: IssueCode, message: impl Into<String>, context: IssueContext) -> Self {
        Self::new(Severity::Error, code, message, context)
    }

    pub fn warning(code: IssueCode, message: impl Into<String>, context: IssueContext) -> Self {
        Self::new(Severity::Warning, code, message, context)
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let severity = match self.severity {
            Severity::Error => "ERROR",
            Severity::Warning => "WARN ",
        };
        write!(
            f,
            "[{}] {:?} in {}: {}",
            severity, self.code, self.context, self.message
        )
    }
}

/// The severity of a validation issue.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Severity {
    /// Readable, but worth a look before downstream use.
    Warning,
    /// The table cannot be used.
    Error,
}

/// A stable code identifying the type of validation issue.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum IssueCode {
    /// The file has no header record.
    NoColumns,
    /// The file has a header but no data rows.
    NoRows,
    /// A header cell is blank.
    EmptyColumnName,
    /// Two header cells share a name.
    DuplicateColumnName,
    /// A sampled cell is blank.
    EmptyCell,
}

/// Context about where a validation issue occurred.
#[derive(Clone, Debug)]
pub enum IssueContext {
    Table,
    Column { index: usize, name: String },
    Cell { row: usize, column: String },
}

impl fmt::Display for IssueContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IssueContext::Table => write!(f, "table"),
            IssueContext::Column { index, name } => write!(f, "column {} '{}'", index, name),
            IssueContext::Cell { row, column } => write!(f, "row {} column '{}'", row, column),
        }
    }
}

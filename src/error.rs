use std::path::PathBuf;
use thiserror::Error;

use crate::pipeline::PipelineState;

/// Coarse error taxonomy used to report which kind of failure ended a run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// Provider, network, authentication or unknown-dataset failures.
    Fetch,
    /// The expected table file is missing or unreadable as tabular data.
    Validation,
    /// Filesystem failures while staging files.
    Io,
}

/// The main error type for ecgstage operations.
#[derive(Debug, Error)]
pub enum EcgstageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid dataset reference '{input}': {message}")]
    InvalidReference { input: String, message: String },

    #[error("Dataset provider unreachable while fetching '{reference}': {message}")]
    ProviderUnreachable { reference: String, message: String },

    #[error("Authentication with the dataset provider failed for '{reference}' (HTTP {status})")]
    AuthenticationFailed { reference: String, status: u16 },

    #[error("Dataset '{reference}' was not found by the provider")]
    DatasetNotFound { reference: String },

    #[error("Dataset provider error for '{reference}': {message}")]
    ProviderError { reference: String, message: String },

    #[error("Dataset provider is not configured: {message}")]
    Config { message: String },

    #[error("Failed to update provider cache at {path}: {source}")]
    CacheIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid provider credentials in {path}: {message}")]
    Credentials { path: PathBuf, message: String },

    #[error("Failed to unpack archive for '{reference}' at {path}: {message}")]
    ArchiveError {
        reference: String,
        path: PathBuf,
        message: String,
    },

    #[error("File '{file_name}' not found in dataset '{reference}' (looked in {path})")]
    TableMissing {
        reference: String,
        file_name: String,
        path: PathBuf,
    },

    #[error("Failed to parse table from {path}: {source}")]
    TableParse {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("Table {path} failed validation: {message}")]
    TableInvalid { path: PathBuf, message: String },

    #[error("Failed to {action} {path}: {source}")]
    StagingIo {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Pipeline failed after reaching state {reached:?}: {source}")]
    PipelineFailed {
        reached: PipelineState,
        #[source]
        source: Box<EcgstageError>,
    },
}

impl EcgstageError {
    /// Maps this error onto the fetch / validation / io taxonomy.
    pub fn kind(&self) -> ErrorKind {
        match self {
            EcgstageError::InvalidReference { .. }
            | EcgstageError::ProviderUnreachable { .. }
            | EcgstageError::AuthenticationFailed { .. }
            | EcgstageError::DatasetNotFound { .. }
            | EcgstageError::ProviderError { .. }
            | EcgstageError::Config { .. }
            | EcgstageError::CacheIo { .. }
            | EcgstageError::Credentials { .. }
            | EcgstageError::ArchiveError { .. } => ErrorKind::Fetch,
            EcgstageError::TableMissing { .. }
            | EcgstageError::TableParse { .. }
            | EcgstageError::TableInvalid { .. } => ErrorKind::Validation,
            EcgstageError::Io(_) | EcgstageError::StagingIo { .. } => ErrorKind::Io,
            EcgstageError::PipelineFailed { source, .. } => source.kind(),
        }
    }
}

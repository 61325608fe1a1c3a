//! The fetch → validate → stage pipeline.
//!
//! A run walks `Init → Fetched → Validated → Staged → Done`. The first
//! failing stage moves the run to `Failed` and its error is returned wrapped
//! in [`EcgstageError::PipelineFailed`] together with the last state reached.
//! Nothing is retried and nothing is persisted between runs.

use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::EcgstageError;
use crate::kaggle::DatasetRef;
use crate::provider::{DatasetProvider, TableAdapter};
use crate::stage::{self, StageReport};
use crate::validation::{self, ValidateOptions, ValidationReport, DEFAULT_PREVIEW_ROWS};

/// Dataset staged by the `ecgstage` binary.
pub const ECG_DATASET: &str = "devavratatripathy/ecg-dataset";

/// File validated inside [`ECG_DATASET`].
pub const ECG_TABLE_FILE: &str = "ecg.csv";

/// Destination relative to the working directory.
pub const ECG_DESTINATION: &str = "backend/data/ecg_dataset";

/// Lifecycle of a single pipeline run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PipelineState {
    Init,
    Fetched,
    Validated,
    Staged,
    Done,
    Failed,
}

/// Everything a run needs; no ambient process state is consulted.
#[derive(Clone, Debug)]
pub struct PipelineConfig {
    pub dataset: DatasetRef,
    /// File loaded by the validator.
    pub table_file: String,
    pub preview_rows: usize,
    /// Directory files are staged into.
    pub destination: PathBuf,
}

impl PipelineConfig {
    /// The fixed ECG configuration rooted at `working_dir`.
    pub fn ecg(working_dir: &Path) -> Result<Self, EcgstageError> {
        Ok(Self {
            dataset: ECG_DATASET.parse()?,
            table_file: ECG_TABLE_FILE.to_string(),
            preview_rows: DEFAULT_PREVIEW_ROWS,
            destination: working_dir.join(ECG_DESTINATION),
        })
    }
}

/// Results of a successful run.
#[derive(Clone, Debug)]
pub struct PipelineOutcome {
    pub source_dir: PathBuf,
    pub validation: ValidationReport,
    pub staging: StageReport,
}

/// One pipeline run against an injected provider.
pub struct Pipeline<'a, P: DatasetProvider + ?Sized> {
    provider: &'a P,
    config: PipelineConfig,
    state: PipelineState,
}

impl<'a, P: DatasetProvider + ?Sized> Pipeline<'a, P> {
    pub fn new(provider: &'a P, config: PipelineConfig) -> Self {
        Self {
            provider,
            config,
            state: PipelineState::Init,
        }
    }

    pub fn state(&self) -> PipelineState {
        self.state
    }

    /// Runs every stage in order, writing progress lines to `out`.
    pub fn run<W: Write>(&mut self, out: &mut W) -> Result<PipelineOutcome, EcgstageError> {
        self.state = PipelineState::Init;
        match self.run_stages(out) {
            Ok(outcome) => {
                self.state = PipelineState::Done;
                tracing::info!("pipeline finished for {}", self.config.dataset);
                Ok(outcome)
            }
            Err(source) => {
                let reached = self.state;
                self.state = PipelineState::Failed;
                tracing::info!("pipeline failed after {:?}: {}", reached, source);
                Err(EcgstageError::PipelineFailed {
                    reached,
                    source: Box::new(source),
                })
            }
        }
    }

    fn run_stages<W: Write>(&mut self, out: &mut W) -> Result<PipelineOutcome, EcgstageError> {
        let dataset = self.config.dataset.clone();

        writeln!(out, "Downloading requested dataset ({dataset})...")?;
        let source_dir = self.provider.download(&dataset)?;
        self.advance(PipelineState::Fetched);
        writeln!(out, "Path to dataset files: {}", source_dir.display())?;

        writeln!(out, "Validating dataset records...")?;
        let opts = ValidateOptions {
            preview_rows: self.config.preview_rows,
            adapter: TableAdapter::Csv,
        };
        let report =
            validation::validate_dataset(self.provider, &dataset, &self.config.table_file, &opts)?;
        self.advance(PipelineState::Validated);
        write!(out, "{report}")?;

        let mut progress_error = None;
        let staging = stage::stage_files_with(&source_dir, &self.config.destination, |file| {
            if progress_error.is_none() {
                if let Err(err) = writeln!(
                    out,
                    "Copied {} to {}",
                    file.name.to_string_lossy(),
                    self.config.destination.display()
                ) {
                    progress_error = Some(err);
                }
            }
        })?;
        if let Some(err) = progress_error {
            return Err(err.into());
        }
        self.advance(PipelineState::Staged);

        writeln!(out, "Dataset integration and validation complete.")?;

        Ok(PipelineOutcome {
            source_dir,
            validation: report,
            staging,
        })
    }

    fn advance(&mut self, next: PipelineState) {
        tracing::debug!("pipeline {:?} -> {:?}", self.state, next);
        self.state = next;
    }
}

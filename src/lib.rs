//! Ecgstage: fetch, validate and stage the ECG dataset.
//!
//! Ecgstage downloads a Kaggle dataset into the shared provider cache, checks
//! that its main table parses, and copies the dataset files into a local
//! directory that downstream services read from.
//!
//! # Modules
//!
//! - [`kaggle`]: Dataset references and the Kaggle provider (download + cache)
//! - [`provider`]: The provider trait the pipeline depends on
//! - [`table`]: CSV tables and their terminal preview
//! - [`validation`]: Table sanity checks and reports
//! - [`stage`]: Flat, non-destructive copying into the destination
//! - [`pipeline`]: The fetch → validate → stage state machine
//! - [`error`]: Error types for ecgstage operations

pub mod error;
pub mod kaggle;
pub mod logging;
pub mod pipeline;
pub mod provider;
pub mod stage;
pub mod table;
pub mod validation;

use clap::{ArgAction, Parser};

pub use error::{EcgstageError, ErrorKind};
pub use kaggle::{DatasetRef, KaggleConfig, KaggleProvider};
pub use pipeline::{Pipeline, PipelineConfig, PipelineOutcome, PipelineState};
pub use provider::{DatasetProvider, TableAdapter};

/// The ecgstage CLI application.
///
/// The dataset and destination are fixed; the only knobs are provider
/// environment variables (`KAGGLE_USERNAME`, `KAGGLE_KEY`,
/// `KAGGLE_CONFIG_DIR`, `KAGGLEHUB_CACHE`, `KAGGLE_API_ENDPOINT`) and log
/// verbosity.
#[derive(Parser)]
#[command(name = "ecgstage")]
#[command(version, author, about)]
struct Cli {
    /// Increase log verbosity (-v, -vv, -vvv). RUST_LOG overrides.
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

/// Run the ecgstage CLI.
///
/// This is the main entry point for the CLI, called from `main.rs`.
pub fn run() -> Result<(), EcgstageError> {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);

    let working_dir = std::env::current_dir()?;
    let config = PipelineConfig::ecg(&working_dir)?;
    tracing::debug!("staging into {}", config.destination.display());

    let provider = KaggleProvider::from_env()?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    Pipeline::new(&provider, config).run(&mut out)?;

    Ok(())
}

//! Kaggle dataset provider.
//!
//! This module owns remote-specific concerns (reference resolution,
//! credentials, download and the on-disk cache). Table parsing stays in
//! `crate::table`.

pub mod acquire;
pub mod credentials;
pub mod resolve;

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::error::EcgstageError;
use crate::provider::DatasetProvider;

pub use credentials::KaggleCredentials;

/// Default public API host.
pub const DEFAULT_ENDPOINT: &str = "https://www.kaggle.com";

/// Default global timeout for a single API request, including the body.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(300);

/// Canonical reference to a Kaggle dataset.
///
/// Owner and dataset slugs are validated on construction because they end
/// up both in API URLs and in cache paths.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct DatasetRef {
    owner: String,
    dataset: String,
    version: Option<u64>,
}

impl DatasetRef {
    pub fn new(
        owner: impl Into<String>,
        dataset: impl Into<String>,
    ) -> Result<Self, EcgstageError> {
        let owner = owner.into();
        let dataset = dataset.into();
        if !resolve::is_valid_slug(&owner) || !resolve::is_valid_slug(&dataset) {
            return Err(EcgstageError::InvalidReference {
                input: format!("{owner}/{dataset}"),
                message: "owner and dataset may only contain letters, digits, '-', '_' and '.'"
                    .to_string(),
            });
        }
        Ok(Self {
            owner,
            dataset,
            version: None,
        })
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn dataset(&self) -> &str {
        &self.dataset
    }

    /// The pinned version, if any.
    pub fn version(&self) -> Option<u64> {
        self.version
    }

    /// Pins the reference to a specific dataset version.
    pub fn with_version(mut self, version: u64) -> Self {
        self.version = Some(version);
        self
    }

    /// `owner/dataset` without any version suffix.
    pub fn handle(&self) -> String {
        format!("{}/{}", self.owner, self.dataset)
    }
}

impl fmt::Display for DatasetRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.dataset)?;
        if let Some(version) = self.version {
            write!(f, "/versions/{version}")?;
        }
        Ok(())
    }
}

impl FromStr for DatasetRef {
    type Err = EcgstageError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        resolve::parse_dataset_input(input)
    }
}

/// Connection and cache settings for [`KaggleProvider`].
#[derive(Clone, Debug)]
pub struct KaggleConfig {
    /// API host, without the `/api/v1` suffix.
    pub endpoint: String,
    /// Root of the shared dataset cache.
    pub cache_root: PathBuf,
    pub timeout: Duration,
    pub credentials: Option<KaggleCredentials>,
}

impl KaggleConfig {
    /// Builds a configuration from `KAGGLE_API_ENDPOINT`, `KAGGLEHUB_CACHE`
    /// and the usual Kaggle credential sources.
    pub fn from_env() -> Result<Self, EcgstageError> {
        let endpoint = std::env::var("KAGGLE_API_ENDPOINT")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());

        let cache_root = match std::env::var_os("KAGGLEHUB_CACHE") {
            Some(value) if !value.is_empty() => PathBuf::from(value),
            _ => default_cache_root()?,
        };

        Ok(Self {
            endpoint: endpoint.trim_end_matches('/').to_string(),
            cache_root,
            timeout: DEFAULT_TIMEOUT,
            credentials: credentials::load_credentials()?,
        })
    }

    /// `<cache_root>/datasets/<owner>/<dataset>/versions/<version>`.
    pub fn version_dir(&self, reference: &DatasetRef, version: u64) -> PathBuf {
        self.cache_root
            .join("datasets")
            .join(reference.owner())
            .join(reference.dataset())
            .join("versions")
            .join(version.to_string())
    }
}

/// The cache directory shared with the Python `kagglehub` client.
fn default_cache_root() -> Result<PathBuf, EcgstageError> {
    let dirs = directories::BaseDirs::new().ok_or_else(|| EcgstageError::Config {
        message: "could not determine the home directory; set KAGGLEHUB_CACHE".to_string(),
    })?;
    Ok(dirs.home_dir().join(".cache").join("kagglehub"))
}

/// Provider backed by the Kaggle public API and a local version cache.
#[derive(Clone, Debug)]
pub struct KaggleProvider {
    config: KaggleConfig,
}

impl KaggleProvider {
    pub fn new(config: KaggleConfig) -> Self {
        Self { config }
    }

    pub fn from_env() -> Result<Self, EcgstageError> {
        KaggleConfig::from_env().map(Self::new)
    }
}

impl DatasetProvider for KaggleProvider {
    fn download(&self, reference: &DatasetRef) -> Result<PathBuf, EcgstageError> {
        acquire::acquire(&self.config, reference)
    }
}

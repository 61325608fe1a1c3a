use std::fmt;
use std::path::{Path, PathBuf};

use base64::Engine;
use serde::Deserialize;

use crate::error::EcgstageError;

/// API credentials for the Kaggle public API.
#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct KaggleCredentials {
    pub username: String,
    pub key: String,
}

impl KaggleCredentials {
    pub fn new(username: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            key: key.into(),
        }
    }

    /// Value for the `Authorization` header.
    pub fn basic_auth_header(&self) -> String {
        let raw = format!("{}:{}", self.username, self.key);
        format!(
            "Basic {}",
            base64::engine::general_purpose::STANDARD.encode(raw)
        )
    }
}

// Keep the key out of logs and error output.
impl fmt::Debug for KaggleCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KaggleCredentials")
            .field("username", &self.username)
            .field("key", &"<redacted>")
            .finish()
    }
}

/// Load credentials from `KAGGLE_USERNAME`/`KAGGLE_KEY`, falling back to
/// `kaggle.json` in `KAGGLE_CONFIG_DIR` or `~/.kaggle`.
///
/// Returns `Ok(None)` when no credentials are configured; public datasets
/// can still be downloaded anonymously.
pub fn load_credentials() -> Result<Option<KaggleCredentials>, EcgstageError> {
    let config_file = std::env::var_os("KAGGLE_CONFIG_DIR")
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
        .or_else(|| directories::BaseDirs::new().map(|dirs| dirs.home_dir().join(".kaggle")))
        .map(|dir| dir.join("kaggle.json"));

    credentials_from_sources(
        std::env::var("KAGGLE_USERNAME").ok(),
        std::env::var("KAGGLE_KEY").ok(),
        config_file.as_deref(),
    )
}

/// Resolve credentials from explicit sources. Environment values win over
/// the config file.
pub fn credentials_from_sources(
    env_username: Option<String>,
    env_key: Option<String>,
    config_file: Option<&Path>,
) -> Result<Option<KaggleCredentials>, EcgstageError> {
    let env_username = env_username.filter(|value| !value.trim().is_empty());
    let env_key = env_key.filter(|value| !value.trim().is_empty());

    match (env_username, env_key) {
        (Some(username), Some(key)) => return Ok(Some(KaggleCredentials::new(username, key))),
        (Some(_), None) | (None, Some(_)) => {
            tracing::warn!("only one of KAGGLE_USERNAME/KAGGLE_KEY is set; ignoring both");
        }
        (None, None) => {}
    }

    let Some(path) = config_file else {
        return Ok(None);
    };
    if !path.is_file() {
        tracing::debug!("no Kaggle credentials file at {}", path.display());
        return Ok(None);
    }

    read_credentials_file(path).map(Some)
}

fn read_credentials_file(path: &Path) -> Result<KaggleCredentials, EcgstageError> {
    let data = std::fs::read_to_string(path).map_err(|source| EcgstageError::Credentials {
        path: path.to_path_buf(),
        message: source.to_string(),
    })?;

    let credentials: KaggleCredentials =
        serde_json::from_str(&data).map_err(|source| EcgstageError::Credentials {
            path: path.to_path_buf(),
            message: source.to_string(),
        })?;

    if credentials.username.trim().is_empty() || credentials.key.trim().is_empty() {
        return Err(EcgstageError::Credentials {
            path: path.to_path_buf(),
            message: "'username' and 'key' must be non-empty".to_string(),
        });
    }

    tracing::debug!("loaded Kaggle credentials from {}", path.display());
    Ok(credentials)
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::error::ErrorKind;

    #[test]
    fn environment_wins_over_file() {
        let temp = tempfile::tempdir().expect("tempdir");
        let file = temp.path().join("kaggle.json");
        std::fs::write(&file, r#"{"username":"file-user","key":"file-key"}"#).expect("write");

        let creds = credentials_from_sources(
            Some("env-user".to_string()),
            Some("env-key".to_string()),
            Some(&file),
        )
        .expect("load")
        .expect("credentials");
        assert_eq!(creds, KaggleCredentials::new("env-user", "env-key"));
    }

    #[test]
    fn file_is_used_when_environment_is_incomplete() {
        let temp = tempfile::tempdir().expect("tempdir");
        let file = temp.path().join("kaggle.json");
        std::fs::write(&file, r#"{"username":"file-user","key":"file-key"}"#).expect("write");

        let creds = credentials_from_sources(Some("env-user".to_string()), None, Some(&file))
            .expect("load")
            .expect("credentials");
        assert_eq!(creds.username, "file-user");
    }

    #[test]
    fn missing_file_means_anonymous() {
        let temp = tempfile::tempdir().expect("tempdir");
        let creds =
            credentials_from_sources(None, None, Some(&temp.path().join("kaggle.json")))
                .expect("load");
        assert!(creds.is_none());
    }

    #[test]
    fn malformed_file_is_fetch_error() {
        let temp = tempfile::tempdir().expect("tempdir");
        let file = temp.path().join("kaggle.json");
        std::fs::write(&file, "{not json").expect("write");

        let err = credentials_from_sources(None, None, Some(&file)).expect_err("malformed");
        assert_eq!(err.kind(), ErrorKind::Fetch);
        assert!(err.to_string().contains("kaggle.json"));
    }

    #[test]
    fn basic_auth_header_is_base64() {
        let creds = KaggleCredentials::new("user", "key");
        assert_eq!(creds.basic_auth_header(), "Basic dXNlcjprZXk=");
    }

    #[test]
    fn debug_output_hides_key() {
        let creds = KaggleCredentials::new("user", "secret-key");
        let rendered = format!("{creds:?}");
        assert!(!rendered.contains("secret-key"));
    }
}

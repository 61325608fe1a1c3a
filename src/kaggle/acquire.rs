use std::fs::{self, File};
use std::io::{self, BufReader, Read, Write};
use std::path::{Path, PathBuf};

use serde::Deserialize;
use ureq::http::Response;
use ureq::Body;
use url::Url;

use crate::error::EcgstageError;

use super::{DatasetRef, KaggleConfig};

/// Marker written next to a version directory once it is fully unpacked.
const COMPLETE_SUFFIX: &str = "complete";

/// Leading bytes of a zip local file header.
const ZIP_MAGIC: [u8; 4] = *b"PK\x03\x04";

/// Subset of the dataset metadata response used for version resolution.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DatasetView {
    current_version_number: Option<u64>,
}

/// Download a dataset version into the cache, or reuse it when a previous
/// run already completed it. Returns the version directory.
///
/// Nothing is written to the cache until the download request succeeds.
pub fn acquire(config: &KaggleConfig, reference: &DatasetRef) -> Result<PathBuf, EcgstageError> {
    let agent = build_agent(config);

    let version = match reference.version() {
        Some(version) => version,
        None => resolve_current_version(&agent, config, reference)?,
    };

    let version_dir = config.version_dir(reference, version);
    let marker = completion_marker(&version_dir);

    if marker.is_file() && version_dir.is_dir() {
        tracing::debug!(
            "cache hit for {} version {} at {}",
            reference.handle(),
            version,
            version_dir.display()
        );
        return Ok(version_dir);
    }

    let mut url = api_url(
        config,
        &["datasets", "download", reference.owner(), reference.dataset()],
    )?;
    url.query_pairs_mut()
        .append_pair("datasetVersionNumber", &version.to_string());
    tracing::info!("downloading {} version {}", reference.handle(), version);
    let response = get(&agent, config, &url, reference)?;
    let served_name = content_disposition_file_name(&response);

    prepare_version_dir(&version_dir)?;

    let archive_path = version_dir.with_extension("archive");
    let written = match stream_to_file(response.into_body(), &archive_path, reference) {
        Ok(written) => written,
        Err(err) => {
            discard_archive(&archive_path);
            return Err(err);
        }
    };
    tracing::debug!(
        "downloaded {} bytes to {}",
        written,
        archive_path.display()
    );

    let result = match is_zip(&archive_path) {
        Ok(true) => unpack_zip(&archive_path, &version_dir, reference),
        Ok(false) => {
            let file_name = served_name.unwrap_or_else(|| reference.dataset().to_string());
            let target = version_dir.join(file_name);
            fs::rename(&archive_path, &target).map_err(|source| EcgstageError::CacheIo {
                path: target,
                source,
            })
        }
        Err(source) => Err(EcgstageError::CacheIo {
            path: archive_path.clone(),
            source,
        }),
    };
    discard_archive(&archive_path);
    result?;

    File::create(&marker).map_err(|source| EcgstageError::CacheIo {
        path: marker.clone(),
        source,
    })?;

    Ok(version_dir)
}

/// `<versions>/<n>.complete` for a `<versions>/<n>` directory.
pub fn completion_marker(version_dir: &Path) -> PathBuf {
    version_dir.with_extension(COMPLETE_SUFFIX)
}

/// Clears an entry left behind by an interrupted run and recreates it empty.
fn prepare_version_dir(version_dir: &Path) -> Result<(), EcgstageError> {
    let cache_error = |source| EcgstageError::CacheIo {
        path: version_dir.to_path_buf(),
        source,
    };
    if version_dir.exists() {
        tracing::debug!(
            "discarding incomplete cache entry {}",
            version_dir.display()
        );
        fs::remove_dir_all(version_dir).map_err(cache_error)?;
    }
    fs::create_dir_all(version_dir).map_err(cache_error)
}

fn discard_archive(archive_path: &Path) {
    if !archive_path.exists() {
        return;
    }
    if let Err(source) = fs::remove_file(archive_path) {
        tracing::warn!(
            "could not remove {}: {}",
            archive_path.display(),
            source
        );
    }
}

/// `<endpoint>/api/v1/<segments...>`, with each segment percent-encoded.
fn api_url(config: &KaggleConfig, segments: &[&str]) -> Result<Url, EcgstageError> {
    let mut url = Url::parse(&config.endpoint).map_err(|source| EcgstageError::Config {
        message: format!("invalid API endpoint '{}': {source}", config.endpoint),
    })?;
    url.path_segments_mut()
        .map_err(|()| EcgstageError::Config {
            message: format!("API endpoint '{}' cannot take a path", config.endpoint),
        })?
        .pop_if_empty()
        .extend(["api", "v1"])
        .extend(segments);
    Ok(url)
}

fn build_agent(config: &KaggleConfig) -> ureq::Agent {
    let agent_config = ureq::Agent::config_builder()
        .timeout_global(Some(config.timeout))
        .build();
    agent_config.into()
}

fn get(
    agent: &ureq::Agent,
    config: &KaggleConfig,
    url: &Url,
    reference: &DatasetRef,
) -> Result<Response<Body>, EcgstageError> {
    let mut request = agent.get(url.as_str());
    if let Some(credentials) = config.credentials.as_ref() {
        request = request.header("Authorization", &credentials.basic_auth_header());
    }
    request
        .call()
        .map_err(|source| map_request_error(reference, source))
}

fn map_request_error(reference: &DatasetRef, source: ureq::Error) -> EcgstageError {
    let reference = reference.handle();
    match source {
        ureq::Error::StatusCode(status @ (401 | 403)) => {
            EcgstageError::AuthenticationFailed { reference, status }
        }
        ureq::Error::StatusCode(404) => EcgstageError::DatasetNotFound { reference },
        ureq::Error::StatusCode(status) => EcgstageError::ProviderError {
            reference,
            message: format!("unexpected HTTP status {status}"),
        },
        other => EcgstageError::ProviderUnreachable {
            reference,
            message: other.to_string(),
        },
    }
}

fn resolve_current_version(
    agent: &ureq::Agent,
    config: &KaggleConfig,
    reference: &DatasetRef,
) -> Result<u64, EcgstageError> {
    let url = api_url(
        config,
        &["datasets", "view", reference.owner(), reference.dataset()],
    )?;
    let mut response = get(agent, config, &url, reference)?;
    let view: DatasetView =
        response
            .body_mut()
            .read_json()
            .map_err(|source| EcgstageError::ProviderError {
                reference: reference.handle(),
                message: format!("invalid dataset metadata: {source}"),
            })?;

    let version = view
        .current_version_number
        .ok_or_else(|| EcgstageError::ProviderError {
            reference: reference.handle(),
            message: "dataset metadata has no currentVersionNumber".to_string(),
        })?;
    tracing::debug!("{} resolved to version {}", reference.handle(), version);
    Ok(version)
}

fn stream_to_file(
    body: Body,
    path: &Path,
    reference: &DatasetRef,
) -> Result<u64, EcgstageError> {
    let mut file = File::create(path).map_err(|source| EcgstageError::CacheIo {
        path: path.to_path_buf(),
        source,
    })?;
    let mut reader = body.into_reader();
    let written = io::copy(&mut reader, &mut file).map_err(|source| {
        EcgstageError::ProviderUnreachable {
            reference: reference.handle(),
            message: format!("download interrupted: {source}"),
        }
    })?;
    file.flush().map_err(|source| EcgstageError::CacheIo {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(written)
}

fn is_zip(path: &Path) -> io::Result<bool> {
    let mut magic = [0u8; 4];
    match File::open(path)?.read_exact(&mut magic) {
        Ok(()) => Ok(magic == ZIP_MAGIC),
        Err(err) if err.kind() == io::ErrorKind::UnexpectedEof => Ok(false),
        Err(err) => Err(err),
    }
}

fn unpack_zip(
    archive_path: &Path,
    target_dir: &Path,
    reference: &DatasetRef,
) -> Result<(), EcgstageError> {
    let archive_error = |message: String| EcgstageError::ArchiveError {
        reference: reference.handle(),
        path: archive_path.to_path_buf(),
        message,
    };

    let file = File::open(archive_path).map_err(|source| archive_error(source.to_string()))?;
    let mut archive = zip::ZipArchive::new(BufReader::new(file))
        .map_err(|source| archive_error(source.to_string()))?;
    tracing::debug!(
        "extracting {} entries into {}",
        archive.len(),
        target_dir.display()
    );
    archive
        .extract(target_dir)
        .map_err(|source| archive_error(source.to_string()))
}

/// File name from a `Content-Disposition: attachment; filename=...` header.
fn content_disposition_file_name(response: &Response<Body>) -> Option<String> {
    let header = response
        .headers()
        .get("content-disposition")?
        .to_str()
        .ok()?;
    parse_disposition_file_name(header)
}

fn parse_disposition_file_name(header: &str) -> Option<String> {
    header
        .split(';')
        .map(str::trim)
        .find_map(|part| part.strip_prefix("filename="))
        .map(|value| value.trim_matches('"'))
        .and_then(|value| Path::new(value).file_name())
        .and_then(|name| name.to_str())
        .filter(|name| !name.is_empty())
        .map(str::to_string)
}

//! Copies fetched dataset files into the system-owned destination directory.
//!
//! Staging is flat and non-destructive: only the immediate regular files of
//! the source are copied, same-named destination files are overwritten, and
//! nothing else in the destination is touched. The first I/O failure aborts
//! the run; files copied before it stay in place.

mod report;

pub use report::{SkipReason, SkippedEntry, StageReport, StagedFile};

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::EcgstageError;

/// Copies every regular file directly inside `source` into `destination`.
///
/// Equivalent to [`stage_files_with`] without a progress callback.
pub fn stage_files(source: &Path, destination: &Path) -> Result<StageReport, EcgstageError> {
    stage_files_with(source, destination, |_| {})
}

/// Copies every regular file directly inside `source` into `destination`,
/// calling `on_copied` after each file lands.
///
/// Entries are visited in file-name order so repeated runs copy in the same
/// sequence. Symlinks are followed when deciding whether an entry is a
/// regular file; dangling links and directories are skipped, never recursed.
///
/// # Errors
/// Returns [`EcgstageError::StagingIo`] naming the directory or file that
/// could not be created, listed or copied.
pub fn stage_files_with<F>(
    source: &Path,
    destination: &Path,
    mut on_copied: F,
) -> Result<StageReport, EcgstageError>
where
    F: FnMut(&StagedFile),
{
    fs::create_dir_all(destination).map_err(|source| EcgstageError::StagingIo {
        action: "create directory",
        path: destination.to_path_buf(),
        source,
    })?;

    if same_directory(source, destination) {
        return Err(EcgstageError::StagingIo {
            action: "stage into its own source directory",
            path: destination.to_path_buf(),
            source: io::Error::from(io::ErrorKind::InvalidInput),
        });
    }

    let mut report = StageReport::new(destination);

    let walker = WalkDir::new(source)
        .min_depth(1)
        .max_depth(1)
        .follow_links(false)
        .sort_by_file_name();

    for entry in walker {
        let entry = entry.map_err(|err| EcgstageError::StagingIo {
            action: "list",
            path: err
                .path()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| source.to_path_buf()),
            source: err.into(),
        })?;

        let name = entry.file_name().to_os_string();
        let skip_reason = match fs::metadata(entry.path()) {
            Ok(metadata) if metadata.is_dir() => Some(SkipReason::Directory),
            Ok(metadata) if !metadata.is_file() => Some(SkipReason::NotRegularFile),
            Ok(_) => None,
            Err(_) if entry.path_is_symlink() => Some(SkipReason::DanglingLink),
            Err(source) => {
                return Err(EcgstageError::StagingIo {
                    action: "inspect",
                    path: entry.path().to_path_buf(),
                    source,
                })
            }
        };
        if let Some(reason) = skip_reason {
            tracing::debug!("skipping {} ({})", entry.path().display(), reason);
            report.skipped.push(SkippedEntry::new(name, reason));
            continue;
        }

        let target: PathBuf = destination.join(&name);
        let bytes = fs::copy(entry.path(), &target).map_err(|source| EcgstageError::StagingIo {
            action: "copy",
            path: entry.path().to_path_buf(),
            source,
        })?;

        let staged = StagedFile {
            name,
            path: target,
            bytes,
        };
        on_copied(&staged);
        report.copied.push(staged);
    }

    tracing::info!(
        "staged {} file(s) into {} ({} skipped)",
        report.copied.len(),
        destination.display(),
        report.skipped.len()
    );

    Ok(report)
}

fn same_directory(a: &Path, b: &Path) -> bool {
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

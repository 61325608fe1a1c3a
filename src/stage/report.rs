use std::ffi::OsString;
use std::fmt;
use std::path::{Path, PathBuf};

/// A file copied into the destination.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StagedFile {
    pub name: OsString,
    /// Full destination path.
    pub path: PathBuf,
    pub bytes: u64,
}

/// Why a source entry was not copied.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SkipReason {
    Directory,
    DanglingLink,
    NotRegularFile,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            SkipReason::Directory => "directory",
            SkipReason::DanglingLink => "dangling link",
            SkipReason::NotRegularFile => "not a regular file",
        };
        f.write_str(text)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SkippedEntry {
    pub name: OsString,
    pub reason: SkipReason,
}

impl SkippedEntry {
    pub fn new(name: OsString, reason: SkipReason) -> Self {
        Self { name, reason }
    }
}

/// Outcome of a staging run.
#[derive(Clone, Debug)]
pub struct StageReport {
    pub destination: PathBuf,
    pub copied: Vec<StagedFile>,
    pub skipped: Vec<SkippedEntry>,
}

impl StageReport {
    pub fn new(destination: &Path) -> Self {
        Self {
            destination: destination.to_path_buf(),
            copied: Vec::new(),
            skipped: Vec::new(),
        }
    }

    /// Names of copied files, lossily converted for display and assertions.
    pub fn copied_names(&self) -> Vec<String> {
        self.copied
            .iter()
            .map(|file| file.name.to_string_lossy().into_owned())
            .collect()
    }
}

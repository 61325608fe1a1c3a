#![allow(dead_code)]

pub mod kaggle_server;

use std::cell::Cell;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use ecgstage::{DatasetProvider, DatasetRef, EcgstageError};

/// Header of the ECG table: 140 signal columns plus the label.
pub fn ecg_header() -> String {
    let mut columns: Vec<String> = (1..=140).map(|i| format!("heartbeat_signal_{i}")).collect();
    columns.push("target".to_string());
    columns.join(",")
}

/// A small ECG-shaped CSV with `rows` data rows.
pub fn ecg_csv(rows: usize) -> String {
    let mut out = ecg_header();
    out.push('\n');
    for row in 0..rows {
        let values: Vec<String> = (0..140)
            .map(|col| format!("{:.6}", (row * 140 + col) as f64 * 0.001 - 0.5))
            .collect();
        out.push_str(&values.join(","));
        out.push_str(&format!(",{}\n", row % 2));
    }
    out
}

/// Provider double that serves a fixed directory and counts calls.
pub struct StubProvider {
    pub root: PathBuf,
    pub known: DatasetRef,
    pub downloads: Cell<usize>,
}

impl StubProvider {
    pub fn new(root: &Path, known: DatasetRef) -> Self {
        Self {
            root: root.to_path_buf(),
            known,
            downloads: Cell::new(0),
        }
    }
}

impl DatasetProvider for StubProvider {
    fn download(&self, reference: &DatasetRef) -> Result<PathBuf, EcgstageError> {
        self.downloads.set(self.downloads.get() + 1);
        if reference.handle() != self.known.handle() {
            return Err(EcgstageError::DatasetNotFound {
                reference: reference.handle(),
            });
        }
        Ok(self.root.clone())
    }
}

/// Regular files directly inside `dir`, mapped to their contents.
pub fn file_contents(dir: &Path) -> BTreeMap<String, Vec<u8>> {
    let mut files = BTreeMap::new();
    for entry in fs::read_dir(dir).expect("read dir") {
        let entry = entry.expect("dir entry");
        if entry.file_type().expect("file type").is_file() {
            files.insert(
                entry.file_name().to_string_lossy().into_owned(),
                fs::read(entry.path()).expect("read file"),
            );
        }
    }
    files
}

pub fn write_file(path: &Path, contents: impl AsRef<[u8]>) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create parent dir");
    }
    fs::write(path, contents).expect("write file");
}

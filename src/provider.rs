//! The dataset provider boundary.
//!
//! The pipeline only ever talks to a provider through [`DatasetProvider`], so
//! the Kaggle client can be swapped for a stub that serves a fixed directory.

use std::path::{Path, PathBuf};

use crate::error::EcgstageError;
use crate::kaggle::DatasetRef;
use crate::table::{read_csv_table, Table};

/// How a dataset file is turned into a [`Table`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TableAdapter {
    /// Comma-separated values with a header row.
    #[default]
    Csv,
}

/// External collaborator that owns dataset download and caching.
pub trait DatasetProvider {
    /// Download (or reuse a cached copy of) the dataset and return the local
    /// directory holding its files.
    fn download(&self, reference: &DatasetRef) -> Result<PathBuf, EcgstageError>;

    /// Load one file of the dataset as a table.
    ///
    /// The default implementation resolves the dataset through
    /// [`DatasetProvider::download`] again and reads the file from there.
    fn load_table(
        &self,
        reference: &DatasetRef,
        file_name: &str,
        adapter: TableAdapter,
    ) -> Result<Table, EcgstageError> {
        let root = self.download(reference)?;
        load_table_from_dir(&root, reference, file_name, adapter)
    }
}

/// Read `file_name` from an already downloaded dataset directory.
pub fn load_table_from_dir(
    root: &Path,
    reference: &DatasetRef,
    file_name: &str,
    adapter: TableAdapter,
) -> Result<Table, EcgstageError> {
    let path = root.join(file_name);
    if !path.is_file() {
        return Err(EcgstageError::TableMissing {
            reference: reference.to_string(),
            file_name: file_name.to_string(),
            path: root.to_path_buf(),
        });
    }

    match adapter {
        TableAdapter::Csv => read_csv_table(&path),
    }
}

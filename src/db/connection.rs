use crate::errors::Error;
use std::fs;
use std::path::{Path, PathBuf};

pub const COLUMNS: [&str; 4] = ["Date", "Amount", "Category", "Description"];

/// Location of the append-only transaction table.
#[derive(Debug, Clone)]
pub struct CsvStore {
    path: PathBuf,
}

impl CsvStore {
    /// Opens the store at `path`, creating it with only the header row when absent.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, Error> {
        let store = Self { path: path.into() };
        store.initialize()?;
        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn initialize(&self) -> Result<(), Error> {
        if self.path.exists() {
            return Ok(());
        }
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let mut writer = csv::Writer::from_path(&self.path)?;
        writer.write_record(COLUMNS)?;
        writer.flush()?;
        tracing::info!(path = %self.path.display(), "created transaction store");
        Ok(())
    }
}

#[cfg(test)]
pub fn open_test_store() -> (tempfile::TempDir, CsvStore) {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let store = CsvStore::open(dir.path().join("finance_data.csv")).expect("Failed to open store");
    (dir, store)
}

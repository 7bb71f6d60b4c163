//! JSON persistence for the inverted index
//!
//! The file is a single JSON object whose keys are tokens and whose values are
//! arrays of `"<url>|<position>"` strings. Saving writes a sibling temporary
//! file and renames it over the target, so an existing index is only replaced
//! once the new one is complete.

use crate::index::InvertedIndex;
use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur while saving or loading the index
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("No index file found at '{}'", path.display())]
    NotFound { path: PathBuf },

    #[error("Malformed index file '{}': {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("IO error on '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl StoreError {
    /// Returns true for the expected "no index yet" condition
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Reads and writes one index file
#[derive(Debug, Clone)]
pub struct IndexStore {
    path: PathBuf,
}

impl IndexStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Writes the whole index, replacing any previous file only after the new
    /// content has been flushed to disk
    pub fn save(&self, index: &InvertedIndex) -> StoreResult<()> {
        let tmp_path = self.temp_path();

        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir).map_err(|e| self.io_error(e))?;
        }

        let result = self.write_to(&tmp_path, index);
        if let Err(e) = result {
            let _ = fs::remove_file(&tmp_path);
            return Err(e);
        }

        fs::rename(&tmp_path, &self.path).map_err(|e| {
            let _ = fs::remove_file(&tmp_path);
            self.io_error(e)
        })?;

        tracing::info!(
            "Saved index with {} words to '{}'",
            index.len(),
            self.path.display()
        );
        Ok(())
    }

    /// Reads the index back
    ///
    /// # Returns
    ///
    /// * `Ok(InvertedIndex)` - The persisted index, per-token order preserved
    /// * `Err(StoreError::NotFound)` - No index has been built yet
    /// * `Err(StoreError::Parse)` - The file is not an object of occurrence arrays
    /// * `Err(StoreError::Io)` - Any other read failure
    pub fn load(&self) -> StoreResult<InvertedIndex> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(StoreError::NotFound {
                    path: self.path.clone(),
                });
            }
            Err(e) => return Err(self.io_error(e)),
        };

        let index: InvertedIndex =
            serde_json::from_reader(BufReader::new(file)).map_err(|source| {
                if source.is_io() {
                    self.io_error(io::Error::new(io::ErrorKind::Other, source))
                } else {
                    StoreError::Parse {
                        path: self.path.clone(),
                        source,
                    }
                }
            })?;

        tracing::debug!(
            "Loaded index with {} words from '{}'",
            index.len(),
            self.path.display()
        );
        Ok(index)
    }

    fn write_to(&self, tmp_path: &Path, index: &InvertedIndex) -> StoreResult<()> {
        let file = File::create(tmp_path).map_err(|e| self.io_error(e))?;
        let mut writer = BufWriter::new(file);

        serde_json::to_writer(&mut writer, index).map_err(|e| {
            self.io_error(io::Error::new(io::ErrorKind::Other, e))
        })?;
        writer.flush().map_err(|e| self.io_error(e))?;

        let file = writer
            .into_inner()
            .map_err(|e| self.io_error(e.into_error()))?;
        file.sync_all().map_err(|e| self.io_error(e))?;
        Ok(())
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn io_error(&self, source: io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

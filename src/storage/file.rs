//! File-backed analysis store (one JSON document per regulation).

use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use tempfile::NamedTempFile;
use tracing::{debug, warn};

use crate::hashing::regulation_key;

use super::AnalysisStore;
use super::error::{StorageError, StorageResult};
use super::record::{AnalysisRecord, UpsertOutcome};

const JSON_EXTENSION: &str = "json";

#[derive(Debug)]
/// Stores each [`AnalysisRecord`] at `<root>/<blake3(regulation_id)>.json`.
///
/// Writes go to a temp file in the same directory and are renamed into place, so a
/// reader never observes a half-written record. Re-scoring a regulation replaces its
/// file.
pub struct FileAnalysisStore {
    root: PathBuf,
    write_lock: Mutex<()>,
}

impl FileAnalysisStore {
    /// Creates a store rooted at `root`. The directory is created on first write.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Ensures the root directory exists.
    pub fn ensure_root(&self) -> StorageResult<()> {
        fs::create_dir_all(&self.root).map_err(|source| StorageError::Io {
            path: self.root.clone(),
            source,
        })
    }

    fn record_path(&self, regulation_id: &str) -> PathBuf {
        self.root
            .join(format!("{}.{}", regulation_key(regulation_id), JSON_EXTENSION))
    }

    fn read_record(path: &Path) -> StorageResult<AnalysisRecord> {
        let raw = fs::read(path).map_err(|source| StorageError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_slice(&raw).map_err(|source| StorageError::Serialization {
            path: path.to_path_buf(),
            source,
        })
    }

    fn write_record(&self, path: &Path, record: &AnalysisRecord) -> StorageResult<()> {
        let io_err = |source: std::io::Error| StorageError::Io {
            path: path.to_path_buf(),
            source,
        };

        let temp = NamedTempFile::new_in(&self.root).map_err(io_err)?;
        {
            let mut writer = BufWriter::new(temp.as_file());
            serde_json::to_writer_pretty(&mut writer, record).map_err(|source| {
                StorageError::Serialization {
                    path: path.to_path_buf(),
                    source,
                }
            })?;
            writer.flush().map_err(io_err)?;
        }
        temp.as_file().sync_all().map_err(io_err)?;

        temp.persist(path).map_err(|source| StorageError::Persist {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(())
    }
}

impl AnalysisStore for FileAnalysisStore {
    fn upsert(&self, record: AnalysisRecord) -> StorageResult<UpsertOutcome> {
        let _guard = self.write_lock.lock();
        self.ensure_root()?;

        let path = self.record_path(&record.regulation_id);
        let previous = if path.exists() {
            match Self::read_record(&path) {
                Ok(previous) => Some(previous),
                Err(e) => {
                    warn!(
                        regulation_id = %record.regulation_id,
                        error = %e,
                        "Stored analysis unreadable, overwriting"
                    );
                    None
                }
            }
        } else {
            None
        };

        let outcome = record.outcome_against(previous.as_ref());
        self.write_record(&path, &record)?;

        debug!(
            regulation_id = %record.regulation_id,
            path = %path.display(),
            ?outcome,
            "Analysis persisted"
        );
        Ok(outcome)
    }

    fn get(&self, regulation_id: &str) -> StorageResult<Option<AnalysisRecord>> {
        let path = self.record_path(regulation_id);
        if !path.exists() {
            return Ok(None);
        }
        Self::read_record(&path).map(Some)
    }

    fn list(&self) -> StorageResult<Vec<AnalysisRecord>> {
        if !self.root.exists() {
            return Ok(Vec::new());
        }

        let entries = fs::read_dir(&self.root).map_err(|source| StorageError::Io {
            path: self.root.clone(),
            source,
        })?;

        let mut records = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|source| StorageError::Io {
                path: self.root.clone(),
                source,
            })?;
            let path = entry.path();

            if path.extension().is_some_and(|ext| ext == JSON_EXTENSION) {
                match Self::read_record(&path) {
                    Ok(record) => records.push(record),
                    Err(e) => warn!(path = %path.display(), error = %e, "Skipping unreadable analysis"),
                }
            }
        }

        records.sort_by(|a, b| a.regulation_id.cmp(&b.regulation_id));
        Ok(records)
    }

    fn remove(&self, regulation_id: &str) -> StorageResult<bool> {
        let _guard = self.write_lock.lock();
        let path = self.record_path(regulation_id);
        if !path.exists() {
            return Ok(false);
        }
        fs::remove_file(&path).map_err(|source| StorageError::Io { path, source })?;
        Ok(true)
    }
}

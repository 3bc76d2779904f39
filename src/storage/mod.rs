//! Persistence of analysis results, keyed by regulation id.
//!
//! Re-scoring a regulation overwrites its record; a store never holds two records for
//! the same id.

pub mod error;
mod file;
mod memory;
mod persist;
mod record;


pub use error::{StorageError, StorageResult};
pub use file::FileAnalysisStore;
pub use memory::MemoryAnalysisStore;
pub use persist::{PersistSummary, ScoreChange, persist_ranking};
pub use record::{AnalysisRecord, UpsertOutcome};

/// Keyed store of [`AnalysisRecord`]s.
pub trait AnalysisStore: Send + Sync {
    /// Inserts or replaces the record for `record.regulation_id`.
    fn upsert(&self, record: AnalysisRecord) -> StorageResult<UpsertOutcome>;

    /// Returns the record for `regulation_id`, if any.
    fn get(&self, regulation_id: &str) -> StorageResult<Option<AnalysisRecord>>;

    /// Returns every record, ordered by regulation id.
    fn list(&self) -> StorageResult<Vec<AnalysisRecord>>;

    /// Removes the record for `regulation_id`. Returns `false` if none existed.
    fn remove(&self, regulation_id: &str) -> StorageResult<bool>;
}

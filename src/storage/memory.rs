use std::collections::HashMap;

use parking_lot::RwLock;

use super::error::StorageResult;
use super::record::{AnalysisRecord, UpsertOutcome};
use super::AnalysisStore;

#[derive(Debug, Default)]
/// In-process analysis store. Contents are lost on restart.
pub struct MemoryAnalysisStore {
    records: RwLock<HashMap<String, AnalysisRecord>>,
}

impl MemoryAnalysisStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }
}

impl AnalysisStore for MemoryAnalysisStore {
    fn upsert(&self, record: AnalysisRecord) -> StorageResult<UpsertOutcome> {
        let mut records = self.records.write();
        let outcome = record.outcome_against(records.get(&record.regulation_id));
        records.insert(record.regulation_id.clone(), record);
        Ok(outcome)
    }

    fn get(&self, regulation_id: &str) -> StorageResult<Option<AnalysisRecord>> {
        Ok(self.records.read().get(regulation_id).cloned())
    }

    fn list(&self) -> StorageResult<Vec<AnalysisRecord>> {
        let mut records: Vec<_> = self.records.read().values().cloned().collect();
        records.sort_by(|a, b| a.regulation_id.cmp(&b.regulation_id));
        Ok(records)
    }

    fn remove(&self, regulation_id: &str) -> StorageResult<bool> {
        Ok(self.records.write().remove(regulation_id).is_some())
    }
}

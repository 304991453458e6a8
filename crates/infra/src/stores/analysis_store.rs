//! In-memory price-analysis store for tests/dev.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use shelfwise_alerts::analysis::{AnalysisId, AnalysisRecord};
use shelfwise_alerts::stores::{AnalysisStore, StoreError};

#[derive(Debug, Default)]
pub struct InMemoryAnalysisStore {
    records: RwLock<HashMap<AnalysisId, AnalysisRecord>>,
}

impl InMemoryAnalysisStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn arc() -> Arc<Self> {
        Arc::new(Self::new())
    }

    pub fn insert(&self, record: AnalysisRecord) {
        self.records.write().unwrap().insert(record.id, record);
    }
}

impl AnalysisStore for InMemoryAnalysisStore {
    fn list_all(&self) -> Result<Vec<AnalysisRecord>, StoreError> {
        let records = self.records.read().unwrap();
        let mut result: Vec<_> = records.values().cloned().collect();
        result.sort_by_key(|r| r.created_at);
        Ok(result)
    }

    fn delete(&self, analysis_id: AnalysisId) -> Result<(), StoreError> {
        self.records
            .write()
            .unwrap()
            .remove(&analysis_id)
            .map(|_| ())
            .ok_or(StoreError::AnalysisNotFound(analysis_id))
    }
}

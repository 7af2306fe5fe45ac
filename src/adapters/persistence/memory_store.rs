//! Implements AnalysisStorePort in memory. Entries live for the process lifetime.

use crate::domain::{AnalysisKey, AnalysisResult, DomainError};
use crate::ports::AnalysisStorePort;
use std::collections::HashMap;

/// Session-lifetime analysis storage.
#[derive(Default)]
pub struct MemoryStore {
    entries: tokio::sync::RwLock<HashMap<AnalysisKey, AnalysisResult>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl AnalysisStorePort for MemoryStore {
    async fn get(&self, key: &AnalysisKey) -> Result<Option<AnalysisResult>, DomainError> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn put(&self, key: &AnalysisKey, result: &AnalysisResult) -> Result<(), DomainError> {
        self.entries
            .write()
            .await
            .insert(key.clone(), result.clone());
        Ok(())
    }

    async fn len(&self) -> Result<usize, DomainError> {
        Ok(self.entries.read().await.len())
    }
}

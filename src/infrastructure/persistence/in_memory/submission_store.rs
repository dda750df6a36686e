//! # In-Memory Submission Store
//!
//! In-memory implementation of [`SubmissionStore`] for testing.

use crate::domain::entities::{SubmissionRecord, SubmissionUpdate};
use crate::domain::value_objects::{ContractId, SubmissionStatus, Timestamp};
use crate::infrastructure::persistence::traits::{RepositoryResult, SubmissionStore};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// In-memory implementation of [`SubmissionStore`].
#[derive(Debug, Clone)]
pub struct InMemorySubmissionStore {
    storage: Arc<RwLock<HashMap<ContractId, SubmissionRecord>>>,
}

impl InMemorySubmissionStore {
    /// Creates a new empty store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            storage: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Seeds a record as-is, replacing any existing one.
    pub async fn insert(&self, record: SubmissionRecord) {
        let mut storage = self.storage.write().await;
        storage.insert(record.contract_id().clone(), record);
    }

    /// Returns the number of records in the store.
    ///
    /// Waits for any in-progress write to finish.
    pub async fn len(&self) -> usize {
        self.storage.read().await.len()
    }

    /// Returns true if the store is empty.
    pub async fn is_empty(&self) -> bool {
        self.storage.read().await.is_empty()
    }
}

impl Default for InMemorySubmissionStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SubmissionStore for InMemorySubmissionStore {
    async fn get(&self, contract_id: &ContractId) -> RepositoryResult<Option<SubmissionRecord>> {
        let storage = self.storage.read().await;
        Ok(storage.get(contract_id).cloned())
    }

    async fn upsert(
        &self,
        contract_id: &ContractId,
        update: &SubmissionUpdate,
    ) -> RepositoryResult<SubmissionRecord> {
        let now = Timestamp::now();
        let mut storage = self.storage.write().await;
        let record = storage
            .entry(contract_id.clone())
            .or_insert_with(|| SubmissionRecord::new(contract_id.clone(), now));
        record.apply(update, now);
        Ok(record.clone())
    }

    async fn query_by_status(
        &self,
        statuses: &[SubmissionStatus],
    ) -> RepositoryResult<Vec<SubmissionRecord>> {
        let storage = self.storage.read().await;
        let mut matching: Vec<SubmissionRecord> = storage
            .values()
            .filter(|r| statuses.contains(&r.status()))
            .cloned()
            .collect();
        matching.sort_by(|a, b| a.contract_id().cmp(b.contract_id()));
        Ok(matching)
    }
}

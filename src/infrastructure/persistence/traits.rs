//! # Store Traits
//!
//! The port the submission orchestrator persists through.
//!
//! The store is a key-value record store addressed by contract id. No
//! transaction spans a remote call and the following store write.

use crate::domain::entities::{SubmissionRecord, SubmissionUpdate};
use crate::domain::value_objects::{ContractId, SubmissionStatus};
use async_trait::async_trait;
use std::fmt;
use thiserror::Error;

/// Error type for store operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepositoryError {
    /// Connection error.
    #[error("Connection error: {0}")]
    Connection(String),

    /// Internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl RepositoryError {
    /// Creates a connection error.
    #[must_use]
    pub fn connection(msg: impl Into<String>) -> Self {
        Self::Connection(msg.into())
    }

    /// Creates an internal error.
    #[must_use]
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Returns true if the store could not be reached.
    #[must_use]
    pub fn is_connection(&self) -> bool {
        matches!(self, Self::Connection(_))
    }
}

/// Result type for store operations.
pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Per-contract submission record store.
///
/// # Examples
///
/// ```ignore
/// use aade_digital_client::infrastructure::persistence::SubmissionStore;
///
/// async fn pending(store: &impl SubmissionStore) {
///     let records = store.query_by_status(&SubmissionStatus::RESYNCABLE).await?;
///     println!("{} declarations awaiting resync", records.len());
/// }
/// ```
#[async_trait]
pub trait SubmissionStore: Send + Sync + fmt::Debug {
    /// Gets the record for a contract.
    ///
    /// Returns `None` if nothing was ever written for it.
    async fn get(&self, contract_id: &ContractId) -> RepositoryResult<Option<SubmissionRecord>>;

    /// Applies a patch, creating the record if absent, and returns the
    /// stored result.
    async fn upsert(
        &self,
        contract_id: &ContractId,
        update: &SubmissionUpdate,
    ) -> RepositoryResult<SubmissionRecord>;

    /// Finds every record whose status is in `statuses`.
    ///
    /// Results are ordered by contract id.
    async fn query_by_status(
        &self,
        statuses: &[SubmissionStatus],
    ) -> RepositoryResult<Vec<SubmissionRecord>>;
}

//! # Domain Errors
//!
//! Local validation failures. These are detected before any network call
//! and are never persisted as a status change.

use crate::domain::value_objects::{ContractId, SubmissionStatus};
use thiserror::Error;

/// Error type for domain validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// Tax number is not exactly nine digits.
    #[error("invalid tax number '{0}': expected 9 digits")]
    InvalidTaxNumber(String),

    /// A remote id is required but was not supplied.
    #[error("missing remote declaration id for contract {0}")]
    MissingRemoteId(ContractId),

    /// A required text field is empty.
    #[error("{0} must not be empty")]
    EmptyField(&'static str),

    /// The stored status does not allow the requested operation.
    #[error("cannot move contract {contract_id} from {from} to {to}")]
    InvalidTransition {
        /// Contract whose record was checked.
        contract_id: ContractId,
        /// Current stored status.
        from: SubmissionStatus,
        /// Requested status.
        to: SubmissionStatus,
    },
}

impl DomainError {
    /// Creates an invalid transition error.
    #[must_use]
    pub fn invalid_transition(
        contract_id: ContractId,
        from: SubmissionStatus,
        to: SubmissionStatus,
    ) -> Self {
        Self::InvalidTransition {
            contract_id,
            from,
            to,
        }
    }
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;

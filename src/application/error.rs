//! # Application Errors
//!
//! Error types for the submission use cases.
//!
//! # Error Hierarchy
//!
//! ```text
//! ApplicationError
//! ├── Domain(DomainError)          - Local validation, never persisted
//! ├── InProgress(ContractId)       - Same-contract operation already running
//! ├── NotConfigured(String)        - Missing credentials or entity tax number
//! ├── Rejected { status, message } - Authority-reported failure
//! ├── Aade(AadeError)              - Transport, protocol or encoding failure
//! └── Repository(RepositoryError)  - Status store failure
//! ```
//!
//! The orchestrator renders these into outcome strings. `Display` of
//! [`ApplicationError::Rejected`] is the authority's joined messages and
//! nothing else, so the string the caller shows is the one that is persisted.

use crate::domain::errors::DomainError;
use crate::domain::value_objects::{AadeStatusCode, ContractId};
use crate::infrastructure::aade::AadeError;
use crate::infrastructure::persistence::RepositoryError;
use thiserror::Error;

/// Application layer error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApplicationError {
    /// Local validation failed.
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Another operation for the same contract is in flight.
    #[error("operation already in progress for contract {0}")]
    InProgress(ContractId),

    /// The integration lacks required configuration.
    #[error("digital client is not configured: missing {0}")]
    NotConfigured(String),

    /// The authority answered with a non-success status code.
    #[error("{message}")]
    Rejected {
        /// Envelope status code.
        status: AadeStatusCode,
        /// Joined authority error messages.
        message: String,
    },

    /// Transport, protocol or encoding failure.
    #[error(transparent)]
    Aade(#[from] AadeError),

    /// Status store failure.
    #[error("status store error: {0}")]
    Repository(#[from] RepositoryError),
}

impl ApplicationError {
    /// Creates an authority rejection.
    #[must_use]
    pub fn rejected(status: AadeStatusCode, message: impl Into<String>) -> Self {
        Self::Rejected {
            status,
            message: message.into(),
        }
    }

    /// Creates a not configured error from the list of missing values.
    #[must_use]
    pub fn not_configured(missing: &[&str]) -> Self {
        Self::NotConfigured(missing.join(", "))
    }

    /// Returns true if the failure was detected before any network call.
    #[must_use]
    pub fn is_local(&self) -> bool {
        matches!(
            self,
            Self::Domain(_) | Self::InProgress(_) | Self::NotConfigured(_)
        )
    }

    /// Returns true if retrying the same call may succeed.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Aade(err) => err.is_retryable(),
            Self::Rejected { status, .. } => *status == AadeStatusCode::TechnicalError,
            Self::Repository(err) => err.is_connection(),
            Self::InProgress(_) => true,
            Self::Domain(_) | Self::NotConfigured(_) => false,
        }
    }
}

/// Result type for application operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;

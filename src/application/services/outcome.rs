//! # Outcomes
//!
//! Result objects returned by [`SubmissionService`](super::SubmissionService).
//! Callers check `success` and show `error`; nothing here is an `Err`.

use crate::application::error::ApplicationError;
use crate::domain::value_objects::{ContractId, RemoteId};
use serde::Serialize;

/// Outcome of a submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubmitOutcome {
    /// Whether the caller's write path may proceed.
    pub success: bool,
    /// Remote id assigned by the authority.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remote_id: Option<RemoteId>,
    /// Failure description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Advisory note, set when the submission was skipped.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl SubmitOutcome {
    /// The authority accepted the declaration.
    #[must_use]
    pub fn accepted(remote_id: RemoteId) -> Self {
        Self {
            success: true,
            remote_id: Some(remote_id),
            error: None,
            note: None,
        }
    }

    /// Nothing was sent; the caller may proceed.
    #[must_use]
    pub fn skipped(note: impl Into<String>) -> Self {
        Self {
            success: true,
            remote_id: None,
            error: None,
            note: Some(note.into()),
        }
    }

    /// The submission failed.
    #[must_use]
    pub fn failed(error: &ApplicationError) -> Self {
        Self {
            success: false,
            remote_id: None,
            error: Some(error.to_string()),
            note: None,
        }
    }
}

/// Outcome of a complete, cancel or correlate call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OperationOutcome {
    /// Whether the operation succeeded.
    pub success: bool,
    /// Failure description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl OperationOutcome {
    /// The operation succeeded.
    #[must_use]
    pub fn ok() -> Self {
        Self {
            success: true,
            error: None,
        }
    }

    /// The operation failed.
    #[must_use]
    pub fn failed(error: &ApplicationError) -> Self {
        Self {
            success: false,
            error: Some(error.to_string()),
        }
    }
}

impl From<Result<(), ApplicationError>> for OperationOutcome {
    fn from(result: Result<(), ApplicationError>) -> Self {
        match result {
            Ok(()) => Self::ok(),
            Err(err) => Self::failed(&err),
        }
    }
}

/// One record that failed during a resync.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResyncFailure {
    /// Contract whose resubmission failed.
    pub contract_id: ContractId,
    /// Failure description.
    pub error: String,
    /// Whether a later resync may succeed without changes to the record.
    pub retryable: bool,
}

/// Aggregate result of a pending resync.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ResyncSummary {
    /// Records resubmitted successfully.
    pub success_count: usize,
    /// Records that failed.
    pub error_count: usize,
    /// Per-contract failures, in processing order.
    pub errors: Vec<ResyncFailure>,
}

impl ResyncSummary {
    pub(crate) fn record_success(&mut self) {
        self.success_count += 1;
    }

    pub(crate) fn record_failure(
        &mut self,
        contract_id: ContractId,
        error: impl Into<String>,
        retryable: bool,
    ) {
        self.error_count += 1;
        self.errors.push(ResyncFailure {
            contract_id,
            error: error.into(),
            retryable,
        });
    }

    /// Returns the number of records processed.
    #[must_use]
    pub fn total(&self) -> usize {
        self.success_count + self.error_count
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::domain::value_objects::AadeStatusCode;

    #[test]
    fn failed_outcome_carries_message() {
        let err = ApplicationError::rejected(AadeStatusCode::ValidationError, "Invalid plate");
        let outcome = SubmitOutcome::failed(&err);
        assert!(!outcome.success);
        assert_eq!(outcome.error.as_deref(), Some("Invalid plate"));
    }

    #[test]
    fn skipped_outcome_serializes_without_absent_fields() {
        let json = serde_json::to_value(SubmitOutcome::skipped("not configured")).unwrap();
        assert_eq!(json["success"], true);
        assert_eq!(json["note"], "not configured");
        assert!(json.get("error").is_none());
        assert!(json.get("remote_id").is_none());
    }

    #[test]
    fn summary_counts() {
        let mut summary = ResyncSummary::default();
        summary.record_success();
        summary.record_failure(ContractId::new("c-2"), "boom", true);
        summary.record_success();
        assert_eq!(summary.success_count, 2);
        assert_eq!(summary.error_count, 1);
        assert_eq!(summary.total(), 3);
        assert_eq!(summary.errors[0].contract_id, ContractId::new("c-2"));
    }
}

//! # Submission Record
//!
//! Per-contract record of the declaration lifecycle, and the field patches
//! the orchestrator writes to it.
//!
//! Patches are built only through named constructors, so a `submitted`
//! record can never be written without its remote id.

use crate::domain::entities::declaration::DeclarationInput;
use crate::domain::value_objects::{ContractId, RemoteId, SubmissionStatus, Timestamp};
use serde::{Deserialize, Serialize};

/// Stored state of one contract's declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionRecord {
    contract_id: ContractId,
    status: SubmissionStatus,
    remote_id: Option<RemoteId>,
    update_id: Option<RemoteId>,
    cancellation_id: Option<u64>,
    invoice_mark: Option<String>,
    error_text: Option<String>,
    declaration: Option<DeclarationInput>,
    created_at: Timestamp,
    updated_at: Timestamp,
    submitted_at: Option<Timestamp>,
    completed_at: Option<Timestamp>,
    cancelled_at: Option<Timestamp>,
}

impl SubmissionRecord {
    /// Creates an empty record in [`SubmissionStatus::None`].
    #[must_use]
    pub fn new(contract_id: ContractId, now: Timestamp) -> Self {
        Self {
            contract_id,
            status: SubmissionStatus::None,
            remote_id: None,
            update_id: None,
            cancellation_id: None,
            invoice_mark: None,
            error_text: None,
            declaration: None,
            created_at: now,
            updated_at: now,
            submitted_at: None,
            completed_at: None,
            cancelled_at: None,
        }
    }

    /// Applies a patch, stamping `updated_at` and the status-specific time.
    pub fn apply(&mut self, update: &SubmissionUpdate, now: Timestamp) {
        if let Some(status) = update.status {
            self.status = status;
            match status {
                SubmissionStatus::Submitted => self.submitted_at = Some(now),
                SubmissionStatus::Completed => self.completed_at = Some(now),
                SubmissionStatus::Cancelled => self.cancelled_at = Some(now),
                SubmissionStatus::None | SubmissionStatus::Pending | SubmissionStatus::Error => {}
            }
        }
        if let Some(id) = update.remote_id {
            self.remote_id = Some(id);
        }
        if let Some(id) = update.update_id {
            self.update_id = Some(id);
        }
        if let Some(id) = update.cancellation_id {
            self.cancellation_id = Some(id);
        }
        if let Some(mark) = &update.invoice_mark {
            self.invoice_mark = Some(mark.clone());
        }
        if let Some(declaration) = &update.declaration {
            self.declaration = Some(declaration.clone());
        }
        match &update.error_text {
            ErrorTextChange::Keep => {}
            ErrorTextChange::Set(text) => self.error_text = Some(text.clone()),
            ErrorTextChange::Clear => self.error_text = None,
        }
        self.updated_at = now;
    }

    /// Returns the contract id.
    #[inline]
    #[must_use]
    pub fn contract_id(&self) -> &ContractId {
        &self.contract_id
    }

    /// Returns the current status.
    #[inline]
    #[must_use]
    pub fn status(&self) -> SubmissionStatus {
        self.status
    }

    /// Returns the authority-assigned declaration id.
    #[inline]
    #[must_use]
    pub fn remote_id(&self) -> Option<RemoteId> {
        self.remote_id
    }

    /// Returns the id the authority assigned to the completion document.
    #[inline]
    #[must_use]
    pub fn update_id(&self) -> Option<RemoteId> {
        self.update_id
    }

    /// Returns the cancellation id.
    #[inline]
    #[must_use]
    pub fn cancellation_id(&self) -> Option<u64> {
        self.cancellation_id
    }

    /// Returns the correlated invoice mark.
    #[inline]
    #[must_use]
    pub fn invoice_mark(&self) -> Option<&str> {
        self.invoice_mark.as_deref()
    }

    /// Returns the last error text.
    #[inline]
    #[must_use]
    pub fn error_text(&self) -> Option<&str> {
        self.error_text.as_deref()
    }

    /// Returns the stored declaration snapshot.
    #[inline]
    #[must_use]
    pub fn declaration(&self) -> Option<&DeclarationInput> {
        self.declaration.as_ref()
    }

    /// Returns when the record was created.
    #[inline]
    #[must_use]
    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    /// Returns when the record was last written.
    #[inline]
    #[must_use]
    pub fn updated_at(&self) -> Timestamp {
        self.updated_at
    }

    /// Returns when the declaration was last accepted.
    #[inline]
    #[must_use]
    pub fn submitted_at(&self) -> Option<Timestamp> {
        self.submitted_at
    }

    /// Returns when the declaration was completed.
    #[inline]
    #[must_use]
    pub fn completed_at(&self) -> Option<Timestamp> {
        self.completed_at
    }

    /// Returns when the declaration was cancelled.
    #[inline]
    #[must_use]
    pub fn cancelled_at(&self) -> Option<Timestamp> {
        self.cancelled_at
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
enum ErrorTextChange {
    #[default]
    Keep,
    Set(String),
    Clear,
}

/// A partial write to a [`SubmissionRecord`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubmissionUpdate {
    status: Option<SubmissionStatus>,
    remote_id: Option<RemoteId>,
    update_id: Option<RemoteId>,
    cancellation_id: Option<u64>,
    invoice_mark: Option<String>,
    declaration: Option<DeclarationInput>,
    error_text: ErrorTextChange,
}

impl SubmissionUpdate {
    /// A submission attempt is starting for this declaration.
    #[must_use]
    pub fn pending(declaration: DeclarationInput) -> Self {
        Self {
            status: Some(SubmissionStatus::Pending),
            declaration: Some(declaration),
            ..Self::default()
        }
    }

    /// Records a declaration snapshot without touching the status.
    #[must_use]
    pub fn declared(declaration: DeclarationInput) -> Self {
        Self {
            declaration: Some(declaration),
            ..Self::default()
        }
    }

    /// The authority accepted the declaration.
    #[must_use]
    pub fn submitted(remote_id: RemoteId) -> Self {
        Self {
            status: Some(SubmissionStatus::Submitted),
            remote_id: Some(remote_id),
            error_text: ErrorTextChange::Clear,
            ..Self::default()
        }
    }

    /// The last remote operation failed.
    #[must_use]
    pub fn failed(error_text: impl Into<String>) -> Self {
        Self {
            status: Some(SubmissionStatus::Error),
            error_text: ErrorTextChange::Set(error_text.into()),
            ..Self::default()
        }
    }

    /// The declaration was completed.
    #[must_use]
    pub fn completed(update_id: Option<RemoteId>) -> Self {
        Self {
            status: Some(SubmissionStatus::Completed),
            update_id,
            error_text: ErrorTextChange::Clear,
            ..Self::default()
        }
    }

    /// The declaration was cancelled.
    #[must_use]
    pub fn cancelled(cancellation_id: Option<u64>) -> Self {
        Self {
            status: Some(SubmissionStatus::Cancelled),
            cancellation_id,
            error_text: ErrorTextChange::Clear,
            ..Self::default()
        }
    }

    /// The declaration was linked to an invoice. Status is unchanged.
    #[must_use]
    pub fn correlated(invoice_mark: impl Into<String>) -> Self {
        Self {
            invoice_mark: Some(invoice_mark.into()),
            ..Self::default()
        }
    }

    /// Correlation failed. Status is unchanged; only the error text is kept.
    #[must_use]
    pub fn correlation_failed(error_text: impl Into<String>) -> Self {
        Self {
            error_text: ErrorTextChange::Set(error_text.into()),
            ..Self::default()
        }
    }

    /// Returns the status this patch writes, if any.
    #[inline]
    #[must_use]
    pub fn status(&self) -> Option<SubmissionStatus> {
        self.status
    }

    /// Returns the remote id this patch writes, if any.
    #[inline]
    #[must_use]
    pub fn remote_id(&self) -> Option<RemoteId> {
        self.remote_id
    }

    /// Returns the error text this patch writes, if any.
    #[must_use]
    pub fn error_text(&self) -> Option<&str> {
        match &self.error_text {
            ErrorTextChange::Set(text) => Some(text),
            ErrorTextChange::Keep | ErrorTextChange::Clear => None,
        }
    }
}

//! # Follow-up Requests
//!
//! Documents that reference an already accepted declaration: completion
//! ([`UpdateRequest`]) and invoice correlation ([`CorrelationRequest`]).

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::value_objects::{InvoiceKind, RemoteId, TaxNumber, Timestamp};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Caller-supplied values for closing out a declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionInput {
    /// Final charged amount.
    pub final_amount: Decimal,
    /// When the rental was completed.
    pub completion_time: Timestamp,
    /// Document issued for the rental.
    pub invoice_kind: InvoiceKind,
    /// Odometer reading at return.
    pub end_odometer: Option<u32>,
    /// Actual return time, if different from the completion time.
    pub actual_end_time: Option<Timestamp>,
}

impl CompletionInput {
    /// Creates a completion with the required fields.
    #[must_use]
    pub fn new(final_amount: Decimal, completion_time: Timestamp, invoice_kind: InvoiceKind) -> Self {
        Self {
            final_amount,
            completion_time,
            invoice_kind,
            end_odometer: None,
            actual_end_time: None,
        }
    }

    /// Sets the odometer reading at return.
    #[must_use]
    pub fn with_end_odometer(mut self, km: u32) -> Self {
        self.end_odometer = Some(km);
        self
    }

    /// Sets the actual return time.
    #[must_use]
    pub fn with_actual_end_time(mut self, end: Timestamp) -> Self {
        self.actual_end_time = Some(end);
        self
    }
}

/// Completion document for an accepted declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateRequest {
    /// Reporting entity.
    pub entity_vat_number: TaxNumber,
    /// Declaration being completed.
    pub remote_id: RemoteId,
    /// Final charged amount.
    pub final_amount: Decimal,
    /// When the rental was completed.
    pub completion_time: Timestamp,
    /// Document issued for the rental.
    pub invoice_kind: InvoiceKind,
    /// Odometer reading at return.
    pub end_odometer: Option<u32>,
    /// Actual return time.
    pub actual_end_time: Option<Timestamp>,
}

impl UpdateRequest {
    /// Builds the request from a completion input.
    #[must_use]
    pub fn from_completion(
        entity_vat_number: TaxNumber,
        remote_id: RemoteId,
        completion: &CompletionInput,
    ) -> Self {
        Self {
            entity_vat_number,
            remote_id,
            final_amount: completion.final_amount,
            completion_time: completion.completion_time,
            invoice_kind: completion.invoice_kind,
            end_odometer: completion.end_odometer,
            actual_end_time: completion.actual_end_time,
        }
    }
}

/// Links declarations to the mark of the invoice eventually issued for them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorrelationRequest {
    entity_vat_number: TaxNumber,
    remote_ids: Vec<RemoteId>,
    invoice_mark: String,
}

impl CorrelationRequest {
    /// Creates a correlation request.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::EmptyField`] if no remote id is given or the
    /// mark is blank.
    pub fn new(
        entity_vat_number: TaxNumber,
        remote_ids: Vec<RemoteId>,
        invoice_mark: impl Into<String>,
    ) -> DomainResult<Self> {
        let invoice_mark = invoice_mark.into();
        if remote_ids.is_empty() {
            return Err(DomainError::EmptyField("correlated declaration ids"));
        }
        if invoice_mark.trim().is_empty() {
            return Err(DomainError::EmptyField("invoice mark"));
        }
        Ok(Self {
            entity_vat_number,
            remote_ids,
            invoice_mark,
        })
    }

    /// Returns the reporting entity.
    #[inline]
    #[must_use]
    pub fn entity_vat_number(&self) -> &TaxNumber {
        &self.entity_vat_number
    }

    /// Returns the correlated declaration ids.
    #[inline]
    #[must_use]
    pub fn remote_ids(&self) -> &[RemoteId] {
        &self.remote_ids
    }

    /// Returns the invoice mark.
    #[inline]
    #[must_use]
    pub fn invoice_mark(&self) -> &str {
        &self.invoice_mark
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn entity() -> TaxNumber {
        TaxNumber::parse("999999999").unwrap()
    }

    #[test]
    fn correlation_requires_ids() {
        let err = CorrelationRequest::new(entity(), vec![], "400001234567890").unwrap_err();
        assert!(matches!(err, DomainError::EmptyField(_)));
    }

    #[test]
    fn correlation_requires_mark() {
        let err = CorrelationRequest::new(entity(), vec![RemoteId::new(1)], " ").unwrap_err();
        assert_eq!(err, DomainError::EmptyField("invoice mark"));
    }

    #[test]
    fn update_copies_completion() {
        let done = Timestamp::parse("2024-06-03T18:30:00Z").unwrap();
        let completion = CompletionInput::new(Decimal::new(24000, 2), done, InvoiceKind::Receipt)
            .with_end_odometer(13_100);
        let request = UpdateRequest::from_completion(entity(), RemoteId::new(555), &completion);
        assert_eq!(request.remote_id, RemoteId::new(555));
        assert_eq!(request.end_odometer, Some(13_100));
        assert_eq!(request.actual_end_time, None);
    }
}

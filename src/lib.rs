//! # AADE Digital Client
//!
//! Rental declaration integration with the Greek tax authority's
//! digital-client registry.
//!
//! # Layers
//!
//! - [`domain`]: declarations, tax numbers, the submission status lifecycle
//! - [`infrastructure`]: XML codec, authenticated HTTP transport, status store
//! - [`application`]: [`SubmissionService`], the entry point callers use
//!
//! # Example
//!
//! ```ignore
//! use aade_digital_client::prelude::*;
//! use std::sync::Arc;
//!
//! let config = AadeConfig::from_env()?;
//! let service = SubmissionService::from_config(config, Arc::new(InMemorySubmissionStore::new()))?;
//!
//! let input = DeclarationInput::rental(
//!     "123456789",
//!     RentalDetails::new("ABC-1234", Timestamp::parse("2024-06-01T09:00:00Z")?),
//! );
//! let outcome = service.submit(&ContractId::new("contract-42"), &input).await;
//! ```

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod telemetry;

pub use application::SubmissionService;

/// Common imports.
pub mod prelude {
    pub use crate::application::{
        ApplicationError, OperationOutcome, ResyncSummary, SubmissionService, SubmitOutcome,
    };
    pub use crate::domain::entities::{
        CompletionInput, DeclarationInput, RentalDetails, SubmissionRecord,
    };
    pub use crate::domain::value_objects::{
        ContractId, InvoiceKind, RemoteId, ServiceType, SubmissionStatus, TaxNumber, Timestamp,
    };
    pub use crate::infrastructure::aade::{
        AadeConfig, AadeEnvironment, AadeHttpClient, ClientListQuery,
    };
    pub use crate::infrastructure::persistence::{InMemorySubmissionStore, SubmissionStore};
}

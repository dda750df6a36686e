//! # Value Objects
//!
//! Immutable types with validation and domain semantics.
//!
//! ## Identity Types
//!
//! - [`ContractId`]: caller-owned contract identifier
//! - [`RemoteId`]: authority-assigned declaration identifier
//! - [`TaxNumber`]: validated nine-digit tax number
//!
//! ## Domain Enums
//!
//! - [`ServiceType`], [`InvoiceKind`], [`AadeStatusCode`]
//! - [`SubmissionStatus`]: local submission lifecycle

pub mod enums;
pub mod ids;
pub mod submission_status;
pub mod tax_number;
pub mod timestamp;

pub use enums::{AadeStatusCode, InvoiceKind, ParseEnumError, ServiceType};
pub use ids::{ContractId, RemoteId};
pub use submission_status::SubmissionStatus;
pub use tax_number::{TAX_NUMBER_LEN, TaxNumber, is_valid_tax_number};
pub use timestamp::Timestamp;

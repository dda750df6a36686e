//! # Domain Entities
//!
//! - [`DeclarationInput`] / [`NewDeclaration`]: a declaration before and after
//!   resolution against the reporting entity
//! - [`UpdateRequest`], [`CorrelationRequest`]: follow-up documents
//! - [`SubmissionRecord`]: the persisted lifecycle record

pub mod declaration;
pub mod requests;
pub mod submission_record;

pub use declaration::{DeclarationInput, NewDeclaration, RentalDetails};
pub use requests::{CompletionInput, CorrelationRequest, UpdateRequest};
pub use submission_record::{SubmissionRecord, SubmissionUpdate};

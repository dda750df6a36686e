//! # Application Layer
//!
//! Use cases over the domain and infrastructure layers.

pub mod error;
pub mod services;

pub use error::{ApplicationError, ApplicationResult};
pub use services::{
    OperationOutcome, ResyncFailure, ResyncSummary, SubmissionService, SubmitOutcome,
};

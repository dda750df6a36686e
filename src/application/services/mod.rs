//! # Application Services
//!
//! - [`SubmissionService`]: submit, complete, cancel, correlate and resync
//!   declarations
//! - [`outcome`]: the result objects those operations return

pub mod outcome;
pub mod submission;

pub use outcome::{OperationOutcome, ResyncFailure, ResyncSummary, SubmitOutcome};
pub use submission::SubmissionService;

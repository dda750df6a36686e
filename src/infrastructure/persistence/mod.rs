//! # Persistence Layer
//!
//! - [`SubmissionStore`]: the per-contract status store port
//! - `in_memory`: in-process implementation for tests and the CLI

pub mod in_memory;
pub mod traits;

pub use in_memory::InMemorySubmissionStore;
pub use traits::{RepositoryError, RepositoryResult, SubmissionStore};

//! # In-Memory Store
//!
//! In-memory implementation for testing without database dependencies.
//! Uses `Arc<RwLock<HashMap>>` for thread-safe access.

pub mod submission_store;

pub use submission_store::InMemorySubmissionStore;

//! # Domain Layer
//!
//! Declarations, their lifecycle status, and the local validation rules that
//! run before anything is sent to the authority.

pub mod entities;
pub mod errors;
pub mod value_objects;

pub use errors::{DomainError, DomainResult};

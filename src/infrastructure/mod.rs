//! # Infrastructure Layer
//!
//! Adapters to the outside world.
//!
//! - [`aade`]: the authority's digital-client API
//! - [`persistence`]: the submission status store

pub mod aade;
pub mod persistence;

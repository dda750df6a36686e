//! # Transport Port
//!
//! The seam between the typed API facade and the wire. Production code uses
//! [`AadeHttpClient`](super::AadeHttpClient); tests substitute doubles that
//! record calls and replay canned XML.

use crate::infrastructure::aade::error::AadeResult;
use async_trait::async_trait;
use std::fmt;

/// Authenticated raw-XML transport to the authority.
///
/// Implementations send exactly one request per call. They never retry.
#[async_trait]
pub trait AadeTransport: Send + Sync + fmt::Debug {
    /// Sends a POST to `path` (relative to the environment's base URL) and
    /// returns the raw response body.
    ///
    /// # Errors
    ///
    /// Returns [`AadeError`](super::AadeError) on missing credentials,
    /// network failure or a non-2xx status.
    async fn post(
        &self,
        path: &str,
        query: &[(&str, String)],
        body: Option<String>,
    ) -> AadeResult<String>;

    /// Sends a GET to `path` with query parameters and returns the raw body.
    ///
    /// # Errors
    ///
    /// Same as [`post`](Self::post).
    async fn get(&self, path: &str, query: &[(&str, String)]) -> AadeResult<String>;
}

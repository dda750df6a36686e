//! # Digital Client Integration
//!
//! Everything that talks to the authority's digital-client registry.
//!
//! - [`codec`]: XML request encoding and response decoding
//! - [`AadeHttpClient`]: authenticated `reqwest` transport
//! - [`AadeTransport`]: the transport port, for test doubles
//! - [`DigitalClientApi`]: typed facade over the five endpoints
//! - [`AadeConfig`]: credentials, environment and entity tax number

pub mod api;
pub mod codec;
pub mod config;
pub mod error;
pub mod http_client;
pub mod traits;

pub use api::{ClientListQuery, DigitalClientApi};
pub use codec::{AadeErrorDetail, AadeResponse, ClientDeclaration, ClientList, ResponseId};
pub use config::{AadeConfig, AadeCredentials, AadeEnvironment};
pub use error::{AadeError, AadeResult};
pub use http_client::AadeHttpClient;
pub use traits::AadeTransport;

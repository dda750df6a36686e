//! # Digital Client API
//!
//! Typed facade over the five digital-client endpoints. Each method encodes
//! its request, sends it through an [`AadeTransport`] and decodes the reply.
//! A decoded non-success status code is returned as data, not as an error;
//! the caller decides how to persist it.

use crate::domain::entities::{CorrelationRequest, NewDeclaration, UpdateRequest};
use crate::domain::value_objects::{RemoteId, TaxNumber};
use crate::infrastructure::aade::codec::{
    AadeResponse, ClientList, decode_client_list, decode_response, encode_correlation,
    encode_new_declaration, encode_update,
};
use crate::infrastructure::aade::error::AadeResult;
use crate::infrastructure::aade::traits::AadeTransport;
use std::sync::Arc;

/// Path of the new-declaration endpoint.
pub const SEND_CLIENT_PATH: &str = "SendClient";
/// Path of the completion endpoint.
pub const UPDATE_CLIENT_PATH: &str = "UpdateClient";
/// Path of the cancellation endpoint.
pub const CANCEL_CLIENT_PATH: &str = "CancelClient";
/// Path of the listing endpoint.
pub const REQUEST_CLIENTS_PATH: &str = "RequestClients";
/// Path of the invoice correlation endpoint.
pub const CLIENT_CORRELATIONS_PATH: &str = "ClientCorrelations";

/// Filters for a `RequestClients` call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientListQuery {
    /// Lower bound on the declaration id (`DCLID`).
    pub remote_id: Option<RemoteId>,
    /// Upper bound on the declaration id (`maxdclid`).
    pub max_remote_id: Option<RemoteId>,
    /// Token returned by the previous page.
    pub continuation_token: Option<String>,
}

impl ClientListQuery {
    /// Creates an unfiltered query.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts the listing at this declaration id.
    #[must_use]
    pub fn from_remote_id(mut self, id: RemoteId) -> Self {
        self.remote_id = Some(id);
        self
    }

    /// Stops the listing at this declaration id.
    #[must_use]
    pub fn up_to_remote_id(mut self, id: RemoteId) -> Self {
        self.max_remote_id = Some(id);
        self
    }

    /// Continues from a previous page.
    #[must_use]
    pub fn with_continuation_token(mut self, token: impl Into<String>) -> Self {
        self.continuation_token = Some(token.into());
        self
    }

    fn to_params(&self, entity_vat_number: &TaxNumber) -> Vec<(&'static str, String)> {
        let mut params = vec![("entityVatNumber", entity_vat_number.to_string())];
        if let Some(id) = self.remote_id {
            params.push(("DCLID", id.to_string()));
        }
        if let Some(id) = self.max_remote_id {
            params.push(("maxdclid", id.to_string()));
        }
        if let Some(token) = &self.continuation_token {
            params.push(("continuationToken", token.clone()));
        }
        params
    }
}

/// Typed client for the digital-client endpoints.
#[derive(Debug, Clone)]
pub struct DigitalClientApi {
    transport: Arc<dyn AadeTransport>,
}

impl DigitalClientApi {
    /// Wraps a transport.
    #[must_use]
    pub fn new(transport: Arc<dyn AadeTransport>) -> Self {
        Self { transport }
    }

    /// Submits a new declaration (`POST SendClient`).
    ///
    /// # Errors
    ///
    /// Returns an encoding, transport or protocol [`AadeError`](super::AadeError).
    pub async fn send_client(&self, doc: &NewDeclaration) -> AadeResult<AadeResponse> {
        let body = encode_new_declaration(doc)?;
        let raw = self.transport.post(SEND_CLIENT_PATH, &[], Some(body)).await?;
        decode_response(&raw)
    }

    /// Completes a declaration (`POST UpdateClient`).
    ///
    /// # Errors
    ///
    /// Returns an encoding, transport or protocol [`AadeError`](super::AadeError).
    pub async fn update_client(&self, req: &UpdateRequest) -> AadeResult<AadeResponse> {
        let body = encode_update(req)?;
        let raw = self.transport.post(UPDATE_CLIENT_PATH, &[], Some(body)).await?;
        decode_response(&raw)
    }

    /// Cancels a declaration (`POST CancelClient`, no body).
    ///
    /// # Errors
    ///
    /// Returns a transport or protocol [`AadeError`](super::AadeError).
    pub async fn cancel_client(
        &self,
        remote_id: RemoteId,
        entity_vat_number: &TaxNumber,
    ) -> AadeResult<AadeResponse> {
        let query = [
            ("DCLID", remote_id.to_string()),
            ("entityVatNumber", entity_vat_number.to_string()),
        ];
        let raw = self.transport.post(CANCEL_CLIENT_PATH, &query, None).await?;
        decode_response(&raw)
    }

    /// Lists the entity's declarations (`GET RequestClients`).
    ///
    /// # Errors
    ///
    /// Returns a transport or protocol [`AadeError`](super::AadeError).
    pub async fn request_clients(
        &self,
        entity_vat_number: &TaxNumber,
        query: &ClientListQuery,
    ) -> AadeResult<ClientList> {
        let params = query.to_params(entity_vat_number);
        let raw = self.transport.get(REQUEST_CLIENTS_PATH, &params).await?;
        decode_client_list(&raw)
    }

    /// Links declarations to an invoice mark (`POST ClientCorrelations`).
    ///
    /// # Errors
    ///
    /// Returns an encoding, transport or protocol [`AadeError`](super::AadeError).
    pub async fn correlate(&self, req: &CorrelationRequest) -> AadeResult<AadeResponse> {
        let body = encode_correlation(req)?;
        let raw = self
            .transport
            .post(CLIENT_CORRELATIONS_PATH, &[], Some(body))
            .await?;
        decode_response(&raw)
    }
}

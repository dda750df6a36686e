//! # HTTP Client
//!
//! `reqwest`-backed [`AadeTransport`] for the digital client API.
//!
//! Every request carries the `aade-user-id` and `ocp-apim-subscription-key`
//! headers and an XML content type. Credentials come from a per-call
//! override or from the configuration the client was built with. With
//! neither, the call fails before anything is sent.
//!
//! # Examples
//!
//! ```ignore
//! use aade_digital_client::infrastructure::aade::{AadeConfig, AadeHttpClient};
//!
//! let client = AadeHttpClient::new(&AadeConfig::from_env()?)?;
//! let xml = client.get_with("RequestClients", &[("entityVatNumber", vat)], None).await?;
//! ```

use crate::infrastructure::aade::config::{AadeConfig, AadeCredentials};
use crate::infrastructure::aade::error::{AadeError, AadeResult};
use crate::infrastructure::aade::traits::AadeTransport;
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, RequestBuilder, Response};
use std::time::Duration;

/// Header carrying the registered user id.
pub const USER_ID_HEADER: &str = "aade-user-id";

/// Header carrying the subscription key.
pub const SUBSCRIPTION_KEY_HEADER: &str = "ocp-apim-subscription-key";

/// Content type of every request.
pub const XML_CONTENT_TYPE: &str = "application/xml; charset=UTF-8";

/// HTTP transport to one environment of the authority's API.
#[derive(Debug, Clone)]
pub struct AadeHttpClient {
    client: Client,
    base_url: String,
    credentials: Option<AadeCredentials>,
    timeout_ms: Option<u64>,
}

impl AadeHttpClient {
    /// Creates a client for the configured environment.
    ///
    /// Credentials are optional here; requests without any fail fast.
    ///
    /// # Errors
    ///
    /// Returns [`AadeError::Configuration`] if no environment is configured
    /// or the underlying client cannot be built.
    pub fn new(config: &AadeConfig) -> AadeResult<Self> {
        let environment = config
            .environment()
            .ok_or_else(|| AadeError::configuration("environment is not configured"))?;
        Self::with_base_url(
            environment.base_url(),
            config.credentials().cloned(),
            config.timeout_ms(),
        )
    }

    /// Creates a client against an explicit base URL.
    ///
    /// Used to point the client at a local mock server or an egress proxy.
    /// A trailing slash is added if missing.
    ///
    /// # Errors
    ///
    /// Returns [`AadeError::Configuration`] if the client cannot be built.
    pub fn with_base_url(
        base_url: impl Into<String>,
        credentials: Option<AadeCredentials>,
        timeout_ms: Option<u64>,
    ) -> AadeResult<Self> {
        let mut builder = Client::builder();
        if let Some(ms) = timeout_ms {
            builder = builder.timeout(Duration::from_millis(ms));
        }
        let client = builder
            .build()
            .map_err(|e| AadeError::configuration(format!("failed to create HTTP client: {e}")))?;

        let mut base_url = base_url.into();
        if !base_url.ends_with('/') {
            base_url.push('/');
        }

        Ok(Self {
            client,
            base_url,
            credentials,
            timeout_ms,
        })
    }

    /// Returns the base URL requests are resolved against.
    #[inline]
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns the explicit timeout in milliseconds, if one was set.
    #[inline]
    #[must_use]
    pub fn timeout_ms(&self) -> Option<u64> {
        self.timeout_ms
    }

    /// POSTs with an optional credential override.
    ///
    /// # Errors
    ///
    /// - [`AadeError::Configuration`] if no credentials are available
    /// - [`AadeError::Transport`] on a non-2xx status
    /// - [`AadeError::Connection`] / [`AadeError::Timeout`] on network failure
    pub async fn post_with(
        &self,
        path: &str,
        query: &[(&str, String)],
        body: Option<String>,
        credentials: Option<&AadeCredentials>,
    ) -> AadeResult<String> {
        let credentials = self.resolve_credentials(credentials)?;
        let mut request = self.client.post(self.url(path));
        if !query.is_empty() {
            request = request.query(query);
        }
        if let Some(body) = body {
            request = request.body(body);
        }
        tracing::debug!(path, "POST digital client endpoint");
        self.send(authenticate(request, credentials)).await
    }

    /// GETs with an optional credential override.
    ///
    /// # Errors
    ///
    /// Same as [`post_with`](Self::post_with).
    pub async fn get_with(
        &self,
        path: &str,
        query: &[(&str, String)],
        credentials: Option<&AadeCredentials>,
    ) -> AadeResult<String> {
        let credentials = self.resolve_credentials(credentials)?;
        let mut request = self.client.get(self.url(path));
        if !query.is_empty() {
            request = request.query(query);
        }
        tracing::debug!(path, "GET digital client endpoint");
        self.send(authenticate(request, credentials)).await
    }

    fn resolve_credentials<'a>(
        &'a self,
        override_credentials: Option<&'a AadeCredentials>,
    ) -> AadeResult<&'a AadeCredentials> {
        override_credentials
            .or(self.credentials.as_ref())
            .ok_or_else(|| {
                AadeError::configuration("no digital client credentials configured for request")
            })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn send(&self, request: RequestBuilder) -> AadeResult<String> {
        let response = request
            .send()
            .await
            .map_err(|e| self.map_reqwest_error(e))?;
        self.handle_response(response).await
    }

    /// Checks the status and returns the body as text.
    async fn handle_response(&self, response: Response) -> AadeResult<String> {
        let status = response.status();

        if status.is_success() {
            response
                .text()
                .await
                .map_err(|e| AadeError::protocol(format!("failed to read response body: {e}")))
        } else {
            let reason = status.canonical_reason().unwrap_or("Unknown Status");
            tracing::warn!(status = status.as_u16(), reason, "digital client returned error status");
            Err(AadeError::transport(status.as_u16(), reason))
        }
    }

    fn map_reqwest_error(&self, error: reqwest::Error) -> AadeError {
        if error.is_timeout() {
            match self.timeout_ms {
                Some(ms) => AadeError::timeout(format!("request timed out after {ms}ms")),
                None => AadeError::timeout(format!("request timed out: {error}")),
            }
        } else if error.is_connect() {
            AadeError::connection(format!("connection failed: {error}"))
        } else {
            AadeError::connection(format!("HTTP request failed: {error}"))
        }
    }
}

fn authenticate(request: RequestBuilder, credentials: &AadeCredentials) -> RequestBuilder {
    request
        .header(USER_ID_HEADER, credentials.user_id())
        .header(SUBSCRIPTION_KEY_HEADER, credentials.subscription_key())
        .header(CONTENT_TYPE, XML_CONTENT_TYPE)
}

#[async_trait]
impl AadeTransport for AadeHttpClient {
    async fn post(
        &self,
        path: &str,
        query: &[(&str, String)],
        body: Option<String>,
    ) -> AadeResult<String> {
        self.post_with(path, query, body, None).await
    }

    async fn get(&self, path: &str, query: &[(&str, String)]) -> AadeResult<String> {
        self.get_with(path, query, None).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::infrastructure::aade::config::{AadeEnvironment, PRODUCTION_BASE_URL};

    #[test]
    fn new_requires_environment() {
        let err = AadeHttpClient::new(&AadeConfig::new()).unwrap_err();
        assert!(err.is_configuration());
    }

    #[test]
    fn new_uses_environment_base_url() {
        let config = AadeConfig::new().with_environment(AadeEnvironment::Production);
        let client = AadeHttpClient::new(&config).unwrap();
        assert_eq!(client.base_url(), PRODUCTION_BASE_URL);
        assert_eq!(client.url("SendClient"), "https://mydatapi.aade.gr/DCL/SendClient");
    }

    #[test]
    fn no_timeout_is_set_unless_configured() {
        let config = AadeConfig::new().with_environment(AadeEnvironment::Development);
        assert_eq!(AadeHttpClient::new(&config).unwrap().timeout_ms(), None);
        let config = config.with_timeout_ms(2_500);
        assert_eq!(AadeHttpClient::new(&config).unwrap().timeout_ms(), Some(2_500));
    }

    #[test]
    fn base_url_gets_trailing_slash() {
        let client = AadeHttpClient::with_base_url("http://localhost:9000", None, Some(1000)).unwrap();
        assert_eq!(client.url("/CancelClient"), "http://localhost:9000/CancelClient");
        assert_eq!(client.timeout_ms(), Some(1000));
    }

    #[tokio::test]
    async fn missing_credentials_fail_before_sending() {
        // Port 9 (discard) would fail to connect; the configuration check must win.
        let client = AadeHttpClient::with_base_url("http://127.0.0.1:9/", None, None).unwrap();
        let err = client.post("SendClient", &[], Some("<x/>".into())).await.unwrap_err();
        assert!(err.is_configuration());
    }

    #[test]
    fn override_beats_configured_credentials() {
        let configured = AadeCredentials::new("configured", "k1");
        let client =
            AadeHttpClient::with_base_url("http://localhost/", Some(configured), None).unwrap();
        let override_creds = AadeCredentials::new("override", "k2");
        assert_eq!(
            client.resolve_credentials(Some(&override_creds)).unwrap().user_id(),
            "override"
        );
        assert_eq!(client.resolve_credentials(None).unwrap().user_id(), "configured");
    }
}

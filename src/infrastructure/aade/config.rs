//! # Digital Client Configuration
//!
//! Credentials, target environment and reporting entity for the authority's
//! digital client API.
//!
//! The value is built once and passed explicitly to
//! [`AadeHttpClient`](super::AadeHttpClient) and
//! [`SubmissionService`](crate::application::services::SubmissionService).
//!
//! # Examples
//!
//! ```
//! use aade_digital_client::infrastructure::aade::{AadeConfig, AadeEnvironment};
//!
//! let config = AadeConfig::new()
//!     .with_credentials("user", "key")
//!     .with_environment(AadeEnvironment::Development)
//!     .with_entity_vat_number("123456789")
//!     .unwrap();
//! assert!(config.is_configured());
//! ```

use crate::domain::value_objects::TaxNumber;
use crate::infrastructure::aade::error::{AadeError, AadeResult};
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

/// Production base endpoint.
pub const PRODUCTION_BASE_URL: &str = "https://mydatapi.aade.gr/DCL/";

/// Development (sandbox) base endpoint.
pub const DEVELOPMENT_BASE_URL: &str = "https://mydataapidev.aade.gr/DCL/";

/// Environment variable prefix read by [`AadeConfig::from_env`].
pub const ENV_PREFIX: &str = "AADE";

/// Target environment of the authority's API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AadeEnvironment {
    /// Live registry.
    Production,
    /// Sandbox registry.
    Development,
}

impl AadeEnvironment {
    /// Returns the base endpoint, including the trailing slash.
    #[must_use]
    pub const fn base_url(&self) -> &'static str {
        match self {
            Self::Production => PRODUCTION_BASE_URL,
            Self::Development => DEVELOPMENT_BASE_URL,
        }
    }
}

impl fmt::Display for AadeEnvironment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Production => write!(f, "production"),
            Self::Development => write!(f, "development"),
        }
    }
}

impl FromStr for AadeEnvironment {
    type Err = AadeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "production" => Ok(Self::Production),
            "development" => Ok(Self::Development),
            other => Err(AadeError::configuration(format!(
                "unknown environment '{other}', expected 'production' or 'development'"
            ))),
        }
    }
}

/// The credential header pair sent with every request.
#[derive(Clone, PartialEq, Eq)]
pub struct AadeCredentials {
    user_id: String,
    subscription_key: String,
}

impl AadeCredentials {
    /// Creates a credential pair.
    #[must_use]
    pub fn new(user_id: impl Into<String>, subscription_key: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            subscription_key: subscription_key.into(),
        }
    }

    /// Returns the value of the `aade-user-id` header.
    #[inline]
    #[must_use]
    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    /// Returns the value of the `ocp-apim-subscription-key` header.
    #[inline]
    #[must_use]
    pub fn subscription_key(&self) -> &str {
        &self.subscription_key
    }
}

impl fmt::Debug for AadeCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AadeCredentials")
            .field("user_id", &self.user_id)
            .field("subscription_key", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Default, Deserialize)]
struct RawSettings {
    user_id: Option<String>,
    subscription_key: Option<String>,
    environment: Option<String>,
    entity_vat_number: Option<String>,
    timeout_ms: Option<String>,
}

/// Digital client configuration.
///
/// All four protocol values (user id, subscription key, environment, entity
/// tax number) must be present for [`is_configured`](Self::is_configured).
/// A partial configuration is valid to hold; submissions then degrade to
/// advisory no-ops.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AadeConfig {
    credentials: Option<AadeCredentials>,
    environment: Option<AadeEnvironment>,
    entity_vat_number: Option<TaxNumber>,
    timeout_ms: Option<u64>,
}

impl Default for AadeConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl AadeConfig {
    /// Creates an empty configuration.
    #[must_use]
    pub fn new() -> Self {
        Self {
            credentials: None,
            environment: None,
            entity_vat_number: None,
            timeout_ms: None,
        }
    }

    /// Loads `.env` if present, then reads `AADE_*` environment variables.
    ///
    /// # Errors
    ///
    /// Returns [`AadeError::Configuration`] if a present value is malformed.
    pub fn from_env() -> AadeResult<Self> {
        if let Err(e) = dotenvy::dotenv() {
            if !e.not_found() {
                tracing::warn!(error = %e, "failed to read .env file");
            }
        }
        let settings = config::Config::builder()
            .add_source(config::Environment::with_prefix(ENV_PREFIX))
            .build()
            .map_err(|e| AadeError::configuration(e.to_string()))?;
        Self::from_settings(&settings)
    }

    /// Builds the configuration from an already assembled `config` source.
    ///
    /// Keys: `user_id`, `subscription_key`, `environment`,
    /// `entity_vat_number`, `timeout_ms`.
    ///
    /// # Errors
    ///
    /// Returns [`AadeError::Configuration`] if a present value is malformed.
    pub fn from_settings(settings: &config::Config) -> AadeResult<Self> {
        let raw: RawSettings = settings
            .clone()
            .try_deserialize()
            .map_err(|e| AadeError::configuration(e.to_string()))?;

        let mut config = Self::new();
        if let (Some(user_id), Some(key)) = (non_blank(raw.user_id), non_blank(raw.subscription_key))
        {
            config.credentials = Some(AadeCredentials::new(user_id, key));
        }
        if let Some(environment) = non_blank(raw.environment) {
            config.environment = Some(environment.parse()?);
        }
        if let Some(vat) = non_blank(raw.entity_vat_number) {
            config = config.with_entity_vat_number(vat)?;
        }
        if let Some(timeout) = non_blank(raw.timeout_ms) {
            let timeout_ms = timeout.trim().parse::<u64>().map_err(|e| {
                AadeError::configuration(format!("invalid timeout_ms '{timeout}': {e}"))
            })?;
            config.timeout_ms = Some(timeout_ms);
        }
        Ok(config)
    }

    /// Sets the credential pair.
    #[must_use]
    pub fn with_credentials(
        mut self,
        user_id: impl Into<String>,
        subscription_key: impl Into<String>,
    ) -> Self {
        self.credentials = Some(AadeCredentials::new(user_id, subscription_key));
        self
    }

    /// Sets the target environment.
    #[must_use]
    pub fn with_environment(mut self, environment: AadeEnvironment) -> Self {
        self.environment = Some(environment);
        self
    }

    /// Sets the reporting entity's tax number.
    ///
    /// # Errors
    ///
    /// Returns [`AadeError::Configuration`] unless the value is nine digits.
    pub fn with_entity_vat_number(mut self, vat: impl Into<String>) -> AadeResult<Self> {
        let vat = TaxNumber::parse(vat)
            .map_err(|e| AadeError::configuration(format!("entity tax number: {e}")))?;
        self.entity_vat_number = Some(vat);
        Ok(self)
    }

    /// Sets an explicit request timeout.
    ///
    /// Without one the HTTP client's own default applies.
    #[must_use]
    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = Some(timeout_ms);
        self
    }

    /// Returns the credentials.
    #[inline]
    #[must_use]
    pub fn credentials(&self) -> Option<&AadeCredentials> {
        self.credentials.as_ref()
    }

    /// Returns the environment.
    #[inline]
    #[must_use]
    pub fn environment(&self) -> Option<AadeEnvironment> {
        self.environment
    }

    /// Returns the reporting entity's tax number.
    #[inline]
    #[must_use]
    pub fn entity_vat_number(&self) -> Option<&TaxNumber> {
        self.entity_vat_number.as_ref()
    }

    /// Returns the explicit request timeout in milliseconds, if any.
    #[inline]
    #[must_use]
    pub fn timeout_ms(&self) -> Option<u64> {
        self.timeout_ms
    }

    /// Returns true when every protocol value is present.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        self.missing_fields().is_empty()
    }

    /// Lists the protocol values that are absent.
    #[must_use]
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.credentials.is_none() {
            missing.push("user_id/subscription_key");
        }
        if self.environment.is_none() {
            missing.push("environment");
        }
        if self.entity_vat_number.is_none() {
            missing.push("entity_vat_number");
        }
        missing
    }

    /// Returns the entity tax number or a configuration error.
    ///
    /// # Errors
    ///
    /// Returns [`AadeError::Configuration`] if the value is absent.
    pub fn require_entity_vat_number(&self) -> AadeResult<&TaxNumber> {
        self.entity_vat_number
            .as_ref()
            .ok_or_else(|| AadeError::configuration("entity tax number is not configured"))
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

//! # Digital Client Errors
//!
//! Error types for talking to the authority: configuration, transport and
//! protocol failures.
//!
//! Authority-reported rejections are not errors at this layer. They arrive
//! as a decoded [`AadeResponse`](super::codec::AadeResponse) whose status
//! code is not `Success`.
//!
//! # Examples
//!
//! ```
//! use aade_digital_client::infrastructure::aade::AadeError;
//!
//! let error = AadeError::transport(503, "Service Unavailable");
//! assert!(error.is_retryable());
//! assert_eq!(error.status_code(), Some(503));
//!
//! let error = AadeError::protocol("missing <response> element");
//! assert!(!error.is_retryable());
//! ```

use thiserror::Error;

/// Error type for digital client calls.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AadeError {
    /// Credentials, environment or entity tax number are missing or invalid.
    #[error("digital client configuration error: {message}")]
    Configuration {
        /// Error message.
        message: String,
    },

    /// The authority answered with a non-2xx HTTP status.
    #[error("digital client transport error: HTTP {status} {reason}")]
    Transport {
        /// HTTP status code.
        status: u16,
        /// Reason phrase or response excerpt.
        reason: String,
    },

    /// The request never got an HTTP response.
    #[error("digital client connection error: {message}")]
    Connection {
        /// Error message.
        message: String,
    },

    /// The request timed out.
    #[error("digital client timeout: {message}")]
    Timeout {
        /// Error message.
        message: String,
    },

    /// The response body is not the expected XML envelope.
    #[error("digital client protocol error: {message}")]
    Protocol {
        /// Error message.
        message: String,
    },

    /// A request document could not be serialized.
    #[error("digital client encoding error: {message}")]
    Encoding {
        /// Error message.
        message: String,
    },
}

impl AadeError {
    /// Creates a configuration error.
    #[must_use]
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Creates a transport error for a non-2xx status.
    #[must_use]
    pub fn transport(status: u16, reason: impl Into<String>) -> Self {
        Self::Transport {
            status,
            reason: reason.into(),
        }
    }

    /// Creates a connection error.
    #[must_use]
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Creates a timeout error.
    #[must_use]
    pub fn timeout(message: impl Into<String>) -> Self {
        Self::Timeout {
            message: message.into(),
        }
    }

    /// Creates a protocol error.
    #[must_use]
    pub fn protocol(message: impl Into<String>) -> Self {
        Self::Protocol {
            message: message.into(),
        }
    }

    /// Creates an encoding error.
    #[must_use]
    pub fn encoding(message: impl Into<String>) -> Self {
        Self::Encoding {
            message: message.into(),
        }
    }

    /// Returns true if a later retry may succeed.
    ///
    /// Callers decide whether to retry; nothing in this crate retries
    /// automatically.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Timeout { .. } | Self::Connection { .. } => true,
            Self::Transport { status, .. } => *status == 429 || *status >= 500,
            Self::Configuration { .. } | Self::Protocol { .. } | Self::Encoding { .. } => false,
        }
    }

    /// Returns true for transport-level failures (no usable response).
    #[must_use]
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            Self::Transport { .. } | Self::Connection { .. } | Self::Timeout { .. }
        )
    }

    /// Returns true for configuration failures.
    #[must_use]
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration { .. })
    }

    /// Returns the HTTP status, if the authority answered.
    #[must_use]
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Transport { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Result type for digital client calls.
pub type AadeResult<T> = Result<T, AadeError>;

//! Error types for the Notifica client library.
//!
//! This module contains the full error taxonomy for API calls as well as
//! configuration errors raised at construction time.
//!
//! # Error Handling
//!
//! Every API call returns `Result<T, NotificaError>`. The error is a closed
//! enum, so callers classify failures with a single `match` instead of
//! downcasting:
//!
//! ```rust,ignore
//! match client.notifications().get("ntf_123").await {
//!     Ok(notification) => { /* ... */ }
//!     Err(NotificaError::Validation { details, .. }) => { /* fix the request */ }
//!     Err(NotificaError::RateLimit { retry_after, .. }) => { /* slow down */ }
//!     Err(NotificaError::Timeout { .. }) => { /* deadline expired */ }
//!     Err(NotificaError::Api { status, code, .. }) => { /* other API failure */ }
//!     Err(NotificaError::Transport { .. }) => { /* network problem */ }
//! }
//! ```

use std::collections::HashMap;
use std::time::Duration;

use thiserror::Error;

/// Field-level validation messages keyed by field name.
pub type ErrorDetails = HashMap<String, Vec<String>>;

/// Statuses the request engine retries when attempts remain.
pub(crate) const RETRYABLE_SERVER_STATUSES: [u16; 4] = [500, 502, 503, 504];

/// Unified error type for all Notifica API operations.
///
/// Each variant carries the fields specific to its failure class. Errors are
/// created at the point where an HTTP response or transport failure is
/// observed and surfaced only after the retry budget is spent (for retryable
/// classes) or immediately (for terminal classes).
#[derive(Debug, Error)]
pub enum NotificaError {
    /// The server rejected the request as malformed (HTTP 422).
    ///
    /// Validation failures are terminal and never retried.
    #[error("{message}")]
    Validation {
        /// Human-readable message from the error envelope.
        message: String,
        /// Field-level validation messages, keyed by field name.
        details: ErrorDetails,
        /// Correlation id from the `x-request-id` response header.
        request_id: Option<String>,
    },

    /// The server rate-limited the request (HTTP 429).
    #[error("{message}")]
    RateLimit {
        /// Human-readable message from the error envelope.
        message: String,
        /// Server retry hint in seconds, from the `Retry-After` header.
        ///
        /// A hint of `0` is a valid immediate-retry signal. `None` means the
        /// server gave no hint and exponential backoff applies.
        retry_after: Option<f64>,
        /// Correlation id from the `x-request-id` response header.
        request_id: Option<String>,
    },

    /// The engine's own deadline expired before a response arrived.
    #[error("request timed out after {timeout:?}")]
    Timeout {
        /// The timeout that was in effect for the call.
        timeout: Duration,
    },

    /// Any other non-2xx API response.
    ///
    /// Responses with status 500, 502, 503, or 504 carry the code
    /// `server_error` and are retried; every other status is terminal.
    #[error("{message}")]
    Api {
        /// HTTP status code of the response.
        status: u16,
        /// Machine-readable error code from the envelope.
        code: String,
        /// Human-readable message from the error envelope.
        message: String,
        /// Field-level validation messages, keyed by field name.
        details: ErrorDetails,
        /// Correlation id from the `x-request-id` response header.
        request_id: Option<String>,
    },

    /// A transport-level failure: network error, cancelled call, or an
    /// invalid webhook signature raised by the throwing verifier.
    #[error("{message}")]
    Transport {
        /// Description of the failure, preserving the underlying message.
        message: String,
    },
}

impl NotificaError {
    /// Returns the HTTP status associated with this error, if any.
    ///
    /// `Validation` is always 422 and `RateLimit` always 429; `Timeout` and
    /// `Transport` have no status.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Validation { .. } => Some(422),
            Self::RateLimit { .. } => Some(429),
            Self::Api { status, .. } => Some(*status),
            Self::Timeout { .. } | Self::Transport { .. } => None,
        }
    }

    /// Returns the machine-readable error code, if any.
    #[must_use]
    pub fn code(&self) -> Option<&str> {
        match self {
            Self::Validation { .. } => Some("validation_failed"),
            Self::RateLimit { .. } => Some("rate_limit_exceeded"),
            Self::Api { code, .. } => Some(code),
            Self::Timeout { .. } | Self::Transport { .. } => None,
        }
    }

    /// Returns field-level validation details, if any.
    #[must_use]
    pub fn details(&self) -> Option<&ErrorDetails> {
        match self {
            Self::Validation { details, .. } | Self::Api { details, .. } => Some(details),
            _ => None,
        }
    }

    /// Returns the request correlation id, if the response carried one.
    #[must_use]
    pub fn request_id(&self) -> Option<&str> {
        match self {
            Self::Validation { request_id, .. }
            | Self::RateLimit { request_id, .. }
            | Self::Api { request_id, .. } => request_id.as_deref(),
            Self::Timeout { .. } | Self::Transport { .. } => None,
        }
    }

    /// Returns the server's retry hint in seconds, for rate-limit errors.
    #[must_use]
    pub const fn retry_after(&self) -> Option<f64> {
        match self {
            Self::RateLimit { retry_after, .. } => *retry_after,
            _ => None,
        }
    }

    /// Whether the request engine may retry after this error.
    ///
    /// Rate limits, timeouts, transport failures, and 5xx server errors are
    /// retryable; validation failures and all other API errors are terminal.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::RateLimit { .. } | Self::Timeout { .. } | Self::Transport { .. } => true,
            Self::Api { status, .. } => RETRYABLE_SERVER_STATUSES.contains(status),
            Self::Validation { .. } => false,
        }
    }

    /// Creates a transport error preserving the given message.
    pub(crate) fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }
}

/// Errors that can occur during client configuration.
///
/// Configuration is validated fail-fast: an invalid credential or base URL
/// is rejected at construction and never reaches the request engine.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// API key cannot be empty.
    #[error("API key cannot be empty. Please provide a valid Notifica API key.")]
    EmptyApiKey,

    /// Base URL is invalid.
    #[error("Invalid base URL '{url}'. Please provide a valid URL with scheme (e.g., 'https://api.notifica.io/v1').")]
    InvalidBaseUrl {
        /// The invalid URL that was provided.
        url: String,
    },

    /// A required field is missing.
    #[error("Missing required field: '{field}'. This field must be set before building the configuration.")]
    MissingRequiredField {
        /// The name of the missing field.
        field: &'static str,
    },
}

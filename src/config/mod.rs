//! Configuration types for the Notifica client.
//!
//! # Overview
//!
//! The main types in this module are:
//!
//! - [`ClientConfig`]: The configuration struct owned by a request engine
//! - [`ClientConfigBuilder`]: A builder for constructing [`ClientConfig`] instances
//! - [`ApiKey`]: A validated, Debug-masked API key newtype
//! - [`BaseUrl`]: A validated base URL with trailing slashes stripped
//!
//! # Example
//!
//! ```rust
//! use notifica::{ApiKey, ClientConfig};
//!
//! let config = ClientConfig::builder()
//!     .api_key(ApiKey::new("nk_live_abc123").unwrap())
//!     .max_retries(5)
//!     .build()
//!     .unwrap();
//! ```

mod newtypes;

pub use newtypes::{ApiKey, BaseUrl};

use std::time::Duration;

use crate::error::ConfigError;

/// Default production API origin.
pub const DEFAULT_BASE_URL: &str = "https://api.notifica.io/v1";

/// Default per-call timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default number of retries after the initial attempt.
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Configuration for the Notifica client.
///
/// Owned by one request engine for its lifetime and never mutated after
/// construction.
///
/// # Thread Safety
///
/// `ClientConfig` is `Clone`, `Send`, and `Sync`; concurrent calls share it
/// read-only, so no locking is needed.
///
/// # Example
///
/// ```rust
/// use notifica::{ApiKey, ClientConfig};
///
/// let config = ClientConfig::builder()
///     .api_key(ApiKey::new("nk_live_abc123").unwrap())
///     .build()
///     .unwrap();
///
/// assert_eq!(config.max_retries(), 3);
/// assert!(config.auto_idempotency());
/// ```
#[derive(Clone, Debug)]
pub struct ClientConfig {
    api_key: ApiKey,
    base_url: BaseUrl,
    timeout: Duration,
    max_retries: u32,
    auto_idempotency: bool,
}

// Verify ClientConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ClientConfig>();
};

impl ClientConfig {
    /// Creates a new builder for constructing a `ClientConfig`.
    #[must_use]
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::new()
    }

    /// Returns the API key.
    #[must_use]
    pub const fn api_key(&self) -> &ApiKey {
        &self.api_key
    }

    /// Returns the base URL.
    #[must_use]
    pub const fn base_url(&self) -> &BaseUrl {
        &self.base_url
    }

    /// Returns the default per-call timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Returns the number of retries performed after the initial attempt.
    #[must_use]
    pub const fn max_retries(&self) -> u32 {
        self.max_retries
    }

    /// Returns whether POST requests get an auto-generated idempotency key.
    #[must_use]
    pub const fn auto_idempotency(&self) -> bool {
        self.auto_idempotency
    }
}

/// Builder for constructing [`ClientConfig`] instances.
///
/// The only required field is `api_key`; everything else defaults.
///
/// # Defaults
///
/// - `base_url`: [`DEFAULT_BASE_URL`]
/// - `timeout`: 30 seconds
/// - `max_retries`: 3
/// - `auto_idempotency`: `true`
#[derive(Debug, Default)]
pub struct ClientConfigBuilder {
    api_key: Option<ApiKey>,
    base_url: Option<BaseUrl>,
    timeout: Option<Duration>,
    max_retries: Option<u32>,
    auto_idempotency: Option<bool>,
}

impl ClientConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the API key (required).
    #[must_use]
    pub fn api_key(mut self, key: ApiKey) -> Self {
        self.api_key = Some(key);
        self
    }

    /// Sets the base URL.
    #[must_use]
    pub fn base_url(mut self, url: BaseUrl) -> Self {
        self.base_url = Some(url);
        self
    }

    /// Sets the default per-call timeout.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the number of retries performed after the initial attempt.
    ///
    /// A value of `0` disables retries entirely: every call performs exactly
    /// one HTTP attempt.
    #[must_use]
    pub const fn max_retries(mut self, retries: u32) -> Self {
        self.max_retries = Some(retries);
        self
    }

    /// Sets whether POST requests get an auto-generated idempotency key.
    #[must_use]
    pub const fn auto_idempotency(mut self, enabled: bool) -> Self {
        self.auto_idempotency = Some(enabled);
        self
    }

    /// Builds the [`ClientConfig`], validating that required fields are set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRequiredField`] if `api_key` is not set,
    /// or [`ConfigError::InvalidBaseUrl`] if the default base URL fails to
    /// parse (it cannot).
    pub fn build(self) -> Result<ClientConfig, ConfigError> {
        let api_key = self
            .api_key
            .ok_or(ConfigError::MissingRequiredField { field: "api_key" })?;
        let base_url = match self.base_url {
            Some(url) => url,
            None => BaseUrl::new(DEFAULT_BASE_URL)?,
        };

        Ok(ClientConfig {
            api_key,
            base_url,
            timeout: self.timeout.unwrap_or(DEFAULT_TIMEOUT),
            max_retries: self.max_retries.unwrap_or(DEFAULT_MAX_RETRIES),
            auto_idempotency: self.auto_idempotency.unwrap_or(true),
        })
    }
}

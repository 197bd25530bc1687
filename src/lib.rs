//! # Notifica API Library
//!
//! A Rust client for the Notifica notification platform REST API, providing
//! type-safe configuration, a resilient request engine, and typed resource
//! wrappers for Notifica app development.
//!
//! ## Overview
//!
//! This library provides:
//! - Type-safe configuration via [`ClientConfig`] and [`ClientConfigBuilder`]
//! - Validated newtypes for the API key and base URL
//! - A request engine with retries, exponential backoff, and `Retry-After`
//!   support via [`client::HttpClient`]
//! - Automatic idempotency keys for POST requests
//! - Per-call timeouts and cooperative cancellation
//! - Lazy cursor pagination via [`Paginator`]
//! - Webhook signature verification via [`webhooks`]
//! - Typed resources for notifications, subscribers, templates, workflows,
//!   and webhook endpoints
//!
//! ## Quick Start
//!
//! ```rust
//! use notifica::{ApiKey, ClientConfig, Notifica};
//!
//! // Create configuration using the builder pattern
//! let config = ClientConfig::builder()
//!     .api_key(ApiKey::new("nk_live_abc123").unwrap())
//!     .max_retries(5)
//!     .build()
//!     .unwrap();
//!
//! let client = Notifica::new(config);
//! ```
//!
//! ## Sending a Notification
//!
//! ```rust,ignore
//! use notifica::{Notifica, SendNotificationRequest};
//!
//! let client = Notifica::from_api_key("nk_live_abc123")?;
//!
//! let notification = client.notifications().send(
//!     &SendNotificationRequest {
//!         template_id: Some("tpl_welcome".to_string()),
//!         subscriber_id: Some("sub_42".to_string()),
//!         ..Default::default()
//!     },
//!     None,
//! ).await?;
//!
//! println!("sent {}", notification.id);
//! ```
//!
//! ## Walking a Listing
//!
//! Listings are cursor-paginated. [`Paginator`] fetches pages on demand, so
//! stopping early never fetches pages you do not consume:
//!
//! ```rust,ignore
//! use notifica::{ListNotificationsParams, Notifica};
//!
//! let client = Notifica::from_api_key("nk_live_abc123")?;
//!
//! let mut pages = client.notifications().paginate(ListNotificationsParams {
//!     status: Some("failed".to_string()),
//!     ..Default::default()
//! });
//!
//! while let Some(notification) = pages.try_next().await? {
//!     println!("{}", notification.id);
//! }
//! ```
//!
//! ## Handling Errors
//!
//! Every call returns a single closed error type, [`NotificaError`], that
//! callers can match exhaustively:
//!
//! ```rust,ignore
//! use notifica::NotificaError;
//!
//! match client.notifications().get("ntf_1", None).await {
//!     Ok(notification) => println!("{:?}", notification.status),
//!     Err(NotificaError::RateLimit { retry_after, .. }) => {
//!         println!("throttled, retry after {:?}", retry_after);
//!     }
//!     Err(NotificaError::Validation { details, .. }) => {
//!         println!("rejected: {:?}", details);
//!     }
//!     Err(other) => return Err(other.into()),
//! }
//! ```
//!
//! ## Verifying Webhooks
//!
//! ```rust
//! use notifica::webhooks;
//!
//! let raw_body = b"{\"event\":\"notification.sent\"}";
//! let secret = "whsec_abc123";
//! let signature = webhooks::compute_signature(raw_body, secret);
//!
//! assert!(webhooks::verify(raw_body, &signature, secret));
//! ```
//!
//! ## Design Principles
//!
//! - **No global state**: Configuration is instance-based and passed explicitly
//! - **Fail-fast validation**: All newtypes validate on construction
//! - **Thread-safe**: All types are `Send + Sync`
//! - **Async-first**: Designed for use with Tokio async runtime
//! - **Closed error type**: One exhaustively matchable enum for every failure

pub mod client;
pub mod config;
pub mod error;
pub mod resources;
pub mod webhooks;

// Re-export public types at crate root for convenience
pub use config::{ApiKey, BaseUrl, ClientConfig, ClientConfigBuilder};
pub use error::{ConfigError, ErrorDetails, NotificaError};

// Re-export request engine types
pub use client::{
    Envelope, HttpClient, HttpMethod, Page, PageMeta, Paginator, QueryPairs, RequestOptions,
};

// Re-export resource models for convenience
pub use resources::{
    ListNotificationsParams, ListSubscribersParams, ListTemplatesParams, ListWebhooksParams,
    ListWorkflowsParams, Notification, Notifications, SendNotificationRequest, Subscriber,
    SubscriberRequest, Subscribers, Template, TemplateRequest, Templates, TriggerWorkflowRequest,
    WebhookEndpoint, WebhookRequest, Webhooks, Workflow, WorkflowRequest, Workflows,
};

/// Entry point for the Notifica API.
///
/// Owns one request engine and hands out borrowed resource accessors. Cheap
/// to share behind an `Arc` across tasks.
///
/// # Example
///
/// ```rust
/// use notifica::Notifica;
///
/// let client = Notifica::from_api_key("nk_live_abc123").unwrap();
/// let _notifications = client.notifications();
/// ```
#[derive(Debug)]
pub struct Notifica {
    http: HttpClient,
}

// Verify Notifica is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Notifica>();
};

impl Notifica {
    /// Creates a client from a full configuration.
    #[must_use]
    pub fn new(config: ClientConfig) -> Self {
        Self {
            http: HttpClient::new(config),
        }
    }

    /// Creates a client from an API key with every other setting defaulted.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyApiKey`] if the key is empty.
    pub fn from_api_key(api_key: &str) -> Result<Self, ConfigError> {
        let config = ClientConfig::builder()
            .api_key(ApiKey::new(api_key)?)
            .build()?;
        Ok(Self::new(config))
    }

    /// Returns the underlying request engine for untyped calls.
    #[must_use]
    pub const fn http(&self) -> &HttpClient {
        &self.http
    }

    /// Typed access to `/notifications`.
    #[must_use]
    pub const fn notifications(&self) -> Notifications<'_> {
        Notifications::new(&self.http)
    }

    /// Typed access to `/subscribers`.
    #[must_use]
    pub const fn subscribers(&self) -> Subscribers<'_> {
        Subscribers::new(&self.http)
    }

    /// Typed access to `/templates`.
    #[must_use]
    pub const fn templates(&self) -> Templates<'_> {
        Templates::new(&self.http)
    }

    /// Typed access to `/workflows`.
    #[must_use]
    pub const fn workflows(&self) -> Workflows<'_> {
        Workflows::new(&self.http)
    }

    /// Typed access to `/webhooks` endpoint management.
    #[must_use]
    pub const fn webhooks(&self) -> Webhooks<'_> {
        Webhooks::new(&self.http)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_api_key_rejects_empty_key() {
        assert!(matches!(
            Notifica::from_api_key(""),
            Err(ConfigError::EmptyApiKey)
        ));
    }

    #[test]
    fn test_facade_exposes_configured_engine() {
        let client = Notifica::from_api_key("nk_live_abc123").unwrap();

        assert_eq!(client.http().config().max_retries(), 3);
    }
}

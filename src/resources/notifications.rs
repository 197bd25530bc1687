//! Notifications resource.
//!
//! Sending is a POST and therefore idempotency-protected: the engine
//! attaches an auto-generated `Idempotency-Key` unless the caller supplies
//! one through [`RequestOptions`].
//!
//! # Example
//!
//! ```rust,ignore
//! use notifica::{Notifica, SendNotificationRequest};
//!
//! let client = Notifica::from_api_key("nk_live_abc123")?;
//!
//! let sent = client.notifications().send(
//!     &SendNotificationRequest {
//!         template_id: Some("tpl_welcome".to_string()),
//!         subscriber_id: Some("sub_42".to_string()),
//!         ..Default::default()
//!     },
//!     None,
//! ).await?;
//!
//! // Walk every notification lazily, page by page
//! let mut pages = client.notifications().paginate(Default::default());
//! while let Some(notification) = pages.try_next().await? {
//!     println!("{} -> {:?}", notification.id, notification.status);
//! }
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::client::{
    Envelope, HttpClient, Page, Paginator, QueryPairs, RequestOptions,
};
use crate::error::NotificaError;
use crate::resources::{item_path, to_body};

/// A notification delivery.
#[derive(Debug, Clone, Deserialize)]
pub struct Notification {
    /// Unique notification id.
    pub id: String,
    /// Delivery status (e.g., `queued`, `sent`, `failed`).
    pub status: Option<String>,
    /// Template the notification was rendered from, if any.
    pub template_id: Option<String>,
    /// Workflow that produced the notification, if any.
    pub workflow_id: Option<String>,
    /// Recipient subscriber id.
    pub subscriber_id: Option<String>,
    /// Delivery channel (e.g., `email`, `sms`, `push`).
    pub channel: Option<String>,
    /// Arbitrary payload merged into the template.
    pub payload: Option<Value>,
    /// When the notification was created.
    pub created_at: Option<DateTime<Utc>>,
}

/// Body for sending a notification.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SendNotificationRequest {
    /// Template to render.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template_id: Option<String>,
    /// Recipient subscriber id.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subscriber_id: Option<String>,
    /// Delivery channel override.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channel: Option<String>,
    /// Arbitrary payload merged into the template.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payload: Option<Value>,
}

/// Filters for listing notifications.
#[derive(Debug, Clone, Default)]
pub struct ListNotificationsParams {
    /// Page size (server default 20, max 100).
    pub limit: Option<u32>,
    /// Filter by delivery status.
    pub status: Option<String>,
    /// Filter by recipient subscriber.
    pub subscriber_id: Option<String>,
}

impl ListNotificationsParams {
    fn into_query(self) -> QueryPairs {
        vec![
            ("limit".to_string(), self.limit.map(|v| v.to_string())),
            ("status".to_string(), self.status),
            ("subscriber_id".to_string(), self.subscriber_id),
        ]
    }
}

/// Typed access to `/notifications`.
#[derive(Debug, Clone, Copy)]
pub struct Notifications<'a> {
    http: &'a HttpClient,
}

impl<'a> Notifications<'a> {
    pub(crate) const fn new(http: &'a HttpClient) -> Self {
        Self { http }
    }

    /// Sends a notification.
    ///
    /// # Errors
    ///
    /// Returns the classified [`NotificaError`] of the final attempt.
    pub async fn send(
        &self,
        request: &SendNotificationRequest,
        options: Option<&RequestOptions>,
    ) -> Result<Notification, NotificaError> {
        let body = to_body(request)?;
        let envelope: Envelope<Notification> = self
            .http
            .post("/notifications", Some(&body), options)
            .await?;
        Ok(envelope.data)
    }

    /// Fetches a single notification by id.
    ///
    /// # Errors
    ///
    /// Returns the classified [`NotificaError`] of the final attempt.
    pub async fn get(
        &self,
        id: &str,
        options: Option<&RequestOptions>,
    ) -> Result<Notification, NotificaError> {
        self.http
            .get_one(&item_path("/notifications", id), &Vec::new(), options)
            .await
    }

    /// Lists one page of notifications.
    ///
    /// # Errors
    ///
    /// Returns the classified [`NotificaError`] of the final attempt.
    pub async fn list(
        &self,
        params: ListNotificationsParams,
        options: Option<&RequestOptions>,
    ) -> Result<Page<Notification>, NotificaError> {
        self.http
            .list("/notifications", &params.into_query(), options)
            .await
    }

    /// Lazily iterates every notification matching the filters.
    #[must_use]
    pub fn paginate(&self, params: ListNotificationsParams) -> Paginator<'a, Notification> {
        self.http.paginate("/notifications", params.into_query())
    }

    /// Cancels a queued notification.
    ///
    /// # Errors
    ///
    /// Returns the classified [`NotificaError`] of the final attempt.
    pub async fn cancel(
        &self,
        id: &str,
        options: Option<&RequestOptions>,
    ) -> Result<(), NotificaError> {
        self.http
            .delete(&item_path("/notifications", id), options)
            .await
    }
}

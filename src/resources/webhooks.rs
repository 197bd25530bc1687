//! Webhook endpoints resource.
//!
//! Endpoint management only. Verifying inbound webhook signatures lives in
//! [`crate::webhooks`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::client::{Envelope, HttpClient, Page, Paginator, QueryPairs, RequestOptions};
use crate::error::NotificaError;
use crate::resources::{item_path, to_body};

/// A registered webhook endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct WebhookEndpoint {
    /// Unique endpoint id.
    pub id: String,
    /// Destination URL events are delivered to.
    pub url: Option<String>,
    /// Event types the endpoint subscribes to.
    pub events: Option<Vec<String>>,
    /// Shared secret used to sign deliveries. Only returned on creation.
    pub secret: Option<String>,
    /// Whether deliveries to the endpoint are enabled.
    pub active: Option<bool>,
    /// When the endpoint was created.
    pub created_at: Option<DateTime<Utc>>,
}

/// Body for creating or updating a webhook endpoint.
#[derive(Debug, Clone, Default, Serialize)]
pub struct WebhookRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub events: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
}

/// Filters for listing webhook endpoints.
#[derive(Debug, Clone, Default)]
pub struct ListWebhooksParams {
    /// Page size (server default 20, max 100).
    pub limit: Option<u32>,
    /// Filter by active flag.
    pub active: Option<bool>,
}

impl ListWebhooksParams {
    fn into_query(self) -> QueryPairs {
        vec![
            ("limit".to_string(), self.limit.map(|v| v.to_string())),
            ("active".to_string(), self.active.map(|v| v.to_string())),
        ]
    }
}

/// Typed access to `/webhooks`.
#[derive(Debug, Clone, Copy)]
pub struct Webhooks<'a> {
    http: &'a HttpClient,
}

impl<'a> Webhooks<'a> {
    pub(crate) const fn new(http: &'a HttpClient) -> Self {
        Self { http }
    }

    /// Registers a webhook endpoint.
    ///
    /// The response includes the endpoint's signing secret; it is not
    /// returned by later reads, so store it on creation.
    ///
    /// # Errors
    ///
    /// Returns the classified [`NotificaError`] of the final attempt.
    pub async fn create(
        &self,
        request: &WebhookRequest,
        options: Option<&RequestOptions>,
    ) -> Result<WebhookEndpoint, NotificaError> {
        let body = to_body(request)?;
        let envelope: Envelope<WebhookEndpoint> =
            self.http.post("/webhooks", Some(&body), options).await?;
        Ok(envelope.data)
    }

    /// Fetches a single webhook endpoint by id.
    ///
    /// # Errors
    ///
    /// Returns the classified [`NotificaError`] of the final attempt.
    pub async fn get(
        &self,
        id: &str,
        options: Option<&RequestOptions>,
    ) -> Result<WebhookEndpoint, NotificaError> {
        self.http
            .get_one(&item_path("/webhooks", id), &Vec::new(), options)
            .await
    }

    /// Lists one page of webhook endpoints.
    ///
    /// # Errors
    ///
    /// Returns the classified [`NotificaError`] of the final attempt.
    pub async fn list(
        &self,
        params: ListWebhooksParams,
        options: Option<&RequestOptions>,
    ) -> Result<Page<WebhookEndpoint>, NotificaError> {
        self.http
            .list("/webhooks", &params.into_query(), options)
            .await
    }

    /// Lazily iterates every webhook endpoint matching the filters.
    #[must_use]
    pub fn paginate(&self, params: ListWebhooksParams) -> Paginator<'a, WebhookEndpoint> {
        self.http.paginate("/webhooks", params.into_query())
    }

    /// Updates a webhook endpoint in place.
    ///
    /// # Errors
    ///
    /// Returns the classified [`NotificaError`] of the final attempt.
    pub async fn update(
        &self,
        id: &str,
        request: &WebhookRequest,
        options: Option<&RequestOptions>,
    ) -> Result<WebhookEndpoint, NotificaError> {
        let body = to_body(request)?;
        let envelope: Envelope<WebhookEndpoint> = self
            .http
            .patch(&item_path("/webhooks", id), Some(&body), options)
            .await?;
        Ok(envelope.data)
    }

    /// Removes a webhook endpoint.
    ///
    /// # Errors
    ///
    /// Returns the classified [`NotificaError`] of the final attempt.
    pub async fn delete(
        &self,
        id: &str,
        options: Option<&RequestOptions>,
    ) -> Result<(), NotificaError> {
        self.http.delete(&item_path("/webhooks", id), options).await
    }
}

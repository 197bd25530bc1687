//! Subscribers resource.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::client::{Envelope, HttpClient, Page, Paginator, QueryPairs, RequestOptions};
use crate::error::NotificaError;
use crate::resources::{item_path, to_body};

/// A notification recipient.
#[derive(Debug, Clone, Deserialize)]
pub struct Subscriber {
    /// Unique subscriber id.
    pub id: String,
    /// Email address, for the email channel.
    pub email: Option<String>,
    /// Phone number, for the SMS channel.
    pub phone: Option<String>,
    /// Display name.
    pub name: Option<String>,
    /// Arbitrary extra attributes.
    pub attributes: Option<Value>,
    /// When the subscriber was created.
    pub created_at: Option<DateTime<Utc>>,
}

/// Body for creating or updating a subscriber.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SubscriberRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attributes: Option<Value>,
}

/// Filters for listing subscribers.
#[derive(Debug, Clone, Default)]
pub struct ListSubscribersParams {
    /// Page size (server default 20, max 100).
    pub limit: Option<u32>,
    /// Filter by email address.
    pub email: Option<String>,
}

impl ListSubscribersParams {
    fn into_query(self) -> QueryPairs {
        vec![
            ("limit".to_string(), self.limit.map(|v| v.to_string())),
            ("email".to_string(), self.email),
        ]
    }
}

/// Typed access to `/subscribers`.
#[derive(Debug, Clone, Copy)]
pub struct Subscribers<'a> {
    http: &'a HttpClient,
}

impl<'a> Subscribers<'a> {
    pub(crate) const fn new(http: &'a HttpClient) -> Self {
        Self { http }
    }

    /// Creates a subscriber.
    ///
    /// # Errors
    ///
    /// Returns the classified [`NotificaError`] of the final attempt.
    pub async fn create(
        &self,
        request: &SubscriberRequest,
        options: Option<&RequestOptions>,
    ) -> Result<Subscriber, NotificaError> {
        let body = to_body(request)?;
        let envelope: Envelope<Subscriber> =
            self.http.post("/subscribers", Some(&body), options).await?;
        Ok(envelope.data)
    }

    /// Fetches a single subscriber by id.
    ///
    /// # Errors
    ///
    /// Returns the classified [`NotificaError`] of the final attempt.
    pub async fn get(
        &self,
        id: &str,
        options: Option<&RequestOptions>,
    ) -> Result<Subscriber, NotificaError> {
        self.http
            .get_one(&item_path("/subscribers", id), &Vec::new(), options)
            .await
    }

    /// Lists one page of subscribers.
    ///
    /// # Errors
    ///
    /// Returns the classified [`NotificaError`] of the final attempt.
    pub async fn list(
        &self,
        params: ListSubscribersParams,
        options: Option<&RequestOptions>,
    ) -> Result<Page<Subscriber>, NotificaError> {
        self.http
            .list("/subscribers", &params.into_query(), options)
            .await
    }

    /// Lazily iterates every subscriber matching the filters.
    #[must_use]
    pub fn paginate(&self, params: ListSubscribersParams) -> Paginator<'a, Subscriber> {
        self.http.paginate("/subscribers", params.into_query())
    }

    /// Updates a subscriber in place.
    ///
    /// # Errors
    ///
    /// Returns the classified [`NotificaError`] of the final attempt.
    pub async fn update(
        &self,
        id: &str,
        request: &SubscriberRequest,
        options: Option<&RequestOptions>,
    ) -> Result<Subscriber, NotificaError> {
        let body = to_body(request)?;
        let envelope: Envelope<Subscriber> = self
            .http
            .patch(&item_path("/subscribers", id), Some(&body), options)
            .await?;
        Ok(envelope.data)
    }

    /// Deletes a subscriber.
    ///
    /// # Errors
    ///
    /// Returns the classified [`NotificaError`] of the final attempt.
    pub async fn delete(
        &self,
        id: &str,
        options: Option<&RequestOptions>,
    ) -> Result<(), NotificaError> {
        self.http
            .delete(&item_path("/subscribers", id), options)
            .await
    }
}

//! Templates resource.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::client::{Envelope, HttpClient, Page, Paginator, QueryPairs, RequestOptions};
use crate::error::NotificaError;
use crate::resources::{item_path, to_body};

/// A message template.
#[derive(Debug, Clone, Deserialize)]
pub struct Template {
    /// Unique template id.
    pub id: String,
    /// Human-readable template name.
    pub name: Option<String>,
    /// Delivery channel the template renders for.
    pub channel: Option<String>,
    /// Subject line, for channels that have one.
    pub subject: Option<String>,
    /// Template body with placeholders.
    pub body: Option<String>,
    /// Arbitrary extra attributes.
    pub metadata: Option<Value>,
    /// When the template was created.
    pub created_at: Option<DateTime<Utc>>,
}

/// Body for creating or updating a template.
#[derive(Debug, Clone, Default, Serialize)]
pub struct TemplateRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channel: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Value>,
}

/// Filters for listing templates.
#[derive(Debug, Clone, Default)]
pub struct ListTemplatesParams {
    /// Page size (server default 20, max 100).
    pub limit: Option<u32>,
    /// Filter by delivery channel.
    pub channel: Option<String>,
}

impl ListTemplatesParams {
    fn into_query(self) -> QueryPairs {
        vec![
            ("limit".to_string(), self.limit.map(|v| v.to_string())),
            ("channel".to_string(), self.channel),
        ]
    }
}

/// Typed access to `/templates`.
#[derive(Debug, Clone, Copy)]
pub struct Templates<'a> {
    http: &'a HttpClient,
}

impl<'a> Templates<'a> {
    pub(crate) const fn new(http: &'a HttpClient) -> Self {
        Self { http }
    }

    /// Creates a template.
    ///
    /// # Errors
    ///
    /// Returns the classified [`NotificaError`] of the final attempt.
    pub async fn create(
        &self,
        request: &TemplateRequest,
        options: Option<&RequestOptions>,
    ) -> Result<Template, NotificaError> {
        let body = to_body(request)?;
        let envelope: Envelope<Template> =
            self.http.post("/templates", Some(&body), options).await?;
        Ok(envelope.data)
    }

    /// Fetches a single template by id.
    ///
    /// # Errors
    ///
    /// Returns the classified [`NotificaError`] of the final attempt.
    pub async fn get(
        &self,
        id: &str,
        options: Option<&RequestOptions>,
    ) -> Result<Template, NotificaError> {
        self.http
            .get_one(&item_path("/templates", id), &Vec::new(), options)
            .await
    }

    /// Lists one page of templates.
    ///
    /// # Errors
    ///
    /// Returns the classified [`NotificaError`] of the final attempt.
    pub async fn list(
        &self,
        params: ListTemplatesParams,
        options: Option<&RequestOptions>,
    ) -> Result<Page<Template>, NotificaError> {
        self.http
            .list("/templates", &params.into_query(), options)
            .await
    }

    /// Lazily iterates every template matching the filters.
    #[must_use]
    pub fn paginate(&self, params: ListTemplatesParams) -> Paginator<'a, Template> {
        self.http.paginate("/templates", params.into_query())
    }

    /// Replaces a template.
    ///
    /// # Errors
    ///
    /// Returns the classified [`NotificaError`] of the final attempt.
    pub async fn update(
        &self,
        id: &str,
        request: &TemplateRequest,
        options: Option<&RequestOptions>,
    ) -> Result<Template, NotificaError> {
        let body = to_body(request)?;
        let envelope: Envelope<Template> = self
            .http
            .put(&item_path("/templates", id), Some(&body), options)
            .await?;
        Ok(envelope.data)
    }

    /// Deletes a template.
    ///
    /// # Errors
    ///
    /// Returns the classified [`NotificaError`] of the final attempt.
    pub async fn delete(
        &self,
        id: &str,
        options: Option<&RequestOptions>,
    ) -> Result<(), NotificaError> {
        self.http.delete(&item_path("/templates", id), options).await
    }
}

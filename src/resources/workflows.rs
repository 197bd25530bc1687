//! Workflows resource.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::client::{Envelope, HttpClient, Page, Paginator, QueryPairs, RequestOptions};
use crate::error::NotificaError;
use crate::resources::{item_path, to_body};

/// A multi-step notification workflow.
#[derive(Debug, Clone, Deserialize)]
pub struct Workflow {
    /// Unique workflow id.
    pub id: String,
    /// Human-readable workflow name.
    pub name: Option<String>,
    /// Whether the workflow is active.
    pub active: Option<bool>,
    /// Ordered step definitions.
    pub steps: Option<Value>,
    /// When the workflow was created.
    pub created_at: Option<DateTime<Utc>>,
}

/// Body for creating or updating a workflow.
#[derive(Debug, Clone, Default, Serialize)]
pub struct WorkflowRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub steps: Option<Value>,
}

/// Body for triggering a workflow run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct TriggerWorkflowRequest {
    /// Recipient subscriber id.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subscriber_id: Option<String>,
    /// Arbitrary payload available to every step.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payload: Option<Value>,
}

/// Filters for listing workflows.
#[derive(Debug, Clone, Default)]
pub struct ListWorkflowsParams {
    /// Page size (server default 20, max 100).
    pub limit: Option<u32>,
    /// Filter by active flag.
    pub active: Option<bool>,
}

impl ListWorkflowsParams {
    fn into_query(self) -> QueryPairs {
        vec![
            ("limit".to_string(), self.limit.map(|v| v.to_string())),
            ("active".to_string(), self.active.map(|v| v.to_string())),
        ]
    }
}

/// Typed access to `/workflows`.
#[derive(Debug, Clone, Copy)]
pub struct Workflows<'a> {
    http: &'a HttpClient,
}

impl<'a> Workflows<'a> {
    pub(crate) const fn new(http: &'a HttpClient) -> Self {
        Self { http }
    }

    /// Creates a workflow.
    ///
    /// # Errors
    ///
    /// Returns the classified [`NotificaError`] of the final attempt.
    pub async fn create(
        &self,
        request: &WorkflowRequest,
        options: Option<&RequestOptions>,
    ) -> Result<Workflow, NotificaError> {
        let body = to_body(request)?;
        let envelope: Envelope<Workflow> =
            self.http.post("/workflows", Some(&body), options).await?;
        Ok(envelope.data)
    }

    /// Fetches a single workflow by id.
    ///
    /// # Errors
    ///
    /// Returns the classified [`NotificaError`] of the final attempt.
    pub async fn get(
        &self,
        id: &str,
        options: Option<&RequestOptions>,
    ) -> Result<Workflow, NotificaError> {
        self.http
            .get_one(&item_path("/workflows", id), &Vec::new(), options)
            .await
    }

    /// Lists one page of workflows.
    ///
    /// # Errors
    ///
    /// Returns the classified [`NotificaError`] of the final attempt.
    pub async fn list(
        &self,
        params: ListWorkflowsParams,
        options: Option<&RequestOptions>,
    ) -> Result<Page<Workflow>, NotificaError> {
        self.http
            .list("/workflows", &params.into_query(), options)
            .await
    }

    /// Lazily iterates every workflow matching the filters.
    #[must_use]
    pub fn paginate(&self, params: ListWorkflowsParams) -> Paginator<'a, Workflow> {
        self.http.paginate("/workflows", params.into_query())
    }

    /// Updates a workflow in place.
    ///
    /// # Errors
    ///
    /// Returns the classified [`NotificaError`] of the final attempt.
    pub async fn update(
        &self,
        id: &str,
        request: &WorkflowRequest,
        options: Option<&RequestOptions>,
    ) -> Result<Workflow, NotificaError> {
        let body = to_body(request)?;
        let envelope: Envelope<Workflow> = self
            .http
            .patch(&item_path("/workflows", id), Some(&body), options)
            .await?;
        Ok(envelope.data)
    }

    /// Triggers a workflow run.
    ///
    /// Triggering is a POST and therefore idempotency-protected.
    ///
    /// # Errors
    ///
    /// Returns the classified [`NotificaError`] of the final attempt.
    pub async fn trigger(
        &self,
        id: &str,
        request: &TriggerWorkflowRequest,
        options: Option<&RequestOptions>,
    ) -> Result<Workflow, NotificaError> {
        let body = to_body(request)?;
        let path = format!("{}/trigger", item_path("/workflows", id));
        let envelope: Envelope<Workflow> = self.http.post(&path, Some(&body), options).await?;
        Ok(envelope.data)
    }

    /// Deletes a workflow.
    ///
    /// # Errors
    ///
    /// Returns the classified [`NotificaError`] of the final attempt.
    pub async fn delete(
        &self,
        id: &str,
        options: Option<&RequestOptions>,
    ) -> Result<(), NotificaError> {
        self.http.delete(&item_path("/workflows", id), options).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_active_filter_serialized_as_string() {
        let query = ListWorkflowsParams {
            limit: None,
            active: Some(true),
        }
        .into_query();
        assert_eq!(query[1], ("active".to_string(), Some("true".to_string())));
    }
}

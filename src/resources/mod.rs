//! Thin typed wrappers over the request engine.
//!
//! Each resource is a direct mapping from a method name to an HTTP verb,
//! path, and body shape. All reliability behavior (retries, idempotency,
//! timeouts, pagination) lives in [`crate::client::HttpClient`]; the
//! wrappers only build paths, queries, and bodies and unwrap response
//! envelopes.

mod notifications;
mod subscribers;
mod templates;
mod webhooks;
mod workflows;

pub use notifications::{
    ListNotificationsParams, Notification, Notifications, SendNotificationRequest,
};
pub use subscribers::{ListSubscribersParams, Subscriber, SubscriberRequest, Subscribers};
pub use templates::{ListTemplatesParams, Template, TemplateRequest, Templates};
pub use webhooks::{ListWebhooksParams, WebhookEndpoint, WebhookRequest, Webhooks};
pub use workflows::{
    ListWorkflowsParams, TriggerWorkflowRequest, Workflow, WorkflowRequest, Workflows,
};

use serde::Serialize;
use serde_json::Value;

use crate::error::NotificaError;

/// Serializes a request model into a JSON body.
pub(crate) fn to_body<T: Serialize>(value: &T) -> Result<Value, NotificaError> {
    serde_json::to_value(value)
        .map_err(|e| NotificaError::transport(format!("failed to serialize request body: {e}")))
}

/// Builds a resource path with a percent-encoded id segment.
pub(crate) fn item_path(collection: &str, id: &str) -> String {
    format!("{collection}/{}", urlencoding::encode(id))
}

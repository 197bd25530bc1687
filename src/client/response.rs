//! Response envelopes and error classification.
//!
//! Successful responses arrive as `{"data": T}` or `{"data": [T], "meta": ...}`
//! envelopes. Failed responses carry `{"error": {"code", "message", "details?"}}`
//! bodies, which are parsed defensively: a missing or malformed body degrades
//! to a generic message instead of crashing the caller.

use chrono::Utc;
use serde::Deserialize;

use crate::client::transport::RawResponse;
use crate::error::{ErrorDetails, NotificaError, RETRYABLE_SERVER_STATUSES};

/// Response header carrying the request correlation id.
pub const HEADER_REQUEST_ID: &str = "x-request-id";

/// Single-object response envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope<T> {
    /// The wrapped resource.
    pub data: T,
}

/// Cursor pagination metadata attached to every list response.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PageMeta {
    /// Opaque server-issued token for the next page, if any.
    ///
    /// Advisory only: a non-null cursor with `has_more == false` still means
    /// "no next page".
    pub cursor: Option<String>,
    /// Whether another page exists. This is the sole termination condition.
    pub has_more: bool,
}

/// List response envelope: one page of items plus pagination metadata.
#[derive(Debug, Clone, Deserialize)]
pub struct Page<T> {
    /// Items in server-returned order.
    pub data: Vec<T>,
    /// Pagination metadata.
    pub meta: PageMeta,
}

/// Wire shape of an error response body.
#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    code: Option<String>,
    message: Option<String>,
    #[serde(default)]
    details: Option<ErrorDetails>,
}

/// Classifies a non-2xx response into the error taxonomy.
pub(crate) fn classify_response(response: &RawResponse) -> NotificaError {
    let body = parse_error_body(&response.body);
    let request_id = response.header(HEADER_REQUEST_ID).map(str::to_string);
    let message = body
        .message
        .unwrap_or_else(|| format!("Request failed with status {}", response.status));
    let details = body.details.unwrap_or_default();

    match response.status {
        429 => NotificaError::RateLimit {
            message,
            retry_after: parse_retry_after(response.header("retry-after")),
            request_id,
        },
        422 => NotificaError::Validation {
            message,
            details,
            request_id,
        },
        status if RETRYABLE_SERVER_STATUSES.contains(&status) => NotificaError::Api {
            status,
            code: "server_error".to_string(),
            message,
            details,
            request_id,
        },
        status => NotificaError::Api {
            status,
            code: body.code.unwrap_or_else(|| "api_error".to_string()),
            message,
            details,
            request_id,
        },
    }
}

/// Parses the error envelope, degrading to an empty body on any failure.
fn parse_error_body(text: &str) -> ErrorBody {
    if text.is_empty() {
        return ErrorBody::default();
    }
    serde_json::from_str::<ErrorEnvelope>(text)
        .map(|envelope| envelope.error)
        .unwrap_or_default()
}

// Hints beyond a day are treated as malformed, like any other unparseable
// value; the engine falls back to computed backoff.
const RETRY_AFTER_MAX_SECS: f64 = 86_400.0;

/// Parses a `Retry-After` header value into seconds.
///
/// Accepts a non-negative number of seconds or an HTTP date, which is
/// converted to seconds-until and clamped at zero. Unparseable, non-finite,
/// or absurdly large values yield `None`, falling back to exponential
/// backoff.
fn parse_retry_after(value: Option<&str>) -> Option<f64> {
    let value = value?.trim();

    if let Ok(seconds) = value.parse::<f64>() {
        return bounded_hint(seconds);
    }

    let date = chrono::DateTime::parse_from_rfc2822(value).ok()?;
    let seconds = (date.with_timezone(&Utc) - Utc::now()).num_milliseconds() as f64 / 1000.0;
    bounded_hint(seconds.max(0.0))
}

fn bounded_hint(seconds: f64) -> Option<f64> {
    (seconds.is_finite() && (0.0..=RETRY_AFTER_MAX_SECS).contains(&seconds)).then_some(seconds)
}

//! HTTP transport and clock abstractions.
//!
//! The request engine never talks to the network or the timer directly; it
//! goes through [`HttpTransport`] and [`Sleeper`]. Production code uses the
//! [`ReqwestTransport`] and [`TokioSleeper`] implementations, tests substitute
//! their own without touching process-wide state.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

use crate::client::request::HttpMethod;

/// A fully built HTTP request ready to be sent.
///
/// The URL already carries the query string and the body is serialized JSON.
#[derive(Debug, Clone)]
pub struct RawRequest {
    /// HTTP method.
    pub method: HttpMethod,
    /// Absolute URL including any query string.
    pub url: String,
    /// Request headers in insertion order.
    pub headers: Vec<(String, String)>,
    /// Serialized JSON body, when the call has one.
    pub body: Option<String>,
}

/// An HTTP response as seen by the request engine.
#[derive(Debug, Clone)]
pub struct RawResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response headers with lowercased names.
    pub headers: HashMap<String, Vec<String>>,
    /// Raw response body text.
    pub body: String,
}

impl RawResponse {
    /// Returns the first value of the given header, matched case-insensitively.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_lowercase())
            .and_then(|values| values.first())
            .map(String::as_str)
    }
}

/// Error raised by a transport implementation.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct TransportError {
    /// Description of the failure.
    pub message: String,
}

impl TransportError {
    /// Creates a transport error with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// The seam between the request engine and the network.
///
/// Implementations send exactly one HTTP request and report the response or
/// a transport failure. Retry, timeout, and cancellation all live above this
/// trait in the engine.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Sends a single HTTP request.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError`] on connection or protocol failures.
    async fn send(&self, request: RawRequest) -> Result<RawResponse, TransportError>;
}

/// The seam between the request engine and the clock.
///
/// The engine sleeps through this trait between retry attempts, so tests can
/// observe requested delays without real time passing.
#[async_trait]
pub trait Sleeper: Send + Sync {
    /// Suspends the current task for the given duration.
    async fn sleep(&self, duration: Duration);
}

/// Production transport backed by a shared [`reqwest::Client`].
#[derive(Debug)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Creates a new transport with a rustls-backed client.
    ///
    /// # Panics
    ///
    /// Panics if the underlying reqwest client cannot be created. This should
    /// only happen in extremely unusual circumstances (e.g., TLS initialization failure).
    #[must_use]
    pub fn new() -> Self {
        let client = reqwest::Client::builder()
            .use_rustls_tls()
            .build()
            .expect("Failed to create HTTP client");
        Self { client }
    }
}

impl Default for ReqwestTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn send(&self, request: RawRequest) -> Result<RawResponse, TransportError> {
        let mut builder = match request.method {
            HttpMethod::Get => self.client.get(&request.url),
            HttpMethod::Post => self.client.post(&request.url),
            HttpMethod::Put => self.client.put(&request.url),
            HttpMethod::Patch => self.client.patch(&request.url),
            HttpMethod::Delete => self.client.delete(&request.url),
        };

        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| TransportError::new(e.to_string()))?;

        let status = response.status().as_u16();
        let headers = parse_headers(response.headers());
        let body = response.text().await.unwrap_or_default();

        Ok(RawResponse {
            status,
            headers,
            body,
        })
    }
}

/// Production sleeper backed by the tokio timer.
#[derive(Debug, Default)]
pub struct TokioSleeper;

#[async_trait]
impl Sleeper for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Collects response headers into a map with lowercased names.
fn parse_headers(headers: &reqwest::header::HeaderMap) -> HashMap<String, Vec<String>> {
    let mut result: HashMap<String, Vec<String>> = HashMap::new();
    for (name, value) in headers {
        let key = name.as_str().to_lowercase();
        let value = value.to_str().unwrap_or_default().to_string();
        result.entry(key).or_default().push(value);
    }
    result
}

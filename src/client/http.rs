//! The resilient request engine.
//!
//! Every resource method funnels through [`HttpClient`]: it builds the URL
//! and headers, attaches idempotency keys to POSTs, binds the call to a
//! timeout and an optional cancellation token, classifies failures, and
//! retries rate limits, server errors, timeouts, and transport faults with
//! exponential backoff until the budget is spent.

use std::sync::Arc;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio_util::sync::CancellationToken;

use crate::client::backoff;
use crate::client::paginate::Paginator;
use crate::client::request::{build_url, HttpMethod, QueryPairs, RequestOptions};
use crate::client::response::{classify_response, Envelope, Page};
use crate::client::transport::{
    HttpTransport, RawRequest, ReqwestTransport, Sleeper, TokioSleeper,
};
use crate::config::ClientConfig;
use crate::error::NotificaError;

/// Client library version from Cargo.toml.
pub const CLIENT_VERSION: &str = env!("CARGO_PKG_VERSION");

/// HTTP client for making requests to the Notifica API.
///
/// The client handles:
/// - URL and query construction from the configured base URL
/// - Default headers including `Authorization` and the client identifier
/// - Idempotency keys on POST requests
/// - Automatic retry with backoff for 429, 5xx, timeout, and transport faults
/// - Timeout and cancellation of in-flight calls
///
/// # Thread Safety
///
/// `HttpClient` is `Send + Sync`. It holds no mutable state across calls, so
/// concurrent requests are independent and run in parallel under the
/// caller's control.
pub struct HttpClient {
    config: ClientConfig,
    transport: Arc<dyn HttpTransport>,
    sleeper: Arc<dyn Sleeper>,
}

// Verify HttpClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<HttpClient>();
};

impl std::fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl HttpClient {
    /// Creates a client with the production transport and timer.
    #[must_use]
    pub fn new(config: ClientConfig) -> Self {
        Self::with_transport(
            config,
            Arc::new(ReqwestTransport::new()),
            Arc::new(TokioSleeper),
        )
    }

    /// Creates a client with an injected transport and sleeper.
    ///
    /// Tests use this to substitute the network and the clock without
    /// touching process-wide state.
    #[must_use]
    pub fn with_transport(
        config: ClientConfig,
        transport: Arc<dyn HttpTransport>,
        sleeper: Arc<dyn Sleeper>,
    ) -> Self {
        Self {
            config,
            transport,
            sleeper,
        }
    }

    /// Returns the client configuration.
    #[must_use]
    pub const fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Issues a request and returns the raw JSON body, if any.
    ///
    /// This is the single chokepoint behind every typed primitive. A `204`
    /// response (or an empty body) yields `None` without attempting JSON
    /// parsing; any other 2xx yields the body as-is. Envelope unwrapping is
    /// the resource layer's job.
    ///
    /// # Errors
    ///
    /// Returns the classified [`NotificaError`] of the final attempt.
    pub async fn request(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<&Value>,
        query: &QueryPairs,
        options: Option<&RequestOptions>,
    ) -> Result<Option<Value>, NotificaError> {
        let timeout = options
            .and_then(|o| o.timeout)
            .unwrap_or_else(|| self.config.timeout());
        let cancel = options.and_then(|o| o.cancel.clone());

        // One key per call, reused across that call's attempts so a retried
        // POST cannot double-apply server-side.
        let idempotency_key = if method == HttpMethod::Post {
            options
                .and_then(|o| o.idempotency_key.clone())
                .or_else(|| {
                    self.config
                        .auto_idempotency()
                        .then(|| uuid::Uuid::new_v4().to_string())
                })
        } else {
            None
        };

        let url = build_url(self.config.base_url().as_ref(), path, query);
        let headers = self.build_headers(idempotency_key.as_deref());
        let body_text = body.map(Value::to_string);

        let max_retries = self.config.max_retries();
        let mut last_error: Option<NotificaError> = None;

        for attempt in 0..=max_retries {
            if attempt > 0 {
                let delay = backoff::delay(attempt, last_error.as_ref());
                tracing::warn!(
                    attempt,
                    delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                    "retrying {method} {path}"
                );
                self.backoff_sleep(delay, cancel.as_ref()).await?;
            }

            let raw = RawRequest {
                method,
                url: url.clone(),
                headers: headers.clone(),
                body: body_text.clone(),
            };

            let result = match self.dispatch(raw, timeout, cancel.as_ref()).await {
                Ok(response) if (200..300).contains(&response.status) => {
                    if response.status == 204 || response.body.is_empty() {
                        return Ok(None);
                    }
                    serde_json::from_str(&response.body).map(Some).map_err(|e| {
                        NotificaError::transport(format!("invalid JSON in response body: {e}"))
                    })
                }
                Ok(response) => Err(classify_response(&response)),
                Err(error) => Err(error),
            };

            match result {
                Ok(value) => return Ok(value),
                Err(error) => {
                    if error.is_retryable() && attempt < max_retries {
                        tracing::debug!(
                            attempt,
                            status = error.status(),
                            "retryable failure for {method} {path}: {error}"
                        );
                        last_error = Some(error);
                    } else {
                        return Err(error);
                    }
                }
            }
        }

        // Unreachable in practice: the loop always returns on its final pass.
        Err(last_error
            .unwrap_or_else(|| NotificaError::transport("request failed without a recorded error")))
    }

    /// Sends a GET request and deserializes the body.
    ///
    /// # Errors
    ///
    /// Returns the classified [`NotificaError`] of the final attempt.
    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &QueryPairs,
        options: Option<&RequestOptions>,
    ) -> Result<T, NotificaError> {
        let value = self
            .request(HttpMethod::Get, path, None, query, options)
            .await?;
        decode(value)
    }

    /// Sends a POST request and deserializes the body.
    ///
    /// # Errors
    ///
    /// Returns the classified [`NotificaError`] of the final attempt.
    pub async fn post<T: DeserializeOwned>(
        &self,
        path: &str,
        body: Option<&Value>,
        options: Option<&RequestOptions>,
    ) -> Result<T, NotificaError> {
        let value = self
            .request(HttpMethod::Post, path, body, &Vec::new(), options)
            .await?;
        decode(value)
    }

    /// Sends a PUT request and deserializes the body.
    ///
    /// # Errors
    ///
    /// Returns the classified [`NotificaError`] of the final attempt.
    pub async fn put<T: DeserializeOwned>(
        &self,
        path: &str,
        body: Option<&Value>,
        options: Option<&RequestOptions>,
    ) -> Result<T, NotificaError> {
        let value = self
            .request(HttpMethod::Put, path, body, &Vec::new(), options)
            .await?;
        decode(value)
    }

    /// Sends a PATCH request and deserializes the body.
    ///
    /// # Errors
    ///
    /// Returns the classified [`NotificaError`] of the final attempt.
    pub async fn patch<T: DeserializeOwned>(
        &self,
        path: &str,
        body: Option<&Value>,
        options: Option<&RequestOptions>,
    ) -> Result<T, NotificaError> {
        let value = self
            .request(HttpMethod::Patch, path, body, &Vec::new(), options)
            .await?;
        decode(value)
    }

    /// Sends a DELETE request, discarding any response body.
    ///
    /// # Errors
    ///
    /// Returns the classified [`NotificaError`] of the final attempt.
    pub async fn delete(
        &self,
        path: &str,
        options: Option<&RequestOptions>,
    ) -> Result<(), NotificaError> {
        self.request(HttpMethod::Delete, path, None, &Vec::new(), options)
            .await?;
        Ok(())
    }

    /// Fetches a single resource, unwrapping the `{"data": T}` envelope.
    ///
    /// # Errors
    ///
    /// Returns the classified [`NotificaError`] of the final attempt.
    pub async fn get_one<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &QueryPairs,
        options: Option<&RequestOptions>,
    ) -> Result<T, NotificaError> {
        let envelope: Envelope<T> = self.get(path, query, options).await?;
        Ok(envelope.data)
    }

    /// Fetches one page of a listing, unwrapping `{"data": [T], "meta"}`.
    ///
    /// # Errors
    ///
    /// Returns the classified [`NotificaError`] of the final attempt.
    pub async fn list<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &QueryPairs,
        options: Option<&RequestOptions>,
    ) -> Result<Page<T>, NotificaError> {
        self.get(path, query, options).await
    }

    /// Creates a lazy paginator over every page of a listing.
    ///
    /// `query` holds the static filters; `cursor` is managed by the
    /// paginator and must not be present in it.
    #[must_use]
    pub fn paginate<T: DeserializeOwned>(&self, path: &str, query: QueryPairs) -> Paginator<'_, T> {
        Paginator::new(self, path, query)
    }

    /// Builds the fixed header set for one call.
    fn build_headers(&self, idempotency_key: Option<&str>) -> Vec<(String, String)> {
        let rust_version = env!("CARGO_PKG_RUST_VERSION");
        let mut headers = vec![
            (
                "Authorization".to_string(),
                format!("Bearer {}", self.config.api_key().as_ref()),
            ),
            ("Content-Type".to_string(), "application/json".to_string()),
            ("Accept".to_string(), "application/json".to_string()),
            (
                "User-Agent".to_string(),
                format!("Notifica API Library v{CLIENT_VERSION} | Rust {rust_version}"),
            ),
        ];
        if let Some(key) = idempotency_key {
            headers.push(("Idempotency-Key".to_string(), key.to_string()));
        }
        headers
    }

    /// Sleeps before a resend, aborting as soon as the token fires.
    ///
    /// A token cancelled during (or before) the backoff wait surfaces
    /// immediately instead of riding out the remaining schedule.
    async fn backoff_sleep(
        &self,
        delay: Duration,
        cancel: Option<&CancellationToken>,
    ) -> Result<(), NotificaError> {
        if let Some(token) = cancel {
            tokio::select! {
                biased;
                () = token.cancelled() => Err(NotificaError::transport("request cancelled")),
                () = self.sleeper.sleep(delay) => Ok(()),
            }
        } else {
            self.sleeper.sleep(delay).await;
            Ok(())
        }
    }

    /// Runs one attempt under the timeout and the cancellation token.
    ///
    /// Whichever fires first aborts the in-flight call; both the timer and
    /// the token listener are dropped on every exit path.
    async fn dispatch(
        &self,
        request: RawRequest,
        timeout: Duration,
        cancel: Option<&CancellationToken>,
    ) -> Result<crate::client::transport::RawResponse, NotificaError> {
        let send = self.transport.send(request);
        let timed = tokio::time::timeout(timeout, send);

        let result = if let Some(token) = cancel {
            // Biased so an already-cancelled token wins before the request
            // is ever polled.
            tokio::select! {
                biased;
                () = token.cancelled() => return Err(NotificaError::transport("request cancelled")),
                result = timed => result,
            }
        } else {
            timed.await
        };

        match result {
            Ok(Ok(response)) => Ok(response),
            Ok(Err(error)) => Err(NotificaError::transport(error.to_string())),
            Err(_elapsed) => Err(NotificaError::Timeout { timeout }),
        }
    }
}

/// Deserializes an optional body, treating "no value" as JSON null.
fn decode<T: DeserializeOwned>(value: Option<Value>) -> Result<T, NotificaError> {
    serde_json::from_value(value.unwrap_or(Value::Null))
        .map_err(|e| NotificaError::transport(format!("failed to decode response body: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::testing::{json_response, MockTransport, RecordingSleeper};
    use crate::config::ApiKey;
    use crate::client::transport::{RawResponse, TransportError};

    fn config(max_retries: u32) -> ClientConfig {
        ClientConfig::builder()
            .api_key(ApiKey::new("nk_test_key").unwrap())
            .base_url(crate::config::BaseUrl::new("https://api.test.local/v1").unwrap())
            .max_retries(max_retries)
            .build()
            .unwrap()
    }

    fn client(
        max_retries: u32,
        responses: Vec<Result<RawResponse, TransportError>>,
    ) -> (HttpClient, Arc<MockTransport>, Arc<RecordingSleeper>) {
        let transport = MockTransport::new(responses);
        let sleeper = Arc::new(RecordingSleeper::default());
        let client = HttpClient::with_transport(
            config(max_retries),
            Arc::clone(&transport) as Arc<dyn HttpTransport>,
            Arc::clone(&sleeper) as Arc<dyn Sleeper>,
        );
        (client, transport, sleeper)
    }

    #[tokio::test]
    async fn test_success_returns_body_on_first_attempt() {
        let (client, transport, _) =
            client(3, vec![Ok(json_response(200, r#"{"data":{"id":"n1"}}"#))]);

        let value = client
            .request(HttpMethod::Get, "/notifications/n1", None, &Vec::new(), None)
            .await
            .unwrap();

        assert_eq!(value.unwrap()["data"]["id"], "n1");
        assert_eq!(transport.requests().len(), 1);
    }

    #[tokio::test]
    async fn test_204_yields_no_value_without_json_parsing() {
        let (client, _, _) = client(3, vec![Ok(json_response(204, ""))]);

        let value = client
            .request(HttpMethod::Delete, "/templates/t1", None, &Vec::new(), None)
            .await
            .unwrap();

        assert!(value.is_none());
    }

    #[tokio::test]
    async fn test_retryable_status_performs_n_plus_one_attempts() {
        let responses = (0..3).map(|_| Ok(json_response(503, ""))).collect();
        let (client, transport, sleeper) = client(2, responses);

        let error = client
            .request(HttpMethod::Get, "/notifications", None, &Vec::new(), None)
            .await
            .unwrap_err();

        assert_eq!(error.status(), Some(503));
        assert_eq!(error.code(), Some("server_error"));
        assert_eq!(transport.requests().len(), 3, "maxRetries=2 means 3 attempts");
        assert_eq!(sleeper.delays().len(), 2, "one sleep before each resend");
    }

    #[tokio::test]
    async fn test_succeeds_mid_budget_after_transient_failure() {
        let (client, transport, _) = client(
            3,
            vec![
                Ok(json_response(500, "")),
                Ok(json_response(200, r#"{"data":[]}"#)),
            ],
        );

        let value = client
            .request(HttpMethod::Get, "/notifications", None, &Vec::new(), None)
            .await
            .unwrap();

        assert!(value.is_some());
        assert_eq!(transport.requests().len(), 2);
    }

    #[tokio::test]
    async fn test_422_is_never_retried() {
        let (client, transport, _) = client(
            3,
            vec![Ok(json_response(
                422,
                r#"{"error":{"code":"validation_failed","message":"bad","details":{"to":["required"]}}}"#,
            ))],
        );

        let error = client
            .request(HttpMethod::Post, "/notifications", None, &Vec::new(), None)
            .await
            .unwrap_err();

        assert!(matches!(error, NotificaError::Validation { .. }));
        assert_eq!(transport.requests().len(), 1);
    }

    #[tokio::test]
    async fn test_terminal_statuses_perform_single_attempt() {
        for status in [400, 401, 403, 404] {
            let (client, transport, _) = client(3, vec![Ok(json_response(status, ""))]);

            let error = client
                .request(HttpMethod::Get, "/workflows", None, &Vec::new(), None)
                .await
                .unwrap_err();

            assert_eq!(error.status(), Some(status));
            assert_eq!(transport.requests().len(), 1, "status {status}");
        }
    }

    #[tokio::test]
    async fn test_zero_max_retries_performs_exactly_one_attempt() {
        let (client, transport, _) = client(0, vec![Ok(json_response(500, ""))]);

        let error = client
            .request(HttpMethod::Get, "/notifications", None, &Vec::new(), None)
            .await
            .unwrap_err();

        assert_eq!(error.status(), Some(500));
        assert_eq!(transport.requests().len(), 1);
    }

    #[tokio::test]
    async fn test_transport_failures_are_retried() {
        let (client, transport, _) = client(
            1,
            vec![
                Err(TransportError::new("connection reset by peer")),
                Ok(json_response(200, r#"{"data":null}"#)),
            ],
        );

        let value = client
            .request(HttpMethod::Get, "/subscribers", None, &Vec::new(), None)
            .await
            .unwrap();

        assert!(value.is_some());
        assert_eq!(transport.requests().len(), 2);
    }

    #[tokio::test]
    async fn test_transport_failure_message_is_preserved() {
        let (client, _, _) = client(0, vec![Err(TransportError::new("dns lookup failed"))]);

        let error = client
            .request(HttpMethod::Get, "/subscribers", None, &Vec::new(), None)
            .await
            .unwrap_err();

        assert!(matches!(error, NotificaError::Transport { .. }));
        assert!(error.to_string().contains("dns lookup failed"));
    }

    #[tokio::test]
    async fn test_retry_after_hint_preferred_over_backoff() {
        let mut limited = json_response(429, "");
        limited
            .headers
            .insert("retry-after".to_string(), vec!["2".to_string()]);
        let (client, _, sleeper) = client(
            1,
            vec![Ok(limited), Ok(json_response(200, r#"{"data":null}"#))],
        );

        client
            .request(HttpMethod::Get, "/notifications", None, &Vec::new(), None)
            .await
            .unwrap();

        assert_eq!(sleeper.delays(), vec![Duration::from_secs(2)]);
    }

    #[tokio::test]
    async fn test_unrepresentable_retry_after_degrades_to_backoff() {
        // A malformed server hint must not crash the engine mid-retry
        let mut limited = json_response(429, "");
        limited
            .headers
            .insert("retry-after".to_string(), vec!["1e300".to_string()]);
        let (client, transport, sleeper) = client(
            1,
            vec![Ok(limited), Ok(json_response(200, r#"{"data":null}"#))],
        );

        client
            .request(HttpMethod::Get, "/notifications", None, &Vec::new(), None)
            .await
            .unwrap();

        assert_eq!(transport.requests().len(), 2);
        let delays = sleeper.delays();
        assert_eq!(delays.len(), 1);
        assert!(delays[0] >= Duration::from_millis(500), "hint ignored, backoff applies");
    }

    #[tokio::test]
    async fn test_retry_after_zero_skips_exponential_backoff() {
        let mut limited = json_response(429, "");
        limited
            .headers
            .insert("retry-after".to_string(), vec!["0".to_string()]);
        let (client, _, sleeper) = client(
            1,
            vec![Ok(limited), Ok(json_response(200, r#"{"data":null}"#))],
        );

        client
            .request(HttpMethod::Get, "/notifications", None, &Vec::new(), None)
            .await
            .unwrap();

        assert_eq!(sleeper.delays(), vec![Duration::ZERO]);
    }

    #[tokio::test]
    async fn test_post_attaches_auto_generated_idempotency_key() {
        let (client, transport, _) = client(
            0,
            vec![
                Ok(json_response(200, r#"{"data":null}"#)),
                Ok(json_response(200, r#"{"data":null}"#)),
            ],
        );

        for _ in 0..2 {
            client
                .request(HttpMethod::Post, "/notifications", None, &Vec::new(), None)
                .await
                .unwrap();
        }

        let requests = transport.requests();
        let keys: Vec<String> = requests
            .iter()
            .map(|r| {
                r.headers
                    .iter()
                    .find(|(name, _)| name == "Idempotency-Key")
                    .map(|(_, value)| value.clone())
                    .expect("POST must carry an idempotency key")
            })
            .collect();
        assert_ne!(keys[0], keys[1], "each call gets a distinct key");
    }

    #[tokio::test]
    async fn test_idempotency_key_is_stable_across_attempts_of_one_call() {
        let (client, transport, _) = client(
            2,
            vec![
                Ok(json_response(500, "")),
                Ok(json_response(200, r#"{"data":null}"#)),
            ],
        );

        client
            .request(HttpMethod::Post, "/notifications", None, &Vec::new(), None)
            .await
            .unwrap();

        let requests = transport.requests();
        assert_eq!(requests.len(), 2);
        let key = |r: &RawRequest| {
            r.headers
                .iter()
                .find(|(name, _)| name == "Idempotency-Key")
                .map(|(_, value)| value.clone())
        };
        assert_eq!(key(&requests[0]), key(&requests[1]));
        assert!(key(&requests[0]).is_some());
    }

    #[tokio::test]
    async fn test_caller_supplied_idempotency_key_wins() {
        let (client, transport, _) = client(0, vec![Ok(json_response(200, r#"{"data":null}"#))]);
        let options = RequestOptions::new().idempotency_key("my-key-1");

        client
            .request(
                HttpMethod::Post,
                "/notifications",
                None,
                &Vec::new(),
                Some(&options),
            )
            .await
            .unwrap();

        let requests = transport.requests();
        assert!(requests[0]
            .headers
            .iter()
            .any(|(name, value)| name == "Idempotency-Key" && value == "my-key-1"));
    }

    #[tokio::test]
    async fn test_non_post_methods_never_carry_idempotency_key() {
        for method in [
            HttpMethod::Get,
            HttpMethod::Put,
            HttpMethod::Patch,
            HttpMethod::Delete,
        ] {
            let (client, transport, _) =
                client(0, vec![Ok(json_response(200, r#"{"data":null}"#))]);

            client
                .request(method, "/templates/t1", None, &Vec::new(), None)
                .await
                .unwrap();

            assert!(
                !transport.requests()[0]
                    .headers
                    .iter()
                    .any(|(name, _)| name == "Idempotency-Key"),
                "{method} must not carry the header"
            );
        }
    }

    #[tokio::test]
    async fn test_disabled_auto_idempotency_omits_header_on_post() {
        let transport = MockTransport::new(vec![Ok(json_response(200, r#"{"data":null}"#))]);
        let config = ClientConfig::builder()
            .api_key(ApiKey::new("key").unwrap())
            .auto_idempotency(false)
            .max_retries(0)
            .build()
            .unwrap();
        let client = HttpClient::with_transport(
            config,
            Arc::clone(&transport) as Arc<dyn HttpTransport>,
            Arc::new(RecordingSleeper::default()),
        );

        client
            .request(HttpMethod::Post, "/notifications", None, &Vec::new(), None)
            .await
            .unwrap();

        assert!(!transport.requests()[0]
            .headers
            .iter()
            .any(|(name, _)| name == "Idempotency-Key"));
    }

    #[tokio::test]
    async fn test_default_headers_include_auth_and_client_identifier() {
        let (client, transport, _) = client(0, vec![Ok(json_response(200, r#"{"data":null}"#))]);

        client
            .request(HttpMethod::Get, "/notifications", None, &Vec::new(), None)
            .await
            .unwrap();

        let headers = &transport.requests()[0].headers;
        let get = |name: &str| {
            headers
                .iter()
                .find(|(n, _)| n == name)
                .map(|(_, v)| v.clone())
        };
        assert_eq!(get("Authorization"), Some("Bearer nk_test_key".to_string()));
        assert_eq!(get("Accept"), Some("application/json".to_string()));
        assert_eq!(get("Content-Type"), Some("application/json".to_string()));
        let user_agent = get("User-Agent").unwrap();
        assert!(user_agent.contains("Notifica API Library"));
        assert!(user_agent.contains("Rust"));
    }

    #[tokio::test]
    async fn test_query_pairs_appended_in_order_with_none_omitted() {
        let (client, transport, _) = client(0, vec![Ok(json_response(200, r#"{"data":null}"#))]);
        let query = vec![
            ("limit".to_string(), Some("50".to_string())),
            ("status".to_string(), None),
            ("cursor".to_string(), Some("p 2".to_string())),
        ];

        client
            .request(HttpMethod::Get, "/notifications", None, &query, None)
            .await
            .unwrap();

        assert_eq!(
            transport.requests()[0].url,
            "https://api.test.local/v1/notifications?limit=50&cursor=p%202"
        );
    }

    #[tokio::test]
    async fn test_body_serialized_only_when_present() {
        let (client, transport, _) = client(
            0,
            vec![
                Ok(json_response(200, r#"{"data":null}"#)),
                Ok(json_response(200, r#"{"data":null}"#)),
            ],
        );

        let body = serde_json::json!({"template_id": "t1"});
        client
            .request(
                HttpMethod::Post,
                "/notifications",
                Some(&body),
                &Vec::new(),
                None,
            )
            .await
            .unwrap();
        client
            .request(HttpMethod::Get, "/notifications", None, &Vec::new(), None)
            .await
            .unwrap();

        let requests = transport.requests();
        assert_eq!(
            requests[0].body.as_deref(),
            Some(r#"{"template_id":"t1"}"#)
        );
        assert!(requests[1].body.is_none(), "absent body is omitted, not null");
    }

    #[tokio::test]
    async fn test_cancelled_token_aborts_without_reaching_transport() {
        let (client, transport, _) = client(1, vec![]);
        let token = CancellationToken::new();
        token.cancel();
        let options = RequestOptions::new().cancel_token(token);

        let error = client
            .request(
                HttpMethod::Get,
                "/notifications",
                None,
                &Vec::new(),
                Some(&options),
            )
            .await
            .unwrap_err();

        assert!(matches!(error, NotificaError::Transport { .. }));
        assert!(error.to_string().contains("cancelled"));
        assert!(transport.requests().is_empty());
    }

    #[tokio::test]
    async fn test_token_cancelled_mid_budget_skips_backoff_and_resend() {
        use async_trait::async_trait;

        // Cancels the token as soon as the first response is delivered,
        // simulating a caller giving up while retries remain.
        struct CancelAfterResponse {
            inner: Arc<MockTransport>,
            token: CancellationToken,
        }

        #[async_trait]
        impl HttpTransport for CancelAfterResponse {
            async fn send(&self, request: RawRequest) -> Result<RawResponse, TransportError> {
                let result = self.inner.send(request).await;
                self.token.cancel();
                result
            }
        }

        let inner = MockTransport::new(vec![Ok(json_response(503, ""))]);
        let token = CancellationToken::new();
        let sleeper = Arc::new(RecordingSleeper::default());
        let client = HttpClient::with_transport(
            config(3),
            Arc::new(CancelAfterResponse {
                inner: Arc::clone(&inner),
                token: token.clone(),
            }),
            Arc::clone(&sleeper) as Arc<dyn Sleeper>,
        );
        let options = RequestOptions::new().cancel_token(token);

        let error = client
            .request(
                HttpMethod::Get,
                "/notifications",
                None,
                &Vec::new(),
                Some(&options),
            )
            .await
            .unwrap_err();

        assert!(error.to_string().contains("cancelled"));
        assert_eq!(inner.requests().len(), 1, "no resend after cancellation");
        assert!(sleeper.delays().is_empty(), "no backoff wait after cancellation");
    }

    #[tokio::test]
    async fn test_get_one_unwraps_data_envelope() {
        #[derive(serde::Deserialize)]
        struct Item {
            id: String,
        }

        let (client, _, _) = client(0, vec![Ok(json_response(200, r#"{"data":{"id":"n9"}}"#))]);

        let item: Item = client
            .get_one("/notifications/n9", &Vec::new(), None)
            .await
            .unwrap();
        assert_eq!(item.id, "n9");
    }

    #[tokio::test]
    async fn test_list_unwraps_page_envelope() {
        let (client, _, _) = client(
            0,
            vec![Ok(json_response(
                200,
                r#"{"data":["a","b"],"meta":{"cursor":null,"has_more":false}}"#,
            ))],
        );

        let page: Page<String> = client.list("/notifications", &Vec::new(), None).await.unwrap();
        assert_eq!(page.data, vec!["a", "b"]);
        assert!(!page.meta.has_more);
    }
}

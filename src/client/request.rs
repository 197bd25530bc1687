//! Request building blocks: methods, per-call options, and URL construction.

use std::fmt;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

/// HTTP methods supported by the request engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    /// HTTP GET.
    Get,
    /// HTTP POST.
    Post,
    /// HTTP PUT.
    Put,
    /// HTTP PATCH.
    Patch,
    /// HTTP DELETE.
    Delete,
}

impl HttpMethod {
    /// Returns the method as an uppercase wire string.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Query parameters in caller order.
///
/// Pairs with a `None` value are omitted from the URL entirely rather than
/// serialized as an empty string.
pub type QueryPairs = Vec<(String, Option<String>)>;

/// Per-call overrides for a single request.
///
/// Options do not outlive the call they are passed to.
///
/// # Example
///
/// ```rust
/// use std::time::Duration;
/// use notifica::RequestOptions;
///
/// let options = RequestOptions::new()
///     .idempotency_key("order-42-send")
///     .timeout(Duration::from_secs(5));
/// ```
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    /// Caller-supplied idempotency key, overriding any auto-generated one.
    pub idempotency_key: Option<String>,
    /// Per-call timeout, overriding the configured default.
    pub timeout: Option<Duration>,
    /// Cancellation signal; cancelling aborts the in-flight call.
    pub cancel: Option<CancellationToken>,
}

impl RequestOptions {
    /// Creates empty options (all defaults apply).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the idempotency key for this call.
    #[must_use]
    pub fn idempotency_key(mut self, key: impl Into<String>) -> Self {
        self.idempotency_key = Some(key.into());
        self
    }

    /// Sets a per-call timeout.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Attaches a cancellation token to this call.
    #[must_use]
    pub fn cancel_token(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }
}

/// Builds the full request URL from base, path, and query pairs.
///
/// Query parameters are appended in caller order with percent-encoded keys
/// and values; pairs whose value is `None` are skipped.
pub(crate) fn build_url(base: &str, path: &str, query: &[(String, Option<String>)]) -> String {
    let mut url = String::with_capacity(base.len() + path.len() + 16);
    url.push_str(base);
    if !path.starts_with('/') {
        url.push('/');
    }
    url.push_str(path);

    let mut separator = '?';
    for (key, value) in query {
        if let Some(value) = value {
            url.push(separator);
            separator = '&';
            url.push_str(&urlencoding::encode(key));
            url.push('=');
            url.push_str(&urlencoding::encode(value));
        }
    }
    url
}

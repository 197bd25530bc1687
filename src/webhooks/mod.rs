//! Webhook signature verification for the Notifica client.
//!
//! Notifica signs every webhook delivery with HMAC-SHA256 keyed by the
//! signing secret issued when the webhook was created. Handlers should
//! verify the `X-Notifica-Signature` header against the raw request body
//! before trusting the payload.
//!
//! # Example
//!
//! ```rust
//! use notifica::webhooks::{compute_signature, verify, HEADER_SIGNATURE};
//!
//! let raw_body = b"{\"event\":\"notification.sent\"}";
//! let secret = "whsec_abc123";
//!
//! // The header value the server would send
//! let signature = compute_signature(raw_body, secret);
//!
//! assert_eq!(HEADER_SIGNATURE, "X-Notifica-Signature");
//! assert!(verify(raw_body, &signature, secret));
//! ```

mod verification;

pub use verification::{
    compute_signature, constant_time_compare, verify, verify_or_throw, INVALID_SIGNATURE_MESSAGE,
};

/// HTTP header name for the hex-encoded HMAC-SHA256 signature.
pub const HEADER_SIGNATURE: &str = "X-Notifica-Signature";

//! Webhook signature computation and verification.
//!
//! Notifica signs webhook deliveries with HMAC-SHA256 keyed by the
//! per-webhook signing secret issued at webhook creation, rendering the
//! digest as lowercase hex in the `X-Notifica-Signature` header.
//!
//! # Security
//!
//! All signature comparisons use constant-time comparison to prevent timing
//! attacks: every byte position is visited regardless of where the first
//! mismatch occurs. [`verify`] never panics or errors; any internal failure
//! or empty input yields `false`.

use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;

use crate::error::NotificaError;

type HmacSha256 = Hmac<Sha256>;

/// Message carried by the error raised from [`verify_or_throw`].
pub const INVALID_SIGNATURE_MESSAGE: &str = "Invalid webhook signature";

/// Computes an HMAC-SHA256 signature for raw payload bytes.
///
/// The signature is returned as a lowercase hexadecimal string, matching the
/// format Notifica sends in the `X-Notifica-Signature` header.
///
/// # Note
///
/// HMAC-SHA256 accepts keys of any length, so this function will never panic.
///
/// # Example
///
/// ```rust
/// use notifica::webhooks::compute_signature;
///
/// let sig = compute_signature(b"payload", "secret-key");
/// assert_eq!(sig.len(), 64); // SHA256 produces 32 bytes = 64 hex chars
/// ```
#[must_use]
#[allow(clippy::missing_panics_doc)] // HMAC accepts any key size, so this never panics
pub fn compute_signature(payload: &[u8], secret: &str) -> String {
    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC can take key of any size");
    mac.update(payload);
    let result = mac.finalize();
    hex::encode(result.into_bytes())
}

/// Performs constant-time comparison of two strings.
///
/// Unequal lengths return `false` immediately (length is not secret in this
/// design); equal-length inputs are compared by accumulating a mismatch flag
/// across every position, never early-returning on the first difference.
#[must_use]
pub fn constant_time_compare(a: &str, b: &str) -> bool {
    a.as_bytes().ct_eq(b.as_bytes()).into()
}

/// Verifies the signature of a webhook payload.
///
/// Returns `true` only when `signature` is the lowercase-hex HMAC-SHA256 of
/// `payload` keyed by `secret`. An empty payload, signature, or secret
/// short-circuits to `false` without computing a digest. This function never
/// panics or errors.
///
/// # Example
///
/// ```rust
/// use notifica::webhooks::{compute_signature, verify};
///
/// let payload = b"{\"event\":\"notification.sent\"}";
/// let secret = "whsec_abc123";
/// let signature = compute_signature(payload, secret);
///
/// assert!(verify(payload, &signature, secret));
/// assert!(!verify(payload, "deadbeef", secret));
/// assert!(!verify(b"", &signature, secret));
/// ```
#[must_use]
pub fn verify(payload: &[u8], signature: &str, secret: &str) -> bool {
    if payload.is_empty() || signature.is_empty() || secret.is_empty() {
        return false;
    }
    let Ok(mut mac) = HmacSha256::new_from_slice(secret.as_bytes()) else {
        return false;
    };
    mac.update(payload);
    let computed = hex::encode(mac.finalize().into_bytes());
    constant_time_compare(&computed, signature)
}

/// Verifies a webhook signature, raising on failure.
///
/// Performs the same check as [`verify`] and returns nothing on success.
///
/// # Errors
///
/// Returns a [`NotificaError::Transport`] with a fixed invalid-signature
/// message when verification fails.
pub fn verify_or_throw(
    payload: &[u8],
    signature: &str,
    secret: &str,
) -> Result<(), NotificaError> {
    if verify(payload, signature, secret) {
        Ok(())
    } else {
        tracing::debug!("webhook signature verification failed");
        Err(NotificaError::transport(INVALID_SIGNATURE_MESSAGE))
    }
}

// Internal hex encoding since we don't want to add another dependency
mod hex {
    const HEX_CHARS: &[u8; 16] = b"0123456789abcdef";

    pub fn encode(bytes: impl AsRef<[u8]>) -> String {
        let bytes = bytes.as_ref();
        let mut result = String::with_capacity(bytes.len() * 2);
        for &byte in bytes {
            result.push(HEX_CHARS[(byte >> 4) as usize] as char);
            result.push(HEX_CHARS[(byte & 0x0f) as usize] as char);
        }
        result
    }
}

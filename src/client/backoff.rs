//! Retry delay policy.
//!
//! Pure function of the attempt number and the last recorded error. A server
//! retry hint on a rate-limit error always wins over computed backoff.

use std::time::Duration;

use rand::Rng;

use crate::error::NotificaError;

/// Base delay for the first retry.
pub const BASE_DELAY_MS: u64 = 500;

// Caps the exponent so the shift cannot overflow; at 16 doublings the delay
// is already over 9 hours.
const MAX_EXPONENT: u32 = 16;

/// Computes the delay before retry `attempt` (1-based).
///
/// If `last_error` is a rate-limit error carrying a server hint, the delay is
/// the hint verbatim (a hint of `0` is a valid immediate retry). Otherwise
/// the delay is `500ms * 2^(attempt-1)` plus uniform jitter in `[0, base/2)`.
#[must_use]
pub fn delay(attempt: u32, last_error: Option<&NotificaError>) -> Duration {
    debug_assert!(attempt >= 1, "delay is only computed before a resend");

    // A hint Duration cannot represent falls through to computed backoff
    if let Some(hint) = last_error.and_then(NotificaError::retry_after) {
        if let Ok(delay) = Duration::try_from_secs_f64(hint.max(0.0)) {
            return delay;
        }
    }

    let base = BASE_DELAY_MS << (attempt.saturating_sub(1)).min(MAX_EXPONENT);
    let jitter = rand::thread_rng().gen_range(0..base / 2);
    Duration::from_millis(base + jitter)
}

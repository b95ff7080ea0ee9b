//! Shared-secret verification for the events webhook.
//!
//! Callers authenticate with a static shared secret, supplied either in
//! the custom `Events-Webhook-Secret` header or as an
//! `Authorization: Bearer <token>` fallback. The custom header takes
//! precedence whenever it is present and non-empty.

use axum::http::{header, HeaderMap};
use tracing::warn;

/// Custom header carrying the webhook secret.
pub const SECRET_HEADER: &str = "events-webhook-secret";

/// Extract the credential supplied by the caller, if any.
///
/// The `Events-Webhook-Secret` header wins when non-empty after trimming;
/// otherwise a trimmed `Bearer` token is used. A wrong custom header is
/// not rescued by a valid Bearer token.
pub fn provided_secret(headers: &HeaderMap) -> Option<String> {
    let custom = headers
        .get(SECRET_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|s| !s.is_empty());

    if let Some(secret) = custom {
        return Some(secret.to_string());
    }

    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Verify a caller-supplied secret against the configured one.
///
/// An empty configured secret rejects every request.
pub fn verify_secret(expected: &str, provided: Option<&str>) -> bool {
    let expected = expected.trim();
    if expected.is_empty() {
        warn!("webhook_secret_not_configured");
        return false;
    }

    match provided {
        Some(p) if !p.is_empty() => constant_time_compare(expected, p),
        _ => false,
    }
}

/// Constant-time string comparison to prevent timing attacks.
fn constant_time_compare(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }

    let mut result = 0u8;
    for (x, y) in a.bytes().zip(b.bytes()) {
        result |= x ^ y;
    }
    result == 0
}

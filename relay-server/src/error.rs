//! Error types for the relay pipeline.

use thiserror::Error;

/// Errors raised while relaying a webhook payload to the upstream form
/// endpoint.
///
/// Every variant is surfaced to the caller as a `500` JSON response; the
/// handler does not distinguish between them beyond the message text.
#[derive(Debug, Error)]
pub enum RelayError {
    /// The inbound payload was not a valid JSON object.
    #[error("invalid JSON body: {0}")]
    MalformedBody(#[from] serde_json::Error),

    /// The upstream form endpoint answered with a non-success status.
    ///
    /// `detail` carries the upstream response body when one was obtainable,
    /// or the status' canonical reason phrase otherwise.
    #[error("form endpoint error {status}: {detail}")]
    Upstream { status: u16, detail: String },

    /// The outbound request never completed (connect failure, timeout,
    /// unparsable action URL).
    #[error("form endpoint unreachable: {0}")]
    Transport(#[from] reqwest::Error),
}

//! Outbound submission to the upstream form endpoint.

use std::time::Duration;

use reqwest::Client;
use tracing::{error, info};

use crate::error::RelayError;

/// Submit a translated payload to the upstream form endpoint.
///
/// The payload is sent as a single `application/x-www-form-urlencoded`
/// POST. Any non-success upstream status is an error carrying the status
/// code and the response body text when one is obtainable. No retries.
pub async fn submit_form(
    client: &Client,
    action_url: &str,
    form: &[(String, String)],
    timeout: Duration,
) -> Result<(), RelayError> {
    info!(
        url = action_url,
        field_count = form.len(),
        timeout_seconds = timeout.as_secs_f64(),
        "form_submit_starting"
    );

    let resp = client
        .post(action_url)
        .timeout(timeout)
        .form(&form)
        .send()
        .await?;

    let status = resp.status();
    if !status.is_success() {
        let detail = resp.text().await.unwrap_or_default();
        let detail = detail.trim();
        error!(status_code = status.as_u16(), "form_submit_rejected");
        return Err(RelayError::Upstream {
            status: status.as_u16(),
            detail: if detail.is_empty() {
                status.canonical_reason().unwrap_or("no response body").to_string()
            } else {
                detail.to_string()
            },
        });
    }

    info!(status_code = status.as_u16(), "form_submit_complete");
    Ok(())
}

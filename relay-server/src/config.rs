//! Configuration module for environment variable parsing.
//!
//! All configuration is read once at process start and injected into the
//! handlers through [`crate::AppState`]; nothing re-reads the environment
//! per request.

use std::env;
use std::time::Duration;

use tracing::warn;

use crate::mapping::FieldMap;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Shared secret expected from webhook callers.
    ///
    /// When empty, every POST is rejected with 401.
    pub webhook_secret: String,

    /// Field map translating logical body keys to upstream form field
    /// identifiers, parsed from `FORM_ENTRY_MAP_JSON`.
    pub field_map: FieldMap,

    /// Upstream form submission URL.
    pub form_action_url: String,

    /// Port for the web server to listen on.
    pub port: u16,

    /// Upstream request timeout in milliseconds.
    pub request_timeout_ms: u64,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let form_action_url = env::var("FORM_ACTION_URL").unwrap_or_default();
        if form_action_url.is_empty() {
            warn!("form_action_url_not_configured");
        } else if let Err(e) = url::Url::parse(&form_action_url) {
            warn!(url = %form_action_url, error = %e, "form_action_url_invalid");
        }

        Config {
            webhook_secret: env::var("EVENTS_WEBHOOK_SECRET")
                .map(|v| v.trim().to_string())
                .unwrap_or_default(),

            field_map: FieldMap::from_json(
                &env::var("FORM_ENTRY_MAP_JSON").unwrap_or_default(),
            ),

            form_action_url,

            port: env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(8080),

            request_timeout_ms: env::var("REQUEST_TIMEOUT_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(8000),
        }
    }

    /// Upstream request timeout as a [`Duration`].
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}

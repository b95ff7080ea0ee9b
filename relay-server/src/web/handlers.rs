//! Webhook endpoint handlers.
//!
//! These handlers are designed to be thin - a POST only:
//! 1. Verifies the shared secret
//! 2. Translates the JSON body through the field map
//! 3. Relays the payload to the upstream form endpoint
//!
//! Each invocation builds its payload from invocation-local state only;
//! nothing mutable is shared between requests.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    http::{header, HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{error, info, warn};

use crate::error::RelayError;
use crate::relay::submit_form;
use crate::web::auth::{provided_secret, verify_secret};
use crate::Config;

/// Methods advertised in the CORS preflight response.
pub const ALLOWED_METHODS: &str = "POST, GET, OPTIONS";

/// Headers advertised in the CORS preflight response.
pub const ALLOWED_HEADERS: &str = "Content-Type, Authorization, Events-Webhook-Secret";

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub client: reqwest::Client,
}

impl AppState {
    pub fn new(config: Config, client: reqwest::Client) -> Self {
        Self {
            config: Arc::new(config),
            client,
        }
    }
}

// =============================================================================
// Response Types
// =============================================================================

/// Health check response.
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

/// Successful relay response.
#[derive(Serialize)]
pub struct RelayResponse {
    pub ok: bool,
}

/// Error response shared by every failure path.
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// The caller's `Origin` header, or `*` when absent.
fn request_origin(headers: &HeaderMap) -> HeaderValue {
    headers
        .get(header::ORIGIN)
        .cloned()
        .unwrap_or_else(|| HeaderValue::from_static("*"))
}

/// Attach the CORS origin header to a response.
///
/// Every response path goes through here, error branches included.
fn with_cors<R: IntoResponse>(origin: HeaderValue, response: R) -> Response {
    let mut response = response.into_response();
    response
        .headers_mut()
        .insert(header::ACCESS_CONTROL_ALLOW_ORIGIN, origin);
    response
}

// =============================================================================
// Preflight / Health / Method Fallback
// =============================================================================

/// CORS preflight endpoint.
pub async fn preflight(headers: HeaderMap) -> Response {
    with_cors(
        request_origin(&headers),
        (
            StatusCode::OK,
            [
                (
                    header::ACCESS_CONTROL_ALLOW_METHODS,
                    HeaderValue::from_static(ALLOWED_METHODS),
                ),
                (
                    header::ACCESS_CONTROL_ALLOW_HEADERS,
                    HeaderValue::from_static(ALLOWED_HEADERS),
                ),
            ],
        ),
    )
}

/// Health check endpoint.
pub async fn health(headers: HeaderMap) -> Response {
    with_cors(
        request_origin(&headers),
        Json(HealthResponse { status: "ok" }),
    )
}

/// Fallback for unsupported HTTP methods on the endpoint.
pub async fn method_not_allowed(headers: HeaderMap) -> Response {
    with_cors(
        request_origin(&headers),
        (
            StatusCode::METHOD_NOT_ALLOWED,
            Json(ErrorResponse {
                error: "Method not allowed".to_string(),
            }),
        ),
    )
}

// =============================================================================
// Router
// =============================================================================

/// Build the events endpoint router.
///
/// HEAD gets an explicit route to the 405 fallback: axum's `get` also
/// answers HEAD requests, and only GET, POST, and OPTIONS are supported
/// on the endpoint.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route(
            "/api/events",
            post(relay_webhook)
                .get(health)
                .head(method_not_allowed)
                .options(preflight)
                .fallback(method_not_allowed),
        )
        .with_state(state)
}

// =============================================================================
// Events Webhook
// =============================================================================

/// Events webhook endpoint.
///
/// This endpoint:
/// 1. Verifies the shared secret (custom header first, Bearer fallback)
/// 2. Parses the JSON body (empty body reads as `{}`)
/// 3. Translates it through the field map and relays it upstream
///
/// All post-auth failures collapse into a single `500` JSON shape.
pub async fn relay_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let origin = request_origin(&headers);

    info!(
        body_length = body.len(),
        has_origin = headers.contains_key(header::ORIGIN),
        "relay_received"
    );

    let provided = provided_secret(&headers);
    if !verify_secret(&state.config.webhook_secret, provided.as_deref()) {
        warn!("relay_auth_rejected");
        return with_cors(
            origin,
            (
                StatusCode::UNAUTHORIZED,
                Json(ErrorResponse {
                    error: "Invalid secret".to_string(),
                }),
            ),
        );
    }

    match relay(&state, &body).await {
        Ok(()) => {
            info!("relay_complete");
            with_cors(origin, Json(RelayResponse { ok: true }))
        }
        Err(e) => {
            error!(error = %e, "relay_failed");
            with_cors(
                origin,
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorResponse {
                        error: e.to_string(),
                    }),
                ),
            )
        }
    }
}

/// Parse, translate, and submit one webhook payload.
async fn relay(state: &AppState, body: &[u8]) -> Result<(), RelayError> {
    let raw: &[u8] = if body.is_empty() { b"{}" } else { body };
    let parsed: Map<String, Value> = serde_json::from_slice(raw)?;

    let form = state.config.field_map.translate(&parsed);
    info!(field_count = form.len(), "relay_translated");

    submit_form(
        &state.client,
        &state.config.form_action_url,
        &form,
        state.config.request_timeout(),
    )
    .await
}

//! Web module for the events webhook endpoint.
//!
//! This module provides a thin web server that:
//! - Answers CORS preflight and health-check requests
//! - Verifies the shared webhook secret
//! - Translates JSON bodies through the configured field map
//! - Relays the result to the upstream form endpoint
//!
//! Every response path, error paths included, carries an
//! `Access-Control-Allow-Origin` header echoing the caller's origin.

pub mod auth;
pub mod handlers;

pub use auth::{provided_secret, verify_secret};
pub use handlers::{
    health, method_not_allowed, preflight, relay_webhook, router, AppState,
    ErrorResponse, HealthResponse, RelayResponse,
};

//! FormRelay - webhook-to-form relay service.
//!
//! This library provides the shared modules for the `formrelay-web` binary:
//! a thin HTTP endpoint that authenticates event webhooks with a shared
//! secret, translates their JSON bodies through a configurable field map,
//! and relays the result to an upstream form endpoint as a URL-encoded POST.
//!
//! ## Architecture
//!
//! ```text
//! Webhook → Web Server → FieldMap::translate → Upstream Form Endpoint
//! ```

pub mod config;
pub mod error;
pub mod mapping;
pub mod relay;
pub mod web;

// Re-export commonly used types
pub use config::Config;
pub use error::RelayError;
pub use mapping::FieldMap;
pub use web::AppState;

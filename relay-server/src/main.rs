//! FormRelay Web Server - webhook-to-form relay endpoint.
//!
//! This binary provides a thin web server that:
//! - Receives event webhooks on a single endpoint
//! - Verifies the shared secret
//! - Translates JSON bodies through the configured field map
//! - Relays them to the upstream form endpoint as URL-encoded POSTs

use std::net::SocketAddr;

use anyhow::{Context, Result};
use tokio::{net::TcpListener, signal};
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use formrelay::web::{router, AppState};
use formrelay::Config;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize structured JSON logging
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().json().flatten_event(true))
        .init();

    info!("web_server_starting");

    // Load configuration once; handlers only see the injected state.
    let config = Config::from_env();
    info!(
        port = config.port,
        secret_configured = !config.webhook_secret.is_empty(),
        field_map_entries = config.field_map.len(),
        form_action_url = %config.form_action_url,
        "config_loaded"
    );

    // One shared HTTP client for upstream submissions
    let client = reqwest::Client::builder()
        .build()
        .context("Failed to build HTTP client")?;

    let state = AppState::new(config.clone(), client);

    // Build the router: one endpoint, method-dispatched
    let app = router(state).layer(TraceLayer::new_for_http());

    // Bind to address
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;

    info!(address = %addr, "web_server_listening");

    // Run server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("web_server_shutdown_complete");

    Ok(())
}

/// Create a future that completes when a shutdown signal is received.
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received SIGINT"),
        _ = terminate => info!("Received SIGTERM"),
    }

    info!("web_server_shutting_down");
}

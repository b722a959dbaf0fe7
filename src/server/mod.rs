//! # HTTP Print Service
//!
//! Lets a point-of-sale front end preview and print sale tickets over HTTP.
//!
//! ## Usage
//!
//! ```bash
//! ticketera serve --listen 0.0.0.0:8080 --device /dev/rfcomm0
//! ```
//!
//! ## Endpoints
//!
//! | Method | Path | Body | Response |
//! |--------|------|------|----------|
//! | POST | `/api/ticket/preview` | sale record | `{text, bytes, hex}` |
//! | POST | `/api/ticket/print` | sale record | `{success, bytes, chunks}` |
//! | GET | `/api/printer/status` | | `{state, device}` |
//! | POST | `/api/printer/connect` | | `{state, device}` |
//! | POST | `/api/printer/disconnect` | | `{state, device}` |
//!
//! Failures answer `{"success": false, "error": "..."}`.

mod handlers;
mod state;

pub use state::{AppState, ServerConfig};

use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::error::TicketeraError;

/// Build the application router.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        // Ticket API
        .route("/api/ticket/preview", post(handlers::ticket::preview))
        .route("/api/ticket/print", post(handlers::ticket::print))
        // Printer API
        .route("/api/printer/status", get(handlers::printer::status))
        .route("/api/printer/connect", post(handlers::printer::connect))
        .route("/api/printer/disconnect", post(handlers::printer::disconnect))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the HTTP server.
///
/// ## Example
///
/// ```no_run
/// use ticketera::server::{serve, ServerConfig};
/// use ticketera::settings::Settings;
///
/// # async fn example() -> Result<(), ticketera::error::TicketeraError> {
/// let config = ServerConfig {
///     listen_addr: "0.0.0.0:8080".to_string(),
///     settings: Settings::default(),
/// };
///
/// serve(config).await?;
/// # Ok(())
/// # }
/// ```
pub async fn serve(config: ServerConfig) -> Result<(), TicketeraError> {
    let app_state = Arc::new(AppState::from_settings(&config.settings)?);
    let app = router(app_state);

    println!("Ticketera print server starting...");
    println!("Listening on: {}", config.listen_addr);
    println!("Printer device: {}", config.settings.device);
    println!();

    let listener = tokio::net::TcpListener::bind(&config.listen_addr)
        .await
        .map_err(|e| {
            TicketeraError::Transport(format!("Failed to bind to {}: {}", config.listen_addr, e))
        })?;

    tracing::info!(addr = %config.listen_addr, "server listening");

    axum::serve(listener, app)
        .await
        .map_err(|e| TicketeraError::Transport(format!("Server error: {}", e)))?;

    Ok(())
}

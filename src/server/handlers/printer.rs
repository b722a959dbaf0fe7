//! Printer connection handlers.

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use std::sync::Arc;

use crate::transport::{ConnectionHandle, ConnectionState};

use super::super::state::AppState;
use super::error_response;

/// Connection status returned by every printer endpoint.
#[derive(Debug, Serialize)]
pub struct PrinterStatus {
    pub state: ConnectionState,
    pub device: String,
}

impl From<&ConnectionHandle> for PrinterStatus {
    fn from(connection: &ConnectionHandle) -> Self {
        Self {
            state: connection.state(),
            device: connection.describe(),
        }
    }
}

/// GET /api/printer/status
pub async fn status(State(state): State<Arc<AppState>>) -> Json<PrinterStatus> {
    let connection = state.connection.lock().await;
    Json(PrinterStatus::from(&*connection))
}

/// POST /api/printer/connect
pub async fn connect(State(state): State<Arc<AppState>>) -> Response {
    let mut connection = state.connection.lock().await;
    match connection.connect().await {
        Ok(()) => Json(PrinterStatus::from(&*connection)).into_response(),
        Err(e) => error_response(StatusCode::SERVICE_UNAVAILABLE, e),
    }
}

/// POST /api/printer/disconnect
///
/// The link is dropped either way; a failed close is still reported.
pub async fn disconnect(State(state): State<Arc<AppState>>) -> Response {
    let mut connection = state.connection.lock().await;
    match connection.disconnect().await {
        Ok(()) => Json(PrinterStatus::from(&*connection)).into_response(),
        Err(e) => error_response(StatusCode::SERVICE_UNAVAILABLE, e),
    }
}

//! Ticket preview and printing handlers.

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    error::TicketeraError,
    preview::render_text,
    ticket::{SaleRecord, ticket_program},
    transport::send_ticket,
};

use super::super::state::AppState;
use super::error_response;

/// Response body for POST /api/ticket/preview.
#[derive(Debug, Serialize)]
pub struct PreviewResponse {
    /// Plain-text rendering of the ticket
    pub text: String,
    /// Length of the command stream
    pub bytes: usize,
    /// Command stream as space-separated hex
    pub hex: String,
}

/// Response body for a successful print.
#[derive(Debug, Serialize)]
pub struct PrintResponse {
    pub success: bool,
    pub bytes: usize,
    pub chunks: usize,
}

/// Handle POST /api/ticket/preview - render the ticket without printing.
pub async fn preview(
    State(state): State<Arc<AppState>>,
    Json(sale): Json<SaleRecord>,
) -> Json<PreviewResponse> {
    let program = ticket_program(&sale, &state.layout);
    let bytes = program.to_bytes();

    Json(PreviewResponse {
        text: render_text(&program, state.layout.columns),
        bytes: bytes.len(),
        hex: bytes.to_hex(),
    })
}

/// Handle POST /api/ticket/print - build the ticket and send it.
///
/// Connects first if the printer is not connected. The connection lock is
/// held until the last chunk is written.
pub async fn print(State(state): State<Arc<AppState>>, Json(sale): Json<SaleRecord>) -> Response {
    if let Err(e) = sale.validate() {
        return error_response(StatusCode::BAD_REQUEST, e);
    }

    let job = Uuid::new_v4();
    let ticket = ticket_program(&sale, &state.layout).to_bytes();
    tracing::info!(%job, sale = %sale.id, bytes = ticket.len(), "print requested");

    let mut connection = state.connection.lock().await;
    if let Err(e) = connection.connect().await {
        tracing::warn!(%job, error = %e, "printer unavailable");
        return error_response(StatusCode::SERVICE_UNAVAILABLE, e);
    }

    match send_ticket(&mut connection, &ticket, &state.write_options).await {
        Ok(report) => {
            tracing::info!(%job, bytes = report.bytes, chunks = report.chunks, "ticket printed");
            (
                StatusCode::OK,
                Json(PrintResponse {
                    success: true,
                    bytes: report.bytes,
                    chunks: report.chunks,
                }),
            )
                .into_response()
        }
        Err(e) => {
            tracing::error!(%job, error = %e, "print failed");
            let status = match &e {
                TicketeraError::ConnectionLost { .. } | TicketeraError::NotConnected => {
                    StatusCode::SERVICE_UNAVAILABLE
                }
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            };
            error_response(status, format!("Print failed: {}", e))
        }
    }
}

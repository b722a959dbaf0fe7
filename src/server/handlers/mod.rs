//! HTTP handlers for the server.

pub mod printer;
pub mod ticket;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

/// `{"success": false, "error": ...}` with the given status.
pub(crate) fn error_response(status: StatusCode, error_msg: impl std::fmt::Display) -> Response {
    (
        status,
        Json(json!({ "success": false, "error": error_msg.to_string() })),
    )
        .into_response()
}

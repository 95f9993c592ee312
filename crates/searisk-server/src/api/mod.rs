//! API routes for the searisk server.

pub mod hazards;
pub mod request_id;
mod routes;
pub mod safety;

use axum::http::StatusCode;
use axum::{Json, Router};
use serde_json::{json, Value};

/// Error body shared by all handlers.
pub type ApiError = (StatusCode, Json<Value>);

pub(crate) fn api_error(status: StatusCode, error: &str, details: impl std::fmt::Display) -> ApiError {
    (
        status,
        Json(json!({
            "error": error,
            "details": details.to_string(),
        })),
    )
}

pub fn routes() -> Router<std::sync::Arc<crate::state::AppState>> {
    routes::create_router()
}

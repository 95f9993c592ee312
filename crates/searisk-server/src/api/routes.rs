//! REST API router.

use std::sync::Arc;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use crate::api::{hazards, request_id, safety};
use crate::state::AppState;

pub fn create_router() -> Router<Arc<AppState>> {
    let hazard_routes = Router::new()
        .route("/v1/hazards", get(hazards::list_hazards))
        .route("/v1/hazards/summary", get(hazards::hazard_summary))
        .route("/v1/hazards/reload", post(hazards::reload_hazards))
        .route("/v1/hazards/:id", get(hazards::get_hazard));

    let route_checks = Router::new()
        .route("/v1/routes/check", post(safety::check_route))
        .route("/v1/routes/safe", post(safety::safe_route));

    Router::new()
        .route("/health", get(|| async { "OK" }))
        .merge(hazard_routes)
        .merge(route_checks)
        .layer(middleware::from_fn(request_id::ensure_request_id))
}

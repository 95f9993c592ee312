//! Route safety endpoints: ad-hoc checks and safe-route generation.

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    Extension, Json,
};
use serde::{Deserialize, Serialize};

use searisk_core::{
    evaluate_path, export_feature, LonLat, RerouteOrchestrator, RerouteOutcome, RouteFeature,
    RoutePath, SafetyVerdict, SearchStats,
};

use crate::api::request_id::RequestId;
use crate::api::{api_error, ApiError};
use crate::state::AppState;

/// Upper bound on caller-supplied `max_attempts`.
const MAX_ATTEMPTS_LIMIT: usize = 10;

#[derive(Debug, Deserialize)]
pub struct CheckRouteRequest {
    pub coordinates: Vec<LonLat>,
}

#[derive(Debug, Deserialize)]
pub struct SafeRouteRequest {
    pub origin: LonLat,
    pub destination: LonLat,
    pub max_attempts: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct SafeRouteResponse {
    pub route: Option<RoutePath>,
    pub safety: SafetyVerdict,
    pub geojson: Option<RouteFeature>,
    pub stats: SearchStats,
}

fn validate_point(label: &str, point: LonLat) -> Result<(), ApiError> {
    let [lon, lat] = point;
    if !(lon.is_finite() && lat.is_finite()) {
        return Err(api_error(
            StatusCode::BAD_REQUEST,
            "Invalid coordinate",
            format!("{label} must be finite"),
        ));
    }
    if !(-180.0..=180.0).contains(&lon) || !(-90.0..=90.0).contains(&lat) {
        return Err(api_error(
            StatusCode::BAD_REQUEST,
            "Invalid coordinate",
            format!("{label} [{lon}, {lat}] is outside lon -180..180 / lat -90..90"),
        ));
    }
    Ok(())
}

/// Evaluate caller-supplied coordinates against the current hazard snapshot.
pub async fn check_route(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CheckRouteRequest>,
) -> Result<Json<SafetyVerdict>, ApiError> {
    for (i, point) in request.coordinates.iter().enumerate() {
        validate_point(&format!("coordinates[{i}]"), *point)?;
    }
    let registry = state.hazards();
    let verdict = evaluate_path(&request.coordinates, &registry);
    tracing::debug!(
        points = request.coordinates.len(),
        severity = %verdict.severity,
        "Checked route"
    );
    Ok(Json(verdict))
}

/// Generate a route and reroute around hazards when needed.
///
/// Responds 502 with the error verdict when no direct route could be
/// generated.
pub async fn safe_route(
    State(state): State<Arc<AppState>>,
    request_id: Option<Extension<RequestId>>,
    Json(request): Json<SafeRouteRequest>,
) -> Result<impl IntoResponse, ApiError> {
    validate_point("origin", request.origin)?;
    validate_point("destination", request.destination)?;
    let max_attempts = request
        .max_attempts
        .unwrap_or(state.reroute_config().max_attempts)
        .min(MAX_ATTEMPTS_LIMIT);

    let request_id = request_id.map(|Extension(id)| id.0);
    let worker = state.clone();
    let outcome = tokio::task::spawn_blocking(move || {
        let registry = worker.hazards();
        match worker.build_generator(request_id) {
            Ok(generator) => RerouteOrchestrator::with_config(
                &registry,
                generator,
                worker.reroute_config().clone(),
            )
            .generate_safe_route(request.origin, request.destination, max_attempts),
            Err(err) => {
                tracing::error!("Path generator unavailable: {}", err);
                RerouteOutcome {
                    route: None,
                    verdict: SafetyVerdict::generation_failure(&err),
                    stats: SearchStats::default(),
                }
            }
        }
    })
    .await
    .map_err(|err| api_error(StatusCode::INTERNAL_SERVER_ERROR, "Route task failed", err))?;

    tracing::info!(
        safe = outcome.verdict.is_safe,
        severity = %outcome.verdict.severity,
        rerouted = outcome.verdict.rerouted,
        generator_calls = outcome.stats.generator_calls,
        "Safe route request finished"
    );

    let status = if outcome.route.is_some() {
        StatusCode::OK
    } else {
        StatusCode::BAD_GATEWAY
    };
    let geojson = outcome
        .route
        .as_ref()
        .map(|route| export_feature(route, Some(&outcome.verdict)));
    Ok((
        status,
        Json(SafeRouteResponse {
            route: outcome.route,
            safety: outcome.verdict,
            geojson,
            stats: outcome.stats,
        }),
    ))
}

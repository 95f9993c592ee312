//! Hazard registry endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use searisk_core::{HazardSummary, HazardZone};

use crate::api::{api_error, ApiError};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ListHazardsQuery {
    /// Only return zones currently in force
    pub active: Option<bool>,
}

/// List hazard zones from the current snapshot.
pub async fn list_hazards(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListHazardsQuery>,
) -> Json<Vec<HazardZone>> {
    let registry = state.hazards();
    let zones = if query.active.unwrap_or(false) {
        registry.active_zones().cloned().collect()
    } else {
        registry.zones().to_vec()
    };
    Json(zones)
}

pub async fn hazard_summary(State(state): State<Arc<AppState>>) -> Json<HazardSummary> {
    Json(state.hazards().summary())
}

/// Get a specific hazard zone by ID.
pub async fn get_hazard(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<HazardZone>, ApiError> {
    state
        .hazards()
        .lookup(&id)
        .cloned()
        .map(Json)
        .ok_or_else(|| api_error(StatusCode::NOT_FOUND, "Hazard not found", id))
}

#[derive(Debug, Serialize)]
pub struct ReloadResponse {
    pub loaded: usize,
    pub loaded_at: DateTime<Utc>,
    pub summary: HazardSummary,
}

/// Re-read the hazard file; the previous snapshot stays if it cannot be read.
pub async fn reload_hazards(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ReloadResponse>, ApiError> {
    let worker = state.clone();
    let result = tokio::task::spawn_blocking(move || worker.reload_hazards())
        .await
        .map_err(|err| api_error(StatusCode::INTERNAL_SERVER_ERROR, "Reload task failed", err))?;

    match result {
        Ok(registry) => {
            tracing::info!(
                "Reloaded {} hazard zone(s) from {}",
                registry.len(),
                state.hazards_file().display()
            );
            Ok(Json(ReloadResponse {
                loaded: registry.len(),
                loaded_at: registry.loaded_at(),
                summary: registry.summary(),
            }))
        }
        Err(err) => {
            tracing::warn!("Hazard reload failed, keeping current snapshot: {}", err);
            Err(api_error(
                StatusCode::UNPROCESSABLE_ENTITY,
                "Hazard source could not be loaded",
                err,
            ))
        }
    }
}

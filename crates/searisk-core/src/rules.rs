//! Tuning constants for the reroute search and detour heuristics.

use serde::{Deserialize, Serialize};

/// Configuration for the reroute search loop.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RerouteConfig {
    /// Outer retry iterations after the direct route
    pub max_attempts: usize,
    /// Hazards tried per iteration, most severe first
    pub candidates_per_attempt: usize,
    pub planner: PlannerConfig,
}

impl Default for RerouteConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            candidates_per_attempt: 3,
            planner: PlannerConfig::default(),
        }
    }
}

/// Configuration for detour waypoint generation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlannerConfig {
    /// Perpendicular offset from the centroid, as a multiple of the zone's larger bbox side
    pub perpendicular_offset_factor: f64,
    /// Extra push away from the centroid applied to the chosen candidate
    pub buffer_factor: f64,
    /// Push applied to the fallback boundary vertex
    pub fallback_extension_factor: f64,
    /// Latitude clamp for generated waypoints
    pub max_abs_latitude: f64,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            perpendicular_offset_factor: 2.0,
            buffer_factor: 0.2,
            fallback_extension_factor: 2.0,
            max_abs_latitude: 85.0,
        }
    }
}

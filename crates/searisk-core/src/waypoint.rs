//! Detour waypoint heuristics.
//!
//! Given an origin, a destination and one hazard zone, propose a single via
//! point that lies outside the zone. Distances are planar in coordinate space,
//! which is acceptable for the size of the zones involved. The waypoint is not
//! checked against other zones; the evaluator does that on the next pass.

use crate::models::{HazardZone, LonLat};
use crate::rules::PlannerConfig;
use crate::spatial::{bounding_box, distance_to_segment, planar_distance, polygon_centroid};

#[derive(Debug, Clone, Default)]
pub struct WaypointPlanner {
    config: PlannerConfig,
}

impl WaypointPlanner {
    pub fn new(config: PlannerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// Propose a detour point around `zone`, or `None` when the zone has no usable boundary.
    pub fn plan(&self, origin: LonLat, destination: LonLat, zone: &HazardZone) -> Option<LonLat> {
        let ring = zone.boundary();
        let centroid = polygon_centroid(ring)?;

        let best = self
            .candidates(origin, destination, zone)
            .into_iter()
            .filter(|candidate| !zone.covers_point(*candidate))
            .min_by(|a, b| {
                detour_cost(origin, *a, destination).total_cmp(&detour_cost(origin, *b, destination))
            });

        if let Some(candidate) = best {
            let pushed = self.clamp(extend(centroid, candidate, self.config.buffer_factor));
            let waypoint = if zone.covers_point(pushed) { candidate } else { pushed };
            tracing::debug!(
                zone_id = %zone.id,
                lon = waypoint[0],
                lat = waypoint[1],
                "Planned detour waypoint"
            );
            return Some(waypoint);
        }

        self.fallback(origin, destination, zone, centroid)
    }

    /// Fixed candidate set: two perpendicular offsets from the centroid, then
    /// points half a bbox height north and south of the zone.
    pub(crate) fn candidates(
        &self,
        origin: LonLat,
        destination: LonLat,
        zone: &HazardZone,
    ) -> Vec<LonLat> {
        let ring = zone.boundary();
        let (Some(centroid), Some(bbox)) = (polygon_centroid(ring), bounding_box(ring)) else {
            return Vec::new();
        };

        let dx = destination[0] - origin[0];
        let dy = destination[1] - origin[1];
        let len = (dx * dx + dy * dy).sqrt();
        let perp = if len > f64::EPSILON {
            [-dy / len, dx / len]
        } else {
            [0.0, 1.0]
        };
        let offset = bbox.width().max(bbox.height()) * self.config.perpendicular_offset_factor;
        let half_height = bbox.height() / 2.0;

        [
            [centroid[0] + perp[0] * offset, centroid[1] + perp[1] * offset],
            [centroid[0] - perp[0] * offset, centroid[1] - perp[1] * offset],
            [centroid[0], bbox.max_lat + half_height],
            [centroid[0], bbox.min_lat - half_height],
        ]
        .into_iter()
        .map(|point| self.clamp(point))
        .collect()
    }

    /// Boundary vertex farthest from the direct line, pushed away from the centroid.
    fn fallback(
        &self,
        origin: LonLat,
        destination: LonLat,
        zone: &HazardZone,
        centroid: LonLat,
    ) -> Option<LonLat> {
        let mut farthest: Option<(LonLat, f64)> = None;
        for vertex in zone.boundary() {
            let dist = distance_to_segment(*vertex, origin, destination);
            if farthest.map_or(true, |(_, best)| dist > best) {
                farthest = Some((*vertex, dist));
            }
        }

        let (vertex, _) = farthest?;
        let waypoint = self.clamp(extend(centroid, vertex, self.config.fallback_extension_factor));
        if zone.covers_point(waypoint) {
            tracing::debug!(zone_id = %zone.id, "No detour waypoint outside hazard zone");
            return None;
        }
        Some(waypoint)
    }

    fn clamp(&self, point: LonLat) -> LonLat {
        let limit = self.config.max_abs_latitude;
        [point[0], point[1].clamp(-limit, limit)]
    }
}

/// Move `point` further along the ray from `from`, by `factor` of their separation.
fn extend(from: LonLat, point: LonLat, factor: f64) -> LonLat {
    [
        point[0] + (point[0] - from[0]) * factor,
        point[1] + (point[1] - from[1]) * factor,
    ]
}

fn detour_cost(origin: LonLat, via: LonLat, destination: LonLat) -> f64 {
    planar_distance(origin, via) + planar_distance(via, destination)
}

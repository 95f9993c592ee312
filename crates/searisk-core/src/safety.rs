//! Safety evaluation of a route against a hazard registry snapshot.
//!
//! Evaluation is a pure function of the path and the snapshot: no clocks,
//! no randomness, and results are ordered by registry order.

use crate::models::{HazardFinding, HazardType, LonLat, RoutePath, SafetyVerdict, Severity};
use crate::registry::HazardRegistry;
use crate::spatial::{length_inside_polygon, path_intersects_polygon, path_length};

/// Evaluate a generated route.
pub fn evaluate(route: &RoutePath, registry: &HazardRegistry) -> SafetyVerdict {
    evaluate_path(&route.coordinates, registry)
}

/// Evaluate a raw coordinate path. Fewer than two points is treated as "nothing to analyze".
pub fn evaluate_path(path: &[LonLat], registry: &HazardRegistry) -> SafetyVerdict {
    if path.len() < 2 {
        return SafetyVerdict {
            is_safe: true,
            hazards_detected: Vec::new(),
            severity: Severity::Safe,
            recommendation: "No route data to analyze.".to_string(),
            total_hazards: 0,
            rerouted: false,
            waypoint_used: None,
        };
    }

    let total_length = path_length(path);
    let mut detected = Vec::new();
    let mut max_severity = Severity::Safe;

    for zone in registry.active_zones() {
        let ring = zone.boundary();
        if !path_intersects_polygon(path, ring) {
            continue;
        }

        let inside = length_inside_polygon(path, ring);
        let percentage = if total_length > 0.0 {
            round2((inside / total_length * 100.0).clamp(0.0, 100.0))
        } else {
            0.0
        };

        tracing::debug!(
            zone_id = %zone.id,
            severity = %zone.severity,
            percentage,
            "Route intersects hazard zone"
        );

        detected.push(HazardFinding {
            id: zone.id.clone(),
            name: zone.name.clone(),
            hazard_type: zone.hazard_type.clone(),
            severity: zone.severity,
            description: zone.description.clone(),
            percentage_affected: percentage,
            reported_incidents: zone.reported_incidents,
            last_updated: zone.last_updated.clone(),
        });
        max_severity = max_severity.max(zone.severity);
    }

    let recommendation = recommendation(&detected, max_severity);
    SafetyVerdict {
        is_safe: detected.is_empty(),
        total_hazards: detected.len(),
        hazards_detected: detected,
        severity: max_severity,
        recommendation,
        rerouted: false,
        waypoint_used: None,
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Recommendation text built from the distinct hazard types, in first-seen order.
pub fn recommendation(hazards: &[HazardFinding], severity: Severity) -> String {
    if hazards.is_empty() {
        return "Route is clear of all known hazards. Safe to proceed.".to_string();
    }

    let mut types: Vec<&HazardType> = Vec::new();
    for hazard in hazards {
        if !types.contains(&&hazard.hazard_type) {
            types.push(&hazard.hazard_type);
        }
    }
    let hazard_list = types
        .iter()
        .map(|t| t.description())
        .collect::<Vec<_>>()
        .join(", ");
    let count = hazards.len();

    match severity {
        Severity::High => format!(
            "DANGER: Route passes through {}. Strongly recommend alternative route. {} hazard(s) detected.",
            hazard_list, count
        ),
        Severity::Medium => format!(
            "CAUTION: Route passes through {}. Consider alternative route or proceed with caution. {} hazard(s) detected.",
            hazard_list, count
        ),
        Severity::Low | Severity::Safe => format!(
            "ADVISORY: Route passes through {}. Monitor conditions. {} hazard(s) detected.",
            hazard_list, count
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{HazardZone, PolygonGeometry};

    fn zone(id: &str, hazard_type: HazardType, severity: Severity, ring: Vec<LonLat>) -> HazardZone {
        HazardZone {
            id: id.to_string(),
            name: format!("Zone {id}"),
            hazard_type,
            severity,
            region: PolygonGeometry::from_ring(ring),
            active: true,
            reported_incidents: 3,
            last_updated: "2024-01-01".to_string(),
            description: "test zone".to_string(),
        }
    }

    fn square(min: f64, max: f64) -> Vec<LonLat> {
        vec![[min, min], [max, min], [max, max], [min, max], [min, min]]
    }

    #[test]
    fn empty_registry_is_always_safe() {
        let verdict = evaluate_path(&[[0.0, 0.0], [10.0, 10.0]], &HazardRegistry::default());
        assert!(verdict.is_safe);
        assert_eq!(verdict.severity, Severity::Safe);
        assert!(verdict.hazards_detected.is_empty());
        assert!(verdict.recommendation.contains("Safe to proceed"));
    }

    #[test]
    fn degenerate_path_is_not_an_error() {
        let registry = HazardRegistry::new(vec![zone("a", HazardType::Storm, Severity::High, square(-1.0, 1.0))]);
        let verdict = evaluate_path(&[[0.0, 0.0]], &registry);
        assert!(verdict.is_safe);
        assert_eq!(verdict.recommendation, "No route data to analyze.");
        assert!(evaluate_path(&[], &registry).is_safe);
    }

    #[test]
    fn inactive_zone_covering_route_is_ignored() {
        let mut covering = zone("a", HazardType::Ice, Severity::High, square(-50.0, 50.0));
        covering.active = false;
        let registry = HazardRegistry::new(vec![covering]);
        let verdict = evaluate_path(&[[0.0, 0.0], [10.0, 10.0]], &registry);
        assert!(verdict.is_safe);
        assert_eq!(verdict.total_hazards, 0);
    }

    #[test]
    fn severity_is_max_of_detected() {
        let registry = HazardRegistry::new(vec![
            zone("low", HazardType::HighTraffic, Severity::Low, square(1.0, 2.0)),
            zone("high", HazardType::Piracy, Severity::High, square(4.0, 5.0)),
            zone("medium", HazardType::Storm, Severity::Medium, square(7.0, 8.0)),
            zone("far", HazardType::Storm, Severity::High, square(30.0, 40.0)),
        ]);
        let verdict = evaluate_path(&[[0.0, 0.0], [10.0, 10.0]], &registry);

        assert!(!verdict.is_safe);
        assert_eq!(verdict.total_hazards, 3);
        assert_eq!(verdict.severity, Severity::High);
        let ids: Vec<_> = verdict.hazards_detected.iter().map(|h| h.id.as_str()).collect();
        assert_eq!(ids, vec!["low", "high", "medium"]);
        assert!(verdict.recommendation.starts_with("DANGER"));
    }

    #[test]
    fn percentage_affected_matches_inside_share() {
        let registry = HazardRegistry::new(vec![zone("a", HazardType::Storm, Severity::Medium, square(2.0, 6.0))]);
        // Horizontal route of length 10, 4 units inside
        let verdict = evaluate_path(&[[0.0, 4.0], [10.0, 4.0]], &registry);
        assert_eq!(verdict.hazards_detected[0].percentage_affected, 40.0);
        assert!(verdict.recommendation.starts_with("CAUTION"));
    }

    #[test]
    fn zero_length_path_inside_zone_reports_zero_percent() {
        let registry = HazardRegistry::new(vec![zone("a", HazardType::Storm, Severity::Low, square(0.0, 4.0))]);
        let verdict = evaluate_path(&[[2.0, 2.0], [2.0, 2.0]], &registry);
        assert_eq!(verdict.total_hazards, 1);
        assert_eq!(verdict.hazards_detected[0].percentage_affected, 0.0);
        assert!(verdict.recommendation.starts_with("ADVISORY"));
    }

    #[test]
    fn recommendation_lists_distinct_types_once() {
        let registry = HazardRegistry::new(vec![
            zone("p1", HazardType::Piracy, Severity::Medium, square(1.0, 2.0)),
            zone("p2", HazardType::Piracy, Severity::Medium, square(4.0, 5.0)),
            zone("w", HazardType::HighWinds, Severity::Low, square(7.0, 8.0)),
        ]);
        let verdict = evaluate_path(&[[0.0, 0.0], [10.0, 10.0]], &registry);
        assert_eq!(
            verdict.recommendation,
            "CAUTION: Route passes through piracy zones, high wind areas. \
             Consider alternative route or proceed with caution. 3 hazard(s) detected."
        );
    }

    #[test]
    fn evaluation_is_deterministic() {
        let registry = HazardRegistry::new(vec![
            zone("a", HazardType::Storm, Severity::Medium, square(2.0, 6.0)),
            zone("b", HazardType::Other("fog".into()), Severity::Low, square(5.0, 9.0)),
        ]);
        let path = [[0.0, 0.0], [3.0, 4.0], [10.0, 7.0]];
        assert_eq!(evaluate_path(&path, &registry), evaluate_path(&path, &registry));
    }
}

//! Core data models for hazard zones, routes and safety verdicts.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A `[lon, lat]` pair in decimal degrees.
pub type LonLat = [f64; 2];

/// Ordered risk tier. `Safe` only appears on verdicts, never on a hazard zone.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    #[default]
    Safe,
    Low,
    Medium,
    High,
}

impl Severity {
    /// Numeric rank used when sorting hazards for retry prioritization.
    pub fn rank(self) -> u8 {
        match self {
            Severity::Safe => 0,
            Severity::Low => 1,
            Severity::Medium => 2,
            Severity::High => 3,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Safe => "safe",
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Threat category of a hazard zone.
///
/// Unknown categories are kept verbatim so they can be echoed back in
/// recommendations and summaries.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum HazardType {
    Piracy,
    Storm,
    HighWinds,
    Ice,
    VolcanicActivity,
    HighTraffic,
    Other(String),
}

impl HazardType {
    pub fn as_str(&self) -> &str {
        match self {
            HazardType::Piracy => "piracy",
            HazardType::Storm => "storm",
            HazardType::HighWinds => "high_winds",
            HazardType::Ice => "ice",
            HazardType::VolcanicActivity => "volcanic_activity",
            HazardType::HighTraffic => "high_traffic",
            HazardType::Other(raw) => raw,
        }
    }

    /// Phrase used inside recommendation text.
    pub fn description(&self) -> &str {
        match self {
            HazardType::Piracy => "piracy zones",
            HazardType::Storm => "active storms/typhoons",
            HazardType::HighWinds => "high wind areas",
            HazardType::Ice => "ice formations",
            HazardType::VolcanicActivity => "volcanic activity zones",
            HazardType::HighTraffic => "high traffic areas",
            HazardType::Other(raw) => raw,
        }
    }

    /// Title-cased label ("high_winds" -> "High Winds").
    pub fn title(&self) -> String {
        self.as_str()
            .split('_')
            .filter(|word| !word.is_empty())
            .map(|word| {
                let mut chars = word.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                    None => String::new(),
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl From<String> for HazardType {
    fn from(value: String) -> Self {
        match value.as_str() {
            "piracy" => HazardType::Piracy,
            "storm" => HazardType::Storm,
            "high_winds" => HazardType::HighWinds,
            "ice" => HazardType::Ice,
            "volcanic_activity" => HazardType::VolcanicActivity,
            "high_traffic" => HazardType::HighTraffic,
            _ => HazardType::Other(value),
        }
    }
}

impl From<HazardType> for String {
    fn from(value: HazardType) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for HazardType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ========== HAZARD ZONES ==========

/// GeoJSON polygon geometry as stored in the hazard source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolygonGeometry {
    #[serde(rename = "type", default = "polygon_tag")]
    pub kind: String,
    /// Rings as `[lon, lat]` pairs; the first ring is the exterior (closed - first == last)
    pub coordinates: Vec<Vec<LonLat>>,
}

fn polygon_tag() -> String {
    "Polygon".to_string()
}

impl PolygonGeometry {
    pub fn from_ring(ring: Vec<LonLat>) -> Self {
        Self {
            kind: polygon_tag(),
            coordinates: vec![ring],
        }
    }

    /// Exterior ring, or an empty slice when the geometry has no rings.
    pub fn exterior(&self) -> &[LonLat] {
        self.coordinates.first().map(Vec::as_slice).unwrap_or(&[])
    }
}

/// A geographic region ships should avoid or treat cautiously.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HazardZone {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub hazard_type: HazardType,
    pub severity: Severity,
    pub region: PolygonGeometry,
    /// Inactive zones are ignored by the evaluator regardless of overlap
    #[serde(default = "default_active")]
    pub active: bool,
    #[serde(default)]
    pub reported_incidents: u32,
    #[serde(default = "unknown")]
    pub last_updated: String,
    #[serde(default)]
    pub description: String,
}

fn default_active() -> bool {
    true
}

fn unknown() -> String {
    "Unknown".to_string()
}

impl HazardZone {
    /// Exterior boundary ring as `[lon, lat]` pairs.
    pub fn boundary(&self) -> &[LonLat] {
        self.region.exterior()
    }

    /// Check if a point lies strictly inside or on the boundary of this zone.
    pub fn covers_point(&self, point: LonLat) -> bool {
        crate::spatial::point_in_polygon(point, self.boundary())
            || crate::spatial::point_on_boundary(point, self.boundary())
    }

    /// Validate zone configuration.
    /// Returns list of validation errors (empty = valid).
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        let ring = self.boundary();

        if self.id.trim().is_empty() {
            errors.push("Hazard zone id must not be empty".to_string());
        }

        if ring.len() < 4 {
            errors.push("Boundary must have at least 4 points (closed triangle)".to_string());
        } else if let (Some(first), Some(last)) = (ring.first(), ring.last()) {
            if (first[0] - last[0]).abs() > 1e-9 || (first[1] - last[1]).abs() > 1e-9 {
                errors.push("Boundary must be closed (first point must equal last)".to_string());
            }
        }

        if ring.iter().any(|p| !p[0].is_finite() || !p[1].is_finite()) {
            errors.push("Boundary contains non-finite coordinates".to_string());
        }

        if self.severity == Severity::Safe {
            errors.push("Hazard zone severity must be low, medium or high".to_string());
        }

        errors
    }

    pub fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }
}

// ========== ROUTES ==========

/// Port annotation supplied by the path generator.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PortInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Country code
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cty: Option<String>,
    /// Port code
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<String>,
}

/// Ordered path produced by a path generator, plus scalar properties.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoutePath {
    pub coordinates: Vec<LonLat>,
    /// Distance in `units` (nautical miles by default)
    pub length: f64,
    pub duration_hours: f64,
    #[serde(default = "default_units")]
    pub units: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port_origin: Option<PortInfo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port_dest: Option<PortInfo>,
    /// Set when the route was stitched from two legs through a waypoint
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub waypoint_route: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub waypoint_used: Option<LonLat>,
}

pub(crate) fn default_units() -> String {
    "naut".to_string()
}

impl RoutePath {
    pub fn new(coordinates: Vec<LonLat>, length: f64, duration_hours: f64) -> Self {
        Self {
            coordinates,
            length,
            duration_hours,
            units: default_units(),
            port_origin: None,
            port_dest: None,
            waypoint_route: false,
            waypoint_used: None,
        }
    }

    pub fn origin(&self) -> Option<LonLat> {
        self.coordinates.first().copied()
    }

    pub fn destination(&self) -> Option<LonLat> {
        self.coordinates.last().copied()
    }
}

// ========== SAFETY VERDICTS ==========

/// One hazard intersected by an evaluated route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HazardFinding {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub hazard_type: HazardType,
    pub severity: Severity,
    pub description: String,
    /// Share of the route length inside the zone, 0-100 rounded to 2 decimals
    pub percentage_affected: f64,
    pub reported_incidents: u32,
    pub last_updated: String,
}

/// Complete output of a safety evaluation for one route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SafetyVerdict {
    pub is_safe: bool,
    pub hazards_detected: Vec<HazardFinding>,
    pub severity: Severity,
    pub recommendation: String,
    pub total_hazards: usize,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub rerouted: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub waypoint_used: Option<LonLat>,
}

impl SafetyVerdict {
    /// Terminal verdict returned when no direct route could be obtained.
    pub fn generation_failure(cause: impl fmt::Display) -> Self {
        Self {
            is_safe: false,
            hazards_detected: Vec::new(),
            severity: Severity::High,
            recommendation: format!("Error generating route: {}", cause),
            total_hazards: 0,
            rerouted: false,
            waypoint_used: None,
        }
    }
}

//! GeoJSON projection of routes and verdicts.
//!
//! Path generators speak GeoJSON `Feature`s with a `LineString` geometry;
//! exports use the same shape with the safety verdict attached.

use serde::{Deserialize, Serialize};

use crate::error::PathGenerationError;
use crate::models::{default_units, LonLat, PortInfo, RoutePath, SafetyVerdict};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineStringGeometry {
    #[serde(rename = "type")]
    pub kind: String,
    pub coordinates: Vec<LonLat>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RouteProperties {
    #[serde(default)]
    pub length: f64,
    #[serde(default)]
    pub duration_hours: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub units: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port_origin: Option<PortInfo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port_dest: Option<PortInfo>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub waypoint_route: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub waypoint_used: Option<LonLat>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub safety: Option<SafetyVerdict>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteFeature {
    #[serde(rename = "type")]
    pub kind: String,
    pub geometry: LineStringGeometry,
    #[serde(default)]
    pub properties: RouteProperties,
}

impl RouteFeature {
    pub fn into_route(self) -> Result<RoutePath, PathGenerationError> {
        if self.kind != "Feature" || self.geometry.kind != "LineString" {
            return Err(PathGenerationError::InvalidResponse(format!(
                "expected Feature/LineString, got {}/{}",
                self.kind, self.geometry.kind
            )));
        }
        if self.geometry.coordinates.len() < 2 {
            return Err(PathGenerationError::InvalidResponse(
                "route geometry has fewer than 2 coordinates".to_string(),
            ));
        }

        let props = self.properties;
        Ok(RoutePath {
            coordinates: self.geometry.coordinates,
            length: props.length,
            duration_hours: props.duration_hours,
            units: props.units.unwrap_or_else(default_units),
            port_origin: props.port_origin,
            port_dest: props.port_dest,
            waypoint_route: props.waypoint_route,
            waypoint_used: props.waypoint_used,
        })
    }
}

impl RoutePath {
    /// Parse a route from a generator's GeoJSON feature.
    pub fn from_feature(value: serde_json::Value) -> Result<Self, PathGenerationError> {
        let feature: RouteFeature = serde_json::from_value(value)
            .map_err(|err| PathGenerationError::InvalidResponse(err.to_string()))?;
        feature.into_route()
    }
}

/// Project a route, optionally with its verdict, to a GeoJSON feature.
pub fn export_feature(route: &RoutePath, verdict: Option<&SafetyVerdict>) -> RouteFeature {
    RouteFeature {
        kind: "Feature".to_string(),
        geometry: LineStringGeometry {
            kind: "LineString".to_string(),
            coordinates: route.coordinates.clone(),
        },
        properties: RouteProperties {
            length: route.length,
            duration_hours: route.duration_hours,
            units: Some(route.units.clone()),
            port_origin: route.port_origin.clone(),
            port_dest: route.port_dest.clone(),
            waypoint_route: route.waypoint_route,
            waypoint_used: route.waypoint_used,
            safety: verdict.cloned(),
        },
    }
}

use std::path::PathBuf;

use thiserror::Error;

use crate::models::LonLat;

/// Failure to read a hazard-zone source.
///
/// Only surfaced by [`crate::registry::HazardRegistry::try_load`]; the
/// tolerant loaders degrade to an empty registry instead.
#[derive(Debug, Error)]
pub enum HazardSourceError {
    #[error("hazard source not found at {path}")]
    NotFound { path: PathBuf },

    #[error("failed to read hazard source {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse hazard source: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Failure reported by a path generator.
#[derive(Debug, Clone, Error)]
pub enum PathGenerationError {
    #[error("no path found between {} and {}", fmt_point(.origin), fmt_point(.destination))]
    NoRoute { origin: LonLat, destination: LonLat },

    #[error("path generator unavailable: {0}")]
    Unavailable(String),

    #[error("path generator returned an invalid response: {0}")]
    InvalidResponse(String),
}

/// Fatal reroute failure; everything else is recovered inside the search.
#[derive(Debug, Clone, Error)]
pub enum RerouteError {
    #[error("direct path request failed: {0}")]
    DirectPath(#[source] PathGenerationError),
}

fn fmt_point(point: &LonLat) -> String {
    format!("[{:.4}, {:.4}]", point[0], point[1])
}

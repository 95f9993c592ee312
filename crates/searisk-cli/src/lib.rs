//! searisk CLI - command line tools for maritime route safety.
//!
//! Binaries:
//! - plan_route: safe route between two ports, with report and GeoJSON export
//! - hazard_summary: registry overview of a hazard file

pub mod display;
pub mod ports;

use std::time::Duration;

use searisk_client::HttpPathGenerator;
use searisk_core::{DirectLineGenerator, LonLat, PathGenerationError, PathGenerator};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

pub use ports::{find_port, Port, PORTS};

/// Install the fmt subscriber; `RUST_LOG` overrides the default level.
pub fn init_tracing(default_directive: &str) -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive(default_directive.parse()?))
        .try_init()?;
    Ok(())
}

/// Sea router when a URL is given, otherwise the offline straight-line generator.
pub fn build_generator(
    router_url: Option<&str>,
    timeout: Duration,
) -> Result<Box<dyn PathGenerator>, PathGenerationError> {
    match router_url.map(str::trim).filter(|url| !url.is_empty()) {
        Some(url) => Ok(Box::new(HttpPathGenerator::new(url, timeout)?)),
        None => Ok(Box::new(DirectLineGenerator::default())),
    }
}

/// Parse `lon,lat` into a coordinate.
pub fn parse_point(raw: &str) -> Result<LonLat, String> {
    let (lon, lat) = raw
        .split_once(',')
        .ok_or_else(|| format!("expected lon,lat but got '{raw}'"))?;
    let lon: f64 = lon.trim().parse().map_err(|_| format!("invalid longitude '{lon}'"))?;
    let lat: f64 = lat.trim().parse().map_err(|_| format!("invalid latitude '{lat}'"))?;
    if !(-180.0..=180.0).contains(&lon) || !(-90.0..=90.0).contains(&lat) {
        return Err(format!("coordinate {lon},{lat} out of range"));
    }
    Ok([lon, lat])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_lon_lat() {
        assert_eq!(parse_point("0.1071, 49.4859"), Ok([0.1071, 49.4859]));
        assert_eq!(parse_point("-74.006,40.7128"), Ok([-74.006, 40.7128]));
    }

    #[test]
    fn rejects_bad_points() {
        assert!(parse_point("49.4859").is_err());
        assert!(parse_point("east,north").is_err());
        assert!(parse_point("10,95").is_err());
    }

    #[test]
    fn blank_router_url_uses_direct_line() {
        let generator = build_generator(Some("  "), Duration::from_secs(1)).unwrap();
        let route = generator.generate([0.0, 0.0], [1.0, 0.0]).unwrap();
        assert_eq!(route.origin(), Some([0.0, 0.0]));
        assert_eq!(route.destination(), Some([1.0, 0.0]));
    }
}

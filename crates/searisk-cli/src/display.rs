//! Console formatting for routes.

use searisk_core::{PortInfo, RoutePath};

const KM_PER_NAUTICAL_MILE: f64 = 1.852;

/// `1234.57 nautical miles (2286.42 km)`
pub fn format_distance(length_nm: f64) -> String {
    format!(
        "{:.2} nautical miles ({:.2} km)",
        length_nm,
        length_nm * KM_PER_NAUTICAL_MILE
    )
}

/// Whole days and leftover whole hours, e.g. `12d 5h`.
pub fn format_duration(hours: f64) -> String {
    let hours = hours.max(0.0);
    let days = (hours / 24.0).floor() as u64;
    let rest = (hours % 24.0).floor() as u64;
    format!("{}d {}h", days, rest)
}

fn format_port(port: &PortInfo) -> String {
    let name = port.name.as_deref().unwrap_or("N/A");
    let country = port.cty.as_deref().unwrap_or("N/A");
    let code = port.port.as_deref().unwrap_or("N/A");
    format!("{name} ({country}, {code})")
}

/// Multi-line summary of a route's geometry and annotations.
pub fn route_summary(route: &RoutePath) -> String {
    let mut lines = vec![
        format!("Distance: {}", format_distance(route.length)),
        format!("Duration: {}", format_duration(route.duration_hours)),
        format!("Route points: {}", route.coordinates.len()),
    ];
    if let Some(port) = &route.port_origin {
        lines.push(format!("Origin port: {}", format_port(port)));
    }
    if let Some(port) = &route.port_dest {
        lines.push(format!("Destination port: {}", format_port(port)));
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duration_splits_days_and_hours() {
        assert_eq!(format_duration(0.0), "0d 0h");
        assert_eq!(format_duration(23.9), "0d 23h");
        assert_eq!(format_duration(53.5), "2d 5h");
    }

    #[test]
    fn distance_includes_km() {
        assert_eq!(format_distance(100.0), "100.00 nautical miles (185.20 km)");
    }

    #[test]
    fn summary_lists_ports_when_known() {
        let mut route = RoutePath::new(vec![[0.0, 0.0], [1.0, 0.0]], 60.0, 2.5);
        route.port_origin = Some(PortInfo {
            name: Some("Le Havre".into()),
            cty: Some("France".into()),
            port: None,
        });
        let text = route_summary(&route);
        assert!(text.contains("Duration: 0d 2h"));
        assert!(text.contains("Origin port: Le Havre (France, N/A)"));
        assert!(!text.contains("Destination port"));
    }
}

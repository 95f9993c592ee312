//! Preset ports for quick route selection.

use searisk_core::LonLat;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Port {
    pub name: &'static str,
    pub country: &'static str,
    /// `[lon, lat]`
    pub location: LonLat,
}

impl Port {
    pub fn label(&self) -> String {
        format!("{}, {}", self.name, self.country)
    }
}

pub const PORTS: &[Port] = &[
    Port { name: "Le Havre", country: "France", location: [0.1071, 49.4859] },
    Port { name: "Tianjin", country: "China", location: [117.7449, 38.9868] },
    Port { name: "New York", country: "USA", location: [-74.0060, 40.7128] },
    Port { name: "Singapore", country: "Singapore", location: [103.8198, 1.3521] },
    Port { name: "Rotterdam", country: "Netherlands", location: [4.4777, 51.9244] },
    Port { name: "Los Angeles", country: "USA", location: [-118.1937, 33.7701] },
    Port { name: "Shanghai", country: "China", location: [121.4737, 31.2304] },
    Port { name: "Dubai", country: "UAE", location: [55.2708, 25.2048] },
    Port { name: "Santos", country: "Brazil", location: [-46.3335, -23.9608] },
    Port { name: "Hamburg", country: "Germany", location: [9.9937, 53.5511] },
];

/// Case-insensitive lookup by name, `name, country` label, or a hyphen/underscore slug
/// such as `le-havre`.
pub fn find_port(query: &str) -> Option<&'static Port> {
    let normalized = normalize(query);
    if normalized.is_empty() {
        return None;
    }
    PORTS
        .iter()
        .find(|port| normalize(port.name) == normalized || normalize(&port.label()) == normalized)
}

fn normalize(value: &str) -> String {
    value
        .trim()
        .chars()
        .map(|c| if c == '-' || c == '_' { ' ' } else { c.to_ascii_lowercase() })
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_by_name_label_and_slug() {
        assert_eq!(find_port("Hamburg").unwrap().country, "Germany");
        assert_eq!(find_port("le havre, france").unwrap().name, "Le Havre");
        assert_eq!(find_port("los-angeles").unwrap().location, [-118.1937, 33.7701]);
        assert_eq!(find_port("  NEW_YORK ").unwrap().name, "New York");
    }

    #[test]
    fn unknown_port_is_none() {
        assert!(find_port("Atlantis").is_none());
        assert!(find_port("").is_none());
    }

    #[test]
    fn ten_presets() {
        assert_eq!(PORTS.len(), 10);
    }
}

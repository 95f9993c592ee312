//! Stitching of two path legs through a shared waypoint.

use crate::models::{LonLat, RoutePath};

/// Join `leg1` (origin -> waypoint) and `leg2` (waypoint -> destination).
///
/// `leg2`'s first point duplicates the waypoint and is dropped. Scalars are
/// summed; port annotations pass through from the outer ends.
pub fn combine(leg1: &RoutePath, leg2: &RoutePath, waypoint: LonLat) -> RoutePath {
    let mut coordinates = Vec::with_capacity(leg1.coordinates.len() + leg2.coordinates.len());
    coordinates.extend_from_slice(&leg1.coordinates);
    coordinates.extend(leg2.coordinates.iter().skip(1).copied());

    RoutePath {
        coordinates,
        length: leg1.length + leg2.length,
        duration_hours: leg1.duration_hours + leg2.duration_hours,
        units: leg1.units.clone(),
        port_origin: leg1.port_origin.clone(),
        port_dest: leg2.port_dest.clone(),
        waypoint_route: true,
        waypoint_used: Some(waypoint),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PortInfo;

    #[test]
    fn drops_duplicate_waypoint_and_sums_scalars() {
        let mut leg1 = RoutePath::new(vec![[0.0, 0.0], [1.0, 1.0], [2.0, 2.0]], 120.5, 5.0);
        leg1.port_origin = Some(PortInfo {
            name: Some("Le Havre".into()),
            cty: Some("France".into()),
            port: Some("FRLEH".into()),
        });
        leg1.port_dest = Some(PortInfo::default());
        let mut leg2 = RoutePath::new(vec![[2.0, 2.0], [3.0, 1.0]], 60.0, 2.5);
        leg2.port_dest = Some(PortInfo {
            name: Some("Tianjin".into()),
            ..PortInfo::default()
        });

        let combined = combine(&leg1, &leg2, [2.0, 2.0]);

        assert_eq!(
            combined.coordinates.len(),
            leg1.coordinates.len() + leg2.coordinates.len() - 1
        );
        assert_eq!(combined.coordinates, vec![[0.0, 0.0], [1.0, 1.0], [2.0, 2.0], [3.0, 1.0]]);
        assert_eq!(combined.length, 180.5);
        assert_eq!(combined.duration_hours, 7.5);
        assert!(combined.waypoint_route);
        assert_eq!(combined.waypoint_used, Some([2.0, 2.0]));
        assert_eq!(combined.port_origin, leg1.port_origin);
        assert_eq!(combined.port_dest, leg2.port_dest);
        assert_eq!(combined.units, "naut");
    }

    #[test]
    fn legs_are_not_mutated() {
        let leg1 = RoutePath::new(vec![[0.0, 0.0], [1.0, 0.0]], 1.0, 1.0);
        let leg2 = RoutePath::new(vec![[1.0, 0.0], [2.0, 0.0]], 1.0, 1.0);
        let before = (leg1.clone(), leg2.clone());
        let _ = combine(&leg1, &leg2, [1.0, 0.0]);
        assert_eq!((leg1, leg2), before);
    }
}

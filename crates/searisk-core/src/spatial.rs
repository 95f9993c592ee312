//! Planar geometry primitives over `[lon, lat]` coordinates.
//!
//! Everything here works in degree space: distances are Euclidean on the raw
//! coordinate pairs. That is an approximation valid for the hazard-zone scale
//! this crate deals with (tens of degrees at most, away from the antimeridian);
//! only [`haversine_distance`] is a true great-circle measure.

use crate::models::LonLat;

/// Tolerance, in degrees, for boundary and collinearity tests.
const EPS_DEG: f64 = 1e-9;

pub const EARTH_RADIUS_M: f64 = 6_371_000.0;
pub const METERS_PER_NAUTICAL_MILE: f64 = 1_852.0;

/// Calculate distance between two points in meters using Haversine formula.
///
/// # Arguments
/// * `lat1`, `lon1` - First point coordinates in decimal degrees
/// * `lat2`, `lon2` - Second point coordinates in decimal degrees
pub fn haversine_distance(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let phi1 = lat1.to_radians();
    let phi2 = lat2.to_radians();
    let dphi = (lat2 - lat1).to_radians();
    let dlambda = (lon2 - lon1).to_radians();
    let a = (dphi / 2.0).sin().powi(2) + phi1.cos() * phi2.cos() * (dlambda / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_M * a.sqrt().atan2((1.0 - a).sqrt())
}

/// Great-circle length of a path in nautical miles.
pub fn path_length_nm(path: &[LonLat]) -> f64 {
    path.windows(2)
        .map(|pair| haversine_distance(pair[0][1], pair[0][0], pair[1][1], pair[1][0]))
        .sum::<f64>()
        / METERS_PER_NAUTICAL_MILE
}

/// Straight-line distance in coordinate space.
pub fn planar_distance(a: LonLat, b: LonLat) -> f64 {
    let dx = b[0] - a[0];
    let dy = b[1] - a[1];
    (dx * dx + dy * dy).sqrt()
}

/// Length of a path in coordinate space (degrees).
pub fn path_length(path: &[LonLat]) -> f64 {
    path.windows(2).map(|pair| planar_distance(pair[0], pair[1])).sum()
}

/// Axis-aligned bounding box of a ring.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min_lon: f64,
    pub min_lat: f64,
    pub max_lon: f64,
    pub max_lat: f64,
}

impl BoundingBox {
    pub fn width(&self) -> f64 {
        self.max_lon - self.min_lon
    }

    pub fn height(&self) -> f64 {
        self.max_lat - self.min_lat
    }
}

pub fn bounding_box(ring: &[LonLat]) -> Option<BoundingBox> {
    let first = ring.first()?;
    let mut bbox = BoundingBox {
        min_lon: first[0],
        min_lat: first[1],
        max_lon: first[0],
        max_lat: first[1],
    };
    for point in &ring[1..] {
        bbox.min_lon = bbox.min_lon.min(point[0]);
        bbox.min_lat = bbox.min_lat.min(point[1]);
        bbox.max_lon = bbox.max_lon.max(point[0]);
        bbox.max_lat = bbox.max_lat.max(point[1]);
    }
    Some(bbox)
}

/// Area-weighted centroid of a closed ring.
///
/// Falls back to the vertex average when the ring has (near) zero area.
pub fn polygon_centroid(ring: &[LonLat]) -> Option<LonLat> {
    if ring.is_empty() {
        return None;
    }

    let mut twice_area = 0.0;
    let mut cx = 0.0;
    let mut cy = 0.0;
    for (p, q) in edges(ring) {
        let cross = p[0] * q[1] - q[0] * p[1];
        twice_area += cross;
        cx += (p[0] + q[0]) * cross;
        cy += (p[1] + q[1]) * cross;
    }

    if twice_area.abs() <= EPS_DEG {
        let vertices = open_ring(ring);
        let n = vertices.len() as f64;
        let sum = vertices
            .iter()
            .fold([0.0, 0.0], |acc, p| [acc[0] + p[0], acc[1] + p[1]]);
        return Some([sum[0] / n, sum[1] / n]);
    }

    Some([cx / (3.0 * twice_area), cy / (3.0 * twice_area)])
}

/// Ray casting test; points exactly on an edge may go either way, pair with
/// [`point_on_boundary`] when that matters.
pub fn point_in_polygon(point: LonLat, ring: &[LonLat]) -> bool {
    let vertices = open_ring(ring);
    let n = vertices.len();
    if n < 3 {
        return false;
    }

    let (x, y) = (point[0], point[1]);
    let mut inside = false;
    let mut j = n - 1;
    for i in 0..n {
        let (xi, yi) = (vertices[i][0], vertices[i][1]);
        let (xj, yj) = (vertices[j][0], vertices[j][1]);

        if ((yi > y) != (yj > y)) && (x < (xj - xi) * (y - yi) / (yj - yi) + xi) {
            inside = !inside;
        }
        j = i;
    }

    inside
}

pub fn point_on_boundary(point: LonLat, ring: &[LonLat]) -> bool {
    edges(ring).any(|(a, b)| distance_to_segment(point, a, b) <= EPS_DEG)
}

/// Minimum distance from a point to segment `a`-`b` in coordinate space.
pub fn distance_to_segment(point: LonLat, a: LonLat, b: LonLat) -> f64 {
    let sx = b[0] - a[0];
    let sy = b[1] - a[1];
    let px = point[0] - a[0];
    let py = point[1] - a[1];

    let seg_len_sq = sx * sx + sy * sy;
    if seg_len_sq <= f64::EPSILON {
        // Segment is essentially a point
        return (px * px + py * py).sqrt();
    }

    // Project point onto segment line: t = ((P-A) · (B-A)) / |B-A|²
    let t = ((px * sx + py * sy) / seg_len_sq).clamp(0.0, 1.0);
    let dx = px - t * sx;
    let dy = py - t * sy;
    (dx * dx + dy * dy).sqrt()
}

pub fn segments_intersect_2d(a1: LonLat, a2: LonLat, b1: LonLat, b2: LonLat) -> bool {
    fn orient(p: LonLat, q: LonLat, r: LonLat) -> f64 {
        (q[0] - p[0]) * (r[1] - p[1]) - (q[1] - p[1]) * (r[0] - p[0])
    }

    fn within(a: f64, b: f64, value: f64) -> bool {
        let min = a.min(b) - EPS_DEG;
        let max = a.max(b) + EPS_DEG;
        value >= min && value <= max
    }

    fn on_segment(p: LonLat, q: LonLat, r: LonLat) -> bool {
        within(p[0], q[0], r[0]) && within(p[1], q[1], r[1])
    }

    let o1 = orient(a1, a2, b1);
    let o2 = orient(a1, a2, b2);
    let o3 = orient(b1, b2, a1);
    let o4 = orient(b1, b2, a2);

    if o1.abs() <= EPS_DEG && on_segment(a1, a2, b1) {
        return true;
    }
    if o2.abs() <= EPS_DEG && on_segment(a1, a2, b2) {
        return true;
    }
    if o3.abs() <= EPS_DEG && on_segment(b1, b2, a1) {
        return true;
    }
    if o4.abs() <= EPS_DEG && on_segment(b1, b2, a2) {
        return true;
    }

    let a_crosses = (o1 > EPS_DEG && o2 < -EPS_DEG) || (o1 < -EPS_DEG && o2 > EPS_DEG);
    let b_crosses = (o3 > EPS_DEG && o4 < -EPS_DEG) || (o3 < -EPS_DEG && o4 > EPS_DEG);
    a_crosses && b_crosses
}

/// True if any part of the path touches the closed polygon (interior or boundary).
pub fn path_intersects_polygon(path: &[LonLat], ring: &[LonLat]) -> bool {
    if open_ring(ring).len() < 3 {
        return false;
    }

    if path
        .iter()
        .any(|p| point_in_polygon(*p, ring) || point_on_boundary(*p, ring))
    {
        return true;
    }

    path.windows(2).any(|pair| {
        edges(ring).any(|(c, d)| segments_intersect_2d(pair[0], pair[1], c, d))
    })
}

/// Length of the part of `path` lying inside or on the polygon, in coordinate space.
pub fn length_inside_polygon(path: &[LonLat], ring: &[LonLat]) -> f64 {
    if open_ring(ring).len() < 3 {
        return 0.0;
    }
    path.windows(2)
        .map(|pair| segment_length_inside(pair[0], pair[1], ring))
        .sum()
}

fn segment_length_inside(a: LonLat, b: LonLat, ring: &[LonLat]) -> f64 {
    let seg_len = planar_distance(a, b);
    if seg_len <= f64::EPSILON {
        return 0.0;
    }

    let dir = [b[0] - a[0], b[1] - a[1]];
    let mut cuts = vec![0.0, 1.0];

    for (c, d) in edges(ring) {
        let edge = [d[0] - c[0], d[1] - c[1]];
        let ac = [c[0] - a[0], c[1] - a[1]];
        let denom = cross(dir, edge);

        if denom.abs() <= f64::EPSILON {
            // Parallel; only collinear overlaps contribute cut points
            if cross(ac, dir).abs() <= EPS_DEG * seg_len {
                let len_sq = seg_len * seg_len;
                for p in [c, d] {
                    let t = ((p[0] - a[0]) * dir[0] + (p[1] - a[1]) * dir[1]) / len_sq;
                    if (0.0..=1.0).contains(&t) {
                        cuts.push(t);
                    }
                }
            }
            continue;
        }

        let t = cross(ac, edge) / denom;
        let u = cross(ac, dir) / denom;
        if (-EPS_DEG..=1.0 + EPS_DEG).contains(&t) && (-EPS_DEG..=1.0 + EPS_DEG).contains(&u) {
            cuts.push(t.clamp(0.0, 1.0));
        }
    }

    cuts.sort_by(|x, y| x.total_cmp(y));
    cuts.dedup_by(|x, y| (*x - *y).abs() <= f64::EPSILON);

    cuts.windows(2)
        .filter(|w| w[1] - w[0] > f64::EPSILON)
        .filter(|w| {
            let mid = (w[0] + w[1]) / 2.0;
            let m = [a[0] + dir[0] * mid, a[1] + dir[1] * mid];
            point_in_polygon(m, ring) || point_on_boundary(m, ring)
        })
        .map(|w| (w[1] - w[0]) * seg_len)
        .sum()
}

fn cross(u: [f64; 2], v: [f64; 2]) -> f64 {
    u[0] * v[1] - u[1] * v[0]
}

/// Ring without the duplicated closing vertex.
fn open_ring(ring: &[LonLat]) -> &[LonLat] {
    match (ring.first(), ring.last()) {
        (Some(first), Some(last)) if ring.len() > 1 && first == last => &ring[..ring.len() - 1],
        _ => ring,
    }
}

/// Edges of a ring, closing it implicitly when the last vertex differs from the first.
fn edges(ring: &[LonLat]) -> impl Iterator<Item = (LonLat, LonLat)> + '_ {
    let vertices = open_ring(ring);
    let n = vertices.len();
    let count = if n < 2 { 0 } else { n };
    (0..count).map(move |i| (vertices[i], vertices[(i + 1) % n]))
}

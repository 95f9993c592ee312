//! Path generator seam and an offline straight-line implementation.

use crate::error::PathGenerationError;
use crate::models::{LonLat, RoutePath};
use crate::spatial::path_length_nm;

/// Produces a navigable path between two points.
///
/// Calls are blocking request/response; any timeout policy belongs to the
/// implementation.
pub trait PathGenerator {
    fn generate(&self, origin: LonLat, destination: LonLat) -> Result<RoutePath, PathGenerationError>;
}

impl<T: PathGenerator + ?Sized> PathGenerator for &T {
    fn generate(&self, origin: LonLat, destination: LonLat) -> Result<RoutePath, PathGenerationError> {
        (**self).generate(origin, destination)
    }
}

impl<T: PathGenerator + ?Sized> PathGenerator for Box<T> {
    fn generate(&self, origin: LonLat, destination: LonLat) -> Result<RoutePath, PathGenerationError> {
        (**self).generate(origin, destination)
    }
}

impl<T: PathGenerator + ?Sized> PathGenerator for std::sync::Arc<T> {
    fn generate(&self, origin: LonLat, destination: LonLat) -> Result<RoutePath, PathGenerationError> {
        (**self).generate(origin, destination)
    }
}

const DEFAULT_SEGMENTS: usize = 16;
const DEFAULT_SPEED_KNOTS: f64 = 24.0;

/// Straight line in coordinate space, densified into equal steps.
///
/// Does not know about land; it stands in for a real sea router when none
/// is configured.
#[derive(Debug, Clone)]
pub struct DirectLineGenerator {
    pub segments: usize,
    pub speed_knots: f64,
}

impl Default for DirectLineGenerator {
    fn default() -> Self {
        Self {
            segments: DEFAULT_SEGMENTS,
            speed_knots: DEFAULT_SPEED_KNOTS,
        }
    }
}

impl PathGenerator for DirectLineGenerator {
    fn generate(&self, origin: LonLat, destination: LonLat) -> Result<RoutePath, PathGenerationError> {
        let valid = |p: LonLat| {
            p[0].is_finite() && p[1].is_finite() && (-180.0..=180.0).contains(&p[0]) && (-90.0..=90.0).contains(&p[1])
        };
        if !valid(origin) || !valid(destination) {
            return Err(PathGenerationError::NoRoute { origin, destination });
        }

        let steps = self.segments.max(1);
        let coordinates: Vec<LonLat> = (0..=steps)
            .map(|i| {
                if i == steps {
                    return destination;
                }
                let t = i as f64 / steps as f64;
                [
                    origin[0] + (destination[0] - origin[0]) * t,
                    origin[1] + (destination[1] - origin[1]) * t,
                ]
            })
            .collect();

        let length = path_length_nm(&coordinates);
        let duration_hours = if self.speed_knots > 0.0 {
            length / self.speed_knots
        } else {
            0.0
        };
        Ok(RoutePath::new(coordinates, length, duration_hours))
    }
}

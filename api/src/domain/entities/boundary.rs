//! Boundary domain types
//!
//! A boundary is an ordered sequence of GPS points describing a producer's
//! plot outline. Point order is significant: it defines the polygon winding
//! used for area computation.

use serde::{Deserialize, Serialize};

/// Minimum number of points for a valid boundary polygon
pub const MIN_BOUNDARY_POINTS: usize = 3;

/// A single GPS vertex of a plot boundary
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundaryPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl BoundaryPoint {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

impl std::fmt::Display for BoundaryPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.6}, {:.6}", self.latitude, self.longitude)
    }
}

/// Render a boundary as the semicolon-joined coordinate string used in
/// document geolocation sections.
pub fn format_coordinates(points: &[BoundaryPoint]) -> String {
    points
        .iter()
        .map(|p| p.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn point_display_uses_six_decimals() {
        let p = BoundaryPoint::new(6.4281, -9.4295);
        assert_eq!(p.to_string(), "6.428100, -9.429500");
    }

    #[test]
    fn coordinates_join_with_semicolons() {
        let points = vec![BoundaryPoint::new(1.0, 2.0), BoundaryPoint::new(3.0, 4.0)];
        assert_eq!(
            format_coordinates(&points),
            "1.000000, 2.000000; 3.000000, 4.000000"
        );
    }
}

//! Geometry utilities
//!
//! Pure polygon math over GPS degree-space. Area uses the Shoelace formula
//! with a flat degree-to-meters conversion; boundaries are taken as-is with
//! no simple-polygon validation, so degenerate or self-intersecting
//! polygons produce whatever the formula yields.

use serde::Serialize;

use crate::domain::entities::BoundaryPoint;

/// Approximate meters per degree at the equator
pub const METERS_PER_DEGREE: f64 = 111_320.0;

const SQ_METERS_PER_HECTARE: f64 = 10_000.0;

/// Shoelace area of the boundary polygon, converted to hectares.
///
/// Returns 0.0 for fewer than 3 points.
pub fn polygon_area_hectares(points: &[BoundaryPoint]) -> f64 {
    if points.len() < 3 {
        return 0.0;
    }

    let mut twice_area = 0.0;
    for i in 0..points.len() {
        let j = (i + 1) % points.len();
        twice_area += (points[j].longitude - points[i].longitude)
            * (points[j].latitude + points[i].latitude);
    }
    let sq_degrees = (twice_area / 2.0).abs();

    sq_degrees * METERS_PER_DEGREE * METERS_PER_DEGREE / SQ_METERS_PER_HECTARE
}

/// Axis-aligned bounding box in degree-space
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BoundingBox {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
}

impl BoundingBox {
    pub const fn new(min_lat: f64, max_lat: f64, min_lon: f64, max_lon: f64) -> Self {
        Self {
            min_lat,
            max_lat,
            min_lon,
            max_lon,
        }
    }

    /// Exclusive-bounds containment test, matching the zone overlap checks
    /// of the upstream mapper.
    pub fn contains(&self, point: &BoundaryPoint) -> bool {
        point.latitude > self.min_lat
            && point.latitude < self.max_lat
            && point.longitude > self.min_lon
            && point.longitude < self.max_lon
    }
}

//! Test fixtures
//!
//! Factory functions for creating test data with sensible defaults.
//! Each fixture creates a valid entity that tests can customize.

use chrono::Utc;

use crate::domain::classifier;
use crate::domain::entities::{
    Assessment, AssessmentId, BoundaryPoint, ExporterMetadata, ProducerId, ProducerRecord,
};
use crate::domain::geometry;

/// Boundary overlapping the Upper Lofa high-risk forest blocks
pub fn high_risk_boundary() -> Vec<BoundaryPoint> {
    vec![
        BoundaryPoint::new(6.430, -9.38),
        BoundaryPoint::new(6.431, -9.379),
        BoundaryPoint::new(6.432, -9.381),
    ]
}

/// Boundary well clear of every high-risk zone
pub fn low_risk_boundary() -> Vec<BoundaryPoint> {
    vec![
        BoundaryPoint::new(6.50, -9.50),
        BoundaryPoint::new(6.51, -9.49),
        BoundaryPoint::new(6.52, -9.51),
    ]
}

/// Create a test producer with mapped farms and GPS on file
pub fn test_producer(id: &str) -> ProducerRecord {
    ProducerRecord {
        id: ProducerId::from(id),
        name: format!("Producer {}", id),
        county: "Lofa County".to_string(),
        district: "Voinjama".to_string(),
        gps_coordinates: Some("6.4281, -9.4295".to_string()),
        farm_ids: vec![format!("{}-FARM-1", id), format!("{}-FARM-2", id)],
        commodity: Some("Cocoa".to_string()),
        farm_size_hectares: Some(12.5),
        registered_at: Utc::now(),
    }
}

/// Create a test assessment by running the real classifier on a boundary
pub fn test_assessment_with_boundary(
    producer_id: &ProducerId,
    boundary: Vec<BoundaryPoint>,
) -> Assessment {
    let determination = classifier::classify(&boundary);
    let area_hectares = geometry::polygon_area_hectares(&boundary);
    Assessment {
        id: AssessmentId::new(),
        producer_id: producer_id.clone(),
        boundary,
        area_hectares,
        determination,
        created_at: Utc::now(),
    }
}

/// Create a test assessment over the high-risk boundary
pub fn test_assessment(producer_id: &ProducerId) -> Assessment {
    test_assessment_with_boundary(producer_id, high_risk_boundary())
}

/// Create test exporter and shipment metadata
pub fn test_exporter() -> ExporterMetadata {
    ExporterMetadata {
        exporter_id: "EXP-001".to_string(),
        exporter_name: "Atlantic Commodities Ltd".to_string(),
        exporter_registration: "LACRA-REG-2024-0117".to_string(),
        shipment_id: "SHIP-2025-0042".to_string(),
        destination: "Rotterdam, Netherlands".to_string(),
        commodity: "Cocoa beans".to_string(),
        hs_code: "1801.00".to_string(),
        total_weight: "24,000 kg".to_string(),
        harvest_period: "2024-10 to 2025-01".to_string(),
    }
}

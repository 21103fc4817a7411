//! Risk classifier
//!
//! Maps a boundary polygon to a risk determination against the fixed zone
//! table. Pure and deterministic: identical point sequences always produce
//! identical determinations.
//!
//! The classification is binary (low or high) even though the risk-level
//! type carries a `standard` tier; this stands in for real satellite
//! processing and any replacement must preserve the output contract shape.

use chrono::NaiveDate;

use crate::domain::entities::{BiodiversityImpact, BoundaryPoint, RiskDetermination, RiskLevel};
use crate::domain::zones::{find_zone, high_risk_zones};

fn forest_loss_reference_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2021, 3, 15).expect("valid reference date")
}

fn last_forest_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2019, 12, 31).expect("valid cutoff date")
}

fn documentation_required() -> Vec<String> {
    [
        "Due diligence statement",
        "Geolocation coordinates",
        "Supply chain traceability",
        "Risk assessment report",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

/// Determination emitted when any boundary point overlaps a high-risk zone
fn high_risk_profile() -> RiskDetermination {
    RiskDetermination {
        risk_level: RiskLevel::High,
        compliance_score: 45,
        deforestation_risk: 85,
        forest_loss_detected: true,
        forest_loss_date: Some(forest_loss_reference_date()),
        forest_cover_change: -15.3,
        biodiversity_impact: BiodiversityImpact::Significant,
        carbon_stock_loss: 2.4,
        last_forest_date: last_forest_date(),
        documentation_required: documentation_required(),
        recommendations: [
            "Enhanced due diligence required",
            "Third-party verification needed",
            "Implement forest monitoring system",
            "Develop conservation plan",
        ]
        .into_iter()
        .map(String::from)
        .collect(),
    }
}

/// Determination emitted when no boundary point overlaps a high-risk zone
fn low_risk_profile() -> RiskDetermination {
    RiskDetermination {
        risk_level: RiskLevel::Low,
        compliance_score: 92,
        deforestation_risk: 12,
        forest_loss_detected: false,
        forest_loss_date: None,
        forest_cover_change: 2.1,
        biodiversity_impact: BiodiversityImpact::Minimal,
        carbon_stock_loss: 0.0,
        last_forest_date: last_forest_date(),
        documentation_required: documentation_required(),
        recommendations: [
            "Standard due diligence applies",
            "Annual monitoring recommended",
            "Maintain current practices",
        ]
        .into_iter()
        .map(String::from)
        .collect(),
    }
}

/// Classify a boundary against the high-risk zone set.
///
/// A single point inside any high-risk zone is sufficient to flag overlap;
/// full polygon/zone intersection is not computed.
pub fn classify(points: &[BoundaryPoint]) -> RiskDetermination {
    let overlap = points
        .iter()
        .any(|p| find_zone(p, high_risk_zones()).is_some());

    if overlap {
        high_risk_profile()
    } else {
        low_risk_profile()
    }
}

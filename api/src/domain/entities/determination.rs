//! Risk determination domain types
//!
//! A determination is computed once per boundary submission and is immutable
//! afterwards: a new submission produces a new assessment record, never an
//! in-place update.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::boundary::BoundaryPoint;
use super::producer::ProducerId;

/// Unique identifier for a stored boundary assessment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AssessmentId(pub Uuid);

impl AssessmentId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for AssessmentId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for AssessmentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// EUDR risk tier
///
/// `Standard` exists in the regulation's vocabulary but is never produced by
/// the current classifier, which is two-valued.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Standard,
    High,
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RiskLevel::Low => write!(f, "low"),
            RiskLevel::Standard => write!(f, "standard"),
            RiskLevel::High => write!(f, "high"),
        }
    }
}

impl std::str::FromStr for RiskLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "low" => Ok(RiskLevel::Low),
            "standard" => Ok(RiskLevel::Standard),
            "high" => Ok(RiskLevel::High),
            _ => Err(format!("Unknown risk level: {}", s)),
        }
    }
}

/// Biodiversity impact grading surfaced in the deforestation report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BiodiversityImpact {
    Minimal,
    Moderate,
    Significant,
    Severe,
}

impl std::fmt::Display for BiodiversityImpact {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BiodiversityImpact::Minimal => write!(f, "minimal"),
            BiodiversityImpact::Moderate => write!(f, "moderate"),
            BiodiversityImpact::Significant => write!(f, "significant"),
            BiodiversityImpact::Severe => write!(f, "severe"),
        }
    }
}

impl std::str::FromStr for BiodiversityImpact {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "minimal" => Ok(BiodiversityImpact::Minimal),
            "moderate" => Ok(BiodiversityImpact::Moderate),
            "significant" => Ok(BiodiversityImpact::Significant),
            "severe" => Ok(BiodiversityImpact::Severe),
            _ => Err(format!("Unknown biodiversity impact: {}", s)),
        }
    }
}

/// The classifier's output for one boundary submission
///
/// Invariant: `forest_loss_detected` is true if and only if
/// `forest_loss_date` is present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskDetermination {
    pub risk_level: RiskLevel,
    /// 0..=100
    pub compliance_score: i32,
    /// 0..=100
    pub deforestation_risk: i32,
    pub forest_loss_detected: bool,
    pub forest_loss_date: Option<NaiveDate>,
    /// Percentage change in forest cover over the monitoring window
    pub forest_cover_change: f64,
    pub biodiversity_impact: BiodiversityImpact,
    /// Tonnes CO2
    pub carbon_stock_loss: f64,
    /// Cutoff date for the deforestation-free requirement
    pub last_forest_date: NaiveDate,
    pub documentation_required: Vec<String>,
    pub recommendations: Vec<String>,
}

impl RiskDetermination {
    /// Check the forest-loss invariant
    pub fn is_consistent(&self) -> bool {
        self.forest_loss_detected == self.forest_loss_date.is_some()
    }
}

/// A persisted boundary submission with its computed determination
#[derive(Debug, Clone, Serialize)]
pub struct Assessment {
    pub id: AssessmentId,
    pub producer_id: ProducerId,
    pub boundary: Vec<BoundaryPoint>,
    pub area_hectares: f64,
    pub determination: RiskDetermination,
    pub created_at: DateTime<Utc>,
}

/// Data needed to persist a new assessment
#[derive(Debug, Clone)]
pub struct NewAssessment {
    pub producer_id: ProducerId,
    pub boundary: Vec<BoundaryPoint>,
    pub area_hectares: f64,
    pub determination: RiskDetermination,
}

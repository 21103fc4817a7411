//! Producer domain entity
//!
//! Producer records are owned by the upstream onboarding system; this
//! pipeline treats them as read-only input.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Unique identifier for a producer (upstream-assigned, e.g. "FRM-2024-001")
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProducerId(pub String);

impl ProducerId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for ProducerId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for ProducerId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl std::fmt::Display for ProducerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A producer as seen by the compliance pipeline
#[derive(Debug, Clone, Serialize)]
pub struct ProducerRecord {
    pub id: ProducerId,
    pub name: String,
    pub county: String,
    pub district: String,
    /// Reference GPS position from onboarding; absent until farm mapping completes
    pub gps_coordinates: Option<String>,
    /// Identifiers of the producer's mapped farm plots
    pub farm_ids: Vec<String>,
    /// Primary commodity from the latest harvest records
    pub commodity: Option<String>,
    pub farm_size_hectares: Option<f64>,
    pub registered_at: DateTime<Utc>,
}

impl ProducerRecord {
    /// Whether onboarding produced the farm mapping data pack assembly needs
    pub fn has_mapped_farms(&self) -> bool {
        !self.farm_ids.is_empty() && self.gps_coordinates.is_some()
    }
}

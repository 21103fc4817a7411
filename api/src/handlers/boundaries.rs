//! Boundary submission handlers

use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::domain::entities::{Assessment, BoundaryPoint, ProducerId};
use crate::error::AppError;
use crate::AppState;

/// Request to submit a boundary polygon
#[derive(Debug, Deserialize)]
pub struct SubmitBoundaryRequest {
    pub points: Vec<BoundaryPoint>,
}

/// Response carrying the computed determination
#[derive(Debug, Serialize)]
pub struct AssessmentResponse {
    pub id: String,
    pub producer_id: String,
    pub area_hectares: f64,
    pub risk_level: String,
    pub compliance_score: i32,
    pub deforestation_risk: i32,
    pub forest_loss_detected: bool,
    pub forest_loss_date: Option<String>,
    pub forest_cover_change: f64,
    pub biodiversity_impact: String,
    pub carbon_stock_loss: f64,
    pub last_forest_date: String,
    pub documentation_required: Vec<String>,
    pub recommendations: Vec<String>,
    pub created_at: String,
}

impl From<Assessment> for AssessmentResponse {
    fn from(assessment: Assessment) -> Self {
        let det = assessment.determination;
        AssessmentResponse {
            id: assessment.id.to_string(),
            producer_id: assessment.producer_id.to_string(),
            area_hectares: assessment.area_hectares,
            risk_level: det.risk_level.to_string(),
            compliance_score: det.compliance_score,
            deforestation_risk: det.deforestation_risk,
            forest_loss_detected: det.forest_loss_detected,
            forest_loss_date: det.forest_loss_date.map(|d| d.to_string()),
            forest_cover_change: det.forest_cover_change,
            biodiversity_impact: det.biodiversity_impact.to_string(),
            carbon_stock_loss: det.carbon_stock_loss,
            last_forest_date: det.last_forest_date.to_string(),
            documentation_required: det.documentation_required,
            recommendations: det.recommendations,
            created_at: assessment.created_at.to_rfc3339(),
        }
    }
}

/// POST /producers/:id/boundary
///
/// Submit a boundary polygon and get the persisted determination back.
pub async fn submit_boundary(
    State(state): State<AppState>,
    Path(producer_id): Path<String>,
    Json(request): Json<SubmitBoundaryRequest>,
) -> Result<Json<AssessmentResponse>, AppError> {
    let points: Vec<BoundaryPoint> = request.points;

    let assessment = state
        .risk_service
        .submit_boundary(&ProducerId::from(producer_id), points)
        .await?;

    Ok(Json(assessment.into()))
}

//! Risk assessment service
//!
//! Orchestrates boundary submission: validates the polygon, runs the
//! classifier, computes the area, and persists the resulting assessment.

use std::sync::Arc;

use crate::domain::classifier;
use crate::domain::entities::{
    Assessment, BoundaryPoint, NewAssessment, ProducerId, MIN_BOUNDARY_POINTS,
};
use crate::domain::geometry;
use crate::domain::ports::{AssessmentRepository, ProducerRepository};
use crate::error::DomainError;

pub struct RiskService<PR, AR>
where
    PR: ProducerRepository,
    AR: AssessmentRepository,
{
    producers: Arc<PR>,
    assessments: Arc<AR>,
}

impl<PR, AR> RiskService<PR, AR>
where
    PR: ProducerRepository,
    AR: AssessmentRepository,
{
    pub fn new(producers: Arc<PR>, assessments: Arc<AR>) -> Self {
        Self {
            producers,
            assessments,
        }
    }

    /// Submit a boundary polygon for a producer and persist the resulting
    /// assessment.
    ///
    /// A resubmission creates a new assessment record; earlier ones are
    /// kept for audit.
    pub async fn submit_boundary(
        &self,
        producer_id: &ProducerId,
        points: Vec<BoundaryPoint>,
    ) -> Result<Assessment, DomainError> {
        let producer = self
            .producers
            .find_by_id(producer_id)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("producer {}", producer_id)))?;

        if points.len() < MIN_BOUNDARY_POINTS {
            return Err(DomainError::InsufficientPoints {
                required: MIN_BOUNDARY_POINTS,
                got: points.len(),
            });
        }

        let determination = classifier::classify(&points);
        let area_hectares = geometry::polygon_area_hectares(&points);

        tracing::info!(
            producer_id = %producer.id,
            risk_level = %determination.risk_level,
            area_hectares,
            "boundary assessed"
        );

        self.assessments
            .create(&NewAssessment {
                producer_id: producer.id,
                boundary: points,
                area_hectares,
                determination,
            })
            .await
    }

    /// Most recent assessment for a producer
    pub async fn latest_assessment(
        &self,
        producer_id: &ProducerId,
    ) -> Result<Option<Assessment>, DomainError> {
        self.assessments.find_latest_by_producer(producer_id).await
    }
}

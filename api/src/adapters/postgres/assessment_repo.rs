//! PostgreSQL adapter for AssessmentRepository

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use crate::domain::entities::{Assessment, AssessmentId, NewAssessment, ProducerId};
use crate::domain::ports::AssessmentRepository;
use crate::entity::assessments;
use crate::error::DomainError;

/// PostgreSQL implementation of AssessmentRepository
pub struct PostgresAssessmentRepository {
    db: DatabaseConnection,
}

impl PostgresAssessmentRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl AssessmentRepository for PostgresAssessmentRepository {
    async fn create(&self, new_assessment: &NewAssessment) -> Result<Assessment, DomainError> {
        let id = Uuid::new_v4();
        let now = Utc::now().fixed_offset();

        let boundary = serde_json::to_value(&new_assessment.boundary)
            .map_err(|e| DomainError::Internal(e.to_string()))?;
        let determination = serde_json::to_value(&new_assessment.determination)
            .map_err(|e| DomainError::Internal(e.to_string()))?;

        let model = assessments::ActiveModel {
            id: Set(id),
            producer_id: Set(new_assessment.producer_id.to_string()),
            boundary: Set(boundary),
            area_hectares: Set(new_assessment.area_hectares),
            determination: Set(determination),
            created_at: Set(now),
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        to_domain(result)
    }

    async fn find_by_id(&self, id: &AssessmentId) -> Result<Option<Assessment>, DomainError> {
        let result = assessments::Entity::find_by_id(id.0)
            .one(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        result.map(to_domain).transpose()
    }

    async fn find_latest_by_producer(
        &self,
        producer_id: &ProducerId,
    ) -> Result<Option<Assessment>, DomainError> {
        let result = assessments::Entity::find()
            .filter(assessments::Column::ProducerId.eq(producer_id.as_str()))
            .order_by_desc(assessments::Column::CreatedAt)
            .one(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        result.map(to_domain).transpose()
    }
}

/// Convert SeaORM model to domain entity.
///
/// The boundary and determination columns are JSON; a row that does not
/// decode is corrupt data, not a missing row.
fn to_domain(model: assessments::Model) -> Result<Assessment, DomainError> {
    Ok(Assessment {
        id: AssessmentId(model.id),
        producer_id: ProducerId::from(model.producer_id),
        boundary: serde_json::from_value(model.boundary)
            .map_err(|e| DomainError::Database(format!("bad boundary json: {}", e)))?,
        area_hectares: model.area_hectares,
        determination: serde_json::from_value(model.determination)
            .map_err(|e| DomainError::Database(format!("bad determination json: {}", e)))?,
        created_at: model.created_at.with_timezone(&Utc),
    })
}

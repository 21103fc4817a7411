//! PostgreSQL adapter for ProducerRepository

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{DatabaseConnection, EntityTrait, QueryOrder};

use crate::domain::entities::{ProducerId, ProducerRecord};
use crate::domain::ports::ProducerRepository;
use crate::entity::producers;
use crate::error::DomainError;

/// PostgreSQL implementation of ProducerRepository
pub struct PostgresProducerRepository {
    db: DatabaseConnection,
}

impl PostgresProducerRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ProducerRepository for PostgresProducerRepository {
    async fn find_by_id(&self, id: &ProducerId) -> Result<Option<ProducerRecord>, DomainError> {
        let result = producers::Entity::find_by_id(id.as_str())
            .one(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.map(|m| m.into()))
    }

    async fn list_all(&self) -> Result<Vec<ProducerRecord>, DomainError> {
        let results = producers::Entity::find()
            .order_by_asc(producers::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(results.into_iter().map(|m| m.into()).collect())
    }
}

/// Convert SeaORM model to domain entity
impl From<producers::Model> for ProducerRecord {
    fn from(model: producers::Model) -> Self {
        ProducerRecord {
            id: ProducerId::from(model.id),
            name: model.name,
            county: model.county,
            district: model.district,
            gps_coordinates: model.gps_coordinates,
            farm_ids: serde_json::from_value(model.farm_ids).unwrap_or_default(),
            commodity: model.commodity,
            farm_size_hectares: model.farm_size_hectares,
            registered_at: model.registered_at.with_timezone(&Utc),
        }
    }
}

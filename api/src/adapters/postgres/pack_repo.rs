//! PostgreSQL adapter for PackRepository

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use crate::domain::entities::{
    AssessmentId, AuditDecision, AuditEntry, CompliancePack, NewCompliancePack, PackId,
    PackStatus, ProducerId,
};
use crate::domain::ports::PackRepository;
use crate::entity::{compliance_packs, pack_audit_entries};
use crate::error::DomainError;

/// PostgreSQL implementation of PackRepository
pub struct PostgresPackRepository {
    db: DatabaseConnection,
}

impl PostgresPackRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn audit_trail(&self, id: &PackId) -> Result<Vec<AuditEntry>, DomainError> {
        let entries = pack_audit_entries::Entity::find()
            .filter(pack_audit_entries::Column::PackId.eq(id.as_str()))
            .order_by_asc(pack_audit_entries::Column::RecordedAt)
            .all(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(entries
            .into_iter()
            .map(|m| AuditEntry {
                actor: m.actor,
                decision: m
                    .decision
                    .parse()
                    .unwrap_or(AuditDecision::Generated),
                notes: m.notes,
                at: m.recorded_at.with_timezone(&Utc),
            })
            .collect())
    }

    async fn with_trail(
        &self,
        model: compliance_packs::Model,
    ) -> Result<CompliancePack, DomainError> {
        let audit_trail = self.audit_trail(&PackId::from(model.pack_id.clone())).await?;
        to_domain(model, audit_trail)
    }
}

#[async_trait]
impl PackRepository for PostgresPackRepository {
    async fn create(&self, new_pack: &NewCompliancePack) -> Result<CompliancePack, DomainError> {
        let now = Utc::now().fixed_offset();

        let exporter = serde_json::to_value(&new_pack.exporter)
            .map_err(|e| DomainError::Internal(e.to_string()))?;

        let model = compliance_packs::ActiveModel {
            pack_id: Set(new_pack.pack_id.to_string()),
            producer_id: Set(new_pack.producer_id.to_string()),
            assessment_id: Set(new_pack.assessment_id.0),
            exporter: Set(exporter),
            status: Set(new_pack.status.to_string()),
            storage_expiry_date: Set(new_pack.storage_expiry_date.fixed_offset()),
            generated_at: Set(now),
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        to_domain(result, Vec::new())
    }

    async fn find_by_id(&self, id: &PackId) -> Result<Option<CompliancePack>, DomainError> {
        let result = compliance_packs::Entity::find_by_id(id.as_str())
            .one(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        match result {
            Some(model) => Ok(Some(self.with_trail(model).await?)),
            None => Ok(None),
        }
    }

    async fn list_all(&self) -> Result<Vec<CompliancePack>, DomainError> {
        let results = compliance_packs::Entity::find()
            .order_by_desc(compliance_packs::Column::GeneratedAt)
            .all(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        let mut packs = Vec::with_capacity(results.len());
        for model in results {
            packs.push(self.with_trail(model).await?);
        }
        Ok(packs)
    }

    async fn list_by_status(
        &self,
        status: PackStatus,
    ) -> Result<Vec<CompliancePack>, DomainError> {
        let results = compliance_packs::Entity::find()
            .filter(compliance_packs::Column::Status.eq(status.to_string()))
            .order_by_desc(compliance_packs::Column::GeneratedAt)
            .all(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        let mut packs = Vec::with_capacity(results.len());
        for model in results {
            packs.push(self.with_trail(model).await?);
        }
        Ok(packs)
    }

    async fn transition_status(
        &self,
        id: &PackId,
        expected: PackStatus,
        next: PackStatus,
    ) -> Result<bool, DomainError> {
        // Conditional UPDATE; rows_affected == 0 means the status moved
        // under us (or the pack is gone) and the caller re-reads.
        let result = compliance_packs::Entity::update_many()
            .col_expr(
                compliance_packs::Column::Status,
                Expr::value(next.to_string()),
            )
            .filter(compliance_packs::Column::PackId.eq(id.as_str()))
            .filter(compliance_packs::Column::Status.eq(expected.to_string()))
            .exec(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.rows_affected == 1)
    }

    async fn append_audit(&self, id: &PackId, entry: &AuditEntry) -> Result<(), DomainError> {
        let model = pack_audit_entries::ActiveModel {
            id: Set(Uuid::new_v4()),
            pack_id: Set(id.to_string()),
            actor: Set(entry.actor.clone()),
            decision: Set(entry.decision.to_string()),
            notes: Set(entry.notes.clone()),
            recorded_at: Set(entry.at.fixed_offset()),
        };

        model
            .insert(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(())
    }

    async fn delete(&self, id: &PackId) -> Result<(), DomainError> {
        pack_audit_entries::Entity::delete_many()
            .filter(pack_audit_entries::Column::PackId.eq(id.as_str()))
            .exec(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        compliance_packs::Entity::delete_by_id(id.as_str())
            .exec(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(())
    }
}

/// Convert SeaORM model plus its audit trail to the domain aggregate
fn to_domain(
    model: compliance_packs::Model,
    audit_trail: Vec<AuditEntry>,
) -> Result<CompliancePack, DomainError> {
    Ok(CompliancePack {
        pack_id: PackId::from(model.pack_id),
        producer_id: ProducerId::from(model.producer_id),
        assessment_id: AssessmentId(model.assessment_id),
        exporter: serde_json::from_value(model.exporter)
            .map_err(|e| DomainError::Database(format!("bad exporter json: {}", e)))?,
        status: model
            .status
            .parse()
            .unwrap_or(PackStatus::PendingApproval),
        storage_expiry_date: model.storage_expiry_date.with_timezone(&Utc),
        generated_at: model.generated_at.with_timezone(&Utc),
        audit_trail,
    })
}

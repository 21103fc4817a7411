//! PostgreSQL adapter for DocumentRepository

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use crate::domain::entities::{
    DocumentId, DocumentRecord, DocumentType, NewDocumentRecord, PackId, RenderedArtifact,
};
use crate::domain::ports::DocumentRepository;
use crate::entity::compliance_documents;
use crate::error::DomainError;
use crate::render::DOCUMENT_CONTENT_TYPE;

/// PostgreSQL implementation of DocumentRepository
pub struct PostgresDocumentRepository {
    db: DatabaseConnection,
}

impl PostgresDocumentRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl DocumentRepository for PostgresDocumentRepository {
    async fn create(
        &self,
        new_document: &NewDocumentRecord,
    ) -> Result<DocumentRecord, DomainError> {
        let id = Uuid::new_v4();
        let now = Utc::now().fixed_offset();

        let model = compliance_documents::ActiveModel {
            id: Set(id),
            pack_id: Set(new_document.pack_id.to_string()),
            document_type: Set(new_document.document_type.to_string()),
            title: Set(new_document.title.clone()),
            reference_number: Set(new_document.reference_number.clone()),
            issued_by: Set(new_document.issued_by.clone()),
            content: Set(new_document.artifact.content.clone()),
            content_type: Set(new_document.artifact.content_type.to_string()),
            file_name: Set(new_document.artifact.file_name.clone()),
            created_at: Set(now),
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.into())
    }

    async fn find_by_id(&self, id: &DocumentId) -> Result<Option<DocumentRecord>, DomainError> {
        let result = compliance_documents::Entity::find_by_id(id.0)
            .one(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.map(|m| m.into()))
    }

    async fn find_by_pack(&self, pack_id: &PackId) -> Result<Vec<DocumentRecord>, DomainError> {
        let results = compliance_documents::Entity::find()
            .filter(compliance_documents::Column::PackId.eq(pack_id.as_str()))
            .order_by_asc(compliance_documents::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        let mut documents: Vec<DocumentRecord> =
            results.into_iter().map(|m| m.into()).collect();
        documents.sort_by_key(|d| {
            DocumentType::ALL
                .iter()
                .position(|t| *t == d.document_type)
                .unwrap_or(usize::MAX)
        });
        Ok(documents)
    }

    async fn delete_by_pack(&self, pack_id: &PackId) -> Result<(), DomainError> {
        compliance_documents::Entity::delete_many()
            .filter(compliance_documents::Column::PackId.eq(pack_id.as_str()))
            .exec(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(())
    }
}

/// Convert SeaORM model to domain entity.
///
/// Only plain text is produced today, so the stored content type maps
/// back onto the renderer's constant.
impl From<compliance_documents::Model> for DocumentRecord {
    fn from(model: compliance_documents::Model) -> Self {
        DocumentRecord {
            id: DocumentId(model.id),
            pack_id: PackId::from(model.pack_id),
            document_type: model
                .document_type
                .parse()
                .unwrap_or(DocumentType::CoverSheet),
            title: model.title,
            reference_number: model.reference_number,
            issued_by: model.issued_by,
            artifact: RenderedArtifact {
                content: model.content,
                content_type: DOCUMENT_CONTENT_TYPE,
                file_name: model.file_name,
            },
            created_at: model.created_at.with_timezone(&Utc),
        }
    }
}

//! Repository port traits
//!
//! These traits define the interface for data persistence.
//! Implementations are provided by adapters (e.g., PostgreSQL).

use async_trait::async_trait;

use crate::domain::entities::{
    Assessment, AssessmentId, AuditEntry, CompliancePack, DocumentId, DocumentRecord,
    NewAssessment, NewCompliancePack, NewDocumentRecord, PackId, PackStatus, ProducerId,
    ProducerRecord,
};
use crate::error::DomainError;

/// Repository for producer records
///
/// Producers are registered elsewhere in the platform; this port is
/// read-only.
#[async_trait]
pub trait ProducerRepository: Send + Sync {
    /// Find a producer by ID
    async fn find_by_id(&self, id: &ProducerId) -> Result<Option<ProducerRecord>, DomainError>;

    /// List all registered producers
    async fn list_all(&self) -> Result<Vec<ProducerRecord>, DomainError>;
}

/// Repository for boundary assessments
#[async_trait]
pub trait AssessmentRepository: Send + Sync {
    /// Persist a new assessment
    async fn create(&self, assessment: &NewAssessment) -> Result<Assessment, DomainError>;

    /// Find an assessment by ID
    async fn find_by_id(&self, id: &AssessmentId) -> Result<Option<Assessment>, DomainError>;

    /// Most recent assessment for a producer, if any
    async fn find_latest_by_producer(
        &self,
        producer_id: &ProducerId,
    ) -> Result<Option<Assessment>, DomainError>;
}

/// Repository for compliance packs
#[async_trait]
pub trait PackRepository: Send + Sync {
    /// Persist a newly assembled pack
    async fn create(&self, pack: &NewCompliancePack) -> Result<CompliancePack, DomainError>;

    /// Find a pack by ID, with its full audit trail
    async fn find_by_id(&self, id: &PackId) -> Result<Option<CompliancePack>, DomainError>;

    /// All packs, most recent first
    async fn list_all(&self) -> Result<Vec<CompliancePack>, DomainError>;

    /// Packs in the given status, most recent first
    async fn list_by_status(&self, status: PackStatus) -> Result<Vec<CompliancePack>, DomainError>;

    /// Compare-and-swap status transition.
    ///
    /// Moves the pack from `expected` to `next` atomically; returns false if
    /// the pack was not in `expected` (lost race or illegal call), in which
    /// case nothing changes.
    async fn transition_status(
        &self,
        id: &PackId,
        expected: PackStatus,
        next: PackStatus,
    ) -> Result<bool, DomainError>;

    /// Append one entry to the pack's audit trail
    async fn append_audit(&self, id: &PackId, entry: &AuditEntry) -> Result<(), DomainError>;

    /// Delete a pack row and its audit entries
    async fn delete(&self, id: &PackId) -> Result<(), DomainError>;
}

/// Repository for generated documents
#[async_trait]
pub trait DocumentRepository: Send + Sync {
    /// Persist a rendered document
    async fn create(&self, document: &NewDocumentRecord) -> Result<DocumentRecord, DomainError>;

    /// Find a document by ID
    async fn find_by_id(&self, id: &DocumentId) -> Result<Option<DocumentRecord>, DomainError>;

    /// All documents belonging to a pack, in presentation order
    async fn find_by_pack(&self, pack_id: &PackId) -> Result<Vec<DocumentRecord>, DomainError>;

    /// Delete every document belonging to a pack
    async fn delete_by_pack(&self, pack_id: &PackId) -> Result<(), DomainError>;
}

//! Mock implementations of port traits
//!
//! In-memory implementations backing the service and integration tests.
//! Behavior mirrors the Postgres adapters, including the compare-and-set
//! status transition.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use chrono::Utc;

use crate::domain::entities::{
    Assessment, AssessmentId, AuditEntry, CompliancePack, DocumentId, DocumentRecord,
    DocumentType, NewAssessment, NewCompliancePack, NewDocumentRecord, PackId, PackStatus,
    ProducerId, ProducerRecord,
};
use crate::domain::ports::{
    AssessmentRepository, DocumentRepository, PackRepository, ProducerRepository,
};
use crate::error::DomainError;

// ============================================================================
// In-Memory Producer Repository
// ============================================================================

#[derive(Default)]
pub struct InMemoryProducerRepository {
    producers: Arc<RwLock<HashMap<ProducerId, ProducerRecord>>>,
}

impl InMemoryProducerRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate with a producer for testing
    pub fn with_producer(self, producer: ProducerRecord) -> Self {
        {
            let mut producers = self.producers.write().unwrap();
            producers.insert(producer.id.clone(), producer);
        }
        self
    }
}

#[async_trait]
impl ProducerRepository for InMemoryProducerRepository {
    async fn find_by_id(&self, id: &ProducerId) -> Result<Option<ProducerRecord>, DomainError> {
        let producers = self.producers.read().unwrap();
        Ok(producers.get(id).cloned())
    }

    async fn list_all(&self) -> Result<Vec<ProducerRecord>, DomainError> {
        let producers = self.producers.read().unwrap();
        let mut all: Vec<_> = producers.values().cloned().collect();
        all.sort_by(|a, b| a.id.as_str().cmp(b.id.as_str()));
        Ok(all)
    }
}

// ============================================================================
// In-Memory Assessment Repository
// ============================================================================

#[derive(Default)]
pub struct InMemoryAssessmentRepository {
    // Insertion order doubles as recency order
    assessments: Arc<RwLock<Vec<Assessment>>>,
}

impl InMemoryAssessmentRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate with an assessment for testing
    pub fn with_assessment(self, assessment: Assessment) -> Self {
        {
            let mut assessments = self.assessments.write().unwrap();
            assessments.push(assessment);
        }
        self
    }
}

#[async_trait]
impl AssessmentRepository for InMemoryAssessmentRepository {
    async fn create(&self, new_assessment: &NewAssessment) -> Result<Assessment, DomainError> {
        let assessment = Assessment {
            id: AssessmentId::new(),
            producer_id: new_assessment.producer_id.clone(),
            boundary: new_assessment.boundary.clone(),
            area_hectares: new_assessment.area_hectares,
            determination: new_assessment.determination.clone(),
            created_at: Utc::now(),
        };
        let mut assessments = self.assessments.write().unwrap();
        assessments.push(assessment.clone());
        Ok(assessment)
    }

    async fn find_by_id(&self, id: &AssessmentId) -> Result<Option<Assessment>, DomainError> {
        let assessments = self.assessments.read().unwrap();
        Ok(assessments.iter().find(|a| a.id == *id).cloned())
    }

    async fn find_latest_by_producer(
        &self,
        producer_id: &ProducerId,
    ) -> Result<Option<Assessment>, DomainError> {
        let assessments = self.assessments.read().unwrap();
        Ok(assessments
            .iter()
            .rev()
            .find(|a| a.producer_id == *producer_id)
            .cloned())
    }
}

// ============================================================================
// In-Memory Pack Repository
// ============================================================================

#[derive(Default)]
pub struct InMemoryPackRepository {
    packs: Arc<RwLock<HashMap<PackId, CompliancePack>>>,
}

impl InMemoryPackRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate with a pack for testing
    pub fn with_pack(self, pack: CompliancePack) -> Self {
        {
            let mut packs = self.packs.write().unwrap();
            packs.insert(pack.pack_id.clone(), pack);
        }
        self
    }
}

#[async_trait]
impl PackRepository for InMemoryPackRepository {
    async fn create(&self, new_pack: &NewCompliancePack) -> Result<CompliancePack, DomainError> {
        let mut packs = self.packs.write().unwrap();
        if packs.contains_key(&new_pack.pack_id) {
            return Err(DomainError::Conflict(format!(
                "pack {} already exists",
                new_pack.pack_id
            )));
        }
        let pack = CompliancePack {
            pack_id: new_pack.pack_id.clone(),
            producer_id: new_pack.producer_id.clone(),
            assessment_id: new_pack.assessment_id,
            exporter: new_pack.exporter.clone(),
            status: new_pack.status,
            storage_expiry_date: new_pack.storage_expiry_date,
            generated_at: Utc::now(),
            audit_trail: Vec::new(),
        };
        packs.insert(pack.pack_id.clone(), pack.clone());
        Ok(pack)
    }

    async fn find_by_id(&self, id: &PackId) -> Result<Option<CompliancePack>, DomainError> {
        let packs = self.packs.read().unwrap();
        Ok(packs.get(id).cloned())
    }

    async fn list_all(&self) -> Result<Vec<CompliancePack>, DomainError> {
        let packs = self.packs.read().unwrap();
        let mut all: Vec<_> = packs.values().cloned().collect();
        all.sort_by(|a, b| b.generated_at.cmp(&a.generated_at));
        Ok(all)
    }

    async fn list_by_status(
        &self,
        status: PackStatus,
    ) -> Result<Vec<CompliancePack>, DomainError> {
        let packs = self.packs.read().unwrap();
        let mut matching: Vec<_> = packs
            .values()
            .filter(|p| p.status == status)
            .cloned()
            .collect();
        matching.sort_by(|a, b| b.generated_at.cmp(&a.generated_at));
        Ok(matching)
    }

    async fn transition_status(
        &self,
        id: &PackId,
        expected: PackStatus,
        next: PackStatus,
    ) -> Result<bool, DomainError> {
        // Single write lock makes the check-and-set atomic
        let mut packs = self.packs.write().unwrap();
        match packs.get_mut(id) {
            Some(pack) if pack.status == expected => {
                pack.status = next;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn append_audit(&self, id: &PackId, entry: &AuditEntry) -> Result<(), DomainError> {
        let mut packs = self.packs.write().unwrap();
        match packs.get_mut(id) {
            Some(pack) => {
                pack.audit_trail.push(entry.clone());
                Ok(())
            }
            None => Err(DomainError::NotFound(format!("pack {}", id))),
        }
    }

    async fn delete(&self, id: &PackId) -> Result<(), DomainError> {
        let mut packs = self.packs.write().unwrap();
        packs.remove(id);
        Ok(())
    }
}

// ============================================================================
// In-Memory Document Repository
// ============================================================================

#[derive(Default)]
pub struct InMemoryDocumentRepository {
    documents: Arc<RwLock<HashMap<DocumentId, DocumentRecord>>>,
}

impl InMemoryDocumentRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn is_empty(&self) -> bool {
        self.documents.read().unwrap().is_empty()
    }
}

fn presentation_index(document_type: DocumentType) -> usize {
    DocumentType::ALL
        .iter()
        .position(|t| *t == document_type)
        .unwrap_or(usize::MAX)
}

#[async_trait]
impl DocumentRepository for InMemoryDocumentRepository {
    async fn create(
        &self,
        new_document: &NewDocumentRecord,
    ) -> Result<DocumentRecord, DomainError> {
        let document = DocumentRecord {
            id: DocumentId::new(),
            pack_id: new_document.pack_id.clone(),
            document_type: new_document.document_type,
            title: new_document.title.clone(),
            reference_number: new_document.reference_number.clone(),
            issued_by: new_document.issued_by.clone(),
            artifact: new_document.artifact.clone(),
            created_at: Utc::now(),
        };
        let mut documents = self.documents.write().unwrap();
        documents.insert(document.id, document.clone());
        Ok(document)
    }

    async fn find_by_id(&self, id: &DocumentId) -> Result<Option<DocumentRecord>, DomainError> {
        let documents = self.documents.read().unwrap();
        Ok(documents.get(id).cloned())
    }

    async fn find_by_pack(&self, pack_id: &PackId) -> Result<Vec<DocumentRecord>, DomainError> {
        let documents = self.documents.read().unwrap();
        let mut matching: Vec<_> = documents
            .values()
            .filter(|d| d.pack_id == *pack_id)
            .cloned()
            .collect();
        matching.sort_by_key(|d| presentation_index(d.document_type));
        Ok(matching)
    }

    async fn delete_by_pack(&self, pack_id: &PackId) -> Result<(), DomainError> {
        let mut documents = self.documents.write().unwrap();
        documents.retain(|_, d| d.pack_id != *pack_id);
        Ok(())
    }
}

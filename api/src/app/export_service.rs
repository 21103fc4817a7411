//! Retrieval and export gateway
//!
//! Read-side of the pipeline: readiness listings, pack queues, and
//! document downloads. Downloads are gated on the parent pack's status so
//! nothing leaves the system before a reviewer has signed off.

use std::sync::Arc;

use serde::Serialize;

use crate::domain::entities::{
    resolve_reference, Assessment, CompliancePack, DocumentId, DocumentRecord, PackId, PackStatus,
    ProducerRecord,
};
use crate::domain::ports::{
    AssessmentRepository, DocumentRepository, PackRepository, ProducerRepository,
};
use crate::error::DomainError;

/// A producer eligible for pack generation
#[derive(Debug, Clone, Serialize)]
pub struct CandidateProducer {
    pub producer: ProducerRecord,
    pub latest_assessment: Assessment,
    /// Virtual workflow state; candidates have no persisted pack yet
    pub status: PackStatus,
}

pub struct ExportService<PR, AR, KR, DR>
where
    PR: ProducerRepository,
    AR: AssessmentRepository,
    KR: PackRepository,
    DR: DocumentRepository,
{
    producers: Arc<PR>,
    assessments: Arc<AR>,
    packs: Arc<KR>,
    documents: Arc<DR>,
}

impl<PR, AR, KR, DR> ExportService<PR, AR, KR, DR>
where
    PR: ProducerRepository,
    AR: AssessmentRepository,
    KR: PackRepository,
    DR: DocumentRepository,
{
    pub fn new(
        producers: Arc<PR>,
        assessments: Arc<AR>,
        packs: Arc<KR>,
        documents: Arc<DR>,
    ) -> Self {
        Self {
            producers,
            assessments,
            packs,
            documents,
        }
    }

    /// Producers eligible for pack generation: mapped farms, GPS on file,
    /// and at least one assessment.
    pub async fn list_ready(&self) -> Result<Vec<CandidateProducer>, DomainError> {
        let mut ready = Vec::new();
        for producer in self.producers.list_all().await? {
            if !producer.has_mapped_farms() {
                continue;
            }
            if let Some(latest_assessment) = self
                .assessments
                .find_latest_by_producer(&producer.id)
                .await?
            {
                ready.push(CandidateProducer {
                    producer,
                    latest_assessment,
                    status: PackStatus::Candidate,
                });
            }
        }
        Ok(ready)
    }

    pub async fn list_all_packs(&self) -> Result<Vec<CompliancePack>, DomainError> {
        self.packs.list_all().await
    }

    pub async fn list_pending(&self) -> Result<Vec<CompliancePack>, DomainError> {
        self.packs.list_by_status(PackStatus::PendingApproval).await
    }

    pub async fn list_approved(&self) -> Result<Vec<CompliancePack>, DomainError> {
        self.packs.list_by_status(PackStatus::Approved).await
    }

    /// Documents belonging to a pack, without the visibility gate.
    ///
    /// Listing metadata is open; downloading content is not.
    pub async fn list_documents(
        &self,
        pack_id: &PackId,
    ) -> Result<Vec<DocumentRecord>, DomainError> {
        self.documents.find_by_pack(pack_id).await
    }

    /// Fetch a document for download.
    ///
    /// Only documents of approved or published packs are retrievable.
    pub async fn get_document(&self, id: &DocumentId) -> Result<DocumentRecord, DomainError> {
        let document = self
            .documents
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("document {}", id)))?;

        let pack = self
            .packs
            .find_by_id(&document.pack_id)
            .await?
            .ok_or_else(|| {
                DomainError::Internal(format!("document {} orphaned from its pack", id))
            })?;

        if !pack.status.is_retrievable() {
            return Err(DomainError::NotAvailable(format!(
                "document {} belongs to pack {} in status {}",
                id, pack.pack_id, pack.status
            )));
        }

        Ok(document)
    }

    /// Resolve a printed reference number back to its document.
    ///
    /// The reference embeds the type code and pack id, so a scanned
    /// verification payload can be checked against the stored record and
    /// the pack's current status. Metadata only; content stays behind
    /// `get_document`.
    pub async fn verify_reference(
        &self,
        reference: &str,
    ) -> Result<(DocumentRecord, PackStatus), DomainError> {
        let (document_type, pack_id) = resolve_reference(reference)
            .ok_or_else(|| DomainError::NotFound(format!("reference {}", reference)))?;

        let pack = self
            .packs
            .find_by_id(&pack_id)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("reference {}", reference)))?;

        let document = self
            .documents
            .find_by_pack(&pack_id)
            .await?
            .into_iter()
            .find(|d| d.document_type == document_type)
            .ok_or_else(|| DomainError::NotFound(format!("reference {}", reference)))?;

        Ok((document, pack.status))
    }
}

//! Compliance pack service
//!
//! Assembles packs from persisted assessments and drives the approval
//! state machine. Assembly is all-or-nothing: every document renders
//! before the first row is written.

use std::sync::Arc;

use chrono::{Months, Utc};

use crate::domain::entities::{
    AuditDecision, AuditEntry, CompliancePack, DecisionAction, DocumentRecord, DocumentType,
    ExporterMetadata, NewCompliancePack, NewDocumentRecord, PackId, PackStatus, ProducerId,
};
use crate::domain::ports::{
    AssessmentRepository, DocumentRepository, PackRepository, ProducerRepository,
};
use crate::error::DomainError;
use crate::render::{self, PackContext};

/// Actor recorded on system-generated audit entries
pub const SYSTEM_ACTOR: &str = "system";

pub struct PackService<PR, AR, KR, DR>
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
    retention_years: i64,
}

impl<PR, AR, KR, DR> PackService<PR, AR, KR, DR>
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
        retention_years: i64,
    ) -> Self {
        Self {
            producers,
            assessments,
            packs,
            documents,
            retention_years,
        }
    }

    /// Assemble and persist a new pack for a producer.
    ///
    /// Renders all six documents first; any render failure aborts with no
    /// pack created. The pack enters the workflow in `PendingApproval`.
    pub async fn generate_pack(
        &self,
        producer_id: &ProducerId,
        exporter: ExporterMetadata,
    ) -> Result<(CompliancePack, Vec<DocumentRecord>), DomainError> {
        let producer = self
            .producers
            .find_by_id(producer_id)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("producer {}", producer_id)))?;

        let assessment = self
            .assessments
            .find_latest_by_producer(producer_id)
            .await?
            .ok_or_else(|| DomainError::MissingAssessment(producer_id.to_string()))?;

        let pack_id = PackId::generate();
        let generated_at = Utc::now();

        let ctx = PackContext {
            pack_id: &pack_id,
            producer: &producer,
            assessment: &assessment,
            exporter: &exporter,
            generated_at,
        };

        // All six render before anything persists
        let mut new_documents = Vec::with_capacity(DocumentType::ALL.len());
        for doc_type in DocumentType::ALL {
            let artifact = render::render(doc_type, &ctx)?;
            new_documents.push(NewDocumentRecord {
                pack_id: pack_id.clone(),
                document_type: doc_type,
                title: doc_type.title().to_string(),
                reference_number: doc_type.reference_number(&pack_id),
                issued_by: doc_type.issued_by().to_string(),
                artifact,
            });
        }

        let months = u32::try_from(self.retention_years * 12)
            .map_err(|_| DomainError::Internal("retention period out of range".to_string()))?;
        let storage_expiry_date = generated_at
            .checked_add_months(Months::new(months))
            .ok_or_else(|| DomainError::Internal("retention period overflow".to_string()))?;

        self.packs
            .create(&NewCompliancePack {
                pack_id: pack_id.clone(),
                producer_id: producer.id.clone(),
                assessment_id: assessment.id,
                exporter,
                status: PackStatus::PendingApproval,
                storage_expiry_date,
            })
            .await?;

        // A failure past this point would strand a pending pack with fewer
        // than six documents; discard the partial rows instead.
        let documents = match self.persist_documents(&pack_id, &new_documents).await {
            Ok(documents) => documents,
            Err(err) => {
                self.discard_partial_pack(&pack_id).await;
                return Err(err);
            }
        };

        tracing::info!(
            pack_id = %pack_id,
            producer_id = %producer.id,
            documents = documents.len(),
            "compliance pack generated"
        );

        let pack = self.reload(&pack_id).await?;
        Ok((pack, documents))
    }

    async fn persist_documents(
        &self,
        pack_id: &PackId,
        new_documents: &[NewDocumentRecord],
    ) -> Result<Vec<DocumentRecord>, DomainError> {
        let mut documents = Vec::with_capacity(new_documents.len());
        for new_document in new_documents {
            documents.push(self.documents.create(new_document).await?);
        }

        self.packs
            .append_audit(
                pack_id,
                &AuditEntry::now(
                    SYSTEM_ACTOR,
                    AuditDecision::Generated,
                    Some(format!("{} documents generated", documents.len())),
                ),
            )
            .await?;

        Ok(documents)
    }

    async fn discard_partial_pack(&self, pack_id: &PackId) {
        if let Err(e) = self.documents.delete_by_pack(pack_id).await {
            tracing::error!(pack_id = %pack_id, error = %e, "failed to discard partial pack documents");
        }
        if let Err(e) = self.packs.delete(pack_id).await {
            tracing::error!(pack_id = %pack_id, error = %e, "failed to discard partial pack");
        }
    }

    /// Record a reviewer decision on a pending pack.
    ///
    /// The status change is a compare-and-set; a concurrent decision loses
    /// the race and gets the same error it would have gotten arriving late.
    pub async fn decide(
        &self,
        pack_id: &PackId,
        action: DecisionAction,
        actor: &str,
        notes: Option<String>,
    ) -> Result<CompliancePack, DomainError> {
        let pack = self.require(pack_id).await?;
        let next = action.resulting_status();

        if pack.status.awaiting_decision() {
            let moved = self
                .packs
                .transition_status(pack_id, PackStatus::PendingApproval, next)
                .await?;
            if moved {
                let decision = match action {
                    DecisionAction::Approve => AuditDecision::Approved,
                    DecisionAction::Reject => AuditDecision::Rejected,
                };
                self.packs
                    .append_audit(pack_id, &AuditEntry::now(actor, decision, notes))
                    .await?;
                tracing::info!(pack_id = %pack_id, action = %action, actor, "pack decided");
                return self.reload(pack_id).await;
            }
        }

        // Already decided, or lost the race to someone who decided it
        let pack = self.require(pack_id).await?;
        if pack.status == next {
            Err(DomainError::AlreadyDecided {
                pack_id: pack_id.to_string(),
                decision: pack.status.to_string(),
            })
        } else {
            Err(DomainError::InvalidTransition {
                pack_id: pack_id.to_string(),
                from: pack.status.to_string(),
                attempted: next.to_string(),
            })
        }
    }

    /// Publish an approved pack
    pub async fn publish(
        &self,
        pack_id: &PackId,
        actor: &str,
    ) -> Result<CompliancePack, DomainError> {
        let pack = self.require(pack_id).await?;

        if pack.status.can_transition_to(PackStatus::Published) {
            let moved = self
                .packs
                .transition_status(pack_id, PackStatus::Approved, PackStatus::Published)
                .await?;
            if moved {
                self.packs
                    .append_audit(
                        pack_id,
                        &AuditEntry::now(actor, AuditDecision::Published, None),
                    )
                    .await?;
                tracing::info!(pack_id = %pack_id, actor, "pack published");
                return self.reload(pack_id).await;
            }
        }

        let pack = self.require(pack_id).await?;
        if pack.status == PackStatus::Published {
            Err(DomainError::AlreadyDecided {
                pack_id: pack_id.to_string(),
                decision: pack.status.to_string(),
            })
        } else {
            Err(DomainError::InvalidTransition {
                pack_id: pack_id.to_string(),
                from: pack.status.to_string(),
                attempted: PackStatus::Published.to_string(),
            })
        }
    }

    /// Delete a pack and its documents.
    ///
    /// The deletion is logged to the audit trail before any row goes away,
    /// so the action is visible in logs even though the trail itself is
    /// removed with the pack.
    pub async fn delete_pack(&self, pack_id: &PackId, actor: &str) -> Result<(), DomainError> {
        self.require(pack_id).await?;

        self.packs
            .append_audit(
                pack_id,
                &AuditEntry::now(actor, AuditDecision::Deleted, None),
            )
            .await?;

        self.documents.delete_by_pack(pack_id).await?;
        self.packs.delete(pack_id).await?;

        tracing::warn!(pack_id = %pack_id, actor, "pack deleted");
        Ok(())
    }

    pub async fn get_pack(&self, pack_id: &PackId) -> Result<CompliancePack, DomainError> {
        self.require(pack_id).await
    }

    async fn require(&self, pack_id: &PackId) -> Result<CompliancePack, DomainError> {
        self.packs
            .find_by_id(pack_id)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("pack {}", pack_id)))
    }

    async fn reload(&self, pack_id: &PackId) -> Result<CompliancePack, DomainError> {
        self.packs
            .find_by_id(pack_id)
            .await?
            .ok_or_else(|| DomainError::Internal(format!("pack {} vanished", pack_id)))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;

    use super::*;
    use crate::domain::entities::DocumentId;
    use crate::test_utils::fixtures::{
        high_risk_boundary, test_assessment_with_boundary, test_exporter, test_producer,
    };
    use crate::test_utils::mocks::{
        InMemoryAssessmentRepository, InMemoryDocumentRepository, InMemoryPackRepository,
        InMemoryProducerRepository,
    };

    /// Document repository that fails after a fixed number of writes
    struct FailingDocumentRepository {
        inner: InMemoryDocumentRepository,
        successes: usize,
        writes: AtomicUsize,
    }

    impl FailingDocumentRepository {
        fn failing_after(successes: usize) -> Self {
            Self {
                inner: InMemoryDocumentRepository::new(),
                successes,
                writes: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl DocumentRepository for FailingDocumentRepository {
        async fn create(
            &self,
            document: &NewDocumentRecord,
        ) -> Result<DocumentRecord, DomainError> {
            if self.writes.fetch_add(1, Ordering::SeqCst) >= self.successes {
                return Err(DomainError::Database("connection reset".to_string()));
            }
            self.inner.create(document).await
        }

        async fn find_by_id(
            &self,
            id: &DocumentId,
        ) -> Result<Option<DocumentRecord>, DomainError> {
            self.inner.find_by_id(id).await
        }

        async fn find_by_pack(
            &self,
            pack_id: &PackId,
        ) -> Result<Vec<DocumentRecord>, DomainError> {
            self.inner.find_by_pack(pack_id).await
        }

        async fn delete_by_pack(&self, pack_id: &PackId) -> Result<(), DomainError> {
            self.inner.delete_by_pack(pack_id).await
        }
    }

    type TestPackService = PackService<
        InMemoryProducerRepository,
        InMemoryAssessmentRepository,
        InMemoryPackRepository,
        InMemoryDocumentRepository,
    >;

    struct Harness {
        service: TestPackService,
        packs: Arc<InMemoryPackRepository>,
        documents: Arc<InMemoryDocumentRepository>,
    }

    fn harness(
        producers: InMemoryProducerRepository,
        assessments: InMemoryAssessmentRepository,
    ) -> Harness {
        let packs = Arc::new(InMemoryPackRepository::new());
        let documents = Arc::new(InMemoryDocumentRepository::new());
        Harness {
            service: PackService::new(
                Arc::new(producers),
                Arc::new(assessments),
                packs.clone(),
                documents.clone(),
                5,
            ),
            packs,
            documents,
        }
    }

    fn ready_harness(producer_id: &str) -> Harness {
        let producer = test_producer(producer_id);
        let assessment = test_assessment_with_boundary(&producer.id, high_risk_boundary());
        harness(
            InMemoryProducerRepository::new().with_producer(producer),
            InMemoryAssessmentRepository::new().with_assessment(assessment),
        )
    }

    #[tokio::test]
    async fn generates_a_six_document_pending_pack() {
        let h = ready_harness("PROD-001");

        let (pack, documents) = h
            .service
            .generate_pack(&ProducerId::from("PROD-001"), test_exporter())
            .await
            .unwrap();

        assert_eq!(pack.status, PackStatus::PendingApproval);
        assert_eq!(documents.len(), 6);
        assert_eq!(pack.audit_trail.len(), 1);
        assert_eq!(pack.audit_trail[0].decision, AuditDecision::Generated);
        assert_eq!(pack.audit_trail[0].actor, SYSTEM_ACTOR);

        // Reference numbers are unique within the pack
        let refs: std::collections::HashSet<_> = documents
            .iter()
            .map(|d| d.reference_number.clone())
            .collect();
        assert_eq!(refs.len(), 6);
    }

    #[tokio::test]
    async fn expiry_is_five_years_out() {
        let h = ready_harness("PROD-001");
        let (pack, _) = h
            .service
            .generate_pack(&ProducerId::from("PROD-001"), test_exporter())
            .await
            .unwrap();

        let years = (pack.storage_expiry_date - pack.generated_at).num_days() / 365;
        assert_eq!(years, 5);
    }

    #[tokio::test]
    async fn no_assessment_blocks_generation() {
        let h = harness(
            InMemoryProducerRepository::new().with_producer(test_producer("PROD-001")),
            InMemoryAssessmentRepository::new(),
        );

        let err = h
            .service
            .generate_pack(&ProducerId::from("PROD-001"), test_exporter())
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::MissingAssessment(_)));
    }

    #[tokio::test]
    async fn missing_gps_aborts_with_nothing_persisted() {
        let mut producer = test_producer("PROD-001");
        producer.gps_coordinates = None;
        let assessment = test_assessment_with_boundary(&producer.id, high_risk_boundary());
        let h = harness(
            InMemoryProducerRepository::new().with_producer(producer),
            InMemoryAssessmentRepository::new().with_assessment(assessment),
        );

        let err = h
            .service
            .generate_pack(&ProducerId::from("PROD-001"), test_exporter())
            .await
            .unwrap_err();

        assert!(matches!(err, DomainError::PackIncomplete(_)));
        assert!(h.packs.list_all().await.unwrap().is_empty());
        assert!(h.documents.is_empty().await);
    }

    #[tokio::test]
    async fn document_write_failure_discards_the_partial_pack() {
        let producer = test_producer("PROD-001");
        let assessment = test_assessment_with_boundary(&producer.id, high_risk_boundary());
        let packs = Arc::new(InMemoryPackRepository::new());
        let documents = Arc::new(FailingDocumentRepository::failing_after(3));
        let service = PackService::new(
            Arc::new(InMemoryProducerRepository::new().with_producer(producer)),
            Arc::new(InMemoryAssessmentRepository::new().with_assessment(assessment)),
            packs.clone(),
            documents.clone(),
            5,
        );

        let err = service
            .generate_pack(&ProducerId::from("PROD-001"), test_exporter())
            .await
            .unwrap_err();

        assert!(matches!(err, DomainError::Database(_)));
        assert!(packs.list_all().await.unwrap().is_empty());
        assert!(documents.inner.is_empty().await);
    }

    #[tokio::test]
    async fn approval_moves_the_pack_and_logs_the_actor() {
        let h = ready_harness("PROD-001");
        let (pack, _) = h
            .service
            .generate_pack(&ProducerId::from("PROD-001"), test_exporter())
            .await
            .unwrap();

        let approved = h
            .service
            .decide(
                &pack.pack_id,
                DecisionAction::Approve,
                "inspector.k",
                Some("All documents verified".to_string()),
            )
            .await
            .unwrap();

        assert_eq!(approved.status, PackStatus::Approved);
        assert_eq!(approved.audit_trail.len(), 2);
        assert_eq!(approved.audit_trail[1].actor, "inspector.k");
        assert_eq!(approved.audit_trail[1].decision, AuditDecision::Approved);
    }

    #[tokio::test]
    async fn repeating_a_decision_reports_already_decided() {
        let h = ready_harness("PROD-001");
        let (pack, _) = h
            .service
            .generate_pack(&ProducerId::from("PROD-001"), test_exporter())
            .await
            .unwrap();

        h.service
            .decide(&pack.pack_id, DecisionAction::Approve, "inspector.k", None)
            .await
            .unwrap();

        let err = h
            .service
            .decide(&pack.pack_id, DecisionAction::Approve, "inspector.k", None)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::AlreadyDecided { .. }));
    }

    #[tokio::test]
    async fn crossing_decisions_report_invalid_transition() {
        let h = ready_harness("PROD-001");
        let (pack, _) = h
            .service
            .generate_pack(&ProducerId::from("PROD-001"), test_exporter())
            .await
            .unwrap();

        h.service
            .decide(&pack.pack_id, DecisionAction::Reject, "inspector.k", None)
            .await
            .unwrap();

        let err = h
            .service
            .decide(&pack.pack_id, DecisionAction::Approve, "inspector.m", None)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::InvalidTransition { .. }));
    }

    #[tokio::test]
    async fn publish_requires_approval_first() {
        let h = ready_harness("PROD-001");
        let (pack, _) = h
            .service
            .generate_pack(&ProducerId::from("PROD-001"), test_exporter())
            .await
            .unwrap();

        let err = h
            .service
            .publish(&pack.pack_id, "admin")
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::InvalidTransition { .. }));

        h.service
            .decide(&pack.pack_id, DecisionAction::Approve, "inspector.k", None)
            .await
            .unwrap();
        let published = h.service.publish(&pack.pack_id, "admin").await.unwrap();
        assert_eq!(published.status, PackStatus::Published);

        let err = h
            .service
            .publish(&pack.pack_id, "admin")
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::AlreadyDecided { .. }));
    }

    #[tokio::test]
    async fn deletion_removes_pack_and_documents() {
        let h = ready_harness("PROD-001");
        let (pack, _) = h
            .service
            .generate_pack(&ProducerId::from("PROD-001"), test_exporter())
            .await
            .unwrap();

        h.service.delete_pack(&pack.pack_id, "admin").await.unwrap();

        assert!(h.packs.find_by_id(&pack.pack_id).await.unwrap().is_none());
        assert!(h
            .documents
            .find_by_pack(&pack.pack_id)
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn deleting_an_unknown_pack_is_not_found() {
        let h = ready_harness("PROD-001");
        let err = h
            .service
            .delete_pack(&PackId::from("EUDR-0000000000000-dead"), "admin")
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::NotFound(_)));
    }
}

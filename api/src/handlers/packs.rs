//! Compliance pack handlers
//!
//! Endpoints for pack generation, review queues, and the approval workflow.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};

use crate::app::CandidateProducer;
use crate::domain::entities::{
    AuditEntry, CompliancePack, DecisionAction, DocumentRecord, ExporterMetadata, PackId,
    ProducerId,
};
use crate::error::AppError;
use crate::AppState;

/// Audit trail line in responses
#[derive(Debug, Serialize)]
pub struct AuditEntryResponse {
    pub actor: String,
    pub decision: String,
    pub notes: Option<String>,
    pub at: String,
}

impl From<AuditEntry> for AuditEntryResponse {
    fn from(entry: AuditEntry) -> Self {
        AuditEntryResponse {
            actor: entry.actor,
            decision: entry.decision.to_string(),
            notes: entry.notes,
            at: entry.at.to_rfc3339(),
        }
    }
}

/// Pack summary used across the listing and workflow endpoints
#[derive(Debug, Serialize)]
pub struct PackResponse {
    pub pack_id: String,
    pub producer_id: String,
    pub assessment_id: String,
    pub status: String,
    pub exporter: ExporterMetadata,
    pub storage_expiry_date: String,
    pub generated_at: String,
    pub audit_trail: Vec<AuditEntryResponse>,
}

impl From<CompliancePack> for PackResponse {
    fn from(pack: CompliancePack) -> Self {
        PackResponse {
            pack_id: pack.pack_id.to_string(),
            producer_id: pack.producer_id.to_string(),
            assessment_id: pack.assessment_id.to_string(),
            status: pack.status.to_string(),
            exporter: pack.exporter,
            storage_expiry_date: pack.storage_expiry_date.to_rfc3339(),
            generated_at: pack.generated_at.to_rfc3339(),
            audit_trail: pack.audit_trail.into_iter().map(|e| e.into()).collect(),
        }
    }
}

/// Document metadata carried on generation responses
#[derive(Debug, Serialize)]
pub struct DocumentSummary {
    pub id: String,
    pub document_type: String,
    pub title: String,
    pub reference_number: String,
    pub issued_by: String,
    pub file_name: String,
}

impl From<DocumentRecord> for DocumentSummary {
    fn from(document: DocumentRecord) -> Self {
        DocumentSummary {
            id: document.id.to_string(),
            document_type: document.document_type.to_string(),
            title: document.title,
            reference_number: document.reference_number,
            issued_by: document.issued_by,
            file_name: document.artifact.file_name,
        }
    }
}

/// Response for a freshly generated pack
#[derive(Debug, Serialize)]
pub struct GeneratedPackResponse {
    #[serde(flatten)]
    pub pack: PackResponse,
    pub documents: Vec<DocumentSummary>,
}

/// Candidate producer in the readiness listing
#[derive(Debug, Serialize)]
pub struct CandidateResponse {
    pub producer_id: String,
    pub name: String,
    pub county: String,
    pub district: String,
    pub risk_level: String,
    pub area_hectares: f64,
    pub assessed_at: String,
    pub status: String,
}

impl From<CandidateProducer> for CandidateResponse {
    fn from(candidate: CandidateProducer) -> Self {
        CandidateResponse {
            producer_id: candidate.producer.id.to_string(),
            name: candidate.producer.name,
            county: candidate.producer.county,
            district: candidate.producer.district,
            risk_level: candidate
                .latest_assessment
                .determination
                .risk_level
                .to_string(),
            area_hectares: candidate.latest_assessment.area_hectares,
            assessed_at: candidate.latest_assessment.created_at.to_rfc3339(),
            status: candidate.status.to_string(),
        }
    }
}

/// Request to decide a pending pack
#[derive(Debug, Deserialize)]
pub struct DecisionRequest {
    pub action: DecisionAction,
    pub actor: String,
    pub notes: Option<String>,
}

/// Request to publish an approved pack
#[derive(Debug, Deserialize)]
pub struct PublishRequest {
    pub actor: String,
}

/// Query parameters for pack deletion
#[derive(Debug, Deserialize)]
pub struct DeletePackQuery {
    pub actor: String,
}

/// GET /eudr/producers-ready
pub async fn list_ready_producers(
    State(state): State<AppState>,
) -> Result<Json<Vec<CandidateResponse>>, AppError> {
    let ready = state.export_service.list_ready().await?;
    Ok(Json(ready.into_iter().map(|c| c.into()).collect()))
}

/// POST /eudr/packs/:producer_id/generate
pub async fn generate_pack(
    State(state): State<AppState>,
    Path(producer_id): Path<String>,
    Json(exporter): Json<ExporterMetadata>,
) -> Result<(StatusCode, Json<GeneratedPackResponse>), AppError> {
    let (pack, documents) = state
        .pack_service
        .generate_pack(&ProducerId::from(producer_id), exporter)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(GeneratedPackResponse {
            pack: pack.into(),
            documents: documents.into_iter().map(|d| d.into()).collect(),
        }),
    ))
}

/// GET /eudr/packs
pub async fn list_packs(
    State(state): State<AppState>,
) -> Result<Json<Vec<PackResponse>>, AppError> {
    let packs = state.export_service.list_all_packs().await?;
    Ok(Json(packs.into_iter().map(|p| p.into()).collect()))
}

/// GET /eudr/packs/pending
pub async fn list_pending_packs(
    State(state): State<AppState>,
) -> Result<Json<Vec<PackResponse>>, AppError> {
    let packs = state.export_service.list_pending().await?;
    Ok(Json(packs.into_iter().map(|p| p.into()).collect()))
}

/// GET /eudr/packs/approved
pub async fn list_approved_packs(
    State(state): State<AppState>,
) -> Result<Json<Vec<PackResponse>>, AppError> {
    let packs = state.export_service.list_approved().await?;
    Ok(Json(packs.into_iter().map(|p| p.into()).collect()))
}

/// GET /eudr/packs/:pack_id
pub async fn get_pack(
    State(state): State<AppState>,
    Path(pack_id): Path<String>,
) -> Result<Json<GeneratedPackResponse>, AppError> {
    let pack_id = PackId::from(pack_id);
    let pack = state.pack_service.get_pack(&pack_id).await?;
    let documents = state.export_service.list_documents(&pack_id).await?;

    Ok(Json(GeneratedPackResponse {
        pack: pack.into(),
        documents: documents.into_iter().map(|d| d.into()).collect(),
    }))
}

/// POST /eudr/packs/:pack_id/decision
pub async fn decide_pack(
    State(state): State<AppState>,
    Path(pack_id): Path<String>,
    Json(request): Json<DecisionRequest>,
) -> Result<Json<PackResponse>, AppError> {
    let pack = state
        .pack_service
        .decide(
            &PackId::from(pack_id),
            request.action,
            &request.actor,
            request.notes,
        )
        .await?;

    Ok(Json(pack.into()))
}

/// POST /eudr/packs/:pack_id/publish
pub async fn publish_pack(
    State(state): State<AppState>,
    Path(pack_id): Path<String>,
    Json(request): Json<PublishRequest>,
) -> Result<Json<PackResponse>, AppError> {
    let pack = state
        .pack_service
        .publish(&PackId::from(pack_id), &request.actor)
        .await?;

    Ok(Json(pack.into()))
}

/// DELETE /eudr/packs/:pack_id?actor=...
pub async fn delete_pack(
    State(state): State<AppState>,
    Path(pack_id): Path<String>,
    Query(query): Query<DeletePackQuery>,
) -> Result<StatusCode, AppError> {
    state
        .pack_service
        .delete_pack(&PackId::from(pack_id), &query.actor)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

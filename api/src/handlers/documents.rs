//! Document download and verification handlers

use axum::{
    extract::{Path, State},
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use uuid::Uuid;

use crate::domain::entities::DocumentId;
use crate::error::AppError;
use crate::AppState;

/// GET /eudr/documents/:document_id/download
///
/// Streams the rendered document as an attachment. Gated on the parent
/// pack being approved or published.
pub async fn download_document(
    State(state): State<AppState>,
    Path(document_id): Path<Uuid>,
) -> Result<Response, AppError> {
    let document = state
        .export_service
        .get_document(&DocumentId(document_id))
        .await?;

    let headers = [
        (
            header::CONTENT_TYPE,
            document.artifact.content_type.to_string(),
        ),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", document.artifact.file_name),
        ),
    ];

    Ok((headers, document.artifact.content).into_response())
}

/// Response for a verified reference number
#[derive(Debug, Serialize)]
pub struct VerifiedReferenceResponse {
    pub document_id: String,
    pub document_type: String,
    pub title: String,
    pub reference_number: String,
    pub issued_by: String,
    pub pack_id: String,
    pub pack_status: String,
}

/// GET /eudr/documents/verify/:reference
///
/// Resolves a reference number, as printed on each document and embedded
/// in its verification payload, to the document it identifies. Metadata
/// only; content goes through the download endpoint.
pub async fn verify_reference(
    State(state): State<AppState>,
    Path(reference): Path<String>,
) -> Result<Json<VerifiedReferenceResponse>, AppError> {
    let (document, pack_status) = state.export_service.verify_reference(&reference).await?;

    Ok(Json(VerifiedReferenceResponse {
        document_id: document.id.to_string(),
        document_type: document.document_type.to_string(),
        title: document.title,
        reference_number: document.reference_number,
        issued_by: document.issued_by,
        pack_id: document.pack_id.to_string(),
        pack_status: pack_status.to_string(),
    }))
}

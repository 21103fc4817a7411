//! Unified error types for the Canopy compliance API
//!
//! This module defines error types for each layer:
//! - `DomainError`: pipeline errors carrying a stable machine-readable kind
//! - `AppError`: application layer errors (wraps domain errors for HTTP responses)

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Domain layer errors - the pipeline's terminal, user-facing conditions.
///
/// None of these are retried internally; all propagate to the caller.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Boundary requires at least {required} points, got {got}")]
    InsufficientPoints { required: usize, got: usize },

    #[error("No risk assessment on record for producer {0}")]
    MissingAssessment(String),

    #[error("Compliance pack incomplete: {0}")]
    PackIncomplete(String),

    #[error("Invalid transition for pack {pack_id}: {from} -> {attempted}")]
    InvalidTransition {
        pack_id: String,
        from: String,
        attempted: String,
    },

    #[error("Pack {pack_id} already decided: {decision}")]
    AlreadyDecided { pack_id: String, decision: String },

    #[error("Not available for retrieval: {0}")]
    NotAvailable(String),

    #[error("Entity not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl DomainError {
    /// Stable machine-readable kind, independent of the display message.
    pub fn kind(&self) -> &'static str {
        match self {
            DomainError::InsufficientPoints { .. } => "insufficient_points",
            DomainError::MissingAssessment(_) => "missing_assessment",
            DomainError::PackIncomplete(_) => "pack_incomplete",
            DomainError::InvalidTransition { .. } => "invalid_transition",
            DomainError::AlreadyDecided { .. } => "already_decided",
            DomainError::NotAvailable(_) => "not_available",
            DomainError::NotFound(_) => "not_found",
            DomainError::Conflict(_) => "conflict",
            DomainError::Database(_) => "database",
            DomainError::Internal(_) => "internal",
        }
    }
}

/// Application layer errors - used by HTTP handlers
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Domain(#[from] DomainError),

    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Error response body for JSON responses
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error, kind, details) = match &self {
            AppError::Domain(e) => {
                let status = match e {
                    DomainError::InsufficientPoints { .. } => StatusCode::BAD_REQUEST,
                    DomainError::MissingAssessment(_) => StatusCode::CONFLICT,
                    DomainError::PackIncomplete(_) => StatusCode::UNPROCESSABLE_ENTITY,
                    DomainError::InvalidTransition { .. } => StatusCode::CONFLICT,
                    DomainError::AlreadyDecided { .. } => StatusCode::CONFLICT,
                    DomainError::NotAvailable(_) => StatusCode::FORBIDDEN,
                    DomainError::NotFound(_) => StatusCode::NOT_FOUND,
                    DomainError::Conflict(_) => StatusCode::CONFLICT,
                    DomainError::Database(_) | DomainError::Internal(_) => {
                        tracing::error!("Pipeline failure: {}", e);
                        StatusCode::INTERNAL_SERVER_ERROR
                    }
                };

                // Persistence details stay out of the response body
                let details = match e {
                    DomainError::Database(_) | DomainError::Internal(_) => None,
                    _ => Some(e.to_string()),
                };

                (status, "Pipeline error", e.kind(), details)
            }
            AppError::BadRequest(msg) => (
                StatusCode::BAD_REQUEST,
                "Bad request",
                "bad_request",
                Some(msg.clone()),
            ),
            AppError::NotFound(msg) => (
                StatusCode::NOT_FOUND,
                "Not found",
                "not_found",
                Some(msg.clone()),
            ),
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error",
                    "internal",
                    None,
                )
            }
        };

        let body = Json(ErrorResponse {
            error: error.to_string(),
            kind,
            details,
        });

        (status, body).into_response()
    }
}

//! Document domain entity
//!
//! Every full EUDR pack contains exactly one document of each of the six
//! types below; a partial pack is a data-integrity error. The closed enum
//! lets the assembler enforce that invariant through the type system.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::pack::PackId;

/// Unique identifier for a generated document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DocumentId(pub Uuid);

impl DocumentId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for DocumentId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for DocumentId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for DocumentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The six document types of a full EUDR pack
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentType {
    CoverSheet,
    ExportCertificate,
    ComplianceAssessment,
    DeforestationReport,
    DueDiligenceStatement,
    TraceabilityReport,
}

impl DocumentType {
    /// All six types, in pack presentation order
    pub const ALL: [DocumentType; 6] = [
        DocumentType::CoverSheet,
        DocumentType::ExportCertificate,
        DocumentType::ComplianceAssessment,
        DocumentType::DeforestationReport,
        DocumentType::DueDiligenceStatement,
        DocumentType::TraceabilityReport,
    ];

    /// Short code embedded in reference numbers
    pub fn code(&self) -> &'static str {
        match self {
            DocumentType::CoverSheet => "COVER",
            DocumentType::ExportCertificate => "CERT",
            DocumentType::ComplianceAssessment => "ASSESS",
            DocumentType::DeforestationReport => "DEFOREST",
            DocumentType::DueDiligenceStatement => "DDS",
            DocumentType::TraceabilityReport => "TRACE",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            DocumentType::CoverSheet => "EUDR Compliance Pack Cover Sheet",
            DocumentType::ExportCertificate => "LACRA Export Eligibility Certificate",
            DocumentType::ComplianceAssessment => "EUDR Compliance Assessment",
            DocumentType::DeforestationReport => "Deforestation Analysis Report",
            DocumentType::DueDiligenceStatement => "Due Diligence Statement",
            DocumentType::TraceabilityReport => "Supply Chain Traceability Report",
        }
    }

    pub fn issued_by(&self) -> &'static str {
        match self {
            DocumentType::ExportCertificate => "LACRA",
            _ => "LACRA / ECOENVIROS",
        }
    }

    /// Reference number for this document within the given pack.
    ///
    /// Embeds the type code and the full pack id so the reference is
    /// independently verifiable and resolves back to its parent pack.
    pub fn reference_number(&self, pack_id: &PackId) -> String {
        format!("{}-{}", self.code(), pack_id)
    }
}

impl std::fmt::Display for DocumentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DocumentType::CoverSheet => write!(f, "cover_sheet"),
            DocumentType::ExportCertificate => write!(f, "export_certificate"),
            DocumentType::ComplianceAssessment => write!(f, "compliance_assessment"),
            DocumentType::DeforestationReport => write!(f, "deforestation_report"),
            DocumentType::DueDiligenceStatement => write!(f, "due_diligence_statement"),
            DocumentType::TraceabilityReport => write!(f, "traceability_report"),
        }
    }
}

impl std::str::FromStr for DocumentType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "cover_sheet" => Ok(DocumentType::CoverSheet),
            "export_certificate" => Ok(DocumentType::ExportCertificate),
            "compliance_assessment" => Ok(DocumentType::ComplianceAssessment),
            "deforestation_report" => Ok(DocumentType::DeforestationReport),
            "due_diligence_statement" => Ok(DocumentType::DueDiligenceStatement),
            "traceability_report" => Ok(DocumentType::TraceabilityReport),
            _ => Err(format!("Unknown document type: {}", s)),
        }
    }
}

/// Resolve a reference number back to the document type and pack that
/// produced it.
pub fn resolve_reference(reference: &str) -> Option<(DocumentType, PackId)> {
    for doc_type in DocumentType::ALL {
        if let Some(rest) = reference.strip_prefix(doc_type.code()) {
            if let Some(pack_id) = rest.strip_prefix('-') {
                if !pack_id.is_empty() {
                    return Some((doc_type, PackId::from(pack_id)));
                }
            }
        }
    }
    None
}

/// A rendered document body with its download metadata
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedArtifact {
    pub content: String,
    pub content_type: &'static str,
    pub file_name: String,
}

/// A generated document belonging to a pack
///
/// `pack_id` is a back-reference for lookup only; the pack owns the
/// document, not the other way around.
#[derive(Debug, Clone, Serialize)]
pub struct DocumentRecord {
    pub id: DocumentId,
    pub pack_id: PackId,
    pub document_type: DocumentType,
    pub title: String,
    pub reference_number: String,
    pub issued_by: String,
    pub artifact: RenderedArtifact,
    pub created_at: DateTime<Utc>,
}

/// Data needed to persist a new document
#[derive(Debug, Clone)]
pub struct NewDocumentRecord {
    pub pack_id: PackId,
    pub document_type: DocumentType,
    pub title: String,
    pub reference_number: String,
    pub issued_by: String,
    pub artifact: RenderedArtifact,
}

//! Document renderer
//!
//! Renders the six compliance documents to paginated plain text. Rendering
//! is pure: templates read the pack context and never touch storage, so the
//! assembler can render everything up front and persist only complete packs.

mod layout;
mod templates;

use chrono::{DateTime, Utc};

use crate::domain::entities::{
    Assessment, DocumentType, ExporterMetadata, PackId, ProducerRecord, RenderedArtifact,
};
use crate::error::DomainError;

pub const DOCUMENT_CONTENT_TYPE: &str = "text/plain; charset=utf-8";

/// Everything the templates need to render one pack's documents
#[derive(Debug, Clone, Copy)]
pub struct PackContext<'a> {
    pub pack_id: &'a PackId,
    pub producer: &'a ProducerRecord,
    pub assessment: &'a Assessment,
    pub exporter: &'a ExporterMetadata,
    pub generated_at: DateTime<Utc>,
}

impl PackContext<'_> {
    /// Reference number of the given document within this pack
    pub fn reference(&self, document_type: DocumentType) -> String {
        document_type.reference_number(self.pack_id)
    }
}

/// Render one document of the pack.
///
/// The deforestation report requires producer GPS coordinates; rendering it
/// without them fails, which the assembler surfaces as an incomplete pack.
pub fn render(
    document_type: DocumentType,
    ctx: &PackContext<'_>,
) -> Result<RenderedArtifact, DomainError> {
    let body = match document_type {
        DocumentType::CoverSheet => templates::cover_sheet(ctx),
        DocumentType::ExportCertificate => templates::export_certificate(ctx),
        DocumentType::ComplianceAssessment => templates::compliance_assessment(ctx),
        DocumentType::DeforestationReport => templates::deforestation_report(ctx)?,
        DocumentType::DueDiligenceStatement => templates::due_diligence_statement(ctx),
        DocumentType::TraceabilityReport => templates::traceability_report(ctx),
    };

    let reference = ctx.reference(document_type);
    let content = layout::compose(
        document_type.title(),
        &reference,
        ctx.pack_id,
        ctx.generated_at,
        body,
    );

    Ok(RenderedArtifact {
        content,
        content_type: DOCUMENT_CONTENT_TYPE,
        file_name: format!(
            "{}_{}_{}.txt",
            document_type,
            ctx.pack_id,
            ctx.generated_at.format("%Y-%m-%d")
        ),
    })
}

//! Domain entities
//!
//! Core business types for the compliance-pack pipeline. Entities are plain
//! data with behavior methods; persistence lives behind the port traits.

mod boundary;
mod determination;
mod document;
mod pack;
mod producer;

pub use boundary::{format_coordinates, BoundaryPoint, MIN_BOUNDARY_POINTS};
pub use determination::{
    Assessment, AssessmentId, BiodiversityImpact, NewAssessment, RiskDetermination, RiskLevel,
};
pub use document::{
    resolve_reference, DocumentId, DocumentRecord, DocumentType, NewDocumentRecord,
    RenderedArtifact,
};
pub use pack::{
    AuditDecision, AuditEntry, CompliancePack, DecisionAction, ExporterMetadata, NewCompliancePack,
    PackId, PackStatus,
};
pub use producer::{ProducerId, ProducerRecord};

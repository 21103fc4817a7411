//! PostgreSQL adapter implementations

mod assessment_repo;
mod document_repo;
mod pack_repo;
mod producer_repo;

pub use assessment_repo::PostgresAssessmentRepository;
pub use document_repo::PostgresDocumentRepository;
pub use pack_repo::PostgresPackRepository;
pub use producer_repo::PostgresProducerRepository;

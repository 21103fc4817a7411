//! Application services
//!
//! Service structs generic over the repository ports. Handlers own them
//! through the concrete adapter types; tests use the in-memory mocks.

pub mod export_service;
pub mod pack_service;
pub mod risk_service;

pub use export_service::{CandidateProducer, ExportService};
pub use pack_service::PackService;
pub use risk_service::RiskService;

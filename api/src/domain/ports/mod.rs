//! Port traits for the adapters layer

mod repositories;

pub use repositories::{
    AssessmentRepository, DocumentRepository, PackRepository, ProducerRepository,
};

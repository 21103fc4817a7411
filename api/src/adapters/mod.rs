//! Adapters implementing the domain ports

pub mod postgres;

pub use postgres::{
    PostgresAssessmentRepository, PostgresDocumentRepository, PostgresPackRepository,
    PostgresProducerRepository,
};

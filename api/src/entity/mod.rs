//! SeaORM entity models
//!
//! Row-level models for the compliance schema. Domain conversions live
//! next to the Postgres adapters.

pub mod assessments;
pub mod compliance_documents;
pub mod compliance_packs;
pub mod pack_audit_entries;
pub mod producers;

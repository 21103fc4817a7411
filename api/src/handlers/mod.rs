//! HTTP handlers
//!
//! Axum request handlers for the API endpoints.

pub mod boundaries;
pub mod documents;
pub mod packs;

pub use boundaries::submit_boundary;
pub use documents::{download_document, verify_reference};
pub use packs::{
    decide_pack, delete_pack, generate_pack, get_pack, list_approved_packs, list_packs,
    list_pending_packs, list_ready_producers, publish_pack,
};

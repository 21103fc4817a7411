//! Domain layer
//!
//! Entities, pure geometry and classification logic, and the port traits the
//! adapters implement. Nothing in this layer performs I/O directly.

pub mod classifier;
pub mod entities;
pub mod geometry;
pub mod ports;
pub mod zones;

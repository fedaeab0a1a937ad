//! gradebook-core — domain model, grade scale, and aggregation engine.
//!
//! This crate defines the fundamental types, the grade-scale functions, the
//! aggregation logic for course summaries and transcripts, and the
//! `RecordsApi` trait that the domain store uses to talk to the external
//! system of record.

pub mod aggregate;
pub mod error;
pub mod model;
pub mod scale;
pub mod snapshot;
pub mod traits;

//! gradebook-store — the client-side domain store.
//!
//! `RecordsStore` keeps an in-memory, read-optimized mirror of students,
//! courses, and enrollments, populated from the external system of record
//! through the `RecordsApi` trait. Mutations go remote-first: the local
//! mirror is only updated after the remote accepts the write, so a single
//! logical write never leaves it partially updated.

pub mod store;
pub mod sync;

pub use store::RecordsStore;
pub use sync::{GradeFetchFailure, LoadReport};

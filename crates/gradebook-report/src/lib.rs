//! gradebook-report — rendering of transcripts and course summaries.
//!
//! Produces self-contained HTML (with an SVG grade-distribution chart),
//! fixed-width console text, and timestamped JSON report documents.

pub mod document;
pub mod html;
pub mod text;

pub use document::ReportDocument;

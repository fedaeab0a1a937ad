//! Timestamped report documents with JSON persistence.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A rendered report wrapped with identity and provenance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportDocument<T> {
    /// Unique report identifier.
    pub id: Uuid,
    /// When the report was generated.
    pub created_at: DateTime<Utc>,
    /// The report payload (a transcript or course summary).
    pub report: T,
}

impl<T: Serialize + DeserializeOwned> ReportDocument<T> {
    pub fn new(report: T) -> Self {
        Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            report,
        }
    }

    /// Save the document as pretty-printed JSON.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize report")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write report to {}", path.display()))?;
        Ok(())
    }

    /// Load a document from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read report from {}", path.display()))?;
        let document =
            serde_json::from_str(&content).context("failed to parse report JSON")?;
        Ok(document)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gradebook_core::aggregate::{summarize, CourseSummary, GradeObservation};

    #[test]
    fn json_roundtrip() {
        let summary = summarize(
            "CS101",
            "Intro to CS",
            &[GradeObservation::graded("S001", 90.0)],
        );
        let document = ReportDocument::new(summary.clone());
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("summary.json");

        document.save_json(&path).unwrap();
        let loaded: ReportDocument<CourseSummary> = ReportDocument::load_json(&path).unwrap();
        assert_eq!(loaded.id, document.id);
        assert_eq!(loaded.report, summary);
    }
}

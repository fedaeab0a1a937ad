//! Full-state JSON snapshots for backup and restore.
//!
//! A snapshot carries the complete student/course/enrollment/grade state.
//! Loading one validates its structural shape first; a malformed document
//! is rejected wholesale so existing in-memory state is never touched.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::error::StoreError;
use crate::model::{Course, Student};

/// A point-in-time copy of the whole domain state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Students keyed by student id.
    #[serde(default)]
    pub students: BTreeMap<String, Student>,
    /// Courses keyed by course code.
    #[serde(default)]
    pub courses: BTreeMap<String, Course>,
    /// Course code → enrolled student ids, in display order.
    #[serde(default)]
    pub enrollments: BTreeMap<String, Vec<String>>,
}

impl Snapshot {
    /// Check the structural invariants a well-formed snapshot must hold.
    ///
    /// - map keys match the ids inside their records
    /// - every grade is finite and within `[0, 100]`
    /// - enrollments reference known courses and students, without
    ///   duplicate membership
    /// - every grade entry implies an enrollment for that pairing
    pub fn validate(&self) -> Result<(), StoreError> {
        for (id, student) in &self.students {
            if *id != student.student_id {
                return Err(StoreError::MalformedSnapshot(format!(
                    "student key '{id}' does not match record id '{}'",
                    student.student_id
                )));
            }
            for (course_code, &grade) in &student.grades {
                if !grade.is_finite() || !(0.0..=100.0).contains(&grade) {
                    return Err(StoreError::MalformedSnapshot(format!(
                        "grade {grade} for ('{id}', '{course_code}') is out of range"
                    )));
                }
                if !self.courses.contains_key(course_code) {
                    return Err(StoreError::MalformedSnapshot(format!(
                        "grade for '{id}' references unknown course '{course_code}'"
                    )));
                }
                let enrolled = self
                    .enrollments
                    .get(course_code)
                    .is_some_and(|members| members.iter().any(|m| m == id));
                if !enrolled {
                    return Err(StoreError::MalformedSnapshot(format!(
                        "grade for ('{id}', '{course_code}') without enrollment"
                    )));
                }
            }
        }

        for (code, course) in &self.courses {
            if *code != course.course_code {
                return Err(StoreError::MalformedSnapshot(format!(
                    "course key '{code}' does not match record code '{}'",
                    course.course_code
                )));
            }
        }

        for (course_code, members) in &self.enrollments {
            if !self.courses.contains_key(course_code) {
                return Err(StoreError::MalformedSnapshot(format!(
                    "enrollment references unknown course '{course_code}'"
                )));
            }
            let mut seen = std::collections::HashSet::new();
            for student_id in members {
                if !self.students.contains_key(student_id) {
                    return Err(StoreError::MalformedSnapshot(format!(
                        "enrollment in '{course_code}' references unknown student '{student_id}'"
                    )));
                }
                if !seen.insert(student_id) {
                    return Err(StoreError::MalformedSnapshot(format!(
                        "student '{student_id}' enrolled twice in '{course_code}'"
                    )));
                }
            }
        }

        Ok(())
    }

    /// Save the snapshot as pretty-printed JSON.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize snapshot")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write snapshot to {}", path.display()))?;
        Ok(())
    }

    /// Load and validate a snapshot from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read snapshot from {}", path.display()))?;
        let snapshot: Snapshot =
            serde_json::from_str(&content).context("failed to parse snapshot JSON")?;
        snapshot.validate().context("snapshot failed validation")?;
        Ok(snapshot)
    }
}

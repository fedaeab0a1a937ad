//! Core data model types for gradebook.
//!
//! These are the record types the store mirrors locally and the snapshot
//! format serializes. Students and courses are keyed by their unique ids;
//! neither is ever deleted within this system.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A registered student with their per-course grades.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Student {
    /// Unique student identifier.
    pub student_id: String,
    /// Full display name.
    pub student_name: String,
    /// Course code → numeric grade. Mutated only through grade assignment.
    #[serde(default)]
    pub grades: BTreeMap<String, f64>,
}

impl Student {
    pub fn new(student_id: impl Into<String>, student_name: impl Into<String>) -> Self {
        Self {
            student_id: student_id.into(),
            student_name: student_name.into(),
            grades: BTreeMap::new(),
        }
    }

    /// The grade for a course, if one has been assigned.
    pub fn grade(&self, course_code: &str) -> Option<f64> {
        self.grades.get(course_code).copied()
    }

    /// Record or overwrite a grade. Reassignment overwrites silently.
    pub fn set_grade(&mut self, course_code: impl Into<String>, grade: f64) {
        self.grades.insert(course_code.into(), grade);
    }
}

/// A registered course. Immutable after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    /// Unique course code (e.g. "CS101").
    pub course_code: String,
    /// Full course title.
    pub course_name: String,
}

impl Course {
    pub fn new(course_code: impl Into<String>, course_name: impl Into<String>) -> Self {
        Self {
            course_code: course_code.into(),
            course_name: course_name.into(),
        }
    }
}

//! Bulk synchronization with the system of record.
//!
//! The initial load fetches the full student and course collections, then
//! walks the students one at a time (in a fixed order, to bound load on
//! the external system) rebuilding enrollment membership and per-student
//! grades from their grade records. Each per-student fetch is an
//! independent task: one failure is logged and reported, never aborting
//! the rest.

use std::collections::HashMap;

use anyhow::Result;
use serde::Serialize;
use tracing::warn;

use gradebook_core::error::StoreError;
use gradebook_core::model::{Course, Student};

use crate::store::RecordsStore;

/// Outcome of a bulk load.
#[derive(Debug, Clone, Serialize)]
pub struct LoadReport {
    /// Students in the rebuilt mirror.
    pub students: usize,
    /// Courses in the rebuilt mirror.
    pub courses: usize,
    /// Per-student grade fetches that failed. Those students remain in
    /// the mirror with empty grades until a later refresh succeeds.
    pub failed_grade_fetches: Vec<GradeFetchFailure>,
}

/// One failed per-student grade fetch during bulk load.
#[derive(Debug, Clone, Serialize)]
pub struct GradeFetchFailure {
    pub student_id: String,
    pub error: String,
}

impl LoadReport {
    /// Whether every grade fetch succeeded.
    pub fn is_complete(&self) -> bool {
        self.failed_grade_fetches.is_empty()
    }
}

impl RecordsStore {
    /// Rebuild the whole mirror from the system of record.
    ///
    /// The new state is assembled off to the side and swapped in with a
    /// single assignment at the end, so a concurrent reader of the store
    /// never observes a half-built mirror; if two loads race, the last
    /// writer wins.
    pub async fn load(&mut self) -> Result<LoadReport> {
        let mut students: HashMap<String, Student> = self
            .api
            .list_students()
            .await?
            .into_iter()
            .map(|s| (s.student_id.clone(), s))
            .collect();

        let mut enrollments: HashMap<String, Vec<String>> = HashMap::new();
        let courses: HashMap<String, Course> = self
            .api
            .list_courses()
            .await?
            .into_iter()
            .map(|c| {
                enrollments.insert(c.course_code.clone(), Vec::new());
                (c.course_code.clone(), c)
            })
            .collect();

        // Fixed order keeps load behavior reproducible across runs.
        let mut student_ids: Vec<String> = students.keys().cloned().collect();
        student_ids.sort();

        let mut failures = Vec::new();
        for student_id in &student_ids {
            let records = match self.api.student_grades(student_id).await {
                Ok(records) => records,
                Err(e) => {
                    warn!("grade fetch failed for student '{student_id}': {e:#}");
                    failures.push(GradeFetchFailure {
                        student_id: student_id.clone(),
                        error: e.to_string(),
                    });
                    continue;
                }
            };

            for record in records {
                if !courses.contains_key(&record.course_code) {
                    warn!(
                        "grade for ('{student_id}', '{}') references unknown course, skipping",
                        record.course_code
                    );
                    continue;
                }
                if !record.grade.is_finite() || !(0.0..=100.0).contains(&record.grade) {
                    warn!(
                        "grade {} for ('{student_id}', '{}') is out of range, skipping",
                        record.grade, record.course_code
                    );
                    continue;
                }
                let members = enrollments.entry(record.course_code.clone()).or_default();
                if !members.iter().any(|m| m == student_id) {
                    members.push(student_id.clone());
                }
                if let Some(student) = students.get_mut(student_id) {
                    student.set_grade(&record.course_code, record.grade);
                }
            }
        }

        let report = LoadReport {
            students: students.len(),
            courses: courses.len(),
            failed_grade_fetches: failures,
        };

        self.students = students;
        self.courses = courses;
        self.enrollments = enrollments;
        Ok(report)
    }

    /// Re-fetch one student's grade records and fold them into the mirror.
    ///
    /// This is the recovery path for a grade fetch that failed during bulk
    /// load.
    pub async fn refresh_student(&mut self, student_id: &str) -> Result<()> {
        if !self.students.contains_key(student_id) {
            return Err(StoreError::UnknownStudent(student_id.to_string()).into());
        }

        let records = self.api.student_grades(student_id).await?;
        for record in records {
            if !self.courses.contains_key(&record.course_code) {
                continue;
            }
            if let Some(student) = self.students.get_mut(student_id) {
                student.set_grade(&record.course_code, record.grade);
            }
            self.insert_membership(student_id, &record.course_code);
        }
        Ok(())
    }

    /// Re-fetch one course's grade records and fold them into the mirror.
    pub async fn refresh_course(&mut self, course_code: &str) -> Result<()> {
        if !self.courses.contains_key(course_code) {
            return Err(StoreError::UnknownCourse(course_code.to_string()).into());
        }

        let records = self.api.course_grades(course_code).await?;
        for record in records {
            if let Some(student) = self.students.get_mut(&record.student_id) {
                student.set_grade(course_code, record.grade);
            }
            self.insert_membership(&record.student_id, course_code);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use gradebook_client::MockApi;

    use super::*;

    fn seeded_api() -> Arc<MockApi> {
        let api = Arc::new(MockApi::new());
        api.seed_student("S001", "Ada Lovelace");
        api.seed_student("S002", "Alan Turing");
        api.seed_student("S003", "Grace Hopper");
        api.seed_course("CS101", "Intro to CS");
        api.seed_course("CS102", "Data Structures");
        api.seed_grade("S001", "CS101", 90.0);
        api.seed_grade("S001", "CS102", 75.0);
        api.seed_grade("S002", "CS101", 40.0);
        api
    }

    #[tokio::test]
    async fn load_rebuilds_mirror() {
        let api = seeded_api();
        let mut store = RecordsStore::new(api);

        let report = store.load().await.unwrap();
        assert_eq!(report.students, 3);
        assert_eq!(report.courses, 2);
        assert!(report.is_complete());

        assert_eq!(store.student("S001").unwrap().grade("CS101"), Some(90.0));
        assert_eq!(store.student("S002").unwrap().grade("CS101"), Some(40.0));
        assert_eq!(store.course_students("CS101").len(), 2);
        assert_eq!(store.course_students("CS102").len(), 1);
        // Enrolled nobody, graded nobody.
        assert!(store.student("S003").unwrap().grades.is_empty());
    }

    #[tokio::test]
    async fn one_failing_fetch_does_not_abort_the_rest() {
        let api = seeded_api();
        api.fail_grades_for("S001");
        let mut store = RecordsStore::new(api.clone());

        let report = store.load().await.unwrap();
        assert_eq!(report.students, 3);
        assert_eq!(report.failed_grade_fetches.len(), 1);
        assert_eq!(report.failed_grade_fetches[0].student_id, "S001");

        // The failed student is present with empty grades; others loaded.
        assert!(store.student("S001").unwrap().grades.is_empty());
        assert_eq!(store.student("S002").unwrap().grade("CS101"), Some(40.0));
    }

    #[tokio::test]
    async fn second_load_overwrites_mirror() {
        let api = seeded_api();
        let mut store = RecordsStore::new(api.clone());
        store.load().await.unwrap();

        api.seed_grade("S003", "CS101", 65.0);
        let report = store.load().await.unwrap();
        assert!(report.is_complete());
        assert_eq!(store.student("S003").unwrap().grade("CS101"), Some(65.0));
        assert_eq!(store.course_students("CS101").len(), 3);
    }

    #[tokio::test]
    async fn refresh_student_recovers_failed_fetch() {
        let api = seeded_api();
        api.fail_grades_for("S001");
        let mut store = RecordsStore::new(api.clone());
        store.load().await.unwrap();
        assert!(store.student("S001").unwrap().grades.is_empty());

        // The transient failure clears; an explicit refresh recovers.
        let api2 = seeded_api();
        store.api = api2;
        store.refresh_student("S001").await.unwrap();
        assert_eq!(store.student("S001").unwrap().grade("CS101"), Some(90.0));
        assert!(store
            .course_students("CS101")
            .iter()
            .any(|s| s.student_id == "S001"));
    }

    #[tokio::test]
    async fn refresh_course_folds_new_grades() {
        let api = seeded_api();
        let mut store = RecordsStore::new(api.clone());
        store.load().await.unwrap();

        api.seed_grade("S002", "CS102", 55.0);
        store.refresh_course("CS102").await.unwrap();
        assert_eq!(store.student("S002").unwrap().grade("CS102"), Some(55.0));
        assert_eq!(store.course_students("CS102").len(), 2);
    }

    #[tokio::test]
    async fn refresh_unknown_entities_fail() {
        let api = seeded_api();
        let mut store = RecordsStore::new(api);
        store.load().await.unwrap();

        assert!(store.refresh_student("S404").await.is_err());
        assert!(store.refresh_course("CS404").await.is_err());
    }
}

//! The in-memory mirror and its mutation operations.

use std::collections::HashMap;
use std::sync::Arc;

use anyhow::Result;
use tracing::warn;

use gradebook_core::aggregate::{self, CourseGrade, CourseSummary, GradeObservation, Transcript};
use gradebook_core::error::{validate_grade, StoreError};
use gradebook_core::model::{Course, Student};
use gradebook_core::snapshot::Snapshot;
use gradebook_core::traits::{EnrollmentRequest, GradeAssignment, NewCourse, NewStudent, RecordsApi};

/// The client-side domain store.
///
/// Constructed explicitly at application start and passed by reference to
/// consumers; there is no ambient singleton. The mirror is a cache of the
/// external system of record, not a source of truth.
pub struct RecordsStore {
    pub(crate) api: Arc<dyn RecordsApi>,
    pub(crate) students: HashMap<String, Student>,
    pub(crate) courses: HashMap<String, Course>,
    /// Course code → enrolled student ids, in API response order.
    pub(crate) enrollments: HashMap<String, Vec<String>>,
}

impl RecordsStore {
    pub fn new(api: Arc<dyn RecordsApi>) -> Self {
        Self {
            api,
            students: HashMap::new(),
            courses: HashMap::new(),
            enrollments: HashMap::new(),
        }
    }

    /// Register a student. Local duplicate and empty-field checks run
    /// before the remote create; the mirror is updated only on success.
    pub async fn add_student(&mut self, student_id: &str, student_name: &str) -> Result<()> {
        if student_id.trim().is_empty() {
            return Err(StoreError::MissingField("student_id").into());
        }
        if student_name.trim().is_empty() {
            return Err(StoreError::MissingField("student_name").into());
        }
        if self.students.contains_key(student_id) {
            return Err(StoreError::DuplicateStudent(student_id.to_string()).into());
        }

        let created = self
            .api
            .create_student(&NewStudent {
                student_id: student_id.to_string(),
                student_name: student_name.to_string(),
            })
            .await?;
        self.students.insert(created.student_id.clone(), created);
        Ok(())
    }

    /// Register a course. Same duplicate-key contract as `add_student`.
    pub async fn add_course(&mut self, course_code: &str, course_name: &str) -> Result<()> {
        if course_code.trim().is_empty() {
            return Err(StoreError::MissingField("course_code").into());
        }
        if course_name.trim().is_empty() {
            return Err(StoreError::MissingField("course_name").into());
        }
        if self.courses.contains_key(course_code) {
            return Err(StoreError::DuplicateCourse(course_code.to_string()).into());
        }

        let created = self
            .api
            .create_course(&NewCourse {
                course_code: course_code.to_string(),
                course_name: course_name.to_string(),
            })
            .await?;
        self.enrollments
            .entry(created.course_code.clone())
            .or_default();
        self.courses.insert(created.course_code.clone(), created);
        Ok(())
    }

    /// Enroll a student in a course. Membership is idempotent: a remote
    /// success never produces a duplicate entry in the mirror.
    pub async fn enroll(&mut self, student_id: &str, course_code: &str) -> Result<()> {
        if self.is_enrolled(student_id, course_code) {
            return Err(StoreError::DuplicateEnrollment {
                student_id: student_id.to_string(),
                course_code: course_code.to_string(),
            }
            .into());
        }

        self.api
            .enroll(&EnrollmentRequest {
                student_id: student_id.to_string(),
                course_code: course_code.to_string(),
            })
            .await?;
        self.insert_membership(student_id, course_code);
        Ok(())
    }

    /// Assign or overwrite a grade.
    ///
    /// The grade is validated locally first; invalid input fails without a
    /// network round trip and leaves the mirror untouched. On remote
    /// success the mirror entry is overwritten and the membership set is
    /// updated, since a stored grade implies enrollment.
    pub async fn assign_grade(
        &mut self,
        student_id: &str,
        course_code: &str,
        grade: f64,
    ) -> Result<()> {
        validate_grade(grade)?;

        self.api
            .assign_grade(&GradeAssignment {
                student_id: student_id.to_string(),
                course_code: course_code.to_string(),
                grade,
            })
            .await?;

        match self.students.get_mut(student_id) {
            Some(student) => student.set_grade(course_code, grade),
            None => warn!("grade accepted remotely for '{student_id}' missing from mirror"),
        }
        self.insert_membership(student_id, course_code);
        Ok(())
    }

    pub(crate) fn insert_membership(&mut self, student_id: &str, course_code: &str) {
        let members = self.enrollments.entry(course_code.to_string()).or_default();
        if !members.iter().any(|m| m == student_id) {
            members.push(student_id.to_string());
        }
    }

    fn is_enrolled(&self, student_id: &str, course_code: &str) -> bool {
        self.enrollments
            .get(course_code)
            .is_some_and(|members| members.iter().any(|m| m == student_id))
    }

    // -----------------------------------------------------------------
    // Lookups
    // -----------------------------------------------------------------

    pub fn student(&self, student_id: &str) -> Option<&Student> {
        self.students.get(student_id)
    }

    pub fn course(&self, course_code: &str) -> Option<&Course> {
        self.courses.get(course_code)
    }

    /// All students, sorted by id.
    pub fn students(&self) -> Vec<&Student> {
        let mut students: Vec<&Student> = self.students.values().collect();
        students.sort_by(|a, b| a.student_id.cmp(&b.student_id));
        students
    }

    /// All courses, sorted by code.
    pub fn courses(&self) -> Vec<&Course> {
        let mut courses: Vec<&Course> = self.courses.values().collect();
        courses.sort_by(|a, b| a.course_code.cmp(&b.course_code));
        courses
    }

    /// Students enrolled in a course, in membership order.
    ///
    /// Ids present in the membership set but absent from the student
    /// mirror (a partially synced state) are filtered out.
    pub fn course_students(&self, course_code: &str) -> Vec<&Student> {
        self.enrollments
            .get(course_code)
            .map(|members| {
                members
                    .iter()
                    .filter_map(|id| self.students.get(id))
                    .collect()
            })
            .unwrap_or_default()
    }

    // -----------------------------------------------------------------
    // Derived reports
    // -----------------------------------------------------------------

    /// Aggregate summary for a course, or `None` if the course is unknown.
    ///
    /// Every enrolled student contributes an observation, graded or not.
    pub fn course_summary(&self, course_code: &str) -> Option<CourseSummary> {
        let course = self.courses.get(course_code)?;
        let observations: Vec<GradeObservation> = self
            .course_students(course_code)
            .into_iter()
            .map(|student| GradeObservation {
                student_id: student.student_id.clone(),
                grade: student.grade(course_code),
            })
            .collect();
        Some(aggregate::summarize(
            course_code,
            &course.course_name,
            &observations,
        ))
    }

    /// Transcript for a student, or `None` if the student is unknown.
    ///
    /// Grades whose course is missing from the mirror are skipped.
    pub fn student_transcript(&self, student_id: &str) -> Option<Transcript> {
        let student = self.students.get(student_id)?;
        let grades: Vec<CourseGrade> = student
            .grades
            .iter()
            .filter_map(|(course_code, &grade)| {
                self.courses.get(course_code).map(|course| CourseGrade {
                    course_code: course_code.clone(),
                    course_name: course.course_name.clone(),
                    grade,
                })
            })
            .collect();
        Some(aggregate::transcript(
            student_id,
            &student.student_name,
            &grades,
        ))
    }

    // -----------------------------------------------------------------
    // Snapshots
    // -----------------------------------------------------------------

    /// Export the full mirror as a snapshot document.
    pub fn export_snapshot(&self) -> Snapshot {
        Snapshot {
            students: self
                .students
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
            courses: self
                .courses
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
            enrollments: self
                .enrollments
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
        }
    }

    /// Replace the whole mirror with a snapshot.
    ///
    /// The snapshot is validated first; on failure the existing state is
    /// preserved untouched.
    pub fn import_snapshot(&mut self, snapshot: Snapshot) -> Result<(), StoreError> {
        snapshot.validate()?;
        self.students = snapshot.students.into_iter().collect();
        self.courses = snapshot.courses.into_iter().collect();
        self.enrollments = snapshot.enrollments.into_iter().collect();
        Ok(())
    }

    /// Clear the mirror, e.g. on logout.
    pub fn reset(&mut self) {
        self.students.clear();
        self.courses.clear();
        self.enrollments.clear();
    }
}

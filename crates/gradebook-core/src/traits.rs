//! The `RecordsApi` trait and its wire types.
//!
//! This async trait is the seam between the domain store and the external
//! system of record. `gradebook-client` implements it over HTTP; its
//! `MockApi` implements it in memory for tests.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::model::{Course, Student};

/// The external system of record for students, courses, and grades.
#[async_trait]
pub trait RecordsApi: Send + Sync {
    /// List every registered student. Grades are not included.
    async fn list_students(&self) -> anyhow::Result<Vec<Student>>;

    /// Create a student. The remote rejects duplicate ids.
    async fn create_student(&self, student: &NewStudent) -> anyhow::Result<Student>;

    /// List every registered course.
    async fn list_courses(&self) -> anyhow::Result<Vec<Course>>;

    /// Create a course. The remote rejects duplicate codes.
    async fn create_course(&self, course: &NewCourse) -> anyhow::Result<Course>;

    /// All grade records for one student.
    async fn student_grades(&self, student_id: &str) -> anyhow::Result<Vec<GradeRecord>>;

    /// All grade records for one course.
    async fn course_grades(&self, course_code: &str) -> anyhow::Result<Vec<StudentGradeRecord>>;

    /// Enroll a student in a course. The remote rejects duplicates and
    /// unknown references.
    async fn enroll(&self, enrollment: &EnrollmentRequest) -> anyhow::Result<()>;

    /// Upsert a grade for an enrolled (student, course) pair.
    async fn assign_grade(&self, assignment: &GradeAssignment) -> anyhow::Result<()>;
}

/// Request body for student creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewStudent {
    pub student_id: String,
    pub student_name: String,
}

/// Request body for course creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewCourse {
    pub course_code: String,
    pub course_name: String,
}

/// Request body for enrollment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnrollmentRequest {
    pub student_id: String,
    pub course_code: String,
}

/// Request body for grade assignment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GradeAssignment {
    pub student_id: String,
    pub course_code: String,
    pub grade: f64,
}

/// One grade record from a per-student query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradeRecord {
    pub course_code: String,
    pub grade: f64,
}

/// One grade record from a per-course query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentGradeRecord {
    pub student_id: String,
    pub grade: f64,
}

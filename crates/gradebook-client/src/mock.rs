//! Mock records API for testing.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use gradebook_core::error::ApiError;
use gradebook_core::model::{Course, Student};
use gradebook_core::traits::{
    EnrollmentRequest, GradeAssignment, GradeRecord, NewCourse, NewStudent, RecordsApi,
    StudentGradeRecord,
};

#[derive(Default)]
struct MockState {
    students: HashMap<String, Student>,
    courses: HashMap<String, Course>,
    enrollments: HashMap<String, Vec<String>>,
    /// Student ids whose grade fetch should fail, for bulk-load tests.
    failing_grade_fetches: HashSet<String>,
}

/// An in-memory system of record for testing the store without a server.
///
/// Behaves like the real API: duplicate keys and unenrolled grade
/// assignments are rejected as conflicts, unknown references as not-found.
#[derive(Default)]
pub struct MockApi {
    state: Mutex<MockState>,
    call_count: AtomicU32,
}

impl MockApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of API calls made, across all operations.
    pub fn call_count(&self) -> u32 {
        self.call_count.load(Ordering::Relaxed)
    }

    /// Pre-register a student without going through the API surface.
    pub fn seed_student(&self, student_id: &str, student_name: &str) {
        let mut state = self.state.lock().unwrap();
        state
            .students
            .insert(student_id.to_string(), Student::new(student_id, student_name));
    }

    /// Pre-register a course without going through the API surface.
    pub fn seed_course(&self, course_code: &str, course_name: &str) {
        let mut state = self.state.lock().unwrap();
        state
            .courses
            .insert(course_code.to_string(), Course::new(course_code, course_name));
        state.enrollments.entry(course_code.to_string()).or_default();
    }

    /// Pre-assign a grade, enrolling the student as a side effect.
    pub fn seed_grade(&self, student_id: &str, course_code: &str, grade: f64) {
        let mut state = self.state.lock().unwrap();
        let members = state.enrollments.entry(course_code.to_string()).or_default();
        if !members.iter().any(|m| m == student_id) {
            members.push(student_id.to_string());
        }
        if let Some(student) = state.students.get_mut(student_id) {
            student.set_grade(course_code, grade);
        }
    }

    /// Make `student_grades` fail for one student, to exercise per-item
    /// failure handling during bulk load.
    pub fn fail_grades_for(&self, student_id: &str) {
        let mut state = self.state.lock().unwrap();
        state.failing_grade_fetches.insert(student_id.to_string());
    }

    fn record_call(&self) {
        self.call_count.fetch_add(1, Ordering::Relaxed);
    }
}

#[async_trait]
impl RecordsApi for MockApi {
    async fn list_students(&self) -> anyhow::Result<Vec<Student>> {
        self.record_call();
        let state = self.state.lock().unwrap();
        let mut students: Vec<Student> = state
            .students
            .values()
            .map(|s| Student::new(&s.student_id, &s.student_name))
            .collect();
        students.sort_by(|a, b| a.student_id.cmp(&b.student_id));
        Ok(students)
    }

    async fn create_student(&self, student: &NewStudent) -> anyhow::Result<Student> {
        self.record_call();
        let mut state = self.state.lock().unwrap();
        if state.students.contains_key(&student.student_id) {
            return Err(ApiError::Conflict {
                message: format!("student '{}' already exists", student.student_id),
            }
            .into());
        }
        let record = Student::new(&student.student_id, &student.student_name);
        state
            .students
            .insert(student.student_id.clone(), record.clone());
        Ok(record)
    }

    async fn list_courses(&self) -> anyhow::Result<Vec<Course>> {
        self.record_call();
        let state = self.state.lock().unwrap();
        let mut courses: Vec<Course> = state.courses.values().cloned().collect();
        courses.sort_by(|a, b| a.course_code.cmp(&b.course_code));
        Ok(courses)
    }

    async fn create_course(&self, course: &NewCourse) -> anyhow::Result<Course> {
        self.record_call();
        let mut state = self.state.lock().unwrap();
        if state.courses.contains_key(&course.course_code) {
            return Err(ApiError::Conflict {
                message: format!("course '{}' already exists", course.course_code),
            }
            .into());
        }
        let record = Course::new(&course.course_code, &course.course_name);
        state
            .courses
            .insert(course.course_code.clone(), record.clone());
        state
            .enrollments
            .entry(course.course_code.clone())
            .or_default();
        Ok(record)
    }

    async fn student_grades(&self, student_id: &str) -> anyhow::Result<Vec<GradeRecord>> {
        self.record_call();
        let state = self.state.lock().unwrap();
        if state.failing_grade_fetches.contains(student_id) {
            return Err(ApiError::Network("connection reset by peer".into()).into());
        }
        let student = state
            .students
            .get(student_id)
            .ok_or_else(|| ApiError::NotFound(format!("student '{student_id}'")))?;
        Ok(student
            .grades
            .iter()
            .map(|(course_code, &grade)| GradeRecord {
                course_code: course_code.clone(),
                grade,
            })
            .collect())
    }

    async fn course_grades(&self, course_code: &str) -> anyhow::Result<Vec<StudentGradeRecord>> {
        self.record_call();
        let state = self.state.lock().unwrap();
        if !state.courses.contains_key(course_code) {
            return Err(ApiError::NotFound(format!("course '{course_code}'")).into());
        }
        let members = state.enrollments.get(course_code).cloned().unwrap_or_default();
        Ok(members
            .iter()
            .filter_map(|student_id| {
                state
                    .students
                    .get(student_id)
                    .and_then(|s| s.grade(course_code))
                    .map(|grade| StudentGradeRecord {
                        student_id: student_id.clone(),
                        grade,
                    })
            })
            .collect())
    }

    async fn enroll(&self, enrollment: &EnrollmentRequest) -> anyhow::Result<()> {
        self.record_call();
        let mut state = self.state.lock().unwrap();
        if !state.students.contains_key(&enrollment.student_id) {
            return Err(
                ApiError::NotFound(format!("student '{}'", enrollment.student_id)).into(),
            );
        }
        if !state.courses.contains_key(&enrollment.course_code) {
            return Err(
                ApiError::NotFound(format!("course '{}'", enrollment.course_code)).into(),
            );
        }
        let members = state
            .enrollments
            .entry(enrollment.course_code.clone())
            .or_default();
        if members.iter().any(|m| m == &enrollment.student_id) {
            return Err(ApiError::Conflict {
                message: format!(
                    "student '{}' is already enrolled in '{}'",
                    enrollment.student_id, enrollment.course_code
                ),
            }
            .into());
        }
        members.push(enrollment.student_id.clone());
        Ok(())
    }

    async fn assign_grade(&self, assignment: &GradeAssignment) -> anyhow::Result<()> {
        self.record_call();
        let mut state = self.state.lock().unwrap();
        let enrolled = state
            .enrollments
            .get(&assignment.course_code)
            .is_some_and(|members| members.iter().any(|m| m == &assignment.student_id));
        if !enrolled {
            return Err(ApiError::Conflict {
                message: format!(
                    "student '{}' is not enrolled in '{}'",
                    assignment.student_id, assignment.course_code
                ),
            }
            .into());
        }
        let Some(student) = state.students.get_mut(&assignment.student_id) else {
            return Err(
                ApiError::NotFound(format!("student '{}'", assignment.student_id)).into(),
            );
        };
        student.set_grade(&assignment.course_code, assignment.grade);
        Ok(())
    }
}

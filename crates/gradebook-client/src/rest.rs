//! HTTP implementation of `RecordsApi` against the records REST API.

use async_trait::async_trait;
use serde::Deserialize;
use tracing::instrument;

use gradebook_core::error::ApiError;
use gradebook_core::model::{Course, Student};
use gradebook_core::traits::{
    EnrollmentRequest, GradeAssignment, GradeRecord, NewCourse, NewStudent, RecordsApi,
    StudentGradeRecord,
};

const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Client for the records REST API.
pub struct RestClient {
    base_url: String,
    timeout_secs: u64,
    client: reqwest::Client,
}

/// Error body shape the API uses for rejections.
#[derive(Deserialize)]
struct ErrorDetail {
    detail: String,
}

impl RestClient {
    /// Create a client against the given base URL, or the local default.
    pub fn new(base_url: Option<String>) -> Self {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT_SECS)
    }

    pub fn with_timeout(base_url: Option<String>, timeout_secs: u64) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(timeout_secs))
            .build()
            .expect("failed to build HTTP client");

        Self {
            base_url: base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            timeout_secs,
            client,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    fn transport_error(&self, e: reqwest::Error) -> ApiError {
        if e.is_timeout() {
            ApiError::Timeout(self.timeout_secs)
        } else {
            ApiError::Network(e.to_string())
        }
    }

    /// Map a non-success response to the error taxonomy.
    ///
    /// 404 is an unknown reference, 400/409 are logical conflicts
    /// (duplicate key, duplicate enrollment, grade for an unenrolled
    /// pairing), anything else ≥400 is surfaced with its status.
    async fn check(&self, response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
        let status = response.status().as_u16();
        if status < 400 {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorDetail>(&body)
            .map(|e| e.detail)
            .unwrap_or(body);

        match status {
            404 => Err(ApiError::NotFound(message)),
            400 | 409 => Err(ApiError::Conflict { message }),
            _ => Err(ApiError::Http { status, message }),
        }
    }
}

#[async_trait]
impl RecordsApi for RestClient {
    #[instrument(skip(self))]
    async fn list_students(&self) -> anyhow::Result<Vec<Student>> {
        let response = self
            .client
            .get(self.url("/students/"))
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;
        let response = self.check(response).await?;
        let students = response.json().await.map_err(|e| ApiError::Http {
            status: 0,
            message: format!("failed to parse student list: {e}"),
        })?;
        Ok(students)
    }

    #[instrument(skip(self, student), fields(student_id = %student.student_id))]
    async fn create_student(&self, student: &NewStudent) -> anyhow::Result<Student> {
        let response = self
            .client
            .post(self.url("/students/"))
            .json(student)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;
        let response = self.check(response).await?;
        let created = response.json().await.map_err(|e| ApiError::Http {
            status: 0,
            message: format!("failed to parse created student: {e}"),
        })?;
        Ok(created)
    }

    #[instrument(skip(self))]
    async fn list_courses(&self) -> anyhow::Result<Vec<Course>> {
        let response = self
            .client
            .get(self.url("/courses/"))
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;
        let response = self.check(response).await?;
        let courses = response.json().await.map_err(|e| ApiError::Http {
            status: 0,
            message: format!("failed to parse course list: {e}"),
        })?;
        Ok(courses)
    }

    #[instrument(skip(self, course), fields(course_code = %course.course_code))]
    async fn create_course(&self, course: &NewCourse) -> anyhow::Result<Course> {
        let response = self
            .client
            .post(self.url("/courses/"))
            .json(course)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;
        let response = self.check(response).await?;
        let created = response.json().await.map_err(|e| ApiError::Http {
            status: 0,
            message: format!("failed to parse created course: {e}"),
        })?;
        Ok(created)
    }

    #[instrument(skip(self))]
    async fn student_grades(&self, student_id: &str) -> anyhow::Result<Vec<GradeRecord>> {
        let response = self
            .client
            .get(self.url(&format!("/grades/student/{student_id}")))
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;
        let response = self.check(response).await?;
        let records = response.json().await.map_err(|e| ApiError::Http {
            status: 0,
            message: format!("failed to parse grade records: {e}"),
        })?;
        Ok(records)
    }

    #[instrument(skip(self))]
    async fn course_grades(&self, course_code: &str) -> anyhow::Result<Vec<StudentGradeRecord>> {
        let response = self
            .client
            .get(self.url(&format!("/grades/course/{course_code}")))
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;
        let response = self.check(response).await?;
        let records = response.json().await.map_err(|e| ApiError::Http {
            status: 0,
            message: format!("failed to parse grade records: {e}"),
        })?;
        Ok(records)
    }

    #[instrument(
        skip(self, enrollment),
        fields(student_id = %enrollment.student_id, course_code = %enrollment.course_code)
    )]
    async fn enroll(&self, enrollment: &EnrollmentRequest) -> anyhow::Result<()> {
        let response = self
            .client
            .post(self.url("/grades/enroll"))
            .json(enrollment)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;
        self.check(response).await?;
        Ok(())
    }

    #[instrument(
        skip(self, assignment),
        fields(student_id = %assignment.student_id, course_code = %assignment.course_code)
    )]
    async fn assign_grade(&self, assignment: &GradeAssignment) -> anyhow::Result<()> {
        let response = self
            .client
            .post(self.url("/grades/assign"))
            .json(assignment)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;
        self.check(response).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> RestClient {
        RestClient::new(Some(server.uri()))
    }

    #[tokio::test]
    async fn list_students_parses_records() {
        let server = MockServer::start().await;
        let body = serde_json::json!([
            {"student_id": "S001", "student_name": "Ada Lovelace"},
            {"student_id": "S002", "student_name": "Alan Turing"}
        ]);

        Mock::given(method("GET"))
            .and(path("/students/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(&body))
            .mount(&server)
            .await;

        let students = client_for(&server).list_students().await.unwrap();
        assert_eq!(students.len(), 2);
        assert_eq!(students[0].student_id, "S001");
        assert!(students[0].grades.is_empty());
    }

    #[tokio::test]
    async fn create_student_posts_body() {
        let server = MockServer::start().await;
        let new = NewStudent {
            student_id: "S001".into(),
            student_name: "Ada Lovelace".into(),
        };

        Mock::given(method("POST"))
            .and(path("/students/"))
            .and(body_json(serde_json::json!({
                "student_id": "S001",
                "student_name": "Ada Lovelace"
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
                "student_id": "S001",
                "student_name": "Ada Lovelace"
            })))
            .mount(&server)
            .await;

        let created = client_for(&server).create_student(&new).await.unwrap();
        assert_eq!(created.student_name, "Ada Lovelace");
    }

    #[tokio::test]
    async fn duplicate_student_maps_to_conflict() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/students/"))
            .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
                "detail": "Student with this ID already exists"
            })))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .create_student(&NewStudent {
                student_id: "S001".into(),
                student_name: "Ada".into(),
            })
            .await
            .unwrap_err();

        let api_err = err.downcast_ref::<ApiError>().unwrap();
        assert!(api_err.is_conflict());
        assert!(err.to_string().contains("already exists"));
    }

    #[tokio::test]
    async fn unknown_student_maps_to_not_found() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/grades/student/S404"))
            .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!({
                "detail": "Student not found"
            })))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .student_grades("S404")
            .await
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ApiError>(),
            Some(ApiError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn student_grades_parses_records() {
        let server = MockServer::start().await;
        let body = serde_json::json!([
            {"course_code": "CS101", "grade": 90.0},
            {"course_code": "CS102", "grade": 75.0}
        ]);

        Mock::given(method("GET"))
            .and(path("/grades/student/S001"))
            .respond_with(ResponseTemplate::new(200).set_body_json(&body))
            .mount(&server)
            .await;

        let records = client_for(&server).student_grades("S001").await.unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].course_code, "CS101");
        assert_eq!(records[0].grade, 90.0);
    }

    #[tokio::test]
    async fn assign_grade_success() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/grades/assign"))
            .and(body_json(serde_json::json!({
                "student_id": "S001",
                "course_code": "CS101",
                "grade": 85.0
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
                "status": "success",
                "message": "Grade 85.0 (A) assigned successfully"
            })))
            .mount(&server)
            .await;

        client_for(&server)
            .assign_grade(&GradeAssignment {
                student_id: "S001".into(),
                course_code: "CS101".into(),
                grade: 85.0,
            })
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn server_error_maps_to_http() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/courses/"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let err = client_for(&server).list_courses().await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ApiError>(),
            Some(ApiError::Http { status: 500, .. })
        ));
    }
}

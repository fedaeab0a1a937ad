//! Error taxonomy for store operations and remote API calls.
//!
//! `ApiError` is defined here rather than in `gradebook-client` so the
//! store can downcast and classify remote failures (conflict vs. transient)
//! without string matching.

use thiserror::Error;

/// Errors returned by the external system of record.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The remote rejected the write: duplicate key, duplicate enrollment,
    /// or a grade for an unenrolled pairing.
    #[error("conflict: {message}")]
    Conflict { message: String },

    /// The referenced entity does not exist upstream.
    #[error("not found: {0}")]
    NotFound(String),

    /// The API returned a non-success response.
    #[error("API error (HTTP {status}): {message}")]
    Http { status: u16, message: String },

    /// The request timed out.
    #[error("request timed out after {0}s")]
    Timeout(u64),

    /// A network error occurred.
    #[error("network error: {0}")]
    Network(String),
}

impl ApiError {
    /// Returns `true` if the remote rejected the write as a logical
    /// conflict rather than failing transiently.
    pub fn is_conflict(&self) -> bool {
        matches!(self, ApiError::Conflict { .. } | ApiError::NotFound(_))
    }
}

/// Errors raised by the domain store before or after a remote call.
#[derive(Debug, Error, PartialEq)]
pub enum StoreError {
    /// Grade outside the accepted `[0, 100]` range.
    #[error("grade {0} is out of range, must be between 0 and 100")]
    GradeOutOfRange(f64),

    /// Grade was NaN or infinite.
    #[error("grade must be a finite number")]
    GradeNotFinite,

    /// A required field was empty.
    #[error("{0} must not be empty")]
    MissingField(&'static str),

    #[error("student '{0}' already exists")]
    DuplicateStudent(String),

    #[error("course '{0}' already exists")]
    DuplicateCourse(String),

    #[error("student '{student_id}' is already enrolled in '{course_code}'")]
    DuplicateEnrollment {
        student_id: String,
        course_code: String,
    },

    #[error("student '{0}' not found")]
    UnknownStudent(String),

    #[error("course '{0}' not found")]
    UnknownCourse(String),

    /// A snapshot failed shape validation and was rejected wholesale.
    #[error("malformed snapshot: {0}")]
    MalformedSnapshot(String),
}

/// Validate a numeric grade before any remote call.
///
/// Rejects non-finite and out-of-range values locally so invalid input
/// never costs a network round trip.
pub fn validate_grade(grade: f64) -> Result<(), StoreError> {
    if !grade.is_finite() {
        return Err(StoreError::GradeNotFinite);
    }
    if !(0.0..=100.0).contains(&grade) {
        return Err(StoreError::GradeOutOfRange(grade));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_range_boundaries() {
        assert!(validate_grade(0.0).is_ok());
        assert!(validate_grade(100.0).is_ok());
        assert!(validate_grade(57.5).is_ok());
    }

    #[test]
    fn rejects_out_of_range() {
        assert_eq!(
            validate_grade(150.0),
            Err(StoreError::GradeOutOfRange(150.0))
        );
        assert_eq!(validate_grade(-1.0), Err(StoreError::GradeOutOfRange(-1.0)));
    }

    #[test]
    fn rejects_non_finite() {
        assert_eq!(validate_grade(f64::NAN), Err(StoreError::GradeNotFinite));
        assert_eq!(
            validate_grade(f64::INFINITY),
            Err(StoreError::GradeNotFinite)
        );
    }

    #[test]
    fn conflict_classification() {
        assert!(ApiError::Conflict {
            message: "duplicate".into()
        }
        .is_conflict());
        assert!(ApiError::NotFound("S001".into()).is_conflict());
        assert!(!ApiError::Network("connection refused".into()).is_conflict());
        assert!(!ApiError::Timeout(30).is_conflict());
    }
}

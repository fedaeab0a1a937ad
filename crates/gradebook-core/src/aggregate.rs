//! Aggregation engine: course summaries, transcripts, and GPA.
//!
//! All functions here are pure over their inputs. Aggregates and
//! percentages round half-up to 2 decimal places; calling any of them twice
//! on the same input yields bit-identical output.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::scale::{is_passing, letter_grade, LetterGrade};

/// Round half-up to 2 decimal places. Policy for all displayed aggregates.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Round half-up to 1 decimal place. Policy for raw per-record grades.
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// One enrolled student's grade observation for a course.
///
/// `grade` is `None` for students who are enrolled but not yet graded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradeObservation {
    pub student_id: String,
    pub grade: Option<f64>,
}

impl GradeObservation {
    pub fn graded(student_id: impl Into<String>, grade: f64) -> Self {
        Self {
            student_id: student_id.into(),
            grade: Some(grade),
        }
    }

    pub fn ungraded(student_id: impl Into<String>) -> Self {
        Self {
            student_id: student_id.into(),
            grade: None,
        }
    }
}

/// Aggregate statistics for one course.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseSummary {
    pub course_code: String,
    pub course_name: String,
    /// All observation records, graded or not.
    pub total_students: usize,
    /// Observations with a grade present.
    pub graded_students: usize,
    /// Mean of graded values, 2 decimals. Zero when nothing is graded.
    pub average_grade: f64,
    pub highest_grade: f64,
    pub lowest_grade: f64,
    /// Percentage of graded observations that pass, 2 decimals.
    ///
    /// The denominator is `graded_students`, not `total_students`:
    /// ungraded enrollees are not counted as failing.
    pub pass_rate: f64,
    /// Count per letter. Every letter is present, zero counts included.
    pub grade_distribution: BTreeMap<LetterGrade, u32>,
}

/// Compute the summary for one course from its grade observations.
///
/// An empty observation set yields a fully zeroed summary, never an error.
/// When students are enrolled but none are graded, the numeric fields stay
/// zero while `total_students` reflects the enrollment.
pub fn summarize(
    course_code: &str,
    course_name: &str,
    observations: &[GradeObservation],
) -> CourseSummary {
    let mut distribution: BTreeMap<LetterGrade, u32> =
        LetterGrade::ALL.iter().map(|&l| (l, 0)).collect();

    let grades: Vec<f64> = observations.iter().filter_map(|o| o.grade).collect();
    for &g in &grades {
        *distribution.entry(letter_grade(g)).or_insert(0) += 1;
    }

    let graded = grades.len();
    let (average, highest, lowest, pass_rate) = if graded == 0 {
        (0.0, 0.0, 0.0, 0.0)
    } else {
        let sum: f64 = grades.iter().sum();
        let highest = grades.iter().copied().fold(f64::MIN, f64::max);
        let lowest = grades.iter().copied().fold(f64::MAX, f64::min);
        let passing = grades.iter().filter(|&&g| is_passing(g)).count();
        (
            round2(sum / graded as f64),
            highest,
            lowest,
            round2(100.0 * passing as f64 / graded as f64),
        )
    };

    CourseSummary {
        course_code: course_code.to_string(),
        course_name: course_name.to_string(),
        total_students: observations.len(),
        graded_students: graded,
        average_grade: average,
        highest_grade: highest,
        lowest_grade: lowest,
        pass_rate,
        grade_distribution: distribution,
    }
}

/// Pass/fail status of one transcript entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum GradeStatus {
    Pass,
    Fail,
}

impl std::fmt::Display for GradeStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GradeStatus::Pass => write!(f, "PASS"),
            GradeStatus::Fail => write!(f, "FAIL"),
        }
    }
}

/// A graded course with its name resolved, input to `transcript`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseGrade {
    pub course_code: String,
    pub course_name: String,
    pub grade: f64,
}

/// One line of a transcript.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptEntry {
    pub course_code: String,
    pub course_name: String,
    pub numeric_grade: f64,
    pub letter_grade: LetterGrade,
    pub status: GradeStatus,
}

/// A student's full transcript.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transcript {
    pub student_id: String,
    pub student_name: String,
    pub courses: Vec<TranscriptEntry>,
    /// Mean grade point over all listed grades, 2 decimals. Zero when the
    /// student has no grades. An F contributes 0.0 to the mean.
    pub gpa: f64,
    pub total_courses: usize,
    pub passed_courses: usize,
}

/// Build a transcript from a student's resolved course grades.
pub fn transcript(student_id: &str, student_name: &str, grades: &[CourseGrade]) -> Transcript {
    let mut entries = Vec::with_capacity(grades.len());
    let mut total_points = 0.0;
    let mut passed = 0;

    for cg in grades {
        let letter = letter_grade(cg.grade);
        let status = if is_passing(cg.grade) {
            passed += 1;
            GradeStatus::Pass
        } else {
            GradeStatus::Fail
        };
        total_points += letter.grade_point();
        entries.push(TranscriptEntry {
            course_code: cg.course_code.clone(),
            course_name: cg.course_name.clone(),
            numeric_grade: cg.grade,
            letter_grade: letter,
            status,
        });
    }

    let gpa = if entries.is_empty() {
        0.0
    } else {
        round2(total_points / entries.len() as f64)
    };

    Transcript {
        student_id: student_id.to_string(),
        student_name: student_name.to_string(),
        total_courses: entries.len(),
        passed_courses: passed,
        courses: entries,
        gpa,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cs101_observations() -> Vec<GradeObservation> {
        vec![
            GradeObservation::graded("S001", 90.0),
            GradeObservation::graded("S002", 70.0),
            GradeObservation::graded("S003", 40.0),
            GradeObservation::graded("S004", 30.0),
        ]
    }

    #[test]
    fn summarize_empty_is_zeroed() {
        let summary = summarize("CS101", "Intro to CS", &[]);
        assert_eq!(summary.total_students, 0);
        assert_eq!(summary.graded_students, 0);
        assert_eq!(summary.average_grade, 0.0);
        assert_eq!(summary.highest_grade, 0.0);
        assert_eq!(summary.lowest_grade, 0.0);
        assert_eq!(summary.pass_rate, 0.0);
        assert_eq!(summary.grade_distribution.len(), 7);
        assert!(summary.grade_distribution.values().all(|&c| c == 0));
    }

    #[test]
    fn summarize_enrolled_but_ungraded() {
        let obs = vec![
            GradeObservation::ungraded("S001"),
            GradeObservation::ungraded("S002"),
        ];
        let summary = summarize("CS101", "Intro to CS", &obs);
        assert_eq!(summary.total_students, 2);
        assert_eq!(summary.graded_students, 0);
        assert_eq!(summary.average_grade, 0.0);
        assert_eq!(summary.pass_rate, 0.0);
    }

    #[test]
    fn summarize_cs101_scenario() {
        let summary = summarize("CS101", "Intro to CS", &cs101_observations());
        assert_eq!(summary.total_students, 4);
        assert_eq!(summary.graded_students, 4);
        assert_eq!(summary.average_grade, 57.5);
        assert_eq!(summary.pass_rate, 75.0);
        assert_eq!(summary.highest_grade, 90.0);
        assert_eq!(summary.lowest_grade, 30.0);
        assert_eq!(summary.grade_distribution[&LetterGrade::A], 1);
        assert_eq!(summary.grade_distribution[&LetterGrade::BPlus], 0);
        assert_eq!(summary.grade_distribution[&LetterGrade::BMinus], 1);
        assert_eq!(summary.grade_distribution[&LetterGrade::CPlus], 0);
        assert_eq!(summary.grade_distribution[&LetterGrade::CMinus], 0);
        assert_eq!(summary.grade_distribution[&LetterGrade::E], 1);
        assert_eq!(summary.grade_distribution[&LetterGrade::F], 1);
    }

    #[test]
    fn summarize_counts_ungraded_in_total_only() {
        let mut obs = cs101_observations();
        obs.push(GradeObservation::ungraded("S005"));
        let summary = summarize("CS101", "Intro to CS", &obs);
        assert_eq!(summary.total_students, 5);
        assert_eq!(summary.graded_students, 4);
        // Pass rate denominator is graded students, so it is unchanged.
        assert_eq!(summary.pass_rate, 75.0);
    }

    #[test]
    fn summarize_is_idempotent() {
        let obs = cs101_observations();
        let a = summarize("CS101", "Intro to CS", &obs);
        let b = summarize("CS101", "Intro to CS", &obs);
        assert_eq!(a, b);
        assert_eq!(
            serde_json::to_string(&a).unwrap(),
            serde_json::to_string(&b).unwrap()
        );
    }

    #[test]
    fn transcript_gpa_scenario() {
        let grades = vec![
            CourseGrade {
                course_code: "CS101".into(),
                course_name: "Intro to CS".into(),
                grade: 90.0,
            },
            CourseGrade {
                course_code: "CS102".into(),
                course_name: "Data Structures".into(),
                grade: 75.0,
            },
        ];
        let t = transcript("S001", "Ada Lovelace", &grades);
        assert_eq!(t.courses[0].letter_grade, LetterGrade::A);
        assert_eq!(t.courses[1].letter_grade, LetterGrade::BPlus);
        assert_eq!(t.gpa, 4.75);
        assert_eq!(t.total_courses, 2);
        assert_eq!(t.passed_courses, 2);
    }

    #[test]
    fn transcript_failed_course_drags_gpa() {
        let grades = vec![
            CourseGrade {
                course_code: "CS101".into(),
                course_name: "Intro to CS".into(),
                grade: 90.0,
            },
            CourseGrade {
                course_code: "CS103".into(),
                course_name: "Algorithms".into(),
                grade: 20.0,
            },
        ];
        let t = transcript("S001", "Ada Lovelace", &grades);
        assert_eq!(t.courses[1].status, GradeStatus::Fail);
        assert_eq!(t.passed_courses, 1);
        // (5.0 + 0.0) / 2
        assert_eq!(t.gpa, 2.5);
    }

    #[test]
    fn transcript_empty_gpa_is_zero() {
        let t = transcript("S001", "Ada Lovelace", &[]);
        assert_eq!(t.gpa, 0.0);
        assert_eq!(t.total_courses, 0);
        assert_eq!(t.passed_courses, 0);
        assert!(t.courses.is_empty());
    }

    #[test]
    fn rounding_is_half_up() {
        // Binary-exact halves so the test is not at the mercy of float repr.
        assert_eq!(round2(0.125), 0.13);
        assert_eq!(round2(0.124), 0.12);
        assert_eq!(round1(0.25), 0.3);
        assert_eq!(round1(0.24), 0.2);
    }
}

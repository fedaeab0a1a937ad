//! Fixed-width console rendering of transcripts and course summaries.

use gradebook_core::aggregate::{CourseSummary, Transcript};
use gradebook_core::scale::LetterGrade;

const RULE_WIDTH: usize = 72;

fn heavy_rule() -> String {
    "=".repeat(RULE_WIDTH)
}

fn light_rule() -> String {
    "-".repeat(RULE_WIDTH)
}

/// Render a transcript as a ruled console block.
pub fn format_transcript(transcript: &Transcript) -> String {
    let mut out = String::new();

    out.push_str(&heavy_rule());
    out.push('\n');
    out.push_str(&format!(
        "TRANSCRIPT FOR: {} (ID: {})\n",
        transcript.student_name, transcript.student_id
    ));
    out.push_str(&heavy_rule());
    out.push('\n');
    out.push_str(&format!("GPA: {:.2}\n", transcript.gpa));
    out.push_str(&format!("Courses Taken: {}\n", transcript.total_courses));
    out.push_str(&format!("Courses Passed: {}\n", transcript.passed_courses));
    out.push_str(&light_rule());
    out.push('\n');
    out.push_str(&format!(
        "{:<12} {:<32} {:>7} {:>7} {:>7}\n",
        "COURSE CODE", "COURSE NAME", "GRADE", "LETTER", "STATUS"
    ));
    out.push_str(&light_rule());
    out.push('\n');

    for entry in &transcript.courses {
        out.push_str(&format!(
            "{:<12} {:<32} {:>7.1} {:>7} {:>7}\n",
            entry.course_code,
            entry.course_name,
            entry.numeric_grade,
            entry.letter_grade.to_string(),
            entry.status.to_string(),
        ));
    }

    out.push_str(&heavy_rule());
    out.push('\n');
    out
}

/// Render a course summary as a ruled console block with a distribution
/// histogram.
pub fn format_course_summary(summary: &CourseSummary) -> String {
    let mut out = String::new();

    out.push_str(&heavy_rule());
    out.push('\n');
    out.push_str(&format!(
        "COURSE SUMMARY: {} ({})\n",
        summary.course_name, summary.course_code
    ));
    out.push_str(&heavy_rule());
    out.push('\n');
    out.push_str(&format!("Enrolled: {}\n", summary.total_students));
    out.push_str(&format!("Graded: {}\n", summary.graded_students));

    if summary.graded_students > 0 {
        out.push_str(&format!("Average: {:.2}\n", summary.average_grade));
        out.push_str(&format!("Highest: {:.1}\n", summary.highest_grade));
        out.push_str(&format!("Lowest: {:.1}\n", summary.lowest_grade));
        out.push_str(&format!("Pass Rate: {:.2}%\n", summary.pass_rate));
        out.push_str(&light_rule());
        out.push('\n');

        let max_count = summary
            .grade_distribution
            .values()
            .copied()
            .max()
            .unwrap_or(0)
            .max(1);
        for letter in LetterGrade::ALL {
            let count = summary.grade_distribution.get(&letter).copied().unwrap_or(0);
            let bar_len = (count as usize * 40) / max_count as usize;
            out.push_str(&format!(
                "{:<3} {:>4}  {}\n",
                letter.to_string(),
                count,
                "#".repeat(bar_len)
            ));
        }
    }

    out.push_str(&heavy_rule());
    out.push('\n');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use gradebook_core::aggregate::{summarize, transcript, CourseGrade, GradeObservation};

    #[test]
    fn transcript_block_lists_courses() {
        let t = transcript(
            "S001",
            "Ada Lovelace",
            &[
                CourseGrade {
                    course_code: "CS101".into(),
                    course_name: "Intro to CS".into(),
                    grade: 90.0,
                },
                CourseGrade {
                    course_code: "CS102".into(),
                    course_name: "Data Structures".into(),
                    grade: 35.5,
                },
            ],
        );
        let text = format_transcript(&t);

        assert!(text.contains("TRANSCRIPT FOR: Ada Lovelace (ID: S001)"));
        assert!(text.contains("GPA: 2.50"));
        assert!(text.contains("CS101"));
        assert!(text.contains("35.5"));
        assert!(text.contains("PASS"));
        assert!(text.contains("FAIL"));
    }

    #[test]
    fn summary_block_shows_distribution() {
        let summary = summarize(
            "CS101",
            "Intro to CS",
            &[
                GradeObservation::graded("S001", 90.0),
                GradeObservation::graded("S002", 70.0),
                GradeObservation::graded("S003", 40.0),
                GradeObservation::graded("S004", 30.0),
            ],
        );
        let text = format_course_summary(&summary);

        assert!(text.contains("COURSE SUMMARY: Intro to CS (CS101)"));
        assert!(text.contains("Average: 57.50"));
        assert!(text.contains("Pass Rate: 75.00%"));
        // All seven letters appear even at zero count.
        for letter in LetterGrade::ALL {
            assert!(text.contains(&format!("{:<3}", letter.to_string())));
        }
    }

    #[test]
    fn ungraded_summary_omits_statistics() {
        let summary = summarize("CS101", "Intro to CS", &[GradeObservation::ungraded("S001")]);
        let text = format_course_summary(&summary);
        assert!(text.contains("Enrolled: 1"));
        assert!(text.contains("Graded: 0"));
        assert!(!text.contains("Average:"));
    }
}

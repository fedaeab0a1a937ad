//! HTML report generator.
//!
//! Produces self-contained HTML files with all CSS inlined.

use std::path::Path;

use anyhow::Result;

use gradebook_core::aggregate::{CourseSummary, GradeStatus, Transcript};
use gradebook_core::scale::LetterGrade;

/// Escape a string for safe HTML insertion.
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

fn page(title: &str, body: &str) -> String {
    let mut html = String::new();
    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    html.push_str(&format!("<title>{}</title>\n", html_escape(title)));
    html.push_str("<style>\n");
    html.push_str(CSS);
    html.push_str("</style>\n");
    html.push_str("</head>\n<body>\n");
    html.push_str(body);
    html.push_str("</body>\n</html>");
    html
}

/// Generate a transcript page.
pub fn generate_transcript_html(transcript: &Transcript) -> String {
    let mut body = String::new();

    body.push_str("<header>\n");
    body.push_str(&format!(
        "<h1>Transcript — {}</h1>\n",
        html_escape(&transcript.student_name)
    ));
    body.push_str(&format!(
        "<p class=\"meta\">ID: <strong>{}</strong> | GPA {:.2} | {} courses, {} passed</p>\n",
        html_escape(&transcript.student_id),
        transcript.gpa,
        transcript.total_courses,
        transcript.passed_courses,
    ));
    body.push_str("</header>\n");

    body.push_str("<table class=\"results\">\n");
    body.push_str(
        "<thead><tr><th>Course</th><th>Name</th><th>Grade</th><th>Letter</th><th>Status</th></tr></thead>\n",
    );
    body.push_str("<tbody>\n");
    for entry in &transcript.courses {
        let row_class = match entry.status {
            GradeStatus::Pass => "pass",
            GradeStatus::Fail => "fail",
        };
        body.push_str(&format!(
            "<tr class=\"{}\"><td>{}</td><td>{}</td><td>{:.1}</td><td>{}</td><td>{}</td></tr>\n",
            row_class,
            html_escape(&entry.course_code),
            html_escape(&entry.course_name),
            entry.numeric_grade,
            entry.letter_grade,
            entry.status,
        ));
    }
    body.push_str("</tbody></table>\n");

    append_raw_json(&mut body, transcript);
    page(
        &format!("transcript — {}", transcript.student_id),
        &body,
    )
}

/// Generate a course summary page with an SVG distribution chart.
pub fn generate_summary_html(summary: &CourseSummary) -> String {
    let mut body = String::new();

    body.push_str("<header>\n");
    body.push_str(&format!(
        "<h1>Course Summary — {}</h1>\n",
        html_escape(&summary.course_name)
    ));
    body.push_str(&format!(
        "<p class=\"meta\">Code: <strong>{}</strong> | {} enrolled | {} graded</p>\n",
        html_escape(&summary.course_code),
        summary.total_students,
        summary.graded_students,
    ));
    body.push_str("</header>\n");

    body.push_str("<table class=\"summary\">\n");
    body.push_str(
        "<thead><tr><th>Average</th><th>Highest</th><th>Lowest</th><th>Pass Rate</th></tr></thead>\n",
    );
    body.push_str(&format!(
        "<tbody><tr><td>{:.2}</td><td>{:.1}</td><td>{:.1}</td><td>{:.2}%</td></tr></tbody>\n",
        summary.average_grade, summary.highest_grade, summary.lowest_grade, summary.pass_rate,
    ));
    body.push_str("</table>\n");

    body.push_str("<h2>Grade Distribution</h2>\n");
    body.push_str(&distribution_chart(summary));

    append_raw_json(&mut body, summary);
    page(&format!("summary — {}", summary.course_code), &body)
}

fn append_raw_json<T: serde::Serialize>(body: &mut String, value: &T) {
    body.push_str("<section class=\"raw-data\">\n");
    body.push_str("<details>\n<summary>Raw JSON Data</summary>\n");
    body.push_str("<pre><code>");
    body.push_str(
        &serde_json::to_string_pretty(value)
            .unwrap_or_default()
            .replace('<', "&lt;")
            .replace('>', "&gt;"),
    );
    body.push_str("</code></pre>\n");
    body.push_str("</details>\n</section>\n");
}

/// SVG horizontal bar chart of the letter-grade distribution.
fn distribution_chart(summary: &CourseSummary) -> String {
    let bar_height = 30;
    let max_width = 400;
    let padding = 10;
    let label_width = 60;

    let max_count = summary
        .grade_distribution
        .values()
        .copied()
        .max()
        .unwrap_or(0)
        .max(1);

    let total_height = LetterGrade::ALL.len() * (bar_height + padding) + padding;

    let mut svg = format!(
        "<svg width=\"{}\" height=\"{}\" xmlns=\"http://www.w3.org/2000/svg\">\n",
        label_width + max_width + 60,
        total_height
    );

    for (i, letter) in LetterGrade::ALL.iter().enumerate() {
        let count = summary.grade_distribution.get(letter).copied().unwrap_or(0);
        let y = i * (bar_height + padding) + padding;
        let width = (count as usize * max_width) / max_count as usize;

        // Green for passing bands, red for F.
        let color = if *letter == LetterGrade::F {
            "#ef4444"
        } else if *letter == LetterGrade::E {
            "#eab308"
        } else {
            "#22c55e"
        };

        svg.push_str(&format!(
            "  <text x=\"{}\" y=\"{}\" font-size=\"14\" fill=\"currentColor\" text-anchor=\"end\" dominant-baseline=\"middle\">{}</text>\n",
            label_width - 10,
            y + bar_height / 2,
            letter
        ));
        svg.push_str(&format!(
            "  <rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" fill=\"{}\" rx=\"4\"/>\n",
            label_width, y, width, bar_height, color
        ));
        svg.push_str(&format!(
            "  <text x=\"{}\" y=\"{}\" font-size=\"12\" fill=\"currentColor\" dominant-baseline=\"middle\">{}</text>\n",
            label_width + width + 8,
            y + bar_height / 2,
            count
        ));
    }

    svg.push_str("</svg>\n");
    svg
}

/// Write a transcript page to a file.
pub fn write_transcript_html(transcript: &Transcript, path: &Path) -> Result<()> {
    write_page(generate_transcript_html(transcript), path)
}

/// Write a course summary page to a file.
pub fn write_summary_html(summary: &CourseSummary, path: &Path) -> Result<()> {
    write_page(generate_summary_html(summary), path)
}

fn write_page(html: String, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, html)?;
    Ok(())
}

const CSS: &str = r#"
:root { --bg: #fff; --fg: #1a1a1a; --border: #e5e7eb; --pass: #dcfce7; --fail: #fde2e2; }
@media (prefers-color-scheme: dark) {
  :root { --bg: #111827; --fg: #f9fafb; --border: #374151; --pass: #064e3b; --fail: #7f1d1d; }
}
body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', sans-serif; margin: 0; padding: 2rem; background: var(--bg); color: var(--fg); }
h1, h2 { margin-top: 2rem; }
.meta { color: #6b7280; }
table { border-collapse: collapse; width: 100%; margin: 1rem 0; }
th, td { border: 1px solid var(--border); padding: 0.5rem 1rem; text-align: left; }
th { background: var(--border); }
.pass { background: var(--pass); }
.fail { background: var(--fail); }
pre { overflow-x: auto; padding: 1rem; background: var(--border); border-radius: 8px; }
code { font-family: 'JetBrains Mono', 'Fira Code', monospace; font-size: 0.85rem; }
details { margin: 1rem 0; }
summary { cursor: pointer; font-weight: bold; }
svg { margin: 1rem 0; }
"#;

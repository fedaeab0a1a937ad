//! The `gradebook transcript` and `gradebook summary` commands.

use std::path::PathBuf;

use anyhow::{Context, Result};

use gradebook_report::html::{write_summary_html, write_transcript_html};
use gradebook_report::text::{format_course_summary, format_transcript};
use gradebook_report::ReportDocument;

use super::open_store;

pub async fn transcript(
    student: String,
    format: String,
    output: Option<PathBuf>,
    config: Option<PathBuf>,
) -> Result<()> {
    let (config, store) = open_store(config.as_deref()).await?;

    let transcript = store
        .student_transcript(&student)
        .with_context(|| format!("unknown student: {student}"))?;

    match format.as_str() {
        "text" => print!("{}", format_transcript(&transcript)),
        "html" => {
            let dir = output.unwrap_or(config.output_dir);
            let path = dir.join(format!("transcript-{student}.html"));
            write_transcript_html(&transcript, &path)?;
            println!("Wrote {}", path.display());
        }
        "json" => {
            let dir = output.unwrap_or(config.output_dir);
            let path = dir.join(format!("transcript-{student}.json"));
            ReportDocument::new(transcript).save_json(&path)?;
            println!("Wrote {}", path.display());
        }
        other => anyhow::bail!("unknown format: {other} (expected text, html, or json)"),
    }

    Ok(())
}

pub async fn summary(
    course: String,
    format: String,
    output: Option<PathBuf>,
    config: Option<PathBuf>,
) -> Result<()> {
    let (config, mut store) = open_store(config.as_deref()).await?;

    // Pull the latest grades for this course before summarizing.
    store
        .refresh_course(&course)
        .await
        .with_context(|| format!("failed to refresh grades for {course}"))?;

    let summary = store
        .course_summary(&course)
        .with_context(|| format!("unknown course: {course}"))?;

    match format.as_str() {
        "text" => print!("{}", format_course_summary(&summary)),
        "html" => {
            let dir = output.unwrap_or(config.output_dir);
            let path = dir.join(format!("summary-{course}.html"));
            write_summary_html(&summary, &path)?;
            println!("Wrote {}", path.display());
        }
        "json" => {
            let dir = output.unwrap_or(config.output_dir);
            let path = dir.join(format!("summary-{course}.json"));
            ReportDocument::new(summary).save_json(&path)?;
            println!("Wrote {}", path.display());
        }
        other => anyhow::bail!("unknown format: {other} (expected text, html, or json)"),
    }

    Ok(())
}

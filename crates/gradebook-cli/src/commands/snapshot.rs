//! The `gradebook export` and `gradebook import` commands.

use std::path::PathBuf;

use anyhow::{Context, Result};

use gradebook_core::snapshot::Snapshot;

use super::open_store;

pub async fn export(output: PathBuf, config: Option<PathBuf>) -> Result<()> {
    let (_, store) = open_store(config.as_deref()).await?;

    let snapshot = store.export_snapshot();
    snapshot
        .save_json(&output)
        .with_context(|| format!("failed to write snapshot to {}", output.display()))?;

    println!(
        "Exported {} students, {} courses to {}",
        snapshot.students.len(),
        snapshot.courses.len(),
        output.display()
    );
    Ok(())
}

/// Load and validate a snapshot file.
///
/// The snapshot format is the same one `export` writes; a file that fails
/// structural validation is rejected wholesale.
pub fn import(input: PathBuf) -> Result<()> {
    let snapshot = Snapshot::load_json(&input)
        .with_context(|| format!("failed to load snapshot from {}", input.display()))?;

    let enrollments: usize = snapshot.enrollments.values().map(Vec::len).sum();
    println!(
        "Snapshot OK: {} students, {} courses, {} enrollments",
        snapshot.students.len(),
        snapshot.courses.len(),
        enrollments
    );
    Ok(())
}

//! Mutation commands: add-student, add-course, enroll, assign.

use std::path::PathBuf;

use anyhow::{Context, Result};

use gradebook_core::scale::letter_grade;

use super::open_store;

pub async fn add_student(id: String, name: String, config: Option<PathBuf>) -> Result<()> {
    let (_, mut store) = open_store(config.as_deref()).await?;
    store
        .add_student(&id, &name)
        .await
        .with_context(|| format!("failed to add student {id}"))?;
    println!("Added student {id} ({name})");
    Ok(())
}

pub async fn add_course(code: String, name: String, config: Option<PathBuf>) -> Result<()> {
    let (_, mut store) = open_store(config.as_deref()).await?;
    store
        .add_course(&code, &name)
        .await
        .with_context(|| format!("failed to add course {code}"))?;
    println!("Added course {code} ({name})");
    Ok(())
}

pub async fn enroll(student: String, course: String, config: Option<PathBuf>) -> Result<()> {
    let (_, mut store) = open_store(config.as_deref()).await?;
    store
        .enroll(&student, &course)
        .await
        .with_context(|| format!("failed to enroll {student} in {course}"))?;
    println!("Enrolled {student} in {course}");
    Ok(())
}

pub async fn assign(
    student: String,
    course: String,
    grade: f64,
    config: Option<PathBuf>,
) -> Result<()> {
    let (_, mut store) = open_store(config.as_deref()).await?;
    store
        .assign_grade(&student, &course, grade)
        .await
        .with_context(|| format!("failed to assign grade for {student} in {course}"))?;
    println!(
        "Assigned {grade:.1} ({}) to {student} in {course}",
        letter_grade(grade)
    );
    Ok(())
}

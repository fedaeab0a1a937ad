//! The `gradebook list` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};

use super::open_store;

pub async fn execute(target: String, config: Option<PathBuf>) -> Result<()> {
    let (_, store) = open_store(config.as_deref()).await?;

    match target.as_str() {
        "students" => {
            let students = store.students();
            if students.is_empty() {
                println!("No students registered.");
                return Ok(());
            }

            let mut table = Table::new();
            table.set_header(vec!["ID", "Name", "Graded Courses"]);
            for student in students {
                table.add_row(vec![
                    Cell::new(&student.student_id),
                    Cell::new(&student.student_name),
                    Cell::new(student.grades.len()),
                ]);
            }
            println!("{table}");
        }
        "courses" => {
            let courses = store.courses();
            if courses.is_empty() {
                println!("No courses registered.");
                return Ok(());
            }

            let mut table = Table::new();
            table.set_header(vec!["Code", "Name", "Enrolled"]);
            for course in courses {
                let enrolled = store.course_students(&course.course_code).len();
                table.add_row(vec![
                    Cell::new(&course.course_code),
                    Cell::new(&course.course_name),
                    Cell::new(enrolled),
                ]);
            }
            println!("{table}");
        }
        other => anyhow::bail!("unknown list target: {other} (expected students or courses)"),
    }

    Ok(())
}

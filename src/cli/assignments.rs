//! Assignments command - list what the teacher may enter marks for

use crate::cli::auth::sign_in;
use crate::cli::style::Stylize;
use anstream::println;
use marks_entry::backend::BackendService;
use marks_entry::error::Result;
use marks_entry::exam::{available_classes, available_sections, available_subjects};

/// Run the assignments command
pub async fn run_assignments(backend: &dyn BackendService, teacher_id: Option<&str>) -> Result<()> {
    let teacher = sign_in(backend, teacher_id).await?;
    println!("{}", format!("Assignments for {}", teacher.name).emphasis());

    let classes = available_classes(&teacher.assignments);
    if classes.is_empty() {
        println!("  {}", "No classes assigned".muted());
        return Ok(());
    }

    for class in &classes {
        println!("  Class {}", class.accent());
        for section in available_sections(&teacher.assignments, class) {
            let subjects = available_subjects(&teacher.assignments, class, &section);
            println!("    {section}: {}", subjects.join(", "));
        }
    }
    Ok(())
}

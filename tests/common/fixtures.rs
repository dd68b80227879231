//! Fixture builders

use marks_entry::types::{Assignment, StudentRecord, Teacher};

/// Teacher with the given `(class, section, subject)` assignments
pub fn make_teacher(id: &str, assignments: &[(&str, &str, &str)]) -> Teacher {
    Teacher {
        id: id.to_string(),
        name: format!("Teacher {id}"),
        assignments: assignments
            .iter()
            .map(|(class, section, subject)| Assignment::new(class, section, subject))
            .collect(),
    }
}

/// Roster of `count` students with ids `<prefix>-<n>`
pub fn make_roster(prefix: &str, count: usize) -> Vec<StudentRecord> {
    (1..=count)
        .map(|n| {
            StudentRecord::new(
                &format!("{prefix}-{n}"),
                &format!("{prefix}{n:02}"),
                &format!("Student {n}"),
            )
        })
        .collect()
}

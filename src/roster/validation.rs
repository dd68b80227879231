//! Marks validation rules
//!
//! Live validation runs on every keystroke for one student. Full-pass
//! validation runs over the whole roster when submitting.

use crate::types::{AttendanceStatus, StudentId, StudentMarkEntry};
use std::collections::BTreeMap;

/// Student identity -> human-readable message
pub type ValidationErrors = BTreeMap<StudentId, String>;

/// Full-pass message for a present student without marks
pub const MARKS_REQUIRED: &str = "Marks are required.";

/// Keep only ASCII digits; marks are never negative or fractional
pub fn sanitize_marks(raw: &str) -> String {
    raw.chars().filter(char::is_ascii_digit).collect()
}

/// Parse a configured maximum, `None` while the exam type is unset
pub fn parse_maximum(maximum_marks: &str) -> Option<u64> {
    maximum_marks.trim().parse().ok()
}

/// Whether `marks` (digits only) is above `maximum`.
///
/// Values too large to parse are out of range by definition.
fn exceeds(marks: &str, maximum: u64) -> bool {
    !marks.parse::<u64>().is_ok_and(|value| value <= maximum)
}

/// Live rule for a single edit.
///
/// Returns the message to record, or `None` when the student has no error.
/// Empty marks are not an error here; that is only enforced on submit.
pub fn live_error(marks: &str, maximum_marks: &str) -> Option<String> {
    let maximum = parse_maximum(maximum_marks)?;
    if !marks.is_empty() && exceeds(marks, maximum) {
        Some(format!("Marks must be between 0 and {maximum}."))
    } else {
        None
    }
}

/// Full-pass rule for one student
pub fn full_pass_error(student: &StudentMarkEntry, maximum_marks: &str) -> Option<String> {
    if student.status == AttendanceStatus::Absent {
        return None;
    }
    let marks = student.marks.trim();
    if marks.is_empty() {
        return Some(MARKS_REQUIRED.to_string());
    }
    let numeric = marks.chars().all(|c| c.is_ascii_digit());
    let out_of_range = parse_maximum(maximum_marks).is_some_and(|max| exceeds(marks, max));
    if !numeric || out_of_range {
        Some(format!("Must be between 0 and {}.", maximum_marks.trim()))
    } else {
        None
    }
}

/// Validate every student; absent students are always valid
pub fn validate_all(students: &[StudentMarkEntry], maximum_marks: &str) -> ValidationErrors {
    students
        .iter()
        .filter_map(|student| {
            full_pass_error(student, maximum_marks).map(|message| (student.id.clone(), message))
        })
        .collect()
}

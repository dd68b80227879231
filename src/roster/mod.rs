//! Roster and validation engine
//!
//! Holds the students of the selected class section with their marks,
//! presence and remark, plus the live validation error set. The error set
//! always matches the live rule against the current maximum marks.

mod validation;

pub use validation::{
    MARKS_REQUIRED, ValidationErrors, full_pass_error, live_error, parse_maximum, sanitize_marks,
    validate_all,
};

use crate::backend::BackendService;
use crate::error::{Error, Result};
use crate::types::{ABSENT_MARKS, AttendanceStatus, StudentId, StudentMarkEntry, StudentRecord};
use tracing::{debug, warn};

/// An outstanding roster fetch.
///
/// Captures the selection it was issued for; a result whose request is no
/// longer the pending one is discarded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterRequest {
    /// Class the roster was requested for
    pub class: String,
    /// Section the roster was requested for
    pub section: String,
    generation: u64,
}

/// Look up a roster, short-circuiting when class or section is empty
pub async fn fetch_roster(
    backend: &dyn BackendService,
    class: &str,
    section: &str,
) -> Result<Vec<StudentRecord>> {
    if class.is_empty() || section.is_empty() {
        return Ok(Vec::new());
    }
    backend.fetch_roster(class, section).await
}

/// Per-student working set for one class section
#[derive(Debug, Clone, Default)]
pub struct StudentRoster {
    students: Vec<StudentMarkEntry>,
    errors: ValidationErrors,
    filter: String,
    maximum_marks: String,
    pending: Option<RosterRequest>,
    generation: u64,
}

impl StudentRoster {
    /// Empty roster
    pub fn new() -> Self {
        Self::default()
    }

    /// All students in roster order
    pub fn students(&self) -> &[StudentMarkEntry] {
        &self.students
    }

    /// Look up one student
    pub fn student(&self, id: &StudentId) -> Option<&StudentMarkEntry> {
        self.students.iter().find(|s| &s.id == id)
    }

    /// Live validation errors
    pub const fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    /// Error recorded for one student
    pub fn error_for(&self, id: &StudentId) -> Option<&str> {
        self.errors.get(id).map(String::as_str)
    }

    /// Any non-empty error message present
    pub fn has_validation_errors(&self) -> bool {
        self.errors.values().any(|message| !message.is_empty())
    }

    /// A roster fetch is outstanding
    pub const fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    /// Maximum marks the live rule validates against
    pub fn maximum_marks(&self) -> &str {
        &self.maximum_marks
    }

    /// Update the maximum and re-run the live rule for every student
    pub fn set_maximum_marks(&mut self, maximum_marks: &str) {
        if self.maximum_marks == maximum_marks {
            return;
        }
        debug!(maximum_marks, "revalidating roster against new maximum");
        self.maximum_marks = maximum_marks.to_string();
        self.errors = self
            .students
            .iter()
            .filter(|s| s.status == AttendanceStatus::Present)
            .filter_map(|s| live_error(&s.marks, &self.maximum_marks).map(|e| (s.id.clone(), e)))
            .collect();
    }

    /// Start loading the roster for `(class, section)`.
    ///
    /// The working set, errors and filter are cleared immediately. Returns
    /// `None` without issuing a request when either key is empty.
    pub fn begin_fetch(&mut self, class: &str, section: &str) -> Option<RosterRequest> {
        self.students.clear();
        self.errors.clear();
        self.filter.clear();

        if class.is_empty() || section.is_empty() {
            self.pending = None;
            return None;
        }

        self.generation += 1;
        let request = RosterRequest {
            class: class.to_string(),
            section: section.to_string(),
            generation: self.generation,
        };
        debug!(class, section, generation = self.generation, "roster fetch issued");
        self.pending = Some(request.clone());
        Some(request)
    }

    /// Apply the outcome of a fetch.
    ///
    /// Returns `false` when the request is stale and the result was
    /// discarded. A failed fetch leaves an empty roster and is only logged.
    pub fn finish_fetch(
        &mut self,
        request: &RosterRequest,
        result: Result<Vec<StudentRecord>>,
    ) -> bool {
        if self.pending.as_ref() != Some(request) {
            debug!(
                class = %request.class,
                section = %request.section,
                "discarding stale roster result"
            );
            return false;
        }
        self.pending = None;

        match result {
            Ok(records) => {
                debug!(
                    class = %request.class,
                    section = %request.section,
                    count = records.len(),
                    "roster loaded"
                );
                self.students = records.into_iter().map(StudentMarkEntry::from).collect();
                self.errors.clear();
                self.filter.clear();
            }
            Err(e) => {
                warn!(
                    class = %request.class,
                    section = %request.section,
                    error = %e,
                    "failed to fetch students"
                );
            }
        }
        true
    }

    fn entry_mut(&mut self, id: &StudentId) -> Result<&mut StudentMarkEntry> {
        self.students
            .iter_mut()
            .find(|s| &s.id == id)
            .ok_or_else(|| Error::InvalidArgument(format!("unknown student: {id}")))
    }

    /// Store marks for a student, keeping digits only, and re-run the live rule.
    ///
    /// Edits to an absent student are ignored; their marks stay "0".
    pub fn set_marks(&mut self, id: &StudentId, raw: &str) -> Result<()> {
        let maximum_marks = self.maximum_marks.clone();
        let entry = self.entry_mut(id)?;
        if entry.status == AttendanceStatus::Absent {
            debug!(student_id = %id, "ignoring marks edit for absent student");
            return Ok(());
        }
        entry.marks = sanitize_marks(raw);
        let error = live_error(&entry.marks, &maximum_marks);
        match error {
            Some(message) => {
                self.errors.insert(id.clone(), message);
            }
            None => {
                self.errors.remove(id);
            }
        }
        Ok(())
    }

    /// Toggle Present / Absent.
    ///
    /// Absent forces marks to "0"; back to Present clears them for re-entry.
    /// Either way the student's error is dropped.
    pub fn set_status(&mut self, id: &StudentId) -> Result<AttendanceStatus> {
        let entry = self.entry_mut(id)?;
        entry.status = entry.status.toggled();
        entry.marks = match entry.status {
            AttendanceStatus::Absent => ABSENT_MARKS.to_string(),
            AttendanceStatus::Present => String::new(),
        };
        let status = entry.status;
        self.errors.remove(id);
        debug!(student_id = %id, %status, "status toggled");
        Ok(status)
    }

    /// Free-text remark, not validated
    pub fn set_remark(&mut self, id: &StudentId, text: &str) -> Result<()> {
        self.entry_mut(id)?.remark = text.to_string();
        Ok(())
    }

    /// Current filter text
    pub fn filter_text(&self) -> &str {
        &self.filter
    }

    /// Set the filter text used by [`Self::filtered`]
    pub fn set_filter(&mut self, query: &str) {
        self.filter = query.to_string();
    }

    /// Students matching the stored filter
    pub fn filtered(&self) -> Vec<&StudentMarkEntry> {
        self.filtered_view(&self.filter)
    }

    /// Case-insensitive substring match on display id or name.
    ///
    /// An empty query matches everyone; roster order is preserved.
    pub fn filtered_view(&self, query: &str) -> Vec<&StudentMarkEntry> {
        if query.is_empty() {
            return self.students.iter().collect();
        }
        let query = query.to_lowercase();
        self.students
            .iter()
            .filter(|s| {
                s.name.to_lowercase().contains(&query)
                    || s.display_id.to_lowercase().contains(&query)
            })
            .collect()
    }

    /// Replace the error set with a full-pass result
    pub(crate) fn replace_errors(&mut self, errors: ValidationErrors) {
        self.errors = errors;
    }

    /// Clear students, errors and filter.
    ///
    /// A fetch still in flight becomes stale.
    pub fn reset(&mut self) {
        self.students.clear();
        self.errors.clear();
        self.filter.clear();
        self.pending = None;
    }
}

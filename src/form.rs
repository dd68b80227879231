//! Marks entry form coordinator
//!
//! Owns the authoritative state of one marks entry session and is the only
//! place the three engines are composed:
//! - exam edits may change `(class, section)`, which reissues the roster fetch
//! - exam edits push the derived maximum into the roster for live validation
//! - exam edits drop a stale submission outcome
//! - a successful submission resets everything after the configured delay

use crate::backend::BackendService;
use crate::error::Result;
use crate::exam::ExamDetails;
use crate::roster::{RosterRequest, StudentRoster, fetch_roster};
use crate::submit::{
    Phase, Preparation, ProgressCallback, SubmissionController, SubmissionState,
};
use crate::types::{AttendanceStatus, ExamField, StudentId, StudentRecord, Teacher};
use std::time::Duration;
use tokio::time::Instant;
use tracing::debug;

/// One teacher's marks entry session
#[derive(Debug, Clone)]
pub struct MarksForm {
    teacher: Teacher,
    exam: ExamDetails,
    roster: StudentRoster,
    submission: SubmissionController,
}

impl MarksForm {
    /// Empty form for `teacher`
    pub fn new(teacher: Teacher, reset_delay: Duration) -> Self {
        let exam = ExamDetails::new(teacher.assignments.clone());
        Self {
            teacher,
            exam,
            roster: StudentRoster::new(),
            submission: SubmissionController::new(reset_delay),
        }
    }

    /// Logged-in teacher
    pub const fn teacher(&self) -> &Teacher {
        &self.teacher
    }

    /// Exam configuration engine
    pub const fn exam(&self) -> &ExamDetails {
        &self.exam
    }

    /// Roster and validation engine
    pub const fn roster(&self) -> &StudentRoster {
        &self.roster
    }

    /// Submission state
    pub const fn submission_state(&self) -> &SubmissionState {
        self.submission.state()
    }

    /// Set an exam field.
    ///
    /// Returns the roster request to run when `(class, section)` changed.
    /// Deselecting class or section clears the roster without a request.
    pub fn set_field(&mut self, field: ExamField, value: &str) -> Result<Option<RosterRequest>> {
        let before = self.roster_key();
        self.exam.set_field(field, value)?;
        self.submission.acknowledge_edit();
        self.roster
            .set_maximum_marks(&self.exam.config().maximum_marks);

        let after = self.roster_key();
        if before == after {
            return Ok(None);
        }
        let (class, section) = after.unwrap_or_default();
        Ok(self.roster.begin_fetch(&class, &section))
    }

    fn roster_key(&self) -> Option<(String, String)> {
        self.exam
            .roster_key()
            .map(|(class, section)| (class.to_string(), section.to_string()))
    }

    /// Apply a roster result issued by [`Self::set_field`].
    ///
    /// Results for a selection that is no longer current are discarded.
    pub fn complete_roster_fetch(
        &mut self,
        request: &RosterRequest,
        result: Result<Vec<StudentRecord>>,
    ) -> bool {
        let current = self.exam.roster_key();
        if current != Some((request.class.as_str(), request.section.as_str())) {
            debug!(class = %request.class, section = %request.section, "selection moved on, dropping roster");
            return false;
        }
        self.roster.finish_fetch(request, result)
    }

    /// Run a roster request against the backend
    pub async fn load_roster(&mut self, backend: &dyn BackendService, request: &RosterRequest) -> bool {
        let result = fetch_roster(backend, &request.class, &request.section).await;
        self.complete_roster_fetch(request, result)
    }

    /// Set a field and load the roster if the selection changed
    pub async fn select(
        &mut self,
        backend: &dyn BackendService,
        field: ExamField,
        value: &str,
    ) -> Result<()> {
        if let Some(request) = self.set_field(field, value)? {
            self.load_roster(backend, &request).await;
        }
        Ok(())
    }

    /// Enter marks for a student
    pub fn set_marks(&mut self, id: &StudentId, raw: &str) -> Result<()> {
        self.roster.set_marks(id, raw)
    }

    /// Toggle a student between present and absent
    pub fn set_status(&mut self, id: &StudentId) -> Result<AttendanceStatus> {
        self.roster.set_status(id)
    }

    /// Set a student's remark
    pub fn set_remark(&mut self, id: &StudentId, text: &str) -> Result<()> {
        self.roster.set_remark(id, text)
    }

    /// Set the roster filter text
    pub fn set_filter(&mut self, query: &str) {
        self.roster.set_filter(query);
    }

    /// Whether a submit action should be offered
    pub fn can_submit(&self) -> bool {
        self.exam.are_details_complete()
            && !self.roster.has_validation_errors()
            && !self.roster.students().is_empty()
            && !self.roster.is_loading()
            && !self.submission.state().is_busy()
    }

    /// Validate and submit the batch.
    ///
    /// Nothing is sent when validation, the exam details or an empty or
    /// loading roster block the submission. A call while a submission is in
    /// flight, or while an accepted batch awaits its reset, does nothing.
    pub async fn submit(
        &mut self,
        backend: &dyn BackendService,
        progress: &dyn ProgressCallback,
    ) -> &SubmissionState {
        progress.on_phase(Phase::Validating).await;
        let preparation = self.submission.prepare(
            self.exam.config(),
            &self.teacher.id,
            &mut self.roster,
        );

        match preparation {
            Preparation::Busy => {}
            Preparation::Rejected(error) => {
                debug!(%error, "submission rejected locally");
                progress.on_rejected(self.roster.errors()).await;
                progress.on_phase(Phase::Complete).await;
            }
            Preparation::Ready(payload) => {
                progress.on_phase(Phase::Submitting).await;
                let result = backend.submit_marks(&payload).await;
                match &result {
                    Ok(()) => progress.on_submitted(&payload).await,
                    Err(error) => progress.on_error(error).await,
                }
                self.submission.complete(result);
                if let Some(message) = self.submission.state().message() {
                    progress.on_message(message).await;
                }
                progress.on_phase(Phase::Complete).await;
            }
        }
        self.submission.state()
    }

    /// When the pending post-success reset is due
    pub const fn reset_deadline(&self) -> Option<Instant> {
        self.submission.reset_deadline()
    }

    /// Perform the post-success reset if it is due; returns whether it ran
    pub fn tick(&mut self) -> bool {
        if self.submission.reset_due(Instant::now()) {
            debug!("success delay elapsed, resetting form");
            self.reset();
            true
        } else {
            false
        }
    }

    /// Sleep until the pending post-success reset and perform it
    pub async fn wait_for_reset(&mut self) -> bool {
        match self.submission.reset_deadline() {
            Some(deadline) => {
                tokio::time::sleep_until(deadline).await;
                self.tick()
            }
            None => false,
        }
    }

    /// Clear configuration, roster and submission state
    pub fn reset(&mut self) {
        self.exam.reset();
        self.roster.reset();
        self.roster.set_maximum_marks("");
        self.submission.reset();
    }
}

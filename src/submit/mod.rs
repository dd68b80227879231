//! Submission controller
//!
//! Drives one batch through `Idle -> Submitting -> Success | Error`:
//! 1. Full-pass validation of every present student
//! 2. Payload assembly and the remote call (driven by the caller)
//! 3. Outcome recording, with an automatic reset after a success

mod payload;
mod progress;

pub use payload::{build_payload, normalize_exam_date};
pub use progress::{NoopProgress, Phase, ProgressCallback};

use crate::error::{Error, Result};
use crate::roster::{StudentRoster, validate_all};
use crate::types::{ExamConfiguration, SubmissionPayload};
use std::fmt;
use std::time::Duration;
use tokio::time::Instant;
use tracing::{debug, info, warn};

/// Shown when local validation blocks a submission
pub const CORRECT_ERRORS_MESSAGE: &str = "Please correct the highlighted errors before submitting.";

/// Shown after the remote store accepted the batch
pub const SUCCESS_MESSAGE: &str = "Marks Submitted Successfully!";

/// Shown when the remote store failed without saying why
pub const UNKNOWN_SUBMISSION_ERROR: &str = "An unknown error occurred during submission.";

/// Default Success -> Idle delay
pub const DEFAULT_RESET_DELAY: Duration = Duration::from_secs(3);

/// Submission lifecycle state
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SubmissionState {
    /// Nothing in flight
    #[default]
    Idle,
    /// Remote call outstanding
    Submitting,
    /// Accepted; resets to idle after the delay
    Success(String),
    /// Rejected locally or remotely
    Error(String),
}

impl SubmissionState {
    /// Message attached to Success / Error
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Success(message) | Self::Error(message) => Some(message),
            Self::Idle | Self::Submitting => None,
        }
    }

    /// A remote call is outstanding
    pub const fn is_submitting(&self) -> bool {
        matches!(self, Self::Submitting)
    }

    /// A new submission would be ignored: one is in flight, or an accepted
    /// batch is waiting for its reset
    pub const fn is_busy(&self) -> bool {
        matches!(self, Self::Submitting | Self::Success(_))
    }
}

impl fmt::Display for SubmissionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => write!(f, "idle"),
            Self::Submitting => write!(f, "submitting"),
            Self::Success(_) => write!(f, "success"),
            Self::Error(_) => write!(f, "error"),
        }
    }
}

/// Result of [`SubmissionController::prepare`]
#[derive(Debug)]
pub enum Preparation {
    /// A submission is in flight or was just accepted; nothing was done
    Busy,
    /// Blocked locally; state is now `Error`
    Rejected(Error),
    /// Valid; state is now `Submitting` and the payload should be sent
    Ready(SubmissionPayload),
}

/// Submission state machine
#[derive(Debug, Clone)]
pub struct SubmissionController {
    state: SubmissionState,
    reset_delay: Duration,
    reset_at: Option<Instant>,
}

impl Default for SubmissionController {
    fn default() -> Self {
        Self::new(DEFAULT_RESET_DELAY)
    }
}

impl SubmissionController {
    /// Controller with the given Success -> Idle delay
    pub const fn new(reset_delay: Duration) -> Self {
        Self {
            state: SubmissionState::Idle,
            reset_delay,
            reset_at: None,
        }
    }

    /// Current state
    pub const fn state(&self) -> &SubmissionState {
        &self.state
    }

    /// When the pending post-success reset is due
    pub const fn reset_deadline(&self) -> Option<Instant> {
        self.reset_at
    }

    /// Validate everything and move to `Submitting`, or record why not.
    ///
    /// The full-pass error set replaces the roster's live error set. A call
    /// while submitting, or while a success awaits its reset, is a no-op.
    /// An empty or still-loading roster is rejected.
    pub fn prepare(
        &mut self,
        config: &ExamConfiguration,
        teacher_id: &str,
        roster: &mut StudentRoster,
    ) -> Preparation {
        if self.state.is_busy() {
            debug!(state = %self.state, "submission in flight or just accepted, ignoring");
            return Preparation::Busy;
        }

        let had_live_errors = roster.has_validation_errors();
        let errors = validate_all(roster.students(), &config.maximum_marks);
        let invalid = errors.len();
        roster.replace_errors(errors);

        let payload = if config.is_complete() {
            build_payload(config, teacher_id, roster.students()).ok()
        } else {
            None
        };

        let rejection = if invalid > 0 || had_live_errors {
            Some(Error::ValidationFailed { count: invalid })
        } else if roster.is_loading() || roster.students().is_empty() {
            Some(Error::RosterUnavailable)
        } else if payload.is_none() {
            Some(Error::ConfigurationIncomplete)
        } else {
            None
        };

        match (rejection, payload) {
            (None, Some(payload)) => {
                debug!(count = payload.students.len(), "submission validated");
                self.state = SubmissionState::Submitting;
                Preparation::Ready(payload)
            }
            (rejection, _) => {
                let error = rejection.unwrap_or(Error::ConfigurationIncomplete);
                debug!(%error, "submission blocked");
                self.state = SubmissionState::Error(CORRECT_ERRORS_MESSAGE.to_string());
                Preparation::Rejected(error)
            }
        }
    }

    /// Record the remote outcome of a prepared submission
    pub fn complete(&mut self, result: Result<()>) {
        if !self.state.is_submitting() {
            debug!(state = %self.state, "no submission in flight, ignoring outcome");
            return;
        }
        match result {
            Ok(()) => {
                info!("marks submitted");
                self.state = SubmissionState::Success(SUCCESS_MESSAGE.to_string());
                self.reset_at = Some(Instant::now() + self.reset_delay);
            }
            Err(e) => {
                let message = match e {
                    Error::SubmissionFailed(message) => message,
                    other => other.to_string(),
                };
                let message = if message.trim().is_empty() {
                    UNKNOWN_SUBMISSION_ERROR.to_string()
                } else {
                    message
                };
                warn!(error = %message, "submission failed");
                self.state = SubmissionState::Error(message);
            }
        }
    }

    /// The user changed the exam configuration: drop a stale outcome,
    /// including a pending post-success reset
    pub fn acknowledge_edit(&mut self) {
        if matches!(
            self.state,
            SubmissionState::Error(_) | SubmissionState::Success(_)
        ) {
            debug!(state = %self.state, "configuration edited, back to idle");
            self.state = SubmissionState::Idle;
            self.reset_at = None;
        }
    }

    /// The post-success reset is due at `now`
    pub fn reset_due(&self, now: Instant) -> bool {
        self.reset_at.is_some_and(|at| now >= at)
    }

    /// Back to idle, cancelling any pending reset
    pub fn reset(&mut self) {
        self.state = SubmissionState::Idle;
        self.reset_at = None;
    }
}

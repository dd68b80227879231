//! Progress callback trait for interface-agnostic updates
//!
//! This trait allows different interfaces (terminal, web front end, etc.)
//! to follow a submission as it moves through its phases.

use crate::error::Error;
use crate::roster::ValidationErrors;
use crate::types::SubmissionPayload;
use async_trait::async_trait;

/// Submission phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Re-validating every student
    Validating,
    /// Waiting on the remote store
    Submitting,
    /// Submission finished, successfully or not
    Complete,
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validating => write!(f, "Validating marks"),
            Self::Submitting => write!(f, "Submitting marks"),
            Self::Complete => write!(f, "Done"),
        }
    }
}

/// Progress callback trait
///
/// Implement this trait to receive progress updates during submission.
#[async_trait]
pub trait ProgressCallback: Send + Sync {
    /// Called when entering a new phase
    async fn on_phase(&self, phase: Phase);

    /// Called when local validation blocks the submission
    async fn on_rejected(&self, errors: &ValidationErrors);

    /// Called after the remote store accepted the payload
    async fn on_submitted(&self, payload: &SubmissionPayload);

    /// Called when the remote store rejected the payload
    async fn on_error(&self, error: &Error);

    /// Called with a general status message
    async fn on_message(&self, message: &str);
}

/// No-op progress callback for testing or when progress isn't needed
pub struct NoopProgress;

#[async_trait]
impl ProgressCallback for NoopProgress {
    async fn on_phase(&self, _phase: Phase) {}
    async fn on_rejected(&self, _errors: &ValidationErrors) {}
    async fn on_submitted(&self, _payload: &SubmissionPayload) {}
    async fn on_error(&self, _error: &Error) {}
    async fn on_message(&self, _message: &str) {}
}

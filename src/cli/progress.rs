//! Shared CLI progress callback

use crate::cli::style::{Stylize, check, cross};
use anstream::{eprintln, println};
use async_trait::async_trait;
use marks_entry::error::Error;
use marks_entry::roster::ValidationErrors;
use marks_entry::submit::{Phase, ProgressCallback};
use marks_entry::types::SubmissionPayload;

/// CLI progress callback that prints to stdout
///
/// Verbose mode also shows every phase.
pub struct CliProgress {
    /// Show all phases
    pub verbose: bool,
}

impl CliProgress {
    /// Progress for `--verbose` runs
    pub const fn verbose() -> Self {
        Self { verbose: true }
    }

    /// Outcome-only progress
    pub const fn compact() -> Self {
        Self { verbose: false }
    }
}

#[async_trait]
impl ProgressCallback for CliProgress {
    async fn on_phase(&self, phase: Phase) {
        if self.verbose {
            println!("{}", format!("{phase}...").muted());
        } else if phase == Phase::Submitting {
            println!("{phase}...");
        }
    }

    async fn on_rejected(&self, errors: &ValidationErrors) {
        println!(
            "  {} {} student(s) need attention",
            cross(),
            errors.len()
        );
    }

    async fn on_submitted(&self, payload: &SubmissionPayload) {
        println!(
            "  {} Sent {} student(s) for {} {}-{} {}",
            check(),
            payload.students.len(),
            payload.exam_type.accent(),
            payload.class,
            payload.section,
            payload.subject
        );
    }

    async fn on_error(&self, error: &Error) {
        eprintln!("  {} {error}", cross());
    }

    async fn on_message(&self, message: &str) {
        if self.verbose {
            println!("  {}", message.muted());
        }
    }
}

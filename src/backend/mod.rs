//! Remote collaborators: authentication, roster lookup and marks submission
//!
//! Provides a unified interface over the HTTP backend and the in-memory
//! demo backend.

mod demo;
mod factory;
mod http;

pub use demo::{DEMO_PASSWORD, DemoBackend};
pub use factory::create_backend;
pub use http::{DEFAULT_TIMEOUT_SECS, HttpBackend};

use crate::error::Result;
use crate::types::{StudentRecord, SubmissionPayload, Teacher};
use async_trait::async_trait;

/// Backend service trait
///
/// The engines never talk to the network themselves; the form coordinator
/// drives these calls and feeds the results back in.
#[async_trait]
pub trait BackendService: Send + Sync {
    /// Verify credentials and return the teacher with their assignments.
    ///
    /// Fails with [`Error::InvalidCredentials`](crate::error::Error::InvalidCredentials)
    /// when the backend rejects the pair.
    async fn authenticate(&self, teacher_id: &str, password: &str) -> Result<Teacher>;

    /// Students of one class section.
    ///
    /// Fails with [`Error::FetchFailed`](crate::error::Error::FetchFailed).
    async fn fetch_roster(&self, class: &str, section: &str) -> Result<Vec<StudentRecord>>;

    /// Store a batch of marks.
    ///
    /// Fails with [`Error::SubmissionFailed`](crate::error::Error::SubmissionFailed).
    async fn submit_marks(&self, payload: &SubmissionPayload) -> Result<()>;

    /// Short name for logs and status output
    fn name(&self) -> &str;
}

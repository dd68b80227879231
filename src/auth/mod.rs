//! Teacher authentication
//!
//! Credentials come from CLI arguments, environment variables or an
//! interactive prompt; the backend verifies them.

mod credentials;

pub use credentials::{Credentials, credentials_from, get_credentials};

use crate::backend::BackendService;
use crate::error::{Error, Result};
use crate::types::Teacher;
use tracing::{debug, warn};

/// Source of credentials
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialSource {
    /// Teacher id given on the command line
    Argument,
    /// Environment variables
    EnvVar,
    /// Typed at an interactive prompt
    Prompt,
}

/// Log in against the backend.
///
/// Empty id or password is rejected locally without a remote call.
pub async fn login(backend: &dyn BackendService, credentials: &Credentials) -> Result<Teacher> {
    let teacher_id = credentials.teacher_id.trim();
    if teacher_id.is_empty() || credentials.password.is_empty() {
        return Err(Error::InvalidCredentials(
            "Teacher ID and password are required.".to_string(),
        ));
    }

    debug!(teacher_id, backend = backend.name(), source = ?credentials.source, "logging in");
    match backend.authenticate(teacher_id, &credentials.password).await {
        Ok(teacher) => {
            debug!(teacher_id, name = %teacher.name, "logged in");
            Ok(teacher)
        }
        Err(e) => {
            warn!(teacher_id, error = %e, "login failed");
            Err(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{DEMO_PASSWORD, DemoBackend};

    fn credentials(id: &str, password: &str) -> Credentials {
        Credentials {
            teacher_id: id.to_string(),
            password: password.to_string(),
            source: CredentialSource::Prompt,
        }
    }

    #[tokio::test]
    async fn test_login_trims_teacher_id() {
        let backend = DemoBackend::new();
        let teacher = login(&backend, &credentials("  teacher02 ", DEMO_PASSWORD))
            .await
            .unwrap();
        assert_eq!(teacher.id, "teacher02");
    }

    #[tokio::test]
    async fn test_login_rejects_empty_fields() {
        let backend = DemoBackend::new();
        assert!(matches!(
            login(&backend, &credentials("", DEMO_PASSWORD)).await,
            Err(Error::InvalidCredentials(_))
        ));
        assert!(matches!(
            login(&backend, &credentials("teacher01", "")).await,
            Err(Error::InvalidCredentials(_))
        ));
    }

    #[tokio::test]
    async fn test_login_wrong_password() {
        let backend = DemoBackend::new();
        assert!(matches!(
            login(&backend, &credentials("teacher01", "nope")).await,
            Err(Error::InvalidCredentials(_))
        ));
    }
}

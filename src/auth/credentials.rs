//! Credential discovery

use crate::auth::CredentialSource;
use crate::error::{Error, Result};
use std::env;
use std::fmt;
use tracing::debug;

/// Teacher id and password pair
#[derive(Clone)]
pub struct Credentials {
    /// Teacher id
    pub teacher_id: String,
    /// Password
    pub password: String,
    /// Where the credentials came from
    pub source: CredentialSource,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("teacher_id", &self.teacher_id)
            .field("password", &"<redacted>")
            .field("source", &self.source)
            .finish()
    }
}

/// Discover credentials from the process environment
///
/// Priority:
/// 1. `teacher_id` argument + `MARKS_PASSWORD`
/// 2. `MARKS_TEACHER_ID` + `MARKS_PASSWORD`
pub fn get_credentials(teacher_id: Option<&str>) -> Result<Credentials> {
    credentials_from(teacher_id, |key| env::var(key).ok())
}

/// Discover credentials from any variable lookup
pub fn credentials_from(
    teacher_id: Option<&str>,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<Credentials> {
    debug!("checking MARKS_PASSWORD env var");
    let password = lookup("MARKS_PASSWORD").filter(|p| !p.is_empty());

    let (teacher_id, source) = match teacher_id {
        Some(id) => (Some(id.to_string()), CredentialSource::Argument),
        None => {
            debug!("checking MARKS_TEACHER_ID env var");
            (lookup("MARKS_TEACHER_ID"), CredentialSource::EnvVar)
        }
    };

    match (teacher_id, password) {
        (Some(teacher_id), Some(password)) if !teacher_id.trim().is_empty() => {
            debug!(teacher_id = teacher_id.trim(), ?source, "credentials found");
            Ok(Credentials {
                teacher_id: teacher_id.trim().to_string(),
                password,
                source,
            })
        }
        _ => Err(Error::Auth(
            "No credentials found. Set MARKS_TEACHER_ID and MARKS_PASSWORD or sign in interactively"
                .to_string(),
        )),
    }
}

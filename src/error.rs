//! Error types for marks-entry

use thiserror::Error;

/// Main error type
#[derive(Error, Debug)]
pub enum Error {
    /// Teacher id / password rejected
    #[error("invalid credentials: {0}")]
    InvalidCredentials(String),

    /// No credentials could be discovered
    #[error("authentication error: {0}")]
    Auth(String),

    /// Not every exam field has been chosen
    #[error("exam details are incomplete")]
    ConfigurationIncomplete,

    /// One or more student marks are invalid
    #[error("{count} student mark(s) failed validation")]
    ValidationFailed {
        /// Number of students with an error
        count: usize,
    },

    /// No students are loaded for the selected class section
    #[error("no students loaded for this class section")]
    RosterUnavailable,

    /// Roster lookup failed
    #[error("failed to fetch student list: {0}")]
    FetchFailed(String),

    /// Remote submission failed; message is shown to the user verbatim
    #[error("{0}")]
    SubmissionFailed(String),

    /// Backend answered with `success: false`
    #[error("backend error: {0}")]
    Backend(String),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// Invalid argument
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// HTTP transport error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON (de)serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Config file parse error
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Internal error
    #[error("internal error: {0}")]
    Internal(String),
}

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

//! Configuration file and environment overrides
//!
//! Looked up at `$MARKS_CONFIG`, falling back to
//! `<config dir>/marks-entry/config.toml`. A missing default file means
//! defaults.
//!
//! ```toml
//! [backend]
//! endpoint = "https://example.org/marks"
//! timeout_secs = 30
//!
//! [submission]
//! reset_delay_secs = 3
//! ```

use crate::error::{Error, Result};
use serde::Deserialize;
use std::env;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

/// Remote backend settings
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    /// Endpoint all actions are posted to
    pub endpoint: Option<String>,
    /// Per-request timeout
    pub timeout_secs: u64,
    /// Use the in-memory demo backend
    pub demo: bool,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            timeout_secs: crate::backend::DEFAULT_TIMEOUT_SECS,
            demo: false,
        }
    }
}

/// Submission lifecycle settings
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SubmissionConfig {
    /// Seconds a success is shown before the form resets
    pub reset_delay_secs: u64,
}

impl Default for SubmissionConfig {
    fn default() -> Self {
        Self {
            reset_delay_secs: 3,
        }
    }
}

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Backend settings
    pub backend: BackendConfig,
    /// Submission settings
    pub submission: SubmissionConfig,
}

impl Config {
    /// Default config file location
    pub fn default_path() -> Option<PathBuf> {
        env::var_os("MARKS_CONFIG")
            .map(PathBuf::from)
            .or_else(|| dirs::config_dir().map(|dir| dir.join("marks-entry").join("config.toml")))
    }

    /// Parse configuration from TOML text
    pub fn from_toml(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Load configuration and apply environment overrides.
    ///
    /// An explicit `path` must exist; the default location may be absent.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => {
                debug!(path = %path.display(), "loading config");
                let text = std::fs::read_to_string(path).map_err(|e| {
                    Error::Config(format!("cannot read {}: {e}", path.display()))
                })?;
                Self::from_toml(&text)?
            }
            None => match Self::default_path() {
                Some(path) if path.exists() => {
                    debug!(path = %path.display(), "loading config");
                    Self::from_toml(&std::fs::read_to_string(&path)?)?
                }
                _ => {
                    debug!("no config file found, using defaults");
                    Self::default()
                }
            },
        };
        config.apply_env();
        Ok(config)
    }

    /// Apply `MARKS_ENDPOINT` and `MARKS_DEMO` from the process environment
    pub fn apply_env(&mut self) {
        self.apply_overrides(|key| env::var(key).ok());
    }

    /// Apply overrides from any variable lookup
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(endpoint) = lookup("MARKS_ENDPOINT") {
            let endpoint = endpoint.trim();
            if !endpoint.is_empty() {
                debug!(endpoint, "endpoint overridden from MARKS_ENDPOINT");
                self.backend.endpoint = Some(endpoint.to_string());
            }
        }
        if let Some(demo) = lookup("MARKS_DEMO") {
            self.backend.demo =
                matches!(demo.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes");
        }
    }

    /// Success -> idle delay
    pub const fn reset_delay(&self) -> Duration {
        Duration::from_secs(self.submission.reset_delay_secs)
    }
}

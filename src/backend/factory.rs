//! Backend service factory
//!
//! Creates backend services based on configuration.

use crate::backend::{BackendService, DemoBackend, HttpBackend};
use crate::config::Config;
use crate::error::{Error, Result};
use tracing::debug;

/// Create a backend service from configuration
///
/// Demo mode wins over a configured endpoint.
pub fn create_backend(config: &Config) -> Result<Box<dyn BackendService>> {
    if config.backend.demo {
        debug!("using demo backend");
        return Ok(Box::new(DemoBackend::new()));
    }

    let endpoint = config.backend.endpoint.as_deref().ok_or_else(|| {
        Error::Config(
            "no backend endpoint configured. Set MARKS_ENDPOINT, add [backend] endpoint to the config file, or use --demo".to_string(),
        )
    })?;
    debug!(endpoint, "using HTTP backend");
    Ok(Box::new(HttpBackend::new(
        endpoint,
        config.backend.timeout_secs,
    )?))
}

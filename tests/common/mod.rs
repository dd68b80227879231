//! Common test utilities for marks-entry tests

pub mod fixtures;
pub mod mock_backend;

// Re-exports for convenience - not all test binaries use all exports
#[allow(unused_imports)]
pub use fixtures::*;
#[allow(unused_imports)]
pub use mock_backend::MockBackend;

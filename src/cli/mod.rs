//! CLI command implementations

mod assignments;
mod auth;
mod entry;
mod progress;
pub mod style;

pub use assignments::run_assignments;
pub use auth::run_auth_test;
pub use entry::{EntryOptions, run_entry};
pub use progress::CliProgress;

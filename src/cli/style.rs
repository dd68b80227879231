//! Terminal styling helpers
//!
//! Output goes through `anstream`, which strips the escapes when the
//! stream is not a terminal.

use indicatif::ProgressStyle;
use owo_colors::OwoColorize;
use std::fmt::Display;

/// Semantic colors for CLI output
pub trait Stylize {
    /// Names and values the user picked or should notice
    fn accent(&self) -> String;
    /// Secondary detail
    fn muted(&self) -> String;
    /// Headings
    fn emphasis(&self) -> String;
    /// Problems
    fn failure(&self) -> String;
}

impl<T: Display> Stylize for T {
    fn accent(&self) -> String {
        self.cyan().to_string()
    }

    fn muted(&self) -> String {
        self.dimmed().to_string()
    }

    fn emphasis(&self) -> String {
        self.bold().to_string()
    }

    fn failure(&self) -> String {
        self.red().to_string()
    }
}

/// Green check mark
pub fn check() -> String {
    "✓".green().to_string()
}

/// Red cross
pub fn cross() -> String {
    "✗".red().to_string()
}

/// Spinner used while waiting on the backend
pub fn spinner_style() -> ProgressStyle {
    ProgressStyle::with_template("{spinner:.cyan} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
        .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏ ")
}

//! User-facing notifications
//!
//! Search outcomes that end without a report are shown to the user, not
//! logged. Colour is applied only when enabled.

use colored::Colorize;

use crate::core::model::SearchError;

/// Formats notifications for the terminal
#[derive(Debug, Clone, Copy, Default)]
pub struct Notifier {
    pub quiet: bool,
}

impl Notifier {
    pub fn new(quiet: bool) -> Self {
        Self { quiet }
    }

    /// Text for a search that produced no report
    pub fn format_error(&self, err: &SearchError) -> String {
        match err {
            SearchError::NoResults(_) => format!("{} {}", "note:".yellow().bold(), err),
            _ => format!("{} {}", "error:".red().bold(), err),
        }
    }

    /// Text for a report saved to disk
    pub fn format_saved(&self, path: &str) -> String {
        format!("{} results written to {}", "saved:".green().bold(), path)
    }

    /// Print a notification to stderr unless quiet
    pub fn emit(&self, message: &str) {
        if !self.quiet {
            eprintln!("{}", message);
        }
    }
}

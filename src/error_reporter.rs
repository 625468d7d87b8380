//! Error reporting for the CLI
//!
//! Builds the stderr report for a failed command from the
//! [`UserFriendlyError`] view of a [`KitLabelError`].

use std::fmt::Write as _;

use crate::{KitLabelError, UserFriendlyError};

/// A formatted error report: message, context, suggestions and category.
pub struct ErrorReport<'a> {
    error: &'a KitLabelError,
}

impl<'a> ErrorReport<'a> {
    #[must_use]
    pub fn new(error: &'a KitLabelError) -> Self {
        Self { error }
    }

    /// Render the report as plain text.
    #[must_use]
    pub fn format(&self) -> String {
        let mut output = format!(
            "✗ {} error: {}\n",
            self.error.category(),
            self.error.user_message()
        );

        if let Some(context) = self.error.context() {
            let _ = write!(output, "\n  {context}\n");
        }

        let suggestions = self.error.suggestions();
        if !suggestions.is_empty() {
            output.push_str("\n  Suggestions:\n");
            for (i, suggestion) in suggestions.iter().enumerate() {
                let _ = writeln!(output, "    {}. {suggestion}", i + 1);
            }
        }

        output
    }
}

pub mod utils {
    use super::{ErrorReport, KitLabelError};

    /// Report with a hint specific to the command that failed.
    #[must_use]
    pub fn create_contextual_report(error: &KitLabelError, operation: &str) -> String {
        let mut report = ErrorReport::new(error).format();
        if let Some(hint) = operation_hint(error, operation) {
            report.push_str(&format!("\n  ↳ {hint}\n"));
        }
        report
    }

    fn operation_hint(error: &KitLabelError, operation: &str) -> Option<&'static str> {
        match (operation, error) {
            ("generate", KitLabelError::Batch(_)) => {
                Some("The cart was left unchanged; no print job was written")
            }
            ("cart", KitLabelError::Persistence(_)) => {
                Some("The cart change was not saved")
            }
            ("config", _) => Some("Pass --config <PATH> to bypass configuration discovery"),
            _ => None,
        }
    }
}

use crate::ports::outbound::ProgressReporter;
use owo_colors::OwoColorize;

/// StderrProgressReporter adapter for reporting progress to stderr
///
/// This adapter implements the ProgressReporter port, writing status
/// messages to stderr so they don't interfere with stdout output.
/// Errors are printed in red and completions in green unless colour is
/// disabled.
pub struct StderrProgressReporter {
    colored: bool,
}

impl StderrProgressReporter {
    pub fn new() -> Self {
        Self { colored: true }
    }

    /// Reporter that writes plain text, for logs and non-terminal output
    pub fn plain() -> Self {
        Self { colored: false }
    }

    fn format_error(&self, message: &str) -> String {
        if self.colored {
            message.red().to_string()
        } else {
            message.to_string()
        }
    }

    fn format_completion(&self, message: &str) -> String {
        if self.colored {
            message.green().to_string()
        } else {
            message.to_string()
        }
    }
}

impl Default for StderrProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressReporter for StderrProgressReporter {
    fn report(&self, message: &str) {
        eprintln!("{}", message);
    }

    fn report_error(&self, message: &str) {
        eprintln!("{}", self.format_error(message));
    }

    fn report_completion(&self, message: &str) {
        eprintln!();
        eprintln!("{}", self.format_completion(message));
    }
}

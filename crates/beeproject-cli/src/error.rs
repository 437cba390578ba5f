//! Error handling for the beeproject CLI.
//!
//! Every failure that reaches `main` is a [`CliError`]. It knows its exit
//! code, its suggestions and how to render itself with or without colour.

use std::error::Error as _;
use std::fmt::Write as _;

use owo_colors::OwoColorize;
use thiserror::Error;

use beeproject_core::error::{BeeError, ErrorCategory as CoreCategory};

/// Result type alias for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    /// Invalid user input that clap could not catch.
    #[error("Invalid input: {message}")]
    InvalidInput {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// A configured default extension does not exist.
    #[error("Unknown extension '{name}'")]
    UnknownExtension { name: String, available: Vec<String> },

    // ── Config errors ──────────────────────────────────────────────────────
    /// A configuration file could not be read, parsed, or written.
    #[error("Configuration error: {message}")]
    ConfigError {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// `config get` was asked for a key that does not exist.
    #[error("Unknown configuration key '{key}'")]
    UnknownConfigKey { key: String },

    // ── Core errors ────────────────────────────────────────────────────────
    #[error("Scaffolding failed: {0}")]
    Core(#[from] BeeError),

    // ── System errors ──────────────────────────────────────────────────────
    #[error("I/O error: {message}")]
    IoError {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// The user declined the confirmation prompt.
    #[error("Operation cancelled")]
    Cancelled,
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        CliError::IoError {
            message: err.to_string(),
            source: err,
        }
    }
}

impl CliError {
    pub fn config(message: impl Into<String>, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::ConfigError {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidInput { message, .. } => vec![
                format!("Check your input: {message}"),
                "Use --help for usage information".into(),
            ],

            Self::UnknownExtension { name, available } => {
                let mut out = vec![format!("'{name}' is not a built-in extension")];
                out.push("Available extensions:".into());
                out.extend(available.iter().map(|a| format!("  • {a}")));
                out.push("List them with: beeproject list".into());
                out
            }

            Self::ConfigError { message, .. } => vec![
                format!("Configuration issue: {message}"),
                "Show the active file with: beeproject config path".into(),
                "Recreate it with: beeproject init --force".into(),
            ],

            Self::UnknownConfigKey { key } => vec![
                format!("No configuration value named '{key}'"),
                "Show every key with: beeproject config list".into(),
                "Keys are dotted, e.g. defaults.author".into(),
            ],

            Self::Core(core_err) => core_err.suggestions(),

            Self::IoError { message, .. } => vec![
                format!("I/O operation failed: {message}"),
                "Check file permissions".into(),
                "Check available disk space".into(),
            ],

            Self::Cancelled => vec!["No changes were made".into()],
        }
    }

    /// Get the error category for styling and exit codes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidInput { .. } | Self::Cancelled => ErrorCategory::UserError,
            Self::UnknownExtension { .. } | Self::UnknownConfigKey { .. } => {
                ErrorCategory::NotFound
            }
            Self::ConfigError { .. } => ErrorCategory::Configuration,
            Self::Core(core) => match core.category() {
                CoreCategory::Validation | CoreCategory::Conflict => ErrorCategory::UserError,
                CoreCategory::Internal => ErrorCategory::Internal,
            },
            Self::IoError { .. } => ErrorCategory::Internal,
        }
    }

    /// Exit code to pass to the OS.
    ///
    /// | Category      | Code |
    /// |---------------|------|
    /// | User error    |  2   |
    /// | Not found     |  3   |
    /// | Configuration |  4   |
    /// | Internal      |  1   |
    pub fn exit_code(&self) -> u8 {
        match self.category() {
            ErrorCategory::UserError => 2,
            ErrorCategory::NotFound => 3,
            ErrorCategory::Configuration => 4,
            ErrorCategory::Internal => 1,
        }
    }

    /// Format the error for a terminal, with colours and suggestions.
    pub fn format_colored(&self, verbose: bool) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "\n{} {}\n", "✗".red().bold(), "Error:".red().bold());
        let _ = writeln!(out, "  {}", self.to_string().red());

        if verbose {
            for cause in self.causes() {
                let _ = writeln!(out, "\n  {} {}", "→".dimmed(), cause.dimmed());
            }
        }

        let suggestions = self.suggestions();
        if !suggestions.is_empty() {
            let _ = writeln!(out, "\n{}", "Suggestions:".yellow().bold());
            for suggestion in suggestions {
                let _ = writeln!(out, "  {suggestion}");
            }
        }

        if !verbose {
            let _ = writeln!(
                out,
                "\n{} {}",
                "\u{2139}".blue(),
                "Use -v / --verbose for more details.".dimmed()
            );
        }
        out
    }

    /// Plain-text version of [`Self::format_colored`].
    pub fn format_plain(&self, verbose: bool) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "\nError: {self}");

        if verbose {
            for cause in self.causes() {
                let _ = writeln!(out, "  Caused by: {cause}");
            }
        }

        let suggestions = self.suggestions();
        if !suggestions.is_empty() {
            out.push_str("\nSuggestions:\n");
            for s in &suggestions {
                let _ = writeln!(out, "  {s}");
            }
        }

        if !verbose {
            out.push_str("\nUse -v / --verbose for more details.\n");
        }
        out
    }

    /// Emit a tracing event at a severity matching the category.
    pub fn log(&self) {
        match self.category() {
            ErrorCategory::UserError => tracing::warn!("User error: {self}"),
            ErrorCategory::NotFound => tracing::warn!("Not found: {self}"),
            ErrorCategory::Configuration => tracing::error!("Configuration error: {self}"),
            ErrorCategory::Internal => tracing::error!("Internal error: {self}"),
        }
        for cause in self.causes() {
            tracing::debug!("Caused by: {cause}");
        }
    }

    fn causes(&self) -> Vec<String> {
        let mut out = Vec::new();
        let mut source = self.source();
        while let Some(err) = source {
            out.push(err.to_string());
            source = err.source();
        }
        out
    }
}

/// Error categories for classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// User input error (validation, invalid arguments).
    UserError,
    /// Resource not found.
    NotFound,
    /// Configuration error.
    Configuration,
    /// Internal/system error.
    Internal,
}

// ── IntoCli trait ─────────────────────────────────────────────────────────────

/// Convert foreign error types into [`CliError`] with a context message.
pub trait IntoCli<T> {
    fn with_cli_context<F, S>(self, f: F) -> CliResult<T>
    where
        F: FnOnce() -> S,
        S: Into<String>;
}

impl<T> IntoCli<T> for Result<T, std::io::Error> {
    fn with_cli_context<F, S>(self, f: F) -> CliResult<T>
    where
        F: FnOnce() -> S,
        S: Into<String>,
    {
        self.map_err(|e| CliError::IoError {
            message: f().into(),
            source: e,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use beeproject_core::{application::ApplicationError, domain::DomainError};
    use std::{io, path::PathBuf};

    #[test]
    fn unknown_extension_lists_available() {
        let err = CliError::UnknownExtension {
            name: "cookiecutter".into(),
            available: vec!["beeproject".into(), "markdown".into()],
        };
        assert!(err.suggestions().iter().any(|s| s.contains("beeproject")));
        assert_eq!(err.exit_code(), 3);
    }

    #[test]
    fn core_project_exists_is_a_user_error() {
        let err: CliError = BeeError::from(ApplicationError::ProjectExists {
            path: PathBuf::from("foo"),
        })
        .into();
        assert_eq!(err.exit_code(), 2);
        assert!(err.suggestions().iter().any(|s| s.contains("--update")));
    }

    #[test]
    fn core_validation_is_a_user_error() {
        let err: CliError = BeeError::from(DomainError::InvalidOption {
            key: "package".into(),
            reason: "bad".into(),
        })
        .into();
        assert_eq!(err.category(), ErrorCategory::UserError);
    }

    #[test]
    fn exit_codes() {
        assert_eq!(
            CliError::ConfigError {
                message: "x".into(),
                source: None
            }
            .exit_code(),
            4
        );
        assert_eq!(
            CliError::IoError {
                message: "x".into(),
                source: io::Error::other("e"),
            }
            .exit_code(),
            1
        );
        assert_eq!(CliError::UnknownConfigKey { key: "x".into() }.exit_code(), 3);
    }

    #[test]
    fn format_plain_shows_causes_when_verbose() {
        let err = CliError::config("cannot parse", io::Error::other("line 3"));

        let verbose = err.format_plain(true);
        assert!(verbose.contains("Caused by: line 3"));
        assert!(!verbose.contains("--verbose"));

        let terse = err.format_plain(false);
        assert!(terse.contains("Suggestions:"));
        assert!(!terse.contains("Caused by"));
    }

    #[test]
    fn into_cli_io_error() {
        let result: Result<(), io::Error> = Err(io::Error::new(io::ErrorKind::NotFound, "missing"));
        let cli: CliResult<()> = result.with_cli_context(|| "reading config");
        assert!(matches!(cli, Err(CliError::IoError { ref message, .. }) if message == "reading config"));
    }
}

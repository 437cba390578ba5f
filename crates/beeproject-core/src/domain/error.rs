// ============================================================================
// domain/error.rs - DOMAIN ERRORS
// ============================================================================

use thiserror::Error;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (actions are plain functions, errors travel by value)
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Validation Errors
    // ========================================================================
    #[error("Required option missing: {key}")]
    MissingOption { key: String },

    #[error("Invalid option '{key}': {reason}")]
    InvalidOption { key: String, reason: String },

    #[error("Tree path must contain at least one segment")]
    EmptyPath,

    #[error("Invalid path segment '{segment}' in {path}")]
    InvalidPathSegment { path: String, segment: String },

    // ========================================================================
    // Conflicts
    // ========================================================================
    #[error("Path conflict at {path}: {reason}")]
    PathConflict { path: String, reason: String },

    // ========================================================================
    // Templates
    // ========================================================================
    #[error("Template '{template}' references undefined variable '{variable}'")]
    UndefinedVariable { template: String, variable: String },

    #[error("Template '{template}' has an unterminated placeholder")]
    UnterminatedPlaceholder { template: String },

    // ========================================================================
    // Pipeline assembly
    // ========================================================================
    #[error("Action '{action}' is placed relative to unknown action '{anchor}'")]
    UnknownAnchor { action: String, anchor: String },

    #[error("Action '{name}' is registered more than once")]
    DuplicateAction { name: String },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::MissingOption { key } => vec![
                format!("The option '{}' must be provided", key),
                "Pass it on the command line or set a default in the config file".into(),
            ],
            Self::InvalidOption { key, reason } => vec![
                format!("Option '{}' was rejected: {}", key, reason),
                match key.as_str() {
                    "package" => "Package names must be valid Python identifiers, e.g. my_package".into(),
                    "project" => "Project names are a single directory name, e.g. my-project".into(),
                    _ => "Check the value and try again".into(),
                },
            ],
            Self::PathConflict { path, .. } => vec![
                format!("Two extensions disagree about '{}'", path),
                "Try activating fewer extensions".into(),
            ],
            Self::UndefinedVariable { variable, .. } => vec![
                format!("Provide a value for '{}'", variable),
                "This usually means an extension template is out of date".into(),
            ],
            Self::UnknownAnchor { anchor, .. } => vec![
                format!("No action named '{}' is part of the pipeline", anchor),
                "An extension depends on another extension that is not active".into(),
            ],
            _ => vec!["See documentation for more details".into()],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::MissingOption { .. }
            | Self::InvalidOption { .. }
            | Self::EmptyPath
            | Self::InvalidPathSegment { .. } => ErrorCategory::Validation,
            Self::PathConflict { .. } | Self::DuplicateAction { .. } => ErrorCategory::Conflict,
            Self::UndefinedVariable { .. }
            | Self::UnterminatedPlaceholder { .. }
            | Self::UnknownAnchor { .. } => ErrorCategory::Internal,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Conflict,
    Internal,
}

/// Shorthand for results produced by domain code.
pub type DomainResult<T> = Result<T, DomainError>;

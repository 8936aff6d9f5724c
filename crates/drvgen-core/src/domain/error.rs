// ============================================================================
// domain/error.rs - DOMAIN ERRORS
// ============================================================================

use thiserror::Error;

use crate::error::ErrorCategory;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (carried inside phase failures)
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Validation Errors
    // ========================================================================
    #[error("Invalid project name '{name}': {reason}")]
    InvalidProjectName { name: String, reason: String },

    #[error("Invalid toolchain version '{input}': {reason}")]
    InvalidVersion { input: String, reason: String },

    #[error("Invalid identifier '{input}'")]
    InvalidIdentifier { input: String },

    // ========================================================================
    // Template Invariant Violations
    // ========================================================================
    #[error("Template for {artifact} has no content")]
    EmptyTemplate { artifact: String },

    #[error("Mark token {inner} overlaps mark token {outer}")]
    OverlappingMarks {
        outer: &'static str,
        inner: &'static str,
    },

    #[error("Value bound to {mark} contains mark token {token}")]
    MarkInBindingValue {
        mark: &'static str,
        token: &'static str,
    },

    #[error("Rendered {artifact} still contains mark token {token}")]
    UnresolvedMark {
        artifact: String,
        token: &'static str,
    },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidProjectName { name, reason } => vec![
                format!("'{}' cannot be used as a solution name: {}", name, reason),
                "Use letters, digits, '-' and '_'".into(),
                "Example: drvgen -name MyDriver -path C:\\src".into(),
            ],
            Self::InvalidVersion { input, .. } => vec![
                format!("Could not interpret '{}' as W.X.Y.Z", input),
                "Each component must fit in 16 bits (0-65535)".into(),
            ],
            Self::EmptyTemplate { artifact } => vec![
                format!("The built-in template for {} is corrupted", artifact),
                "Please report this issue".into(),
            ],
            _ => vec!["This is a template invariant violation, please report it".into()],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidProjectName { .. }
            | Self::InvalidVersion { .. }
            | Self::InvalidIdentifier { .. } => ErrorCategory::Validation,
            Self::EmptyTemplate { .. }
            | Self::OverlappingMarks { .. }
            | Self::MarkInBindingValue { .. }
            | Self::UnresolvedMark { .. } => ErrorCategory::Internal,
        }
    }
}

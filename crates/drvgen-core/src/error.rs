//! Unified error handling for drvgen core.
//!
//! Wraps domain and application errors behind one type with a display
//! category and user-actionable suggestions.

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::DomainError;

/// Root error type for drvgen core operations.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DrvgenError {
    /// Errors from the domain layer (invariant violations).
    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    /// Errors from the application layer (orchestration failures).
    #[error("Application error: {0}")]
    Application(#[from] ApplicationError),

    /// Configuration or setup errors.
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Unexpected internal errors (bugs).
    #[error("Internal error: {message}. This is a bug, please report it.")]
    Internal { message: String },
}

impl DrvgenError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Domain(e) => e.suggestions(),
            Self::Application(e) => e.suggestions(),
            Self::Configuration { message } => vec![
                format!("Configuration issue: {}", message),
                "Check your drvgen config file and try again".into(),
            ],
            Self::Internal { .. } => vec![
                "This appears to be a bug in drvgen".into(),
                "Please report this issue at: https://github.com/cosecruz/drvgen/issues".into(),
            ],
        }
    }

    /// Get error category for display/styling purposes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Domain(e) => e.category(),
            Self::Application(e) => e.category(),
            Self::Configuration { .. } => ErrorCategory::Configuration,
            Self::Internal { .. } => ErrorCategory::Internal,
        }
    }
}

/// Error categories for UI display and exit codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Bad user input (name, version string, identifier text).
    Validation,
    /// Output directory already exists.
    Conflict,
    /// Toolchain or identifier source unavailable.
    Precondition,
    /// Filesystem failure while writing output.
    Io,
    Configuration,
    Internal,
}

/// Convenient result type alias.
pub type DrvgenResult<T> = Result<T, DrvgenError>;

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    #[test]
    fn categories_flow_through_wrappers() {
        let domain: DrvgenError = DomainError::InvalidProjectName {
            name: "a/b".into(),
            reason: "bad".into(),
        }
        .into();
        assert_eq!(domain.category(), ErrorCategory::Validation);

        let conflict: DrvgenError = ApplicationError::LayoutConflict {
            path: PathBuf::from("/out/Test"),
        }
        .into();
        assert_eq!(conflict.category(), ErrorCategory::Conflict);

        let missing: DrvgenError = ApplicationError::ToolchainNotFound.into();
        assert_eq!(missing.category(), ErrorCategory::Precondition);
    }

    #[test]
    fn every_error_has_suggestions() {
        let errors: Vec<DrvgenError> = vec![
            ApplicationError::IdentifierUnavailable.into(),
            DrvgenError::Configuration {
                message: "x".into(),
            },
            DrvgenError::Internal {
                message: "x".into(),
            },
        ];
        for err in errors {
            assert!(!err.suggestions().is_empty(), "{err}");
        }
    }
}

//! Application layer errors.
//!
//! These errors represent failures in orchestration and in the ports,
//! not invariant violations. Those are `DomainError` from `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::domain::Artifact;
use crate::error::ErrorCategory;

/// Errors that occur during application orchestration.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ApplicationError {
    /// No installed toolchain matched the configured product.
    #[error("Visual Studio installation not found")]
    ToolchainNotFound,

    /// The toolchain executable has no readable version resource.
    #[error("Could not read the version of {path}")]
    ToolchainVersionUnreadable { path: PathBuf },

    /// A directory in the layout already exists.
    #[error("Directory already exists: {path}")]
    LayoutConflict { path: PathBuf },

    /// Filesystem operation failed.
    #[error("Filesystem error at {path}: {reason}")]
    FilesystemError { path: PathBuf, reason: String },

    /// The identifier source returned the nil identifier.
    #[error("Identifier source unavailable")]
    IdentifierUnavailable,

    /// The store has no template for an artifact.
    #[error("No template registered for {artifact}")]
    TemplateMissing { artifact: Artifact },

    /// Store access failed (lock poisoned).
    #[error("Template store error")]
    StoreLockError,
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::ToolchainNotFound => vec![
                "Install Visual Studio Professional 2019".into(),
                "Or set toolchain.install_location in the drvgen config file".into(),
            ],
            Self::ToolchainVersionUnreadable { path } => vec![
                format!("{} has no version resource", path.display()),
                "Check toolchain.executable_subpath points at devenv.exe".into(),
            ],
            Self::LayoutConflict { path } => vec![
                format!("Directory already exists: {}", path.display()),
                "Choose a different project name or output path".into(),
                "Or remove the existing directory first".into(),
            ],
            Self::FilesystemError { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have write permissions".into(),
                "Ensure the output path exists".into(),
            ],
            Self::IdentifierUnavailable => vec![
                "The system random number source is unavailable".into(),
                "Try again; if it persists, check the host entropy source".into(),
            ],
            Self::TemplateMissing { artifact } => vec![
                format!("The built-in template for {} is missing", artifact),
                "Please report this issue".into(),
            ],
            Self::StoreLockError => vec![
                "The template store is locked".into(),
                "Try again in a moment".into(),
            ],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ToolchainNotFound
            | Self::ToolchainVersionUnreadable { .. }
            | Self::IdentifierUnavailable => ErrorCategory::Precondition,
            Self::LayoutConflict { .. } => ErrorCategory::Conflict,
            Self::FilesystemError { .. } => ErrorCategory::Io,
            Self::TemplateMissing { .. } | Self::StoreLockError => ErrorCategory::Internal,
        }
    }

    /// Wrap a raw I/O error with the path it concerns.
    pub fn filesystem(path: impl Into<PathBuf>, err: impl std::fmt::Display) -> Self {
        Self::FilesystemError {
            path: path.into(),
            reason: err.to_string(),
        }
    }
}

//! Error handling for the drvgen CLI.
//!
//! Provides structured errors with:
//! - User-friendly messages
//! - Actionable suggestions
//! - Exit code mapping

use std::error::Error;

use owo_colors::OwoColorize;
use thiserror::Error;

use drvgen_core::error::DrvgenError;
use drvgen_core::prelude::ScaffoldFailure;

pub use drvgen_core::error::ErrorCategory as CoreCategory;

/// Result type alias for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

/// CLI error types.
#[derive(Debug, Error)]
pub enum CliError {
    /// A generation run stopped part-way.
    #[error(transparent)]
    Scaffold(#[from] ScaffoldFailure),

    /// An error raised before the run started, e.g. while checking arguments.
    #[error("{0}")]
    Core(#[from] DrvgenError),

    /// A configuration file could not be read or parsed.
    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    /// Writing to the terminal failed.
    #[error("I/O error: {message}")]
    IoError {
        message: String,
        #[source]
        source: std::io::Error,
    },
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
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Scaffold(failure) => {
                let mut suggestions = failure.error.suggestions();
                if !failure.left_behind.is_empty() {
                    suggestions.push(format!(
                        "{} partially generated entries were kept; remove them before retrying",
                        failure.left_behind.len()
                    ));
                    suggestions.push(
                        "Set generation.rollback_on_failure = true to clean up automatically"
                            .into(),
                    );
                }
                suggestions
            }

            Self::Core(core_err) => core_err.suggestions(),

            Self::ConfigError { .. } => vec![
                format!(
                    "Check your config file at {}",
                    crate::config::AppConfig::config_path().display()
                ),
                "Pass another file with --config <FILE>".into(),
            ],

            Self::IoError { message, .. } => vec![
                format!("I/O operation failed: {}", message),
                "Check that stdout is writable".into(),
            ],
        }
    }

    /// Get the error category for styling and exit codes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Scaffold(failure) => failure.error.category().into(),
            Self::Core(core) => core.category().into(),
            Self::ConfigError { .. } => ErrorCategory::Configuration,
            Self::IoError { .. } => ErrorCategory::Internal,
        }
    }

    /// Exit code to pass to the OS.
    ///
    /// | Category      | Code |
    /// |---------------|------|
    /// | User error    |  2   |
    /// | Precondition  |  3   |
    /// | Configuration |  4   |
    /// | Internal      |  1   |
    pub fn exit_code(&self) -> u8 {
        match self.category() {
            ErrorCategory::UserError => 2,
            ErrorCategory::Precondition => 3,
            ErrorCategory::Configuration => 4,
            ErrorCategory::Internal => 1,
        }
    }

    /// Entries a failed run left on disk.
    fn left_behind(&self) -> &[std::path::PathBuf] {
        match self {
            Self::Scaffold(failure) => &failure.left_behind,
            _ => &[],
        }
    }

    /// Format the error for display with colors and suggestions.
    pub fn format_colored(&self, verbose: bool) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "\n{} {}\n\n",
            "\u{2717}".red().bold(),
            "Error:".red().bold()
        ));
        output.push_str(&format!("  {}\n", self.to_string().red()));

        if verbose {
            let mut source = self.source();
            while let Some(err) = source {
                output.push_str(&format!(
                    "\n  {} {}\n",
                    "\u{2192}".dimmed(),
                    err.to_string().dimmed()
                ));
                source = err.source();
            }
        }

        let left_behind = self.left_behind();
        if !left_behind.is_empty() {
            output.push_str(&format!("\n{}\n", "Left on disk:".yellow().bold()));
            for path in left_behind {
                output.push_str(&format!("  {}\n", path.display()));
            }
        }

        let suggestions = self.suggestions();
        if !suggestions.is_empty() {
            output.push_str(&format!("\n{}\n", "Suggestions:".yellow().bold()));
            for suggestion in suggestions {
                output.push_str(&format!("  {}\n", suggestion));
            }
        }

        if !verbose {
            output.push('\n');
            output.push_str(&format!(
                "{} {}\n",
                "\u{2139}".blue(),
                "Use -v / --verbose for more details.".dimmed(),
            ));
        }

        output
    }

    /// Plain-text version of [`Self::format_colored`], no ANSI codes.
    pub fn format_plain(&self, verbose: bool) -> String {
        let mut out = String::new();
        out.push_str(&format!("\nError: {}\n", self));

        if verbose {
            let mut src = self.source();
            while let Some(err) = src {
                out.push_str(&format!("  Caused by: {err}\n"));
                src = err.source();
            }
        }

        let left_behind = self.left_behind();
        if !left_behind.is_empty() {
            out.push_str("\nLeft on disk:\n");
            for path in left_behind {
                out.push_str(&format!("  {}\n", path.display()));
            }
        }

        let suggestions = self.suggestions();
        if !suggestions.is_empty() {
            out.push_str("\nSuggestions:\n");
            for s in &suggestions {
                out.push_str(&format!("  {s}\n"));
            }
        }

        if !verbose {
            out.push_str("\nUse -v / --verbose for more details.\n");
        }

        out
    }

    /// Log the error using tracing.
    pub fn log(&self) {
        match self.category() {
            ErrorCategory::UserError => tracing::warn!("User error: {}", self),
            ErrorCategory::Precondition => tracing::warn!("Precondition failed: {}", self),
            ErrorCategory::Configuration => tracing::error!("Configuration error: {}", self),
            ErrorCategory::Internal => tracing::error!("Internal error: {}", self),
        }

        if let Some(source) = self.source() {
            tracing::debug!("Caused by: {}", source);
        }
    }
}

/// Error categories for classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Bad arguments or an output directory that already exists.
    UserError,
    /// The IDE or an identifier source is unavailable.
    Precondition,
    /// Configuration error.
    Configuration,
    /// Internal/system error, including filesystem failures.
    Internal,
}

impl From<CoreCategory> for ErrorCategory {
    fn from(category: CoreCategory) -> Self {
        match category {
            CoreCategory::Validation | CoreCategory::Conflict => Self::UserError,
            CoreCategory::Precondition => Self::Precondition,
            CoreCategory::Configuration => Self::Configuration,
            CoreCategory::Io | CoreCategory::Internal => Self::Internal,
        }
    }
}

// ── IntoCli trait ─────────────────────────────────────────────────────────────

/// Extension trait to convert foreign error types into [`CliError`] at
/// call-sites with a descriptive context message.
pub trait IntoCli<T> {
    /// Convert to `CliResult` attaching a human-readable context message.
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

impl<T> IntoCli<T> for Result<T, DrvgenError> {
    /// Core errors already carry their own context.
    fn with_cli_context<F, S>(self, _f: F) -> CliResult<T>
    where
        F: FnOnce() -> S,
        S: Into<String>,
    {
        self.map_err(CliError::Core)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::path::PathBuf;

    use drvgen_core::application::ApplicationError;
    use drvgen_core::domain::DomainError;
    use drvgen_core::prelude::Phase;

    fn failure(error: DrvgenError, left_behind: Vec<PathBuf>) -> CliError {
        CliError::Scaffold(ScaffoldFailure {
            phase: Phase::PlanLayout,
            error,
            left_behind,
        })
    }

    fn conflict() -> DrvgenError {
        ApplicationError::LayoutConflict {
            path: PathBuf::from("/out/Test"),
        }
        .into()
    }

    // ── exit codes ────────────────────────────────────────────────────────

    #[test]
    fn conflict_is_a_user_error() {
        assert_eq!(failure(conflict(), vec![]).exit_code(), 2);
    }

    #[test]
    fn invalid_name_is_a_user_error() {
        let err = CliError::Core(
            DomainError::InvalidProjectName {
                name: "a/b".into(),
                reason: "contains a path separator".into(),
            }
            .into(),
        );
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn missing_toolchain_is_a_precondition() {
        let err = failure(ApplicationError::ToolchainNotFound.into(), vec![]);
        assert_eq!(err.exit_code(), 3);
    }

    #[test]
    fn filesystem_failure_is_internal() {
        let err = failure(ApplicationError::filesystem("/out/x", "denied").into(), vec![]);
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn config_error_exit_code() {
        let err = CliError::ConfigError {
            message: "x".into(),
        };
        assert_eq!(err.exit_code(), 4);
    }

    // ── format ────────────────────────────────────────────────────────────

    #[test]
    fn plain_format_names_phase_and_suggestions() {
        let s = failure(conflict(), vec![]).format_plain(false);
        assert!(s.contains("Error: Generation failed during plan layout"));
        assert!(s.contains("Suggestions:"));
        assert!(s.contains("--verbose"));
        assert!(!s.contains("Left on disk:"));
    }

    #[test]
    fn plain_format_lists_left_behind_entries() {
        let err = failure(
            ApplicationError::filesystem("/out/Test/Test.sln", "denied").into(),
            vec![PathBuf::from("/out/Test")],
        );
        let s = err.format_plain(true);
        assert!(s.contains("Left on disk:\n  /out/Test\n"));
        assert!(s.contains("Caused by:"));
        assert!(!s.contains("--verbose"));
        assert!(err
            .suggestions()
            .iter()
            .any(|s| s.contains("rollback_on_failure")));
    }

    // ── IntoCli ───────────────────────────────────────────────────────────

    #[test]
    fn into_cli_io_error() {
        let result: Result<(), io::Error> = Err(io::Error::new(io::ErrorKind::NotFound, "missing"));
        let cli: CliResult<()> = result.with_cli_context(|| "printing report");
        assert!(matches!(cli, Err(CliError::IoError { ref message, .. }) if message == "printing report"));
    }

    #[test]
    fn into_cli_core_error() {
        let result: Result<(), DrvgenError> = Err(conflict());
        let cli = result.with_cli_context(|| "ignored");
        assert!(matches!(cli, Err(CliError::Core(_))));
    }
}

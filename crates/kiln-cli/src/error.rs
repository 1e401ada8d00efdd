//! Error handling for the Kiln CLI.
//!
//! Provides structured errors with:
//! - User-friendly messages
//! - Actionable suggestions
//! - Proper error chaining
//! - Exit code mapping

use std::error::Error;
use std::path::PathBuf;

use owo_colors::OwoColorize;
use thiserror::Error;

use kiln_core::error::{ErrorCategory as CoreCategory, KilnError};

/// Result type alias for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

/// CLI error types.
#[derive(Debug, Error)]
pub enum CliError {
    /// Invalid user input that clap could not catch (e.g. a malformed version).
    #[error("Invalid input: {message}")]
    InvalidInput {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The description has problems; nothing was generated.
    #[error("Invalid project description ({} problem{})", violations.len(), if violations.len() == 1 { "" } else { "s" })]
    InvalidDescription { violations: Vec<String> },

    /// The archive file already exists.
    #[error("Output already exists at {}", path.display())]
    OutputExists { path: PathBuf },

    // ── Config errors ──────────────────────────────────────────────────────
    /// A configuration file or variable could not be read or parsed.
    #[error("Configuration error: {message}")]
    ConfigError {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    // ── Core errors ────────────────────────────────────────────────────────
    /// An error propagated from `kiln-core` or `kiln-adapters`.
    #[error("Generation failed: {0}")]
    Core(#[from] KilnError),

    // ── System errors ──────────────────────────────────────────────────────
    /// An I/O operation failed.
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
            Self::InvalidInput { message, .. } => vec![
                format!("Check your input: {message}"),
                "Use --help for usage information".into(),
            ],

            Self::InvalidDescription { violations } => {
                let mut out: Vec<String> = violations.iter().map(|v| format!("  • {v}")).collect();
                out.push("List known dependencies with: kiln dependencies".into());
                out
            }

            Self::OutputExists { path } => vec![
                format!("The file '{}' already exists", path.display()),
                "Use --force to overwrite it".into(),
                "Or pick another location with --output".into(),
            ],

            Self::ConfigError { message, .. } => vec![
                format!("Configuration issue: {message}"),
                format!(
                    "Check your config file at {}",
                    crate::config::AppConfig::config_path().display()
                ),
                "Check KILN_* environment variables".into(),
            ],

            Self::Core(core_err) => core_err.suggestions(),

            Self::IoError { message, .. } => vec![
                format!("I/O operation failed: {message}"),
                "Check file permissions".into(),
                "Ensure the parent directory exists".into(),
            ],
        }
    }

    /// Get the error category for styling and exit codes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidInput { .. } => ErrorCategory::UserError,
            Self::InvalidDescription { .. } => ErrorCategory::UserError,
            Self::OutputExists { .. } => ErrorCategory::UserError,
            Self::ConfigError { .. } => ErrorCategory::Configuration,
            Self::Core(core) => match core.category() {
                CoreCategory::Validation => ErrorCategory::UserError,
                CoreCategory::NotFound => ErrorCategory::NotFound,
                CoreCategory::Configuration => ErrorCategory::Configuration,
                CoreCategory::Packaging | CoreCategory::Internal => ErrorCategory::Internal,
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

    /// Format the error for display with colors and suggestions.
    pub fn format_colored(&self, verbose: bool) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "\n{} {}\n\n",
            "✗".red().bold(),
            "Error:".red().bold()
        ));
        output.push_str(&format!("  {}\n", self.to_string().red()));

        if verbose {
            let mut source = self.source();
            while let Some(err) = source {
                output.push_str(&format!(
                    "\n  {} {}\n",
                    "→".dimmed(),
                    err.to_string().dimmed()
                ));
                source = err.source();
            }
        }

        let suggestions = self.suggestions();
        if !suggestions.is_empty() {
            output.push_str(&format!("\n{}\n", "Suggestions:".yellow().bold()));
            for suggestion in suggestions {
                output.push_str(&format!("  {suggestion}\n"));
            }
        }

        if !verbose {
            output.push('\n');
            output.push_str(&format!(
                "{} {}\n",
                "\u{2139}".blue(), // ℹ
                "Use -v / --verbose for more details.".dimmed(),
            ));
        }

        output
    }

    /// Plain-text version of [`Self::format_colored`], no ANSI codes.
    pub fn format_plain(&self, verbose: bool) -> String {
        let mut out = String::new();
        out.push_str(&format!("\nError: {self}\n"));

        if verbose {
            let mut src = self.source();
            while let Some(err) = src {
                out.push_str(&format!("  Caused by: {err}\n"));
                src = err.source();
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
        let kind = match self {
            Self::Core(core) => core.kind().as_str(),
            _ => "cli",
        };
        match self.category() {
            ErrorCategory::UserError => tracing::warn!(kind, "User error: {}", self),
            ErrorCategory::NotFound => tracing::warn!(kind, "Not found: {}", self),
            ErrorCategory::Configuration => tracing::error!(kind, "Configuration error: {}", self),
            ErrorCategory::Internal => tracing::error!(kind, "Internal error: {}", self),
        }

        if let Some(source) = self.source() {
            tracing::debug!("Caused by: {}", source);
        }
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

/// Extension trait to convert foreign error types into [`CliError`] at
/// call-sites with a descriptive context message.
///
/// No blanket impl: it would overlap with the concrete ones.
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

impl<T> IntoCli<T> for Result<T, KilnError> {
    /// Core errors already carry their context; the message is dropped.
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
    use std::io;

    use kiln_core::application::ApplicationError;
    use kiln_core::domain::{ArchiveFormat, DomainError};

    use super::*;

    // ── suggestions ───────────────────────────────────────────────────────

    #[test]
    fn invalid_description_lists_every_violation() {
        let err = CliError::InvalidDescription {
            violations: vec![
                "unknown dependency 'warp-drive'".into(),
                "platform version is required".into(),
            ],
        };
        let suggestions = err.suggestions();
        assert!(suggestions.iter().any(|s| s.contains("warp-drive")));
        assert!(suggestions.iter().any(|s| s.contains("platform version")));
        assert_eq!(err.to_string(), "Invalid project description (2 problems)");
    }

    #[test]
    fn output_exists_suggests_force() {
        let err = CliError::OutputExists {
            path: PathBuf::from("/tmp/demo.zip"),
        };
        assert!(err.suggestions().iter().any(|s| s.contains("--force")));
    }

    #[test]
    fn core_suggestions_are_forwarded() {
        let err = CliError::Core(
            ApplicationError::CyclicDependency {
                cycle: vec!["a".into(), "b".into(), "a".into()],
            }
            .into(),
        );
        assert!(err.suggestions().iter().any(|s| s.contains("a -> b -> a")));
    }

    // ── exit codes ────────────────────────────────────────────────────────

    #[test]
    fn exit_code_user_error() {
        assert_eq!(
            CliError::InvalidInput {
                message: "x".into(),
                source: None
            }
            .exit_code(),
            2
        );
        let core = CliError::Core(
            DomainError::InvalidDescription {
                violations: vec!["name is required".into()],
            }
            .into(),
        );
        assert_eq!(core.exit_code(), 2);
    }

    #[test]
    fn exit_code_configuration() {
        assert_eq!(
            CliError::ConfigError {
                message: "x".into(),
                source: None
            }
            .exit_code(),
            4
        );
        let core = CliError::Core(KilnError::Configuration {
            message: "duplicate catalog entry 'web'".into(),
        });
        assert_eq!(core.exit_code(), 4);
    }

    #[test]
    fn exit_code_internal() {
        assert_eq!(
            CliError::IoError {
                message: "x".into(),
                source: io::Error::other("e"),
            }
            .exit_code(),
            1
        );
        let packaging = CliError::Core(
            ApplicationError::PackagingFailed {
                format: ArchiveFormat::Zip,
                reason: "disk full".into(),
            }
            .into(),
        );
        assert_eq!(packaging.exit_code(), 1);
    }

    // ── format ────────────────────────────────────────────────────────────

    #[test]
    fn format_plain_contains_error_header() {
        let err = CliError::OutputExists {
            path: PathBuf::from("/tmp/x.zip"),
        };
        let s = err.format_plain(false);
        assert!(s.contains("Error:"));
        assert!(s.contains("Suggestions:"));
        assert!(s.contains("--verbose"));
    }

    #[test]
    fn format_plain_verbose_shows_cause() {
        let err = CliError::IoError {
            message: "writing demo.zip".into(),
            source: io::Error::other("disk full"),
        };
        let s = err.format_plain(true);
        assert!(s.contains("Caused by: disk full"));
        assert!(!s.contains("--verbose"));
    }

    // ── IntoCli ───────────────────────────────────────────────────────────

    #[test]
    fn into_cli_io_error() {
        let result: Result<(), io::Error> = Err(io::Error::new(io::ErrorKind::NotFound, "missing"));
        let cli: CliResult<()> = result.with_cli_context(|| "reading catalog");
        assert!(matches!(cli, Err(CliError::IoError { ref message, .. }) if message == "reading catalog"));
    }
}

// ============================================================================
// domain/error.rs - DOMAIN ERRORS
// ============================================================================

use thiserror::Error;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (results are shared between a run and its caller)
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Validation Errors (400-level equivalent)
    // ========================================================================
    #[error("Invalid project description: {}", violations.join("; "))]
    InvalidDescription { violations: Vec<String> },

    #[error("Invalid version '{input}': {reason}")]
    InvalidVersion { input: String, reason: String },

    #[error("Invalid path '{path}': {reason}")]
    InvalidPath { path: String, reason: String },

    #[error("Unsupported archive format '{format}'")]
    UnsupportedFormat { format: String },

    // ========================================================================
    // Project tree constraints
    // ========================================================================
    #[error("Duplicate entry in project tree: {path}")]
    DuplicateEntry { path: String },

    #[error("Generated project is empty")]
    EmptyProject,
}

impl DomainError {
    pub(crate) fn invalid_version(input: &str, reason: impl Into<String>) -> Self {
        Self::InvalidVersion {
            input: input.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn invalid_path(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidPath {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidDescription { violations } => {
                let mut out = vec!["Fix the following fields and try again:".to_string()];
                out.extend(violations.iter().map(|v| format!("  • {v}")));
                out
            }
            Self::InvalidVersion { .. } => vec![
                "Versions look like 3.2.0, 3.3.0-M1, 3.3.0.RC2 or 3.2.1-SNAPSHOT".into(),
                "Ranges look like [3.0.0,3.3.0) or a bare minimum version".into(),
            ],
            Self::UnsupportedFormat { format } => vec![
                format!("'{format}' is not a known archive format"),
                "Supported formats: zip, tgz".into(),
            ],
            Self::DuplicateEntry { path } => vec![
                format!("Two contributors produced '{path}'"),
                "Use a post-processing contributor to replace files deliberately".into(),
            ],
            Self::EmptyProject => vec![
                "No contributor produced any file for this description".into(),
                "Check the language, build system and packaging values".into(),
            ],
            Self::InvalidPath { .. } => {
                vec!["Generated paths must be relative and stay inside the project".into()]
            }
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidDescription { .. } | Self::InvalidVersion { .. } => {
                ErrorCategory::Validation
            }
            Self::UnsupportedFormat { .. } | Self::DuplicateEntry { .. } => {
                ErrorCategory::Packaging
            }
            Self::InvalidPath { .. } | Self::EmptyProject => ErrorCategory::Internal,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Packaging,
    Internal,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_description_lists_every_violation() {
        let err = DomainError::InvalidDescription {
            violations: vec!["group id is required".into(), "name is required".into()],
        };
        let msg = err.to_string();
        assert!(msg.contains("group id is required"));
        assert!(msg.contains("name is required"));
        assert_eq!(err.suggestions().len(), 3);
    }

    #[test]
    fn categories() {
        assert_eq!(
            DomainError::UnsupportedFormat { format: "rar".into() }.category(),
            ErrorCategory::Packaging
        );
        assert_eq!(
            DomainError::invalid_version("x", "bad").category(),
            ErrorCategory::Validation
        );
        assert_eq!(DomainError::EmptyProject.category(), ErrorCategory::Internal);
    }
}

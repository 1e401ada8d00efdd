//! Unified error handling for Kiln Core.
//!
//! This module provides a unified error type that wraps domain and application
//! errors, with a stable kind identifier and user-actionable suggestions.

use std::fmt;

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::DomainError;

/// Root error type for Kiln Core operations.
#[derive(Debug, Error, Clone)]
pub enum KilnError {
    /// Errors from the domain layer (invalid input, tree constraints).
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Errors from the application layer (resolution, ordering, execution).
    #[error(transparent)]
    Application(#[from] ApplicationError),

    /// Configuration or setup errors.
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Unexpected internal errors (bugs).
    #[error("Internal error: {message}. This is a bug, please report it.")]
    Internal { message: String },
}

impl KilnError {
    /// Stable identifier of the failure, independent of the message text.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Domain(e) => match e {
                DomainError::InvalidDescription { .. } => ErrorKind::InvalidDescription,
                DomainError::InvalidVersion { .. } => ErrorKind::InvalidVersion,
                DomainError::InvalidPath { .. } => ErrorKind::InvalidPath,
                DomainError::UnsupportedFormat { .. } => ErrorKind::UnsupportedFormat,
                DomainError::DuplicateEntry { .. } => ErrorKind::DuplicateEntry,
                DomainError::EmptyProject => ErrorKind::EmptyProject,
            },
            Self::Application(e) => match e {
                ApplicationError::DuplicateRegistration { .. } => ErrorKind::DuplicateRegistration,
                ApplicationError::RegistrationClosed { .. } => ErrorKind::RegistrationClosed,
                ApplicationError::AmbiguousResolution { .. } => ErrorKind::AmbiguousResolution,
                ApplicationError::CyclicDependency { .. } => ErrorKind::CyclicDependency,
                ApplicationError::ContributorFailed { .. } => ErrorKind::ContributorFailed,
                ApplicationError::DeadlineExceeded { .. } => ErrorKind::DeadlineExceeded,
                ApplicationError::InvalidState { .. } => ErrorKind::InvalidState,
                ApplicationError::PackagingFailed { .. } => ErrorKind::PackagingFailed,
                ApplicationError::OutputFailed { .. } => ErrorKind::OutputFailed,
            },
            Self::Configuration { .. } => ErrorKind::Configuration,
            Self::Internal { .. } => ErrorKind::Internal,
        }
    }

    /// Id of the contributor that failed, when a contributor caused the error.
    pub fn contributor(&self) -> Option<&str> {
        match self {
            Self::Application(ApplicationError::ContributorFailed { contributor, .. }) => {
                Some(contributor)
            }
            _ => None,
        }
    }

    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Domain(e) => e.suggestions(),
            Self::Application(e) => e.suggestions(),
            Self::Configuration { message } => vec![
                format!("Configuration issue: {message}"),
                "Check your config file and KILN_* environment variables".into(),
            ],
            Self::Internal { .. } => vec![
                "This appears to be a bug in Kiln".into(),
                "Please report this issue at: https://github.com/kiln-rs/kiln/issues".into(),
            ],
        }
    }

    /// Get error category for display/styling purposes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Domain(e) => match e.category() {
                crate::domain::ErrorCategory::Validation => ErrorCategory::Validation,
                crate::domain::ErrorCategory::Packaging => ErrorCategory::Packaging,
                crate::domain::ErrorCategory::Internal => ErrorCategory::Internal,
            },
            Self::Application(e) => e.category(),
            Self::Configuration { .. } => ErrorCategory::Configuration,
            Self::Internal { .. } => ErrorCategory::Internal,
        }
    }
}

/// Error categories for UI display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    NotFound,
    Configuration,
    Packaging,
    Internal,
}

/// Stable failure identifiers, one per error variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidDescription,
    InvalidVersion,
    InvalidPath,
    UnsupportedFormat,
    DuplicateEntry,
    EmptyProject,
    DuplicateRegistration,
    RegistrationClosed,
    AmbiguousResolution,
    CyclicDependency,
    ContributorFailed,
    DeadlineExceeded,
    InvalidState,
    PackagingFailed,
    OutputFailed,
    Configuration,
    Internal,
}

impl ErrorKind {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::InvalidDescription => "invalid_description",
            Self::InvalidVersion => "invalid_version",
            Self::InvalidPath => "invalid_path",
            Self::UnsupportedFormat => "unsupported_format",
            Self::DuplicateEntry => "duplicate_entry",
            Self::EmptyProject => "empty_project",
            Self::DuplicateRegistration => "duplicate_registration",
            Self::RegistrationClosed => "registration_closed",
            Self::AmbiguousResolution => "ambiguous_resolution",
            Self::CyclicDependency => "cyclic_dependency",
            Self::ContributorFailed => "contributor_failed",
            Self::DeadlineExceeded => "deadline_exceeded",
            Self::InvalidState => "invalid_state",
            Self::PackagingFailed => "packaging_failed",
            Self::OutputFailed => "output_failed",
            Self::Configuration => "configuration",
            Self::Internal => "internal",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Convenient result type alias.
pub type KilnResult<T> = Result<T, KilnError>;

/// Extension trait for adding context to foreign errors.
pub trait Context<T> {
    fn context(self, msg: impl Into<String>) -> KilnResult<T>;
}

impl<T, E> Context<T> for Result<T, E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn context(self, msg: impl Into<String>) -> KilnResult<T> {
        self.map_err(|e| KilnError::Configuration {
            message: format!("{}: {}", msg.into(), e),
        })
    }
}

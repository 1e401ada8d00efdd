//! Application layer errors.
//!
//! These errors represent failures in orchestration (registration,
//! resolution, ordering, execution, packaging), not invalid input. Input
//! errors are `DomainError` from `crate::domain`.

use std::path::PathBuf;

use thiserror::Error;

use crate::application::contributor::{Capability, ContributorError};
use crate::domain::ArchiveFormat;
use crate::error::ErrorCategory;

/// Errors that occur during generation orchestration.
#[derive(Debug, Error, Clone)]
pub enum ApplicationError {
    #[error("Contributor '{id}' is already registered")]
    DuplicateRegistration { id: String },

    #[error("Cannot register '{id}': the registry has already been resolved")]
    RegistrationClosed { id: String },

    #[error("More than one {capability} contributor is active: {}", candidates.join(", "))]
    AmbiguousResolution {
        capability: Capability,
        candidates: Vec<String>,
    },

    #[error("Contributor ordering has a cycle: {}", cycle.join(" -> "))]
    CyclicDependency { cycle: Vec<String> },

    #[error("Contributor '{contributor}' failed: {source}")]
    ContributorFailed {
        contributor: String,
        #[source]
        source: ContributorError,
    },

    #[error("Deadline exceeded before running '{next}'")]
    DeadlineExceeded { next: String },

    #[error("Generation run is {actual}, expected {expected}")]
    InvalidState { expected: String, actual: String },

    #[error("Failed to write {format} archive: {reason}")]
    PackagingFailed {
        format: ArchiveFormat,
        reason: String,
    },

    #[error("Failed to write '{}': {reason}", path.display())]
    OutputFailed { path: PathBuf, reason: String },
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::DuplicateRegistration { id } => vec![
                format!("Another contributor already uses the id '{id}'"),
                "Give every extension contributor a unique id".into(),
            ],
            Self::RegistrationClosed { .. } => {
                vec!["Register every contributor before resolving".into()]
            }
            Self::AmbiguousResolution {
                capability,
                candidates,
            } => vec![
                format!(
                    "Only one {capability} contributor may be active; active: {}",
                    candidates.join(", ")
                ),
                "Tighten the conditions so they are mutually exclusive".into(),
            ],
            Self::CyclicDependency { cycle } => vec![
                format!("Break the cycle: {}", cycle.join(" -> ")),
                "Remove one of the runs-after declarations".into(),
            ],
            Self::ContributorFailed { contributor, .. } => vec![
                format!("Contributor '{contributor}' could not complete"),
                "Run with -v for the full trace".into(),
            ],
            Self::DeadlineExceeded { .. } => vec![
                "Generation took longer than the configured timeout".into(),
                "Increase --timeout-ms or drop optional dependencies".into(),
            ],
            Self::PackagingFailed { .. } => vec![
                "Try the other archive format or write files with --format dir".into(),
            ],
            Self::OutputFailed { path, .. } => vec![
                format!("Check that '{}' is writable", path.display()),
                "Choose an empty or missing --output directory".into(),
            ],
            Self::InvalidState { .. } => vec!["Check the error details above".into()],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::DuplicateRegistration { .. }
            | Self::RegistrationClosed { .. }
            | Self::AmbiguousResolution { .. }
            | Self::CyclicDependency { .. } => ErrorCategory::Configuration,
            Self::PackagingFailed { .. } | Self::OutputFailed { .. } => ErrorCategory::Packaging,
            Self::ContributorFailed { .. }
            | Self::DeadlineExceeded { .. }
            | Self::InvalidState { .. } => ErrorCategory::Internal,
        }
    }
}

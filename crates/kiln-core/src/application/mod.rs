//! Application layer for Kiln.
//!
//! This layer contains:
//! - **Conditions**: activation predicates evaluated against a description
//! - **Contributors**: the extension seam and the per-run registry
//! - **Services**: the generator and the run state machine
//! - **Ports**: interface definitions (traits) for external dependencies
//! - **Errors**: application-specific error types

pub mod condition;
pub mod contributor;
pub mod error;
pub mod ports;
pub mod registry;
pub mod services;

pub use condition::{Condition, ConditionContext, evaluate};
pub use contributor::{Capability, ContributionContext, Contributor, ContributorError};
pub use registry::ContributorRegistry;
pub use services::{
    GenerationContent, GenerationOptions, GenerationResult, GenerationRun, OutputKind,
    ProjectGenerator, RunState,
};

// Re-export port traits (for adapter implementation)
pub use ports::{MetadataCatalog, ProjectPackager};

pub use error::ApplicationError;

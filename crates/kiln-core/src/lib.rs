//! Kiln Core - conditional project generation engine.
//!
//! This crate provides the domain and application layers of Kiln, following
//! hexagonal (ports and adapters) architecture.
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │             kiln-cli (CLI)              │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │   ProjectGenerator / GenerationRun      │
//! │  resolve -> order -> render -> package  │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │  Ports: MetadataCatalog, ProjectPackager│
//! │  Seam:  Contributor + Condition         │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │  kiln-adapters (catalog, zip/tar,       │
//! │  built-in contributors)                 │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use kiln_core::prelude::*;
//!
//! let description = ProjectDescription::builder()
//!     .language(Language::Java)
//!     .group_id("com.example")
//!     .artifact_id("demo")
//!     .packaging(Packaging::Jar)
//!     .platform_version("3.2.0".parse()?)
//!     .build();
//!
//! let generator = ProjectGenerator::new(catalog, packager)
//!     .with_contributors(builtin_contributors());
//! let result = generator.generate(description)?;
//! ```

pub mod application;
pub mod domain;
pub mod error;

/// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        Capability, Condition, ConditionContext, ContributionContext, Contributor,
        ContributorError, GenerationOptions, GenerationResult, MetadataCatalog, OutputKind,
        ProjectGenerator, ProjectPackager,
    };
    pub use crate::domain::{
        ArchiveEntry, ArchiveFormat, BuildSystem, DependencyMetadata, DependencyScope, Language,
        Packaging, ProjectDescription, ProjectTree, Version, VersionRange,
    };
    pub use crate::error::{KilnError, KilnResult};
}

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

//! Infrastructure adapters for Kiln.
//!
//! This crate implements the ports defined in `kiln-core::application::ports`
//! and ships the built-in contributor set. All archive formats and file I/O
//! live here; `kiln-core` stays free of them.

pub mod catalog;
pub mod contributors;
pub mod filesystem;
pub mod packager;

// Re-export commonly used adapters
pub use catalog::InMemoryCatalog;
pub use contributors::builtin_contributors;
pub use filesystem::LocalFilesystem;
pub use packager::ArchivePackager;

use std::sync::Arc;

use kiln_core::application::ProjectGenerator;

/// A generator wired with the built-in catalog, contributors and packager.
pub fn default_generator() -> ProjectGenerator {
    generator_with_catalog(InMemoryCatalog::with_builtin())
}

/// Same as [`default_generator`] with a caller-supplied catalog.
pub fn generator_with_catalog(catalog: InMemoryCatalog) -> ProjectGenerator {
    ProjectGenerator::new(Arc::new(catalog), Arc::new(ArchivePackager::new()))
        .with_contributors(builtin_contributors())
}

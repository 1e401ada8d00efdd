//! Driven (output) ports - implemented by infrastructure.

use crate::domain::{ArchiveEntry, ArchiveFormat, DependencyMetadata};
use crate::error::KilnResult;

/// Port for read-only dependency metadata.
///
/// Implemented by:
/// - `kiln_adapters::catalog::InMemoryCatalog` (built-in set, TOML files)
///
/// A catalog is a snapshot: the same id resolves to the same metadata for
/// the whole lifetime of a generation run.
#[cfg_attr(test, mockall::automock)]
pub trait MetadataCatalog: Send + Sync {
    /// Look up a dependency by id.
    fn resolve_dependency(&self, id: &str) -> Option<DependencyMetadata>;

    /// Every known dependency, in catalog order.
    fn dependencies(&self) -> Vec<DependencyMetadata>;
}

/// Port for turning a rendered project into archive bytes.
///
/// Implemented by:
/// - `kiln_adapters::packager::ArchivePackager` (zip and tar.gz)
///
/// Implementations must be deterministic: the same entries produce the same
/// bytes. A duplicate path fails before any byte is produced.
pub trait ProjectPackager: Send + Sync {
    fn package(&self, entries: &[ArchiveEntry], format: ArchiveFormat) -> KilnResult<Vec<u8>>;
}

//! Core domain layer for Kiln.
//!
//! Pure data and rules: project descriptions, versions, the project tree and
//! the build model. All I/O (catalog loading, archive writing) is handled
//! via ports defined in the application layer.
//!
//! - **No I/O**: no filesystem, network, or external calls
//! - **No logging**: observability belongs to the application and CLI layers
//! - **Immutable inputs**: descriptions are read-only once built

pub mod entities;
pub mod error;
pub mod value_objects;
pub mod version;

pub use entities::{
    build::{BuildDependency, BuildModel, BuildPlugin, DEFAULT_PROJECT_VERSION},
    common::{FileMode, Permissions, RelativePath},
    dependency::{DependencyMetadata, DependencyScope},
    description::{
        DescriptionBuilder, HasLanguage, NoLanguage, ProjectDescription, RequestedDependency,
    },
    project_tree::{ArchiveEntry, EntryKind, ProjectTree, archive_layout},
    render::RenderContext,
};

pub use error::{DomainError, ErrorCategory};
pub use value_objects::{ArchiveFormat, BuildSystem, Language, Packaging};
pub use version::{Version, VersionRange};

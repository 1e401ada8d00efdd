pub mod build;
pub mod common;
pub mod dependency;
pub mod description;
pub mod project_tree;
pub mod render;

pub use crate::domain::DomainError;
pub use build::{BuildDependency, BuildModel, BuildPlugin};
pub use description::ProjectDescription;
pub use project_tree::{ArchiveEntry, ProjectTree};

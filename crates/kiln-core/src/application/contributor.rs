//! The `Contributor` seam: one unit of project generation.
//!
//! A contributor declares what it provides (a [`Capability`]), when it is
//! active (a [`Condition`]) and which contributors must run before it. The
//! orchestrator hands it a [`ContributionContext`] holding the read-only
//! description and the mutable build model and file tree.

use std::error::Error;
use std::fmt;
use std::sync::Arc;

use crate::application::{
    condition::{Condition, ConditionContext},
    ports::MetadataCatalog,
};
use crate::domain::{
    BuildModel, DomainError, Permissions, ProjectDescription, ProjectTree, RenderContext,
};

// ── Capability ───────────────────────────────────────────────────────────────

/// The extension point a contributor plugs into.
///
/// Variants are declared in execution stage order: customisers shape the
/// build model before build system contributors render it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Capability {
    Packaging,
    BuildCustomizer,
    BuildSystem,
    BuildFile,
    SourceFile,
    ResourceFile,
    PostProcess,
}

impl Capability {
    pub const ALL: [Self; 7] = [
        Self::Packaging,
        Self::BuildCustomizer,
        Self::BuildSystem,
        Self::BuildFile,
        Self::SourceFile,
        Self::ResourceFile,
        Self::PostProcess,
    ];

    pub const fn stage(&self) -> u8 {
        match self {
            Self::Packaging => 0,
            Self::BuildCustomizer => 1,
            Self::BuildSystem => 2,
            Self::BuildFile => 3,
            Self::SourceFile => 4,
            Self::ResourceFile => 5,
            Self::PostProcess => 6,
        }
    }

    /// At most one contributor of a single-valued capability may be active.
    pub const fn is_single_valued(&self) -> bool {
        matches!(self, Self::Packaging | Self::BuildSystem)
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Packaging => "packaging",
            Self::BuildCustomizer => "build-customizer",
            Self::BuildSystem => "build-system",
            Self::BuildFile => "build-file",
            Self::SourceFile => "source-file",
            Self::ResourceFile => "resource-file",
            Self::PostProcess => "post-process",
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Contributor ──────────────────────────────────────────────────────────────

pub trait Contributor: Send + Sync {
    /// Unique id within a registry.
    fn id(&self) -> &str;

    fn capability(&self) -> Capability;

    fn condition(&self) -> Condition;

    /// Higher runs (and resolves) first within a capability.
    fn priority(&self) -> i32 {
        0
    }

    /// Ids of contributors that must run before this one when active.
    fn runs_after(&self) -> Vec<String> {
        Vec::new()
    }

    fn contribute(&self, ctx: &mut ContributionContext) -> Result<(), ContributorError>;
}

impl fmt::Debug for dyn Contributor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Contributor")
            .field("id", &self.id())
            .field("capability", &self.capability())
            .field("priority", &self.priority())
            .finish()
    }
}

/// Error returned by a contributor. The orchestrator wraps it together with
/// the contributor id.
#[derive(Debug, Clone)]
pub struct ContributorError(Arc<dyn Error + Send + Sync>);

impl ContributorError {
    pub fn new(err: impl Error + Send + Sync + 'static) -> Self {
        Self(Arc::new(err))
    }

    pub fn msg(message: impl Into<String>) -> Self {
        Self(Arc::new(Message(message.into())))
    }

    /// The underlying domain error, if the contributor failed on one.
    pub fn as_domain(&self) -> Option<&DomainError> {
        self.0.downcast_ref::<DomainError>()
    }
}

impl fmt::Display for ContributorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl Error for ContributorError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.0.source()
    }
}

impl From<DomainError> for ContributorError {
    fn from(err: DomainError) -> Self {
        Self::new(err)
    }
}

#[derive(Debug)]
struct Message(String);

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Error for Message {}

// ── Contribution context ─────────────────────────────────────────────────────

/// Everything a contributor may read or change during one run.
pub struct ContributionContext {
    description: Arc<ProjectDescription>,
    catalog: Arc<dyn MetadataCatalog>,
    render: RenderContext,
    build: BuildModel,
    tree: ProjectTree,
}

impl ContributionContext {
    pub fn new(description: Arc<ProjectDescription>, catalog: Arc<dyn MetadataCatalog>) -> Self {
        let render = RenderContext::for_description(&description);
        let build = BuildModel::from_description(&description);
        Self {
            description,
            catalog,
            render,
            build,
            tree: ProjectTree::new(),
        }
    }

    pub fn description(&self) -> &ProjectDescription {
        &self.description
    }

    pub fn catalog(&self) -> &dyn MetadataCatalog {
        self.catalog.as_ref()
    }

    pub fn condition_context(&self) -> ConditionContext<'_> {
        ConditionContext::new(&self.description, self.catalog.as_ref())
    }

    pub fn render_context(&self) -> &RenderContext {
        &self.render
    }

    pub fn build(&self) -> &BuildModel {
        &self.build
    }

    pub fn build_mut(&mut self) -> &mut BuildModel {
        &mut self.build
    }

    pub fn tree(&self) -> &ProjectTree {
        &self.tree
    }

    pub fn tree_mut(&mut self) -> &mut ProjectTree {
        &mut self.tree
    }

    /// Render `path` and `template`, then add the result as a regular file.
    pub fn write_file(&mut self, path: &str, template: &str) -> Result<(), ContributorError> {
        self.write(path, template, Permissions::read_write())
    }

    /// Same as [`write_file`](Self::write_file) with the executable bit set.
    pub fn write_executable(&mut self, path: &str, template: &str) -> Result<(), ContributorError> {
        self.write(path, template, Permissions::executable())
    }

    /// Add content that is already final. Only `path` is rendered; `content`
    /// is stored byte for byte, so user text containing `{{...}}` survives.
    pub fn write_rendered(&mut self, path: &str, content: &str) -> Result<(), ContributorError> {
        let path = self.render.render(path);
        self.tree.add_file(path, content, Permissions::read_write())?;
        Ok(())
    }

    pub fn add_directory(&mut self, path: &str) -> Result<(), ContributorError> {
        let path = self.render.render(path);
        self.tree.add_directory(path)?;
        Ok(())
    }

    fn write(
        &mut self,
        path: &str,
        template: &str,
        permissions: Permissions,
    ) -> Result<(), ContributorError> {
        let path = self.render.render(path);
        let content = self.render.render(template);
        self.tree.add_file(path, content, permissions)?;
        Ok(())
    }

    pub(crate) fn into_tree(self) -> ProjectTree {
        self.tree
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::MockMetadataCatalog;
    use crate::domain::{FileMode, Language, Version};

    fn context() -> ContributionContext {
        let description = ProjectDescription::builder()
            .language(Language::Java)
            .group_id("com.example")
            .artifact_id("demo")
            .platform_version(Version::new(3, 2, 0))
            .build();
        ContributionContext::new(Arc::new(description), Arc::new(MockMetadataCatalog::new()))
    }

    #[test]
    fn capabilities_are_in_stage_order() {
        let stages: Vec<u8> = Capability::ALL.iter().map(Capability::stage).collect();
        assert_eq!(stages, [0, 1, 2, 3, 4, 5, 6]);
        assert!(Capability::Packaging.is_single_valued());
        assert!(Capability::BuildSystem.is_single_valued());
        assert!(!Capability::SourceFile.is_single_valued());
    }

    #[test]
    fn write_file_renders_path_and_content() {
        let mut ctx = context();
        ctx.write_file("src/{{PACKAGE_PATH}}/x.txt", "{{GROUP_ID}}").unwrap();
        ctx.write_executable("run.sh", "#!/bin/sh").unwrap();

        let tree = ctx.into_tree();
        assert_eq!(tree.text("src/com/example/demo/x.txt"), Some("com.example"));
        assert_eq!(tree.get("run.sh").unwrap().mode, FileMode::EXECUTABLE);
    }

    #[test]
    fn write_rendered_keeps_content_verbatim() {
        let mut ctx = context();
        ctx.write_rendered("{{ARTIFACT_ID}}.md", "Use {{GROUP_ID}} here").unwrap();

        let tree = ctx.into_tree();
        assert_eq!(tree.text("demo.md"), Some("Use {{GROUP_ID}} here"));
    }

    #[test]
    fn duplicate_write_surfaces_domain_error() {
        let mut ctx = context();
        ctx.write_file("a.txt", "").unwrap();
        let err = ctx.write_file("a.txt", "").unwrap_err();
        assert!(matches!(err.as_domain(), Some(DomainError::DuplicateEntry { .. })));
    }
}

//! One generation request, from description to output.
//!
//! A [`GenerationRun`] owns all mutable state of a request: the registry,
//! the resolved contributor set and the rendered tree. Steps must be called
//! in order; any failure moves the run to `Failed` and discards what was
//! produced so far.
//!
//! ```text
//! Created -> DescriptionBound -> ContributorsRegistered -> Resolved
//!         -> Rendered -> (Packaged) -> Done
//! ```

use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, warn};
use uuid::Uuid;

use crate::{
    application::{
        ApplicationError,
        condition::ConditionContext,
        contributor::{Capability, ContributionContext, Contributor},
        ports::{MetadataCatalog, ProjectPackager},
        registry::ContributorRegistry,
        services::ordering::order_contributors,
    },
    domain::{ArchiveFormat, DomainError, ProjectDescription, ProjectTree, RelativePath},
    error::{KilnError, KilnResult},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Created,
    DescriptionBound,
    ContributorsRegistered,
    Resolved,
    Rendered,
    Packaged,
    Done,
    Failed,
}

impl RunState {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::DescriptionBound => "description-bound",
            Self::ContributorsRegistered => "contributors-registered",
            Self::Resolved => "resolved",
            Self::Rendered => "rendered",
            Self::Packaged => "packaged",
            Self::Done => "done",
            Self::Failed => "failed",
        }
    }
}

impl fmt::Display for RunState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a finished run produced.
#[derive(Debug, Clone)]
pub enum GeneratedContent {
    Files(ProjectTree),
    Archive(Vec<u8>),
}

#[derive(Debug)]
pub struct RunOutput {
    pub content: GeneratedContent,
    /// Ids of the contributors that ran, in execution order.
    pub contributors: Vec<String>,
}

pub struct GenerationRun {
    id: Uuid,
    state: RunState,
    catalog: Arc<dyn MetadataCatalog>,
    description: Option<Arc<ProjectDescription>>,
    registry: ContributorRegistry,
    active: Vec<Arc<dyn Contributor>>,
    executed: Vec<String>,
    tree: Option<ProjectTree>,
    archive: Option<Vec<u8>>,
}

impl GenerationRun {
    pub fn new(catalog: Arc<dyn MetadataCatalog>) -> Self {
        Self {
            id: Uuid::new_v4(),
            state: RunState::Created,
            catalog,
            description: None,
            registry: ContributorRegistry::new(),
            active: Vec::new(),
            executed: Vec::new(),
            tree: None,
            archive: None,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    /// Bind the description. It must have no violations.
    pub fn bind(&mut self, description: Arc<ProjectDescription>) -> KilnResult<()> {
        self.expect(&[RunState::Created])?;
        let violations = description.violations();
        if !violations.is_empty() {
            return Err(self.fail(DomainError::InvalidDescription { violations }.into()));
        }
        self.description = Some(description);
        self.state = RunState::DescriptionBound;
        Ok(())
    }

    /// Register contributors in order.
    pub fn register<I>(&mut self, contributors: I) -> KilnResult<()>
    where
        I: IntoIterator<Item = Arc<dyn Contributor>>,
    {
        self.expect(&[RunState::DescriptionBound])?;
        for contributor in contributors {
            if let Err(err) = self.registry.register(contributor) {
                return Err(self.fail(err.into()));
            }
        }
        self.state = RunState::ContributorsRegistered;
        Ok(())
    }

    /// Resolve every capability. Single-valued capabilities must not be
    /// ambiguous.
    pub fn resolve(&mut self) -> KilnResult<()> {
        self.expect(&[RunState::ContributorsRegistered])?;
        let description = self.bound_description()?;
        let catalog = Arc::clone(&self.catalog);
        let ctx = ConditionContext::new(&description, catalog.as_ref());

        let mut active = Vec::new();
        for capability in Capability::ALL {
            let resolved = if capability.is_single_valued() {
                match self.registry.resolve_single(capability, &ctx) {
                    Ok(found) => found.into_iter().collect(),
                    Err(err) => return Err(self.fail(err.into())),
                }
            } else {
                self.registry.resolve(capability, &ctx)
            };
            debug!(
                run = %self.id,
                %capability,
                active = ?resolved.iter().map(|c| c.id()).collect::<Vec<_>>(),
                "resolved capability"
            );
            active.extend(resolved);
        }

        self.active = active;
        self.state = RunState::Resolved;
        Ok(())
    }

    /// Resolved contributors in the order `render` runs them.
    pub fn execution_plan(&self) -> KilnResult<Vec<Arc<dyn Contributor>>> {
        self.expect(&[RunState::Resolved])?;
        Ok(order_contributors(&self.active, &self.registry)?)
    }

    /// Run every resolved contributor once, in execution order.
    pub fn render(&mut self, deadline: Option<Instant>) -> KilnResult<()> {
        self.expect(&[RunState::Resolved])?;
        let plan = match order_contributors(&self.active, &self.registry) {
            Ok(plan) => plan,
            Err(err) => return Err(self.fail(err.into())),
        };
        let description = self.bound_description()?;
        let mut ctx = ContributionContext::new(description, Arc::clone(&self.catalog));

        for contributor in plan {
            let id = contributor.id().to_string();
            if deadline.is_some_and(|d| Instant::now() >= d) {
                return Err(self.fail(ApplicationError::DeadlineExceeded { next: id }.into()));
            }

            debug!(run = %self.id, contributor = %id, capability = %contributor.capability(), "running contributor");
            if let Err(source) = contributor.contribute(&mut ctx) {
                return Err(self.fail(
                    ApplicationError::ContributorFailed {
                        contributor: id,
                        source,
                    }
                    .into(),
                ));
            }
            self.executed.push(id);
        }

        let tree = ctx.into_tree();
        if let Err(err) = tree.validate() {
            return Err(self.fail(err.into()));
        }
        self.tree = Some(tree);
        self.state = RunState::Rendered;
        Ok(())
    }

    /// Write the rendered tree (nested under the base directory, if any) as
    /// an archive.
    pub fn package(&mut self, packager: &dyn ProjectPackager, format: ArchiveFormat) -> KilnResult<()> {
        self.expect(&[RunState::Rendered])?;
        let description = self.bound_description()?;

        let base = match description.base_directory().map(RelativePath::new).transpose() {
            Ok(base) => base,
            Err(err) => return Err(self.fail(err.into())),
        };
        let Some(tree) = self.tree.take() else {
            return Err(self.fail(internal("rendered run has no tree")));
        };

        let bytes = tree
            .to_entries(base.as_ref())
            .map_err(KilnError::from)
            .and_then(|entries| packager.package(&entries, format));
        match bytes {
            Ok(bytes) => {
                self.archive = Some(bytes);
                self.state = RunState::Packaged;
                Ok(())
            }
            Err(err) => Err(self.fail(err)),
        }
    }

    /// Hand over the output: the archive if packaged, otherwise the tree.
    pub fn finish(&mut self) -> KilnResult<RunOutput> {
        self.expect(&[RunState::Rendered, RunState::Packaged])?;
        let content = match (self.archive.take(), self.tree.take()) {
            (Some(bytes), _) => GeneratedContent::Archive(bytes),
            (None, Some(tree)) => GeneratedContent::Files(tree),
            (None, None) => return Err(self.fail(internal("run has no output"))),
        };
        self.state = RunState::Done;
        Ok(RunOutput {
            content,
            contributors: std::mem::take(&mut self.executed),
        })
    }

    // -------------------------------------------------------------------------
    // Internal Helpers
    // -------------------------------------------------------------------------

    fn expect(&self, allowed: &[RunState]) -> KilnResult<()> {
        if allowed.contains(&self.state) {
            return Ok(());
        }
        let expected = allowed
            .iter()
            .map(RunState::as_str)
            .collect::<Vec<_>>()
            .join(" or ");
        Err(ApplicationError::InvalidState {
            expected,
            actual: self.state.to_string(),
        }
        .into())
    }

    fn bound_description(&self) -> KilnResult<Arc<ProjectDescription>> {
        self.description
            .clone()
            .ok_or_else(|| internal("no description bound"))
    }

    fn fail(&mut self, err: KilnError) -> KilnError {
        warn!(run = %self.id, state = %self.state, error = %err, "generation aborted");
        self.state = RunState::Failed;
        self.tree = None;
        self.archive = None;
        self.active.clear();
        err
    }
}

fn internal(message: &str) -> KilnError {
    KilnError::Internal {
        message: message.to_string(),
    }
}

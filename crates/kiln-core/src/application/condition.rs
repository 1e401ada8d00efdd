//! Activation conditions for contributors.
//!
//! A [`Condition`] is a small predicate tree evaluated against a
//! [`ConditionContext`]. Evaluation is pure: it reads the description and
//! the catalog snapshot and never fails. An absent optional field makes the
//! leaf that tests it false.

use std::fmt;
use std::sync::Arc;

use crate::application::ports::MetadataCatalog;
use crate::domain::{BuildSystem, Language, ProjectDescription, VersionRange};

/// Read-only view conditions are evaluated against.
#[derive(Clone, Copy)]
pub struct ConditionContext<'a> {
    description: &'a ProjectDescription,
    catalog: &'a dyn MetadataCatalog,
}

impl<'a> ConditionContext<'a> {
    pub fn new(description: &'a ProjectDescription, catalog: &'a dyn MetadataCatalog) -> Self {
        Self {
            description,
            catalog,
        }
    }

    pub fn description(&self) -> &'a ProjectDescription {
        self.description
    }

    pub fn catalog(&self) -> &'a dyn MetadataCatalog {
        self.catalog
    }
}

pub type Predicate = Arc<dyn Fn(&ConditionContext<'_>) -> bool + Send + Sync>;

#[derive(Clone)]
pub enum Condition {
    Always,
    Packaging(String),
    BuildSystem(BuildSystem),
    Language(Language),
    PlatformVersion(VersionRange),
    DependencyPresent(String),
    /// True when any requested dependency's catalog entry carries the facet.
    RequestedFacet(String),
    All(Vec<Condition>),
    Any(Vec<Condition>),
    Not(Box<Condition>),
    Custom { name: String, predicate: Predicate },
}

impl Condition {
    pub fn packaging(id: impl Into<String>) -> Self {
        Self::Packaging(id.into())
    }

    pub fn dependency(id: impl Into<String>) -> Self {
        Self::DependencyPresent(id.into())
    }

    pub fn facet(facet: impl Into<String>) -> Self {
        Self::RequestedFacet(facet.into())
    }

    pub fn custom<F>(name: impl Into<String>, predicate: F) -> Self
    where
        F: Fn(&ConditionContext<'_>) -> bool + Send + Sync + 'static,
    {
        Self::Custom {
            name: name.into(),
            predicate: Arc::new(predicate),
        }
    }

    /// Conjunction, flattening nested `All`.
    pub fn and(self, other: Condition) -> Self {
        match self {
            Self::All(mut items) => {
                items.push(other);
                Self::All(items)
            }
            first => Self::All(vec![first, other]),
        }
    }

    /// Disjunction, flattening nested `Any`.
    pub fn or(self, other: Condition) -> Self {
        match self {
            Self::Any(mut items) => {
                items.push(other);
                Self::Any(items)
            }
            first => Self::Any(vec![first, other]),
        }
    }

    pub fn negate(self) -> Self {
        Self::Not(Box::new(self))
    }

    pub fn evaluate(&self, ctx: &ConditionContext<'_>) -> bool {
        let description = ctx.description();
        match self {
            Self::Always => true,
            Self::Packaging(id) => description
                .packaging()
                .is_some_and(|p| p.id().eq_ignore_ascii_case(id)),
            Self::BuildSystem(build) => description.build_system() == *build,
            Self::Language(language) => description.language() == *language,
            Self::PlatformVersion(range) => description
                .platform_version()
                .is_some_and(|v| range.matches(v)),
            Self::DependencyPresent(id) => description.has_dependency(id),
            Self::RequestedFacet(facet) => description.dependencies().iter().any(|dep| {
                ctx.catalog()
                    .resolve_dependency(&dep.id)
                    .is_some_and(|meta| meta.has_facet(facet))
            }),
            Self::All(items) => items.iter().all(|c| c.evaluate(ctx)),
            Self::Any(items) => items.iter().any(|c| c.evaluate(ctx)),
            Self::Not(inner) => !inner.evaluate(ctx),
            Self::Custom { predicate, .. } => predicate(ctx),
        }
    }
}

/// Free-function form of [`Condition::evaluate`].
pub fn evaluate(condition: &Condition, ctx: &ConditionContext<'_>) -> bool {
    condition.evaluate(ctx)
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let list = |f: &mut fmt::Formatter<'_>, name: &str, items: &[Condition]| {
            write!(f, "{name}(")?;
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{item}")?;
            }
            f.write_str(")")
        };

        match self {
            Self::Always => f.write_str("always"),
            Self::Packaging(id) => write!(f, "packaging == {id}"),
            Self::BuildSystem(b) => write!(f, "build-system == {b}"),
            Self::Language(l) => write!(f, "language == {l}"),
            Self::PlatformVersion(r) => write!(f, "platform-version in {r}"),
            Self::DependencyPresent(id) => write!(f, "dependency {id}"),
            Self::RequestedFacet(facet) => write!(f, "facet {facet}"),
            Self::All(items) => list(f, "all", items.as_slice()),
            Self::Any(items) => list(f, "any", items.as_slice()),
            Self::Not(inner) => write!(f, "not({inner})"),
            Self::Custom { name, .. } => write!(f, "custom {name}"),
        }
    }
}

impl fmt::Debug for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Condition({self})")
    }
}

//! Catalog metadata for a dependency a description can request.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::{
    error::DomainError,
    version::{Version, VersionRange},
};

/// Where a dependency ends up in the build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DependencyScope {
    Compile,
    Runtime,
    Provided,
    Test,
    AnnotationProcessor,
}

impl DependencyScope {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Compile => "compile",
            Self::Runtime => "runtime",
            Self::Provided => "provided",
            Self::Test => "test",
            Self::AnnotationProcessor => "annotation-processor",
        }
    }
}

impl Default for DependencyScope {
    fn default() -> Self {
        Self::Compile
    }
}

impl fmt::Display for DependencyScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DependencyScope {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('_', "-").as_str() {
            "compile" => Ok(Self::Compile),
            "runtime" => Ok(Self::Runtime),
            "provided" => Ok(Self::Provided),
            "test" => Ok(Self::Test),
            "annotation-processor" | "annotationprocessor" => Ok(Self::AnnotationProcessor),
            other => Err(DomainError::InvalidDescription {
                violations: vec![format!("unknown dependency scope: {other}")],
            }),
        }
    }
}

/// A dependency known to the metadata catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencyMetadata {
    pub id: String,
    pub group_id: String,
    pub artifact_id: String,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub scope: DependencyScope,
    #[serde(default)]
    pub compatibility_range: Option<VersionRange>,
    #[serde(default)]
    pub facets: Vec<String>,
    #[serde(default)]
    pub description: String,
}

impl DependencyMetadata {
    pub fn new(
        id: impl Into<String>,
        group_id: impl Into<String>,
        artifact_id: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            group_id: group_id.into(),
            artifact_id: artifact_id.into(),
            version: None,
            scope: DependencyScope::Compile,
            compatibility_range: None,
            facets: Vec::new(),
            description: String::new(),
        }
    }

    pub fn with_scope(mut self, scope: DependencyScope) -> Self {
        self.scope = scope;
        self
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    pub fn with_range(mut self, range: VersionRange) -> Self {
        self.compatibility_range = Some(range);
        self
    }

    pub fn with_facet(mut self, facet: impl Into<String>) -> Self {
        self.facets.push(facet.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn has_facet(&self, facet: &str) -> bool {
        self.facets.iter().any(|f| f.eq_ignore_ascii_case(facet))
    }

    /// A dependency without a range is compatible with every platform version.
    pub fn is_compatible_with(&self, platform: &Version) -> bool {
        self.compatibility_range
            .as_ref()
            .is_none_or(|range| range.matches(platform))
    }
}

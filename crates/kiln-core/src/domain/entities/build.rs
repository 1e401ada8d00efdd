//! Writer-agnostic build description.
//!
//! Customisers mutate a [`BuildModel`] first; build system contributors then
//! render it as `pom.xml` or `build.gradle`. Dependencies and plugins are
//! unique by id and keep the order they were added in.

use std::collections::BTreeMap;

use serde::Serialize;

use super::{dependency::DependencyScope, description::ProjectDescription};
use crate::domain::value_objects::Language;

pub const DEFAULT_PROJECT_VERSION: &str = "0.0.1-SNAPSHOT";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildModel {
    pub group_id: String,
    pub artifact_id: String,
    pub version: String,
    pub name: String,
    pub description: String,
    pub packaging: String,
    pub language: Language,
    pub java_version: String,
    pub platform_version: Option<String>,
    pub properties: BTreeMap<String, String>,
    dependencies: Vec<BuildDependency>,
    plugins: Vec<BuildPlugin>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildDependency {
    pub id: String,
    pub group_id: String,
    pub artifact_id: String,
    pub version: Option<String>,
    pub scope: DependencyScope,
}

impl BuildDependency {
    pub fn new(
        id: impl Into<String>,
        group_id: impl Into<String>,
        artifact_id: impl Into<String>,
        scope: DependencyScope,
    ) -> Self {
        Self {
            id: id.into(),
            group_id: group_id.into(),
            artifact_id: artifact_id.into(),
            version: None,
            scope,
        }
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// `group:artifact`
    pub fn coordinates(&self) -> String {
        format!("{}:{}", self.group_id, self.artifact_id)
    }
}

/// A build plugin. `id` is the Gradle plugin id; `group_id`/`artifact_id`
/// address the Maven plugin and are empty for Gradle core plugins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildPlugin {
    pub id: String,
    pub group_id: String,
    pub artifact_id: String,
    pub version: Option<String>,
}

impl BuildPlugin {
    pub fn gradle_core(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            group_id: String::new(),
            artifact_id: String::new(),
            version: None,
        }
    }

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
        }
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    pub fn has_maven_coordinates(&self) -> bool {
        !self.group_id.is_empty() && !self.artifact_id.is_empty()
    }
}

impl BuildModel {
    pub fn from_description(description: &ProjectDescription) -> Self {
        let mut properties = BTreeMap::new();
        properties.insert("java.version".to_string(), description.java_version().to_string());

        Self {
            group_id: description.group_id().to_string(),
            artifact_id: description.artifact_id().to_string(),
            version: DEFAULT_PROJECT_VERSION.to_string(),
            name: description.name().to_string(),
            description: description.description().to_string(),
            packaging: "jar".to_string(),
            language: description.language(),
            java_version: description.java_version().to_string(),
            platform_version: description.platform_version().map(ToString::to_string),
            properties,
            dependencies: Vec::new(),
            plugins: Vec::new(),
        }
    }

    /// Add a dependency. Returns `false` if one with the same id exists.
    pub fn add_dependency(&mut self, dependency: BuildDependency) -> bool {
        if self.has_dependency(&dependency.id) {
            return false;
        }
        self.dependencies.push(dependency);
        true
    }

    pub fn has_dependency(&self, id: &str) -> bool {
        self.dependencies.iter().any(|d| d.id == id)
    }

    pub fn dependency_mut(&mut self, id: &str) -> Option<&mut BuildDependency> {
        self.dependencies.iter_mut().find(|d| d.id == id)
    }

    pub fn remove_dependency(&mut self, id: &str) -> Option<BuildDependency> {
        let index = self.dependencies.iter().position(|d| d.id == id)?;
        Some(self.dependencies.remove(index))
    }

    pub fn dependencies(&self) -> &[BuildDependency] {
        &self.dependencies
    }

    pub fn dependencies_in(&self, scope: DependencyScope) -> impl Iterator<Item = &BuildDependency> {
        self.dependencies.iter().filter(move |d| d.scope == scope)
    }

    /// Add a plugin. Returns `false` if one with the same id exists.
    pub fn add_plugin(&mut self, plugin: BuildPlugin) -> bool {
        if self.plugins.iter().any(|p| p.id == plugin.id) {
            return false;
        }
        self.plugins.push(plugin);
        true
    }

    pub fn plugins(&self) -> &[BuildPlugin] {
        &self.plugins
    }

    pub fn set_property(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.properties.insert(key.into(), value.into());
    }
}

//! The `ProjectDescription` aggregate and its typestate builder.
//!
//! A description is the read-only input of a generation request. The
//! builder never fails: it derives defaults (package name, application
//! name) and leaves validation to [`ProjectDescription::violations`], so a
//! caller can report every problem at once instead of the first one.
//!
//! # Typestate builder
//!
//! Two state types (`NoLanguage` / `HasLanguage`) enforce at *compile
//! time* that a language is chosen before anything else. Every
//! generated source file depends on it.
//!
//! # Domain purity
//!
//! This module must not import `tracing`.

use std::collections::HashSet;
use std::fmt;

use serde::Serialize;

use super::{
    common::RelativePath,
    dependency::DependencyScope,
    render::to_pascal_case,
};
use crate::domain::{
    value_objects::{BuildSystem, Language, Packaging},
    version::Version,
};

// ── Aggregate root ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectDescription {
    language: Language,
    build_system: BuildSystem,
    packaging: Option<Packaging>,
    platform_version: Option<Version>,
    java_version: String,
    group_id: String,
    artifact_id: String,
    name: String,
    description: String,
    package_name: String,
    application_name: String,
    base_directory: Option<String>,
    dependencies: Vec<RequestedDependency>,
}

/// A dependency id requested by the user, optionally forcing a scope.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct RequestedDependency {
    pub id: String,
    pub scope: Option<DependencyScope>,
}

impl RequestedDependency {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            scope: None,
        }
    }
}

impl ProjectDescription {
    pub fn builder() -> DescriptionBuilder<NoLanguage> {
        DescriptionBuilder::new()
    }

    pub const fn language(&self) -> Language {
        self.language
    }
    pub const fn build_system(&self) -> BuildSystem {
        self.build_system
    }
    pub fn packaging(&self) -> Option<&Packaging> {
        self.packaging.as_ref()
    }
    pub fn platform_version(&self) -> Option<&Version> {
        self.platform_version.as_ref()
    }
    pub fn java_version(&self) -> &str {
        &self.java_version
    }
    pub fn group_id(&self) -> &str {
        &self.group_id
    }
    pub fn artifact_id(&self) -> &str {
        &self.artifact_id
    }
    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn description(&self) -> &str {
        &self.description
    }
    pub fn package_name(&self) -> &str {
        &self.package_name
    }
    pub fn application_name(&self) -> &str {
        &self.application_name
    }
    pub fn base_directory(&self) -> Option<&str> {
        self.base_directory.as_deref()
    }
    pub fn dependencies(&self) -> &[RequestedDependency] {
        &self.dependencies
    }

    pub fn has_dependency(&self, id: &str) -> bool {
        self.dependencies.iter().any(|d| d.id == id)
    }

    /// Every problem that prevents generation, in field order.
    ///
    /// An empty list means the description can be generated.
    pub fn violations(&self) -> Vec<String> {
        let mut out = Vec::new();

        for (field, value) in [
            ("group id", &self.group_id),
            ("artifact id", &self.artifact_id),
            ("name", &self.name),
        ] {
            if value.trim().is_empty() {
                out.push(format!("{field} is required"));
            }
        }

        if self.package_name.is_empty() {
            out.push("package name is required".to_string());
        } else {
            for segment in self.package_name.split('.') {
                if !is_java_identifier(segment) {
                    out.push(format!(
                        "invalid package segment '{segment}' in '{}'",
                        self.package_name
                    ));
                }
            }
        }

        if !is_java_identifier(&self.application_name) {
            out.push(format!(
                "application name '{}' is not a valid class name",
                self.application_name
            ));
        }

        if self.platform_version.is_none() {
            out.push("platform version is required".to_string());
        }

        if self.java_version.is_empty() || !self.java_version.chars().all(|c| c.is_ascii_digit()) {
            out.push(format!("java version '{}' must be a number", self.java_version));
        }

        if let Some(dir) = &self.base_directory {
            if let Err(err) = RelativePath::new(dir) {
                out.push(format!("base directory: {err}"));
            }
        }

        let mut seen = HashSet::new();
        for dep in &self.dependencies {
            if dep.id.trim().is_empty() {
                out.push("dependency id cannot be empty".to_string());
            } else if !seen.insert(dep.id.as_str()) {
                out.push(format!("dependency '{}' requested more than once", dep.id));
            }
        }

        out
    }
}

impl fmt::Display for ProjectDescription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{} ({} / {}",
            self.group_id, self.artifact_id, self.language, self.build_system
        )?;
        if let Some(packaging) = &self.packaging {
            write!(f, " / {packaging}")?;
        }
        f.write_str(")")
    }
}

// ── Naming rules ─────────────────────────────────────────────────────────────

const JAVA_KEYWORDS: &[&str] = &[
    "abstract", "assert", "boolean", "break", "byte", "case", "catch", "char", "class", "const",
    "continue", "default", "do", "double", "else", "enum", "extends", "final", "finally",
    "float", "for", "goto", "if", "implements", "import", "instanceof", "int", "interface",
    "long", "native", "new", "package", "private", "protected", "public", "return", "short",
    "static", "strictfp", "super", "switch", "synchronized", "this", "throw", "throws",
    "transient", "try", "void", "volatile", "while", "true", "false", "null",
];

fn is_java_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    (first.is_alphabetic() || first == '_' || first == '$')
        && chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$')
        && !JAVA_KEYWORDS.contains(&s)
}

/// `"com.Example"` + `"demo-app"` -> `"com.example.demoapp"`
fn sanitize_package(raw: &str) -> String {
    raw.split('.')
        .filter_map(|segment| {
            let cleaned: String = segment
                .chars()
                .filter(|c| c.is_alphanumeric() || *c == '_')
                .flat_map(char::to_lowercase)
                .collect();
            if cleaned.is_empty() {
                None
            } else if cleaned.starts_with(|c: char| c.is_ascii_digit())
                || JAVA_KEYWORDS.contains(&cleaned.as_str())
            {
                Some(format!("_{cleaned}"))
            } else {
                Some(cleaned)
            }
        })
        .collect::<Vec<_>>()
        .join(".")
}

/// `"demo"` -> `"DemoApplication"`; names yielding no identifier fall back
/// to `"Application"`.
fn application_name_for(name: &str) -> String {
    let candidate: String = to_pascal_case(name)
        .chars()
        .filter(|c| c.is_alphanumeric())
        .collect();
    if candidate.is_empty() || candidate.starts_with(|c: char| c.is_ascii_digit()) {
        return "Application".to_string();
    }
    if candidate.ends_with("Application") {
        candidate
    } else {
        format!("{candidate}Application")
    }
}

// ── Typestate markers ────────────────────────────────────────────────────────

/// State: language has not yet been set.
pub struct NoLanguage;
/// State: language has been set; other fields may now be configured.
pub struct HasLanguage(Language);

// ── Builder ──────────────────────────────────────────────────────────────────

pub struct DescriptionBuilder<L> {
    state: L,
    build_system: BuildSystem,
    packaging: Option<Packaging>,
    platform_version: Option<Version>,
    java_version: String,
    group_id: String,
    artifact_id: String,
    name: Option<String>,
    description: String,
    package_name: Option<String>,
    application_name: Option<String>,
    base_directory: Option<String>,
    dependencies: Vec<RequestedDependency>,
}

impl DescriptionBuilder<NoLanguage> {
    pub fn new() -> Self {
        Self {
            state: NoLanguage,
            build_system: BuildSystem::Maven,
            packaging: None,
            platform_version: None,
            java_version: "17".to_string(),
            group_id: String::new(),
            artifact_id: String::new(),
            name: None,
            description: String::new(),
            package_name: None,
            application_name: None,
            base_directory: None,
            dependencies: Vec::new(),
        }
    }

    /// Set the language. This transitions the builder to `HasLanguage`.
    pub fn language(self, language: Language) -> DescriptionBuilder<HasLanguage> {
        DescriptionBuilder {
            state: HasLanguage(language),
            build_system: self.build_system,
            packaging: self.packaging,
            platform_version: self.platform_version,
            java_version: self.java_version,
            group_id: self.group_id,
            artifact_id: self.artifact_id,
            name: self.name,
            description: self.description,
            package_name: self.package_name,
            application_name: self.application_name,
            base_directory: self.base_directory,
            dependencies: self.dependencies,
        }
    }
}

impl Default for DescriptionBuilder<NoLanguage> {
    fn default() -> Self {
        Self::new()
    }
}

impl DescriptionBuilder<HasLanguage> {
    pub fn build_system(mut self, build_system: BuildSystem) -> Self {
        self.build_system = build_system;
        self
    }

    pub fn packaging(mut self, packaging: Packaging) -> Self {
        self.packaging = Some(packaging);
        self
    }

    pub fn platform_version(mut self, version: Version) -> Self {
        self.platform_version = Some(version);
        self
    }

    pub fn java_version(mut self, version: impl Into<String>) -> Self {
        self.java_version = version.into();
        self
    }

    pub fn group_id(mut self, group_id: impl Into<String>) -> Self {
        self.group_id = group_id.into();
        self
    }

    pub fn artifact_id(mut self, artifact_id: impl Into<String>) -> Self {
        self.artifact_id = artifact_id.into();
        self
    }

    /// Display name. Defaults to the artifact id.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Explicit package name. Kept as given; `violations` reports bad segments.
    pub fn package_name(mut self, package_name: impl Into<String>) -> Self {
        self.package_name = Some(package_name.into());
        self
    }

    pub fn application_name(mut self, application_name: impl Into<String>) -> Self {
        self.application_name = Some(application_name.into());
        self
    }

    /// Root folder every archive entry is nested under.
    pub fn base_directory(mut self, dir: impl Into<String>) -> Self {
        self.base_directory = Some(dir.into());
        self
    }

    pub fn dependency(mut self, id: impl Into<String>) -> Self {
        self.dependencies.push(RequestedDependency::new(id));
        self
    }

    pub fn dependency_with_scope(mut self, id: impl Into<String>, scope: DependencyScope) -> Self {
        self.dependencies.push(RequestedDependency {
            id: id.into(),
            scope: Some(scope),
        });
        self
    }

    pub fn dependencies<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.dependencies
            .extend(ids.into_iter().map(RequestedDependency::new));
        self
    }

    pub fn build(self) -> ProjectDescription {
        let HasLanguage(language) = self.state;

        let name = self.name.unwrap_or_else(|| self.artifact_id.clone());
        let package_name = self.package_name.unwrap_or_else(|| {
            sanitize_package(&format!("{}.{}", self.group_id, self.artifact_id))
        });
        let application_name = self
            .application_name
            .unwrap_or_else(|| application_name_for(&name));

        ProjectDescription {
            language,
            build_system: self.build_system,
            packaging: self.packaging,
            platform_version: self.platform_version,
            java_version: self.java_version,
            group_id: self.group_id,
            artifact_id: self.artifact_id,
            name,
            description: self.description,
            package_name,
            application_name,
            base_directory: self.base_directory,
            dependencies: self.dependencies,
        }
    }
}

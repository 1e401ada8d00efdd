//! In-memory metadata catalog with built-in dependencies.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use kiln_core::{
    application::ports::MetadataCatalog,
    domain::DependencyMetadata,
    error::{Context, KilnError, KilnResult},
};
use serde::Deserialize;
use tracing::debug;

use super::builtin;

/// Read-only catalog keyed by dependency id.
///
/// Entries are kept sorted by id so `dependencies()` lists them in a stable
/// order.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    entries: BTreeMap<String, DependencyMetadata>,
}

/// Shape of a catalog TOML file.
///
/// ```toml
/// [[dependencies]]
/// id = "web"
/// group_id = "org.springframework.boot"
/// artifact_id = "spring-boot-starter-web"
/// facets = ["web"]
/// compatibility_range = "[3.0.0,4.0.0)"
/// ```
#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    dependencies: Vec<DependencyMetadata>,
}

impl InMemoryCatalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a catalog with the built-in dependencies loaded.
    pub fn with_builtin() -> Self {
        let mut catalog = Self::new();
        for dependency in builtin::dependencies() {
            catalog.entries.insert(dependency.id.clone(), dependency);
        }
        catalog
    }

    /// Parse a catalog from TOML. Ids must be unique within the file.
    pub fn from_toml_str(raw: &str) -> KilnResult<Self> {
        let file: CatalogFile = toml::from_str(raw).context("invalid catalog")?;
        let mut catalog = Self::new();
        catalog.extend(file.dependencies)?;
        Ok(catalog)
    }

    /// Load a catalog file from disk.
    pub fn load(path: &Path) -> KilnResult<Self> {
        let raw = fs::read_to_string(path)
            .context(format!("failed to read catalog '{}'", path.display()))?;
        let catalog = Self::from_toml_str(&raw)?;
        debug!(path = %path.display(), entries = catalog.len(), "catalog loaded");
        Ok(catalog)
    }

    /// Add entries, rejecting ids that are already present.
    pub fn extend<I>(&mut self, dependencies: I) -> KilnResult<()>
    where
        I: IntoIterator<Item = DependencyMetadata>,
    {
        for dependency in dependencies {
            if dependency.id.trim().is_empty() {
                return Err(KilnError::Configuration {
                    message: "catalog entry with an empty id".to_string(),
                });
            }
            if self.entries.contains_key(&dependency.id) {
                return Err(KilnError::Configuration {
                    message: format!("duplicate catalog entry '{}'", dependency.id),
                });
            }
            self.entries.insert(dependency.id.clone(), dependency);
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl MetadataCatalog for InMemoryCatalog {
    fn resolve_dependency(&self, id: &str) -> Option<DependencyMetadata> {
        self.entries.get(id).cloned()
    }

    fn dependencies(&self) -> Vec<DependencyMetadata> {
        self.entries.values().cloned().collect()
    }
}

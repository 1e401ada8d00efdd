//! Command handlers, one module per subcommand.
//!
//! Handlers translate arguments into core types, call the generator, and
//! print results. Helpers shared by several handlers live here.

pub mod completions;
pub mod dependencies;
pub mod generate;
pub mod plan;
pub mod validate;

use tracing::debug;

use kiln_adapters::{InMemoryCatalog, generator_with_catalog};
use kiln_core::{
    application::{MetadataCatalog, ProjectGenerator},
    domain::{DependencyScope, Packaging, ProjectDescription, Version},
};

use crate::{
    cli::DescriptionArgs,
    config::AppConfig,
    error::{CliError, CliResult},
};

/// Built-in catalog plus the entries of `[catalog] path`, if configured.
pub fn load_catalog(config: &AppConfig) -> CliResult<InMemoryCatalog> {
    let mut catalog = InMemoryCatalog::with_builtin();
    if let Some(path) = &config.catalog.path {
        let extra = InMemoryCatalog::load(path)?;
        debug!(path = %path.display(), entries = extra.len(), "Merging catalog");
        catalog.extend(extra.dependencies())?;
    }
    Ok(catalog)
}

pub fn generator(config: &AppConfig) -> CliResult<ProjectGenerator> {
    Ok(generator_with_catalog(load_catalog(config)?))
}

/// Merge flags over configured defaults into a project description.
///
/// The positional name doubles as artifact id when `--artifact` is absent.
pub fn build_description(
    args: &DescriptionArgs,
    config: &AppConfig,
) -> CliResult<ProjectDescription> {
    let defaults = &config.defaults;

    let artifact_id = args
        .artifact_id
        .clone()
        .or_else(|| args.name.clone())
        .unwrap_or_else(|| defaults.artifact_id.clone());
    let name = args.name.clone().unwrap_or_else(|| artifact_id.clone());

    let platform_version = match &args.platform_version {
        Some(raw) => raw.parse::<Version>().map_err(|e| CliError::InvalidInput {
            message: format!("--platform-version '{raw}'"),
            source: Some(Box::new(e)),
        })?,
        None => defaults.platform_version.clone(),
    };

    let packaging = match &args.packaging {
        Some(raw) => raw.parse::<Packaging>().map_err(|e| CliError::InvalidInput {
            message: format!("--packaging '{raw}'"),
            source: Some(Box::new(e)),
        })?,
        None => defaults.packaging.clone(),
    };

    let mut builder = ProjectDescription::builder()
        .language(args.language.map(Into::into).unwrap_or(defaults.language))
        .build_system(
            args.build_system
                .map(Into::into)
                .unwrap_or(defaults.build_system),
        )
        .packaging(packaging)
        .platform_version(platform_version)
        .java_version(
            args.java_version
                .clone()
                .unwrap_or_else(|| defaults.java_version.clone()),
        )
        .group_id(
            args.group_id
                .clone()
                .unwrap_or_else(|| defaults.group_id.clone()),
        )
        .artifact_id(artifact_id)
        .name(name);

    if let Some(package) = &args.package_name {
        builder = builder.package_name(package);
    }
    if let Some(text) = &args.description {
        builder = builder.description(text);
    }
    if let Some(dir) = &args.base_directory {
        builder = builder.base_directory(dir);
    }

    for raw in &args.dependencies {
        builder = match raw.split_once(':') {
            Some((id, scope)) => {
                let scope = scope
                    .parse::<DependencyScope>()
                    .map_err(|e| CliError::InvalidInput {
                        message: format!("dependency '{raw}'"),
                        source: Some(Box::new(e)),
                    })?;
                builder.dependency_with_scope(id.trim(), scope)
            }
            None => builder.dependency(raw.trim()),
        };
    }

    Ok(builder.build())
}

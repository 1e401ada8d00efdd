//! Implementation of the `kiln dependencies` command.

use tracing::instrument;

use kiln_core::application::MetadataCatalog;

use crate::{
    cli::{DependenciesArgs, OutputFormat},
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
};

#[instrument(skip_all)]
pub fn execute(args: DependenciesArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let catalog = super::load_catalog(&config)?;
    let dependencies: Vec<_> = catalog
        .dependencies()
        .into_iter()
        .filter(|d| args.facet.as_deref().is_none_or(|facet| d.has_facet(facet)))
        .collect();

    match output.format() {
        OutputFormat::Json => output.json(&dependencies)?,
        OutputFormat::Plain => {
            for d in &dependencies {
                output.print(&d.id)?;
            }
        }
        OutputFormat::Human | OutputFormat::Auto => {
            output.header("Available dependencies:")?;
            let width = dependencies.iter().map(|d| d.id.len()).max().unwrap_or(0);
            for d in &dependencies {
                let range = d
                    .compatibility_range
                    .as_ref()
                    .map(|r| format!(" (platform {r})"))
                    .unwrap_or_default();
                output.print(&format!(
                    "  {:<width$}  {}{range}",
                    d.id, d.description
                ))?;
            }
        }
    }
    Ok(())
}

//! Implementation of the `kiln plan` command.

use tracing::instrument;

use crate::{
    cli::DescriptionArgs,
    config::AppConfig,
    error::{CliResult, IntoCli},
    output::OutputManager,
};

/// Print the ids of the contributors that would run, in execution order.
#[instrument(skip_all)]
pub fn execute(args: DescriptionArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let generator = super::generator(&config)?;
    let description = super::build_description(&args, &config)?;
    let plan = generator
        .plan(&description)
        .with_cli_context(|| "planning contributors")?;

    if output.is_json() {
        output.json(&plan)?;
        return Ok(());
    }

    output.header(&format!("Execution plan for {description}:"))?;
    for (step, id) in plan.iter().enumerate() {
        output.print(&format!("  {:>2}. {id}", step + 1))?;
    }
    Ok(())
}

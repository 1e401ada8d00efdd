//! Implementation of the `kiln validate` command.

use serde::Serialize;
use tracing::instrument;

use crate::{
    cli::DescriptionArgs,
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

#[derive(Debug, Serialize)]
struct Report<'a> {
    valid: bool,
    violations: &'a [String],
}

/// Report every problem that would stop generation. Any problem fails the
/// command with exit code 2; the problems are listed by the error handler.
#[instrument(skip_all)]
pub fn execute(args: DescriptionArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let generator = super::generator(&config)?;
    let description = super::build_description(&args, &config)?;
    let violations = generator.validate(&description);

    if output.is_json() {
        output.json(&Report {
            valid: violations.is_empty(),
            violations: &violations,
        })?;
    } else if violations.is_empty() {
        output.success(&format!("{description} is valid"))?;
    }

    if violations.is_empty() {
        Ok(())
    } else {
        Err(CliError::InvalidDescription { violations })
    }
}

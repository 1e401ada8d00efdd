//! Implementation of the `kiln generate` command.
//!
//! Responsibility: turn arguments into a `ProjectDescription`, run the
//! generator, and put the result on disk. No business logic lives here.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Serialize;
use tracing::{debug, info, instrument};

use kiln_adapters::LocalFilesystem;
use kiln_core::{application::GenerationOptions, domain::RelativePath, error::KilnError};

use crate::{
    cli::{GenerateArgs, GenerateFormat},
    config::AppConfig,
    error::{CliError, CliResult, IntoCli},
    output::OutputManager,
};

/// Summary printed as JSON with `--output-format json`.
#[derive(Debug, Serialize)]
struct Generated<'a> {
    path: &'a Path,
    format: GenerateFormat,
    content_type: &'a str,
    contributors: &'a [String],
}

/// Execute the `kiln generate` command.
///
/// 1. Build the description from flags and config defaults
/// 2. Reject it early if validation finds problems
/// 3. Generate an archive or a file tree
/// 4. Write it below `--output` (or the suggested name in the working directory)
#[instrument(skip_all, fields(project = ?args.project.name))]
pub fn execute(args: GenerateArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let format = args.format.unwrap_or(config.output.format);

    let generator = super::generator(&config)?;
    let description = super::build_description(&args.project, &config)?;
    debug!(project = %description, %format, "Description resolved");

    let base_directory = description.base_directory().map(str::to_owned);

    let violations = generator.validate(&description);
    if !violations.is_empty() {
        return Err(CliError::InvalidDescription { violations });
    }

    let mut options = match format.archive() {
        Some(archive) => GenerationOptions::archive(archive),
        None => GenerationOptions::files(),
    };
    if let Some(ms) = args.timeout_ms {
        options = options.with_timeout(Duration::from_millis(ms));
    }

    let result = generator
        .generate_with(description, options)
        .with_cli_context(|| "generating project")?;

    let written = match (result.archive_bytes(), result.tree()) {
        (Some(bytes), _) => {
            let target = args
                .output
                .clone()
                .unwrap_or_else(|| PathBuf::from(&result.suggested_filename));
            write_archive(&target, &result.suggested_filename, bytes, args.force)?
        }
        (None, Some(tree)) => {
            let root = directory_root(
                args.output.as_deref(),
                base_directory.as_deref(),
                &result.suggested_filename,
            )?;
            let entries = tree.to_entries(None).map_err(KilnError::from)?;
            let files = LocalFilesystem::new().write_project(&root, &entries)?;
            output.info(&format!("{files} files written"))?;
            root
        }
        (None, None) => {
            return Err(CliError::Core(KilnError::Internal {
                message: "generation produced no content".into(),
            }));
        }
    };
    info!(path = %written.display(), "Project written");

    if output.is_json() {
        output.json(&Generated {
            path: &written,
            format,
            content_type: &result.content_type,
            contributors: &result.contributors,
        })?;
    } else {
        output.success(&format!(
            "Generated {} ({} contributors)",
            written.display(),
            result.contributors.len()
        ))?;
    }
    Ok(())
}

/// Project root for the `dir` format.
///
/// The base directory nests below `--output` (or the working directory),
/// the same way archive entries nest below it. Without one, the project
/// goes straight into `--output` or a directory named after the project.
fn directory_root(output: Option<&Path>, base: Option<&str>, stem: &str) -> CliResult<PathBuf> {
    let base = base
        .map(RelativePath::new)
        .transpose()
        .map_err(KilnError::from)?;
    Ok(match (output, base) {
        (Some(output), Some(base)) => output.join(base.as_path()),
        (Some(output), None) => output.to_path_buf(),
        (None, Some(base)) => base.as_path().to_path_buf(),
        (None, None) => PathBuf::from(stem),
    })
}

/// Write archive bytes to `target`, or into it when `target` is a directory.
fn write_archive(target: &Path, file_name: &str, bytes: &[u8], force: bool) -> CliResult<PathBuf> {
    let path = if target.is_dir() {
        target.join(file_name)
    } else {
        target.to_path_buf()
    };
    if path.exists() && !force {
        return Err(CliError::OutputExists { path });
    }
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_cli_context(|| format!("creating {}", parent.display()))?;
    }
    fs::write(&path, bytes).with_cli_context(|| format!("writing {}", path.display()))?;
    debug!(bytes = bytes.len(), "Archive written");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn archive_goes_inside_an_existing_directory() {
        let dir = TempDir::new().unwrap();
        let path = write_archive(dir.path(), "demo.zip", b"PK", false).unwrap();
        assert_eq!(path, dir.path().join("demo.zip"));
        assert_eq!(fs::read(&path).unwrap(), b"PK");
    }

    #[test]
    fn existing_archive_needs_force() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("demo.zip");
        fs::write(&path, b"old").unwrap();

        let err = write_archive(&path, "demo.zip", b"new", false).unwrap_err();
        assert!(matches!(err, CliError::OutputExists { .. }));
        assert_eq!(fs::read(&path).unwrap(), b"old");

        write_archive(&path, "demo.zip", b"new", true).unwrap();
        assert_eq!(fs::read(&path).unwrap(), b"new");
    }

    #[test]
    fn directory_root_nests_the_base_directory() {
        let out = Path::new("out");
        assert_eq!(
            directory_root(Some(out), Some("apps/shop"), "shop").unwrap(),
            Path::new("out/apps/shop")
        );
        assert_eq!(
            directory_root(None, Some("./apps//shop/"), "shop").unwrap(),
            Path::new("apps/shop")
        );
        assert_eq!(directory_root(Some(out), None, "demo").unwrap(), out);
        assert_eq!(directory_root(None, None, "demo").unwrap(), Path::new("demo"));
    }

    #[test]
    fn directory_root_rejects_escaping_base() {
        let err = directory_root(None, Some("../elsewhere"), "demo").unwrap_err();
        assert!(matches!(err, CliError::Core(_)));
    }

    #[test]
    fn missing_parent_directories_are_created() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out/nested/demo.tar.gz");
        write_archive(&path, "demo.tar.gz", b"\x1f\x8b", false).unwrap();
        assert!(path.is_file());
    }
}

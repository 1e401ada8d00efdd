//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums. No business logic lives here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

use kiln_core::domain;

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "kiln",
    bin_name = "kiln",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "\u{1f525} Generate JVM project skeletons",
    long_about = "Kiln assembles Maven and Gradle projects from a short description \
                  and ships them as a zip, a tar.gz or a plain directory.",
    after_help = "EXAMPLES:\n\
        \x20 kiln generate demo --lang java --build maven -d web,lombok\n\
        \x20 kiln generate shop --lang kotlin --build gradle --format tgz\n\
        \x20 kiln plan demo -d web\n\
        \x20 kiln completions bash > /usr/share/bash-completion/completions/kiln",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Generate a project.
    #[command(
        visible_alias = "g",
        about = "Generate a project archive or directory",
        after_help = "EXAMPLES:\n\
            \x20 kiln generate demo\n\
            \x20 kiln generate demo --packaging war -d web --output out/demo.zip\n\
            \x20 kiln generate demo --format dir --output ./demo"
    )]
    Generate(GenerateArgs),

    /// Check a description without generating anything.
    #[command(
        about = "Validate a project description",
        after_help = "EXAMPLES:\n\
            \x20 kiln validate demo -d web,graphql --platform-version 2.6.0"
    )]
    Validate(DescriptionArgs),

    /// Show which contributors would run, in order.
    #[command(
        about = "Print the contributor execution plan",
        after_help = "EXAMPLES:\n\
            \x20 kiln plan demo -d web,lombok\n\
            \x20 kiln plan demo --build gradle --output-format json"
    )]
    Plan(DescriptionArgs),

    /// List the dependency catalog.
    #[command(
        visible_alias = "deps",
        about = "List known dependencies",
        after_help = "EXAMPLES:\n\
            \x20 kiln dependencies\n\
            \x20 kiln dependencies --facet web"
    )]
    Dependencies(DependenciesArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 kiln completions bash > ~/.local/share/bash-completion/completions/kiln\n\
            \x20 kiln completions zsh  > ~/.zfunc/_kiln\n\
            \x20 kiln completions fish > ~/.config/fish/completions/kiln.fish"
    )]
    Completions(CompletionsArgs),
}

// ── description ───────────────────────────────────────────────────────────────

/// Flags describing the project; shared by `generate`, `validate` and `plan`.
///
/// Every flag is optional; missing values come from the configuration file,
/// `KILN_*` variables, or built-in defaults.
#[derive(Debug, Clone, Default, Args)]
pub struct DescriptionArgs {
    /// Project name; also the artifact id unless `--artifact` is given.
    #[arg(value_name = "NAME", help = "Project name")]
    pub name: Option<String>,

    #[arg(
        short = 'l',
        long = "lang",
        value_name = "LANGUAGE",
        value_enum,
        help = "Source language"
    )]
    pub language: Option<Language>,

    #[arg(
        short = 'b',
        long = "build",
        value_name = "TOOL",
        value_enum,
        help = "Build system"
    )]
    pub build_system: Option<BuildSystem>,

    /// Packaging id. Anything besides `jar` and `war` is accepted and simply
    /// activates no packaging contributor.
    #[arg(
        short = 'p',
        long = "packaging",
        value_name = "ID",
        help = "Packaging (jar, war, ...)"
    )]
    pub packaging: Option<String>,

    #[arg(
        long = "platform-version",
        value_name = "VERSION",
        help = "Platform version, e.g. 3.2.0"
    )]
    pub platform_version: Option<String>,

    #[arg(long = "java-version", value_name = "VERSION", help = "Java release")]
    pub java_version: Option<String>,

    #[arg(short = 'g', long = "group", value_name = "GROUP", help = "Group id")]
    pub group_id: Option<String>,

    #[arg(short = 'a', long = "artifact", value_name = "ID", help = "Artifact id")]
    pub artifact_id: Option<String>,

    #[arg(
        long = "package",
        value_name = "PACKAGE",
        help = "Root package (default: <group>.<artifact>)"
    )]
    pub package_name: Option<String>,

    #[arg(long = "description", value_name = "TEXT", help = "Project description")]
    pub description: Option<String>,

    /// Comma-separated dependency ids. `id:scope` overrides the catalog scope.
    #[arg(
        short = 'd',
        long = "dependencies",
        value_name = "IDS",
        value_delimiter = ',',
        help = "Dependencies, e.g. web,lombok,h2:test"
    )]
    pub dependencies: Vec<String>,

    #[arg(
        long = "base-dir",
        value_name = "DIR",
        help = "Directory that wraps the project inside the archive"
    )]
    pub base_directory: Option<String>,
}

// ── generate ──────────────────────────────────────────────────────────────────

/// Arguments for `kiln generate`.
#[derive(Debug, Args)]
pub struct GenerateArgs {
    #[command(flatten)]
    pub project: DescriptionArgs,

    #[arg(
        short = 'f',
        long = "format",
        value_name = "FORMAT",
        value_enum,
        help = "Output format (default from config, else zip)"
    )]
    pub format: Option<GenerateFormat>,

    /// Archive file or target directory. Defaults to the suggested file name
    /// in the current directory.
    #[arg(
        short = 'o',
        long = "output",
        value_name = "PATH",
        help = "Where to write the result"
    )]
    pub output: Option<PathBuf>,

    /// Overwrite an existing archive file. Directory output never overwrites.
    #[arg(long = "force", help = "Overwrite an existing archive")]
    pub force: bool,

    #[arg(
        long = "timeout-ms",
        value_name = "MILLIS",
        help = "Abort generation after this many milliseconds"
    )]
    pub timeout_ms: Option<u64>,
}

/// What `generate` produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[value(rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum GenerateFormat {
    Zip,
    /// gzip-compressed tar.
    #[value(alias = "tar.gz")]
    Tgz,
    /// Write the files to a directory.
    Dir,
}

impl GenerateFormat {
    /// Archive format, or `None` for directory output.
    pub fn archive(self) -> Option<domain::ArchiveFormat> {
        match self {
            Self::Zip => Some(domain::ArchiveFormat::Zip),
            Self::Tgz => Some(domain::ArchiveFormat::TarGz),
            Self::Dir => None,
        }
    }
}

impl std::fmt::Display for GenerateFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Zip => write!(f, "zip"),
            Self::Tgz => write!(f, "tgz"),
            Self::Dir => write!(f, "dir"),
        }
    }
}

// ── dependencies ──────────────────────────────────────────────────────────────

/// Arguments for `kiln dependencies`.
#[derive(Debug, Args)]
pub struct DependenciesArgs {
    /// Only list dependencies carrying this facet.
    #[arg(long = "facet", value_name = "FACET", help = "Filter by facet")]
    pub facet: Option<String>,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `kiln completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── value enums ───────────────────────────────────────────────────────────────

/// Source languages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum Language {
    Java,
    /// Also accepted as `kt`.
    #[value(alias = "kt")]
    Kotlin,
    Groovy,
}

impl From<Language> for domain::Language {
    fn from(value: Language) -> Self {
        match value {
            Language::Java => Self::Java,
            Language::Kotlin => Self::Kotlin,
            Language::Groovy => Self::Groovy,
        }
    }
}

/// Build systems.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum BuildSystem {
    #[value(alias = "mvn")]
    Maven,
    Gradle,
}

impl From<BuildSystem> for domain::BuildSystem {
    fn from(value: BuildSystem) -> Self {
        match value {
            BuildSystem::Maven => Self::Maven,
            BuildSystem::Gradle => Self::Gradle,
        }
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn parse_generate_command() {
        let cli = Cli::parse_from([
            "kiln",
            "generate",
            "demo",
            "--lang",
            "kotlin",
            "--build",
            "gradle",
            "-d",
            "web,lombok",
            "--format",
            "tgz",
        ]);
        let Commands::Generate(args) = cli.command else {
            panic!("expected Generate command");
        };
        assert_eq!(args.project.name.as_deref(), Some("demo"));
        assert_eq!(args.project.language, Some(Language::Kotlin));
        assert_eq!(args.project.build_system, Some(BuildSystem::Gradle));
        assert_eq!(args.project.dependencies, ["web", "lombok"]);
        assert_eq!(args.format, Some(GenerateFormat::Tgz));
    }

    #[test]
    fn kotlin_and_maven_aliases() {
        let cli = Cli::parse_from(["kiln", "plan", "-l", "kt", "-b", "mvn"]);
        let Commands::Plan(args) = cli.command else {
            panic!("expected Plan command");
        };
        assert_eq!(domain::Language::from(args.language.unwrap()), domain::Language::Kotlin);
        assert_eq!(
            domain::BuildSystem::from(args.build_system.unwrap()),
            domain::BuildSystem::Maven
        );
    }

    #[test]
    fn format_maps_to_archive() {
        assert_eq!(GenerateFormat::Zip.archive(), Some(domain::ArchiveFormat::Zip));
        assert_eq!(GenerateFormat::Tgz.archive(), Some(domain::ArchiveFormat::TarGz));
        assert_eq!(GenerateFormat::Dir.archive(), None);
        assert_eq!(GenerateFormat::Tgz.to_string(), "tgz");
    }

    #[test]
    fn unknown_language_is_rejected() {
        assert!(Cli::try_parse_from(["kiln", "generate", "demo", "--lang", "scala"]).is_err());
    }

    #[test]
    fn quiet_and_verbose_conflict() {
        let result = Cli::try_parse_from(["kiln", "--quiet", "--verbose", "dependencies"]);
        assert!(result.is_err());
    }
}

//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value. The
//! CLI layer owns config; the core crate never sees it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, not here)
//! 2. Environment variables: `KILN_DEFAULTS__GROUP_ID=org.acme`
//! 3. Config file: `--config FILE`, else `config.toml` in the platform
//!    config directory
//! 4. Built-in defaults (always present)
//!
//! ```toml
//! [defaults]
//! group_id = "org.acme"
//! language = "kotlin"
//! build_system = "gradle"
//! platform_version = "3.3.4"
//!
//! [output]
//! format = "tgz"
//!
//! [catalog]
//! path = "/etc/kiln/catalog.toml"
//! ```

use std::path::{Path, PathBuf};

use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use tracing::debug;

use kiln_core::domain::{BuildSystem, Language, Packaging, Version};

use crate::cli::GenerateFormat;
use crate::error::{CliError, CliResult};

/// Platform version used when neither flags nor config name one.
pub const DEFAULT_PLATFORM_VERSION: &str = "3.3.4";

/// Application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Default values for new projects.
    pub defaults: Defaults,
    /// Output settings.
    pub output: OutputConfig,
    /// Extra dependency catalog.
    pub catalog: CatalogConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Defaults {
    pub group_id: String,
    pub artifact_id: String,
    pub language: Language,
    pub build_system: BuildSystem,
    pub packaging: Packaging,
    pub platform_version: Version,
    pub java_version: String,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            group_id: "com.example".into(),
            artifact_id: "demo".into(),
            language: Language::Java,
            build_system: BuildSystem::Maven,
            packaging: Packaging::Jar,
            platform_version: Version::new(3, 3, 4),
            java_version: "17".into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub format: GenerateFormat,
    pub no_color: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: GenerateFormat::Zip,
            no_color: false,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// TOML file whose entries are added to the built-in catalog.
    pub path: Option<PathBuf>,
}

impl AppConfig {
    /// Load configuration from the config file and `KILN_*` variables,
    /// falling back to built-in defaults for anything unset.
    ///
    /// A file passed with `--config` must exist; the default location is
    /// optional.
    pub fn load(config_file: Option<&PathBuf>) -> CliResult<Self> {
        let (path, required) = match config_file {
            Some(path) => (path.clone(), true),
            None => (Self::config_path(), false),
        };
        debug!(path = %path.display(), required, "Loading configuration");

        let settings = Config::builder()
            .add_source(File::from(path.as_path()).format(FileFormat::Toml).required(required))
            .add_source(
                Environment::with_prefix("KILN")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| config_error(&path, e))?;

        settings
            .try_deserialize()
            .map_err(|e| config_error(&path, e))
    }

    /// Path to the default configuration file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness,
    /// falling back to `.kiln.toml` in the current directory.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("rs", "kiln", "kiln")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(".kiln.toml"))
    }
}

fn config_error(path: &Path, err: config::ConfigError) -> CliError {
    CliError::ConfigError {
        message: format!("cannot load '{}': {err}", path.display()),
        source: Some(Box::new(err)),
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    fn load_from(contents: &str) -> CliResult<AppConfig> {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("kiln.toml");
        fs::write(&path, contents).unwrap();
        AppConfig::load(Some(&path))
    }

    #[test]
    fn defaults_describe_a_java_maven_jar() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.defaults.language, Language::Java);
        assert_eq!(cfg.defaults.build_system, BuildSystem::Maven);
        assert_eq!(cfg.defaults.packaging, Packaging::Jar);
        assert_eq!(cfg.defaults.platform_version.to_string(), DEFAULT_PLATFORM_VERSION);
        assert_eq!(cfg.output.format, GenerateFormat::Zip);
        assert!(!cfg.output.no_color);
    }

    #[test]
    fn file_overrides_selected_keys() {
        let cfg = load_from(
            "[defaults]\n\
             group_id = \"org.acme\"\n\
             language = \"kotlin\"\n\
             packaging = \"war\"\n\
             platform_version = \"3.2.0\"\n\
             [output]\n\
             format = \"tgz\"\n",
        )
        .unwrap();

        assert_eq!(cfg.defaults.group_id, "org.acme");
        assert_eq!(cfg.defaults.language, Language::Kotlin);
        assert_eq!(cfg.defaults.packaging, Packaging::War);
        assert_eq!(cfg.defaults.platform_version, Version::new(3, 2, 0));
        assert_eq!(cfg.output.format, GenerateFormat::Tgz);
        // untouched keys keep their defaults
        assert_eq!(cfg.defaults.artifact_id, "demo");
        assert_eq!(cfg.defaults.build_system, BuildSystem::Maven);
    }

    #[test]
    fn catalog_path_is_read() {
        let cfg = load_from("[catalog]\npath = \"extra.toml\"\n").unwrap();
        assert_eq!(cfg.catalog.path, Some(PathBuf::from("extra.toml")));
    }

    #[test]
    fn invalid_value_is_a_config_error() {
        let err = load_from("[defaults]\nlanguage = \"cobol\"\n").unwrap_err();
        assert!(matches!(err, CliError::ConfigError { .. }));
        assert_eq!(err.exit_code(), 4);
    }

    #[test]
    fn explicit_missing_file_fails() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("absent.toml");
        assert!(AppConfig::load(Some(&missing)).is_err());
    }

    #[test]
    fn config_path_is_not_empty() {
        assert!(!AppConfig::config_path().as_os_str().is_empty());
    }
}

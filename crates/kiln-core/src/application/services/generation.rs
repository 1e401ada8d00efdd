//! Project Generator - main application orchestrator.
//!
//! The generator is stateless and shareable: it holds the contributor set,
//! the catalog and the packager, and drives a fresh [`GenerationRun`] for
//! every request:
//! 1. Bind and validate the description
//! 2. Register contributors (built-ins first, then extensions)
//! 3. Resolve active contributors
//! 4. Render the project tree
//! 5. Package it (or hand the tree back)

use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::{info, instrument};

use crate::{
    application::{
        contributor::Contributor,
        ports::{MetadataCatalog, ProjectPackager},
        services::run::{GeneratedContent, GenerationRun},
    },
    domain::{ArchiveFormat, ProjectDescription, ProjectTree},
    error::KilnResult,
};

/// Requested output shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputKind {
    Archive(ArchiveFormat),
    Files,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerationOptions {
    pub output: OutputKind,
    /// Checked before each contributor runs.
    pub deadline: Option<Instant>,
}

impl GenerationOptions {
    pub fn archive(format: ArchiveFormat) -> Self {
        Self {
            output: OutputKind::Archive(format),
            deadline: None,
        }
    }

    pub fn files() -> Self {
        Self {
            output: OutputKind::Files,
            deadline: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.deadline = Some(Instant::now() + timeout);
        self
    }
}

#[derive(Debug, Clone)]
pub enum GenerationContent {
    Files(ProjectTree),
    Archive(Vec<u8>),
}

#[derive(Debug, Clone)]
pub struct GenerationResult {
    pub content: GenerationContent,
    pub content_type: String,
    pub suggested_filename: String,
    /// Ids of the contributors that ran, in execution order.
    pub contributors: Vec<String>,
}

impl GenerationResult {
    pub fn archive_bytes(&self) -> Option<&[u8]> {
        match &self.content {
            GenerationContent::Archive(bytes) => Some(bytes),
            GenerationContent::Files(_) => None,
        }
    }

    pub fn tree(&self) -> Option<&ProjectTree> {
        match &self.content {
            GenerationContent::Files(tree) => Some(tree),
            GenerationContent::Archive(_) => None,
        }
    }
}

pub const DIRECTORY_CONTENT_TYPE: &str = "inode/directory";

pub struct ProjectGenerator {
    contributors: Vec<Arc<dyn Contributor>>,
    catalog: Arc<dyn MetadataCatalog>,
    packager: Arc<dyn ProjectPackager>,
    default_format: ArchiveFormat,
}

impl ProjectGenerator {
    pub fn new(catalog: Arc<dyn MetadataCatalog>, packager: Arc<dyn ProjectPackager>) -> Self {
        Self {
            contributors: Vec::new(),
            catalog,
            packager,
            default_format: ArchiveFormat::Zip,
        }
    }

    /// Append a contributor. Registration order is the tie-breaker for
    /// equal priorities, so built-ins should be added before extensions.
    pub fn with_contributor(mut self, contributor: Arc<dyn Contributor>) -> Self {
        self.contributors.push(contributor);
        self
    }

    pub fn with_contributors<I>(mut self, contributors: I) -> Self
    where
        I: IntoIterator<Item = Arc<dyn Contributor>>,
    {
        self.contributors.extend(contributors);
        self
    }

    pub fn with_default_format(mut self, format: ArchiveFormat) -> Self {
        self.default_format = format;
        self
    }

    pub fn default_format(&self) -> ArchiveFormat {
        self.default_format
    }

    pub fn contributor_ids(&self) -> impl Iterator<Item = &str> {
        self.contributors.iter().map(|c| c.id())
    }

    pub fn catalog(&self) -> &dyn MetadataCatalog {
        self.catalog.as_ref()
    }

    /// Generate an archive in the default format.
    pub fn generate(&self, description: ProjectDescription) -> KilnResult<GenerationResult> {
        self.generate_with(description, GenerationOptions::archive(self.default_format))
    }

    #[instrument(
        skip_all,
        fields(
            project = %description,
            output = ?options.output,
        )
    )]
    pub fn generate_with(
        &self,
        description: ProjectDescription,
        options: GenerationOptions,
    ) -> KilnResult<GenerationResult> {
        let description = Arc::new(description);
        let mut run = self.prepare(Arc::clone(&description))?;
        info!(run = %run.id(), "Generating project");

        run.render(options.deadline)?;
        if let OutputKind::Archive(format) = options.output {
            run.package(self.packager.as_ref(), format)?;
        }
        let output = run.finish()?;

        let stem = description
            .base_directory()
            .and_then(|dir| dir.rsplit('/').find(|s| !s.is_empty()))
            .unwrap_or(description.artifact_id())
            .to_string();
        let (content, content_type, suggested_filename) = match (output.content, options.output) {
            (GeneratedContent::Archive(bytes), OutputKind::Archive(format)) => (
                GenerationContent::Archive(bytes),
                format.content_type().to_string(),
                format!("{stem}.{}", format.extension()),
            ),
            (GeneratedContent::Archive(bytes), OutputKind::Files) => (
                GenerationContent::Archive(bytes),
                self.default_format.content_type().to_string(),
                format!("{stem}.{}", self.default_format.extension()),
            ),
            (GeneratedContent::Files(tree), _) => (
                GenerationContent::Files(tree),
                DIRECTORY_CONTENT_TYPE.to_string(),
                stem,
            ),
        };

        info!(
            run = %run.id(),
            contributors = output.contributors.len(),
            file = %suggested_filename,
            "Generation completed"
        );
        Ok(GenerationResult {
            content,
            content_type,
            suggested_filename,
            contributors: output.contributors,
        })
    }

    /// Dry run: every problem that would stop generation, without running
    /// any contributor.
    pub fn validate(&self, description: &ProjectDescription) -> Vec<String> {
        let mut problems = description.violations();
        for requested in description.dependencies() {
            match self.catalog.resolve_dependency(&requested.id) {
                None => problems.push(format!("unknown dependency '{}'", requested.id)),
                Some(meta) => {
                    if let (Some(platform), Some(range)) =
                        (description.platform_version(), &meta.compatibility_range)
                    {
                        if !range.matches(platform) {
                            problems.push(format!(
                                "dependency '{}' requires platform version {range}, got {platform}",
                                requested.id
                            ));
                        }
                    }
                }
            }
        }
        problems
    }

    /// Ids of the contributors that would run, in execution order.
    pub fn plan(&self, description: &ProjectDescription) -> KilnResult<Vec<String>> {
        let run = self.prepare(Arc::new(description.clone()))?;
        Ok(run
            .execution_plan()?
            .iter()
            .map(|c| c.id().to_string())
            .collect())
    }

    fn prepare(&self, description: Arc<ProjectDescription>) -> KilnResult<GenerationRun> {
        let mut run = GenerationRun::new(Arc::clone(&self.catalog));
        run.bind(description)?;
        run.register(self.contributors.iter().cloned())?;
        run.resolve()?;
        Ok(run)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::application::{
        condition::Condition,
        contributor::Capability,
        ports::MockMetadataCatalog,
        registry::tests::Stub,
    };
    use crate::domain::{
        ArchiveEntry, DependencyMetadata, Language, Packaging, Version, VersionRange,
    };
    use crate::error::ErrorKind;

    /// Packager that records the entry paths it was handed.
    #[derive(Default)]
    struct Listing {
        calls: Mutex<usize>,
    }

    impl ProjectPackager for Listing {
        fn package(&self, entries: &[ArchiveEntry], format: ArchiveFormat) -> KilnResult<Vec<u8>> {
            *self.calls.lock().unwrap() += 1;
            let mut out = format!("{format}\n");
            for entry in entries {
                out.push_str(entry.path.as_str());
                out.push('\n');
            }
            Ok(out.into_bytes())
        }
    }

    fn catalog() -> Arc<MockMetadataCatalog> {
        let mut catalog = MockMetadataCatalog::new();
        catalog.expect_resolve_dependency().returning(|id| match id {
            "web" => Some(DependencyMetadata::new("web", "org.example", "web").with_facet("web")),
            "legacy" => Some(
                DependencyMetadata::new("legacy", "org.example", "legacy")
                    .with_range(VersionRange::parse("[2.0.0,3.0.0)").unwrap()),
            ),
            _ => None,
        });
        Arc::new(catalog)
    }

    fn generator() -> ProjectGenerator {
        ProjectGenerator::new(catalog(), Arc::new(Listing::default())).with_contributors([
            Stub::new("jar", Capability::Packaging).when(Condition::packaging("jar")).arc(),
            Stub::new("war", Capability::Packaging).when(Condition::packaging("war")).arc(),
            Stub::new("build", Capability::BuildSystem).arc(),
            Stub::new("web-only", Capability::ResourceFile).when(Condition::facet("web")).arc(),
            Stub::new("help", Capability::PostProcess).after("ignore").arc(),
            Stub::new("ignore", Capability::PostProcess).arc(),
        ])
    }

    fn description(packaging: Packaging) -> ProjectDescription {
        ProjectDescription::builder()
            .language(Language::Java)
            .group_id("com.example")
            .artifact_id("demo")
            .packaging(packaging)
            .platform_version(Version::new(3, 2, 0))
            .build()
    }

    #[test]
    fn generate_archive_uses_default_format() {
        let result = generator().generate(description(Packaging::War)).unwrap();
        assert_eq!(result.content_type, "application/zip");
        assert_eq!(result.suggested_filename, "demo.zip");
        assert_eq!(result.contributors, ["war", "build", "ignore", "help"]);

        let listing = String::from_utf8(result.archive_bytes().unwrap().to_vec()).unwrap();
        assert!(listing.starts_with("zip\n"));
        assert!(listing.contains("war.txt"));
        assert!(!listing.contains("jar.txt"));
    }

    #[test]
    fn files_output_skips_packager() {
        let packager = Arc::new(Listing::default());
        let generator = ProjectGenerator::new(catalog(), packager.clone())
            .with_contributor(Stub::new("only", Capability::SourceFile).arc());
        let result = generator
            .generate_with(description(Packaging::Jar), GenerationOptions::files())
            .unwrap();

        assert_eq!(*packager.calls.lock().unwrap(), 0);
        assert_eq!(result.content_type, DIRECTORY_CONTENT_TYPE);
        assert_eq!(result.suggested_filename, "demo");
        assert!(result.tree().unwrap().contains("only.txt"));
    }

    #[test]
    fn tgz_filename_and_base_directory() {
        let d = ProjectDescription::builder()
            .language(Language::Java)
            .group_id("com.example")
            .artifact_id("demo")
            .platform_version(Version::new(3, 2, 0))
            .base_directory("out/my-app")
            .build();
        let result = generator()
            .generate_with(d, GenerationOptions::archive(ArchiveFormat::TarGz))
            .unwrap();
        assert_eq!(result.suggested_filename, "my-app.tar.gz");
        assert_eq!(result.content_type, "application/x-compress");
    }

    #[test]
    fn facet_condition_reads_requested_dependencies() {
        let d = ProjectDescription::builder()
            .language(Language::Java)
            .group_id("com.example")
            .artifact_id("demo")
            .platform_version(Version::new(3, 2, 0))
            .dependency("web")
            .build();
        let plan = generator().plan(&d).unwrap();
        assert_eq!(plan, ["build", "web-only", "ignore", "help"]);
    }

    #[test]
    fn plan_is_repeatable() {
        let g = generator();
        let d = description(Packaging::Jar);
        assert_eq!(g.plan(&d).unwrap(), g.plan(&d).unwrap());
    }

    #[test]
    fn validate_checks_catalog() {
        let d = ProjectDescription::builder()
            .language(Language::Java)
            .group_id("com.example")
            .artifact_id("demo")
            .platform_version(Version::new(3, 2, 0))
            .dependencies(["web", "legacy", "nope"])
            .build();
        let problems = generator().validate(&d);
        assert_eq!(problems.len(), 2);
        assert!(problems[0].contains("'legacy' requires platform version [2.0.0,3.0.0)"));
        assert_eq!(problems[1], "unknown dependency 'nope'");
    }

    #[test]
    fn invalid_description_is_reported_with_all_violations() {
        let d = ProjectDescription::builder().language(Language::Java).build();
        let err = generator().generate(d).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidDescription);
        assert!(err.to_string().contains("group id is required"));
        assert!(err.to_string().contains("platform version is required"));
    }

    #[test]
    fn duplicate_extension_id_fails() {
        let g = generator().with_contributor(Stub::new("jar", Capability::SourceFile).arc());
        let err = g.generate(description(Packaging::Jar)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DuplicateRegistration);
    }

    #[test]
    fn generator_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ProjectGenerator>();
    }
}

//! Build customisers: shape the build model before a build file is written.

use kiln_core::{
    application::{Capability, Condition, ContributionContext, Contributor, ContributorError},
    domain::{BuildDependency, BuildPlugin, BuildSystem, DependencyScope, Language},
};

use super::BOOT_GROUP;

const KOTLIN_VERSION: &str = "1.9.25";
const GMAVENPLUS_VERSION: &str = "3.0.2";

/// Resolves every requested dependency through the catalog.
///
/// Unknown ids and dependencies outside their compatibility range fail the
/// run; nothing is guessed.
#[derive(Debug, Clone, Copy)]
pub struct RequestedDependencies;

impl Contributor for RequestedDependencies {
    fn id(&self) -> &str {
        "requested-dependencies"
    }

    fn capability(&self) -> Capability {
        Capability::BuildCustomizer
    }

    fn condition(&self) -> Condition {
        Condition::Always
    }

    fn priority(&self) -> i32 {
        100
    }

    fn contribute(&self, ctx: &mut ContributionContext) -> Result<(), ContributorError> {
        let description = ctx.description();
        let platform = description.platform_version();
        let mut resolved = Vec::with_capacity(description.dependencies().len());

        for requested in description.dependencies() {
            let meta = ctx.catalog().resolve_dependency(&requested.id).ok_or_else(|| {
                ContributorError::msg(format!("unknown dependency '{}'", requested.id))
            })?;
            if let (Some(platform), Some(range)) = (platform, meta.compatibility_range.as_ref()) {
                if !range.matches(platform) {
                    return Err(ContributorError::msg(format!(
                        "dependency '{}' requires platform version {range}, got {platform}",
                        meta.id
                    )));
                }
            }

            let mut dependency = BuildDependency::new(
                meta.id,
                meta.group_id,
                meta.artifact_id,
                requested.scope.unwrap_or(meta.scope),
            );
            dependency.version = meta.version;
            resolved.push(dependency);
        }

        let build = ctx.build_mut();
        for dependency in resolved {
            build.add_dependency(dependency);
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy)]
pub struct TestStarter;

impl Contributor for TestStarter {
    fn id(&self) -> &str {
        "test-starter"
    }

    fn capability(&self) -> Capability {
        Capability::BuildCustomizer
    }

    fn condition(&self) -> Condition {
        Condition::Always
    }

    fn contribute(&self, ctx: &mut ContributionContext) -> Result<(), ContributorError> {
        ctx.build_mut().add_dependency(BuildDependency::new(
            "test",
            BOOT_GROUP,
            "spring-boot-starter-test",
            DependencyScope::Test,
        ));
        Ok(())
    }
}

/// Kotlin standard library, reflection and compiler plugins.
#[derive(Debug, Clone, Copy)]
pub struct KotlinSupport;

impl Contributor for KotlinSupport {
    fn id(&self) -> &str {
        "kotlin-support"
    }

    fn capability(&self) -> Capability {
        Capability::BuildCustomizer
    }

    fn condition(&self) -> Condition {
        Condition::Language(Language::Kotlin)
    }

    fn contribute(&self, ctx: &mut ContributionContext) -> Result<(), ContributorError> {
        let json = Condition::facet("json").evaluate(&ctx.condition_context());
        let build_system = ctx.description().build_system();

        let build = ctx.build_mut();
        build.set_property("kotlin.version", KOTLIN_VERSION);
        build.add_dependency(BuildDependency::new(
            "kotlin-reflect",
            "org.jetbrains.kotlin",
            "kotlin-reflect",
            DependencyScope::Compile,
        ));
        if json {
            build.add_dependency(BuildDependency::new(
                "jackson-kotlin",
                "com.fasterxml.jackson.module",
                "jackson-module-kotlin",
                DependencyScope::Compile,
            ));
        }

        match build_system {
            BuildSystem::Maven => {
                build.add_plugin(BuildPlugin::new(
                    "kotlin-maven-plugin",
                    "org.jetbrains.kotlin",
                    "kotlin-maven-plugin",
                ));
            }
            BuildSystem::Gradle => {
                build.add_plugin(
                    BuildPlugin::gradle_core("org.jetbrains.kotlin.jvm").with_version(KOTLIN_VERSION),
                );
                build.add_plugin(
                    BuildPlugin::gradle_core("org.jetbrains.kotlin.plugin.spring")
                        .with_version(KOTLIN_VERSION),
                );
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy)]
pub struct GroovySupport;

impl Contributor for GroovySupport {
    fn id(&self) -> &str {
        "groovy-support"
    }

    fn capability(&self) -> Capability {
        Capability::BuildCustomizer
    }

    fn condition(&self) -> Condition {
        Condition::Language(Language::Groovy)
    }

    fn contribute(&self, ctx: &mut ContributionContext) -> Result<(), ContributorError> {
        let build_system = ctx.description().build_system();
        let build = ctx.build_mut();
        build.add_dependency(BuildDependency::new(
            "groovy",
            "org.apache.groovy",
            "groovy",
            DependencyScope::Compile,
        ));
        let plugin = match build_system {
            BuildSystem::Maven => {
                BuildPlugin::new("gmavenplus", "org.codehaus.gmavenplus", "gmavenplus-plugin")
                    .with_version(GMAVENPLUS_VERSION)
            }
            BuildSystem::Gradle => BuildPlugin::gradle_core("groovy"),
        };
        build.add_plugin(plugin);
        Ok(())
    }
}

/// Moves Lombok to annotation-processor scope and adds the configuration
/// metadata processor next to it.
#[derive(Debug, Clone, Copy)]
pub struct AnnotationProcessing;

impl Contributor for AnnotationProcessing {
    fn id(&self) -> &str {
        "annotation-processing"
    }

    fn capability(&self) -> Capability {
        Capability::BuildCustomizer
    }

    fn condition(&self) -> Condition {
        Condition::dependency("lombok")
    }

    fn runs_after(&self) -> Vec<String> {
        vec!["requested-dependencies".to_string()]
    }

    fn contribute(&self, ctx: &mut ContributionContext) -> Result<(), ContributorError> {
        let build = ctx.build_mut();
        if let Some(lombok) = build.dependency_mut("lombok") {
            lombok.scope = DependencyScope::AnnotationProcessor;
        }
        build.add_dependency(BuildDependency::new(
            "configuration-processor",
            BOOT_GROUP,
            "spring-boot-configuration-processor",
            DependencyScope::AnnotationProcessor,
        ));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use kiln_core::domain::Version;

    use super::*;
    use crate::contributors::testing::{context, description};

    fn ids(ctx: &ContributionContext) -> Vec<&str> {
        ctx.build().dependencies().iter().map(|d| d.id.as_str()).collect()
    }

    #[test]
    fn requested_dependencies_resolve_through_catalog() {
        let mut ctx = context(
            description(Language::Java)
                .dependency("web")
                .dependency_with_scope("h2", DependencyScope::Test)
                .build(),
        );
        RequestedDependencies.contribute(&mut ctx).unwrap();

        assert_eq!(ids(&ctx), ["web", "h2"]);
        assert_eq!(ctx.build().dependencies()[0].artifact_id, "spring-boot-starter-web");
        assert_eq!(ctx.build().dependencies()[1].scope, DependencyScope::Test);
    }

    #[test]
    fn unknown_dependency_fails() {
        let mut ctx = context(description(Language::Java).dependency("flux-capacitor").build());
        let err = RequestedDependencies.contribute(&mut ctx).unwrap_err();
        assert_eq!(err.to_string(), "unknown dependency 'flux-capacitor'");
    }

    #[test]
    fn incompatible_dependency_fails() {
        let mut ctx = context(
            description(Language::Java)
                .platform_version(Version::new(2, 6, 0))
                .dependency("graphql")
                .build(),
        );
        let err = RequestedDependencies.contribute(&mut ctx).unwrap_err();
        assert_eq!(
            err.to_string(),
            "dependency 'graphql' requires platform version 2.7.0, got 2.6.0"
        );
    }

    #[test]
    fn kotlin_adds_jackson_module_for_json_facet() {
        let mut ctx = context(
            description(Language::Kotlin)
                .build_system(BuildSystem::Gradle)
                .dependency("web")
                .build(),
        );
        KotlinSupport.contribute(&mut ctx).unwrap();

        assert_eq!(ids(&ctx), ["kotlin-reflect", "jackson-kotlin"]);
        let plugins: Vec<&str> = ctx.build().plugins().iter().map(|p| p.id.as_str()).collect();
        assert_eq!(plugins, ["org.jetbrains.kotlin.jvm", "org.jetbrains.kotlin.plugin.spring"]);
        assert_eq!(ctx.build().properties["kotlin.version"], KOTLIN_VERSION);
    }

    #[test]
    fn groovy_plugin_depends_on_build_system() {
        let mut ctx = context(description(Language::Groovy).build());
        GroovySupport.contribute(&mut ctx).unwrap();
        assert!(ctx.build().plugins()[0].has_maven_coordinates());

        let mut ctx = context(
            description(Language::Groovy)
                .build_system(BuildSystem::Gradle)
                .build(),
        );
        GroovySupport.contribute(&mut ctx).unwrap();
        assert_eq!(ctx.build().plugins()[0].id, "groovy");
    }

    #[test]
    fn lombok_moves_to_annotation_processor_scope() {
        let mut ctx = context(description(Language::Java).dependency("lombok").build());
        RequestedDependencies.contribute(&mut ctx).unwrap();
        AnnotationProcessing.contribute(&mut ctx).unwrap();

        let processors: Vec<&str> = ctx
            .build()
            .dependencies_in(DependencyScope::AnnotationProcessor)
            .map(|d| d.id.as_str())
            .collect();
        assert_eq!(processors, ["lombok", "configuration-processor"]);
    }
}

//! Packaging contributors. At most one is active per run.

use kiln_core::{
    application::{Capability, Condition, ContributionContext, Contributor, ContributorError},
    domain::{BuildDependency, BuildPlugin, BuildSystem, DependencyScope},
};

use super::{BOOT_GROUP, sources};

#[derive(Debug, Clone, Copy)]
pub struct JarPackaging;

impl Contributor for JarPackaging {
    fn id(&self) -> &str {
        "jar-packaging"
    }

    fn capability(&self) -> Capability {
        Capability::Packaging
    }

    fn condition(&self) -> Condition {
        Condition::packaging("jar")
    }

    fn contribute(&self, ctx: &mut ContributionContext) -> Result<(), ContributorError> {
        ctx.build_mut().packaging = "jar".to_string();
        Ok(())
    }
}

/// War packaging: provided servlet container plus a `ServletInitializer`.
#[derive(Debug, Clone, Copy)]
pub struct WarPackaging;

impl Contributor for WarPackaging {
    fn id(&self) -> &str {
        "war-packaging"
    }

    fn capability(&self) -> Capability {
        Capability::Packaging
    }

    fn condition(&self) -> Condition {
        Condition::packaging("war")
    }

    fn contribute(&self, ctx: &mut ContributionContext) -> Result<(), ContributorError> {
        let container = match ctx.catalog().resolve_dependency("tomcat") {
            Some(meta) => BuildDependency::new(
                meta.id,
                meta.group_id,
                meta.artifact_id,
                DependencyScope::Provided,
            ),
            None => BuildDependency::new(
                "tomcat",
                BOOT_GROUP,
                "spring-boot-starter-tomcat",
                DependencyScope::Provided,
            ),
        };
        let gradle = ctx.description().build_system() == BuildSystem::Gradle;

        let build = ctx.build_mut();
        build.packaging = "war".to_string();
        build.add_dependency(container);
        if gradle {
            build.add_plugin(BuildPlugin::gradle_core("war"));
        }

        let language = ctx.description().language();
        ctx.write_file(
            &sources::source_path(language, "main", "ServletInitializer"),
            sources::servlet_initializer(language),
        )
    }
}

#[cfg(test)]
mod tests {
    use kiln_core::domain::{Language, Packaging};

    use super::*;
    use crate::contributors::testing::{context, description};

    #[test]
    fn war_adds_provided_container_and_initializer() {
        let mut ctx = context(
            description(Language::Kotlin)
                .packaging(Packaging::War)
                .build(),
        );
        WarPackaging.contribute(&mut ctx).unwrap();

        assert_eq!(ctx.build().packaging, "war");
        let tomcat: Vec<_> = ctx.build().dependencies_in(DependencyScope::Provided).collect();
        assert_eq!(tomcat.len(), 1);
        assert_eq!(tomcat[0].artifact_id, "spring-boot-starter-tomcat");

        let initializer = ctx
            .tree()
            .text("src/main/kotlin/com/example/demo/ServletInitializer.kt")
            .unwrap();
        assert!(initializer.contains("application.sources(DemoApplication::class.java)"));
        assert!(ctx.build().plugins().is_empty());
    }

    #[test]
    fn war_on_gradle_applies_war_plugin() {
        let mut ctx = context(
            description(Language::Java)
                .build_system(BuildSystem::Gradle)
                .packaging(Packaging::War)
                .build(),
        );
        WarPackaging.contribute(&mut ctx).unwrap();
        assert_eq!(ctx.build().plugins()[0].id, "war");
    }

    #[test]
    fn conditions_match_only_their_packaging() {
        let jar = description(Language::Java).packaging(Packaging::Jar).build();
        let catalog = crate::catalog::InMemoryCatalog::new();
        let cctx = kiln_core::application::ConditionContext::new(&jar, &catalog);
        assert!(JarPackaging.condition().evaluate(&cctx));
        assert!(!WarPackaging.condition().evaluate(&cctx));
    }
}

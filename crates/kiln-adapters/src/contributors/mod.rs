//! Built-in contributors.
//!
//! Each contributor owns one concern of a generated project and is gated by
//! a [`Condition`](kiln_core::application::Condition). The list returned by
//! [`builtin_contributors`] is the registration order, which also breaks
//! ties between contributors of the same stage.
//!
//! | Stage            | Contributors                                          |
//! |------------------|-------------------------------------------------------|
//! | packaging        | `jar-packaging`, `war-packaging`                      |
//! | build-customizer | `requested-dependencies`, `test-starter`, `kotlin-support`, `groovy-support`, `annotation-processing` |
//! | build-system     | `maven-build`, `gradle-build`                         |
//! | build-file       | `maven-wrapper`, `gradle-wrapper`                     |
//! | source-file      | `main-application`, `application-tests`               |
//! | resource-file    | `application-properties`, `web-resources`             |
//! | post-process     | `gitignore`, `help-document`                          |

mod customizers;
mod gradle;
mod maven;
mod packaging;
mod post_process;
mod resources;
mod sources;
mod wrappers;

use std::sync::Arc;

use kiln_core::application::Contributor;

pub use customizers::{
    AnnotationProcessing, GroovySupport, KotlinSupport, RequestedDependencies, TestStarter,
};
pub use gradle::GradleBuild;
pub use maven::MavenBuild;
pub use packaging::{JarPackaging, WarPackaging};
pub use post_process::{Gitignore, HelpDocument};
pub use resources::{ApplicationProperties, WebResources};
pub use sources::{ApplicationTests, MainApplication};
pub use wrappers::{GradleWrapper, MavenWrapper};

pub(crate) const BOOT_GROUP: &str = "org.springframework.boot";

/// Every built-in contributor, in registration order.
pub fn builtin_contributors() -> Vec<Arc<dyn Contributor>> {
    vec![
        Arc::new(JarPackaging),
        Arc::new(WarPackaging),
        Arc::new(RequestedDependencies),
        Arc::new(TestStarter),
        Arc::new(KotlinSupport),
        Arc::new(GroovySupport),
        Arc::new(AnnotationProcessing),
        Arc::new(MavenBuild),
        Arc::new(GradleBuild),
        Arc::new(MavenWrapper),
        Arc::new(GradleWrapper),
        Arc::new(MainApplication),
        Arc::new(ApplicationTests),
        Arc::new(ApplicationProperties),
        Arc::new(WebResources),
        Arc::new(Gitignore),
        Arc::new(HelpDocument),
    ]
}

#[cfg(test)]
pub(crate) mod testing {
    use std::sync::Arc;

    use kiln_core::application::ContributionContext;
    use kiln_core::domain::{DescriptionBuilder, HasLanguage, Language, ProjectDescription, Version};

    use crate::catalog::InMemoryCatalog;

    pub(crate) fn description(language: Language) -> DescriptionBuilder<HasLanguage> {
        ProjectDescription::builder()
            .language(language)
            .group_id("com.example")
            .artifact_id("demo")
            .platform_version(Version::new(3, 2, 0))
    }

    pub(crate) fn context(description: ProjectDescription) -> ContributionContext {
        ContributionContext::new(Arc::new(description), Arc::new(InMemoryCatalog::with_builtin()))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn builtin_ids_are_unique() {
        let contributors = builtin_contributors();
        let ids: HashSet<&str> = contributors.iter().map(|c| c.id()).collect();
        assert_eq!(ids.len(), contributors.len());
    }

    #[test]
    fn registration_order_follows_stages() {
        let stages: Vec<u8> = builtin_contributors()
            .iter()
            .map(|c| c.capability().stage())
            .collect();
        let mut sorted = stages.clone();
        sorted.sort();
        assert_eq!(stages, sorted);
    }
}

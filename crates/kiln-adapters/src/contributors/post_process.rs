//! Finishing touches that look at what earlier contributors produced.

use kiln_core::{
    application::{Capability, Condition, ContributionContext, Contributor, ContributorError},
    domain::{BuildSystem, Permissions},
};

const COMMON_IGNORES: &str = "
### STS ###
.apt_generated
.classpath
.factorypath
.project
.settings
.springBeans
.sts4-cache

### IntelliJ IDEA ###
.idea
*.iws
*.iml
*.ipr

### NetBeans ###
/nbproject/private/
/nbbuild/
/dist/
/nbdist/
/.nb-gradle/

### VS Code ###
.vscode/
";

#[derive(Debug, Clone, Copy)]
pub struct Gitignore;

impl Contributor for Gitignore {
    fn id(&self) -> &str {
        "gitignore"
    }

    fn capability(&self) -> Capability {
        Capability::PostProcess
    }

    fn condition(&self) -> Condition {
        Condition::Always
    }

    fn contribute(&self, ctx: &mut ContributionContext) -> Result<(), ContributorError> {
        let head = match ctx.description().build_system() {
            BuildSystem::Maven => {
                "target/\n!.mvn/wrapper/maven-wrapper.jar\n!**/src/main/**/target/\n!**/src/test/**/target/\n"
            }
            BuildSystem::Gradle => {
                ".gradle\nbuild/\n!gradle/wrapper/gradle-wrapper.jar\n!**/src/main/**/build/\n!**/src/test/**/build/\n"
            }
        };
        ctx.write_file(".gitignore", &format!("{head}{COMMON_IGNORES}"))
    }
}

/// `HELP.md` with pointers for the build tool and each requested dependency.
///
/// Runs after `gitignore` so it can add itself to the ignore list.
#[derive(Debug, Clone, Copy)]
pub struct HelpDocument;

impl Contributor for HelpDocument {
    fn id(&self) -> &str {
        "help-document"
    }

    fn capability(&self) -> Capability {
        Capability::PostProcess
    }

    fn condition(&self) -> Condition {
        Condition::Always
    }

    fn runs_after(&self) -> Vec<String> {
        vec!["gitignore".to_string()]
    }

    fn contribute(&self, ctx: &mut ContributionContext) -> Result<(), ContributorError> {
        let description = ctx.description();
        let mut doc = String::from("# Getting Started\n\n### Reference Documentation\n\n");
        doc.push_str("For further reference, please consider the following sections:\n\n");
        match description.build_system() {
            BuildSystem::Maven => {
                doc.push_str("* [Official Apache Maven documentation](https://maven.apache.org/guides/index.html)\n")
            }
            BuildSystem::Gradle => {
                doc.push_str("* [Official Gradle documentation](https://docs.gradle.org)\n")
            }
        }
        for requested in description.dependencies() {
            if let Some(meta) = ctx.catalog().resolve_dependency(&requested.id) {
                if meta.description.is_empty() {
                    doc.push_str(&format!("* `{}`\n", meta.id));
                } else {
                    doc.push_str(&format!("* `{}`: {}\n", meta.id, meta.description));
                }
            }
        }

        let ignore = ctx.tree().text(".gitignore").map(|text| format!("HELP.md\n{text}"));
        if let Some(ignore) = ignore {
            ctx.tree_mut()
                .replace_file(".gitignore", ignore, Permissions::read_write())?;
        }
        ctx.write_rendered("HELP.md", &doc)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use kiln_core::domain::{DependencyMetadata, Language};

    use super::*;
    use crate::catalog::InMemoryCatalog;
    use crate::contributors::testing::{context, description};

    #[test]
    fn gitignore_matches_build_system() {
        let mut ctx = context(description(Language::Java).build());
        Gitignore.contribute(&mut ctx).unwrap();
        let text = ctx.tree().text(".gitignore").unwrap();
        assert!(text.starts_with("target/\n"));
        assert!(text.contains("### IntelliJ IDEA ###"));

        let mut ctx = context(
            description(Language::Java)
                .build_system(BuildSystem::Gradle)
                .build(),
        );
        Gitignore.contribute(&mut ctx).unwrap();
        assert!(ctx.tree().text(".gitignore").unwrap().starts_with(".gradle\nbuild/\n"));
    }

    #[test]
    fn help_lists_dependencies_and_ignores_itself() {
        let mut ctx = context(description(Language::Java).dependency("web").build());
        Gitignore.contribute(&mut ctx).unwrap();
        HelpDocument.contribute(&mut ctx).unwrap();

        let help = ctx.tree().text("HELP.md").unwrap();
        assert!(help.contains("Official Apache Maven documentation"));
        assert!(help.contains("* `web`: Build web, including RESTful"));
        assert!(ctx.tree().text(".gitignore").unwrap().starts_with("HELP.md\ntarget/\n"));
    }

    #[test]
    fn help_keeps_catalog_text_verbatim() {
        let mut catalog = InMemoryCatalog::new();
        catalog
            .extend([DependencyMetadata::new("docs", "org.acme", "acme-docs")
                .with_description("Renders {{NAME}} pages")])
            .unwrap();
        let description = description(Language::Java).dependency("docs").build();
        let mut ctx = ContributionContext::new(Arc::new(description), Arc::new(catalog));
        HelpDocument.contribute(&mut ctx).unwrap();

        let help = ctx.tree().text("HELP.md").unwrap();
        assert!(help.contains("* `docs`: Renders {{NAME}} pages"));
    }

    #[test]
    fn help_without_gitignore() {
        let mut ctx = context(description(Language::Java).build());
        HelpDocument.contribute(&mut ctx).unwrap();
        assert!(ctx.tree().contains("HELP.md"));
        assert!(!ctx.tree().contains(".gitignore"));
    }
}

//! `pom.xml` rendered from the build model.

use kiln_core::{
    application::{Capability, Condition, ContributionContext, Contributor, ContributorError},
    domain::{BuildDependency, BuildModel, BuildSystem, DependencyScope, Language},
};

/// Scopes in the order their dependencies are listed.
const SCOPE_ORDER: [DependencyScope; 5] = [
    DependencyScope::Compile,
    DependencyScope::Runtime,
    DependencyScope::AnnotationProcessor,
    DependencyScope::Provided,
    DependencyScope::Test,
];

#[derive(Debug, Clone, Copy)]
pub struct MavenBuild;

impl Contributor for MavenBuild {
    fn id(&self) -> &str {
        "maven-build"
    }

    fn capability(&self) -> Capability {
        Capability::BuildSystem
    }

    fn condition(&self) -> Condition {
        Condition::BuildSystem(BuildSystem::Maven)
    }

    fn contribute(&self, ctx: &mut ContributionContext) -> Result<(), ContributorError> {
        let pom = render_pom(ctx.build())?;
        ctx.write_rendered("pom.xml", &pom)
    }
}

fn render_pom(build: &BuildModel) -> Result<String, ContributorError> {
    let platform = build
        .platform_version
        .as_deref()
        .ok_or_else(|| ContributorError::msg("a platform version is required for pom.xml"))?;

    let mut out = String::new();
    out.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    out.push_str(
        "<project xmlns=\"http://maven.apache.org/POM/4.0.0\" \
         xmlns:xsi=\"http://www.w3.org/2001/XMLSchema-instance\"\n\
         \txsi:schemaLocation=\"http://maven.apache.org/POM/4.0.0 \
         https://maven.apache.org/xsd/maven-4.0.0.xsd\">\n",
    );
    out.push_str("\t<modelVersion>4.0.0</modelVersion>\n");
    out.push_str("\t<parent>\n");
    element(&mut out, 2, "groupId", "org.springframework.boot");
    element(&mut out, 2, "artifactId", "spring-boot-starter-parent");
    element(&mut out, 2, "version", platform);
    out.push_str("\t\t<relativePath/>\n");
    out.push_str("\t</parent>\n");

    element(&mut out, 1, "groupId", &build.group_id);
    element(&mut out, 1, "artifactId", &build.artifact_id);
    element(&mut out, 1, "version", &build.version);
    if build.packaging != "jar" {
        element(&mut out, 1, "packaging", &build.packaging);
    }
    element(&mut out, 1, "name", &build.name);
    element(&mut out, 1, "description", &build.description);

    out.push_str("\t<properties>\n");
    for (key, value) in &build.properties {
        element(&mut out, 2, key, value);
    }
    out.push_str("\t</properties>\n");

    out.push_str("\t<dependencies>\n");
    for scope in SCOPE_ORDER {
        for dependency in build.dependencies_in(scope) {
            render_dependency(&mut out, dependency);
        }
    }
    out.push_str("\t</dependencies>\n");

    out.push_str("\t<build>\n");
    if build.language == Language::Kotlin {
        out.push_str("\t\t<sourceDirectory>${project.basedir}/src/main/kotlin</sourceDirectory>\n");
        out.push_str(
            "\t\t<testSourceDirectory>${project.basedir}/src/test/kotlin</testSourceDirectory>\n",
        );
    }
    out.push_str("\t\t<plugins>\n");
    render_plugin(&mut out, "org.springframework.boot", "spring-boot-maven-plugin", None);
    for plugin in build.plugins().iter().filter(|p| p.has_maven_coordinates()) {
        render_plugin(
            &mut out,
            &plugin.group_id,
            &plugin.artifact_id,
            plugin.version.as_deref(),
        );
    }
    out.push_str("\t\t</plugins>\n");
    out.push_str("\t</build>\n\n");
    out.push_str("</project>\n");
    Ok(out)
}

fn render_dependency(out: &mut String, dependency: &BuildDependency) {
    out.push_str("\t\t<dependency>\n");
    element(out, 3, "groupId", &dependency.group_id);
    element(out, 3, "artifactId", &dependency.artifact_id);
    if let Some(version) = &dependency.version {
        element(out, 3, "version", version);
    }
    match dependency.scope {
        DependencyScope::Compile => {}
        DependencyScope::AnnotationProcessor => element(out, 3, "optional", "true"),
        DependencyScope::Runtime => element(out, 3, "scope", "runtime"),
        DependencyScope::Provided => element(out, 3, "scope", "provided"),
        DependencyScope::Test => element(out, 3, "scope", "test"),
    }
    out.push_str("\t\t</dependency>\n");
}

fn render_plugin(out: &mut String, group_id: &str, artifact_id: &str, version: Option<&str>) {
    out.push_str("\t\t\t<plugin>\n");
    element(out, 4, "groupId", group_id);
    element(out, 4, "artifactId", artifact_id);
    if let Some(version) = version {
        element(out, 4, "version", version);
    }
    out.push_str("\t\t\t</plugin>\n");
}

fn element(out: &mut String, depth: usize, name: &str, value: &str) {
    out.push_str(&"\t".repeat(depth));
    out.push_str(&format!("<{name}>{}</{name}>\n", escape_xml(value)));
}

fn escape_xml(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            c => escaped.push(c),
        }
    }
    escaped
}

//! `build.gradle` and `settings.gradle` rendered from the build model.

use kiln_core::{
    application::{Capability, Condition, ContributionContext, Contributor, ContributorError},
    domain::{BuildDependency, BuildModel, BuildSystem, DependencyScope, Language},
};

const DEPENDENCY_MANAGEMENT_VERSION: &str = "1.1.6";

const SETTINGS: &str = "rootProject.name = '{{ARTIFACT_ID}}'\n";

#[derive(Debug, Clone, Copy)]
pub struct GradleBuild;

impl Contributor for GradleBuild {
    fn id(&self) -> &str {
        "gradle-build"
    }

    fn capability(&self) -> Capability {
        Capability::BuildSystem
    }

    fn condition(&self) -> Condition {
        Condition::BuildSystem(BuildSystem::Gradle)
    }

    fn contribute(&self, ctx: &mut ContributionContext) -> Result<(), ContributorError> {
        let script = render_build(ctx.build())?;
        ctx.write_rendered("build.gradle", &script)?;
        ctx.write_file("settings.gradle", SETTINGS)
    }
}

fn render_build(build: &BuildModel) -> Result<String, ContributorError> {
    let platform = build
        .platform_version
        .as_deref()
        .ok_or_else(|| ContributorError::msg("a platform version is required for build.gradle"))?;
    let war = build.plugins().iter().any(|p| p.id == "war");

    let mut out = String::new();
    out.push_str("plugins {\n");
    out.push_str("\tid 'java'\n");
    for plugin in build.plugins().iter().filter(|p| p.version.is_none()) {
        out.push_str(&format!("\tid '{}'\n", plugin.id));
    }
    out.push_str(&format!("\tid 'org.springframework.boot' version '{platform}'\n"));
    out.push_str(&format!(
        "\tid 'io.spring.dependency-management' version '{DEPENDENCY_MANAGEMENT_VERSION}'\n"
    ));
    for plugin in build.plugins() {
        if let Some(version) = &plugin.version {
            out.push_str(&format!("\tid '{}' version '{version}'\n", plugin.id));
        }
    }
    out.push_str("}\n\n");

    out.push_str(&format!("group = '{}'\n", build.group_id));
    out.push_str(&format!("version = '{}'\n", build.version));
    out.push('\n');

    out.push_str("java {\n\ttoolchain {\n");
    out.push_str(&format!(
        "\t\tlanguageVersion = JavaLanguageVersion.of({})\n",
        build.java_version
    ));
    out.push_str("\t}\n}\n\n");

    if build.dependencies_in(DependencyScope::AnnotationProcessor).next().is_some() {
        out.push_str("configurations {\n\tcompileOnly {\n\t\textendsFrom annotationProcessor\n\t}\n}\n\n");
    }

    out.push_str("repositories {\n\tmavenCentral()\n}\n\n");

    out.push_str("dependencies {\n");
    for dependency in build.dependencies() {
        for configuration in configurations(dependency.scope, war) {
            out.push_str(&format!("\t{configuration} '{}'\n", notation(dependency)));
        }
    }
    out.push_str("}\n\n");

    if build.language == Language::Kotlin {
        out.push_str("kotlin {\n\tcompilerOptions {\n\t\tfreeCompilerArgs.addAll '-Xjsr305=strict'\n\t}\n}\n\n");
    }

    out.push_str("tasks.named('test') {\n\tuseJUnitPlatform()\n}\n");
    Ok(out)
}

fn configurations(scope: DependencyScope, war: bool) -> &'static [&'static str] {
    match scope {
        DependencyScope::Compile => &["implementation"],
        DependencyScope::Runtime => &["runtimeOnly"],
        DependencyScope::Provided if war => &["providedRuntime"],
        DependencyScope::Provided => &["compileOnly"],
        DependencyScope::Test => &["testImplementation"],
        DependencyScope::AnnotationProcessor => &["compileOnly", "annotationProcessor"],
    }
}

fn notation(dependency: &BuildDependency) -> String {
    match &dependency.version {
        Some(version) => format!("{}:{version}", dependency.coordinates()),
        None => dependency.coordinates(),
    }
}

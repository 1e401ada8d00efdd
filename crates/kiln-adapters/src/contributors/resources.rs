//! Resource files under `src/main/resources`.

use kiln_core::application::{
    Capability, Condition, ContributionContext, Contributor, ContributorError,
};

#[derive(Debug, Clone, Copy)]
pub struct ApplicationProperties;

impl Contributor for ApplicationProperties {
    fn id(&self) -> &str {
        "application-properties"
    }

    fn capability(&self) -> Capability {
        Capability::ResourceFile
    }

    fn condition(&self) -> Condition {
        Condition::Always
    }

    fn contribute(&self, ctx: &mut ContributionContext) -> Result<(), ContributorError> {
        ctx.write_file(
            "src/main/resources/application.properties",
            "spring.application.name={{NAME}}\n",
        )
    }
}

/// Empty `static/` and `templates/` folders for web projects.
#[derive(Debug, Clone, Copy)]
pub struct WebResources;

impl Contributor for WebResources {
    fn id(&self) -> &str {
        "web-resources"
    }

    fn capability(&self) -> Capability {
        Capability::ResourceFile
    }

    fn condition(&self) -> Condition {
        Condition::facet("web")
    }

    fn contribute(&self, ctx: &mut ContributionContext) -> Result<(), ContributorError> {
        ctx.add_directory("src/main/resources/static")?;
        ctx.add_directory("src/main/resources/templates")
    }
}

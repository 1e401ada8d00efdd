//! Dependencies known out of the box.

use kiln_core::domain::{DependencyMetadata, DependencyScope, Version, VersionRange};

const BOOT: &str = "org.springframework.boot";

fn starter(id: &str, artifact: &str) -> DependencyMetadata {
    DependencyMetadata::new(id, BOOT, artifact)
}

pub(crate) fn dependencies() -> Vec<DependencyMetadata> {
    vec![
        starter("web", "spring-boot-starter-web")
            .with_facet("web")
            .with_facet("json")
            .with_description("Build web, including RESTful, applications using Spring MVC."),
        starter("webflux", "spring-boot-starter-webflux")
            .with_facet("web")
            .with_facet("reactive")
            .with_description("Build reactive web applications with Spring WebFlux and Netty."),
        starter("thymeleaf", "spring-boot-starter-thymeleaf")
            .with_facet("web")
            .with_description("A modern server-side Java template engine for web and standalone environments."),
        starter("security", "spring-boot-starter-security")
            .with_facet("security")
            .with_description("Highly customizable authentication and access-control framework."),
        starter("validation", "spring-boot-starter-validation")
            .with_range(VersionRange::at_least(Version::new(2, 3, 0)))
            .with_description("Bean Validation with Hibernate validator."),
        starter("actuator", "spring-boot-starter-actuator")
            .with_description("Production ready features to help you monitor and manage your application."),
        starter("graphql", "spring-boot-starter-graphql")
            .with_facet("web")
            .with_range(VersionRange::at_least(Version::new(2, 7, 0)))
            .with_description("Build GraphQL applications with Spring for GraphQL."),
        starter("data-jpa", "spring-boot-starter-data-jpa")
            .with_facet("jpa")
            .with_description("Persist data in SQL stores with Java Persistence API using Spring Data and Hibernate."),
        DependencyMetadata::new("h2", "com.h2database", "h2")
            .with_scope(DependencyScope::Runtime)
            .with_description("Provides a fast in-memory database."),
        DependencyMetadata::new("postgresql", "org.postgresql", "postgresql")
            .with_scope(DependencyScope::Runtime)
            .with_description("A JDBC and R2DBC driver for PostgreSQL databases."),
        DependencyMetadata::new("lombok", "org.projectlombok", "lombok")
            .with_description("Java annotation library which helps to reduce boilerplate code."),
        starter("devtools", "spring-boot-devtools")
            .with_scope(DependencyScope::Runtime)
            .with_description("Provides fast application restarts, LiveReload, and configurations."),
        starter("tomcat", "spring-boot-starter-tomcat")
            .with_scope(DependencyScope::Provided)
            .with_description("Servlet container used when deploying as a war."),
    ]
}

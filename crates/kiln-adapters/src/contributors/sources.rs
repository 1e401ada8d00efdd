//! Application entry point and its smoke test, in the project language.

use kiln_core::{
    application::{Capability, Condition, ContributionContext, Contributor, ContributorError},
    domain::Language,
};

/// `src/<set>/<lang>/{{PACKAGE_PATH}}/<stem>.<ext>`
pub(super) fn source_path(language: Language, set: &str, stem: &str) -> String {
    format!(
        "src/{set}/{}/{{{{PACKAGE_PATH}}}}/{stem}.{}",
        language.source_dir(),
        language.source_extension()
    )
}

// ── Templates ────────────────────────────────────────────────────────────────

const JAVA_MAIN: &str = r#"package {{PACKAGE_NAME}};

import org.springframework.boot.SpringApplication;
import org.springframework.boot.autoconfigure.SpringBootApplication;

@SpringBootApplication
public class {{APPLICATION_NAME}} {

	public static void main(String[] args) {
		SpringApplication.run({{APPLICATION_NAME}}.class, args);
	}

}
"#;

const KOTLIN_MAIN: &str = r#"package {{PACKAGE_NAME}}

import org.springframework.boot.autoconfigure.SpringBootApplication
import org.springframework.boot.runApplication

@SpringBootApplication
class {{APPLICATION_NAME}}

fun main(args: Array<String>) {
	runApplication<{{APPLICATION_NAME}}>(*args)
}
"#;

const GROOVY_MAIN: &str = r#"package {{PACKAGE_NAME}}

import org.springframework.boot.SpringApplication
import org.springframework.boot.autoconfigure.SpringBootApplication

@SpringBootApplication
class {{APPLICATION_NAME}} {

	static void main(String[] args) {
		SpringApplication.run({{APPLICATION_NAME}}, args)
	}

}
"#;

const JAVA_TEST: &str = r#"package {{PACKAGE_NAME}};

import org.junit.jupiter.api.Test;
import org.springframework.boot.test.context.SpringBootTest;

@SpringBootTest
class {{APPLICATION_NAME}}Tests {

	@Test
	void contextLoads() {
	}

}
"#;

const KOTLIN_TEST: &str = r#"package {{PACKAGE_NAME}}

import org.junit.jupiter.api.Test
import org.springframework.boot.test.context.SpringBootTest

@SpringBootTest
class {{APPLICATION_NAME}}Tests {

	@Test
	fun contextLoads() {
	}

}
"#;

const GROOVY_TEST: &str = r#"package {{PACKAGE_NAME}}

import org.junit.jupiter.api.Test
import org.springframework.boot.test.context.SpringBootTest

@SpringBootTest
class {{APPLICATION_NAME}}Tests {

	@Test
	void contextLoads() {
	}

}
"#;

const JAVA_SERVLET_INITIALIZER: &str = r#"package {{PACKAGE_NAME}};

import org.springframework.boot.builder.SpringApplicationBuilder;
import org.springframework.boot.web.servlet.support.SpringBootServletInitializer;

public class ServletInitializer extends SpringBootServletInitializer {

	@Override
	protected SpringApplicationBuilder configure(SpringApplicationBuilder application) {
		return application.sources({{APPLICATION_NAME}}.class);
	}

}
"#;

const KOTLIN_SERVLET_INITIALIZER: &str = r#"package {{PACKAGE_NAME}}

import org.springframework.boot.builder.SpringApplicationBuilder
import org.springframework.boot.web.servlet.support.SpringBootServletInitializer

class ServletInitializer : SpringBootServletInitializer() {

	override fun configure(application: SpringApplicationBuilder): SpringApplicationBuilder {
		return application.sources({{APPLICATION_NAME}}::class.java)
	}

}
"#;

const GROOVY_SERVLET_INITIALIZER: &str = r#"package {{PACKAGE_NAME}}

import org.springframework.boot.builder.SpringApplicationBuilder
import org.springframework.boot.web.servlet.support.SpringBootServletInitializer

class ServletInitializer extends SpringBootServletInitializer {

	@Override
	protected SpringApplicationBuilder configure(SpringApplicationBuilder application) {
		application.sources({{APPLICATION_NAME}})
	}

}
"#;

pub(super) fn servlet_initializer(language: Language) -> &'static str {
    match language {
        Language::Java => JAVA_SERVLET_INITIALIZER,
        Language::Kotlin => KOTLIN_SERVLET_INITIALIZER,
        Language::Groovy => GROOVY_SERVLET_INITIALIZER,
    }
}

// ── Contributors ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy)]
pub struct MainApplication;

impl Contributor for MainApplication {
    fn id(&self) -> &str {
        "main-application"
    }

    fn capability(&self) -> Capability {
        Capability::SourceFile
    }

    fn condition(&self) -> Condition {
        Condition::Always
    }

    fn contribute(&self, ctx: &mut ContributionContext) -> Result<(), ContributorError> {
        let language = ctx.description().language();
        let template = match language {
            Language::Java => JAVA_MAIN,
            Language::Kotlin => KOTLIN_MAIN,
            Language::Groovy => GROOVY_MAIN,
        };
        ctx.write_file(&source_path(language, "main", "{{APPLICATION_NAME}}"), template)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ApplicationTests;

impl Contributor for ApplicationTests {
    fn id(&self) -> &str {
        "application-tests"
    }

    fn capability(&self) -> Capability {
        Capability::SourceFile
    }

    fn condition(&self) -> Condition {
        Condition::Always
    }

    fn contribute(&self, ctx: &mut ContributionContext) -> Result<(), ContributorError> {
        let language = ctx.description().language();
        let template = match language {
            Language::Java => JAVA_TEST,
            Language::Kotlin => KOTLIN_TEST,
            Language::Groovy => GROOVY_TEST,
        };
        ctx.write_file(
            &source_path(language, "test", "{{APPLICATION_NAME}}Tests"),
            template,
        )
    }
}

//! `{{VARIABLE}}` substitution for generated file content.
//!
//! Contributors build their files from small string templates. The context
//! exposes the description's identity (coordinates, names, versions) under
//! stable placeholder names so every template reads the same variables.
//!
//! - `{{UNKNOWN}}` remains as literal `{{UNKNOWN}}`
//! - Values are inserted verbatim; a value containing `{{KEY}}` stays as written

use std::collections::BTreeMap;

use super::description::ProjectDescription;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderContext {
    variables: BTreeMap<String, String>,
}

impl RenderContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Context carrying every standard variable of `description`.
    pub fn for_description(description: &ProjectDescription) -> Self {
        let name = description.name();
        let platform = description
            .platform_version()
            .map(ToString::to_string)
            .unwrap_or_default();

        Self::new()
            .with_variable("GROUP_ID", description.group_id())
            .with_variable("ARTIFACT_ID", description.artifact_id())
            .with_variable("NAME", name)
            .with_variable("DESCRIPTION", description.description())
            .with_variable("PACKAGE_NAME", description.package_name())
            .with_variable("PACKAGE_PATH", description.package_name().replace('.', "/"))
            .with_variable("APPLICATION_NAME", description.application_name())
            .with_variable("PLATFORM_VERSION", platform)
            .with_variable("JAVA_VERSION", description.java_version())
            .with_variable("LANGUAGE", description.language().as_str())
            .with_variable("NAME_SNAKE", to_snake_case(name))
            .with_variable("NAME_KEBAB", to_kebab_case(name))
            .with_variable("NAME_PASCAL", to_pascal_case(name))
    }

    /// Add or override a variable.
    pub fn with_variable(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.variables.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.variables.get(key).map(String::as_str)
    }

    /// Substitute every known `{{KEY}}` in one left-to-right pass.
    ///
    /// Substituted values are copied as-is and never scanned again.
    pub fn render(&self, template: &str) -> String {
        let mut result = String::with_capacity(template.len());
        let mut rest = template;

        while let Some(start) = rest.find("{{") {
            result.push_str(&rest[..start]);
            let after_open = &rest[start + 2..];
            let Some(end) = after_open.find("}}") else {
                result.push_str(&rest[start..]);
                return result;
            };

            let key = &after_open[..end];
            match self.variables.get(key) {
                Some(value) => {
                    result.push_str(value);
                    rest = &after_open[end + 2..];
                }
                None => {
                    // Keep the braces and rescan from inside them, so
                    // `{{{{NAME}}` still finds the inner placeholder.
                    result.push_str("{{");
                    rest = after_open;
                }
            }
        }

        result.push_str(rest);
        result
    }
}

// ── Case helpers ─────────────────────────────────────────────────────────────

pub(crate) fn to_snake_case(s: &str) -> String {
    split_words(s).join("_")
}

pub(crate) fn to_kebab_case(s: &str) -> String {
    split_words(s).join("-")
}

/// `"my-app"` -> `"MyApp"`, `"HTTPRequest"` -> `"HttpRequest"`
pub(crate) fn to_pascal_case(s: &str) -> String {
    split_words(s)
        .into_iter()
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => {
                    let mut out = String::new();
                    out.extend(first.to_uppercase());
                    out.push_str(chars.as_str());
                    out
                }
                None => String::new(),
            }
        })
        .collect()
}

/// Split on `_`, `-`, `.`, whitespace, camelCase transitions and acronym
/// boundaries (`HTTPServer` -> `http`, `server`).
fn split_words(input: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut chars = input.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '_' || c == '-' || c == '.' || c.is_whitespace() {
            if !current.is_empty() {
                words.push(current.to_lowercase());
                current.clear();
            }
            continue;
        }

        if let Some(&next) = chars.peek() {
            if c.is_lowercase() && next.is_uppercase() {
                current.push(c);
                words.push(current.to_lowercase());
                current.clear();
                continue;
            }

            if c.is_uppercase()
                && next.is_uppercase()
                && chars.clone().nth(1).is_some_and(char::is_lowercase)
            {
                current.push(c);
                words.push(current.to_lowercase());
                current.clear();
                continue;
            }
        }

        current.push(c);
    }

    if !current.is_empty() {
        words.push(current.to_lowercase());
    }

    words
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Language, Version};

    #[test]
    fn case_conversions() {
        assert_eq!(to_snake_case("MyApp"), "my_app");
        assert_eq!(to_snake_case("XMLHttpRequest"), "xml_http_request");
        assert_eq!(to_kebab_case("my awesome_app"), "my-awesome-app");
        assert_eq!(to_pascal_case("my-app"), "MyApp");
        assert_eq!(to_pascal_case("HTTPRequest"), "HttpRequest");
        assert_eq!(to_pascal_case(""), "");
    }

    #[test]
    fn unknown_placeholders_are_left_verbatim() {
        let ctx = RenderContext::new().with_variable("NAME", "demo");
        assert_eq!(ctx.render("{{NAME}}-{{NAME}} {{OTHER}}"), "demo-demo {{OTHER}}");
    }

    #[test]
    fn substituted_values_are_not_expanded_again() {
        let ctx = RenderContext::new()
            .with_variable("DESCRIPTION", "Uses {{GROUP_ID}} and {{NAME}}")
            .with_variable("GROUP_ID", "com.example")
            .with_variable("NAME", "demo");
        assert_eq!(
            ctx.render("{{NAME}}: {{DESCRIPTION}} ({{GROUP_ID}})"),
            "demo: Uses {{GROUP_ID}} and {{NAME}} (com.example)"
        );
    }

    #[test]
    fn unterminated_and_nested_braces() {
        let ctx = RenderContext::new().with_variable("NAME", "demo");
        assert_eq!(ctx.render("{{NAME"), "{{NAME");
        assert_eq!(ctx.render("a {{ b"), "a {{ b");
        assert_eq!(ctx.render("{{{{NAME}}}}"), "{{demo}}");
        assert_eq!(ctx.render("{{}} {{NAME}}"), "{{}} demo");
    }

    #[test]
    fn description_variables() {
        let description = ProjectDescription::builder()
            .language(Language::Kotlin)
            .group_id("com.example")
            .artifact_id("demo-service")
            .name("demo service")
            .platform_version(Version::new(3, 2, 0))
            .build();
        let ctx = RenderContext::for_description(&description);

        assert_eq!(ctx.get("PACKAGE_NAME"), Some("com.example.demoservice"));
        assert_eq!(ctx.get("PACKAGE_PATH"), Some("com/example/demoservice"));
        assert_eq!(ctx.get("APPLICATION_NAME"), Some("DemoServiceApplication"));
        assert_eq!(ctx.get("NAME_KEBAB"), Some("demo-service"));
        assert_eq!(ctx.get("PLATFORM_VERSION"), Some("3.2.0"));
        assert_eq!(ctx.get("LANGUAGE"), Some("kotlin"));
    }
}

//! End-to-end tests for the `kiln` binary.

use std::fs;
use std::path::Path;

use assert_cmd::cargo;
use predicates::prelude::*;
use tempfile::TempDir;

/// `kiln` running in `dir`, isolated from the user's config and environment.
fn kiln(dir: &Path) -> assert_cmd::Command {
    let mut cmd = cargo::cargo_bin_cmd!("kiln");
    cmd.current_dir(dir)
        .env("XDG_CONFIG_HOME", dir.join("xdg"))
        .env("HOME", dir)
        .env_remove("RUST_LOG")
        .env_remove("NO_COLOR");
    cmd
}

fn write_config(dir: &Path, contents: &str) -> std::path::PathBuf {
    let path = dir.join("kiln.toml");
    fs::write(&path, contents).unwrap();
    path
}

// ── basics ────────────────────────────────────────────────────────────────────

#[test]
fn help_lists_subcommands() {
    let temp = TempDir::new().unwrap();
    kiln(temp.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("generate"))
        .stdout(predicate::str::contains("validate"))
        .stdout(predicate::str::contains("dependencies"));
}

#[test]
fn version_flag() {
    let temp = TempDir::new().unwrap();
    kiln(temp.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn unknown_language_is_a_usage_error() {
    let temp = TempDir::new().unwrap();
    kiln(temp.path())
        .args(["generate", "demo", "--lang", "scala"])
        .assert()
        .code(2);
}

#[test]
fn completions_mention_the_binary() {
    let temp = TempDir::new().unwrap();
    kiln(temp.path())
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("kiln"));
}

// ── generate ──────────────────────────────────────────────────────────────────

#[test]
fn generate_zip_into_directory() {
    let temp = TempDir::new().unwrap();
    kiln(temp.path())
        .args(["generate", "demo", "-d", "web", "--output"])
        .arg(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Generated"));

    let bytes = fs::read(temp.path().join("demo.zip")).unwrap();
    assert_eq!(&bytes[..2], b"PK");
}

#[test]
fn generate_tgz_with_default_name() {
    let temp = TempDir::new().unwrap();
    kiln(temp.path())
        .args(["generate", "shop", "--format", "tgz"])
        .assert()
        .success();

    let bytes = fs::read(temp.path().join("shop.tar.gz")).unwrap();
    assert_eq!(&bytes[..2], &[0x1f, 0x8b]);
}

#[test]
fn generate_directory() {
    let temp = TempDir::new().unwrap();
    let out = temp.path().join("out");
    kiln(temp.path())
        .args(["generate", "demo", "--build", "gradle", "--format", "dir", "--output"])
        .arg(&out)
        .assert()
        .success();

    assert!(out.join("build.gradle").is_file());
    assert!(out.join("gradlew").is_file());
    assert!(
        out.join("src/main/java/com/example/demo/DemoApplication.java")
            .is_file()
    );
    assert!(!out.join("pom.xml").exists());
}

#[test]
fn generate_directory_honours_base_dir() {
    let temp = TempDir::new().unwrap();
    let out = temp.path().join("out");
    fs::create_dir_all(out.join("other")).unwrap();

    kiln(temp.path())
        .args(["generate", "shop", "--format", "dir", "--base-dir", "apps/shop", "--output"])
        .arg(&out)
        .assert()
        .success();
    assert!(out.join("apps/shop/pom.xml").is_file());
    assert!(!out.join("pom.xml").exists());

    kiln(temp.path())
        .args(["generate", "cart", "--format", "dir", "--base-dir", "apps/cart"])
        .assert()
        .success();
    assert!(temp.path().join("apps/cart/mvnw").is_file());
}

#[test]
fn generate_refuses_to_overwrite_without_force() {
    let temp = TempDir::new().unwrap();
    let target = temp.path().join("demo.zip");
    fs::write(&target, b"keep me").unwrap();

    kiln(temp.path())
        .args(["generate", "demo"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("already exists"))
        .stderr(predicate::str::contains("--force"));
    assert_eq!(fs::read(&target).unwrap(), b"keep me");

    kiln(temp.path())
        .args(["generate", "demo", "--force"])
        .assert()
        .success();
    assert_ne!(fs::read(&target).unwrap(), b"keep me");
}

#[test]
fn generate_rejects_unknown_dependency_before_writing() {
    let temp = TempDir::new().unwrap();
    kiln(temp.path())
        .args(["generate", "demo", "-d", "web,warp-drive"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("unknown dependency 'warp-drive'"));
    assert!(!temp.path().join("demo.zip").exists());
}

#[test]
fn generate_with_zero_timeout_fails() {
    let temp = TempDir::new().unwrap();
    kiln(temp.path())
        .args(["generate", "demo", "--timeout-ms", "0"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Deadline exceeded"));
    assert!(!temp.path().join("demo.zip").exists());
}

#[test]
fn generate_json_summary() {
    let temp = TempDir::new().unwrap();
    let output = kiln(temp.path())
        .args(["--output-format", "json", "generate", "demo"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let summary: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(summary["format"], "zip");
    assert_eq!(summary["content_type"], "application/zip");
    assert!(
        summary["contributors"]
            .as_array()
            .unwrap()
            .iter()
            .any(|c| c == "maven-build")
    );
}

// ── validate / plan ───────────────────────────────────────────────────────────

#[test]
fn validate_accepts_a_good_description() {
    let temp = TempDir::new().unwrap();
    kiln(temp.path())
        .args(["validate", "demo", "-d", "web,lombok"])
        .assert()
        .success()
        .stdout(predicate::str::contains("com.example:demo (java / maven / jar) is valid"));
}

#[test]
fn validate_lists_every_problem() {
    let temp = TempDir::new().unwrap();
    kiln(temp.path())
        .args([
            "validate",
            "demo",
            "--platform-version",
            "2.6.0",
            "-d",
            "graphql,warp-drive",
        ])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("2 problems"))
        .stderr(predicate::str::contains(
            "dependency 'graphql' requires platform version 2.7.0, got 2.6.0",
        ))
        .stderr(predicate::str::contains("unknown dependency 'warp-drive'"));
}

#[test]
fn malformed_platform_version_is_a_user_error() {
    let temp = TempDir::new().unwrap();
    kiln(temp.path())
        .args(["validate", "demo", "--platform-version", "three"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("--platform-version 'three'"));
}

#[test]
fn plan_prints_contributors_in_order() {
    let temp = TempDir::new().unwrap();
    let output = kiln(temp.path())
        .args(["--output-format", "json", "plan", "demo", "-d", "web,lombok"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let plan: Vec<String> = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(
        plan,
        [
            "jar-packaging",
            "requested-dependencies",
            "test-starter",
            "annotation-processing",
            "maven-build",
            "maven-wrapper",
            "main-application",
            "application-tests",
            "application-properties",
            "web-resources",
            "gitignore",
            "help-document",
        ]
    );
}

#[test]
fn plan_follows_build_system() {
    let temp = TempDir::new().unwrap();
    kiln(temp.path())
        .args(["plan", "demo", "--build", "gradle", "--lang", "kotlin"])
        .assert()
        .success()
        .stdout(predicate::str::contains("gradle-build"))
        .stdout(predicate::str::contains("kotlin-support"))
        .stdout(predicate::str::contains("maven-build").not());
}

// ── dependencies ──────────────────────────────────────────────────────────────

#[test]
fn dependencies_filter_by_facet() {
    let temp = TempDir::new().unwrap();
    kiln(temp.path())
        .args(["--output-format", "plain", "dependencies", "--facet", "web"])
        .assert()
        .success()
        .stdout(predicate::str::contains("webflux"))
        .stdout(predicate::str::contains("lombok").not());
}

// ── configuration ─────────────────────────────────────────────────────────────

#[test]
fn config_file_supplies_defaults() {
    let temp = TempDir::new().unwrap();
    let config = write_config(
        temp.path(),
        "[defaults]\ngroup_id = \"org.acme\"\npackaging = \"war\"\n",
    );
    kiln(temp.path())
        .arg("--config")
        .arg(&config)
        .args(["validate", "shop"])
        .assert()
        .success()
        .stdout(predicate::str::contains("org.acme:shop (java / maven / war)"));
}

#[test]
fn flags_override_config_file() {
    let temp = TempDir::new().unwrap();
    let config = write_config(temp.path(), "[defaults]\ngroup_id = \"org.acme\"\n");
    kiln(temp.path())
        .arg("--config")
        .arg(&config)
        .args(["validate", "shop", "--group", "io.other"])
        .assert()
        .success()
        .stdout(predicate::str::contains("io.other:shop"));
}

#[test]
fn environment_overrides_defaults() {
    let temp = TempDir::new().unwrap();
    kiln(temp.path())
        .env("KILN_DEFAULTS__BUILD_SYSTEM", "gradle")
        .args(["plan", "demo"])
        .assert()
        .success()
        .stdout(predicate::str::contains("gradle-build"));
}

#[test]
fn invalid_config_exits_with_configuration_code() {
    let temp = TempDir::new().unwrap();
    let config = write_config(temp.path(), "[defaults]\nlanguage = \"cobol\"\n");
    kiln(temp.path())
        .arg("--config")
        .arg(&config)
        .arg("dependencies")
        .assert()
        .code(4)
        .stderr(predicate::str::contains("Configuration error"));
}

#[test]
fn missing_config_file_exits_with_configuration_code() {
    let temp = TempDir::new().unwrap();
    kiln(temp.path())
        .args(["--config", "absent.toml", "dependencies"])
        .assert()
        .code(4);
}

#[test]
fn catalog_file_extends_builtin_dependencies() {
    let temp = TempDir::new().unwrap();
    fs::write(
        temp.path().join("catalog.toml"),
        "[[dependencies]]\n\
         id = \"acme-audit\"\n\
         group_id = \"com.acme\"\n\
         artifact_id = \"acme-audit-starter\"\n\
         version = \"1.4.0\"\n\
         description = \"Audit trail\"\n",
    )
    .unwrap();
    let config = write_config(
        temp.path(),
        &format!(
            "[catalog]\npath = \"{}\"\n",
            temp.path().join("catalog.toml").display()
        ),
    );

    kiln(temp.path())
        .arg("--config")
        .arg(&config)
        .args(["--output-format", "plain", "dependencies"])
        .assert()
        .success()
        .stdout(predicate::str::contains("acme-audit"))
        .stdout(predicate::str::contains("web"));

    let out = temp.path().join("out");
    kiln(temp.path())
        .arg("--config")
        .arg(&config)
        .args(["generate", "demo", "-d", "acme-audit", "--format", "dir", "--output"])
        .arg(&out)
        .assert()
        .success();
    let pom = fs::read_to_string(out.join("pom.xml")).unwrap();
    assert!(pom.contains("<artifactId>acme-audit-starter</artifactId>"));
    assert!(pom.contains("<version>1.4.0</version>"));
}

#[test]
fn duplicate_catalog_entry_is_a_configuration_error() {
    let temp = TempDir::new().unwrap();
    fs::write(
        temp.path().join("catalog.toml"),
        "[[dependencies]]\nid = \"web\"\ngroup_id = \"g\"\nartifact_id = \"a\"\n",
    )
    .unwrap();
    let config = write_config(
        temp.path(),
        &format!(
            "[catalog]\npath = \"{}\"\n",
            temp.path().join("catalog.toml").display()
        ),
    );
    kiln(temp.path())
        .arg("--config")
        .arg(&config)
        .arg("dependencies")
        .assert()
        .code(4)
        .stderr(predicate::str::contains("duplicate catalog entry 'web'"));
}

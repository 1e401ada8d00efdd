//! Build tool wrapper scripts.
//!
//! The scripts fetch the distribution named in the wrapper properties on
//! first use, so no binary wrapper jar is shipped.

use kiln_core::{
    application::{Capability, Condition, ContributionContext, Contributor, ContributorError},
    domain::BuildSystem,
};

const MAVEN_VERSION: &str = "3.9.9";
const GRADLE_VERSION: &str = "8.10.2";

const MVNW: &str = r#"#!/bin/sh
# Maven wrapper: downloads the distribution named in
# .mvn/wrapper/maven-wrapper.properties and runs it.
set -e

BASEDIR=$(cd "$(dirname "$0")" && pwd)
URL=$(sed -n 's/^distributionUrl=//p' "$BASEDIR/.mvn/wrapper/maven-wrapper.properties")
NAME=$(basename "$URL" -bin.zip)
DIST="${MAVEN_USER_HOME:-$HOME/.m2}/wrapper/dists/$NAME"

if [ ! -x "$DIST/bin/mvn" ]; then
  TMP=$(mktemp -d)
  trap 'rm -rf "$TMP"' EXIT
  curl -fsSL -o "$TMP/dist.zip" "$URL"
  unzip -q "$TMP/dist.zip" -d "$TMP"
  mkdir -p "$DIST"
  cp -R "$TMP/$NAME"/. "$DIST"
fi

exec "$DIST/bin/mvn" "$@"
"#;

const MVNW_CMD: &str = r#"@REM Maven wrapper: downloads the distribution named in
@REM .mvn\wrapper\maven-wrapper.properties and runs it.
@echo off
setlocal
set "BASEDIR=%~dp0"
for /f "tokens=1,* delims==" %%a in ('type "%BASEDIR%.mvn\wrapper\maven-wrapper.properties"') do (
  if "%%a"=="distributionUrl" set "URL=%%b"
)
for %%f in ("%URL%") do set "NAME=%%~nf"
set "NAME=%NAME:-bin=%"
set "DIST=%USERPROFILE%\.m2\wrapper\dists\%NAME%"
if not exist "%DIST%\bin\mvn.cmd" (
  powershell -NoProfile -Command "$z = Join-Path $env:TEMP 'mvnw.zip'; Invoke-WebRequest -Uri '%URL%' -OutFile $z; Expand-Archive $z -DestinationPath '%DIST%\..' -Force; Move-Item '%DIST%\..\%NAME%\*' '%DIST%'"
)
"%DIST%\bin\mvn.cmd" %*
"#;

const GRADLEW: &str = r#"#!/bin/sh
# Gradle wrapper: downloads the distribution named in
# gradle/wrapper/gradle-wrapper.properties and runs it.
set -e

BASEDIR=$(cd "$(dirname "$0")" && pwd)
URL=$(sed -n 's/^distributionUrl=//p' "$BASEDIR/gradle/wrapper/gradle-wrapper.properties" | sed 's/\\:/:/g')
NAME=$(basename "$URL" -bin.zip)
DIST="${GRADLE_USER_HOME:-$HOME/.gradle}/wrapper/dists/$NAME"

if [ ! -x "$DIST/bin/gradle" ]; then
  TMP=$(mktemp -d)
  trap 'rm -rf "$TMP"' EXIT
  curl -fsSL -o "$TMP/dist.zip" "$URL"
  unzip -q "$TMP/dist.zip" -d "$TMP"
  mkdir -p "$DIST"
  cp -R "$TMP/$NAME"/. "$DIST"
fi

cd "$BASEDIR"
exec "$DIST/bin/gradle" "$@"
"#;

const GRADLEW_BAT: &str = r#"@REM Gradle wrapper: downloads the distribution named in
@REM gradle\wrapper\gradle-wrapper.properties and runs it.
@echo off
setlocal
set "BASEDIR=%~dp0"
for /f "tokens=1,* delims==" %%a in ('type "%BASEDIR%gradle\wrapper\gradle-wrapper.properties"') do (
  if "%%a"=="distributionUrl" set "URL=%%b"
)
set "URL=%URL:\:=:%"
for %%f in ("%URL%") do set "NAME=%%~nf"
set "NAME=%NAME:-bin=%"
set "DIST=%USERPROFILE%\.gradle\wrapper\dists\%NAME%"
if not exist "%DIST%\bin\gradle.bat" (
  powershell -NoProfile -Command "$z = Join-Path $env:TEMP 'gradlew.zip'; Invoke-WebRequest -Uri '%URL%' -OutFile $z; Expand-Archive $z -DestinationPath '%DIST%\..' -Force; Move-Item '%DIST%\..\%NAME%\*' '%DIST%'"
)
cd /d "%BASEDIR%"
"%DIST%\bin\gradle.bat" %*
"#;

#[derive(Debug, Clone, Copy)]
pub struct MavenWrapper;

impl Contributor for MavenWrapper {
    fn id(&self) -> &str {
        "maven-wrapper"
    }

    fn capability(&self) -> Capability {
        Capability::BuildFile
    }

    fn condition(&self) -> Condition {
        Condition::BuildSystem(BuildSystem::Maven)
    }

    fn contribute(&self, ctx: &mut ContributionContext) -> Result<(), ContributorError> {
        ctx.write_executable("mvnw", MVNW)?;
        ctx.write_file("mvnw.cmd", MVNW_CMD)?;
        ctx.write_file(
            ".mvn/wrapper/maven-wrapper.properties",
            &format!(
                "distributionUrl=https://repo.maven.apache.org/maven2/org/apache/maven/apache-maven/\
                 {MAVEN_VERSION}/apache-maven-{MAVEN_VERSION}-bin.zip\n"
            ),
        )
    }
}

#[derive(Debug, Clone, Copy)]
pub struct GradleWrapper;

impl Contributor for GradleWrapper {
    fn id(&self) -> &str {
        "gradle-wrapper"
    }

    fn capability(&self) -> Capability {
        Capability::BuildFile
    }

    fn condition(&self) -> Condition {
        Condition::BuildSystem(BuildSystem::Gradle)
    }

    fn contribute(&self, ctx: &mut ContributionContext) -> Result<(), ContributorError> {
        ctx.write_executable("gradlew", GRADLEW)?;
        ctx.write_file("gradlew.bat", GRADLEW_BAT)?;
        ctx.write_file(
            "gradle/wrapper/gradle-wrapper.properties",
            &format!(
                "distributionBase=GRADLE_USER_HOME\n\
                 distributionPath=wrapper/dists\n\
                 distributionUrl=https\\://services.gradle.org/distributions/gradle-{GRADLE_VERSION}-bin.zip\n\
                 networkTimeout=10000\n\
                 validateDistributionUrl=true\n\
                 zipStoreBase=GRADLE_USER_HOME\n\
                 zipStorePath=wrapper/dists\n"
            ),
        )
    }
}

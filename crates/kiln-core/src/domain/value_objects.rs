//! Domain value objects: Language, BuildSystem, Packaging, ArchiveFormat.
//!
//! # Design
//!
//! These are pure value types with equality-by-value and no identity. They
//! hold no activation logic; conditions over them live in
//! `application::condition`. This file defines the types, their string
//! representations and their `FromStr` parsers.

use crate::domain::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ── Language ─────────────────────────────────────────────────────────────────

/// A JVM language a project can be generated in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Java,
    Kotlin,
    Groovy,
}

impl Language {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Java => "java",
            Self::Kotlin => "kotlin",
            Self::Groovy => "groovy",
        }
    }

    /// File extension of source files, without the dot.
    pub const fn source_extension(&self) -> &'static str {
        match self {
            Self::Java => "java",
            Self::Kotlin => "kt",
            Self::Groovy => "groovy",
        }
    }

    /// Name of the source set directory (`src/main/<dir>`).
    pub const fn source_dir(&self) -> &'static str {
        self.as_str()
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Language {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "java" => Ok(Self::Java),
            "kotlin" | "kt" => Ok(Self::Kotlin),
            "groovy" => Ok(Self::Groovy),
            other => Err(DomainError::InvalidDescription {
                violations: vec![format!("unknown language: {other}")],
            }),
        }
    }
}

// ── BuildSystem ──────────────────────────────────────────────────────────────

/// The build tool the generated project is driven by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BuildSystem {
    Maven,
    Gradle,
}

impl BuildSystem {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Maven => "maven",
            Self::Gradle => "gradle",
        }
    }
}

impl fmt::Display for BuildSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BuildSystem {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "maven" | "mvn" => Ok(Self::Maven),
            "gradle" => Ok(Self::Gradle),
            other => Err(DomainError::InvalidDescription {
                violations: vec![format!("unknown build system: {other}")],
            }),
        }
    }
}

// ── Packaging ────────────────────────────────────────────────────────────────

/// The artifact shape requested for the project.
///
/// Unknown identifiers are kept as [`Packaging::Other`] rather than rejected:
/// whether anything handles them is decided by contributor conditions, and
/// "nothing handles it" is a valid outcome.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Packaging {
    Jar,
    War,
    Other(String),
}

impl Packaging {
    pub fn id(&self) -> &str {
        match self {
            Self::Jar => "jar",
            Self::War => "war",
            Self::Other(id) => id,
        }
    }
}

impl fmt::Display for Packaging {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Packaging {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let id = s.trim().to_ascii_lowercase();
        match id.as_str() {
            "" => Err(DomainError::InvalidDescription {
                violations: vec!["packaging identifier cannot be empty".into()],
            }),
            "jar" => Ok(Self::Jar),
            "war" => Ok(Self::War),
            _ => Ok(Self::Other(id)),
        }
    }
}

impl TryFrom<String> for Packaging {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Packaging> for String {
    fn from(value: Packaging) -> Self {
        value.id().to_string()
    }
}

// ── ArchiveFormat ────────────────────────────────────────────────────────────

/// Container format of the generated archive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArchiveFormat {
    Zip,
    #[serde(rename = "tgz")]
    TarGz,
}

impl ArchiveFormat {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Zip => "zip",
            Self::TarGz => "tgz",
        }
    }

    pub const fn content_type(&self) -> &'static str {
        match self {
            Self::Zip => "application/zip",
            Self::TarGz => "application/x-compress",
        }
    }

    pub const fn extension(&self) -> &'static str {
        match self {
            Self::Zip => "zip",
            Self::TarGz => "tar.gz",
        }
    }
}

impl fmt::Display for ArchiveFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ArchiveFormat {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "zip" => Ok(Self::Zip),
            "tgz" | "tar.gz" | "targz" => Ok(Self::TarGz),
            other => Err(DomainError::UnsupportedFormat {
                format: other.to_string(),
            }),
        }
    }
}

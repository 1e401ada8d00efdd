use std::fmt;
use std::path::Path;

use crate::domain::error::DomainError;

/// A `/`-separated path guaranteed to be relative and to stay inside the
/// project root.
///
/// Invariant: never absolute, never empty, no `..` segment. `.` segments,
/// empty segments and backslashes are normalised away at construction, so
/// two paths that address the same entry compare equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RelativePath(String);

impl RelativePath {
    pub fn new(path: impl AsRef<str>) -> Result<Self, DomainError> {
        let raw = path.as_ref();
        let unified = raw.replace('\\', "/");

        if unified.starts_with('/') || has_drive_prefix(&unified) {
            return Err(DomainError::invalid_path(raw, "path must be relative"));
        }

        let mut segments = Vec::new();
        for segment in unified.split('/') {
            match segment {
                "" | "." => {}
                ".." => {
                    return Err(DomainError::invalid_path(
                        raw,
                        "path must not escape the project root",
                    ));
                }
                other => segments.push(other),
            }
        }

        if segments.is_empty() {
            return Err(DomainError::invalid_path(raw, "path cannot be empty"));
        }

        Ok(Self(segments.join("/")))
    }

    /// Join a segment, keeping the relative invariant.
    pub fn join(&self, segment: impl AsRef<str>) -> Result<Self, DomainError> {
        let segment = segment.as_ref();
        if segment.starts_with('/') {
            return Err(DomainError::invalid_path(segment, "path must be relative"));
        }
        Self::new(format!("{}/{}", self.0, segment))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn as_path(&self) -> &Path {
        Path::new(&self.0)
    }

    /// Parent directory, `None` for top-level entries.
    pub fn parent(&self) -> Option<Self> {
        self.0
            .rsplit_once('/')
            .map(|(parent, _)| Self(parent.to_string()))
    }

    /// Every ancestor directory, outermost first.
    pub fn ancestors(&self) -> Vec<Self> {
        let mut out = Vec::new();
        let mut current = self.parent();
        while let Some(dir) = current {
            current = dir.parent();
            out.push(dir);
        }
        out.reverse();
        out
    }

    pub fn file_name(&self) -> &str {
        self.0.rsplit('/').next().unwrap_or(&self.0)
    }
}

fn has_drive_prefix(path: &str) -> bool {
    let bytes = path.as_bytes();
    bytes.len() >= 2 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':'
}

impl AsRef<Path> for RelativePath {
    fn as_ref(&self) -> &Path {
        self.as_path()
    }
}

impl TryFrom<&str> for RelativePath {
    type Error = DomainError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl TryFrom<String> for RelativePath {
    type Error = DomainError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl fmt::Display for RelativePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Capability-based permissions model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Permissions {
    readable: bool,
    writable: bool,
    executable: bool,
}

impl Permissions {
    pub const fn read_write() -> Self {
        Self {
            readable: true,
            writable: true,
            executable: false,
        }
    }

    pub const fn executable() -> Self {
        Self {
            readable: true,
            writable: true,
            executable: true,
        }
    }

    pub const fn readable(&self) -> bool {
        self.readable
    }
    pub const fn writable(&self) -> bool {
        self.writable
    }
    pub const fn executable_flag(&self) -> bool {
        self.executable
    }

    /// Unix mode for a file carrying these permissions.
    pub const fn file_mode(&self) -> FileMode {
        if self.executable {
            FileMode::EXECUTABLE
        } else {
            FileMode::REGULAR
        }
    }
}

impl Default for Permissions {
    fn default() -> Self {
        Self::read_write()
    }
}

/// Unix permission bits written into archive headers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FileMode(u32);

impl FileMode {
    pub const REGULAR: Self = Self(0o644);
    pub const EXECUTABLE: Self = Self(0o755);
    pub const DIRECTORY: Self = Self(0o755);

    pub const fn bits(&self) -> u32 {
        self.0
    }

    pub const fn is_executable(&self) -> bool {
        self.0 & 0o111 != 0
    }
}

impl Default for FileMode {
    fn default() -> Self {
        Self::REGULAR
    }
}

impl fmt::Display for FileMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:o}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalises_separators_and_dots() {
        let path = RelativePath::new("./src\\main//java/./App.java").unwrap();
        assert_eq!(path.as_str(), "src/main/java/App.java");
        assert_eq!(path, RelativePath::new("src/main/java/App.java").unwrap());
    }

    #[test]
    fn rejects_escaping_paths() {
        for bad in ["/etc/passwd", "C:/Windows", "../outside", "a/../../b", "", "./", "//"] {
            assert!(
                matches!(RelativePath::new(bad), Err(DomainError::InvalidPath { .. })),
                "{bad} should be rejected"
            );
        }
    }

    #[test]
    fn ancestors_outermost_first() {
        let path = RelativePath::new("src/main/resources/static").unwrap();
        let ancestors: Vec<String> = path.ancestors().iter().map(ToString::to_string).collect();
        assert_eq!(ancestors, vec!["src", "src/main", "src/main/resources"]);
        assert_eq!(path.file_name(), "static");
        assert!(RelativePath::new("pom.xml").unwrap().parent().is_none());
    }

    #[test]
    fn join_keeps_invariant() {
        let base = RelativePath::new("src/main").unwrap();
        assert_eq!(base.join("java").unwrap().as_str(), "src/main/java");
        assert!(base.join("/abs").is_err());
        assert!(base.join("../../..").is_err());
    }

    #[test]
    fn permissions_map_to_modes() {
        assert_eq!(Permissions::default().file_mode(), FileMode::REGULAR);
        assert_eq!(Permissions::executable().file_mode().bits(), 0o755);
        assert!(FileMode::EXECUTABLE.is_executable());
        assert!(!FileMode::REGULAR.is_executable());
        assert_eq!(FileMode::REGULAR.to_string(), "644");
    }
}

use std::collections::{BTreeMap, BTreeSet, HashMap};

use super::common::{FileMode, Permissions, RelativePath};
use crate::domain::error::DomainError;

/// The in-progress file tree of one generation run.
///
/// Files keep insertion order; every read used for packaging goes through
/// the sorted views so the result does not depend on contributor order.
#[derive(Debug, Clone, Default)]
pub struct ProjectTree {
    files: Vec<ArchiveEntry>,
    index: HashMap<RelativePath, usize>,
    directories: BTreeSet<RelativePath>,
}

impl ProjectTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a new file. Fails if a file already exists at the normalised path.
    pub fn add_file(
        &mut self,
        path: impl AsRef<str>,
        content: impl Into<Vec<u8>>,
        permissions: Permissions,
    ) -> Result<(), DomainError> {
        let path = RelativePath::new(path)?;
        if self.index.contains_key(&path) {
            return Err(DomainError::DuplicateEntry {
                path: path.to_string(),
            });
        }
        self.index.insert(path.clone(), self.files.len());
        self.files
            .push(ArchiveEntry::file(path, content.into(), permissions.file_mode()));
        Ok(())
    }

    /// Overwrite (or create) a file, returning the previous content if any.
    pub fn replace_file(
        &mut self,
        path: impl AsRef<str>,
        content: impl Into<Vec<u8>>,
        permissions: Permissions,
    ) -> Result<Option<Vec<u8>>, DomainError> {
        let path = RelativePath::new(path)?;
        let entry = ArchiveEntry::file(path.clone(), content.into(), permissions.file_mode());
        match self.index.get(&path) {
            Some(&slot) => Ok(Some(std::mem::replace(&mut self.files[slot], entry).content)),
            None => {
                self.index.insert(path, self.files.len());
                self.files.push(entry);
                Ok(None)
            }
        }
    }

    /// Record an (possibly empty) directory. Adding it twice is a no-op.
    pub fn add_directory(&mut self, path: impl AsRef<str>) -> Result<(), DomainError> {
        self.directories.insert(RelativePath::new(path)?);
        Ok(())
    }

    pub fn get(&self, path: &str) -> Option<&ArchiveEntry> {
        let path = RelativePath::new(path).ok()?;
        self.index.get(&path).map(|&slot| &self.files[slot])
    }

    /// UTF-8 content of a file, `None` if missing or binary.
    pub fn text(&self, path: &str) -> Option<&str> {
        self.get(path)
            .and_then(|entry| std::str::from_utf8(&entry.content).ok())
    }

    pub fn contains(&self, path: &str) -> bool {
        self.get(path).is_some()
    }

    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty() && self.directories.is_empty()
    }

    /// Files in insertion order.
    pub fn files(&self) -> impl Iterator<Item = &ArchiveEntry> {
        self.files.iter()
    }

    /// Files in lexicographic path order.
    pub fn sorted_entries(&self) -> Vec<&ArchiveEntry> {
        let mut entries: Vec<&ArchiveEntry> = self.files.iter().collect();
        entries.sort_by(|a, b| a.path.cmp(&b.path));
        entries
    }

    /// Explicit directories plus every parent implied by a file, sorted.
    pub fn directories(&self) -> Vec<RelativePath> {
        let mut all = self.directories.clone();
        for path in self.files.iter().map(|f| &f.path).chain(self.directories.iter()) {
            all.extend(path.ancestors());
        }
        all.into_iter().collect()
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if self.is_empty() {
            return Err(DomainError::EmptyProject);
        }
        archive_layout(&self.to_entries(None)?).map(|_| ())
    }

    /// Flatten into archive entries (files and explicit directories), nested
    /// under `base` when given.
    pub fn to_entries(&self, base: Option<&RelativePath>) -> Result<Vec<ArchiveEntry>, DomainError> {
        let nest = |path: &RelativePath| match base {
            Some(base) => base.join(path.as_str()),
            None => Ok(path.clone()),
        };

        let mut out = Vec::with_capacity(self.files.len() + self.directories.len() + 1);
        if let Some(base) = base {
            out.push(ArchiveEntry::directory(base.clone()));
        }
        for dir in &self.directories {
            out.push(ArchiveEntry::directory(nest(dir)?));
        }
        for file in &self.files {
            out.push(ArchiveEntry::file(nest(&file.path)?, file.content.clone(), file.mode));
        }
        Ok(out)
    }
}

// ── Archive entries ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Directory,
}

/// One entry of a packaged project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveEntry {
    pub path: RelativePath,
    pub kind: EntryKind,
    pub content: Vec<u8>,
    pub mode: FileMode,
}

impl ArchiveEntry {
    pub fn file(path: RelativePath, content: Vec<u8>, mode: FileMode) -> Self {
        Self {
            path,
            kind: EntryKind::File,
            content,
            mode,
        }
    }

    pub fn directory(path: RelativePath) -> Self {
        Self {
            path,
            kind: EntryKind::Directory,
            content: Vec::new(),
            mode: FileMode::DIRECTORY,
        }
    }

    pub fn is_dir(&self) -> bool {
        self.kind == EntryKind::Directory
    }
}

/// The exact entry sequence an archive is written from.
///
/// Directories are merged (explicit or implied by a file), entries are sorted
/// by path, and a path used twice by files, or by a file and a directory, is
/// rejected before anything is produced.
pub fn archive_layout(entries: &[ArchiveEntry]) -> Result<Vec<ArchiveEntry>, DomainError> {
    let mut files: BTreeMap<&RelativePath, &ArchiveEntry> = BTreeMap::new();
    let mut directories: BTreeSet<RelativePath> = BTreeSet::new();

    for entry in entries {
        match entry.kind {
            EntryKind::File => {
                if files.insert(&entry.path, entry).is_some() {
                    return Err(DomainError::DuplicateEntry {
                        path: entry.path.to_string(),
                    });
                }
                directories.extend(entry.path.ancestors());
            }
            EntryKind::Directory => {
                directories.extend(entry.path.ancestors());
                directories.insert(entry.path.clone());
            }
        }
    }

    if let Some(clash) = files.keys().find(|path| directories.contains(**path)) {
        return Err(DomainError::DuplicateEntry {
            path: clash.to_string(),
        });
    }

    let mut layout: Vec<ArchiveEntry> = directories
        .into_iter()
        .map(ArchiveEntry::directory)
        .chain(files.into_values().cloned())
        .collect();
    layout.sort_by(|a, b| a.path.cmp(&b.path));
    Ok(layout)
}

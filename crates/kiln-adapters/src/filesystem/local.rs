//! Writes a generated project as plain files using `std::fs`.

use std::fs;
use std::io;
use std::path::Path;

use kiln_core::{
    application::ApplicationError,
    domain::{ArchiveEntry, EntryKind, archive_layout},
    error::KilnResult,
};
use tracing::{debug, instrument};

/// Output adapter for the `dir` format.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFilesystem;

impl LocalFilesystem {
    pub fn new() -> Self {
        Self
    }

    /// Write `entries` below `root` and return the number of files written.
    ///
    /// `root` must be missing or empty; nothing is ever overwritten. The
    /// layout is checked before the first write, so a duplicate entry
    /// leaves the disk untouched.
    #[instrument(skip_all, fields(root = %root.display()))]
    pub fn write_project(&self, root: &Path, entries: &[ArchiveEntry]) -> KilnResult<usize> {
        let layout = archive_layout(entries)?;

        if root.exists() {
            let mut contents = fs::read_dir(root).map_err(|e| map_io_error(root, e, "read directory"))?;
            if contents.next().is_some() {
                return Err(ApplicationError::OutputFailed {
                    path: root.to_path_buf(),
                    reason: "directory is not empty".to_string(),
                }
                .into());
            }
        }
        fs::create_dir_all(root).map_err(|e| map_io_error(root, e, "create directory"))?;

        let mut written = 0;
        for entry in &layout {
            let path = root.join(entry.path.as_path());
            match entry.kind {
                EntryKind::Directory => {
                    fs::create_dir_all(&path).map_err(|e| map_io_error(&path, e, "create directory"))?;
                }
                EntryKind::File => {
                    fs::write(&path, &entry.content).map_err(|e| map_io_error(&path, e, "write file"))?;
                    if entry.mode.is_executable() {
                        set_executable(&path)?;
                    }
                    written += 1;
                }
            }
        }

        debug!(files = written, "project written");
        Ok(written)
    }
}

#[cfg(unix)]
fn set_executable(path: &Path) -> KilnResult<()> {
    use std::os::unix::fs::PermissionsExt;

    let mut perms = fs::metadata(path)
        .map_err(|e| map_io_error(path, e, "get metadata"))?
        .permissions();
    perms.set_mode(perms.mode() | 0o111);
    fs::set_permissions(path, perms).map_err(|e| map_io_error(path, e, "set permissions"))?;
    Ok(())
}

#[cfg(not(unix))]
fn set_executable(_path: &Path) -> KilnResult<()> {
    Ok(())
}

fn map_io_error(path: &Path, e: io::Error, operation: &str) -> ApplicationError {
    ApplicationError::OutputFailed {
        path: path.to_path_buf(),
        reason: format!("failed to {operation}: {e}"),
    }
}

#[cfg(test)]
mod tests {
    use kiln_core::domain::{FileMode, RelativePath};
    use kiln_core::error::ErrorKind;
    use tempfile::TempDir;

    use super::*;

    fn file(path: &str, mode: FileMode) -> ArchiveEntry {
        ArchiveEntry::file(RelativePath::new(path).unwrap(), path.as_bytes().to_vec(), mode)
    }

    #[test]
    fn writes_files_and_parents() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("demo");
        let entries = [
            file("src/main/App.java", FileMode::REGULAR),
            file("mvnw", FileMode::EXECUTABLE),
        ];

        let written = LocalFilesystem.write_project(&root, &entries).unwrap();
        assert_eq!(written, 2);
        assert_eq!(
            fs::read_to_string(root.join("src/main/App.java")).unwrap(),
            "src/main/App.java"
        );

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mode = fs::metadata(root.join("mvnw")).unwrap().permissions().mode();
            assert_eq!(mode & 0o111, 0o111);
        }
    }

    #[test]
    fn refuses_non_empty_directory() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("keep.txt"), "x").unwrap();

        let err = LocalFilesystem
            .write_project(temp.path(), &[file("a.txt", FileMode::REGULAR)])
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::OutputFailed);
        assert!(!temp.path().join("a.txt").exists());
    }

    #[test]
    fn duplicates_leave_disk_untouched() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("out");
        let entries = [file("a.txt", FileMode::REGULAR), file("a.txt", FileMode::REGULAR)];

        let err = LocalFilesystem.write_project(&root, &entries).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DuplicateEntry);
        assert!(!root.exists());
    }
}

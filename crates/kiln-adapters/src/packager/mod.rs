//! Archive packagers.
//!
//! Every format goes through [`archive_layout`] first: entries come out
//! sorted, implied parent directories are present and duplicates are
//! rejected before a single byte is written. Timestamps and ownership are
//! fixed, so the same tree always packs to the same bytes.

mod tar_archive;
mod zip_archive;

use kiln_core::{
    application::{ApplicationError, ports::ProjectPackager},
    domain::{ArchiveEntry, ArchiveFormat, archive_layout},
    error::KilnResult,
};
use tracing::{debug, instrument};

/// Packager for every [`ArchiveFormat`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ArchivePackager;

impl ArchivePackager {
    pub fn new() -> Self {
        Self
    }
}

impl ProjectPackager for ArchivePackager {
    #[instrument(skip_all, fields(format = %format, entries = entries.len()))]
    fn package(&self, entries: &[ArchiveEntry], format: ArchiveFormat) -> KilnResult<Vec<u8>> {
        let layout = archive_layout(entries)?;

        let bytes = match format {
            ArchiveFormat::Zip => zip_archive::write(&layout).map_err(|e| failed(format, e))?,
            ArchiveFormat::TarGz => tar_archive::write(&layout).map_err(|e| failed(format, e))?,
        };

        debug!(bytes = bytes.len(), "archive written");
        Ok(bytes)
    }
}

fn failed(format: ArchiveFormat, err: impl std::fmt::Display) -> ApplicationError {
    ApplicationError::PackagingFailed {
        format,
        reason: err.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use kiln_core::domain::{FileMode, RelativePath};
    use kiln_core::error::ErrorKind;

    use super::*;

    fn file(path: &str, content: &str) -> ArchiveEntry {
        ArchiveEntry::file(
            RelativePath::new(path).unwrap(),
            content.as_bytes().to_vec(),
            FileMode::REGULAR,
        )
    }

    #[test]
    fn duplicate_entries_emit_nothing() {
        let entries = [file("a/b.txt", "1"), file("a/b.txt", "2")];
        for format in [ArchiveFormat::Zip, ArchiveFormat::TarGz] {
            let err = ArchivePackager.package(&entries, format).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::DuplicateEntry);
        }
    }

    #[test]
    fn both_formats_are_deterministic() {
        let entries = [file("b.txt", "b"), file("a/x.txt", "x")];
        let reversed = [file("a/x.txt", "x"), file("b.txt", "b")];
        for format in [ArchiveFormat::Zip, ArchiveFormat::TarGz] {
            let first = ArchivePackager.package(&entries, format).unwrap();
            let second = ArchivePackager.package(&reversed, format).unwrap();
            assert_eq!(first, second, "{format} output depends on input order");
        }
    }

    #[test]
    fn gzip_header_has_no_timestamp() {
        let bytes = ArchivePackager
            .package(&[file("a.txt", "a")], ArchiveFormat::TarGz)
            .unwrap();
        assert_eq!(&bytes[..2], &[0x1f, 0x8b]);
        assert_eq!(&bytes[4..8], &[0, 0, 0, 0]);
    }
}

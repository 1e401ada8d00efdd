//! Zip output: deflated, DOS epoch timestamps, unix modes.

use std::io::{Cursor, Write};

use kiln_core::domain::{ArchiveEntry, EntryKind};
use zip::{
    CompressionMethod, DateTime, ZipWriter,
    result::ZipResult,
    write::SimpleFileOptions,
};

pub(crate) fn write(layout: &[ArchiveEntry]) -> ZipResult<Vec<u8>> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    // DateTime::default() is 1980-01-01 00:00:00, the earliest DOS time.
    let base = SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .last_modified_time(DateTime::default());

    for entry in layout {
        let options = base.unix_permissions(entry.mode.bits());
        match entry.kind {
            EntryKind::Directory => writer.add_directory(entry.path.as_str(), options)?,
            EntryKind::File => {
                writer.start_file(entry.path.as_str(), options)?;
                writer.write_all(&entry.content)?;
            }
        }
    }

    Ok(writer.finish()?.into_inner())
}

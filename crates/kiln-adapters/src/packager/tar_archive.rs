//! Gzipped tar output with zeroed mtime and ownership.

use std::io;

use flate2::{Compression, GzBuilder};
use kiln_core::domain::{ArchiveEntry, EntryKind};
use tar::{Builder, EntryType, Header};

pub(crate) fn write(layout: &[ArchiveEntry]) -> io::Result<Vec<u8>> {
    let encoder = GzBuilder::new()
        .mtime(0)
        .write(Vec::new(), Compression::default());
    let mut builder = Builder::new(encoder);

    for entry in layout {
        let mut header = Header::new_gnu();
        header.set_mode(entry.mode.bits());
        header.set_mtime(0);
        header.set_uid(0);
        header.set_gid(0);
        match entry.kind {
            EntryKind::Directory => {
                header.set_entry_type(EntryType::Directory);
                header.set_size(0);
                builder.append_data(&mut header, entry.path.as_str(), io::empty())?;
            }
            EntryKind::File => {
                header.set_entry_type(EntryType::Regular);
                header.set_size(entry.content.len() as u64);
                builder.append_data(&mut header, entry.path.as_str(), entry.content.as_slice())?;
            }
        }
    }

    builder.into_inner()?.finish()
}

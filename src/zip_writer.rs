use std::io::{self, Seek, Write};
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::errors::LinkWriteError;
use crate::file_time_util::ArchiveTime;
use crate::request::{ArchiveRequest, ArchiveType};
use crate::snapshot::FileSnapshot;

const SYMLINK_PERMISSIONS: u32 = 0o755;

/// Write the symlink entry (stored, body = target path) followed by the file
/// entry (deflated), then finalize. Finalization runs on the error path too.
pub fn write_zip<W: Write + Seek>(
    out: W,
    request: &ArchiveRequest,
    snapshot: &FileSnapshot,
) -> Result<W, LinkWriteError> {
    let mut writer = ZipWriter::new(out);

    let written = append_entries(&mut writer, request, snapshot);
    let finished = writer.finish().map_err(|e| LinkWriteError::Finalize {
        format: ArchiveType::Zip,
        source: io::Error::from(e),
    });

    written?;
    finished
}

fn append_entries<W: Write + Seek>(
    writer: &mut ZipWriter<W>,
    request: &ArchiveRequest,
    snapshot: &FileSnapshot,
) -> Result<(), LinkWriteError> {
    let link_name = request.link_entry_name();
    let options = FileOptions::default()
        .compression_method(CompressionMethod::Stored)
        .last_modified_time(ArchiveTime::now().to_zip_datetime())
        .unix_permissions(SYMLINK_PERMISSIONS);

    // add_symlink writes the header and the target body in one go
    writer
        .add_symlink(link_name, request.target.as_str(), options)
        .map_err(|e| LinkWriteError::HeaderWrite {
            format: ArchiveType::Zip,
            entry: link_name.to_string(),
            source: io::Error::from(e),
        })?;

    let file_name = request.file_entry_name();
    let options = FileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .last_modified_time(snapshot.modified.to_zip_datetime())
        .unix_permissions(snapshot.mode)
        .large_file(needs_zip64(snapshot.size()));

    writer
        .start_file(file_name, options)
        .map_err(|e| LinkWriteError::HeaderWrite {
            format: ArchiveType::Zip,
            entry: file_name.to_string(),
            source: io::Error::from(e),
        })?;
    writer
        .write_all(&snapshot.content)
        .map_err(|source| LinkWriteError::ContentWrite {
            format: ArchiveType::Zip,
            entry: file_name.to_string(),
            source,
        })
}

/// zip 0.6 refuses to write past 4 GiB unless the entry was opened as zip64.
fn needs_zip64(size: u64) -> bool {
    size > u64::from(u32::MAX)
}

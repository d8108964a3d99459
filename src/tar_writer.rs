use std::io::{self, Read, Write};
use tar::{Builder, EntryType, Header};

use crate::errors::LinkWriteError;
use crate::request::{ArchiveRequest, ArchiveType};
use crate::snapshot::FileSnapshot;

const BLOCK_SIZE: usize = 512;
const LONG_LINK_NAME: &[u8] = b"././@LongLink";

/// Write the symlink entry followed by the file entry, then finalize the
/// archive. The archive is finalized even when an entry fails; the first
/// error is the one reported.
pub fn write_tar<W: Write>(
    out: W,
    request: &ArchiveRequest,
    snapshot: &FileSnapshot,
) -> Result<W, LinkWriteError> {
    let mut builder = Builder::new(out);

    let written = append_entries(&mut builder, request, snapshot);
    let finished = builder.into_inner().map_err(|source| LinkWriteError::Finalize {
        format: ArchiveType::Tar,
        source,
    });

    written?;
    finished
}

fn append_entries<W: Write>(
    builder: &mut Builder<W>,
    request: &ArchiveRequest,
    snapshot: &FileSnapshot,
) -> Result<(), LinkWriteError> {
    append_symlink(builder, request.link_entry_name(), &request.target, snapshot)?;
    append_file(builder, request.file_entry_name(), snapshot)
}

fn append_symlink<W: Write>(
    builder: &mut Builder<W>,
    name: &str,
    target: &str,
    snapshot: &FileSnapshot,
) -> Result<(), LinkWriteError> {
    let header_err = |source| LinkWriteError::HeaderWrite {
        format: ArchiveType::Tar,
        entry: name.to_string(),
        source,
    };

    let mut header = entry_header(EntryType::Symlink, snapshot, 0);
    set_long_field(builder, EntryType::GNULongName, &mut header.as_old_mut().name, name.as_bytes())
        .map_err(header_err)?;
    set_long_field(
        builder,
        EntryType::GNULongLink,
        &mut header.as_old_mut().linkname,
        target.as_bytes(),
    )
    .map_err(header_err)?;
    header.set_cksum();

    builder.append(&header, io::empty()).map_err(header_err)
}

fn append_file<W: Write>(
    builder: &mut Builder<W>,
    name: &str,
    snapshot: &FileSnapshot,
) -> Result<(), LinkWriteError> {
    let mut header = entry_header(EntryType::Regular, snapshot, snapshot.size());
    set_long_field(builder, EntryType::GNULongName, &mut header.as_old_mut().name, name.as_bytes())
        .map_err(|source| LinkWriteError::HeaderWrite {
            format: ArchiveType::Tar,
            entry: name.to_string(),
            source,
        })?;
    header.set_cksum();

    // Written through the inner writer rather than `Builder::append` so a
    // failing header and a failing body map to different errors.
    let out = builder.get_mut();
    out.write_all(header.as_bytes())
        .map_err(|source| LinkWriteError::HeaderWrite {
            format: ArchiveType::Tar,
            entry: name.to_string(),
            source,
        })?;
    write_padded(out, &snapshot.content).map_err(|source| LinkWriteError::ContentWrite {
        format: ArchiveType::Tar,
        entry: name.to_string(),
        source,
    })
}

fn entry_header(kind: EntryType, snapshot: &FileSnapshot, size: u64) -> Header {
    let mut header = Header::new_gnu();
    header.set_entry_type(kind);
    header.set_mode(snapshot.mode);
    header.set_size(size);
    header.set_mtime(snapshot.modified.to_unix_seconds());
    header.set_uid(0);
    header.set_gid(0);
    header
}

/// Copy `value` verbatim into a fixed-width header field. Values that do not
/// fit get a GNU long-name record first and are truncated in the field itself.
fn set_long_field<W: Write>(
    builder: &mut Builder<W>,
    kind: EntryType,
    field: &mut [u8],
    value: &[u8],
) -> io::Result<()> {
    if value.len() > field.len() {
        let mut header = Header::new_gnu();
        header.as_old_mut().name[..LONG_LINK_NAME.len()].copy_from_slice(LONG_LINK_NAME);
        header.set_entry_type(kind);
        header.set_mode(0o644);
        header.set_uid(0);
        header.set_gid(0);
        header.set_mtime(0);
        // trailing NUL
        header.set_size(value.len() as u64 + 1);
        header.set_cksum();
        builder.append(&header, value.chain(&[0u8][..]))?;
    }

    let len = value.len().min(field.len());
    field[..len].copy_from_slice(&value[..len]);
    field[len..].fill(0);
    Ok(())
}

fn write_padded<W: Write>(out: &mut W, data: &[u8]) -> io::Result<()> {
    out.write_all(data)?;
    let remainder = data.len() % BLOCK_SIZE;
    if remainder != 0 {
        out.write_all(&[0u8; BLOCK_SIZE][..BLOCK_SIZE - remainder])?;
    }
    Ok(())
}

use std::fs::{self, Metadata};
use std::path::Path;

use crate::errors::LinkWriteError;
use crate::file_time_util::ArchiveTime;

/// Content and permission bits of the input file at read time.
#[derive(Debug, Clone)]
pub struct FileSnapshot {
    pub mode: u32,
    pub modified: ArchiveTime,
    pub content: Vec<u8>,
}

impl FileSnapshot {
    pub fn load(path: &Path) -> Result<Self, LinkWriteError> {
        let metadata = fs::metadata(path).map_err(|source| LinkWriteError::InputStat {
            path: path.to_path_buf(),
            source,
        })?;
        let mode = permission_bits(&metadata);
        let perm = format!("{mode:#o}");
        log::debug!(perm:% = perm; "input permissions");

        let content = fs::read(path).map_err(|source| LinkWriteError::InputRead {
            path: path.to_path_buf(),
            source,
        })?;
        log::debug!(size = content.len(); "input size");

        Ok(FileSnapshot {
            mode,
            modified: ArchiveTime::from_metadata_mtime(&metadata),
            content,
        })
    }

    pub fn size(&self) -> u64 {
        self.content.len() as u64
    }
}

#[cfg(unix)]
fn permission_bits(metadata: &Metadata) -> u32 {
    use std::os::unix::fs::PermissionsExt;
    metadata.permissions().mode() & 0o777
}

#[cfg(not(unix))]
fn permission_bits(metadata: &Metadata) -> u32 {
    if metadata.permissions().readonly() {
        0o444
    } else {
        0o644
    }
}

use std::io;
use std::path::PathBuf;
use thiserror::Error;

use crate::request::ArchiveType;

#[derive(Error, Debug)]
pub enum LinkWriteError {
    #[error("failed to get file info for {path:?}: {source}")]
    InputStat {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to read input file {path:?}: {source}")]
    InputRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to create output file {path:?}: {source}")]
    OutputCreate {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write {format} header for entry '{entry}': {source}")]
    HeaderWrite {
        format: ArchiveType,
        entry: String,
        #[source]
        source: io::Error,
    },

    #[error("failed to write {format} content for entry '{entry}': {source}")]
    ContentWrite {
        format: ArchiveType,
        entry: String,
        #[source]
        source: io::Error,
    },

    #[error("failed to close {format} writer: {source}")]
    Finalize {
        format: ArchiveType,
        #[source]
        source: io::Error,
    },

    #[error("unsupported archive type: {0}")]
    UnsupportedArchiveType(String),
}

impl LinkWriteError {
    /// Process exit status for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            LinkWriteError::InputStat { .. }
            | LinkWriteError::InputRead { .. }
            | LinkWriteError::OutputCreate { .. }
            | LinkWriteError::HeaderWrite { .. }
            | LinkWriteError::ContentWrite { .. }
            | LinkWriteError::Finalize { .. }
            | LinkWriteError::UnsupportedArchiveType(_) => 1,
        }
    }
}

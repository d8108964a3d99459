use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::args::LinkWriteCli;
use crate::errors::LinkWriteError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchiveType {
    Tar,
    Zip,
}

impl FromStr for ArchiveType {
    type Err = LinkWriteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "tar" => Ok(ArchiveType::Tar),
            "zip" => Ok(ArchiveType::Zip),
            other => Err(LinkWriteError::UnsupportedArchiveType(other.to_string())),
        }
    }
}

impl fmt::Display for ArchiveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArchiveType::Tar => f.write_str("tar"),
            ArchiveType::Zip => f.write_str("zip"),
        }
    }
}

/// Everything one invocation needs, parsed once and passed down to the encoders.
#[derive(Debug, Clone)]
pub struct ArchiveRequest {
    pub input: String,
    pub target: String,
    pub output: PathBuf,
    pub archive_type: ArchiveType,
    pub link_name: Option<String>,
    pub verbose: bool,
}

impl ArchiveRequest {
    pub fn input_path(&self) -> &Path {
        Path::new(&self.input)
    }

    /// Archive name of the regular-file entry.
    pub fn file_entry_name(&self) -> &str {
        &self.input
    }

    /// Archive name of the symlink entry. Same as the file entry unless overridden.
    pub fn link_entry_name(&self) -> &str {
        self.link_name.as_deref().unwrap_or(&self.input)
    }
}

impl TryFrom<&LinkWriteCli> for ArchiveRequest {
    type Error = LinkWriteError;

    fn try_from(cli: &LinkWriteCli) -> Result<Self, Self::Error> {
        Ok(ArchiveRequest {
            input: cli.input.clone(),
            target: cli.target.clone(),
            output: PathBuf::from(&cli.output),
            archive_type: cli.archive_type.parse()?,
            link_name: cli.link_name.clone(),
            verbose: cli.verbose,
        })
    }
}

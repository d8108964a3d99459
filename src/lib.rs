use std::fs::File;
use std::path::PathBuf;

pub mod args;
pub mod errors;
pub mod file_time_util;
pub mod request;
pub mod snapshot;
pub mod tar_writer;
pub mod zip_writer;

use crate::args::LinkWriteCli;
use crate::errors::LinkWriteError;
use crate::request::{ArchiveRequest, ArchiveType};
use crate::snapshot::FileSnapshot;

/// Package the input file together with a symlink entry pointing at
/// `target` into a tar or zip archive at `output`.
/// Returns the path of the written archive.
pub fn run(cli: &LinkWriteCli) -> Result<PathBuf, LinkWriteError> {
    // Validated before any file is touched
    let request = ArchiveRequest::try_from(cli)?;
    log::debug!(
        input:? = request.input,
        target:? = request.target,
        output:? = request.output,
        archive_type:% = request.archive_type,
        link_name:? = request.link_name,
        verbose = request.verbose;
        "command line parameters"
    );

    write_archive(&request)?;

    log::info!(output:? = request.output; "archive created");
    Ok(request.output)
}

pub fn write_archive(request: &ArchiveRequest) -> Result<(), LinkWriteError> {
    let snapshot = FileSnapshot::load(request.input_path())?;

    let out = File::create(&request.output).map_err(|source| LinkWriteError::OutputCreate {
        path: request.output.clone(),
        source,
    })?;

    match request.archive_type {
        ArchiveType::Tar => {
            tar_writer::write_tar(out, request, &snapshot)?;
        }
        ArchiveType::Zip => {
            zip_writer::write_zip(out, request, &snapshot)?;
        }
    }

    Ok(())
}

//! Tar archive creation

use anyhow::Context;
use camino::Utf8Path;
use tar::Builder;

use crate::atomic_write::write_atomic_with;
use crate::error::BundleError;
use crate::scan::CandidateFile;

/// Write an uncompressed tar at `path` holding `files`, each stored under
/// its bare file name.
///
/// The archive is assembled in a temporary file next to `path` and renamed
/// into place only once complete. Returns the archive size in bytes.
pub fn write_archive(path: &Utf8Path, files: &[CandidateFile]) -> Result<u64, BundleError> {
    let result = write_atomic_with(path, |file| {
        let mut builder = Builder::new(file);
        for member in files {
            builder
                .append_path_with_name(&member.path, &member.file_name)
                .with_context(|| format!("Failed to append {} to tar archive", member.path))?;
        }
        builder.finish().context("Failed to finalize tar archive")?;
        Ok(())
    })
    .map_err(|e| BundleError::archive(path, format!("{e:#}")))?;

    tracing::info!(archive = %path, members = files.len(), bytes = result.bytes_written, "archive written");
    Ok(result.bytes_written)
}

//! Moving packed originals into the completion directory

use camino::{Utf8Path, Utf8PathBuf};
use std::fs;
use std::io::ErrorKind;

use crate::error::BundleError;
use crate::scan::CandidateFile;

/// Move `from` to `to`, replacing any file already at `to`.
///
/// Falls back to copy-then-remove when the rename would cross filesystems.
pub fn move_file(from: &Utf8Path, to: &Utf8Path) -> Result<(), BundleError> {
    if from == to {
        return Ok(());
    }

    match fs::symlink_metadata(to) {
        Ok(existing) if existing.is_dir() => {
            return Err(BundleError::fs(
                "replace",
                to,
                std::io::Error::new(ErrorKind::IsADirectory, "destination is a directory"),
            ));
        }
        Ok(_) => {
            tracing::warn!(destination = %to, "replacing existing file in completed directory");
            fs::remove_file(to).map_err(|e| BundleError::fs("remove", to, e))?;
        }
        Err(e) if e.kind() == ErrorKind::NotFound => {}
        Err(e) => return Err(BundleError::fs("inspect", to, e)),
    }

    match fs::rename(from, to) {
        Ok(()) => Ok(()),
        Err(rename_err) if rename_err.kind() == ErrorKind::CrossesDevices => {
            tracing::debug!(%from, %to, "rename crosses filesystems, copying instead");
            fs::copy(from, to).map_err(|e| BundleError::fs("copy", from, e))?;
            fs::remove_file(from).map_err(|e| BundleError::fs("remove", from, e))?;
            Ok(())
        }
        Err(rename_err) => Err(BundleError::fs("move", from, rename_err)),
    }
}

/// Move every file into `dest_dir`, creating it first.
///
/// Stops at the first failure; files already moved stay moved.
pub fn relocate_all(
    files: &[CandidateFile],
    dest_dir: &Utf8Path,
) -> Result<Vec<Utf8PathBuf>, BundleError> {
    fs::create_dir_all(dest_dir).map_err(|e| BundleError::fs("create", dest_dir, e))?;

    let mut moved = Vec::with_capacity(files.len());
    for file in files {
        let destination = dest_dir.join(&file.file_name);
        move_file(&file.path, &destination)?;
        tracing::debug!(from = %file.path, to = %destination, "moved");
        moved.push(destination);
    }
    Ok(moved)
}

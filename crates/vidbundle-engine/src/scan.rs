//! Source directory scan

use camino::{Utf8Path, Utf8PathBuf};
use chrono::{DateTime, Local};
use serde::Serialize;
use std::fs;
use std::io::ErrorKind;

use crate::config::ListingOrder;
use crate::context::RunContext;
use crate::error::BundleError;

/// A media file found in the source directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CandidateFile {
    pub path: Utf8PathBuf,
    pub file_name: String,
    pub size_bytes: u64,
    pub modified: DateTime<Local>,
    /// Modified strictly before the run's age cutoff
    pub eligible_by_age: bool,
}

/// Whether `file_name` carries the media suffix (case-sensitive).
///
/// A file named exactly `.mp4` has an empty stem and is not media.
#[must_use]
pub fn is_media_name(file_name: &str, suffix: &str) -> bool {
    file_name.len() > suffix.len() && file_name.ends_with(suffix)
}

/// List media files in the source directory, ordered per `ctx.order`.
///
/// Only regular files (after following symlinks) with a UTF-8 name ending in
/// the media suffix are returned. Nothing is modified.
pub fn scan_candidates(ctx: &RunContext) -> Result<Vec<CandidateFile>, BundleError> {
    let source_dir = &ctx.source_dir;
    let suffix = ctx.media_suffix();
    let cutoff = ctx.cutoff();

    let entries = fs::read_dir(source_dir).map_err(|e| BundleError::fs("list", source_dir, e))?;

    let mut candidates = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| BundleError::fs("list", source_dir, e))?;
        let Ok(file_name) = entry.file_name().into_string() else {
            tracing::debug!(dir = %source_dir, "skipping entry with non-UTF-8 name");
            continue;
        };
        if !is_media_name(&file_name, &suffix) {
            continue;
        }

        let path = source_dir.join(&file_name);
        let Some(candidate) = inspect(&path, file_name, cutoff)? else {
            continue;
        };
        candidates.push(candidate);
    }

    sort_candidates(&mut candidates, ctx.order);
    tracing::debug!(count = candidates.len(), order = %ctx.order, "scanned source directory");
    Ok(candidates)
}

fn inspect(
    path: &Utf8Path,
    file_name: String,
    cutoff: DateTime<Local>,
) -> Result<Option<CandidateFile>, BundleError> {
    // Entries can vanish between `read_dir` and the stat (a downloader
    // renaming its partial file, a dangling symlink).
    let metadata = match fs::metadata(path) {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::debug!(%path, "skipping entry that no longer resolves");
            return Ok(None);
        }
        Err(e) => return Err(BundleError::fs("read metadata of", path, e)),
    };
    if !metadata.is_file() {
        tracing::debug!(%path, "skipping non-regular entry");
        return Ok(None);
    }
    let modified: DateTime<Local> = metadata
        .modified()
        .map_err(|e| BundleError::fs("read modification time of", path, e))?
        .into();

    Ok(Some(CandidateFile {
        path: path.to_path_buf(),
        file_name,
        size_bytes: metadata.len(),
        modified,
        eligible_by_age: modified < cutoff,
    }))
}

/// Apply the configured listing order in place.
pub fn sort_candidates(candidates: &mut [CandidateFile], order: ListingOrder) {
    match order {
        ListingOrder::Name => candidates.sort_by(|a, b| a.file_name.cmp(&b.file_name)),
        ListingOrder::Mtime => candidates.sort_by(|a, b| {
            a.modified
                .cmp(&b.modified)
                .then_with(|| a.file_name.cmp(&b.file_name))
        }),
        ListingOrder::Listing => {}
    }
}

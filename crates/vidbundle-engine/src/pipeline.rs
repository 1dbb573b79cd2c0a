//! End-to-end packing run
//!
//! A run goes through these steps in order:
//!
//! 1. create the target and completed directories
//! 2. scan the source directory and select greedily ([`plan`])
//! 3. stop with a soft outcome when nothing or too little was selected
//! 4. name the bundle from the run date and the archives already present
//! 5. write the archive (atomically, via a temporary file)
//! 6. write the log
//! 7. move the originals into the bundle's completed subdirectory
//!
//! Any I/O failure aborts the run. Completed steps are not rolled back; since
//! the log precedes the moves, it always describes the intended bundle.
//!
//! Callers must not run two packs against the same directories at once.

use serde::Serialize;
use std::fs;
use std::io::ErrorKind;

use crate::archive::write_archive;
use crate::context::RunContext;
use crate::error::BundleError;
use crate::exit_codes::ExitCode;
use crate::manifest::{BundlePaths, render_log, write_log};
use crate::numbering::{BundleName, next_sequence_number};
use crate::relocate::relocate_all;
use crate::scan::{CandidateFile, scan_candidates};
use crate::select::{Decision, Selection, select_greedy};

/// A bundle that was written and whose originals were moved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PackedBundle {
    pub name: BundleName,
    pub paths: BundlePaths,
    /// Sum of the packed files' sizes
    pub total_bytes: u64,
    /// Size of the tar file itself
    pub archive_bytes: u64,
    /// Packed files as found in the source directory
    pub files: Vec<CandidateFile>,
}

/// Result of a completed run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Outcome {
    NoFilesSelected,
    InsufficientSize { total_bytes: u64 },
    Packed(PackedBundle),
}

impl Outcome {
    #[must_use]
    pub fn exit_code(&self) -> ExitCode {
        match self {
            Self::NoFilesSelected => ExitCode::NO_FILES_SELECTED,
            Self::InsufficientSize { .. } => ExitCode::INSUFFICIENT_SIZE,
            Self::Packed(_) => ExitCode::SUCCESS,
        }
    }
}

/// Scan and select without touching the filesystem.
pub fn plan(ctx: &RunContext) -> Result<Decision, BundleError> {
    let candidates = scan_candidates(ctx)?;
    let selection = select_greedy(&candidates, ctx.window);
    let decision = Decision::from_selection(selection, ctx.window);

    match &decision {
        Decision::NoFilesSelected => {
            tracing::info!(candidates = candidates.len(), "no files selected");
        }
        Decision::InsufficientSize { total_bytes } => tracing::info!(
            total_bytes,
            min_bytes = ctx.window.min_bytes,
            "not enough data collected"
        ),
        Decision::Ready(selection) => tracing::info!(
            files = selection.files.len(),
            total_bytes = selection.total_bytes,
            "selection ready"
        ),
    }
    Ok(decision)
}

/// Name the next run today would use.
///
/// A target directory that does not exist yet holds no archives, so the
/// answer is sequence 1.
pub fn next_bundle_name(ctx: &RunContext) -> Result<BundleName, BundleError> {
    let prefix = ctx.date_prefix();
    match next_sequence_number(&prefix, &ctx.target_dir) {
        Ok(sequence) => Ok(BundleName::new(prefix, sequence)),
        Err(BundleError::Filesystem { source, .. })
            if source.kind() == ErrorKind::NotFound && !ctx.target_dir.exists() =>
        {
            Ok(BundleName::new(prefix, 1))
        }
        Err(e) => Err(e),
    }
}

/// Perform one packing run.
pub fn run(ctx: &RunContext) -> Result<Outcome, BundleError> {
    for dir in [&ctx.target_dir, &ctx.completed_dir] {
        fs::create_dir_all(dir).map_err(|e| BundleError::fs("create", dir, e))?;
    }

    let selection = match plan(ctx)? {
        Decision::NoFilesSelected => return Ok(Outcome::NoFilesSelected),
        Decision::InsufficientSize { total_bytes } => {
            return Ok(Outcome::InsufficientSize { total_bytes });
        }
        Decision::Ready(selection) => selection,
    };

    pack(ctx, selection).map(Outcome::Packed)
}

fn pack(ctx: &RunContext, selection: Selection) -> Result<PackedBundle, BundleError> {
    let name = BundleName::next_in(&ctx.date_prefix(), &ctx.target_dir)?;
    let paths = BundlePaths::for_bundle(ctx, &name);
    tracing::info!(bundle = %name, archive = %paths.archive, "packing bundle");

    let archive_bytes = write_archive(&paths.archive, &selection.files)?;
    write_log(&paths.log, &render_log(ctx, &name, &paths, &selection))?;
    relocate_all(&selection.files, &paths.completed_dir)?;

    tracing::info!(
        bundle = %name,
        files = selection.files.len(),
        total_bytes = selection.total_bytes,
        "bundle complete"
    );

    Ok(PackedBundle {
        name,
        paths,
        total_bytes: selection.total_bytes,
        archive_bytes,
        files: selection.files,
    })
}

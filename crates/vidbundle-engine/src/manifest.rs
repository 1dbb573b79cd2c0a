//! Human-readable bundle log
//!
//! The log sits next to the archive and records what the run intended:
//! header, summary, the configuration in effect, bundle identity, and one
//! block per packed file. It is written before any original is moved, so a
//! failed move still leaves an accurate account of the bundle.

use camino::{Utf8Path, Utf8PathBuf};
use serde::Serialize;
use std::fmt::Write as _;

use crate::atomic_write::write_file_atomic;
use crate::context::{RunContext, bytes_to_gib};
use crate::error::BundleError;
use crate::numbering::BundleName;
use crate::select::Selection;

const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S %:z";

/// Paths of one bundle's artifacts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BundlePaths {
    pub archive: Utf8PathBuf,
    pub log: Utf8PathBuf,
    pub completed_dir: Utf8PathBuf,
}

impl BundlePaths {
    #[must_use]
    pub fn for_bundle(ctx: &RunContext, name: &BundleName) -> Self {
        Self {
            archive: ctx.target_dir.join(name.archive_file_name()),
            log: ctx.target_dir.join(name.log_file_name()),
            completed_dir: ctx.completed_dir.join(name.to_string()),
        }
    }
}

/// Render the log text for a bundle.
#[must_use]
pub fn render_log(
    ctx: &RunContext,
    name: &BundleName,
    paths: &BundlePaths,
    selection: &Selection,
) -> String {
    let mut out = String::new();
    // Writing to a String cannot fail.
    let _ = write_sections(&mut out, ctx, name, paths, selection);
    out
}

fn write_sections(
    out: &mut String,
    ctx: &RunContext,
    name: &BundleName,
    paths: &BundlePaths,
    selection: &Selection,
) -> std::fmt::Result {
    writeln!(out, "# {}", name.log_file_name())?;
    writeln!(out)?;

    writeln!(out, "Archive: {}", name.archive_file_name())?;
    writeln!(
        out,
        "Total size: {} bytes ({:.3} GiB)",
        selection.total_bytes,
        bytes_to_gib(selection.total_bytes)
    )?;
    writeln!(out, "Files: {}", selection.files.len())?;
    writeln!(out)?;

    writeln!(out, "Source directory: {}", ctx.source_dir)?;
    writeln!(out, "Target directory: {}", ctx.target_dir)?;
    writeln!(out, "Completed directory: {}", ctx.completed_dir)?;
    writeln!(
        out,
        "Maximum size: {} GiB ({} bytes)",
        ctx.max_size_gib, ctx.window.max_bytes
    )?;
    writeln!(
        out,
        "Minimum size: {} GiB ({} bytes)",
        ctx.min_size_gib, ctx.window.min_bytes
    )?;
    writeln!(out, "Extension: .{}", ctx.extension)?;
    writeln!(out, "Listing order: {}", ctx.order)?;
    writeln!(out, "Run started: {}", ctx.started_at.format(TIME_FORMAT))?;
    writeln!(out, "Age cutoff: {}", ctx.cutoff().format(TIME_FORMAT))?;
    writeln!(out)?;

    writeln!(out, "Date prefix: {}", name.prefix)?;
    writeln!(out, "Sequence number: {}", name.sequence)?;
    writeln!(out, "Archive path: {}", paths.archive)?;
    writeln!(out, "Completed subdirectory: {}", paths.completed_dir)?;
    writeln!(out)?;

    writeln!(out, "Selected files:")?;
    for file in &selection.files {
        writeln!(out)?;
        writeln!(out, "  Name: {}", file.file_name)?;
        writeln!(out, "  Size: {} bytes", file.size_bytes)?;
        writeln!(out, "  Modified: {}", file.modified.format(TIME_FORMAT))?;
        writeln!(out, "  Eligible by age: {}", file.eligible_by_age)?;
    }
    Ok(())
}

/// Write the log for a bundle to `path`.
pub fn write_log(path: &Utf8Path, content: &str) -> Result<(), BundleError> {
    write_file_atomic(path, content)
        .map_err(|e| BundleError::fs("write", path, std::io::Error::other(format!("{e:#}"))))?;
    tracing::info!(log = %path, "log written");
    Ok(())
}

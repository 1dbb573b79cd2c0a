//! Atomic file creation for bundle artifacts
//!
//! Archives and logs are first written to a temporary file in the destination
//! directory, fsynced, then renamed over the final name. A reader therefore
//! sees either no artifact or a complete one, never a truncated archive.
//!
//! The temporary file always lives next to the target, so the final rename
//! never crosses a filesystem boundary.

use anyhow::{Context, Result};
use camino::Utf8Path;
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;

#[cfg(target_os = "windows")]
use std::{thread, time::Duration};

/// Result of an atomic write operation
#[derive(Debug, Clone, Default)]
pub struct AtomicWriteResult {
    /// Bytes written to the final file
    pub bytes_written: u64,
}

/// Atomically write text content to a file using temp file + fsync + rename.
///
/// Line endings are normalized to LF.
pub fn write_file_atomic(path: &Utf8Path, content: &str) -> Result<AtomicWriteResult> {
    let normalized_content = normalize_line_endings(content);
    write_atomic_with(path, |file| {
        file.write_all(normalized_content.as_bytes())
            .context("Failed to write content to temporary file")
    })
}

/// Atomically create `path` by letting `fill` write into a temporary file.
///
/// `fill` receives the open temporary file. When it returns an error the
/// temporary file is discarded and `path` is left untouched.
pub fn write_atomic_with<F>(path: &Utf8Path, fill: F) -> Result<AtomicWriteResult>
where
    F: FnOnce(&mut File) -> Result<()>,
{
    let mut result = AtomicWriteResult::default();

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create parent directory: {parent}"))?;
    }

    let temp_dir = match path.parent() {
        Some(parent) if !parent.as_str().is_empty() => parent,
        _ => Utf8Path::new("."),
    };
    let mut temp_file = NamedTempFile::new_in(temp_dir)
        .with_context(|| format!("Failed to create temporary file in: {temp_dir}"))?;

    fill(temp_file.as_file_mut())?;

    let file = temp_file.as_file_mut();
    file.flush().context("Failed to flush temporary file")?;
    file.sync_all().context("Failed to fsync temporary file")?;
    result.bytes_written = file
        .metadata()
        .context("Failed to read temporary file metadata")?
        .len();

    let retry_count = atomic_rename(temp_file, path.as_std_path())
        .with_context(|| format!("Failed to atomically write file: {path}"))?;
    if retry_count > 0 {
        tracing::warn!(path = %path, retry_count, "rename needed retries");
    }

    Ok(result)
}

/// Normalize line endings to LF
fn normalize_line_endings(content: &str) -> String {
    content.replace("\r\n", "\n").replace('\r', "\n")
}

/// Attempt atomic rename with bounded exponential backoff (≤ 250ms total).
///
/// Returns the number of retries that were needed.
#[cfg(target_os = "windows")]
fn atomic_rename(mut temp_file: NamedTempFile, target: &Path) -> Result<u32> {
    use std::io::ErrorKind;

    const MAX_RETRIES: u32 = 5;
    const INITIAL_DELAY_MS: u64 = 10;
    const MAX_TOTAL_DELAY_MS: u64 = 250;

    let mut retry_count = 0;
    let mut total_delay_ms = 0;

    loop {
        match temp_file.persist(target) {
            Ok(_) => return Ok(retry_count),
            Err(persist_error) => {
                let is_retryable = matches!(
                    persist_error.error.kind(),
                    ErrorKind::PermissionDenied | ErrorKind::Other
                );
                let delay_ms = INITIAL_DELAY_MS * 2_u64.pow(retry_count);
                if retry_count >= MAX_RETRIES
                    || !is_retryable
                    || total_delay_ms + delay_ms > MAX_TOTAL_DELAY_MS
                {
                    return Err(anyhow::anyhow!(persist_error.error));
                }

                thread::sleep(Duration::from_millis(delay_ms));
                total_delay_ms += delay_ms;
                retry_count += 1;
                temp_file = persist_error.file;
            }
        }
    }
}

/// Attempt atomic rename (Unix: no retry needed)
#[cfg(not(target_os = "windows"))]
fn atomic_rename(temp_file: NamedTempFile, target: &Path) -> Result<u32> {
    temp_file
        .persist(target)
        .map(|_| 0)
        .map_err(|e| anyhow::anyhow!(e.error))
}

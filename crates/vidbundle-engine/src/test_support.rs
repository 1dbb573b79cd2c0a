//! Fixtures for tests that need a populated source directory
//!
//! Files are created sparse with `set_len`, so multi-kilobyte fixtures cost
//! nothing on disk. Modification times are set explicitly so age eligibility
//! never depends on how long a test takes.

use camino::Utf8PathBuf;
use chrono::{DateTime, Local, TimeDelta, Timelike};
use std::fs::{self, File};
use std::time::SystemTime;
use tempfile::TempDir;

use crate::config::ListingOrder;
use crate::context::{RunContext, SizeWindow};

/// `hours` before `now`, as a filesystem timestamp.
#[must_use]
pub fn hours_ago(now: DateTime<Local>, hours: i64) -> SystemTime {
    (now - TimeDelta::hours(hours)).into()
}

/// Create `path` with `size` bytes and the given modification time.
pub fn create_media_file(path: &std::path::Path, size: u64, modified: SystemTime) {
    let file = File::create(path).expect("create media fixture");
    file.set_len(size).expect("size media fixture");
    file.set_modified(modified).expect("set fixture mtime");
}

/// Temporary source/target/completed layout with a fixed run clock.
pub struct MediaDir {
    _root: TempDir,
    pub source: Utf8PathBuf,
    pub target: Utf8PathBuf,
    pub completed: Utf8PathBuf,
    /// Run start used by [`MediaDir::context`], truncated to whole seconds
    pub now: DateTime<Local>,
}

impl MediaDir {
    /// Only the source directory exists; target and completed are left for
    /// the pipeline to create.
    #[must_use]
    pub fn new() -> Self {
        let root = TempDir::new().expect("create temp dir");
        let base = Utf8PathBuf::from_path_buf(root.path().to_path_buf())
            .expect("temp dir path is UTF-8");
        let source = base.join("incoming");
        fs::create_dir(&source).expect("create source dir");
        let now = Local::now().with_nanosecond(0).unwrap_or_else(Local::now);

        Self {
            _root: root,
            source,
            target: base.join("tar"),
            completed: base.join("completed"),
            now,
        }
    }

    /// Add a file to the source directory.
    pub fn file(&self, name: &str, size: u64, modified: SystemTime) -> Utf8PathBuf {
        let path = self.source.join(name);
        create_media_file(path.as_std_path(), size, modified);
        path
    }

    /// Add a file old enough to be eligible under a 6 hour cutoff.
    pub fn old_file(&self, name: &str, size: u64) -> Utf8PathBuf {
        self.file(name, size, hours_ago(self.now, 7))
    }

    /// Context over this layout: `.mp4` files, 6 hour age cutoff.
    #[must_use]
    pub fn context(&self, window: SizeWindow, order: ListingOrder) -> RunContext {
        RunContext {
            started_at: self.now,
            source_dir: self.source.clone(),
            target_dir: self.target.clone(),
            completed_dir: self.completed.clone(),
            window,
            min_size_gib: crate::context::bytes_to_gib(window.min_bytes),
            max_size_gib: crate::context::bytes_to_gib(window.max_bytes),
            age_cutoff: TimeDelta::hours(6),
            extension: "mp4".to_string(),
            order,
        }
    }
}

impl Default for MediaDir {
    fn default() -> Self {
        Self::new()
    }
}

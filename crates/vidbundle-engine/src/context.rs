//! Immutable per-run state

use camino::Utf8PathBuf;
use chrono::{DateTime, Local, TimeDelta, Utc};
use serde::Serialize;

use crate::config::{Config, ListingOrder};

/// Bytes in one GiB.
pub const GIB: u64 = 1024 * 1024 * 1024;

/// Convert a byte count to GiB.
#[must_use]
pub fn bytes_to_gib(bytes: u64) -> f64 {
    bytes as f64 / GIB as f64
}

/// Inclusive byte range an accepted selection must land in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SizeWindow {
    pub min_bytes: u64,
    pub max_bytes: u64,
}

impl SizeWindow {
    /// Window over raw byte counts. `None` when `min_bytes > max_bytes`.
    #[must_use]
    pub fn new(min_bytes: u64, max_bytes: u64) -> Option<Self> {
        (min_bytes <= max_bytes).then_some(Self {
            min_bytes,
            max_bytes,
        })
    }

    /// Window from fractional GiB thresholds.
    ///
    /// The minimum rounds up and the maximum rounds down, so integer
    /// comparisons against the result agree with the fractional thresholds.
    /// A window that collapses under rounding keeps `min_bytes == max_bytes`.
    #[must_use]
    pub fn from_gib(min_gib: f64, max_gib: f64) -> Self {
        let to_bytes = |gib: f64| gib.max(0.0) * GIB as f64;
        // float-to-int `as` saturates, which is the clamp we want here
        let max_bytes = to_bytes(max_gib).floor() as u64;
        let min_bytes = (to_bytes(min_gib).ceil() as u64).min(max_bytes);
        Self {
            min_bytes,
            max_bytes,
        }
    }

    #[must_use]
    pub fn contains(&self, total: u64) -> bool {
        (self.min_bytes..=self.max_bytes).contains(&total)
    }
}

/// Everything a run needs, fixed at run start.
///
/// No pipeline step reads the wall clock on its own; `started_at` is the
/// single time source for age eligibility and the bundle date prefix.
#[derive(Debug, Clone)]
pub struct RunContext {
    pub started_at: DateTime<Local>,
    pub source_dir: Utf8PathBuf,
    pub target_dir: Utf8PathBuf,
    pub completed_dir: Utf8PathBuf,
    pub window: SizeWindow,
    /// Configured thresholds as entered, for display.
    pub min_size_gib: f64,
    pub max_size_gib: f64,
    pub age_cutoff: TimeDelta,
    /// Media extension without the leading dot
    pub extension: String,
    pub order: ListingOrder,
}

impl RunContext {
    #[must_use]
    pub fn from_config(config: &Config, started_at: DateTime<Local>) -> Self {
        let (min_size_gib, max_size_gib) = (config.min_size_gib(), config.max_size_gib());
        let hours = i64::try_from(config.age_cutoff_hours()).unwrap_or(i64::MAX);
        Self {
            started_at,
            source_dir: config.source_dir(),
            target_dir: config.target_dir(),
            completed_dir: config.completed_dir(),
            window: SizeWindow::from_gib(min_size_gib, max_size_gib),
            min_size_gib,
            max_size_gib,
            age_cutoff: TimeDelta::try_hours(hours).unwrap_or(TimeDelta::MAX),
            extension: config.extension(),
            order: config.order(),
        }
    }

    /// Files modified strictly before this instant are eligible by age.
    #[must_use]
    pub fn cutoff(&self) -> DateTime<Local> {
        self.started_at
            .checked_sub_signed(self.age_cutoff)
            .unwrap_or_else(|| DateTime::<Utc>::MIN_UTC.with_timezone(&Local))
    }

    /// `YYYYMMDD` in local time of the run start.
    #[must_use]
    pub fn date_prefix(&self) -> String {
        self.started_at.format("%Y%m%d").to_string()
    }

    /// File-name suffix recognized as media, including the dot.
    #[must_use]
    pub fn media_suffix(&self) -> String {
        format!(".{}", self.extension)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(y: i32, m: u32, d: u32, h: u32) -> DateTime<Local> {
        Local.with_ymd_and_hms(y, m, d, h, 0, 0).single().unwrap()
    }

    #[test]
    fn test_from_gib_rounds_inward() {
        let window = SizeWindow::from_gib(17.1, 18.0);
        assert_eq!(window.max_bytes, 18 * GIB);
        assert_eq!(window.min_bytes, (17.1 * GIB as f64).ceil() as u64);
        assert!(window.contains(18 * GIB));
        assert!(!window.contains(18 * GIB + 1));
        assert!(!window.contains(window.min_bytes - 1));
    }

    #[test]
    fn test_from_gib_never_inverts() {
        let window = SizeWindow::from_gib(1e-10, 1e-10);
        assert!(window.min_bytes <= window.max_bytes);
    }

    #[test]
    fn test_new_rejects_inverted_window() {
        assert!(SizeWindow::new(10, 5).is_none());
        assert_eq!(
            SizeWindow::new(5, 5),
            Some(SizeWindow {
                min_bytes: 5,
                max_bytes: 5
            })
        );
    }

    #[test]
    fn test_context_from_config() {
        let config = Config::builder()
            .source_dir("/in")
            .target_dir("/out")
            .completed_dir("/done")
            .extension(".mkv")
            .age_cutoff_hours(6)
            .build()
            .unwrap();
        let ctx = RunContext::from_config(&config, at(2024, 3, 5, 12));

        assert_eq!(ctx.date_prefix(), "20240305");
        assert_eq!(ctx.cutoff(), at(2024, 3, 5, 6));
        assert_eq!(ctx.media_suffix(), ".mkv");
        assert_eq!(ctx.window.max_bytes, 18 * GIB);
    }

    #[test]
    fn test_bytes_to_gib() {
        assert!((bytes_to_gib(GIB / 2) - 0.5).abs() < f64::EPSILON);
    }
}

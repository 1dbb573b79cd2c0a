//! Per-day sequence numbers for bundle artifacts
//!
//! Bundles are named `{prefix}-{seq:04}` where the prefix is the run date.
//! The next sequence number is derived from the archives already present in
//! the target directory, so numbering resumes across runs without any state
//! file.

use camino::Utf8Path;
use serde::Serialize;
use std::fmt;
use std::fs;

use crate::error::BundleError;

/// Extension of archive artifacts, without the dot.
pub const ARCHIVE_EXTENSION: &str = "tar";
/// Extension of log artifacts, without the dot.
pub const LOG_EXTENSION: &str = "log";

/// Identity of one bundle: date prefix plus sequence number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BundleName {
    pub prefix: String,
    pub sequence: u32,
}

impl BundleName {
    #[must_use]
    pub fn new(prefix: impl Into<String>, sequence: u32) -> Self {
        Self {
            prefix: prefix.into(),
            sequence,
        }
    }

    /// Next unused name for `prefix` among the archives in `dir`.
    pub fn next_in(prefix: &str, dir: &Utf8Path) -> Result<Self, BundleError> {
        Ok(Self::new(prefix, next_sequence_number(prefix, dir)?))
    }

    #[must_use]
    pub fn archive_file_name(&self) -> String {
        format!("{self}.{ARCHIVE_EXTENSION}")
    }

    #[must_use]
    pub fn log_file_name(&self) -> String {
        format!("{self}.{LOG_EXTENSION}")
    }
}

impl fmt::Display for BundleName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{:04}", self.prefix, self.sequence)
    }
}

/// Sequence number encoded in an archive name for `prefix`, if any.
///
/// Matches `{prefix}-{digits}[.anything].tar`: the name must split on `-` into
/// exactly two parts, the second ending in `.tar`. The number is the second
/// part up to its first `.`.
#[must_use]
pub fn parse_sequence(prefix: &str, file_name: &str) -> Option<u32> {
    if !file_name.starts_with(prefix) {
        return None;
    }
    let (head, tail) = file_name.split_once('-')?;
    if head != prefix || tail.contains('-') {
        return None;
    }
    if !tail.ends_with(&format!(".{ARCHIVE_EXTENSION}")) {
        return None;
    }
    let digits = tail.split('.').next()?;
    match digits.parse::<u32>() {
        Ok(n) => Some(n),
        Err(e) => {
            tracing::debug!(file_name, error = %e, "ignoring archive with unparseable sequence number");
            None
        }
    }
}

/// Next sequence number for `prefix` in `dir`: one past the highest number
/// already used, or 1 when no archive matches.
///
/// Entries whose names are not valid UTF-8 or do not parse are ignored.
/// A directory that cannot be listed is an error.
pub fn next_sequence_number(prefix: &str, dir: &Utf8Path) -> Result<u32, BundleError> {
    let entries = fs::read_dir(dir).map_err(|e| BundleError::fs("list", dir, e))?;

    let mut highest: Option<u32> = None;
    for entry in entries {
        let entry = entry.map_err(|e| BundleError::fs("list", dir, e))?;
        let Some(name) = entry.file_name().to_str().map(str::to_owned) else {
            continue;
        };
        if let Some(n) = parse_sequence(prefix, &name) {
            highest = Some(highest.map_or(n, |h| h.max(n)));
        }
    }

    match highest {
        None => Ok(1),
        Some(h) => h.checked_add(1).ok_or_else(|| {
            BundleError::archive(dir, format!("sequence numbers for prefix {prefix} are exhausted"))
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use camino::Utf8PathBuf;
    use proptest::prelude::*;
    use tempfile::TempDir;

    fn utf8_dir(dir: &TempDir) -> Utf8PathBuf {
        Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).unwrap()
    }

    fn touch(dir: &TempDir, name: &str) {
        fs::write(dir.path().join(name), b"").unwrap();
    }

    #[test]
    fn test_empty_directory_starts_at_one() {
        let dir = TempDir::new().unwrap();
        assert_eq!(next_sequence_number("20240305", &utf8_dir(&dir)).unwrap(), 1);
    }

    #[test]
    fn test_existing_archive_is_followed() {
        let dir = TempDir::new().unwrap();
        touch(&dir, "20240305-0001.tar");
        touch(&dir, "20240305-0001.log");

        let name = BundleName::next_in("20240305", &utf8_dir(&dir)).unwrap();
        assert_eq!(name.to_string(), "20240305-0002");
        assert_eq!(name.archive_file_name(), "20240305-0002.tar");
        assert_eq!(name.log_file_name(), "20240305-0002.log");
    }

    #[test]
    fn test_gaps_are_not_filled() {
        let dir = TempDir::new().unwrap();
        touch(&dir, "20240305-0001.tar");
        touch(&dir, "20240305-0007.tar");

        assert_eq!(next_sequence_number("20240305", &utf8_dir(&dir)).unwrap(), 8);
    }

    #[test]
    fn test_other_prefixes_and_malformed_names_are_ignored() {
        let dir = TempDir::new().unwrap();
        touch(&dir, "20240304-0009.tar");
        touch(&dir, "20240305-abc.tar");
        touch(&dir, "20240305-0004-extra.tar");
        touch(&dir, "20240305-0005.log");
        touch(&dir, "20240305-0003.tar.partial");

        assert_eq!(next_sequence_number("20240305", &utf8_dir(&dir)).unwrap(), 1);
    }

    #[test]
    fn test_unpadded_and_dotted_numbers_parse() {
        assert_eq!(parse_sequence("20240305", "20240305-12.tar"), Some(12));
        assert_eq!(parse_sequence("20240305", "20240305-0003.old.tar"), Some(3));
        assert_eq!(parse_sequence("20240305", "202403051-0003.tar"), None);
    }

    #[test]
    fn test_missing_directory_is_an_error() {
        let dir = TempDir::new().unwrap();
        let missing = utf8_dir(&dir).join("nope");
        let err = next_sequence_number("20240305", &missing).unwrap_err();
        assert!(matches!(err, BundleError::Filesystem { action: "list", .. }));
    }

    #[test]
    fn test_exhausted_sequence_is_an_error() {
        let dir = TempDir::new().unwrap();
        touch(&dir, &format!("20240305-{}.tar", u32::MAX));
        assert!(next_sequence_number("20240305", &utf8_dir(&dir)).is_err());
    }

    proptest! {
        #[test]
        fn prop_next_number_is_one_past_max(numbers in proptest::collection::btree_set(1u32..10_000, 0..12)) {
            let dir = TempDir::new().unwrap();
            for n in &numbers {
                touch(&dir, &format!("20240305-{n:04}.tar"));
            }

            let next = next_sequence_number("20240305", &utf8_dir(&dir)).unwrap();

            prop_assert!(!numbers.contains(&next));
            prop_assert_eq!(next, numbers.iter().max().map_or(1, |m| m + 1));
        }
    }
}

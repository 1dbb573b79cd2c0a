use camino::Utf8PathBuf;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Default directory scanned for media files
pub const DEFAULT_SOURCE_DIR: &str = "/storage/STUDIO/youtube";
/// Default directory receiving archives and logs
pub const DEFAULT_TARGET_DIR: &str = "/storage/STUDIO/youtube/0_TAR";
/// Default directory receiving per-bundle subdirectories of moved originals
pub const DEFAULT_COMPLETED_DIR: &str = "/storage/STUDIO/youtube/0_COMPLETED";
/// Default recognized media extension (without the dot)
pub const DEFAULT_EXTENSION: &str = "mp4";
/// Default upper bound of the size window, in GiB
pub const DEFAULT_MAX_SIZE_GIB: f64 = 18.0;
/// Default lower bound of the size window, in GiB
pub const DEFAULT_MIN_SIZE_GIB: f64 = 17.1;
/// Default age a file must exceed before it can be selected, in hours
pub const DEFAULT_AGE_CUTOFF_HOURS: u64 = 6;

/// Source of a configuration value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfigSource {
    /// Value provided via CLI argument (highest precedence).
    Cli,
    /// Value loaded from configuration file.
    Config,
    /// Value provided programmatically (e.g., `Config::builder()`).
    Programmatic,
    /// Built-in default value (lowest precedence).
    Default,
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cli => write!(f, "cli"),
            Self::Config => write!(f, "config"),
            Self::Programmatic => write!(f, "programmatic"),
            Self::Default => write!(f, "default"),
        }
    }
}

/// Order in which scanned candidates are offered to the greedy selection.
///
/// Directory enumeration order is not stable across platforms, so the default
/// sorts by file name. `Listing` keeps whatever the directory read yields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ListingOrder {
    /// Lexicographic by file name
    #[default]
    Name,
    /// Oldest modification time first, ties broken by name
    Mtime,
    /// Raw directory enumeration order
    Listing,
}

impl fmt::Display for ListingOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Name => write!(f, "name"),
            Self::Mtime => write!(f, "mtime"),
            Self::Listing => write!(f, "listing"),
        }
    }
}

impl FromStr for ListingOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "name" => Ok(Self::Name),
            "mtime" => Ok(Self::Mtime),
            "listing" => Ok(Self::Listing),
            other => Err(format!(
                "unknown listing order '{other}' (expected name, mtime or listing)"
            )),
        }
    }
}

/// Directory layout: where media comes from and where bundles go.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PathsConfig {
    pub source_dir: Option<Utf8PathBuf>,
    pub target_dir: Option<Utf8PathBuf>,
    pub completed_dir: Option<Utf8PathBuf>,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            source_dir: Some(Utf8PathBuf::from(DEFAULT_SOURCE_DIR)),
            target_dir: Some(Utf8PathBuf::from(DEFAULT_TARGET_DIR)),
            completed_dir: Some(Utf8PathBuf::from(DEFAULT_COMPLETED_DIR)),
        }
    }
}

/// Selection parameters for the greedy packing pass.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SelectionConfig {
    /// Recognized media extension. A leading dot is accepted and stripped.
    pub extension: Option<String>,
    /// Upper bound of the size window in GiB (inclusive)
    pub max_size_gib: Option<f64>,
    /// Lower bound of the size window in GiB (inclusive)
    pub min_size_gib: Option<f64>,
    /// Files modified within this many hours of the run start are skipped
    pub age_cutoff_hours: Option<u64>,
    /// Candidate order for the greedy pass
    pub order: Option<ListingOrder>,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            extension: Some(DEFAULT_EXTENSION.to_string()),
            max_size_gib: Some(DEFAULT_MAX_SIZE_GIB),
            min_size_gib: Some(DEFAULT_MIN_SIZE_GIB),
            age_cutoff_hours: Some(DEFAULT_AGE_CUTOFF_HOURS),
            order: Some(ListingOrder::default()),
        }
    }
}

/// Configuration for vidbundle operations.
///
/// `Config` provides hierarchical configuration with discovery and precedence:
/// CLI arguments > config file > built-in defaults.
///
/// # Discovery
///
/// Use [`Config::discover()`] for CLI-like behavior that searches for
/// `.vidbundle/config.toml` upward from the current directory and applies
/// built-in defaults for unspecified values. Use [`Config::builder()`] for
/// programmatic configuration.
///
/// # Configuration File Format
///
/// ```toml
/// [paths]
/// source_dir = "/storage/STUDIO/youtube"
/// target_dir = "/storage/STUDIO/youtube/0_TAR"
/// completed_dir = "/storage/STUDIO/youtube/0_COMPLETED"
///
/// [selection]
/// extension = "mp4"
/// max_size_gib = 18.0
/// min_size_gib = 17.1
/// age_cutoff_hours = 6
/// order = "name"
/// ```
///
/// Relative directories are resolved against the working directory of the
/// process, not the location of the config file.
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory layout.
    pub paths: PathsConfig,
    /// Selection parameters.
    pub selection: SelectionConfig,
    /// Source attribution for each setting (for `vidbundle config`).
    pub source_attribution: HashMap<String, ConfigSource>,
}

impl Config {
    #[must_use]
    pub fn source_dir(&self) -> Utf8PathBuf {
        self.paths
            .source_dir
            .clone()
            .unwrap_or_else(|| Utf8PathBuf::from(DEFAULT_SOURCE_DIR))
    }

    #[must_use]
    pub fn target_dir(&self) -> Utf8PathBuf {
        self.paths
            .target_dir
            .clone()
            .unwrap_or_else(|| Utf8PathBuf::from(DEFAULT_TARGET_DIR))
    }

    #[must_use]
    pub fn completed_dir(&self) -> Utf8PathBuf {
        self.paths
            .completed_dir
            .clone()
            .unwrap_or_else(|| Utf8PathBuf::from(DEFAULT_COMPLETED_DIR))
    }

    /// Media extension without a leading dot.
    #[must_use]
    pub fn extension(&self) -> String {
        let raw = self.selection.extension.as_deref().unwrap_or(DEFAULT_EXTENSION);
        raw.strip_prefix('.').unwrap_or(raw).to_string()
    }

    #[must_use]
    pub fn max_size_gib(&self) -> f64 {
        self.selection.max_size_gib.unwrap_or(DEFAULT_MAX_SIZE_GIB)
    }

    #[must_use]
    pub fn min_size_gib(&self) -> f64 {
        self.selection.min_size_gib.unwrap_or(DEFAULT_MIN_SIZE_GIB)
    }

    #[must_use]
    pub fn age_cutoff_hours(&self) -> u64 {
        self.selection
            .age_cutoff_hours
            .unwrap_or(DEFAULT_AGE_CUTOFF_HOURS)
    }

    #[must_use]
    pub fn order(&self) -> ListingOrder {
        self.selection.order.unwrap_or_default()
    }
}

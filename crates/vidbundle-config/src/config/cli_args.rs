use camino::Utf8PathBuf;
use std::path::PathBuf;

use super::ListingOrder;

/// CLI arguments for configuration overrides
#[derive(Debug, Clone, Default)]
pub struct CliArgs {
    /// Explicit config file; disables upward discovery
    pub config_path: Option<PathBuf>,
    pub source_dir: Option<Utf8PathBuf>,
    pub target_dir: Option<Utf8PathBuf>,
    pub completed_dir: Option<Utf8PathBuf>,
    pub extension: Option<String>,
    pub max_size_gib: Option<f64>,
    pub min_size_gib: Option<f64>,
    pub age_cutoff_hours: Option<u64>,
    pub order: Option<ListingOrder>,
}

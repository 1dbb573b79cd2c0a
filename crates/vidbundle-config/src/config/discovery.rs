use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::error::{BundleError, ConfigError};

use super::{CliArgs, Config, ConfigSource, PathsConfig, SelectionConfig};

/// Keys tracked in `source_attribution`, in display order.
pub(crate) const CONFIG_KEYS: [&str; 8] = [
    "source_dir",
    "target_dir",
    "completed_dir",
    "extension",
    "max_size_gib",
    "min_size_gib",
    "age_cutoff_hours",
    "order",
];

/// TOML configuration file structure
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct TomlConfig {
    paths: Option<FilePaths>,
    selection: Option<FileSelection>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FilePaths {
    source_dir: Option<camino::Utf8PathBuf>,
    target_dir: Option<camino::Utf8PathBuf>,
    completed_dir: Option<camino::Utf8PathBuf>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileSelection {
    extension: Option<String>,
    max_size_gib: Option<f64>,
    min_size_gib: Option<f64>,
    age_cutoff_hours: Option<u64>,
    order: Option<super::ListingOrder>,
}

/// Overwrite `$slot` with `$value` when present and record who set it.
macro_rules! apply {
    ($attr:expr, $slot:expr, $value:expr, $key:literal, $source:expr) => {
        if let Some(v) = $value {
            $slot = Some(v);
            $attr.insert($key.to_string(), $source.clone());
        }
    };
}

impl Config {
    /// Discover and load configuration with precedence: CLI > file > defaults
    ///
    /// Uses the current working directory for config file discovery when no
    /// explicit path is provided in `cli_args`.
    pub fn discover(cli_args: &CliArgs) -> Result<Self, BundleError> {
        let start_dir = std::env::current_dir()
            .map_err(|e| BundleError::fs("determine", "current directory", e))?;
        Self::discover_from(&start_dir, cli_args)
    }

    /// Discover and load configuration starting from a specific directory
    ///
    /// This is the path-driven variant used by tests to avoid process-global state.
    pub fn discover_from(start_dir: &Path, cli_args: &CliArgs) -> Result<Self, BundleError> {
        let mut source_attribution: HashMap<String, ConfigSource> = CONFIG_KEYS
            .iter()
            .map(|key| ((*key).to_string(), ConfigSource::Default))
            .collect();

        let mut paths = PathsConfig::default();
        let mut selection = SelectionConfig::default();

        let config_path = match &cli_args.config_path {
            Some(explicit) => {
                if !explicit.exists() {
                    return Err(ConfigError::NotFound {
                        path: explicit.display().to_string(),
                    }
                    .into());
                }
                Some(explicit.clone())
            }
            None => Self::discover_config_file_from(start_dir),
        };

        if let Some(path) = &config_path {
            tracing::debug!(path = %path.display(), "loading config file");
            let file_config = Self::load_config_file(path)?;
            let src = ConfigSource::Config;

            if let Some(file_paths) = file_config.paths {
                apply!(source_attribution, paths.source_dir, file_paths.source_dir, "source_dir", src);
                apply!(source_attribution, paths.target_dir, file_paths.target_dir, "target_dir", src);
                apply!(source_attribution, paths.completed_dir, file_paths.completed_dir, "completed_dir", src);
            }

            if let Some(file_selection) = file_config.selection {
                apply!(source_attribution, selection.extension, file_selection.extension, "extension", src);
                apply!(source_attribution, selection.max_size_gib, file_selection.max_size_gib, "max_size_gib", src);
                apply!(source_attribution, selection.min_size_gib, file_selection.min_size_gib, "min_size_gib", src);
                apply!(source_attribution, selection.age_cutoff_hours, file_selection.age_cutoff_hours, "age_cutoff_hours", src);
                apply!(source_attribution, selection.order, file_selection.order, "order", src);
            }
        }

        // CLI overrides everything
        let cli = ConfigSource::Cli;
        apply!(source_attribution, paths.source_dir, cli_args.source_dir.clone(), "source_dir", cli);
        apply!(source_attribution, paths.target_dir, cli_args.target_dir.clone(), "target_dir", cli);
        apply!(source_attribution, paths.completed_dir, cli_args.completed_dir.clone(), "completed_dir", cli);
        apply!(source_attribution, selection.extension, cli_args.extension.clone(), "extension", cli);
        apply!(source_attribution, selection.max_size_gib, cli_args.max_size_gib, "max_size_gib", cli);
        apply!(source_attribution, selection.min_size_gib, cli_args.min_size_gib, "min_size_gib", cli);
        apply!(source_attribution, selection.age_cutoff_hours, cli_args.age_cutoff_hours, "age_cutoff_hours", cli);
        apply!(source_attribution, selection.order, cli_args.order, "order", cli);

        let config = Self {
            paths,
            selection,
            source_attribution,
        };

        config.validate()?;

        Ok(config)
    }

    /// Discover config file by searching upward from a given directory
    ///
    /// Walks up the directory tree looking for `.vidbundle/config.toml`,
    /// stopping at repository root markers (.git, .hg, .svn) or filesystem root.
    #[must_use]
    pub fn discover_config_file_from(start_dir: &Path) -> Option<PathBuf> {
        let mut current_dir = start_dir;

        loop {
            let config_path = current_dir.join(".vidbundle").join("config.toml");
            if config_path.is_file() {
                return Some(config_path);
            }

            if current_dir.join(".git").exists()
                || current_dir.join(".hg").exists()
                || current_dir.join(".svn").exists()
            {
                return None;
            }

            current_dir = current_dir.parent()?;
        }
    }

    fn load_config_file(path: &Path) -> Result<TomlConfig, BundleError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| BundleError::fs("read config file", path, e))?;
        toml::from_str(&content).map_err(|e| {
            ConfigError::InvalidFile(format!("{}: {}", path.display(), e.message())).into()
        })
    }
}

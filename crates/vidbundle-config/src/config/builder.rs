use camino::Utf8PathBuf;
use std::collections::HashMap;

use crate::error::BundleError;

use super::discovery::CONFIG_KEYS;
use super::{Config, ConfigSource, ListingOrder, PathsConfig, SelectionConfig};

impl Config {
    /// Create a builder for programmatic configuration.
    ///
    /// # Example
    ///
    /// ```rust
    /// use vidbundle_config::Config;
    ///
    /// let config = Config::builder()
    ///     .source_dir("/media/incoming")
    ///     .target_dir("/media/tar")
    ///     .completed_dir("/media/done")
    ///     .size_window_gib(1.0, 2.0)
    ///     .build()
    ///     .unwrap();
    /// assert_eq!(config.extension(), "mp4");
    /// ```
    #[must_use]
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::new()
    }
}

/// Builder for programmatic configuration of vidbundle.
///
/// No config file is read. Values set on the builder are attributed to
/// `ConfigSource::Programmatic`; everything else keeps its built-in default.
#[derive(Debug, Clone, Default)]
pub struct ConfigBuilder {
    source_dir: Option<Utf8PathBuf>,
    target_dir: Option<Utf8PathBuf>,
    completed_dir: Option<Utf8PathBuf>,
    extension: Option<String>,
    max_size_gib: Option<f64>,
    min_size_gib: Option<f64>,
    age_cutoff_hours: Option<u64>,
    order: Option<ListingOrder>,
}

impl ConfigBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn source_dir(mut self, path: impl Into<Utf8PathBuf>) -> Self {
        self.source_dir = Some(path.into());
        self
    }

    #[must_use]
    pub fn target_dir(mut self, path: impl Into<Utf8PathBuf>) -> Self {
        self.target_dir = Some(path.into());
        self
    }

    #[must_use]
    pub fn completed_dir(mut self, path: impl Into<Utf8PathBuf>) -> Self {
        self.completed_dir = Some(path.into());
        self
    }

    /// Media extension, with or without a leading dot.
    #[must_use]
    pub fn extension(mut self, ext: impl Into<String>) -> Self {
        self.extension = Some(ext.into());
        self
    }

    #[must_use]
    pub fn max_size_gib(mut self, gib: f64) -> Self {
        self.max_size_gib = Some(gib);
        self
    }

    #[must_use]
    pub fn min_size_gib(mut self, gib: f64) -> Self {
        self.min_size_gib = Some(gib);
        self
    }

    /// Set both ends of the size window at once.
    #[must_use]
    pub fn size_window_gib(self, min: f64, max: f64) -> Self {
        self.min_size_gib(min).max_size_gib(max)
    }

    #[must_use]
    pub fn age_cutoff_hours(mut self, hours: u64) -> Self {
        self.age_cutoff_hours = Some(hours);
        self
    }

    #[must_use]
    pub fn order(mut self, order: ListingOrder) -> Self {
        self.order = Some(order);
        self
    }

    /// Build the configuration, validating the result.
    pub fn build(self) -> Result<Config, BundleError> {
        let mut source_attribution: HashMap<String, ConfigSource> = CONFIG_KEYS
            .iter()
            .map(|key| ((*key).to_string(), ConfigSource::Default))
            .collect();
        let mut mark = |key: &str, set: bool| {
            if set {
                source_attribution.insert(key.to_string(), ConfigSource::Programmatic);
            }
        };

        mark("source_dir", self.source_dir.is_some());
        mark("target_dir", self.target_dir.is_some());
        mark("completed_dir", self.completed_dir.is_some());
        mark("extension", self.extension.is_some());
        mark("max_size_gib", self.max_size_gib.is_some());
        mark("min_size_gib", self.min_size_gib.is_some());
        mark("age_cutoff_hours", self.age_cutoff_hours.is_some());
        mark("order", self.order.is_some());

        let paths_default = PathsConfig::default();
        let selection_default = SelectionConfig::default();

        let config = Config {
            paths: PathsConfig {
                source_dir: self.source_dir.or(paths_default.source_dir),
                target_dir: self.target_dir.or(paths_default.target_dir),
                completed_dir: self.completed_dir.or(paths_default.completed_dir),
            },
            selection: SelectionConfig {
                extension: self.extension.or(selection_default.extension),
                max_size_gib: self.max_size_gib.or(selection_default.max_size_gib),
                min_size_gib: self.min_size_gib.or(selection_default.min_size_gib),
                age_cutoff_hours: self.age_cutoff_hours.or(selection_default.age_cutoff_hours),
                order: self.order.or(selection_default.order),
            },
            source_attribution,
        };

        config.validate()?;
        Ok(config)
    }
}

//! Configuration management for vidbundle
//!
//! This module provides hierarchical configuration with discovery and precedence:
//! CLI > file > defaults. Supports TOML configuration files with `[paths]` and
//! `[selection]` sections.

mod builder;
mod cli_args;
mod discovery;
mod model;
mod sources;
mod validation;

pub use builder::ConfigBuilder;
pub use cli_args::CliArgs;
pub use model::*;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{BundleError, ConfigError};
    use std::fs;
    use std::path::{Path, PathBuf};
    use tempfile::TempDir;

    fn create_test_config_file(dir: &Path, content: &str) -> PathBuf {
        let config_dir = dir.join(".vidbundle");
        fs::create_dir_all(&config_dir).unwrap();

        let config_path = config_dir.join("config.toml");
        fs::write(&config_path, content).unwrap();

        config_path
    }

    /// Start directory with a `.git` marker so discovery never escapes the tempdir.
    fn isolated_root() -> TempDir {
        let temp_dir = TempDir::new().unwrap();
        fs::create_dir(temp_dir.path().join(".git")).unwrap();
        temp_dir
    }

    fn assert_invalid_value(err: BundleError, expected_key: &str) {
        match err {
            BundleError::Config(ConfigError::InvalidValue { key, .. }) => {
                assert_eq!(key, expected_key);
            }
            other => panic!("expected InvalidValue for {expected_key}, got {other:?}"),
        }
    }

    #[test]
    fn test_default_config() {
        let temp_dir = isolated_root();
        let config = Config::discover_from(temp_dir.path(), &CliArgs::default()).unwrap();

        assert_eq!(config.source_dir(), DEFAULT_SOURCE_DIR);
        assert_eq!(config.target_dir(), DEFAULT_TARGET_DIR);
        assert_eq!(config.completed_dir(), DEFAULT_COMPLETED_DIR);
        assert_eq!(config.extension(), "mp4");
        assert!((config.max_size_gib() - 18.0).abs() < f64::EPSILON);
        assert!((config.min_size_gib() - 17.1).abs() < f64::EPSILON);
        assert_eq!(config.age_cutoff_hours(), 6);
        assert_eq!(config.order(), ListingOrder::Name);
        assert!(
            config
                .source_attribution
                .values()
                .all(|s| *s == ConfigSource::Default)
        );
    }

    #[test]
    fn test_config_discovery_with_cli_override() {
        let temp_dir = isolated_root();
        create_test_config_file(
            temp_dir.path(),
            r#"
[paths]
source_dir = "/data/videos"
target_dir = "/data/tar"

[selection]
max_size_gib = 4.0
min_size_gib = 3.5
order = "mtime"
"#,
        );

        let cli_args = CliArgs {
            target_dir: Some("/override/tar".into()),
            min_size_gib: Some(3.0),
            ..CliArgs::default()
        };

        let config = Config::discover_from(temp_dir.path(), &cli_args).unwrap();

        assert_eq!(config.source_dir(), "/data/videos");
        assert_eq!(config.target_dir(), "/override/tar");
        assert_eq!(config.completed_dir(), DEFAULT_COMPLETED_DIR);
        assert!((config.min_size_gib() - 3.0).abs() < f64::EPSILON);
        assert!((config.max_size_gib() - 4.0).abs() < f64::EPSILON);
        assert_eq!(config.order(), ListingOrder::Mtime);

        assert_eq!(config.source_attribution["source_dir"], ConfigSource::Config);
        assert_eq!(config.source_attribution["target_dir"], ConfigSource::Cli);
        assert_eq!(config.source_attribution["min_size_gib"], ConfigSource::Cli);
        assert_eq!(config.source_attribution["completed_dir"], ConfigSource::Default);
    }

    #[test]
    fn test_discovery_searches_upward() {
        let temp_dir = isolated_root();
        create_test_config_file(temp_dir.path(), "[selection]\nextension = \".mkv\"\n");
        let nested = temp_dir.path().join("a").join("b");
        fs::create_dir_all(&nested).unwrap();

        let found = Config::discover_config_file_from(&nested).unwrap();
        assert_eq!(found, temp_dir.path().join(".vidbundle").join("config.toml"));

        let config = Config::discover_from(&nested, &CliArgs::default()).unwrap();
        assert_eq!(config.extension(), "mkv");
    }

    #[test]
    fn test_discovery_stops_at_repository_root() {
        let outer = TempDir::new().unwrap();
        create_test_config_file(outer.path(), "[selection]\nextension = \"mkv\"\n");
        let repo = outer.path().join("repo");
        fs::create_dir_all(repo.join(".git")).unwrap();

        assert!(Config::discover_config_file_from(&repo).is_none());
    }

    #[test]
    fn test_explicit_config_path_must_exist() {
        let temp_dir = isolated_root();
        let cli_args = CliArgs {
            config_path: Some(temp_dir.path().join("missing.toml")),
            ..CliArgs::default()
        };

        let err = Config::discover_from(temp_dir.path(), &cli_args).unwrap_err();
        assert!(matches!(
            err,
            BundleError::Config(ConfigError::NotFound { .. })
        ));
    }

    #[test]
    fn test_invalid_toml_is_reported_as_invalid_file() {
        let temp_dir = isolated_root();
        create_test_config_file(temp_dir.path(), "[selection\nextension = ");

        let err = Config::discover_from(temp_dir.path(), &CliArgs::default()).unwrap_err();
        assert!(matches!(
            err,
            BundleError::Config(ConfigError::InvalidFile(_))
        ));
    }

    #[test]
    fn test_unknown_keys_are_rejected() {
        let temp_dir = isolated_root();
        create_test_config_file(temp_dir.path(), "[selection]\nmax_size = 4.0\n");

        let err = Config::discover_from(temp_dir.path(), &CliArgs::default()).unwrap_err();
        assert!(matches!(
            err,
            BundleError::Config(ConfigError::InvalidFile(_))
        ));
    }

    #[test]
    fn test_min_greater_than_max_is_rejected() {
        let err = Config::builder()
            .size_window_gib(5.0, 4.0)
            .build()
            .unwrap_err();
        assert_invalid_value(err, "min_size_gib");
    }

    #[test]
    fn test_non_positive_sizes_are_rejected() {
        let err = Config::builder().max_size_gib(0.0).build().unwrap_err();
        assert_invalid_value(err, "max_size_gib");

        let err = Config::builder()
            .min_size_gib(f64::NAN)
            .build()
            .unwrap_err();
        assert_invalid_value(err, "min_size_gib");
    }

    #[test]
    fn test_extension_validation() {
        let err = Config::builder().extension(".").build().unwrap_err();
        assert_invalid_value(err, "extension");

        let err = Config::builder().extension("mp4/x").build().unwrap_err();
        assert_invalid_value(err, "extension");

        let config = Config::builder().extension(".mov").build().unwrap();
        assert_eq!(config.extension(), "mov");
    }

    #[test]
    fn test_age_cutoff_limit() {
        let err = Config::builder()
            .age_cutoff_hours(24 * 365 + 1)
            .build()
            .unwrap_err();
        assert_invalid_value(err, "age_cutoff_hours");

        let config = Config::builder().age_cutoff_hours(0).build().unwrap();
        assert_eq!(config.age_cutoff_hours(), 0);
    }

    #[test]
    fn test_empty_directory_is_rejected() {
        let err = Config::builder().target_dir("  ").build().unwrap_err();
        assert_invalid_value(err, "target_dir");
    }

    #[test]
    fn test_builder_attributes_programmatic_source() {
        let config = Config::builder()
            .source_dir("/in")
            .order(ListingOrder::Listing)
            .build()
            .unwrap();

        assert_eq!(config.source_attribution["source_dir"], ConfigSource::Programmatic);
        assert_eq!(config.source_attribution["order"], ConfigSource::Programmatic);
        assert_eq!(config.source_attribution["target_dir"], ConfigSource::Default);
    }

    #[test]
    fn test_effective_config_lists_every_key() {
        let config = Config::builder().min_size_gib(1.5).build().unwrap();
        let effective = config.effective_config();

        assert_eq!(effective.len(), 8);
        assert_eq!(
            effective["min_size_gib"],
            ("1.5".to_string(), "programmatic".to_string())
        );
        assert_eq!(
            effective["order"],
            ("name".to_string(), "default".to_string())
        );
    }

    #[test]
    fn test_listing_order_parsing() {
        assert_eq!("mtime".parse::<ListingOrder>(), Ok(ListingOrder::Mtime));
        assert_eq!("listing".parse::<ListingOrder>(), Ok(ListingOrder::Listing));
        assert!("random".parse::<ListingOrder>().is_err());
    }
}

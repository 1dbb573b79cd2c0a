use camino::Utf8PathBuf;

use crate::error::{BundleError, ConfigError};

use super::Config;

/// Upper bound for the age cutoff: one year.
const MAX_AGE_CUTOFF_HOURS: u64 = 24 * 365;

fn invalid(key: &str, value: impl Into<String>) -> BundleError {
    BundleError::Config(ConfigError::InvalidValue {
        key: key.to_string(),
        value: value.into(),
    })
}

fn validate_dir(key: &str, dir: Option<&Utf8PathBuf>) -> Result<(), BundleError> {
    match dir {
        Some(path) if path.as_str().trim().is_empty() => Err(invalid(key, "must not be empty")),
        _ => Ok(()),
    }
}

fn validate_size(key: &str, gib: Option<f64>) -> Result<(), BundleError> {
    match gib {
        Some(v) if !v.is_finite() => Err(invalid(key, format!("{v} is not a finite number"))),
        Some(v) if v <= 0.0 => Err(invalid(key, format!("{v} must be greater than 0"))),
        _ => Ok(()),
    }
}

impl Config {
    /// Validate configuration values
    pub(crate) fn validate(&self) -> Result<(), BundleError> {
        validate_dir("source_dir", self.paths.source_dir.as_ref())?;
        validate_dir("target_dir", self.paths.target_dir.as_ref())?;
        validate_dir("completed_dir", self.paths.completed_dir.as_ref())?;

        validate_size("max_size_gib", self.selection.max_size_gib)?;
        validate_size("min_size_gib", self.selection.min_size_gib)?;

        let (min, max) = (self.min_size_gib(), self.max_size_gib());
        if min > max {
            return Err(invalid(
                "min_size_gib",
                format!("{min} exceeds max_size_gib ({max})"),
            ));
        }

        if let Some(ext) = &self.selection.extension {
            let bare = ext.strip_prefix('.').unwrap_or(ext);
            if bare.is_empty() {
                return Err(invalid("extension", "must not be empty"));
            }
            if bare.contains(['/', '\\']) || bare.chars().any(char::is_whitespace) {
                return Err(invalid(
                    "extension",
                    format!("'{ext}' must not contain path separators or whitespace"),
                ));
            }
        }

        if let Some(hours) = self.selection.age_cutoff_hours
            && hours > MAX_AGE_CUTOFF_HOURS
        {
            return Err(invalid(
                "age_cutoff_hours",
                format!("{hours} exceeds maximum limit of {MAX_AGE_CUTOFF_HOURS} hours"),
            ));
        }

        Ok(())
    }
}

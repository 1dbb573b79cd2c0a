use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Library-level error type with rich context and user-friendly reporting.
///
/// `BundleError` is the error type returned by every fallible vidbundle
/// library operation. It provides:
/// - Detailed error information for programmatic handling
/// - User-friendly messages with context and suggestions
/// - Mapping to CLI exit codes for consistent error reporting
///
/// # Exit Code Mapping
///
/// | Exit Code | Error Type |
/// |-----------|------------|
/// | 2 | Configuration errors |
/// | 74 | Filesystem and archive errors |
///
/// Soft outcomes (no files selected, insufficient size) are not errors and
/// never appear here; see `Outcome::exit_code()` in the engine crate.
///
/// # Example
///
/// ```rust
/// use vidbundle_utils::error::{BundleError, ConfigError};
/// use vidbundle_utils::exit_codes::ExitCode;
///
/// let err = BundleError::Config(ConfigError::InvalidValue {
///     key: "min_size_gib".to_string(),
///     value: "must be greater than 0".to_string(),
/// });
/// assert_eq!(err.to_exit_code(), ExitCode::CLI_ARGS);
/// ```
///
/// Library code returns `BundleError` and does NOT call `std::process::exit()`.
#[derive(Error, Debug)]
pub enum BundleError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Failed to {action} {}: {source}", path.display())]
    Filesystem {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Archive error at {}: {reason}", path.display())]
    Archive { path: PathBuf, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

impl BundleError {
    /// Wrap an I/O error with the action that failed and the path it touched.
    pub fn fs(action: &'static str, path: impl AsRef<Path>, source: io::Error) -> Self {
        Self::Filesystem {
            action,
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Tar construction failure for the archive at `path`.
    pub fn archive(path: impl AsRef<Path>, reason: impl Into<String>) -> Self {
        Self::Archive {
            path: path.as_ref().to_path_buf(),
            reason: reason.into(),
        }
    }

    /// Get a user-friendly error message with context and actionable suggestions.
    #[must_use]
    pub fn display_for_user(&self) -> String {
        let mut output = format!("Error: {}\n", self.user_message());

        if let Some(ctx) = self.context() {
            output.push_str(&format!("\nContext: {ctx}\n"));
        }

        let suggestions = self.suggestions();
        if !suggestions.is_empty() {
            output.push_str("\nSuggestions:\n");
            for suggestion in suggestions {
                output.push_str(&format!("  • {suggestion}\n"));
            }
        }

        output
    }

    /// Map this error to the appropriate CLI exit code.
    #[must_use]
    pub fn to_exit_code(&self) -> crate::exit_codes::ExitCode {
        use crate::exit_codes::ExitCode;

        match self {
            BundleError::Config(_) => ExitCode::CLI_ARGS,
            BundleError::Filesystem { .. } | BundleError::Archive { .. } | BundleError::Io(_) => {
                ExitCode::FILESYSTEM
            }
        }
    }
}

/// Trait for providing user-friendly error reporting with context and suggestions
pub trait UserFriendlyError {
    /// Get a user-friendly error message
    fn user_message(&self) -> String;

    /// Get contextual information about the error
    fn context(&self) -> Option<String>;

    /// Get suggested actions to resolve the error
    fn suggestions(&self) -> Vec<String>;

    /// Get the error category for grouping similar errors
    fn category(&self) -> ErrorCategory;
}

/// Categories of errors for better organization and handling
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    FileSystem,
    Archive,
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Configuration => write!(f, "Configuration"),
            Self::FileSystem => write!(f, "File System"),
            Self::Archive => write!(f, "Archive"),
        }
    }
}

/// Configuration-related errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid configuration file: {0}")]
    InvalidFile(String),

    #[error("Invalid configuration value for {key}: {value}")]
    InvalidValue { key: String, value: String },

    #[error("Configuration file not found at {path}")]
    NotFound { path: String },
}

impl UserFriendlyError for ConfigError {
    fn user_message(&self) -> String {
        match self {
            Self::InvalidFile(reason) => {
                format!("Configuration file has invalid format: {reason}")
            }
            Self::InvalidValue { key, value } => {
                format!("Configuration '{key}' has invalid value: {value}")
            }
            Self::NotFound { path } => format!("Configuration file not found: {path}"),
        }
    }

    fn context(&self) -> Option<String> {
        match self {
            Self::InvalidFile(_) => Some(
                "Configuration files must be valid TOML with optional [paths] and [selection] sections."
                    .to_string(),
            ),
            Self::InvalidValue { key, .. } => Some(format!(
                "The '{key}' configuration option has specific format requirements."
            )),
            Self::NotFound { .. } => Some(
                "vidbundle searches for .vidbundle/config.toml starting from the current directory upward."
                    .to_string(),
            ),
        }
    }

    fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidFile(_) => vec![
                "Check the TOML syntax using a TOML validator".to_string(),
                "Run 'vidbundle config' without the file to see the expected keys".to_string(),
            ],
            Self::InvalidValue { key, .. } => match key.as_str() {
                "min_size_gib" | "max_size_gib" => vec![
                    "Use positive GiB values such as 17.1 and 18.0".to_string(),
                    "Keep min_size_gib less than or equal to max_size_gib".to_string(),
                ],
                "extension" => vec![
                    "Use a bare extension such as 'mp4' (a leading dot is accepted)".to_string(),
                ],
                "order" => vec!["Use 'name', 'mtime' or 'listing'".to_string()],
                _ => vec![
                    "Check the documentation for valid values for this option".to_string(),
                    "Remove the option to use the default value".to_string(),
                ],
            },
            Self::NotFound { .. } => vec![
                "Create .vidbundle/config.toml in your project root".to_string(),
                "Use CLI flags instead of a configuration file".to_string(),
            ],
        }
    }

    fn category(&self) -> ErrorCategory {
        ErrorCategory::Configuration
    }
}

impl UserFriendlyError for BundleError {
    fn user_message(&self) -> String {
        match self {
            Self::Config(err) => err.user_message(),
            Self::Filesystem {
                action,
                path,
                source,
            } => format!("Could not {action} '{}': {source}", path.display()),
            Self::Archive { path, reason } => {
                format!("Could not build archive '{}': {reason}", path.display())
            }
            Self::Io(err) => format!("Filesystem operation failed: {err}"),
        }
    }

    fn context(&self) -> Option<String> {
        match self {
            Self::Config(err) => err.context(),
            Self::Filesystem { source, .. } if source.kind() == io::ErrorKind::NotFound => Some(
                "A file or directory disappeared or was never created. Another run may have moved it."
                    .to_string(),
            ),
            Self::Filesystem { .. } | Self::Io(_) => Some(
                "Completed steps are not rolled back. Check the bundle log in the target directory."
                    .to_string(),
            ),
            Self::Archive { .. } => None,
        }
    }

    fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Config(err) => err.suggestions(),
            Self::Filesystem { source, .. } if source.kind() == io::ErrorKind::PermissionDenied => {
                vec![
                    "Check permissions on the source, target and completed directories".to_string(),
                ]
            }
            Self::Filesystem { .. } | Self::Io(_) | Self::Archive { .. } => vec![
                "Verify free space in the target directory".to_string(),
                "Make sure no other vidbundle run uses the same directories".to_string(),
            ],
        }
    }

    fn category(&self) -> ErrorCategory {
        match self {
            Self::Config(_) => ErrorCategory::Configuration,
            Self::Archive { .. } => ErrorCategory::Archive,
            Self::Filesystem { .. } | Self::Io(_) => ErrorCategory::FileSystem,
        }
    }
}

/// Result type for vidbundle library operations
pub type Result<T, E = BundleError> = std::result::Result<T, E>;

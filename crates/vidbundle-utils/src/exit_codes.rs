//! Exit code constants for vidbundle.
//!
//! Every run outcome and every error class gets its own exit code so that
//! scripts driving `vidbundle pack` can branch without parsing output.
//!
//! # Exit Code Table
//!
//! | Code | Constant | Description |
//! |------|----------|-------------|
//! | 0 | `SUCCESS` | Bundle packed (or informational command succeeded) |
//! | 1 | `INTERNAL` | General/internal failure |
//! | 2 | `CLI_ARGS` | Invalid CLI arguments or configuration |
//! | 3 | `NO_FILES_SELECTED` | No eligible file fit the size window |
//! | 4 | `INSUFFICIENT_SIZE` | Selected files did not reach the minimum size |
//! | 74 | `FILESYSTEM` | I/O failure while scanning, packing or moving |

/// Exit codes matching the documented exit code table.
///
/// Use the named constants, or [`as_i32()`](Self::as_i32) to get the numeric
/// value for `std::process::exit()`.
///
/// # Example
///
/// ```rust
/// use vidbundle_utils::exit_codes::ExitCode;
///
/// assert_eq!(ExitCode::SUCCESS.as_i32(), 0);
/// assert_eq!(ExitCode::INSUFFICIENT_SIZE, ExitCode::from_i32(4));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitCode(i32);

impl ExitCode {
    /// Success - a bundle was packed, or the command completed
    pub const SUCCESS: ExitCode = ExitCode(0);

    /// Internal error - general failure
    pub const INTERNAL: ExitCode = ExitCode(1);

    /// CLI arguments error - invalid arguments or configuration
    pub const CLI_ARGS: ExitCode = ExitCode(2);

    /// No files selected - nothing eligible fit under the maximum size
    pub const NO_FILES_SELECTED: ExitCode = ExitCode(3);

    /// Insufficient size - the selection stayed below the minimum size
    pub const INSUFFICIENT_SIZE: ExitCode = ExitCode(4);

    /// Filesystem failure (matches sysexits `EX_IOERR`)
    pub const FILESYSTEM: ExitCode = ExitCode(74);

    /// Get the numeric exit code value.
    #[must_use]
    pub const fn as_i32(self) -> i32 {
        self.0
    }

    /// Create an ExitCode from a raw i32 value.
    ///
    /// Prefer using the named constants when possible.
    #[must_use]
    pub const fn from_i32(code: i32) -> Self {
        ExitCode(code)
    }

    /// Whether this code reports success.
    #[must_use]
    pub const fn is_success(self) -> bool {
        self.0 == 0
    }
}

impl From<i32> for ExitCode {
    fn from(code: i32) -> Self {
        ExitCode(code)
    }
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> Self {
        code.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes_are_distinct() {
        let codes = [
            ExitCode::SUCCESS,
            ExitCode::INTERNAL,
            ExitCode::CLI_ARGS,
            ExitCode::NO_FILES_SELECTED,
            ExitCode::INSUFFICIENT_SIZE,
            ExitCode::FILESYSTEM,
        ];
        for (i, a) in codes.iter().enumerate() {
            for b in &codes[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_round_trip_through_i32() {
        let raw: i32 = ExitCode::FILESYSTEM.into();
        assert_eq!(raw, 74);
        assert_eq!(ExitCode::from(raw), ExitCode::FILESYSTEM);
        assert!(ExitCode::SUCCESS.is_success());
        assert!(!ExitCode::NO_FILES_SELECTED.is_success());
    }
}

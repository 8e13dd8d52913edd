//! CLI output: error mapping from domain errors to stable CLI surface.

use crate::error::{ApiError, SealError};
use owo_colors::OwoColorize;

/// Unsupported entry found in the tree (EX_DATAERR)
pub const EXIT_UNSUPPORTED_ENTRY: i32 = 65;
/// Hash algorithm unavailable (EX_UNAVAILABLE)
pub const EXIT_ALGORITHM_UNAVAILABLE: i32 = 69;
/// Filesystem error without an OS error code (EX_IOERR)
pub const EXIT_IO: i32 = 74;
/// Invalid configuration (EX_CONFIG)
pub const EXIT_CONFIG: i32 = 78;

/// Map domain/service errors to a one-line message for stderr.
pub fn map_error(e: &ApiError, color: bool) -> String {
    if color {
        format!("{} {}", "Error:".red(), e)
    } else {
        format!("Error: {}", e)
    }
}

/// Process exit status for an error.
///
/// Filesystem errors propagate the underlying OS error code; the other
/// kinds use fixed sysexits-style codes that cannot be mistaken for one.
pub fn exit_code(e: &ApiError) -> i32 {
    match e {
        ApiError::Seal(SealError::FileAccess { source, .. }) => {
            source.raw_os_error().filter(|code| *code != 0).unwrap_or(EXIT_IO)
        }
        ApiError::Seal(SealError::UnsupportedEntryType { .. }) => EXIT_UNSUPPORTED_ENTRY,
        ApiError::Seal(SealError::AlgorithmUnavailable(_)) => EXIT_ALGORITHM_UNAVAILABLE,
        ApiError::ConfigError(_) => EXIT_CONFIG,
        ApiError::OutputError(_) => EXIT_IO,
    }
}

//! Error types for directory sealing.

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Kind of a directory entry that cannot be sealed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnsupportedKind {
    BlockDevice,
    CharDevice,
    Fifo,
    Socket,
    Unrecognisable,
}

impl fmt::Display for UnsupportedKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            UnsupportedKind::BlockDevice => "block special",
            UnsupportedKind::CharDevice => "character special",
            UnsupportedKind::Fifo => "FIFO (pipe)",
            UnsupportedKind::Socket => "socket",
            UnsupportedKind::Unrecognisable => "unrecognisable",
        };
        f.write_str(name)
    }
}

/// Errors raised while building a seal tree.
///
/// Every variant is fatal to the build that raised it.
#[derive(Debug, Error)]
pub enum SealError {
    #[error("{source}: {}", path.display())]
    FileAccess {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("A(n) {kind} file was found in the given directory: {}", path.display())]
    UnsupportedEntryType { kind: UnsupportedKind, path: PathBuf },

    #[error("The chosen algorithm is unavailable in the current setup: {0}")]
    AlgorithmUnavailable(String),
}

impl SealError {
    pub(crate) fn file_access(path: &Path, source: io::Error) -> Self {
        SealError::FileAccess {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Errors surfaced by the configuration, logging and CLI layers
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Seal(#[from] SealError),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Output error: {0}")]
    OutputError(String),
}

impl From<config::ConfigError> for ApiError {
    fn from(err: config::ConfigError) -> Self {
        ApiError::ConfigError(err.to_string())
    }
}

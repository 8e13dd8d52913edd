//! Configuration System
//!
//! Startup configuration for sealing: hash algorithm, streaming block size,
//! directory metadata policy and logging. Values are layered from defaults,
//! a config file and `SEALDIR__*` environment variables, then frozen for the
//! rest of the run.

use crate::error::ApiError;
use crate::logging::LoggingConfig;
use crate::tree::builder::{SealOptions, DEFAULT_BLOCK_SIZE};
use crate::tree::hasher::HashAlgorithm;
use serde::{Deserialize, Serialize};
use std::fmt;

mod facade;
mod merge;
mod sources;

pub use facade::ConfigLoader;
pub use sources::global_file::global_config_path;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SealConfig {
    /// Hashing settings
    #[serde(default)]
    pub hash: HashConfig,

    /// Tree shape settings
    #[serde(default)]
    pub tree: TreeConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Hashing configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HashConfig {
    /// Hash algorithm name: sha256, blake3
    #[serde(default = "default_algorithm")]
    pub algorithm: String,

    /// Streaming block size in bytes
    #[serde(default = "default_block_size")]
    pub block_size: usize,
}

fn default_algorithm() -> String {
    HashAlgorithm::default().name().to_string()
}

fn default_block_size() -> usize {
    DEFAULT_BLOCK_SIZE
}

impl Default for HashConfig {
    fn default() -> Self {
        Self {
            algorithm: default_algorithm(),
            block_size: default_block_size(),
        }
    }
}

/// Tree configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TreeConfig {
    /// Fold a directory's own name and permission bits into its seal digest
    #[serde(default)]
    pub directory_metadata: bool,
}

/// Configuration validation errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    Hash(String),
    Logging(String),
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::Hash(msg) => write!(f, "Hash: {}", msg),
            ValidationError::Logging(msg) => write!(f, "Logging: {}", msg),
        }
    }
}

impl std::error::Error for ValidationError {}

impl SealConfig {
    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if let Err(e) = self.hash.algorithm.parse::<HashAlgorithm>() {
            errors.push(ValidationError::Hash(e.to_string()));
        }
        if self.hash.block_size == 0 {
            errors.push(ValidationError::Hash(
                "block_size must be greater than zero".to_string(),
            ));
        }

        if !matches!(self.logging.format.as_str(), "text" | "json") {
            errors.push(ValidationError::Logging(format!(
                "Invalid format '{}' (must be 'text' or 'json')",
                self.logging.format
            )));
        }
        if !matches!(
            self.logging.output.as_str(),
            "stdout" | "stderr" | "file" | "file+stderr"
        ) {
            errors.push(ValidationError::Logging(format!(
                "Invalid output '{}'",
                self.logging.output
            )));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Freeze the hashing and tree settings into build options.
    ///
    /// An unknown algorithm is reported as `AlgorithmUnavailable`.
    pub fn seal_options(&self) -> Result<SealOptions, ApiError> {
        let algorithm: HashAlgorithm = self.hash.algorithm.parse()?;
        if self.hash.block_size == 0 {
            return Err(ApiError::ConfigError(
                "hash.block_size must be greater than zero".to_string(),
            ));
        }
        Ok(SealOptions::default()
            .with_algorithm(algorithm)
            .with_block_size(self.hash.block_size)
            .with_directory_metadata(self.tree.directory_metadata))
    }
}

//! ConfigLoader facade delegating to merge service.

use super::merge::service::MergeService;
use super::SealConfig;
use config::ConfigError;
use std::path::Path;

/// Configuration loader facade.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from the global config file and environment.
    pub fn load() -> Result<SealConfig, ConfigError> {
        MergeService::load()
    }

    /// Load configuration from a specific file (replaces the global file).
    pub fn load_from_file(path: &Path) -> Result<SealConfig, ConfigError> {
        MergeService::load_from_file(path)
    }
}

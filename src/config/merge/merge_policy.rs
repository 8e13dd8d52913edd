//! Merge rules: defaults, override order, conflict handling.

use crate::tree::builder::DEFAULT_BLOCK_SIZE;
use config::Config;
use config::ConfigBuilder;
use config::ConfigError;

/// Create a Config builder with merge policy defaults applied.
pub fn builder_with_defaults() -> Result<ConfigBuilder<config::builder::DefaultState>, ConfigError>
{
    Config::builder()
        .set_default("hash.algorithm", "sha256")?
        .set_default("hash.block_size", DEFAULT_BLOCK_SIZE as u64)?
        .set_default("tree.directory_metadata", false)
}

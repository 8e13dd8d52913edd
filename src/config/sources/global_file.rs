//! Global config file source: $XDG_CONFIG_HOME/sealdir/config.toml or ~/.config/sealdir/config.toml

use config::builder::DefaultState;
use config::ConfigBuilder;
use config::ConfigError;
use config::File;
use std::path::PathBuf;
use tracing::debug;

/// Path to global config file.
pub fn global_config_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", "sealdir")
        .map(|dirs| dirs.config_dir().join("config.toml"))
}

/// Add global config file source to builder if it exists.
pub fn add_to_builder(
    mut builder: ConfigBuilder<DefaultState>,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    if let Some(config_path) = global_config_path() {
        if config_path.exists() {
            builder = builder.add_source(File::from(config_path).required(false));
        } else {
            debug!(
                config_path = %config_path.display(),
                "No global configuration file, using defaults"
            );
        }
    }
    Ok(builder)
}

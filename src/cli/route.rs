//! CLI route: run context for a single seal invocation. Loads configuration,
//! applies command-line overrides, builds the tree and hands it to presentation.

use crate::cli::parse::Cli;
use crate::cli::presentation::{format_seal, format_tree};
use crate::cli::OutputFormat;
use crate::config::{ConfigLoader, SealConfig};
use crate::error::ApiError;
use crate::tree::builder::{SealOptions, TreeBuilder};
use crate::tree::path::canonicalize_root;
use std::path::PathBuf;
use std::time::Instant;
use tracing::{debug, info};

/// Runtime context for CLI execution: the frozen configuration and what to print.
pub struct RunContext {
    root: PathBuf,
    config: SealConfig,
    options: SealOptions,
    show_content: bool,
    show_tree: bool,
    format: OutputFormat,
}

impl RunContext {
    /// Create run context from parsed arguments. Uses ConfigLoader only.
    ///
    /// `--config` replaces the global config file; environment variables
    /// still apply on top, and command-line flags override both.
    pub fn new(cli: &Cli) -> Result<Self, ApiError> {
        let mut config = match cli.config {
            Some(ref cfg_path) => ConfigLoader::load_from_file(cfg_path)?,
            None => ConfigLoader::load()?,
        };

        if let Some(ref algorithm) = cli.algorithm {
            config.hash.algorithm = algorithm.clone();
        }
        if let Some(block_size) = cli.block_size {
            config.hash.block_size = block_size;
        }
        if cli.directory_metadata {
            config.tree.directory_metadata = true;
        }

        // An unknown algorithm surfaces as AlgorithmUnavailable, not a config error
        let options = config.seal_options()?;
        config.validate().map_err(|errors| {
            let messages: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
            ApiError::ConfigError(messages.join("; "))
        })?;

        debug!(
            algorithm = %options.algorithm,
            block_size = options.block_size,
            directory_metadata = options.directory_metadata,
            "Configuration frozen"
        );

        Ok(Self {
            root: cli.path.clone(),
            config,
            options,
            show_content: cli.content,
            show_tree: cli.tree,
            format: cli.format,
        })
    }

    /// The effective configuration after all overrides.
    pub fn config(&self) -> &SealConfig {
        &self.config
    }

    pub fn options(&self) -> &SealOptions {
        &self.options
    }

    /// Seal the root and format the result for stdout.
    ///
    /// The root is canonicalized first so `.` and relative paths report
    /// (and, with directory metadata, hash) the directory's real name.
    pub fn execute(&self) -> Result<String, ApiError> {
        let start = Instant::now();
        let root_path = canonicalize_root(&self.root)?;
        let root = TreeBuilder::new(root_path)
            .with_options(self.options.clone())
            .build()?;

        let output = if self.show_tree {
            format_tree(&root, self.options.algorithm, self.format)?
        } else {
            format_seal(&root, self.options.algorithm, self.show_content, self.format)?
        };

        info!(
            path = %self.root.display(),
            duration_ms = start.elapsed().as_millis(),
            "Seal command completed"
        );
        Ok(output)
    }
}

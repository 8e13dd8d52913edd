//! CLI parse: clap types for sealdir. No behavior; definitions only.

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Sealdir CLI - cryptographically seal the state of an entire directory
#[derive(Parser, Debug)]
#[command(name = "sealdir")]
#[command(about = "Cryptographically seal the state of an entire directory")]
pub struct Cli {
    /// Directory (or single file) to seal
    pub path: PathBuf,

    /// Configuration file path (overrides the global config file)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Hash algorithm (sha256, blake3)
    #[arg(long)]
    pub algorithm: Option<String>,

    /// Streaming block size in bytes
    #[arg(long)]
    pub block_size: Option<usize>,

    /// Fold each directory's own name and permission bits into its seal
    #[arg(long)]
    pub directory_metadata: bool,

    /// Also print the root content digest
    #[arg(long)]
    pub content: bool,

    /// Print every node of the tree
    #[arg(long)]
    pub tree: bool,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Disable colored error output
    #[arg(long)]
    pub no_color: bool,

    /// Enable verbose logging (default: off)
    #[arg(long, default_value = "false")]
    pub verbose: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file, file+stderr)
    #[arg(long)]
    pub log_output: Option<String>,

    /// Log file path (if output includes "file")
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

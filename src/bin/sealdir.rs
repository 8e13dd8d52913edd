//! Sealdir CLI Binary
//!
//! Prints the seal digest of a directory subtree.

use clap::Parser;
use sealdir::cli::{exit_code, map_error, Cli, RunContext};
use sealdir::logging::{init_logging, LoggingConfig};
use std::io::IsTerminal;
use std::process;
use tracing::{error, info};

fn main() {
    let cli = Cli::parse();
    let color = !cli.no_color && std::io::stderr().is_terminal();

    let context = match RunContext::new(&cli) {
        Ok(ctx) => ctx,
        Err(e) => {
            eprintln!("{}", map_error(&e, color));
            process::exit(exit_code(&e));
        }
    };

    let logging_config = build_logging_config(&cli, context.config().logging.clone());
    if let Err(e) = init_logging(Some(&logging_config)) {
        eprintln!("{}", map_error(&e, color));
        process::exit(exit_code(&e));
    }

    info!("Sealdir starting");

    if let Err(e) = sealdir::init() {
        let e: sealdir::ApiError = e.into();
        error!("Hash backend unavailable: {}", e);
        eprintln!("{}", map_error(&e, color));
        process::exit(exit_code(&e));
    }

    match context.execute() {
        Ok(output) => println!("{}", output),
        Err(e) => {
            error!("Seal failed: {}", e);
            eprintln!("{}", map_error(&e, color));
            process::exit(exit_code(&e));
        }
    }
}

/// Build logging configuration from CLI args on top of the loaded config
fn build_logging_config(cli: &Cli, mut config: LoggingConfig) -> LoggingConfig {
    // If --verbose is not set, disable logging
    if !cli.verbose {
        config.level = "off".to_string();
        return config;
    }

    if let Some(ref level) = cli.log_level {
        config.level = level.clone();
    }
    if let Some(ref format) = cli.log_format {
        config.format = format.clone();
    }
    if let Some(ref output) = cli.log_output {
        config.output = output.clone();
    }
    if let Some(ref file) = cli.log_file {
        config.file = Some(file.clone());
    }

    config
}

//! CLI domain: parse, route, output, and presentation only.
//! No sealing logic; the route hands the path to the tree builder.

mod output;
mod parse;
mod presentation;
mod route;

pub use output::{exit_code, map_error};
pub use parse::{Cli, OutputFormat};
pub use presentation::{format_seal, format_tree};
pub use route::RunContext;

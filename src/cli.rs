//! Command-line surface.
use std::path::PathBuf;

use clap::Parser;

/// Top-level CLI entry point for the file provisioning engine.
#[derive(Parser, Debug)]
#[command(
    name = "linkset",
    about = "Provision files as symbolic links, copies, or deletions from XML configuration",
    version
)]
pub struct Cli {
    /// Configuration documents to apply, in order (user.xml is always
    /// attempted first)
    #[arg(required = true, value_name = "CONFIG")]
    pub configs: Vec<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

//! linkset CLI
//!
//! Command-line interface for provisioning files from XML configuration.

use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    let _ = enable_ansi_support::enable_ansi_support();
    let args = linkset::cli::Cli::parse();
    linkset::logging::init(args.verbose);

    linkset::commands::apply::run(&args)
}

//! Command-line argument definitions for the C4Forge CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments control scripted input, output path defaults,
//! configuration file selection, and logging verbosity.

use clap::Parser;

/// Command-line arguments for the C4Forge wizard
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Read wizard commands from a script file instead of stdin
    #[arg(long)]
    pub script: Option<String>,

    /// Default path for saved diagrams (overrides configuration)
    #[arg(short, long)]
    pub output: Option<String>,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "warn")]
    pub log_level: String,
}

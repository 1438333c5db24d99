//! Command-line argument definitions for the trellis CLI.
//!
//! This module defines the [`Args`] structure parsed from the command
//! line using [`clap`]. Arguments control input/output paths, output
//! shape, configuration file selection, and logging verbosity.

use clap::Parser;

/// Command-line arguments for the trellis structure-chart tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the input chart definition
    #[arg(help = "Path to the input file")]
    pub input: String,

    /// Path to the output file
    #[arg(short, long, default_value = "out.svg")]
    pub output: String,

    /// Emit the full embeddable markup (container div, SVG, and
    /// expand button) instead of the bare SVG document
    #[arg(long)]
    pub wrap: bool,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

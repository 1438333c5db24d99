//! Error types for the trellis CLI.

use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

/// Errors the CLI can hit around the compile pipeline.
///
/// The compiler itself is total; everything that can fail lives at
/// the edges: reading input, loading configuration, writing output.
#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Missing configuration file: {0}")]
    #[diagnostic(
        code(trellis::config::missing),
        help("pass --config with an existing file, or drop the flag to use defaults")
    )]
    MissingConfigFile(PathBuf),

    #[error("Failed to parse TOML configuration: {0}")]
    #[diagnostic(code(trellis::config::parse))]
    ConfigParse(String),
}

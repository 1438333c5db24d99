//! Configuration file loading for the CLI
//!
//! This module handles finding and loading TOML configuration files,
//! either from an explicit path or from the local project directory.

use std::{fs, path::Path};

use log::{debug, info};

use trellis::config::AppConfig;

use crate::error::CliError;

/// Find and load configuration
///
/// Search order:
/// 1. Explicit path if provided
/// 2. Local project directory (trellis.toml)
/// 3. Default config if none found
///
/// # Errors
///
/// Returns an error if an explicit path is provided but the file does
/// not exist, or if a found config file cannot be read or parsed.
pub fn load_config(explicit_path: Option<impl AsRef<Path>>) -> Result<AppConfig, CliError> {
    if let Some(path) = explicit_path {
        let path = path.as_ref();
        info!(path = path.display().to_string(); "Loading configuration from explicit path");
        return load_config_file(path);
    }

    let local_config = Path::new("trellis.toml");
    if local_config.exists() {
        info!(path = local_config.display().to_string(); "Loading configuration from local path");
        return load_config_file(local_config);
    }

    debug!("No configuration file found, using default configuration");
    Ok(AppConfig::default())
}

fn load_config_file(path: impl AsRef<Path>) -> Result<AppConfig, CliError> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(CliError::MissingConfigFile(path.to_path_buf()));
    }

    let content = fs::read_to_string(path)?;
    let config: AppConfig =
        toml::from_str(&content).map_err(|err| CliError::ConfigParse(err.to_string()))?;

    Ok(config)
}

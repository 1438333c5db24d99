//! Configuration types for trellis rendering.
//!
//! [`AppConfig`] is the root the CLI deserializes from a TOML file;
//! every field defaults, so an empty table is a valid configuration.
//!
//! # Example
//!
//! ```
//! # use trellis::config::AppConfig;
//! let config = AppConfig::default();
//! assert_eq!(config.style().stroke(), "#333333");
//! ```

use serde::Deserialize;

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Style configuration section.
    #[serde(default)]
    style: StyleConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] with the specified style configuration.
    pub fn new(style: StyleConfig) -> Self {
        Self { style }
    }

    /// Returns the style configuration.
    pub fn style(&self) -> &StyleConfig {
        &self.style
    }
}

/// Fill and stroke colors for rendered charts.
///
/// Unset fields keep the classic structure-chart palette: white
/// modules, light-blue libraries, light-yellow storages.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StyleConfig {
    module_fill: String,
    library_fill: String,
    storage_fill: String,
    conditional_fill: String,
    stroke: String,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            module_fill: "#ffffff".to_string(),
            library_fill: "#e3f2fd".to_string(),
            storage_fill: "#fff9c4".to_string(),
            conditional_fill: "#ffffcc".to_string(),
            stroke: "#333333".to_string(),
        }
    }
}

impl StyleConfig {
    /// Fill of plain module boxes.
    pub fn module_fill(&self) -> &str {
        &self.module_fill
    }

    /// Fill of library module boxes.
    pub fn library_fill(&self) -> &str {
        &self.library_fill
    }

    /// Fill of storage cylinders.
    pub fn storage_fill(&self) -> &str {
        &self.storage_fill
    }

    /// Fill of conditional-gate diamonds.
    pub fn conditional_fill(&self) -> &str {
        &self.conditional_fill
    }

    /// Stroke color shared by boxes, connectors, and text.
    pub fn stroke(&self) -> &str {
        &self.stroke
    }
}

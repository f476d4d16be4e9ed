//! Configuration types for C4Forge.
//!
//! This module provides configuration structures that control output and
//! generation defaults. All types implement [`serde::Deserialize`] for
//! flexible loading from external sources.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level application configuration combining output and diagram settings.
//! - [`OutputConfig`] - Controls where generated diagrams are saved by default.
//! - [`DiagramConfig`] - Controls generation defaults such as the default detail level.
//!
//! # Example
//!
//! ```
//! # use c4forge::config::AppConfig;
//! // Use default configuration
//! let config = AppConfig::default();
//! assert_eq!(config.output().file_name(), "c4_model_diagram.mmd");
//! ```

use serde::Deserialize;

use crate::scope::DiagramType;

/// Top-level application configuration combining output and diagram settings.
///
/// Groups [`OutputConfig`] and [`DiagramConfig`] into a single configuration
/// root.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Output configuration section.
    #[serde(default)]
    output: OutputConfig,

    /// Diagram configuration section.
    #[serde(default)]
    diagram: DiagramConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] with the specified output and diagram configurations.
    ///
    /// # Arguments
    ///
    /// * `output` - Default save location settings.
    /// * `diagram` - Generation defaults.
    pub fn new(output: OutputConfig, diagram: DiagramConfig) -> Self {
        Self { output, diagram }
    }

    /// Returns the output configuration.
    pub fn output(&self) -> &OutputConfig {
        &self.output
    }

    /// Returns the diagram configuration.
    pub fn diagram(&self) -> &DiagramConfig {
        &self.diagram
    }
}

/// Default save location for generated diagrams.
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// File name used by `save` when no path is given.
    #[serde(default = "default_file_name")]
    file_name: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            file_name: default_file_name(),
        }
    }
}

impl OutputConfig {
    /// Creates a new [`OutputConfig`] with the specified default file name.
    pub fn new(file_name: String) -> Self {
        Self { file_name }
    }

    /// Returns the default file name for saved diagrams.
    pub fn file_name(&self) -> &str {
        &self.file_name
    }
}

fn default_file_name() -> String {
    "c4_model_diagram.mmd".to_string()
}

/// Generation defaults for the diagram wizard.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct DiagramConfig {
    /// Default [`DiagramType`] offered when generating.
    #[serde(default)]
    default_type: DiagramType,
}

impl DiagramConfig {
    /// Creates a new [`DiagramConfig`] with the specified default detail level.
    pub fn new(default_type: DiagramType) -> Self {
        Self { default_type }
    }

    /// Returns the default [`DiagramType`].
    pub fn default_type(&self) -> DiagramType {
        self.default_type
    }
}

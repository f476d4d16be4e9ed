//! C4Forge - Describe software architectures as C4 models and generate
//! Mermaid diagrams.
//!
//! The crate pairs the session-scoped architecture model from
//! [`c4forge_core`] with a deterministic generator that projects the model
//! into Mermaid's `C4Context` syntax at a chosen detail level.

pub mod config;

mod error;
mod mermaid;
mod scope;

pub use c4forge_core::{error::ModelError, identifier, model};

pub use error::{C4ForgeError, GenerateError};
pub use scope::{DiagramScope, DiagramType};

use log::{debug, info};

use c4forge_core::model::ArchitectureModel;

use config::AppConfig;

/// Facade for generating Mermaid diagrams from an architecture model.
///
/// This owns the application configuration and exposes diagram generation as
/// a pure projection of a model snapshot.
///
/// # Examples
///
/// ```rust
/// use c4forge::{DiagramBuilder, DiagramScope, config::AppConfig, model::{ArchitectureModel, SystemKind}};
///
/// let mut model = ArchitectureModel::new();
/// model.add_system("Shop", "Online store", SystemKind::Internal)
///     .expect("valid system");
///
/// // With custom config
/// let config = AppConfig::default();
/// let builder = DiagramBuilder::new(config);
///
/// let text = builder.render_mermaid(&model, &DiagramScope::Context)
///     .expect("Failed to generate");
/// assert!(text.starts_with("C4Context\n"));
///
/// // Or use default config
/// let builder = DiagramBuilder::default();
/// ```
#[derive(Default)]
pub struct DiagramBuilder {
    config: AppConfig,
}

impl DiagramBuilder {
    /// Create a new diagram builder with the given configuration.
    ///
    /// # Arguments
    ///
    /// * `config` - Application configuration including output and diagram defaults
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    /// Returns the application configuration.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Generate Mermaid `C4Context` text for a model at the given scope.
    ///
    /// Generation is deterministic and side-effect free: calling this twice
    /// with an unchanged model and identical scope produces byte-identical
    /// output.
    ///
    /// Names and descriptions are interpolated into the Mermaid statements
    /// verbatim; a double quote inside them is not escaped and yields a
    /// statement Mermaid will reject.
    ///
    /// # Arguments
    ///
    /// * `model` - The architecture model snapshot to project
    /// * `scope` - The detail level and entity selection
    ///
    /// # Errors
    ///
    /// Returns `C4ForgeError` when the scope names a system or container
    /// that does not exist in the model, or names an external system for a
    /// container/component diagram.
    pub fn render_mermaid(
        &self,
        model: &ArchitectureModel,
        scope: &DiagramScope,
    ) -> Result<String, C4ForgeError> {
        info!(scope:? = scope; "Generating Mermaid diagram");

        let text = mermaid::render(model, scope)?;

        debug!(bytes = text.len(); "Diagram generated");
        Ok(text)
    }
}

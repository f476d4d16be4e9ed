//! Error types for C4Forge operations.
//!
//! This module provides the main error type [`C4ForgeError`] which wraps the
//! error conditions that can occur while mutating the model or generating
//! diagram text.

use std::io;

use thiserror::Error;

use c4forge_core::error::ModelError;

/// The main error type for C4Forge operations.
#[derive(Debug, Error)]
pub enum C4ForgeError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Model error: {0}")]
    Model(#[from] ModelError),

    #[error("Generate error: {0}")]
    Generate(#[from] GenerateError),
}

/// Errors raised while resolving a diagram scope against the model.
///
/// These surface when a selected system or container name has gone stale,
/// for example because the entity was removed after it was selected.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GenerateError {
    #[error("no system named `{name}`")]
    UnknownSystem { name: String },

    #[error("system `{name}` is external; container and component diagrams need an internal system")]
    ExternalSystem { name: String },

    #[error("system `{system}` has no container named `{name}`")]
    UnknownContainer { system: String, name: String },
}

//! Error types for architecture model operations.
//!
//! Every mutating operation on [`ArchitectureModel`](crate::model::ArchitectureModel)
//! validates its inputs and reports refusals through [`ModelError`]. A refused
//! operation never mutates the model.

use thiserror::Error;

/// Validation errors produced by model operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModelError {
    #[error("{field} must not be empty")]
    EmptyField { field: &'static str },

    #[error("no entity with id `{id}`")]
    UnknownEntity { id: String },

    #[error("system `{name}` is external and cannot own containers")]
    ExternalSystem { name: String },

    #[error("source and target of a relationship must differ")]
    SelfReference,

    #[error("index {index} is out of range for a collection of {len}")]
    IndexOutOfRange { index: usize, len: usize },
}

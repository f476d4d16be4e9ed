//! C4Forge Core Types and Definitions
//!
//! This crate provides the foundational types for the C4Forge architecture
//! description tool. It includes:
//!
//! - **Identifiers**: Mermaid-safe, string-interned identifiers
//!   ([`identifier::Id`]) and the [`identifier::clean`] derivation rule
//! - **Model**: the session-scoped architecture model ([`model`] module) with
//!   persons, systems, containers, components, and relationships
//! - **Errors**: validation errors for model operations ([`error`] module)

pub mod error;
pub mod identifier;
pub mod model;

//! Error adapter for converting C4ForgeError to miette diagnostics.
//!
//! This module provides the bridge between the library's standard error types
//! and miette's rich diagnostic formatting used in the CLI. None of the
//! library errors carry source spans, so the adapter contributes an error
//! code and a help line per variant.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan};

use c4forge::{C4ForgeError, GenerateError, ModelError};

/// Adapter wrapping a [`C4ForgeError`] for miette rendering.
pub struct ErrorAdapter<'a>(pub &'a C4ForgeError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.0.source()
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match &self.0 {
            C4ForgeError::Io(_) => "c4forge::io",
            C4ForgeError::Model(_) => "c4forge::model",
            C4ForgeError::Generate(_) => "c4forge::generate",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let help: &'static str = match &self.0 {
            C4ForgeError::Model(ModelError::EmptyField { .. }) => {
                "provide a non-empty value and retry the command"
            }
            C4ForgeError::Model(ModelError::SelfReference) => {
                "pick two different endpoints for the relationship"
            }
            C4ForgeError::Model(ModelError::ExternalSystem { .. }) => {
                "only internal systems can own containers"
            }
            C4ForgeError::Generate(GenerateError::UnknownSystem { .. })
            | C4ForgeError::Generate(GenerateError::ExternalSystem { .. }) => {
                "add an internal system in the context step first"
            }
            C4ForgeError::Generate(GenerateError::UnknownContainer { .. }) => {
                "add a container to the selected system in the container step first"
            }
            _ => return None,
        };
        Some(Box::new(help))
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        None
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        None
    }
}

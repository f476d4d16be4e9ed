//! Diagram detail levels and generation scope.
//!
//! A C4 model is projected at one of three strictly widening detail levels.
//! [`DiagramType`] names the level; [`DiagramScope`] pairs a level with the
//! entity selection it needs (the system for container diagrams, the system
//! and container for component diagrams).

use std::{
    fmt::{self, Display},
    str::FromStr,
};

use serde::Deserialize;

/// The detail level of a generated diagram.
///
/// The names match external configuration strings (snake_case).
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagramType {
    /// Big-picture view: persons and systems (default)
    #[default]
    Context,
    /// Containers inside one internal system
    Container,
    /// Components inside one container
    Component,
}

impl FromStr for DiagramType {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "context" => Ok(Self::Context),
            "container" => Ok(Self::Container),
            "component" => Ok(Self::Component),
            _ => Err("Unsupported diagram type"),
        }
    }
}

impl From<DiagramType> for &'static str {
    fn from(val: DiagramType) -> Self {
        match val {
            DiagramType::Context => "context",
            DiagramType::Container => "container",
            DiagramType::Component => "component",
        }
    }
}

impl Display for DiagramType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s: &'static str = (*self).into();
        write!(f, "{s}")
    }
}

/// A detail level together with the entity selection it requires.
///
/// Selections are carried by display name; the generator resolves them
/// against the model and reports stale names as
/// [`GenerateError`](crate::GenerateError) variants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiagramScope {
    /// Everything at system granularity.
    Context,
    /// The containers of one internal system.
    Container {
        /// Display name of the selected internal system.
        system: String,
    },
    /// The components of one container.
    Component {
        /// Display name of the selected internal system.
        system: String,
        /// Display name of the selected container within that system.
        container: String,
    },
}

impl DiagramScope {
    /// Get the detail level of this scope.
    pub fn diagram_type(&self) -> DiagramType {
        match self {
            DiagramScope::Context => DiagramType::Context,
            DiagramScope::Container { .. } => DiagramType::Container,
            DiagramScope::Component { .. } => DiagramType::Component,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn diagram_type_round_trips_through_strings() {
        for diagram_type in [
            DiagramType::Context,
            DiagramType::Container,
            DiagramType::Component,
        ] {
            let text = diagram_type.to_string();
            assert_eq!(text.parse::<DiagramType>(), Ok(diagram_type));
        }
        assert!("sequence".parse::<DiagramType>().is_err());
    }

    #[test]
    fn scope_reports_its_type() {
        assert_eq!(DiagramScope::Context.diagram_type(), DiagramType::Context);
        let scope = DiagramScope::Component {
            system: "Shop".to_string(),
            container: "Web App".to_string(),
        };
        assert_eq!(scope.diagram_type(), DiagramType::Component);
    }
}

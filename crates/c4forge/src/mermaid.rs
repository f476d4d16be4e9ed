//! Mermaid C4 text generation.
//!
//! This module projects a snapshot of the architecture model into Mermaid's
//! `C4Context` syntax at the requested detail level. Generation is a pure
//! function of the model and the scope: it performs no I/O, never mutates the
//! model, and identical inputs produce byte-identical output.
//!
//! The text is assembled append-only, one statement per line, each indented
//! four spaces and newline-terminated. Elements appear in model insertion
//! order with no sorting or deduplication. An empty model is valid input and
//! yields just the header and title.

use c4forge_core::{
    identifier::Id,
    model::{ArchitectureModel, Component, Container, System, SystemKind},
};

use crate::{error::GenerateError, scope::DiagramScope};

const HEADER: &str = "C4Context";
const INDENT: &str = "    ";

/// A scope with its name selections resolved against the model.
enum Resolved<'a> {
    Context,
    Container { system: &'a System },
    Component { system: &'a System, container: &'a Container },
}

/// Generate the Mermaid text for `model` at the given scope.
pub(crate) fn render(
    model: &ArchitectureModel,
    scope: &DiagramScope,
) -> Result<String, GenerateError> {
    let resolved = resolve(model, scope)?;

    let mut out = String::new();
    out.push_str(HEADER);
    out.push('\n');
    push_line(&mut out, &title(&resolved));

    // Persons are shown at every detail level.
    for person in model.persons() {
        push_line(
            &mut out,
            &format!(
                "Person({}, \"{}\", \"{}\")",
                person.id(),
                person.name(),
                person.description()
            ),
        );
    }

    match &resolved {
        Resolved::Context => {
            for system in model.systems() {
                let element = match system.kind() {
                    SystemKind::Internal => "System",
                    SystemKind::External => "System_Ext",
                };
                push_line(
                    &mut out,
                    &format!(
                        "{element}({}, \"{}\", \"{}\")",
                        system.id(),
                        system.name(),
                        system.description()
                    ),
                );
            }
        }
        Resolved::Container { system } => {
            push_containers(&mut out, model, system);
        }
        Resolved::Component { system, container } => {
            push_containers(&mut out, model, system);
            push_line(
                &mut out,
                &format!("Container_Boundary({}, \"{}\")", container.id(), container.name()),
            );
            for component in model.components_of(container.id()) {
                push_line(&mut out, &component_line(component));
            }
        }
    }

    for rel in model.relationships() {
        if in_scope(model, &resolved, rel.source_id(), rel.target_id()) {
            push_line(
                &mut out,
                &format!(
                    "Rel({}, {}, \"{}\")",
                    rel.source_id(),
                    rel.target_id(),
                    rel.description()
                ),
            );
        }
    }

    Ok(out)
}

fn resolve<'a>(
    model: &'a ArchitectureModel,
    scope: &DiagramScope,
) -> Result<Resolved<'a>, GenerateError> {
    // Duplicate display names are legal, so an internal system may share its
    // name with an external one. Internal systems win the lookup; the plain
    // name search only distinguishes an external namesake from a missing one.
    let resolve_system = |name: &str| -> Result<&'a System, GenerateError> {
        if let Some(system) = model.find_internal_system_by_name(name) {
            return Ok(system);
        }
        if model.find_system_by_name(name).is_some() {
            return Err(GenerateError::ExternalSystem {
                name: name.to_string(),
            });
        }
        Err(GenerateError::UnknownSystem {
            name: name.to_string(),
        })
    };

    match scope {
        DiagramScope::Context => Ok(Resolved::Context),
        DiagramScope::Container { system } => Ok(Resolved::Container {
            system: resolve_system(system)?,
        }),
        DiagramScope::Component { system, container } => {
            let system = resolve_system(system)?;
            let container = model
                .find_container_by_name(system.id(), container)
                .ok_or_else(|| GenerateError::UnknownContainer {
                    system: system.name().to_string(),
                    name: container.to_string(),
                })?;
            Ok(Resolved::Component { system, container })
        }
    }
}

fn title(resolved: &Resolved<'_>) -> String {
    match resolved {
        Resolved::Context => "title Context Diagram".to_string(),
        Resolved::Container { system } => {
            format!("title Container Diagram for {}", system.name())
        }
        Resolved::Component { system, container } => format!(
            "title Component Diagram for {} in {}",
            container.name(),
            system.name()
        ),
    }
}

fn push_containers(out: &mut String, model: &ArchitectureModel, system: &System) {
    push_line(
        out,
        &format!("System_Boundary({}, \"{}\")", system.id(), system.name()),
    );
    for container in model.containers_of(system.id()) {
        push_line(out, &container_line(container));
    }
}

fn container_line(container: &Container) -> String {
    match container.technology() {
        Some(technology) => format!(
            "Container({}, \"{}\", \"{}\", \"{}\")",
            container.id(),
            container.name(),
            technology,
            container.description()
        ),
        None => format!(
            "Container({}, \"{}\", \"{}\")",
            container.id(),
            container.name(),
            container.description()
        ),
    }
}

fn component_line(component: &Component) -> String {
    match component.technology() {
        Some(technology) => format!(
            "Component({}, \"{}\", \"{}\", \"{}\")",
            component.id(),
            component.name(),
            technology,
            component.description()
        ),
        None => format!(
            "Component({}, \"{}\", \"{}\")",
            component.id(),
            component.name(),
            component.description()
        ),
    }
}

/// Whether a relationship is projected at the resolved scope.
///
/// Context diagrams require both endpoints to be persons or systems. The
/// narrower levels require at least one endpoint inside the selected system
/// or container, decided by ancestry lookup on the model.
fn in_scope(model: &ArchitectureModel, resolved: &Resolved<'_>, source: Id, target: Id) -> bool {
    match resolved {
        Resolved::Context => {
            model.is_context_endpoint(source) && model.is_context_endpoint(target)
        }
        Resolved::Container { system } => {
            model.belongs_to_system(source, system.id())
                || model.belongs_to_system(target, system.id())
        }
        Resolved::Component { container, .. } => {
            model.belongs_to_container(source, container.id())
                || model.belongs_to_container(target, container.id())
        }
    }
}

fn push_line(out: &mut String, statement: &str) {
    out.push_str(INDENT);
    out.push_str(statement);
    out.push('\n');
}

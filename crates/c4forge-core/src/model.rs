//! The in-memory architecture model.
//!
//! This module contains the session-scoped state of a C4 model under
//! construction: persons, systems, containers, components, and relationships.
//! Every collection preserves insertion order, and insertion order is the only
//! order used anywhere. The model is a plain owned value with no global state;
//! callers create one instance per session.
//!
//! Mutations are validated up front and refused with a
//! [`ModelError`] without touching any collection. Removals cascade: deleting
//! an entity also deletes its descendants and every relationship referencing a
//! deleted id, so the model never holds dangling references.

use std::{
    collections::HashSet,
    fmt::{self, Display},
    str::FromStr,
};

use indexmap::IndexMap;
use log::debug;

use crate::{
    error::ModelError,
    identifier::{Id, clean},
};

/// Whether a system is part of the enterprise under description or an
/// external collaborator.
///
/// Only internal systems may own containers, and the two kinds are emitted as
/// different Mermaid element types (`System` vs `System_Ext`).
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SystemKind {
    /// A system owned by the enterprise (default)
    #[default]
    Internal,
    /// An external collaborator system
    External,
}

impl FromStr for SystemKind {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "internal" => Ok(Self::Internal),
            "external" => Ok(Self::External),
            _ => Err("Unsupported system kind"),
        }
    }
}

impl From<SystemKind> for &'static str {
    fn from(val: SystemKind) -> Self {
        match val {
            SystemKind::Internal => "internal",
            SystemKind::External => "external",
        }
    }
}

impl Display for SystemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s: &'static str = (*self).into();
        write!(f, "{s}")
    }
}

/// A human actor interacting with the architecture.
#[derive(Debug, Clone)]
pub struct Person {
    id: Id,
    name: String,
    description: String,
}

impl Person {
    /// Get the person identifier.
    pub fn id(&self) -> Id {
        self.id
    }

    /// Get the display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the description.
    pub fn description(&self) -> &str {
        &self.description
    }
}

/// A top-level software system.
#[derive(Debug, Clone)]
pub struct System {
    id: Id,
    name: String,
    description: String,
    kind: SystemKind,
}

impl System {
    /// Get the system identifier.
    pub fn id(&self) -> Id {
        self.id
    }

    /// Get the display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the description.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Get the system kind (internal or external).
    pub fn kind(&self) -> SystemKind {
        self.kind
    }
}

/// A runtime unit (application, data store, ...) owned by an internal system.
#[derive(Debug, Clone)]
pub struct Container {
    id: Id,
    system_id: Id,
    name: String,
    description: String,
    technology: Option<String>,
}

impl Container {
    /// Get the container identifier.
    pub fn id(&self) -> Id {
        self.id
    }

    /// Get the id of the owning system.
    pub fn system_id(&self) -> Id {
        self.system_id
    }

    /// Get the display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the description.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Get the technology label, if one was provided.
    pub fn technology(&self) -> Option<&str> {
        self.technology.as_deref()
    }
}

/// A grouped chunk of code (module, package, ...) within a container.
#[derive(Debug, Clone)]
pub struct Component {
    id: Id,
    container_id: Id,
    name: String,
    description: String,
    technology: Option<String>,
}

impl Component {
    /// Get the component identifier.
    pub fn id(&self) -> Id {
        self.id
    }

    /// Get the id of the owning container.
    pub fn container_id(&self) -> Id {
        self.container_id
    }

    /// Get the display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the description.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Get the technology label, if one was provided.
    pub fn technology(&self) -> Option<&str> {
        self.technology.as_deref()
    }
}

/// A directed relationship between any two model entities.
///
/// Endpoints are stored by id together with the display labels they carried
/// when the relationship was added.
#[derive(Debug, Clone)]
pub struct Relationship {
    source_id: Id,
    source_label: String,
    target_id: Id,
    target_label: String,
    description: String,
}

impl Relationship {
    /// Get the source entity id.
    pub fn source_id(&self) -> Id {
        self.source_id
    }

    /// Get the display label of the source (`"Kind: name"`).
    pub fn source_label(&self) -> &str {
        &self.source_label
    }

    /// Get the target entity id.
    pub fn target_id(&self) -> Id {
        self.target_id
    }

    /// Get the display label of the target (`"Kind: name"`).
    pub fn target_label(&self) -> &str {
        &self.target_label
    }

    /// Get the relationship description.
    pub fn description(&self) -> &str {
        &self.description
    }
}

/// The kind of entity behind a relationship endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndpointKind {
    Person,
    System,
    Container,
    Component,
}

impl Display for EndpointKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            EndpointKind::Person => "Person",
            EndpointKind::System => "System",
            EndpointKind::Container => "Container",
            EndpointKind::Component => "Component",
        };
        write!(f, "{s}")
    }
}

/// One selectable relationship endpoint.
///
/// Produced by [`ArchitectureModel::relationship_candidates`] in a fixed,
/// stable order; the label (`"Kind: name"`) is what a UI shows the user.
#[derive(Debug, Clone)]
pub struct EndpointCandidate {
    label: String,
    id: Id,
    kind: EndpointKind,
}

impl EndpointCandidate {
    /// Get the display label (`"Kind: name"`).
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Get the entity id.
    pub fn id(&self) -> Id {
        self.id
    }

    /// Get the entity kind.
    pub fn kind(&self) -> EndpointKind {
        self.kind
    }
}

/// The five collections of a C4 model under construction.
///
/// # Examples
///
/// ```
/// use c4forge_core::model::{ArchitectureModel, SystemKind};
///
/// let mut model = ArchitectureModel::new();
/// let shop = model
///     .add_system("Shop", "Online store", SystemKind::Internal)
///     .expect("valid system");
/// model
///     .add_container(shop, "Web App", "Storefront UI", Some("React"))
///     .expect("valid container");
/// assert_eq!(model.containers_of(shop).len(), 1);
/// ```
#[derive(Debug, Default)]
pub struct ArchitectureModel {
    persons: Vec<Person>,
    systems: Vec<System>,
    containers: IndexMap<Id, Vec<Container>>,
    components: IndexMap<Id, Vec<Component>>,
    relationships: Vec<Relationship>,
    allocated: HashSet<Id>,
}

impl ArchitectureModel {
    /// Create an empty model.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a person. Returns the allocated id.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::EmptyField`] when name or description is empty.
    pub fn add_person(&mut self, name: &str, description: &str) -> Result<Id, ModelError> {
        require_non_empty(name, "name")?;
        require_non_empty(description, "description")?;

        let id = self.allocate(&clean(name));
        debug!(id:% = id; "Adding person");
        self.persons.push(Person {
            id,
            name: name.to_string(),
            description: description.to_string(),
        });
        Ok(id)
    }

    /// Add a system. Returns the allocated id.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::EmptyField`] when name or description is empty.
    pub fn add_system(
        &mut self,
        name: &str,
        description: &str,
        kind: SystemKind,
    ) -> Result<Id, ModelError> {
        require_non_empty(name, "name")?;
        require_non_empty(description, "description")?;

        let id = self.allocate(&clean(name));
        debug!(id:% = id, kind:% = kind; "Adding system");
        self.systems.push(System {
            id,
            name: name.to_string(),
            description: description.to_string(),
            kind,
        });
        Ok(id)
    }

    /// Add a container to an internal system. Returns the allocated id.
    ///
    /// An empty technology string is treated as absent.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::UnknownEntity`] when no system has `system_id`,
    /// [`ModelError::ExternalSystem`] when the system is external, and
    /// [`ModelError::EmptyField`] when name or description is empty.
    pub fn add_container(
        &mut self,
        system_id: Id,
        name: &str,
        description: &str,
        technology: Option<&str>,
    ) -> Result<Id, ModelError> {
        require_non_empty(name, "name")?;
        require_non_empty(description, "description")?;

        let system = self
            .systems
            .iter()
            .find(|s| s.id == system_id)
            .ok_or_else(|| ModelError::UnknownEntity {
                id: system_id.to_string(),
            })?;
        if system.kind == SystemKind::External {
            return Err(ModelError::ExternalSystem {
                name: system.name.clone(),
            });
        }

        let id = self.allocate_child(system_id, &clean(name));
        debug!(id:% = id, system:% = system_id; "Adding container");
        self.containers.entry(system_id).or_default().push(Container {
            id,
            system_id,
            name: name.to_string(),
            description: description.to_string(),
            technology: non_empty(technology),
        });
        Ok(id)
    }

    /// Add a component to a container. Returns the allocated id.
    ///
    /// An empty technology string is treated as absent.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::UnknownEntity`] when no container has
    /// `container_id`, and [`ModelError::EmptyField`] when name or
    /// description is empty.
    pub fn add_component(
        &mut self,
        container_id: Id,
        name: &str,
        description: &str,
        technology: Option<&str>,
    ) -> Result<Id, ModelError> {
        require_non_empty(name, "name")?;
        require_non_empty(description, "description")?;

        if self.find_container(container_id).is_none() {
            return Err(ModelError::UnknownEntity {
                id: container_id.to_string(),
            });
        }

        let id = self.allocate_child(container_id, &clean(name));
        debug!(id:% = id, container:% = container_id; "Adding component");
        self.components
            .entry(container_id)
            .or_default()
            .push(Component {
                id,
                container_id,
                name: name.to_string(),
                description: description.to_string(),
                technology: non_empty(technology),
            });
        Ok(id)
    }

    /// Add a relationship between two existing entities.
    ///
    /// Endpoint labels are derived from the live entities at add time.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::SelfReference`] when source and target are the
    /// same entity, [`ModelError::UnknownEntity`] when either endpoint does
    /// not exist, and [`ModelError::EmptyField`] for an empty description.
    /// A refused add leaves the relationship sequence untouched.
    pub fn add_relationship(
        &mut self,
        source_id: Id,
        target_id: Id,
        description: &str,
    ) -> Result<(), ModelError> {
        require_non_empty(description, "description")?;
        if source_id == target_id {
            return Err(ModelError::SelfReference);
        }

        let source_label = self.endpoint_label(source_id)?;
        let target_label = self.endpoint_label(target_id)?;

        debug!(source:% = source_id, target:% = target_id; "Adding relationship");
        self.relationships.push(Relationship {
            source_id,
            source_label,
            target_id,
            target_label,
            description: description.to_string(),
        });
        Ok(())
    }

    /// Remove the person at `index`, cascading to relationships that
    /// reference it.
    pub fn remove_person(&mut self, index: usize) -> Result<(), ModelError> {
        check_index(index, self.persons.len())?;
        let person = self.persons.remove(index);
        debug!(id:% = person.id; "Removing person");
        self.purge_relationships(&HashSet::from([person.id]));
        Ok(())
    }

    /// Remove the system at `index`, cascading to its containers, their
    /// components, and every relationship referencing a removed entity.
    pub fn remove_system(&mut self, index: usize) -> Result<(), ModelError> {
        check_index(index, self.systems.len())?;
        let system = self.systems.remove(index);
        debug!(id:% = system.id; "Removing system");

        let mut removed = HashSet::from([system.id]);
        if let Some(containers) = self.containers.shift_remove(&system.id) {
            for container in containers {
                removed.insert(container.id);
                if let Some(components) = self.components.shift_remove(&container.id) {
                    removed.extend(components.iter().map(Component::id));
                }
            }
        }
        self.purge_relationships(&removed);
        Ok(())
    }

    /// Remove the container at `index` within the given system, cascading to
    /// its components and to relationships referencing a removed entity.
    pub fn remove_container(&mut self, system_id: Id, index: usize) -> Result<(), ModelError> {
        let len = self.containers.get(&system_id).map_or(0, Vec::len);
        check_index(index, len)?;

        let container = self
            .containers
            .get_mut(&system_id)
            .expect("length checked above")
            .remove(index);
        debug!(id:% = container.id; "Removing container");

        let mut removed = HashSet::from([container.id]);
        if let Some(components) = self.components.shift_remove(&container.id) {
            removed.extend(components.iter().map(Component::id));
        }
        self.purge_relationships(&removed);
        Ok(())
    }

    /// Remove the component at `index` within the given container, cascading
    /// to relationships referencing it.
    pub fn remove_component(&mut self, container_id: Id, index: usize) -> Result<(), ModelError> {
        let len = self.components.get(&container_id).map_or(0, Vec::len);
        check_index(index, len)?;

        let component = self
            .components
            .get_mut(&container_id)
            .expect("length checked above")
            .remove(index);
        debug!(id:% = component.id; "Removing component");
        self.purge_relationships(&HashSet::from([component.id]));
        Ok(())
    }

    /// Remove the relationship at `index`.
    pub fn remove_relationship(&mut self, index: usize) -> Result<(), ModelError> {
        check_index(index, self.relationships.len())?;
        self.relationships.remove(index);
        Ok(())
    }

    /// Enumerate every entity that can serve as a relationship endpoint.
    ///
    /// The order is fixed: persons, systems, containers (in owning-system
    /// insertion order, then container insertion order), components (in
    /// owning-container insertion order, then component insertion order).
    /// The enumeration is stable across calls for the same model state.
    pub fn relationship_candidates(&self) -> Vec<EndpointCandidate> {
        let mut candidates = Vec::new();
        for person in &self.persons {
            candidates.push(candidate(EndpointKind::Person, person.id, &person.name));
        }
        for system in &self.systems {
            candidates.push(candidate(EndpointKind::System, system.id, &system.name));
        }
        for container in self.containers.values().flatten() {
            candidates.push(candidate(
                EndpointKind::Container,
                container.id,
                &container.name,
            ));
        }
        for component in self.components.values().flatten() {
            candidates.push(candidate(
                EndpointKind::Component,
                component.id,
                &component.name,
            ));
        }
        candidates
    }

    /// Borrow all persons in insertion order.
    pub fn persons(&self) -> &[Person] {
        &self.persons
    }

    /// Borrow all systems in insertion order.
    pub fn systems(&self) -> &[System] {
        &self.systems
    }

    /// Borrow all relationships in insertion order.
    pub fn relationships(&self) -> &[Relationship] {
        &self.relationships
    }

    /// Borrow the containers owned by a system, in insertion order.
    pub fn containers_of(&self, system_id: Id) -> &[Container] {
        self.containers.get(&system_id).map_or(&[], Vec::as_slice)
    }

    /// Borrow the components owned by a container, in insertion order.
    pub fn components_of(&self, container_id: Id) -> &[Component] {
        self.components
            .get(&container_id)
            .map_or(&[], Vec::as_slice)
    }

    /// Iterate over the internal systems in insertion order.
    pub fn internal_systems(&self) -> impl Iterator<Item = &System> {
        self.systems
            .iter()
            .filter(|s| s.kind == SystemKind::Internal)
    }

    /// Whether any system owns at least one container.
    pub fn has_containers(&self) -> bool {
        self.containers.values().any(|list| !list.is_empty())
    }

    /// Find a system by display name, regardless of kind.
    pub fn find_system_by_name(&self, name: &str) -> Option<&System> {
        self.systems.iter().find(|s| s.name == name)
    }

    /// Find an internal system by display name.
    pub fn find_internal_system_by_name(&self, name: &str) -> Option<&System> {
        self.internal_systems().find(|s| s.name == name)
    }

    /// Find a container by display name within a system.
    pub fn find_container_by_name(&self, system_id: Id, name: &str) -> Option<&Container> {
        self.containers_of(system_id).iter().find(|c| c.name == name)
    }

    /// Whether `id` names a person or a system.
    ///
    /// Context diagrams only project relationships whose endpoints both
    /// satisfy this test.
    pub fn is_context_endpoint(&self, id: Id) -> bool {
        self.persons.iter().any(|p| p.id == id) || self.systems.iter().any(|s| s.id == id)
    }

    /// Whether `id` is the given system or one of its descendants.
    ///
    /// The check walks the stored parent references; it never relies on id
    /// string prefixes.
    pub fn belongs_to_system(&self, id: Id, system_id: Id) -> bool {
        if id == system_id {
            return true;
        }
        self.containers_of(system_id)
            .iter()
            .any(|container| container.id == id || self.belongs_to_container(id, container.id))
    }

    /// Whether `id` is the given container or one of its components.
    pub fn belongs_to_container(&self, id: Id, container_id: Id) -> bool {
        id == container_id
            || self
                .components_of(container_id)
                .iter()
                .any(|component| component.id == id)
    }

    /// Allocate a unique top-level id from a cleaned name, suffixing a
    /// counter on collision (`Shop`, `Shop2`, ...).
    ///
    /// Allocated ids are never reused within a session, even after the
    /// entity is removed.
    fn allocate(&mut self, base: &str) -> Id {
        let mut id = Id::new(base);
        let mut counter = 2usize;
        while self.allocated.contains(&id) {
            id = Id::new(&format!("{base}{counter}"));
            counter += 1;
        }
        self.allocated.insert(id);
        id
    }

    /// Allocate a unique child id (`Parent_Local`), suffixing a counter on
    /// collision.
    fn allocate_child(&mut self, parent: Id, local: &str) -> Id {
        let mut id = parent.create_child(local);
        let mut counter = 2usize;
        while self.allocated.contains(&id) {
            id = parent.create_child(&format!("{local}{counter}"));
            counter += 1;
        }
        self.allocated.insert(id);
        id
    }

    /// Build the `"Kind: name"` label for a live entity.
    fn endpoint_label(&self, id: Id) -> Result<String, ModelError> {
        let (kind, name) = self
            .lookup_endpoint(id)
            .ok_or_else(|| ModelError::UnknownEntity { id: id.to_string() })?;
        Ok(format!("{kind}: {name}"))
    }

    fn lookup_endpoint(&self, id: Id) -> Option<(EndpointKind, &str)> {
        if let Some(person) = self.persons.iter().find(|p| p.id == id) {
            return Some((EndpointKind::Person, &person.name));
        }
        if let Some(system) = self.systems.iter().find(|s| s.id == id) {
            return Some((EndpointKind::System, &system.name));
        }
        if let Some(container) = self.find_container(id) {
            return Some((EndpointKind::Container, &container.name));
        }
        if let Some(component) = self
            .components
            .values()
            .flatten()
            .find(|c| c.id == id)
        {
            return Some((EndpointKind::Component, &component.name));
        }
        None
    }

    fn find_container(&self, id: Id) -> Option<&Container> {
        self.containers.values().flatten().find(|c| c.id == id)
    }

    fn purge_relationships(&mut self, removed: &HashSet<Id>) {
        self.relationships
            .retain(|r| !removed.contains(&r.source_id) && !removed.contains(&r.target_id));
    }
}

fn candidate(kind: EndpointKind, id: Id, name: &str) -> EndpointCandidate {
    EndpointCandidate {
        label: format!("{kind}: {name}"),
        id,
        kind,
    }
}

fn require_non_empty(value: &str, field: &'static str) -> Result<(), ModelError> {
    if value.is_empty() {
        return Err(ModelError::EmptyField { field });
    }
    Ok(())
}

fn check_index(index: usize, len: usize) -> Result<(), ModelError> {
    if index >= len {
        return Err(ModelError::IndexOutOfRange { index, len });
    }
    Ok(())
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value.filter(|v| !v.is_empty()).map(str::to_string)
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn shop_model() -> (ArchitectureModel, Id) {
        let mut model = ArchitectureModel::new();
        let shop = model
            .add_system("Shop", "Online store", SystemKind::Internal)
            .expect("system");
        (model, shop)
    }

    #[test]
    fn add_then_remove_restores_lengths() {
        let (mut model, _shop) = shop_model();
        model.add_person("Alice", "User").expect("person");

        assert_eq!(model.persons().len(), 1);
        assert_eq!(model.systems().len(), 1);

        model.remove_person(0).expect("remove");
        assert_eq!(model.persons().len(), 0);
        assert_eq!(model.systems().len(), 1);
    }

    #[test]
    fn empty_fields_are_refused() {
        let mut model = ArchitectureModel::new();
        assert_eq!(
            model.add_person("", "User"),
            Err(ModelError::EmptyField { field: "name" })
        );
        assert_eq!(
            model.add_system("Shop", "", SystemKind::Internal),
            Err(ModelError::EmptyField { field: "description" })
        );
        assert!(model.persons().is_empty());
        assert!(model.systems().is_empty());
    }

    #[test]
    fn duplicate_names_get_suffixed_ids() {
        let mut model = ArchitectureModel::new();
        let first = model
            .add_system("Shop", "First", SystemKind::Internal)
            .expect("first");
        let second = model
            .add_system("Shop", "Second", SystemKind::Internal)
            .expect("second");

        assert_eq!(first, "Shop");
        assert_eq!(second, "Shop2");
    }

    #[test]
    fn removed_ids_are_not_reused() {
        let mut model = ArchitectureModel::new();
        model.add_person("Alice", "First").expect("person");
        model.remove_person(0).expect("remove");
        let again = model.add_person("Alice", "Second").expect("person");

        assert_eq!(again, "Alice2");
    }

    #[test]
    fn container_ids_derive_from_system() {
        let (mut model, shop) = shop_model();
        let web = model
            .add_container(shop, "Web App", "Storefront", Some("React"))
            .expect("container");
        let api = model
            .add_container(shop, "Web App", "Duplicate name", None)
            .expect("container");

        assert_eq!(web, "Shop_WebApp");
        assert_eq!(api, "Shop_WebApp2");
    }

    #[test]
    fn container_requires_internal_system() {
        let mut model = ArchitectureModel::new();
        let payments = model
            .add_system("Payments", "Card processor", SystemKind::External)
            .expect("system");

        assert_eq!(
            model.add_container(payments, "Gateway", "Card API", None),
            Err(ModelError::ExternalSystem {
                name: "Payments".to_string()
            })
        );
        assert_eq!(
            model.add_container(Id::new("Missing"), "Gateway", "Card API", None),
            Err(ModelError::UnknownEntity {
                id: "Missing".to_string()
            })
        );
    }

    #[test]
    fn component_requires_existing_container() {
        let (mut model, shop) = shop_model();
        let web = model
            .add_container(shop, "Web App", "Storefront", None)
            .expect("container");

        let controller = model
            .add_component(web, "Cart Controller", "Handles carts", Some("Axum"))
            .expect("component");
        assert_eq!(controller, "Shop_WebApp_CartController");

        assert_eq!(
            model.add_component(Id::new("Nope"), "X", "Y", None),
            Err(ModelError::UnknownEntity {
                id: "Nope".to_string()
            })
        );
    }

    #[test]
    fn empty_technology_is_stored_as_absent() {
        let (mut model, shop) = shop_model();
        model
            .add_container(shop, "Web App", "Storefront", Some(""))
            .expect("container");

        assert_eq!(model.containers_of(shop)[0].technology(), None);
    }

    #[test]
    fn self_relationship_is_refused_without_mutation() {
        let (mut model, shop) = shop_model();
        let result = model.add_relationship(shop, shop, "talks to itself");

        assert_eq!(result, Err(ModelError::SelfReference));
        assert!(model.relationships().is_empty());
    }

    #[test]
    fn relationship_requires_live_endpoints() {
        let (mut model, shop) = shop_model();
        assert_eq!(
            model.add_relationship(Id::new("Ghost"), shop, "haunts"),
            Err(ModelError::UnknownEntity {
                id: "Ghost".to_string()
            })
        );
        assert!(model.relationships().is_empty());
    }

    #[test]
    fn relationship_labels_derive_from_entities() {
        let (mut model, shop) = shop_model();
        let alice = model.add_person("Alice", "User").expect("person");
        model
            .add_relationship(alice, shop, "places orders on")
            .expect("relationship");

        let rel = &model.relationships()[0];
        assert_eq!(rel.source_label(), "Person: Alice");
        assert_eq!(rel.target_label(), "System: Shop");
        assert_eq!(rel.description(), "places orders on");
    }

    #[test]
    fn removing_a_system_cascades() {
        let (mut model, shop) = shop_model();
        let alice = model.add_person("Alice", "User").expect("person");
        let web = model
            .add_container(shop, "Web App", "Storefront", None)
            .expect("container");
        let cart = model
            .add_component(web, "Cart", "Shopping cart", None)
            .expect("component");
        model
            .add_relationship(alice, cart, "uses")
            .expect("relationship");
        model
            .add_relationship(alice, shop, "shops at")
            .expect("relationship");

        model.remove_system(0).expect("remove");

        assert!(model.systems().is_empty());
        assert!(model.containers_of(shop).is_empty());
        assert!(model.components_of(web).is_empty());
        assert!(model.relationships().is_empty());
        assert_eq!(model.persons().len(), 1);
    }

    #[test]
    fn removing_a_container_cascades() {
        let (mut model, shop) = shop_model();
        let alice = model.add_person("Alice", "User").expect("person");
        let web = model
            .add_container(shop, "Web App", "Storefront", None)
            .expect("container");
        let cart = model
            .add_component(web, "Cart", "Shopping cart", None)
            .expect("component");
        model
            .add_relationship(alice, cart, "uses")
            .expect("relationship");
        model
            .add_relationship(alice, shop, "shops at")
            .expect("relationship");

        model.remove_container(shop, 0).expect("remove");

        assert!(model.containers_of(shop).is_empty());
        assert!(model.components_of(web).is_empty());
        assert_eq!(model.relationships().len(), 1);
        assert_eq!(model.relationships()[0].target_id(), shop);
    }

    #[test]
    fn remove_with_bad_index_is_refused() {
        let (mut model, shop) = shop_model();
        assert_eq!(
            model.remove_system(1),
            Err(ModelError::IndexOutOfRange { index: 1, len: 1 })
        );
        assert_eq!(
            model.remove_container(shop, 0),
            Err(ModelError::IndexOutOfRange { index: 0, len: 0 })
        );
    }

    #[test]
    fn candidates_enumerate_in_fixed_order() {
        let (mut model, shop) = shop_model();
        model.add_person("Alice", "User").expect("person");
        model
            .add_system("Payments", "Card processor", SystemKind::External)
            .expect("system");
        let web = model
            .add_container(shop, "Web App", "Storefront", None)
            .expect("container");
        model
            .add_component(web, "Cart", "Shopping cart", None)
            .expect("component");

        let labels: Vec<_> = model
            .relationship_candidates()
            .iter()
            .map(|c| c.label().to_string())
            .collect();
        assert_eq!(
            labels,
            vec![
                "Person: Alice",
                "System: Shop",
                "System: Payments",
                "Container: Web App",
                "Component: Cart",
            ]
        );
    }

    #[test]
    fn ancestry_lookup_ignores_lookalike_ids() {
        let mut model = ArchitectureModel::new();
        let first = model
            .add_system("Shop", "First", SystemKind::Internal)
            .expect("system");
        let second = model
            .add_system("Shop", "Second", SystemKind::Internal)
            .expect("system");
        let container = model
            .add_container(second, "Api", "Backend", None)
            .expect("container");

        // `Shop2_Api` descends from `Shop2` only, even though its text shares
        // the prefix of `Shop`.
        assert!(model.belongs_to_system(container, second));
        assert!(!model.belongs_to_system(container, first));
    }

    proptest! {
        #[test]
        fn allocator_never_reuses_ids(
            names in proptest::collection::vec("[A-Za-z0-9 !\\.-]{1,12}", 1..8)
        ) {
            let mut model = ArchitectureModel::new();
            let mut seen = HashSet::new();

            for name in &names {
                let id = model.add_person(name, "first").expect("person");
                prop_assert!(seen.insert(id));
            }
            for _ in &names {
                model.remove_person(0).expect("remove");
            }
            // Re-adding the same names after removal still yields fresh ids.
            for name in &names {
                let id = model.add_person(name, "second").expect("person");
                prop_assert!(seen.insert(id));
            }
        }
    }

    #[test]
    fn context_endpoint_test_uses_membership() {
        let (mut model, shop) = shop_model();
        let alice = model.add_person("Alice", "User").expect("person");
        let web = model
            .add_container(shop, "Web App", "Storefront", None)
            .expect("container");

        assert!(model.is_context_endpoint(alice));
        assert!(model.is_context_endpoint(shop));
        assert!(!model.is_context_endpoint(web));
    }
}

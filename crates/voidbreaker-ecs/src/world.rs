use crate::component::{Component, ComponentTable, Variant};
use crate::entity::{Entity, EntityStore};
use crate::registry::{SystemId, SystemRegistry};
use crate::resource::Resources;

/// The central ECS container. Owns all entities, components, system
/// interest lists, and resources.
pub struct World<C: Component> {
    entities: EntityStore,
    components: ComponentTable<C>,
    systems: SystemRegistry<C>,
    resources: Resources,
}

impl<C: Component> World<C> {
    pub fn new() -> Self {
        Self {
            entities: EntityStore::new(),
            components: ComponentTable::new(),
            systems: SystemRegistry::new(),
            resources: Resources::new(),
        }
    }

    fn refresh_systems(&mut self) {
        self.systems.refresh(&self.entities, &self.components);
    }

    // ---- Entity management ----

    /// Create a new entity with no components.
    pub fn create_entity(&mut self) -> Entity {
        let entity = self.entities.create();
        self.refresh_systems();
        entity
    }

    /// Create an entity and attach a full component set, sweeping system
    /// lists once at the end rather than per component.
    pub fn spawn(&mut self, components: impl IntoIterator<Item = C>) -> Entity {
        let entity = self.entities.create();
        for component in components {
            self.components.insert(entity, component);
        }
        self.refresh_systems();
        entity
    }

    /// Destroy an entity and every component it holds.
    ///
    /// Returns `false` (and does nothing) if the entity was already gone.
    pub fn destroy_entity(&mut self, entity: Entity) -> bool {
        if !self.entities.destroy(entity) {
            return false;
        }
        let removed = self.components.remove_all(entity);
        tracing::trace!("Destroyed {:?} ({} components)", entity, removed);
        self.refresh_systems();
        true
    }

    pub fn is_alive(&self, entity: Entity) -> bool {
        self.entities.is_alive(entity)
    }

    /// Number of alive entities.
    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    /// Alive entities in ascending id order.
    pub fn entities(&self) -> impl Iterator<Item = Entity> + '_ {
        self.entities.iter()
    }

    // ---- Component management ----

    /// Attach a component, replacing any existing one of the same kind.
    ///
    /// Returns `false` if the entity is not alive.
    pub fn add_component(&mut self, entity: Entity, component: C) -> bool {
        if !self.entities.is_alive(entity) {
            return false;
        }
        self.components.insert(entity, component);
        self.refresh_systems();
        true
    }

    pub fn get_component(&self, entity: Entity, kind: C::Kind) -> Option<&C> {
        self.components.get(entity, kind)
    }

    pub fn get_component_mut(&mut self, entity: Entity, kind: C::Kind) -> Option<&mut C> {
        self.components.get_mut(entity, kind)
    }

    /// Detach a component by kind, returning it if it was present.
    pub fn remove_component(&mut self, entity: Entity, kind: C::Kind) -> Option<C> {
        let removed = self.components.remove(entity, kind)?;
        self.refresh_systems();
        Some(removed)
    }

    pub fn has_component(&self, entity: Entity, kind: C::Kind) -> bool {
        self.components.contains(entity, kind)
    }

    // ---- Typed access ----

    /// Attach a variant payload. See [`add_component`](Self::add_component).
    pub fn insert<T: Variant<C>>(&mut self, entity: Entity, value: T) -> bool {
        self.add_component(entity, value.into_component())
    }

    pub fn get<T: Variant<C>>(&self, entity: Entity) -> Option<&T> {
        self.components
            .get(entity, T::KIND)
            .and_then(T::from_component)
    }

    pub fn get_mut<T: Variant<C>>(&mut self, entity: Entity) -> Option<&mut T> {
        self.components
            .get_mut(entity, T::KIND)
            .and_then(T::from_component_mut)
    }

    pub fn has<T: Variant<C>>(&self, entity: Entity) -> bool {
        self.components.contains(entity, T::KIND)
    }

    pub fn remove<T: Variant<C>>(&mut self, entity: Entity) -> Option<T> {
        self.remove_component(entity, T::KIND)
            .and_then(T::try_from_component)
    }

    /// Every entity holding a `T`, with its payload.
    pub fn iter<'a, T: Variant<C> + 'a>(&'a self) -> impl Iterator<Item = (Entity, &'a T)> {
        self.components
            .storage(T::KIND)
            .into_iter()
            .flat_map(|storage| storage.iter())
            .filter_map(|(entity, component)| T::from_component(component).map(|t| (entity, t)))
    }

    // ---- Systems ----

    /// Register a system's required component kinds.
    pub fn register_system(
        &mut self,
        name: &'static str,
        requires: impl IntoIterator<Item = C::Kind>,
    ) -> SystemId {
        self.systems
            .register(name, requires, &self.entities, &self.components)
    }

    /// The current matching-entity list of a registered system.
    pub fn matched(&self, id: SystemId) -> &[Entity] {
        self.systems.matched(id)
    }

    pub fn systems(&self) -> &SystemRegistry<C> {
        &self.systems
    }

    // ---- Resources ----

    /// Insert a singleton resource, returning the value it replaced.
    pub fn insert_resource<T: 'static>(&mut self, value: T) -> Option<T> {
        self.resources.insert(value)
    }

    pub fn resource<T: 'static>(&self) -> Option<&T> {
        self.resources.get::<T>()
    }

    pub fn resource_mut<T: 'static>(&mut self) -> Option<&mut T> {
        self.resources.get_mut::<T>()
    }

    pub fn resource_or_default<T: 'static + Default>(&mut self) -> &mut T {
        self.resources.get_or_insert_with(T::default)
    }

    pub fn remove_resource<T: 'static>(&mut self) -> Option<T> {
        self.resources.remove::<T>()
    }
}

impl<C: Component> Default for World<C> {
    fn default() -> Self {
        Self::new()
    }
}

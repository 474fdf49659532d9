use std::fmt;

use crate::component::{Component, ComponentTable};
use crate::entity::{Entity, EntityStore};

/// Handle to a system's registration inside a [`SystemRegistry`].
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct SystemId(usize);

impl SystemId {
    pub fn index(&self) -> usize {
        self.0
    }
}

/// A system's declared interest and the entities that currently satisfy it.
pub struct SystemRegistration<K> {
    name: &'static str,
    /// Sorted, deduplicated. Fixed once registered.
    requires: Vec<K>,
    matched: Vec<Entity>,
}

impl<K: Copy + Ord> SystemRegistration<K> {
    fn new(name: &'static str, requires: impl IntoIterator<Item = K>) -> Self {
        let mut requires: Vec<K> = requires.into_iter().collect();
        requires.sort_unstable();
        requires.dedup();
        Self {
            name,
            requires,
            matched: Vec::new(),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn requires(&self) -> &[K] {
        &self.requires
    }

    /// Matching entities in ascending id order.
    pub fn matched(&self) -> &[Entity] {
        &self.matched
    }
}

impl<K: fmt::Debug> fmt::Debug for SystemRegistration<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SystemRegistration")
            .field("name", &self.name)
            .field("requires", &self.requires)
            .field("matched", &self.matched.len())
            .finish()
    }
}

/// Keeps every registered system's matching-entity list current.
///
/// Lists are rebuilt from scratch by [`refresh`](Self::refresh), which the
/// world calls after each structural change (entity created or destroyed,
/// component added or removed). Plain component mutation does not touch the
/// lists, so steady-state frames never pay for a sweep.
pub struct SystemRegistry<C: Component> {
    registrations: Vec<SystemRegistration<C::Kind>>,
    sweeps: u64,
}

impl<C: Component> SystemRegistry<C> {
    pub fn new() -> Self {
        Self {
            registrations: Vec::new(),
            sweeps: 0,
        }
    }

    /// Register a system's required kinds and materialize its list immediately.
    ///
    /// An empty requirement set matches every live entity.
    pub fn register(
        &mut self,
        name: &'static str,
        requires: impl IntoIterator<Item = C::Kind>,
        entities: &EntityStore,
        components: &ComponentTable<C>,
    ) -> SystemId {
        let mut registration = SystemRegistration::new(name, requires);
        Self::sweep(&mut registration, entities, components);
        let id = SystemId(self.registrations.len());
        tracing::debug!(
            "Registered system '{}' requiring {:?} ({} matching)",
            name,
            registration.requires,
            registration.matched.len()
        );
        self.registrations.push(registration);
        id
    }

    /// Rebuild every system's matching list from the live entity set.
    pub fn refresh(&mut self, entities: &EntityStore, components: &ComponentTable<C>) {
        for registration in &mut self.registrations {
            Self::sweep(registration, entities, components);
        }
        self.sweeps += 1;
    }

    fn sweep(
        registration: &mut SystemRegistration<C::Kind>,
        entities: &EntityStore,
        components: &ComponentTable<C>,
    ) {
        registration.matched.clear();
        registration.matched.extend(
            entities
                .iter()
                .filter(|&entity| components.contains_all(entity, &registration.requires)),
        );
    }

    /// The matching list for a system. Unknown ids yield an empty list.
    pub fn matched(&self, id: SystemId) -> &[Entity] {
        self.registrations
            .get(id.0)
            .map(|registration| registration.matched())
            .unwrap_or(&[])
    }

    pub fn get(&self, id: SystemId) -> Option<&SystemRegistration<C::Kind>> {
        self.registrations.get(id.0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (SystemId, &SystemRegistration<C::Kind>)> {
        self.registrations
            .iter()
            .enumerate()
            .map(|(i, registration)| (SystemId(i), registration))
    }

    /// Number of full re-sweeps performed so far.
    pub fn sweep_count(&self) -> u64 {
        self.sweeps
    }

    pub fn len(&self) -> usize {
        self.registrations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registrations.is_empty()
    }
}

impl<C: Component> Default for SystemRegistry<C> {
    fn default() -> Self {
        Self::new()
    }
}

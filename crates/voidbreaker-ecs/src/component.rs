use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;

use crate::entity::Entity;

/// A closed set of component variants stored by a [`World`](crate::World).
///
/// Games describe their components as one enum and their kinds as a second,
/// fieldless enum. Every value reports its own kind, which is the key it is
/// stored under: an entity holds at most one component per kind.
pub trait Component: 'static + Sized {
    type Kind: Copy + Eq + Ord + Hash + fmt::Debug + 'static;

    fn kind(&self) -> Self::Kind;
}

/// A payload type that is exactly one variant of the component enum `C`.
///
/// Lets callers write `world.get::<Health>(entity)` instead of matching on
/// the enum by hand. Implement it with [`impl_variants!`](crate::impl_variants).
pub trait Variant<C: Component>: Sized {
    const KIND: C::Kind;

    fn from_component(component: &C) -> Option<&Self>;
    fn from_component_mut(component: &mut C) -> Option<&mut Self>;
    fn try_from_component(component: C) -> Option<Self>;
    fn into_component(self) -> C;
}

/// Implement [`Variant`] for each payload of a component enum.
///
/// ```ignore
/// impl_variants!(GameComponent, ComponentKind {
///     Health(Health),
///     Shield(Shield),
/// });
/// ```
#[macro_export]
macro_rules! impl_variants {
    ($component:ident, $kind:ident { $($variant:ident($payload:ty)),+ $(,)? }) => {
        $(
            impl $crate::Variant<$component> for $payload {
                const KIND: $kind = $kind::$variant;

                #[allow(unreachable_patterns)]
                fn from_component(component: &$component) -> Option<&Self> {
                    match component {
                        $component::$variant(value) => Some(value),
                        _ => None,
                    }
                }

                #[allow(unreachable_patterns)]
                fn from_component_mut(component: &mut $component) -> Option<&mut Self> {
                    match component {
                        $component::$variant(value) => Some(value),
                        _ => None,
                    }
                }

                #[allow(unreachable_patterns)]
                fn try_from_component(component: $component) -> Option<Self> {
                    match component {
                        $component::$variant(value) => Some(value),
                        _ => None,
                    }
                }

                fn into_component(self) -> $component {
                    $component::$variant(self)
                }
            }

            impl From<$payload> for $component {
                fn from(value: $payload) -> Self {
                    $component::$variant(value)
                }
            }
        )+
    };
}

/// Sparse-set storage for a single component kind. Provides O(1)
/// insert/remove/lookup and dense iteration.
pub struct SparseSet<C> {
    /// Maps entity → dense index.
    sparse: HashMap<Entity, usize>,
    /// Packed component values.
    dense: Vec<C>,
    /// Entity corresponding to each dense slot (for iteration).
    entities: Vec<Entity>,
}

impl<C> SparseSet<C> {
    pub fn new() -> Self {
        Self {
            sparse: HashMap::new(),
            dense: Vec::new(),
            entities: Vec::new(),
        }
    }

    /// Insert or replace the value for an entity. Returns the replaced value.
    pub fn insert(&mut self, entity: Entity, value: C) -> Option<C> {
        if let Some(&dense_idx) = self.sparse.get(&entity) {
            return Some(std::mem::replace(&mut self.dense[dense_idx], value));
        }
        self.sparse.insert(entity, self.dense.len());
        self.dense.push(value);
        self.entities.push(entity);
        None
    }

    pub fn get(&self, entity: Entity) -> Option<&C> {
        self.sparse.get(&entity).map(|&i| &self.dense[i])
    }

    pub fn get_mut(&mut self, entity: Entity) -> Option<&mut C> {
        self.sparse.get(&entity).map(|&i| &mut self.dense[i])
    }

    /// Remove the value for an entity, swap-removing to keep storage dense.
    pub fn remove(&mut self, entity: Entity) -> Option<C> {
        let dense_idx = self.sparse.remove(&entity)?;
        let last = self.dense.len() - 1;
        if dense_idx != last {
            let moved = self.entities[last];
            self.sparse.insert(moved, dense_idx);
        }
        self.entities.swap_remove(dense_idx);
        Some(self.dense.swap_remove(dense_idx))
    }

    pub fn contains(&self, entity: Entity) -> bool {
        self.sparse.contains_key(&entity)
    }

    /// Iterate over all (entity, &value) pairs in dense order.
    pub fn iter(&self) -> impl Iterator<Item = (Entity, &C)> {
        self.entities.iter().copied().zip(self.dense.iter())
    }

    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    pub fn len(&self) -> usize {
        self.dense.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dense.is_empty()
    }
}

impl<C> Default for SparseSet<C> {
    fn default() -> Self {
        Self::new()
    }
}

/// Every component in the world, one sparse set per kind.
pub struct ComponentTable<C: Component> {
    storages: HashMap<C::Kind, SparseSet<C>>,
}

impl<C: Component> ComponentTable<C> {
    pub fn new() -> Self {
        Self {
            storages: HashMap::new(),
        }
    }

    /// Store a component under its own kind, replacing any previous one wholesale.
    pub fn insert(&mut self, entity: Entity, component: C) -> Option<C> {
        self.storages
            .entry(component.kind())
            .or_default()
            .insert(entity, component)
    }

    pub fn get(&self, entity: Entity, kind: C::Kind) -> Option<&C> {
        self.storages.get(&kind)?.get(entity)
    }

    pub fn get_mut(&mut self, entity: Entity, kind: C::Kind) -> Option<&mut C> {
        self.storages.get_mut(&kind)?.get_mut(entity)
    }

    pub fn remove(&mut self, entity: Entity, kind: C::Kind) -> Option<C> {
        self.storages.get_mut(&kind)?.remove(entity)
    }

    /// Drop every component of an entity. Returns how many were removed.
    pub fn remove_all(&mut self, entity: Entity) -> usize {
        self.storages
            .values_mut()
            .filter_map(|storage| storage.remove(entity))
            .count()
    }

    pub fn contains(&self, entity: Entity, kind: C::Kind) -> bool {
        self.storages
            .get(&kind)
            .is_some_and(|storage| storage.contains(entity))
    }

    /// Whether the entity holds every listed kind.
    pub fn contains_all(&self, entity: Entity, kinds: &[C::Kind]) -> bool {
        kinds.iter().all(|&kind| self.contains(entity, kind))
    }

    pub fn storage(&self, kind: C::Kind) -> Option<&SparseSet<C>> {
        self.storages.get(&kind)
    }

    /// Number of components of any kind held by an entity.
    pub fn count_for(&self, entity: Entity) -> usize {
        self.storages
            .values()
            .filter(|storage| storage.contains(entity))
            .count()
    }
}

impl<C: Component> Default for ComponentTable<C> {
    fn default() -> Self {
        Self::new()
    }
}

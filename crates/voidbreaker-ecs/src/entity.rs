use std::collections::BTreeSet;
use std::fmt;

/// An entity handle.
///
/// Ids increase monotonically and are never reused within a session, so a
/// handle held across frames can always be compared safely: a destroyed
/// entity's id will never alias a newer one.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Entity(u64);

impl Entity {
    /// Create an entity from a raw id (mainly for testing).
    pub const fn from_raw(id: u64) -> Self {
        Self(id)
    }

    /// The raw id of this entity.
    pub fn id(&self) -> u64 {
        self.0
    }
}

impl fmt::Debug for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Entity({})", self.0)
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Issues entity ids and tracks which ones are alive.
pub struct EntityStore {
    next_id: u64,
    alive: BTreeSet<Entity>,
}

impl EntityStore {
    pub fn new() -> Self {
        Self {
            next_id: 0,
            alive: BTreeSet::new(),
        }
    }

    /// Allocate the next unused id and mark it alive.
    pub fn create(&mut self) -> Entity {
        let entity = Entity(self.next_id);
        self.next_id += 1;
        self.alive.insert(entity);
        entity
    }

    /// Mark an entity dead. Returns `true` if it was alive.
    pub fn destroy(&mut self, entity: Entity) -> bool {
        self.alive.remove(&entity)
    }

    pub fn is_alive(&self, entity: Entity) -> bool {
        self.alive.contains(&entity)
    }

    /// Alive entities in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = Entity> + '_ {
        self.alive.iter().copied()
    }

    /// Number of currently alive entities.
    pub fn len(&self) -> usize {
        self.alive.len()
    }

    pub fn is_empty(&self) -> bool {
        self.alive.is_empty()
    }

    /// Total ids handed out this session, dead ones included.
    pub fn issued(&self) -> u64 {
        self.next_id
    }
}

impl Default for EntityStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_sequential() {
        let mut store = EntityStore::new();
        let e0 = store.create();
        let e1 = store.create();
        assert_eq!(e0.id(), 0);
        assert_eq!(e1.id(), 1);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn ids_are_never_reused() {
        let mut store = EntityStore::new();
        let e0 = store.create();
        assert!(store.destroy(e0));
        let e1 = store.create();
        assert_ne!(e0, e1);
        assert_eq!(e1.id(), 1);
        assert!(!store.is_alive(e0));
        assert!(store.is_alive(e1));
        assert_eq!(store.issued(), 2);
    }

    #[test]
    fn double_destroy_is_noop() {
        let mut store = EntityStore::new();
        let e = store.create();
        assert!(store.destroy(e));
        assert!(!store.destroy(e));
        assert!(store.is_empty());
    }

    #[test]
    fn iteration_is_ordered() {
        let mut store = EntityStore::new();
        let ids: Vec<_> = (0..5).map(|_| store.create()).collect();
        store.destroy(ids[2]);
        let alive: Vec<_> = store.iter().collect();
        assert_eq!(alive, vec![ids[0], ids[1], ids[3], ids[4]]);
    }
}

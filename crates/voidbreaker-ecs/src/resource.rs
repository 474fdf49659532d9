use std::any::{Any, TypeId};
use std::collections::HashMap;

/// Type-map storage for singleton resources.
///
/// Each Rust type is one slot; inserting into an occupied slot replaces the
/// old value (last write wins).
pub struct Resources {
    map: HashMap<TypeId, Box<dyn Any>>,
}

impl Resources {
    pub fn new() -> Self {
        Self {
            map: HashMap::new(),
        }
    }

    /// Insert a resource, returning the value it replaced.
    pub fn insert<T: 'static>(&mut self, value: T) -> Option<T> {
        self.map
            .insert(TypeId::of::<T>(), Box::new(value))
            .and_then(|old| old.downcast().ok())
            .map(|old| *old)
    }

    pub fn get<T: 'static>(&self) -> Option<&T> {
        self.map
            .get(&TypeId::of::<T>())
            .and_then(|b| b.downcast_ref())
    }

    pub fn get_mut<T: 'static>(&mut self) -> Option<&mut T> {
        self.map
            .get_mut(&TypeId::of::<T>())
            .and_then(|b| b.downcast_mut())
    }

    /// Get a resource, inserting one built by `init` if the slot is empty.
    pub fn get_or_insert_with<T: 'static>(&mut self, init: impl FnOnce() -> T) -> &mut T {
        self.map
            .entry(TypeId::of::<T>())
            .or_insert_with(|| Box::new(init()))
            .downcast_mut()
            .expect("resource slot keyed by its own TypeId")
    }

    /// Remove a resource, returning it if it existed.
    pub fn remove<T: 'static>(&mut self) -> Option<T> {
        self.map
            .remove(&TypeId::of::<T>())
            .and_then(|b| b.downcast().ok())
            .map(|b| *b)
    }

    pub fn contains<T: 'static>(&self) -> bool {
        self.map.contains_key(&TypeId::of::<T>())
    }
}

impl Default for Resources {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_and_get() {
        let mut res = Resources::new();
        res.insert(42u32);
        res.insert("hello".to_string());
        assert_eq!(res.get::<u32>(), Some(&42));
        assert_eq!(res.get::<String>(), Some(&"hello".to_string()));
    }

    #[test]
    fn last_write_wins() {
        let mut res = Resources::new();
        assert_eq!(res.insert(1u32), None);
        assert_eq!(res.insert(2u32), Some(1));
        assert_eq!(res.get::<u32>(), Some(&2));
    }

    #[test]
    fn get_or_insert_with_keeps_existing() {
        let mut res = Resources::new();
        res.get_or_insert_with(Vec::<i32>::new).push(1);
        res.get_or_insert_with(Vec::<i32>::new).push(2);
        assert_eq!(res.get::<Vec<i32>>(), Some(&vec![1, 2]));
    }

    #[test]
    fn remove_resource() {
        let mut res = Resources::new();
        res.insert(99u32);
        assert_eq!(res.remove::<u32>(), Some(99));
        assert!(!res.contains::<u32>());
        assert_eq!(res.remove::<u32>(), None);
    }
}

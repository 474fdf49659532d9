//! Collision tags and layers

use std::fmt;

/// Label on a collidable entity, used for filtering and resolution dispatch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tag {
    /// The player's ship (the actor)
    Ship,
    /// A projectile
    Bullet,
    /// A destructible or solid obstacle
    Block,
    /// A collectible reward
    Pickup,
}

impl Tag {
    pub const ALL: [Tag; 4] = [Tag::Ship, Tag::Bullet, Tag::Block, Tag::Pickup];

    const fn bit(self) -> u8 {
        1 << (self as u8)
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Ship => "ship",
            Self::Bullet => "bullet",
            Self::Block => "block",
            Self::Pickup => "pickup",
        }
    }
}

/// A small set of [`Tag`]s
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TagSet(u8);

impl TagSet {
    pub const EMPTY: TagSet = TagSet(0);

    pub const fn of(tags: &[Tag]) -> Self {
        let mut bits = 0;
        let mut i = 0;
        while i < tags.len() {
            bits |= tags[i].bit();
            i += 1;
        }
        Self(bits)
    }

    pub const fn with(self, tag: Tag) -> Self {
        Self(self.0 | tag.bit())
    }

    pub const fn contains(self, tag: Tag) -> bool {
        self.0 & tag.bit() != 0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn iter(self) -> impl Iterator<Item = Tag> {
        Tag::ALL.into_iter().filter(move |&tag| self.contains(tag))
    }

    /// How the collision pass treats this entity when it leaves the screen.
    pub fn cull_policy(self) -> CullPolicy {
        if self.contains(Tag::Ship) {
            CullPolicy::Persistent
        } else if self.contains(Tag::Bullet) || self.contains(Tag::Pickup) {
            CullPolicy::Transient
        } else {
            CullPolicy::Static
        }
    }
}

impl fmt::Debug for TagSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter().map(Tag::name)).finish()
    }
}

impl From<Tag> for TagSet {
    fn from(tag: Tag) -> Self {
        TagSet::EMPTY.with(tag)
    }
}

/// Off-screen handling during the collision rebuild
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CullPolicy {
    /// Player-controlled: always indexed, wherever it is
    Persistent,
    /// Projectiles and falling pickups: destroyed once outside the buffered viewport
    Transient,
    /// Everything else: indexed, never culled
    Static,
}

/// Collision layer. Entities on different layers only interact if one of
/// them is a trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CollisionLayer(pub u8);

impl CollisionLayer {
    pub const MAIN: CollisionLayer = CollisionLayer(0);
}

impl Default for CollisionLayer {
    fn default() -> Self {
        Self::MAIN
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_membership() {
        let set = TagSet::of(&[Tag::Ship, Tag::Pickup]);
        assert!(set.contains(Tag::Ship));
        assert!(set.contains(Tag::Pickup));
        assert!(!set.contains(Tag::Block));
        assert_eq!(set.iter().collect::<Vec<_>>(), vec![Tag::Ship, Tag::Pickup]);
        assert!(TagSet::EMPTY.is_empty());
    }

    #[test]
    fn cull_policy_by_tag() {
        assert_eq!(TagSet::from(Tag::Ship).cull_policy(), CullPolicy::Persistent);
        assert_eq!(TagSet::from(Tag::Bullet).cull_policy(), CullPolicy::Transient);
        assert_eq!(TagSet::from(Tag::Pickup).cull_policy(), CullPolicy::Transient);
        assert_eq!(TagSet::from(Tag::Block).cull_policy(), CullPolicy::Static);
        assert_eq!(TagSet::EMPTY.cull_policy(), CullPolicy::Static);
    }

    #[test]
    fn debug_lists_names() {
        let set = TagSet::of(&[Tag::Bullet]);
        assert_eq!(format!("{set:?}"), "{\"bullet\"}");
    }
}

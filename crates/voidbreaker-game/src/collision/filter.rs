//! Pair eligibility and role assignment

use voidbreaker_ecs::Entity;

use crate::components::Collider;
use crate::tags::Tag;

/// An eligible pair with each entity in its role
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interaction {
    ProjectileHitsBlock { projectile: Entity, block: Entity },
    ActorCollects { actor: Entity, pickup: Entity },
    ActorRams { actor: Entity, block: Entity },
}

impl Interaction {
    /// Classify a candidate pair. Symmetric in its arguments; `None` means the
    /// pair is ignored.
    pub fn classify(a: (Entity, &Collider), b: (Entity, &Collider)) -> Option<Self> {
        if !layers_interact(a.1, b.1) {
            return None;
        }
        Self::ordered(a, b).or_else(|| Self::ordered(b, a))
    }

    fn ordered((first, x): (Entity, &Collider), (second, y): (Entity, &Collider)) -> Option<Self> {
        if x.tags.contains(Tag::Bullet) && y.tags.contains(Tag::Block) {
            Some(Self::ProjectileHitsBlock {
                projectile: first,
                block: second,
            })
        } else if x.tags.contains(Tag::Ship) && y.tags.contains(Tag::Pickup) {
            Some(Self::ActorCollects {
                actor: first,
                pickup: second,
            })
        } else if x.tags.contains(Tag::Ship) && y.tags.contains(Tag::Block) {
            Some(Self::ActorRams {
                actor: first,
                block: second,
            })
        } else {
            None
        }
    }

    pub fn entities(&self) -> (Entity, Entity) {
        match *self {
            Self::ProjectileHitsBlock { projectile, block } => (projectile, block),
            Self::ActorCollects { actor, pickup } => (actor, pickup),
            Self::ActorRams { actor, block } => (actor, block),
        }
    }
}

fn layers_interact(a: &Collider, b: &Collider) -> bool {
    a.layer == b.layer || a.trigger || b.trigger
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tags::{CollisionLayer, TagSet};
    use glam::Vec2;

    fn collider(tag: Tag) -> Collider {
        Collider::new(Vec2::ONE, TagSet::from(tag))
    }

    #[test]
    fn classification_is_symmetric() {
        let bullet = (Entity::from_raw(1), &collider(Tag::Bullet));
        let block = (Entity::from_raw(2), &collider(Tag::Block));
        let expected = Some(Interaction::ProjectileHitsBlock {
            projectile: Entity::from_raw(1),
            block: Entity::from_raw(2),
        });
        assert_eq!(Interaction::classify(bullet, block), expected);
        assert_eq!(Interaction::classify(block, bullet), expected);
    }

    #[test]
    fn unrelated_tags_are_ignored() {
        let ship = collider(Tag::Ship);
        let bullet = collider(Tag::Bullet);
        let block = collider(Tag::Block);
        let pickup = collider(Tag::Pickup);
        let e = Entity::from_raw;
        assert_eq!(Interaction::classify((e(1), &ship), (e(2), &bullet)), None);
        assert_eq!(Interaction::classify((e(1), &block), (e(2), &block)), None);
        assert_eq!(Interaction::classify((e(1), &bullet), (e(2), &pickup)), None);
        assert_eq!(Interaction::classify((e(1), &ship), (e(2), &ship)), None);
    }

    #[test]
    fn actor_roles() {
        let ship = collider(Tag::Ship);
        let e = Entity::from_raw;
        assert_eq!(
            Interaction::classify((e(5), &collider(Tag::Pickup)), (e(3), &ship)),
            Some(Interaction::ActorCollects { actor: e(3), pickup: e(5) })
        );
        assert_eq!(
            Interaction::classify((e(3), &ship), (e(4), &collider(Tag::Block))),
            Some(Interaction::ActorRams { actor: e(3), block: e(4) })
        );
    }

    #[test]
    fn layers_separate_unless_trigger() {
        let ship = collider(Tag::Ship);
        let far_block = collider(Tag::Block).on_layer(CollisionLayer(2));
        let e = Entity::from_raw;
        assert_eq!(Interaction::classify((e(1), &ship), (e(2), &far_block)), None);

        let far_pickup = collider(Tag::Pickup).on_layer(CollisionLayer(2)).as_trigger();
        assert!(Interaction::classify((e(1), &ship), (e(2), &far_pickup)).is_some());
    }
}

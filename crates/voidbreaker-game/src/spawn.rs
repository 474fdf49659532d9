//! Entity construction helpers
//!
//! Each helper builds a complete entity in one structural change, so the
//! registry sweeps once per spawn.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use tracing::debug;
use voidbreaker_ecs::Entity;

use crate::components::{
    Block, Collider, GameWorld, Health, Movement, Pickup, PickupEffect, PlayerControl, Projectile,
    Transform, Weapon,
};
use crate::config::GameConfig;
use crate::tags::{Tag, TagSet};

/// A block position from an already-parsed level layout
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BlockPlacement {
    /// Top-left corner
    pub position: Vec2,
    #[serde(default)]
    pub indestructible: bool,
}

impl BlockPlacement {
    pub fn at(position: Vec2) -> Self {
        Self {
            position,
            indestructible: false,
        }
    }

    pub fn solid(position: Vec2) -> Self {
        Self {
            position,
            indestructible: true,
        }
    }

    /// A centred row of `count` blocks at height `y`
    pub fn row(config: &GameConfig, y: f32, count: usize, gap: f32) -> Vec<Self> {
        let size = config.blocks.size;
        let total = count as f32 * size.x + count.saturating_sub(1) as f32 * gap;
        let start = (config.world.width - total) * 0.5;
        (0..count)
            .map(|i| Self::at(Vec2::new(start + i as f32 * (size.x + gap), y)))
            .collect()
    }
}

/// The player-controlled actor
pub fn spawn_ship(world: &mut GameWorld, config: &GameConfig, position: Vec2) -> Entity {
    let ship = &config.ship;
    let weapon = &config.weapon;
    let entity = world.spawn([
        Transform::at(position).into(),
        Movement {
            max_speed: ship.max_speed,
            acceleration: ship.acceleration,
            drag: ship.drag,
        }
        .into(),
        Collider::new(ship.size, TagSet::of(&[Tag::Ship])).into(),
        Health::new(ship.health).into(),
        Weapon {
            damage: weapon.damage,
            cooldown: weapon.cooldown,
            bullet_speed: weapon.bullet_speed,
            timer: 0.0,
        }
        .into(),
        PlayerControl.into(),
    ]);
    debug!("Spawned ship {:?} at {:?}", entity, position);
    entity
}

/// A projectile travelling at `velocity`
pub fn spawn_bullet(
    world: &mut GameWorld,
    config: &GameConfig,
    position: Vec2,
    velocity: Vec2,
    damage: f32,
    owner: Option<Entity>,
) -> Entity {
    world.spawn([
        Transform::moving(position, velocity).into(),
        Collider::new(config.weapon.bullet_size, TagSet::of(&[Tag::Bullet])).into(),
        Projectile { damage, owner }.into(),
    ])
}

pub fn spawn_block(world: &mut GameWorld, config: &GameConfig, placement: BlockPlacement) -> Entity {
    let tuning = &config.blocks;
    let block = if placement.indestructible {
        Block::indestructible(tuning.contact_damage)
    } else {
        Block::new(tuning.durability, tuning.contact_damage, tuning.points)
    };
    world.spawn([
        Transform::at(placement.position).into(),
        Collider::new(tuning.size, TagSet::of(&[Tag::Block])).into(),
        block.into(),
    ])
}

/// A pickup that drifts down the screen from `position`
pub fn spawn_pickup(
    world: &mut GameWorld,
    config: &GameConfig,
    position: Vec2,
    effect: PickupEffect,
) -> Entity {
    let velocity = Vec2::new(0.0, config.pickups.fall_speed);
    let entity = world.spawn([
        Transform::moving(position, velocity).into(),
        Collider::new(config.pickups.size, TagSet::of(&[Tag::Pickup]))
            .as_trigger()
            .into(),
        Pickup { effect }.into(),
    ]);
    debug!("Spawned {} pickup {:?} at {:?}", effect.name(), entity, position);
    entity
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::ComponentKind;

    #[test]
    fn ship_has_full_kit() {
        let mut world = GameWorld::new();
        let config = GameConfig::default();
        let ship = spawn_ship(&mut world, &config, Vec2::new(100.0, 500.0));
        for kind in [
            ComponentKind::Transform,
            ComponentKind::Movement,
            ComponentKind::Collider,
            ComponentKind::Health,
            ComponentKind::Weapon,
            ComponentKind::PlayerControl,
        ] {
            assert!(world.has_component(ship, kind), "missing {kind:?}");
        }
    }

    #[test]
    fn solid_placement_is_indestructible() {
        let mut world = GameWorld::new();
        let config = GameConfig::default();
        let block = spawn_block(&mut world, &config, BlockPlacement::solid(Vec2::ZERO));
        assert!(world.get::<Block>(block).unwrap().indestructible);
    }

    #[test]
    fn pickup_falls_and_is_a_trigger() {
        let mut world = GameWorld::new();
        let config = GameConfig::default();
        let pickup = spawn_pickup(
            &mut world,
            &config,
            Vec2::new(5.0, 5.0),
            PickupEffect::Repair { amount: 1.0 },
        );
        assert!(world.get::<Collider>(pickup).unwrap().trigger);
        assert_eq!(
            world.get::<Transform>(pickup).unwrap().velocity,
            Vec2::new(0.0, config.pickups.fall_speed)
        );
    }

    #[test]
    fn block_row_is_centred() {
        let config = GameConfig::default();
        let row = BlockPlacement::row(&config, 40.0, 4, 8.0);
        assert_eq!(row.len(), 4);
        let left = row[0].position.x;
        let right = row[3].position.x + config.blocks.size.x;
        assert!((left - (config.world.width - right)).abs() < 1e-3);
    }
}

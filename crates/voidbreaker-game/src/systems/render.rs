use voidbreaker_core::Color;
use voidbreaker_ecs::{Entity, System};

use crate::components::{
    Block, Collider, ComponentKind, GameComponent, GameWorld, Shield, Transform,
};
use crate::resources::{RenderItem, RenderQueue, Sprite};
use crate::tags::{Tag, TagSet};

/// Rebuilds the [`RenderQueue`] from the settled state of the tick.
pub struct RenderQueueSystem;

impl RenderQueueSystem {
    fn sprite(tags: TagSet) -> Sprite {
        if tags.contains(Tag::Ship) {
            Sprite::Ship
        } else if tags.contains(Tag::Bullet) {
            Sprite::Bullet
        } else if tags.contains(Tag::Pickup) {
            Sprite::Pickup
        } else if tags.contains(Tag::Block) {
            Sprite::Block
        } else {
            Sprite::Unknown
        }
    }

    fn tint(world: &GameWorld, entity: Entity, sprite: Sprite) -> Color {
        match sprite {
            Sprite::Ship if world.has::<Shield>(entity) => Color::BLUE,
            Sprite::Ship => Color::CYAN,
            Sprite::Bullet => Color::YELLOW,
            Sprite::Pickup => Color::GREEN,
            Sprite::Block => match world.get::<Block>(entity) {
                Some(block) if block.indestructible => Color::GRAY,
                // Fades toward red as durability drops
                Some(block) => Color::lerp(&Color::RED, &Color::WHITE, block.fraction()),
                None => Color::WHITE,
            },
            Sprite::Unknown => Color::WHITE,
        }
    }
}

impl System<GameComponent> for RenderQueueSystem {
    fn name(&self) -> &'static str {
        "render_queue"
    }

    fn requires(&self) -> Vec<ComponentKind> {
        vec![ComponentKind::Transform, ComponentKind::Collider]
    }

    fn run(&mut self, world: &mut GameWorld, entities: &[Entity], _delta: f32) {
        let mut items: Vec<RenderItem> = entities
            .iter()
            .filter_map(|&entity| {
                let transform = world.get::<Transform>(entity)?;
                let collider = world.get::<Collider>(entity)?;
                let sprite = Self::sprite(collider.tags);
                Some(RenderItem {
                    entity,
                    bounds: collider.bounds(transform.position),
                    sprite,
                    tint: Self::tint(world, entity, sprite),
                })
            })
            .collect();
        items.sort_by_key(|item| (item.sprite.z_order(), item.entity));

        world.resource_or_default::<RenderQueue>().items = items;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::spawn::{spawn_block, spawn_bullet, spawn_ship, BlockPlacement};
    use glam::Vec2;

    #[test]
    fn sorted_back_to_front() {
        let config = GameConfig::default();
        let mut world = GameWorld::new();
        let ship = spawn_ship(&mut world, &config, Vec2::new(10.0, 10.0));
        let bullet = spawn_bullet(&mut world, &config, Vec2::new(20.0, 0.0), Vec2::ZERO, 1.0, None);
        let block = spawn_block(&mut world, &config, BlockPlacement::at(Vec2::new(100.0, 10.0)));

        RenderQueueSystem.run(&mut world, &[ship, bullet, block], 0.016);
        let queue = world.resource::<RenderQueue>().unwrap();
        let order: Vec<_> = queue.items.iter().map(|i| (i.entity, i.sprite)).collect();
        assert_eq!(
            order,
            vec![(block, Sprite::Block), (bullet, Sprite::Bullet), (ship, Sprite::Ship)]
        );
        assert_eq!(queue.items[0].bounds.min(), Vec2::new(100.0, 10.0));
        assert_eq!(queue.items[0].tint, Color::WHITE);
    }

    #[test]
    fn shielded_ship_is_tinted() {
        let config = GameConfig::default();
        let mut world = GameWorld::new();
        let ship = spawn_ship(&mut world, &config, Vec2::ZERO);
        world.insert(ship, Shield { capacity: 10.0, remaining: 1.0 });

        RenderQueueSystem.run(&mut world, &[ship], 0.016);
        assert_eq!(world.resource::<RenderQueue>().unwrap().items[0].tint, Color::BLUE);
    }
}

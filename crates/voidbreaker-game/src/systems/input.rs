use glam::Vec2;
use voidbreaker_ecs::{Entity, System};

use crate::components::{
    Collider, ComponentKind, GameComponent, GameWorld, Movement, SpeedBoost, Transform,
};
use crate::resources::{InputState, Viewport};

/// Steers player-controlled entities from the [`InputState`] resource and
/// keeps them on screen.
pub struct InputSystem;

impl System<GameComponent> for InputSystem {
    fn name(&self) -> &'static str {
        "input"
    }

    fn requires(&self) -> Vec<ComponentKind> {
        vec![
            ComponentKind::PlayerControl,
            ComponentKind::Transform,
            ComponentKind::Movement,
        ]
    }

    fn run(&mut self, world: &mut GameWorld, entities: &[Entity], delta: f32) {
        let input = world.resource::<InputState>().copied().unwrap_or_default();
        let viewport = world.resource::<Viewport>().copied().unwrap_or_default();
        let direction = input.direction();

        for &entity in entities {
            let Some(&movement) = world.get::<Movement>(entity) else {
                continue;
            };
            let boost = world.get::<SpeedBoost>(entity).map_or(1.0, |b| b.multiplier);
            let size = world.get::<Collider>(entity).map_or(Vec2::ZERO, |c| c.size);
            let Some(transform) = world.get_mut::<Transform>(entity) else {
                continue;
            };

            let mut velocity = transform.velocity;
            if direction != Vec2::ZERO {
                velocity += direction * movement.acceleration * delta;
            } else {
                velocity -= velocity * (movement.drag * delta).min(1.0);
            }
            transform.velocity = velocity.clamp_length_max(movement.max_speed * boost);

            let max = (Vec2::new(viewport.width, viewport.height) - size).max(Vec2::ZERO);
            let clamped = transform.position.clamp(Vec2::ZERO, max);
            if clamped.x != transform.position.x {
                transform.velocity.x = 0.0;
            }
            if clamped.y != transform.position.y {
                transform.velocity.y = 0.0;
            }
            transform.position = clamped;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::PlayerControl;

    fn steerable(world: &mut GameWorld, position: Vec2) -> Entity {
        world.spawn([
            Transform::at(position).into(),
            Movement {
                max_speed: 100.0,
                acceleration: 1000.0,
                drag: 5.0,
            }
            .into(),
            Collider::new(Vec2::new(10.0, 10.0), Default::default()).into(),
            PlayerControl.into(),
        ])
    }

    #[test]
    fn accelerates_toward_input_up_to_max_speed() {
        let mut world = GameWorld::new();
        let ship = steerable(&mut world, Vec2::new(50.0, 50.0));
        world.insert_resource(InputState {
            right: true,
            ..Default::default()
        });

        let mut system = InputSystem;
        system.run(&mut world, &[ship], 0.05);
        assert_eq!(world.get::<Transform>(ship).unwrap().velocity, Vec2::new(50.0, 0.0));
        system.run(&mut world, &[ship], 0.5);
        let velocity = world.get::<Transform>(ship).unwrap().velocity;
        assert!(velocity.abs_diff_eq(Vec2::new(100.0, 0.0), 1e-3));
    }

    #[test]
    fn speed_boost_raises_the_cap() {
        let mut world = GameWorld::new();
        let ship = steerable(&mut world, Vec2::new(50.0, 50.0));
        world.insert(ship, SpeedBoost { multiplier: 2.0, remaining: 5.0 });
        world.insert_resource(InputState {
            down: true,
            ..Default::default()
        });

        InputSystem.run(&mut world, &[ship], 1.0);
        let velocity = world.get::<Transform>(ship).unwrap().velocity;
        assert!(velocity.abs_diff_eq(Vec2::new(0.0, 200.0), 1e-3));
    }

    #[test]
    fn drag_slows_without_input() {
        let mut world = GameWorld::new();
        let ship = steerable(&mut world, Vec2::new(50.0, 50.0));
        world.get_mut::<Transform>(ship).unwrap().velocity = Vec2::new(100.0, 0.0);

        InputSystem.run(&mut world, &[ship], 0.1);
        assert_eq!(world.get::<Transform>(ship).unwrap().velocity, Vec2::new(50.0, 0.0));
    }

    #[test]
    fn stays_inside_viewport() {
        let mut world = GameWorld::new();
        world.insert_resource(Viewport::new(200.0, 100.0));
        let ship = steerable(&mut world, Vec2::new(250.0, -20.0));
        world.get_mut::<Transform>(ship).unwrap().velocity = Vec2::new(10.0, -10.0);

        InputSystem.run(&mut world, &[ship], 0.0);
        let transform = world.get::<Transform>(ship).unwrap();
        assert_eq!(transform.position, Vec2::new(190.0, 0.0));
        assert_eq!(transform.velocity, Vec2::ZERO);
    }
}

use voidbreaker_ecs::{Entity, System};

use crate::components::{ComponentKind, GameComponent, GameWorld, TimeScale, Transform};
use crate::resources::WorldClock;

/// Integrates `position += velocity * dt`. Entities holding their own
/// `TimeScale` run at full speed; everything else runs at the world scale.
pub struct MovementSystem;

impl System<GameComponent> for MovementSystem {
    fn name(&self) -> &'static str {
        "movement"
    }

    fn requires(&self) -> Vec<ComponentKind> {
        vec![ComponentKind::Transform]
    }

    fn run(&mut self, world: &mut GameWorld, entities: &[Entity], delta: f32) {
        let scale = world.resource::<WorldClock>().map_or(1.0, |c| c.scale);

        for &entity in entities {
            let dt = if world.has::<TimeScale>(entity) {
                delta
            } else {
                delta * scale
            };
            if let Some(transform) = world.get_mut::<Transform>(entity) {
                transform.position += transform.velocity * dt;
            }
        }
    }
}

use voidbreaker_ecs::{Entity, System};

use crate::components::{ComponentKind, GameComponent, GameWorld, TimeScale};
use crate::resources::WorldClock;

/// Publishes the world time scale: the smallest active `TimeScale` factor,
/// or 1.0 when none is active.
pub struct TimeDilationSystem;

impl System<GameComponent> for TimeDilationSystem {
    fn name(&self) -> &'static str {
        "time_dilation"
    }

    fn requires(&self) -> Vec<ComponentKind> {
        vec![ComponentKind::TimeScale]
    }

    fn run(&mut self, world: &mut GameWorld, entities: &[Entity], _delta: f32) {
        let scale = entities
            .iter()
            .filter_map(|&e| world.get::<TimeScale>(e))
            .map(|t| t.factor.max(0.0))
            .reduce(f32::min)
            .unwrap_or(1.0);
        world.resource_or_default::<WorldClock>().scale = scale;
    }
}

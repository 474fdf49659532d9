use tracing::debug;
use voidbreaker_ecs::{Entity, System};

use crate::components::{
    ComponentKind, DamageBoost, GameComponent, GameWorld, RapidFire, Shield, SpeedBoost, TimeScale,
    TimedBuff,
};

/// Counts timed buffs down and removes the ones that ran out.
pub struct BuffSystem;

impl System<GameComponent> for BuffSystem {
    fn name(&self) -> &'static str {
        "buffs"
    }

    fn requires(&self) -> Vec<ComponentKind> {
        Vec::new()
    }

    fn run(&mut self, world: &mut GameWorld, entities: &[Entity], delta: f32) {
        for &entity in entities {
            tick::<TimeScale>(world, entity, delta);
            tick::<Shield>(world, entity, delta);
            tick::<RapidFire>(world, entity, delta);
            tick::<DamageBoost>(world, entity, delta);
            tick::<SpeedBoost>(world, entity, delta);
        }
    }
}

fn tick<T: TimedBuff>(world: &mut GameWorld, entity: Entity, delta: f32) {
    let Some(buff) = world.get_mut::<T>(entity) else {
        return;
    };
    let remaining = buff.remaining_mut();
    *remaining -= delta;
    if *remaining <= 0.0 {
        world.remove::<T>(entity);
        debug!("{:?} lost {:?}", entity, T::KIND);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_down_and_expires() {
        let mut world = GameWorld::new();
        let e = world.spawn([
            Shield { capacity: 50.0, remaining: 1.0 }.into(),
            SpeedBoost { multiplier: 1.5, remaining: 0.25 }.into(),
        ]);

        BuffSystem.run(&mut world, &[e], 0.5);
        assert_eq!(world.get::<Shield>(e).unwrap().remaining, 0.5);
        assert!(!world.has::<SpeedBoost>(e));

        BuffSystem.run(&mut world, &[e], 0.5);
        assert!(!world.has::<Shield>(e));
        assert!(world.is_alive(e));
    }
}

use tracing::info;
use voidbreaker_ecs::{Entity, System};
use voidbreaker_physics::SpatialGrid;

use crate::components::{ComponentKind, GameComponent, GameWorld, Health, PlayerControl};
use crate::resources::{GameStatus, SoundCue, SoundQueue};

/// Removes entities whose health ran out and ends the game when the last
/// player-controlled one goes.
pub struct HealthSystem;

impl System<GameComponent> for HealthSystem {
    fn name(&self) -> &'static str {
        "health"
    }

    fn requires(&self) -> Vec<ComponentKind> {
        vec![ComponentKind::Health]
    }

    fn run(&mut self, world: &mut GameWorld, entities: &[Entity], _delta: f32) {
        let mut lost_player = false;

        for &entity in entities {
            if !world.get::<Health>(entity).is_some_and(Health::is_depleted) {
                continue;
            }
            if world.has::<PlayerControl>(entity) {
                lost_player = true;
                world.resource_or_default::<SoundQueue>().push(entity, SoundCue::ShipDestroyed);
            }
            if let Some(grid) = world.resource_mut::<SpatialGrid>() {
                grid.remove(entity);
            }
            world.destroy_entity(entity);
            info!("{:?} destroyed", entity);
        }

        if lost_player && world.iter::<PlayerControl>().next().is_none() {
            world.resource_or_default::<GameStatus>().game_over = true;
            info!("Game over");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn last_player_death_ends_the_game() {
        let mut world = GameWorld::new();
        let alive = world.spawn([Health::new(10.0).into(), PlayerControl.into()]);
        let dead = world.spawn([Health { current: 0.0, max: 10.0 }.into(), PlayerControl.into()]);

        HealthSystem.run(&mut world, &[alive, dead], 0.016);
        assert!(world.is_alive(alive));
        assert!(!world.is_alive(dead));
        assert!(!world.resource_or_default::<GameStatus>().game_over);

        world.get_mut::<Health>(alive).unwrap().damage(10.0);
        HealthSystem.run(&mut world, &[alive], 0.016);
        assert!(world.resource_or_default::<GameStatus>().game_over);

        let cues: Vec<_> = world
            .resource_or_default::<SoundQueue>()
            .drain()
            .into_iter()
            .map(|e| (e.source, e.cue))
            .collect();
        assert_eq!(
            cues,
            vec![(dead, SoundCue::ShipDestroyed), (alive, SoundCue::ShipDestroyed)]
        );
    }
}

use glam::Vec2;
use tracing::trace;
use voidbreaker_ecs::{Entity, System};

use crate::components::{
    Collider, ComponentKind, DamageBoost, GameComponent, GameWorld, RapidFire, Transform, Weapon,
};
use crate::config::GameConfig;
use crate::resources::{InputState, SoundCue, SoundQueue};
use crate::spawn::spawn_bullet;

/// Cools weapons down and fires while the fire input is held.
pub struct WeaponSystem {
    config: GameConfig,
}

impl WeaponSystem {
    pub fn new(config: GameConfig) -> Self {
        Self { config }
    }
}

impl System<GameComponent> for WeaponSystem {
    fn name(&self) -> &'static str {
        "weapon"
    }

    fn requires(&self) -> Vec<ComponentKind> {
        vec![
            ComponentKind::PlayerControl,
            ComponentKind::Transform,
            ComponentKind::Weapon,
        ]
    }

    fn run(&mut self, world: &mut GameWorld, entities: &[Entity], delta: f32) {
        let firing = world.resource::<InputState>().is_some_and(|input| input.fire);

        for &entity in entities {
            let divisor = world
                .get::<RapidFire>(entity)
                .map_or(1.0, |r| r.cooldown_divisor)
                .max(f32::EPSILON);
            let multiplier = world.get::<DamageBoost>(entity).map_or(1.0, |b| b.multiplier);
            let Some(weapon) = world.get_mut::<Weapon>(entity) else {
                continue;
            };

            weapon.timer = (weapon.timer - delta).max(0.0);
            if !firing || weapon.timer > 0.0 {
                continue;
            }
            weapon.timer = weapon.cooldown / divisor;
            let damage = weapon.damage * multiplier;
            let speed = weapon.bullet_speed;

            let (Some(transform), Some(collider)) =
                (world.get::<Transform>(entity), world.get::<Collider>(entity))
            else {
                continue;
            };
            let bullet_size = self.config.weapon.bullet_size;
            let muzzle = Vec2::new(
                transform.position.x + (collider.size.x - bullet_size.x) * 0.5,
                transform.position.y - bullet_size.y,
            );

            let bullet = spawn_bullet(
                world,
                &self.config,
                muzzle,
                Vec2::new(0.0, -speed),
                damage,
                Some(entity),
            );
            world.resource_or_default::<SoundQueue>().push(entity, SoundCue::Fire);
            trace!("{:?} fired {:?}", entity, bullet);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::Projectile;
    use crate::spawn::spawn_ship;

    fn armed() -> (GameWorld, Entity, GameConfig) {
        let config = GameConfig::default();
        let mut world = GameWorld::new();
        let ship = spawn_ship(&mut world, &config, Vec2::new(100.0, 500.0));
        world.insert_resource(InputState {
            fire: true,
            ..Default::default()
        });
        (world, ship, config)
    }

    fn bullets(world: &GameWorld) -> Vec<Projectile> {
        world.iter::<Projectile>().map(|(_, p)| *p).collect()
    }

    #[test]
    fn fires_above_the_ship_and_respects_cooldown() {
        let (mut world, ship, config) = armed();
        let mut system = WeaponSystem::new(config.clone());

        system.run(&mut world, &[ship], 0.016);
        let shots = bullets(&world);
        assert_eq!(shots.len(), 1);
        assert_eq!(shots[0].damage, config.weapon.damage);
        assert_eq!(shots[0].owner, Some(ship));

        let (bullet, _) = world.iter::<Projectile>().next().unwrap();
        let transform = world.get::<Transform>(bullet).unwrap();
        assert!(transform.position.y < 500.0);
        assert!(transform.velocity.y < 0.0);

        system.run(&mut world, &[ship], 0.15);
        assert_eq!(bullets(&world).len(), 1);
        system.run(&mut world, &[ship], 0.15);
        assert_eq!(bullets(&world).len(), 2);
        assert_eq!(world.resource::<SoundQueue>().unwrap().len(), 2);
    }

    #[test]
    fn holds_fire_without_input() {
        let (mut world, ship, config) = armed();
        world.insert_resource(InputState::default());
        WeaponSystem::new(config).run(&mut world, &[ship], 0.016);
        assert!(bullets(&world).is_empty());
    }

    #[test]
    fn buffs_change_cadence_and_damage() {
        let (mut world, ship, config) = armed();
        world.insert(ship, RapidFire { cooldown_divisor: 2.0, remaining: 5.0 });
        world.insert(ship, DamageBoost { multiplier: 3.0, remaining: 5.0 });
        let mut system = WeaponSystem::new(config.clone());

        system.run(&mut world, &[ship], 0.016);
        assert_eq!(world.get::<Weapon>(ship).unwrap().timer, config.weapon.cooldown / 2.0);
        assert_eq!(bullets(&world)[0].damage, config.weapon.damage * 3.0);
    }
}

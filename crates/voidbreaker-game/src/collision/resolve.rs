//! Effects of an overlapping, eligible pair

use glam::Vec2;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::debug;
use voidbreaker_ecs::Entity;
use voidbreaker_physics::SpatialGrid;

use super::filter::Interaction;
use crate::components::{Block, GameWorld, Health, Pickup, Projectile, Shield, Transform};
use crate::config::{GameConfig, PickupConfig};
use crate::resources::{Score, SoundCue, SoundQueue};
use crate::spawn::spawn_pickup;

/// Applies interactions for one collision pass. Destroyed entities leave the
/// grid immediately so queries after the pass never see them.
pub(crate) struct Resolver<'a> {
    pub world: &'a mut GameWorld,
    pub grid: &'a mut SpatialGrid,
    pub rng: &'a mut StdRng,
    pub config: &'a GameConfig,
}

impl Resolver<'_> {
    /// Returns `true` if the interaction had any effect.
    pub fn resolve(&mut self, interaction: Interaction) -> bool {
        match interaction {
            Interaction::ProjectileHitsBlock { projectile, block } => {
                self.projectile_hits_block(projectile, block)
            }
            Interaction::ActorCollects { actor, pickup } => self.actor_collects(actor, pickup),
            Interaction::ActorRams { actor, block } => self.actor_rams(actor, block),
        }
    }

    fn projectile_hits_block(&mut self, projectile: Entity, block: Entity) -> bool {
        let Some(damage) = self.world.get::<Projectile>(projectile).map(|p| p.damage) else {
            return false;
        };
        let Some(state) = self.world.get_mut::<Block>(block) else {
            return false;
        };
        let destroyed = state.apply_damage(damage);
        let points = state.points;

        self.destroy(projectile);
        self.cue(projectile, SoundCue::BlockHit);
        if !destroyed {
            return true;
        }

        self.world.resource_or_default::<Score>().0 += points;
        let position = self.world.get::<Transform>(block).map(|t| t.position);
        if let Some(position) = position {
            self.roll_drop(position);
        }
        self.destroy(block);
        self.cue(projectile, SoundCue::BlockDestroyed);
        debug!("{:?} destroyed {:?} (+{} points)", projectile, block, points);
        true
    }

    fn roll_drop(&mut self, position: Vec2) {
        let PickupConfig {
            drop_chance,
            drop_table,
            ..
        } = &self.config.pickups;
        if !self.rng.gen_bool(f64::from(drop_chance.clamp(0.0, 1.0))) {
            return;
        }
        if let Some(&effect) = drop_table.choose(&mut *self.rng) {
            spawn_pickup(self.world, self.config, position, effect);
        }
    }

    fn actor_collects(&mut self, actor: Entity, pickup: Entity) -> bool {
        let Some(effect) = self.world.get::<Pickup>(pickup).map(|p| p.effect) else {
            return false;
        };
        effect.apply(self.world, actor);
        self.destroy(pickup);
        self.cue(actor, SoundCue::PickupCollected);
        debug!("{:?} collected {}", actor, effect.name());
        true
    }

    fn actor_rams(&mut self, actor: Entity, block: Entity) -> bool {
        let Some(damage) = self.world.get::<Block>(block).map(|b| b.contact_damage) else {
            return false;
        };

        if let Some(shield) = self.world.get_mut::<Shield>(actor).filter(|s| s.capacity > 0.0) {
            shield.capacity = (shield.capacity - damage).max(0.0);
            let broken = shield.capacity <= 0.0;
            self.cue(actor, SoundCue::ShieldHit);
            if broken {
                self.world.remove::<Shield>(actor);
                self.cue(actor, SoundCue::ShieldBroken);
            }
        } else if let Some(health) = self.world.get_mut::<Health>(actor) {
            let remaining = health.damage(damage);
            self.cue(actor, SoundCue::ShipHit);
            debug!("{:?} took {} contact damage ({} left)", actor, damage, remaining);
        } else {
            return false;
        }

        self.destroy(block);
        true
    }

    fn destroy(&mut self, entity: Entity) {
        self.grid.remove(entity);
        self.world.destroy_entity(entity);
    }

    fn cue(&mut self, source: Entity, cue: SoundCue) {
        self.world.resource_or_default::<SoundQueue>().push(source, cue);
    }
}

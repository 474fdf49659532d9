//! Collision pipeline
//!
//! One pass per tick, strictly in this order:
//!
//! 1. Rebuild the [`SpatialGrid`] from current transforms, culling transient
//!    entities that have left the buffered viewport.
//! 2. Collect candidate pairs from the grid.
//! 3. Filter them by layer and tag combination ([`Interaction::classify`]).
//! 4. Confirm exact overlap (inclusive, so touching edges count).
//! 5. Resolve each surviving pair, queueing sound cues as it goes.
//!
//! Pairs are visited in ascending entity order and drops are rolled from a
//! seeded generator, so a pass is deterministic for a given world and seed.

mod filter;
mod resolve;

pub use filter::Interaction;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, trace, warn};
use voidbreaker_ecs::{Entity, System};
use voidbreaker_physics::SpatialGrid;

use crate::components::{Collider, ComponentKind, GameComponent, GameWorld, Transform};
use crate::config::GameConfig;
use crate::resources::{CollisionStats, Viewport};
use crate::tags::CullPolicy;
use resolve::Resolver;

pub struct CollisionSystem {
    config: GameConfig,
    rng: StdRng,
}

impl CollisionSystem {
    pub fn new(config: GameConfig) -> Self {
        let rng = StdRng::seed_from_u64(config.world.seed);
        Self { config, rng }
    }

    /// Clear the grid and insert every collidable entity, destroying
    /// transient ones outside the cull area.
    fn rebuild(
        &self,
        world: &mut GameWorld,
        grid: &mut SpatialGrid,
        entities: &[Entity],
        stats: &mut CollisionStats,
    ) {
        grid.clear();
        let viewport = world.resource::<Viewport>().copied().unwrap_or(Viewport::new(
            self.config.world.width,
            self.config.world.height,
        ));
        let cull_area = viewport.bounds().expanded(self.config.world.cull_margin);

        for &entity in entities {
            let (Some(transform), Some(collider)) =
                (world.get::<Transform>(entity), world.get::<Collider>(entity))
            else {
                continue;
            };
            let bounds = collider.bounds(transform.position);
            if collider.tags.cull_policy() == CullPolicy::Transient && !cull_area.overlaps(&bounds) {
                debug!("Culling {:?} at {:?}", entity, transform.position);
                world.destroy_entity(entity);
                stats.culled += 1;
                continue;
            }
            grid.insert(entity, bounds);
        }
        stats.indexed = grid.len();
    }
}

impl System<GameComponent> for CollisionSystem {
    fn name(&self) -> &'static str {
        "collision"
    }

    fn requires(&self) -> Vec<ComponentKind> {
        vec![ComponentKind::Transform, ComponentKind::Collider]
    }

    fn run(&mut self, world: &mut GameWorld, entities: &[Entity], _delta: f32) {
        let Some(mut grid) = world.remove_resource::<SpatialGrid>() else {
            warn!("No spatial grid resource, skipping collision pass");
            return;
        };
        let mut stats = CollisionStats::default();

        self.rebuild(world, &mut grid, entities, &mut stats);

        let candidates = grid.potential_collisions();
        stats.candidates = candidates.len();

        let Self { config, rng } = self;
        let mut resolver = Resolver {
            world,
            grid: &mut grid,
            rng,
            config,
        };

        for pair in candidates {
            let (a, b) = (pair.first(), pair.second());
            if !resolver.world.is_alive(a) || !resolver.world.is_alive(b) {
                continue;
            }
            let (Some(ca), Some(cb)) = (
                resolver.world.get::<Collider>(a),
                resolver.world.get::<Collider>(b),
            ) else {
                continue;
            };
            let Some(interaction) = Interaction::classify((a, ca), (b, cb)) else {
                continue;
            };
            stats.eligible += 1;

            let (Some(ba), Some(bb)) = (resolver.grid.bounds_of(a), resolver.grid.bounds_of(b))
            else {
                continue;
            };
            if !ba.overlaps(&bb) {
                continue;
            }
            stats.overlapping += 1;

            if resolver.resolve(interaction) {
                stats.resolved += 1;
            }
        }

        trace!(
            "Collision pass: {} indexed, {} culled, {} candidates, {} eligible, {} overlapping, {} resolved",
            stats.indexed,
            stats.culled,
            stats.candidates,
            stats.eligible,
            stats.overlapping,
            stats.resolved
        );
        world.insert_resource(stats);
        world.insert_resource(grid);
    }
}

//! Session driver
//!
//! Owns the world and the ordered system schedule. Collaborators feed it
//! input and elapsed time, then read back the render queue and sound cues.

use glam::Vec2;
use tracing::{debug, info};
use voidbreaker_core::GameTime;
use voidbreaker_ecs::{Entity, SystemSchedule};
use voidbreaker_physics::SpatialGrid;

use crate::collision::CollisionSystem;
use crate::components::{GameComponent, GameWorld};
use crate::config::GameConfig;
use crate::error::GameError;
use crate::resources::{
    CollisionStats, GameStatus, InputState, RenderItem, RenderQueue, Score, SoundEvent, SoundQueue,
    Viewport, WorldClock,
};
use crate::spawn::{spawn_block, spawn_ship, BlockPlacement};
use crate::systems::{
    BuffSystem, HealthSystem, InputSystem, MovementSystem, RenderQueueSystem, TimeDilationSystem,
    WeaponSystem,
};

pub struct Game {
    world: GameWorld,
    schedule: SystemSchedule<GameComponent>,
    time: GameTime,
    config: GameConfig,
}

impl Game {
    /// Validate the config and build a world with every resource and system
    /// in place.
    pub fn new(config: GameConfig) -> Result<Self, GameError> {
        config.validate()?;

        let mut world = GameWorld::new();
        world.insert_resource(SpatialGrid::new(config.world.grid())?);
        world.insert_resource(Viewport::new(config.world.width, config.world.height));
        world.insert_resource(InputState::default());
        world.insert_resource(WorldClock::default());
        world.insert_resource(SoundQueue::default());
        world.insert_resource(RenderQueue::default());
        world.insert_resource(Score::default());
        world.insert_resource(GameStatus::default());
        world.insert_resource(CollisionStats::default());

        let mut schedule = SystemSchedule::new();
        schedule.add_system(&mut world, InputSystem);
        schedule.add_system(&mut world, WeaponSystem::new(config.clone()));
        schedule.add_system(&mut world, TimeDilationSystem);
        schedule.add_system(&mut world, MovementSystem);
        schedule.add_system(&mut world, CollisionSystem::new(config.clone()));
        schedule.add_system(&mut world, BuffSystem);
        schedule.add_system(&mut world, HealthSystem);
        schedule.add_system(&mut world, RenderQueueSystem);

        info!(
            "Game ready: {}x{} world, systems [{}]",
            config.world.width,
            config.world.height,
            schedule.names().collect::<Vec<_>>().join(", ")
        );

        Ok(Self {
            world,
            schedule,
            time: GameTime::new(config.time.clone()),
            config,
        })
    }

    /// Spawn the player's ship centred near the bottom of the viewport.
    pub fn spawn_player(&mut self) -> Entity {
        let viewport = self.viewport();
        let size = self.config.ship.size;
        let position = Vec2::new(
            (viewport.width - size.x) * 0.5,
            viewport.height - size.y * 1.5,
        );
        spawn_ship(&mut self.world, &self.config, position)
    }

    pub fn place_blocks(&mut self, placements: impl IntoIterator<Item = BlockPlacement>) -> Vec<Entity> {
        let blocks: Vec<Entity> = placements
            .into_iter()
            .map(|placement| spawn_block(&mut self.world, &self.config, placement))
            .collect();
        debug!("Placed {} blocks", blocks.len());
        blocks
    }

    pub fn set_input(&mut self, input: InputState) {
        self.world.insert_resource(input);
    }

    pub fn set_viewport(&mut self, width: f32, height: f32) {
        self.world.insert_resource(Viewport::new(width, height));
    }

    pub fn viewport(&self) -> Viewport {
        self.world.resource::<Viewport>().copied().unwrap_or_default()
    }

    /// Advance one frame by the raw elapsed seconds.
    pub fn tick(&mut self, raw_delta: f32) {
        self.time.update(raw_delta);
        self.schedule.run_all(&mut self.world, self.time.delta_time);
    }

    pub fn pause(&mut self) {
        self.time.pause();
    }

    pub fn resume(&mut self) {
        self.time.resume();
    }

    pub fn drain_sounds(&mut self) -> Vec<SoundEvent> {
        self.world.resource_or_default::<SoundQueue>().drain()
    }

    pub fn render_queue(&self) -> &[RenderItem] {
        self.world
            .resource::<RenderQueue>()
            .map(|queue| queue.items.as_slice())
            .unwrap_or(&[])
    }

    /// Broad-phase index as of the end of the last tick
    pub fn spatial(&self) -> Option<&SpatialGrid> {
        self.world.resource::<SpatialGrid>()
    }

    pub fn score(&self) -> u32 {
        self.world.resource::<Score>().map_or(0, |score| score.0)
    }

    pub fn is_game_over(&self) -> bool {
        self.world.resource::<GameStatus>().is_some_and(|status| status.game_over)
    }

    pub fn collision_stats(&self) -> CollisionStats {
        self.world.resource::<CollisionStats>().copied().unwrap_or_default()
    }

    pub fn time(&self) -> &GameTime {
        &self.time
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn world(&self) -> &GameWorld {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut GameWorld {
        &mut self.world
    }
}

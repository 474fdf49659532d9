//! Voidbreaker Game - Gameplay on top of the ECS world and spatial grid
//!
//! Provides components, tuning, spawning, the collision pipeline, per-tick
//! systems and the [`Game`] driver that ties them together.

pub mod collision;
pub mod components;
pub mod config;
pub mod error;
pub mod game;
pub mod resources;
pub mod spawn;
pub mod systems;
pub mod tags;

pub use collision::{CollisionSystem, Interaction};
pub use components::{
    Block, Collider, ComponentKind, DamageBoost, GameComponent, GameWorld, Health, Movement,
    Pickup, PickupEffect, PlayerControl, Projectile, RapidFire, Shield, SpeedBoost, TimeScale,
    TimedBuff, Transform, Weapon,
};
pub use config::{BlockConfig, GameConfig, PickupConfig, ShipConfig, WeaponConfig, WorldConfig};
pub use error::{ConfigError, GameError};
pub use game::Game;
pub use resources::{
    CollisionStats, GameStatus, InputState, RenderItem, RenderQueue, Score, SoundCue, SoundEvent,
    SoundQueue, Sprite, Viewport, WorldClock,
};
pub use spawn::{spawn_block, spawn_bullet, spawn_pickup, spawn_ship, BlockPlacement};
pub use tags::{CollisionLayer, CullPolicy, Tag, TagSet};

//! Per-tick gameplay systems
//!
//! The [`Game`](crate::Game) driver runs these in a fixed order: input,
//! weapons, time dilation, movement, collision, buffs, health, render queue.

mod buffs;
mod health;
mod input;
mod movement;
mod render;
mod time_dilation;
mod weapon;

pub use buffs::BuffSystem;
pub use health::HealthSystem;
pub use input::InputSystem;
pub use movement::MovementSystem;
pub use render::RenderQueueSystem;
pub use time_dilation::TimeDilationSystem;
pub use weapon::WeaponSystem;

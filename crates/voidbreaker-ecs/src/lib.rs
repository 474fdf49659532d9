//! Voidbreaker ECS - Entity Component System
//!
//! A small ECS for a single-threaded arcade loop. Entities are monotonically
//! issued ids, components are a closed enum stored in per-kind sparse sets,
//! and each registered system keeps a persisted list of matching entities
//! that is re-swept only when the world changes structurally.

mod component;
mod entity;
mod registry;
mod resource;
mod system;
mod world;

pub use component::{Component, ComponentTable, SparseSet, Variant};
pub use entity::{Entity, EntityStore};
pub use registry::{SystemId, SystemRegistration, SystemRegistry};
pub use resource::Resources;
pub use system::{system_fn, FnSystem, System, SystemSchedule};
pub use world::World;

//! Voidbreaker Core - Core types and utilities
//!
//! This crate provides the foundational types used throughout the game:
//! - Mathematical primitives (re-exported from glam)
//! - Axis-aligned bounding boxes
//! - The variable-step frame clock

pub mod time;
pub mod types;

pub use glam::Vec2;
pub use time::{GameTime, TimeConfig};
pub use types::{Aabb, Color};

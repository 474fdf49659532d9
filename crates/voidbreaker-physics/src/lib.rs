//! Voidbreaker Physics - Broad-phase collision indexing
//!
//! Provides the uniform spatial grid used to narrow all entity pairs down to
//! a small candidate set each tick. The narrow phase is the inclusive
//! [`Aabb::overlaps`](voidbreaker_core::Aabb::overlaps) test.

mod error;
mod grid;

pub use error::GridError;
pub use grid::{CellKey, CollisionPair, GridConfig, SpatialGrid, DEFAULT_CELL_SIZE};

//! Uniform-grid broad phase
//!
//! The grid is rebuilt from scratch every tick: `clear`, then `insert` every
//! collidable box, then ask for candidate pairs. Nothing survives across
//! frames, so moved or destroyed entities can never leave stale occupancy.

use std::collections::{BTreeSet, HashMap};

use voidbreaker_core::{Aabb, Vec2};
use voidbreaker_ecs::Entity;

use crate::error::GridError;

/// Default edge length of one grid cell, in world units.
pub const DEFAULT_CELL_SIZE: f32 = 64.0;

/// Grid dimensions
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridConfig {
    pub world_width: f32,
    pub world_height: f32,
    pub cell_size: f32,
}

impl GridConfig {
    pub fn new(world_width: f32, world_height: f32) -> Self {
        Self {
            world_width,
            world_height,
            cell_size: DEFAULT_CELL_SIZE,
        }
    }

    pub fn with_cell_size(mut self, cell_size: f32) -> Self {
        self.cell_size = cell_size;
        self
    }

    /// Reject sizes that would make cell math meaningless.
    pub fn validate(&self) -> Result<(), GridError> {
        if !(self.cell_size.is_finite() && self.cell_size > 0.0) {
            return Err(GridError::InvalidCellSize(self.cell_size));
        }
        let dimension_ok = |d: f32| d.is_finite() && d > 0.0;
        if !dimension_ok(self.world_width) || !dimension_ok(self.world_height) {
            return Err(GridError::InvalidDimensions {
                width: self.world_width,
                height: self.world_height,
            });
        }
        Ok(())
    }
}

/// Column/row address of a grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CellKey {
    pub col: u32,
    pub row: u32,
}

/// An unordered entity pair stored lower id first, so `(a, b)` and `(b, a)`
/// are the same key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CollisionPair {
    first: Entity,
    second: Entity,
}

impl CollisionPair {
    pub fn new(a: Entity, b: Entity) -> Self {
        if a <= b {
            Self { first: a, second: b }
        } else {
            Self { first: b, second: a }
        }
    }

    /// The lower id.
    pub fn first(&self) -> Entity {
        self.first
    }

    /// The higher id.
    pub fn second(&self) -> Entity {
        self.second
    }

    pub fn contains(&self, entity: Entity) -> bool {
        self.first == entity || self.second == entity
    }
}

/// Uniform spatial hash over a fixed world rectangle.
///
/// Boxes that extend past the world edge are clamped into the border cells,
/// so off-world entities still participate (they just share edge buckets).
pub struct SpatialGrid {
    config: GridConfig,
    cols: u32,
    rows: u32,
    cells: HashMap<CellKey, Vec<Entity>>,
    /// Reverse index: every cell each entity occupies.
    entity_cells: HashMap<Entity, Vec<CellKey>>,
    bounds: HashMap<Entity, Aabb>,
}

impl SpatialGrid {
    pub fn new(config: GridConfig) -> Result<Self, GridError> {
        config.validate()?;
        let cols = ((config.world_width / config.cell_size).ceil() as u32).max(1);
        let rows = ((config.world_height / config.cell_size).ceil() as u32).max(1);
        tracing::debug!(
            "Spatial grid {}x{} cells of {} units",
            cols,
            rows,
            config.cell_size
        );
        Ok(Self {
            config,
            cols,
            rows,
            cells: HashMap::new(),
            entity_cells: HashMap::new(),
            bounds: HashMap::new(),
        })
    }

    /// Number of columns and rows.
    pub fn dimensions(&self) -> (u32, u32) {
        (self.cols, self.rows)
    }

    /// Drop every entity. Safe to call repeatedly.
    pub fn clear(&mut self) {
        self.cells.clear();
        self.entity_cells.clear();
        self.bounds.clear();
    }

    fn col_of(&self, x: f32) -> u32 {
        (x / self.config.cell_size)
            .floor()
            .clamp(0.0, (self.cols - 1) as f32) as u32
    }

    fn row_of(&self, y: f32) -> u32 {
        (y / self.config.cell_size)
            .floor()
            .clamp(0.0, (self.rows - 1) as f32) as u32
    }

    /// Every cell an AABB touches, inclusive on both ends.
    pub fn cells_for(&self, bounds: &Aabb) -> impl Iterator<Item = CellKey> {
        let (c0, c1) = (self.col_of(bounds.left), self.col_of(bounds.right));
        let (r0, r1) = (self.row_of(bounds.top), self.row_of(bounds.bottom));
        (r0..=r1).flat_map(move |row| (c0..=c1).map(move |col| CellKey { col, row }))
    }

    /// Index an entity under every cell its box spans. Re-inserting an
    /// entity replaces its previous placement.
    pub fn insert(&mut self, entity: Entity, bounds: Aabb) {
        self.remove(entity);
        let keys: Vec<CellKey> = self.cells_for(&bounds).collect();
        for key in &keys {
            self.cells.entry(*key).or_default().push(entity);
        }
        self.entity_cells.insert(entity, keys);
        self.bounds.insert(entity, bounds);
    }

    /// Remove an entity from every cell it occupies. Returns `false` if it
    /// was not indexed.
    pub fn remove(&mut self, entity: Entity) -> bool {
        let Some(keys) = self.entity_cells.remove(&entity) else {
            return false;
        };
        for key in keys {
            if let Some(bucket) = self.cells.get_mut(&key) {
                bucket.retain(|&e| e != entity);
                if bucket.is_empty() {
                    self.cells.remove(&key);
                }
            }
        }
        self.bounds.remove(&entity);
        true
    }

    /// Every unordered pair of entities sharing at least one cell.
    ///
    /// A pair that shares several cells is reported once. The result is
    /// sorted by pair key, so callers resolve in a stable order.
    pub fn potential_collisions(&self) -> Vec<CollisionPair> {
        let mut pairs = BTreeSet::new();
        for bucket in self.cells.values() {
            for (i, &a) in bucket.iter().enumerate() {
                for &b in &bucket[i + 1..] {
                    pairs.insert(CollisionPair::new(a, b));
                }
            }
        }
        pairs.into_iter().collect()
    }

    /// Entities whose box overlaps `area`, in ascending id order.
    pub fn query_area(&self, area: &Aabb) -> Vec<Entity> {
        let mut found = BTreeSet::new();
        for key in self.cells_for(area) {
            let Some(bucket) = self.cells.get(&key) else {
                continue;
            };
            for &entity in bucket {
                if self.bounds.get(&entity).is_some_and(|b| b.overlaps(area)) {
                    found.insert(entity);
                }
            }
        }
        found.into_iter().collect()
    }

    /// Entities whose box contains the point.
    pub fn query_point(&self, x: f32, y: f32) -> Vec<Entity> {
        let point = Vec2::new(x, y);
        let key = CellKey {
            col: self.col_of(x),
            row: self.row_of(y),
        };
        let mut found: Vec<Entity> = self
            .cells
            .get(&key)
            .into_iter()
            .flatten()
            .copied()
            .filter(|entity| {
                self.bounds
                    .get(entity)
                    .is_some_and(|b| b.contains_point(point))
            })
            .collect();
        found.sort_unstable();
        found
    }

    /// Entities whose box center lies within `radius` of `(cx, cy)`.
    pub fn query_radius(&self, cx: f32, cy: f32, radius: f32) -> Vec<Entity> {
        let center = Vec2::new(cx, cy);
        let area = Aabb::from_center_half_extents(center, Vec2::splat(radius));
        let radius_sq = radius * radius;
        self.query_area(&area)
            .into_iter()
            .filter(|entity| {
                self.bounds
                    .get(entity)
                    .is_some_and(|b| b.center().distance_squared(center) <= radius_sq)
            })
            .collect()
    }

    /// The box an entity was inserted with this tick.
    pub fn bounds_of(&self, entity: Entity) -> Option<Aabb> {
        self.bounds.get(&entity).copied()
    }

    /// Cells an entity currently occupies.
    pub fn cells_of(&self, entity: Entity) -> &[CellKey] {
        self.entity_cells.get(&entity).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Entities in one cell, in insertion order.
    pub fn cell(&self, key: CellKey) -> &[Entity] {
        self.cells.get(&key).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of non-empty cells.
    pub fn occupied_cells(&self) -> usize {
        self.cells.len()
    }

    /// Number of indexed entities.
    pub fn len(&self) -> usize {
        self.entity_cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entity_cells.is_empty()
    }
}

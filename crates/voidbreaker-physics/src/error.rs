/// Errors raised while building a spatial grid. Grids are validated once at
/// construction so the per-tick path never fails.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GridError {
    #[error("grid cell size must be a positive finite number, got {0}")]
    InvalidCellSize(f32),

    #[error("grid world dimensions must be positive and finite, got {width}x{height}")]
    InvalidDimensions { width: f32, height: f32 },
}

use std::path::PathBuf;

use thiserror::Error;
use voidbreaker_physics::GridError;

/// Rejected configuration, caught before the first tick
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid grid settings: {0}")]
    Grid(#[from] GridError),

    #[error("pickup drop chance must be within [0, 1], got {0}")]
    DropChance(f32),

    #[error("cull margin must not be negative, got {0}")]
    CullMargin(f32),

    #[error("max delta time must be positive, got {0}")]
    MaxDelta(f32),

    #[error("time scale must be finite and non-negative, got {0}")]
    TimeScale(f32),

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Error)]
pub enum GameError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Grid(#[from] GridError),
}

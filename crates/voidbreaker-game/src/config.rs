//! Game tuning with persistence
//!
//! Tuning is read from `~/.config/voidbreaker/config.toml`. Every section and
//! field is optional; anything missing keeps its default.

use std::fs;
use std::path::{Path, PathBuf};

use glam::Vec2;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use voidbreaker_core::TimeConfig;
use voidbreaker_physics::{GridConfig, DEFAULT_CELL_SIZE};

use crate::components::PickupEffect;
use crate::error::ConfigError;

/// All game tuning
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub world: WorldConfig,
    pub time: TimeConfig,
    pub ship: ShipConfig,
    pub weapon: WeaponConfig,
    pub blocks: BlockConfig,
    pub pickups: PickupConfig,
}

impl GameConfig {
    fn config_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("voidbreaker"))
    }

    fn config_path() -> Option<PathBuf> {
        Self::config_dir().map(|p| p.join("config.toml"))
    }

    /// Load tuning from disk, or return defaults if missing or unusable
    pub fn load() -> Self {
        let Some(path) = Self::config_path() else {
            warn!("Could not determine config directory");
            return Self::default();
        };

        if !path.exists() {
            info!("No config file found, using defaults");
            return Self::default();
        }

        match Self::load_from(&path) {
            Ok(config) => {
                info!("Loaded config from {:?}", path);
                config
            }
            Err(e) => {
                warn!("{}, using defaults", e);
                Self::default()
            }
        }
    }

    /// Read and validate a config file at an explicit path
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values that would break the first tick
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.world.grid().validate()?;
        if !(0.0..=1.0).contains(&self.pickups.drop_chance) {
            return Err(ConfigError::DropChance(self.pickups.drop_chance));
        }
        if !(self.world.cull_margin >= 0.0) {
            return Err(ConfigError::CullMargin(self.world.cull_margin));
        }
        if !(self.time.max_delta_time > 0.0) {
            return Err(ConfigError::MaxDelta(self.time.max_delta_time));
        }
        if !(self.time.time_scale.is_finite() && self.time.time_scale >= 0.0) {
            return Err(ConfigError::TimeScale(self.time.time_scale));
        }
        Ok(())
    }
}

/// Playfield and broad-phase settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    pub width: f32,
    pub height: f32,
    /// Edge length of a spatial grid cell
    pub cell_size: f32,
    /// How far outside the viewport transient entities may drift before culling
    pub cull_margin: f32,
    /// Seed for drop rolls
    pub seed: u64,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
            cell_size: DEFAULT_CELL_SIZE,
            cull_margin: 100.0,
            seed: 0x5EED,
        }
    }
}

impl WorldConfig {
    pub fn grid(&self) -> GridConfig {
        GridConfig::new(self.width, self.height).with_cell_size(self.cell_size)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ShipConfig {
    pub size: Vec2,
    pub max_speed: f32,
    pub acceleration: f32,
    pub drag: f32,
    pub health: f32,
}

impl Default for ShipConfig {
    fn default() -> Self {
        Self {
            size: Vec2::new(32.0, 32.0),
            max_speed: 320.0,
            acceleration: 1800.0,
            drag: 6.0,
            health: 100.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WeaponConfig {
    pub damage: f32,
    pub cooldown: f32,
    pub bullet_speed: f32,
    pub bullet_size: Vec2,
}

impl Default for WeaponConfig {
    fn default() -> Self {
        Self {
            damage: 25.0,
            cooldown: 0.2,
            bullet_speed: 600.0,
            bullet_size: Vec2::new(4.0, 12.0),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BlockConfig {
    pub size: Vec2,
    pub durability: f32,
    pub contact_damage: f32,
    pub points: u32,
}

impl Default for BlockConfig {
    fn default() -> Self {
        Self {
            size: Vec2::new(48.0, 24.0),
            durability: 20.0,
            contact_damage: 10.0,
            points: 100,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PickupConfig {
    /// Chance that a destroyed block drops a pickup
    pub drop_chance: f32,
    pub size: Vec2,
    /// Downward speed of a freshly dropped pickup
    pub fall_speed: f32,
    /// Effects a drop is chosen from, uniformly
    pub drop_table: Vec<PickupEffect>,
}

impl Default for PickupConfig {
    fn default() -> Self {
        Self {
            drop_chance: 0.25,
            size: Vec2::new(20.0, 20.0),
            fall_speed: 120.0,
            drop_table: vec![
                PickupEffect::Shield { capacity: 50.0, duration: 8.0 },
                PickupEffect::RapidFire { cooldown_divisor: 2.0, duration: 6.0 },
                PickupEffect::DamageBoost { multiplier: 2.0, duration: 6.0 },
                PickupEffect::SpeedBoost { multiplier: 1.5, duration: 6.0 },
                PickupEffect::SlowMotion { factor: 0.5, duration: 4.0 },
                PickupEffect::Repair { amount: 25.0 },
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use voidbreaker_physics::GridError;

    #[test]
    fn defaults_are_valid() {
        assert!(GameConfig::default().validate().is_ok());
    }

    #[test]
    fn rejects_bad_cell_size() {
        let mut config = GameConfig::default();
        config.world.cell_size = 0.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Grid(GridError::InvalidCellSize(_)))
        ));
    }

    #[test]
    fn rejects_drop_chance_out_of_range() {
        let mut config = GameConfig::default();
        config.pickups.drop_chance = 1.5;
        assert!(matches!(config.validate(), Err(ConfigError::DropChance(_))));
        config.pickups.drop_chance = -0.1;
        assert!(matches!(config.validate(), Err(ConfigError::DropChance(_))));
    }

    #[test]
    fn rejects_negative_cull_margin() {
        let mut config = GameConfig::default();
        config.world.cull_margin = -1.0;
        assert!(matches!(config.validate(), Err(ConfigError::CullMargin(_))));
    }

    #[test]
    fn rejects_bad_time_scale() {
        let config: GameConfig = toml::from_str("[time]\ntime_scale = -1.0").unwrap();
        assert!(matches!(config.validate(), Err(ConfigError::TimeScale(_))));

        let mut config = GameConfig::default();
        config.time.time_scale = f32::NAN;
        assert!(matches!(config.validate(), Err(ConfigError::TimeScale(_))));

        config.time.time_scale = 0.0;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let config: GameConfig = toml::from_str(
            r#"
            [world]
            width = 1024.0

            [pickups]
            drop_chance = 1.0

            [[pickups.drop_table]]
            kind = "repair"
            amount = 10.0
            "#,
        )
        .unwrap();
        assert_eq!(config.world.width, 1024.0);
        assert_eq!(config.world.height, 600.0);
        assert_eq!(config.pickups.drop_chance, 1.0);
        assert_eq!(config.pickups.drop_table, vec![PickupEffect::Repair { amount: 10.0 }]);
        assert_eq!(config.weapon.damage, 25.0);
    }

    #[test]
    fn load_from_reports_missing_file() {
        let path = std::env::temp_dir().join("voidbreaker-missing-config.toml");
        assert!(matches!(
            GameConfig::load_from(&path),
            Err(ConfigError::Io { .. })
        ));
    }

    #[test]
    fn round_trips_through_toml() {
        let text = toml::to_string(&GameConfig::default()).unwrap();
        let back: GameConfig = toml::from_str(&text).unwrap();
        assert_eq!(back.pickups.drop_table.len(), 6);
        assert_eq!(back.world.seed, 0x5EED);
    }
}

//! Game configuration
//!
//! Every tuning value of the match lives here. `Default` is the reference
//! configuration; JSON files may override any subset of fields.

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;
use crate::sim::Rect;

/// Errors raised while loading a configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config value `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Playfield dimensions and tick rate
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScreenConfig {
    pub width: f32,
    pub height: f32,
    pub ticks_per_second: u32,
}

impl Default for ScreenConfig {
    fn default() -> Self {
        Self {
            width: SCREEN_WIDTH,
            height: SCREEN_HEIGHT,
            ticks_per_second: TICKS_PER_SECOND,
        }
    }
}

impl ScreenConfig {
    /// Screen rectangle in world coordinates
    pub fn rect(&self) -> Rect {
        Rect::new(0.0, 0.0, self.width, self.height)
    }
}

/// Player ship tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FighterConfig {
    pub spawn: Vec2,
    pub speed: f32,
    pub fire_interval: u32,
    pub sprite_size: Vec2,
    pub hit_area: Rect,
}

impl Default for FighterConfig {
    fn default() -> Self {
        Self {
            spawn: Vec2::new(150.0, 300.0),
            speed: FIGHTER_SPEED,
            fire_interval: FIGHTER_FIRE_INTERVAL,
            sprite_size: Vec2::splat(FIGHTER_SPRITE_SIZE),
            hit_area: Rect::new(8.0, 8.0, 2.0, 2.0),
        }
    }
}

/// Projectile tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BulletConfig {
    pub player_speed: f32,
    pub player_hit_area: Rect,
    pub enemy_hit_area: Rect,
}

impl Default for BulletConfig {
    fn default() -> Self {
        Self {
            player_speed: PLAYER_BULLET_SPEED,
            player_hit_area: Rect::new(4.0, 0.0, 8.0, 16.0),
            enemy_hit_area: Rect::new(4.0, 4.0, 8.0, 8.0),
        }
    }
}

/// Enemy tuning (shared by every enemy of the battle)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemyConfig {
    pub max_hp: i32,
    pub fire_interval: i32,
    pub walk_speed: f32,
    pub sprite_size: Vec2,
    pub hit_area: Rect,
    /// Velocity of the fireworks bullet fired each interval
    pub shot_velocity: Vec2,
    pub explosion_time: u32,
    pub burst_count: i32,
    pub burst_speed: f32,
}

impl Default for EnemyConfig {
    fn default() -> Self {
        Self {
            max_hp: ENEMY_MAX_HP,
            fire_interval: ENEMY_FIRE_INTERVAL,
            walk_speed: ENEMY_WALK_SPEED,
            sprite_size: Vec2::splat(ENEMY_SPRITE_SIZE),
            hit_area: Rect::new(0.0, 0.0, ENEMY_SPRITE_SIZE, ENEMY_SPRITE_SIZE),
            shot_velocity: Vec2::new(0.0, 2.0),
            explosion_time: FIREWORKS_EXPLOSION_TIME,
            burst_count: BURST_COUNT,
            burst_speed: BURST_SPEED,
        }
    }
}

/// One enemy of the battle and the position of its HP gauge
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnemySpawn {
    pub pos: Vec2,
    pub gauge: Vec2,
}

/// HP gauge outline size
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GaugeConfig {
    pub width: f32,
    pub height: f32,
}

impl Default for GaugeConfig {
    fn default() -> Self {
        Self {
            width: GAUGE_WIDTH,
            height: GAUGE_HEIGHT,
        }
    }
}

/// Complete game configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Seed for every scene RNG
    pub seed: u64,
    pub screen: ScreenConfig,
    pub fighter: FighterConfig,
    pub bullets: BulletConfig,
    pub enemy: EnemyConfig,
    /// Enemies of the battle; the win condition is defeating all of them
    pub enemies: Vec<EnemySpawn>,
    pub gauge: GaugeConfig,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            seed: 0x5EED_DA4A_4B00,
            screen: ScreenConfig::default(),
            fighter: FighterConfig::default(),
            bullets: BulletConfig::default(),
            enemy: EnemyConfig::default(),
            enemies: vec![
                EnemySpawn {
                    pos: Vec2::new(150.0, 100.0),
                    gauge: Vec2::new(50.0, 20.0),
                },
                EnemySpawn {
                    pos: Vec2::new(550.0, 100.0),
                    gauge: Vec2::new(540.0, 20.0),
                },
            ],
            gauge: GaugeConfig::default(),
        }
    }
}

impl GameConfig {
    /// Parse and validate a JSON configuration
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON configuration file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json_str(&json)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Number of enemies that must be destroyed to clear the battle
    pub fn enemy_total(&self) -> u32 {
        self.enemies.len() as u32
    }

    /// Check values the simulation relies on
    pub fn validate(&self) -> Result<(), ConfigError> {
        fn invalid(field: &'static str, reason: impl Into<String>) -> ConfigError {
            ConfigError::Invalid {
                field,
                reason: reason.into(),
            }
        }

        if self.screen.width <= 0.0 || self.screen.height <= 0.0 {
            return Err(invalid("screen", "width and height must be positive"));
        }
        if self.screen.ticks_per_second == 0 {
            return Err(invalid("screen.ticks_per_second", "must be at least 1"));
        }
        if self.fighter.sprite_size.x <= 0.0 || self.fighter.sprite_size.y <= 0.0 {
            return Err(invalid("fighter.sprite_size", "must be positive"));
        }
        if self.fighter.sprite_size.x >= self.screen.width
            || self.fighter.sprite_size.y >= self.screen.height
        {
            return Err(invalid("fighter.sprite_size", "must be smaller than the screen"));
        }
        if self.enemy.max_hp < 1 {
            return Err(invalid("enemy.max_hp", format!("{} < 1", self.enemy.max_hp)));
        }
        if self.enemies.is_empty() {
            return Err(invalid("enemies", "battle needs at least one enemy"));
        }
        if self.gauge.width < 0.0 {
            return Err(invalid("gauge.width", "must not be negative"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_reference_battle() {
        let config = GameConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.enemy_total(), 2);
        assert_eq!(config.enemy.max_hp, 50);
        assert_eq!(config.screen.rect(), Rect::new(0.0, 0.0, 800.0, 600.0));
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = GameConfig::from_json_str(r#"{ "seed": 7, "enemy": { "max_hp": 3 } }"#)
            .expect("valid config");
        assert_eq!(config.seed, 7);
        assert_eq!(config.enemy.max_hp, 3);
        assert_eq!(config.enemy.fire_interval, ENEMY_FIRE_INTERVAL);
        assert_eq!(config.enemies.len(), 2);
    }

    #[test]
    fn test_json_roundtrip() {
        let config = GameConfig::default();
        let json = config.to_json().unwrap();
        let parsed = GameConfig::from_json_str(&json).unwrap();
        assert_eq!(parsed.enemies, config.enemies);
        assert_eq!(parsed.fighter.hit_area, config.fighter.hit_area);
    }

    #[test]
    fn test_rejects_zero_hp() {
        let err = GameConfig::from_json_str(r#"{ "enemy": { "max_hp": 0 } }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "enemy.max_hp", .. }));
    }

    #[test]
    fn test_rejects_empty_battle() {
        let err = GameConfig::from_json_str(r#"{ "enemies": [] }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "enemies", .. }));
    }

    #[test]
    fn test_rejects_malformed_json() {
        let err = GameConfig::from_json_str("{ seed: ").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_load_missing_file() {
        let err = GameConfig::load("/nonexistent/danmaku-config.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}

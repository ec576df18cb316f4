//! Danmaku STG - gameplay core of a top-down bullet hell shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, events, collisions, match flow)
//! - `settings`: Data-driven game configuration

pub mod settings;
pub mod sim;

pub use settings::{ConfigError, GameConfig};

use glam::Vec2;

/// Reference tuning values
pub mod consts {
    /// Window title
    pub const GAME_TITLE: &str = "進撃の矢部";
    /// Screen dimensions
    pub const SCREEN_WIDTH: f32 = 800.0;
    pub const SCREEN_HEIGHT: f32 = 600.0;
    /// Simulation ticks per second
    pub const TICKS_PER_SECOND: u32 = 60;

    /// Fighter defaults
    pub const FIGHTER_SPEED: f32 = 2.0;
    /// Fighter shoots once its counter exceeds this many ticks
    pub const FIGHTER_FIRE_INTERVAL: u32 = 1;
    pub const FIGHTER_SPRITE_SIZE: f32 = 16.0;

    /// Player bullet speed (pixels/tick, upward)
    pub const PLAYER_BULLET_SPEED: f32 = 6.0;

    /// Enemy defaults
    pub const ENEMY_MAX_HP: i32 = 50;
    pub const ENEMY_FIRE_INTERVAL: i32 = 50;
    pub const ENEMY_SPRITE_SIZE: f32 = 32.0;
    /// Step length of the per-tick random walk
    pub const ENEMY_WALK_SPEED: f32 = 50.0;
    /// Ticks before a fireworks bullet bursts
    pub const FIREWORKS_EXPLOSION_TIME: u32 = 50;

    /// Burst pattern emitted by an exploding fireworks bullet
    pub const BURST_COUNT: i32 = 10;
    pub const BURST_SPEED: f32 = 2.0;

    /// HP gauge outline size
    pub const GAUGE_WIDTH: f32 = 200.0;
    pub const GAUGE_HEIGHT: f32 = 10.0;
}

/// Convert degrees to radians (degree * π / 180)
#[inline]
pub fn deg_to_rad(degree: f32) -> f32 {
    degree / 180.0 * std::f32::consts::PI
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f32, theta: f32) -> Vec2 {
    Vec2::new(r * theta.cos(), r * theta.sin())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deg_to_rad() {
        assert!((deg_to_rad(180.0) - std::f32::consts::PI).abs() < 1e-6);
        assert_eq!(deg_to_rad(0.0), 0.0);
    }

    #[test]
    fn test_polar_to_cartesian() {
        let v = polar_to_cartesian(2.0, std::f32::consts::FRAC_PI_2);
        assert!(v.x.abs() < 1e-6);
        assert!((v.y - 2.0).abs() < 1e-6);
    }
}

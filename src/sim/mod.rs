//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One discrete tick at a time, timers are tick counters
//! - Seeded RNG only
//! - Stable iteration order (by entity ID = creation order)
//! - No rendering or platform dependencies

pub mod actors;
pub mod combat;
pub mod entity;
pub mod event;
pub mod game;
pub mod geometry;
pub mod input;
pub mod pattern;
pub mod scene;

pub use actors::{
    Enemy, EnemyBullet, Fighter, FireworksBullet, HpGauge, PlayerBullet, TextLabel, hp_fraction,
};
pub use combat::{HitRule, hit_rules, resolve_collisions};
pub use entity::{
    Behavior, Body, Entity, EntityId, EntityKind, Spatial, Tags, TickContext, Visual,
    advance_projectile,
};
pub use event::{EventBus, EventKind, GameEvent, MatchSignal, Reaction, Subscription};
pub use game::{Game, GamePhase, MatchTracker};
pub use geometry::Rect;
pub use input::{InputSnapshot, InputTracker, Keys};
pub use pattern::{aimed_velocity, circular_burst};
pub use scene::{DrawCommand, Scene};

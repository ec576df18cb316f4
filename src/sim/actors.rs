//! Entity variants and their per-tick behavior

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use super::entity::{
    Behavior, Body, Entity, EntityId, Spatial, Tags, TickContext, Visual, advance_projectile,
};
use super::geometry::Rect;
use super::input::Keys;
use super::pattern::circular_burst;
use crate::settings::{GameConfig, GaugeConfig};

/// Sprite sheet holding the fighter and bullets
pub const SHEET_SPRITE: &str = "sprite";
/// Sprite sheet holding the enemy
pub const SHEET_ENEMY: &str = "enemySprite";

/// The player's ship
#[derive(Debug, Clone)]
pub struct Fighter {
    speed: f32,
    fire_interval: u32,
    /// Ticks since the last shot
    fire_counter: u32,
    sprite_size: Vec2,
}

impl Fighter {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            speed: config.fighter.speed,
            fire_interval: config.fighter.fire_interval,
            fire_counter: 0,
            sprite_size: config.fighter.sprite_size,
        }
    }

    pub fn entity(pos: Vec2, config: &GameConfig) -> Entity {
        Entity::new(
            pos,
            config.fighter.hit_area,
            Tags::empty(),
            Body::Fighter(Self::new(config)),
        )
    }

    /// Velocity for this tick's held keys
    ///
    /// Later keys win on the same axis. Diagonals are not normalized.
    fn velocity(&self, keys: Keys) -> Vec2 {
        let mut vel = Vec2::ZERO;
        if keys.contains(Keys::UP) {
            vel.y = -self.speed;
        }
        if keys.contains(Keys::DOWN) {
            vel.y = self.speed;
        }
        if keys.contains(Keys::RIGHT) {
            vel.x = self.speed;
        }
        if keys.contains(Keys::LEFT) {
            vel.x = -self.speed;
        }
        vel
    }

    /// Area the hit rectangle must stay in touch with
    fn movement_bound(&self, screen: Rect) -> Rect {
        Rect::new(
            screen.x,
            screen.y,
            screen.width - self.sprite_size.x,
            screen.height - self.sprite_size.y,
        )
    }
}

impl Behavior for Fighter {
    fn update(&mut self, spatial: &mut Spatial, ctx: &mut TickContext<'_>) {
        let vel = self.velocity(ctx.input.held);
        spatial.pos += vel;

        // Undo the whole step rather than clipping to the edge
        if spatial.is_out_of_bounds(&self.movement_bound(ctx.screen())) {
            spatial.pos -= vel;
        }

        self.fire_counter += 1;
        let fire_ready = self.fire_counter > self.fire_interval;
        if fire_ready && ctx.input.is_held(Keys::FIRE) {
            let bullet = PlayerBullet::entity(spatial.pos, ctx.config);
            ctx.spawn(bullet);
            self.fire_counter = 0;
        }
    }

    fn visual(&self) -> Visual {
        Visual::Sprite {
            sheet: SHEET_SPRITE,
            frame: Rect::new(0.0, 0.0, 16.0, 16.0),
        }
    }
}

/// Straight shot fired by the player
#[derive(Debug, Clone)]
pub struct PlayerBullet {
    speed: f32,
}

impl PlayerBullet {
    pub fn entity(pos: Vec2, config: &GameConfig) -> Entity {
        Entity::new(
            pos,
            config.bullets.player_hit_area,
            Tags::PLAYER_BULLET,
            Body::PlayerBullet(Self {
                speed: config.bullets.player_speed,
            }),
        )
    }
}

impl Behavior for PlayerBullet {
    fn update(&mut self, spatial: &mut Spatial, ctx: &mut TickContext<'_>) {
        advance_projectile(spatial, Vec2::new(0.0, -self.speed), false, ctx);
    }

    fn visual(&self) -> Visual {
        Visual::Sprite {
            sheet: SHEET_SPRITE,
            frame: Rect::new(0.0, 16.0, 16.0, 16.0),
        }
    }
}

/// Enemy projectile with a constant velocity
#[derive(Debug, Clone)]
pub struct EnemyBullet {
    pub velocity: Vec2,
    /// Frozen bullets hold their position
    pub frozen: bool,
}

impl EnemyBullet {
    pub fn new(velocity: Vec2, frozen: bool) -> Self {
        Self { velocity, frozen }
    }

    pub fn entity(pos: Vec2, velocity: Vec2, frozen: bool, config: &GameConfig) -> Entity {
        Entity::new(
            pos,
            config.bullets.enemy_hit_area,
            Tags::ENEMY_BULLET,
            Body::EnemyBullet(Self::new(velocity, frozen)),
        )
    }
}

fn enemy_bullet_visual() -> Visual {
    Visual::Sprite {
        sheet: SHEET_SPRITE,
        frame: Rect::new(16.0, 16.0, 16.0, 16.0),
    }
}

impl Behavior for EnemyBullet {
    fn update(&mut self, spatial: &mut Spatial, ctx: &mut TickContext<'_>) {
        advance_projectile(spatial, self.velocity, self.frozen, ctx);
    }

    fn visual(&self) -> Visual {
        enemy_bullet_visual()
    }
}

/// Enemy bullet that bursts into a ring of bullets after a delay
#[derive(Debug, Clone)]
pub struct FireworksBullet {
    pub velocity: Vec2,
    pub elapsed_ticks: u32,
    pub explosion_time: u32,
    burst_count: i32,
    burst_speed: f32,
}

impl FireworksBullet {
    pub fn new(velocity: Vec2, explosion_time: u32, burst_count: i32, burst_speed: f32) -> Self {
        Self {
            velocity,
            elapsed_ticks: 0,
            explosion_time,
            burst_count,
            burst_speed,
        }
    }

    pub fn entity(pos: Vec2, velocity: Vec2, explosion_time: u32, config: &GameConfig) -> Entity {
        let bullet = Self::new(
            velocity,
            explosion_time,
            config.enemy.burst_count,
            config.enemy.burst_speed,
        );
        Entity::new(
            pos,
            config.bullets.enemy_hit_area,
            Tags::ENEMY_BULLET,
            Body::FireworksBullet(bullet),
        )
    }
}

impl Behavior for FireworksBullet {
    fn update(&mut self, spatial: &mut Spatial, ctx: &mut TickContext<'_>) {
        advance_projectile(spatial, self.velocity, false, ctx);

        self.elapsed_ticks += 1;

        // Bursts even when the move above took it off screen
        if self.elapsed_ticks > self.explosion_time {
            let burst = circular_burst(self.burst_count, self.burst_speed);
            log::debug!(
                "Fireworks burst at ({:.1}, {:.1}): {} bullets",
                spatial.pos.x,
                spatial.pos.y,
                burst.len()
            );
            for velocity in burst {
                let bullet = EnemyBullet::entity(spatial.pos, velocity, false, ctx.config);
                ctx.spawn(bullet);
            }
            ctx.destroy_self();
        }
    }

    fn visual(&self) -> Visual {
        enemy_bullet_visual()
    }
}

/// Enemy with hit points and a random walk
#[derive(Debug, Clone)]
pub struct Enemy {
    pub max_hp: i32,
    pub current_hp: i32,
    pub velocity: Vec2,
    pub fire_cooldown: i32,
    pub fire_interval: i32,
    walk_speed: f32,
    sprite_size: Vec2,
}

impl Enemy {
    pub fn new(config: &GameConfig, rng: &mut Pcg32) -> Self {
        let max_hp = config.enemy.max_hp.max(1);
        Self {
            max_hp,
            current_hp: max_hp,
            velocity: Vec2::new(rng.random_range(-2.0..2.0), rng.random_range(-2.0..2.0)),
            fire_cooldown: 0,
            fire_interval: config.enemy.fire_interval,
            walk_speed: config.enemy.walk_speed,
            sprite_size: config.enemy.sprite_size,
        }
    }

    pub fn entity(pos: Vec2, config: &GameConfig, rng: &mut Pcg32) -> Entity {
        Entity::new(
            pos,
            config.enemy.hit_area,
            Tags::ENEMY,
            Body::Enemy(Self::new(config, rng)),
        )
    }

    /// Lose `amount` hit points, never dropping below zero
    ///
    /// Returns true if the hit points actually decreased.
    pub fn take_damage(&mut self, amount: i32) -> bool {
        let before = self.current_hp;
        self.current_hp = (self.current_hp - amount).max(0);
        self.current_hp < before
    }

    pub fn is_defeated(&self) -> bool {
        self.current_hp <= 0
    }

    /// One random-walk step heading `angle` radians
    ///
    /// The step is taken, the velocity is flipped on any axis now outside the
    /// screen, then the (possibly flipped) velocity is applied once more. A
    /// flipped axis therefore lands back where it started this tick, and the
    /// flip itself never outlives the tick because the next step overwrites
    /// the velocity.
    pub fn walk(&mut self, spatial: &mut Spatial, angle: f32, screen: Rect) {
        self.velocity = Vec2::new(angle.cos(), angle.sin()) * self.walk_speed;
        spatial.pos += self.velocity;

        let max = Vec2::new(
            screen.width - self.sprite_size.x,
            screen.height - self.sprite_size.y,
        );
        if spatial.pos.x < 0.0 || spatial.pos.x > max.x {
            self.velocity.x = -self.velocity.x;
        }
        if spatial.pos.y < 0.0 || spatial.pos.y > max.y {
            self.velocity.y = -self.velocity.y;
        }

        spatial.pos += self.velocity;
    }
}

impl Behavior for Enemy {
    fn update(&mut self, spatial: &mut Spatial, ctx: &mut TickContext<'_>) {
        self.fire_cooldown -= 1;
        if self.fire_cooldown <= 0 {
            let enemy = &ctx.config.enemy;
            let shot = FireworksBullet::entity(
                spatial.pos,
                enemy.shot_velocity,
                enemy.explosion_time,
                ctx.config,
            );
            ctx.spawn(shot);
            self.fire_cooldown = self.fire_interval;
        }

        if self.is_defeated() {
            ctx.destroy_self();
            return;
        }

        let angle = ctx.rng.random_range(0.0..std::f32::consts::TAU);
        let screen = ctx.screen();
        self.walk(spatial, angle, screen);
    }

    fn visual(&self) -> Visual {
        Visual::Sprite {
            sheet: SHEET_ENEMY,
            frame: Rect::new(0.0, 0.0, 32.0, 32.0),
        }
    }
}

/// HP bar bound to one enemy; display only
#[derive(Debug, Clone)]
pub struct HpGauge {
    /// Enemy whose `changehp` events drive this gauge
    pub enemy: EntityId,
    pub width: f32,
    pub height: f32,
    /// Filled width after the last `changehp`
    pub inner_width: f32,
}

impl HpGauge {
    pub fn new(enemy: EntityId, config: &GaugeConfig) -> Self {
        Self {
            enemy,
            width: config.width,
            height: config.height,
            inner_width: config.width,
        }
    }

    pub fn entity(pos: Vec2, enemy: EntityId, config: &GaugeConfig) -> Entity {
        Entity::new(pos, Rect::ZERO, Tags::empty(), Body::HpGauge(Self::new(enemy, config)))
    }

    /// Recompute the filled width from a `changehp` payload
    pub fn on_hp_changed(&mut self, current_hp: i32, max_hp: i32) {
        self.inner_width = self.width * hp_fraction(current_hp, max_hp);
    }
}

/// `current / max` clamped to [0, 1]; zero when `max` is not positive
pub fn hp_fraction(current_hp: i32, max_hp: i32) -> f32 {
    if max_hp <= 0 {
        return 0.0;
    }
    (current_hp as f32 / max_hp as f32).clamp(0.0, 1.0)
}

impl Behavior for HpGauge {
    fn update(&mut self, _spatial: &mut Spatial, _ctx: &mut TickContext<'_>) {}

    fn visual(&self) -> Visual {
        Visual::Gauge {
            width: self.width,
            height: self.height,
            fill: self.inner_width,
        }
    }
}

/// Static text
#[derive(Debug, Clone)]
pub struct TextLabel {
    pub text: String,
}

impl TextLabel {
    pub fn entity(pos: Vec2, text: impl Into<String>) -> Entity {
        Entity::new(
            pos,
            Rect::ZERO,
            Tags::empty(),
            Body::Label(Self { text: text.into() }),
        )
    }
}

impl Behavior for TextLabel {
    fn update(&mut self, _spatial: &mut Spatial, _ctx: &mut TickContext<'_>) {}

    fn visual(&self) -> Visual {
        Visual::Text {
            text: self.text.clone(),
        }
    }
}

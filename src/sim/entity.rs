//! Entity model
//!
//! An [`Entity`] is the part every simulated object shares (id, position,
//! hit area, tags, alive flag, event bus). The variant-specific state lives
//! in [`Body`], and each variant implements [`Behavior`].

use bitflags::bitflags;
use glam::Vec2;
use rand_pcg::Pcg32;

use super::actors::{
    Enemy, EnemyBullet, Fighter, FireworksBullet, HpGauge, PlayerBullet, TextLabel,
};
use super::combat::hit_rules;
use super::event::{EventBus, Subscription};
use super::geometry::Rect;
use super::input::InputSnapshot;
use crate::settings::GameConfig;

/// Scene-unique entity identifier, increasing in creation order
pub type EntityId = u32;

bitflags! {
    /// Collision filter tags
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Tags: u8 {
        const ENEMY = 1 << 0;
        const PLAYER_BULLET = 1 << 1;
        const ENEMY_BULLET = 1 << 2;
    }
}

impl Tags {
    /// Look up a tag by its game name
    pub fn from_tag_name(name: &str) -> Option<Tags> {
        match name {
            "enemy" => Some(Tags::ENEMY),
            "playerBullet" => Some(Tags::PLAYER_BULLET),
            "enemyBullet" => Some(Tags::ENEMY_BULLET),
            _ => None,
        }
    }

    /// Game names of every tag in the set
    pub fn tag_names(&self) -> Vec<&'static str> {
        [
            (Tags::ENEMY, "enemy"),
            (Tags::PLAYER_BULLET, "playerBullet"),
            (Tags::ENEMY_BULLET, "enemyBullet"),
        ]
        .into_iter()
        .filter(|(tag, _)| self.contains(*tag))
        .map(|(_, name)| name)
        .collect()
    }
}

/// Entity variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Fighter,
    PlayerBullet,
    EnemyBullet,
    FireworksBullet,
    Enemy,
    HpGauge,
    Label,
}

/// Position plus hit area relative to it
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spatial {
    pub pos: Vec2,
    pub hit_area: Rect,
}

impl Spatial {
    /// Hit area in world coordinates
    #[inline]
    pub fn hit_rect(&self) -> Rect {
        self.hit_area.translated(self.pos)
    }

    /// True if the hit area lies entirely outside `bound`
    #[inline]
    pub fn is_out_of_bounds(&self, bound: &Rect) -> bool {
        self.hit_rect().is_outside(bound)
    }
}

/// How an entity wants to be drawn; positions are added by the scene
#[derive(Debug, Clone, PartialEq)]
pub enum Visual {
    /// Frame of a named sprite sheet
    Sprite { sheet: &'static str, frame: Rect },
    Text { text: String },
    /// Outline of `width` x `height` filled up to `fill`
    Gauge { width: f32, height: f32, fill: f32 },
}

/// Everything an entity may read or request during its update
pub struct TickContext<'a> {
    pub input: &'a InputSnapshot,
    pub config: &'a GameConfig,
    pub rng: &'a mut Pcg32,
    spawns: &'a mut Vec<Entity>,
    destroy_requested: bool,
}

impl<'a> TickContext<'a> {
    pub fn new(
        input: &'a InputSnapshot,
        config: &'a GameConfig,
        rng: &'a mut Pcg32,
        spawns: &'a mut Vec<Entity>,
    ) -> Self {
        Self {
            input,
            config,
            rng,
            spawns,
            destroy_requested: false,
        }
    }

    /// Screen rectangle in world coordinates
    pub fn screen(&self) -> Rect {
        self.config.screen.rect()
    }

    /// Queue an entity; it joins the scene at the end of the tick
    pub fn spawn(&mut self, entity: Entity) {
        self.spawns.push(entity);
    }

    /// Ask the scene to destroy the updating entity
    pub fn destroy_self(&mut self) {
        self.destroy_requested = true;
    }

    pub fn destroy_requested(&self) -> bool {
        self.destroy_requested
    }
}

/// Capability every entity variant implements
pub trait Behavior {
    /// Advance one tick
    fn update(&mut self, spatial: &mut Spatial, ctx: &mut TickContext<'_>);

    fn visual(&self) -> Visual;
}

/// Shared projectile motion: move unless frozen, die once off screen
pub fn advance_projectile(
    spatial: &mut Spatial,
    velocity: Vec2,
    frozen: bool,
    ctx: &mut TickContext<'_>,
) {
    if !frozen {
        spatial.pos += velocity;
    }
    if spatial.is_out_of_bounds(&ctx.screen()) {
        ctx.destroy_self();
    }
}

/// Variant-specific state
#[derive(Debug, Clone)]
pub enum Body {
    Fighter(Fighter),
    PlayerBullet(PlayerBullet),
    EnemyBullet(EnemyBullet),
    FireworksBullet(FireworksBullet),
    Enemy(Enemy),
    HpGauge(HpGauge),
    Label(TextLabel),
}

impl Body {
    pub fn kind(&self) -> EntityKind {
        match self {
            Body::Fighter(_) => EntityKind::Fighter,
            Body::PlayerBullet(_) => EntityKind::PlayerBullet,
            Body::EnemyBullet(_) => EntityKind::EnemyBullet,
            Body::FireworksBullet(_) => EntityKind::FireworksBullet,
            Body::Enemy(_) => EntityKind::Enemy,
            Body::HpGauge(_) => EntityKind::HpGauge,
            Body::Label(_) => EntityKind::Label,
        }
    }

    fn behavior(&self) -> &dyn Behavior {
        match self {
            Body::Fighter(b) => b,
            Body::PlayerBullet(b) => b,
            Body::EnemyBullet(b) => b,
            Body::FireworksBullet(b) => b,
            Body::Enemy(b) => b,
            Body::HpGauge(b) => b,
            Body::Label(b) => b,
        }
    }

    fn behavior_mut(&mut self) -> &mut dyn Behavior {
        match self {
            Body::Fighter(b) => b,
            Body::PlayerBullet(b) => b,
            Body::EnemyBullet(b) => b,
            Body::FireworksBullet(b) => b,
            Body::Enemy(b) => b,
            Body::HpGauge(b) => b,
            Body::Label(b) => b,
        }
    }
}

/// A simulated object owned by a scene
#[derive(Debug, Clone)]
pub struct Entity {
    pub(crate) id: EntityId,
    pub spatial: Spatial,
    tags: Tags,
    alive: bool,
    pub(crate) bus: EventBus,
    pub body: Body,
}

impl Entity {
    /// Build an entity and install the hit rules of its kind
    ///
    /// The id is assigned when the entity joins a scene.
    pub fn new(pos: Vec2, hit_area: Rect, tags: Tags, body: Body) -> Self {
        let mut bus = EventBus::new();
        for rule in hit_rules(body.kind()) {
            bus.subscribe(Subscription::on_hit_by(rule.partner, rule.reaction));
        }
        Self {
            id: 0,
            spatial: Spatial { pos, hit_area },
            tags,
            alive: true,
            bus,
            body,
        }
    }

    pub fn id(&self) -> EntityId {
        self.id
    }

    pub fn kind(&self) -> EntityKind {
        self.body.kind()
    }

    pub fn pos(&self) -> Vec2 {
        self.spatial.pos
    }

    pub fn hit_rect(&self) -> Rect {
        self.spatial.hit_rect()
    }

    pub fn tags(&self) -> Tags {
        self.tags
    }

    /// Tag check by game name ("enemy", "playerBullet", "enemyBullet")
    pub fn has_tag(&self, name: &str) -> bool {
        Tags::from_tag_name(name).is_some_and(|tag| self.tags.contains(tag))
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    /// Clear the alive flag; returns false if it was already cleared
    pub(crate) fn mark_destroyed(&mut self) -> bool {
        std::mem::replace(&mut self.alive, false)
    }

    pub fn subscriptions(&self) -> &[Subscription] {
        self.bus.subscriptions()
    }

    pub fn update(&mut self, ctx: &mut TickContext<'_>) {
        self.body.behavior_mut().update(&mut self.spatial, ctx);
    }

    pub fn visual(&self) -> Visual {
        self.body.behavior().visual()
    }

    pub fn as_enemy(&self) -> Option<&Enemy> {
        match &self.body {
            Body::Enemy(enemy) => Some(enemy),
            _ => None,
        }
    }

    pub fn as_gauge(&self) -> Option<&HpGauge> {
        match &self.body {
            Body::HpGauge(gauge) => Some(gauge),
            _ => None,
        }
    }
}

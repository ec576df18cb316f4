//! Scenes: the entity collection of one match phase
//!
//! A scene exclusively owns its entities. Entities never touch the collection
//! themselves; they request spawns and self-destruction through the
//! [`TickContext`] and the scene applies them.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::actors::{Enemy, Fighter, HpGauge, TextLabel};
use super::combat::resolve_collisions;
use super::entity::{Body, Entity, EntityId, EntityKind, TickContext, Visual};
use super::event::{EventKind, GameEvent, MatchSignal, Reaction, Subscription};
use super::game::{GamePhase, MatchTracker};
use super::input::InputSnapshot;
use crate::consts::GAME_TITLE;
use crate::settings::GameConfig;

/// Background colour of every scene
pub const BACKGROUND: &str = "black";

/// A positioned draw request
#[derive(Debug, Clone, PartialEq)]
pub struct DrawCommand {
    pub entity: EntityId,
    pub pos: Vec2,
    pub visual: Visual,
}

/// Live entities of one phase plus its match bookkeeping
#[derive(Debug, Clone)]
pub struct Scene {
    phase: GamePhase,
    /// Live entities, sorted by id (= creation order)
    pub(crate) entities: Vec<Entity>,
    next_id: EntityId,
    rng: Pcg32,
    tracker: MatchTracker,
    time_ticks: u64,
}

impl Scene {
    /// Empty scene for `phase`, RNG seeded from `seed`
    pub fn new(phase: GamePhase, seed: u64, enemy_total: u32) -> Self {
        Self {
            phase,
            entities: Vec::new(),
            next_id: 1,
            rng: Pcg32::seed_from_u64(seed),
            tracker: MatchTracker::new(enemy_total),
            time_ticks: 0,
        }
    }

    /// Build the initial entity set of `phase`
    pub fn for_phase(phase: GamePhase, config: &GameConfig) -> Self {
        match phase {
            GamePhase::Title => Self::title(config),
            GamePhase::Battle => Self::battle(config),
            GamePhase::Clear => Self::clear(config),
            GamePhase::GameOver => Self::game_over(config),
        }
    }

    pub fn title(config: &GameConfig) -> Self {
        let mut scene = Self::new(GamePhase::Title, config.seed, 0);
        scene.add(TextLabel::entity(Vec2::new(320.0, 200.0), GAME_TITLE));
        scene
    }

    /// Fighter, enemies and their gauges, wired to the match tracker
    pub fn battle(config: &GameConfig) -> Self {
        let mut scene = Self::new(GamePhase::Battle, config.seed, config.enemy_total());

        let fighter = scene.add(Fighter::entity(config.fighter.spawn, config));
        scene.subscribe(
            fighter,
            Subscription::on(EventKind::Destroy, Reaction::Signal(MatchSignal::PlayerDown)),
        );

        let mut enemies = Vec::with_capacity(config.enemies.len());
        for spawn in &config.enemies {
            let enemy = Enemy::entity(spawn.pos, config, &mut scene.rng);
            enemies.push(scene.add(enemy));
        }

        for (spawn, &enemy) in config.enemies.iter().zip(&enemies) {
            let gauge = scene.add(HpGauge::entity(spawn.gauge, enemy, &config.gauge));
            scene.subscribe(
                enemy,
                Subscription::on(EventKind::ChangeHp, Reaction::ResizeGauge(gauge)),
            );
            scene.subscribe(
                enemy,
                Subscription::on(
                    EventKind::Destroy,
                    Reaction::Signal(MatchSignal::EnemyDefeated),
                ),
            );
        }

        log::info!(
            "Battle scene ready: fighter + {} enemies (seed {})",
            enemies.len(),
            config.seed
        );
        scene
    }

    pub fn clear(config: &GameConfig) -> Self {
        let mut scene = Self::new(GamePhase::Clear, config.seed, 0);
        scene.add(TextLabel::entity(Vec2::new(310.0, 200.0), "ゲームクリア！"));
        scene
    }

    pub fn game_over(config: &GameConfig) -> Self {
        let mut scene = Self::new(GamePhase::GameOver, config.seed, 0);
        scene.add(TextLabel::entity(Vec2::new(300.0, 200.0), "ゲームオーバー…"));
        scene
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn name(&self) -> &'static str {
        self.phase.scene_name()
    }

    pub fn background(&self) -> &'static str {
        BACKGROUND
    }

    /// Ticks this scene has run
    pub fn time_ticks(&self) -> u64 {
        self.time_ticks
    }

    pub fn tracker(&self) -> &MatchTracker {
        &self.tracker
    }

    /// Add an entity right away and return its id
    pub fn add(&mut self, mut entity: Entity) -> EntityId {
        entity.id = self.next_id;
        self.next_id += 1;
        log::debug!("Spawn {:?} #{}", entity.kind(), entity.id);
        let id = entity.id;
        self.entities.push(entity);
        id
    }

    fn index_of(&self, id: EntityId) -> Option<usize> {
        self.entities.binary_search_by_key(&id, |e| e.id).ok()
    }

    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.index_of(id).map(|i| &self.entities[i])
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.index_of(id).map(move |i| &mut self.entities[i])
    }

    /// Live entities in creation order
    pub fn entities(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter().filter(|e| e.is_alive())
    }

    pub fn live_count(&self) -> usize {
        self.entities().count()
    }

    /// Live entities of one kind, in creation order
    pub fn entities_of(&self, kind: EntityKind) -> impl Iterator<Item = &Entity> {
        self.entities().filter(move |e| e.kind() == kind)
    }

    pub fn count_of(&self, kind: EntityKind) -> usize {
        self.entities_of(kind).count()
    }

    /// Append a subscription to an entity's event bus
    pub fn subscribe(&mut self, id: EntityId, subscription: Subscription) {
        match self.get_mut(id) {
            Some(entity) => entity.bus.subscribe(subscription),
            None => log::warn!("Subscribe to unknown entity #{}", id),
        }
    }

    /// Emit `event` on entity `id` and run its reactions to completion
    ///
    /// Destroyed entities only deliver their own `destroy` event.
    pub fn emit(&mut self, id: EntityId, event: GameEvent) {
        let Some(entity) = self.get(id) else {
            return;
        };
        if !entity.is_alive() && event.kind() != EventKind::Destroy {
            return;
        }
        for reaction in entity.bus.reactions_for(&event) {
            self.apply(id, reaction, &event);
        }
    }

    fn apply(&mut self, owner: EntityId, reaction: Reaction, event: &GameEvent) {
        match reaction {
            Reaction::DestroySelf => {
                if let GameEvent::Hit { partner, .. } = *event {
                    log::debug!("#{} destroyed by hit from #{}", owner, partner);
                }
                self.destroy(owner);
            }
            Reaction::TakeDamage(amount) => {
                let changed = match self.get_mut(owner).map(|e| &mut e.body) {
                    Some(Body::Enemy(enemy)) => enemy
                        .take_damage(amount)
                        .then_some((enemy.current_hp, enemy.max_hp)),
                    _ => None,
                };
                if let Some((current_hp, max_hp)) = changed {
                    self.emit(owner, GameEvent::ChangeHp { current_hp, max_hp });
                }
            }
            Reaction::ResizeGauge(gauge) => {
                if let GameEvent::ChangeHp { current_hp, max_hp } = *event
                    && let Some(entity) = self.get_mut(gauge)
                    && entity.is_alive()
                    && let Body::HpGauge(bar) = &mut entity.body
                {
                    bar.on_hp_changed(current_hp, max_hp);
                }
            }
            Reaction::Signal(signal) => self.tracker.on_signal(signal),
        }
    }

    /// Destroy an entity and emit its `destroy` event
    ///
    /// Returns false (and does nothing) for unknown or already destroyed
    /// entities.
    pub fn destroy(&mut self, id: EntityId) -> bool {
        let Some(entity) = self.get_mut(id) else {
            log::warn!("Destroy of unknown entity #{} ignored", id);
            return false;
        };
        if !entity.mark_destroyed() {
            log::debug!("Destroy of dead entity #{} ignored", id);
            return false;
        }
        log::debug!("Destroy {:?} #{}", entity.kind(), id);
        self.emit(id, GameEvent::Destroy);
        true
    }

    /// Advance one tick: update, collide, then apply spawns and removals
    pub fn tick(&mut self, input: &InputSnapshot, config: &GameConfig) {
        self.time_ticks += 1;

        let mut spawns = Vec::new();
        let count = self.entities.len();
        for index in 0..count {
            let entity = &mut self.entities[index];
            if !entity.is_alive() {
                continue;
            }
            let mut ctx = TickContext::new(input, config, &mut self.rng, &mut spawns);
            entity.update(&mut ctx);
            if ctx.destroy_requested() {
                let id = entity.id;
                self.destroy(id);
            }
        }

        resolve_collisions(self);

        for entity in spawns {
            self.add(entity);
        }
        self.entities.retain(|e| e.is_alive());
    }

    /// Phase transition requested by the match tracker, if any
    pub fn take_transition(&mut self) -> Option<GamePhase> {
        self.tracker.take_request()
    }

    /// Draw requests for live entities in creation order
    pub fn draw_list(&self) -> Vec<DrawCommand> {
        self.entities()
            .map(|e| DrawCommand {
                entity: e.id(),
                pos: e.pos(),
                visual: e.visual(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::actors::{FireworksBullet, PlayerBullet};
    use crate::sim::entity::Tags;

    fn quiet_config() -> GameConfig {
        let mut config = GameConfig::default();
        config.enemy.walk_speed = 0.0;
        config
    }

    fn first(scene: &Scene, kind: EntityKind) -> EntityId {
        scene
            .entities_of(kind)
            .next()
            .map(|e| e.id())
            .expect("entity of kind")
    }

    fn player_bullet_hit() -> GameEvent {
        GameEvent::Hit {
            partner: 999,
            partner_tags: Tags::PLAYER_BULLET,
        }
    }

    fn enemy_hp(scene: &Scene, id: EntityId) -> i32 {
        scene.get(id).and_then(|e| e.as_enemy()).map(|e| e.current_hp).unwrap()
    }

    fn gauge_width(scene: &Scene, id: EntityId) -> f32 {
        scene.get(id).and_then(|e| e.as_gauge()).map(|g| g.inner_width).unwrap()
    }

    #[test]
    fn test_battle_layout() {
        let config = GameConfig::default();
        let scene = Scene::battle(&config);
        assert_eq!(scene.count_of(EntityKind::Fighter), 1);
        assert_eq!(scene.count_of(EntityKind::Enemy), 2);
        assert_eq!(scene.count_of(EntityKind::HpGauge), 2);
        assert_eq!(scene.name(), "メイン");
        assert_eq!(scene.tracker().enemy_total(), 2);

        let kinds: Vec<EntityKind> = scene.entities().map(|e| e.kind()).collect();
        assert_eq!(
            kinds,
            vec![
                EntityKind::Fighter,
                EntityKind::Enemy,
                EntityKind::Enemy,
                EntityKind::HpGauge,
                EntityKind::HpGauge,
            ]
        );
    }

    #[test]
    fn test_battle_enemy_wiring() {
        let config = GameConfig::default();
        let scene = Scene::battle(&config);
        let enemy = scene.get(first(&scene, EntityKind::Enemy)).unwrap();
        let gauge = first(&scene, EntityKind::HpGauge);

        let reactions: Vec<(EventKind, Reaction)> = enemy
            .subscriptions()
            .iter()
            .map(|s| (s.kind, s.reaction))
            .collect();
        assert_eq!(
            reactions,
            vec![
                (EventKind::Hit, Reaction::TakeDamage(1)),
                (EventKind::ChangeHp, Reaction::ResizeGauge(gauge)),
                (EventKind::Destroy, Reaction::Signal(MatchSignal::EnemyDefeated)),
            ]
        );
        assert_eq!(enemy.subscriptions()[0].partner_filter, Some(Tags::PLAYER_BULLET));
    }

    #[test]
    fn test_enemy_hp_drops_once_per_player_bullet_hit() {
        let config = quiet_config();
        let mut scene = Scene::battle(&config);
        let enemy = first(&scene, EntityKind::Enemy);
        let gauge = first(&scene, EntityKind::HpGauge);

        for expected in (47..50).rev() {
            scene.emit(enemy, player_bullet_hit());
            assert_eq!(enemy_hp(&scene, enemy), expected);
            let width = 200.0 * expected as f32 / 50.0;
            assert!((gauge_width(&scene, gauge) - width).abs() < 1e-4);
        }
    }

    #[test]
    fn test_gauge_ignores_other_events() {
        let config = quiet_config();
        let mut scene = Scene::battle(&config);
        let enemy = first(&scene, EntityKind::Enemy);
        let gauge = first(&scene, EntityKind::HpGauge);

        scene.emit(
            enemy,
            GameEvent::Hit {
                partner: 999,
                partner_tags: Tags::ENEMY_BULLET,
            },
        );
        scene.emit(gauge, GameEvent::ChangeHp { current_hp: 0, max_hp: 50 });
        assert_eq!(enemy_hp(&scene, enemy), 50);
        assert_eq!(gauge_width(&scene, gauge), 200.0);
    }

    #[test]
    fn test_enemy_destroyed_exactly_once_at_zero_hp() {
        let config = quiet_config();
        let mut scene = Scene::battle(&config);
        let enemy = first(&scene, EntityKind::Enemy);
        let gauge = first(&scene, EntityKind::HpGauge);

        for _ in 0..50 {
            scene.emit(enemy, player_bullet_hit());
        }
        // Extra hits after reaching zero change nothing
        scene.emit(enemy, player_bullet_hit());
        assert_eq!(enemy_hp(&scene, enemy), 0);
        assert_eq!(gauge_width(&scene, gauge), 0.0);
        assert_eq!(scene.tracker().defeated_enemies(), 0);

        // The enemy notices its HP on its next update
        scene.tick(&InputSnapshot::default(), &config);
        assert!(scene.get(enemy).is_none());
        assert_eq!(scene.tracker().defeated_enemies(), 1);
        assert!(!scene.destroy(enemy));

        scene.tick(&InputSnapshot::default(), &config);
        assert_eq!(scene.tracker().defeated_enemies(), 1);
        // Gauge outlives its enemy
        assert!(scene.get(gauge).is_some());
    }

    #[test]
    fn test_double_destroy_is_noop() {
        let config = quiet_config();
        let mut scene = Scene::battle(&config);
        let enemy = first(&scene, EntityKind::Enemy);
        assert!(scene.destroy(enemy));
        assert!(!scene.destroy(enemy));
        assert_eq!(scene.tracker().defeated_enemies(), 1);
        assert!(!scene.destroy(12345));
    }

    #[test]
    fn test_player_bullets_ignore_each_other() {
        let config = quiet_config();
        let mut scene = Scene::new(GamePhase::Battle, 1, 0);
        let a = scene.add(PlayerBullet::entity(Vec2::new(400.0, 300.0), &config));
        let b = scene.add(PlayerBullet::entity(Vec2::new(402.0, 302.0), &config));
        scene.tick(&InputSnapshot::default(), &config);
        assert!(scene.get(a).is_some_and(|e| e.is_alive()));
        assert!(scene.get(b).is_some_and(|e| e.is_alive()));
    }

    #[test]
    fn test_player_bullet_hit_damages_enemy_and_dies() {
        let config = quiet_config();
        let mut scene = Scene::new(GamePhase::Battle, 1, 1);
        let mut rng = Pcg32::seed_from_u64(1);
        let enemy = scene.add(Enemy::entity(Vec2::new(400.0, 100.0), &config, &mut rng));
        // After moving up 6px the bullet overlaps the enemy's 32x32 area
        let bullet = scene.add(PlayerBullet::entity(Vec2::new(400.0, 130.0), &config));

        scene.tick(&InputSnapshot::default(), &config);
        assert!(scene.get(bullet).is_none());
        assert_eq!(enemy_hp(&scene, enemy), 49);
    }

    #[test]
    fn test_spawns_join_at_end_of_tick() {
        let config = quiet_config();
        let mut scene = Scene::new(GamePhase::Battle, 1, 0);
        let mut rng = Pcg32::seed_from_u64(1);
        scene.add(Enemy::entity(Vec2::new(400.0, 100.0), &config, &mut rng));
        assert_eq!(scene.live_count(), 1);
        scene.tick(&InputSnapshot::default(), &config);
        assert_eq!(scene.count_of(EntityKind::FireworksBullet), 1);

        // The new bullet was not updated during its spawn tick
        let shot = scene.entities_of(EntityKind::FireworksBullet).next().unwrap();
        assert_eq!(shot.pos(), Vec2::new(400.0, 100.0));
    }

    #[test]
    fn test_fireworks_bursts_once_then_leaves_live_set() {
        let config = quiet_config();
        let explosion_time = 5;
        let mut scene = Scene::new(GamePhase::Battle, 1, 0);
        scene.add(FireworksBullet::entity(
            Vec2::new(400.0, 300.0),
            Vec2::ZERO,
            explosion_time,
            &config,
        ));

        for _ in 0..explosion_time + 5 {
            scene.tick(&InputSnapshot::default(), &config);
        }
        assert_eq!(scene.count_of(EntityKind::EnemyBullet), 10);
        assert_eq!(scene.count_of(EntityKind::FireworksBullet), 0);
    }

    #[test]
    fn test_fireworks_leaving_screen_on_expiry_tick_bursts() {
        let config = quiet_config();
        let mut scene = Scene::new(GamePhase::Battle, 1, 0);
        scene.add(FireworksBullet::entity(
            Vec2::new(400.0, 595.0),
            Vec2::new(0.0, 2.0),
            0,
            &config,
        ));

        scene.tick(&InputSnapshot::default(), &config);
        assert_eq!(scene.count_of(EntityKind::FireworksBullet), 0);
        assert_eq!(scene.count_of(EntityKind::EnemyBullet), 10);
    }

    #[test]
    fn test_ids_follow_creation_order() {
        let config = quiet_config();
        let mut scene = Scene::battle(&config);
        for _ in 0..120 {
            scene.tick(&InputSnapshot::default(), &config);
        }
        let ids: Vec<EntityId> = scene.entities().map(|e| e.id()).collect();
        assert!(ids.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_draw_list_covers_live_entities() {
        let config = GameConfig::default();
        let scene = Scene::title(&config);
        let draws = scene.draw_list();
        assert_eq!(draws.len(), 1);
        assert_eq!(draws[0].pos, Vec2::new(320.0, 200.0));
        assert_eq!(
            draws[0].visual,
            Visual::Text {
                text: GAME_TITLE.to_string()
            }
        );
        assert_eq!(scene.background(), "black");
    }
}

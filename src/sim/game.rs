//! Match state machine
//!
//! TITLE -> BATTLE -> {CLEAR, GAME_OVER}. The battle scene reports player and
//! enemy destruction to its [`MatchTracker`]; [`Game`] turns requested
//! transitions into scene swaps between ticks, so no caller ever sees a
//! half-built scene.

use serde::{Deserialize, Serialize};

use super::event::MatchSignal;
use super::input::{InputSnapshot, Keys};
use super::scene::Scene;
use crate::settings::GameConfig;

/// Current phase of the match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for the confirm key
    Title,
    /// Active gameplay
    Battle,
    /// Every enemy destroyed
    Clear,
    /// Player ship destroyed
    GameOver,
}

impl GamePhase {
    /// Clear and game over never transition again
    pub fn is_terminal(&self) -> bool {
        matches!(self, GamePhase::Clear | GamePhase::GameOver)
    }

    pub fn scene_name(&self) -> &'static str {
        match self {
            GamePhase::Title => "タイトル",
            GamePhase::Battle => "メイン",
            GamePhase::Clear => "クリア",
            GamePhase::GameOver => "ゲームオーバー",
        }
    }
}

/// Win/lose bookkeeping of one battle
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchTracker {
    enemy_total: u32,
    defeated_enemies: u32,
    player_down: bool,
    requested: Option<GamePhase>,
}

impl MatchTracker {
    pub fn new(enemy_total: u32) -> Self {
        Self {
            enemy_total,
            ..Default::default()
        }
    }

    pub fn enemy_total(&self) -> u32 {
        self.enemy_total
    }

    pub fn defeated_enemies(&self) -> u32 {
        self.defeated_enemies
    }

    pub fn player_down(&self) -> bool {
        self.player_down
    }

    pub fn requested(&self) -> Option<GamePhase> {
        self.requested
    }

    pub fn on_signal(&mut self, signal: MatchSignal) {
        match signal {
            MatchSignal::PlayerDown => {
                self.player_down = true;
                self.request(GamePhase::GameOver);
            }
            MatchSignal::EnemyDefeated => {
                self.defeated_enemies += 1;
                log::debug!(
                    "Enemy defeated ({}/{})",
                    self.defeated_enemies,
                    self.enemy_total
                );
                if self.defeated_enemies == self.enemy_total {
                    self.request(GamePhase::Clear);
                }
            }
        }
    }

    /// Game over wins if both outcomes land in the same tick
    fn request(&mut self, phase: GamePhase) {
        if self.requested != Some(GamePhase::GameOver) {
            self.requested = Some(phase);
        }
    }

    pub(crate) fn take_request(&mut self) -> Option<GamePhase> {
        self.requested.take()
    }
}

/// Drives the active scene and the phase transitions
#[derive(Debug, Clone)]
pub struct Game {
    config: GameConfig,
    scene: Scene,
    /// Ticks since the game started, across scenes
    time_ticks: u64,
}

impl Game {
    /// Start at the title screen
    pub fn new(config: GameConfig) -> Self {
        let scene = Scene::title(&config);
        log::info!("Game started: {}", scene.name());
        Self {
            config,
            scene,
            time_ticks: 0,
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn phase(&self) -> GamePhase {
        self.scene.phase()
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Direct access for drivers and tests (e.g. injecting a destroy)
    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    pub fn time_ticks(&self) -> u64 {
        self.time_ticks
    }

    /// Run one tick of the active scene, then apply any transition
    pub fn tick(&mut self, input: &InputSnapshot) {
        self.time_ticks += 1;
        self.scene.tick(input, &self.config);
        self.apply_transitions(input);
    }

    /// Apply the transition the current phase asks for, if any
    ///
    /// Also called after injecting events between ticks.
    pub fn apply_transitions(&mut self, input: &InputSnapshot) {
        let next = match self.phase() {
            GamePhase::Title if input.is_pressed(Keys::CONFIRM) => Some(GamePhase::Battle),
            GamePhase::Battle => self.scene.take_transition(),
            _ => None,
        };
        if let Some(next) = next {
            self.change_phase(next);
        }
    }

    /// Replace the active scene with the initial scene of `next`
    pub fn change_phase(&mut self, next: GamePhase) {
        log::info!(
            "Phase {:?} -> {:?} after {} ticks",
            self.phase(),
            next,
            self.scene.time_ticks()
        );
        self.scene = Scene::for_phase(next, &self.config);
    }

    /// Back to the title screen with a fresh scene
    pub fn reset(&mut self) {
        self.change_phase(GamePhase::Title);
    }
}

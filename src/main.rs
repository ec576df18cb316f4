//! Danmaku STG headless driver
//!
//! Runs the simulation with a scripted autopilot and logs the outcome.
//! Usage: `danmaku-stg [config.json] [--ticks N]`

use std::path::PathBuf;

use clap::Parser;
use danmaku_stg::GameConfig;
use danmaku_stg::sim::{EntityKind, Game, GamePhase, InputTracker, Keys};

/// Default run length (one minute of game time at 60 Hz)
const DEFAULT_TICKS: u64 = 3600;

#[derive(Parser)]
#[command(version, about = "Headless danmaku STG driven by an autopilot")]
struct Args {
    /// JSON game config; built-in defaults when omitted
    config: Option<PathBuf>,

    /// Stop after this many ticks
    #[arg(long, default_value_t = DEFAULT_TICKS)]
    ticks: u64,
}

/// Steer under the first live enemy while holding fire
fn autopilot(game: &Game, tracker: &mut InputTracker) {
    let scene = game.scene();
    let fighter = scene.entities_of(EntityKind::Fighter).next().map(|e| e.pos());
    let target = scene.entities_of(EntityKind::Enemy).next().map(|e| e.pos());

    tracker.key_up(Keys::LEFT | Keys::RIGHT);
    if let (Some(fighter), Some(target)) = (fighter, target) {
        if target.x + 8.0 < fighter.x {
            tracker.key_down(Keys::LEFT);
        } else if target.x - 8.0 > fighter.x {
            tracker.key_down(Keys::RIGHT);
        }
    }
}

fn run(args: Args) -> Result<(), danmaku_stg::ConfigError> {
    let config = match &args.config {
        Some(path) => GameConfig::load(path)?,
        None => GameConfig::default(),
    };

    let mut game = Game::new(config);
    let ticks_per_second = u64::from(game.config().screen.ticks_per_second);
    let mut tracker = InputTracker::new();
    tracker.key_down(Keys::CONFIRM);

    while game.time_ticks() < args.ticks && !game.phase().is_terminal() {
        if game.phase() == GamePhase::Battle {
            tracker.key_up(Keys::CONFIRM);
            tracker.key_down(Keys::FIRE);
            autopilot(&game, &mut tracker);
        }

        let input = tracker.snapshot();
        game.tick(&input);

        if game.time_ticks() % ticks_per_second == 0 {
            let scene = game.scene();
            let hp: Vec<i32> = scene
                .entities_of(EntityKind::Enemy)
                .filter_map(|e| e.as_enemy())
                .map(|e| e.current_hp)
                .collect();
            log::info!(
                "t={}s phase={:?} entities={} enemy_hp={:?}",
                game.time_ticks() / ticks_per_second,
                game.phase(),
                scene.live_count(),
                hp
            );
            log::debug!("draw list: {} commands", scene.draw_list().len());
        }
    }

    log::info!(
        "Finished after {} ticks in {:?} ({})",
        game.time_ticks(),
        game.phase(),
        game.scene().name()
    );
    println!("{:?}", game.phase());
    Ok(())
}

fn main() {
    env_logger::init();
    log::info!("{} (headless) starting...", danmaku_stg::consts::GAME_TITLE);

    let args = Args::parse();

    if let Err(err) = run(args) {
        log::error!("{err}");
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

//! Lane Hopper entry point
//!
//! Runs a headless session driven by the autopilot at the fixed tick rate and
//! reports how far it got. Usage: `lane-hopper [settings.json]`

use anyhow::{Context, Result};

use lane_hopper::Settings;
use lane_hopper::consts::TICKS_PER_SECOND;
use lane_hopper::sim::{GameEvent, GamePhase, GameState, TickInput, choose_move, tick};

/// Ticks between autopilot hops (roughly a human key-repeat rate)
const HOP_INTERVAL: u64 = 8;
/// Hard cap on session length (10 minutes of play)
const MAX_TICKS: u64 = 10 * 60 * TICKS_PER_SECOND as u64;
/// Game-over prompts answered "yes" before declining
const MAX_RESTARTS: u32 = 2;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Lane Hopper (headless) starting...");

    let settings = match std::env::args().nth(1) {
        Some(path) => Settings::from_path(&path)
            .with_context(|| format!("loading settings from {path}"))?,
        None => Settings::default(),
    };
    let seed = settings.seed.unwrap_or_else(rand::random);
    log::info!("Game initialized with seed: {}", seed);

    let mut state = GameState::with_settings(seed, settings);
    let mut restarts = 0;
    let mut best_level = state.level;

    for frame in 0..MAX_TICKS {
        let mut input = TickInput::default();
        if state.phase == GamePhase::Playing && frame % HOP_INTERVAL == 0 {
            input.direction = choose_move(&state);
        }
        if state.phase == GamePhase::GameOver {
            input.restart = Some(restarts < MAX_RESTARTS);
            restarts += 1;
        }

        tick(&mut state, &input);

        for event in &state.events {
            match event {
                GameEvent::LifeLost { remaining } => {
                    log::info!("Ouch! {} lives left", remaining)
                }
                GameEvent::LevelAdvanced { level } => best_level = best_level.max(*level),
                _ => {}
            }
        }

        if state.phase == GamePhase::Ended {
            break;
        }
    }

    let snapshot = serde_json::to_string(&state.snapshot()).context("serializing final state")?;
    println!("best level: {}, restarts: {}", best_level, restarts.min(MAX_RESTARTS));
    println!("{snapshot}");
    Ok(())
}

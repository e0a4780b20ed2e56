//! Lane Hopper - A lane-crossing arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (lanes, collisions, game state)
//! - `settings`: Data-driven game tuning loaded from JSON
//! - `error`: Configuration errors

pub mod error;
pub mod settings;
pub mod sim;

pub use error::SettingsError;
pub use settings::{LaneTuning, Settings};

/// Game configuration constants
pub mod consts {
    /// Simulation rate (ticks per second), one tick per rendered frame
    pub const TICKS_PER_SECOND: u32 = 60;
    /// Milliseconds covered by a single tick
    pub const TICK_MS: f32 = 1000.0 / TICKS_PER_SECOND as f32;

    /// Playfield dimensions
    pub const CANVAS_WIDTH: f32 = 600.0;
    pub const CANVAS_HEIGHT: f32 = 400.0;

    /// Actor defaults
    pub const ACTOR_SIZE: f32 = 40.0;
    /// Extra pixels added to every hop on top of the actor size
    pub const MOVE_INCREMENT: f32 = 1.0;
    pub const ACTOR_START_X: f32 = CANVAS_WIDTH / 2.0 - 20.0;
    pub const ACTOR_START_Y: f32 = CANVAS_HEIGHT - 80.0 + 40.0;

    /// Constant rightward push: one move increment every 50 ms
    pub const DRIFT_PER_TICK: f32 = MOVE_INCREMENT * TICK_MS / 50.0;
    /// The drifting sprite flips once per 50 ms nudge
    pub const DRIFT_SPRITE_TICKS: u64 = TICKS_PER_SECOND as u64 * 50 / 1000;
    /// Carry speeds are expressed per 10 ms step
    pub const CARRY_TICK_SCALE: f32 = TICK_MS / 10.0;
    pub const CARRY_MIN_SPEED: i32 = 1;
    pub const CARRY_MAX_SPEED: i32 = 5;

    /// Goal zone geometry
    pub const GOAL_X: f32 = 250.0;
    pub const GOAL_Y: f32 = 10.0;
    pub const GOAL_WIDTH: f32 = 40.0;
    pub const GOAL_HEIGHT: f32 = 20.0;

    /// Obstacle defaults
    pub const OBSTACLE_WIDTH: f32 = 40.0;
    pub const OBSTACLE_HEIGHT: f32 = 40.0;

    /// Lane partition of the playfield
    pub const LANE_SLOTS: usize = 18;
    pub const ACTIVE_LANE_SLOTS: [u32; 4] = [7, 10, 13, 16];

    /// Session defaults
    pub const STARTING_LIVES: u32 = 3;
    pub const FINAL_LEVEL: u32 = 7;
}

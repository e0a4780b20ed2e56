//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One tick per frame, no wall-clock time
//! - Seeded RNG only
//! - Stable iteration order (generation order)
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod lanes;
pub mod rect;
pub mod state;
pub mod tick;

pub use autopilot::choose_move;
pub use lanes::{LaneLayout, generate_lanes, speed_range};
pub use rect::Rect;
pub use state::{
    Actor, Direction, Entity, GameEvent, GamePhase, GameState, GoalColor, GoalZone, HopOutcome,
    Obstacle, ObstacleSkin, Snapshot,
};
pub use tick::{TickInput, advance_level, lose_life, restart, tick};

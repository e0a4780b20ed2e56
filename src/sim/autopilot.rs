//! Demo-mode input source
//!
//! Picks a hop by projecting obstacle positions a few ticks ahead and
//! refusing any move that would land in their path. Used by the headless
//! binary; never called by the simulation itself.

use glam::Vec2;

use super::rect::Rect;
use super::state::{Direction, GameState};

/// How many ticks ahead a landing spot must stay clear
pub const LOOKAHEAD_TICKS: usize = 12;

/// Choose the next hop for the actor, or `None` to wait
pub fn choose_move(state: &GameState) -> Option<Direction> {
    let canvas = state.canvas();
    let actor = state.actor.rect;
    let frames = project_obstacles(state, LOOKAHEAD_TICKS);
    let is_safe = |rect: &Rect| {
        frames
            .iter()
            .all(|frame| frame.iter().all(|o| !o.intersects(rect)))
    };

    // Dodge first
    if !is_safe(&actor) {
        return [Direction::Up, Direction::Down, Direction::Left, Direction::Right]
            .into_iter()
            .find(|&d| landing(state, d, canvas).is_some_and(|r| is_safe(&r)));
    }

    let goal = state.goal.rect;
    let center = actor.x() + actor.width() / 2.0;
    let preferred = if center > goal.right() {
        Direction::Left
    } else if center < goal.x() {
        Direction::Right
    } else {
        Direction::Up
    };

    // Fall back to climbing when the sideways hop is blocked
    [preferred, Direction::Up]
        .into_iter()
        .find(|&d| landing(state, d, canvas).is_some_and(|r| is_safe(&r)))
}

/// Where a hop would land, if it is legal and either stays on the canvas or reaches the goal
fn landing(state: &GameState, direction: Direction, canvas: Vec2) -> Option<Rect> {
    let mut rect = state.actor.rect;
    let step = Vec2::new(
        rect.width() + state.actor.move_increment,
        rect.height() + state.actor.move_increment,
    );
    match direction {
        Direction::Up if rect.y() > 0.0 => rect.pos.y -= step.y,
        Direction::Down if rect.y() < canvas.y - rect.height() => rect.pos.y += step.y,
        Direction::Left if rect.x() > 0.0 => rect.pos.x -= step.x,
        Direction::Right if rect.x() < canvas.x - rect.width() => rect.pos.x += step.x,
        _ => return None,
    }
    (state.playfield().contains_rect(&rect) || rect.intersects(&state.goal.rect))
        .then_some(rect)
}

/// Obstacle rectangles for each of the next `ticks` ticks
fn project_obstacles(state: &GameState, ticks: usize) -> Vec<Vec<Rect>> {
    let canvas_width = state.canvas().x;
    let mut obstacles = state.obstacles.clone();
    (0..ticks)
        .map(|_| {
            for obstacle in &mut obstacles {
                obstacle.advance(canvas_width);
            }
            obstacles.iter().map(|o| o.rect).collect()
        })
        .collect()
}

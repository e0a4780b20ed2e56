//! Fixed-rate simulation tick
//!
//! Core game loop that advances the simulation one frame at a time and drives
//! the level/lives/game-over state machine.

use rand::Rng;

use super::state::{Direction, GameEvent, GamePhase, GameState, HopOutcome};
use crate::consts::*;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Queued hop, applied at the start of the tick
    pub direction: Option<Direction>,
    /// Key release (toggles the actor sprite only)
    pub key_released: bool,
    /// Answer to the game-over prompt; ignored outside GameOver
    pub restart: Option<bool>,
}

/// Advance the game state by one tick
pub fn tick(state: &mut GameState, input: &TickInput) {
    state.events.clear();

    match state.phase {
        GamePhase::Playing => {}
        GamePhase::Completed => {
            enter_game_over(state);
            return;
        }
        GamePhase::GameOver => {
            match input.restart {
                Some(true) => restart(state),
                Some(false) => {
                    state.phase = GamePhase::Ended;
                    state.events.push(GameEvent::SessionEnded);
                    log::info!("Thanks for playing!");
                }
                None => {}
            }
            return;
        }
        GamePhase::Ended => return,
    }

    state.time_ticks += 1;

    // Discrete move lands atomically before anything else looks at the actor
    if let Some(direction) = input.direction {
        if apply_hop(state, direction) {
            return;
        }
    }
    if input.key_released {
        state.actor.toggle_sprite();
    }

    if state.settings.drift_enabled {
        state.actor.rect.pos.x += DRIFT_PER_TICK;
        if state.time_ticks % DRIFT_SPRITE_TICKS == 0 {
            state.actor.toggle_sprite();
        }
    }
    state.actor.apply_carry(CANVAS_WIDTH);

    for obstacle in &mut state.obstacles {
        obstacle.advance(CANVAS_WIDTH);
    }

    let actor = state.actor.rect;
    let hit = state.obstacles.iter().any(|o| actor.intersects(&o.rect));
    let out_of_bounds = !actor.within_x(0.0, CANVAS_WIDTH - actor.width());
    if (hit || out_of_bounds) && lose_life(state) {
        return;
    }

    if state.actor.rect.intersects(&state.goal.rect) {
        advance_level(state);
        return;
    }

    // A hop off the top row that missed the goal
    if !state.playfield().contains_rect(&state.actor.rect) {
        lose_life(state);
    }
}

/// Apply a queued hop. Returns true if it ended the run.
fn apply_hop(state: &mut GameState, direction: Direction) -> bool {
    let canvas = state.canvas();
    let carry_row = state.layout.carry_row_top(state.actor.rect.height());

    match state.actor.hop(direction, canvas) {
        HopOutcome::WallDeath => lose_life(state),
        HopOutcome::Moved { from }
            if direction == Direction::Up && (from.y - carry_row).abs() < 0.5 =>
        {
            let speed = state.rng().random_range(CARRY_MIN_SPEED..=CARRY_MAX_SPEED) as f32;
            state.actor.carry_speed = Some(speed);
            log::debug!("Actor caught the current at speed {}", speed);
            false
        }
        HopOutcome::Moved { .. } | HopOutcome::Blocked => false,
    }
}

/// Send the actor home and take a life. Returns true if that was the last one.
pub fn lose_life(state: &mut GameState) -> bool {
    state.reset_actor();
    state.lives = state.lives.saturating_sub(1);
    state.events.push(GameEvent::LifeLost {
        remaining: state.lives,
    });
    log::debug!("Life lost on level {}, {} left", state.level, state.lives);

    if state.lives == 0 {
        enter_game_over(state);
        true
    } else {
        false
    }
}

/// Goal reached: move to the next level or complete the game
pub fn advance_level(state: &mut GameState) {
    if state.level >= state.settings.final_level {
        state.phase = GamePhase::Completed;
        state.actor.carry_speed = None;
        state.events.push(GameEvent::AllLevelsCleared);
        log::info!(
            "Congratulations! All {} levels cleared in {}s",
            state.level,
            state.elapsed_secs()
        );
        return;
    }

    state.level += 1;
    state.apply_level_theme(state.level);
    state.reset_actor();
    state.regenerate_lanes();
    state.events.push(GameEvent::LevelAdvanced { level: state.level });
    log::info!("Level {} ({})", state.level, state.goal.color.as_str());
}

/// Start a fresh run at level 1
pub fn restart(state: &mut GameState) {
    state.lives = state.settings.starting_lives;
    state.time_ticks = 0;
    state.level = 1;
    state.apply_level_theme(1);
    state.reset_actor();
    state.regenerate_lanes();
    state.phase = GamePhase::Playing;
    state.events.push(GameEvent::Restarted);
    log::info!("Game restarted");
}

fn enter_game_over(state: &mut GameState) {
    state.phase = GamePhase::GameOver;
    state.actor.carry_speed = None;
    state.events.push(GameEvent::GameOver);
    log::info!(
        "Game over on level {} after {}s",
        state.level,
        state.elapsed_secs()
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;
    use crate::sim::rect::Rect;
    use crate::sim::state::{GoalColor, Obstacle, ObstacleSkin};

    fn still_state(seed: u64) -> GameState {
        let settings = Settings {
            drift_enabled: false,
            ..Settings::default()
        };
        GameState::with_settings(seed, settings)
    }

    fn obstacle_on_actor(state: &GameState) -> Obstacle {
        Obstacle {
            rect: state.actor.rect,
            speed: 0.0,
            lane: 16,
            skin: ObstacleSkin::Snake,
        }
    }

    fn idle() -> TickInput {
        TickInput::default()
    }

    fn hop(direction: Direction) -> TickInput {
        TickInput {
            direction: Some(direction),
            ..Default::default()
        }
    }

    #[test]
    fn test_left_at_wall_costs_a_life() {
        let mut state = still_state(1);
        state.obstacles.clear();
        state.actor.reset_position(0.0, ACTOR_START_Y);

        tick(&mut state, &hop(Direction::Left));

        assert_eq!(state.lives, 2);
        assert_eq!(state.actor.rect.x(), ACTOR_START_X);
        assert_eq!(state.actor.rect.y(), ACTOR_START_Y);
        assert_eq!(state.events, vec![GameEvent::LifeLost { remaining: 2 }]);
    }

    #[test]
    fn test_left_away_from_wall_hops() {
        let mut state = still_state(1);
        state.obstacles.clear();
        tick(&mut state, &hop(Direction::Left));
        assert_eq!(state.lives, 3);
        assert_eq!(
            state.actor.rect.x(),
            ACTOR_START_X - (ACTOR_SIZE + MOVE_INCREMENT)
        );
    }

    #[test]
    fn test_collision_on_last_life_ends_run() {
        let mut state = still_state(2);
        state.lives = 1;
        let blocker = obstacle_on_actor(&state);
        state.obstacles.push(blocker);

        tick(&mut state, &idle());

        assert_eq!(state.lives, 0);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert!(state.events.contains(&GameEvent::GameOver));
    }

    #[test]
    fn test_collision_with_lives_left_resets_actor() {
        let mut state = still_state(2);
        state.obstacles.clear();
        state.actor.reset_position(100.0, 200.0);
        let blocker = obstacle_on_actor(&state);
        state.obstacles.push(blocker);

        tick(&mut state, &idle());

        assert_eq!(state.lives, 2);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.actor.rect.x(), ACTOR_START_X);
        assert_eq!(state.actor.rect.y(), ACTOR_START_Y);
    }

    #[test]
    fn test_drifting_off_the_right_edge_costs_a_life() {
        let mut state = GameState::new(3);
        state.obstacles.clear();
        state.actor.reset_position(CANVAS_WIDTH - ACTOR_SIZE, ACTOR_START_Y);

        tick(&mut state, &idle());

        assert_eq!(state.lives, 2);
        assert_eq!(state.actor.rect.y(), ACTOR_START_Y);
    }

    #[test]
    fn test_drift_nudges_actor_right() {
        let mut state = GameState::new(3);
        state.obstacles.clear();
        let start = state.actor.rect.x();
        for _ in 0..TICKS_PER_SECOND {
            tick(&mut state, &idle());
        }
        // One move increment every 50 ms
        let expected = start + 20.0 * MOVE_INCREMENT;
        assert!((state.actor.rect.x() - expected).abs() < 0.01);
    }

    #[test]
    fn test_goal_advances_level() {
        let mut state = still_state(4);
        state.obstacles.clear();
        state.actor.reset_position(GOAL_X, GOAL_Y);

        tick(&mut state, &idle());

        assert_eq!(state.level, 2);
        assert_eq!(state.goal.color, GoalColor::Green);
        assert_eq!(state.actor.rect.y(), ACTOR_START_Y);
        assert!(!state.obstacles.is_empty());
        assert!(state
            .obstacles
            .iter()
            .all(|o| o.skin == ObstacleSkin::ScarabBronze));
        assert_eq!(state.events, vec![GameEvent::LevelAdvanced { level: 2 }]);
    }

    #[test]
    fn test_partial_goal_overlap_counts() {
        let mut state = still_state(4);
        state.obstacles.clear();
        // Only the top-right corner of the actor touches the goal
        state.actor.reset_position(GOAL_X - ACTOR_SIZE + 5.0, GOAL_Y + GOAL_HEIGHT - 5.0);
        tick(&mut state, &idle());
        assert_eq!(state.level, 2);
    }

    #[test]
    fn test_final_level_goal_completes_then_game_over() {
        let mut state = still_state(5);
        state.level = FINAL_LEVEL;
        state.obstacles.clear();
        state.actor.reset_position(GOAL_X, GOAL_Y);

        tick(&mut state, &idle());
        assert_eq!(state.phase, GamePhase::Completed);
        assert_eq!(state.events, vec![GameEvent::AllLevelsCleared]);

        tick(&mut state, &idle());
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.level, FINAL_LEVEL);
    }

    #[test]
    fn test_restart_accepted_resets_session() {
        let mut state = still_state(6);
        state.level = 5;
        state.lives = 1;
        state.time_ticks = 9_000;
        state.apply_level_theme(5);
        let blocker = obstacle_on_actor(&state);
        state.obstacles.push(blocker);
        tick(&mut state, &idle());
        assert_eq!(state.phase, GamePhase::GameOver);

        // Without an answer nothing happens
        tick(&mut state, &idle());
        assert_eq!(state.phase, GamePhase::GameOver);

        tick(
            &mut state,
            &TickInput {
                restart: Some(true),
                ..Default::default()
            },
        );
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.lives, 3);
        assert_eq!(state.level, 1);
        assert_eq!(state.time_ticks, 0);
        assert_eq!(state.goal.color, GoalColor::Blue);
        assert_eq!(state.actor.rect.x(), ACTOR_START_X);
        assert_eq!(state.actor.rect.y(), ACTOR_START_Y);
        assert!(!state.obstacles.is_empty());
        assert!(state.obstacles.iter().all(|o| o.skin == ObstacleSkin::Snake));
    }

    #[test]
    fn test_restart_declined_ends_session() {
        let mut state = still_state(7);
        state.phase = GamePhase::GameOver;
        tick(
            &mut state,
            &TickInput {
                restart: Some(false),
                ..Default::default()
            },
        );
        assert_eq!(state.phase, GamePhase::Ended);

        let before = state.obstacles[0].rect;
        tick(&mut state, &hop(Direction::Up));
        assert_eq!(state.phase, GamePhase::Ended);
        assert_eq!(state.obstacles[0].rect, before);
        assert!(state.events.is_empty());
    }

    #[test]
    fn test_game_over_freezes_world() {
        let mut state = still_state(8);
        state.phase = GamePhase::GameOver;
        let actor_before = state.actor.rect;
        let ticks_before = state.time_ticks;
        tick(&mut state, &hop(Direction::Up));
        assert_eq!(state.actor.rect, actor_before);
        assert_eq!(state.time_ticks, ticks_before);
    }

    #[test]
    fn test_hop_up_from_current_row_starts_carry() {
        let mut state = still_state(10);
        state.obstacles.clear();
        // Taller slots so the carry row's hop lands on the canvas
        state.layout.lane_height = 60.0;
        let row = state.layout.carry_row_top(ACTOR_SIZE);
        state.actor.reset_position(100.0, row);

        tick(&mut state, &hop(Direction::Up));
        let speed = state.actor.carry_speed.expect("carry should start");
        assert!((CARRY_MIN_SPEED as f32..=CARRY_MAX_SPEED as f32).contains(&speed));
        assert!(state.actor.rect.x() > 100.0);

        tick(&mut state, &hop(Direction::Down));
        assert_eq!(state.actor.carry_speed, None);
    }

    #[test]
    fn test_hop_off_the_top_away_from_goal_costs_a_life() {
        let mut state = still_state(15);
        state.obstacles.clear();
        state.actor.reset_position(100.0, 32.0);

        tick(&mut state, &hop(Direction::Up));

        assert_eq!(state.lives, 2);
        assert_eq!(state.level, 1);
        assert_eq!(state.actor.rect.x(), ACTOR_START_X);
        assert_eq!(state.actor.rect.y(), ACTOR_START_Y);
        assert_eq!(state.events, vec![GameEvent::LifeLost { remaining: 2 }]);

        for _ in 0..100 {
            tick(&mut state, &idle());
            assert!(state.playfield().contains_rect(&state.actor.rect));
        }
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_hop_off_the_top_into_goal_advances() {
        let mut state = still_state(15);
        state.obstacles.clear();
        state.actor.reset_position(GOAL_X, 32.0);

        tick(&mut state, &hop(Direction::Up));

        assert_eq!(state.lives, 3);
        assert_eq!(state.level, 2);
        assert!(state.playfield().contains_rect(&state.actor.rect));
    }

    #[test]
    fn test_drift_flips_sprite_every_nudge() {
        let mut state = GameState::new(16);
        state.obstacles.clear();
        let mut flips = 0;
        let mut last = state.actor.alternate_sprite;
        for _ in 0..TICKS_PER_SECOND {
            tick(&mut state, &idle());
            if state.actor.alternate_sprite != last {
                flips += 1;
                last = state.actor.alternate_sprite;
            }
        }
        // One flip per 50 ms
        assert_eq!(flips, 20);
    }

    #[test]
    fn test_carry_cleared_on_level_change() {
        let mut state = still_state(11);
        state.obstacles.clear();
        state.actor.carry_speed = Some(4.0);
        advance_level(&mut state);
        assert_eq!(state.actor.carry_speed, None);
    }

    #[test]
    fn test_key_release_only_toggles_sprite() {
        let mut state = still_state(12);
        state.obstacles.clear();
        let before = state.actor.rect;
        tick(
            &mut state,
            &TickInput {
                key_released: true,
                ..Default::default()
            },
        );
        assert!(state.actor.alternate_sprite);
        assert_eq!(state.actor.rect, before);
    }

    #[test]
    fn test_elapsed_time_counts_ticks() {
        let mut state = still_state(13);
        state.obstacles.clear();
        for _ in 0..(TICKS_PER_SECOND * 2) {
            tick(&mut state, &idle());
        }
        assert_eq!(state.elapsed_secs(), 2);
    }

    #[test]
    fn test_determinism() {
        // Two states with same seed and inputs should produce identical results
        let mut state1 = GameState::new(99999);
        let mut state2 = GameState::new(99999);

        let inputs = [
            hop(Direction::Up),
            idle(),
            hop(Direction::Left),
            hop(Direction::Up),
            idle(),
            hop(Direction::Right),
        ];

        for _ in 0..20 {
            for input in &inputs {
                tick(&mut state1, input);
                tick(&mut state2, input);
            }
        }

        assert_eq!(state1.time_ticks, state2.time_ticks);
        assert_eq!(state1.lives, state2.lives);
        assert_eq!(state1.level, state2.level);
        assert_eq!(state1.actor.rect, state2.actor.rect);
        assert_eq!(state1.obstacles.len(), state2.obstacles.len());
        for (a, b) in state1.obstacles.iter().zip(&state2.obstacles) {
            assert_eq!(a.rect, b.rect);
        }
    }

    #[test]
    fn test_obstacles_only_move_while_playing() {
        let mut state = still_state(14);
        state.obstacles = vec![Obstacle {
            rect: Rect::new(10.0, 100.0, OBSTACLE_WIDTH, OBSTACLE_HEIGHT),
            speed: 2.0,
            lane: 10,
            skin: ObstacleSkin::Snake,
        }];
        tick(&mut state, &idle());
        assert_eq!(state.obstacles[0].rect.x(), 12.0);
        state.phase = GamePhase::GameOver;
        tick(&mut state, &idle());
        assert_eq!(state.obstacles[0].rect.x(), 12.0);
    }
}

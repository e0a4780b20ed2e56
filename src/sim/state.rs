//! Game state and core simulation types
//!
//! All state a renderer or a replay needs lives here.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::lanes::{LaneLayout, generate_lanes};
use super::rect::Rect;
use crate::consts::*;
use crate::settings::Settings;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Final level cleared; becomes GameOver on the next tick
    Completed,
    /// Run ended, waiting for the restart confirmation
    GameOver,
    /// Restart declined, session over
    Ended,
}

/// Discrete hop direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Map a keyboard key name to a direction (unknown keys are ignored)
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowUp" => Some(Direction::Up),
            "ArrowDown" => Some(Direction::Down),
            "ArrowLeft" => Some(Direction::Left),
            "ArrowRight" => Some(Direction::Right),
            _ => None,
        }
    }
}

/// Result of a hop attempt
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HopOutcome {
    /// Actor moved; carries the pre-hop position
    Moved { from: Vec2 },
    /// Edge of the playfield, nothing happened
    Blocked,
    /// Tried to hop left while touching the left wall
    WallDeath,
}

/// The player-controlled actor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Actor {
    pub rect: Rect,
    /// Extra pixels added to each hop
    pub move_increment: f32,
    /// Sprite toggle (cosmetic only)
    pub alternate_sprite: bool,
    /// Rightward carry speed (px per 10 ms) while riding the current row
    #[serde(default)]
    pub carry_speed: Option<f32>,
}

impl Default for Actor {
    fn default() -> Self {
        Self {
            rect: Rect::new(ACTOR_START_X, ACTOR_START_Y, ACTOR_SIZE, ACTOR_SIZE),
            move_increment: MOVE_INCREMENT,
            alternate_sprite: false,
            carry_speed: None,
        }
    }
}

impl Actor {
    /// Attempt a single-cell hop within `canvas`
    ///
    /// The bounds check looks at the pre-hop position, so the actor may end a
    /// hop partly outside the playfield (the step's bounds check catches it).
    pub fn hop(&mut self, direction: Direction, canvas: Vec2) -> HopOutcome {
        let from = self.rect.pos;
        let step_x = self.rect.width() + self.move_increment;
        let step_y = self.rect.height() + self.move_increment;

        let outcome = match direction {
            Direction::Up if from.y > 0.0 => {
                self.rect.pos.y -= step_y;
                HopOutcome::Moved { from }
            }
            Direction::Down if from.y < canvas.y - self.rect.height() => {
                self.carry_speed = None;
                self.rect.pos.y += step_y;
                HopOutcome::Moved { from }
            }
            Direction::Left if from.x > 0.0 => {
                self.carry_speed = None;
                self.rect.pos.x -= step_x;
                HopOutcome::Moved { from }
            }
            Direction::Left => HopOutcome::WallDeath,
            Direction::Right if from.x < canvas.x - self.rect.width() => {
                self.carry_speed = None;
                self.rect.pos.x += step_x;
                HopOutcome::Moved { from }
            }
            _ => HopOutcome::Blocked,
        };

        self.toggle_sprite();
        outcome
    }

    pub fn toggle_sprite(&mut self) {
        self.alternate_sprite = !self.alternate_sprite;
    }

    /// Teleport the actor and stop any carry
    pub fn reset_position(&mut self, x: f32, y: f32) {
        self.rect.pos = Vec2::new(x, y);
        self.carry_speed = None;
    }

    /// Apply one tick of carry, never pushing past the right limit check
    pub fn apply_carry(&mut self, canvas_width: f32) {
        if let Some(speed) = self.carry_speed {
            if self.rect.x() < canvas_width - self.rect.width() {
                self.rect.pos.x += speed * CARRY_TICK_SCALE;
            }
        }
    }
}

/// Obstacle appearance, chosen per level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ObstacleSkin {
    #[default]
    Snake,
    ScarabBronze,
    Log,
    Gator,
    Scarab,
    Turtle,
    Cobra,
}

impl ObstacleSkin {
    /// Skin for a level; level 1 and anything past the last themed level use the default
    pub fn for_level(level: u32) -> Self {
        match level {
            2 => ObstacleSkin::ScarabBronze,
            3 => ObstacleSkin::Log,
            4 => ObstacleSkin::Gator,
            5 => ObstacleSkin::Scarab,
            6 => ObstacleSkin::Turtle,
            7 => ObstacleSkin::Cobra,
            _ => ObstacleSkin::Snake,
        }
    }

    /// Image the renderer should resolve for this skin
    pub fn asset_name(&self) -> &'static str {
        match self {
            ObstacleSkin::Snake => "snake.png",
            ObstacleSkin::ScarabBronze => "scarab2.png",
            ObstacleSkin::Log => "log.png",
            ObstacleSkin::Gator => "gator.png",
            ObstacleSkin::Scarab => "scarab.png",
            ObstacleSkin::Turtle => "turtle.png",
            ObstacleSkin::Cobra => "snake2.png",
        }
    }
}

/// A moving hazard
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstacle {
    pub rect: Rect,
    /// Horizontal velocity in px per tick (sign is direction)
    pub speed: f32,
    /// Lane slot this obstacle belongs to
    pub lane: u32,
    pub skin: ObstacleSkin,
}

impl Obstacle {
    /// Move horizontally, wrapping around the canvas edges
    pub fn advance(&mut self, canvas_width: f32) {
        self.rect.pos.x += self.speed;
        if self.rect.x() > canvas_width {
            self.rect.pos.x = -self.rect.width();
        } else if self.rect.right() < 0.0 {
            self.rect.pos.x = canvas_width;
        }
    }

    /// Rightward movers are drawn mirrored; zero speed faces left
    pub fn faces_right(&self) -> bool {
        self.speed > 0.0
    }
}

/// Goal zone colour, chosen per level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GoalColor {
    #[default]
    Blue,
    Green,
    Orange,
    Purple,
    Yellow,
    Cyan,
    Red,
}

impl GoalColor {
    pub fn for_level(level: u32) -> Self {
        match level {
            2 => GoalColor::Green,
            3 => GoalColor::Orange,
            4 => GoalColor::Purple,
            5 => GoalColor::Yellow,
            6 => GoalColor::Cyan,
            7 => GoalColor::Red,
            _ => GoalColor::Blue,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GoalColor::Blue => "blue",
            GoalColor::Green => "green",
            GoalColor::Orange => "orange",
            GoalColor::Purple => "purple",
            GoalColor::Yellow => "yellow",
            GoalColor::Cyan => "cyan",
            GoalColor::Red => "red",
        }
    }
}

/// The target area at the top of the playfield
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoalZone {
    pub rect: Rect,
    pub color: GoalColor,
}

impl Default for GoalZone {
    fn default() -> Self {
        Self {
            rect: Rect::new(GOAL_X, GOAL_Y, GOAL_WIDTH, GOAL_HEIGHT),
            color: GoalColor::default(),
        }
    }
}

/// Borrowed view over any drawable entity
#[derive(Debug, Clone, Copy)]
pub enum Entity<'a> {
    Actor(&'a Actor),
    Obstacle(&'a Obstacle),
    Goal(&'a GoalZone),
}

impl Entity<'_> {
    pub fn rect(&self) -> &Rect {
        match self {
            Entity::Actor(actor) => &actor.rect,
            Entity::Obstacle(obstacle) => &obstacle.rect,
            Entity::Goal(goal) => &goal.rect,
        }
    }
}

/// Something that happened during a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Collision, wall or bounds failure; actor sent back to start
    LifeLost { remaining: u32 },
    /// Goal reached, now playing `level`
    LevelAdvanced { level: u32 },
    /// Goal reached on the final level
    AllLevelsCleared,
    GameOver,
    Restarted,
    SessionEnded,
}

/// Read-only view handed to the renderer after each tick
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot<'a> {
    pub actor: &'a Actor,
    pub obstacles: &'a [Obstacle],
    pub goal: &'a GoalZone,
    pub lives: u32,
    pub elapsed_secs: u64,
    pub level: u32,
    pub phase: GamePhase,
}

fn fresh_rng() -> Pcg32 {
    Pcg32::seed_from_u64(0)
}

/// Complete game state for one session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Rules and tuning this session was started with
    pub settings: Settings,
    /// Lane partition of the playfield
    pub layout: LaneLayout,
    /// Current level (1-based)
    pub level: u32,
    /// Player lives
    pub lives: u32,
    /// Ticks since the run (re)started
    pub time_ticks: u64,
    pub phase: GamePhase,
    pub actor: Actor,
    pub goal: GoalZone,
    /// Live obstacle set, replaced wholesale on regeneration
    pub obstacles: Vec<Obstacle>,
    /// Events raised by the most recent tick
    #[serde(skip)]
    pub events: Vec<GameEvent>,
    #[serde(skip, default = "fresh_rng")]
    rng: Pcg32,
}

impl GameState {
    /// Create a new game state with default settings and the given seed
    pub fn new(seed: u64) -> Self {
        Self::with_settings(seed, Settings::default())
    }

    /// Create a new game state, generating level 1 lanes
    pub fn with_settings(seed: u64, settings: Settings) -> Self {
        let lives = settings.starting_lives;
        let mut state = Self {
            seed,
            settings,
            layout: LaneLayout::default(),
            level: 1,
            lives,
            time_ticks: 0,
            phase: GamePhase::Playing,
            actor: Actor::default(),
            goal: GoalZone::default(),
            obstacles: Vec::new(),
            events: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
        };

        state.regenerate_lanes();
        state
    }

    /// Playfield size
    pub fn canvas(&self) -> Vec2 {
        Vec2::new(CANVAS_WIDTH, CANVAS_HEIGHT)
    }

    /// The whole canvas as a rectangle
    pub fn playfield(&self) -> Rect {
        Rect::new(0.0, 0.0, CANVAS_WIDTH, CANVAS_HEIGHT)
    }

    pub fn rng(&mut self) -> &mut Pcg32 {
        &mut self.rng
    }

    /// Whole seconds since the run (re)started
    pub fn elapsed_secs(&self) -> u64 {
        self.time_ticks / u64::from(TICKS_PER_SECOND)
    }

    /// Send the actor back to the start tile
    pub fn reset_actor(&mut self) {
        self.actor.reset_position(ACTOR_START_X, ACTOR_START_Y);
    }

    /// Throw away every obstacle and lay out lanes for the current level
    pub fn regenerate_lanes(&mut self) {
        self.obstacles = generate_lanes(
            &self.layout,
            &self.settings.lanes,
            self.level,
            CANVAS_WIDTH,
            &mut self.rng,
        );
        self.actor.carry_speed = None;
        log::info!(
            "Level {} lanes: {} obstacles",
            self.level,
            self.obstacles.len()
        );
    }

    /// Recolour the goal and reskin obstacles for `level`
    pub fn apply_level_theme(&mut self, level: u32) {
        self.goal.color = GoalColor::for_level(level);
        let skin = ObstacleSkin::for_level(level);
        for obstacle in &mut self.obstacles {
            obstacle.skin = skin;
        }
    }

    /// Entities in draw order
    pub fn entities(&self) -> impl Iterator<Item = Entity<'_>> {
        std::iter::once(Entity::Actor(&self.actor))
            .chain(self.obstacles.iter().map(Entity::Obstacle))
            .chain(std::iter::once(Entity::Goal(&self.goal)))
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            actor: &self.actor,
            obstacles: &self.obstacles,
            goal: &self.goal,
            lives: self.lives,
            elapsed_secs: self.elapsed_secs(),
            level: self.level,
            phase: self.phase,
        }
    }
}

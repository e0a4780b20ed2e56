//! Procedural obstacle lane generation
//!
//! The playfield is split into equal-height lane slots. A fixed subset of
//! slots hosts traffic; each active slot gets two rows of obstacles that share
//! a speed and count but are spaced independently. Difficulty scales with the
//! level through both speed bias and obstacle count.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::rect::Rect;
use super::state::{Obstacle, ObstacleSkin};
use crate::consts::*;
use crate::settings::LaneTuning;

/// Rows per active lane slot
pub const ROWS_PER_LANE: usize = 2;
/// Smallest inter-obstacle gap the spacing math may produce
pub const MIN_GAP: f32 = 1.0;

/// Vertical partition of the playfield into lane slots
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LaneLayout {
    /// Ordered slot identifiers, top to bottom
    pub slots: Vec<u32>,
    /// Slot identifiers that host obstacles
    pub active: Vec<u32>,
    /// Height of one slot
    pub lane_height: f32,
    /// Extra padding added per slot when placing rows
    pub row_gap: f32,
    /// Constant shift applied to every row
    pub row_offset: f32,
    pub obstacle_width: f32,
    pub obstacle_height: f32,
}

impl Default for LaneLayout {
    fn default() -> Self {
        Self {
            slots: (1..=LANE_SLOTS as u32).collect(),
            active: ACTIVE_LANE_SLOTS.to_vec(),
            lane_height: CANVAS_HEIGHT / LANE_SLOTS as f32,
            row_gap: 5.0,
            row_offset: -140.0,
            obstacle_width: OBSTACLE_WIDTH,
            obstacle_height: OBSTACLE_HEIGHT,
        }
    }
}

impl LaneLayout {
    pub fn is_active(&self, slot: u32) -> bool {
        self.active.contains(&slot)
    }

    /// Top edge of the lower row for the slot at `index`
    pub fn row_top(&self, index: usize) -> f32 {
        let i = index as f32;
        self.lane_height * i + self.row_gap * (i + 1.0) + 2.0 * self.lane_height + self.row_offset
    }

    /// Top edge of the row whose upward hop starts a carry
    pub fn carry_row_top(&self, actor_height: f32) -> f32 {
        2.0 * self.lane_height - actor_height
    }

    /// Largest per-row count that still leaves room to wrap
    pub fn max_obstacles_per_row(&self, canvas_width: f32) -> u32 {
        let fit = (canvas_width / self.obstacle_width).floor() as u32;
        fit.saturating_sub(1).max(1)
    }
}

/// Inclusive speed range (px per tick) for a level
pub fn speed_range(tuning: &LaneTuning, level: u32) -> (f32, f32) {
    let (lo, hi) = ordered(tuning.min_speed, tuning.max_speed);
    let bias = level as f32 * tuning.level_speed_factor;
    (lo as f32 + bias, hi as f32 + bias)
}

/// Build a fresh obstacle set for `level`
pub fn generate_lanes<R: Rng>(
    layout: &LaneLayout,
    tuning: &LaneTuning,
    level: u32,
    canvas_width: f32,
    rng: &mut R,
) -> Vec<Obstacle> {
    let skin = ObstacleSkin::for_level(level);
    let max_count = layout.max_obstacles_per_row(canvas_width);
    let mut obstacles = Vec::new();

    for (index, &slot) in layout.slots.iter().enumerate() {
        if !layout.is_active(slot) {
            continue;
        }

        let lower_row = layout.row_top(index);
        let speed = lane_speed(tuning, level, rng);
        let count = obstacle_count(tuning, level, max_count, rng);

        for row in 0..ROWS_PER_LANE {
            let y = lower_row - row as f32 * layout.obstacle_height;
            let offsets = row_offsets(
                count,
                layout.obstacle_width,
                canvas_width,
                tuning.spacing_bias,
                rng,
            );
            obstacles.extend(offsets.into_iter().map(|x| Obstacle {
                rect: Rect::new(x, y, layout.obstacle_width, layout.obstacle_height),
                speed,
                lane: slot,
                skin,
            }));
        }
    }

    log::debug!(
        "Generated {} obstacles for level {} ({:?})",
        obstacles.len(),
        level,
        skin
    );
    obstacles
}

fn lane_speed<R: Rng>(tuning: &LaneTuning, level: u32, rng: &mut R) -> f32 {
    let (lo, hi) = ordered(tuning.min_speed, tuning.max_speed);
    rng.random_range(lo..=hi) as f32 + level as f32 * tuning.level_speed_factor
}

fn obstacle_count<R: Rng>(
    tuning: &LaneTuning,
    level: u32,
    max_count: u32,
    rng: &mut R,
) -> u32 {
    let (lo, hi) = ordered(tuning.min_count, tuning.max_count);
    let drawn = rng.random_range(lo..=hi).saturating_add(level);
    drawn.clamp(1, max_count.max(1))
}

/// Left edges for one row of `count` obstacles, folded into `[-width, canvas_width)`
///
/// Gaps are irregular but bounded. If the row would not fit the wrap loop,
/// every gap after the first shrinks proportionally so no two obstacles start
/// overlapped, including across the wrap seam.
fn row_offsets<R: Rng>(
    count: u32,
    width: f32,
    canvas_width: f32,
    bias: f32,
    rng: &mut R,
) -> Vec<f32> {
    let count = count.max(1);
    let occupied = count as f32 * width;
    let min_gap = ((canvas_width - occupied) / (count as f32 + 1.0)).max(MIN_GAP);
    let max_gap = min_gap * 2.0;
    let jitter = (max_gap - min_gap).floor().max(0.0) as u32;
    let bias = bias.max(0.0);

    let mut gaps: Vec<f32> = (0..count)
        .map(|_| min_gap + rng.random_range(0..=jitter) as f32 + bias)
        .collect();

    let loop_len = canvas_width + width;
    let room = loop_len - occupied;
    let tail: f32 = gaps[1..].iter().sum();
    if tail > room && tail > 0.0 {
        let scale = room.max(0.0) / tail;
        for gap in &mut gaps[1..] {
            *gap *= scale;
        }
    }

    let mut x = 0.0;
    gaps.iter()
        .enumerate()
        .map(|(i, gap)| {
            if i > 0 {
                x += width;
            }
            x += gap;
            (x + width).rem_euclid(loop_len) - width
        })
        .collect()
}

fn ordered<T: PartialOrd>(a: T, b: T) -> (T, T) {
    if a <= b { (a, b) } else { (b, a) }
}

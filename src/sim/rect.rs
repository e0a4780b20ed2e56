//! Axis-aligned rectangle geometry
//!
//! Every entity in the playfield is a box in screen space (y grows downward).
//! Collision is plain AABB overlap; touching edges never count.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle anchored at its top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// Top-left corner
    pub pos: Vec2,
    /// Width and height (always non-negative)
    pub size: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(width, height),
        }
    }

    #[inline]
    pub fn x(&self) -> f32 {
        self.pos.x
    }

    #[inline]
    pub fn y(&self) -> f32 {
        self.pos.y
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.size.x
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.size.y
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    /// True iff both rectangles overlap with positive area on both axes
    pub fn intersects(&self, other: &Rect) -> bool {
        let overlap_x = self.right().min(other.right()) - self.x().max(other.x());
        let overlap_y = self.bottom().min(other.bottom()) - self.y().max(other.y());
        overlap_x > 0.0 && overlap_y > 0.0
    }

    /// True iff `other` lies entirely inside this rectangle (edges inclusive)
    pub fn contains_rect(&self, other: &Rect) -> bool {
        other.x() >= self.x()
            && other.right() <= self.right()
            && other.y() >= self.y()
            && other.bottom() <= self.bottom()
    }

    /// Whether the left edge sits inside `[min_x, max_x]`
    pub fn within_x(&self, min_x: f32, max_x: f32) -> bool {
        self.x() >= min_x && self.x() <= max_x
    }
}

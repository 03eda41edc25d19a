//! Axis-aligned box collision
//!
//! Every entity collides as a rectangle built from its position (top-left)
//! and its sprite frame size.

use glam::Vec2;

/// Axis-aligned rectangle in canvas coordinates (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl Rect {
    pub fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Rectangle spanning `pos .. pos + size`
    #[inline]
    pub fn from_pos_size(pos: Vec2, size: Vec2) -> Self {
        Self::new(pos.x, pos.y, pos.x + size.x, pos.y + size.y)
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }

    #[inline]
    pub fn origin(&self) -> Vec2 {
        Vec2::new(self.left, self.top)
    }
}

/// Overlap test between two rectangles
///
/// A pair does not collide when `a` lies entirely left of, right of, above or
/// below `b`. The right/bottom comparisons are inclusive and the left/top ones
/// strict, so `a.right == b.left` is a miss while `a.left == b.right` is not.
/// Keep this exact form: outcomes at boundary distances depend on it.
#[inline]
pub fn collides(a: &Rect, b: &Rect) -> bool {
    !(a.right <= b.left || a.left > b.right || a.bottom <= b.top || a.top > b.bottom)
}

/// Overlap test for two `position + size` boxes
#[inline]
pub fn box_collides(pos: Vec2, size: Vec2, pos2: Vec2, size2: Vec2) -> bool {
    collides(
        &Rect::from_pos_size(pos, size),
        &Rect::from_pos_size(pos2, size2),
    )
}

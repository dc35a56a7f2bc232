//! Axis-aligned rectangle geometry
//!
//! Rectangles live in arena space: origin at the top-left corner of the
//! arena, x grows to the right and y grows downward.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned bounding rectangle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// Top-left corner
    pub pos: Vec2,
    /// Width and height
    pub size: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(width, height),
        }
    }

    /// Rectangle of the given size centered on `center`
    pub fn from_center(center: Vec2, size: Vec2) -> Self {
        Self {
            pos: center - size / 2.0,
            size,
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.pos.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.pos + self.size / 2.0
    }

    /// Copy of this rectangle shifted by `delta`
    #[inline]
    pub fn translated(&self, delta: Vec2) -> Self {
        Self {
            pos: self.pos + delta,
            size: self.size,
        }
    }

    /// Copy of this rectangle re-centered on `center`
    pub fn moved_to_center(&self, center: Vec2) -> Self {
        Self::from_center(center, self.size)
    }

    /// True if the rectangle lies entirely inside `[0, width] x [0, height]`
    pub fn contained_in(&self, width: f32, height: f32) -> bool {
        self.left() >= 0.0 && self.top() >= 0.0 && self.right() <= width && self.bottom() <= height
    }

    /// True if any part of the rectangle is inside the arena
    pub fn intersects_arena(&self, width: f32, height: f32) -> bool {
        self.right() > 0.0 && self.left() < width && self.bottom() > 0.0 && self.top() < height
    }

    /// Shift the rectangle the minimum amount needed to fit inside the arena
    pub fn clamped_to(&self, width: f32, height: f32) -> Self {
        let max_x = (width - self.size.x).max(0.0);
        let max_y = (height - self.size.y).max(0.0);
        Self {
            pos: Vec2::new(self.pos.x.clamp(0.0, max_x), self.pos.y.clamp(0.0, max_y)),
            size: self.size,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edges_and_center() {
        let r = Rect::new(10.0, 20.0, 30.0, 40.0);
        assert_eq!(r.left(), 10.0);
        assert_eq!(r.right(), 40.0);
        assert_eq!(r.top(), 20.0);
        assert_eq!(r.bottom(), 60.0);
        assert_eq!(r.center(), Vec2::new(25.0, 40.0));

        let c = Rect::from_center(Vec2::new(25.0, 40.0), Vec2::new(30.0, 40.0));
        assert_eq!(c, r);
    }

    #[test]
    fn test_containment() {
        assert!(Rect::new(0.0, 0.0, 800.0, 600.0).contained_in(800.0, 600.0));
        assert!(!Rect::new(-1.0, 0.0, 10.0, 10.0).contained_in(800.0, 600.0));
        assert!(!Rect::new(795.0, 0.0, 10.0, 10.0).contained_in(800.0, 600.0));

        // Partially off-screen still intersects; fully off-screen does not
        assert!(Rect::new(-5.0, 0.0, 10.0, 10.0).intersects_arena(800.0, 600.0));
        assert!(!Rect::new(0.0, -10.0, 10.0, 10.0).intersects_arena(800.0, 600.0));
    }

    #[test]
    fn test_clamped_to() {
        let r = Rect::new(-20.0, 590.0, 60.0, 40.0).clamped_to(800.0, 600.0);
        assert_eq!(r.pos, Vec2::new(0.0, 560.0));
        assert!(r.contained_in(800.0, 600.0));
    }
}

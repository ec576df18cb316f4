//! Axis-aligned rectangle geometry for hit areas and screen bounds
//!
//! Rectangles are stored as top-left corner plus size, y pointing down.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0, 0.0);

    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Zero-area rectangles never take part in collisions
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// The same rectangle moved by `offset` (relative hit area → world space)
    #[inline]
    pub fn translated(&self, offset: Vec2) -> Self {
        Self::new(self.x + offset.x, self.y + offset.y, self.width, self.height)
    }

    /// Strict overlap test; touching edges do not intersect
    pub fn intersects(&self, other: &Rect) -> bool {
        let horizontal = other.left() < self.right() && self.left() < other.right();
        let vertical = other.top() < self.bottom() && self.top() < other.bottom();
        horizontal && vertical
    }

    /// True if this rectangle lies entirely outside `bound`
    ///
    /// A rectangle sharing only an edge with the bound still counts as inside.
    pub fn is_outside(&self, bound: &Rect) -> bool {
        let horizontal = self.right() < bound.left() || self.left() > bound.right();
        let vertical = self.bottom() < bound.top() || self.top() > bound.bottom();
        horizontal || vertical
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intersects_overlap() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(5.0, 5.0, 10.0, 10.0);
        assert!(a.intersects(&b));
        assert!(b.intersects(&a));
    }

    #[test]
    fn test_touching_edges_do_not_intersect() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(10.0, 0.0, 10.0, 10.0);
        assert!(!a.intersects(&b));
    }

    #[test]
    fn test_is_outside() {
        let screen = Rect::new(0.0, 0.0, 800.0, 600.0);
        assert!(!Rect::new(100.0, 100.0, 8.0, 8.0).is_outside(&screen));
        // Partially outside is still inside
        assert!(!Rect::new(-4.0, 100.0, 8.0, 8.0).is_outside(&screen));
        assert!(Rect::new(-9.0, 100.0, 8.0, 8.0).is_outside(&screen));
        assert!(Rect::new(100.0, 601.0, 8.0, 8.0).is_outside(&screen));
        // Edge contact counts as inside
        assert!(!Rect::new(800.0, 100.0, 8.0, 8.0).is_outside(&screen));
    }

    #[test]
    fn test_translated() {
        let hit = Rect::new(4.0, 0.0, 8.0, 16.0);
        let world = hit.translated(Vec2::new(100.0, 50.0));
        assert_eq!(world, Rect::new(104.0, 50.0, 8.0, 16.0));
    }

    #[test]
    fn test_empty() {
        assert!(Rect::ZERO.is_empty());
        assert!(!Rect::new(0.0, 0.0, 1.0, 1.0).is_empty());
    }
}

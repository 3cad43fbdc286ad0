//! Axis-aligned bounding boxes
//!
//! Every entity in the simulation is a box anchored at its top-left corner,
//! in pixel space with y growing downward.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    /// Top-left corner
    pub pos: Vec2,
    /// Width and height
    pub size: Vec2,
}

impl Aabb {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self { pos, size }
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

    pub fn center(&self) -> Vec2 {
        self.pos + self.size * 0.5
    }

    /// Strict overlap test; touching edges do not count
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.left() < other.right()
            && self.right() > other.left()
            && self.top() < other.bottom()
            && self.bottom() > other.top()
    }

    /// Width of the shared horizontal span (0 when disjoint)
    pub fn horizontal_overlap(&self, other: &Aabb) -> f32 {
        (self.right().min(other.right()) - self.left().max(other.left())).max(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edges() {
        let b = Aabb::new(Vec2::new(10.0, 20.0), Vec2::new(16.0, 32.0));
        assert_eq!(b.left(), 10.0);
        assert_eq!(b.right(), 26.0);
        assert_eq!(b.top(), 20.0);
        assert_eq!(b.bottom(), 52.0);
        assert_eq!(b.center(), Vec2::new(18.0, 36.0));
    }

    #[test]
    fn test_touching_is_not_overlap() {
        let a = Aabb::new(Vec2::new(0.0, 0.0), Vec2::splat(16.0));
        let right = Aabb::new(Vec2::new(16.0, 0.0), Vec2::splat(16.0));
        let below = Aabb::new(Vec2::new(0.0, 16.0), Vec2::splat(16.0));
        assert!(!a.overlaps(&right));
        assert!(!a.overlaps(&below));
        assert!(a.overlaps(&Aabb::new(Vec2::new(15.0, 15.0), Vec2::splat(16.0))));
    }

    #[test]
    fn test_horizontal_overlap() {
        let a = Aabb::new(Vec2::new(94.0, 0.0), Vec2::splat(16.0));
        let b = Aabb::new(Vec2::new(100.0, 50.0), Vec2::splat(16.0));
        assert_eq!(a.horizontal_overlap(&b), 10.0);
        assert_eq!(b.horizontal_overlap(&a), 10.0);
        let far = Aabb::new(Vec2::new(200.0, 0.0), Vec2::splat(16.0));
        assert_eq!(a.horizontal_overlap(&far), 0.0);
    }
}

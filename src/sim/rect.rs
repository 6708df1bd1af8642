//! Axis-aligned rectangle geometry for hitboxes and world bounds
//!
//! Screen-space convention: origin at top-left, +x right, +y down.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// Top-left corner
    pub min: Vec2,
    /// Bottom-right corner
    pub max: Vec2,
}

impl Rect {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self {
            min: min.min(max),
            max: min.max(max),
        }
    }

    /// Rectangle of `size` at the origin
    pub fn from_size(size: Vec2) -> Self {
        Self::new(Vec2::ZERO, size)
    }

    /// Rectangle of `size` placed so that the normalized `origin` point
    /// (0,0 = top-left, 1,1 = bottom-right) sits at `anchor`
    pub fn from_anchor(anchor: Vec2, size: Vec2, origin: Vec2) -> Self {
        let min = anchor - size * origin;
        Self::new(min, min + size)
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.min.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.max.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.min.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.max.y
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    /// Strict overlap test: rectangles that only share an edge do not overlap
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
    }

    pub fn contains_point(&self, point: Vec2) -> bool {
        point.x >= self.min.x && point.x <= self.max.x && point.y >= self.min.y && point.y <= self.max.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_anchor_bottom_center() {
        let r = Rect::from_anchor(Vec2::new(100.0, 400.0), Vec2::splat(64.0), Vec2::new(0.5, 1.0));
        assert_eq!(r.min, Vec2::new(68.0, 336.0));
        assert_eq!(r.max, Vec2::new(132.0, 400.0));
        assert_eq!(r.center(), Vec2::new(100.0, 368.0));
    }

    #[test]
    fn test_overlap_and_touching() {
        let a = Rect::new(Vec2::ZERO, Vec2::splat(10.0));
        let b = Rect::new(Vec2::splat(5.0), Vec2::splat(15.0));
        let c = Rect::new(Vec2::new(10.0, 0.0), Vec2::new(20.0, 10.0));
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
        assert!(!a.overlaps(&c), "shared edge is not an overlap");
    }

    #[test]
    fn test_new_normalizes_corners() {
        let r = Rect::new(Vec2::new(10.0, 10.0), Vec2::ZERO);
        assert_eq!(r.min, Vec2::ZERO);
        assert_eq!(r.width(), 10.0);
        assert!(r.contains_point(Vec2::splat(5.0)));
    }
}

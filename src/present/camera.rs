//! Viewport that follows the player inside the world bounds

use glam::Vec2;

use crate::sim::{GameSession, Rect};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub viewport: Vec2,
    pub bounds: Rect,
    /// World position of the viewport's top-left corner
    pub scroll: Vec2,
}

impl Camera {
    pub fn new(viewport: Vec2, bounds: Rect) -> Self {
        Self {
            viewport,
            bounds,
            scroll: bounds.min,
        }
    }

    /// Camera for a session's world and viewport
    pub fn for_session(session: &GameSession) -> Self {
        Self::new(session.tuning.viewport_size, session.world_bounds)
    }

    /// Center on `target`, clamped so the viewport never leaves the bounds
    pub fn follow(&mut self, target: Vec2) -> Vec2 {
        let max = (self.bounds.max - self.viewport).max(self.bounds.min);
        self.scroll = (target - self.viewport * 0.5).clamp(self.bounds.min, max);
        self.scroll
    }
}

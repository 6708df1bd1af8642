//! Arcade physics world
//!
//! Gravity, velocity integration, world-bounds collision with bounce and
//! out-of-bounds culling. Bodies do not push each other: overlaps between
//! bodies are only reported (see [`super::collision`]).

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::rect::Rect;

/// Normalized origin for a box anchored at its center
pub const ORIGIN_CENTER: Vec2 = Vec2::new(0.5, 0.5);
/// Normalized origin for a box anchored at its bottom-center (feet)
pub const ORIGIN_BOTTOM_CENTER: Vec2 = Vec2::new(0.5, 1.0);

/// A simulated body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Body {
    /// Anchor position (the point `origin` refers to)
    pub pos: Vec2,
    /// Velocity (units/s)
    pub vel: Vec2,
    /// Hitbox size
    pub size: Vec2,
    /// Normalized anchor within the hitbox
    pub origin: Vec2,
    /// Whether world gravity accelerates this body
    pub allow_gravity: bool,
    /// Not displaced by collisions
    pub immovable: bool,
    /// Clamp to world bounds instead of leaving them
    pub collide_world_bounds: bool,
    /// Restitution against world bounds (0 = dead stop)
    pub bounce: f32,
    /// Remove automatically once the anchor leaves the world bounds
    pub out_of_bounds_kill: bool,
    /// Resting on the world floor after the last step.
    /// `None` until the world has resolved bounds for this body at least once.
    pub blocked_down: Option<bool>,
}

impl Body {
    pub fn new(pos: Vec2, size: Vec2, origin: Vec2) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            size,
            origin,
            allow_gravity: true,
            immovable: false,
            collide_world_bounds: false,
            bounce: 0.0,
            out_of_bounds_kill: false,
            blocked_down: None,
        }
    }

    /// Current hitbox
    pub fn bounds(&self) -> Rect {
        Rect::from_anchor(self.pos, self.size, self.origin)
    }

    /// Move so the hitbox min corner lands on `min`
    fn set_min(&mut self, min: Vec2) {
        self.pos = min + self.size * self.origin;
    }
}

/// The physics world every body is stepped through
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArcadeWorld {
    pub gravity: f32,
    pub bounds: Rect,
    paused: bool,
}

impl ArcadeWorld {
    pub fn new(gravity: f32, bounds: Rect) -> Self {
        Self {
            gravity,
            bounds,
            paused: false,
        }
    }

    /// Freeze all integration. There is no resume.
    pub fn pause(&mut self) {
        self.paused = true;
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Integrate one body by `dt` seconds (semi-implicit Euler)
    pub fn step_body(&self, body: &mut Body, dt: f32) {
        if self.paused {
            return;
        }

        if body.allow_gravity {
            body.vel.y += self.gravity * dt;
        }
        body.pos += body.vel * dt;

        if body.collide_world_bounds {
            self.resolve_bounds(body, dt);
        }
    }

    /// Clamp a body inside the world, reflecting velocity with its bounce
    fn resolve_bounds(&self, body: &mut Body, dt: f32) {
        let rect = body.bounds();
        let mut min = rect.min;
        let mut blocked_down = false;

        if rect.left() < self.bounds.left() {
            min.x = self.bounds.left();
            body.vel.x = -body.vel.x * body.bounce;
        } else if rect.right() > self.bounds.right() {
            min.x = self.bounds.right() - rect.width();
            body.vel.x = -body.vel.x * body.bounce;
        }

        if rect.top() < self.bounds.top() {
            min.y = self.bounds.top();
            body.vel.y = -body.vel.y * body.bounce;
        } else if rect.bottom() >= self.bounds.bottom() {
            min.y = self.bounds.bottom() - rect.height();
            if body.vel.y > 0.0 {
                body.vel.y = -body.vel.y * body.bounce;
                // Rebounds smaller than one tick of gravity would only jitter
                if body.vel.y.abs() < self.gravity * dt {
                    body.vel.y = 0.0;
                }
            }
            blocked_down = true;
        }

        body.set_min(min);
        body.blocked_down = Some(blocked_down);
    }

    /// Whether an out-of-bounds-kill body has left the world
    pub fn should_cull(&self, body: &Body) -> bool {
        body.out_of_bounds_kill && !self.bounds.contains_point(body.pos)
    }
}

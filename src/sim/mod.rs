//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Explicit tick entry point, no frame-rate assumption
//! - Timers dispatched between ticks, never mid-tick
//! - Stable iteration order (by entity ID)
//! - No rendering or platform dependencies

pub mod clock;
pub mod collision;
pub mod physics;
pub mod rect;
pub mod state;
pub mod tick;

pub use clock::{Clock, TimerId, TimerQueue};
pub use collision::{CollisionResult, first_collision, player_obstacle_collision};
pub use physics::{ArcadeWorld, Body};
pub use rect::Rect;
pub use state::{AnimState, GameEvent, GameSession, Obstacle, ObstaclePool, Player};
pub use tick::{InputLatch, TickInput, tick};

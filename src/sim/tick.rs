//! Fixed timestep simulation tick
//!
//! Core game loop that advances the session by one step. Order per tick:
//! background scroll, player intent, physics integration and culling,
//! collision query, then either game over or score.

use super::collision::first_collision;
use super::state::{GameEvent, GameSession};

/// Input snapshot for a single tick (deterministic)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Jump key is down this tick
    pub jump_pressed: bool,
    /// Jump key was already down on the previous tick
    pub jump_held: bool,
}

impl TickInput {
    /// Rising edge: pressed now, not held over from the last tick
    #[inline]
    pub fn jump_just_pressed(&self) -> bool {
        self.jump_pressed && !self.jump_held
    }
}

/// Turns raw key-down samples into [`TickInput`] snapshots.
///
/// Host frames and ticks do not line up: a frame may run no tick at all.
/// A press seen by such a frame stays pending until a tick consumes it.
#[derive(Debug, Clone, Default)]
pub struct InputLatch {
    down: bool,
    pending_press: bool,
}

impl InputLatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the key state seen by a host frame
    pub fn observe(&mut self, down: bool) {
        if down && !self.down {
            self.pending_press = true;
        }
        self.down = down;
    }

    /// Snapshot for the next tick, consuming any pending press
    pub fn next_tick(&mut self) -> TickInput {
        let pressed = std::mem::take(&mut self.pending_press);
        TickInput {
            jump_pressed: pressed || self.down,
            jump_held: self.down && !pressed,
        }
    }

    /// Observe `down` and snapshot it for one tick
    pub fn sample(&mut self, down: bool) -> TickInput {
        self.observe(down);
        self.next_tick()
    }
}

/// Advance the session by one fixed timestep.
///
/// Does nothing once the run is over. A non-finite or negative `dt` leaves
/// the session untouched.
pub fn tick(session: &mut GameSession, input: &TickInput, dt: f32) {
    if session.game_over {
        return;
    }
    if !dt.is_finite() || dt < 0.0 {
        log::warn!("Ignoring tick with invalid dt {dt}");
        return;
    }

    session.time_ticks += 1;

    // Fixed per-tick scroll, intentionally not scaled by dt
    session.background_offset += session.tuning.background_scroll_per_tick;

    // Player intent uses the grounded flag physics reported last step
    let grounded = session.player.grounded();
    if session
        .player
        .update(input, grounded, session.tuning.jump_velocity)
    {
        log::debug!("Player jumped on tick {}", session.time_ticks);
        session.events.push(GameEvent::PlayerJumped);
    }
    session.player.advance_animation(dt);

    // Physics
    session.world.step_body(&mut session.player.body, dt);
    for obstacle in session.obstacles.iter_mut() {
        session.world.step_body(&mut obstacle.body, dt);
    }
    for id in session.obstacles.cull(&session.world) {
        log::debug!("Culled obstacle {id}");
        session.events.push(GameEvent::ObstacleCulled { id });
    }

    // Collisions against this tick's positions
    if let Some(hit) = first_collision(&session.player, session.obstacles.iter()) {
        session.hit_by = Some(hit.obstacle_id);
        session.end_game();
        return;
    }

    // Per tick, not per second: faster hosts score faster. Derived from the
    // tick count so long runs do not drift.
    session.scored_ticks += 1;
    session.score = session.scored_ticks as f64 * session.tuning.score_rate;
}

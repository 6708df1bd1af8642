//! Lobster Dash - A side-scrolling auto-runner
//!
//! Core modules:
//! - `sim`: Deterministic simulation (session, player, obstacles, physics, collisions)
//! - `present`: Presentation adapter (renderer/audio seam, camera, event application)
//! - `game`: Host loop glue (clock, input latch, fixed timestep accumulator)
//! - `assets`: Asset manifest and sprite sheet validation
//! - `tuning`: Data-driven game balance
//! - `settings`: Player-facing presentation preferences

pub mod assets;
pub mod game;
pub mod present;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use game::Game;
pub use settings::Settings;
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz, the pace the score rate was tuned for)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest frame the host loop will account for (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// World dimensions
    pub const WORLD_WIDTH: f32 = 1600.0;
    pub const WORLD_HEIGHT: f32 = 400.0;

    /// Camera viewport
    pub const VIEWPORT_WIDTH: f32 = 800.0;
    pub const VIEWPORT_HEIGHT: f32 = 400.0;

    /// Downward acceleration (units/s²)
    pub const GRAVITY: f32 = 800.0;

    /// Player defaults (position is the bottom-center anchor)
    pub const PLAYER_START_X: f32 = 100.0;
    pub const PLAYER_START_Y: f32 = 300.0;
    pub const PLAYER_SIZE: f32 = 64.0;
    /// Vertical velocity applied on jump (negative = up)
    pub const JUMP_VELOCITY: f32 = -450.0;
    /// Restitution when the player lands on the world floor
    pub const PLAYER_BOUNCE: f32 = 0.1;

    /// Obstacle defaults (position is the box center)
    pub const OBSTACLE_SPAWN_X: f32 = 850.0;
    pub const OBSTACLE_SPAWN_Y: f32 = 350.0;
    pub const OBSTACLE_SIZE: f32 = 40.0;
    pub const OBSTACLE_VELOCITY_X: f32 = -200.0;
    /// Real-time interval between obstacle spawns (ms)
    pub const SPAWN_PERIOD_MS: u32 = 1500;

    /// Score added per simulation tick (not scaled by dt)
    pub const SCORE_RATE: f64 = 0.02;
    /// Background tile offset added per simulation tick
    pub const BACKGROUND_SCROLL_PER_TICK: f64 = 4.0;

    /// Tint applied to the player on game over
    pub const HIT_TINT: u32 = 0xff0000;
}

/// Score as shown to the player (whole points only)
#[inline]
pub fn display_score(score: f64) -> u64 {
    score.max(0.0).floor() as u64
}

/// Label shown while the run is in progress
pub fn score_label(score: f64) -> String {
    format!("Score: {}", display_score(score))
}

/// Label shown once the run has ended
pub fn game_over_label(score: f64) -> String {
    format!("Game Over - Score: {}", display_score(score))
}

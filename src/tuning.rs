//! Data-driven game balance
//!
//! Every gameplay number the simulation reads lives here so a run can be
//! re-tuned from JSON without touching code. Missing fields fall back to
//! the defaults in [`crate::consts`].

use std::path::Path;

use anyhow::Context;
use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Gameplay tuning values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Downward acceleration (units/s²)
    pub gravity: f32,
    /// World size (the physics bounds, origin at top-left)
    pub world_size: Vec2,
    /// Camera viewport size
    pub viewport_size: Vec2,

    /// Player spawn anchor (bottom-center)
    pub player_start: Vec2,
    /// Player display and hitbox size
    pub player_size: Vec2,
    /// Vertical velocity applied on jump
    pub jump_velocity: f32,
    /// Restitution on landing
    pub player_bounce: f32,

    /// Obstacle spawn point (box center)
    pub obstacle_spawn: Vec2,
    /// Obstacle display and hitbox size, independent of the source art
    pub obstacle_size: Vec2,
    /// Obstacle horizontal velocity (units/s, negative = leftward)
    pub obstacle_velocity_x: f32,
    /// Obstacle spawn period (ms of clock time)
    pub spawn_period_ms: u32,

    /// Score added per tick
    pub score_rate: f64,
    /// Background offset added per tick
    pub background_scroll_per_tick: f64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            world_size: Vec2::new(WORLD_WIDTH, WORLD_HEIGHT),
            viewport_size: Vec2::new(VIEWPORT_WIDTH, VIEWPORT_HEIGHT),

            player_start: Vec2::new(PLAYER_START_X, PLAYER_START_Y),
            player_size: Vec2::splat(PLAYER_SIZE),
            jump_velocity: JUMP_VELOCITY,
            player_bounce: PLAYER_BOUNCE,

            obstacle_spawn: Vec2::new(OBSTACLE_SPAWN_X, OBSTACLE_SPAWN_Y),
            obstacle_size: Vec2::splat(OBSTACLE_SIZE),
            obstacle_velocity_x: OBSTACLE_VELOCITY_X,
            spawn_period_ms: SPAWN_PERIOD_MS,

            score_rate: SCORE_RATE,
            background_scroll_per_tick: BACKGROUND_SCROLL_PER_TICK,
        }
    }
}

impl Tuning {
    /// Parse tuning from a JSON document
    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        let tuning: Tuning = serde_json::from_str(json).context("invalid tuning JSON")?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load tuning from a JSON file
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read tuning file {}", path.display()))?;
        let tuning = Self::from_json(&json)
            .with_context(|| format!("failed to load tuning from {}", path.display()))?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }

    /// Load tuning, falling back to defaults on any failure
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        match Self::load(path) {
            Ok(tuning) => tuning,
            Err(e) => {
                log::warn!("Using default tuning: {e:#}");
                Self::default()
            }
        }
    }

    /// Reject values the simulation cannot run with
    fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(self.spawn_period_ms > 0, "spawn_period_ms must be positive");
        anyhow::ensure!(
            self.world_size.x > 0.0 && self.world_size.y > 0.0,
            "world_size must be positive"
        );
        anyhow::ensure!(
            self.player_size.x > 0.0 && self.player_size.y > 0.0,
            "player_size must be positive"
        );
        anyhow::ensure!(
            self.obstacle_size.x > 0.0 && self.obstacle_size.y > 0.0,
            "obstacle_size must be positive"
        );
        anyhow::ensure!(self.score_rate >= 0.0, "score_rate must not be negative");
        anyhow::ensure!(
            (0.0..=1.0).contains(&self.player_bounce),
            "player_bounce must be within 0..=1"
        );
        Ok(())
    }
}

//! Player preferences
//!
//! Presentation-only knobs, kept apart from gameplay [`crate::Tuning`] so
//! changing them can never affect the simulation.

use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::consts::HIT_TINT;

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Music volume (0.0 - 1.0)
    pub music_volume: f32,
    /// Silence everything
    pub muted: bool,

    // === Visuals ===
    /// Tint applied to the player when the run ends (0xRRGGBB)
    pub hit_tint: u32,
    /// Show the score label
    pub show_score: bool,

    // === Accessibility ===
    /// Reduced motion (background stays still)
    pub reduced_motion: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            // Audio
            master_volume: 0.8,
            music_volume: 1.0,
            muted: false,

            // Visuals
            hit_tint: HIT_TINT,
            show_score: true,

            // Accessibility
            reduced_motion: false,
        }
    }
}

impl Settings {
    /// Final volume for a music track whose own mix level is `track_volume`
    pub fn effective_music_volume(&self, track_volume: f32) -> f32 {
        if self.muted {
            0.0
        } else {
            (self.master_volume * self.music_volume * track_volume).clamp(0.0, 1.0)
        }
    }

    /// Effective background scroll (respects reduced_motion)
    pub fn effective_background_scroll(&self, offset: f64) -> f64 {
        if self.reduced_motion { 0.0 } else { offset }
    }

    /// Read settings from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read settings {}", path.display()))?;
        serde_json::from_str(&json).with_context(|| format!("invalid settings in {}", path.display()))
    }

    /// Load settings, falling back to defaults
    pub fn load(path: impl AsRef<Path>) -> Self {
        match Self::from_file(path) {
            Ok(settings) => {
                log::info!("Loaded settings");
                settings
            }
            Err(e) => {
                log::info!("Using default settings ({e:#})");
                Self::default()
            }
        }
    }
}

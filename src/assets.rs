//! Asset manifest, animation clips and sprite sheet validation
//!
//! Loading pixels and audio is the host's job. This module only names the
//! assets, describes how the player sheet is sliced into animations, and
//! checks a loaded sheet against that description. Mismatches are warnings:
//! the game runs with whatever frames exist.

use std::fmt;
use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::sim::AnimState;

/// Asset keys the presentation layer uses
pub mod keys {
    pub const BACKGROUND: &str = "background";
    pub const PLAYER: &str = "lobster";
    pub const OBSTACLE: &str = "phone";
    pub const MUSIC: &str = "bgMusic";
}

/// A sprite sheet sliced into equal frames
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpriteSheet {
    pub path: String,
    pub frame_width: u32,
    pub frame_height: u32,
}

/// Where every asset lives
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetManifest {
    pub background: String,
    pub player_sheet: SpriteSheet,
    pub obstacle: String,
    pub music: String,
    /// Music loop volume (0.0 - 1.0), scaled by the player's settings
    pub music_volume: f32,
}

impl Default for AssetManifest {
    fn default() -> Self {
        Self {
            background: "assets/background_brutalist.png".to_string(),
            player_sheet: SpriteSheet {
                path: "assets/lobster_spritesheet.png".to_string(),
                frame_width: 256,
                frame_height: 256,
            },
            obstacle: "assets/phone_obstacle.png".to_string(),
            music: "assets/background_music.mp3".to_string(),
            music_volume: 0.5,
        }
    }
}

impl AssetManifest {
    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        serde_json::from_str(json).context("invalid asset manifest JSON")
    }

    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read asset manifest {}", path.display()))?;
        Self::from_json(&json)
    }
}

/// A run of consecutive frames played at a fixed rate
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnimClip {
    pub first_frame: u32,
    pub last_frame: u32,
    pub frame_rate: f32,
    pub repeat: bool,
}

impl AnimClip {
    /// Four-frame run cycle
    pub const RUN: AnimClip = AnimClip {
        first_frame: 0,
        last_frame: 3,
        frame_rate: 10.0,
        repeat: true,
    };

    /// Single held jump frame
    pub const JUMP: AnimClip = AnimClip {
        first_frame: 4,
        last_frame: 4,
        frame_rate: 10.0,
        repeat: false,
    };

    pub fn for_state(state: AnimState) -> Self {
        match state {
            AnimState::Run => Self::RUN,
            AnimState::Jump => Self::JUMP,
        }
    }

    pub fn len(&self) -> u32 {
        self.last_frame - self.first_frame + 1
    }

    /// Sheet frame to show `elapsed` seconds into the clip
    pub fn frame_at(&self, elapsed: f32) -> u32 {
        let step = (elapsed.max(0.0) * self.frame_rate) as u32;
        let offset = if self.repeat {
            step % self.len()
        } else {
            step.min(self.len() - 1)
        };
        self.first_frame + offset
    }

    /// Restrict the clip to a sheet holding `frame_count` frames
    pub fn clamped(&self, frame_count: u32) -> Option<Self> {
        if self.first_frame >= frame_count {
            return None;
        }
        Some(Self {
            last_frame: self.last_frame.min(frame_count - 1),
            ..*self
        })
    }
}

/// Non-fatal asset problems
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssetWarning {
    /// Sheet dimensions are not a whole number of frames
    SheetNotFrameAligned {
        width: u32,
        height: u32,
        frame_width: u32,
        frame_height: u32,
    },
    /// A clip references frames the sheet does not have
    MissingFrames {
        state: AnimState,
        needed: u32,
        available: u32,
    },
}

impl fmt::Display for AssetWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssetWarning::SheetNotFrameAligned {
                width,
                height,
                frame_width,
                frame_height,
            } => write!(
                f,
                "unexpected sprite sheet dimensions {width}x{height} for {frame_width}x{frame_height} frames"
            ),
            AssetWarning::MissingFrames {
                state,
                needed,
                available,
            } => write!(
                f,
                "{state:?} animation needs {needed} frames, sheet has {available}"
            ),
        }
    }
}

/// Player clips resolved against the loaded sheet
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerClips {
    pub run: Option<AnimClip>,
    pub jump: Option<AnimClip>,
    pub frame_count: u32,
}

impl Default for PlayerClips {
    fn default() -> Self {
        Self {
            run: Some(AnimClip::RUN),
            jump: Some(AnimClip::JUMP),
            frame_count: AnimClip::JUMP.last_frame + 1,
        }
    }
}

impl PlayerClips {
    pub fn clip(&self, state: AnimState) -> Option<AnimClip> {
        match state {
            AnimState::Run => self.run,
            AnimState::Jump => self.jump,
        }
    }

    /// Frame to draw for a state, falling back to frame 0 if the clip is gone
    pub fn frame(&self, state: AnimState, elapsed: f32) -> u32 {
        self.clip(state).map(|c| c.frame_at(elapsed)).unwrap_or(0)
    }
}

/// Check a loaded player sheet of `width`x`height` pixels.
///
/// Each warning is logged; the returned clips only use frames that exist.
pub fn check_player_sheet(sheet: &SpriteSheet, width: u32, height: u32) -> (PlayerClips, Vec<AssetWarning>) {
    let mut warnings = Vec::new();

    let frame_w = sheet.frame_width.max(1);
    let frame_h = sheet.frame_height.max(1);
    if width % frame_w != 0 || height % frame_h != 0 || width < frame_w || height < frame_h {
        warnings.push(AssetWarning::SheetNotFrameAligned {
            width,
            height,
            frame_width: sheet.frame_width,
            frame_height: sheet.frame_height,
        });
    }

    let frame_count = (width / frame_w) * (height / frame_h);
    let mut resolve = |state: AnimState| {
        let clip = AnimClip::for_state(state);
        if clip.last_frame >= frame_count {
            warnings.push(AssetWarning::MissingFrames {
                state,
                needed: clip.last_frame + 1,
                available: frame_count,
            });
        }
        clip.clamped(frame_count)
    };
    let run = resolve(AnimState::Run);
    let jump = resolve(AnimState::Jump);

    for warning in &warnings {
        log::warn!("{}: {}", sheet.path, warning);
    }

    (
        PlayerClips {
            run,
            jump,
            frame_count,
        },
        warnings,
    )
}

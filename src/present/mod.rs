//! Presentation adapter
//!
//! The simulation never draws or plays anything itself. A host implements
//! [`Presenter`] for its renderer/audio backend, and the functions here map
//! session state and [`GameEvent`]s onto it. Presenters only ever read the
//! session.

pub mod camera;
pub mod recording;

pub use camera::Camera;
pub use recording::{PresenterCall, RecordingPresenter};

use glam::Vec2;

use crate::assets::{AssetManifest, PlayerClips, keys};
use crate::settings::Settings;
use crate::sim::{GameEvent, GameSession, Rect};

/// Label the score text is drawn under
pub const SCORE_LABEL: &str = "score";

/// Entity id of the background tile sprite (session ids start at 1)
pub const BACKGROUND_ENTITY: u32 = 0;

/// One sprite to draw this frame (world-space rectangle)
#[derive(Debug, Clone, PartialEq)]
pub struct SpriteDraw {
    pub entity: u32,
    pub texture: &'static str,
    pub frame: u32,
    pub rect: Rect,
}

/// Rendering/audio backend
pub trait Presenter {
    fn render_sprite(&mut self, sprite: &SpriteDraw);
    fn set_text(&mut self, label: &str, text: &str);
    fn play_loop(&mut self, track: &str, volume: f32);
    fn tint_entity(&mut self, entity: u32, color: u32);
    fn stop_animation(&mut self, entity: u32);
    /// Stop presenting motion (the last frame stays on screen)
    fn pause(&mut self);

    /// Horizontal offset of the tiled background
    fn scroll_background(&mut self, _offset: f64) {}

    /// Top-left corner of the viewport in world space
    fn set_camera(&mut self, _scroll: Vec2) {}
}

/// Start-of-session side effects (background music)
pub fn start(presenter: &mut impl Presenter, manifest: &AssetManifest, settings: &Settings) {
    presenter.play_loop(keys::MUSIC, settings.effective_music_volume(manifest.music_volume));
}

/// Draw the current frame. Safe to call after game over: it redraws the
/// frozen state.
pub fn render(
    session: &GameSession,
    clips: &PlayerClips,
    camera: &mut Camera,
    settings: &Settings,
    presenter: &mut impl Presenter,
) {
    let player = &session.player;
    presenter.set_camera(camera.follow(player.bounds().center()));
    presenter.render_sprite(&SpriteDraw {
        entity: BACKGROUND_ENTITY,
        texture: keys::BACKGROUND,
        frame: 0,
        rect: session.world_bounds,
    });
    presenter.scroll_background(settings.effective_background_scroll(session.background_offset));

    presenter.render_sprite(&SpriteDraw {
        entity: player.id,
        texture: keys::PLAYER,
        frame: clips.frame(player.anim, player.anim_elapsed),
        rect: player.bounds(),
    });

    for obstacle in session.obstacles.iter().filter(|o| o.alive) {
        presenter.render_sprite(&SpriteDraw {
            entity: obstacle.id,
            texture: keys::OBSTACLE,
            frame: 0,
            rect: obstacle.bounds(),
        });
    }

    if settings.show_score {
        presenter.set_text(SCORE_LABEL, &session.score_text());
    }
}

/// Apply one-shot events drained from the session
pub fn apply_events(
    events: &[GameEvent],
    session: &GameSession,
    settings: &Settings,
    presenter: &mut impl Presenter,
) {
    for event in events {
        match event {
            GameEvent::GameOver { score, .. } => {
                let player = session.player.id;
                presenter.tint_entity(player, settings.hit_tint);
                presenter.stop_animation(player);
                presenter.pause();
                presenter.set_text(SCORE_LABEL, &crate::game_over_label(*score));
            }
            GameEvent::ObstacleSpawned { .. }
            | GameEvent::ObstacleCulled { .. }
            | GameEvent::PlayerJumped => {}
        }
    }
}

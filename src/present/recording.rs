//! Presenter that records every call, for tests and headless runs

use glam::Vec2;

use super::{Presenter, SpriteDraw};

/// One recorded presenter call
#[derive(Debug, Clone, PartialEq)]
pub enum PresenterCall {
    Sprite(SpriteDraw),
    Text { label: String, text: String },
    PlayLoop { track: String, volume: f32 },
    Tint { entity: u32, color: u32 },
    StopAnimation { entity: u32 },
    Pause,
    Background { offset: f64 },
    Camera { scroll: Vec2 },
}

#[derive(Debug, Clone, Default)]
pub struct RecordingPresenter {
    pub calls: Vec<PresenterCall>,
}

impl RecordingPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last text set for `label`
    pub fn text(&self, label: &str) -> Option<&str> {
        self.calls.iter().rev().find_map(|call| match call {
            PresenterCall::Text { label: l, text } if l == label => Some(text.as_str()),
            _ => None,
        })
    }

    /// Sprites drawn, in order
    pub fn sprites(&self) -> impl Iterator<Item = &SpriteDraw> {
        self.calls.iter().filter_map(|call| match call {
            PresenterCall::Sprite(sprite) => Some(sprite),
            _ => None,
        })
    }

    pub fn count(&self, pred: impl Fn(&PresenterCall) -> bool) -> usize {
        self.calls.iter().filter(|&c| pred(c)).count()
    }

    pub fn clear(&mut self) {
        self.calls.clear();
    }
}

impl Presenter for RecordingPresenter {
    fn render_sprite(&mut self, sprite: &SpriteDraw) {
        self.calls.push(PresenterCall::Sprite(sprite.clone()));
    }

    fn set_text(&mut self, label: &str, text: &str) {
        self.calls.push(PresenterCall::Text {
            label: label.to_string(),
            text: text.to_string(),
        });
    }

    fn play_loop(&mut self, track: &str, volume: f32) {
        self.calls.push(PresenterCall::PlayLoop {
            track: track.to_string(),
            volume,
        });
    }

    fn tint_entity(&mut self, entity: u32, color: u32) {
        self.calls.push(PresenterCall::Tint { entity, color });
    }

    fn stop_animation(&mut self, entity: u32) {
        self.calls.push(PresenterCall::StopAnimation { entity });
    }

    fn pause(&mut self) {
        self.calls.push(PresenterCall::Pause);
    }

    fn scroll_background(&mut self, offset: f64) {
        self.calls.push(PresenterCall::Background { offset });
    }

    fn set_camera(&mut self, scroll: Vec2) {
        self.calls.push(PresenterCall::Camera { scroll });
    }
}

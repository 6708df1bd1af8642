//! Lobster Dash entry point
//!
//! Native headless runner: drives the game loop at a simulated 60 fps with
//! the autopilot at the controls and reports presenter output through the
//! log. Usage:
//! `lobster-dash [seconds] [tuning.json] [settings.json] [assets.json]`.

use glam::Vec2;

use lobster_dash::assets::{AssetManifest, check_player_sheet};
use lobster_dash::game::{Game, autopilot_wants_jump};
use lobster_dash::present::{Presenter, SpriteDraw};
use lobster_dash::{Settings, Tuning};

/// Host frame length used by the headless loop
const FRAME_DT: f32 = 1.0 / 60.0;

/// Presenter that narrates to the log instead of drawing
#[derive(Default)]
struct LogPresenter {
    last_text: String,
}

impl Presenter for LogPresenter {
    fn render_sprite(&mut self, sprite: &SpriteDraw) {
        log::trace!(
            "draw {}#{} frame {} at {:?}",
            sprite.texture,
            sprite.entity,
            sprite.frame,
            sprite.rect.min
        );
    }

    fn set_text(&mut self, label: &str, text: &str) {
        // Only report changes; the HUD is refreshed every frame
        if text != self.last_text {
            log::info!("[{label}] {text}");
            self.last_text = text.to_string();
        }
    }

    fn play_loop(&mut self, track: &str, volume: f32) {
        log::info!("Playing {track} on loop at volume {volume:.2}");
    }

    fn tint_entity(&mut self, entity: u32, color: u32) {
        log::info!("Tint entity {entity} #{color:06x}");
    }

    fn stop_animation(&mut self, entity: u32) {
        log::debug!("Stop animation on entity {entity}");
    }

    fn pause(&mut self) {
        log::info!("Presentation paused");
    }

    fn set_camera(&mut self, scroll: Vec2) {
        log::trace!("camera at {scroll:?}");
    }
}

fn main() -> anyhow::Result<()> {
    #[cfg(not(target_arch = "wasm32"))]
    env_logger::init();
    log::info!("Lobster Dash (headless) starting...");

    let mut args = std::env::args().skip(1);
    let seconds: f32 = match args.next() {
        Some(s) => s.parse()?,
        None => 30.0,
    };
    let tuning = args
        .next()
        .map(Tuning::load_or_default)
        .unwrap_or_default();
    let settings = args.next().map(Settings::load).unwrap_or_default();
    let manifest = match args.next() {
        Some(path) => AssetManifest::load(path)?,
        None => AssetManifest::default(),
    };

    // Headless: pretend the sheet loaded at its expected size
    let sheet = &manifest.player_sheet;
    let (clips, _warnings) = check_player_sheet(sheet, sheet.frame_width * 5, sheet.frame_height);

    let mut game = Game::new(tuning, settings).with_clips(clips);
    let mut presenter = LogPresenter::default();
    game.start(&manifest, &mut presenter);

    let max_frames = (seconds / FRAME_DT).ceil() as u32;
    let mut frames = 0;
    while frames < max_frames {
        let jump = autopilot_wants_jump(&game.session);
        game.update(FRAME_DT, jump);
        game.present(&mut presenter);
        frames += 1;
        if game.is_over() {
            break;
        }
    }

    log::info!(
        "Finished after {:.1}s: {}",
        game.elapsed_ms() / 1000.0,
        game.session.score_text()
    );
    println!("{}", game.session.score_text());
    Ok(())
}

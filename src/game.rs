//! Host loop glue
//!
//! Owns everything around the session that a frame callback needs: the
//! timer queue, the input latch and the fixed timestep accumulator. Timers
//! fire at the start of a frame, before any tick runs.

use crate::assets::{AssetManifest, PlayerClips};
use crate::consts::{MAX_FRAME_DT, MAX_SUBSTEPS, SIM_DT};
use crate::present::{self, Camera, Presenter};
use crate::settings::Settings;
use crate::sim::{GameSession, InputLatch, TimerQueue, tick};
use crate::tuning::Tuning;

/// Gap (obstacle left edge to player right edge) inside which the
/// autopilot jumps
const AUTOPILOT_JUMP_GAP: std::ops::RangeInclusive<f32> = 40.0..=60.0;

/// A running game: session plus host-side plumbing
pub struct Game {
    pub session: GameSession,
    pub settings: Settings,
    pub clips: PlayerClips,
    pub camera: Camera,
    clock: TimerQueue,
    latch: InputLatch,
    accumulator: f32,
}

impl Game {
    pub fn new(tuning: Tuning, settings: Settings) -> Self {
        let mut session = GameSession::new(tuning);
        let mut clock = TimerQueue::new();
        session.register_timers(&mut clock);
        let camera = Camera::for_session(&session);

        log::info!(
            "New session: world {:?}, spawn every {} ms",
            session.tuning.world_size,
            session.tuning.spawn_period_ms
        );

        Self {
            session,
            settings,
            clips: PlayerClips::default(),
            camera,
            clock,
            latch: InputLatch::new(),
            accumulator: 0.0,
        }
    }

    /// Use player clips resolved against the loaded sprite sheet
    pub fn with_clips(mut self, clips: PlayerClips) -> Self {
        self.clips = clips;
        self
    }

    pub fn is_over(&self) -> bool {
        self.session.game_over
    }

    /// Clock time fed to the game so far (ms)
    pub fn elapsed_ms(&self) -> f64 {
        self.clock.now_ms()
    }

    /// Start music and other session-start effects
    pub fn start(&self, manifest: &AssetManifest, presenter: &mut impl Presenter) {
        present::start(presenter, manifest, &self.settings);
    }

    /// Advance by one host frame of `frame_dt` seconds with the jump key
    /// `jump_down`. Returns the number of ticks run.
    pub fn update(&mut self, frame_dt: f32, jump_down: bool) -> u32 {
        let dt = if frame_dt.is_finite() {
            frame_dt.clamp(0.0, MAX_FRAME_DT)
        } else {
            0.0
        };

        // Latch once per frame so a tap in a frame with no tick still counts
        self.latch.observe(jump_down);

        for id in self.clock.advance(f64::from(dt) * 1000.0) {
            self.session.on_timer(id);
        }

        self.accumulator += dt;
        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            let input = self.latch.next_tick();
            tick(&mut self.session, &input, SIM_DT);
            self.accumulator -= SIM_DT;
            substeps += 1;
        }
        if substeps == MAX_SUBSTEPS {
            // Drop the backlog rather than spiral
            self.accumulator = self.accumulator.min(SIM_DT);
        }

        if self.session.game_over {
            if let Some(id) = self.session.spawn_timer() {
                if self.clock.cancel(id) {
                    log::debug!("Spawn timer cancelled");
                }
            }
        }
        substeps
    }

    /// Apply pending events and draw the current frame
    pub fn present(&mut self, presenter: &mut impl Presenter) {
        let events = self.session.drain_events();
        present::apply_events(&events, &self.session, &self.settings, presenter);
        present::render(
            &self.session,
            &self.clips,
            &mut self.camera,
            &self.settings,
            presenter,
        );
    }
}

/// Demo AI: jump when the nearest incoming obstacle is about to arrive
pub fn autopilot_wants_jump(session: &GameSession) -> bool {
    if session.player.grounded() != Some(true) {
        return false;
    }
    let player_right = session.player.bounds().right();
    session
        .obstacles
        .iter()
        .filter(|o| o.alive)
        .map(|o| o.bounds().left() - player_right)
        .filter(|gap| *gap >= 0.0)
        .min_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal))
        .is_some_and(|gap| AUTOPILOT_JUMP_GAP.contains(&gap))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::present::{PresenterCall, RecordingPresenter, SCORE_LABEL};

    fn game() -> Game {
        Game::new(Tuning::default(), Settings::default())
    }

    #[test]
    fn test_spawn_cadence_over_clock_time() {
        let mut game = game();
        // Keep the player out of the lane so nothing ends the run
        game.session.player.body.pos.x = 1200.0;
        let mut spawned = 0;
        for _ in 0..600 {
            game.update(1.0 / 60.0, false);
            spawned += game
                .session
                .drain_events()
                .iter()
                .filter(|e| matches!(e, crate::sim::GameEvent::ObstacleSpawned { .. }))
                .count();
        }
        // 10 s of clock with a 1500 ms period
        assert_eq!(spawned, 6);
        assert!(!game.is_over());
    }

    #[test]
    fn test_fixed_substeps() {
        let mut game = game();
        assert_eq!(game.update(1.0 / 60.0, false), 1);
        assert_eq!(game.update(1.0 / 30.0, false), 2);
        assert_eq!(game.update(0.0, false), 0);
        assert_eq!(game.session.time_ticks, 3);
    }

    #[test]
    fn test_long_frame_is_clamped() {
        let mut game = game();
        let ticks = game.update(5.0, false);
        assert!(ticks <= MAX_SUBSTEPS);
        assert!((game.elapsed_ms() - 100.0).abs() < 1e-3);

        let before = game.elapsed_ms();
        assert!(game.update(f32::NAN, false) <= 1);
        assert_eq!(game.elapsed_ms(), before);
    }

    #[test]
    fn test_held_key_jumps_once() {
        let mut game = game();
        for _ in 0..120 {
            game.update(1.0 / 60.0, false);
        }
        game.session.drain_events();
        for _ in 0..200 {
            game.update(1.0 / 60.0, true);
        }
        let jumps = game
            .session
            .drain_events()
            .iter()
            .filter(|e| matches!(e, crate::sim::GameEvent::PlayerJumped))
            .count();
        assert_eq!(jumps, 1);
    }

    #[test]
    fn test_tap_between_ticks_still_jumps() {
        let mut game = game();
        for _ in 0..120 {
            game.update(1.0 / 60.0, false);
        }
        assert_eq!(game.session.player.grounded(), Some(true));
        game.session.drain_events();

        // A 144 Hz host: the tap frame is shorter than one tick
        assert_eq!(game.update(1.0 / 144.0, true), 0);
        for _ in 0..30 {
            game.update(1.0 / 144.0, false);
        }
        let jumps = game
            .session
            .drain_events()
            .iter()
            .filter(|e| matches!(e, crate::sim::GameEvent::PlayerJumped))
            .count();
        assert_eq!(jumps, 1);
        assert_eq!(game.session.player.grounded(), Some(false));
    }

    #[test]
    fn test_without_input_the_first_obstacle_ends_the_run() {
        let mut game = game();
        let mut presenter = RecordingPresenter::new();
        let mut frames = 0;
        while !game.is_over() && frames < 60 * 10 {
            game.update(1.0 / 60.0, false);
            game.present(&mut presenter);
            frames += 1;
        }
        assert!(game.is_over());
        // Spawn at 1.5 s, ~3.5 s to reach the player
        assert!(frames > 60 * 4 && frames < 60 * 6, "ended after {frames} frames");
        assert_eq!(presenter.count(|c| matches!(c, PresenterCall::Pause)), 1);
        assert!(presenter.text(SCORE_LABEL).is_some_and(|t| t.starts_with("Game Over - Score: ")));

        // Frozen: more frames change nothing
        let score = game.session.score;
        let pos = game.session.player.body.pos;
        let obstacles = game.session.obstacles.len();
        for _ in 0..60 {
            game.update(1.0 / 60.0, true);
        }
        assert_eq!(game.session.score, score);
        assert_eq!(game.session.player.body.pos, pos);
        assert_eq!(game.session.obstacles.len(), obstacles);
        assert_eq!(game.clock.len(), 0, "spawn timer cancelled");
    }

    #[test]
    fn test_autopilot_survives() {
        let mut game = game();
        for _ in 0..60 * 20 {
            let jump = autopilot_wants_jump(&game.session);
            game.update(1.0 / 60.0, jump);
        }
        assert!(!game.is_over(), "autopilot hit obstacle {:?}", game.session.hit_by);
        assert!(game.session.score > 23.0);
    }
}

//! Game state and core simulation types
//!
//! Everything a run needs lives in [`GameSession`]; there is no ambient
//! state. The session is serializable so a host can snapshot it.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::clock::{Clock, TimerId};
use super::physics::{ArcadeWorld, Body, ORIGIN_BOTTOM_CENTER, ORIGIN_CENTER};
use super::rect::Rect;
use super::tick::TickInput;
use crate::tuning::Tuning;

/// Which animation the player is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AnimState {
    #[default]
    Run,
    Jump,
}

/// The player-controlled runner
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub id: u32,
    pub body: Body,
    pub anim: AnimState,
    /// Seconds since the current animation started
    pub anim_elapsed: f32,
    /// False once the animation has been stopped
    pub anim_playing: bool,
    /// Set when an obstacle ended the run
    pub hit: bool,
}

impl Player {
    pub fn new(tuning: &Tuning) -> Self {
        let mut body = Body::new(tuning.player_start, tuning.player_size, ORIGIN_BOTTOM_CENTER);
        body.collide_world_bounds = true;
        body.bounce = tuning.player_bounce;

        Self {
            id: 0,
            body,
            anim: AnimState::Run,
            anim_elapsed: 0.0,
            anim_playing: true,
            hit: false,
        }
    }

    /// Current hitbox
    pub fn bounds(&self) -> Rect {
        self.body.bounds()
    }

    /// Resting on the floor, or `None` while physics has not reported yet
    pub fn grounded(&self) -> Option<bool> {
        self.body.blocked_down
    }

    /// Start an animation unless it is already playing
    pub fn play(&mut self, anim: AnimState) {
        if self.anim == anim && self.anim_playing {
            return;
        }
        self.anim = anim;
        self.anim_elapsed = 0.0;
        self.anim_playing = true;
    }

    /// Freeze the current animation frame
    pub fn stop_animation(&mut self) {
        self.anim_playing = false;
    }

    pub fn advance_animation(&mut self, dt: f32) {
        if self.anim_playing {
            self.anim_elapsed += dt;
        }
    }

    /// Decide this tick's intent: jump on a fresh press while grounded,
    /// otherwise snap back to the run animation whenever grounded.
    ///
    /// Returns true if a jump was triggered.
    pub fn update(&mut self, input: &TickInput, grounded: Option<bool>, jump_velocity: f32) -> bool {
        let Some(grounded) = grounded else {
            return false;
        };

        if input.jump_just_pressed() && grounded {
            self.body.vel.y = jump_velocity;
            self.play(AnimState::Jump);
            true
        } else {
            if grounded {
                self.play(AnimState::Run);
            }
            false
        }
    }
}

/// An incoming obstacle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    pub body: Body,
    pub alive: bool,
}

impl Obstacle {
    pub fn new(id: u32, tuning: &Tuning) -> Self {
        let mut body = Body::new(tuning.obstacle_spawn, tuning.obstacle_size, ORIGIN_CENTER);
        body.vel = Vec2::new(tuning.obstacle_velocity_x, 0.0);
        body.allow_gravity = false;
        body.immovable = true;
        body.out_of_bounds_kill = true;

        Self {
            id,
            body,
            alive: true,
        }
    }

    pub fn bounds(&self) -> Rect {
        self.body.bounds()
    }
}

/// The set of live obstacles
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ObstaclePool {
    obstacles: Vec<Obstacle>,
}

impl ObstaclePool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an obstacle at the spawn point
    pub fn spawn(&mut self, id: u32, tuning: &Tuning) -> &Obstacle {
        self.obstacles.push(Obstacle::new(id, tuning));
        &self.obstacles[self.obstacles.len() - 1]
    }

    /// Remove obstacles the world flags as out of bounds, returning their ids
    pub fn cull(&mut self, world: &ArcadeWorld) -> Vec<u32> {
        let mut culled = Vec::new();
        self.obstacles.retain_mut(|o| {
            if world.should_cull(&o.body) {
                o.alive = false;
                culled.push(o.id);
                false
            } else {
                true
            }
        });
        culled
    }

    pub fn iter(&self) -> impl Iterator<Item = &Obstacle> {
        self.obstacles.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Obstacle> {
        self.obstacles.iter_mut()
    }

    pub fn get(&self, id: u32) -> Option<&Obstacle> {
        self.obstacles.iter().find(|o| o.id == id)
    }

    pub fn len(&self) -> usize {
        self.obstacles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty()
    }
}

/// One-shot things that happened during a tick, for the presentation layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    ObstacleSpawned { id: u32 },
    ObstacleCulled { id: u32 },
    PlayerJumped,
    /// The run ended; `obstacle_id` is the obstacle that was hit, if any
    GameOver { obstacle_id: Option<u32>, score: f64 },
}

/// Complete session state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameSession {
    /// Gameplay numbers this session runs with
    pub tuning: Tuning,
    /// Accumulated score (floor of it is displayed). Recomputed from
    /// `scored_ticks` every tick.
    pub score: f64,
    /// Ticks that have added to the score
    pub scored_ticks: u64,
    /// Terminal flag, never reset
    pub game_over: bool,
    /// Physics bounds of the world
    pub world_bounds: Rect,
    /// Background tile offset
    pub background_offset: f64,
    /// Live ticks simulated
    pub time_ticks: u64,
    pub player: Player,
    pub obstacles: ObstaclePool,
    pub world: ArcadeWorld,
    /// Obstacle that ended the run
    pub hit_by: Option<u32>,
    /// Events since the last drain
    #[serde(skip)]
    pub events: Vec<GameEvent>,
    #[serde(skip)]
    spawn_timer: Option<TimerId>,
    next_id: u32,
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new(Tuning::default())
    }
}

impl GameSession {
    /// Create a session ready for its first tick
    pub fn new(tuning: Tuning) -> Self {
        let world_bounds = Rect::from_size(tuning.world_size);
        let world = ArcadeWorld::new(tuning.gravity, world_bounds);
        let player = Player::new(&tuning);

        let mut session = Self {
            tuning,
            score: 0.0,
            scored_ticks: 0,
            game_over: false,
            world_bounds,
            background_offset: 0.0,
            time_ticks: 0,
            player,
            obstacles: ObstaclePool::new(),
            world,
            hit_by: None,
            events: Vec::new(),
            spawn_timer: None,
            next_id: 1,
        };
        session.player.id = session.next_entity_id();
        session
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Timer registered by [`Self::register_timers`]
    pub fn spawn_timer(&self) -> Option<TimerId> {
        self.spawn_timer
    }

    /// Register the spawn timer with the host clock
    pub fn register_timers(&mut self, clock: &mut impl Clock) -> TimerId {
        let id = clock.schedule(self.tuning.spawn_period_ms, true);
        self.spawn_timer = Some(id);
        id
    }

    /// Dispatch a fired timer. Returns false for timers this session does not own.
    pub fn on_timer(&mut self, id: TimerId) -> bool {
        if self.spawn_timer == Some(id) {
            self.spawn_obstacle();
            true
        } else {
            false
        }
    }

    /// Spawn one obstacle at the spawn point (ignored once the run is over)
    pub fn spawn_obstacle(&mut self) -> Option<u32> {
        if self.game_over {
            return None;
        }
        let id = self.next_entity_id();
        let obstacle = self.obstacles.spawn(id, &self.tuning);
        log::debug!("Spawned obstacle {} at {:?}", id, obstacle.body.pos);
        self.events.push(GameEvent::ObstacleSpawned { id });
        Some(id)
    }

    /// End the run. Idempotent: only the first call has any effect.
    pub fn end_game(&mut self) {
        if self.game_over {
            return;
        }
        self.game_over = true;
        self.world.pause();
        self.player.hit = true;
        self.player.stop_animation();

        log::info!(
            "Game over after {} ticks, score {}",
            self.time_ticks,
            crate::display_score(self.score)
        );
        self.events.push(GameEvent::GameOver {
            obstacle_id: self.hit_by,
            score: self.score,
        });
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Label the HUD should show right now
    pub fn score_text(&self) -> String {
        if self.game_over {
            crate::game_over_label(self.score)
        } else {
            crate::score_label(self.score)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::clock::TimerQueue;

    fn jump() -> TickInput {
        TickInput {
            jump_pressed: true,
            jump_held: false,
        }
    }

    #[test]
    fn test_new_session() {
        let session = GameSession::default();
        assert_eq!(session.score, 0.0);
        assert!(!session.game_over);
        assert!(session.obstacles.is_empty());
        assert_eq!(session.player.anim, AnimState::Run);
        assert_eq!(session.player.grounded(), None);
        assert_eq!(session.world_bounds.max, Vec2::new(1600.0, 400.0));
    }

    #[test]
    fn test_jump_trigger() {
        let mut player = Player::new(&Tuning::default());
        assert!(player.update(&jump(), Some(true), -450.0));
        assert_eq!(player.body.vel.y, -450.0);
        assert_eq!(player.anim, AnimState::Jump);
    }

    #[test]
    fn test_no_double_jump() {
        let mut player = Player::new(&Tuning::default());
        player.body.vel.y = 120.0;
        assert!(!player.update(&jump(), Some(false), -450.0));
        assert_eq!(player.body.vel.y, 120.0);
        assert_eq!(player.anim, AnimState::Run);
    }

    #[test]
    fn test_held_key_does_not_jump() {
        let mut player = Player::new(&Tuning::default());
        let held = TickInput {
            jump_pressed: true,
            jump_held: true,
        };
        assert!(!player.update(&held, Some(true), -450.0));
        assert_eq!(player.body.vel.y, 0.0);
    }

    #[test]
    fn test_unknown_grounded_never_jumps() {
        let mut player = Player::new(&Tuning::default());
        player.anim = AnimState::Jump;
        assert!(!player.update(&jump(), None, -450.0));
        assert_eq!(player.body.vel.y, 0.0);
        assert_eq!(player.anim, AnimState::Jump);
    }

    #[test]
    fn test_landing_recovery() {
        let mut player = Player::new(&Tuning::default());
        player.play(AnimState::Jump);
        player.advance_animation(0.3);
        player.update(&TickInput::default(), Some(true), -450.0);
        assert_eq!(player.anim, AnimState::Run);
        assert_eq!(player.anim_elapsed, 0.0);
    }

    #[test]
    fn test_play_ignores_if_playing() {
        let mut player = Player::new(&Tuning::default());
        player.advance_animation(0.25);
        player.play(AnimState::Run);
        assert_eq!(player.anim_elapsed, 0.25);
        player.stop_animation();
        player.advance_animation(1.0);
        assert_eq!(player.anim_elapsed, 0.25);
    }

    #[test]
    fn test_spawn_obstacle_defaults() {
        let mut session = GameSession::default();
        let id = session.spawn_obstacle().expect("spawned");
        let o = session.obstacles.get(id).expect("in pool");
        assert_eq!(o.body.pos, Vec2::new(850.0, 350.0));
        assert_eq!(o.body.vel, Vec2::new(-200.0, 0.0));
        assert_eq!(o.body.size, Vec2::splat(40.0));
        assert!(o.body.immovable);
        assert!(!o.body.allow_gravity);
        assert!(o.body.out_of_bounds_kill);
        assert!(o.alive);
        assert_eq!(session.drain_events(), vec![GameEvent::ObstacleSpawned { id }]);
    }

    #[test]
    fn test_entity_ids_unique() {
        let mut session = GameSession::default();
        let a = session.spawn_obstacle().expect("spawned");
        let b = session.spawn_obstacle().expect("spawned");
        assert_ne!(a, b);
        assert_ne!(a, session.player.id);
    }

    #[test]
    fn test_end_game_is_idempotent() {
        let mut session = GameSession::default();
        session.score = 3.5;
        session.end_game();
        session.end_game();
        assert!(session.game_over);
        assert!(session.world.is_paused());
        assert!(session.player.hit);
        assert!(!session.player.anim_playing);
        let events = session.drain_events();
        assert_eq!(
            events,
            vec![GameEvent::GameOver {
                obstacle_id: None,
                score: 3.5
            }]
        );
        assert_eq!(session.score_text(), "Game Over - Score: 3");
    }

    #[test]
    fn test_spawn_ignored_after_game_over() {
        let mut session = GameSession::default();
        session.end_game();
        assert_eq!(session.spawn_obstacle(), None);
        assert!(session.obstacles.is_empty());
    }

    #[test]
    fn test_timer_dispatch() {
        let mut clock = TimerQueue::new();
        let mut session = GameSession::default();
        let spawn = session.register_timers(&mut clock);
        let unrelated = clock.schedule(10, false);

        assert!(!session.on_timer(unrelated));
        for id in clock.advance(3000.0) {
            session.on_timer(id);
        }
        assert_eq!(session.obstacles.len(), 2);
        assert!(session.on_timer(spawn));
        assert_eq!(session.obstacles.len(), 3);
    }

    #[test]
    fn test_snapshot_round_trip() {
        let mut session = GameSession::default();
        session.spawn_obstacle();
        session.score = 1.25;
        let json = serde_json::to_string(&session).expect("serialize");
        let restored: GameSession = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(restored.score, 1.25);
        assert_eq!(restored.obstacles.len(), 1);
        assert_eq!(restored.player.id, session.player.id);
    }
}

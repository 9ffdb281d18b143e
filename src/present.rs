//! Presentation contract and the session controller
//!
//! The simulation never draws. A [`Presenter`] receives a read-only
//! [`FrameView`] after each frame and is told when a run ends or restarts.
//! [`Session`] owns the [`GameState`] and the presenter and is the only thing
//! frontends talk to.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::consts::CAMERA_OFFSET;
use crate::platform::FrameClock;
use crate::sim::{Direction, GameEvent, GameState, Outcome, Pickup, Player, TickStatus, tick};
use crate::tuning::{Tuning, TuningError};

/// Follow camera: fixed offset from the player, always looking at it
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraRig {
    pub position: Vec3,
    pub target: Vec3,
}

impl CameraRig {
    pub fn follow(player: &Player, offset: Vec3) -> Self {
        Self {
            position: player.position + offset,
            target: player.position,
        }
    }
}

/// Everything a renderer needs for one frame
#[derive(Debug, Clone, Copy)]
pub struct FrameView<'a> {
    pub player: &'a Player,
    pub pickups: &'a [Pickup],
    pub camera: CameraRig,
    pub collected: u32,
    pub episode: u32,
}

impl<'a> FrameView<'a> {
    pub fn new(state: &'a GameState) -> Self {
        Self {
            player: &state.player,
            pickups: &state.pickups,
            camera: CameraRig::follow(&state.player, CAMERA_OFFSET),
            collected: state.collected,
            episode: state.episode,
        }
    }

    /// Owned copy for handing to a JS renderer
    pub fn snapshot(&self) -> FrameSnapshot {
        FrameSnapshot {
            player_position: self.player.position.to_array(),
            player_rotation: self.player.rotation.to_array(),
            player_scale: self.player.scale,
            pickups: self
                .pickups
                .iter()
                .map(|p| PickupSnapshot {
                    id: p.id,
                    position: p.position.to_array(),
                    radius: p.radius,
                })
                .collect(),
            camera_position: self.camera.position.to_array(),
            camera_target: self.camera.target.to_array(),
            collected: self.collected,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PickupSnapshot {
    pub id: u32,
    pub position: [f32; 3],
    pub radius: f32,
}

/// Serializable frame, plain arrays so JS can read it without glam's layout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameSnapshot {
    pub player_position: [f32; 3],
    pub player_rotation: [f32; 3],
    pub player_scale: f32,
    pub pickups: Vec<PickupSnapshot>,
    pub camera_position: [f32; 3],
    pub camera_target: [f32; 3],
    pub collected: u32,
}

/// Render/UI side of the game
pub trait Presenter {
    /// Draw the current frame. Must not feed back into the simulation.
    fn on_tick(&mut self, frame: &FrameView<'_>);

    /// Show the end screen
    fn on_game_over(&mut self, outcome: Outcome);

    /// Hide the end screen
    fn on_reset(&mut self) {}
}

/// Presenter that only logs (native demo, headless runs)
#[derive(Debug, Default)]
pub struct LogPresenter {
    pub frames: u64,
    pub last_outcome: Option<Outcome>,
}

impl Presenter for LogPresenter {
    fn on_tick(&mut self, frame: &FrameView<'_>) {
        self.frames += 1;
        log::trace!(
            "frame {}: pos={:?} scale={:.3} pickups={}",
            self.frames,
            frame.player.position,
            frame.player.scale,
            frame.pickups.len()
        );
    }

    fn on_game_over(&mut self, outcome: Outcome) {
        log::info!("{}", outcome.message());
        self.last_outcome = Some(outcome);
    }

    fn on_reset(&mut self) {
        self.last_outcome = None;
    }
}

/// Single controller for one game: input in, frames out
pub struct Session<P: Presenter> {
    state: GameState,
    presenter: P,
    clock: FrameClock,
    scheduled: bool,
}

impl<P: Presenter> Session<P> {
    /// `tuning` must already be validated; see [`Session::try_new`]
    pub fn new(seed: u64, tuning: Tuning, presenter: P) -> Self {
        Self::from_state(GameState::with_tuning(seed, tuning), presenter)
    }

    pub fn try_new(seed: u64, tuning: Tuning, presenter: P) -> Result<Self, TuningError> {
        Ok(Self::from_state(
            GameState::try_with_tuning(seed, tuning)?,
            presenter,
        ))
    }

    pub fn from_state(state: GameState, presenter: P) -> Self {
        let scheduled = state.is_running();
        Self {
            state,
            presenter,
            clock: FrameClock::new(),
            scheduled,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn presenter_mut(&mut self) -> &mut P {
        &mut self.presenter
    }

    /// Whether the frontend should keep requesting frames
    pub fn is_scheduled(&self) -> bool {
        self.scheduled
    }

    pub fn apply_impulse(&mut self, direction: Direction) {
        self.state.apply_input(direction);
    }

    /// Returns true if the key was a direction
    pub fn handle_key(&mut self, key: &str) -> bool {
        match Direction::from_key(key) {
            Some(direction) => {
                self.apply_impulse(direction);
                true
            }
            None => false,
        }
    }

    pub fn handle_key_code(&mut self, code: u32) -> bool {
        match Direction::from_key_code(code) {
            Some(direction) => {
                self.apply_impulse(direction);
                true
            }
            None => false,
        }
    }

    /// Run one display frame at `now_ms`
    pub fn frame(&mut self, now_ms: f64) -> TickStatus {
        let dt = self.clock.delta(now_ms);
        let status = tick(&mut self.state, dt);

        if status != TickStatus::Idle {
            let view = FrameView::new(&self.state);
            self.presenter.on_tick(&view);
        }

        for event in self.state.drain_events() {
            if let GameEvent::GameOver(outcome) = event {
                self.scheduled = false;
                self.presenter.on_game_over(outcome);
            }
        }

        status
    }

    /// Start a fresh episode and resume scheduling
    pub fn reset(&mut self) {
        self.state.reset();
        self.state.drain_events();
        self.clock.restart();
        self.scheduled = true;
        self.presenter.on_reset();
        let view = FrameView::new(&self.state);
        self.presenter.on_tick(&view);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;

    #[derive(Default)]
    struct Recorder {
        ticks: Vec<(Vec3, f32, usize)>,
        game_overs: Vec<Outcome>,
        resets: u32,
    }

    impl Presenter for Recorder {
        fn on_tick(&mut self, frame: &FrameView<'_>) {
            self.ticks
                .push((frame.player.position, frame.player.scale, frame.pickups.len()));
        }

        fn on_game_over(&mut self, outcome: Outcome) {
            self.game_overs.push(outcome);
        }

        fn on_reset(&mut self) {
            self.resets += 1;
        }
    }

    fn session() -> Session<Recorder> {
        let mut state = GameState::new(77);
        for (i, pickup) in state.pickups.iter_mut().enumerate() {
            pickup.position = Vec3::new(-35.0 + i as f32 * 7.0, PICKUP_HEIGHT, 35.0);
        }
        Session::from_state(state, Recorder::default())
    }

    #[test]
    fn test_camera_follows_player() {
        let mut player = Player::default();
        player.position = Vec3::new(4.0, 1.5, -2.0);
        let rig = CameraRig::follow(&player, CAMERA_OFFSET);
        assert_eq!(rig.position, Vec3::new(4.0, 16.5, 13.0));
        assert_eq!(rig.target, player.position);
    }

    #[test]
    fn test_keys_drive_player() {
        let mut s = session();
        assert!(s.handle_key("ArrowRight"));
        assert!(s.handle_key_code(39));
        assert!(!s.handle_key("q"));
        assert!(!s.handle_key_code(13));

        s.frame(0.0);
        assert_eq!(s.state().player.velocity.x, 0.8);
        assert_eq!(s.presenter().ticks.len(), 1);
    }

    #[test]
    fn test_game_over_stops_scheduling() {
        let mut s = session();
        let mut now = 0.0;
        while s.is_scheduled() && now < 20_000.0 {
            s.handle_key("ArrowRight");
            s.frame(now);
            now += 16.0;
        }

        assert!(!s.is_scheduled());
        assert_eq!(s.presenter().game_overs, vec![Outcome::OutOfBounds]);

        // Frames after game over are ignored entirely
        let ticks = s.presenter().ticks.len();
        assert_eq!(s.frame(now), TickStatus::Idle);
        assert_eq!(s.presenter().ticks.len(), ticks);
        assert_eq!(s.presenter().game_overs.len(), 1);
    }

    #[test]
    fn test_reset_resumes() {
        let mut s = session();
        s.state.player.position.x = 60.0;
        s.frame(0.0);
        assert!(!s.is_scheduled());

        s.reset();

        assert!(s.is_scheduled());
        assert_eq!(s.presenter().resets, 1);
        let (pos, scale, pickups) = *s.presenter().ticks.last().expect("reset frame");
        assert_eq!(pos, PLAYER_START);
        assert_eq!(scale, 1.0);
        assert_eq!(pickups, PICKUP_COUNT as usize);

        // Long pause before the first frame after reset is not stale
        assert_ne!(s.frame(600_000.0), TickStatus::Stale);
    }

    #[test]
    fn test_stale_frame_still_presented() {
        let mut s = session();
        s.frame(0.0);
        assert_eq!(s.frame(5_000.0), TickStatus::Stale);
        assert_eq!(s.presenter().ticks.len(), 2);
        assert!(s.is_scheduled());
    }

    #[test]
    fn test_log_presenter_records_outcome() {
        let tuning = Tuning {
            pickup_count: 0,
            ..Tuning::default()
        };
        let mut s = Session::new(1, tuning, LogPresenter::default());
        s.frame(0.0);
        assert_eq!(s.presenter().last_outcome, Some(Outcome::CollectedAll));
        s.reset();
        assert_eq!(s.presenter().last_outcome, None);
        assert_eq!(s.presenter().frames, 2);
    }

    #[test]
    fn test_snapshot_json_shape() {
        let state = GameState::new(5);
        let snapshot = FrameView::new(&state).snapshot();
        assert_eq!(snapshot.pickups.len(), PICKUP_COUNT as usize);
        assert_eq!(snapshot.player_position, [0.0, 1.5, 0.0]);
        assert_eq!(snapshot.camera_position, [0.0, 16.5, 15.0]);

        let json = serde_json::to_value(&snapshot).expect("serializes");
        assert_eq!(json["player_scale"], serde_json::json!(1.0));
        assert_eq!(json["pickups"][0]["radius"], serde_json::json!(2.0));
    }

    #[test]
    fn test_try_new_rejects_invalid_tuning() {
        let tuning = Tuning {
            pickup_spawn_half_extent: 80.0,
            ..Tuning::default()
        };
        assert!(Session::try_new(1, tuning, LogPresenter::default()).is_err());

        let s = Session::try_new(1, Tuning::default(), LogPresenter::default())
            .expect("defaults are valid");
        assert!(s.is_scheduled());
    }
}

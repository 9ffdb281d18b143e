//! Game state and core simulation types
//!
//! Everything the tick reads or writes lives in [`GameState`]; frontends only
//! hold a handle to it.

use glam::Vec3;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Sphere;
use super::input::{Direction, apply_impulse};
use super::motion::{Motion, MotionParams};
use crate::consts::*;
use crate::tuning::{Tuning, TuningError};

/// Why a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    /// Player left the square play area
    OutOfBounds,
    /// Every pickup was collected
    CollectedAll,
}

impl Outcome {
    /// End screen text
    pub fn message(&self) -> &'static str {
        match self {
            Outcome::OutOfBounds => "You went out of bounds!",
            Outcome::CollectedAll => "Congratulations, you've collected all objects!",
        }
    }

    pub fn is_win(&self) -> bool {
        matches!(self, Outcome::CollectedAll)
    }
}

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    Running,
    /// Run ended; frozen until reset
    GameOver(Outcome),
}

/// Notifications for the frontend, drained once per frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    PickupCollected { id: u32, new_scale: f32 },
    GameOver(Outcome),
    Reset { episode: u32 },
}

/// The player's sphere
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub position: Vec3,
    pub velocity: Vec3,
    /// Euler angles for the rolling visual
    pub rotation: Vec3,
    /// Uniform scale, starts at 1.0 and only grows within an episode
    pub scale: f32,
    pub base_radius: f32,
}

impl Default for Player {
    fn default() -> Self {
        Self::new(PLAYER_BASE_RADIUS)
    }
}

impl Player {
    pub fn new(base_radius: f32) -> Self {
        Self {
            position: PLAYER_START,
            velocity: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: 1.0,
            base_radius,
        }
    }

    /// Effective collision radius
    #[inline]
    pub fn radius(&self) -> f32 {
        self.base_radius * self.scale
    }

    pub fn bounding_sphere(&self) -> Sphere {
        Sphere::new(self.position, self.radius())
    }

    pub fn motion(&self) -> Motion {
        Motion {
            position: self.position,
            velocity: self.velocity,
            rotation: self.rotation,
        }
    }

    pub fn set_motion(&mut self, motion: Motion) {
        self.position = motion.position;
        self.velocity = motion.velocity;
        self.rotation = motion.rotation;
    }

    /// True if the horizontal position lies outside `[-half_extent, half_extent]`
    pub fn is_out_of_bounds(&self, half_extent: f32) -> bool {
        self.position.x.abs() > half_extent || self.position.z.abs() > half_extent
    }
}

/// A collectible sphere
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pickup {
    pub id: u32,
    pub position: Vec3,
    pub radius: f32,
}

impl Pickup {
    pub fn bounding_sphere(&self) -> Sphere {
        Sphere::new(self.position, self.radius)
    }
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Reset counter; selects the pickup layout
    pub episode: u32,
    pub tuning: Tuning,
    pub player: Player,
    /// Live pickups (sorted by id for determinism)
    pub pickups: Vec<Pickup>,
    pub phase: GamePhase,
    /// Integrated ticks in this episode
    pub time_ticks: u64,
    /// Pickups collected in this episode
    pub collected: u32,
    #[serde(skip)]
    events: Vec<GameEvent>,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Create a new game with default tuning
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, Tuning::default())
    }

    /// Create a new game, rejecting tuning that would break the simulation
    pub fn try_with_tuning(seed: u64, tuning: Tuning) -> Result<Self, TuningError> {
        tuning.validate()?;
        Ok(Self::with_tuning(seed, tuning))
    }

    /// Create a new game. `tuning` must already be validated.
    pub fn with_tuning(seed: u64, tuning: Tuning) -> Self {
        debug_assert!(tuning.validate().is_ok(), "unvalidated tuning: {:?}", tuning);
        let mut state = Self {
            seed,
            episode: 0,
            player: Player::new(tuning.player_radius),
            tuning,
            pickups: Vec::new(),
            phase: GamePhase::Running,
            time_ticks: 0,
            collected: 0,
            events: Vec::new(),
            next_id: 1,
        };
        state.spawn_pickups();
        state
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Scatter a full batch of pickups for the current episode
    pub fn spawn_pickups(&mut self) {
        // Same seed and episode always yield the same layout
        let episode_seed = (self.episode as u64)
            .wrapping_mul(2654435761)
            .wrapping_add(self.seed);
        let mut rng = Pcg32::seed_from_u64(episode_seed);

        let extent = self.tuning.pickup_spawn_half_extent;
        let count = self.tuning.pickup_count;
        self.pickups.reserve(count as usize);
        for _ in 0..count {
            let (x, z) = if extent > 0.0 && (2.0 * extent).is_finite() {
                (
                    rng.random_range(-extent..extent),
                    rng.random_range(-extent..extent),
                )
            } else {
                (0.0, 0.0)
            };
            let id = self.next_entity_id();
            self.pickups.push(Pickup {
                id,
                position: Vec3::new(x, PICKUP_HEIGHT, z),
                radius: self.tuning.pickup_radius,
            });
        }
        log::debug!(
            "Episode {}: spawned {} pickups (seed {})",
            self.episode,
            count,
            episode_seed
        );
    }

    /// Back to a fresh Running episode: start pose, scale 1, full pickup set
    pub fn reset(&mut self) {
        self.episode = self.episode.wrapping_add(1);
        self.player = Player::new(self.tuning.player_radius);
        self.pickups.clear();
        self.phase = GamePhase::Running;
        self.time_ticks = 0;
        self.collected = 0;
        self.spawn_pickups();
        self.events.push(GameEvent::Reset {
            episode: self.episode,
        });
        log::info!("Episode {} started", self.episode);
    }

    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }

    pub fn outcome(&self) -> Option<Outcome> {
        match self.phase {
            GamePhase::Running => None,
            GamePhase::GameOver(outcome) => Some(outcome),
        }
    }

    /// Apply a directional impulse. Ignored once the run is over.
    pub fn apply_input(&mut self, direction: Direction) {
        if !self.is_running() {
            log::debug!("Ignoring {:?} after game over", direction);
            return;
        }
        apply_impulse(&mut self.player, direction, self.tuning.acceleration);
    }

    pub fn motion_params(&self) -> MotionParams {
        MotionParams {
            friction: self.tuning.friction,
            max_speed: self.tuning.max_speed,
            base_radius: self.player.base_radius,
        }
    }

    pub(crate) fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take all events queued since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Enter GameOver. Only valid from Running.
    pub(crate) fn end(&mut self, outcome: Outcome) {
        if !self.is_running() {
            return;
        }
        self.phase = GamePhase::GameOver(outcome);
        self.push_event(GameEvent::GameOver(outcome));
        log::info!(
            "Game over after {} ticks: {} ({} collected, scale {:.3})",
            self.time_ticks,
            outcome.message(),
            self.collected,
            self.player.scale
        );
    }
}

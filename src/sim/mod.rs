//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One integration step per tick, stale frames skipped
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering or platform dependencies

pub mod collision;
pub mod input;
pub mod motion;
pub mod state;
pub mod tick;

pub use collision::{Sphere, resolve_pickups};
pub use input::{Axis, Direction, apply_impulse};
pub use motion::{Motion, MotionParams, clamp_length, integrate, rolling_delta};
pub use state::{GameEvent, GamePhase, GameState, Outcome, Pickup, Player};
pub use tick::{TickStatus, tick};

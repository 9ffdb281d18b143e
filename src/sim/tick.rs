//! Per-frame simulation tick
//!
//! integrate -> collect pickups -> terminal check. Frontends schedule ticks;
//! this module never does.

use super::collision::resolve_pickups;
use super::motion::integrate;
use super::state::{GameEvent, GameState, Outcome};

/// What a call to [`tick`] did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickStatus {
    /// Game is over; nothing changed
    Idle,
    /// Frame delta too large; nothing changed
    Stale,
    /// Simulation advanced one step and is still running
    Advanced,
    /// Simulation advanced and the run ended on this step
    Ended(Outcome),
}

/// Advance the game by one step. `dt` is the real time since the previous
/// frame in seconds and is only used to detect stale frames.
pub fn tick(state: &mut GameState, dt: f32) -> TickStatus {
    if !state.is_running() {
        return TickStatus::Idle;
    }

    if dt > state.tuning.stale_frame_secs {
        log::debug!("Skipping stale frame (dt = {:.3}s)", dt);
        return TickStatus::Stale;
    }

    state.time_ticks += 1;

    let params = state.motion_params();
    let motion = integrate(state.player.motion(), &params);
    state.player.set_motion(motion);

    let collected = resolve_pickups(
        &mut state.player,
        &mut state.pickups,
        state.tuning.growth_rate,
    );
    for id in collected {
        state.collected += 1;
        let new_scale = state.player.scale;
        log::debug!("Collected pickup {} (scale now {:.3})", id, new_scale);
        state.push_event(GameEvent::PickupCollected { id, new_scale });
    }

    if state.player.is_out_of_bounds(state.tuning.bounds_half_extent) {
        state.end(Outcome::OutOfBounds);
        return TickStatus::Ended(Outcome::OutOfBounds);
    }
    if state.pickups.is_empty() {
        state.end(Outcome::CollectedAll);
        return TickStatus::Ended(Outcome::CollectedAll);
    }

    TickStatus::Advanced
}

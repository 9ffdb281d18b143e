//! Roll & Grow - A rolling-sphere arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (motion, collisions, game state)
//! - `tuning`: Data-driven game balance
//! - `platform`: Frame timing shared by the browser and native frontends
//! - `present`: Presentation contract and the session controller driving it

pub mod platform;
pub mod present;
pub mod sim;
pub mod tuning;

pub use present::{CameraRig, FrameSnapshot, FrameView, LogPresenter, Presenter, Session};
pub use tuning::{Tuning, TuningError};

/// Game configuration constants
pub mod consts {
    use glam::Vec3;

    /// Player sphere radius at scale 1.0
    pub const PLAYER_BASE_RADIUS: f32 = 3.0;
    /// Player spawn point (resting on the plane)
    pub const PLAYER_START: Vec3 = Vec3::new(0.0, 1.5, 0.0);

    /// Velocity impulse per key press
    pub const ACCELERATION: f32 = 0.5;
    /// Per-tick velocity multiplier
    pub const FRICTION: f32 = 0.8;
    /// Velocity magnitude cap (units per tick)
    pub const MAX_SPEED: f32 = 1.0;

    /// Pickup defaults
    pub const PICKUP_RADIUS: f32 = 2.0;
    pub const PICKUP_COUNT: u32 = 10;
    pub const PICKUP_HEIGHT: f32 = 2.0;
    /// Pickups spawn in [-extent, extent) on x and z
    pub const PICKUP_SPAWN_HALF_EXTENT: f32 = 40.0;
    /// Scale multiplier per collected pickup
    pub const GROWTH_RATE: f32 = 1.05;

    /// Half-width of the square play area (the plane is 100 x 100)
    pub const BOUNDS_HALF_EXTENT: f32 = 50.0;

    /// Frames further apart than this are treated as a resumed tab, not a tick
    pub const STALE_FRAME_SECS: f32 = 0.2;

    /// Follow camera offset from the player
    pub const CAMERA_OFFSET: Vec3 = Vec3::new(0.0, 15.0, 15.0);
}

/// Sign of `x` with zero mapped to zero (`f32::signum` maps +0.0 to 1.0)
#[inline]
pub fn sign_or_zero(x: f32) -> f32 {
    if x > 0.0 {
        1.0
    } else if x < 0.0 {
        -1.0
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sign_or_zero() {
        assert_eq!(sign_or_zero(0.0), 0.0);
        assert_eq!(sign_or_zero(-0.0), 0.0);
        assert_eq!(sign_or_zero(0.3), 1.0);
        assert_eq!(sign_or_zero(-7.0), -1.0);
    }
}

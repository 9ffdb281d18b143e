//! Kinematic integration for the rolling player sphere
//!
//! One step per tick, unit timestep: friction decay, speed cap, Euler
//! position update, then a rolling-without-slipping rotation for rendering.

use glam::Vec3;
use std::f32::consts::TAU;

use crate::sign_or_zero;

/// Kinematic state advanced by [`integrate`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Motion {
    pub position: Vec3,
    pub velocity: Vec3,
    /// Euler angles (radians), visual only
    pub rotation: Vec3,
}

/// Constants for one integration step
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionParams {
    /// Per-tick velocity multiplier, in (0, 1)
    pub friction: f32,
    pub max_speed: f32,
    /// Radius used for the rolling circumference (unscaled)
    pub base_radius: f32,
}

/// Cap the magnitude of `v` at `max`, keeping its direction
#[inline]
pub fn clamp_length(v: Vec3, max: f32) -> Vec3 {
    v.clamp_length_max(max)
}

/// Rotation (radians) for rolling `speed` units on a sphere of `radius`
#[inline]
pub fn rolling_delta(speed: f32, radius: f32) -> f32 {
    speed / (TAU * radius)
}

/// Advance one tick
pub fn integrate(motion: Motion, params: &MotionParams) -> Motion {
    let velocity = clamp_length(motion.velocity * params.friction, params.max_speed);
    let position = motion.position + velocity;

    // Rolling along x spins about z, rolling along z spins about x
    let delta = rolling_delta(velocity.length(), params.base_radius);
    let mut rotation = motion.rotation;
    rotation.z -= delta * sign_or_zero(velocity.x);
    rotation.x -= delta * sign_or_zero(velocity.z);

    Motion {
        position,
        velocity,
        rotation,
    }
}

//! Sphere overlap tests and pickup collection
//!
//! The player grows by a fixed factor per pickup. The radius used for the
//! overlap test is sampled once per step, so pickups collected earlier in the
//! same step do not enlarge the reach for the rest of that step.

use glam::Vec3;

use super::state::{Pickup, Player};

/// Bounding sphere
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sphere {
    pub center: Vec3,
    pub radius: f32,
}

impl Sphere {
    pub fn new(center: Vec3, radius: f32) -> Self {
        Self { center, radius }
    }

    /// Touching counts as intersecting
    #[inline]
    pub fn intersects(&self, other: &Sphere) -> bool {
        let reach = self.radius + other.radius;
        self.center.distance_squared(other.center) <= reach * reach
    }
}

/// Remove every pickup overlapping the player and grow the player once per
/// pickup. Returns the collected ids in ascending order.
pub fn resolve_pickups(
    player: &mut Player,
    pickups: &mut Vec<Pickup>,
    growth_rate: f32,
) -> Vec<u32> {
    let reach = player.bounding_sphere();

    let mut collected = Vec::new();
    pickups.retain(|pickup| {
        if reach.intersects(&pickup.bounding_sphere()) {
            collected.push(pickup.id);
            false
        } else {
            true
        }
    });

    for _ in &collected {
        player.scale *= growth_rate;
    }

    collected
}

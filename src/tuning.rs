//! Data-driven game balance
//!
//! Every gameplay constant the simulation reads comes from [`Tuning`]. The
//! defaults mirror [`crate::consts`]; overrides are JSON, read from
//! LocalStorage in the browser or from a file on native.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Rejected tuning
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("failed to read tuning file: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid tuning JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("{field} must be in {expected}, got {value}")]
    OutOfRange {
        field: &'static str,
        expected: &'static str,
        value: f32,
    },
}

/// Gameplay constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Velocity impulse per key press
    pub acceleration: f32,
    /// Per-tick velocity multiplier, in (0, 1)
    pub friction: f32,
    pub max_speed: f32,
    pub player_radius: f32,
    pub pickup_radius: f32,
    pub pickup_count: u32,
    pub pickup_spawn_half_extent: f32,
    /// Scale multiplier per pickup, at least 1.0
    pub growth_rate: f32,
    pub bounds_half_extent: f32,
    pub stale_frame_secs: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            acceleration: ACCELERATION,
            friction: FRICTION,
            max_speed: MAX_SPEED,
            player_radius: PLAYER_BASE_RADIUS,
            pickup_radius: PICKUP_RADIUS,
            pickup_count: PICKUP_COUNT,
            pickup_spawn_half_extent: PICKUP_SPAWN_HALF_EXTENT,
            growth_rate: GROWTH_RATE,
            bounds_half_extent: BOUNDS_HALF_EXTENT,
            stale_frame_secs: STALE_FRAME_SECS,
        }
    }
}

fn out_of_range(field: &'static str, expected: &'static str, value: f32) -> TuningError {
    TuningError::OutOfRange {
        field,
        expected,
        value,
    }
}

fn require_positive(field: &'static str, value: f32) -> Result<(), TuningError> {
    // NaN fails this comparison too
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(out_of_range(field, "(0, inf)", value))
    }
}

impl Tuning {
    /// Parse and validate. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    pub fn to_json(&self) -> Result<String, TuningError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), TuningError> {
        if !(self.friction > 0.0 && self.friction < 1.0) {
            return Err(out_of_range("friction", "(0, 1)", self.friction));
        }
        if !(self.acceleration >= 0.0 && self.acceleration.is_finite()) {
            return Err(out_of_range("acceleration", "[0, inf)", self.acceleration));
        }
        if !(self.growth_rate >= 1.0 && self.growth_rate.is_finite()) {
            return Err(out_of_range("growth_rate", "[1, inf)", self.growth_rate));
        }
        require_positive("max_speed", self.max_speed)?;
        require_positive("player_radius", self.player_radius)?;
        require_positive("pickup_radius", self.pickup_radius)?;
        require_positive("pickup_spawn_half_extent", self.pickup_spawn_half_extent)?;
        require_positive("bounds_half_extent", self.bounds_half_extent)?;
        require_positive("stale_frame_secs", self.stale_frame_secs)?;
        // Spawn ranges span the full width, which must stay finite
        if !(2.0 * self.bounds_half_extent).is_finite() {
            return Err(out_of_range(
                "bounds_half_extent",
                "(0, f32::MAX / 2]",
                self.bounds_half_extent,
            ));
        }
        // Every pickup must be reachable without leaving the board
        if self.pickup_spawn_half_extent + self.pickup_radius > self.bounds_half_extent {
            return Err(out_of_range(
                "pickup_spawn_half_extent",
                "(0, bounds_half_extent - pickup_radius]",
                self.pickup_spawn_half_extent,
            ));
        }
        Ok(())
    }

    /// LocalStorage key
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "roll_grow_tuning";

    /// Load a developer override from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(tuning) => {
                        log::info!("Loaded tuning override from LocalStorage");
                        return tuning;
                    }
                    Err(e) => log::warn!("Ignoring tuning override: {}", e),
                }
            }
        }

        Self::default()
    }

    /// Load from a JSON file (native only)
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_file(path: &std::path::Path) -> Result<Self, TuningError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let tuning = Tuning::default();
        assert!(tuning.validate().is_ok());
        assert_eq!(tuning.pickup_count, 10);
        assert_eq!(tuning.friction, 0.8);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let tuning = Tuning::from_json(r#"{ "pickup_count": 3, "growth_rate": 1.2 }"#)
            .expect("valid tuning");
        assert_eq!(tuning.pickup_count, 3);
        assert_eq!(tuning.growth_rate, 1.2);
        assert_eq!(tuning.max_speed, MAX_SPEED);
    }

    #[test]
    fn test_json_round_trip() {
        let tuning = Tuning {
            bounds_half_extent: 75.0,
            ..Tuning::default()
        };
        let json = tuning.to_json().expect("serializes");
        assert_eq!(Tuning::from_json(&json).expect("parses"), tuning);
    }

    #[test]
    fn test_rejects_bad_friction() {
        for friction in [0.0, 1.0, 1.5, -0.2, f32::NAN] {
            let tuning = Tuning {
                friction,
                ..Tuning::default()
            };
            assert!(matches!(
                tuning.validate(),
                Err(TuningError::OutOfRange {
                    field: "friction",
                    ..
                })
            ));
        }
    }

    #[test]
    fn test_rejects_shrinking_growth() {
        let err = Tuning::from_json(r#"{ "growth_rate": 0.9 }"#).unwrap_err();
        assert!(err.to_string().contains("growth_rate"));
    }

    #[test]
    fn test_rejects_non_positive_extent() {
        let tuning = Tuning {
            bounds_half_extent: 0.0,
            ..Tuning::default()
        };
        assert!(tuning.validate().is_err());
    }

    #[test]
    fn test_rejects_spawn_outside_bounds() {
        let err = Tuning::from_json(r#"{ "pickup_spawn_half_extent": 80 }"#).unwrap_err();
        assert!(matches!(
            err,
            TuningError::OutOfRange {
                field: "pickup_spawn_half_extent",
                ..
            }
        ));

        // Pickup edge must stay inside too: 49 + 2 > 50
        let tuning = Tuning {
            pickup_spawn_half_extent: 49.0,
            ..Tuning::default()
        };
        assert!(tuning.validate().is_err());

        let tuning = Tuning {
            pickup_spawn_half_extent: 48.0,
            ..Tuning::default()
        };
        assert!(tuning.validate().is_ok());
    }

    #[test]
    fn test_rejects_huge_spawn_extent() {
        assert!(Tuning::from_json(r#"{ "pickup_spawn_half_extent": 3e38 }"#).is_err());
        assert!(
            Tuning::from_json(
                r#"{ "pickup_spawn_half_extent": 3e38, "bounds_half_extent": 3.2e38 }"#
            )
            .is_err()
        );
    }

    #[test]
    fn test_zero_pickups_allowed() {
        assert!(Tuning::from_json(r#"{ "pickup_count": 0 }"#).is_ok());
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            Tuning::from_json("{ not json"),
            Err(TuningError::Parse(_))
        ));
    }
}

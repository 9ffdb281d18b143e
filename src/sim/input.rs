//! Keyboard direction to velocity impulse mapping

use serde::{Deserialize, Serialize};

use super::state::Player;

/// Horizontal axis an impulse acts on (the plane is x/z, y is up)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Axis {
    X,
    Z,
}

/// Directional input, as seen from the default camera looking down -z
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    /// Map a DOM `KeyboardEvent.key` value
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowLeft" | "Left" => Some(Direction::Left),
            "ArrowRight" | "Right" => Some(Direction::Right),
            "ArrowUp" | "Up" => Some(Direction::Up),
            "ArrowDown" | "Down" => Some(Direction::Down),
            _ => None,
        }
    }

    /// Map a legacy `KeyboardEvent.which` code
    pub fn from_key_code(code: u32) -> Option<Self> {
        match code {
            37 => Some(Direction::Left),
            38 => Some(Direction::Up),
            39 => Some(Direction::Right),
            40 => Some(Direction::Down),
            _ => None,
        }
    }

    /// Axis and sign of the impulse. Up and Left point toward negative values.
    pub fn axis_sign(self) -> (Axis, f32) {
        match self {
            Direction::Left => (Axis::X, -1.0),
            Direction::Right => (Axis::X, 1.0),
            Direction::Up => (Axis::Z, -1.0),
            Direction::Down => (Axis::Z, 1.0),
        }
    }
}

/// Add a fixed impulse to the player's velocity. Clamping happens at integration.
pub fn apply_impulse(player: &mut Player, direction: Direction, acceleration: f32) {
    let (axis, sign) = direction.axis_sign();
    match axis {
        Axis::X => player.velocity.x += sign * acceleration,
        Axis::Z => player.velocity.z += sign * acceleration,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::ACCELERATION;
    use glam::Vec3;

    #[test]
    fn test_key_mapping() {
        assert_eq!(Direction::from_key("ArrowLeft"), Some(Direction::Left));
        assert_eq!(Direction::from_key("ArrowDown"), Some(Direction::Down));
        assert_eq!(Direction::from_key("a"), None);
        assert_eq!(Direction::from_key(""), None);

        assert_eq!(Direction::from_key_code(37), Some(Direction::Left));
        assert_eq!(Direction::from_key_code(38), Some(Direction::Up));
        assert_eq!(Direction::from_key_code(39), Some(Direction::Right));
        assert_eq!(Direction::from_key_code(40), Some(Direction::Down));
        assert_eq!(Direction::from_key_code(32), None);
    }

    #[test]
    fn test_impulse_axes_and_signs() {
        let mut player = Player::default();

        apply_impulse(&mut player, Direction::Left, ACCELERATION);
        assert_eq!(player.velocity, Vec3::new(-0.5, 0.0, 0.0));

        apply_impulse(&mut player, Direction::Down, ACCELERATION);
        assert_eq!(player.velocity, Vec3::new(-0.5, 0.0, 0.5));

        apply_impulse(&mut player, Direction::Right, ACCELERATION);
        apply_impulse(&mut player, Direction::Up, ACCELERATION);
        apply_impulse(&mut player, Direction::Up, ACCELERATION);
        assert_eq!(player.velocity, Vec3::new(0.0, 0.0, -0.5));
    }

    #[test]
    fn test_impulse_is_not_clamped() {
        let mut player = Player::default();
        for _ in 0..10 {
            apply_impulse(&mut player, Direction::Right, ACCELERATION);
        }
        assert_eq!(player.velocity.x, 5.0);
    }
}

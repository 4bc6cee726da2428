//! Normalized per-tick input.
//!
//! Capturing keys, mouse, and touch belongs to the host; the simulation only
//! sees an `InputSnapshot`.

use glam::Vec2;

/// Player intent for one tick
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct InputSnapshot {
    /// Movement intent, each axis in [-1, 1] (+y is down)
    pub move_vector: Vec2,
    /// Attack requested this tick
    pub attack_pressed: bool,
    /// Pointer position in world coordinates, if the pointer is over the world
    pub pointer_world_position: Option<Vec2>,
}

impl InputSnapshot {
    /// No movement, no attack
    pub fn idle() -> Self {
        Self::default()
    }

    pub fn moving(move_vector: Vec2) -> Self {
        Self {
            move_vector,
            ..Self::default()
        }
    }

    pub fn attacking() -> Self {
        Self {
            attack_pressed: true,
            ..Self::default()
        }
    }

    /// Build an 8-directional movement vector from held direction keys.
    pub fn from_directions(up: bool, down: bool, left: bool, right: bool) -> Self {
        let axis = |neg: bool, pos: bool| match (neg, pos) {
            (true, false) => -1.0,
            (false, true) => 1.0,
            _ => 0.0,
        };
        Self::moving(Vec2::new(axis(left, right), axis(up, down)))
    }

    /// Movement direction with each axis clamped to [-1, 1], non-finite
    /// components zeroed, and length capped at 1 so diagonals are no faster.
    pub fn movement_direction(&self) -> Vec2 {
        let sanitize = |v: f32| if v.is_finite() { v.clamp(-1.0, 1.0) } else { 0.0 };
        let dir = Vec2::new(sanitize(self.move_vector.x), sanitize(self.move_vector.y));
        if dir.length_squared() > 1.0 {
            dir.normalize()
        } else {
            dir
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_directions() {
        assert_eq!(InputSnapshot::from_directions(true, false, false, false).move_vector, Vec2::new(0.0, -1.0));
        assert_eq!(InputSnapshot::from_directions(false, true, false, true).move_vector, Vec2::new(1.0, 1.0));
        // Opposing keys cancel
        assert_eq!(InputSnapshot::from_directions(true, true, true, true).move_vector, Vec2::ZERO);
    }

    #[test]
    fn test_diagonal_is_unit_length() {
        let input = InputSnapshot::from_directions(true, false, true, false);
        let dir = input.movement_direction();
        assert!((dir.length() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_partial_stick_keeps_magnitude() {
        let input = InputSnapshot::moving(Vec2::new(0.5, 0.0));
        assert_eq!(input.movement_direction(), Vec2::new(0.5, 0.0));
    }

    #[test]
    fn test_out_of_range_and_nan_sanitized() {
        let input = InputSnapshot::moving(Vec2::new(f32::NAN, 7.0));
        assert_eq!(input.movement_direction(), Vec2::new(0.0, 1.0));
    }
}

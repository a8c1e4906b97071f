//! Rotating ring with an open gap
//!
//! Angles are stored in π-radians (1.0 = 180°) and grow clockwise on the
//! canvas. The ring is drawn from `start_angle` to `end_angle`; the gap is
//! the arc from `end_angle` back round to `start_angle`.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::normalize_degrees;

/// The boundary ring
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ring {
    /// Ring center (canvas midpoint)
    pub center: Vec2,
    pub radius: f32,
    /// Gap boundary, π-radians
    pub start_angle: f32,
    /// Gap boundary, π-radians
    pub end_angle: f32,
    /// Rotation per step, π-radians
    pub rotate_speed: f32,
}

impl Ring {
    pub fn new(center: Vec2, radius: f32, rotate_speed: f32) -> Self {
        Self {
            center,
            radius,
            start_angle: RING_START_ANGLE,
            end_angle: RING_END_ANGLE,
            rotate_speed,
        }
    }

    /// Rotate the gap by one step
    ///
    /// Each boundary is decremented independently; a boundary already at or
    /// past its wrap threshold snaps back to its initial value instead.
    pub fn advance(&mut self) {
        if self.start_angle <= RING_START_WRAP {
            self.start_angle = RING_START_ANGLE;
        } else {
            self.start_angle -= self.rotate_speed;
        }

        if self.end_angle <= RING_END_WRAP {
            self.end_angle = RING_END_ANGLE;
        } else {
            self.end_angle -= self.rotate_speed;
        }
    }

    /// Gap bounds `(start, end)` in degrees, shifted into [0, 360]
    pub fn gap_bounds_degrees(&self) -> (f32, f32) {
        (
            normalize_degrees(self.start_angle * 180.0),
            normalize_degrees(self.end_angle * 180.0),
        )
    }

    /// Check if an angle (degrees, [0, 360)) lies in the open gap
    ///
    /// Inclusive on both bounds. The `+ 360` form catches gaps that straddle
    /// the 0° line.
    pub fn in_gap(&self, angle_deg: f32) -> bool {
        let (start, end) = self.gap_bounds_degrees();
        let within = |a: f32| a >= end && a <= start;
        within(angle_deg) || within(angle_deg + 360.0)
    }

    /// Drawn arc `(start, end)` in radians
    pub fn arc_radians(&self) -> (f32, f32) {
        (
            std::f32::consts::PI * self.start_angle,
            std::f32::consts::PI * self.end_angle,
        )
    }

    /// Radius past which escaped balls are despawned
    #[inline]
    pub fn kill_radius(&self, margin: f32) -> f32 {
        self.radius + margin
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn ring() -> Ring {
        Ring::new(Vec2::new(350.0, 315.0), 300.0, RING_ROTATE_SPEED)
    }

    #[test]
    fn test_new_ring_angles() {
        let r = ring();
        assert_eq!(r.start_angle, 0.0);
        assert_eq!(r.end_angle, 1.75);
        assert_eq!(r.gap_bounds_degrees(), (0.0, 315.0));
    }

    #[test]
    fn test_advance_decrements_both() {
        let mut r = ring();
        r.advance();
        assert!((r.start_angle + 0.005).abs() < 1e-6);
        assert!((r.end_angle - 1.745).abs() < 1e-6);
    }

    #[test]
    fn test_start_wraps_to_zero() {
        let mut r = ring();
        r.start_angle = -2.0;
        r.advance();
        assert_eq!(r.start_angle, 0.0);

        // Not yet at the threshold: plain decrement, even if it crosses it
        r.start_angle = -1.999;
        r.advance();
        assert!(r.start_angle < -2.0);
        r.advance();
        assert_eq!(r.start_angle, 0.0);
    }

    #[test]
    fn test_end_wraps_to_initial() {
        let mut r = ring();
        r.end_angle = -0.25;
        r.advance();
        assert_eq!(r.end_angle, 1.75);

        r.end_angle = -0.3;
        r.advance();
        assert_eq!(r.end_angle, 1.75);
    }

    #[test]
    fn test_gap_bounds_normalized() {
        let mut r = ring();
        r.start_angle = -0.5;
        r.end_angle = 1.25;
        let (start, end) = r.gap_bounds_degrees();
        assert!((start - 270.0).abs() < 1e-3);
        assert!((end - 225.0).abs() < 1e-3);

        r.end_angle = -0.1;
        let (_, end) = r.gap_bounds_degrees();
        assert!((end - 342.0).abs() < 1e-3);
    }

    #[test]
    fn test_in_gap_after_rotation() {
        let mut r = ring();
        r.start_angle = -0.25; // 315°
        r.end_angle = 1.5; // 270°
        assert!(r.in_gap(300.0));
        assert!(r.in_gap(270.0));
        assert!(r.in_gap(315.0));
        assert!(!r.in_gap(90.0));
        assert!(!r.in_gap(316.0));
    }

    #[test]
    fn test_gap_closed_at_start() {
        // Fresh ring: bounds are (0°, 315°), an empty range
        let r = ring();
        for deg in [0.0, 45.0, 180.0, 315.0, 330.0, 359.0] {
            assert!(!r.in_gap(deg), "{deg}° should be solid");
        }
    }

    #[test]
    fn test_in_gap_uses_extra_turn() {
        let r = Ring {
            center: Vec2::ZERO,
            radius: 100.0,
            // Bounds are compared as-is, so a start past 360° opens a gap
            // reachable only through `angle + 360`
            start_angle: 2.1, // 378°
            end_angle: 1.9,   // 342°
            rotate_speed: RING_ROTATE_SPEED,
        };
        assert!(r.in_gap(10.0));
        assert!(r.in_gap(350.0));
        assert!(!r.in_gap(20.0));
    }

    #[test]
    fn test_arc_radians() {
        let mut r = ring();
        r.start_angle = -0.5;
        let (s, e) = r.arc_radians();
        assert!((s + std::f32::consts::FRAC_PI_2).abs() < 1e-6);
        assert!((e - 1.75 * std::f32::consts::PI).abs() < 1e-6);
    }

    proptest! {
        #[test]
        fn prop_angles_stay_in_cycle(steps in 0usize..3000) {
            let mut r = ring();
            for _ in 0..steps {
                r.advance();
            }
            prop_assert!(r.start_angle <= RING_START_ANGLE);
            prop_assert!(r.start_angle >= RING_START_WRAP - r.rotate_speed - 1e-4);
            prop_assert!(r.end_angle <= RING_END_ANGLE);
            prop_assert!(r.end_angle >= RING_END_WRAP - r.rotate_speed - 1e-4);
            let (start, end) = r.gap_bounds_degrees();
            // One step past the start threshold can leave start just below 0°
            prop_assert!(start > -1.0 && start <= 360.0);
            prop_assert!((0.0..=360.0).contains(&end));
        }
    }
}

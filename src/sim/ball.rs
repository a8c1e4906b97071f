//! Ball entity and its per-step integration

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::color::random_color;
use super::gravity::sample_gravity;
use crate::settings::VelocityClamp;

/// A ball entity
///
/// Radius, color and gravity are fixed at creation; `escaped` only ever
/// goes from false to true.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    radius: f32,
    color: String,
    gravity: Vec2,
    escaped: bool,
}

impl Ball {
    /// New ball at `center` with random color and gravity, at rest
    pub fn spawn<R: Rng + ?Sized>(id: u32, center: Vec2, radius: f32, rng: &mut R) -> Self {
        let color = random_color(rng);
        let gravity = sample_gravity(rng);
        Self::with_gravity(id, center, radius, color, gravity)
    }

    /// New ball at `center` with explicit color and gravity, at rest
    pub fn with_gravity(id: u32, center: Vec2, radius: f32, color: String, gravity: Vec2) -> Self {
        Self {
            id,
            pos: center,
            vel: Vec2::ZERO,
            radius,
            color,
            gravity,
            escaped: false,
        }
    }

    #[inline]
    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn color(&self) -> &str {
        &self.color
    }

    #[inline]
    pub fn gravity(&self) -> Vec2 {
        self.gravity
    }

    #[inline]
    pub fn is_escaped(&self) -> bool {
        self.escaped
    }

    /// Flag the ball as escaped (permanent)
    pub fn mark_escaped(&mut self) {
        self.escaped = true;
    }

    /// Move by the current velocity, then apply gravity and the speed cap
    ///
    /// Gravity grows the speed away from zero on each axis: a negative
    /// component gets more negative, anything else gets more positive.
    pub fn advance(&mut self, clamp: VelocityClamp, max_speed: f32) {
        self.pos += self.vel;

        self.vel.y += if self.vel.y < 0.0 {
            -self.gravity.y
        } else {
            self.gravity.y
        };
        self.vel.x += if self.vel.x < 0.0 {
            -self.gravity.x
        } else {
            self.gravity.x
        };

        self.vel = clamp.apply(self.vel, max_speed);
    }

    /// Point sampled for boundary tests: one step ahead, offset by the radius
    /// on both axes
    #[inline]
    pub fn lookahead(&self) -> Vec2 {
        self.pos + Vec2::splat(self.radius) + self.vel
    }

    /// Full velocity reversal on a wall hit
    pub fn rebound(&mut self) {
        self.vel = -self.vel;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::MAX_AXIS_SPEED;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn ball(gravity: Vec2) -> Ball {
        Ball::with_gravity(1, Vec2::new(100.0, 100.0), 10.0, "#FFFFFF".into(), gravity)
    }

    #[test]
    fn test_spawn_at_rest_in_center() {
        let mut rng = Pcg32::seed_from_u64(5);
        let b = Ball::spawn(3, Vec2::new(350.0, 315.0), 10.0, &mut rng);
        assert_eq!(b.id, 3);
        assert_eq!(b.pos, Vec2::new(350.0, 315.0));
        assert_eq!(b.vel, Vec2::ZERO);
        assert!(!b.is_escaped());
        assert_eq!(b.color().len(), 7);
    }

    #[test]
    fn test_position_moves_before_gravity() {
        let mut b = ball(Vec2::new(0.05, 0.05));
        b.vel = Vec2::new(1.0, 2.0);
        b.advance(VelocityClamp::Reference, MAX_AXIS_SPEED);
        assert_eq!(b.pos, Vec2::new(101.0, 102.0));
        assert!((b.vel.x - 1.05).abs() < 1e-6);
        assert!((b.vel.y - 2.05).abs() < 1e-6);
    }

    #[test]
    fn test_gravity_magnifies_negative_velocity() {
        let mut b = ball(Vec2::new(0.04, 0.03));
        b.vel = Vec2::new(-1.0, -2.0);
        b.advance(VelocityClamp::Reference, MAX_AXIS_SPEED);
        assert!((b.vel.x + 1.04).abs() < 1e-6);
        assert!((b.vel.y + 2.03).abs() < 1e-6);
    }

    #[test]
    fn test_zero_velocity_gets_pushed_positive() {
        let mut b = ball(Vec2::new(0.02, 0.01));
        b.advance(VelocityClamp::Reference, MAX_AXIS_SPEED);
        assert!((b.vel.x - 0.02).abs() < 1e-6);
        assert!((b.vel.y - 0.01).abs() < 1e-6);
    }

    #[test]
    fn test_negative_gravity_pulls_toward_zero() {
        let mut b = ball(Vec2::new(-0.5, 0.01));
        b.vel = Vec2::new(-2.0, 0.0);
        b.advance(VelocityClamp::Reference, MAX_AXIS_SPEED);
        assert!((b.vel.x + 1.5).abs() < 1e-6);
    }

    #[test]
    fn test_reference_clamp_has_no_lower_y_bound() {
        // Known quirk: y is only capped from above
        let mut b = ball(Vec2::new(0.05, 0.05));
        b.vel = Vec2::new(-7.0, -7.0);
        b.advance(VelocityClamp::Reference, MAX_AXIS_SPEED);
        assert_eq!(b.vel.x, -MAX_AXIS_SPEED);
        assert!(b.vel.y < -MAX_AXIS_SPEED);
    }

    #[test]
    fn test_symmetric_clamp_bounds_upward_speed() {
        let mut b = ball(Vec2::new(0.05, 0.05));
        b.vel = Vec2::new(-7.0, -7.0);
        b.advance(VelocityClamp::Symmetric, MAX_AXIS_SPEED);
        assert_eq!(b.vel, Vec2::splat(-MAX_AXIS_SPEED));
    }

    #[test]
    fn test_lookahead_offsets_by_radius_and_velocity() {
        let mut b = ball(Vec2::ZERO);
        b.vel = Vec2::new(2.0, -3.0);
        assert_eq!(b.lookahead(), Vec2::new(112.0, 107.0));
    }

    #[test]
    fn test_rebound_negates_both_axes() {
        let mut b = ball(Vec2::ZERO);
        b.vel = Vec2::new(2.0, -3.0);
        b.rebound();
        assert_eq!(b.vel, Vec2::new(-2.0, 3.0));
    }

    proptest! {
        #[test]
        fn prop_clamp_bounds_after_step(
            vx in -50.0f32..50.0,
            vy in -50.0f32..50.0,
            seed in any::<u64>(),
            steps in 1usize..50,
        ) {
            let mut rng = Pcg32::seed_from_u64(seed);
            let mut b = Ball::spawn(1, Vec2::ZERO, 10.0, &mut rng);
            b.vel = Vec2::new(vx, vy);
            for _ in 0..steps {
                b.advance(VelocityClamp::Reference, MAX_AXIS_SPEED);
                prop_assert!(b.vel.y <= MAX_AXIS_SPEED);
                prop_assert!(b.vel.x <= MAX_AXIS_SPEED);
                prop_assert!(b.vel.x >= -MAX_AXIS_SPEED);
                prop_assert_eq!(b.radius(), 10.0);
            }
        }
    }
}

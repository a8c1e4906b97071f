//! Per-ball gravity
//!
//! Each ball draws one x and one y magnitude at creation, uniformly from
//! fixed candidate sets. Negative x candidates pull toward zero instead of
//! pushing away from it (see [`super::ball::Ball::advance`]).

use glam::Vec2;
use rand::Rng;

/// Candidate x magnitudes
pub const GRAVITY_X: [f32; 6] = [0.05, 0.04, 0.03, 0.02, -0.1, -0.5];
/// Candidate y magnitudes
pub const GRAVITY_Y: [f32; 5] = [0.05, 0.04, 0.03, 0.02, 0.01];

/// Sample one gravity vector from the candidate tables
pub fn sample_gravity<R: Rng + ?Sized>(rng: &mut R) -> Vec2 {
    Vec2::new(
        GRAVITY_X[rng.random_range(0..GRAVITY_X.len())],
        GRAVITY_Y[rng.random_range(0..GRAVITY_Y.len())],
    )
}

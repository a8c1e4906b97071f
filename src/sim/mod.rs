//! Deterministic simulation module
//!
//! All simulation logic lives here. This module must be pure and deterministic:
//! - One logical step per call, no wall-clock input
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering or platform dependencies

pub mod ball;
pub mod color;
pub mod gravity;
pub mod ring;
pub mod state;
pub mod step;

pub use ball::Ball;
pub use color::random_color;
pub use gravity::{GRAVITY_X, GRAVITY_Y, sample_gravity};
pub use ring::Ring;
pub use state::SimulationState;
pub use step::{StepReport, step};

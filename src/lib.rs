//! Ring Escape - balls escaping a rotating ring
//!
//! Core modules:
//! - `sim`: Deterministic simulation (ball, ring, per-frame stepper)
//! - `driver`: Throttled animation loop with start/stop/reset lifecycle
//! - `platform`: Collaborator contracts plus headless and browser hosts
//! - `render`: Frame drawing through a `RenderSink`
//! - `settings`: Data-driven constants

pub mod driver;
pub mod error;
pub mod platform;
pub mod render;
pub mod settings;
pub mod sim;

pub use driver::{AnimationDriver, Control, DriverPhase};
pub use error::SettingsError;
pub use settings::{Settings, VelocityClamp};

use glam::Vec2;

/// Simulation configuration constants
pub mod consts {
    /// Minimum wall time between two logical updates (~60 Hz)
    pub const FRAME_INTERVAL_MS: f64 = 1000.0 / 60.0;
    /// Period of the elapsed-seconds counter
    pub const SECOND_MS: u32 = 1000;

    /// Canvas defaults
    pub const CANVAS_WIDTH: f32 = 700.0;
    pub const CANVAS_HEIGHT_RATIO: f32 = 0.9;

    /// Ring radius is the canvas width minus this inset
    pub const RING_INSET: f32 = 400.0;
    /// Ring rotation per step, in π-radians
    pub const RING_ROTATE_SPEED: f32 = 0.005;
    /// Initial gap boundaries, in π-radians
    pub const RING_START_ANGLE: f32 = 0.0;
    pub const RING_END_ANGLE: f32 = 1.75;
    /// Wrap thresholds, in π-radians
    pub const RING_START_WRAP: f32 = -2.0;
    pub const RING_END_WRAP: f32 = -0.25;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 10.0;
    /// Per-axis velocity cap (pixels per step)
    pub const MAX_AXIS_SPEED: f32 = 5.0;

    /// Escaped balls are despawned this far outside the ring
    pub const KILL_MARGIN: f32 = 200.0;
    /// Balls spawned for every despawned one
    pub const RESPAWN_COUNT: usize = 3;

    /// HUD styling
    pub const HUD_FONT: &str = "15px Oxanium";
    pub const HUD_COLOR: &str = "white";
    pub const RING_COLOR: &str = "gold";
}

/// Shift a degree value into [0, 360] by adding one turn when negative
#[inline]
pub fn normalize_degrees(deg: f32) -> f32 {
    if deg < 0.0 { deg + 360.0 } else { deg }
}

/// Angle of `point` around `center` in degrees, in [0, 360)
///
/// Canvas coordinates: y grows downward, so angles run clockwise on screen.
#[inline]
pub fn angle_degrees(center: Vec2, point: Vec2) -> f32 {
    let d = point - center;
    normalize_degrees(d.y.atan2(d.x).to_degrees())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_angle_degrees_quadrants() {
        let c = Vec2::new(100.0, 100.0);
        assert!((angle_degrees(c, Vec2::new(110.0, 100.0)) - 0.0).abs() < 1e-4);
        assert!((angle_degrees(c, Vec2::new(100.0, 110.0)) - 90.0).abs() < 1e-4);
        assert!((angle_degrees(c, Vec2::new(90.0, 100.0)) - 180.0).abs() < 1e-4);
        assert!((angle_degrees(c, Vec2::new(100.0, 90.0)) - 270.0).abs() < 1e-4);
    }

    #[test]
    fn test_angle_degrees_at_center_is_zero() {
        let c = Vec2::new(5.0, 5.0);
        assert_eq!(angle_degrees(c, c), 0.0);
    }

    #[test]
    fn test_normalize_degrees_adds_one_turn() {
        assert_eq!(normalize_degrees(-90.0), 270.0);
        assert_eq!(normalize_degrees(45.0), 45.0);
        // Only one turn is added
        assert_eq!(normalize_degrees(-400.0), -40.0);
    }
}

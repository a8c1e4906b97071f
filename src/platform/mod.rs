//! Platform abstraction layer
//!
//! The simulation never schedules anything itself. A host provides:
//! - Frame callbacks (`requestAnimationFrame` on web)
//! - A 1 Hz interval for the seconds counter
//! - A score display refreshed on every escape
//! - A 2D drawing surface
//!
//! Hosts call back into [`crate::AnimationDriver::on_frame`] and
//! [`crate::AnimationDriver::on_second`] with the handle they returned.

pub mod headless;
#[cfg(target_arch = "wasm32")]
pub mod web;

use glam::Vec2;

pub use headless::HeadlessHost;

/// Token for a requested frame callback
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameHandle(pub i32);

/// Token for a running interval
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerHandle(pub i32);

/// Schedules one-shot frame callbacks
pub trait FrameScheduler {
    fn request_frame(&mut self) -> FrameHandle;
    fn cancel_frame(&mut self, handle: FrameHandle);
}

/// Schedules repeating callbacks
pub trait IntervalTimer {
    fn every(&mut self, period_ms: u32) -> TimerHandle;
    fn cancel(&mut self, handle: TimerHandle);
}

/// Shows the number of escaped balls
pub trait ScoreDisplay {
    fn show_escape_count(&mut self, count: u64);
}

/// 2D drawing surface
///
/// Angles are radians, clockwise on screen (y grows downward).
pub trait RenderSink {
    fn clear(&mut self);
    fn stroke_arc(&mut self, center: Vec2, radius: f32, start: f32, end: f32, color: &str);
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: &str);
    fn draw_text(&mut self, text: &str, pos: Vec2, font: &str, color: &str);
}

/// Everything the driver needs from its environment
pub trait Host: FrameScheduler + IntervalTimer + ScoreDisplay + RenderSink {}

impl<T: FrameScheduler + IntervalTimer + ScoreDisplay + RenderSink> Host for T {}

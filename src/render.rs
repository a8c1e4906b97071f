//! Frame drawing
//!
//! Turns a simulation state into [`RenderSink`] calls. Draw order matters
//! for the canvas: balls first, then the HUD text, then the ring on top.

use glam::Vec2;

use crate::consts::{HUD_COLOR, HUD_FONT, RING_COLOR};
use crate::platform::RenderSink;
use crate::sim::SimulationState;

/// Ball counter label
pub fn ball_count_label(count: usize) -> String {
    format!("Balls: {}", count)
}

/// Elapsed time label, zero-padded to two digits
pub fn elapsed_label(seconds: u32) -> String {
    format!("Time (seconds): {:02}", seconds)
}

/// Draw one full frame
pub fn draw_frame<S: RenderSink + ?Sized>(state: &SimulationState, sink: &mut S) {
    let ring = &state.ring;
    let settings = &state.settings;

    sink.clear();

    for ball in &state.balls {
        sink.fill_circle(ball.pos, ball.radius(), ball.color());
    }

    // Ball count sits just above the ring, time in the top-right corner
    sink.draw_text(
        &ball_count_label(state.ball_count()),
        Vec2::new(ring.center.x - 20.0, ring.center.y - ring.radius - 10.0),
        HUD_FONT,
        HUD_COLOR,
    );
    sink.draw_text(
        &elapsed_label(state.elapsed_seconds),
        Vec2::new(settings.canvas_width - 140.0, 25.0),
        HUD_FONT,
        HUD_COLOR,
    );

    let (start, end) = ring.arc_radians();
    sink.stroke_arc(ring.center, ring.radius, start, end, RING_COLOR);
}

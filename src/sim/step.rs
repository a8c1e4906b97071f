//! Per-frame simulation step
//!
//! Core update that advances the ring and every ball once. Removals and
//! respawns are planned while iterating and applied afterwards in one
//! batch, so no ball is skipped or processed twice.

use super::state::SimulationState;
use crate::angle_degrees;

/// What happened during one step
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StepReport {
    /// Balls that hit the solid part of the ring and reversed
    pub rebounds: u32,
    /// Balls whose escaped flag was set this step
    pub newly_escaped: u32,
    /// IDs of balls despawned this step, in collection order
    pub removed: Vec<u32>,
    /// Escape counter value after each despawn event
    pub escape_counts: Vec<u64>,
}

impl StepReport {
    /// Number of despawn+respawn events
    pub fn escapes(&self) -> usize {
        self.removed.len()
    }
}

/// Advance the simulation by one step
pub fn step(state: &mut SimulationState) -> StepReport {
    let mut report = StepReport::default();

    state.ring.advance();

    let ring = &state.ring;
    let clamp = state.settings.velocity_clamp;
    let max_speed = state.settings.max_axis_speed;
    let kill_radius = ring.kill_radius(state.settings.kill_margin);

    // Plan pass: move every ball, resolve the ring boundary, collect removals
    for ball in &mut state.balls {
        ball.advance(clamp, max_speed);

        let probe = ball.lookahead();
        let distance = probe.distance(ring.center);
        let ball_angle = angle_degrees(ring.center, probe);
        debug_assert!(
            distance.is_finite() && ball_angle.is_finite(),
            "ball {} has corrupt state: pos={:?} vel={:?}",
            ball.id,
            ball.pos,
            ball.vel
        );

        if distance <= ring.radius {
            continue;
        }

        if !ball.is_escaped() && !ring.in_gap(ball_angle) {
            ball.rebound();
            report.rebounds += 1;
        } else {
            if !ball.is_escaped() {
                report.newly_escaped += 1;
            }
            ball.mark_escaped();
            if distance > kill_radius {
                report.removed.push(ball.id);
            }
        }
    }

    // Apply pass: drop despawned balls, then respawn for each one in order
    if !report.removed.is_empty() {
        let removed = &report.removed;
        state.balls.retain(|b| !removed.contains(&b.id));

        for &id in &report.removed {
            state.escaped_count += 1;
            for _ in 0..state.settings.respawn_count {
                state.spawn_ball();
            }
            report.escape_counts.push(state.escaped_count);
            log::debug!(
                "Ball {} escaped (total {}), {} balls live",
                id,
                state.escaped_count,
                state.balls.len()
            );
        }
    }

    state.steps += 1;

    report
}

//! Simulation settings
//!
//! Every tunable constant of the simulation, loadable from JSON. Missing
//! fields fall back to the defaults in [`crate::consts`].

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::SettingsError;

/// How the per-axis velocity cap is applied
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum VelocityClamp {
    /// x is capped on both sides, y only from above, so upward speed
    /// can grow without bound
    #[default]
    Reference,
    /// Both axes capped on both sides
    Symmetric,
}

impl VelocityClamp {
    pub fn as_str(&self) -> &'static str {
        match self {
            VelocityClamp::Reference => "reference",
            VelocityClamp::Symmetric => "symmetric",
        }
    }

    /// Apply the cap to a velocity
    pub fn apply(&self, mut vel: Vec2, max: f32) -> Vec2 {
        if vel.y >= max {
            vel.y = max;
        }
        if vel.x >= max {
            vel.x = max;
        }
        if vel.x <= -max {
            vel.x = -max;
        }
        if *self == VelocityClamp::Symmetric && vel.y <= -max {
            vel.y = -max;
        }
        vel
    }
}

/// Simulation settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Canvas ===
    /// Canvas width in pixels (the browser host overrides this with the
    /// real canvas width)
    pub canvas_width: f32,
    /// Canvas height as a fraction of its width
    pub height_ratio: f32,

    // === Ring ===
    /// Ring radius = canvas_width - ring_inset
    pub ring_inset: f32,
    /// Gap rotation per step (π-radians)
    pub rotate_speed: f32,

    // === Balls ===
    pub ball_radius: f32,
    /// Per-axis velocity cap
    pub max_axis_speed: f32,
    pub velocity_clamp: VelocityClamp,
    /// Distance past the ring at which escaped balls are despawned
    pub kill_margin: f32,
    /// Balls spawned per despawn
    pub respawn_count: usize,

    // === Timing ===
    /// Minimum wall time between logical updates
    pub frame_interval_ms: f64,

    /// RNG seed (None = seeded from the clock)
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            canvas_width: CANVAS_WIDTH,
            height_ratio: CANVAS_HEIGHT_RATIO,

            ring_inset: RING_INSET,
            rotate_speed: RING_ROTATE_SPEED,

            ball_radius: BALL_RADIUS,
            max_axis_speed: MAX_AXIS_SPEED,
            velocity_clamp: VelocityClamp::Reference,
            kill_margin: KILL_MARGIN,
            respawn_count: RESPAWN_COUNT,

            frame_interval_ms: FRAME_INTERVAL_MS,

            seed: None,
        }
    }
}

impl Settings {
    /// Parse and validate settings from JSON text
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Canvas height in pixels
    pub fn canvas_height(&self) -> f32 {
        self.canvas_width * self.height_ratio
    }

    /// Canvas midpoint, which is also the ring center
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.canvas_width / 2.0, self.canvas_height() / 2.0)
    }

    /// Ring radius derived from the canvas width
    pub fn ring_radius(&self) -> f32 {
        self.canvas_width - self.ring_inset
    }

    /// Check every field is usable by the simulation
    pub fn validate(&self) -> Result<(), SettingsError> {
        positive("canvas_width", self.canvas_width as f64)?;
        positive("height_ratio", self.height_ratio as f64)?;
        positive("ring_radius", self.ring_radius() as f64)?;
        positive("rotate_speed", self.rotate_speed as f64)?;
        positive("ball_radius", self.ball_radius as f64)?;
        positive("max_axis_speed", self.max_axis_speed as f64)?;
        positive("frame_interval_ms", self.frame_interval_ms)?;

        if !self.kill_margin.is_finite() || self.kill_margin < 0.0 {
            return Err(SettingsError::Invalid {
                field: "kill_margin",
                value: self.kill_margin as f64,
                reason: "must be finite and not negative",
            });
        }
        if self.respawn_count == 0 {
            return Err(SettingsError::Invalid {
                field: "respawn_count",
                value: 0.0,
                reason: "at least one ball must respawn",
            });
        }
        Ok(())
    }
}

fn positive(field: &'static str, value: f64) -> Result<(), SettingsError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(SettingsError::Invalid {
            field,
            value,
            reason: "must be finite and positive",
        })
    }
}

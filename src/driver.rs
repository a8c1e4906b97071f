//! Animation driver
//!
//! Owns the simulation and its start/stop/reset lifecycle. The host fires
//! frame callbacks at whatever rate it likes; the driver performs at most
//! one step per `frame_interval_ms` of wall time and never catches up on
//! skipped time.

use serde::{Deserialize, Serialize};

use crate::consts::SECOND_MS;
use crate::platform::{FrameHandle, Host, TimerHandle};
use crate::render::draw_frame;
use crate::settings::Settings;
use crate::sim::{SimulationState, step};

/// Lifecycle phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DriverPhase {
    /// No frame or timer pending
    Stopped,
    /// Frame loop and seconds counter active
    Running,
}

/// User commands (the page's Start / Stop / Reset buttons)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Control {
    Start,
    Stop,
    Reset,
}

impl Control {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "start" => Some(Control::Start),
            "stop" => Some(Control::Stop),
            "reset" => Some(Control::Reset),
            _ => None,
        }
    }

    /// DOM id of the matching button
    pub fn element_id(&self) -> &'static str {
        match self {
            Control::Start => "start",
            Control::Stop => "stop",
            Control::Reset => "reset",
        }
    }
}

/// Fixed-rate animation loop around a [`SimulationState`]
#[derive(Debug)]
pub struct AnimationDriver {
    state: SimulationState,
    phase: DriverPhase,
    /// Frame the driver is waiting on; any other handle is stale
    frame: Option<FrameHandle>,
    /// Seconds interval currently counting
    timer: Option<TimerHandle>,
    /// Timestamp of the last frame that stepped
    last_time: Option<f64>,
    frames_stepped: u64,
}

impl AnimationDriver {
    pub fn new(settings: Settings, seed: u64) -> Self {
        Self {
            state: SimulationState::new(settings, seed),
            phase: DriverPhase::Stopped,
            frame: None,
            timer: None,
            last_time: None,
            frames_stepped: 0,
        }
    }

    /// Begin the frame loop and the seconds counter (no-op when running)
    pub fn start<H: Host>(&mut self, host: &mut H) {
        if self.phase == DriverPhase::Running {
            return;
        }
        self.phase = DriverPhase::Running;
        self.frame = Some(host.request_frame());
        self.timer = Some(host.every(SECOND_MS));
        log::info!(
            "Animation started ({} balls, {}s elapsed)",
            self.state.ball_count(),
            self.state.elapsed_seconds
        );
    }

    /// Cancel the frame loop and the seconds counter
    pub fn stop<H: Host>(&mut self, host: &mut H) {
        if self.phase == DriverPhase::Running {
            log::info!("Animation stopped at {}s", self.state.elapsed_seconds);
        }
        self.cancel(host);
    }

    /// Reinitialize the simulation and start again
    ///
    /// The last-frame timestamp is cleared too, so the first frame after a
    /// reset only records the time and the next one steps.
    pub fn reset<H: Host>(&mut self, host: &mut H) {
        self.cancel(host);
        self.state.reset();
        self.last_time = None;
        log::info!(
            "Animation reset ({} escaped so far)",
            self.state.escaped_count
        );
        self.start(host);
    }

    /// Dispatch a user command
    pub fn handle<H: Host>(&mut self, control: Control, host: &mut H) {
        match control {
            Control::Start => self.start(host),
            Control::Stop => self.stop(host),
            Control::Reset => self.reset(host),
        }
    }

    fn cancel<H: Host>(&mut self, host: &mut H) {
        if let Some(handle) = self.frame.take() {
            host.cancel_frame(handle);
        }
        if let Some(handle) = self.timer.take() {
            host.cancel(handle);
        }
        self.phase = DriverPhase::Stopped;
    }

    /// Frame callback; returns true if the simulation stepped
    pub fn on_frame<H: Host>(&mut self, handle: FrameHandle, now_ms: f64, host: &mut H) -> bool {
        if self.frame != Some(handle) {
            log::trace!("Ignoring stale frame {:?}", handle);
            return false;
        }
        self.frame = Some(host.request_frame());

        let last = *self.last_time.get_or_insert(now_ms);
        let elapsed = now_ms - last;
        if elapsed <= self.state.settings.frame_interval_ms {
            return false;
        }

        let report = step(&mut self.state);
        for &count in &report.escape_counts {
            host.show_escape_count(count);
        }
        draw_frame(&self.state, host);

        self.last_time = Some(now_ms);
        self.frames_stepped += 1;
        true
    }

    /// Seconds-counter callback
    pub fn on_second(&mut self, handle: TimerHandle) {
        if self.timer != Some(handle) {
            log::trace!("Ignoring stale timer {:?}", handle);
            return;
        }
        self.state.elapsed_seconds += 1;
    }

    pub fn phase(&self) -> DriverPhase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.phase == DriverPhase::Running
    }

    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    pub fn ball_count(&self) -> usize {
        self.state.ball_count()
    }

    pub fn elapsed_seconds(&self) -> u32 {
        self.state.elapsed_seconds
    }

    pub fn escaped_count(&self) -> u64 {
        self.state.escaped_count
    }

    /// Frames that performed a simulation step
    pub fn frames_stepped(&self) -> u64 {
        self.frames_stepped
    }
}

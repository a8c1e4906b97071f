//! Headless host
//!
//! A manual clock standing in for the browser: frames and intervals fire
//! only when [`HeadlessHost::run`] advances time. Drawing and score calls
//! are recorded instead of displayed. Used by the native binary and tests.

use glam::Vec2;
use serde::Serialize;

use super::{FrameHandle, FrameScheduler, IntervalTimer, RenderSink, ScoreDisplay, TimerHandle};
use crate::driver::AnimationDriver;

/// Summary of draw calls
#[derive(Debug, Clone, Default, Serialize)]
pub struct DrawLog {
    pub clears: u64,
    pub circles: u64,
    pub arcs: u64,
    /// Circles drawn since the last clear
    pub circles_last_frame: usize,
    /// Text drawn since the last clear
    pub last_texts: Vec<String>,
    /// Last ring arc `(start, end)` in radians
    pub last_arc: Option<(f32, f32)>,
}

#[derive(Debug, Clone)]
struct Interval {
    handle: TimerHandle,
    period_ms: f64,
    next_fire_ms: f64,
}

/// Manual-clock host
#[derive(Debug, Default)]
pub struct HeadlessHost {
    now_ms: f64,
    next_handle: i32,
    pending_frame: Option<FrameHandle>,
    frames_requested: u64,
    intervals: Vec<Interval>,
    step_times: Vec<f64>,
    score_history: Vec<u64>,
    draw: DrawLog,
}

impl HeadlessHost {
    pub fn new() -> Self {
        Self::default()
    }

    fn allocate_handle(&mut self) -> i32 {
        self.next_handle += 1;
        self.next_handle
    }

    /// Advance the clock by `duration_ms`, delivering a frame callback every
    /// `frame_period_ms` and interval callbacks when they come due
    pub fn run(&mut self, driver: &mut AnimationDriver, duration_ms: f64, frame_period_ms: f64) {
        let end = self.now_ms + duration_ms;
        loop {
            let next = self.now_ms + frame_period_ms;
            if next > end {
                break;
            }
            self.now_ms = next;
            self.fire_intervals(driver);

            if let Some(handle) = self.pending_frame.take() {
                let now = self.now_ms;
                if driver.on_frame(handle, now, self) {
                    self.step_times.push(now);
                }
            }
        }
        self.now_ms = end;
        self.fire_intervals(driver);
    }

    fn fire_intervals(&mut self, driver: &mut AnimationDriver) {
        for interval in &mut self.intervals {
            while interval.next_fire_ms <= self.now_ms {
                driver.on_second(interval.handle);
                interval.next_fire_ms += interval.period_ms;
            }
        }
    }

    pub fn now_ms(&self) -> f64 {
        self.now_ms
    }

    pub fn pending_frame(&self) -> Option<FrameHandle> {
        self.pending_frame
    }

    pub fn frames_requested(&self) -> u64 {
        self.frames_requested
    }

    pub fn active_timers(&self) -> usize {
        self.intervals.len()
    }

    /// Clock values of the frames that stepped the simulation
    pub fn step_times(&self) -> &[f64] {
        &self.step_times
    }

    /// Every escape count shown, in order
    pub fn score_history(&self) -> &[u64] {
        &self.score_history
    }

    pub fn draw_log(&self) -> &DrawLog {
        &self.draw
    }
}

impl FrameScheduler for HeadlessHost {
    fn request_frame(&mut self) -> FrameHandle {
        let handle = FrameHandle(self.allocate_handle());
        self.pending_frame = Some(handle);
        self.frames_requested += 1;
        handle
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        if self.pending_frame == Some(handle) {
            self.pending_frame = None;
        }
    }
}

impl IntervalTimer for HeadlessHost {
    fn every(&mut self, period_ms: u32) -> TimerHandle {
        let handle = TimerHandle(self.allocate_handle());
        let period_ms = period_ms as f64;
        self.intervals.push(Interval {
            handle,
            period_ms,
            next_fire_ms: self.now_ms + period_ms,
        });
        handle
    }

    fn cancel(&mut self, handle: TimerHandle) {
        self.intervals.retain(|i| i.handle != handle);
    }
}

impl ScoreDisplay for HeadlessHost {
    fn show_escape_count(&mut self, count: u64) {
        self.score_history.push(count);
    }
}

impl RenderSink for HeadlessHost {
    fn clear(&mut self) {
        self.draw.clears += 1;
        self.draw.circles_last_frame = 0;
        self.draw.last_texts.clear();
    }

    fn stroke_arc(&mut self, _center: Vec2, _radius: f32, start: f32, end: f32, _color: &str) {
        self.draw.arcs += 1;
        self.draw.last_arc = Some((start, end));
    }

    fn fill_circle(&mut self, _center: Vec2, _radius: f32, _color: &str) {
        self.draw.circles += 1;
        self.draw.circles_last_frame += 1;
    }

    fn draw_text(&mut self, text: &str, _pos: Vec2, _font: &str, _color: &str) {
        self.draw.last_texts.push(text.to_string());
    }
}

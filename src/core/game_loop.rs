//! Clock and frame scheduling for the real-time loop.
//!
//! The terminal driver asks the scheduler whether a frame is due, runs one
//! tick+render pair when it is, and re-requests the next frame only while the
//! run continues.

use std::time::{Duration, Instant};

/// Monotonic millisecond clock.
pub trait Clock {
    fn now_ms(&self) -> u64;
}

/// Milliseconds elapsed since the clock was created.
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    start: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn now_ms(&self) -> u64 {
        self.start.elapsed().as_millis() as u64
    }
}

/// What the loop should do after a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameStatus {
    /// Schedule another frame.
    Continue,
    /// The run is not active; stop rescheduling.
    Stopped,
}

/// "Call me back before the next frame", with clean cancellation.
#[derive(Debug, Clone)]
pub struct FrameScheduler {
    interval: Duration,
    next_frame: Option<Instant>,
}

impl FrameScheduler {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            next_frame: None,
        }
    }

    /// Run a frame as soon as possible.
    pub fn request_now(&mut self, now: Instant) {
        self.next_frame = Some(now);
    }

    /// Run a frame one interval after `now`.
    pub fn request(&mut self, now: Instant) {
        self.next_frame = Some(now + self.interval);
    }

    /// Stop rescheduling. Idempotent.
    pub fn cancel(&mut self) {
        self.next_frame = None;
    }

    pub fn is_active(&self) -> bool {
        self.next_frame.is_some()
    }

    /// True when a frame is pending and its time has come.
    pub fn is_due(&self, now: Instant) -> bool {
        self.next_frame.is_some_and(|at| now >= at)
    }

    /// Apply a frame's outcome: reschedule or stop.
    pub fn after_frame(&mut self, status: FrameStatus, now: Instant) {
        match status {
            FrameStatus::Continue => self.request(now),
            FrameStatus::Stopped => self.cancel(),
        }
    }

    /// How long the input poll may block without delaying the next frame.
    pub fn poll_timeout(&self, now: Instant, idle: Duration) -> Duration {
        match self.next_frame {
            Some(at) => at.saturating_duration_since(now).min(idle),
            None => idle,
        }
    }
}

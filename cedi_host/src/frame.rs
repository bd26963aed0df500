//! Frame pacing
//!
//! The host sleeps on window events until a command asks for continuous
//! redraw (smooth scrolling), then polls and feeds the measured frame time
//! back into the session until the animation settles.

use std::time::{Duration, Instant};

use cedi_core::Damage;

/// Source of monotonic timestamps
pub trait Clock {
    /// Time since some fixed origin
    fn now(&self) -> Duration;
}

/// Wall clock based on [`Instant`]
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

/// How the event loop should wait before the next frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitMode {
    /// Block until the next input event
    WaitEvents,
    /// Return immediately and draw again
    Poll,
}

/// Cumulative frame statistics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameStats {
    pub frame_count: u64,
    pub last_frame: Duration,
    pub min_frame: Duration,
    pub max_frame: Duration,
    pub total: Duration,
}

impl FrameStats {
    pub fn average(&self) -> Duration {
        match u32::try_from(self.frame_count) {
            Ok(0) | Err(_) => Duration::ZERO,
            Ok(count) => self.total / count,
        }
    }

    fn record(&mut self, frame: Duration) {
        self.min_frame = if self.frame_count == 0 {
            frame
        } else {
            self.min_frame.min(frame)
        };
        self.max_frame = self.max_frame.max(frame);
        self.last_frame = frame;
        self.total += frame;
        self.frame_count += 1;
    }
}

/// Chooses between waiting and polling and measures frame time
#[derive(Debug, Clone)]
pub struct FramePacer {
    mode: WaitMode,
    last_frame_start: Option<Duration>,
    stats: FrameStats,
}

impl FramePacer {
    pub fn new() -> Self {
        Self {
            mode: WaitMode::WaitEvents,
            last_frame_start: None,
            stats: FrameStats::default(),
        }
    }

    pub fn mode(&self) -> WaitMode {
        self.mode
    }

    pub fn stats(&self) -> FrameStats {
        self.stats
    }

    /// Start a frame at `now`; returns seconds since the previous frame start
    pub fn frame_begin(&mut self, now: Duration) -> f32 {
        let elapsed = match self.last_frame_start {
            Some(previous) => now.saturating_sub(previous),
            None => Duration::ZERO,
        };
        if self.last_frame_start.is_some() {
            self.stats.record(elapsed);
        }
        self.last_frame_start = Some(now);
        elapsed.as_secs_f32()
    }

    /// Pick the wait mode for the next frame from what the session reported
    pub fn frame_end(&mut self, damage: &Damage) -> WaitMode {
        self.mode = if damage.continuous_redraw {
            WaitMode::Poll
        } else {
            WaitMode::WaitEvents
        };
        self.mode
    }
}

impl Default for FramePacer {
    fn default() -> Self {
        Self::new()
    }
}

//! # Frame Clock
//!
//! Measures frame times and keeps a fixed-length history of them, newest first,
//! for frame-time graphs and averages.

use std::collections::VecDeque;

use web_time::{Duration, Instant};

/// Number of frame times kept.
pub const FRAME_HISTORY: usize = 1024;

/// Wall-clock frame timer.
pub struct FrameClock {
    last: Instant,
    /// Frame times in seconds, newest first, always `FRAME_HISTORY` long
    history: VecDeque<f32>,
    frames: u64,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameClock {
    /// Starts the clock with an all-zero history.
    pub fn new() -> Self {
        FrameClock {
            last: Instant::now(),
            history: std::iter::repeat(0.0).take(FRAME_HISTORY).collect(),
            frames: 0,
        }
    }

    /// Measures the time since the previous call (or since creation).
    ///
    /// # Returns
    /// The new frame time
    pub fn update(&mut self) -> Duration {
        let now = Instant::now();
        let elapsed = now - self.last;
        self.last = now;
        self.record(elapsed);
        elapsed
    }

    /// Records a frame time without reading the wall clock, for fixed-step runs.
    pub fn record(&mut self, elapsed: Duration) {
        self.history.pop_back();
        self.history.push_front(elapsed.as_secs_f32());
        self.frames += 1;
    }

    /// The most recent frame time in seconds.
    pub fn delta(&self) -> f32 {
        self.history.front().copied().unwrap_or(0.0)
    }

    /// Mean frame time over the recorded frames, at most `FRAME_HISTORY` of them.
    pub fn average(&self) -> f32 {
        let recorded = (self.frames as usize).min(FRAME_HISTORY);
        if recorded == 0 {
            return 0.0;
        }
        self.history.iter().take(recorded).sum::<f32>() / recorded as f32
    }

    /// Frames per second derived from the average frame time.
    pub fn fps(&self) -> f32 {
        let average = self.average();
        if average > 0.0 {
            1.0 / average
        } else {
            0.0
        }
    }

    /// Frame times, newest first.
    pub fn history(&self) -> impl Iterator<Item = f32> + '_ {
        self.history.iter().copied()
    }

    /// Frames recorded since creation.
    pub fn frames(&self) -> u64 {
        self.frames
    }
}

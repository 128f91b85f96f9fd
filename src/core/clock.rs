//! Frame Clock
//!
//! Paces the coordinator to a fixed target frame duration and reports the
//! real elapsed time between ticks.

use std::thread;
use std::time::{Duration, Instant};

/// Sleeps away the remainder of each frame and measures delta-time.
///
/// The clock never busy-waits: if a frame already overran its budget,
/// [`FrameClock::tick`] returns immediately with the true elapsed time.
#[derive(Debug)]
pub struct FrameClock {
    /// Target duration of one frame.
    target: Duration,
    /// When the previous tick returned.
    last: Instant,
    /// Number of ticks that overran the target (no sleep happened).
    overruns: u64,
}

impl FrameClock {
    /// Create a clock with an explicit frame budget.
    pub fn new(target: Duration) -> Self {
        Self {
            target,
            last: Instant::now(),
            overruns: 0,
        }
    }

    /// Create a clock targeting `fps` frames per second.
    ///
    /// `fps == 0` yields an unpaced clock.
    pub fn from_fps(fps: u32) -> Self {
        let target = if fps == 0 {
            Duration::ZERO
        } else {
            Duration::from_nanos(1_000_000_000 / fps as u64)
        };
        Self::new(target)
    }

    /// Target frame duration.
    pub fn target(&self) -> Duration {
        self.target
    }

    /// Ticks that returned without sleeping because the frame ran long.
    pub fn overruns(&self) -> u64 {
        self.overruns
    }

    /// Restart measurement from now.
    pub fn reset(&mut self) {
        self.last = Instant::now();
    }

    /// Wait out the rest of the frame, then return seconds since the last tick.
    pub fn tick(&mut self) -> f64 {
        let elapsed = self.last.elapsed();
        if let Some(remaining) = self.target.checked_sub(elapsed) {
            if !remaining.is_zero() {
                thread::sleep(remaining);
            }
        } else {
            self.overruns += 1;
        }

        let now = Instant::now();
        let delta = now.saturating_duration_since(self.last);
        self.last = now;
        delta.as_secs_f64()
    }
}

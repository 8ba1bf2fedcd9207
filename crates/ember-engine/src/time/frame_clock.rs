use std::time::{Duration, Instant};

/// Frame timing snapshot.
#[derive(Debug, Copy, Clone)]
pub struct FrameTime {
    /// Seconds since the previous tick; `0.0` after a stall.
    pub dt: f32,

    /// Monotonic timestamp taken at the tick.
    pub now: Instant,

    pub frame_index: u64,
}

/// Produces per-frame delta time.
///
/// A delta longer than `max_delta` (window drag, debugger pause, suspend) is
/// replaced by zero so the simulation skips the gap instead of leaping across it.
#[derive(Debug, Clone)]
pub struct FrameClock {
    last: Instant,
    frame_index: u64,
    max_delta: Duration,
    warn_on_overhead: bool,
}

impl FrameClock {
    pub const DEFAULT_MAX_DELTA: Duration = Duration::from_secs(10);

    pub fn new() -> Self {
        Self::with_max_delta(Self::DEFAULT_MAX_DELTA)
    }

    pub fn with_max_delta(max_delta: Duration) -> Self {
        Self::starting_at(Instant::now(), max_delta)
    }

    pub(crate) fn starting_at(start: Instant, max_delta: Duration) -> Self {
        Self {
            last: start,
            frame_index: 0,
            max_delta,
            warn_on_overhead: true,
        }
    }

    /// Whether a zeroed delta is reported with `log::warn!`.
    pub fn warn_on_overhead(mut self, warn: bool) -> Self {
        self.warn_on_overhead = warn;
        self
    }

    /// Resets the baseline, e.g. after the window was occluded.
    pub fn reset(&mut self) {
        self.last = Instant::now();
    }

    pub fn tick(&mut self) -> FrameTime {
        self.tick_at(Instant::now())
    }

    pub fn tick_at(&mut self, now: Instant) -> FrameTime {
        let elapsed = now.saturating_duration_since(self.last);

        let dt = if elapsed > self.max_delta {
            if self.warn_on_overhead {
                log::warn!(
                    "frame took {:.2}s (limit {:.2}s); delta time set to 0",
                    elapsed.as_secs_f32(),
                    self.max_delta.as_secs_f32()
                );
            }
            0.0
        } else {
            elapsed.as_secs_f32()
        };

        self.last = now;

        let ft = FrameTime {
            dt,
            now,
            frame_index: self.frame_index,
        };
        self.frame_index = self.frame_index.wrapping_add(1);
        ft
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

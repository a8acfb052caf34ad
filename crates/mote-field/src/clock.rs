//! Frame timing.

use std::time::Instant;

/// Length of one frame at 60fps; simulation speeds are expressed per frame.
pub const FRAME_UNIT_MS: f32 = 16.666;
/// Longest frame gap fed into the simulation, so a stall does not teleport
/// particles.
pub const MAX_FRAME_MS: f32 = 40.0;

/// Timing inputs for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameTick {
    /// Milliseconds since the clock started.
    pub now_ms: f64,
    /// Elapsed time in 60fps frames, after capping.
    pub scale: f32,
    /// Seconds since the clock started.
    pub time_secs: f32,
}

/// Elapsed milliseconds to simulation time scale.
pub fn time_scale(elapsed_ms: f32) -> f32 {
    elapsed_ms.clamp(0.0, MAX_FRAME_MS) / FRAME_UNIT_MS
}

/// Monotonic clock producing one [`FrameTick`] per rendered frame.
#[derive(Debug, Clone)]
pub struct FrameClock {
    start: Instant,
    last_ms: f64,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
            last_ms: 0.0,
        }
    }

    /// Milliseconds since the clock started.
    pub fn now_ms(&self) -> f64 {
        self.start.elapsed().as_secs_f64() * 1000.0
    }

    /// Tick at the current time.
    pub fn tick(&mut self) -> FrameTick {
        let now = self.now_ms();
        self.tick_at(now)
    }

    /// Tick at an explicit time.
    pub fn tick_at(&mut self, now_ms: f64) -> FrameTick {
        let elapsed = (now_ms - self.last_ms) as f32;
        self.last_ms = now_ms;
        FrameTick {
            now_ms,
            scale: time_scale(elapsed),
            time_secs: (now_ms / 1000.0) as f32,
        }
    }
}

//! Frame timing for the burst loop.
//!
//! Provides the per-frame delta the physics step integrates over. Uses
//! `std::time` for high-precision timing with no external dependencies.
//!
//! Deltas are clamped to [`MAX_FRAME_DELTA`] before they reach the
//! simulation, so a stalled frame source (backgrounded surface, debugger
//! pause, dropped vsync) produces one slightly-too-short step instead of a
//! single huge step that teleports every particle.
//!
//! # Example
//!
//! ```ignore
//! use popfx::time::FrameClock;
//!
//! let mut clock = FrameClock::new();
//!
//! // In your frame callback:
//! let dt = clock.tick();
//! println!("Delta: {:.4}s (frame {})", dt, clock.frame());
//! ```

use std::time::Instant;

/// Upper bound on a single frame delta, in seconds.
///
/// At 60 fps the usual delta is ~0.0167 s, so the cap only engages after a
/// stall of about two missed frames.
pub const MAX_FRAME_DELTA: f32 = 0.033;

/// Wall-clock frame timing with a clamp on the delta.
///
/// `set_fixed_delta` substitutes a deterministic delta for tests and
/// headless stepping; fixed deltas still pass through the
/// [`MAX_FRAME_DELTA`] clamp.
#[derive(Debug)]
pub struct FrameClock {
    /// When the previous frame was ticked (or the clock restarted).
    last_frame: Instant,
    /// Clamped delta of the most recent tick, in seconds.
    delta_secs: f32,
    /// Frames ticked since the last restart.
    frame_count: u64,
    /// Fixed delta override for deterministic stepping.
    fixed_delta: Option<f32>,
}

impl FrameClock {
    /// Create a clock whose reference point is now.
    pub fn new() -> Self {
        Self {
            last_frame: Instant::now(),
            delta_secs: 0.0,
            frame_count: 0,
            fixed_delta: None,
        }
    }

    /// Move the reference point to now and zero the frame counter.
    ///
    /// Called at burst activation so the first frame measures from the
    /// activation instant, not from whenever the previous burst ended.
    pub fn restart(&mut self) {
        self.last_frame = Instant::now();
        self.delta_secs = 0.0;
        self.frame_count = 0;
    }

    /// Advance the clock by one frame and return the clamped delta.
    pub fn tick(&mut self) -> f32 {
        let now = Instant::now();
        let raw = self
            .fixed_delta
            .unwrap_or_else(|| now.duration_since(self.last_frame).as_secs_f32());
        self.last_frame = now;
        self.delta_secs = raw.clamp(0.0, MAX_FRAME_DELTA);
        self.frame_count += 1;
        self.delta_secs
    }

    /// Clamped delta of the most recent tick, in seconds.
    #[inline]
    pub fn delta(&self) -> f32 {
        self.delta_secs
    }

    /// Frames ticked since the last restart.
    #[inline]
    pub fn frame(&self) -> u64 {
        self.frame_count
    }

    /// Set a fixed delta time for deterministic stepping.
    ///
    /// Pass `None` to return to real frame timing.
    pub fn set_fixed_delta(&mut self, delta: Option<f32>) {
        self.fixed_delta = delta;
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

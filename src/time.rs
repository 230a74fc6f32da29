//! Frame timing for the external simulation loop.
//!
//! The particle system itself never reads the clock; the frame loop calls
//! [`FrameClock::tick`] once per frame and passes the returned `dt` to
//! `ParticleSystem::update`. Deltas are capped so a stalled frame (window
//! drag, breakpoint) cannot produce one giant integration step, and an
//! optional fixed delta makes stepping fully deterministic.

use std::time::{Duration, Instant};

/// How often the FPS estimate is refreshed.
const FPS_UPDATE_INTERVAL: Duration = Duration::from_millis(500);

/// Wall-clock frame timer.
///
/// # Example
///
/// ```
/// use spindrift::FrameClock;
///
/// let mut clock = FrameClock::new();
/// let dt = clock.tick();
/// assert!(dt >= 0.0 && dt <= 0.05);
/// ```
#[derive(Debug)]
pub struct FrameClock {
    start: Instant,
    last_frame: Instant,
    delta_secs: f32,
    elapsed_secs: f32,
    frame_count: u64,
    fps: f32,
    /// Start of the current FPS averaging window.
    fps_window_start: Instant,
    /// Frame count when the current window opened.
    frames_at_window_start: u64,
    /// Fixed delta for deterministic stepping, if set.
    fixed_delta: Option<f32>,
    /// Upper bound on a single frame's delta.
    max_delta: f32,
}

impl FrameClock {
    /// Default delta cap in seconds (20 fps floor).
    pub const DEFAULT_MAX_DELTA: f32 = 0.05;

    /// Create a clock starting from now.
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            start: now,
            last_frame: now,
            delta_secs: 0.0,
            elapsed_secs: 0.0,
            frame_count: 0,
            fps: 0.0,
            fps_window_start: now,
            frames_at_window_start: 0,
            fixed_delta: None,
            max_delta: Self::DEFAULT_MAX_DELTA,
        }
    }

    /// Advance the clock by one frame and return the frame's delta in
    /// seconds, capped at the configured maximum.
    pub fn tick(&mut self) -> f32 {
        let now = Instant::now();
        let raw_delta = now.duration_since(self.last_frame).as_secs_f32();
        self.delta_secs = self
            .fixed_delta
            .unwrap_or(raw_delta)
            .min(self.max_delta);
        self.last_frame = now;
        self.elapsed_secs = now.duration_since(self.start).as_secs_f32();
        self.frame_count += 1;
        self.refresh_fps(now);

        self.delta_secs
    }

    /// Re-estimate FPS once the current averaging window has run its
    /// course, then open a new window.
    fn refresh_fps(&mut self, now: Instant) {
        let window = now.duration_since(self.fps_window_start);
        if window < FPS_UPDATE_INTERVAL {
            return;
        }
        let frames = self.frame_count - self.frames_at_window_start;
        self.fps = frames as f32 / window.as_secs_f32();
        self.frames_at_window_start = self.frame_count;
        self.fps_window_start = now;
    }

    /// Delta of the most recent frame in seconds.
    #[inline]
    pub fn delta(&self) -> f32 {
        self.delta_secs
    }

    /// Seconds since the clock was created.
    #[inline]
    pub fn elapsed(&self) -> f32 {
        self.elapsed_secs
    }

    /// Frames ticked since creation.
    #[inline]
    pub fn frame(&self) -> u64 {
        self.frame_count
    }

    /// Estimated frames per second.
    #[inline]
    pub fn fps(&self) -> f32 {
        self.fps
    }

    /// Use a fixed delta instead of wall-clock time. `None` restores
    /// real timing.
    pub fn set_fixed_delta(&mut self, delta: Option<f32>) {
        self.fixed_delta = delta;
    }

    /// Set the per-frame delta cap.
    pub fn set_max_delta(&mut self, max_delta: f32) {
        self.max_delta = max_delta.max(0.0);
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

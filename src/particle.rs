//! Particle data and trail storage.
//!
//! A [`Particle`] is plain data living inside a fixed slot of the system's
//! arena; it is never allocated per spawn. Its [`Trail`] is a fixed-capacity
//! ring buffer of recent positions, reused across recycles.

use crate::config::MAX_TRAIL_LENGTH;
use glam::Vec3;

/// Bounded history of a particle's recent positions, most-recent-first.
///
/// Backed by a fixed array of [`MAX_TRAIL_LENGTH`] entries so that
/// shrinking or growing the runtime trail-length setting never reallocates.
/// Eviction is FIFO: pushing beyond the current capacity drops the oldest
/// position.
#[derive(Debug, Clone)]
pub struct Trail {
    positions: [Vec3; MAX_TRAIL_LENGTH],
    /// Index of the most recent position.
    head: usize,
    len: usize,
}

impl Trail {
    /// Create an empty trail.
    pub fn new() -> Self {
        Self {
            positions: [Vec3::ZERO; MAX_TRAIL_LENGTH],
            head: 0,
            len: 0,
        }
    }

    /// Push a position to the front, evicting the oldest entry when the
    /// trail already holds `capacity` positions.
    ///
    /// `capacity` is the current global trail-length setting and is
    /// silently limited to [`MAX_TRAIL_LENGTH`].
    pub fn push(&mut self, position: Vec3, capacity: usize) {
        let capacity = capacity.min(MAX_TRAIL_LENGTH).max(1);
        self.head = (self.head + MAX_TRAIL_LENGTH - 1) % MAX_TRAIL_LENGTH;
        self.positions[self.head] = position;
        self.len = (self.len + 1).min(capacity);
    }

    /// Drop the oldest entries until at most `capacity` remain.
    pub fn truncate(&mut self, capacity: usize) {
        self.len = self.len.min(capacity);
    }

    /// Forget all positions. Storage is retained.
    pub fn clear(&mut self) {
        self.len = 0;
    }

    /// Number of stored positions.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the trail holds no positions.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Iterate positions most-recent-first.
    pub fn iter(&self) -> impl Iterator<Item = Vec3> + '_ {
        (0..self.len).map(move |i| self.positions[(self.head + i) % MAX_TRAIL_LENGTH])
    }
}

impl Default for Trail {
    fn default() -> Self {
        Self::new()
    }
}

/// A single particle.
///
/// Lives in a reusable arena slot; all fields are overwritten on respawn.
/// `alpha` is derived from `age / lifetime` and kept in `[0, 1]` by
/// [`Particle::refresh_alpha`].
#[derive(Debug, Clone)]
pub struct Particle {
    /// World-space position.
    pub position: Vec3,
    /// Velocity in units per second.
    pub velocity: Vec3,
    /// Seconds since spawn. Never exceeds `lifetime` while live.
    pub age: f32,
    /// Total seconds before the particle is recycled.
    pub lifetime: f32,
    /// Render size. Constant over the particle's life.
    pub size: f32,
    /// RGB color, fixed at spawn.
    pub color: Vec3,
    /// Transparency derived from remaining life: 1 at spawn, 0 at expiry.
    pub alpha: f32,
    /// Recent position history.
    pub trail: Trail,
}

impl Particle {
    /// Recompute `alpha` from the remaining-life fraction.
    pub fn refresh_alpha(&mut self) {
        self.alpha = (1.0 - self.age / self.lifetime).clamp(0.0, 1.0);
    }

    /// Whether this particle has outlived its lifetime.
    #[inline]
    pub fn is_expired(&self) -> bool {
        self.age >= self.lifetime
    }
}

impl Default for Particle {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            velocity: Vec3::ZERO,
            age: 0.0,
            lifetime: 0.0,
            size: 0.0,
            color: Vec3::ZERO,
            alpha: 0.0,
            trail: Trail::new(),
        }
    }
}

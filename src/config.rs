//! System configuration and parameter limits.
//!
//! All mutable UI state (particle count, trail length) lives in
//! [`SystemConfig`], owned by the particle system and mutated only through
//! its setter methods. Setters clamp to the limits below instead of
//! failing; construction-time validation rejects degenerate ranges.

use crate::error::ConfigError;
use glam::Vec3;
use std::ops::Range;

/// Minimum number of live particles.
pub const MIN_PARTICLES: usize = 50;
/// Maximum number of live particles. Also the slot arena capacity.
pub const MAX_PARTICLES: usize = 500;
/// Minimum trail length (current position only is never dropped below 1).
pub const MIN_TRAIL_LENGTH: usize = 1;
/// Maximum trail length. Also the per-slot ring buffer capacity.
pub const MAX_TRAIL_LENGTH: usize = 10;

/// Tunable simulation parameters.
///
/// `particle_count` and `trail_length` are runtime-mutable through the
/// particle system; the spawn ranges are fixed at construction.
///
/// # Example
///
/// ```
/// use spindrift::SystemConfig;
///
/// let config = SystemConfig {
///     particle_count: 300,
///     lifetime: 1.0..2.0,
///     ..Default::default()
/// };
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct SystemConfig {
    /// Target number of live particles, clamped to
    /// [`MIN_PARTICLES`]..=[`MAX_PARTICLES`].
    pub particle_count: usize,
    /// Trail capacity per particle, clamped to
    /// [`MIN_TRAIL_LENGTH`]..=[`MAX_TRAIL_LENGTH`].
    pub trail_length: usize,
    /// Random lifetime per spawn, seconds.
    pub lifetime: Range<f32>,
    /// Random render size per spawn. Size stays constant over a
    /// particle's life.
    pub size: Range<f32>,
    /// Random value per RGB channel at spawn.
    pub color_channel: Range<f32>,
    /// Baseline acceleration applied to every particle. Zero by default;
    /// the attractor is then the only force.
    pub gravity: Vec3,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            particle_count: 200,
            trail_length: 4,
            lifetime: 3.0..8.0,
            size: 0.05..0.15,
            color_channel: 0.3..1.0,
            gravity: Vec3::ZERO,
        }
    }
}

impl SystemConfig {
    /// Check the spawn ranges for degenerate values.
    ///
    /// Counts and trail lengths are clamped rather than validated.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_range("lifetime", &self.lifetime)?;
        check_range("size", &self.size)?;
        check_range("color_channel", &self.color_channel)?;
        if self.lifetime.start <= 0.0 {
            return Err(ConfigError::NonPositive {
                name: "lifetime",
                value: self.lifetime.start,
            });
        }
        if self.size.start <= 0.0 {
            return Err(ConfigError::NonPositive {
                name: "size",
                value: self.size.start,
            });
        }
        if !self.gravity.is_finite() {
            return Err(ConfigError::NonFinite { name: "gravity" });
        }
        Ok(())
    }
}

/// Reject NaN/infinite endpoints and empty ranges.
pub(crate) fn check_range(name: &'static str, range: &Range<f32>) -> Result<(), ConfigError> {
    if !range.start.is_finite() || !range.end.is_finite() {
        return Err(ConfigError::NonFinite { name });
    }
    if range.start >= range.end {
        return Err(ConfigError::EmptyRange {
            name,
            min: range.start,
            max: range.end,
        });
    }
    Ok(())
}

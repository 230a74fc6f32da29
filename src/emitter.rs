//! Cylindrical surface emitter.
//!
//! The emitter is a pure sampler: each [`Emitter::spawn`] call produces an
//! initial position uniformly distributed on the lateral surface of a
//! cylinder, and an outward-biased velocity. It holds no mutable state
//! beyond its `visible` flag, which gates rendering only - spawning is
//! unaffected by visibility.
//!
//! # Example
//!
//! ```
//! use spindrift::Emitter;
//! use glam::Vec3;
//! use rand::SeedableRng;
//! use rand::rngs::SmallRng;
//!
//! let emitter = Emitter::new(Vec3::ZERO, Vec3::Y, 2.0, 4.0).unwrap();
//! let mut rng = SmallRng::seed_from_u64(7);
//! let (position, _velocity) = emitter.spawn(&mut rng);
//!
//! // Spawn points sit on the lateral surface, radius 2 from the axis.
//! let radial = position - Vec3::Y * position.y;
//! assert!((radial.length() - 2.0).abs() < 1e-4);
//! ```

use crate::config::check_range;
use crate::error::ConfigError;
use glam::Vec3;
use rand::Rng;
use std::f32::consts::TAU;
use std::ops::Range;

/// Cylindrical particle source.
///
/// Geometry is fixed at construction: a cylinder of the given `radius` and
/// `height` centered on `center`, aligned with `axis`. Velocity is the
/// outward surface normal scaled by a random speed, plus a random axial
/// jitter component.
#[derive(Debug, Clone)]
pub struct Emitter {
    center: Vec3,
    /// Normalized cylinder axis.
    axis: Vec3,
    /// Orthonormal basis completing `axis`, used to place surface points.
    basis_u: Vec3,
    basis_v: Vec3,
    radius: f32,
    height: f32,
    speed: Range<f32>,
    axial_jitter: f32,
    /// Whether the presenter should draw the emitter geometry.
    pub visible: bool,
}

impl Emitter {
    /// Create an emitter for a cylinder at `center` aligned with `axis`.
    ///
    /// `axis` is normalized here; `radius` and `height` must be positive.
    pub fn new(center: Vec3, axis: Vec3, radius: f32, height: f32) -> Result<Self, ConfigError> {
        if !center.is_finite() {
            return Err(ConfigError::NonFinite { name: "emitter center" });
        }
        let axis = axis
            .try_normalize()
            .ok_or(ConfigError::ZeroVector { name: "emitter axis" })?;
        if !radius.is_finite() || radius <= 0.0 {
            return Err(ConfigError::NonPositive { name: "emitter radius", value: radius });
        }
        if !height.is_finite() || height <= 0.0 {
            return Err(ConfigError::NonPositive { name: "emitter height", value: height });
        }

        let (basis_u, basis_v) = orthonormal_basis(axis);
        Ok(Self {
            center,
            axis,
            basis_u,
            basis_v,
            radius,
            height,
            speed: 0.5..2.0,
            axial_jitter: 0.3,
            visible: true,
        })
    }

    /// Set the random speed range for spawned particles.
    pub fn with_speed(mut self, speed: Range<f32>) -> Result<Self, ConfigError> {
        check_range("emitter speed", &speed)?;
        self.speed = speed;
        Ok(self)
    }

    /// Set the maximum axial velocity component added on top of the
    /// radial direction. Zero disables the jitter.
    pub fn with_axial_jitter(mut self, jitter: f32) -> Result<Self, ConfigError> {
        if !jitter.is_finite() || jitter < 0.0 {
            return Err(ConfigError::NonFinite { name: "emitter axial jitter" });
        }
        self.axial_jitter = jitter;
        Ok(self)
    }

    /// Sample an initial position and velocity for a new particle.
    ///
    /// The position is uniform on the lateral surface: random angle in
    /// `[0, 2π)`, random height along the axis, radius fixed. The velocity
    /// points along the outward surface normal at that angle, scaled by a
    /// random speed, with a random `[0, jitter)` component along the axis.
    pub fn spawn<R: Rng>(&self, rng: &mut R) -> (Vec3, Vec3) {
        let theta = rng.gen_range(0.0..TAU);
        let h = rng.gen_range(0.0..self.height);

        // Outward normal of the lateral surface at this angle.
        let radial = self.basis_u * theta.cos() + self.basis_v * theta.sin();
        let position = self.center + radial * self.radius + self.axis * (h - 0.5 * self.height);

        let speed = rng.gen_range(self.speed.clone());
        let axial = if self.axial_jitter > 0.0 {
            rng.gen_range(0.0..self.axial_jitter)
        } else {
            0.0
        };
        let velocity = radial * speed + self.axis * axial;

        (position, velocity)
    }

    /// Cylinder center.
    #[inline]
    pub fn center(&self) -> Vec3 {
        self.center
    }

    /// Normalized cylinder axis.
    #[inline]
    pub fn axis(&self) -> Vec3 {
        self.axis
    }

    /// Cylinder radius.
    #[inline]
    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Cylinder height.
    #[inline]
    pub fn height(&self) -> f32 {
        self.height
    }
}

impl Default for Emitter {
    /// Radius 2, height 4, Y axis, centered at the origin.
    fn default() -> Self {
        Self {
            center: Vec3::ZERO,
            axis: Vec3::Y,
            basis_u: Vec3::X,
            basis_v: Vec3::NEG_Z,
            radius: 2.0,
            height: 4.0,
            speed: 0.5..2.0,
            axial_jitter: 0.3,
            visible: true,
        }
    }
}

/// Build two unit vectors perpendicular to `axis` and to each other.
fn orthonormal_basis(axis: Vec3) -> (Vec3, Vec3) {
    let helper = if axis.dot(Vec3::X).abs() > 0.9 {
        Vec3::Y
    } else {
        Vec3::X
    };
    let u = (helper - axis * helper.dot(axis)).normalize();
    let v = axis.cross(u);
    (u, v)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn emitter() -> Emitter {
        Emitter::new(Vec3::ZERO, Vec3::Y, 2.0, 4.0).unwrap()
    }

    #[test]
    fn test_degenerate_geometry_rejected() {
        assert!(Emitter::new(Vec3::ZERO, Vec3::ZERO, 2.0, 4.0).is_err());
        assert!(Emitter::new(Vec3::ZERO, Vec3::Y, 0.0, 4.0).is_err());
        assert!(Emitter::new(Vec3::ZERO, Vec3::Y, 2.0, -1.0).is_err());
    }

    #[test]
    fn test_spawn_on_lateral_surface() {
        let emitter = emitter();
        let mut rng = SmallRng::seed_from_u64(1);
        for _ in 0..200 {
            let (position, _) = emitter.spawn(&mut rng);
            let axial = position.y;
            let radial = position - Vec3::Y * axial;
            assert!((radial.length() - 2.0).abs() < 1e-4);
            assert!(axial >= -2.0 && axial < 2.0);
        }
    }

    #[test]
    fn test_spawn_velocity_outward_and_in_range() {
        let emitter = emitter();
        let mut rng = SmallRng::seed_from_u64(2);
        for _ in 0..200 {
            let (position, velocity) = emitter.spawn(&mut rng);
            let radial = (position - Vec3::Y * position.y).normalize();

            // Radial component carries the sampled speed.
            let outward = velocity.dot(radial);
            assert!(outward >= 0.5 && outward < 2.0);

            // Axial component is the jitter, never downward.
            let axial = velocity.dot(Vec3::Y);
            assert!(axial >= 0.0 && axial < 0.3);
        }
    }

    #[test]
    fn test_angular_coverage() {
        // Full surface coverage: every angular bin gets hit over many spawns.
        let emitter = emitter();
        let mut rng = SmallRng::seed_from_u64(3);
        let mut bins = [0u32; 16];
        for _ in 0..2000 {
            let (position, _) = emitter.spawn(&mut rng);
            let angle = position.z.atan2(position.x) + std::f32::consts::PI;
            let bin = ((angle / TAU) * 16.0) as usize % 16;
            bins[bin] += 1;
        }
        assert!(bins.iter().all(|&count| count > 0), "bins: {:?}", bins);
    }

    #[test]
    fn test_tilted_axis_keeps_radius() {
        let axis = Vec3::new(1.0, 1.0, 0.0);
        let center = Vec3::new(3.0, -1.0, 2.0);
        let emitter = Emitter::new(center, axis, 1.5, 2.0).unwrap();
        let mut rng = SmallRng::seed_from_u64(4);
        for _ in 0..100 {
            let (position, _) = emitter.spawn(&mut rng);
            let offset = position - center;
            let radial = offset - emitter.axis() * offset.dot(emitter.axis());
            assert!((radial.length() - 1.5).abs() < 1e-4);
        }
    }
}

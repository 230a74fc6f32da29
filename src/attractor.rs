//! Planar attractor force field.
//!
//! A plane, defined by a point and a normal, that pulls nearby particles
//! toward itself while `active`. The force falls off linearly with the
//! particle's distance to the plane:
//!
//! ```text
//! |F| = strength * (1 - |d| / influence_radius)    for |d| <= influence_radius
//! |F| = 0                                          otherwise
//! ```
//!
//! so the pull grows monotonically as a particle approaches the plane and
//! tops out at `strength` on the plane itself - finite everywhere, with no
//! division by the distance. The direction is always toward the plane,
//! `-sign(d) * normal`.
//!
//! `active` and `visible` are independent: deactivating zeroes the force
//! but the presenter may still draw the plane, and vice versa.

use crate::error::ConfigError;
use glam::Vec3;

/// Plane that attracts particles within `influence_radius`.
#[derive(Debug, Clone)]
pub struct PlaneAttractor {
    /// A point on the plane.
    point: Vec3,
    /// Normalized plane normal.
    normal: Vec3,
    strength: f32,
    influence_radius: f32,
    /// Whether the force is applied. Toggled by Space.
    pub active: bool,
    /// Whether the presenter should draw the plane. Toggled by `A`.
    pub visible: bool,
}

impl PlaneAttractor {
    /// Create an attractor for the plane through `point` with the given
    /// `normal` (normalized here).
    pub fn new(
        point: Vec3,
        normal: Vec3,
        strength: f32,
        influence_radius: f32,
    ) -> Result<Self, ConfigError> {
        if !point.is_finite() {
            return Err(ConfigError::NonFinite { name: "attractor point" });
        }
        let normal = normal
            .try_normalize()
            .ok_or(ConfigError::ZeroVector { name: "attractor normal" })?;
        if !strength.is_finite() {
            return Err(ConfigError::NonFinite { name: "attractor strength" });
        }
        if !influence_radius.is_finite() || influence_radius <= 0.0 {
            return Err(ConfigError::NonPositive {
                name: "attractor influence radius",
                value: influence_radius,
            });
        }
        Ok(Self {
            point,
            normal,
            strength,
            influence_radius,
            active: true,
            visible: true,
        })
    }

    /// Force contribution on a particle at `position`.
    ///
    /// Returns zero when inactive or when the particle is outside the
    /// influence radius. Never produces non-finite values.
    pub fn force_on(&self, position: Vec3) -> Vec3 {
        if !self.active {
            return Vec3::ZERO;
        }

        // Signed distance to the plane.
        let distance = self.normal.dot(position - self.point);
        if distance.abs() > self.influence_radius {
            return Vec3::ZERO;
        }

        let magnitude = self.strength * (1.0 - distance.abs() / self.influence_radius);
        -distance.signum() * self.normal * magnitude
    }

    /// A point on the plane.
    #[inline]
    pub fn point(&self) -> Vec3 {
        self.point
    }

    /// Normalized plane normal.
    #[inline]
    pub fn normal(&self) -> Vec3 {
        self.normal
    }

    /// Peak force magnitude, reached on the plane.
    #[inline]
    pub fn strength(&self) -> f32 {
        self.strength
    }

    /// Maximum distance at which the attractor exerts any force.
    #[inline]
    pub fn influence_radius(&self) -> f32 {
        self.influence_radius
    }
}

impl Default for PlaneAttractor {
    /// Horizontal plane at y = -5, strength 0.5, influence radius 8.
    fn default() -> Self {
        Self {
            point: Vec3::new(0.0, -5.0, 0.0),
            normal: Vec3::Y,
            strength: 0.5,
            influence_radius: 8.0,
            active: true,
            visible: true,
        }
    }
}

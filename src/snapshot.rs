//! Per-frame render snapshot.
//!
//! The simulation core hands the presenter an immutable copy of everything
//! it needs to draw a frame: live particles in slot order with their trails,
//! plus emitter and attractor display state. The presenter never reaches
//! into the particle system itself.
//!
//! For GPU-based presenters, [`Snapshot::point_vertices`] and
//! [`Snapshot::trail_vertices`] flatten the frame into `Pod` vertex structs
//! that can be uploaded to a vertex buffer as raw bytes.

use bytemuck::{Pod, Zeroable};
use glam::Vec3;

/// Immutable per-frame view of the particle system.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    /// Live particles in slot order.
    pub particles: Vec<ParticleView>,
    /// Whether to draw the emitter geometry.
    pub emitter_visible: bool,
    /// Attractor display state.
    pub attractor: AttractorView,
}

/// Render state of one live particle.
#[derive(Debug, Clone, PartialEq)]
pub struct ParticleView {
    /// World-space position.
    pub position: Vec3,
    /// Render size.
    pub size: f32,
    /// RGB color.
    pub color: Vec3,
    /// Transparency in `[0, 1]`.
    pub alpha: f32,
    /// Recent positions, most-recent-first.
    pub trail: Vec<Vec3>,
}

/// Attractor state the presenter needs for drawing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AttractorView {
    /// A point on the plane.
    pub point: Vec3,
    /// Normalized plane normal.
    pub normal: Vec3,
    /// Influence radius, for range visualization.
    pub influence_radius: f32,
    /// Whether the force is currently applied.
    pub active: bool,
    /// Whether to draw the plane.
    pub visible: bool,
}

/// Point-sprite vertex, one per live particle.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct PointVertex {
    /// World-space position.
    pub position: [f32; 3],
    /// Render size.
    pub size: f32,
    /// RGB color.
    pub color: [f32; 3],
    /// Transparency in `[0, 1]`.
    pub alpha: f32,
}

/// Trail line-list vertex; segments come in endpoint pairs.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct TrailVertex {
    /// World-space position.
    pub position: [f32; 3],
    /// Transparency, fading toward the trail's tail.
    pub alpha: f32,
}

impl Snapshot {
    /// Flatten live particles into point-sprite vertices.
    pub fn point_vertices(&self) -> Vec<PointVertex> {
        self.particles
            .iter()
            .map(|p| PointVertex {
                position: p.position.to_array(),
                size: p.size,
                color: p.color.to_array(),
                alpha: p.alpha,
            })
            .collect()
    }

    /// Flatten all trails into a line list.
    ///
    /// Each trail of `n` positions yields `n - 1` segments (two vertices
    /// each). Segment alpha starts at the particle's alpha and steps down
    /// toward zero along the trail, so tails fade out.
    pub fn trail_vertices(&self) -> Vec<TrailVertex> {
        let mut vertices = Vec::new();
        for particle in &self.particles {
            let n = particle.trail.len();
            if n < 2 {
                continue;
            }
            let step = particle.alpha / n as f32;
            for i in 0..n - 1 {
                let alpha = (particle.alpha - i as f32 * step).max(0.0);
                vertices.push(TrailVertex {
                    position: particle.trail[i].to_array(),
                    alpha,
                });
                vertices.push(TrailVertex {
                    position: particle.trail[i + 1].to_array(),
                    alpha,
                });
            }
        }
        vertices
    }
}

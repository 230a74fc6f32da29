//! # Spindrift - real-time particle simulation core
//!
//! Particles spawn from the lateral surface of a cylindrical emitter, move
//! under simple kinematics and an optional planar attractor force, fade out
//! over their lifetime, and carry bounded position trails. Rendering and
//! input are external: the core exposes a per-frame [`Snapshot`] for a
//! presenter to draw, and a [`Command`] vocabulary for an input controller
//! to mutate configuration.
//!
//! ## Quick Start
//!
//! ```
//! use spindrift::prelude::*;
//!
//! let mut system = ParticleSystem::new(
//!     Emitter::default(),
//!     PlaneAttractor::default(),
//!     SystemConfig::default(),
//!     7,
//! )?;
//!
//! // External frame loop: tick the clock, step the simulation, draw.
//! let mut clock = FrameClock::new();
//! for _ in 0..10 {
//!     let dt = clock.tick();
//!     system.update(dt);
//!     let snapshot = system.snapshot();
//!     assert!(snapshot.particles.len() <= 500);
//! }
//!
//! // Input controller side: keys become commands.
//! if let Some(command) = Command::from_key(Key::Space) {
//!     system.apply(command);
//! }
//! assert!(!system.attractor().active);
//! # Ok::<(), spindrift::ConfigError>(())
//! ```
//!
//! ## Core Concepts
//!
//! - **Slots** - particles live in a fixed 500-slot arena with a free list;
//!   spawning and recycling never allocate.
//! - **Emitter** - pure sampler of the cylinder surface; geometry fixed at
//!   construction, only its `visible` flag is runtime state.
//! - **Attractor** - plane with a linear force falloff inside its influence
//!   radius; `active` and `visible` toggle independently.
//! - **Snapshot** - immutable per-frame copy of live particle state, with
//!   `bytemuck`-castable vertex helpers for GPU presenters.
//! - **Determinism** - all randomness comes from one seeded generator, so a
//!   fixed seed and identical inputs replay bit-identically.

mod attractor;
mod config;
mod emitter;
mod error;
pub mod input;
mod particle;
pub mod snapshot;
mod system;
pub mod time;

pub use attractor::PlaneAttractor;
pub use config::{
    SystemConfig, MAX_PARTICLES, MAX_TRAIL_LENGTH, MIN_PARTICLES, MIN_TRAIL_LENGTH,
};
pub use emitter::Emitter;
pub use error::ConfigError;
pub use glam::Vec3;
pub use input::{Command, Key};
pub use particle::{Particle, Trail};
pub use snapshot::{AttractorView, ParticleView, PointVertex, Snapshot, TrailVertex};
pub use system::ParticleSystem;
pub use time::FrameClock;

/// Convenient re-exports for common usage.
///
/// ```
/// use spindrift::prelude::*;
/// ```
pub mod prelude {
    pub use crate::attractor::PlaneAttractor;
    pub use crate::config::SystemConfig;
    pub use crate::emitter::Emitter;
    pub use crate::error::ConfigError;
    pub use crate::input::{Command, Key};
    pub use crate::snapshot::{ParticleView, Snapshot};
    pub use crate::system::ParticleSystem;
    pub use crate::time::FrameClock;
    pub use crate::Vec3;
}

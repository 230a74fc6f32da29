//! Key-to-command mapping for external input controllers.
//!
//! The core never talks to a windowing toolkit. An external input
//! controller translates its raw key events into [`Key`] values, maps them
//! through [`Command::from_key`], and feeds the result to
//! [`ParticleSystem::apply`](crate::ParticleSystem::apply).
//!
//! # Key bindings
//!
//! | Key | Effect |
//! |-----|--------|
//! | `P` | Toggle pause |
//! | `E` | Toggle emitter visibility |
//! | `A` | Toggle attractor visibility |
//! | `Space` | Toggle attractor force on/off |
//! | `R` | Reset all particles |
//! | `Up` / `Down` | Particle count +50 / -50 |
//! | `Right` / `Left` | Trail length +1 / -1 |
//! | `H` | Help overlay - presentation only, no command |

/// Particle count change per Up/Down key press.
pub const PARTICLE_COUNT_STEP: i32 = 50;
/// Trail length change per Left/Right key press.
pub const TRAIL_LENGTH_STEP: i32 = 1;

/// Keys the simulation responds to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    P,
    E,
    A,
    R,
    H,
    Space,
    Up,
    Down,
    Left,
    Right,
}

/// Atomic configuration mutation, applied immediately - no command queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Flip Running/Paused.
    TogglePause,
    /// Flip emitter visibility. No physics effect.
    ToggleEmitterVisible,
    /// Flip attractor visibility. No physics effect.
    ToggleAttractorVisible,
    /// Flip whether the attractor exerts force.
    ToggleAttractorActive,
    /// Destroy all particles and respawn synchronously.
    Reset,
    /// Adjust the particle count target; the result is clamped.
    ChangeParticleCount(i32),
    /// Adjust the trail length setting; the result is clamped.
    ChangeTrailLength(i32),
}

impl Command {
    /// Map a key press to its command, if it has one.
    ///
    /// `H` returns `None`: the help overlay is the presenter's business.
    pub fn from_key(key: Key) -> Option<Command> {
        match key {
            Key::P => Some(Command::TogglePause),
            Key::E => Some(Command::ToggleEmitterVisible),
            Key::A => Some(Command::ToggleAttractorVisible),
            Key::Space => Some(Command::ToggleAttractorActive),
            Key::R => Some(Command::Reset),
            Key::Up => Some(Command::ChangeParticleCount(PARTICLE_COUNT_STEP)),
            Key::Down => Some(Command::ChangeParticleCount(-PARTICLE_COUNT_STEP)),
            Key::Right => Some(Command::ChangeTrailLength(TRAIL_LENGTH_STEP)),
            Key::Left => Some(Command::ChangeTrailLength(-TRAIL_LENGTH_STEP)),
            Key::H => None,
        }
    }
}

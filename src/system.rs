//! The particle system: slot arena, per-frame update, configuration.
//!
//! Particles live in a fixed arena of [`MAX_PARTICLES`] slots with a free
//! list for recycling, so a frame never allocates. Each frame runs spawn,
//! integration, trail bookkeeping, aging and recycling in one pass; the
//! presenter reads the result through [`ParticleSystem::snapshot`].
//!
//! # Update order
//!
//! 1. Bail out on pause or a non-positive `dt`.
//! 2. Fill free slots until the live count reaches the configured target.
//!    Slots freed by expiry in the previous frame respawn here, never
//!    mid-integration, so the per-frame spawn increment stays stable.
//! 3. Integrate every live particle with semi-implicit Euler (velocity
//!    before position), push its position onto the trail, age it, and
//!    free its slot once `age` reaches `lifetime`.
//!
//! All randomness flows through one seeded `SmallRng` owned by the system,
//! so a fixed seed and identical inputs replay bit-identically.
//!
//! # Example
//!
//! ```
//! use spindrift::prelude::*;
//!
//! let mut system = ParticleSystem::new(
//!     Emitter::default(),
//!     PlaneAttractor::default(),
//!     SystemConfig::default(),
//!     42,
//! )?;
//!
//! for _ in 0..60 {
//!     system.update(1.0 / 60.0);
//! }
//! let snapshot = system.snapshot();
//! assert_eq!(snapshot.particles.len(), 200);
//! # Ok::<(), spindrift::ConfigError>(())
//! ```

use crate::attractor::PlaneAttractor;
use crate::config::{
    SystemConfig, MAX_PARTICLES, MAX_TRAIL_LENGTH, MIN_PARTICLES, MIN_TRAIL_LENGTH,
};
use crate::emitter::Emitter;
use crate::error::ConfigError;
use crate::input::Command;
use crate::particle::Particle;
use crate::snapshot::{AttractorView, ParticleView, Snapshot};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// One arena slot. Reused across particle lifetimes.
#[derive(Debug, Clone, Default)]
struct Slot {
    particle: Particle,
    alive: bool,
    /// Spawn ordinal, used to destroy oldest-spawned particles first when
    /// the count target shrinks below the live count.
    seq: u64,
}

/// Owns the particle arena, emitter, attractor and configuration.
///
/// All state is owned exclusively by this struct and mutated only through
/// its methods from the single simulation thread.
#[derive(Debug)]
pub struct ParticleSystem {
    /// Fixed arena, always [`MAX_PARTICLES`] slots.
    slots: Vec<Slot>,
    /// Indices of dead slots, popped on spawn.
    free: Vec<usize>,
    live: usize,
    next_seq: u64,
    config: SystemConfig,
    emitter: Emitter,
    attractor: PlaneAttractor,
    rng: SmallRng,
    paused: bool,
}

impl ParticleSystem {
    /// Build a system and synchronously populate it to the configured
    /// particle count.
    ///
    /// `particle_count` and `trail_length` from `config` are clamped to
    /// their valid ranges; the spawn ranges are validated and rejected
    /// with a [`ConfigError`] when degenerate.
    pub fn new(
        emitter: Emitter,
        attractor: PlaneAttractor,
        mut config: SystemConfig,
        seed: u64,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        config.particle_count = config.particle_count.clamp(MIN_PARTICLES, MAX_PARTICLES);
        config.trail_length = config.trail_length.clamp(MIN_TRAIL_LENGTH, MAX_TRAIL_LENGTH);

        let mut system = Self {
            slots: vec![Slot::default(); MAX_PARTICLES],
            free: Vec::new(),
            live: 0,
            next_seq: 0,
            config,
            emitter,
            attractor,
            rng: SmallRng::seed_from_u64(seed),
            paused: false,
        };
        system.reset();
        Ok(system)
    }

    /// Advance the simulation by `dt` seconds.
    ///
    /// No-op while paused or when `dt` is zero, negative, or non-finite.
    pub fn update(&mut self, dt: f32) {
        if self.paused || !dt.is_finite() || dt <= 0.0 {
            return;
        }

        self.fill();

        let gravity = self.config.gravity;
        let trail_length = self.config.trail_length;

        for i in 0..self.slots.len() {
            if !self.slots[i].alive {
                continue;
            }

            let force =
                gravity + self.attractor.force_on(self.slots[i].particle.position);
            let particle = &mut self.slots[i].particle;

            // Semi-implicit Euler: velocity first, then position.
            particle.velocity += force * dt;
            particle.position += particle.velocity * dt;
            particle.trail.push(particle.position, trail_length);

            particle.age = (particle.age + dt).min(particle.lifetime);
            particle.refresh_alpha();

            if particle.is_expired() {
                // Slot respawns in next frame's fill pass.
                self.slots[i].alive = false;
                self.free.push(i);
                self.live -= 1;
            }
        }
    }

    /// Spawn into free slots until the live count reaches the target.
    fn fill(&mut self) {
        while self.live < self.config.particle_count {
            let Some(index) = self.free.pop() else { break };
            self.spawn_into(index);
        }
    }

    /// Initialize the particle in slot `index` from the emitter and the
    /// configured spawn ranges, and mark it live.
    fn spawn_into(&mut self, index: usize) {
        let (position, velocity) = self.emitter.spawn(&mut self.rng);
        let lifetime = self.rng.gen_range(self.config.lifetime.clone());
        let size = self.rng.gen_range(self.config.size.clone());
        let color = glam::Vec3::new(
            self.rng.gen_range(self.config.color_channel.clone()),
            self.rng.gen_range(self.config.color_channel.clone()),
            self.rng.gen_range(self.config.color_channel.clone()),
        );

        let slot = &mut self.slots[index];
        slot.particle.position = position;
        slot.particle.velocity = velocity;
        slot.particle.age = 0.0;
        slot.particle.lifetime = lifetime;
        slot.particle.size = size;
        slot.particle.color = color;
        slot.particle.alpha = 1.0;
        slot.particle.trail.clear();
        slot.alive = true;
        slot.seq = self.next_seq;
        self.next_seq += 1;
        self.live += 1;
    }

    /// Mark slot `index` dead and return it to the free list.
    fn kill(&mut self, index: usize) {
        debug_assert!(self.slots[index].alive);
        self.slots[index].alive = false;
        self.free.push(index);
        self.live -= 1;
    }

    // =========================================================================
    // Configuration mutations - atomic, applied immediately, clamp silently.
    // They take effect even while paused.
    // =========================================================================

    /// Set the target particle count, clamped to `[50, 500]`.
    ///
    /// Shrinking below the live count destroys the excess immediately,
    /// oldest-spawned first. Growing fills gradually through the update
    /// loop, one batch of free slots per frame.
    pub fn set_particle_count(&mut self, count: usize) {
        let clamped = count.clamp(MIN_PARTICLES, MAX_PARTICLES);
        if clamped != self.config.particle_count {
            log::debug!(
                "particle count {} -> {}",
                self.config.particle_count,
                clamped
            );
        }
        self.config.particle_count = clamped;

        if self.live > clamped {
            let mut by_age: Vec<(u64, usize)> = self
                .slots
                .iter()
                .enumerate()
                .filter(|(_, slot)| slot.alive)
                .map(|(index, slot)| (slot.seq, index))
                .collect();
            by_age.sort_unstable();

            let excess = self.live - clamped;
            for &(_, index) in by_age.iter().take(excess) {
                self.kill(index);
            }
        }
    }

    /// Adjust the particle count by `delta` (arrow keys use ±50).
    pub fn change_particle_count(&mut self, delta: i32) {
        let target = (self.config.particle_count as i64 + delta as i64).max(0);
        self.set_particle_count(target as usize);
    }

    /// Set the trail length, clamped to `[1, 10]`. Existing trails are
    /// truncated immediately.
    pub fn set_trail_length(&mut self, length: usize) {
        let clamped = length.clamp(MIN_TRAIL_LENGTH, MAX_TRAIL_LENGTH);
        if clamped != self.config.trail_length {
            log::debug!("trail length {} -> {}", self.config.trail_length, clamped);
        }
        self.config.trail_length = clamped;
        for slot in &mut self.slots {
            if slot.alive {
                slot.particle.trail.truncate(clamped);
            }
        }
    }

    /// Adjust the trail length by `delta` (arrow keys use ±1).
    pub fn change_trail_length(&mut self, delta: i32) {
        let target = (self.config.trail_length as i64 + delta as i64).max(0);
        self.set_trail_length(target as usize);
    }

    /// Flip emitter visibility. Spawning is unaffected.
    pub fn toggle_emitter_visible(&mut self) {
        self.emitter.visible = !self.emitter.visible;
    }

    /// Flip attractor visibility. Independent of the force being active.
    pub fn toggle_attractor_visible(&mut self) {
        self.attractor.visible = !self.attractor.visible;
    }

    /// Flip whether the attractor exerts force.
    pub fn toggle_attractor_active(&mut self) {
        self.attractor.active = !self.attractor.active;
        log::debug!("attractor active: {}", self.attractor.active);
    }

    /// Flip Running/Paused. While paused, `update` is a no-op but
    /// configuration mutations still apply.
    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
        log::debug!("paused: {}", self.paused);
    }

    /// Destroy all particles and refill to the target count right away.
    ///
    /// The one operation allowed to respawn instantaneously, so a reset
    /// gives immediate visible feedback. New particles start with age 0
    /// and an empty trail.
    pub fn reset(&mut self) {
        for slot in &mut self.slots {
            slot.alive = false;
        }
        self.live = 0;
        self.free = (0..MAX_PARTICLES).rev().collect();
        self.fill();
        log::debug!("reset: {} particles respawned", self.live);
    }

    /// Apply a mapped input command.
    pub fn apply(&mut self, command: Command) {
        match command {
            Command::TogglePause => self.toggle_pause(),
            Command::ToggleEmitterVisible => self.toggle_emitter_visible(),
            Command::ToggleAttractorVisible => self.toggle_attractor_visible(),
            Command::ToggleAttractorActive => self.toggle_attractor_active(),
            Command::Reset => self.reset(),
            Command::ChangeParticleCount(delta) => self.change_particle_count(delta),
            Command::ChangeTrailLength(delta) => self.change_trail_length(delta),
        }
    }

    // =========================================================================
    // Read access
    // =========================================================================

    /// Build the immutable per-frame view for the presenter.
    ///
    /// Live particles appear in slot order.
    pub fn snapshot(&self) -> Snapshot {
        let particles = self
            .slots
            .iter()
            .filter(|slot| slot.alive)
            .map(|slot| ParticleView {
                position: slot.particle.position,
                size: slot.particle.size,
                color: slot.particle.color,
                alpha: slot.particle.alpha,
                trail: slot.particle.trail.iter().collect(),
            })
            .collect();

        Snapshot {
            particles,
            emitter_visible: self.emitter.visible,
            attractor: AttractorView {
                point: self.attractor.point(),
                normal: self.attractor.normal(),
                influence_radius: self.attractor.influence_radius(),
                active: self.attractor.active,
                visible: self.attractor.visible,
            },
        }
    }

    /// Number of live particles.
    #[inline]
    pub fn live_count(&self) -> usize {
        self.live
    }

    /// Whether the simulation is paused.
    #[inline]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Current configuration.
    #[inline]
    pub fn config(&self) -> &SystemConfig {
        &self.config
    }

    /// The emitter.
    #[inline]
    pub fn emitter(&self) -> &Emitter {
        &self.emitter
    }

    /// The attractor.
    #[inline]
    pub fn attractor(&self) -> &PlaneAttractor {
        &self.attractor
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::Key;
    use glam::Vec3;

    const DT: f32 = 1.0 / 60.0;

    fn system() -> ParticleSystem {
        ParticleSystem::new(
            Emitter::default(),
            PlaneAttractor::default(),
            SystemConfig::default(),
            42,
        )
        .unwrap()
    }

    fn short_lived_system() -> ParticleSystem {
        let config = SystemConfig {
            lifetime: 0.05..0.1,
            ..Default::default()
        };
        ParticleSystem::new(Emitter::default(), PlaneAttractor::default(), config, 42).unwrap()
    }

    #[test]
    fn test_construction_populates_to_count() {
        let system = system();
        assert_eq!(system.live_count(), 200);
        let snapshot = system.snapshot();
        assert_eq!(snapshot.particles.len(), 200);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = SystemConfig {
            lifetime: 8.0..3.0,
            ..Default::default()
        };
        let result = ParticleSystem::new(
            Emitter::default(),
            PlaneAttractor::default(),
            config,
            42,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_live_count_never_exceeds_target() {
        let mut system = short_lived_system();
        for _ in 0..100 {
            system.update(DT);
            assert!(system.live_count() <= system.config().particle_count);
        }
    }

    #[test]
    fn test_age_and_alpha_invariants() {
        let mut system = short_lived_system();
        for _ in 0..50 {
            system.update(DT);
            for slot in system.slots.iter().filter(|s| s.alive) {
                let p = &slot.particle;
                assert!(p.age >= 0.0 && p.age <= p.lifetime);
                assert!((0.0..=1.0).contains(&p.alpha));
            }
        }
    }

    #[test]
    fn test_expired_slots_respawn_next_frame() {
        let mut system = short_lived_system();
        // Run past the longest lifetime so expiries happen every frame.
        for _ in 0..30 {
            system.update(DT);
        }
        // Slots freed at the tail of a frame stay empty until the next
        // frame's fill pass, so the population sits below the target here.
        let live = system.live_count();
        assert!(live < 200);

        // The next frame's fill pass replaces exactly the freed slots
        // before integrating; each spawn bumps the ordinal once.
        let deficit = (200 - live) as u64;
        let seq_before = system.next_seq;
        system.update(DT);
        assert_eq!(system.next_seq - seq_before, deficit);

        // Every particle has recycled at least once by now.
        assert!(system.next_seq > 400);
    }

    #[test]
    fn test_particle_count_clamps() {
        let mut system = system();
        system.set_particle_count(700);
        assert_eq!(system.config().particle_count, 500);
        system.set_particle_count(10);
        assert_eq!(system.config().particle_count, 50);
    }

    #[test]
    fn test_shrink_destroys_oldest_first() {
        let mut system = system();
        let newest_seq: Vec<u64> = {
            let mut seqs: Vec<u64> = system
                .slots
                .iter()
                .filter(|s| s.alive)
                .map(|s| s.seq)
                .collect();
            seqs.sort_unstable();
            seqs[150..].to_vec()
        };

        system.set_particle_count(50);
        assert_eq!(system.live_count(), 50);

        let mut survivors: Vec<u64> = system
            .slots
            .iter()
            .filter(|s| s.alive)
            .map(|s| s.seq)
            .collect();
        survivors.sort_unstable();
        assert_eq!(survivors, newest_seq);
    }

    #[test]
    fn test_growth_is_gradual_via_update() {
        let mut system = system();
        system.set_particle_count(500);
        // Setter alone does not spawn.
        assert_eq!(system.live_count(), 200);
        system.update(DT);
        assert_eq!(system.live_count(), 500);
    }

    #[test]
    fn test_trail_length_clamps_and_truncates() {
        let mut system = system();
        system.set_trail_length(0);
        assert_eq!(system.config().trail_length, 1);
        system.set_trail_length(20);
        assert_eq!(system.config().trail_length, 10);

        for _ in 0..15 {
            system.update(DT);
        }
        system.set_trail_length(3);
        for slot in system.slots.iter().filter(|s| s.alive) {
            assert!(slot.particle.trail.len() <= 3);
        }

        // Bound holds across later frames as well.
        system.update(DT);
        for slot in system.slots.iter().filter(|s| s.alive) {
            assert!(slot.particle.trail.len() <= 3);
        }
    }

    #[test]
    fn test_pause_freezes_everything() {
        let mut system = system();
        for _ in 0..10 {
            system.update(DT);
        }
        system.toggle_pause();
        let before = system.snapshot();
        for _ in 0..10 {
            system.update(DT);
        }
        assert_eq!(system.snapshot(), before);

        // Config mutations still land while paused.
        system.set_particle_count(700);
        assert_eq!(system.config().particle_count, 500);

        system.toggle_pause();
        system.update(DT);
        assert_ne!(system.snapshot(), before);
    }

    #[test]
    fn test_zero_or_negative_dt_is_noop() {
        let mut system = system();
        for _ in 0..5 {
            system.update(DT);
        }
        let before = system.snapshot();
        system.update(0.0);
        system.update(-1.0);
        system.update(f32::NAN);
        assert_eq!(system.snapshot(), before);
    }

    #[test]
    fn test_reset_refills_synchronously() {
        let mut system = system();
        for _ in 0..20 {
            system.update(DT);
        }
        system.reset();
        system.update(0.0);

        let snapshot = system.snapshot();
        assert_eq!(snapshot.particles.len(), 200);
        assert!(snapshot.particles.iter().all(|p| p.alpha == 1.0));
        assert!(snapshot.particles.iter().all(|p| p.trail.is_empty()));
        for slot in system.slots.iter().filter(|s| s.alive) {
            assert_eq!(slot.particle.age, 0.0);
        }
    }

    #[test]
    fn test_fixed_seed_is_deterministic() {
        let mut a = system();
        let mut b = system();
        for frame in 0..120 {
            if frame == 30 {
                a.apply(Command::ChangeParticleCount(50));
                b.apply(Command::ChangeParticleCount(50));
            }
            if frame == 60 {
                a.apply(Command::Reset);
                b.apply(Command::Reset);
            }
            a.update(DT);
            b.update(DT);
        }
        assert_eq!(a.snapshot(), b.snapshot());
    }

    #[test]
    fn test_different_seeds_diverge() {
        let mut a = system();
        let mut b = ParticleSystem::new(
            Emitter::default(),
            PlaneAttractor::default(),
            SystemConfig::default(),
            43,
        )
        .unwrap();
        a.update(DT);
        b.update(DT);
        assert_ne!(a.snapshot(), b.snapshot());
    }

    #[test]
    fn test_inactive_attractor_means_constant_velocity() {
        let mut system = system();
        system.toggle_attractor_active();
        let velocities: Vec<Vec3> = system
            .slots
            .iter()
            .filter(|s| s.alive)
            .map(|s| s.particle.velocity)
            .collect();
        system.update(DT);
        let after: Vec<Vec3> = system
            .slots
            .iter()
            .filter(|s| s.alive)
            .map(|s| s.particle.velocity)
            .collect();
        // No gravity, no attractor: velocities unchanged.
        assert_eq!(velocities, after);
    }

    #[test]
    fn test_gravity_accelerates_particles() {
        let config = SystemConfig {
            gravity: Vec3::new(0.0, -9.8, 0.0),
            ..Default::default()
        };
        let mut system = ParticleSystem::new(
            Emitter::default(),
            PlaneAttractor::new(Vec3::new(0.0, -100.0, 0.0), Vec3::Y, 0.5, 1.0).unwrap(),
            config,
            42,
        )
        .unwrap();

        let before: Vec<f32> = system
            .slots
            .iter()
            .filter(|s| s.alive)
            .map(|s| s.particle.velocity.y)
            .collect();
        system.update(DT);
        let after: Vec<f32> = system
            .slots
            .iter()
            .filter(|s| s.alive)
            .map(|s| s.particle.velocity.y)
            .collect();
        for (b, a) in before.iter().zip(&after) {
            assert!((a - (b - 9.8 * DT)).abs() < 1e-5);
        }
    }

    #[test]
    fn test_visibility_toggles_reach_snapshot() {
        let mut system = system();
        assert!(system.snapshot().emitter_visible);
        system.apply(Command::from_key(Key::E).unwrap());
        assert!(!system.snapshot().emitter_visible);

        assert!(system.snapshot().attractor.visible);
        system.apply(Command::from_key(Key::A).unwrap());
        assert!(!system.snapshot().attractor.visible);
        // Visibility does not deactivate the force.
        assert!(system.snapshot().attractor.active);

        system.apply(Command::from_key(Key::Space).unwrap());
        assert!(!system.snapshot().attractor.active);
    }

    #[test]
    fn test_trail_grows_one_position_per_frame() {
        let mut system = system();
        system.update(DT);
        for slot in system.slots.iter().filter(|s| s.alive) {
            assert_eq!(slot.particle.trail.len(), 1);
        }
        system.update(DT);
        for slot in system.slots.iter().filter(|s| s.alive) {
            assert_eq!(slot.particle.trail.len(), 2);
            // Front of the trail is the current position.
            let front = slot.particle.trail.iter().next().unwrap();
            assert_eq!(front, slot.particle.position);
        }
    }
}

//! Simulation state and particle ownership
//!
//! All mutable state lives on the [`Simulation`] context object; there are
//! no ambient globals. The simulation exclusively owns its particles;
//! everyone else gets read-only borrows.

use glam::DVec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::color::Hsl;
use super::particle::Particle;
use crate::config::SimConfig;
use crate::consts::GRAVITY;

/// Run phase.
///
/// Starts `Paused`; an external permission grant (or an immediate grant in
/// contexts without one) flips it to `Running` via
/// [`Simulation::set_paused`]. A denied grant simply never unpauses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Paused,
    Running,
}

/// The simulation driver: owns every particle and all global parameters.
#[derive(Debug)]
pub struct Simulation {
    pub(crate) config: SimConfig,
    pub(crate) particles: Vec<Particle>,
    pub(crate) gravity: DVec2,
    pub(crate) phase: Phase,
    pub(crate) rng: Pcg32,
    /// Raw (unscaled) time held toward the next spawn. Keeps its fractional
    /// remainder across interval crossings and across releases.
    pub(crate) spawn_accumulated: f64,
    /// World position of the hold-to-spawn stream, while active
    pub(crate) spawn_held: Option<DVec2>,
}

impl Simulation {
    /// Create a paused, empty simulation with gravity pointing straight
    /// down at standard magnitude.
    ///
    /// `config` must have passed [`SimConfig::validate`]; feeding a
    /// malformed config is a caller contract violation, not a runtime
    /// error.
    pub fn new(config: SimConfig, seed: u64) -> Self {
        Self {
            config,
            particles: Vec::new(),
            gravity: DVec2::new(0.0, -GRAVITY),
            phase: Phase::Paused,
            rng: Pcg32::seed_from_u64(seed),
            spawn_accumulated: 0.0,
            spawn_held: None,
        }
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn gravity(&self) -> DVec2 {
        self.gravity
    }

    /// Read-only view of every particle, insertion order, newest last.
    /// This order is the draw order: later particles paint on top.
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Overwrite the gravity vector wholesale. The orientation/pointer
    /// collaborator calls this once per input event.
    pub fn set_gravity(&mut self, gx: f64, gy: f64) {
        self.gravity = DVec2::new(gx, gy);
    }

    /// The sole pause/run transition entry point.
    pub fn set_paused(&mut self, paused: bool) {
        let next = if paused { Phase::Paused } else { Phase::Running };
        if next != self.phase {
            log::info!("simulation {:?} -> {:?}", self.phase, next);
            self.phase = next;
        }
    }

    /// Request a new particle at world coordinates. Radius is drawn
    /// uniformly from the configured range and the color from the palette,
    /// both off the seeded RNG.
    pub fn spawn(&mut self, x: f64, y: f64) {
        self.spawn_with_radius_range(x, y, self.config.radius_range);
    }

    /// [`spawn`](Simulation::spawn) with a caller-supplied radius range
    /// instead of the configured one. The range must be finite, positive,
    /// and ordered, like the configured one.
    pub fn spawn_with_radius_range(&mut self, x: f64, y: f64, (min_r, max_r): (f64, f64)) {
        let radius = self.rng.random_range(min_r..max_r);
        let color = Hsl::random(&mut self.rng);
        self.particles.push(Particle::new(DVec2::new(x, y), radius, color));
    }

    /// Insert a pre-built particle (initial seeding).
    pub fn add_particle(&mut self, particle: Particle) {
        self.particles.push(particle);
    }

    /// Start, move, or stop the hold-to-spawn stream. While `Some`, each
    /// running frame accumulates time and emits particles on interval
    /// crossings (see [`Simulation::step`]).
    pub fn set_spawn_held(&mut self, pos: Option<DVec2>) {
        self.spawn_held = pos;
    }

    /// Drop every particle (explicit reset). Phase, gravity, and the RNG
    /// stream are kept.
    pub fn clear(&mut self) {
        self.particles.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_paused_and_empty() {
        let sim = Simulation::new(SimConfig::default(), 1);
        assert_eq!(sim.phase(), Phase::Paused);
        assert!(sim.particles().is_empty());
        assert_eq!(sim.gravity(), DVec2::new(0.0, -GRAVITY));
    }

    #[test]
    fn set_paused_transitions_both_ways() {
        let mut sim = Simulation::new(SimConfig::default(), 1);
        sim.set_paused(false);
        assert_eq!(sim.phase(), Phase::Running);
        sim.set_paused(false);
        assert_eq!(sim.phase(), Phase::Running);
        sim.set_paused(true);
        assert_eq!(sim.phase(), Phase::Paused);
    }

    #[test]
    fn gravity_is_overwritten_wholesale() {
        let mut sim = Simulation::new(SimConfig::default(), 1);
        sim.set_gravity(3.2, -1.5);
        assert_eq!(sim.gravity(), DVec2::new(3.2, -1.5));
    }

    #[test]
    fn spawn_draws_radius_from_configured_range() {
        let mut sim = Simulation::new(SimConfig::default(), 99);
        for i in 0..50 {
            sim.spawn(i as f64, 0.0);
        }
        assert_eq!(sim.particles().len(), 50);
        for particle in sim.particles() {
            assert!((3.0..8.0).contains(&particle.radius()));
        }
        // Insertion order preserved
        assert_eq!(sim.particles()[0].pos.x, 0.0);
        assert_eq!(sim.particles()[49].pos.x, 49.0);
    }

    #[test]
    fn clear_drops_particles_but_keeps_phase() {
        let mut sim = Simulation::new(SimConfig::default(), 1);
        sim.set_paused(false);
        sim.spawn(0.0, 0.0);
        sim.clear();
        assert!(sim.particles().is_empty());
        assert_eq!(sim.phase(), Phase::Running);
    }
}

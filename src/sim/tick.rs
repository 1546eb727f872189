//! Per-frame stepping
//!
//! The order within a step is load-bearing: force application, then
//! integration, then boundary clamping, then pairwise resolution, then
//! spawn intake. Resolving pairs before the boundary would let a particle
//! tunnel straight back past a freshly clamped wall.

use super::particle::Particle;
use super::state::{Phase, Simulation};

impl Simulation {
    /// Advance the simulation by one frame and return the drawable state,
    /// insertion order, newest last.
    ///
    /// `dt` is elapsed frame time in the configured
    /// [`TimeUnit`](crate::config::TimeUnit) and must be non-negative. The
    /// physics integrates `dt * time_scale`; the spawn clock runs on raw
    /// `dt`. A paused frame is a pure passthrough: the current state comes
    /// back unchanged and no clock advances.
    pub fn step(&mut self, dt: f64) -> &[Particle] {
        if self.phase == Phase::Paused {
            return &self.particles;
        }

        let scaled_dt = dt * self.config.time_scale;
        let half_extents = self.config.half_extents();
        let gravity = self.gravity;

        for particle in &mut self.particles {
            // Gravity enters as a constant acceleration, unscaled by mass.
            particle.add_force(gravity);
            particle.integrate(scaled_dt);
            particle.resolve_boundary(half_extents, self.config.border_restitution);
        }

        self.resolve_pairs();
        self.spawn_intake(dt);

        &self.particles
    }

    /// Visit every ordered pair (i, j) with i != j, so each contact is
    /// resolved twice per frame, once from each side. Intentional: the
    /// doubled correction is part of the observed dynamics. Do not collapse
    /// this to one pass per unordered pair.
    fn resolve_pairs(&mut self) {
        let restitution = self.config.self_restitution;
        let n = self.particles.len();
        for i in 0..n {
            for j in 0..n {
                if i == j {
                    continue;
                }
                let (particle, other) = pair_mut(&mut self.particles, i, j);
                particle.resolve_collision(other, restitution);
            }
        }
    }

    /// Hold-to-spawn: accumulate raw frame time while a spawn point is held
    /// and emit one particle per interval crossing. Only whole intervals
    /// are consumed, so a long frame can spawn several particles and the
    /// fractional remainder carries into the next frame.
    fn spawn_intake(&mut self, dt: f64) {
        let Some(pos) = self.spawn_held else {
            return;
        };
        self.spawn_accumulated += dt;
        let interval = self.config.spawn_interval();
        while self.spawn_accumulated >= interval {
            self.spawn(pos.x, pos.y);
            self.spawn_accumulated -= interval;
        }
    }
}

/// Mutable references to two distinct slots of the particle collection.
fn pair_mut(particles: &mut [Particle], i: usize, j: usize) -> (&mut Particle, &mut Particle) {
    debug_assert_ne!(i, j);
    if i < j {
        let (left, right) = particles.split_at_mut(j);
        (&mut left[i], &mut right[0])
    } else {
        let (left, right) = particles.split_at_mut(i);
        (&mut right[0], &mut left[j])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{SimConfig, TimeUnit};
    use crate::sim::color::Hsl;
    use glam::DVec2;

    fn unit_config() -> SimConfig {
        // dt in seconds, no extra scaling, in a 100x100 world
        SimConfig {
            world_width: 100.0,
            world_height: 100.0,
            time_scale: 1.0,
            time_unit: TimeUnit::Seconds,
            ..Default::default()
        }
    }

    fn disc(x: f64, y: f64, radius: f64) -> Particle {
        Particle::new(
            DVec2::new(x, y),
            radius,
            Hsl {
                hue: 0,
                saturation: 80.0,
                lightness: 80.0,
            },
        )
    }

    #[test]
    fn paused_step_is_a_pure_passthrough() {
        let mut sim = Simulation::new(unit_config(), 1);
        sim.add_particle(disc(10.0, 10.0, 5.0));
        sim.set_spawn_held(Some(DVec2::ZERO));

        let before = sim.particles().to_vec();
        sim.step(10.0);

        assert_eq!(sim.particles(), &before[..]);
        // The spawn clock did not advance either
        assert_eq!(sim.particles().len(), 1);
    }

    #[test]
    fn separated_resting_pair_never_moves() {
        let mut sim = Simulation::new(unit_config(), 1);
        sim.set_gravity(0.0, 0.0);
        sim.set_paused(false);
        // Distance 12, sum of radii 10: no contact
        sim.add_particle(disc(-6.0, 0.0, 5.0));
        sim.add_particle(disc(6.0, 0.0, 5.0));

        for _ in 0..100 {
            sim.step(0.0);
        }

        assert_eq!(sim.particles()[0].pos, DVec2::new(-6.0, 0.0));
        assert_eq!(sim.particles()[1].pos, DVec2::new(6.0, 0.0));
    }

    #[test]
    fn overlapping_pair_settles_tangent_within_one_step() {
        let mut sim = Simulation::new(unit_config(), 1);
        sim.set_gravity(0.0, 0.0);
        sim.set_paused(false);
        sim.add_particle(disc(-4.0, 0.0, 5.0));
        sim.add_particle(disc(4.0, 0.0, 5.0));

        sim.step(0.0);

        let particles = sim.particles();
        let distance = particles[0].pos.distance(particles[1].pos);
        // The (0,1) pass lands exact tangency; the (1,0) pass then sees a
        // non-colliding pair and must not disturb it.
        assert!((distance - 10.0).abs() < 1e-9);
        assert_eq!(particles[0].vel, DVec2::ZERO);
        assert_eq!(particles[1].vel, DVec2::ZERO);
    }

    #[test]
    fn crowded_world_stays_bounded_and_finite() {
        let mut sim = Simulation::new(unit_config(), 1);
        sim.set_paused(false);
        for i in 0..8 {
            sim.add_particle(disc(-20.0 + 5.0 * i as f64, 30.0 - 4.0 * i as f64, 4.0));
        }

        for _ in 0..2000 {
            sim.step(1.0 / 120.0);
        }

        // Pairwise correction runs after the boundary clamp, so a busy pile
        // can poke marginally past a wall within a frame; it never escapes.
        let half = sim.config().half_extents();
        for particle in sim.particles() {
            let r = particle.radius();
            assert!(particle.vel.is_finite());
            assert!(particle.pos.x - r >= -half.x - 1.0);
            assert!(particle.pos.x + r <= half.x + 1.0);
            assert!(particle.pos.y - r >= -half.y - 1.0);
            assert!(particle.pos.y + r <= half.y + 1.0);
        }
    }

    #[test]
    fn trajectories_are_deterministic_for_a_fixed_seed() {
        let run = || {
            let mut sim = Simulation::new(unit_config(), 424242);
            sim.set_paused(false);
            sim.set_gravity(1.3, -9.81);
            sim.set_spawn_held(Some(DVec2::new(5.0, 20.0)));
            for _ in 0..300 {
                sim.step(1.0 / 60.0);
            }
            sim.set_spawn_held(None);
            for _ in 0..300 {
                sim.step(1.0 / 60.0);
            }
            sim.particles().to_vec()
        };

        let first = run();
        let second = run();
        assert!(!first.is_empty());
        assert_eq!(first, second);
    }

    #[test]
    fn bounce_height_decays_geometrically_with_restitution() {
        let mut config = unit_config();
        config.border_restitution = 0.8;
        let mut sim = Simulation::new(config, 1);
        sim.set_paused(false);
        sim.set_gravity(0.0, -9.81);
        sim.add_particle(disc(0.0, 0.0, 5.0));

        let dt = 1e-3;
        let floor = -45.0;
        let mut apexes = Vec::new();
        let mut current_apex = f64::NEG_INFINITY;
        let mut prev_vy = 0.0;

        for _ in 0..20_000 {
            sim.step(dt);
            let p = &sim.particles()[0];
            current_apex = current_apex.max(p.pos.y);
            // A bounce is the floor contact flipping the velocity sign
            if prev_vy < 0.0 && p.vel.y > 0.0 {
                // Restitution applied exactly once at the clamp
                assert!((p.vel.y - -prev_vy * 0.8).abs() < 9.81 * dt + 1e-9);
                apexes.push(current_apex);
                current_apex = f64::NEG_INFINITY;
            }
            prev_vy = p.vel.y;
            if apexes.len() == 4 {
                break;
            }
        }

        assert!(apexes.len() >= 3, "expected several bounces");
        // Apex height above the floor shrinks by ~0.8² per bounce
        for pair in apexes.windows(2) {
            let ratio = (pair[1] - floor) / (pair[0] - floor);
            assert!(
                (ratio - 0.64).abs() < 0.05,
                "apex ratio {ratio} out of range"
            );
        }
    }

    #[test]
    fn held_spawn_emits_on_interval_crossings() {
        let mut sim = Simulation::new(unit_config(), 5);
        sim.set_paused(false);
        sim.set_gravity(0.0, 0.0);
        sim.set_spawn_held(Some(DVec2::new(10.0, 10.0)));

        // 125 ms at a 50 ms interval: two spawns in one long frame,
        // 25 ms remainder
        sim.step(0.125);
        assert_eq!(sim.particles().len(), 2);

        // 30 ms more crosses the interval once, 5 ms remainder
        sim.step(0.03);
        assert_eq!(sim.particles().len(), 3);

        // Releasing stops the stream but keeps the remainder
        sim.set_spawn_held(None);
        sim.step(1.0);
        assert_eq!(sim.particles().len(), 3);

        // Holding again resumes from the carried 5 ms remainder
        sim.set_spawn_held(Some(DVec2::new(10.0, 10.0)));
        sim.step(0.04);
        assert_eq!(sim.particles().len(), 3);
        sim.step(0.01);
        assert_eq!(sim.particles().len(), 4);
    }

    #[test]
    fn held_spawn_respects_millis_unit() {
        let mut sim = Simulation::new(
            SimConfig {
                time_unit: TimeUnit::Millis,
                time_scale: 1.0,
                ..unit_config()
            },
            5,
        );
        sim.set_paused(false);
        sim.set_gravity(0.0, 0.0);
        sim.set_spawn_held(Some(DVec2::ZERO));

        sim.step(49.0);
        assert!(sim.particles().is_empty());
        sim.step(1.0);
        assert_eq!(sim.particles().len(), 1);
    }

    #[test]
    fn time_scale_multiplies_the_physics_step() {
        let mut scaled = Simulation::new(
            SimConfig {
                time_scale: 10.0,
                ..unit_config()
            },
            1,
        );
        let mut plain = Simulation::new(unit_config(), 1);
        for sim in [&mut scaled, &mut plain] {
            sim.set_paused(false);
            sim.set_gravity(0.0, -1.0);
            sim.add_particle(disc(0.0, 40.0, 2.0));
        }

        scaled.step(0.01);
        plain.step(0.1);

        assert_eq!(scaled.particles()[0].pos, plain.particles()[0].pos);
        assert_eq!(scaled.particles()[0].vel, plain.particles()[0].vel);
    }

    #[test]
    fn pair_mut_returns_distinct_slots_both_orders() {
        let mut particles = vec![disc(0.0, 0.0, 1.0), disc(1.0, 0.0, 1.0), disc(2.0, 0.0, 1.0)];
        let (a, b) = pair_mut(&mut particles, 0, 2);
        assert_eq!(a.pos.x, 0.0);
        assert_eq!(b.pos.x, 2.0);
        let (a, b) = pair_mut(&mut particles, 2, 0);
        assert_eq!(a.pos.x, 2.0);
        assert_eq!(b.pos.x, 0.0);
    }
}

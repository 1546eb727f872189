//! The particle entity and its collision responses
//!
//! Every operation here is a total function over valid inputs (finite
//! numbers, positive radius, non-negative dt); nothing returns an error.
//! Callers own the contract of supplying well-formed geometry.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::color::Hsl;
use crate::consts::MIN_CONTACT_DISTANCE;

/// One rigid disc.
///
/// Mass is derived from the radius (π·r², unit density) at construction and
/// never mutated; the radius is immutable after creation. `color` is a
/// pass-through display attribute the physics never reads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    pub pos: DVec2,
    pub vel: DVec2,
    /// Force accumulated since the last integration, zeroed by `integrate`
    acc: DVec2,
    radius: f64,
    mass: f64,
    pub color: Hsl,
}

impl Particle {
    /// Create a disc at rest. `radius` must be finite and positive.
    pub fn new(pos: DVec2, radius: f64, color: Hsl) -> Self {
        debug_assert!(radius.is_finite() && radius > 0.0);
        Self {
            pos,
            vel: DVec2::ZERO,
            acc: DVec2::ZERO,
            radius,
            mass: std::f64::consts::PI * radius * radius,
            color,
        }
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn mass(&self) -> f64 {
        self.mass
    }

    /// Accumulate an external force for the next integration. Gravity is
    /// fed here as a constant acceleration, not scaled by mass. May be
    /// called any number of times per step.
    pub fn add_force(&mut self, force: DVec2) {
        self.acc += force;
    }

    /// Semi-implicit Euler step: velocity from the accumulated
    /// acceleration first, then position from the updated velocity.
    ///
    /// Clears the accumulator, so `dt = 0` moves nothing but still resets
    /// forces. Call exactly once per frame, after all forces.
    pub fn integrate(&mut self, dt: f64) {
        self.vel += self.acc * dt;
        self.pos += self.vel * dt;
        self.acc = DVec2::ZERO;
    }

    /// Keep the full disc inside `[-hw, hw] x [-hh, hh]`, reflecting the
    /// velocity component perpendicular to any violated wall scaled by
    /// `-restitution`.
    ///
    /// Axes are corrected independently; a corner violation clamps both
    /// axes with no corner-specific normal.
    pub fn resolve_boundary(&mut self, half_extents: DVec2, restitution: f64) {
        let hw = half_extents.x;
        let hh = half_extents.y;

        if self.pos.x + self.radius > hw {
            self.pos.x = hw - self.radius;
            self.vel.x *= -restitution;
        } else if self.pos.x - self.radius < -hw {
            self.pos.x = -hw + self.radius;
            self.vel.x *= -restitution;
        }

        if self.pos.y + self.radius > hh {
            self.pos.y = hh - self.radius;
            self.vel.y *= -restitution;
        } else if self.pos.y - self.radius < -hh {
            self.pos.y = -hh + self.radius;
            self.vel.y *= -restitution;
        }
    }

    /// Circle-circle collision against `other`.
    ///
    /// Non-colliding pairs are left untouched, no side effects. On overlap
    /// the penetration is removed along the contact normal, split inversely
    /// by mass so the discs end up exactly tangent; then an inverse-mass
    /// impulse is applied unless the pair is already separating.
    pub fn resolve_collision(&mut self, other: &mut Particle, restitution: f64) {
        let diff = self.pos - other.pos;
        let distance_squared = diff.length_squared();
        let radii = self.radius + other.radius;

        if distance_squared >= radii * radii {
            return;
        }

        // Exactly coincident centers would zero the denominator below;
        // substitute a minimum contact distance.
        let mut distance = distance_squared.sqrt();
        if distance == 0.0 {
            distance = MIN_CONTACT_DISTANCE;
        }

        let overlap = radii - distance;
        let normal = diff / distance;

        // Push the discs apart, heavier one moving less.
        let total_mass = self.mass + other.mass;
        let correction = overlap / total_mass;
        self.pos += normal * (correction * other.mass);
        other.pos -= normal * (correction * self.mass);

        let relative_vel = self.vel - other.vel;
        let dot = relative_vel.dot(normal);

        // Already separating: applying an impulse would add energy. The
        // positional correction above is enough.
        if dot > 0.0 {
            return;
        }

        let impulse = (-(1.0 + restitution) * dot) / (1.0 / self.mass + 1.0 / other.mass);
        self.vel += normal * (impulse / self.mass);
        other.vel -= normal * (impulse / other.mass);
    }
}

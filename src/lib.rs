//! Gravity Pit - a deterministic 2D rigid-circle particle simulation
//!
//! Core modules:
//! - `sim`: Deterministic simulation (particles, collisions, stepping)
//! - `config`: Runtime-validated simulation parameters
//!
//! The crate is the physics core only: it consumes numeric inputs (gravity
//! vector, time step, spawn requests) and exposes particle state (position,
//! radius, color) for an external renderer. Coordinates use a world frame
//! centered at the origin with +y up; mapping to screen pixels is the
//! renderer's problem.

pub mod config;
pub mod sim;

pub use config::{ConfigError, SimConfig, TimeUnit};
pub use sim::{Hsl, Particle, Phase, Simulation};

/// Simulation defaults and physical constants
pub mod consts {
    /// Standard gravity magnitude (world units / s²)
    pub const GRAVITY: f64 = 9.81;

    /// Default restitution against the world border
    pub const BORDER_RESTITUTION: f64 = 0.5;
    /// Default restitution between particles
    pub const SELF_RESTITUTION: f64 = 0.5;

    /// Default world width
    pub const WORLD_WIDTH: f64 = 800.0;
    /// Default world height
    pub const WORLD_HEIGHT: f64 = 600.0;

    /// Hold-to-spawn interval in milliseconds
    pub const SPAWN_INTERVAL_MS: f64 = 50.0;
    /// Lower bound of the spawned radius range
    pub const RADIUS_MIN: f64 = 3.0;
    /// Upper bound (exclusive) of the spawned radius range
    pub const RADIUS_MAX: f64 = 8.0;

    /// Floor for the contact distance when two centers coincide exactly,
    /// so deriving the contact normal never divides by zero
    pub const MIN_CONTACT_DISTANCE: f64 = 0.01;
}

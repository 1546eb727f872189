//! Deterministic simulation module
//!
//! All physics lives here. This module must be pure and deterministic:
//! - Caller-driven time steps only
//! - Seeded RNG only, and only for spawn radius and color, never the dynamics
//! - Stable iteration order (insertion order, newest last)
//! - No rendering or platform dependencies

pub mod color;
pub mod particle;
pub mod state;
pub mod tick;

pub use color::Hsl;
pub use particle::Particle;
pub use state::{Phase, Simulation};

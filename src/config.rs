//! Simulation parameters
//!
//! Validated once at the configuration boundary. Past that boundary the
//! physics core assumes well-formed inputs and has no recoverable-error
//! taxonomy of its own.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Unit of the `dt` values handed to [`Simulation::step`].
///
/// Two deployed configurations exist: dt in seconds with a 10x time scale,
/// and dt in milliseconds with an implicit 1x scale. The unit is only used
/// to convert `spawn_interval_ms` into dt units; the physics itself never
/// infers time scale.
///
/// [`Simulation::step`]: crate::sim::Simulation::step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum TimeUnit {
    #[default]
    Seconds,
    Millis,
}

impl TimeUnit {
    /// Convert a millisecond duration into this unit.
    pub fn from_millis(&self, ms: f64) -> f64 {
        match self {
            TimeUnit::Seconds => ms / 1000.0,
            TimeUnit::Millis => ms,
        }
    }
}

/// Rejected configuration values
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{name} must be in 0..=1, got {value}")]
    RestitutionOutOfRange { name: &'static str, value: f64 },
    #[error("{name} must be finite and > 0, got {value}")]
    BadWorldExtent { name: &'static str, value: f64 },
    #[error("spawn interval must be finite and > 0, got {0} ms")]
    BadSpawnInterval(f64),
    #[error("radius range must be finite, positive and ordered, got ({0}, {1})")]
    BadRadiusRange(f64, f64),
    #[error("time scale must be finite and > 0, got {0}")]
    BadTimeScale(f64),
}

/// Process-wide simulation parameters.
///
/// `world_width`/`world_height` are full extents; the world itself spans
/// `[-w/2, w/2] x [-h/2, h/2]`. No persistence: a restart goes back to
/// defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Restitution against the world border, 0..=1
    pub border_restitution: f64,
    /// Restitution between particles, 0..=1
    pub self_restitution: f64,
    pub world_width: f64,
    pub world_height: f64,
    /// Hold-to-spawn interval, milliseconds
    pub spawn_interval_ms: f64,
    /// Half-open [min, max) range spawned radii are drawn from
    pub radius_range: (f64, f64),
    /// Multiplier applied to dt for the physics step (the spawn clock uses
    /// raw dt)
    pub time_scale: f64,
    /// Unit of the dt values the caller supplies
    pub time_unit: TimeUnit,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            border_restitution: BORDER_RESTITUTION,
            self_restitution: SELF_RESTITUTION,
            world_width: WORLD_WIDTH,
            world_height: WORLD_HEIGHT,
            spawn_interval_ms: SPAWN_INTERVAL_MS,
            radius_range: (RADIUS_MIN, RADIUS_MAX),
            time_scale: 10.0,
            time_unit: TimeUnit::Seconds,
        }
    }
}

impl SimConfig {
    /// Check every parameter once, up front. A config that passes is safe
    /// to drive the core with; one that doesn't must not be used.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("border_restitution", self.border_restitution),
            ("self_restitution", self.self_restitution),
        ] {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::RestitutionOutOfRange { name, value });
            }
        }
        for (name, value) in [
            ("world_width", self.world_width),
            ("world_height", self.world_height),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::BadWorldExtent { name, value });
            }
        }
        if !self.spawn_interval_ms.is_finite() || self.spawn_interval_ms <= 0.0 {
            return Err(ConfigError::BadSpawnInterval(self.spawn_interval_ms));
        }
        let (min_r, max_r) = self.radius_range;
        if !min_r.is_finite() || !max_r.is_finite() || min_r <= 0.0 || min_r >= max_r {
            return Err(ConfigError::BadRadiusRange(min_r, max_r));
        }
        if !self.time_scale.is_finite() || self.time_scale <= 0.0 {
            return Err(ConfigError::BadTimeScale(self.time_scale));
        }
        Ok(())
    }

    /// World half-extents (width/2, height/2).
    pub fn half_extents(&self) -> glam::DVec2 {
        glam::DVec2::new(self.world_width / 2.0, self.world_height / 2.0)
    }

    /// Spawn interval converted into the configured dt unit.
    pub fn spawn_interval(&self) -> f64 {
        self.time_unit.from_millis(self.spawn_interval_ms)
    }
}

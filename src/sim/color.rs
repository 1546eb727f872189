//! Particle display color
//!
//! Opaque to the physics: assigned at spawn and carried through to the
//! rendering collaborator untouched.

use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

/// An HSL color in the soft/bright palette of the original visualization.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hsl {
    /// Hue in whole degrees, 0..360
    pub hue: u16,
    /// Saturation percent, drawn from 70..90 (vivid)
    pub saturation: f64,
    /// Lightness percent, drawn from 75..90 (soft/bright)
    pub lightness: f64,
}

impl Hsl {
    /// Draw a random display color.
    pub fn random<R: Rng>(rng: &mut R) -> Self {
        Self {
            hue: rng.random_range(0..360),
            saturation: 70.0 + rng.random_range(0.0..20.0),
            lightness: 75.0 + rng.random_range(0.0..15.0),
        }
    }
}

impl fmt::Display for Hsl {
    /// CSS `hsl()` form, as consumed by canvas-style renderers.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "hsl({}, {}%, {}%)",
            self.hue, self.saturation, self.lightness
        )
    }
}

//! Initial generations.

use rand::Rng;
use serde::Deserialize;

use super::cell::Coordinate;
use super::grid::{Extents, Generation};

/// Random seeding parameters.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct SeedConfig {
    /// Only cells strictly closer than this to the origin may start alive.
    pub radius: f64,
    /// Chance that an eligible cell starts alive.
    pub probability: f64,
    /// Fixed RNG seed; `None` seeds from the OS.
    pub rng_seed: Option<u64>,
}

impl Default for SeedConfig {
    fn default() -> Self {
        SeedConfig {
            radius: 3.0,
            probability: 0.05,
            rng_seed: None,
        }
    }
}

/// A sparse random ball of live cells around the origin. A probability
/// outside `[0, 1]` is clamped; a non-finite one seeds nothing.
pub fn random<R: Rng>(extents: Extents, config: &SeedConfig, rng: &mut R) -> Generation {
    let probability = if config.probability.is_finite() {
        config.probability.clamp(0.0, 1.0)
    } else {
        0.0
    };
    Generation::from_fn(extents, |c| {
        (c.distance_sq() as f64).sqrt() < config.radius && rng.random_bool(probability)
    })
}

/// A generation with exactly the given coordinates alive. Coordinates
/// outside `extents` are ignored.
pub fn with_alive(extents: Extents, alive: &[Coordinate]) -> Generation {
    Generation::from_fn(extents, |c| alive.contains(&c))
}

//! Generation transition with a two-threshold 3D Life rule.

use std::time::Instant;

use rayon::prelude::*;
use serde::Deserialize;
use tracing::debug;

use super::cell::Cell;
use super::grid::Generation;
use super::index::GenerationIndex;
use crate::error::EngineError;

/// Liveness thresholds.
///
/// - Survival: an alive cell stays alive with `lower..=upper` live neighbours
/// - Birth: a dead cell becomes alive with exactly `upper` live neighbours
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
pub struct Rules {
    pub lower: u8,
    pub upper: u8,
}

impl Default for Rules {
    fn default() -> Self {
        Rules { lower: 2, upper: 3 }
    }
}

impl Rules {
    pub fn new(lower: u8, upper: u8) -> Result<Self, EngineError> {
        let rules = Rules { lower, upper };
        rules.validate()?;
        Ok(rules)
    }

    pub fn validate(&self) -> Result<(), EngineError> {
        if self.lower > self.upper {
            return Err(EngineError::InvalidRules {
                lower: self.lower,
                upper: self.upper,
            });
        }
        Ok(())
    }

    /// Next liveness of a cell. Birth needs an exact match on `upper`, not the
    /// survival band.
    #[inline]
    pub fn next_alive(&self, alive: bool, alive_neighbors: u8) -> bool {
        if alive {
            alive_neighbors >= self.lower && alive_neighbors <= self.upper
        } else {
            alive_neighbors == self.upper
        }
    }
}

/// Compute the next generation.
///
/// Every cell is evaluated against an index of the input generation only, so
/// the output does not depend on cell order and cells are processed in
/// parallel. The output keeps the input's cell order and coordinates.
pub fn transition(generation: &Generation, rules: Rules) -> Result<Generation, EngineError> {
    rules.validate()?;

    let started = Instant::now();
    let index = GenerationIndex::build(generation)?;
    let index_us = started.elapsed().as_micros();

    let compute_started = Instant::now();
    let cells: Vec<Cell> = generation
        .cells()
        .par_iter()
        .map(|cell| {
            let alive_neighbors = index.count_alive_neighbors(cell.coordinate);
            Cell {
                alive: rules.next_alive(cell.alive, alive_neighbors),
                alive_neighbors: Some(alive_neighbors),
                ..*cell
            }
        })
        .collect();
    let compute_us = compute_started.elapsed().as_micros();

    let next = Generation::from_cells(cells);
    let alive = next.alive_count();
    debug!(
        cells = next.len(),
        alive,
        index_us,
        compute_us,
        alive_ratio = if next.is_empty() { 0.0 } else { alive as f64 / next.len() as f64 },
        "transition computed"
    );

    Ok(next)
}

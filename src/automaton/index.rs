//! Identity lookup over a single generation.

use std::collections::HashMap;

use super::cell::{Cell, CellId, Coordinate};
use super::grid::{neighbors_of, Generation};
use crate::error::EngineError;

/// Read-only map from cell identity to cell, built once per transition from
/// the input generation. All reads in a pass go through this snapshot.
pub struct GenerationIndex<'a> {
    cells: HashMap<CellId, &'a Cell>,
}

impl<'a> GenerationIndex<'a> {
    /// Index every cell of `generation`. Fails on a cell whose identity does
    /// not match its coordinate, and on a repeated coordinate, either of which
    /// would otherwise hide a cell from neighbour lookups.
    pub fn build(generation: &'a Generation) -> Result<Self, EngineError> {
        let mut cells = HashMap::with_capacity(generation.len());
        for cell in generation.cells() {
            if cell.id != cell.coordinate.id() {
                return Err(EngineError::invariant(format!(
                    "cell at {} carries identity {}",
                    cell.coordinate, cell.id
                )));
            }
            if cells.insert(cell.id, cell).is_some() {
                return Err(EngineError::invariant(format!(
                    "duplicate coordinate {}",
                    cell.coordinate
                )));
            }
        }
        Ok(GenerationIndex { cells })
    }

    #[inline]
    pub fn get(&self, id: CellId) -> Option<&'a Cell> {
        self.cells.get(&id).copied()
    }

    /// Liveness at a coordinate. Coordinates not in the generation are dead.
    #[inline]
    pub fn is_alive(&self, c: Coordinate) -> bool {
        self.get(c.id()).is_some_and(|cell| cell.alive)
    }

    /// Count alive neighbors using Moore neighborhood (26 neighbors).
    pub fn count_alive_neighbors(&self, c: Coordinate) -> u8 {
        neighbors_of(c).into_iter().filter(|&n| self.is_alive(n)).count() as u8
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

//! Cell-level changes between two generations, for updating a view.

use super::cell::Coordinate;
use super::grid::Generation;
use super::index::GenerationIndex;
use crate::error::EngineError;

/// Cells that changed liveness between two generations.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GenerationDiff {
    pub born: Vec<Coordinate>,
    pub died: Vec<Coordinate>,
}

impl GenerationDiff {
    pub fn is_empty(&self) -> bool {
        self.born.is_empty() && self.died.is_empty()
    }
}

/// Compare `next` against `previous`. Both must cover the same coordinates.
pub fn diff(previous: &Generation, next: &Generation) -> Result<GenerationDiff, EngineError> {
    if previous.len() != next.len() {
        return Err(EngineError::invariant(format!(
            "cannot diff generations of {} and {} cells",
            previous.len(),
            next.len()
        )));
    }

    let index = GenerationIndex::build(previous)?;
    let mut out = GenerationDiff::default();

    for cell in next.cells() {
        let before = index.get(cell.id).ok_or_else(|| {
            EngineError::invariant(format!("{} missing from previous generation", cell.coordinate))
        })?;
        match (before.alive, cell.alive) {
            (false, true) => out.born.push(cell.coordinate),
            (true, false) => out.died.push(cell.coordinate),
            _ => {}
        }
    }

    Ok(out)
}

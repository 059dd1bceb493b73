//! Bounding extents, generations and the Moore neighbourhood.

use serde::Deserialize;

use super::cell::{Cell, Coordinate};
use crate::error::EngineError;

/// Offsets of the 26 cells surrounding a cell (3x3x3 cube excluding center).
pub const NEIGHBOR_OFFSETS: [(i32, i32, i32); 26] = moore_offsets();

const fn moore_offsets() -> [(i32, i32, i32); 26] {
    let mut out = [(0, 0, 0); 26];
    let mut i = 0;
    let mut dz = -1;
    while dz <= 1 {
        let mut dy = -1;
        while dy <= 1 {
            let mut dx = -1;
            while dx <= 1 {
                // Skip the center cell
                if !(dx == 0 && dy == 0 && dz == 0) {
                    out[i] = (dx, dy, dz);
                    i += 1;
                }
                dx += 1;
            }
            dy += 1;
        }
        dz += 1;
    }
    out
}

/// The 26 Moore neighbours of a coordinate.
///
/// No clamping or wrapping against any region: neighbours of an edge cell
/// simply include coordinates that no generation contains.
#[inline]
pub fn neighbors_of(c: Coordinate) -> [Coordinate; 26] {
    std::array::from_fn(|i| {
        let (dx, dy, dz) = NEIGHBOR_OFFSETS[i];
        c.offset(dx, dy, dz)
    })
}

/// Size of the simulated cuboid, centered at the origin.
///
/// Each axis of size `n` covers `-(n/2) ..= n - 1 - n/2`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize)]
pub struct Extents {
    pub x: u16,
    pub y: u16,
    pub z: u16,
}

impl Default for Extents {
    fn default() -> Self {
        Extents { x: 30, y: 30, z: 30 }
    }
}

impl Extents {
    /// Checked constructor; every axis must be non-empty.
    pub fn new(x: u16, y: u16, z: u16) -> Result<Self, EngineError> {
        let extents = Extents { x, y, z };
        extents.validate()?;
        Ok(extents)
    }

    pub fn validate(&self) -> Result<(), EngineError> {
        if self.x == 0 || self.y == 0 || self.z == 0 {
            return Err(EngineError::InvalidExtents {
                x: self.x,
                y: self.y,
                z: self.z,
            });
        }
        Ok(())
    }

    /// Number of cells in the region.
    #[inline]
    pub fn volume(&self) -> usize {
        self.x as usize * self.y as usize * self.z as usize
    }

    #[inline]
    fn axis_min(n: u16) -> i32 {
        -((n / 2) as i32)
    }

    pub fn min(&self) -> Coordinate {
        Coordinate::new(
            Self::axis_min(self.x),
            Self::axis_min(self.y),
            Self::axis_min(self.z),
        )
    }

    pub fn max(&self) -> Coordinate {
        let min = self.min();
        Coordinate::new(
            min.x + self.x as i32 - 1,
            min.y + self.y as i32 - 1,
            min.z + self.z as i32 - 1,
        )
    }

    /// Check if a coordinate lies inside the region.
    #[inline]
    pub fn contains(&self, c: Coordinate) -> bool {
        let (min, max) = (self.min(), self.max());
        c.x >= min.x && c.x <= max.x && c.y >= min.y && c.y <= max.y && c.z >= min.z && c.z <= max.z
    }

    /// Linear index in z,y,x order (z changes slowest, x fastest).
    #[inline]
    pub fn index_of(&self, c: Coordinate) -> Option<usize> {
        if !self.contains(c) {
            return None;
        }
        let min = self.min();
        let (x, y, z) = (
            (c.x - min.x) as usize,
            (c.y - min.y) as usize,
            (c.z - min.z) as usize,
        );
        Some(z * self.y as usize * self.x as usize + y * self.x as usize + x)
    }

    /// Every coordinate in the region, in the same z,y,x order as `index_of`.
    pub fn coordinates(&self) -> impl Iterator<Item = Coordinate> {
        let (min, max) = (self.min(), self.max());
        (min.z..=max.z).flat_map(move |z| {
            (min.y..=max.y).flat_map(move |y| (min.x..=max.x).map(move |x| Coordinate::new(x, y, z)))
        })
    }
}

/// One complete snapshot of cell liveness.
///
/// A generation is never mutated once built; each transition produces a new
/// one.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Generation {
    cells: Vec<Cell>,
}

impl Generation {
    pub fn from_cells(cells: Vec<Cell>) -> Self {
        Generation { cells }
    }

    /// Every cell of the region, all dead.
    pub fn dead(extents: Extents) -> Self {
        Self::from_fn(extents, |_| false)
    }

    /// Build a generation covering `extents`, asking `alive` for each cell.
    pub fn from_fn(extents: Extents, mut alive: impl FnMut(Coordinate) -> bool) -> Self {
        let mut cells = Vec::with_capacity(extents.volume());
        for c in extents.coordinates() {
            cells.push(Cell::new(c, alive(c)));
        }
        Generation { cells }
    }

    #[inline]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn into_cells(self) -> Vec<Cell> {
        self.cells
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn alive_count(&self) -> usize {
        self.cells.iter().filter(|c| c.alive).count()
    }

    /// True when no cell is alive. Callers treat this as extinction.
    pub fn is_extinct(&self) -> bool {
        self.cells.iter().all(|c| !c.alive)
    }

    /// Find a cell by coordinate (linear scan).
    pub fn get(&self, c: Coordinate) -> Option<&Cell> {
        self.cells.iter().find(|cell| cell.coordinate == c)
    }

    /// Check that every coordinate of `extents` appears exactly once and that
    /// each cell's identity matches its coordinate.
    pub fn validate(&self, extents: Extents) -> Result<(), EngineError> {
        extents.validate()?;

        if self.cells.len() != extents.volume() {
            return Err(EngineError::invariant(format!(
                "expected {} cells for {}x{}x{}, found {}",
                extents.volume(),
                extents.x,
                extents.y,
                extents.z,
                self.cells.len()
            )));
        }

        let mut seen = vec![false; extents.volume()];
        for cell in &self.cells {
            if cell.id != cell.coordinate.id() {
                return Err(EngineError::invariant(format!(
                    "cell at {} carries identity {}",
                    cell.coordinate, cell.id
                )));
            }
            let idx = extents.index_of(cell.coordinate).ok_or_else(|| {
                EngineError::invariant(format!("coordinate {} outside region", cell.coordinate))
            })?;
            if std::mem::replace(&mut seen[idx], true) {
                return Err(EngineError::invariant(format!(
                    "duplicate coordinate {}",
                    cell.coordinate
                )));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_offsets_are_distinct_and_exclude_center() {
        let set: HashSet<_> = NEIGHBOR_OFFSETS.iter().collect();
        assert_eq!(set.len(), 26);
        assert!(!set.contains(&(0, 0, 0)));
        for &(dx, dy, dz) in &NEIGHBOR_OFFSETS {
            assert!((-1..=1).contains(&dx));
            assert!((-1..=1).contains(&dy));
            assert!((-1..=1).contains(&dz));
        }
    }

    #[test]
    fn test_neighbors_of_edge_are_not_clamped() {
        let n = neighbors_of(Coordinate::new(1, 1, 1));
        assert!(n.contains(&Coordinate::new(2, 2, 2)));
        assert!(n.contains(&Coordinate::new(0, 0, 0)));
        assert!(!n.contains(&Coordinate::new(1, 1, 1)));
        assert_eq!(n.iter().collect::<HashSet<_>>().len(), 26);
    }

    #[test]
    fn test_extents_centered_ranges() {
        let odd = Extents::new(3, 3, 3).unwrap();
        assert_eq!(odd.min(), Coordinate::new(-1, -1, -1));
        assert_eq!(odd.max(), Coordinate::new(1, 1, 1));

        let even = Extents::new(30, 4, 1).unwrap();
        assert_eq!(even.min(), Coordinate::new(-15, -2, 0));
        assert_eq!(even.max(), Coordinate::new(14, 1, 0));
    }

    #[test]
    fn test_extents_reject_zero_axis() {
        assert!(matches!(
            Extents::new(4, 0, 4),
            Err(EngineError::InvalidExtents { x: 4, y: 0, z: 4 })
        ));
    }

    #[test]
    fn test_index_of() {
        let e = Extents::new(4, 4, 4).unwrap();

        // First cell
        assert_eq!(e.index_of(Coordinate::new(-2, -2, -2)), Some(0));
        // Last cell
        assert_eq!(e.index_of(Coordinate::new(1, 1, 1)), Some(63));
        // Various cells
        assert_eq!(e.index_of(Coordinate::new(-1, -2, -2)), Some(1));
        assert_eq!(e.index_of(Coordinate::new(-2, -1, -2)), Some(4));
        assert_eq!(e.index_of(Coordinate::new(-2, -2, -1)), Some(16));
        // Out of bounds
        assert_eq!(e.index_of(Coordinate::new(2, 0, 0)), None);
        assert_eq!(e.index_of(Coordinate::new(0, -3, 0)), None);
    }

    #[test]
    fn test_coordinates_follow_index_order() {
        let e = Extents::new(3, 2, 2).unwrap();
        let coords: Vec<_> = e.coordinates().collect();
        assert_eq!(coords.len(), e.volume());
        for (i, c) in coords.iter().enumerate() {
            assert_eq!(e.index_of(*c), Some(i));
        }
    }

    #[test]
    fn test_dead_generation_covers_region() {
        let e = Extents::new(5, 4, 3).unwrap();
        let g = Generation::dead(e);
        assert_eq!(g.len(), 60);
        assert!(g.is_extinct());
        assert!(g.validate(e).is_ok());
    }

    #[test]
    fn test_validate_rejects_duplicate() {
        let e = Extents::new(2, 2, 2).unwrap();
        let mut cells = Generation::dead(e).into_cells();
        cells[7] = cells[0];
        let err = Generation::from_cells(cells).validate(e).unwrap_err();
        assert!(matches!(err, EngineError::InvariantViolation { .. }));
    }

    #[test]
    fn test_validate_rejects_missing_and_outside() {
        let e = Extents::new(2, 2, 2).unwrap();

        let mut cells = Generation::dead(e).into_cells();
        cells.pop();
        assert!(Generation::from_cells(cells).validate(e).is_err());

        let mut cells = Generation::dead(e).into_cells();
        cells[3] = Cell::new(Coordinate::new(5, 5, 5), false);
        assert!(Generation::from_cells(cells).validate(e).is_err());
    }

    #[test]
    fn test_validate_rejects_mismatched_identity() {
        let e = Extents::new(2, 2, 2).unwrap();
        let mut cells = Generation::dead(e).into_cells();
        cells[2].id = Coordinate::new(9, 9, 9).id();
        assert!(Generation::from_cells(cells).validate(e).is_err());
    }

    #[test]
    fn test_alive_count_and_get() {
        let e = Extents::new(3, 3, 3).unwrap();
        let g = Generation::from_fn(e, |c| c.x == 0);
        assert_eq!(g.alive_count(), 9);
        assert!(!g.is_extinct());
        assert!(g.get(Coordinate::new(0, 1, -1)).unwrap().alive);
        assert!(!g.get(Coordinate::new(1, 1, -1)).unwrap().alive);
        assert!(g.get(Coordinate::new(2, 0, 0)).is_none());
    }
}

//! Cell coordinates, identities and per-cell state.

use std::fmt;

/// A lattice position. Signed so the region can be centered on the origin.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Coordinate {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl Coordinate {
    #[inline]
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Coordinate { x, y, z }
    }

    /// Packed identity for this coordinate.
    #[inline]
    pub const fn id(self) -> CellId {
        CellId::of(self)
    }

    /// Offset by a delta. Wraps at the `i32` limits, which lie far outside any
    /// region `Extents` can describe.
    #[inline]
    pub const fn offset(self, dx: i32, dy: i32, dz: i32) -> Self {
        Coordinate {
            x: self.x.wrapping_add(dx),
            y: self.y.wrapping_add(dy),
            z: self.z.wrapping_add(dz),
        }
    }

    /// Squared distance from the origin.
    #[inline]
    pub fn distance_sq(self) -> i64 {
        let (x, y, z) = (self.x as i64, self.y as i64, self.z as i64);
        x * x + y * y + z * z
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({})-({})-({})", self.x, self.y, self.z)
    }
}

/// Identity of a cell, derived only from its coordinate.
///
/// The three 32-bit patterns are packed side by side into a `u128`, so the
/// encoding is bijective over every `i32` triple, negatives included.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellId(u128);

impl CellId {
    #[inline]
    pub const fn of(c: Coordinate) -> Self {
        CellId(((c.x as u32 as u128) << 64) | ((c.y as u32 as u128) << 32) | (c.z as u32 as u128))
    }

    /// Decode the coordinate this identity was built from.
    #[inline]
    pub const fn coordinate(self) -> Coordinate {
        Coordinate {
            x: (self.0 >> 64) as u32 as i32,
            y: (self.0 >> 32) as u32 as i32,
            z: self.0 as u32 as i32,
        }
    }

    #[inline]
    pub const fn raw(self) -> u128 {
        self.0
    }
}

impl fmt::Display for CellId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.coordinate(), f)
    }
}

/// One cell of a generation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Cell {
    pub id: CellId,
    pub coordinate: Coordinate,
    pub alive: bool,
    /// Live neighbours seen by the transition that produced this cell.
    /// Diagnostic only; `None` for freshly seeded cells.
    pub alive_neighbors: Option<u8>,
}

impl Cell {
    pub fn new(coordinate: Coordinate, alive: bool) -> Self {
        Cell {
            id: coordinate.id(),
            coordinate,
            alive,
            alive_neighbors: None,
        }
    }
}

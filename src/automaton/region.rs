//! Region extraction and import between generations and flat byte buffers.
//!
//! Buffers are laid out in z,y,x order (z changes slowest, x fastest), one
//! byte per cell: 0 = dead, 1 = alive. Bounds are half-open `[min, max)` in
//! region coordinates and are clamped to the extents.

use super::cell::Coordinate;
use super::grid::{Extents, Generation};

/// Clamp `[min, max)` to the region. `None` if nothing remains.
fn clamp_box(extents: Extents, min: Coordinate, max: Coordinate) -> Option<(Coordinate, Coordinate)> {
    let (lo, hi) = (extents.min(), extents.max());
    let min = Coordinate::new(min.x.max(lo.x), min.y.max(lo.y), min.z.max(lo.z));
    let max = Coordinate::new(
        max.x.min(hi.x + 1),
        max.y.min(hi.y + 1),
        max.z.min(hi.z + 1),
    );

    // Check for empty region
    if min.x >= max.x || min.y >= max.y || min.z >= max.z {
        return None;
    }
    Some((min, max))
}

/// Liveness of every cell of `extents`, densely in z,y,x order. Cells of the
/// generation outside the region are skipped.
pub fn dense_alive(generation: &Generation, extents: Extents) -> Vec<u8> {
    let mut dense = vec![0u8; extents.volume()];
    for cell in generation.cells() {
        if let Some(idx) = extents.index_of(cell.coordinate) {
            dense[idx] = cell.alive as u8;
        }
    }
    dense
}

/// Extract a box of cells into a flat buffer.
///
/// # Returns
/// Number of bytes written, or 0 if the box is empty or the buffer too small.
pub fn extract_region(
    generation: &Generation,
    extents: Extents,
    out_buf: &mut [u8],
    min: Coordinate,
    max: Coordinate,
) -> u64 {
    let Some((min, max)) = clamp_box(extents, min, max) else {
        return 0;
    };

    let total_size = (max.x - min.x) as usize * (max.y - min.y) as usize * (max.z - min.z) as usize;
    if out_buf.len() < total_size {
        return 0;
    }

    let dense = dense_alive(generation, extents);
    let mut offset = 0;
    for z in min.z..max.z {
        for y in min.y..max.y {
            for x in min.x..max.x {
                if let Some(idx) = extents.index_of(Coordinate::new(x, y, z)) {
                    out_buf[offset] = dense[idx];
                }
                offset += 1;
            }
        }
    }

    offset as u64
}

/// Extract the whole region. The buffer must hold `extents.volume()` bytes.
pub fn extract_alive(generation: &Generation, extents: Extents, out_buf: &mut [u8]) -> u64 {
    extract_region(generation, extents, out_buf, extents.min(), extents.max().offset(1, 1, 1))
}

/// Build a new generation from `generation` with a box overwritten from a
/// flat buffer. Input values are normalized: 0 = dead, any non-zero = alive.
///
/// # Returns
/// The new generation and the number of bytes read, or `None` if the box is
/// empty or the buffer too small.
pub fn import_region(
    generation: &Generation,
    extents: Extents,
    in_buf: &[u8],
    min: Coordinate,
    max: Coordinate,
) -> Option<(Generation, u64)> {
    let (min, max) = clamp_box(extents, min, max)?;

    let (w, h) = ((max.x - min.x) as usize, (max.y - min.y) as usize);
    let total_size = w * h * (max.z - min.z) as usize;
    if in_buf.len() < total_size {
        return None;
    }

    let inside = |c: Coordinate| {
        c.x >= min.x && c.x < max.x && c.y >= min.y && c.y < max.y && c.z >= min.z && c.z < max.z
    };
    let cells = generation
        .cells()
        .iter()
        .map(|cell| {
            let mut cell = *cell;
            if inside(cell.coordinate) {
                let c = cell.coordinate;
                let offset = (c.z - min.z) as usize * h * w + (c.y - min.y) as usize * w + (c.x - min.x) as usize;
                cell.alive = in_buf[offset] != 0;
                cell.alive_neighbors = None;
            }
            cell
        })
        .collect();

    Some((Generation::from_cells(cells), total_size as u64))
}

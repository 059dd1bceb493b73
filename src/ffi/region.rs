//! Region extraction and import FFI functions.

use crate::automaton::{self, Coordinate};
use crate::simulation::Simulation;

/// Writes the liveness of every cell (0 or 1) into a flat buffer.
///
/// # Layout
/// z,y,x order over the extents (z changes slowest, x changes fastest).
///
/// # Safety
/// - `ptr` must be a valid pointer to a Simulation, or null
/// - `out_buf` must point to a writable buffer of at least `len` bytes
///
/// # Returns
/// Number of bytes written, or 0 on error or if `len` is smaller than the
/// region's volume.
#[no_mangle]
pub unsafe extern "C" fn vl_extract_alive(ptr: *const Simulation, out_buf: *mut u8, len: u64) -> u64 {
    if ptr.is_null() || out_buf.is_null() {
        return 0;
    }

    let sim = &*ptr;
    let buf_slice = std::slice::from_raw_parts_mut(out_buf, len as usize);
    automaton::extract_alive(sim.generation(), sim.extents(), buf_slice)
}

/// Overwrites a box of cells from a flat buffer and makes the result the
/// current generation. Any in-flight transition becomes stale.
///
/// # Layout
/// The buffer is expected to be in z,y,x order over `[min, max)`, clamped to
/// the extents. Input values are normalized: 0 = dead, non-zero = alive.
///
/// # Safety
/// - `ptr` must be a valid pointer to a Simulation, or null
/// - `in_buf` must point to a readable buffer of at least `len` bytes
///
/// # Returns
/// Number of bytes read, or 0 on error.
#[no_mangle]
pub unsafe extern "C" fn vl_import_region(
    ptr: *mut Simulation,
    in_buf: *const u8,
    len: u64,
    min_x: i32,
    min_y: i32,
    min_z: i32,
    max_x: i32,
    max_y: i32,
    max_z: i32,
) -> u64 {
    if ptr.is_null() || in_buf.is_null() {
        return 0;
    }

    let sim = &mut *ptr;
    let buf_slice = std::slice::from_raw_parts(in_buf, len as usize);
    let imported = automaton::import_region(
        sim.generation(),
        sim.extents(),
        buf_slice,
        Coordinate::new(min_x, min_y, min_z),
        Coordinate::new(max_x, max_y, max_z),
    );

    match imported {
        Some((generation, read)) => match sim.replace_generation(generation) {
            Ok(()) => read,
            Err(_) => 0,
        },
        None => 0,
    }
}

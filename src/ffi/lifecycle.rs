//! Simulation creation, destruction, and counters.

use crate::automaton::{DispatchConfig, Extents, Rules};
use crate::config::SimulationConfig;
use crate::simulation::Simulation;

/// Creates a randomly seeded simulation and returns an opaque pointer.
///
/// # Returns
/// A pointer to a new Simulation, or null if the extents or rules are invalid
/// or the worker pool cannot start.
///
/// # Safety
/// The returned pointer must eventually be freed with `vl_destroy()`.
#[no_mangle]
pub extern "C" fn vl_create(
    x: u16,
    y: u16,
    z: u16,
    lower: u8,
    upper: u8,
    worker_threads: u8,
) -> *mut Simulation {
    let config = SimulationConfig {
        extents: Extents { x, y, z },
        rules: Rules { lower, upper },
        dispatch: DispatchConfig { worker_threads },
        ..SimulationConfig::default()
    };
    match Simulation::new(&config) {
        Ok(sim) => Box::into_raw(Box::new(sim)),
        Err(err) => {
            tracing::warn!(error = %err, "vl_create rejected parameters");
            std::ptr::null_mut()
        }
    }
}

/// Destroys a simulation and frees its memory.
///
/// # Safety
/// - `ptr` must be a valid pointer returned by `vl_create()`, or null
/// - `ptr` must not be used after this call
#[no_mangle]
pub unsafe extern "C" fn vl_destroy(ptr: *mut Simulation) {
    if !ptr.is_null() {
        drop(Box::from_raw(ptr));
    }
}

/// Gets the number of generations adopted so far.
///
/// # Safety
/// - `ptr` must be a valid pointer to a Simulation, or null
///
/// # Returns
/// The counter, or 0 if ptr is null.
#[no_mangle]
pub unsafe extern "C" fn vl_get_generation(ptr: *const Simulation) -> u64 {
    if ptr.is_null() {
        return 0;
    }
    (*ptr).generations_adopted()
}

/// Gets the number of live cells in the current generation.
///
/// # Safety
/// - `ptr` must be a valid pointer to a Simulation, or null
///
/// # Returns
/// The live cell count, or 0 if ptr is null.
#[no_mangle]
pub unsafe extern "C" fn vl_alive_count(ptr: *const Simulation) -> u64 {
    if ptr.is_null() {
        return 0;
    }
    (*ptr).generation().alive_count() as u64
}

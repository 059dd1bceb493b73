//! Ticking and resetting.

use crate::simulation::Simulation;

/// Nothing was adopted this tick.
pub const VL_TICK_PENDING: i32 = 0;
/// A new generation became current.
pub const VL_TICK_ADOPTED: i32 = 1;
/// The generation was extinct and has been reseeded.
pub const VL_TICK_RESEEDED: i32 = 2;
/// Null pointer.
pub const VL_TICK_NULL: i32 = -1;
/// The current request failed or could not be submitted.
pub const VL_TICK_FAULT: i32 = -2;

/// Runs one non-blocking tick of the simulation loop.
///
/// # Safety
/// - `ptr` must be a valid pointer to a Simulation, or null
///
/// # Returns
/// One of the `VL_TICK_*` codes.
#[no_mangle]
pub unsafe extern "C" fn vl_tick(ptr: *mut Simulation) -> i32 {
    if ptr.is_null() {
        return VL_TICK_NULL;
    }

    let sim = &mut *ptr;
    match sim.tick() {
        Ok(report) if report.fault.is_some() => VL_TICK_FAULT,
        Ok(report) if report.reseeded => VL_TICK_RESEEDED,
        Ok(report) if report.adopted.is_some() => VL_TICK_ADOPTED,
        Ok(_) => VL_TICK_PENDING,
        Err(err) => {
            tracing::warn!(error = %err, "tick failed");
            VL_TICK_FAULT
        }
    }
}

/// Discards the current generation and reseeds. Results still in flight
/// are ignored when they arrive.
///
/// # Safety
/// - `ptr` must be a valid pointer to a Simulation, or null
#[no_mangle]
pub unsafe extern "C" fn vl_reset(ptr: *mut Simulation) {
    if ptr.is_null() {
        return;
    }
    (*ptr).reset();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ffi::lifecycle;
    use std::ptr;
    use std::thread;
    use std::time::{Duration, Instant};

    #[test]
    fn test_tick_eventually_adopts_or_reseeds() {
        unsafe {
            let sim = lifecycle::vl_create(10, 10, 10, 2, 3, 1);
            assert!(!sim.is_null());

            let deadline = Instant::now() + Duration::from_secs(10);
            let mut code = VL_TICK_PENDING;
            while code == VL_TICK_PENDING && Instant::now() < deadline {
                code = vl_tick(sim);
                thread::sleep(Duration::from_millis(1));
            }
            assert!(code == VL_TICK_ADOPTED || code == VL_TICK_RESEEDED);

            lifecycle::vl_destroy(sim);
        }
    }

    #[test]
    fn test_reset_keeps_generation_counter() {
        unsafe {
            let sim = lifecycle::vl_create(6, 6, 6, 2, 3, 1);
            vl_reset(sim);
            assert_eq!(lifecycle::vl_get_generation(sim), 0);
            lifecycle::vl_destroy(sim);
        }
    }

    #[test]
    fn test_null_pointer_handling() {
        unsafe {
            assert_eq!(vl_tick(ptr::null_mut()), VL_TICK_NULL);
            vl_reset(ptr::null_mut()); // Should not crash
        }
    }
}

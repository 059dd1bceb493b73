//! C FFI layer for the visualization shell.
//!
//! This module exports C ABI functions for use from a rendering host.
//! All functions are marked with `#[no_mangle]` and use `extern "C"`.
//!
//! The actual logic is in `simulation` and `automaton`. These functions are
//! thin wrappers that handle null checks, pointer safety, and C-to-Rust
//! conversions.

pub mod lifecycle;
pub mod region;
pub mod stepping;

pub use lifecycle::{vl_alive_count, vl_create, vl_destroy, vl_get_generation};
pub use region::{vl_extract_alive, vl_import_region};
pub use stepping::{vl_reset, vl_tick};

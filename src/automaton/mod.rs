//! Core automaton logic.
//!
//! This module contains the cell model, the neighbour topology, the
//! transition rule and the dispatcher that runs transitions off the caller's
//! thread. The FFI layer in `ffi/` calls into these.

pub mod cell;
pub mod diff;
pub mod dispatch;
pub mod grid;
pub mod index;
pub mod region;
pub mod seed;
pub mod stepping;

pub use cell::{Cell, CellId, Coordinate};
pub use diff::{diff, GenerationDiff};
pub use dispatch::{
    classify, DispatchConfig, Dispatcher, Freshness, RequestId, TransitionRequest, TransitionResponse,
    TransitionResult,
};
pub use grid::{neighbors_of, Extents, Generation, NEIGHBOR_OFFSETS};
pub use index::GenerationIndex;
pub use region::{extract_alive, extract_region, import_region};
pub use seed::SeedConfig;
pub use stepping::{transition, Rules};

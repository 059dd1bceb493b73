//! Voxel Life - 3D Game of Life with background transitions
//!
//! A bounded cubic lattice evolves under a two-threshold Moore-neighbourhood
//! rule. Transitions run on a worker pool so a render loop never blocks; each
//! result carries the id of the request that produced it and the caller
//! drops results it is no longer waiting for.
//!
//! - [`automaton`] holds the cell model, topology, rule and dispatcher
//! - [`simulation`] is the caller-side tick driver
//! - [`ffi`] exports a C ABI for rendering hosts

pub mod automaton;
pub mod config;
pub mod error;
pub mod ffi;
pub mod simulation;

#[cfg(test)]
mod tests;

pub use automaton::{
    Cell, CellId, Coordinate, Dispatcher, Extents, Freshness, Generation, RequestId, Rules, TransitionResponse,
};
pub use config::SimulationConfig;
pub use error::{ConfigError, EngineError};
pub use simulation::{RequestState, Simulation, TickReport};

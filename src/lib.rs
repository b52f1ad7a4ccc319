//! Wave function collapse tile map generation from a small example pattern
//!
//! Adjacency rules are learned from which tiles touch in the example. A grid
//! starting in full superposition is then resolved one lowest-entropy cell at
//! a time, each weighted collapse propagated outward to the neighbors.

#![forbid(unsafe_code)]

/// Core algorithm: entropy queue, collapse, propagation and the generation session
pub mod algorithm;
/// Example pattern handling and adjacency constraint extraction
pub mod analysis;
/// Input/output operations, configuration and error handling
pub mod io;
/// Mathematical utilities for weighted selection
pub mod math;
/// Tile catalog, cells and the generation grid
pub mod spatial;

pub use algorithm::executor::{GenerationReport, GenerationSession, SessionConfig, StepEvent};
pub use algorithm::propagation::ContradictionPolicy;
pub use io::error::{AlgorithmError, Result};

//! Spatial data structures for the generation grid
//!
//! This module contains spatial-related functionality including:
//! - The tile catalog and tile ids
//! - Per-cell solver state
//! - The fixed-size grid owning all cells

/// Per-cell domain and resolution state
pub mod cell;
/// Fixed-size grid of cells
pub mod grid;
/// Tile catalog with generation weights
pub mod tiles;

pub use cell::Cell;
pub use grid::{Grid, Position};
pub use tiles::{TileCatalog, TileId};

//! Fixed-size grid of cells
//!
//! The grid is allocated once for a generation run and owns every cell.
//! Positions are `[row, col]` pairs; all lookups are bounds-checked.

use ndarray::Array2;

use crate::analysis::adjacency::ORTHOGONAL_OFFSETS;
use crate::io::configuration::MAX_GRID_DIMENSION;
use crate::io::error::{Result, invalid_parameter};
use crate::spatial::cell::Cell;

/// Grid coordinates as `[row, col]`
pub type Position = [usize; 2];

/// ROWS×COLS collection of cells, all starting in full superposition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    cells: Array2<Cell>,
}

impl Grid {
    /// Allocate a grid where every cell may hold any of `tile_count` tiles
    ///
    /// # Errors
    ///
    /// Returns an error if either dimension is zero or exceeds `MAX_GRID_DIMENSION`
    pub fn new(rows: usize, cols: usize, tile_count: usize) -> Result<Self> {
        validate_dimension("rows", rows)?;
        validate_dimension("cols", cols)?;

        Ok(Self {
            cells: Array2::from_elem((rows, cols), Cell::new(tile_count)),
        })
    }

    /// Number of rows
    pub fn rows(&self) -> usize {
        self.cells.nrows()
    }

    /// Number of columns
    pub fn cols(&self) -> usize {
        self.cells.ncols()
    }

    /// Grid dimensions (rows, cols)
    pub fn dimensions(&self) -> (usize, usize) {
        self.cells.dim()
    }

    /// Cell at `position`, if it lies inside the grid
    pub fn get(&self, position: Position) -> Option<&Cell> {
        self.cells.get(position)
    }

    /// Mutable cell at `position`, if it lies inside the grid
    pub fn get_mut(&mut self, position: Position) -> Option<&mut Cell> {
        self.cells.get_mut(position)
    }

    /// Whether `position` lies inside the grid
    pub fn contains(&self, position: Position) -> bool {
        position[0] < self.rows() && position[1] < self.cols()
    }

    /// In-bounds orthogonal neighbors of `position` (up, down, left, right)
    pub fn neighbors(&self, position: Position) -> impl Iterator<Item = Position> + '_ {
        ORTHOGONAL_OFFSETS.into_iter().filter_map(move |[dr, dc]| {
            let row = position[0].checked_add_signed(dr)?;
            let col = position[1].checked_add_signed(dc)?;
            let neighbor = [row, col];
            self.contains(neighbor).then_some(neighbor)
        })
    }

    /// Every position in row-major order
    pub fn positions(&self) -> impl Iterator<Item = Position> + use<> {
        let (rows, cols) = self.dimensions();
        (0..rows).flat_map(move |row| (0..cols).map(move |col| [row, col]))
    }

    /// Cells paired with their positions in row-major order
    pub fn cells(&self) -> impl Iterator<Item = (Position, &Cell)> + '_ {
        self.cells
            .indexed_iter()
            .map(|((row, col), cell)| ([row, col], cell))
    }

    /// Number of cells holding a resolved tile
    pub fn resolved_count(&self) -> usize {
        self.cells
            .iter()
            .filter(|cell| cell.resolved().is_some())
            .count()
    }

    /// Whether every cell holds a resolved tile
    pub fn is_fully_resolved(&self) -> bool {
        self.cells.iter().all(|cell| cell.resolved().is_some())
    }

    /// Positions of unresolved cells whose domain is empty
    pub fn contradictions(&self) -> Vec<Position> {
        self.cells()
            .filter(|(_, cell)| cell.is_contradiction())
            .map(|(position, _)| position)
            .collect()
    }
}

fn validate_dimension(parameter: &'static str, value: usize) -> Result<()> {
    if value == 0 || value > MAX_GRID_DIMENSION {
        return Err(invalid_parameter(
            parameter,
            &value,
            &format!("must be between 1 and {MAX_GRID_DIMENSION}"),
        ));
    }
    Ok(())
}

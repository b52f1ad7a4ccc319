//! Adjacency rules learned from an example pattern
//!
//! Every tile type maps to the set of tile types observed directly above,
//! below, left or right of it somewhere in the pattern. The table is built
//! once and then only read.

use crate::algorithm::bitset::TileSet;
use crate::analysis::patterns::ExamplePattern;
use crate::spatial::grid::{Grid, Position};
use crate::spatial::tiles::TileId;

/// Orthogonal offsets in up, down, left, right order
pub const ORTHOGONAL_OFFSETS: [[isize; 2]; 4] = [[-1, 0], [1, 0], [0, -1], [0, 1]];

/// Allowed-neighbor table indexed by tile id
///
/// Not necessarily symmetric: `b` may be allowed next to `a` without `a`
/// being allowed next to `b`. Tiles that never occur in the pattern have
/// an empty entry.
#[derive(Debug, Clone)]
pub struct AdjacencyConstraints {
    allowed: Vec<TileSet>,
    tile_count: usize,
}

impl AdjacencyConstraints {
    /// Scan the pattern once and collect the orthogonal neighbors of every tile
    ///
    /// `tile_count` is the catalog size; pattern ids outside it are ignored.
    pub fn from_pattern(pattern: &ExamplePattern, tile_count: usize) -> Self {
        let mut allowed = vec![TileSet::new(tile_count); tile_count];
        let cells = pattern.cells();
        let (rows, cols) = cells.dim();

        for row in 0..rows {
            for col in 0..cols {
                let Some(&tile) = cells.get([row, col]) else {
                    continue;
                };
                let Some(entry) = allowed.get_mut(tile) else {
                    continue;
                };
                for [dr, dc] in ORTHOGONAL_OFFSETS {
                    let neighbor = row
                        .checked_add_signed(dr)
                        .zip(col.checked_add_signed(dc))
                        .and_then(|(r, c)| cells.get([r, c]));
                    if let Some(&neighbor_tile) = neighbor {
                        entry.insert(neighbor_tile);
                    }
                }
            }
        }

        Self {
            allowed,
            tile_count,
        }
    }

    /// Number of tile types the table was built for
    pub const fn tile_count(&self) -> usize {
        self.tile_count
    }

    /// Tiles allowed next to `tile`; empty for unknown or unobserved tiles
    pub fn allowed(&self, tile: TileId) -> TileSet {
        self.allowed
            .get(tile)
            .cloned()
            .unwrap_or_else(|| TileSet::new(self.tile_count))
    }

    /// Union of the allowed neighbors of every tile in `domain`
    pub fn allowed_by(&self, domain: &TileSet) -> TileSet {
        let mut union = TileSet::new(self.tile_count);
        for tile in domain.iter() {
            if let Some(entry) = self.allowed.get(tile) {
                union.union_with(entry);
            }
        }
        union
    }

    /// Whether `neighbor` may sit orthogonally next to `tile`
    pub fn permits(&self, tile: TileId, neighbor: TileId) -> bool {
        self.allowed
            .get(tile)
            .is_some_and(|entry| entry.contains(neighbor))
    }

    /// Every ordered pair of adjacent resolved cells that breaks the table
    ///
    /// A pair `(p, q)` is reported when the tile at `q` is not allowed next
    /// to the tile at `p`. Unresolved cells are not checked.
    pub fn violations(&self, grid: &Grid) -> Vec<(Position, Position)> {
        let mut violations = Vec::new();
        for position in grid.positions() {
            let Some(tile) = grid.get(position).and_then(|cell| cell.resolved()) else {
                continue;
            };
            for neighbor in grid.neighbors(position) {
                let Some(neighbor_tile) = grid.get(neighbor).and_then(|cell| cell.resolved())
                else {
                    continue;
                };
                if !self.permits(tile, neighbor_tile) {
                    violations.push((position, neighbor));
                }
            }
        }
        violations
    }
}

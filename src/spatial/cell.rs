//! Solver state of a single grid position

use crate::algorithm::bitset::TileSet;
use crate::analysis::adjacency::AdjacencyConstraints;
use crate::spatial::tiles::TileId;

/// Outcome of filtering a cell's domain against a neighbor's allowed set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Narrowing {
    /// Every candidate was already allowed
    Unchanged,
    /// Some candidates were removed and at least one remains
    Narrowed,
    /// The last candidate was removed; the cell is now a contradiction
    Emptied,
    /// The cell is resolved to a tile the neighbor forbids; nothing was changed
    Conflict,
}

/// One grid position: resolved tile, remaining candidates and cached neighbor set
///
/// Once `resolved` is set the domain is the singleton holding it and the
/// allowed-neighbor set is that tile's constraint entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    resolved: Option<TileId>,
    domain: TileSet,
    allowed_neighbors: TileSet,
}

impl Cell {
    /// Unresolved cell in full superposition: any tile, any neighbor
    pub fn new(tile_count: usize) -> Self {
        Self {
            resolved: None,
            domain: TileSet::all(tile_count),
            allowed_neighbors: TileSet::all(tile_count),
        }
    }

    /// Tile this cell has been collapsed to, if any
    pub const fn resolved(&self) -> Option<TileId> {
        self.resolved
    }

    /// Remaining candidate tiles
    pub const fn domain(&self) -> &TileSet {
        &self.domain
    }

    /// Tiles this cell currently permits on any orthogonal neighbor
    pub const fn allowed_neighbors(&self) -> &TileSet {
        &self.allowed_neighbors
    }

    /// Domain cardinality, used as the entropy proxy for collapse ordering
    pub fn entropy(&self) -> usize {
        self.domain.count()
    }

    /// Whether the cell has no candidate left and is not resolved
    pub fn is_contradiction(&self) -> bool {
        self.resolved.is_none() && self.domain.is_empty()
    }

    /// Commit the cell to `tile`
    ///
    /// Callers draw `tile` from the current domain; the reseed policy is the
    /// only caller that resolves a contradicted cell.
    pub fn resolve(&mut self, tile: TileId, constraints: &AdjacencyConstraints) {
        self.resolved = Some(tile);
        self.domain = TileSet::singleton(constraints.tile_count(), tile);
        self.allowed_neighbors = constraints.allowed(tile);
    }

    /// Keep only candidates present in `allowed` and refresh the neighbor cache
    pub fn restrict(&mut self, allowed: &TileSet, constraints: &AdjacencyConstraints) -> Narrowing {
        if let Some(tile) = self.resolved {
            return if allowed.contains(tile) {
                Narrowing::Unchanged
            } else {
                Narrowing::Conflict
            };
        }

        let before = self.domain.count();
        self.domain.intersect_with(allowed);
        let after = self.domain.count();
        if after == before {
            return Narrowing::Unchanged;
        }

        self.allowed_neighbors = constraints.allowed_by(&self.domain);
        if after == 0 {
            Narrowing::Emptied
        } else {
            Narrowing::Narrowed
        }
    }
}

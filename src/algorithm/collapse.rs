use crate::{
    algorithm::bitset::TileSet,
    analysis::adjacency::AdjacencyConstraints,
    math::probability::{total_weight, weighted_index},
    spatial::cell::Cell,
    spatial::tiles::{TileCatalog, TileId},
};
use rand::{Rng, SeedableRng, rngs::StdRng};

/// Seeded random selector for reproducible stochastic choices
pub struct RandomSelector {
    rng: StdRng,
}

impl RandomSelector {
    /// Create a deterministic random selector
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Weighted random selection over integer weights
    ///
    /// Returns an index into `weights` using a cumulative-weight draw, or
    /// `None` when the weights are empty or sum to zero.
    pub fn weighted_choice(&mut self, weights: &[u32]) -> Option<usize> {
        let total = total_weight(weights);
        if total == 0 {
            return None;
        }
        let draw = self.rng.random_range(0..total);
        weighted_index(weights, draw)
    }

    /// Draw one tile from `candidates`, weighted by catalog weight
    pub fn choose_tile(&mut self, candidates: &TileSet, catalog: &TileCatalog) -> Option<TileId> {
        let tiles = candidates.to_vec();
        let weights: Vec<u32> = tiles.iter().map(|&tile| catalog.weight(tile)).collect();
        self.weighted_choice(&weights)
            .and_then(|index| tiles.get(index).copied())
    }
}

/// Result of attempting to collapse one cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollapseOutcome {
    /// The cell was unresolved and now holds this tile
    Resolved(TileId),
    /// The cell already held this tile; nothing changed
    AlreadyResolved(TileId),
    /// The domain was empty; the cell is left unresolved
    Contradiction,
}

/// Commit an unresolved cell to one tile drawn from its domain
///
/// On success the domain shrinks to the drawn tile and the allowed-neighbor
/// set becomes that tile's constraint entry. Propagation is the caller's job.
pub fn collapse_cell(
    cell: &mut Cell,
    catalog: &TileCatalog,
    constraints: &AdjacencyConstraints,
    selector: &mut RandomSelector,
) -> CollapseOutcome {
    if let Some(tile) = cell.resolved() {
        return CollapseOutcome::AlreadyResolved(tile);
    }

    match selector.choose_tile(cell.domain(), catalog) {
        Some(tile) => {
            cell.resolve(tile, constraints);
            CollapseOutcome::Resolved(tile)
        }
        None => CollapseOutcome::Contradiction,
    }
}

/// Resolve a contradicted cell by drawing from the whole catalog
///
/// Ignores the (empty) domain and any neighbor constraints.
pub fn reseed_cell(
    cell: &mut Cell,
    catalog: &TileCatalog,
    constraints: &AdjacencyConstraints,
    selector: &mut RandomSelector,
) -> Option<TileId> {
    let tile = selector.choose_tile(&catalog.full_set(), catalog)?;
    cell.resolve(tile, constraints);
    Some(tile)
}

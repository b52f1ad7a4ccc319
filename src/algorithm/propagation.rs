use crate::{
    analysis::adjacency::AdjacencyConstraints,
    io::error::{AlgorithmError, Result},
    spatial::cell::Narrowing,
    spatial::grid::{Grid, Position},
};
use std::collections::HashSet;

/// What to do when a cell runs out of candidate tiles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum ContradictionPolicy {
    /// Report the first contradiction as an error and stop generating
    #[default]
    Abort,
    /// Record the contradiction and later resolve the cell from the full catalog
    Reseed,
}

/// Counters describing one propagation pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PropagationStats {
    /// Number of effective domain reductions (a cell may count more than once)
    pub narrowed: usize,
    /// Distinct cells popped from the work stack
    pub visited: usize,
    /// Cells emptied, or resolved cells forbidden by a neighbor, under `Reseed`
    pub contradictions: Vec<Position>,
}

/// Iterative flood fill spreading domain reductions to orthogonal neighbors
///
/// The work stack and visited set are kept between passes to avoid
/// reallocating them for every collapse.
#[derive(Debug, Default)]
pub struct Propagator {
    stack: Vec<Position>,
    visited: HashSet<Position>,
}

impl Propagator {
    /// Create a propagator with empty buffers
    pub fn new() -> Self {
        Self::default()
    }

    /// Re-filter neighbor domains outward from `origin` until nothing changes
    ///
    /// Each popped cell filters its neighbors by its allowed-neighbor set; a
    /// neighbor whose domain shrank is pushed again. The same position may be
    /// pushed several times before it is popped. That only costs redundant
    /// filtering, since filtering against an unchanged set is a no-op.
    /// Emptied cells are never pushed.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `origin` lies outside the grid
    /// - Under `ContradictionPolicy::Abort`, a domain is emptied or a resolved
    ///   cell is forbidden by its neighbor (the grid keeps every change made so far)
    pub fn propagate(
        &mut self,
        grid: &mut Grid,
        constraints: &AdjacencyConstraints,
        origin: Position,
        policy: ContradictionPolicy,
    ) -> Result<PropagationStats> {
        if !grid.contains(origin) {
            return Err(AlgorithmError::IllegalQueueState {
                position: origin,
                grid_dimensions: grid.dimensions(),
            });
        }

        self.stack.clear();
        self.visited.clear();
        self.stack.push(origin);

        let mut stats = PropagationStats::default();
        let mut neighbors = Vec::with_capacity(4);

        while let Some(source) = self.stack.pop() {
            self.visited.insert(source);

            let Some(allowed) = grid
                .get(source)
                .filter(|cell| !cell.is_contradiction())
                .map(|cell| cell.allowed_neighbors().clone())
            else {
                continue;
            };

            neighbors.clear();
            neighbors.extend(grid.neighbors(source));

            for &neighbor in &neighbors {
                let Some(cell) = grid.get_mut(neighbor) else {
                    continue;
                };

                match cell.restrict(&allowed, constraints) {
                    Narrowing::Unchanged => {}
                    Narrowing::Narrowed => {
                        stats.narrowed += 1;
                        self.stack.push(neighbor);
                    }
                    outcome @ (Narrowing::Emptied | Narrowing::Conflict) => {
                        if outcome == Narrowing::Emptied {
                            stats.narrowed += 1;
                        }
                        tracing::debug!(
                            row = neighbor[0],
                            col = neighbor[1],
                            source_row = source[0],
                            source_col = source[1],
                            ?outcome,
                            ?policy,
                            "contradiction during propagation"
                        );
                        match policy {
                            ContradictionPolicy::Abort => {
                                return Err(AlgorithmError::Contradiction {
                                    position: neighbor,
                                    iteration: 0,
                                });
                            }
                            ContradictionPolicy::Reseed => stats.contradictions.push(neighbor),
                        }
                    }
                }
            }
        }

        stats.visited = self.visited.len();
        Ok(stats)
    }
}

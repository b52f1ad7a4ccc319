use crate::{
    algorithm::collapse::{CollapseOutcome, RandomSelector, collapse_cell, reseed_cell},
    algorithm::propagation::{ContradictionPolicy, PropagationStats, Propagator},
    algorithm::queue::{EntropyKey, EntropyQueue},
    analysis::adjacency::AdjacencyConstraints,
    analysis::patterns::{ExamplePattern, SampleDefinition},
    io::configuration::{DEFAULT_COLS, DEFAULT_ROWS, DEFAULT_SEED},
    io::error::{AlgorithmError, Result, WithContext},
    spatial::grid::{Grid, Position},
    spatial::tiles::{TileCatalog, TileId},
};
use std::ops::ControlFlow;

/// Run parameters, validated when a session is created
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SessionConfig {
    /// Number of grid rows
    pub rows: usize,
    /// Number of grid columns
    pub cols: usize,
    /// Seed for the collapse random number generator
    pub seed: u64,
    /// Handling of cells that run out of candidates
    pub policy: ContradictionPolicy,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            rows: DEFAULT_ROWS,
            cols: DEFAULT_COLS,
            seed: DEFAULT_SEED,
            policy: ContradictionPolicy::default(),
        }
    }
}

/// Emitted after every collapse; the caller may redraw or cancel between steps
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StepEvent {
    /// 1-based collapse counter
    pub iteration: usize,
    /// Cell that was collapsed
    pub position: Position,
    /// Tile it was collapsed to
    pub tile: TileId,
    /// Whether the tile came from a reseed of a contradicted cell
    pub reseeded: bool,
    /// Effect of the propagation that followed
    pub propagation: PropagationStats,
}

/// Summary of a generation run
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GenerationReport {
    /// Collapses performed
    pub steps: usize,
    /// Dequeued cells skipped because they were already resolved
    pub skipped: usize,
    /// Cells holding a resolved tile
    pub resolved: usize,
    /// Cells in the grid
    pub total_cells: usize,
    /// Contradicted cells that were resolved from the full catalog
    pub reseeded: Vec<Position>,
    /// Cells found emptied or conflicting during propagation, sorted, no repeats
    pub contradictions: Vec<Position>,
    /// Whether an observer stopped the run early
    pub cancelled: bool,
}

impl GenerationReport {
    /// Whether every cell resolved without any recorded contradiction
    pub fn is_clean(&self) -> bool {
        self.resolved == self.total_cells
            && self.contradictions.is_empty()
            && self.reseeded.is_empty()
    }
}

/// Owns everything one generation run needs and drives the collapse loop
///
/// Each step dequeues the lowest recorded entropy cell, collapses it with a
/// weighted draw and propagates the result outward.
pub struct GenerationSession {
    catalog: TileCatalog,
    constraints: AdjacencyConstraints,
    grid: Grid,
    queue: EntropyQueue,
    propagator: Propagator,
    random_selector: RandomSelector,
    policy: ContradictionPolicy,
    iteration: usize,
    report: GenerationReport,
}

impl GenerationSession {
    /// Learn adjacency rules from `pattern` and set up a grid in full superposition
    ///
    /// Every cell starts with the whole catalog as its domain, including tiles
    /// that never occur in the pattern.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The pattern holds a tile id outside the catalog
    /// - The grid dimensions are zero or too large
    pub fn new(
        config: SessionConfig,
        catalog: TileCatalog,
        pattern: &ExamplePattern,
    ) -> Result<Self> {
        if let Some(&tile) = pattern.cells().iter().find(|&&tile| tile >= catalog.len()) {
            return Err(AlgorithmError::UnknownTile {
                symbol: format!("#{tile}"),
            });
        }

        let constraints = AdjacencyConstraints::from_pattern(pattern, catalog.len());
        let grid = Grid::new(config.rows, config.cols, catalog.len())?;
        let queue = EntropyQueue::from_grid(&grid);

        tracing::debug!(
            rows = config.rows,
            cols = config.cols,
            tiles = catalog.len(),
            seed = config.seed,
            policy = ?config.policy,
            "generation session created"
        );

        Ok(Self {
            catalog,
            constraints,
            grid,
            queue,
            propagator: Propagator::new(),
            random_selector: RandomSelector::new(config.seed),
            policy: config.policy,
            iteration: 0,
            report: GenerationReport::default(),
        })
    }

    /// Create a session from a parsed sample definition
    ///
    /// # Errors
    ///
    /// Returns an error if the grid dimensions are invalid
    pub fn from_sample(config: SessionConfig, sample: &SampleDefinition) -> Result<Self> {
        Self::new(config, sample.catalog().clone(), sample.pattern())
    }

    /// Re-key the queue with a different entropy function
    ///
    /// Only meaningful before the first step; the queue is rebuilt from the
    /// current grid.
    #[must_use]
    pub fn with_queue_key(mut self, key: EntropyKey) -> Self {
        self.queue = EntropyQueue::with_key(&self.grid, key);
        self
    }

    /// Current grid state
    pub const fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Tile catalog of the run
    pub const fn catalog(&self) -> &TileCatalog {
        &self.catalog
    }

    /// Adjacency rules learned from the pattern
    pub const fn constraints(&self) -> &AdjacencyConstraints {
        &self.constraints
    }

    /// Contradiction policy of the run
    pub const fn policy(&self) -> ContradictionPolicy {
        self.policy
    }

    /// Collapses performed so far
    pub const fn iteration(&self) -> usize {
        self.iteration
    }

    /// Cells resolved so far, without rescanning the grid
    ///
    /// Every step resolves exactly one previously unresolved cell.
    pub const fn resolved_cells(&self) -> usize {
        self.report.steps
    }

    /// Queue entries not yet dequeued
    pub fn remaining(&self) -> usize {
        self.queue.len()
    }

    /// Whether the queue is exhausted
    pub fn is_finished(&self) -> bool {
        self.queue.is_empty()
    }

    /// Perform one select, collapse, propagate cycle
    ///
    /// Already resolved cells are skipped without counting as a step.
    /// Returns `Ok(None)` once the queue is exhausted.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The queue yields a position outside the grid
    /// - Under `ContradictionPolicy::Abort`, a cell to collapse has an empty
    ///   domain or propagation empties a domain
    pub fn step(&mut self) -> Result<Option<StepEvent>> {
        while let Some(entry) = self.queue.pop() {
            let position = entry.position;
            let grid_dimensions = self.grid.dimensions();
            let Some(cell) = self.grid.get_mut(position) else {
                return Err(AlgorithmError::IllegalQueueState {
                    position,
                    grid_dimensions,
                });
            };

            let (tile, reseeded) = match collapse_cell(
                cell,
                &self.catalog,
                &self.constraints,
                &mut self.random_selector,
            ) {
                CollapseOutcome::AlreadyResolved(_) => {
                    self.report.skipped += 1;
                    continue;
                }
                CollapseOutcome::Resolved(tile) => {
                    self.iteration += 1;
                    (tile, false)
                }
                CollapseOutcome::Contradiction => {
                    self.iteration += 1;
                    let contradiction = AlgorithmError::Contradiction {
                        position,
                        iteration: self.iteration,
                    };
                    if self.policy == ContradictionPolicy::Abort {
                        return Err(contradiction);
                    }
                    let tile = reseed_cell(
                        cell,
                        &self.catalog,
                        &self.constraints,
                        &mut self.random_selector,
                    )
                    .ok_or(contradiction)?;
                    tracing::debug!(
                        row = position[0],
                        col = position[1],
                        tile,
                        iteration = self.iteration,
                        "reseeded contradicted cell"
                    );
                    self.report.reseeded.push(position);
                    (tile, true)
                }
            };

            let propagation = self
                .propagator
                .propagate(&mut self.grid, &self.constraints, position, self.policy)
                .with_iteration(self.iteration)?;
            self.report
                .contradictions
                .extend(propagation.contradictions.iter().copied());
            self.report.steps += 1;

            tracing::trace!(
                iteration = self.iteration,
                row = position[0],
                col = position[1],
                tile,
                narrowed = propagation.narrowed,
                "collapsed cell"
            );

            return Ok(Some(StepEvent {
                iteration: self.iteration,
                position,
                tile,
                reseeded,
                propagation,
            }));
        }

        Ok(None)
    }

    /// Run until the queue is exhausted
    ///
    /// # Errors
    ///
    /// Returns the first error produced by [`Self::step`]
    pub fn run(&mut self) -> Result<GenerationReport> {
        self.run_with(|_, _| ControlFlow::Continue(()))
    }

    /// Run until the queue is exhausted or `observer` breaks
    ///
    /// The observer sees the grid after every collapse, which is where a
    /// caller redraws or checks for cancellation.
    ///
    /// # Errors
    ///
    /// Returns the first error produced by [`Self::step`]
    pub fn run_with<F>(&mut self, mut observer: F) -> Result<GenerationReport>
    where
        F: FnMut(&Grid, &StepEvent) -> ControlFlow<()>,
    {
        while let Some(event) = self.step()? {
            if observer(&self.grid, &event).is_break() {
                self.report.cancelled = true;
                break;
            }
        }

        let report = self.report();
        tracing::info!(
            steps = report.steps,
            skipped = report.skipped,
            resolved = report.resolved,
            total = report.total_cells,
            contradictions = report.contradictions.len(),
            reseeded = report.reseeded.len(),
            cancelled = report.cancelled,
            "generation finished"
        );
        Ok(report)
    }

    /// Snapshot of the run statistics so far
    pub fn report(&self) -> GenerationReport {
        let mut report = self.report.clone();
        report.resolved = self.grid.resolved_count();
        report.total_cells = self.grid.rows() * self.grid.cols();
        report.contradictions.sort_unstable();
        report.contradictions.dedup();
        report
    }
}

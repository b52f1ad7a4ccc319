use crate::spatial::cell::Cell;
use crate::spatial::grid::{Grid, Position};
use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// Key extractor deciding collapse order; lower keys are dequeued first
pub type EntropyKey = fn(&Cell) -> usize;

/// Default key: domain cardinality (tile weights are ignored for ordering)
pub fn domain_size(cell: &Cell) -> usize {
    cell.entropy()
}

/// Heap entry holding the key observed when the cell was enqueued
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueueEntry {
    /// Recorded key, never refreshed after enqueue
    pub entropy: usize,
    /// Grid position of the cell
    pub position: Position,
}

impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed so the max-heap yields the smallest key, then the smallest position
        other
            .entropy
            .cmp(&self.entropy)
            .then_with(|| other.position.cmp(&self.position))
    }
}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Min-priority queue of cells ordered by the entropy seen at enqueue time
///
/// Loaded once with every cell of the grid. Keys are snapshots: propagation
/// shrinking a domain later does not reorder the queue, so the collapse order
/// only approximates lowest-entropy-first.
#[derive(Debug, Clone, Default)]
pub struct EntropyQueue {
    heap: BinaryHeap<QueueEntry>,
}

impl EntropyQueue {
    /// Enqueue every cell of `grid` keyed by domain size
    pub fn from_grid(grid: &Grid) -> Self {
        Self::with_key(grid, domain_size)
    }

    /// Enqueue every cell of `grid` keyed by `key`
    pub fn with_key(grid: &Grid, key: EntropyKey) -> Self {
        let heap = grid
            .cells()
            .map(|(position, cell)| QueueEntry {
                entropy: key(cell),
                position,
            })
            .collect();
        Self { heap }
    }

    /// Add a single position with an explicit key
    pub fn push(&mut self, position: Position, entropy: usize) {
        self.heap.push(QueueEntry { entropy, position });
    }

    /// Remove the entry with the smallest recorded key
    pub fn pop(&mut self) -> Option<QueueEntry> {
        self.heap.pop()
    }

    /// Number of pending entries
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Whether no entries remain
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}

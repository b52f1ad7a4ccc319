/// Fixed-size bitset used for domains and allowed-neighbor sets
pub mod bitset;
/// Weighted random collapse of a single cell
pub mod collapse;
/// Generation session orchestrating select, collapse and propagate
pub mod executor;
/// Constraint propagation by iterative flood fill
pub mod propagation;
/// Entropy-ordered queue of cells awaiting collapse
pub mod queue;

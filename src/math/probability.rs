/// Sum of integer weights, widened so large catalogs cannot overflow
pub fn total_weight(weights: &[u32]) -> u64 {
    weights.iter().map(|&w| u64::from(w)).sum()
}

/// Cumulative-weight lookup: index whose weight interval contains `draw`
///
/// `draw` is expected in `0..total_weight(weights)`; each index owns an
/// interval as wide as its weight, so zero-weight entries are never chosen.
/// Returns `None` when `draw` falls outside the total.
pub fn weighted_index(weights: &[u32], draw: u64) -> Option<usize> {
    let mut cumulative = 0u64;
    for (i, &weight) in weights.iter().enumerate() {
        cumulative += u64::from(weight);
        if draw < cumulative {
            return Some(i);
        }
    }
    None
}

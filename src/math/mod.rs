//! Mathematical utilities for the algorithm

/// Weighted selection and probability helpers
pub mod probability;

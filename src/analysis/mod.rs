//! Analysis of example patterns into generation rules

/// Adjacency constraint extraction and consistency checking
pub mod adjacency;
/// Example patterns and sample definition parsing
pub mod patterns;

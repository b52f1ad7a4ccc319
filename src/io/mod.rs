//! Input/output: configuration, errors, rendering and the command-line surface

/// Command-line interface
pub mod cli;
/// Constants and runtime defaults
pub mod configuration;
/// Error types and context helpers
pub mod error;
/// Grid rendering and PNG export
pub mod image;
/// Terminal progress display
pub mod progress;
/// Animated capture of the generation process
pub mod visualization;

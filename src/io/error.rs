//! Error types and context management for generation operations

use std::fmt;
use std::path::PathBuf;

/// Main error type for all generation operations
#[derive(Debug)]
pub enum AlgorithmError {
    /// Example pattern is empty or not rectangular
    InvalidPattern {
        /// Description of what's wrong with the pattern
        reason: String,
    },

    /// Pattern references a symbol that has no weight in the tile catalog
    UnknownTile {
        /// The symbol that could not be resolved
        symbol: String,
    },

    /// Configuration parameter validation failed
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// A cell was narrowed to an empty domain, or propagation forbade the
    /// tile an already resolved cell holds
    Contradiction {
        /// Grid position (row, col) of the contradicted cell
        position: [usize; 2],
        /// Generation step when this occurred
        iteration: usize,
    },

    /// The entropy queue produced a handle that does not belong to the grid
    ///
    /// Indicates an internal invariant violation rather than bad input
    IllegalQueueState {
        /// The offending position
        position: [usize; 2],
        /// Grid dimensions (rows, cols)
        grid_dimensions: (usize, usize),
    },

    /// Sample definition text could not be parsed
    SampleParse {
        /// 1-based line number of the offending line
        line: usize,
        /// Description of the problem
        reason: String,
    },

    /// Failed to save a rendered image to disk
    ImageExport {
        /// Path where export was attempted
        path: PathBuf,
        /// Underlying image export error
        source: image::ImageError,
    },

    /// General file system operation failure
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },
}

impl fmt::Display for AlgorithmError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidPattern { reason } => {
                write!(f, "Invalid example pattern: {reason}")
            }
            Self::UnknownTile { symbol } => {
                write!(f, "Tile '{symbol}' has no weight in the tile catalog")
            }
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::Contradiction {
                position,
                iteration,
            } => {
                write!(
                    f,
                    "Contradiction at cell ({}, {}) during step {iteration}",
                    position[0], position[1]
                )
            }
            Self::IllegalQueueState {
                position,
                grid_dimensions,
            } => {
                write!(
                    f,
                    "Entropy queue returned cell ({}, {}) outside the {}x{} grid",
                    position[0], position[1], grid_dimensions.0, grid_dimensions.1
                )
            }
            Self::SampleParse { line, reason } => {
                write!(f, "Sample definition error on line {line}: {reason}")
            }
            Self::ImageExport { path, source } => {
                write!(
                    f,
                    "Failed to export image to '{}': {source}",
                    path.display()
                )
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "File system error during {operation} on '{}': {source}",
                    path.display()
                )
            }
        }
    }
}

impl std::error::Error for AlgorithmError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ImageExport { source, .. } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for generation results
pub type Result<T> = std::result::Result<T, AlgorithmError>;

/// Additional context to enrich error messages
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// Current generation step
    pub iteration: Option<usize>,
    /// Grid position where the error occurred
    pub position: Option<[usize; 2]>,
    /// Operation being performed
    pub operation: Option<&'static str>,
}

/// Enriches error messages with generation state information
pub trait WithContext<T> {
    /// Add error context to a Result
    ///
    /// # Errors
    ///
    /// Propagates the original error with additional context applied
    fn with_context(self, context: ErrorContext) -> Result<T>;

    /// Add just the iteration context
    ///
    /// # Errors
    ///
    /// Propagates the original error with the iteration applied
    fn with_iteration(self, iteration: usize) -> Result<T>;
}

impl<T, E> WithContext<T> for std::result::Result<T, E>
where
    E: Into<AlgorithmError>,
{
    fn with_context(self, context: ErrorContext) -> Result<T> {
        self.map_err(|e| {
            let mut error = e.into();
            // Only contradictions carry positional state worth rewriting
            if let AlgorithmError::Contradiction {
                iteration,
                position,
            } = &mut error
            {
                if let Some(iter) = context.iteration {
                    *iteration = iter;
                }
                if let Some(pos) = context.position {
                    *position = pos;
                }
            }
            error
        })
    }

    fn with_iteration(self, iteration: usize) -> Result<T> {
        self.with_context(ErrorContext {
            iteration: Some(iteration),
            ..Default::default()
        })
    }
}

impl From<std::io::Error> for AlgorithmError {
    fn from(err: std::io::Error) -> Self {
        Self::FileSystem {
            path: PathBuf::from("<unknown>"),
            operation: "unknown",
            source: err,
        }
    }
}

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> AlgorithmError {
    AlgorithmError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create an invalid pattern error
pub fn invalid_pattern(reason: &impl ToString) -> AlgorithmError {
    AlgorithmError::InvalidPattern {
        reason: reason.to_string(),
    }
}

//! Tests for error messages and context enrichment

#[cfg(test)]
mod tests {
    use std::error::Error;
    use std::path::PathBuf;
    use wavetile::io::error::{
        AlgorithmError, ErrorContext, Result, WithContext, invalid_parameter, invalid_pattern,
    };

    // Tests display messages name the offending input
    // Verified by swapping row and column in the contradiction message
    #[test]
    fn test_display_messages() {
        let contradiction = AlgorithmError::Contradiction {
            position: [3, 7],
            iteration: 12,
        };
        assert_eq!(
            contradiction.to_string(),
            "Contradiction at cell (3, 7) during step 12"
        );

        let queue = AlgorithmError::IllegalQueueState {
            position: [9, 1],
            grid_dimensions: (4, 5),
        };
        assert_eq!(
            queue.to_string(),
            "Entropy queue returned cell (9, 1) outside the 4x5 grid"
        );

        let unknown = AlgorithmError::UnknownTile {
            symbol: "lava".to_string(),
        };
        assert_eq!(
            unknown.to_string(),
            "Tile 'lava' has no weight in the tile catalog"
        );

        let parse = AlgorithmError::SampleParse {
            line: 4,
            reason: "missing tile weight".to_string(),
        };
        assert_eq!(
            parse.to_string(),
            "Sample definition error on line 4: missing tile weight"
        );
    }

    // Tests helper constructors fill every field
    // Verified by dropping the value from the parameter message
    #[test]
    fn test_helper_constructors() {
        let err = invalid_parameter("rows", &0, &"must be positive");
        assert_eq!(
            err.to_string(),
            "Invalid parameter 'rows' = '0': must be positive"
        );

        let err = invalid_pattern(&"pattern must be at least 1x1");
        assert_eq!(
            err.to_string(),
            "Invalid example pattern: pattern must be at least 1x1"
        );
    }

    // Tests context rewrites the position and step of contradictions only
    // Verified by applying context to every error variant
    #[test]
    fn test_with_context() {
        let result: Result<()> = Err(AlgorithmError::Contradiction {
            position: [0, 0],
            iteration: 0,
        });
        let err = result
            .with_context(ErrorContext {
                iteration: Some(5),
                position: Some([2, 3]),
                operation: Some("propagate"),
            })
            .unwrap_err();
        assert!(matches!(
            err,
            AlgorithmError::Contradiction {
                position: [2, 3],
                iteration: 5,
            }
        ));

        let other: Result<()> = Err(invalid_pattern(&"empty"));
        assert!(matches!(
            other.with_iteration(8),
            Err(AlgorithmError::InvalidPattern { .. })
        ));
    }

    // Tests I/O failures keep their source
    // Verified by returning None from Error::source
    #[test]
    fn test_io_error_source() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: AlgorithmError = io.into();
        assert!(err.source().is_some());

        let err = AlgorithmError::FileSystem {
            path: PathBuf::from("maps/out.png"),
            operation: "create directory",
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert_eq!(
            err.to_string(),
            "File system error during create directory on 'maps/out.png': denied"
        );
    }
}
